//! Tests for stripping namespace decorators from Python source.
#![allow(clippy::unwrap_used, clippy::needless_raw_string_hashes)]

use vurze::strip::{remove_lines, AnnotationStripper, StripError};
use vurze::strip_annotations;
use vurze::visitor::DefinitionKind;

fn strip(source: &str) -> (String, bool) {
    strip_annotations(source, "vurze").unwrap()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_selective_removal_in_stack() {
    let source = r#"class Service:
    @vurze.sign
    @other.tool
    def handle(self):
        return 1
"#;
    let (text, found) = strip(source);
    assert!(found);
    assert_eq!(
        text,
        r#"class Service:
    @other.tool
    def handle(self):
        return 1
"#
    );
}

#[test]
fn test_call_form_single_line() {
    let source = "@vurze.verify(strict=True)\ndef f():\n    pass\n";
    let (text, found) = strip(source);
    assert!(found);
    assert_eq!(text, "def f():\n    pass\n");
}

#[test]
fn test_call_form_continuation_line_is_kept() {
    // Only the line the decorator starts on is removed.
    let source = "@vurze.verify(strict=True,\n              level=2)\ndef f():\n    pass\n";
    let (text, found) = strip(source);
    assert!(found);
    assert_eq!(text, "              level=2)\ndef f():\n    pass\n");
}

#[test]
fn test_bare_prefix_match() {
    let source = "@vurze_legacy\ndef f():\n    pass\n";
    let (text, found) = strip(source);
    assert!(found);
    assert_eq!(text, "def f():\n    pass\n");
}

#[test]
fn test_bare_call_prefix_match() {
    let source = "@vurze_legacy(key='k')\nclass C:\n    pass\n";
    let (text, found) = strip(source);
    assert!(found);
    assert_eq!(text, "class C:\n    pass\n");
}

#[test]
fn test_attribute_base_must_match_exactly() {
    let source = "@vurzex.other\ndef f():\n    pass\n\n@vurzex.other()\ndef g():\n    pass\n";
    let (text, found) = strip(source);
    assert!(!found);
    assert_eq!(text, source);
}

#[test]
fn test_deep_attribute_chain_not_removed() {
    let source = "@vurze.sub.sign\ndef f():\n    pass\n\n@vurze.sub.sign()\ndef g():\n    pass\n";
    let (text, found) = strip(source);
    assert!(!found);
    assert_eq!(text, source);
}

#[test]
fn test_aliased_import_not_removed() {
    let source = "import vurze as vz\n\n@vz.sign\ndef f():\n    pass\n";
    let (text, found) = strip(source);
    assert!(!found);
    assert_eq!(text, source);
}

#[test]
fn test_async_function() {
    let source = "@vurze.sign\nasync def fetch():\n    return await other()\n";
    let (text, found) = strip(source);
    assert!(found);
    assert_eq!(text, "async def fetch():\n    return await other()\n");
}

#[test]
fn test_nested_definitions_are_independent() {
    let source = r#"@vurze.sign
class Outer:
    @keep.me
    def method(self):
        @vurze.verify()
        def inner():
            pass
        return inner
"#;
    let (text, found) = strip(source);
    assert!(found);
    assert_eq!(
        text,
        r#"class Outer:
    @keep.me
    def method(self):
        def inner():
            pass
        return inner
"#
    );
}

#[test]
fn test_definitions_inside_compound_statements() {
    let source = r#"if True:
    @vurze.sign
    def a():
        pass
try:
    @vurze.sign
    def b():
        pass
except ImportError:
    pass
with ctx():
    @vurze.sign
    class C:
        pass
"#;
    let (text, found) = strip(source);
    assert!(found);
    assert!(!text.contains("@vurze"));
    assert_eq!(text.lines().count(), source.lines().count() - 3);
}

#[test]
fn test_decorators_elsewhere_untouched() {
    // A matching name that is not a decorator is left alone.
    let source = "x = vurze.sign\n# @vurze.sign\ns = \"\"\"\n@vurze.sign\n\"\"\"\n";
    let (text, found) = strip(source);
    assert!(!found);
    assert_eq!(text, source);
}

#[test]
fn test_comments_and_formatting_preserved() {
    let source = "# header\n\n\n@vurze.sign  \n@dataclass(frozen=True)   # keep\nclass  Point :\n    x: int = 1  # trailing\n";
    let (text, found) = strip(source);
    assert!(found);
    assert_eq!(
        text,
        "# header\n\n\n@dataclass(frozen=True)   # keep\nclass  Point :\n    x: int = 1  # trailing\n"
    );
}

#[test]
fn test_crlf_line_endings_preserved() {
    let source = "@vurze.sign\r\ndef f():\r\n    pass\r\n";
    let (text, found) = strip(source);
    assert!(found);
    assert_eq!(text, "def f():\r\n    pass\r\n");
}

#[test]
fn test_lone_carriage_return_lines_kept() {
    let source = "x = 1\r@vurze.sign\ndef f():\n    pass\n";
    let (text, found) = strip(source);
    assert!(found);
    assert_eq!(text, "x = 1\rdef f():\n    pass\n");
}

#[test]
fn test_carriage_return_only_file() {
    let source = "import vurze\r\r@vurze.sign\r@keep\rdef f():\r    pass\r";
    let result = AnnotationStripper::default().strip(source).unwrap();
    assert_eq!(result.removed_lines, vec![3]);
    assert_eq!(result.text, "import vurze\r\r@keep\rdef f():\r    pass\r");
}

#[test]
fn test_mentions_before_decorator_survive() {
    let source = r#"# vurze signs the function below
NOTE = "@vurze.sign"; x = vurze
@vurze.sign
def f():
    pass
"#;
    let (text, found) = strip(source);
    assert!(found);
    assert_eq!(
        text,
        r#"# vurze signs the function below
NOTE = "@vurze.sign"; x = vurze
def f():
    pass
"#
    );
}

#[test]
fn test_no_trailing_newline() {
    let source = "@vurze.sign\ndef f():\n    pass";
    let (text, _) = strip(source);
    assert_eq!(text, "def f():\n    pass");
}

#[test]
fn test_empty_file() {
    assert_eq!(strip(""), (String::new(), false));
}

#[test]
fn test_custom_namespace() {
    let source = "@vurze.sign\n@acme.sign\ndef f():\n    pass\n";
    let (text, found) = strip_annotations(source, "acme").unwrap();
    assert!(found);
    assert_eq!(text, "@vurze.sign\ndef f():\n    pass\n");
}

// =============================================================================
// Properties
// =============================================================================

const SAMPLE: &str = r#"import vurze

@vurze.sign
@functools.cache
def one():
    return 1

class Two:
    @vurze_legacy
    @vurze.verify(
        strict=True)
    async def two(self):
        return 2

@other
def three():
    pass
"#;

#[test]
fn test_idempotent() {
    let (once, found) = strip(SAMPLE);
    assert!(found);
    let (twice, found_again) = strip(&once);
    assert!(!found_again);
    assert_eq!(once, twice);
}

#[test]
fn test_line_count_invariant() {
    let stripper = AnnotationStripper::default();
    let condemned = stripper.find_annotation_lines(SAMPLE).unwrap();
    let result = stripper.strip(SAMPLE).unwrap();
    assert_eq!(condemned.len(), 3);
    assert_eq!(
        result.text.split('\n').count(),
        SAMPLE.split('\n').count() - condemned.len()
    );
    assert_eq!(result.removed_lines, vec![3, 9, 10]);
}

#[test]
fn test_remaining_lines_preserved_in_order() {
    let result = AnnotationStripper::default().strip(SAMPLE).unwrap();
    let original: Vec<&str> = SAMPLE.split('\n').collect();
    let kept: Vec<&str> = original
        .iter()
        .enumerate()
        .filter(|(i, _)| !result.removed_lines.contains(&(i + 1)))
        .map(|(_, line)| *line)
        .collect();
    let stripped: Vec<&str> = result.text.split('\n').collect();
    assert_eq!(kept, stripped);
}

#[test]
fn test_identity_without_matches() {
    let source = "@property\ndef f(self):\n    return 1\n\nclass A(B):\n    pass\n";
    let result = AnnotationStripper::default().strip(source).unwrap();
    assert!(!result.found);
    assert!(result.removed.is_empty());
    assert_eq!(result.text, source);
}

#[test]
fn test_removed_annotation_details() {
    let result = AnnotationStripper::default().strip(SAMPLE).unwrap();
    let summary: Vec<(usize, &str, &str, DefinitionKind)> = result
        .removed
        .iter()
        .map(|r| (r.line, r.decorator.as_str(), r.definition.as_str(), r.kind))
        .collect();
    assert_eq!(
        summary,
        vec![
            (3, "vurze.sign", "one", DefinitionKind::Function),
            (9, "vurze_legacy", "two", DefinitionKind::AsyncFunction),
            (10, "vurze.verify(...)", "two", DefinitionKind::AsyncFunction),
        ]
    );
}

#[test]
fn test_collect_definitions() {
    let defs = AnnotationStripper::default()
        .collect_definitions(SAMPLE)
        .unwrap();
    let names: Vec<(&str, DefinitionKind, usize)> = defs
        .iter()
        .map(|d| (d.name.as_str(), d.kind, d.annotations.len()))
        .collect();
    assert_eq!(
        names,
        vec![
            ("one", DefinitionKind::Function, 2),
            ("Two", DefinitionKind::Class, 0),
            ("two", DefinitionKind::AsyncFunction, 2),
            ("three", DefinitionKind::Function, 1),
        ]
    );
    assert_eq!(defs[0].line, 5);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_syntax_error_produces_no_output() {
    let err = strip_annotations("@vurze.sign\ndef broken(:\n    pass\n", "vurze").unwrap_err();
    assert!(matches!(err, StripError::Syntax { line: 2, .. }));
}

#[test]
fn test_indentation_error() {
    let err = AnnotationStripper::default()
        .strip("def f():\npass\n")
        .unwrap_err();
    assert!(matches!(err, StripError::Syntax { .. }));
    assert!(err.to_string().starts_with("syntax error at line"));
}

#[test]
fn test_unbalanced_brackets() {
    assert!(strip_annotations("@vurze.verify(\ndef f():\n    pass\n", "vurze").is_err());
}

#[test]
fn test_remove_lines_descending_order() {
    let condemned = [1, 3].into_iter().collect();
    assert_eq!(remove_lines("0\n1\n2\n3\n4", &condemned), "0\n2\n4");
}
