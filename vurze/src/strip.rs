//! Namespace annotation stripper.
//!
//! Parses a Python module, finds every decorator owned by the configured
//! namespace on a function, async function or class, and deletes the source
//! line each such decorator starts on. All other lines are kept byte for byte
//! and in order.
//!
//! ```
//! use vurze::strip::AnnotationStripper;
//!
//! let source = "@vurze.sign\n@other.tool\ndef f():\n    pass\n";
//! let result = AnnotationStripper::default().strip(source).unwrap();
//! assert!(result.found);
//! assert_eq!(result.text, "@other.tool\ndef f():\n    pass\n");
//! ```
//!
//! Only the first line of a decorator is removed. A call whose arguments
//! continue on following lines leaves those continuation lines in place.

use crate::constants::{DEFAULT_NAMESPACE, IDENTIFIER_RE};
use crate::utils::{split_lines_keep_ends, terminator_len, LineIndex};
use crate::visitor::{DefinitionCollector, DefinitionKind, DefinitionNode};
use ruff_python_ast::visitor::Visitor;
use ruff_python_parser::parse_module;
use serde::Serialize;
use std::collections::BTreeSet;

/// 0-indexed line offsets condemned for deletion.
pub type LineRemovalSet = BTreeSet<usize>;

/// Errors produced by the stripper.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StripError {
    /// The source does not parse as Python.
    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        /// 1-indexed line of the error.
        line: usize,
        /// 1-indexed byte column of the error.
        column: usize,
        /// Parser message.
        message: String,
    },
    /// The namespace is not a plain identifier and could never match.
    #[error("invalid namespace `{0}`: expected a Python identifier")]
    InvalidNamespace(String),
}

/// A namespace-owned decorator that was removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovedAnnotation {
    /// 1-indexed line the decorator started on.
    pub line: usize,
    /// Rendered decorator, e.g. `vurze.sign`.
    pub decorator: String,
    /// Name of the decorated definition.
    pub definition: String,
    /// Kind of the decorated definition.
    pub kind: DefinitionKind,
}

/// Outcome of stripping one source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StripResult {
    /// Source with the condemned lines removed.
    #[serde(skip)]
    pub text: String,
    /// Whether any line was removed.
    pub found: bool,
    /// Removed lines, 1-indexed, ascending.
    pub removed_lines: Vec<usize>,
    /// Removed decorators in visitation order.
    pub removed: Vec<RemovedAnnotation>,
}

/// Strips the decorators of one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationStripper {
    namespace: String,
}

impl Default for AnnotationStripper {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_owned(),
        }
    }
}

impl AnnotationStripper {
    /// Creates a stripper for `namespace`.
    ///
    /// # Errors
    ///
    /// Returns [`StripError::InvalidNamespace`] if `namespace` is not an identifier.
    pub fn new(namespace: impl Into<String>) -> Result<Self, StripError> {
        let namespace = namespace.into();
        if !IDENTIFIER_RE().is_match(&namespace) {
            return Err(StripError::InvalidNamespace(namespace));
        }
        Ok(Self { namespace })
    }

    /// The namespace this stripper removes.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Parses `source` and returns every function, async function and class definition.
    pub fn collect_definitions(&self, source: &str) -> Result<Vec<DefinitionNode>, StripError> {
        let line_index = LineIndex::new(source);
        let parsed = parse_module(source).map_err(|e| {
            let (line, column) = line_index.line_column(e.location.start());
            StripError::Syntax {
                line,
                column,
                message: e.error.to_string(),
            }
        })?;

        let module = parsed.into_syntax();
        let mut collector = DefinitionCollector::new(&line_index);
        for stmt in &module.body {
            collector.visit_stmt(stmt);
        }
        Ok(collector.definitions)
    }

    /// Computes the 0-indexed lines holding a namespace-owned decorator.
    pub fn find_annotation_lines(&self, source: &str) -> Result<LineRemovalSet, StripError> {
        Ok(self
            .collect_definitions(source)?
            .iter()
            .flat_map(|def| def.owned_annotations(&self.namespace))
            .map(|annotation| annotation.line - 1)
            .collect())
    }

    /// Removes every namespace-owned decorator line from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`StripError::Syntax`] if `source` does not parse. No partial
    /// output is produced.
    pub fn strip(&self, source: &str) -> Result<StripResult, StripError> {
        let definitions = self.collect_definitions(source)?;

        let mut condemned = LineRemovalSet::new();
        let mut removed = Vec::new();
        for def in &definitions {
            for annotation in def.owned_annotations(&self.namespace) {
                condemned.insert(annotation.line - 1);
                removed.push(RemovedAnnotation {
                    line: annotation.line,
                    decorator: annotation.expr.display_name(),
                    definition: def.name.clone(),
                    kind: def.kind,
                });
            }
        }

        Ok(StripResult {
            text: remove_lines(source, &condemned),
            found: !condemned.is_empty(),
            removed_lines: condemned.iter().map(|offset| offset + 1).collect(),
            removed,
        })
    }
}

/// Deletes the given 0-indexed lines from `source`.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`, matching the parser's line
/// numbering, and each kept line keeps its own terminator. Removing the
/// final, unterminated line also drops the terminator before it. Deletion
/// runs in descending order; ascending order would shift the later offsets.
/// Offsets past the end are ignored.
pub fn remove_lines(source: &str, condemned: &LineRemovalSet) -> String {
    if condemned.is_empty() {
        return source.to_owned();
    }
    let mut lines = split_lines_keep_ends(source);
    for &offset in condemned.iter().rev() {
        if offset >= lines.len() {
            continue;
        }
        let removed = lines.remove(offset);
        if offset == lines.len() && terminator_len(removed) == 0 {
            if let Some(last) = lines.last_mut() {
                let line: &str = *last;
                *last = &line[..line.len() - terminator_len(line)];
            }
        }
    }
    lines.concat()
}

/// Strips `namespace`-owned decorators from `source`.
///
/// Returns the modified text and whether anything was removed.
pub fn strip_annotations(source: &str, namespace: &str) -> Result<(String, bool), StripError> {
    let result = AnnotationStripper::new(namespace)?.strip(source)?;
    Ok((result.text, result.found))
}
