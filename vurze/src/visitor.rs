//! Definition visitor.
//!
//! Walks the parsed module and records every function, async function and
//! class definition together with its decorator list. Only these three
//! definition kinds are inspected; every other statement is merely descended
//! into so that definitions nested in `if`, `try`, `with`, `match`, loops,
//! classes and functions are found as well.

use crate::annotation::AnnotationExpr;
use crate::utils::LineIndex;
use ruff_python_ast::visitor::{self, Visitor};
use ruff_python_ast::{Decorator, Identifier, Stmt};
use ruff_text_size::Ranged;
use serde::Serialize;

/// Kind of a definition whose decorators are inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefinitionKind {
    /// `def`
    Function,
    /// `async def`
    AsyncFunction,
    /// `class`
    Class,
}

/// A decorator attached to a definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    /// Lowered expression.
    pub expr: AnnotationExpr,
    /// 1-indexed line where the decorator expression starts.
    pub line: usize,
}

/// A function, async function or class definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinitionNode {
    /// What kind of definition this is.
    pub kind: DefinitionKind,
    /// Defined name.
    pub name: String,
    /// 1-indexed line of the defined name.
    pub line: usize,
    /// Decorators in source order, possibly empty.
    pub annotations: Vec<Annotation>,
}

impl DefinitionNode {
    /// Annotations owned by `namespace`.
    pub fn owned_annotations<'a>(
        &'a self,
        namespace: &'a str,
    ) -> impl Iterator<Item = &'a Annotation> + 'a {
        self.annotations
            .iter()
            .filter(move |annotation| annotation.expr.belongs_to(namespace))
    }
}

/// Collects [`DefinitionNode`]s from a module body.
pub struct DefinitionCollector<'a> {
    line_index: &'a LineIndex,
    /// Definitions in visitation (pre-order) order.
    pub definitions: Vec<DefinitionNode>,
}

impl<'a> DefinitionCollector<'a> {
    /// Creates a collector that maps offsets through `line_index`.
    pub fn new(line_index: &'a LineIndex) -> Self {
        Self {
            line_index,
            definitions: Vec::new(),
        }
    }

    fn record(&mut self, kind: DefinitionKind, name: &Identifier, decorators: &[Decorator]) {
        let annotations = decorators
            .iter()
            .map(|decorator| Annotation {
                expr: AnnotationExpr::from_expr(&decorator.expression),
                // The expression, not the `@`, carries the line number.
                line: self.line_index.line_index(decorator.expression.start()),
            })
            .collect();

        self.definitions.push(DefinitionNode {
            kind,
            name: name.to_string(),
            line: self.line_index.line_index(name.start()),
            annotations,
        });
    }
}

impl<'a> Visitor<'a> for DefinitionCollector<'_> {
    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        match stmt {
            Stmt::FunctionDef(node) => {
                let kind = if node.is_async {
                    DefinitionKind::AsyncFunction
                } else {
                    DefinitionKind::Function
                };
                self.record(kind, &node.name, &node.decorator_list);
            }
            Stmt::ClassDef(node) => {
                self.record(DefinitionKind::Class, &node.name, &node.decorator_list);
            }
            _ => {}
        }
        visitor::walk_stmt(self, stmt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ruff_python_parser::parse_module;

    fn collect(source: &str) -> Vec<DefinitionNode> {
        let line_index = LineIndex::new(source);
        let module = parse_module(source).unwrap().into_syntax();
        let mut collector = DefinitionCollector::new(&line_index);
        for stmt in &module.body {
            collector.visit_stmt(stmt);
        }
        collector.definitions
    }

    #[test]
    fn test_kinds_and_order() {
        let defs = collect("class A:\n    def f(self): pass\n    async def g(self): pass\n");
        let kinds: Vec<_> = defs.iter().map(|d| (d.name.as_str(), d.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                ("A", DefinitionKind::Class),
                ("f", DefinitionKind::Function),
                ("g", DefinitionKind::AsyncFunction),
            ]
        );
    }

    #[test]
    fn test_parenthesized_decorator_line_is_expression_line() {
        let defs = collect("@(\n    vurze.sign\n)\ndef f(): pass\n");
        assert_eq!(defs[0].annotations[0].line, 2);
        assert_eq!(defs[0].line, 4);
    }

    #[test]
    fn test_owned_annotations() {
        let defs = collect("@vurze.sign\n@other\n@vurze_x()\ndef f(): pass\n");
        let lines: Vec<usize> = defs[0].owned_annotations("vurze").map(|a| a.line).collect();
        assert_eq!(lines, vec![1, 3]);
    }

    #[test]
    fn test_match_case_bodies() {
        let source = "match x:\n    case 1:\n        @vurze.sign\n        def f(): pass\n";
        let defs = collect(source);
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].annotations[0].line, 3);
    }
}
