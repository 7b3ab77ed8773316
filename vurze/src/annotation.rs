//! Classification of decorator expressions by shape and namespace ownership.
//!
//! A decorator is lowered from the parser's `Expr` into an [`AnnotationExpr`],
//! a small tagged shape that keeps only what ownership matching needs. Anything
//! the stripper cannot attribute statically collapses into
//! [`AnnotationExpr::Other`] and is never removed.

use ruff_python_ast::Expr;
use serde::Serialize;

/// Shape of a decorator expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum AnnotationExpr {
    /// `@name`
    BareRef {
        /// The identifier text.
        name: String,
    },
    /// `@base.member`, where `base` is a plain identifier.
    AttrRef {
        /// Left-hand identifier.
        base: String,
        /// Accessed attribute.
        member: String,
    },
    /// `@callee(...)`. The callee is only ever a `BareRef` or an `AttrRef`.
    Call {
        /// The called expression.
        callee: Box<AnnotationExpr>,
    },
    /// Attribute chains, subscripts, calls of calls and everything else.
    Other,
}

impl AnnotationExpr {
    /// Lowers a decorator expression.
    pub fn from_expr(expr: &Expr) -> Self {
        match expr {
            Expr::Call(call) => match Self::reference(&call.func) {
                Self::Other => Self::Other,
                callee => Self::Call {
                    callee: Box::new(callee),
                },
            },
            _ => Self::reference(expr),
        }
    }

    /// Lowers the two reference shapes; a call is not a reference.
    fn reference(expr: &Expr) -> Self {
        match expr {
            Expr::Name(name) => Self::BareRef {
                name: name.id.to_string(),
            },
            Expr::Attribute(attr) => match &*attr.value {
                Expr::Name(base) => Self::AttrRef {
                    base: base.id.to_string(),
                    member: attr.attr.to_string(),
                },
                _ => Self::Other,
            },
            _ => Self::Other,
        }
    }

    /// Whether this annotation belongs to `namespace`.
    ///
    /// A bare reference matches on prefix (`vurze_legacy`), an attribute
    /// access only when its base is exactly the namespace (`vurze.sign`, but
    /// not `vurzex.sign`). A call matches when its callee does.
    pub fn belongs_to(&self, namespace: &str) -> bool {
        match self {
            Self::BareRef { name } => name.starts_with(namespace),
            Self::AttrRef { base, .. } => base == namespace,
            Self::Call { callee } => callee.belongs_to(namespace),
            Self::Other => false,
        }
    }

    /// Dotted rendering used in reports, e.g. `vurze.verify(...)`.
    pub fn display_name(&self) -> String {
        match self {
            Self::BareRef { name } => name.clone(),
            Self::AttrRef { base, member } => format!("{base}.{member}"),
            Self::Call { callee } => format!("{}(...)", callee.display_name()),
            Self::Other => "<expr>".to_owned(),
        }
    }
}
