use serde::Serialize;

use crate::token::Token;

/// A **literal constant** that appears directly in the source code.
///
/// These variants are the *terminal leaves* of the expression tree. The parser
/// copies the value out of the literal token at parse time, so evaluation never
/// needs to re-inspect token payloads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LiteralValue {
    /// Integer literal. zero's numeric tower is i64-only.
    Number(i64),

    /// String literal without surrounding quotes.
    Str(String),

    /// The boolean constant `true`.
    True,

    /// The boolean constant `false`.
    False,

    /// The `nil` literal.
    Nil,
}

/// **Abstract-syntax-tree node** representing every kind of *expression* in
/// zero. Each node owns its children exclusively — the tree has no sharing and
/// no cycles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    /// A literal constant: number, string, `true`, `false`, or `nil`.
    Literal(LiteralValue),

    /// Prefix unary operator expression, e.g. `not ready` or `-42`.
    Unary {
        /// The operator token (`not`/`!` or `-`).
        operator: Token,
        /// Operand to which the operator is applied.
        right: Box<Expr>,
    },

    /// Infix binary operator expression, e.g. `a + b`, `x <= y`.
    Binary {
        left: Box<Expr>,
        /// Operator token such as `+`, `*`, `==`, …
        operator: Token,
        right: Box<Expr>,
    },

    /// Parenthesised sub-expression: `"(" expression ")"`.
    Grouping(Box<Expr>),

    /// Variable access — resolves to the identifier's current value at runtime.
    Variable(Token),

    /// Assignment expression: `identifier "=" expression`.
    Assign { name: Token, value: Box<Expr> },

    /// Short-circuiting logical operators `and` / `or`.
    Logical {
        left: Box<Expr>,
        operator: Token, // AND or OR
        right: Box<Expr>,
    },

    /// Function-call expression, e.g. `clock()` or `add(1, 2)`.
    Call {
        /// Expression that evaluates to a callable.
        callee: Box<Expr>,
        /// The closing `)` token — retained for error reporting.
        paren: Token,
        /// Argument list (may be empty).
        arguments: Vec<Expr>,
    },
}
