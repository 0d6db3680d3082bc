use serde::Serialize;

use crate::expr::Expr;
use crate::token::Token;

/// **Abstract-syntax-tree node** for *statements*. A program is a sequence of
/// these nodes returned by [`crate::parser::Parser::parse`].
///
/// There is no `For` variant: the parser desugars `for` loops into a `While`
/// wrapped in `Block`s (initializer before, increment appended to the body).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    /// Stand-alone expression terminated by a semicolon.
    Expression(Expr),

    /// Variable declaration: `"let" IDENT ("=" initializer)? ";"`.
    Var {
        name: Token,
        initializer: Option<Expr>,
    },

    /// Braced scope containing zero or more declarations/statements.
    Block(Vec<Stmt>),

    /// `if` / `else` conditional.
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    /// `while` loop.
    While { condition: Expr, body: Box<Stmt> },

    /// Function declaration — becomes a first-class callable value.
    Function {
        name: Token,

        /// Parameter name tokens.
        params: Vec<Token>,

        /// Body executed when the function is called.
        body: Vec<Stmt>,
    },

    /// `return` statement inside a function body.
    Return {
        /// The `return` keyword token (for runtime error locations).
        keyword: Token,

        /// Optional expression to return. Absent ⇒ `nil` is returned.
        value: Option<Expr>,
    },
}
