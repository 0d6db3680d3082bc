//! Parenthesized, Lisp-flavoured rendering of the AST. Used by the `parse`
//! subcommand and by parser tests to assert tree shape without pattern
//! matching every node.

use crate::expr::{Expr, LiteralValue};
use crate::stmt::Stmt;

pub struct AstPrinter;

impl AstPrinter {
    /// Render a whole program, one statement per line.
    pub fn print_program(&self, statements: &[Stmt]) -> String {
        statements
            .iter()
            .map(|stmt| self.print_stmt(stmt))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn print_stmt(&self, stmt: &Stmt) -> String {
        match stmt {
            Stmt::Expression(expr) => format!("(expr {})", self.print_expr(expr)),

            Stmt::Var { name, initializer } => match initializer {
                Some(init) => format!("(let {} {})", name.lexeme, self.print_expr(init)),
                None => format!("(let {})", name.lexeme),
            },

            Stmt::Block(statements) => {
                let inner: Vec<String> =
                    statements.iter().map(|s| self.print_stmt(s)).collect();

                format!("(block {})", inner.join(" "))
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => match else_branch {
                Some(else_branch) => format!(
                    "(if {} {} {})",
                    self.print_expr(condition),
                    self.print_stmt(then_branch),
                    self.print_stmt(else_branch)
                ),
                None => format!(
                    "(if {} {})",
                    self.print_expr(condition),
                    self.print_stmt(then_branch)
                ),
            },

            Stmt::While { condition, body } => format!(
                "(while {} {})",
                self.print_expr(condition),
                self.print_stmt(body)
            ),

            Stmt::Function { name, params, body } => {
                let params: Vec<&str> =
                    params.iter().map(|p| p.lexeme.as_str()).collect();
                let body: Vec<String> = body.iter().map(|s| self.print_stmt(s)).collect();

                format!(
                    "(fn {} ({}) {})",
                    name.lexeme,
                    params.join(" "),
                    body.join(" ")
                )
            }

            Stmt::Return { value, .. } => match value {
                Some(value) => format!("(return {})", self.print_expr(value)),
                None => "(return)".to_string(),
            },
        }
    }

    pub fn print_expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Literal(literal) => match literal {
                LiteralValue::Number(n) => n.to_string(),
                LiteralValue::Str(s) => s.clone(),
                LiteralValue::True => "true".to_string(),
                LiteralValue::False => "false".to_string(),
                LiteralValue::Nil => "nil".to_string(),
            },

            Expr::Unary { operator, right } => {
                format!("({} {})", operator.lexeme, self.print_expr(right))
            }

            Expr::Binary {
                left,
                operator,
                right,
            } => format!(
                "({} {} {})",
                operator.lexeme,
                self.print_expr(left),
                self.print_expr(right)
            ),

            Expr::Logical {
                left,
                operator,
                right,
            } => format!(
                "({} {} {})",
                operator.lexeme,
                self.print_expr(left),
                self.print_expr(right)
            ),

            Expr::Grouping(inner) => format!("(group {})", self.print_expr(inner)),

            Expr::Variable(name) => name.lexeme.clone(),

            Expr::Assign { name, value } => {
                format!("(= {} {})", name.lexeme, self.print_expr(value))
            }

            Expr::Call {
                callee, arguments, ..
            } => {
                let mut parts: Vec<String> = vec![self.print_expr(callee)];
                parts.extend(arguments.iter().map(|a| self.print_expr(a)));

                format!("(call {})", parts.join(" "))
            }
        }
    }
}
