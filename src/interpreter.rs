//! Tree-walking evaluator for the zero language.
//!
//! The interpreter's only machine-relevant mutable state is the *current
//! environment* pointer, which evolves strictly as a stack: pushed on block
//! and call entry, popped on exit. [`Interpreter::execute_block`] restores the
//! previous frame on **every** exit path — normal completion, an early
//! `return`, or a runtime error — so `?`-propagation can never leak a frame
//! into sibling scopes.
//!
//! Early `return` is not an error. Statement execution yields a [`Flow`]
//! outcome: `Normal`, or `Return(value)` which unwinds through intermediate
//! blocks and loops until the nearest enclosing
//! [`crate::function::ZeroFunction::call`] converts it into the call's value.
//! The [`RuntimeError`] taxonomy is completely separate and only ever caught
//! by the top-level driver.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use chrono::Utc;
use log::{debug, info};
use thiserror::Error;

use crate::environment::Environment;
use crate::expr::{Expr, LiteralValue};
use crate::function::{NativeFunction, ZeroFunction};
use crate::stmt::Stmt;
use crate::token::{Token, TokenType};
use crate::value::Value;

/// A runtime evaluation error: the offending token plus a message.
///
/// Rendered as `[Line N] message`. Deliberately not unified with the
/// compile-time [`crate::error::ZeroError`] taxonomy.
#[derive(Debug, Error)]
#[error("[Line {}] {message}", .token.line)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl RuntimeError {
    pub fn new(token: &Token, message: impl Into<String>) -> Self {
        let message: String = message.into();

        debug!(
            "Runtime error at line {}: {}",
            token.line, message
        );

        Self {
            token: token.clone(),
            message,
        }
    }
}

/// Outcome of executing one statement.
///
/// `Return` is the single-shot, non-resumable early-return channel. It is a
/// tagged result, not an error: it must reach a function-call boundary and
/// nothing else may consume it.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Normal,
    Return(Value),
}

/// Shared handle to the interpreter's output channel. Program output (the
/// `print` native) and nothing else goes through it, which is also what makes
/// it capturable in tests.
pub type Output = Rc<RefCell<dyn Write>>;

pub struct Interpreter {
    /// Current frame. Changes on block/call entry, restored on exit.
    environment: Rc<RefCell<Environment>>,

    /// Global frame. Never reassigned after construction.
    globals: Rc<RefCell<Environment>>,

    output: Output,
}

impl Interpreter {
    /// Interpreter writing program output to stdout.
    pub fn new() -> Self {
        Self::with_output(Rc::new(RefCell::new(io::stdout())))
    }

    /// Interpreter writing program output to an arbitrary sink.
    pub fn with_output(output: Output) -> Self {
        info!("Initializing interpreter");

        let globals: Rc<RefCell<Environment>> = Rc::new(RefCell::new(Environment::new()));

        register_natives(&globals, &output);

        Self {
            environment: globals.clone(),
            globals,
            output,
        }
    }

    /// The global frame, for host-shell and test inspection.
    pub fn globals(&self) -> Rc<RefCell<Environment>> {
        self.globals.clone()
    }

    /// Handle to the output channel (shared with the `print` native).
    pub fn output(&self) -> Output {
        self.output.clone()
    }

    // ───────────────────────── statement execution ──────────────────────────

    /// Execute a program: top-level statements in order.
    ///
    /// The first runtime error stops the remaining statements and is returned
    /// to the caller for reporting. A `return` that reaches the top level has
    /// no enclosing call to unwind to; it simply ends execution.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        debug!("Interpreting {} statements", statements.len());

        for stmt in statements {
            match self.execute(stmt)? {
                Flow::Normal => {}

                Flow::Return(_) => {
                    debug!("Top-level return; ending execution");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Execute a single statement, dispatching by node kind.
    pub fn execute(&mut self, stmt: &Stmt) -> Result<Flow, RuntimeError> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;

                Ok(Flow::Normal)
            }

            Stmt::Var { name, initializer } => {
                let value: Value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                debug!("Defining variable '{}' = {}", name.lexeme, value);

                self.environment.borrow_mut().define(&name.lexeme, value);

                Ok(Flow::Normal)
            }

            Stmt::Block(statements) => {
                let env: Environment = Environment::with_enclosing(self.environment.clone());

                self.execute_block(statements, env)
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }

            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    match self.execute(body)? {
                        Flow::Normal => {}
                        ret @ Flow::Return(_) => return Ok(ret),
                    }
                }

                Ok(Flow::Normal)
            }

            Stmt::Function { name, params, body } => {
                // Lexical closure capture: the environment active *here*, at
                // declaration execution, travels with the function value.
                // Defining the name first makes direct recursion work.
                let function: ZeroFunction = ZeroFunction::new(
                    name.clone(),
                    params.clone(),
                    body.clone(),
                    self.environment.clone(),
                );

                debug!(
                    "Defining function '{}' with {} parameters",
                    name.lexeme,
                    params.len()
                );

                self.environment
                    .borrow_mut()
                    .define(&name.lexeme, Value::Function(function));

                Ok(Flow::Normal)
            }

            Stmt::Return { keyword: _, value } => {
                let value: Value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                Ok(Flow::Return(value))
            }
        }
    }

    /// Execute `statements` under `env`, then restore the previous frame —
    /// on normal exit, on `Flow::Return`, and on error alike.
    pub(crate) fn execute_block(
        &mut self,
        statements: &[Stmt],
        env: Environment,
    ) -> Result<Flow, RuntimeError> {
        let previous: Rc<RefCell<Environment>> =
            std::mem::replace(&mut self.environment, Rc::new(RefCell::new(env)));

        let result: Result<Flow, RuntimeError> = self.run_sequence(statements);

        self.environment = previous;

        result
    }

    fn run_sequence(&mut self, statements: &[Stmt]) -> Result<Flow, RuntimeError> {
        for stmt in statements {
            match self.execute(stmt)? {
                Flow::Normal => {}
                ret @ Flow::Return(_) => return Ok(ret),
            }
        }

        Ok(Flow::Normal)
    }

    // ───────────────────────── expression evaluation ────────────────────────

    /// Evaluate an expression to a [`Value`], dispatching by node kind.
    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal(literal) => Ok(match literal {
                LiteralValue::Number(n) => Value::Number(*n),
                LiteralValue::Str(s) => Value::String(s.clone()),
                LiteralValue::True => Value::Bool(true),
                LiteralValue::False => Value::Bool(false),
                LiteralValue::Nil => Value::Nil,
            }),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Unary { operator, right } => self.evaluate_unary(operator, right),

            Expr::Binary {
                left,
                operator,
                right,
            } => self.evaluate_binary(left, operator, right),

            Expr::Logical {
                left,
                operator,
                right,
            } => self.evaluate_logical(left, operator, right),

            Expr::Variable(name) => self
                .environment
                .borrow()
                .get(&name.lexeme)
                .map_err(|msg| RuntimeError::new(name, msg)),

            Expr::Assign { name, value } => {
                let value: Value = self.evaluate(value)?;

                self.environment
                    .borrow_mut()
                    .assign(&name.lexeme, value.clone())
                    .map_err(|msg| RuntimeError::new(name, msg))?;

                Ok(value)
            }

            Expr::Call {
                callee,
                paren,
                arguments,
            } => {
                let callee: Value = self.evaluate(callee)?;

                let mut args: Vec<Value> = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    args.push(self.evaluate(argument)?);
                }

                match callee {
                    Value::Function(function) => function.call(self, &args, paren),
                    Value::Native(native) => native.call(&args, paren),
                    _ => Err(RuntimeError::new(
                        paren,
                        "Can only call functions and classes.",
                    )),
                }
            }
        }
    }

    fn evaluate_unary(&mut self, operator: &Token, right: &Expr) -> Result<Value, RuntimeError> {
        let right: Value = self.evaluate(right)?;

        match operator.token_type {
            TokenType::NOT => Ok(Value::Bool(!right.is_truthy())),

            TokenType::MINUS => match right {
                // wrapping: two's-complement wrap rather than a panic
                Value::Number(n) => Ok(Value::Number(n.wrapping_neg())),
                _ => Err(RuntimeError::new(operator, "Operand must be a number.")),
            },

            _ => unreachable!("parser only builds NOT/MINUS unary nodes"),
        }
    }

    fn evaluate_binary(
        &mut self,
        left: &Expr,
        operator: &Token,
        right: &Expr,
    ) -> Result<Value, RuntimeError> {
        // Strict ordering: left fully evaluated (side effects included)
        // before right.
        let left: Value = self.evaluate(left)?;
        let right: Value = self.evaluate(right)?;

        match operator.token_type {
            TokenType::EQUAL_EQUAL => Ok(Value::Bool(left == right)),
            TokenType::NOT_EQUAL => Ok(Value::Bool(left != right)),

            TokenType::PLUS => match (left, right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.wrapping_add(b))),
                (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
                _ => Err(RuntimeError::new(
                    operator,
                    "Operands must be two numbers or two strings.",
                )),
            },

            TokenType::MINUS => {
                let (a, b) = check_number_operands(operator, left, right)?;
                Ok(Value::Number(a.wrapping_sub(b)))
            }

            TokenType::STAR => {
                let (a, b) = check_number_operands(operator, left, right)?;
                Ok(Value::Number(a.wrapping_mul(b)))
            }

            TokenType::SLASH => {
                let (a, b) = check_number_operands(operator, left, right)?;

                if b == 0 {
                    return Err(RuntimeError::new(operator, "Division by zero."));
                }

                Ok(Value::Number(a.wrapping_div(b)))
            }

            TokenType::GREATER => {
                let (a, b) = check_number_operands(operator, left, right)?;
                Ok(Value::Bool(a > b))
            }

            TokenType::GREATER_EQUAL => {
                let (a, b) = check_number_operands(operator, left, right)?;
                Ok(Value::Bool(a >= b))
            }

            TokenType::LESS => {
                let (a, b) = check_number_operands(operator, left, right)?;
                Ok(Value::Bool(a < b))
            }

            TokenType::LESS_EQUAL => {
                let (a, b) = check_number_operands(operator, left, right)?;
                Ok(Value::Bool(a <= b))
            }

            _ => unreachable!("parser only builds binary nodes for binary operators"),
        }
    }

    /// Short-circuit `and`/`or`: the right operand — side effects included —
    /// is only touched when the left operand does not decide the result.
    fn evaluate_logical(
        &mut self,
        left: &Expr,
        operator: &Token,
        right: &Expr,
    ) -> Result<Value, RuntimeError> {
        let left: Value = self.evaluate(left)?;

        if operator.token_type == TokenType::OR {
            if left.is_truthy() {
                return Ok(left);
            }
        } else if !left.is_truthy() {
            return Ok(left);
        }

        self.evaluate(right)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn check_number_operands(
    operator: &Token,
    left: Value,
    right: Value,
) -> Result<(i64, i64), RuntimeError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((a, b)),
        _ => Err(RuntimeError::new(operator, "Operands must be numbers.")),
    }
}

// ─────────────────────────── native functions ───────────────────────────────

/// Register the built-ins into the global frame, once, at construction.
fn register_natives(globals: &Rc<RefCell<Environment>>, output: &Output) {
    debug!("Registering native functions");

    let out: Output = output.clone();
    globals.borrow_mut().define(
        "print",
        Value::Native(NativeFunction::new(
            "print",
            1,
            Rc::new(move |args: &[Value]| {
                let mut sink = out.borrow_mut();
                writeln!(sink, "{}", args[0]).map_err(|e| format!("print failed: {}", e))?;

                Ok(Value::Number(0))
            }),
        )),
    );

    globals.borrow_mut().define(
        "clock",
        Value::Native(NativeFunction::new(
            "clock",
            0,
            Rc::new(|_args: &[Value]| Ok(Value::Number(Utc::now().timestamp()))),
        )),
    );

    // Host stub: announces the read and hands back fixed text. Real file
    // ingestion belongs to the host shell, not the core.
    let out: Output = output.clone();
    globals.borrow_mut().define(
        "read_file",
        Value::Native(NativeFunction::new(
            "read_file",
            1,
            Rc::new(move |args: &[Value]| {
                let path: &str = match &args[0] {
                    Value::String(s) => s,
                    _ => return Err("read_file expects a string path.".to_string()),
                };

                let mut sink = out.borrow_mut();
                writeln!(sink, "reading {} ...", path)
                    .map_err(|e| format!("read_file failed: {}", e))?;

                Ok(Value::String("example text".to_string()))
            }),
        )),
    );
}
