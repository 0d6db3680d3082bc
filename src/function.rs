//! The callable abstraction: user-defined functions (interpreted against their
//! lexically captured closure environment) and host-provided native functions.
//!
//! Both kinds are invoked with an already-evaluated argument list and return a
//! [`Value`]. Arity is checked here, at the call boundary, and a mismatch is a
//! [`RuntimeError`] — never a silent truncation.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::environment::Environment;
use crate::interpreter::{Flow, Interpreter, RuntimeError};
use crate::stmt::Stmt;
use crate::token::Token;
use crate::value::Value;

/// A user-defined function value.
///
/// Captures the declaration (name, parameters, body) and — crucially — the
/// environment that was active when the `fn` statement executed. Free
/// variables in the body resolve against that environment, not against
/// whatever is current at the call site: lexical closure capture.
#[derive(Debug, Clone)]
pub struct ZeroFunction {
    name: Token,
    params: Rc<Vec<Token>>,
    body: Rc<Vec<Stmt>>,
    closure: Rc<RefCell<Environment>>,
}

impl ZeroFunction {
    pub fn new(
        name: Token,
        params: Vec<Token>,
        body: Vec<Stmt>,
        closure: Rc<RefCell<Environment>>,
    ) -> Self {
        Self {
            name,
            params: Rc::new(params),
            body: Rc::new(body),
            closure,
        }
    }

    pub fn name(&self) -> &str {
        &self.name.lexeme
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Identity comparison — two function values are the same only if they
    /// came from the same declaration evaluation.
    pub fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.body, &other.body) && Rc::ptr_eq(&self.closure, &other.closure)
    }

    /// Invoke the function: push a fresh frame enclosing the closure
    /// environment, bind parameters positionally, and execute the body.
    ///
    /// A `Flow::Return` raised anywhere inside the body stops here and becomes
    /// the call's value; it is never observable above this boundary. Falling
    /// off the end of the body yields `nil`.
    pub fn call(
        &self,
        interpreter: &mut Interpreter,
        arguments: &[Value],
        paren: &Token,
    ) -> Result<Value, RuntimeError> {
        debug!("Calling user-defined function '{}'", self.name.lexeme);

        if arguments.len() != self.arity() {
            return Err(RuntimeError::new(
                paren,
                format!(
                    "Expected {} arguments but got {}.",
                    self.arity(),
                    arguments.len()
                ),
            ));
        }

        let mut env: Environment = Environment::with_enclosing(self.closure.clone());

        for (param, argument) in self.params.iter().zip(arguments.iter()) {
            env.define(&param.lexeme, argument.clone());
        }

        match interpreter.execute_block(&self.body, env)? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Nil),
        }
    }
}

/// Signature shared by all native implementations. The `String` error is
/// host-level text; the interpreter attaches the call-site token.
pub type NativeFn = Rc<dyn Fn(&[Value]) -> Result<Value, String>>;

/// A host-provided built-in registered once into the global frame at
/// interpreter construction (`print`, `clock`, `read_file`).
#[derive(Clone)]
pub struct NativeFunction {
    pub name: String,
    pub arity: usize,
    func: NativeFn,
}

impl NativeFunction {
    pub fn new(name: impl Into<String>, arity: usize, func: NativeFn) -> Self {
        Self {
            name: name.into(),
            arity,
            func,
        }
    }

    pub fn call(&self, arguments: &[Value], paren: &Token) -> Result<Value, RuntimeError> {
        debug!("Calling native function '{}'", self.name);

        if arguments.len() != self.arity {
            return Err(RuntimeError::new(
                paren,
                format!(
                    "Expected {} arguments but got {}.",
                    self.arity,
                    arguments.len()
                ),
            ));
        }

        (self.func)(arguments).map_err(|msg| RuntimeError::new(paren, msg))
    }
}

impl std::fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}
