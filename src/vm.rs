//! The run pipeline: one complete source string in, program output and
//! single-line diagnostics out.
//!
//! A [`Vm`] wires scanner → parser → interpreter and owns the error flags for
//! the run (no process-wide state: flags are reset at each [`Vm::run`] and
//! inspected by the host shell afterwards). The interpreter — and with it the
//! global environment — persists across runs, so a REPL keeps its definitions
//! from line to line.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use log::{debug, info};

use crate::interpreter::{Interpreter, Output};
use crate::parser::Parser;
use crate::scanner::Scanner;
use crate::token::Token;

pub struct Vm {
    interpreter: Interpreter,
    output: Output,
    had_parse_error: bool,
    had_runtime_error: bool,
}

impl Vm {
    /// A VM reporting and printing to stdout.
    pub fn new() -> Self {
        Self::with_output(Rc::new(RefCell::new(io::stdout())))
    }

    /// A VM whose program output *and* diagnostics go to `output`.
    pub fn with_output(output: Output) -> Self {
        Self {
            interpreter: Interpreter::with_output(output.clone()),
            output,
            had_parse_error: false,
            had_runtime_error: false,
        }
    }

    /// Run one complete source text: scan, parse, and — only if the front end
    /// produced no diagnostics — interpret.
    ///
    /// Every diagnostic becomes one line on the output channel. A runtime
    /// error halts the remaining top-level statements but leaves the VM (and
    /// host process) alive.
    pub fn run(&mut self, source: &[u8]) {
        info!("Running {} bytes of source", source.len());

        self.had_parse_error = false;
        self.had_runtime_error = false;

        // ── scan ────────────────────────────────────────────────────────────
        let mut tokens: Vec<Token> = Vec::new();

        for item in Scanner::new(source) {
            match item {
                Ok(token) => tokens.push(token),

                Err(err) => {
                    self.report(&err.to_string());
                    self.had_parse_error = true;
                }
            }
        }

        // ── parse ───────────────────────────────────────────────────────────
        let mut parser: Parser<'_> = Parser::new(&tokens);
        let statements = parser.parse();

        for err in parser.diagnostics() {
            self.report(&err.to_string());
        }

        if parser.has_error() || self.had_parse_error {
            self.had_parse_error = true;

            debug!("Refusing to execute: front end produced diagnostics");

            return;
        }

        // ── interpret ───────────────────────────────────────────────────────
        if let Err(err) = self.interpreter.interpret(&statements) {
            self.report(&err.to_string());
            self.had_runtime_error = true;
        }
    }

    /// Did the most recent [`Vm::run`] hit a lex/parse diagnostic?
    pub fn had_parse_error(&self) -> bool {
        self.had_parse_error
    }

    /// Did the most recent [`Vm::run`] hit a runtime error?
    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// The underlying interpreter (global environment inspection).
    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    fn report(&self, line: &str) {
        // a dead output sink leaves nothing better to do than log
        if writeln!(self.output.borrow_mut(), "{}", line).is_err() {
            debug!("Failed to write diagnostic: {}", line);
        }
    }
}

impl Default for Vm {
    fn default() -> Self {
        Self::new()
    }
}
