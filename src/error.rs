//! Centralised front-end error hierarchy for the **zero interpreter**.
//!
//! The scanner and parser convert their failure modes into [`ZeroError`]
//! variants, enabling a uniform `Result<T>` alias while preserving diagnostic
//! detail. Host-level I/O failures stay in the binary, wrapped by `anyhow`.
//!
//! Runtime failures deliberately live in a *separate* taxonomy
//! ([`crate::interpreter::RuntimeError`]): a parse error and a runtime error
//! are reported differently and never convert into one another.
//!
//! The module **does not** print diagnostics itself.

use thiserror::Error;

use log::debug;

/// Canonical compile-time error type used by the scanner and parser.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ZeroError {
    /// Lexical (scanner) error with source line information.
    #[error("[Line {line}] Error: {message}")]
    Lex {
        /// Human-readable description.
        message: String,

        /// 1-based line where the error occurred.
        line: usize,
    },

    /// Syntactic (parser) error. `location` is `end` for the END token,
    /// otherwise the offending lexeme in single quotes.
    #[error("[Line {line}] Error at {location}: {message}")]
    Parse {
        message: String,
        location: String,
        line: usize,
    },
}

impl ZeroError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        debug!("Creating Lex error: line={}, msg={}", line, message);

        ZeroError::Lex { message, line }
    }

    /// Helper constructor for the **parser**. Renders
    /// `[Line N] Error at <end|'lexeme'>: message`.
    pub fn parse<S: Into<String>>(token: &crate::token::Token, msg: S) -> Self {
        let message: String = msg.into();

        let location: String = if token.token_type == crate::token::TokenType::END {
            "end".to_string()
        } else {
            format!("'{}'", token.lexeme)
        };

        debug!(
            "Creating Parse error: line={}, at={}, msg={}",
            token.line, location, message
        );

        ZeroError::Parse {
            message,
            location,
            line: token.line,
        }
    }
}

/// Crate-wide compile-time `Result` alias.
pub type Result<T> = std::result::Result<T, ZeroError>;
