//!
//! Turns assembly source into the flat token stream the simulator runs. Comments are dropped,
//! punctuation is treated as whitespace and everything is lowercased. No validation happens
//! here: the simulator decides what the tokens mean.
//!

pub mod error;
pub mod lexer;
pub mod token;

use error::ParserError;
use lexer::Lexer;
use token::Context;

/// Represents a successful parser result. This is the same format the simulator
/// will use to execute the instructions
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Parsed {
    pub code: Vec<String>,
    /// Where each token of `code` came from
    pub code_ctx: Vec<Context>,
}

impl FromIterator<token::Token> for Parsed {
    fn from_iter<I: IntoIterator<Item = token::Token>>(iter: I) -> Self {
        let (code, code_ctx) = iter.into_iter().map(|t| (t.data, t.ctx)).unzip();
        Self { code, code_ctx }
    }
}

/// Tokenizes a program that's already in memory. `file` is only used for error contexts.
pub fn tokenize(content: &str, file: &str) -> Parsed {
    Lexer::from_content(content.to_owned(), file).collect()
}

pub fn tokenize_file(path: &str) -> Result<Parsed, ParserError> {
    Ok(Lexer::new(path)?.collect())
}
