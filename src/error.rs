use crate::config::ConfigError;
use crate::parser::{error::ParserError, token};
use crate::simulator::SimulatorError;
use owo_colors::OwoColorize;
use std::borrow::Cow;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Parser(#[from] ParserError),
    #[error("{0}")]
    Simulator(#[from] SimulatorError),
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{}\n{}", err.bold(), ctx)]
    WithContext {
        err: Box<Error>,
        ctx: token::Context,
    },
    #[error("{err}\n   {}: {tip}\n", "[tip]".bright_yellow())]
    WithTip {
        err: Box<Error>,
        tip: Cow<'static, str>,
    },
}

pub trait Contextualize {
    fn with_context(self, ctx: token::Context) -> Error;
    fn with_tip(self, tip: impl Into<Cow<'static, str>>) -> Error;
}

impl Contextualize for Error {
    fn with_context(self, ctx: token::Context) -> Error {
        match self {
            Error::WithContext { err, .. } => Error::WithContext { err, ctx },
            _ => Error::WithContext {
                err: Box::new(self),
                ctx,
            },
        }
    }

    fn with_tip(self, tip: impl Into<Cow<'static, str>>) -> Error {
        Error::WithTip {
            err: Box::new(self),
            tip: tip.into(),
        }
    }
}

macro_rules! impl_contextualize {
    ($type:ty) => {
        impl Contextualize for $type {
            fn with_context(self, ctx: token::Context) -> Error {
                Error::WithContext {
                    err: Box::new(self.into()),
                    ctx,
                }
            }

            fn with_tip(self, tip: impl Into<Cow<'static, str>>) -> Error {
                Error::WithTip {
                    err: Box::new(self.into()),
                    tip: tip.into(),
                }
            }
        }
    };
}

impl_contextualize! { ParserError }
impl_contextualize! { SimulatorError }
impl_contextualize! { ConfigError }

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_context_replaces_context() {
        let err = SimulatorError::MalformedOperand {
            token: "$q9".to_owned(),
            pos: 3,
        };
        let mut first = token::Context::new("a.asm");
        first.line = 4;
        let mut second = first.clone();
        second.line = 9;

        match err.with_context(first).with_context(second) {
            Error::WithContext { err, ctx } => {
                assert_eq!(ctx.line, 9);
                assert!(matches!(*err, Error::Simulator(_)));
            }
            e => panic!("expected WithContext, got {e:?}"),
        }
    }

    #[test]
    fn test_tip_is_shown() {
        let err = SimulatorError::TruncatedInstruction {
            opcode: "add",
            pos: 0,
        }
        .with_tip("every instruction but nop takes three operands");
        assert!(err.to_string().contains("three operands"));
    }
}
