pub mod context;
pub use context::Context;

/// Token given by the lexer
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub data: String,
    pub ctx: Context,
}

impl Token {
    pub fn new(data: String) -> Self {
        Self {
            data,
            ctx: Context::empty(),
        }
    }

    pub fn with_ctx(mut self, ctx: Context) -> Self {
        self.ctx = ctx;
        self
    }
}
