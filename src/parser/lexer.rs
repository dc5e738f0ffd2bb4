use super::error::ParserError;
use super::token::{Context, Token};
use std::fs;

/// Characters that end a token without being part of any. Commas and parentheses only exist
/// to make assembly readable, so `lw $t1, 4($t0)` is the same as `lw $t1 4 $t0`.
macro_rules! separator {
    () => {
        ' ' | ',' | '(' | ')' | '\n' | '\t' | '\x0b'..='\x0d'
    };
}

#[derive(Debug)]
/// Iterator over the tokens of an assembly file. Also see [`Token`]
pub struct Lexer {
    /// Content of the file the Lexer is lexing
    content: String,
    /// Current position in the content string
    cursor: usize,
    /// Context of the current token
    context: Context,
}

impl Lexer {
    pub fn new(entry_file: &str) -> Result<Self, ParserError> {
        let buf = fs::read(entry_file).map_err(|source| ParserError::IO {
            file: entry_file.to_owned(),
            source,
        })?;
        let content = String::from_utf8_lossy(&buf).to_string();
        Ok(Self::from_content(content, entry_file))
    }

    pub fn from_content(content: String, filename: &str) -> Self {
        Self {
            content,
            cursor: 0,
            context: Context::new(filename),
        }
    }

    pub fn peek(&self) -> Option<char> {
        self.content.as_str().get(self.cursor..)?.chars().next()
    }

    pub fn consume(&mut self) -> Option<char> {
        let next_char = self.peek()?;
        self.cursor += next_char.len_utf8();
        self.context.advance_char(next_char);
        Some(next_char)
    }

    /// Skips everything up to the end of the line. The newline itself is consumed too.
    pub fn consume_comment(&mut self) {
        while !matches!(self.consume(), None | Some('\n')) {
            // continue consuming
        }
    }

    fn next_word(&mut self) -> Token {
        let mut word = String::new();
        while let Some(c) = self.peek() {
            if matches!(c, separator!() | '#') {
                break;
            }
            self.consume();
            word.extend(c.to_lowercase());
        }

        Token::new(word)
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next_char = self.peek()?;

            match next_char {
                separator!() => {
                    self.consume();
                }

                '#' => self.consume_comment(),

                _ => {
                    let ctx = self.context.clone();
                    return Some(self.next_word().with_ctx(ctx));
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn lex(content: &str) -> Vec<String> {
        Lexer::from_content(content.to_owned(), "test.asm")
            .map(|t| t.data)
            .collect()
    }

    #[test]
    fn test_simple() {
        assert_eq!(lex("add $t0 $t1 $t2"), ["add", "$t0", "$t1", "$t2"]);
        assert_eq!(lex(""), Vec::<String>::new());
        assert_eq!(lex("  \n\n\t "), Vec::<String>::new());
    }

    #[test]
    fn test_punctuation_and_case() {
        assert_eq!(
            lex("LW $T1, 4($t0)\nSW $t1,-8($ZERO)"),
            ["lw", "$t1", "4", "$t0", "sw", "$t1", "-8", "$zero"]
        );
    }

    #[test]
    fn test_comments() {
        let src = "# header comment\naddi $t0 $zero 1 # trailing\n#\nnop#glued";
        assert_eq!(lex(src), ["addi", "$t0", "$zero", "1", "nop"]);
    }

    #[test]
    fn test_context() {
        let tokens: Vec<Token> =
            Lexer::from_content("nop\n  j 0".to_owned(), "test.asm").collect();
        assert_eq!(tokens.len(), 3);
        assert_eq!((tokens[0].ctx.line, tokens[0].ctx.column), (1, 1));
        assert_eq!((tokens[1].ctx.line, tokens[1].ctx.column), (2, 3));
        assert_eq!((tokens[2].ctx.line, tokens[2].ctx.column), (2, 5));
        assert_eq!(*tokens[2].ctx.file, "test.asm");
    }

    #[test]
    fn test_missing_file() {
        let err = Lexer::new("definitely/not/here.asm").unwrap_err();
        assert!(matches!(err, ParserError::IO { .. }));
    }
}
