use crate::utf8_lossy_lines::Utf8LossyLinesExt;
use owo_colors::OwoColorize;
use std::{fmt, fs::File, io::BufReader, sync::Arc};

/// Token context, including the current filename, line and column
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Context {
    pub file: Arc<String>,
    pub line: u32,
    pub column: u32,
}

impl Context {
    pub fn new(file: &str) -> Self {
        Self {
            file: Arc::new(file.to_owned()),
            line: 1,
            column: 1,
        }
    }

    pub fn empty() -> Self {
        Self {
            file: Arc::new(String::new()),
            line: 0,
            column: 0,
        }
    }

    pub fn advance_char(&mut self, c: char) {
        if c == '\n' {
            self.column = 1;
            self.line += 1;
        } else if c == '\t' {
            self.column += 4;
        } else {
            self.column += 1;
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "   {} {} at line {}, column {}",
            "-->".bright_blue().bold(),
            self.file.bright_yellow(),
            self.line.bright_yellow(),
            self.column.bright_yellow(),
        )?;

        // Tokens that didn't come from a file have nothing else to show
        if self.file.is_empty() {
            return Ok(());
        }

        let file = match File::open(&*self.file) {
            Ok(file) => file,
            Err(e) => {
                return writeln!(
                    f,
                    "   Couldn't open '{}' to show the source: {}",
                    self.file.bright_yellow(),
                    e.bold()
                )
            }
        };

        let reader = BufReader::new(file);
        let from = self.line.saturating_sub(2) as usize;
        for (line, i) in reader.utf8_lossy_lines().skip(from).take(3).zip(from + 1..) {
            let line = line.map_err(|_| fmt::Error)?;
            writeln!(f, "{:^4}{} {}", i.bright_blue(), "|".bright_blue(), line)?;

            if i == self.line as usize {
                (0..self.column + 4).try_for_each(|_| write!(f, "{}", ".".bright_red()))?;
                writeln!(f, "{}", "^ Here".bright_red())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_advance() {
        let mut ctx = Context::new("prog.asm");
        "ab\n\tc".chars().for_each(|c| ctx.advance_char(c));
        assert_eq!(ctx.line, 2);
        assert_eq!(ctx.column, 6);
    }

    #[test]
    fn test_display_without_file() {
        let ctx = Context::empty();
        let shown = ctx.to_string();
        assert!(shown.contains("line"));
        assert_eq!(shown.lines().count(), 1);
    }
}
