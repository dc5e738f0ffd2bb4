//!
//! Shows the machine state to the outside world. The simulator hands a [`Snapshot`] to a
//! [`Reporter`] after every instruction (when tracing) and once more when the program ends;
//! how it's presented is entirely up to the reporter.
//!

use crate::instruction::ControlSignals;
use crate::simulator::{
    memory::{Memory, WORDS_PER_ROW},
    register_names::{GROUPS, REGVEC},
    registers::Registers,
};
use owo_colors::OwoColorize;
use std::io::{self, Write};

/// State of the machine right after an instruction
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Instructions executed so far
    pub step: usize,
    /// Where the program counter points now
    pub pc: usize,
    pub registers: &'a Registers,
    pub memory: &'a Memory,
    /// Signals of the instruction just executed. `None` if it was skipped or if nothing ran.
    pub signals: Option<ControlSignals>,
    /// Whether this is the final snapshot of the run
    pub terminal: bool,
}

pub trait Reporter {
    fn report(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()>;
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        (**self).report(snapshot)
    }
}

/// Ignores every snapshot
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&mut self, _snapshot: &Snapshot<'_>) -> io::Result<()> {
        Ok(())
    }
}

/// Owned copy of a [`Snapshot`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub step: usize,
    pub pc: usize,
    pub registers: Registers,
    pub memory: Memory,
    pub signals: Option<ControlSignals>,
    pub terminal: bool,
}

impl From<&Snapshot<'_>> for State {
    fn from(s: &Snapshot<'_>) -> Self {
        Self {
            step: s.step,
            pc: s.pc,
            registers: s.registers.clone(),
            memory: s.memory.clone(),
            signals: s.signals,
            terminal: s.terminal,
        }
    }
}

/// Keeps every snapshot it's given
#[derive(Debug, Default)]
pub struct Recorder {
    pub states: Vec<State>,
}

impl Reporter for Recorder {
    fn report(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        self.states.push(snapshot.into());
        Ok(())
    }
}

/// Prints snapshots as text: the registers by category, the memory (only at the end) and,
/// if enabled, the control signals
pub struct TextReporter<W: Write> {
    out: W,
    show_signals: bool,
    color: bool,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            show_signals: false,
            color: true,
        }
    }

    pub fn with_signals(mut self, show_signals: bool) -> Self {
        self.show_signals = show_signals;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn heading(&mut self, text: &str) -> io::Result<()> {
        if self.color {
            writeln!(self.out, "{}", text.bright_blue())
        } else {
            writeln!(self.out, "{}", text)
        }
    }

    fn label(&self, text: &str) -> String {
        if self.color {
            text.bright_blue().to_string()
        } else {
            text.to_owned()
        }
    }

    fn print_registers(&mut self, registers: &Registers) -> io::Result<()> {
        for group in GROUPS.iter() {
            self.heading(group.title)?;
            let range = group.range.clone();
            for row in REGVEC[range.clone()]
                .iter()
                .zip(&registers.values()[range])
                .collect::<Vec<_>>()
                .chunks(group.per_row)
            {
                let line: Vec<String> = row
                    .iter()
                    .map(|(name, value)| format!("{}: {:<5}", self.label(name), value))
                    .collect();
                writeln!(self.out, "{}", line.join(" ").trim_end())?;
            }
        }
        Ok(())
    }

    fn print_memory(&mut self, memory: &Memory) -> io::Result<()> {
        writeln!(self.out)?;
        self.heading("Memory:")?;
        for (row, words) in memory.words.chunks(WORDS_PER_ROW).enumerate() {
            let line: Vec<String> = words
                .iter()
                .enumerate()
                .map(|(i, word)| {
                    let i = row * WORDS_PER_ROW + i;
                    // keeps single digit addresses lined up with the rest
                    let pad = if i < 10 { " " } else { "" };
                    format!("{}:{} {:<5}", self.label(&format!("Memory[{i}]")), pad, word)
                })
                .collect();
            writeln!(self.out, "{}", line.join("").trim_end())?;
        }
        Ok(())
    }

    fn print_signals(&mut self, signals: Option<ControlSignals>) -> io::Result<()> {
        writeln!(self.out)?;
        self.heading("Control Signals:")?;
        match signals {
            Some(s) => {
                writeln!(self.out, "aluControl: {}", s.alu_op.code())?;
                writeln!(self.out, "writeToMem: {}", s.mem_write as u8)?;
                writeln!(self.out, "readMem: {}", s.mem_read as u8)?;
            }
            None => writeln!(self.out, "(none)")?,
        }
        Ok(())
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn report(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        writeln!(self.out)?;
        if snapshot.terminal {
            writeln!(self.out)?;
            self.heading("Final Output:")?;
        } else {
            self.heading(&format!("Instruction #{}", snapshot.step))?;
        }

        self.print_registers(snapshot.registers)?;
        if snapshot.terminal {
            self.print_memory(snapshot.memory)?;
        }
        if self.show_signals {
            self.print_signals(snapshot.signals)?;
        }

        self.out.flush()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::instruction::Opcode;

    fn render(snapshot: &Snapshot<'_>, show_signals: bool) -> String {
        let mut reporter = TextReporter::new(Vec::new())
            .with_color(false)
            .with_signals(show_signals);
        reporter.report(snapshot).unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_final_output() {
        let mut registers = Registers::new();
        registers.set("$t0", 7);
        registers.set("$v1", -2);
        let mut memory = Memory::with_size(8);
        memory.set_word(5, 99);

        let snapshot = Snapshot {
            step: 3,
            pc: 12,
            registers: &registers,
            memory: &memory,
            signals: None,
            terminal: true,
        };
        let text = render(&snapshot, false);

        assert!(text.contains("Final Output:"));
        assert!(text.contains("Temporary Registers:"));
        assert!(text.contains("$t0: 7 "));
        assert!(text.contains("$v1: -2"));
        assert!(text.contains("Memory[5]:  99"));
        assert_eq!(text.matches("Memory[").count(), 8);
        assert!(!text.contains("Control Signals:"));
        assert!(!text.contains("$zero"));
    }

    #[test]
    fn test_trace_output() {
        let registers = Registers::new();
        let memory = Memory::with_size(8);
        let snapshot = Snapshot {
            step: 2,
            pc: 8,
            registers: &registers,
            memory: &memory,
            signals: Some(Opcode::Lw.control()),
            terminal: false,
        };
        let text = render(&snapshot, true);

        assert!(text.contains("Instruction #2"));
        assert!(!text.contains("Memory:"));
        assert!(text.contains("aluControl: 6"));
        assert!(text.contains("writeToMem: 0"));
        assert!(text.contains("readMem: 1"));
    }

    #[test]
    fn test_register_rows() {
        let registers = Registers::new();
        let memory = Memory::with_size(0);
        let snapshot = Snapshot {
            step: 0,
            pc: 0,
            registers: &registers,
            memory: &memory,
            signals: None,
            terminal: false,
        };
        let text = render(&snapshot, false);

        let t_rows: Vec<_> = text.lines().filter(|l| l.starts_with("$t")).collect();
        assert_eq!(t_rows.len(), 2);
        assert!(t_rows[0].starts_with("$t0:") && t_rows[0].contains("$t4:"));
        assert!(t_rows[1].starts_with("$t5:") && t_rows[1].contains("$t9:"));
    }
}
