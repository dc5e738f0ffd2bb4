pub mod consts;
pub use consts::*;

/// Flat, word-addressed data memory. Addresses index words directly, there's no byte
/// addressing or alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    pub words: Vec<i32>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    pub fn new() -> Self {
        Self::with_size(MEMORY_WORDS)
    }

    pub fn with_size(words: usize) -> Self {
        Self {
            words: vec![0; words],
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Reads the word at `address`, or `None` if it's out of bounds
    pub fn get_word(&self, address: i32) -> Option<i32> {
        self.index(address).map(|i| self.words[i])
    }

    /// Writes `x` at `address`. Returns `None` (and writes nothing) if it's out of bounds.
    pub fn set_word(&mut self, address: i32, x: i32) -> Option<()> {
        let i = self.index(address)?;
        self.words[i] = x;
        Some(())
    }

    /// Is `address` out of memory bounds?
    fn index(&self, address: i32) -> Option<usize> {
        usize::try_from(address)
            .ok()
            .filter(|&i| i < self.words.len())
    }
}
