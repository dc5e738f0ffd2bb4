/// Capacity of the data memory, in words (8kB)
pub const MEMORY_WORDS: usize = 2000;

/// How many words are printed per row in state dumps
pub const WORDS_PER_ROW: usize = 4;
