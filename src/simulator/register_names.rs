use hashbrown::HashMap;
use lazy_static::*;
use std::ops::Range;

pub const ZERO_INDEX: u8 = 0;

/// Number of architectural registers, `$zero` included
pub const REG_COUNT: usize = 25;

pub type RegMap = HashMap<&'static str, u8>;

pub const REGVEC: [&str; REG_COUNT] = [
    "$zero", "$t0", "$t1", "$t2", "$t3", "$t4", "$t5", "$t6", "$t7", "$t8", "$t9", "$s0", "$s1",
    "$s2", "$s3", "$s4", "$s5", "$s6", "$s7", "$a0", "$a1", "$a2", "$a3", "$v0", "$v1",
];

lazy_static! {
    pub static ref REGS: RegMap = regs();
}

pub fn regs() -> RegMap {
    let mut map = RegMap::with_capacity(REG_COUNT);
    for (i, name) in REGVEC.iter().enumerate() {
        map.insert(*name, i as u8);
    }
    map
}

/// A category of registers, in the order they're shown when printing state
pub struct RegGroup {
    pub title: &'static str,
    pub range: Range<usize>,
    pub per_row: usize,
}

pub const GROUPS: [RegGroup; 4] = [
    RegGroup {
        title: "Temporary Registers:",
        range: 1..11,
        per_row: 5,
    },
    RegGroup {
        title: "Saved Registers:",
        range: 11..19,
        per_row: 4,
    },
    RegGroup {
        title: "Argument Registers:",
        range: 19..23,
        per_row: 4,
    },
    RegGroup {
        title: "Return Value Registers:",
        range: 23..25,
        per_row: 2,
    },
];
