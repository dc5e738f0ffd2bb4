use super::register_names::{REGS, REGVEC, REG_COUNT, ZERO_INDEX};

/// The register file. `$zero` always reads as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registers {
    values: [i32; REG_COUNT],
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of the register called `name`, or `None` if there's no such register
    pub fn get(&self, name: &str) -> Option<i32> {
        REGS.get(name).map(|&i| self.values[i as usize])
    }

    /// Writes `x` to the register called `name`. Writes to `$zero` and to names that aren't
    /// registers are dropped; returns whether the write happened.
    pub fn set(&mut self, name: &str, x: i32) -> bool {
        match REGS.get(name) {
            Some(&i) if i != ZERO_INDEX => {
                self.values[i as usize] = x;
                true
            }
            _ => false,
        }
    }

    pub fn by_index(&self, i: usize) -> i32 {
        self.values[i]
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    /// Iterates over `(name, value)` pairs, `$zero` first
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        REGVEC.iter().copied().zip(self.values.iter().copied())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut regs = Registers::new();
        assert!(regs.set("$t3", -12));
        assert!(regs.set("$v1", 7));
        assert_eq!(regs.get("$t3"), Some(-12));
        assert_eq!(regs.get("$v1"), Some(7));
        assert_eq!(regs.get("$s0"), Some(0));
        assert_eq!(regs.get("$x0"), None);
    }

    #[test]
    fn test_unwritable_destinations() {
        let mut regs = Registers::new();
        assert!(!regs.set("$zero", 99));
        assert!(!regs.set("$null", 99));
        assert!(!regs.set("42", 99));
        assert_eq!(regs, Registers::new());
        assert_eq!(regs.get("$zero"), Some(0));
    }

    #[test]
    fn test_iter_order() {
        let mut regs = Registers::new();
        regs.set("$a2", 5);
        let pairs: Vec<_> = regs.iter().collect();
        assert_eq!(pairs.len(), REG_COUNT);
        assert_eq!(pairs[0], ("$zero", 0));
        assert!(pairs.contains(&("$a2", 5)));
    }
}
