/// Configuration of a benchmark sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of elements each table is built from (default: 2^20)
    pub len: usize,

    /// Number of queries in a batch (default: 2^10)
    pub queries: usize,

    /// Seed of the generator of values and queries (default: 5489)
    pub seed: u64,

    /// Seed of the generator shuffling block boundaries (default: 42)
    pub policy_seed: u64,

    /// Every repeat count is divided by `2^repeat_shift`, at least one repeat is kept
    /// (default: 0)
    pub repeat_shift: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            len: 1 << 20,
            queries: 1 << 10,
            seed: 5489,
            policy_seed: 42,
            repeat_shift: 0,
        }
    }
}

impl Config {
    pub fn validate(&self) -> crate::Result<()> {
        if self.len == 0 {
            return Err(crate::Error::Config("length must be positive"));
        }
        if self.queries == 0 {
            return Err(crate::Error::Config("query count must be positive"));
        }
        // A batch sum of u32 answers must fit in u64
        if (self.queries as u64) > 1 << 32 {
            return Err(crate::Error::Config("query count must not exceed 2^32"));
        }
        Ok(())
    }

    /// Repeat count after applying `repeat_shift`.
    pub fn repeats(&self, repeat: u32) -> u32 {
        repeat.checked_shr(self.repeat_shift).unwrap_or(0).max(1)
    }
}
