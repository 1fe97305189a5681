//! Machine word size

/// Word width of the target machine
///
/// All arithmetic and addresses are taken modulo `2^bits`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WordSize {
    bits: u32,
}

impl WordSize {
    /// Widest supported word
    pub const MAX_BITS: u32 = 32;

    /// Creates a word size, or `None` if `bits` is outside `1..=32`
    pub fn new(bits: u32) -> Option<Self> {
        (1..=Self::MAX_BITS).contains(&bits).then_some(Self { bits })
    }

    /// Word width in bits
    pub fn bits(self) -> u32 {
        self.bits
    }

    /// Largest word value, `2^bits - 1`
    pub fn mask(self) -> u64 {
        (1u64 << self.bits) - 1
    }

    /// Number of addressable words
    pub fn capacity(self) -> u64 {
        1u64 << self.bits
    }

    /// Reduces a value modulo `2^bits` into `0..=mask`
    pub fn wrap(self, value: i64) -> u64 {
        (value as u64) & self.mask()
    }

    /// Largest address as decimal text, used in memory-bound declarations
    pub fn max_str(self) -> String {
        self.mask().to_string()
    }
}

impl Default for WordSize {
    fn default() -> Self {
        Self { bits: 24 }
    }
}
