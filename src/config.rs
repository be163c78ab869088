use serde::{Deserialize, Serialize};

use crate::Isa;

/// Program image size of both target CPUs.
pub const DEFAULT_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsmConfig {
    pub isa: Isa,
    /// Maximum number of words in the program image.
    pub capacity: usize,
    /// Stop at a `;;;` line. When off the sentinel is just a comment.
    pub stop_at_terminator: bool,
}

impl Default for AsmConfig {
    fn default() -> Self {
        Self {
            isa: Isa::Binary,
            capacity: DEFAULT_CAPACITY,
            stop_at_terminator: true,
        }
    }
}

impl AsmConfig {
    pub fn new(isa: Isa) -> Self {
        Self { isa, ..Self::default() }
    }
}
