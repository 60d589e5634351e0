use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EncodeError;

/// Register file layout of the target. Position is the 4-bit register index.
pub const REGISTER_NAMES: [&str; 16] = [
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "fp", "sp", "pc", "fl",
];

/// A register, stored as its index in the register file (0..=15).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Register(u8);

impl Register {
    pub const FP: Register = Register(12);
    pub const SP: Register = Register(13);
    pub const PC: Register = Register(14);
    pub const FL: Register = Register(15);

    /// Look a register up by name. Names are case-sensitive.
    pub fn from_name(name: &str) -> Result<Self, EncodeError> {
        REGISTER_NAMES
            .iter()
            .position(|&r| r == name)
            .map(|i| Register(i as u8))
            .ok_or_else(|| EncodeError::UnknownRegister {
                name: name.to_string(),
            })
    }

    /// Returns `None` for indices outside the register file.
    pub fn from_index(index: u8) -> Option<Self> {
        (usize::from(index) < REGISTER_NAMES.len()).then_some(Register(index))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        REGISTER_NAMES[usize::from(self.0)]
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
