use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use crate::error::{EncodeError, TableError};
use crate::isa::lilliput::OPCODES;
use crate::operand::OperandType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeEntry {
    pub byte: u8,
    pub mnemonic: &'static str,
    pub operands: &'static [OperandType],
}

impl OpcodeEntry {
    pub const fn new(byte: u8, mnemonic: &'static str, operands: &'static [OperandType]) -> Self {
        Self {
            byte,
            mnemonic,
            operands,
        }
    }

    pub fn signature(&self) -> Signature {
        Signature::new(self.operands)
    }
}

/// Operand types of an instruction in order, with absent operands dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    kinds: [OperandType; 2],
    arity: u8,
}

impl Signature {
    pub fn new(kinds: &[OperandType]) -> Self {
        let mut sig = Signature {
            kinds: [OperandType::None; 2],
            arity: 0,
        };
        for &kind in kinds.iter().filter(|&&k| k != OperandType::None).take(2) {
            sig.kinds[usize::from(sig.arity)] = kind;
            sig.arity += 1;
        }
        sig
    }

    pub fn as_slice(&self) -> &[OperandType] {
        &self.kinds[..usize::from(self.arity)]
    }

    pub fn arity(&self) -> usize {
        usize::from(self.arity)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, kind) in self.as_slice().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{kind}")?;
        }
        f.write_str(")")
    }
}

static GLOBAL: LazyLock<OpcodeTable> = LazyLock::new(|| match OpcodeTable::build(OPCODES) {
    Ok(table) => table,
    Err(err) => panic!("built-in opcode table is inconsistent: {err}"),
});

#[derive(Debug)]
pub struct OpcodeTable {
    entries: &'static [OpcodeEntry],
    by_mnemonic: HashMap<&'static str, HashMap<Signature, u8>>,
}

impl OpcodeTable {
    /// Rows sharing only the opcode byte are aliases, not duplicates.
    pub fn build(entries: &'static [OpcodeEntry]) -> Result<Self, TableError> {
        let mut by_mnemonic: HashMap<&'static str, HashMap<Signature, u8>> = HashMap::new();
        for entry in entries {
            let signature = entry.signature();
            match by_mnemonic.entry(entry.mnemonic).or_default().entry(signature) {
                Entry::Occupied(first) => {
                    return Err(TableError::Duplicate {
                        mnemonic: entry.mnemonic,
                        signature,
                        first: *first.get(),
                        second: entry.byte,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(entry.byte);
                }
            }
        }
        Ok(Self {
            entries,
            by_mnemonic,
        })
    }

    pub fn global() -> &'static OpcodeTable {
        &GLOBAL
    }

    pub fn resolve(&self, mnemonic: &str, signature: &Signature) -> Result<u8, EncodeError> {
        self.by_mnemonic
            .get(mnemonic)
            .and_then(|shapes| shapes.get(signature))
            .copied()
            .ok_or_else(|| EncodeError::UnresolvedOpcode {
                mnemonic: mnemonic.to_string(),
                signature: *signature,
            })
    }

    pub fn entries(&self) -> &'static [OpcodeEntry] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
