use std::fmt;

use serde::Serialize;

use crate::error::EncodeError;
use crate::instructions::{OpcodeTable, Signature};
use crate::operand::Operand;
use crate::parser::parse_line;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EncodedInstruction(Vec<u8>);

impl EncodedInstruction {
    pub fn opcode(&self) -> u8 {
        self.0[0]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for EncodedInstruction {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for EncodedInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

pub fn encode(line: &str) -> Result<EncodedInstruction, EncodeError> {
    encode_with(OpcodeTable::global(), line)
}

pub fn encode_with(table: &OpcodeTable, line: &str) -> Result<EncodedInstruction, EncodeError> {
    let inst = parse_line(line)?;
    let op1 = Operand::classify(inst.operand1)?;
    let op2 = Operand::classify(inst.operand2)?;
    encode_operands(table, inst.mnemonic, op1, op2)
}

/// Encode an instruction whose operands are already classified.
pub fn encode_operands(
    table: &OpcodeTable,
    mnemonic: &str,
    op1: Operand,
    op2: Operand,
) -> Result<EncodedInstruction, EncodeError> {
    let signature = Signature::new(&[op1.kind(), op2.kind()]);
    let opcode = table.resolve(mnemonic, &signature)?;

    let mut bytes = Vec::with_capacity(9);
    bytes.push(opcode);
    match (op1.register(), op2.register()) {
        // two register operands share a byte: low nibble first, high nibble second
        (Some(r1), Some(r2)) => bytes.push(r1.index() | (r2.index() << 4)),
        _ => {
            op1.encode_into(&mut bytes);
            op2.encode_into(&mut bytes);
        }
    }
    Ok(EncodedInstruction(bytes))
}
