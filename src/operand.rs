use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EncodeError;
use crate::registers::Register;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OperandType {
    None,
    Register,
    IndirectRegister,
    Imm8,
    Imm16,
    Imm32,
    IndirectImm32,
}

impl OperandType {
    pub fn is_register(self) -> bool {
        matches!(self, OperandType::Register | OperandType::IndirectRegister)
    }

    pub fn short_name(self) -> &'static str {
        match self {
            OperandType::None => "none",
            OperandType::Register => "reg",
            OperandType::IndirectRegister => "indreg",
            OperandType::Imm8 => "v8",
            OperandType::Imm16 => "v16",
            OperandType::Imm32 => "v32",
            OperandType::IndirectImm32 => "indv32",
        }
    }
}

impl fmt::Display for OperandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// A classified operand together with the value it encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand {
    None,
    Register(Register),
    IndirectRegister(Register),
    Imm8(u8),
    Imm16(u16),
    Imm32(u32),
    IndirectImm32(u32),
}

impl Operand {
    pub fn classify(token: &str) -> Result<Self, EncodeError> {
        if token.is_empty() {
            return Ok(Operand::None);
        }

        if let Some(rest) = token.strip_prefix('[') {
            let inner: String = token.chars().filter(|c| !matches!(c, '[' | ']')).collect();
            return match rest.chars().next() {
                Some(c) if c.is_alphabetic() => {
                    Register::from_name(&inner).map(Operand::IndirectRegister)
                }
                Some(_) => {
                    let (value, _) = parse_literal(&inner).ok_or_else(|| malformed(token))?;
                    Ok(Operand::IndirectImm32(value as u32))
                }
                None => Err(malformed(token)),
            };
        }

        if token.chars().next().is_some_and(char::is_alphabetic) {
            return Register::from_name(token).map(Operand::Register);
        }

        let (value, overflowed) = parse_literal(token).ok_or_else(|| malformed(token))?;
        // 0xFFFF itself is a 32-bit immediate
        Ok(match value {
            _ if overflowed => Operand::Imm32(value as u32),
            0..=0xFF => Operand::Imm8(value as u8),
            0x100..=0xFFFE => Operand::Imm16(value as u16),
            _ => Operand::Imm32(value as u32),
        })
    }

    pub fn kind(&self) -> OperandType {
        match self {
            Operand::None => OperandType::None,
            Operand::Register(_) => OperandType::Register,
            Operand::IndirectRegister(_) => OperandType::IndirectRegister,
            Operand::Imm8(_) => OperandType::Imm8,
            Operand::Imm16(_) => OperandType::Imm16,
            Operand::Imm32(_) => OperandType::Imm32,
            Operand::IndirectImm32(_) => OperandType::IndirectImm32,
        }
    }

    pub fn register(&self) -> Option<Register> {
        match *self {
            Operand::Register(r) | Operand::IndirectRegister(r) => Some(r),
            _ => None,
        }
    }

    pub fn encode_into(&self, out: &mut Vec<u8>) {
        match *self {
            Operand::None => {}
            Operand::Register(r) | Operand::IndirectRegister(r) => out.push(r.index()),
            Operand::Imm8(v) => out.push(v),
            Operand::Imm16(v) => out.extend_from_slice(&v.to_le_bytes()),
            Operand::Imm32(v) | Operand::IndirectImm32(v) => out.extend_from_slice(&v.to_le_bytes()),
        }
    }
}

fn malformed(token: &str) -> EncodeError {
    EncodeError::MalformedOperand {
        token: token.to_string(),
    }
}

/// Returns the value wrapped to 64 bits and whether it overflowed.
pub(crate) fn parse_literal(text: &str) -> Option<(u64, bool)> {
    let prefix = text.get(..2).map(str::to_ascii_lowercase);
    let (radix, digits) = match prefix.as_deref() {
        Some("0x") => (16, &text[2..]),
        Some("0o") => (8, &text[2..]),
        Some("0b") => (2, &text[2..]),
        _ => (10, text),
    };
    let digits = if radix == 10 {
        digits
    } else {
        digits.strip_prefix('_').unwrap_or(digits)
    };

    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
        return None;
    }
    if radix == 10 && digits.starts_with('0') && digits.chars().any(|c| c != '0' && c != '_') {
        return None;
    }

    let mut value = 0u64;
    let mut overflowed = false;
    for c in digits.chars().filter(|&c| c != '_') {
        let digit = c.to_digit(radix)?;
        let (shifted, o1) = value.overflowing_mul(u64::from(radix));
        let (next, o2) = shifted.overflowing_add(u64::from(digit));
        value = next;
        overflowed |= o1 || o2;
    }
    Some((value, overflowed))
}
