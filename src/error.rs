use crate::instructions::Signature;

/// Failure to encode a single line of assembly.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("syntax error in {line:?}")]
    Syntax { line: String },
    #[error("malformed operand {token:?}")]
    MalformedOperand { token: String },
    #[error("unknown register {name:?}")]
    UnknownRegister { name: String },
    #[error("no opcode for `{mnemonic}` with operands {signature}")]
    UnresolvedOpcode { mnemonic: String, signature: Signature },
}

/// The opcode table violates its one-entry-per-shape invariant.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("duplicate entry for `{mnemonic}` {signature}: {first:#04x} and {second:#04x}")]
    Duplicate {
        mnemonic: &'static str,
        signature: Signature,
        first: u8,
        second: u8,
    },
}

/// Failure while assembling a multi-line source.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AssembleError {
    #[error("line {line}: {source}")]
    Encode {
        line: usize,
        #[source]
        source: EncodeError,
    },
    #[error("line {line}: label `{name}` already defined on line {first}")]
    DuplicateLabel { line: usize, name: String, first: usize },
    #[error("line {line}: label `{name}` is a register name")]
    ReservedLabel { line: usize, name: String },
    #[error("line {line}: undefined label `{name}`")]
    UndefinedLabel { line: usize, name: String },
    #[error("line {line}: unknown directive `{name}`")]
    UnknownDirective { line: usize, name: String },
    #[error("line {line}: invalid data {token:?}")]
    InvalidData { line: usize, token: String },
    #[error("line {line}: {token:?} does not fit in {width} byte(s)")]
    DataOutOfRange { line: usize, token: String, width: usize },
    #[error("line {line}: program runs past the end of the 32-bit address space")]
    AddressOverflow { line: usize },
}

impl AssembleError {
    pub fn line(&self) -> usize {
        match self {
            AssembleError::Encode { line, .. }
            | AssembleError::DuplicateLabel { line, .. }
            | AssembleError::ReservedLabel { line, .. }
            | AssembleError::UndefinedLabel { line, .. }
            | AssembleError::UnknownDirective { line, .. }
            | AssembleError::InvalidData { line, .. }
            | AssembleError::DataOutOfRange { line, .. }
            | AssembleError::AddressOverflow { line } => *line,
        }
    }
}
