pub mod encoder;
pub mod error;
pub mod instructions;
pub mod memory;
pub mod operand;
pub mod parser;
pub mod program;
pub mod registers;

pub mod isa {
    pub mod lilliput; // opcode assignments of the Lilliput CPU
}

pub use encoder::{encode, encode_operands, encode_with, EncodedInstruction};
pub use error::{AssembleError, EncodeError, TableError};
pub use instructions::{OpcodeEntry, OpcodeTable, Signature};
pub use memory::{Bus, LinearMemory};
pub use operand::{Operand, OperandType};
pub use program::{assemble, AssembleConfig, Program, Statement};
pub use registers::{Register, REGISTER_NAMES};
