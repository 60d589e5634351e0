//! Opcode table of the Lilliput CPU.
//!
//! Byte values are assigned by the target's decoder and have no relation to the
//! mnemonic or operand shape, so entries are listed exactly as the decoder expects
//! them. `bz`/`beq` are deliberate aliases of the same opcodes.

use crate::instructions::OpcodeEntry;
use crate::operand::OperandType;

const REG: OperandType = OperandType::Register;
const INDREG: OperandType = OperandType::IndirectRegister;
const V8: OperandType = OperandType::Imm8;
const V16: OperandType = OperandType::Imm16;
const V32: OperandType = OperandType::Imm32;
const INDV32: OperandType = OperandType::IndirectImm32;

pub static OPCODES: &[OpcodeEntry] = &[
    // movement
    OpcodeEntry::new(0x01, "mov", &[REG, REG]),
    OpcodeEntry::new(0x02, "mov", &[REG, V8]),
    OpcodeEntry::new(0x03, "mov", &[REG, V16]),
    OpcodeEntry::new(0x04, "mov", &[REG, V32]),
    OpcodeEntry::new(0x05, "movb", &[REG, INDREG]),
    OpcodeEntry::new(0x06, "movb", &[REG, INDV32]),
    OpcodeEntry::new(0x07, "movw", &[REG, INDREG]),
    OpcodeEntry::new(0x08, "movw", &[REG, INDV32]),
    OpcodeEntry::new(0x09, "movd", &[REG, INDREG]),
    OpcodeEntry::new(0x0A, "movd", &[REG, INDV32]),

    OpcodeEntry::new(0x0B, "movb", &[INDREG, REG]),
    OpcodeEntry::new(0x0C, "movb", &[INDREG, V8]),
    OpcodeEntry::new(0x0D, "movb", &[INDREG, INDREG]),
    OpcodeEntry::new(0x0E, "movb", &[INDREG, INDV32]),
    OpcodeEntry::new(0x0F, "movw", &[INDREG, REG]),
    OpcodeEntry::new(0x1A, "movw", &[INDREG, V16]),
    OpcodeEntry::new(0x1B, "movw", &[INDREG, INDREG]),
    OpcodeEntry::new(0x1C, "movw", &[INDREG, INDV32]),
    OpcodeEntry::new(0x1D, "movd", &[INDREG, REG]),
    OpcodeEntry::new(0x1E, "movd", &[INDREG, V32]),
    OpcodeEntry::new(0x1F, "movd", &[INDREG, INDREG]),
    OpcodeEntry::new(0x20, "movd", &[INDREG, INDV32]),

    OpcodeEntry::new(0x21, "movb", &[INDV32, REG]),
    OpcodeEntry::new(0x22, "movb", &[INDV32, V8]),
    OpcodeEntry::new(0x23, "movb", &[INDV32, INDREG]),
    OpcodeEntry::new(0x24, "movb", &[INDV32, INDV32]),
    OpcodeEntry::new(0x25, "movw", &[INDV32, REG]),
    OpcodeEntry::new(0x26, "movw", &[INDV32, V16]),
    OpcodeEntry::new(0x27, "movw", &[INDV32, INDREG]),
    OpcodeEntry::new(0x28, "movw", &[INDV32, INDV32]),
    OpcodeEntry::new(0x29, "movd", &[INDV32, REG]),
    OpcodeEntry::new(0x2A, "movd", &[INDV32, V32]),
    OpcodeEntry::new(0x2B, "movd", &[INDV32, INDREG]),
    OpcodeEntry::new(0x2C, "movd", &[INDV32, INDV32]),

    OpcodeEntry::new(0x8A, "swap", &[REG, REG]),

    // logic
    OpcodeEntry::new(0x2D, "or", &[REG, REG]),
    OpcodeEntry::new(0x2E, "or", &[REG, V8]),
    OpcodeEntry::new(0x2F, "or", &[REG, V16]),
    OpcodeEntry::new(0x30, "or", &[REG, V32]),
    OpcodeEntry::new(0x31, "xor", &[REG, REG]),
    OpcodeEntry::new(0x32, "xor", &[REG, V8]),
    OpcodeEntry::new(0x33, "xor", &[REG, V16]),
    OpcodeEntry::new(0x34, "xor", &[REG, V32]),
    OpcodeEntry::new(0x35, "and", &[REG, REG]),
    OpcodeEntry::new(0x36, "and", &[REG, V8]),
    OpcodeEntry::new(0x37, "and", &[REG, V16]),
    OpcodeEntry::new(0x38, "and", &[REG, V32]),
    OpcodeEntry::new(0x39, "shl", &[REG, REG]),
    OpcodeEntry::new(0x3A, "shl", &[REG, V8]),
    OpcodeEntry::new(0x3D, "shr", &[REG, REG]),
    OpcodeEntry::new(0x3E, "shr", &[REG, V8]),
    OpcodeEntry::new(0x41, "not", &[REG]),

    // arithmetic
    OpcodeEntry::new(0x42, "add", &[REG, REG]),
    OpcodeEntry::new(0x43, "add", &[REG, V8]),
    OpcodeEntry::new(0x44, "add", &[REG, V16]),
    OpcodeEntry::new(0x45, "add", &[REG, V32]),
    OpcodeEntry::new(0x46, "sub", &[REG, REG]),
    OpcodeEntry::new(0x47, "sub", &[REG, V8]),
    OpcodeEntry::new(0x48, "sub", &[REG, V16]),
    OpcodeEntry::new(0x49, "sub", &[REG, V32]),
    OpcodeEntry::new(0x4A, "cmp", &[REG, REG]),
    OpcodeEntry::new(0x4B, "cmp", &[REG, V8]),
    OpcodeEntry::new(0x4C, "cmp", &[REG, V16]),
    OpcodeEntry::new(0x4D, "cmp", &[REG, V32]),
    OpcodeEntry::new(0x8B, "cmp", &[REG]),
    OpcodeEntry::new(0x4E, "mul", &[REG, REG]),
    OpcodeEntry::new(0x4F, "mul", &[REG, V8]),
    OpcodeEntry::new(0x50, "mul", &[REG, V16]),
    OpcodeEntry::new(0x51, "mul", &[REG, V32]),
    OpcodeEntry::new(0x52, "idiv", &[REG, REG]),
    OpcodeEntry::new(0x53, "idiv", &[REG, V8]),
    OpcodeEntry::new(0x54, "idiv", &[REG, V16]),
    OpcodeEntry::new(0x55, "idiv", &[REG, V32]),
    OpcodeEntry::new(0x56, "mod", &[REG, REG]),
    OpcodeEntry::new(0x57, "mod", &[REG, V8]),
    OpcodeEntry::new(0x58, "mod", &[REG, V16]),
    OpcodeEntry::new(0x59, "mod", &[REG, V32]),
    OpcodeEntry::new(0x5A, "inc", &[REG]),
    OpcodeEntry::new(0x5B, "dec", &[REG]),

    // jumps
    OpcodeEntry::new(0x5C, "bz", &[REG]),
    OpcodeEntry::new(0x5D, "bz", &[V32]),
    OpcodeEntry::new(0x5C, "beq", &[REG]),
    OpcodeEntry::new(0x5D, "beq", &[V32]),
    OpcodeEntry::new(0x5E, "bnz", &[REG]),
    OpcodeEntry::new(0x5F, "bnz", &[V32]),
    OpcodeEntry::new(0x60, "bneg", &[REG]),
    OpcodeEntry::new(0x61, "bneg", &[V32]),
    OpcodeEntry::new(0x62, "bpos", &[REG]),
    OpcodeEntry::new(0x63, "bpos", &[V32]),
    OpcodeEntry::new(0x64, "bgt", &[REG]),
    OpcodeEntry::new(0x65, "bgt", &[V32]),
    OpcodeEntry::new(0x66, "bgte", &[REG]),
    OpcodeEntry::new(0x67, "bgte", &[V32]),
    OpcodeEntry::new(0x68, "blt", &[REG]),
    OpcodeEntry::new(0x69, "blt", &[V32]),
    OpcodeEntry::new(0x6A, "blte", &[REG]),
    OpcodeEntry::new(0x6B, "blte", &[V32]),
    OpcodeEntry::new(0x6C, "bv", &[REG]),
    OpcodeEntry::new(0x6D, "bv", &[V32]),
    OpcodeEntry::new(0x6E, "bnv", &[REG]),
    OpcodeEntry::new(0x6F, "bnv", &[V32]),
    OpcodeEntry::new(0x70, "jmp", &[REG]),
    OpcodeEntry::new(0x71, "jmp", &[V32]),
    OpcodeEntry::new(0x72, "jsr", &[REG]),
    OpcodeEntry::new(0x73, "jsr", &[V32]),
    OpcodeEntry::new(0x74, "ret", &[]),
    OpcodeEntry::new(0x75, "sys", &[REG]),
    OpcodeEntry::new(0x76, "sys", &[V8]),
    OpcodeEntry::new(0x77, "iret", &[]),
    OpcodeEntry::new(0x86, "sret", &[]),

    // stack
    OpcodeEntry::new(0x78, "pushb", &[REG]),
    OpcodeEntry::new(0x79, "pushb", &[V8]),
    OpcodeEntry::new(0x7A, "pushw", &[REG]),
    OpcodeEntry::new(0x7B, "pushw", &[V16]),
    OpcodeEntry::new(0x7C, "pushd", &[REG]),
    OpcodeEntry::new(0x7D, "pushd", &[V32]),
    OpcodeEntry::new(0x7E, "push.a", &[]),
    OpcodeEntry::new(0x7F, "popb", &[REG]),
    OpcodeEntry::new(0x80, "popw", &[REG]),
    OpcodeEntry::new(0x81, "popd", &[REG]),
    OpcodeEntry::new(0x82, "pop.a", &[]),
    OpcodeEntry::new(0x83, "popx", &[REG]),
    OpcodeEntry::new(0x84, "popx", &[V8]),
    OpcodeEntry::new(0x85, "popx", &[V16]),

    // other
    OpcodeEntry::new(0x87, "nop", &[]),
    OpcodeEntry::new(0x88, "halt", &[]),
    OpcodeEntry::new(0x89, "dbg", &[]),
];
