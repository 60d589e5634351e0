use std::collections::{BTreeMap, HashMap};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::encoder::encode_operands;
use crate::error::AssembleError;
use crate::instructions::OpcodeTable;
use crate::memory::Bus;
use crate::operand::{parse_literal, Operand};
use crate::parser::parse_source_line;
use crate::registers::Register;

const ADDRESS_SPACE: u64 = 1 << 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembleConfig {
    /// Address of the first emitted byte.
    pub origin: u32,
    /// Everything from this char to the end of the line is ignored.
    pub comment: char,
}

impl Default for AssembleConfig {
    fn default() -> Self {
        Self {
            origin: 0,
            comment: ';',
        }
    }
}

/// One source line that emitted bytes: an instruction or a data directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    /// 1-based line number in the source.
    pub line: usize,
    pub addr: u32,
    pub source: String,
    pub bytes: Vec<u8>,
}

impl Statement {
    pub fn hex(&self) -> String {
        let hex: Vec<String> = self.bytes.iter().map(|b| format!("{b:02x}")).collect();
        hex.join(" ")
    }
}

/// An assembled source: statements laid out back to back from `origin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Program {
    pub origin: u32,
    pub statements: Vec<Statement>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, u32>,
}

impl Program {
    /// All bytes in address order.
    pub fn bytes(&self) -> Vec<u8> {
        self.statements
            .iter()
            .flat_map(|s| s.bytes.iter().copied())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.statements.iter().map(|s| s.bytes.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Address just past the last byte. A program that ends exactly at the top
    /// of the address space returns `1 << 32`.
    pub fn end(&self) -> u64 {
        u64::from(self.origin) + self.len() as u64
    }

    /// Write every byte to its address on `bus`.
    ///
    /// Every statement's range is checked with [`Bus::check`] before the first
    /// write, so a program that does not fit leaves the bus untouched. Buses
    /// without an up-front check may still see a partial write.
    pub fn load<B: Bus>(&self, bus: &mut B) -> Result<()> {
        for stmt in &self.statements {
            bus.check(stmt.addr, stmt.bytes.len())?;
        }
        for stmt in &self.statements {
            let mut addr = stmt.addr;
            for &b in &stmt.bytes {
                bus.write_u8(addr, b)?;
                addr = addr.wrapping_add(1);
            }
        }
        debug!(origin = self.origin, len = self.len(), "program loaded");
        Ok(())
    }
}

struct Label {
    addr: u32,
    line: usize,
}

/// A line that still has to be emitted in the second pass.
struct Pending<'a> {
    line: usize,
    addr: u32,
    scope: String,
    code: &'a str,
    body: &'a str,
    len: usize,
}

/// Assemble a whole source.
///
/// Each line is `[label:] [instruction | directive] [; comment]`. Labels starting
/// with `.` are local to the closest preceding global label. Label operands are
/// always encoded as 32-bit addresses, so the first pass can lay out every line
/// before any label is known.
pub fn assemble(source: &str, cfg: &AssembleConfig) -> Result<Program, AssembleError> {
    let table = OpcodeTable::global();
    let mut labels: HashMap<String, Label> = HashMap::new();
    let mut pending = Vec::new();
    let mut scope = String::new();
    let mut offset = 0u64;

    for (i, raw) in source.lines().enumerate() {
        let line = i + 1;
        let code = strip_comment(raw, cfg.comment).trim();
        if code.is_empty() {
            continue;
        }
        let (label, body) = split_label(code);
        let addr = address(cfg.origin, offset, line)?;

        if let Some(name) = label {
            if Register::from_name(name).is_ok() {
                return Err(AssembleError::ReservedLabel {
                    line,
                    name: name.to_string(),
                });
            }
            let name = if name.starts_with('.') {
                format!("{scope}{name}")
            } else {
                scope = name.to_string();
                scope.clone()
            };
            if let Some(first) = labels.get(&name) {
                return Err(AssembleError::DuplicateLabel {
                    line,
                    name,
                    first: first.line,
                });
            }
            trace!(line, addr, "{name}:");
            labels.insert(name, Label { addr, line });
        }

        if body.is_empty() {
            continue;
        }
        let len = emit(table, body, line, &scope, None)?.len();
        offset += len as u64;
        if u64::from(cfg.origin) + offset > ADDRESS_SPACE {
            return Err(AssembleError::AddressOverflow { line });
        }
        pending.push(Pending {
            line,
            addr,
            scope: scope.clone(),
            code,
            body,
            len,
        });
    }

    let mut statements = Vec::with_capacity(pending.len());
    for p in pending {
        let bytes = emit(table, p.body, p.line, &p.scope, Some(&labels))?;
        debug_assert_eq!(bytes.len(), p.len, "size changed between passes");
        let stmt = Statement {
            line: p.line,
            addr: p.addr,
            source: p.code.to_string(),
            bytes,
        };
        debug!(line = stmt.line, addr = stmt.addr, bytes = %stmt.hex(), "{}", stmt.source);
        statements.push(stmt);
    }

    let program = Program {
        origin: cfg.origin,
        statements,
        labels: labels.into_iter().map(|(name, l)| (name, l.addr)).collect(),
    };
    info!(
        statements = program.statements.len(),
        labels = program.labels.len(),
        bytes = program.len(),
        "assembled program"
    );
    Ok(program)
}

fn address(origin: u32, offset: u64, line: usize) -> Result<u32, AssembleError> {
    u32::try_from(u64::from(origin) + offset).map_err(|_| AssembleError::AddressOverflow { line })
}

/// Cut `line` at the comment char, ignoring comment chars inside string literals.
fn strip_comment(line: &str, comment: char) -> &str {
    let mut quoted = false;
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if quoted => escaped = true,
            c if c == comment && !quoted => return &line[..i],
            '"' => quoted = !quoted,
            _ => {}
        }
    }
    line
}

fn split_label(code: &str) -> (Option<&str>, &str) {
    match code.split_once(':') {
        Some((name, rest)) if is_label_name(name.trim_end()) => (Some(name.trim_end()), rest.trim()),
        _ => (None, code),
    }
}

fn is_label_name(s: &str) -> bool {
    let mut chars = s.strip_prefix('.').unwrap_or(s).chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Bytes for one statement body. Without `labels` every label reads as 0,
/// which is enough to size the statement.
fn emit(
    table: &OpcodeTable,
    body: &str,
    line: usize,
    scope: &str,
    labels: Option<&HashMap<String, Label>>,
) -> Result<Vec<u8>, AssembleError> {
    let resolve = |name: &str| -> Result<u32, AssembleError> {
        let name = if name.starts_with('.') {
            format!("{scope}{name}")
        } else {
            name.to_string()
        };
        match labels {
            None => Ok(0),
            Some(labels) => labels
                .get(&name)
                .map(|l| l.addr)
                .ok_or(AssembleError::UndefinedLabel { line, name }),
        }
    };

    if body.starts_with('.') {
        return directive(body, line, resolve);
    }

    let encode_err = |source| AssembleError::Encode { line, source };
    let inst = parse_source_line(body).map_err(encode_err)?;
    let operand = |token: &str| -> Result<Operand, AssembleError> {
        let (inner, indirect) = match token.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
            Some(inner) => (inner, true),
            None => (token, false),
        };
        if is_symbol(inner) {
            let addr = resolve(inner)?;
            return Ok(if indirect {
                Operand::IndirectImm32(addr)
            } else {
                Operand::Imm32(addr)
            });
        }
        Operand::classify(token).map_err(encode_err)
    };
    let op1 = operand(inst.operand1)?;
    let op2 = operand(inst.operand2)?;
    encode_operands(table, inst.mnemonic, op1, op2)
        .map(|bytes| bytes.into_vec())
        .map_err(encode_err)
}

fn is_symbol(token: &str) -> bool {
    is_label_name(token) && Register::from_name(token).is_err()
}

fn directive(
    body: &str,
    line: usize,
    resolve: impl Fn(&str) -> Result<u32, AssembleError>,
) -> Result<Vec<u8>, AssembleError> {
    let (name, args) = body.split_once(char::is_whitespace).unwrap_or((body, ""));
    let args = args.trim();
    match name {
        ".byte" | ".db" => data(args, 1, line, resolve),
        ".word" | ".dw" => data(args, 2, line, resolve),
        ".dword" | ".dd" => data(args, 4, line, resolve),
        ".ascii" => ascii(args, line),
        ".asciiz" => {
            let mut bytes = ascii(args, line)?;
            bytes.push(0);
            Ok(bytes)
        }
        _ => Err(AssembleError::UnknownDirective {
            line,
            name: name.to_string(),
        }),
    }
}

/// Comma separated little-endian values of `width` bytes each.
fn data(
    args: &str,
    width: usize,
    line: usize,
    resolve: impl Fn(&str) -> Result<u32, AssembleError>,
) -> Result<Vec<u8>, AssembleError> {
    let mut out = Vec::new();
    for token in args.split(',').map(str::trim) {
        let out_of_range = || AssembleError::DataOutOfRange {
            line,
            token: token.to_string(),
            width,
        };
        let value = if is_symbol(token) {
            if width < 4 {
                return Err(out_of_range());
            }
            u64::from(resolve(token)?)
        } else {
            let (value, overflowed) = parse_literal(token).ok_or_else(|| AssembleError::InvalidData {
                line,
                token: token.to_string(),
            })?;
            if overflowed || value >> (8 * width) != 0 {
                return Err(out_of_range());
            }
            value
        };
        out.extend_from_slice(&value.to_le_bytes()[..width]);
    }
    Ok(out)
}

fn ascii(args: &str, line: usize) -> Result<Vec<u8>, AssembleError> {
    let invalid = || AssembleError::InvalidData {
        line,
        token: args.to_string(),
    };
    let text = args
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .ok_or_else(invalid)?;

    let mut out = Vec::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        let byte = match c {
            '\\' => match chars.next() {
                Some('n') => b'\n',
                Some('t') => b'\t',
                Some('r') => b'\r',
                Some('0') => 0,
                Some('\\') => b'\\',
                Some('"') => b'"',
                _ => return Err(invalid()),
            },
            '"' => return Err(invalid()),
            c if c.is_ascii() => c as u8,
            _ => return Err(invalid()),
        };
        out.push(byte);
    }
    Ok(out)
}
