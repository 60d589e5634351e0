use crate::error::EncodeError;

/// Absent operands are empty strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction<'a> {
    pub mnemonic: &'a str,
    pub operand1: &'a str,
    pub operand2: &'a str,
}

/// Split a line into `MNEMONIC [WS+ OP1] [',' WS* OP2]`.
pub fn parse_line(line: &str) -> Result<Instruction<'_>, EncodeError> {
    split_line(line, is_operand_char)
}

/// Like `parse_line`, but operands may also contain dots so that `.local`
/// label references survive until the assembler resolves them.
pub fn parse_source_line(line: &str) -> Result<Instruction<'_>, EncodeError> {
    split_line(line, |c| is_operand_char(c) || c == '.')
}

fn split_line(line: &str, operand_char: fn(char) -> bool) -> Result<Instruction<'_>, EncodeError> {
    let syntax = || EncodeError::Syntax {
        line: line.to_string(),
    };
    let text = line.strip_suffix('\n').unwrap_or(line);

    let (mnemonic, rest) = split_run(text, is_mnemonic_char);
    if mnemonic.is_empty() {
        return Err(syntax());
    }

    let (operand1, rest) = match rest.strip_prefix(char::is_whitespace) {
        Some(after_ws) => {
            let (_, after_ws) = split_run(after_ws, char::is_whitespace);
            let (op, rest) = split_run(after_ws, operand_char);
            if op.is_empty() {
                return Err(syntax());
            }
            (op, rest)
        }
        None => ("", rest),
    };

    let (operand2, rest) = match rest.strip_prefix(',') {
        Some(after_comma) => {
            let (_, after_ws) = split_run(after_comma, char::is_whitespace);
            let (op, rest) = split_run(after_ws, operand_char);
            if op.is_empty() {
                return Err(syntax());
            }
            (op, rest)
        }
        None => ("", rest),
    };

    if !rest.is_empty() {
        return Err(syntax());
    }

    Ok(Instruction {
        mnemonic,
        operand1,
        operand2,
    })
}

fn is_mnemonic_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '.'
}

fn is_operand_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '[' | ']')
}

fn split_run(s: &str, pred: impl Fn(char) -> bool) -> (&str, &str) {
    let end = s.find(|c: char| !pred(c)).unwrap_or(s.len());
    s.split_at(end)
}
