mod compression;

pub use compression::Compression;

use once_cell::sync::Lazy;
use regex::bytes::Regex;
use std::io::{BufRead, BufReader, Read};

pub const SMALL_BUFFER_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementType {
    Unknown,
    CreateTable,
    AlterTable,
}

static CREATE_TABLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)^\s*CREATE\s+(?:(?:TEMP|TEMPORARY|UNLOGGED)\s+)?TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?(?:[`"\[\]\w]+\s*\.\s*)*[`"\[]?([^\s`"\[\](]+)"#)
        .unwrap()
});

static ALTER_TABLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)^\s*ALTER\s+TABLE\s+(?:ONLY\s+)?(?:IF\s+EXISTS\s+)?(?:[`"\[\]\w]+\s*\.\s*)*[`"\[]?([^\s`"\[\];]+)"#)
        .unwrap()
});

/// Splits a SQL stream into `;`-terminated statements.
///
/// Quotes are respected and `--` / `/* */` comments are dropped from the
/// returned statement text, so a semicolon inside a comment never ends a
/// statement.
pub struct Parser<R: Read> {
    reader: BufReader<R>,
    stmt_buffer: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    Code,
    SingleQuote,
    DoubleQuote,
    Backtick,
    LineComment,
    BlockComment,
}

impl<R: Read> Parser<R> {
    pub fn new(reader: R, buffer_size: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(buffer_size, reader),
            stmt_buffer: Vec::with_capacity(32 * 1024),
        }
    }

    pub fn read_statement(&mut self) -> std::io::Result<Option<Vec<u8>>> {
        self.stmt_buffer.clear();

        let mut state = Lexeme::Code;
        let mut escaped = false;
        // A '-', '/' or '*' held back until the next byte decides what it is
        let mut pending: Option<u8> = None;

        loop {
            let buf = self.reader.fill_buf()?;
            if buf.is_empty() {
                if let Some(p) = pending.take() {
                    if state == Lexeme::Code {
                        self.stmt_buffer.push(p);
                    }
                }
                if self.stmt_buffer.iter().all(u8::is_ascii_whitespace) {
                    return Ok(None);
                }
                let result = std::mem::take(&mut self.stmt_buffer);
                return Ok(Some(result));
            }

            let mut consumed = buf.len();
            let mut found_terminator = false;

            for (i, &b) in buf.iter().enumerate() {
                match state {
                    Lexeme::LineComment => {
                        if b == b'\n' {
                            state = Lexeme::Code;
                            self.stmt_buffer.push(b'\n');
                        }
                    }
                    Lexeme::BlockComment => {
                        if pending.take() == Some(b'*') && b == b'/' {
                            state = Lexeme::Code;
                            self.stmt_buffer.push(b' ');
                        } else if b == b'*' {
                            pending = Some(b);
                        }
                    }
                    Lexeme::SingleQuote | Lexeme::DoubleQuote | Lexeme::Backtick => {
                        self.stmt_buffer.push(b);
                        if escaped {
                            escaped = false;
                        } else if b == b'\\' && state != Lexeme::Backtick {
                            escaped = true;
                        } else if (state == Lexeme::SingleQuote && b == b'\'')
                            || (state == Lexeme::DoubleQuote && b == b'"')
                            || (state == Lexeme::Backtick && b == b'`')
                        {
                            state = Lexeme::Code;
                        }
                    }
                    Lexeme::Code => {
                        match (pending.take(), b) {
                            (Some(b'-'), b'-') => {
                                state = Lexeme::LineComment;
                                continue;
                            }
                            (Some(b'/'), b'*') => {
                                state = Lexeme::BlockComment;
                                continue;
                            }
                            (Some(p), _) => self.stmt_buffer.push(p),
                            (None, _) => {}
                        }

                        match b {
                            b'-' | b'/' => pending = Some(b),
                            b'\'' => {
                                state = Lexeme::SingleQuote;
                                self.stmt_buffer.push(b);
                            }
                            b'"' => {
                                state = Lexeme::DoubleQuote;
                                self.stmt_buffer.push(b);
                            }
                            b'`' => {
                                state = Lexeme::Backtick;
                                self.stmt_buffer.push(b);
                            }
                            b';' => {
                                self.stmt_buffer.push(b);
                                consumed = i + 1;
                                found_terminator = true;
                                break;
                            }
                            _ => self.stmt_buffer.push(b),
                        }
                    }
                }
            }

            self.reader.consume(consumed);

            if found_terminator {
                let result = std::mem::take(&mut self.stmt_buffer);
                return Ok(Some(result));
            }
        }
    }

    pub fn parse_statement(stmt: &[u8]) -> (StatementType, String) {
        if let Some(name) = capture_name(&CREATE_TABLE_RE, stmt) {
            return (StatementType::CreateTable, name);
        }

        if let Some(name) = capture_name(&ALTER_TABLE_RE, stmt) {
            return (StatementType::AlterTable, name);
        }

        (StatementType::Unknown, String::new())
    }
}

fn capture_name(re: &Regex, stmt: &[u8]) -> Option<String> {
    re.captures(stmt)
        .and_then(|caps| caps.get(1))
        .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
}
