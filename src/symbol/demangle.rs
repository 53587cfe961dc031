// Mon Oct 19 2026 - Alex

//! Best-effort decoding of Itanium C++ mangled names.
//!
//! Only enough of the grammar is understood to recover the qualified
//! function or class name. Types, template arguments and most
//! substitutions are skipped or replaced by placeholders.

use crate::symbol::DemangleError;

pub const MANGLING_PREFIX: &str = "_Z";
pub const SUBSTITUTION_PLACEHOLDER: &str = "XXX";

pub trait Demangler {
    fn demangle(&mut self, name: &str) -> Result<String, DemangleError>;
}

pub fn is_mangled(name: &str) -> bool {
    name.starts_with(MANGLING_PREFIX)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ItaniumDemangler {
    include_leftover: bool,
}

impl ItaniumDemangler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends undecoded trailing bytes as ` (leftover ...)`.
    pub fn with_leftover(mut self, include: bool) -> Self {
        self.include_leftover = include;
        self
    }

    pub fn decode(&self, name: &str) -> Result<DecodedName, DemangleError> {
        if !is_mangled(name) {
            return Ok(DecodedName {
                name: name.to_string(),
                leftover: None,
            });
        }

        let mut decoder = Decoder::new(name);
        decoder.pos = MANGLING_PREFIX.len();
        decoder.decode_encoding()?;

        let leftover = decoder.remaining();
        Ok(DecodedName {
            name: decoder.output,
            leftover: (!leftover.is_empty()).then(|| leftover.to_string()),
        })
    }
}

impl Demangler for ItaniumDemangler {
    fn demangle(&mut self, name: &str) -> Result<String, DemangleError> {
        let decoded = self.decode(name)?;
        Ok(decoded.render(self.include_leftover))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedName {
    pub name: String,
    pub leftover: Option<String>,
}

impl DecodedName {
    pub fn render(&self, include_leftover: bool) -> String {
        match &self.leftover {
            Some(rest) if include_leftover => format!("{} (leftover {})", self.name, rest),
            _ => self.name.clone(),
        }
    }
}

struct Decoder<'a> {
    input: &'a str,
    pos: usize,
    output: String,
}

impl<'a> Decoder<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            output: String::new(),
        }
    }

    fn remaining(&self) -> &'a str {
        self.input.get(self.pos..).unwrap_or("")
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn next_byte(&mut self) -> Result<u8, DemangleError> {
        let b = self
            .peek()
            .ok_or_else(|| DemangleError::new("unexpected end of input", self.pos))?;
        self.pos += 1;
        Ok(b)
    }

    fn error(&self, reason: String) -> DemangleError {
        DemangleError::new(reason, self.pos)
    }

    fn decode_encoding(&mut self) -> Result<(), DemangleError> {
        match self.next_byte()? {
            b'N' => {
                let name = self.read_nested_name()?;
                self.output.push_str(&name);
            }
            b'0'..=b'9' => {
                self.pos -= 1;
                let name = self.read_source_name()?;
                self.output.push_str(name);
            }
            _ => {}
        }

        if self.output.is_empty() {
            return Err(self.error("didn't produce any demangled text".to_string()));
        }
        Ok(())
    }

    /// `<length><chars>`
    fn read_source_name(&mut self) -> Result<&'a str, DemangleError> {
        let digits_start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        let len: usize = self.input[digits_start..self.pos]
            .parse()
            .map_err(|_| DemangleError::new("expected source name length", digits_start))?;

        let end = self.pos.checked_add(len).filter(|&end| end <= self.input.len());
        let name = end
            .and_then(|end| self.input.get(self.pos..end))
            .ok_or_else(|| self.error(format!("source name of length {} runs past end", len)))?;
        self.pos += len;
        Ok(name)
    }

    /// Called after the leading `S`. Only `St` is resolved.
    fn read_substitution(&mut self) -> Result<&'static str, DemangleError> {
        let mut b = self.next_byte()?;
        if b == b't' {
            return Ok("std");
        }
        while b.is_ascii_digit() {
            b = self.next_byte()?;
        }
        Ok(SUBSTITUTION_PLACEHOLDER)
    }

    /// Called after the leading `I`. Skims to the matching `E` without
    /// decoding anything.
    fn skip_template_args(&mut self) -> Result<(), DemangleError> {
        let mut depth = 1usize;
        while let Some(b) = self.peek() {
            self.pos += 1;
            match b {
                b'E' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                // expression, argument pack, literal, nested template, nested name
                b'X' | b'J' | b'L' | b'I' | b'N' => depth += 1,
                b'S' => {
                    self.read_substitution()?;
                }
                b'0'..=b'9' => {
                    self.pos -= 1;
                    self.read_source_name()?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Called after the leading `N`.
    fn read_nested_name(&mut self) -> Result<String, DemangleError> {
        let mut full = String::new();
        let mut last = "";
        loop {
            let b = self.next_byte()?;
            match b {
                b'0'..=b'9' => {
                    self.pos -= 1;
                    last = self.read_source_name()?;
                    if !full.is_empty() {
                        full.push_str("::");
                    }
                    full.push_str(last);
                }
                b'E' => return Ok(full),
                b'C' => match self.next_byte()? {
                    b'1' | b'2' | b'3' => {
                        full.push_str("::");
                        full.push_str(last);
                    }
                    other => {
                        self.pos -= 1;
                        return Err(self.error(format!(
                            "unexpected '{}' reading ctor type",
                            other as char
                        )));
                    }
                },
                b'S' => {
                    let sub = self.read_substitution()?;
                    if !full.is_empty() {
                        full.push_str("::");
                    }
                    full.push_str(sub);
                }
                b'I' => {
                    self.skip_template_args()?;
                    full.push_str("<>");
                }
                // cv-qualifiers
                b'r' | b'V' | b'K' => {}
                other => {
                    self.pos -= 1;
                    return Err(self.error(format!(
                        "unexpected '{}' reading nested name",
                        other as char
                    )));
                }
            }
        }
    }
}
