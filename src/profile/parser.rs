// Mon Oct 19 2026 - Alex

use crate::memory::{Address, MapEntry, MemoryMap};
use crate::profile::{Profile, ProfileError, Stack, Stats};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::io::BufRead;

pub const HEADER_PREFIX: &str = "heap profile:";
pub const MAPPED_LIBRARIES: &str = "MAPPED_LIBRARIES:";

static STATS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+):\s+(\d+) \[\s*(\d+):\s+(\d+)\] @ ?(.*)$").expect("stats pattern")
});

static MAP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9a-fA-F]+)-([0-9a-fA-F]+)\s+(\S{4})\s+([0-9a-fA-F]+)\s+(\S+)\s+(\d+)\s*(.*)$")
        .expect("map pattern")
});

pub fn parse_heap_profile<R: BufRead>(reader: R) -> Result<Profile, ProfileError> {
    ProfileParser::new(reader).parse()
}

pub struct ProfileParser<R> {
    reader: R,
    line_number: usize,
    buffer: String,
}

enum Section {
    Stacks,
    Maps,
}

impl<R: BufRead> ProfileParser<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buffer: String::new(),
        }
    }

    pub fn parse(mut self) -> Result<Profile, ProfileError> {
        let header_line = match self.next_line()? {
            Some(line) => line,
            None => return Err(ProfileError::Empty),
        };
        let rest = header_line
            .strip_prefix(HEADER_PREFIX)
            .ok_or_else(|| ProfileError::format(self.line_number, &header_line, "bad header"))?;
        let (header, _) = self.parse_stats(rest, &header_line)?;

        let mut profile = Profile::new(header);
        let mut entries = Vec::new();
        let mut section = Section::Stacks;
        let mut dropped = 0usize;

        while let Some(line) = self.next_line()? {
            match section {
                Section::Stacks => {
                    if line == MAPPED_LIBRARIES {
                        section = Section::Maps;
                        continue;
                    }
                    if line.trim().is_empty() {
                        continue;
                    }
                    match self.parse_record(&line)? {
                        Some(stack) => profile.stacks.push(stack),
                        None => dropped += 1,
                    }
                }
                Section::Maps => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    entries.push(self.parse_map_entry(&line)?);
                }
            }
        }

        if matches!(section, Section::Stacks) {
            debug!("profile ended without a {} section", MAPPED_LIBRARIES);
        }
        debug!(
            "parsed {} stacks ({} dropped), {} mapped modules",
            profile.stacks.len(),
            dropped,
            entries.len()
        );

        profile.maps = MemoryMap::from_entries(entries);
        Ok(profile)
    }

    fn next_line(&mut self) -> Result<Option<String>, ProfileError> {
        self.buffer.clear();
        if self.reader.read_line(&mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        Ok(Some(self.buffer.trim_end_matches(['\n', '\r']).to_string()))
    }

    /// Returns `None` for records that carry nothing worth graphing.
    fn parse_record(&self, line: &str) -> Result<Option<Stack>, ProfileError> {
        let (stats, rest) = self.parse_stats(line, line)?;

        if stats.inuse_bytes == 0 {
            return Ok(None);
        }

        let rest = rest.trim();
        if rest.is_empty() {
            warn!("line {}: no stack on {:?}", self.line_number, line);
            return Ok(None);
        }

        let addresses = rest
            .split_whitespace()
            .map(|token| self.parse_frame(token, line))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(Stack::new(stats, addresses)))
    }

    fn parse_frame(&self, token: &str, line: &str) -> Result<Address, ProfileError> {
        let digits = token.strip_prefix("0x").ok_or_else(|| {
            ProfileError::format(self.line_number, line, format!("non hex address '{}'", token))
        })?;
        self.parse_hex(digits, line)
    }

    fn parse_stats<'l>(&self, text: &'l str, line: &str) -> Result<(Stats, &'l str), ProfileError> {
        let caps = STATS_RE
            .captures(text)
            .ok_or_else(|| ProfileError::format(self.line_number, line, "bad stats line"))?;

        let stats = Stats::new(
            self.parse_count(&caps, 1, line)?,
            self.parse_count(&caps, 2, line)?,
            self.parse_count(&caps, 3, line)?,
            self.parse_count(&caps, 4, line)?,
        );
        let rest = caps.get(5).map_or("", |m| m.as_str());

        Ok((stats, rest))
    }

    fn parse_map_entry(&self, line: &str) -> Result<MapEntry, ProfileError> {
        let caps = MAP_RE
            .captures(line)
            .ok_or_else(|| ProfileError::format(self.line_number, line, "bad maps line"))?;

        let start = self.parse_hex(&caps[1], line)?;
        let end = self.parse_hex(&caps[2], line)?;
        let path = caps.get(7).map_or("", |m| m.as_str()).trim().to_string();

        Ok(MapEntry::new(start, end, path))
    }

    fn parse_count(&self, caps: &Captures<'_>, index: usize, line: &str) -> Result<u64, ProfileError> {
        caps[index]
            .parse::<u64>()
            .map_err(|e| ProfileError::format(self.line_number, line, format!("bad count: {}", e)))
    }

    fn parse_hex(&self, digits: &str, line: &str) -> Result<Address, ProfileError> {
        u64::from_str_radix(digits, 16)
            .map(Address::new)
            .map_err(|e| ProfileError::format(self.line_number, line, format!("bad address '{}': {}", digits, e)))
    }
}
