// Mon Oct 19 2026 - Alex

use crate::memory::Address;
use crate::symbol::cleanup::strip_dotted;
use crate::symbol::{Symbol, SymbolError, SymbolTable};
use goblin::elf::Elf;
use goblin::strtab::Strtab;
use goblin::Object;
use log::debug;
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads the ELF symbol table of an executable. Falls back to the dynamic
/// symbol table when the binary has been stripped.
pub fn load_from_binary<P: AsRef<Path>>(path: P) -> Result<SymbolTable, SymbolError> {
    let file = File::open(path.as_ref())?;
    // SAFETY: the mapping is read-only and dropped before returning.
    let mmap = unsafe { Mmap::map(&file) }?;

    let object = Object::parse(&mmap)
        .map_err(|e| SymbolError::BinaryParse(format!("{}: {}", path.as_ref().display(), e)))?;

    match object {
        Object::Elf(elf) => Ok(SymbolTable::from_symbols(elf_symbols(&elf))),
        Object::Mach(_) => Err(SymbolError::UnsupportedFormat("Mach-O".to_string())),
        Object::PE(_) => Err(SymbolError::UnsupportedFormat("PE".to_string())),
        Object::Archive(_) => Err(SymbolError::UnsupportedFormat("archive".to_string())),
        _ => Err(SymbolError::UnsupportedFormat(format!(
            "unrecognized object {}",
            path.as_ref().display()
        ))),
    }
}

pub fn elf_symbols(elf: &Elf<'_>) -> Vec<Symbol> {
    let symbols = collect_symbols(elf.syms.iter(), &elf.strtab);
    if !symbols.is_empty() {
        return symbols;
    }
    debug!("no .symtab entries, using .dynsym");
    collect_symbols(elf.dynsyms.iter(), &elf.dynstrtab)
}

fn collect_symbols<I>(syms: I, strtab: &Strtab<'_>) -> Vec<Symbol>
where
    I: Iterator<Item = goblin::elf::Sym>,
{
    syms.filter(|sym| sym.st_value > 0 && sym.st_size > 0)
        .map(|sym| {
            let name = strtab.get_at(sym.st_name).unwrap_or("");
            Symbol::new(
                Address::new(sym.st_value),
                sym.st_size,
                strip_dotted(name).to_string(),
            )
        })
        .collect()
}

/// Reads `<hex addr> <decimal size> <name>` records, one per line.
pub fn load_from_map_file<P: AsRef<Path>>(path: P) -> Result<SymbolTable, SymbolError> {
    let file = File::open(path.as_ref())?;
    parse_symbol_map(BufReader::new(file))
}

pub fn parse_symbol_map<R: BufRead>(reader: R) -> Result<SymbolTable, SymbolError> {
    let mut symbols = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        symbols.push(parse_map_record(trimmed, line_number)?);
    }

    Ok(SymbolTable::from_symbols(symbols))
}

fn parse_map_record(line: &str, line_number: usize) -> Result<Symbol, SymbolError> {
    let format_error = |reason: &str| SymbolError::Format {
        line: line_number,
        text: line.to_string(),
        reason: reason.to_string(),
    };

    let (addr_token, rest) = line
        .split_once(char::is_whitespace)
        .ok_or_else(|| format_error("missing size"))?;
    let (size_token, name) = rest
        .trim_start()
        .split_once(char::is_whitespace)
        .ok_or_else(|| format_error("missing name"))?;

    let address = Address::from_hex(addr_token).map_err(|_| format_error("bad address"))?;
    let size = size_token
        .parse::<u64>()
        .map_err(|_| format_error("bad size"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format_error("missing name"));
    }

    Ok(Symbol::new(address, size, strip_dotted(name).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn test_parse_symbol_map_sorts_and_strips() {
        let text = "4010 32 helper.part.3\n\
            0x4000 16 main\n\
            \n\
            4100 64 operator new(unsigned long)\n";
        let table = parse_symbol_map(Cursor::new(text)).unwrap();

        assert_eq!(table.len(), 3);
        let names: Vec<_> = table.iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["main", "helper", "operator new(unsigned long)"]);
        assert_eq!(table.lookup(Address::new(0x4020)).unwrap().name(), "helper");
        assert_eq!(table.lookup(Address::new(0x400f)).unwrap().name(), "main");
    }

    #[test]
    fn test_parse_symbol_map_rejects_bad_tokens() {
        let err = parse_symbol_map(Cursor::new("4000 16 ok\nzzzz 16 bad\n")).unwrap_err();
        assert!(matches!(err, SymbolError::Format { line: 2, .. }));

        let err = parse_symbol_map(Cursor::new("4000 sixteen name\n")).unwrap_err();
        assert!(matches!(err, SymbolError::Format { line: 1, .. }));

        let err = parse_symbol_map(Cursor::new("4000 16\n")).unwrap_err();
        assert!(matches!(err, SymbolError::Format { line: 1, .. }));
    }

    #[test]
    fn test_load_from_map_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1000 16 f").unwrap();
        writeln!(file, "2000 32 g").unwrap();

        let table = load_from_map_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup(Address::new(0x201f)).unwrap().name(), "g");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_from_map_file("/nonexistent/symbols.map").unwrap_err();
        assert!(matches!(err, SymbolError::Io(_)));
    }

    #[test]
    fn test_non_object_binary_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"this is not an executable, just some text").unwrap();

        assert!(load_from_binary(file.path()).is_err());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_load_own_executable() {
        let exe = std::env::current_exe().unwrap();
        let table = load_from_binary(&exe).unwrap();

        assert!(!table.is_empty());
        for symbol in table.iter() {
            assert!(symbol.size() > 0, "{}", symbol);
            assert!(symbol.address().as_u64() > 0, "{}", symbol);
            assert!(!symbol.name().contains('.'), "{}", symbol);
        }
        assert!(table
            .iter()
            .zip(table.iter().skip(1))
            .all(|(a, b)| a.address() <= b.address()));
    }
}
