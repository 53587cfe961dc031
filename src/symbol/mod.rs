// Mon Oct 19 2026 - Alex

pub mod cleanup;
pub mod cppfilt;
pub mod demangle;
pub mod error;
pub mod loader;
pub mod symbol_info;
pub mod table;

pub use cleanup::{strip_dotted, strip_type_noise};
pub use cppfilt::CppFiltDemangler;
pub use demangle::{DecodedName, Demangler, ItaniumDemangler};
pub use error::{DemangleError, SymbolError};
pub use loader::{load_from_binary, load_from_map_file};
pub use symbol_info::Symbol;
pub use table::SymbolTable;

use crate::config::{Config, DemanglerKind};
use log::warn;
use std::path::PathBuf;

/// Where symbols come from: an executable's symbol table or a precomputed
/// map file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolSource {
    Binary(PathBuf),
    MapFile(PathBuf),
}

impl SymbolSource {
    pub fn load(&self) -> Result<SymbolTable, SymbolError> {
        match self {
            SymbolSource::Binary(path) => load_from_binary(path),
            SymbolSource::MapFile(path) => load_from_map_file(path),
        }
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            SymbolSource::Binary(path) | SymbolSource::MapFile(path) => path,
        }
    }
}

pub fn create_demangler(config: &Config) -> Box<dyn Demangler> {
    let builtin = ItaniumDemangler::new().with_leftover(config.include_leftover);
    match config.demangler {
        DemanglerKind::Builtin => Box::new(builtin),
        DemanglerKind::CppFilt => match CppFiltDemangler::spawn(&config.cppfilt_program) {
            Ok(cppfilt) => Box::new(cppfilt),
            Err(e) => {
                warn!("{}; using built-in demangler", e);
                Box::new(builtin)
            }
        },
    }
}
