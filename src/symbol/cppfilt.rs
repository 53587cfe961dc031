// Mon Oct 19 2026 - Alex

use crate::symbol::{DemangleError, Demangler};
use log::debug;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

pub const DEFAULT_PROGRAM: &str = "c++filt";

/// Delegates to an external demangler over a pipe, one name per line.
pub struct CppFiltDemangler {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    line: String,
}

impl CppFiltDemangler {
    pub fn spawn(program: &str) -> Result<Self, DemangleError> {
        let mut child = Command::new(program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| DemangleError::new(format!("failed to start {}: {}", program, e), 0))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| DemangleError::new("child has no stdin", 0))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| DemangleError::new("child has no stdout", 0))?;

        debug!("started {} (pid {})", program, child.id());

        Ok(Self {
            child,
            stdin,
            stdout: BufReader::new(stdout),
            line: String::new(),
        })
    }
}

impl Demangler for CppFiltDemangler {
    fn demangle(&mut self, name: &str) -> Result<String, DemangleError> {
        writeln!(self.stdin, "{}", name)?;
        self.stdin.flush()?;

        self.line.clear();
        if self.stdout.read_line(&mut self.line)? == 0 {
            return Err(DemangleError::new("demangler closed its output", 0));
        }
        Ok(self.line.trim_end_matches(['\n', '\r']).to_string())
    }
}

impl Drop for CppFiltDemangler {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
