//! # Process File Loader
//!
//! One process per line: arrival time, then alternating CPU and I/O bursts,
//! all in milliseconds. Blank lines and lines starting with `#` are skipped.
//!
//! ```text
//! # arrival  cpu  io  cpu
//! 0          100  50  30
//! 10         300
//! ```

use schedsim_execution::{ExecError, ProcessDefinition};
use std::fmt;
use std::path::Path;

/// Errors raised while reading a process file
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be read
    Io(std::io::Error),
    /// A token is not a non-negative integer
    Parse { line: usize, token: String },
    /// The numbers do not form a valid process
    Definition { line: usize, source: ExecError },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "cannot read process file: {}", err),
            LoadError::Parse { line, token } => {
                write!(f, "line {}: '{}' is not a non-negative integer", line, token)
            }
            LoadError::Definition { line, source } => write!(f, "line {}: {}", line, source),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            LoadError::Parse { .. } => None,
            LoadError::Definition { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::Io(err)
    }
}

/// Read and parse a process file
pub fn load(path: &Path) -> Result<Vec<ProcessDefinition>, LoadError> {
    let text = std::fs::read_to_string(path)?;
    let definitions = parse(&text)?;
    log::info!("Loaded {} processes from {}", definitions.len(), path.display());
    Ok(definitions)
}

/// Parse process definitions; PIDs follow the order of process lines
pub fn parse(text: &str) -> Result<Vec<ProcessDefinition>, LoadError> {
    let mut definitions = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let content = raw.trim();
        if content.is_empty() || content.starts_with('#') {
            continue;
        }

        let numbers = content
            .split_whitespace()
            .map(|token| {
                token.parse::<u64>().map_err(|_| LoadError::Parse {
                    line,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        // split_whitespace on a non-empty trimmed line yields at least one token
        let (arrival, bursts) = match numbers.split_first() {
            Some((arrival, bursts)) => (*arrival, bursts.to_vec()),
            None => continue,
        };

        let definition = ProcessDefinition::new(arrival, bursts)
            .map_err(|source| LoadError::Definition { line, source })?;
        log::debug!("line {}: pid {} {:?}", line, definitions.len(), definition);
        definitions.push(definition);
    }

    Ok(definitions)
}

// =============================================================================
// TESTS
// =============================================================================
