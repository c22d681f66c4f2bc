use std::env::VarError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;

use thiserror::Error;
use tracing::{debug, info};

use crate::placeholder::{Substitution, try_substitute};

#[derive(Debug, Error)]
pub enum InjectError {
    #[error("failed to read {}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("{} is not valid UTF-8 text", .path.display())]
    Decode {
        path: PathBuf,
        source: FromUtf8Error,
    },
    #[error("failed to write {}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("environment variable {name} is not valid Unicode")]
    Variable { name: String, source: VarError },
}

/// Read `path` and substitute placeholders without touching the file.
pub fn render_file<F>(path: &Path, mut lookup: F) -> Result<Substitution, InjectError>
where
    F: FnMut(&str) -> Result<Option<String>, VarError>,
{
    debug!(path = %path.display(), "reading target file");
    let bytes = fs::read(path).map_err(|source| InjectError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8(bytes).map_err(|source| InjectError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let substitution = try_substitute(&content, |name| {
        lookup(name).map_err(|source| InjectError::Variable {
            name: name.to_string(),
            source,
        })
    })?;
    for usage in substitution
        .usage
        .iter()
        .filter(|usage| usage.occurrences > 0 && usage.value_set)
    {
        debug!(name = usage.name, occurrences = usage.occurrences, "replaced placeholder");
    }
    for usage in substitution.missing() {
        debug!(
            name = usage.name,
            occurrences = usage.occurrences,
            "variable unset, replaced placeholder with empty string"
        );
    }
    Ok(substitution)
}

/// Substitute placeholders in `path` and overwrite it with the result.
///
/// The file is always rewritten, even when nothing matched. Bytes are written
/// exactly as produced, so existing `\n` and `\r\n` line endings survive.
pub fn inject_file<F>(path: &Path, lookup: F) -> Result<Substitution, InjectError>
where
    F: FnMut(&str) -> Result<Option<String>, VarError>,
{
    let substitution = render_file(path, lookup)?;
    fs::write(path, substitution.content.as_bytes()).map_err(|source| InjectError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        replaced = substitution.replaced(),
        "injected placeholders"
    );
    Ok(substitution)
}
