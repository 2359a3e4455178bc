pub mod codepage;

pub use codepage::{Codepage, EncodeError, UnknownCodepage};

use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot encode {path}: {source}")]
    Encode { path: PathBuf, source: EncodeError },
}

/// Read a file and decode it with a single-byte codepage
pub fn read_text(path: &Path, codepage: Codepage) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path).map_err(|source| IoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(codepage.decode(&bytes))
}

/// Encode text with a single-byte codepage and write it to a file
pub fn write_text(path: &Path, content: &str, codepage: Codepage) -> Result<(), IoError> {
    let bytes = codepage
        .encode(content)
        .map_err(|source| IoError::Encode {
            path: path.to_path_buf(),
            source,
        })?;

    // Create parent directories if they don't exist
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| IoError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, bytes).map_err(|source| IoError::Io {
        path: path.to_path_buf(),
        source,
    })
}
