//! `.env` file loading.

use std::{io, path::Path};

/// Load `.env` from the working directory or its parents
///
/// Returns `Ok(false)` when no file exists. A file that exists but cannot
/// be read or parsed is an error, so a broken `.env` never half-applies.
pub fn load_dotenv() -> Result<bool, dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(_) => Ok(true),
        Err(e) if is_missing_file(&e) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Load a specific env file, with the same missing-file rule as [`load_dotenv`]
pub fn load_dotenv_from(path: &Path) -> Result<bool, dotenvy::Error> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(e) if is_missing_file(&e) => Ok(false),
        Err(e) => Err(e),
    }
}

fn is_missing_file(e: &dotenvy::Error) -> bool {
    matches!(e, dotenvy::Error::Io(io_err) if io_err.kind() == io::ErrorKind::NotFound)
}
