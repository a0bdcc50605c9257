use glob::glob;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

pub fn ensure_utf8<P: AsRef<Path>>(path: P) -> Result<String, Box<dyn Error>> {
    let bytes = fs::read(&path)?;
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            Err(format!("Input file '{}' is not valid UTF-8: {}", path.as_ref().display(), e)
                .into())
        },
    }
}

/// Resolve a dataset path. A path that exists is used as-is, otherwise the
/// file name is searched for recursively below the working directory and the
/// first match wins.
pub fn find_data_file<P: AsRef<Path>>(path: P) -> Option<PathBuf> {
    let path = path.as_ref();
    if path.exists() {
        return Some(path.to_path_buf());
    }

    let name = path.file_name()?.to_str()?;
    let pattern = format!("**/{}", name);
    match glob(&pattern) {
        Ok(paths) => paths.filter_map(Result::ok).next(),
        Err(e) => {
            eprintln!("Invalid glob '{}': {}", pattern, e);
            None
        },
    }
}

/// Normalize a column header for name matching: lowercase, alphanumeric only.
/// The source data carries units and symbols in its headers ("Temperature(C)",
/// "Wind speed (m/s)") that must not be load-bearing.
pub fn normalize_name(name: &str) -> String {
    name.chars().filter(|c| c.is_ascii_alphanumeric()).collect::<String>().to_ascii_lowercase()
}
