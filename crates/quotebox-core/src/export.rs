use crate::{models::Quote, Error, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// File name used when the caller doesn't pick one
pub const DEFAULT_EXPORT_FILE: &str = "quotes.json";

/// JSON import/export for quote lists
pub struct Exporter;

impl Exporter {
    /// Pretty-printed JSON array, the same shape the store persists
    pub fn to_json(quotes: &[Quote]) -> Result<String> {
        Ok(serde_json::to_string_pretty(quotes)?)
    }

    /// Parse a JSON array of `{text, category}` records
    ///
    /// Field values are taken as-is; only the shape is checked.
    pub fn from_json(contents: &str) -> Result<Vec<Quote>> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Write the quotes to `path`, replacing whatever is there
    pub fn export_to_file<P: AsRef<Path>>(quotes: &[Quote], path: P) -> Result<()> {
        let content = Self::to_json(quotes)?;

        let mut file = File::create(path.as_ref()).map_err(|e| {
            Error::Storage(format!(
                "Failed to create {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        file.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Read a previously exported (or hand-written) file
    pub fn import_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Quote>> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}
