//! Document formats shared by the catalog and model loaders.
//!
//! The format is chosen by file extension: `.json` or `.toml`.

use std::{fs, path::Path};

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Supported on-disk formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self, FormatError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            other => Err(FormatError::UnsupportedExtension(
                other.unwrap_or_default().to_string(),
            )),
        }
    }

    pub fn parse<T: DeserializeOwned>(self, raw: &str) -> Result<T, FormatError> {
        match self {
            Self::Json => Ok(serde_json::from_str(raw)?),
            Self::Toml => Ok(toml::from_str(raw)?),
        }
    }
}

/// Why a document could not be read.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported file extension '{0}' (expected .json or .toml)")]
    UnsupportedExtension(String),
}

/// Read and deserialize `path`, picking the format from its extension.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, FormatError> {
    let format = Format::from_path(path)?;
    let raw = fs::read_to_string(path)?;
    format.parse(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(Format::from_path(Path::new("a/stereotypes.json")).unwrap(), Format::Json);
        assert_eq!(Format::from_path(Path::new("model.TOML")).unwrap(), Format::Toml);
        assert!(matches!(
            Format::from_path(Path::new("catalog.yaml")),
            Err(FormatError::UnsupportedExtension(ext)) if ext == "yaml"
        ));
        assert!(Format::from_path(Path::new("README")).is_err());
    }

    #[test]
    fn parse_reports_syntax_errors() {
        let err = Format::Json.parse::<serde_json::Value>("{").unwrap_err();
        assert!(err.to_string().starts_with("invalid JSON"));
    }
}
