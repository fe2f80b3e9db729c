//! Loading the documents to compare.

use crate::error::{ErrorContext, Result, StructDiffError};
use serde_json::Value;
use std::path::Path;

/// Serialization format of an input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Guess the format from the file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Parse document text in a known format.
pub fn parse_document(content: &str, format: DocumentFormat) -> Result<Value> {
    match format {
        DocumentFormat::Json => Ok(serde_json::from_str(content)?),
        DocumentFormat::Yaml => Ok(serde_yaml_ng::from_str(content)?),
    }
}

/// Parse document text of unknown format.
///
/// JSON is tried first. Because almost any text is a valid YAML scalar, the
/// YAML fallback only accepts documents that are a mapping or a sequence.
fn sniff_document(content: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(content) {
        return Some(value);
    }
    serde_yaml_ng::from_str::<Value>(content)
        .ok()
        .filter(|value| value.is_object() || value.is_array())
}

/// Read and parse a JSON or YAML document.
pub fn load_document(path: &Path) -> Result<Value> {
    let content =
        std::fs::read_to_string(path).map_err(|e| StructDiffError::io(path, e))?;

    match DocumentFormat::from_path(path) {
        Some(format) => {
            tracing::debug!("Parsing {} as {:?}", path.display(), format);
            parse_document(&content, format)
                .with_context(|| format!("parsing {}", path.display()))
        }
        None => sniff_document(&content)
            .ok_or_else(|| StructDiffError::unknown_format(path.display().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputErrorKind;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("a.JSON")),
            Some(DocumentFormat::Json)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("a.yml")),
            Some(DocumentFormat::Yaml)
        );
        assert_eq!(DocumentFormat::from_path(Path::new("a.txt")), None);
        assert_eq!(DocumentFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_load_json_and_yaml_agree() {
        let tmp = TempDir::new().unwrap();
        let json_path = tmp.path().join("doc.json");
        let yaml_path = tmp.path().join("doc.yaml");
        std::fs::write(&json_path, r#"{"name": "Alice", "tags": ["a", "b"]}"#).unwrap();
        std::fs::write(&yaml_path, "name: Alice\ntags:\n  - a\n  - b\n").unwrap();

        let from_json = load_document(&json_path).unwrap();
        let from_yaml = load_document(&yaml_path).unwrap();
        assert_eq!(from_json, json!({"name": "Alice", "tags": ["a", "b"]}));
        assert_eq!(from_json, from_yaml);
    }

    #[test]
    fn test_unknown_extension_is_sniffed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("doc.data");
        std::fs::write(&path, "age: 30\n").unwrap();
        assert_eq!(load_document(&path).unwrap(), json!({"age": 30}));

        std::fs::write(&path, "just some words").unwrap();
        let err = load_document(&path).unwrap_err();
        assert!(matches!(
            err,
            StructDiffError::Input {
                source: InputErrorKind::UnknownFormat,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_json_has_path_context() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_document(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_document(Path::new("/nonexistent/doc.json")).unwrap_err();
        assert!(matches!(err, StructDiffError::Io { .. }));
    }
}
