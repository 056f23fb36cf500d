//! JSON schema documents as exchanged with the designer front-end.

use crate::model::Schema;
use std::fs;
use std::io::{self, Read};

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("Failed to write {path}: {source}")]
    Write { path: String, source: io::Error },
    #[error("Invalid schema document {origin}: {source}")]
    Json {
        origin: String,
        source: serde_json::Error,
    },
}

/// Parse a schema document. Blank text and `null` both mean "no schema".
pub fn parse_schema(text: &str, origin: &str) -> Result<Option<Schema>, DocumentError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<Option<Schema>>(text).map_err(|source| DocumentError::Json {
        origin: origin.to_string(),
        source,
    })
}

/// Read a schema document from `path`, or from stdin when `path` is `-`.
///
/// Only the content can make a schema absent; an unreadable or missing
/// file is a [`DocumentError::Read`].
pub fn read_schema(path: &str) -> Result<Option<Schema>, DocumentError> {
    let read_err = |source: io::Error| DocumentError::Read {
        path: path.to_string(),
        source,
    };

    let text = if path == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(read_err)?;
        buf
    } else {
        fs::read_to_string(path).map_err(read_err)?
    };

    parse_schema(&text, path)
}

/// Render a schema document; an absent schema renders as `null`.
pub fn render_schema(schema: Option<&Schema>, pretty: bool) -> Result<String, DocumentError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(&schema)
    } else {
        serde_json::to_string(&schema)
    };
    rendered.map_err(|source| DocumentError::Json {
        origin: "output".to_string(),
        source,
    })
}

pub fn write_schema(
    path: &str,
    schema: Option<&Schema>,
    pretty: bool,
) -> Result<(), DocumentError> {
    let mut text = render_schema(schema, pretty)?;
    text.push('\n');
    fs::write(path, text).map_err(|source| DocumentError::Write {
        path: path.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_null_and_blank() {
        assert_eq!(parse_schema("null", "test").unwrap(), None);
        assert_eq!(parse_schema("  \n", "test").unwrap(), None);
    }

    #[test]
    fn test_parse_schema() {
        let text = concat!(
            r#"{"tables":[{"name":"users","columns":"#,
            r#"[{"id":"c1","name":"id","type":"INT","isPrimaryKey":true}]}]}"#,
        );
        let schema = parse_schema(text, "test").unwrap().unwrap();
        assert_eq!(schema.tables[0].name, "users");
        assert!(schema.tables[0].columns[0].is_primary_key);
    }

    #[test]
    fn test_parse_error_names_origin() {
        let err = parse_schema("{\"tables\": 3}", "current.json").unwrap_err();
        assert!(matches!(err, DocumentError::Json { .. }));
        assert!(err.to_string().contains("current.json"));
    }

    #[test]
    fn test_render_absent_is_null() {
        assert_eq!(render_schema(None, false).unwrap(), "null");
    }

    #[test]
    fn test_read_missing_file_is_error() {
        let path = std::env::temp_dir().join("erdmerge-does-not-exist.json");
        let path = path.to_str().unwrap();
        let err = read_schema(path).unwrap_err();
        assert!(matches!(err, DocumentError::Read { .. }));
        assert!(err.to_string().contains(path));
    }

    #[test]
    fn test_read_null_file_is_absent() {
        let path = std::env::temp_dir().join(format!("erdmerge-null-{}.json", std::process::id()));
        fs::write(&path, "null\n").unwrap();
        let read = read_schema(path.to_str().unwrap());
        fs::remove_file(&path).unwrap();
        assert_eq!(read.unwrap(), None);
    }
}
