// Document boundary: YAML decode/encode over serde_yaml::Value.
// - `decode` / `decode_str` read the first document of a stream.
// - `encode` writes YAML or pretty JSON.
// - File helpers mirror the stream ones for --input / --out.
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Mapping,
    Sequence,
    Scalar,
    Absent,
}

pub fn kind_of(v: &Value) -> NodeKind {
    match v {
        Value::Null => NodeKind::Absent,
        Value::Mapping(_) => NodeKind::Mapping,
        Value::Sequence(_) => NodeKind::Sequence,
        Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Tagged(_) => NodeKind::Scalar,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

/// Decode the first YAML document from `reader`. Trailing documents are ignored.
pub fn decode<R: Read>(mut reader: R) -> Result<Value> {
    let mut text = String::new();
    reader.read_to_string(&mut text).map_err(Error::Input)?;
    decode_str(&text)
}

/// Like [`decode`]. Merge keys (`<<: *anchor`) are resolved into their maps.
pub fn decode_str(text: &str) -> Result<Value> {
    if !has_document(text) {
        return Err(Error::EmptyInput);
    }
    let first = serde_yaml::Deserializer::from_str(text)
        .next()
        .ok_or(Error::EmptyInput)?;
    let mut value = Value::deserialize(first).map_err(Error::Decode)?;
    value.apply_merge().map_err(Error::Decode)?;
    Ok(value)
}

// Blank and comment-only text still yields a null document from the parser.
fn has_document(text: &str) -> bool {
    text.lines().map(str::trim).any(|l| !l.is_empty() && !l.starts_with('#'))
}

pub fn encode<W: Write>(mut writer: W, value: &Value, format: Format) -> Result<()> {
    match format {
        Format::Yaml => serde_yaml::to_writer(&mut writer, value).map_err(Error::EncodeYaml)?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut writer, value).map_err(Error::EncodeJson)?;
            writer.write_all(b"\n").map_err(Error::Write)?;
        }
    }
    writer.flush().map_err(Error::Write)
}

pub fn encode_to_string(value: &Value, format: Format) -> Result<String> {
    match format {
        Format::Yaml => serde_yaml::to_string(value).map_err(Error::EncodeYaml),
        Format::Json => serde_json::to_string_pretty(value)
            .map(|s| s + "\n")
            .map_err(Error::EncodeJson),
    }
}

pub fn read_document_file(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    decode_str(&text)
}

pub fn write_document_file(path: &Path, value: &Value, format: Format) -> Result<()> {
    let s = encode_to_string(value, format)?;
    fs::write(path, s).map_err(|source| Error::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}
