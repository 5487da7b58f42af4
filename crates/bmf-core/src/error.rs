use std::path::PathBuf;

use thiserror::Error;

/// Failures at the document boundary. Filtering itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid YAML input: {0}")]
    Decode(#[source] serde_yaml::Error),

    #[error("cannot read input: {0}")]
    Input(#[source] std::io::Error),

    #[error("input contains no YAML document")]
    EmptyInput,

    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot encode YAML: {0}")]
    EncodeYaml(#[source] serde_yaml::Error),

    #[error("cannot encode JSON: {0}")]
    EncodeJson(#[source] serde_json::Error),

    #[error("cannot write {}: {source}", .path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("write failed: {0}")]
    Write(#[source] std::io::Error),
}

impl Error {
    /// Input errors happen before any transformation ran; everything else
    /// is an output error raised after the document was already mutated.
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            Error::Decode(_) | Error::Input(_) | Error::EmptyInput | Error::Read { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
