use std::path::PathBuf;

use crate::block::SpanKind;

/// Errors produced while rendering a document or building a site.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("document has no level 1 heading to use as its title")]
    MissingTitle,

    #[error("{kind:?} span has no target url")]
    MissingTarget { kind: SpanKind },

    #[error("html node is missing its tag")]
    MissingTag,

    #[error("<{tag}> element has no children")]
    MissingChildren { tag: String },

    /// A broken invariant inside the pipeline rather than bad input.
    #[error("internal error: {0}")]
    Internal(String),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
