#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("graph is not planar; planar layout is unavailable")]
    NotPlanar,
    #[error("inconsistent planar embedding: {message}")]
    Embedding { message: String },
}

impl Error {
    pub(crate) fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
