use std::path::PathBuf;

pub type RoundelResult<T> = Result<T, RoundelError>;

#[derive(thiserror::Error, Debug)]
pub enum RoundelError {
    #[error("config error: {0}")]
    Config(String),

    #[error("unsupported output format '{}', expected a .svg or .pdf path", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("loading image '{}' failed: {source}", .path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RoundelError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    pub fn image_load(path: impl Into<PathBuf>, source: impl Into<anyhow::Error>) -> Self {
        Self::ImageLoad {
            path: path.into(),
            source: source.into(),
        }
    }
}
