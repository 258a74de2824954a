use thiserror::Error;

#[derive(Debug, Error)]
pub enum FoyerError {
    #[error(
        "spa assets misconfigured: could not find {path:?} in the asset tree; \
         make sure the frontend build output is embedded (check the rust-embed \
         `folder` attribute and run the frontend build)"
    )]
    MissingIndexAsset { path: String },

    #[error("invalid dev proxy target {url:?}")]
    InvalidProxyTarget {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FoyerError>;
