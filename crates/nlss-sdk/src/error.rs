use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("codec error: {0}")]
    Codec(#[from] nlss_codec::CodecError),

    #[error("share error: {0}")]
    Nlss(#[from] nlss_crypto::NlssError),

    #[error("private share verification failed: {0}")]
    VerificationFailed(nlss_crypto::NlssError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from loading or resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not configured")]
    Missing(&'static str),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

pub type SdkResult<T> = Result<T, SdkError>;
