use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not resolve {target}: {source}")]
    Resolve {
        target: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to bind local UDP socket: {0}")]
    Bind(#[source] io::Error),

    #[error("failed to send to {target}: {source}")]
    Send {
        target: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid OSC address {0:?}: must be non-empty and start with '/'")]
    InvalidAddress(String),

    #[error("failed to encode OSC message {address}: {source}")]
    Encode {
        address: String,
        #[source]
        source: rosc::OscError,
    },
}
