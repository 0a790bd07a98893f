use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: String,
        status: u16,
    },

    #[error("malformed response from {endpoint}: {source}")]
    MalformedBody {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    pub fn status(endpoint: &str, status: u16) -> Self {
        ClientError::Status { endpoint: endpoint.to_string(), status }
    }

    pub fn malformed(endpoint: &str, source: serde_json::Error) -> Self {
        ClientError::MalformedBody { endpoint: endpoint.to_string(), source }
    }
}
