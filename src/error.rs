use thiserror::Error;

#[derive(Error, Debug)]
pub enum LifegridError {
    #[error("Invalid grid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Already connected to the engine")]
    AlreadyConnected,

    #[error("Not connected to the engine")]
    NotConnected,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
