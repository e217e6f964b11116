/// Errors produced while decoding a server response body.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("malformed update result: {0}")]
    Xml(String),

    #[error("malformed JSON response: {0}")]
    Json(#[from] serde_json::Error),
}
