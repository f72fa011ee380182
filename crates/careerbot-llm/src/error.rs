use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("completion request failed: {0}")]
    Request(String),

    #[error("completion API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("gateway config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            GatewayError::ResponseParse(e.to_string())
        } else {
            GatewayError::Request(e.to_string())
        }
    }
}
