use qrshare_core::PublishParams;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct PublishRequest {
    /// Absent text deserializes as empty and is rejected by the publisher.
    #[serde(default)]
    pub text: String,
    pub prefix: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
}

impl From<PublishRequest> for PublishParams {
    fn from(request: PublishRequest) -> Self {
        PublishParams {
            text: request.text,
            prefix: request.prefix,
            title: request.title,
            description: request.description,
            language: request.language,
        }
    }
}
