use std::time::Duration;

use flashdeck_logging::deck_debug;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

use crate::{ServiceError, ServiceFailure};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// A text-generation service: one prompt in, one block of text out.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ServiceError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiGenerator {
    settings: GeneratorSettings,
}

impl GeminiGenerator {
    pub fn new(settings: GeneratorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    fn endpoint(&self) -> Result<url::Url, ServiceError> {
        let base = self.settings.base_url.trim_end_matches('/');
        let raw = format!(
            "{base}/v1beta/models/{model}:generateContent",
            model = self.settings.model
        );
        url::Url::parse(&raw)
            .map_err(|err| ServiceError::new(ServiceFailure::InvalidEndpoint, err.to_string()))
    }

    fn build_client(&self) -> Result<reqwest::Client, ServiceError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| ServiceError::new(ServiceFailure::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ServiceError> {
        let endpoint = self.endpoint()?;
        let client = self.build_client()?;

        let payload = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };
        let body = serde_json::to_vec(&payload)
            .map_err(|err| ServiceError::new(ServiceFailure::MalformedResponse, err.to_string()))?;

        let mut request = client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        if let Some(key) = self.settings.api_key.as_deref() {
            request = request.header("x-goog-api-key", key);
        }

        deck_debug!(
            "generateContent model={} prompt_len={}",
            self.settings.model,
            prompt.len()
        );
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ServiceError::new(
                ServiceFailure::HttpStatus(status.as_u16()),
                format!("{status}: {detail}"),
            ));
        }

        let raw = response.text().await.map_err(map_reqwest_error)?;
        extract_text(&raw)
    }
}

/// Concatenates the text parts of the first candidate.
fn extract_text(raw: &str) -> Result<String, ServiceError> {
    let parsed: GenerateResponse = serde_json::from_str(raw)
        .map_err(|err| ServiceError::new(ServiceFailure::MalformedResponse, err.to_string()))?;

    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ServiceError::new(
            ServiceFailure::EmptyResponse,
            "response contained no text",
        ));
    }
    Ok(text)
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return ServiceError::new(ServiceFailure::Timeout, err.to_string());
    }
    ServiceError::new(ServiceFailure::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_joins_parts_of_first_candidate() {
        let raw = r#"{"candidates":[
            {"content":{"parts":[{"text":"Cat: 🐱\n"},{"text":"Dog: 🐶"}],"role":"model"}},
            {"content":{"parts":[{"text":"ignored"}]}}
        ]}"#;
        assert_eq!(extract_text(raw).unwrap(), "Cat: 🐱\nDog: 🐶");
    }

    #[test]
    fn extract_without_candidates_is_empty_response() {
        let err = extract_text(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap_err();
        assert_eq!(err.kind, ServiceFailure::EmptyResponse);
    }

    #[test]
    fn extract_rejects_non_json() {
        let err = extract_text("<html>oops</html>").unwrap_err();
        assert_eq!(err.kind, ServiceFailure::MalformedResponse);
    }

    #[test]
    fn endpoint_includes_model_and_tolerates_trailing_slash() {
        let generator = GeminiGenerator::new(GeneratorSettings {
            base_url: "http://localhost:8080/".to_string(),
            model: "test-model".to_string(),
            ..GeneratorSettings::default()
        });
        assert_eq!(
            generator.endpoint().unwrap().as_str(),
            "http://localhost:8080/v1beta/models/test-model:generateContent"
        );
    }

    #[test]
    fn bad_base_url_is_invalid_endpoint() {
        let generator = GeminiGenerator::new(GeneratorSettings {
            base_url: "not a url".to_string(),
            ..GeneratorSettings::default()
        });
        assert_eq!(
            generator.endpoint().unwrap_err().kind,
            ServiceFailure::InvalidEndpoint
        );
    }
}
