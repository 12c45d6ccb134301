//! Gemini provider using the `generateContent` REST endpoint.
//!
//! Request shape (Gemini terminology):
//! - "contents" (array of turns, each with "parts")
//! - "generationConfig.responseModalities" selects image output
//!
//! Response parts carry either `text` or `inlineData { mimeType, data }`.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::element::ElementRecord;
use crate::lookup::{LookupError, LookupProvider};

// ============================================================================
// generateContent API Types
// ============================================================================

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize, Debug)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Serialize, Debug)]
struct RequestPart {
    text: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
}

#[derive(Deserialize, Debug, Default)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    inline_data: Option<InlineData>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: Option<String>,
    data: String,
}

// ============================================================================
// Prompts
// ============================================================================

fn fun_fact_prompt(element: &ElementRecord) -> String {
    format!(
        "Tell me one surprising or fun fact about the element {} suitable for a science app for students. Keep it to one or two sentences.",
        element.name
    )
}

fn image_prompt(element: &ElementRecord) -> String {
    format!(
        "A visually stunning, high-resolution, photorealistic image of the element {} in its natural or common state. For example, a glowing gas for Neon, a crystalline solid for Bismuth, or a silvery liquid for Mercury. Focus on scientific accuracy and aesthetic appeal.",
        element.name
    )
}

fn text_request(prompt: String) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![RequestContent {
            parts: vec![RequestPart { text: prompt }],
        }],
        generation_config: None,
    }
}

fn image_request(prompt: String) -> GenerateContentRequest {
    GenerateContentRequest {
        generation_config: Some(GenerationConfig {
            response_modalities: vec!["IMAGE"],
        }),
        ..text_request(prompt)
    }
}

// ============================================================================
// Translation Layer
// ============================================================================

/// Parts of the first candidate. Later candidates are ignored.
fn first_candidate_parts(response: &GenerateContentResponse) -> &[ResponsePart] {
    response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|c| c.parts.as_slice())
        .unwrap_or(&[])
}

/// Concatenated text parts, trimmed. Empty text is a parse error.
fn extract_text(response: &GenerateContentResponse) -> Result<String, LookupError> {
    let text: String = first_candidate_parts(response)
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect();
    let text = text.trim();
    if text.is_empty() {
        return Err(LookupError::Parse("response contained no text".to_string()));
    }
    Ok(text.to_string())
}

/// First inline image part as a `data:` URI.
fn extract_image(response: &GenerateContentResponse) -> Result<String, LookupError> {
    first_candidate_parts(response)
        .iter()
        .find_map(|p| p.inline_data.as_ref())
        .map(|inline| {
            let mime = inline.mime_type.as_deref().unwrap_or("image/png");
            format!("data:{mime};base64,{}", inline.data)
        })
        .ok_or(LookupError::NoImage)
}

// ============================================================================
// Provider Implementation
// ============================================================================

pub struct GeminiProvider {
    api_key: String,
    base_url: String,
    text_model: String,
    image_model: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider.
    ///
    /// # Arguments
    /// * `api_key` - Gemini API key, sent as `x-goog-api-key`
    /// * `base_url` - API root, e.g. `https://generativelanguage.googleapis.com/v1beta`
    /// * `text_model` / `image_model` - model ids for facts and images
    /// * `timeout` - per-request timeout
    pub fn new(
        api_key: String,
        base_url: String,
        text_model: String,
        image_model: String,
        timeout: Duration,
    ) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            text_model,
            image_model,
            timeout,
            client: reqwest::Client::new(),
        }
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LookupError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        info!("Gemini request: model={model}");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        debug!("Gemini response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Gemini API error: {} - {}", status, err_body);
            return Err(LookupError::Api {
                status,
                message: err_body,
            });
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| LookupError::Parse(e.to_string()))
    }
}

#[async_trait]
impl LookupProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn fun_fact(&self, element: &ElementRecord) -> Result<String, LookupError> {
        let request = text_request(fun_fact_prompt(element));
        let response = self.generate(&self.text_model, &request).await?;
        extract_text(&response)
    }

    async fn element_image(&self, element: &ElementRecord) -> Result<String, LookupError> {
        let request = image_request(image_prompt(element));
        let response = self.generate(&self.image_model, &request).await?;
        extract_image(&response)
    }
}
