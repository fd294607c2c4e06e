use std::time::Duration;

use anyhow::{anyhow, Context};
use base64::{engine::general_purpose, Engine as _};
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::schema::{parse_analysis, FloorplanAnalysis};

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
const MAX_RESPONSE_TOKENS: u32 = 4000;

const ANALYSIS_PROMPT: &str = r#"You are analyzing a photo or scan of an architectural floor plan.
Identify every room or functional area and describe it as an axis-aligned rectangle.

Coordinates are PERCENTAGES (0-100) of the overall plan:
- x, y: top-left corner of the zone
- w, h: width and height of the zone

Return ONLY valid JSON with this exact structure:
{
  "totalArea": 72.5,
  "dimensions": {"width": 10.0, "height": 7.25},
  "zones": [
    {"name": "Living Room", "zoneId": "living-1", "x": 0, "y": 0, "w": 60, "h": 55,
     "type": "living", "suggestedFurniture": ["sofa", "coffee_table", "tv_stand"]}
  ],
  "scale": 1
}

Guidelines:
- dimensions are the overall plan width and height in METERS, totalArea in square meters
- zoneId must be unique per zone
- type is one of: living, kitchen, dining, bedroom, bathroom, office, hallway, storage, other
- suggestedFurniture uses snake_case names such as sofa, bed, desk, dining_table, wardrobe"#;

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Floor plan zone extraction through an OpenAI-compatible vision model.
///
/// One best-effort request per call. Callers own any retry policy.
pub struct FloorplanAnalyzer {
    client: Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl FloorplanAnalyzer {
    /// Create a new analyzer
    ///
    /// # Arguments
    /// * `api_key` - API key sent as a bearer token
    /// * `model` - Model to use (default: "gpt-4o")
    pub fn new(api_key: String, model: Option<String>) -> anyhow::Result<Self> {
        Self::with_options(
            api_key,
            model,
            DEFAULT_API_BASE.to_string(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn with_options(
        api_key: String,
        model: Option<String>,
        api_base: String,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Create from environment variables
    ///
    /// `OPENAI_API_KEY` is required. `VISION_MODEL`, `VISION_API_BASE` and
    /// `VISION_TIMEOUT_SECS` override the defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow!("OPENAI_API_KEY environment variable not set"))?;
        let model = std::env::var("VISION_MODEL").ok();
        let api_base =
            std::env::var("VISION_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let timeout_secs = match std::env::var("VISION_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("Invalid VISION_TIMEOUT_SECS: {}", raw))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };
        Self::with_options(api_key, model, api_base, Duration::from_secs(timeout_secs))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body(&self, image_url: &str) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.model.clone(),
            "messages": [{
                "role": "user",
                "content": [
                    {"type": "text", "text": ANALYSIS_PROMPT},
                    {"type": "image_url", "image_url": {"url": image_url}}
                ]
            }]
        });

        // Newer models only accept max_completion_tokens
        if self.model.starts_with("gpt-5") || self.model.starts_with("o1") {
            body["max_completion_tokens"] = serde_json::json!(MAX_RESPONSE_TOKENS);
        } else {
            body["max_tokens"] = serde_json::json!(MAX_RESPONSE_TOKENS);
        }
        body
    }

    /// Send a floor plan image to the model and parse its zone analysis
    ///
    /// # Arguments
    /// * `image_bytes` - PNG/JPEG/WebP image bytes
    pub async fn analyze_image(&self, image_bytes: &[u8]) -> anyhow::Result<FloorplanAnalysis> {
        let image_url = image_data_uri(image_bytes)?;
        info!(
            "Sending floor plan analysis request ({} bytes, model: {})",
            image_bytes.len(),
            self.model
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&self.request_body(&image_url))
            .send()
            .await
            .context("Vision API request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            warn!("Vision API error: {} - {}", status, error_text);
            return Err(anyhow!("Vision API error: {} - {}", status, error_text));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .context("Vision API returned an unexpected body")?;
        let content = chat
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("No response from vision API"))?;

        let analysis = parse_analysis(&content)?;
        info!(
            "Vision model reported {} zones on a {}m x {}m plan",
            analysis.zones.len(),
            analysis.dimensions.width,
            analysis.dimensions.height
        );
        Ok(analysis)
    }
}

/// Base64 data URI for an image, with the MIME type sniffed from its header
pub fn image_data_uri(image_bytes: &[u8]) -> anyhow::Result<String> {
    let format = image::guess_format(image_bytes).context("Unrecognized image format")?;
    Ok(format!(
        "data:{};base64,{}",
        format.to_mime_type(),
        general_purpose::STANDARD.encode(image_bytes)
    ))
}
