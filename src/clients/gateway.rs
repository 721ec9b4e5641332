use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::GatewayConfig;

const SYSTEM_PROMPT: &str = "\
Kamu adalah asisten diagnostik kendaraan yang ahli. Berdasarkan keluhan user, \
buatkan 2-3 pertanyaan klarifikasi yang paling relevan untuk membantu \
mempersempit diagnosa.

Aturan:
1. Pertanyaan harus spesifik dan relevan dengan keluhan
2. Setiap pertanyaan harus memiliki 3-4 opsi pilihan
3. Fokus pada informasi yang membantu diagnosa: kapan terjadi, kondisi, gejala tambahan
4. Gunakan bahasa Indonesia yang mudah dipahami teknisi

Kembalikan dalam format JSON:
{
  \"questions\": [
    {
      \"id\": \"q1\",
      \"question\": \"Pertanyaan...\",
      \"options\": [
        { \"value\": \"opt1\", \"label\": \"Opsi 1\" },
        { \"value\": \"opt2\", \"label\": \"Opsi 2\" },
        { \"value\": \"opt3\", \"label\": \"Opsi 3\" }
      ]
    }
  ]
}";

/// Failures the question gateway can produce. Callers degrade identically
/// (search proceeds without clarification) but log the distinct cases, since
/// rate-limit and quota exhaustion need different operator action than a
/// flaky network.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("question gateway is disabled in config")]
    Disabled,
    #[error("rate limit exceeded, retry later")]
    RateLimited,
    #[error("payment or quota exhausted")]
    QuotaExceeded,
    #[error("gateway request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("gateway returned status {status}: {body}")]
    Http { status: StatusCode, body: String },
    #[error("gateway returned a malformed response: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticQuestion {
    pub id: String,
    pub question: String,
    pub options: Vec<QuestionOption>,
}

#[derive(Debug, Deserialize)]
struct QuestionPayload {
    #[serde(default)]
    questions: Vec<DiagnosticQuestion>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Client for the LLM gateway that generates clarifying questions from a raw
/// complaint. Question quality is the gateway's problem; this client only
/// owns the HTTP contract and failure classification.
#[derive(Clone)]
pub struct GatewayClient {
    client: Client,
    config: GatewayConfig,
}

impl GatewayClient {
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .user_agent("Montir/1.0")
            .build()
            .unwrap_or_default();

        Self { client, config }
    }

    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.config.enabled
    }

    /// Ask the gateway for 2-3 clarifying questions about `user_query`.
    /// An empty vec is a normal outcome (the model decided no clarification
    /// is needed), not an error.
    pub async fn generate_questions(
        &self,
        user_query: &str,
    ) -> Result<Vec<DiagnosticQuestion>, GatewayError> {
        if !self.config.enabled {
            return Err(GatewayError::Disabled);
        }

        let url = format!("{}/chat/completions", self.config.base_url);
        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": format!("Keluhan user: \"{user_query}\"") },
            ],
            "response_format": { "type": "json_object" },
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => return Err(GatewayError::RateLimited),
            StatusCode::PAYMENT_REQUIRED => return Err(GatewayError::QuotaExceeded),
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(GatewayError::Http { status, body });
            }
            _ => {}
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;

        let content = completion
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .ok_or_else(|| GatewayError::Malformed("no completion content".to_string()))?;

        let payload: QuestionPayload = serde_json::from_str(content)
            .map_err(|e| GatewayError::Malformed(format!("invalid question JSON: {e}")))?;

        Ok(payload.questions)
    }
}
