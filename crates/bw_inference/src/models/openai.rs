use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use bw_core::{ClassificationResult, Error, Result};

use super::ClickbaitModel;
use crate::verdict;

const CHAT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

/// Chat-completions client for the clickbait judgement prompt.
pub struct OpenAiModel {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiModel {
    pub fn new(api_key: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(Error::MissingCredential);
        }
        Ok(Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different endpoint, e.g. a local stand-in
    /// serving the same chat-completions shape.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_prompt(title: &str) -> String {
        format!(
            "Analyze the following news title and determine if it's clickbait:\n\n\
             Title: \"{title}\"\n\n\
             Judge whether the headline is an exaggerated, sensational piece of clickbait. \
             Give a short explanation and conclude with exactly \"{}\" or \"{}\".",
            verdict::CLICKBAIT_PHRASE,
            verdict::NOT_CLICKBAIT_PHRASE,
        )
    }
}

impl fmt::Debug for OpenAiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl ClickbaitModel for OpenAiModel {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn classify_title(&self, title: &str) -> Result<ClassificationResult> {
        let request = ChatRequest {
            model: CHAT_MODEL.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: "You are an expert in analyzing news titles for clickbait."
                        .to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Self::build_prompt(title),
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Classification(format!(
                "chat completion failed with {status}: {body}"
            )));
        }

        let response = response.json::<ChatResponse>().await?;
        let rationale = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                Error::Classification("chat completion returned no choices".to_string())
            })?;

        tracing::debug!(title, "classified headline");
        Ok(ClassificationResult {
            is_clickbait: verdict::is_clickbait(&rationale),
            rationale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_is_rejected() {
        assert!(matches!(OpenAiModel::new("  "), Err(Error::MissingCredential)));
        assert!(OpenAiModel::new("sk-test").is_ok());
    }

    #[test]
    fn prompt_quotes_the_title_and_both_phrases() {
        let prompt = OpenAiModel::build_prompt("Ten secrets doctors hate");
        assert!(prompt.contains("Title: \"Ten secrets doctors hate\""));
        assert!(prompt.contains("\"is clickbait\""));
        assert!(prompt.contains("\"is not clickbait\""));
    }

    #[test]
    fn debug_redacts_the_credential() {
        let model = OpenAiModel::new("sk-very-secret").unwrap();
        let rendered = format!("{model:?}");
        assert!(!rendered.contains("sk-very-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
