use reqwest::{Client, StatusCode};
use serde::Serialize;

use crate::TelegramError;

const API_URL: &str = "https://api.telegram.org";

#[derive(Debug, Serialize)]
struct SendMessageBody<'a> {
    chat_id: i64,
    text: &'a str,
}

/// Telegram Bot API client
pub struct TelegramClient {
    client: Client,
    api_url: String,
    bot_token: String,
    chat_id: i64,
}

impl TelegramClient {
    /// Create a new Telegram client against the public Bot API
    pub fn new(client: Client, bot_token: impl Into<String>, chat_id: i64) -> Self {
        Self::with_api_url(client, API_URL, bot_token, chat_id)
    }

    /// Create a client against a custom Bot API server
    pub fn with_api_url(
        client: Client,
        api_url: impl Into<String>,
        bot_token: impl Into<String>,
        chat_id: i64,
    ) -> Self {
        let api_url: String = api_url.into();
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            bot_token: bot_token.into(),
            chat_id,
        }
    }

    /// Send a text message
    pub async fn send_message(&self, text: &str) -> Result<(), TelegramError> {
        let url = format!("{}/bot{}/sendMessage", self.api_url, self.bot_token);

        let resp = self
            .client
            .post(&url)
            .json(&SendMessageBody {
                chat_id: self.chat_id,
                text,
            })
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(TelegramError::Api {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!("Telegram message sent to chat {}", self.chat_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_send_message() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/botTOKEN/sendMessage"))
            .and(body_json(serde_json::json!({
                "chat_id": 42,
                "text": "hello"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = TelegramClient::with_api_url(Client::new(), mock_server.uri(), "TOKEN", 42);
        client.send_message("hello").await.unwrap();
    }

    #[tokio::test]
    async fn test_send_message_api_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string(r#"{"ok":false,"description":"Unauthorized"}"#),
            )
            .mount(&mock_server)
            .await;

        let client = TelegramClient::with_api_url(Client::new(), mock_server.uri(), "BAD", 42);
        match client.send_message("hello").await {
            Err(TelegramError::Api { status, .. }) => assert_eq!(status, 401),
            other => panic!("Expected API error, got {:?}", other),
        }
    }
}
