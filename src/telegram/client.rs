use reqwest::Client;
use tracing::{error, info};

use super::types::{ApiReply, SendMessage};
use crate::config::Timeouts;
use crate::error::NotifyError;

pub const API_URL: &str = "https://api.telegram.org";

/// Delivers text messages to a chat.
pub trait Notifier {
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), NotifyError>;
}

pub struct TelegramNotifier {
    token: String,
    client: Client,
    base_url: String,
}

impl TelegramNotifier {
    /// `base_url` is [`API_URL`] in production, a mock server in tests.
    pub fn new(token: String, base_url: String, timeouts: Timeouts) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(timeouts.connect)
            .timeout(timeouts.request)
            .build()?;
        Ok(Self {
            token,
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.base_url, self.token)
    }
}

impl Notifier for TelegramNotifier {
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&SendMessage { chat_id, text })
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.without_url()))?;

        let status = response.status();
        let reply = response.json::<ApiReply>().await.ok();
        match reply {
            Some(ApiReply { ok: true, .. }) if status.is_success() => {
                info!(chat_id, "message delivered");
                Ok(())
            }
            reply => {
                let description = reply
                    .and_then(|r| r.description)
                    .unwrap_or_else(|| "no description".to_string());
                error!(chat_id, status = status.as_u16(), %description, "Telegram rejected message");
                Err(NotifyError::Rejected {
                    status: status.as_u16(),
                    description,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn notifier_for(server: &MockServer) -> TelegramNotifier {
        TelegramNotifier::new("42:abc".into(), server.uri(), Timeouts::default()).unwrap()
    }

    #[tokio::test]
    async fn send_posts_chat_and_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot42:abc/sendMessage"))
            .and(body_json(json!({"chat_id": 777, "text": "hi"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"ok": true, "result": {"message_id": 1}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        notifier_for(&server).send(777, "hi").await.unwrap();
    }

    #[tokio::test]
    async fn api_error_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found"
            })))
            .mount(&server)
            .await;

        let err = notifier_for(&server).send(1, "hi").await.unwrap_err();
        match err {
            NotifyError::Rejected {
                status,
                description,
            } => {
                assert_eq!(status, 400);
                assert_eq!(description, "Bad Request: chat not found");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn ok_false_with_200_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": false})))
            .mount(&server)
            .await;

        let err = notifier_for(&server).send(1, "hi").await.unwrap_err();
        assert!(matches!(err, NotifyError::Rejected { status: 200, .. }));
    }

    #[tokio::test]
    async fn transport_error_hides_token() {
        let notifier =
            TelegramNotifier::new("42:abc".into(), "http://127.0.0.1:1".into(), Timeouts::default())
                .unwrap();
        let err = notifier.send(1, "hi").await.unwrap_err();
        assert!(matches!(err, NotifyError::Transport(_)));
        assert!(!err.to_string().contains("42:abc"));
    }
}
