//! Payloads for the Telegram Bot API `sendMessage` method.

use serde::{Deserialize, Serialize};

/// Request body for `POST /bot{token}/sendMessage`.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessage<'a> {
    pub chat_id: i64,
    pub text: &'a str,
}

/// Envelope every Bot API method answers with.
///
/// On failure `ok` is false and `description` explains why. The `result`
/// payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiReply {
    pub ok: bool,
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_message_serializes_chat_and_text() {
        let msg = SendMessage {
            chat_id: -100123,
            text: "hello",
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json, serde_json::json!({"chat_id": -100123, "text": "hello"}));
    }

    #[test]
    fn reply_deserializes_success() {
        let reply: ApiReply =
            serde_json::from_str(r#"{"ok": true, "result": {"message_id": 5}}"#).unwrap();
        assert!(reply.ok);
        assert_eq!(reply.description, None);
    }

    #[test]
    fn reply_deserializes_failure() {
        let reply: ApiReply = serde_json::from_str(
            r#"{"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}"#,
        )
        .unwrap();
        assert!(!reply.ok);
        assert_eq!(reply.description.as_deref(), Some("Bad Request: chat not found"));
    }
}
