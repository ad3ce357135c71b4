//! Turns a validated work item into the text sent to the chat.
//!
//! [`parse_status`] is pure: the same item always yields the same message,
//! and the item itself is never modified.

use serde_json::Value;
use tracing::warn;

use crate::error::CycleError;
use crate::status;

/// Builds the notification text for a single work item.
pub fn parse_status(item: &Value) -> Result<String, CycleError> {
    let name = required_str(item, "homework_name")?;
    let key = required_str(item, "status")?;
    let verdict = status::lookup(key).ok_or_else(|| {
        warn!(status = key, "unknown homework status");
        CycleError::UnknownStatus(key.to_string())
    })?;
    Ok(format!("Changed review status for \"{name}\". {verdict}"))
}

// Non-string values are treated the same as an absent key.
fn required_str<'a>(item: &'a Value, field: &'static str) -> Result<&'a str, CycleError> {
    item.get(field).and_then(Value::as_str).ok_or_else(|| {
        warn!(field, "homework record is missing a field");
        CycleError::MissingField(field)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn approved_message() {
        let item = json!({"homework_name": "hw1", "status": "approved"});
        assert_eq!(
            parse_status(&item).unwrap(),
            "Changed review status for \"hw1\". Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn reviewing_and_rejected_messages() {
        let item = json!({"homework_name": "bot", "status": "reviewing"});
        assert!(parse_status(&item).unwrap().ends_with("Работа взята на проверку ревьюером."));
        let item = json!({"homework_name": "bot", "status": "rejected"});
        assert!(parse_status(&item).unwrap().ends_with("у ревьюера есть замечания."));
    }

    #[test]
    fn missing_name() {
        let item = json!({"status": "approved"});
        assert_eq!(
            parse_status(&item),
            Err(CycleError::MissingField("homework_name"))
        );
    }

    #[test]
    fn missing_status() {
        let item = json!({"homework_name": "hw1"});
        assert_eq!(parse_status(&item), Err(CycleError::MissingField("status")));
    }

    #[test]
    fn unknown_status() {
        let item = json!({"homework_name": "hw1", "status": "lost"});
        assert_eq!(
            parse_status(&item),
            Err(CycleError::UnknownStatus("lost".into()))
        );
    }

    #[test]
    fn formatting_is_pure() {
        let item = json!({"homework_name": "hw1", "status": "rejected", "id": 7});
        let before = item.clone();
        let first = parse_status(&item).unwrap();
        let second = parse_status(&item).unwrap();
        assert_eq!(first, second);
        assert_eq!(item, before);
    }

    #[test]
    fn non_string_fields_count_as_missing() {
        let item = json!({"homework_name": 5, "status": "approved"});
        assert_eq!(
            parse_status(&item),
            Err(CycleError::MissingField("homework_name"))
        );

        let item = json!({"homework_name": "hw1", "status": null});
        assert_eq!(parse_status(&item), Err(CycleError::MissingField("status")));
    }

    #[test]
    fn non_object_item_counts_as_missing_name() {
        let response = json!({"homeworks": [42]});
        let item = crate::validate::check_response(&response).unwrap();
        assert_eq!(
            parse_status(item),
            Err(CycleError::MissingField("homework_name"))
        );
    }
}
