//! Checks a decoded API response and picks out the work item to report.

use serde_json::Value;
use tracing::debug;

use crate::error::CycleError;

/// Returns the most recent work item from a raw API response.
///
/// The API lists work items newest first, so the first element is taken as
/// is and the rest are ignored.
pub fn check_response(response: &Value) -> Result<&Value, CycleError> {
    let Some(map) = response.as_object() else {
        return Err(CycleError::Shape("response is not a mapping"));
    };
    let homeworks = map
        .get("homeworks")
        .ok_or(CycleError::MissingField("homeworks"))?;
    let Some(list) = homeworks.as_array() else {
        return Err(CycleError::Shape("`homeworks` is not a list"));
    };
    match list.first() {
        Some(item) => {
            debug!(count = list.len(), "picked most recent homework");
            Ok(item)
        }
        None => Err(CycleError::Empty),
    }
}

/// Cursor for the next request, if the server sent one.
pub fn next_cursor(response: &Value) -> Option<i64> {
    response.get("current_date").and_then(Value::as_i64)
}
