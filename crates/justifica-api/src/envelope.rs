//! The JSON envelope wrapped around every API response.

use serde::Serialize;

/// `{ success, data?, error?, count?, message? }`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
  pub success: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data:    Option<T>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub count:   Option<usize>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
}

impl<T> Envelope<T> {
  pub fn ok(data: T) -> Self {
    Self {
      success: true,
      data:    Some(data),
      error:   None,
      count:   None,
      message: None,
    }
  }

  pub fn with_message(mut self, message: impl Into<String>) -> Self {
    self.message = Some(message.into());
    self
  }
}

impl<T> Envelope<Vec<T>> {
  /// A successful listing; `count` is the number of items.
  pub fn list(items: Vec<T>) -> Self {
    let count = items.len();
    Self {
      count: Some(count),
      ..Self::ok(items)
    }
  }
}

impl Envelope<()> {
  pub fn error(message: impl Into<String>) -> Self {
    Self {
      success: false,
      data:    None,
      error:   Some(message.into()),
      count:   None,
      message: None,
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn list_carries_count() {
    let v = serde_json::to_value(Envelope::list(vec![1, 2, 3])).unwrap();
    assert_eq!(v, json!({ "success": true, "data": [1, 2, 3], "count": 3 }));
  }

  #[test]
  fn error_omits_data() {
    let v = serde_json::to_value(Envelope::error("Route not found")).unwrap();
    assert_eq!(v, json!({ "success": false, "error": "Route not found" }));
  }
}
