//! Extraction of the backend's error message from a failed response

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Read `{"error": "..."}` from a non-success response, or use `fallback`
/// when the body is missing, not JSON, or has no usable `error` field.
pub(crate) async fn error_message(response: reqwest::Response, fallback: &str) -> String {
    let status = response.status();
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!("Failed to read error body (status {}): {}", status, e);
            return fallback.to_string();
        }
    };
    message_from_body(&body).unwrap_or_else(|| {
        tracing::debug!("Unparseable error body (status {})", status);
        fallback.to_string()
    })
}

fn message_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()?
        .error
        .filter(|message| !message.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_from_json_body() {
        assert_eq!(
            message_from_body(r#"{"error":"Unsupported provider"}"#),
            Some("Unsupported provider".to_string())
        );
    }

    #[test]
    fn test_unusable_bodies() {
        assert_eq!(message_from_body("<html>502</html>"), None);
        assert_eq!(message_from_body(r#"{"detail":"x"}"#), None);
        assert_eq!(message_from_body(r#"{"error":"  "}"#), None);
        assert_eq!(message_from_body(""), None);
    }
}
