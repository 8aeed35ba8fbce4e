use crate::SESSION_TOKEN_HEADER;
use axum::http::{HeaderMap, StatusCode};

/// Extracts the session token from the request headers.
///
/// Returns the raw token string; whether it names an *active* session is the
/// session service's decision, not this helper's.
pub fn session_token(headers: &HeaderMap) -> Result<&str, (StatusCode, &'static str)> {
    headers
        .get(SESSION_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or((StatusCode::UNAUTHORIZED, "Missing session token"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn session_token_reads_the_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            SESSION_TOKEN_HEADER,
            HeaderValue::from_static("550e8400e29b41d4a716446655440000"),
        );

        let token = session_token(&headers).expect("header should be read");
        assert_eq!(token, "550e8400e29b41d4a716446655440000");
    }

    #[test]
    fn session_token_rejects_missing_header() {
        let headers = HeaderMap::new();
        let (status, _) = session_token(&headers).expect_err("missing header should fail");
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
