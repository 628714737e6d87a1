//! Decoding of web request results into pages of hits.

use crate::domain::{FetchFailure, SearchResult};

/// Turns a web request result into a page of hits.
///
/// Non-2xx statuses and bodies that are not a JSON object with `hits` and
/// `page` both become a [`FetchFailure`]. Zellij reports transport errors as
/// a non-success status whose body is the error text; that text is kept in
/// the failure when present.
///
/// # Errors
///
/// Returns [`FetchFailure::Transport`] or [`FetchFailure::Status`] for
/// non-success statuses and [`FetchFailure::Decode`] for malformed bodies.
pub fn decode_response(status: u16, body: &[u8]) -> Result<SearchResult, FetchFailure> {
    if !(200..300).contains(&status) {
        let text = String::from_utf8_lossy(body).trim().to_string();
        tracing::debug!(status = status, body_len = body.len(), "search request failed");
        return Err(if text.is_empty() || text.starts_with('{') {
            FetchFailure::Status(status)
        } else {
            FetchFailure::Transport(text)
        });
    }

    serde_json::from_slice::<SearchResult>(body).map_err(|e| {
        tracing::debug!(error = %e, body_len = body.len(), "failed to decode search response");
        FetchFailure::Decode(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_success() {
        let body = br#"{"hits":[{"objectID":"1","title":"Tampa","url":"u","author":"a","num_comments":1,"points":2}],"page":0}"#;
        let result = decode_response(200, body).unwrap();
        assert_eq!(result.page, 0);
        assert_eq!(result.hits[0].object_id, "1");
    }

    #[test]
    fn test_status_error_with_json_body() {
        let body = br#"{"message":"rate limited"}"#;
        assert_eq!(decode_response(429, body), Err(FetchFailure::Status(429)));
    }

    #[test]
    fn test_status_error_with_transport_text() {
        assert_eq!(
            decode_response(400, b"dns error: no such host"),
            Err(FetchFailure::Transport("dns error: no such host".to_string()))
        );
    }

    #[test]
    fn test_status_error_with_empty_body() {
        assert_eq!(decode_response(500, b""), Err(FetchFailure::Status(500)));
    }

    #[test]
    fn test_malformed_body() {
        assert!(matches!(
            decode_response(200, b"<html>oops</html>"),
            Err(FetchFailure::Decode(_))
        ));
        assert!(matches!(
            decode_response(200, br#"{"page":0}"#),
            Err(FetchFailure::Decode(_))
        ));
    }
}
