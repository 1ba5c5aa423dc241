use tt_proto::{ResponseCode, ResponseEnvelope};

/// Lines to print for a server response.
pub fn render_response(response: &ResponseEnvelope) -> Vec<String> {
    match response.code() {
        Some(ResponseCode::Timeline) => response.stored_tweets.clone().unwrap_or_default(),
        Some(_) => vec![format!("Server response: {}", response.message())],
        None => vec![format!(
            "Unexpected response code {}",
            response.response_code
        )],
    }
}
