pub mod admin;
pub mod slot_authority;

use gloo_net::http::Response;
use serde::Deserialize;
use shared::SlotError;

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "message")]
    error: String,
}

/// Turns a non-success response into an authority error, keeping the
/// server's own message when the body carries one.
pub(crate) async fn read_error(response: Response) -> SlotError {
    let status = response.status();
    let message = match response.text().await {
        Ok(text) => serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or_default(),
        Err(_) => String::new(),
    };
    SlotError::Authority { status, message }
}

pub(crate) fn network_error(err: gloo_net::Error) -> SlotError {
    SlotError::Network(err.to_string())
}

pub(crate) fn bearer(token: &str) -> Result<String, SlotError> {
    if token.is_empty() {
        return Err(SlotError::Unauthenticated);
    }
    Ok(format!("Bearer {}", token))
}
