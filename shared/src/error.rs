use thiserror::Error;

use crate::constants::{
    BUSY_ERROR, CLAIM_ERROR_MESSAGE, INVALID_AMOUNT_ERROR, NETWORK_ERROR, SESSION_EXPIRED_ERROR, TIMEOUT_ERROR,
};

/// Errors raised while talking to the slot authority or validating player input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SlotError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The authority answered with a non-success status.
    #[error("authority rejected request ({status}): {message}")]
    Authority {
        /// HTTP status code returned by the authority.
        status: u16,
        /// Message extracted from the response body, if any.
        message: String,
    },

    /// No auth token is available for the current player.
    #[error("no authentication token found")]
    Unauthenticated,

    /// The authority did not answer within the configured window.
    #[error("request timed out after {0} ms")]
    Timeout(u32),

    /// The spin cycle was aborted before it resolved.
    #[error("spin cancelled")]
    Cancelled,

    /// A request of the same kind is still in flight.
    #[error("request already in progress")]
    Busy,

    /// Exchange amount failed local validation.
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),

    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl SlotError {
    /// Text safe to show to the player. Only authority-provided messages are
    /// passed through; everything else maps to a generic string.
    pub fn user_message(&self) -> String {
        match self {
            SlotError::Authority { message, .. } if !message.is_empty() => message.clone(),
            SlotError::Authority { .. } | SlotError::Decode(_) | SlotError::Cancelled => {
                CLAIM_ERROR_MESSAGE.to_string()
            }
            SlotError::Network(_) => NETWORK_ERROR.to_string(),
            SlotError::Unauthenticated => SESSION_EXPIRED_ERROR.to_string(),
            SlotError::Timeout(_) => TIMEOUT_ERROR.to_string(),
            SlotError::InvalidAmount(_) => INVALID_AMOUNT_ERROR.to_string(),
            SlotError::Busy => BUSY_ERROR.to_string(),
        }
    }
}
