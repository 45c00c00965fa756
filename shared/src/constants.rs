pub const BALANCE_ENDPOINT: &str = "/api/slot/balance";
pub const CLAIM_ENDPOINT: &str = "/api/slot/claim";
pub const EXCHANGE_ENDPOINT: &str = "/api/slot/exchange";

pub const WIN_MESSAGE: &str = "Jackpot! You won a prize!";
pub const LOSS_MESSAGE: &str = "No luck this time. Try again!";
pub const CLAIM_ERROR_MESSAGE: &str = "Something went wrong while spinning. Please try again later";
pub const NETWORK_ERROR: &str = "Network error. Please try again";
pub const SESSION_EXPIRED_ERROR: &str = "Please log in again";
pub const TIMEOUT_ERROR: &str = "The server took too long to respond. Please try again";
pub const INVALID_AMOUNT_ERROR: &str = "Please enter a positive amount";
pub const BUSY_ERROR: &str = "Your previous request is still being processed";
pub const EXCHANGE_SUCCESS_MESSAGE: &str = "Exchange completed";

pub const DEFAULT_LANGUAGE: &str = "en";
