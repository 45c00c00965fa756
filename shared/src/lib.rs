pub mod constants;
pub mod error;
pub mod exchange;
pub mod shared_slot_game;
pub mod slot_session;
pub mod validation;

pub use error::SlotError;
