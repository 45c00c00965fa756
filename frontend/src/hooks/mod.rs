pub mod form_state;
pub mod use_slot_session;
pub mod validation;

pub use form_state::*;
pub use use_slot_session::*;
pub use validation::*;
