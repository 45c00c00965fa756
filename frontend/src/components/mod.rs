pub mod form_field;
pub mod modal_frame;

pub use form_field::FormField;
pub use modal_frame::ModalFrame;
