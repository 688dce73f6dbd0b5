//! Form domain layer
//!
//! Focusable fields of each wizard step and the edit operations that turn
//! key presses into draft patches.

mod field;
mod form_state;

pub use field::{format_date, FieldKey, FieldKind};
pub use form_state::{Form, WizardForm};

#[cfg(test)]
pub use form_state::step_fields;
