mod errors;
mod rules;

pub use errors::{ErrorKey, ValidationErrors};
pub use rules::{DraftValidator, MIN_PASSWORD_LENGTH, PHONE_DIGITS};
