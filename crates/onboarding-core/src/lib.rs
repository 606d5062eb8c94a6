mod draft;
pub mod error;
mod step;
pub mod types;

pub use draft::{DATE_FORMAT, DraftField, OrganizationDraft};
pub use error::*;
pub use step::WizardStep;
pub use types::*;
