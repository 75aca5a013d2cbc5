// Form Controller contract: working draft, row operations, whole-record
// validation, and the form/preview session.

pub mod draft;
pub mod session;
pub mod validation;

pub use draft::{ResumeDraft, Snapshot};
pub use session::Session;
pub use validation::validate;
