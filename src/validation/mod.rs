pub mod config;
pub mod errors;
pub mod validator;

pub use config::{UnknownFieldPolicy, ValidationConfig};
pub use errors::{ValidationError, ValidationErrorKind, ValidationWarning, WarningKind};
pub use validator::{validate, Validated, Validator};
