//! Dynamic variables - placeholder extraction and template resolution
//!
//! Templates reference variables as `{name}`. The extractor finds the names a
//! template needs; the handler fills them from a user's profile record and
//! substitutes the ones that hold a truthy value.

mod extractor;
mod handler;
mod value;

pub use extractor::{PlaceholderExtractor, VARIABLE_PATTERN};
pub use handler::{DEFAULT_IDENTITY_VARIABLE, FIXED_FIELDS, VariableHandler, VariableMode};
pub use value::VariableValue;
