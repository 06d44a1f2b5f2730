//! Domain models with validation at construction
//!
//! User input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod memo;
pub mod validation;

pub use memo::{Memo, MemoTitle, NewMemo};
pub use validation::ValidationError;
