//! Signup Module
//!
//! - `validate` - email address validation
//! - `store` - append-only local signup cache (weak dedup)
//! - `flow` - ordered validation + Formbricks submission

pub mod flow;
pub mod store;
pub mod validate;

pub use flow::{EmailSignup, FormbricksConfig, SignupError};
pub use store::{AudienceSegment, SignupRecord, SignupSource, SignupStore};
pub use validate::validate_email;
