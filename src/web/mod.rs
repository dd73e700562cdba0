//! Request-side helpers shared by every panel: CSRF tokens, flash messages
//! and form validation.

pub mod csrf;
pub mod flash;
pub mod validate;
