//! Session/authorization core
//!
//! The authenticator resolves a bearer token into a [`Principal`] through
//! the ordered existence and signed-out checks; the guard then evaluates a
//! capability against that principal. Resource services always run the two
//! in that order; authorization is never evaluated for a caller that
//! failed authentication.

pub mod authenticator;
pub mod guard;
pub mod password;
pub mod token;

pub use authenticator::{Authenticator, Principal};
pub use guard::{Capability, Deny, authorize};
pub use token::{SESSION_TTL_HOURS, TokenConfig, TokenIssuer};
