//! Forum service library
//!
//! A Q&A backend: registration, bearer-token sessions, question/answer
//! CRUD, and admin moderation. The session/authorization core lives in
//! [`auth`]; everything protected goes through its
//! authenticate-then-authorize chain.

pub mod auth;
pub mod error;
pub mod models;
pub mod rate_limiter;
pub mod routes;
pub mod services;
pub mod state;
pub mod stores;
pub mod validation;
