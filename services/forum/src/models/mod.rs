//! Forum service models

pub mod answer;
pub mod question;
pub mod session;
pub mod user;

// Re-export for convenience
pub use answer::{Answer, NewAnswer};
pub use question::{NewQuestion, Question};
pub use session::{NewSession, Session};
pub use user::{NewUser, Role, User};
