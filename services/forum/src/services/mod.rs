//! Resource services
//!
//! Each service runs the authenticate-then-authorize chain before touching
//! its stores. Construction injects the store handles; nothing here reaches
//! for process-wide state.

pub mod answer;
pub mod question;
pub mod user;

pub use answer::AnswerService;
pub use question::QuestionService;
pub use user::{Registration, UserService};
