//! Store ports and their adapters
//!
//! Each protected operation reaches persistence through one of these traits;
//! services are constructed with store handles rather than reaching for
//! process-wide state. The `Pg*` adapters back the running service, the
//! in-memory family in [`memory`] backs the test suite.

pub mod answer;
pub mod credential;
pub mod memory;
pub mod question;
pub mod session;

pub use answer::{AnswerStore, PgAnswerStore};
pub use credential::{CredentialStore, PgCredentialStore};
pub use memory::{
    MemoryAnswerStore, MemoryCredentialStore, MemoryQuestionStore, MemorySessionStore,
};
pub use question::{PgQuestionStore, QuestionStore};
pub use session::{PgSessionStore, SessionStore};
