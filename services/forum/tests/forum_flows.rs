//! End-to-end service flows over the in-memory stores
//!
//! These exercise the full authenticate-then-authorize chain the way the
//! HTTP handlers drive it, without a database.

use chrono::NaiveDate;
use forum::auth::{TokenConfig, TokenIssuer};
use forum::models::{Role, Session, User};
use forum::rate_limiter::{RateLimiterConfig, SigninRateLimiter};
use forum::services::{AnswerService, QuestionService, Registration, UserService};
use forum::stores::{
    MemoryAnswerStore, MemoryCredentialStore, MemoryQuestionStore, MemorySessionStore,
    SessionStore,
};

const PASSWORD: &str = "Sturdy-pass1";

type TestUserService =
    UserService<MemoryCredentialStore, MemorySessionStore, MemoryQuestionStore, MemoryAnswerStore>;
type TestQuestionService = QuestionService<
    MemoryCredentialStore,
    MemorySessionStore,
    MemoryQuestionStore,
    MemoryAnswerStore,
>;
type TestAnswerService =
    AnswerService<MemoryCredentialStore, MemorySessionStore, MemoryQuestionStore, MemoryAnswerStore>;

struct Backend {
    credentials: MemoryCredentialStore,
    sessions: MemorySessionStore,
    users: TestUserService,
    questions: TestQuestionService,
    answers: TestAnswerService,
}

fn backend() -> Backend {
    let credentials = MemoryCredentialStore::new();
    let sessions = MemorySessionStore::new();
    let question_store = MemoryQuestionStore::new();
    let answer_store = MemoryAnswerStore::new();
    let tokens = TokenIssuer::new(&TokenConfig {
        secret: "test-secret".to_string(),
    });

    let users = UserService::new(
        credentials.clone(),
        sessions.clone(),
        question_store.clone(),
        answer_store.clone(),
        tokens,
        SigninRateLimiter::new(RateLimiterConfig::default()),
    );
    let questions = QuestionService::new(
        credentials.clone(),
        sessions.clone(),
        question_store.clone(),
        answer_store.clone(),
    );
    let answers = AnswerService::new(
        credentials.clone(),
        sessions.clone(),
        question_store,
        answer_store,
    );

    Backend {
        credentials,
        sessions,
        users,
        questions,
        answers,
    }
}

fn registration(username: &str) -> Registration {
    Registration {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password: PASSWORD.to_string(),
        first_name: username.to_string(),
        last_name: "Tester".to_string(),
        country: Some("Atlantis".to_string()),
        about_me: None,
        dob: NaiveDate::from_ymd_opt(1990, 1, 1),
        contact_number: None,
    }
}

async fn register(backend: &Backend, username: &str) -> User {
    backend.users.register(registration(username)).await.unwrap()
}

async fn sign_in(backend: &Backend, username: &str) -> Session {
    backend.users.sign_in(username, PASSWORD).await.unwrap()
}

#[tokio::test]
async fn sign_in_mints_fresh_unique_sessions() {
    let backend = backend();
    let user = register(&backend, "alice").await;

    let first = sign_in(&backend, "alice").await;
    let second = sign_in(&backend, "alice").await;

    assert_eq!(first.user_id, user.id);
    assert_ne!(first.access_token, second.access_token);
    assert!(first.is_active());
    assert!(second.is_active());
    assert!(first.logged_out_at.is_none());
}

#[tokio::test]
async fn unknown_username_and_bad_password_fail_with_stable_codes() {
    let backend = backend();
    register(&backend, "alice").await;

    let err = backend.users.sign_in("nobody", PASSWORD).await.unwrap_err();
    assert_eq!(err.code(), "ATH-001");

    let err = backend
        .users
        .sign_in("alice", "Wrong-pass1")
        .await
        .unwrap_err();
    assert_eq!(err.code(), "ATH-002");
    assert_eq!(err.to_string(), "Password Failed");
}

#[tokio::test]
async fn repeated_sign_in_failures_trip_the_rate_limit() {
    let backend = backend();
    register(&backend, "alice").await;

    for _ in 0..5 {
        let err = backend
            .users
            .sign_in("alice", "Wrong-pass1")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "ATH-002");
    }

    // Even the correct password is refused while the ban holds.
    let err = backend.users.sign_in("alice", PASSWORD).await.unwrap_err();
    assert_eq!(err.code(), "RATE-001");
}

#[tokio::test]
async fn duplicate_username_and_email_are_rejected() {
    let backend = backend();
    register(&backend, "alice").await;

    let err = backend
        .users
        .register(registration("alice"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "SGR-001");

    let mut same_email = registration("alice2");
    same_email.email = "alice@example.com".to_string();
    let err = backend.users.register(same_email).await.unwrap_err();
    assert_eq!(err.code(), "SGR-002");
}

#[tokio::test]
async fn signed_out_session_cannot_post_a_question() {
    let backend = backend();
    register(&backend, "alice").await;
    let session = sign_in(&backend, "alice").await;

    backend.users.sign_out(&session.access_token).await.unwrap();

    let err = backend
        .questions
        .create(&session.access_token, "Does this work?".to_string())
        .await
        .unwrap_err();
    assert_eq!(err.code(), "ATHR-002");
    assert!(err.to_string().ends_with("to post a question"));
}

#[tokio::test]
async fn sign_out_is_one_way_and_repeat_fails() {
    let backend = backend();
    register(&backend, "alice").await;
    let session = sign_in(&backend, "alice").await;

    let signed_out = backend.users.sign_out(&session.access_token).await.unwrap();
    assert!(signed_out.is_signed_out());

    let err = backend
        .users
        .sign_out(&session.access_token)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "SGR-001");
    assert_eq!(err.to_string(), "User is not Signed in");

    let err = backend.users.sign_out("never-issued").await.unwrap_err();
    assert_eq!(err.code(), "SGR-001");
}

#[tokio::test]
async fn question_edit_round_trips_and_non_owner_is_denied() {
    let backend = backend();
    register(&backend, "alice").await;
    register(&backend, "bob").await;
    let alice = sign_in(&backend, "alice").await;
    let bob = sign_in(&backend, "bob").await;

    let question = backend
        .questions
        .create(&alice.access_token, "X".to_string())
        .await
        .unwrap();

    backend
        .questions
        .edit(&alice.access_token, question.id, "Y".to_string())
        .await
        .unwrap();

    let err = backend
        .questions
        .edit(&bob.access_token, question.id, "Z".to_string())
        .await
        .unwrap_err();
    assert_eq!(err.code(), "ATHR-003");
    assert_eq!(
        err.to_string(),
        "Only the question owner can edit the question"
    );

    let listed = backend.questions.all(&alice.access_token).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].content, "Y");
}

#[tokio::test]
async fn admin_promotion_unlocks_foreign_question_delete() {
    let backend = backend();
    register(&backend, "alice").await;
    register(&backend, "bob").await;
    let bob = sign_in(&backend, "bob").await;
    let alice = sign_in(&backend, "alice").await;

    let question = backend
        .questions
        .create(&bob.access_token, "Bob's question".to_string())
        .await
        .unwrap();

    let err = backend
        .questions
        .delete(&alice.access_token, question.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "ATHR-003");
    assert_eq!(
        err.to_string(),
        "Only the question owner or admin can delete the question"
    );

    let alice_user = backend
        .users
        .get_profile(&alice.access_token, alice.user_id)
        .await
        .unwrap();
    assert!(backend.credentials.set_role(alice_user.id, Role::Admin).await);

    // Same session, fresh role: the guard sees the caller as admin now.
    backend
        .questions
        .delete(&alice.access_token, question.id)
        .await
        .unwrap();

    let remaining = backend.questions.all(&alice.access_token).await.unwrap();
    assert!(remaining.is_empty());
}

#[tokio::test]
async fn answers_follow_ownership_rules_and_cascade_with_their_question() {
    let backend = backend();
    register(&backend, "alice").await;
    register(&backend, "bob").await;
    let alice = sign_in(&backend, "alice").await;
    let bob = sign_in(&backend, "bob").await;

    let question = backend
        .questions
        .create(&alice.access_token, "What is ownership?".to_string())
        .await
        .unwrap();

    let answer = backend
        .answers
        .create(&bob.access_token, question.id, "A move thing".to_string())
        .await
        .unwrap();

    // Ownership is the stored author, not anything on the request.
    backend
        .answers
        .edit(&bob.access_token, answer.id, "A borrow thing".to_string())
        .await
        .unwrap();

    let err = backend
        .answers
        .edit(&alice.access_token, answer.id, "Hijacked".to_string())
        .await
        .unwrap_err();
    assert_eq!(err.code(), "ATHR-003");
    assert_eq!(err.to_string(), "Only the answer owner can edit the answer");

    let (listed_question, listed_answers) = backend
        .answers
        .all_by_question(&alice.access_token, question.id)
        .await
        .unwrap();
    assert_eq!(listed_question.content, "What is ownership?");
    assert_eq!(listed_answers.len(), 1);
    assert_eq!(listed_answers[0].content, "A borrow thing");

    // Question owner deletes the question; its answers go with it.
    backend
        .questions
        .delete(&alice.access_token, question.id)
        .await
        .unwrap();

    let err = backend
        .answers
        .all_by_question(&alice.access_token, question.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "QUES-001");
}

#[tokio::test]
async fn answer_to_a_missing_question_is_rejected() {
    let backend = backend();
    register(&backend, "alice").await;
    let alice = sign_in(&backend, "alice").await;

    let err = backend
        .answers
        .create(
            &alice.access_token,
            uuid::Uuid::new_v4(),
            "Answering the void".to_string(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "QUES-001");
    assert_eq!(err.to_string(), "The question entered is invalid");
}

#[tokio::test]
async fn profile_requires_an_authenticated_caller_and_an_existing_target() {
    let backend = backend();
    let alice_user = register(&backend, "alice").await;
    let alice = sign_in(&backend, "alice").await;

    let profile = backend
        .users
        .get_profile(&alice.access_token, alice_user.id)
        .await
        .unwrap();
    assert_eq!(profile.username, "alice");

    let err = backend
        .users
        .get_profile(&alice.access_token, uuid::Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(err.code(), "USR-001");

    let err = backend
        .users
        .get_profile("never-issued", alice_user.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "ATHR-001");
}

#[tokio::test]
async fn questions_by_user_requires_the_target_to_exist() {
    let backend = backend();
    let alice_user = register(&backend, "alice").await;
    let alice = sign_in(&backend, "alice").await;

    backend
        .questions
        .create(&alice.access_token, "Mine".to_string())
        .await
        .unwrap();

    let mine = backend
        .questions
        .all_by_user(&alice.access_token, alice_user.id)
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);

    let err = backend
        .questions
        .all_by_user(&alice.access_token, uuid::Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(err.code(), "USR-001");
}

#[tokio::test]
async fn only_an_admin_may_delete_a_user_and_the_target_must_exist() {
    let backend = backend();
    let bob_user = register(&backend, "bob").await;
    register(&backend, "alice").await;
    let alice = sign_in(&backend, "alice").await;

    // Target existence is checked before the role.
    let err = backend
        .users
        .delete_user(&alice.access_token, uuid::Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(err.code(), "USR-001");

    let err = backend
        .users
        .delete_user(&alice.access_token, bob_user.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "ATHR-003");
    assert_eq!(
        err.to_string(),
        "Unauthorized Access, Entered user is not an admin"
    );
}

#[tokio::test]
async fn admin_delete_cascades_sessions_and_authored_content() {
    let backend = backend();
    let bob_user = register(&backend, "bob").await;
    register(&backend, "admin_ann").await;
    let bob = sign_in(&backend, "bob").await;
    let ann = sign_in(&backend, "admin_ann").await;

    let ann_user = backend
        .users
        .get_profile(&ann.access_token, ann.user_id)
        .await
        .unwrap();
    backend.credentials.set_role(ann_user.id, Role::Admin).await;

    let bob_question = backend
        .questions
        .create(&bob.access_token, "Bob asks".to_string())
        .await
        .unwrap();
    backend
        .answers
        .create(&ann.access_token, bob_question.id, "Ann answers".to_string())
        .await
        .unwrap();

    let deleted = backend
        .users
        .delete_user(&ann.access_token, bob_user.id)
        .await
        .unwrap();
    assert_eq!(deleted.id, bob_user.id);

    // Bob's session is revoked, not erased: the record remains for audit
    // and now carries a logout stamp.
    let revoked = backend
        .sessions
        .find_by_token(&bob.access_token)
        .await
        .unwrap()
        .expect("session row is retained");
    assert!(revoked.is_signed_out());

    let err = backend
        .questions
        .create(&bob.access_token, "Still here?".to_string())
        .await
        .unwrap_err();
    assert_eq!(err.code(), "ATHR-002");

    // Authored content is gone, including answers under Bob's questions.
    let remaining = backend.questions.all(&ann.access_token).await.unwrap();
    assert!(remaining.is_empty());

    let err = backend
        .users
        .get_profile(&ann.access_token, bob_user.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "USR-001");
}
