use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use common::database;
use forum::auth::{TokenConfig, TokenIssuer};
use forum::rate_limiter::{RateLimiterConfig, SigninRateLimiter};
use forum::routes;
use forum::services::{AnswerService, QuestionService, UserService};
use forum::state::AppState;
use forum::stores::{PgAnswerStore, PgCredentialStore, PgQuestionStore, PgSessionStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting forum service");

    // Initialize database connection pool
    let db_config = database::DatabaseConfig::from_env()?;
    let pool = database::init_pool(&db_config).await?;

    // Check database connectivity
    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Initialize the token issuer
    let token_config = TokenConfig::from_env()?;
    let tokens = TokenIssuer::new(&token_config);

    // Initialize stores
    let credentials = PgCredentialStore::new(pool.clone());
    let sessions = PgSessionStore::new(pool.clone());
    let questions = PgQuestionStore::new(pool.clone());
    let answers = PgAnswerStore::new(pool.clone());

    let rate_limiter = SigninRateLimiter::new(RateLimiterConfig::default());

    let user_service = UserService::new(
        credentials.clone(),
        sessions.clone(),
        questions.clone(),
        answers.clone(),
        tokens,
        rate_limiter,
    );
    let question_service = QuestionService::new(
        credentials.clone(),
        sessions.clone(),
        questions.clone(),
        answers.clone(),
    );
    let answer_service = AnswerService::new(credentials, sessions, questions, answers);

    let app_state = AppState {
        db_pool: pool,
        user_service,
        question_service,
        answer_service,
    };

    info!("Forum service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
    info!("Forum service listening on 0.0.0.0:8080");

    axum::serve(listener, app).await?;

    Ok(())
}
