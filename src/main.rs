pub mod modules;
pub use modules::auth;
pub use modules::course;
pub use modules::topic;
pub mod api;
pub mod health;
pub mod shared;

// Test helpers module - only compiled with feature flag
#[cfg(feature = "test-helpers")]
mod test_helpers;

use crate::auth::adapter::outgoing::jwt::JwtTokenService;
use crate::auth::adapter::outgoing::security::{
    Argon2Hasher, BcryptHasher, DelegatingPasswordHasher,
};
use crate::auth::adapter::outgoing::{UserQueryPostgres, UserRepositoryPostgres};
use crate::auth::application::ports::outgoing::password_hasher::PasswordHasher;
use crate::auth::application::ports::outgoing::token_provider::TokenProvider;
use crate::auth::application::use_cases::{
    login_user::{ILoginUserUseCase, LoginUserUseCase},
    register_user::{IRegisterUserUseCase, RegisterUserUseCase},
};
use crate::course::adapter::outgoing::CourseQueryPostgres;
use crate::shared::api::{custom_json_config, custom_path_config, custom_query_config};
use crate::shared::clock::{Clock, SystemClock};
use crate::shared::config::AppConfig;
use crate::topic::adapter::outgoing::{TopicQueryPostgres, TopicRepositoryPostgres};
use crate::topic::application::services::{
    CreateTopicService, DeleteTopicService, GetTopicService, ListFirstTopicsService,
    ListTopicsService, UpdateTopicService,
};
use crate::topic::application::topic_use_cases::TopicUseCases;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub login_user_use_case: Arc<dyn ILoginUserUseCase + Send + Sync>,
    pub register_user_use_case: Arc<dyn IRegisterUserUseCase + Send + Sync>,
    pub topic: TopicUseCases,
}

#[cfg(not(tarpaulin_include))]
fn build_topic_use_cases(db: &Arc<DatabaseConnection>, clock: Arc<dyn Clock>) -> TopicUseCases {
    let topic_query = TopicQueryPostgres::new(Arc::clone(db));
    let topic_repo = TopicRepositoryPostgres::new(Arc::clone(db));
    let user_query = UserQueryPostgres::new(Arc::clone(db));
    let course_query = CourseQueryPostgres::new(Arc::clone(db));

    TopicUseCases {
        create: Arc::new(CreateTopicService::new(
            topic_query.clone(),
            topic_repo.clone(),
            user_query.clone(),
            course_query.clone(),
            clock,
        )),
        get: Arc::new(GetTopicService::new(topic_query.clone())),
        list: Arc::new(ListTopicsService::new(topic_query.clone())),
        list_first: Arc::new(ListFirstTopicsService::new(topic_query.clone())),
        update: Arc::new(UpdateTopicService::new(
            topic_query,
            topic_repo.clone(),
            user_query,
            course_query,
        )),
        delete: Arc::new(DeleteTopicService::new(topic_repo)),
    }
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    // Environment variable loading
    let env = std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    // Try .env.{environment} first, then fall back to .env
    let env_file = format!(".env.{}", env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    let config = AppConfig::from_env().context("Invalid configuration")?;

    // SAFETY GUARD: Prevent test-helpers in production
    #[cfg(feature = "test-helpers")]
    {
        if config.is_production() {
            anyhow::bail!("test-helpers feature enabled in production environment");
        }
        tracing::warn!(
            environment = %config.environment,
            "Test helper routes are ENABLED"
        );
    }

    // Database connection
    let mut opt = ConnectOptions::new(config.database.url.clone());
    opt.max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .context("Failed to connect to database")?;

    if config.database.run_migrations {
        info!("Running pending migrations");
        Migrator::up(&conn, None)
            .await
            .context("Failed to run migrations")?;
    }

    let db_arc = Arc::new(conn);

    // Auth components
    let jwt_service = JwtTokenService::new(config.jwt.clone());
    let argon2 = Argon2Hasher::from_config(&config.argon2).context("Invalid Argon2 parameters")?;
    let password_hasher: Arc<dyn PasswordHasher + Send + Sync> =
        Arc::new(DelegatingPasswordHasher::new(argon2, BcryptHasher::new()));

    let user_query = UserQueryPostgres::new(Arc::clone(&db_arc));
    let user_repo = UserRepositoryPostgres::new(Arc::clone(&db_arc));

    let login_user_use_case = LoginUserUseCase::new(
        user_query.clone(),
        Arc::clone(&password_hasher),
        Arc::new(jwt_service.clone()),
    );
    let register_user_use_case =
        RegisterUserUseCase::new(user_query, user_repo, Arc::clone(&password_hasher));

    let state = AppState {
        login_user_use_case: Arc::new(login_user_use_case),
        register_user_use_case: Arc::new(register_user_use_case),
        topic: build_topic_use_cases(&db_arc, Arc::new(SystemClock)),
    };

    let token_provider_arc: Arc<dyn TokenProvider + Send + Sync> = Arc::new(jwt_service);
    let db_for_server = Arc::clone(&db_arc);

    let server_url = config.bind_address();
    info!(address = %server_url, "Server listening");

    HttpServer::new(move || {
        #[allow(unused_mut)]
        let mut app = App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_provider_arc)))
            .app_data(web::Data::new(Arc::clone(&db_for_server)))
            .app_data(custom_json_config())
            .app_data(custom_query_config())
            .app_data(custom_path_config())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", api::openapi::ApiDoc::openapi()),
            )
            .configure(init_routes);

        // Conditionally add test routes
        #[cfg(feature = "test-helpers")]
        {
            app = app.configure(test_helpers::configure_routes);
        }

        app
    })
    .bind(&server_url)
    .with_context(|| format!("Failed to bind {server_url}"))?
    .run()
    .await
    .context("Server terminated with an error")
}

/// `primeros10` is registered before `{id}` so it is not read as a topic id.
#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Auth
    cfg.service(crate::auth::adapter::incoming::web::routes::login_user_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::register_user_handler);
    // Topics
    cfg.service(crate::topic::adapter::incoming::web::routes::list_first_topics_handler);
    cfg.service(crate::topic::adapter::incoming::web::routes::list_topics_handler);
    cfg.service(crate::topic::adapter::incoming::web::routes::create_topic_handler);
    cfg.service(crate::topic::adapter::incoming::web::routes::get_topic_handler);
    cfg.service(crate::topic::adapter::incoming::web::routes::update_topic_handler);
    cfg.service(crate::topic::adapter::incoming::web::routes::delete_topic_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e:#}");
        std::process::exit(1);
    }
}
