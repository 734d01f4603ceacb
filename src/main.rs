use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::PgPool;

use tasklane::auth::blocklist::{Blocklist, InMemoryBlocklist};
use tasklane::auth::token::TokenService;
use tasklane::config::Config;
use tasklane::error::AppError;
use tasklane::repository::{
    PgTaskRepository, PgUserRepository, TaskRepository, UserRepository,
};
use tasklane::routes;
use tasklane::services::{TaskService, UserService};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    let blocklist: Arc<dyn Blocklist> = Arc::new(InMemoryBlocklist::new());
    let tokens = Arc::new(TokenService::new(
        &config.jwt_secret,
        config.access_token_ttl(),
        config.refresh_token_ttl(),
        blocklist,
    ));

    let user_repo: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool.clone()));
    let task_repo: Arc<dyn TaskRepository> = Arc::new(PgTaskRepository::new(pool));

    let user_service = web::Data::new(UserService::new(user_repo, tokens.clone()));
    let task_service = web::Data::new(TaskService::new(task_repo));
    let token_service = web::Data::from(tokens);

    log::info!(
        "starting tasklane server at http://{}:{}",
        config.server_host,
        config.server_port
    );

    let bind_addr = (config.server_host.clone(), config.server_port);
    HttpServer::new(move || {
        App::new()
            .app_data(token_service.clone())
            .app_data(user_service.clone())
            .app_data(task_service.clone())
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::Validation(err.to_string()).into()
            }))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .configure(routes::config)
    })
    .bind(bind_addr)?
    .run()
    .await
}
