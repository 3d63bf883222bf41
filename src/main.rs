use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;

use taskmgr::auth::{AuthMiddleware, AuthService, TokenAuthority};
use taskmgr::config::Config;
use taskmgr::routes;
use taskmgr::store::postgres::{PgCredentialStore, PgTaskStore};
use taskmgr::tasks::TaskService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    let authority = web::Data::new(TokenAuthority::new(&config.jwt_secret));
    let auth_service = web::Data::new(AuthService::new(Arc::new(PgCredentialStore::new(
        pool.clone(),
    ))));
    let task_service = web::Data::new(TaskService::new(Arc::new(PgTaskStore::new(pool.clone()))));

    log::info!("Starting server at {}", config.server_url());

    HttpServer::new(move || {
        App::new()
            .app_data(authority.clone())
            .app_data(auth_service.clone())
            .app_data(task_service.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .configure(routes::public)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::protected),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
