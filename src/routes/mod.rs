pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;

use crate::auth::AdminMiddleware;

/// Unauthenticated entry points: registration and login.
pub fn public(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::register).service(auth::login);
}

/// Routes that sit behind the bearer-token gate (the caller wraps the
/// enclosing scope in `AuthMiddleware`). The user listing additionally
/// passes the admin gate.
pub fn protected(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tasks")
            .service(tasks::list_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    )
    .service(
        web::scope("/users")
            .wrap(AdminMiddleware)
            .service(users::list_users),
    );
}
