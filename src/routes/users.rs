use crate::{
    auth::{AuthenticatedUser, AuthService},
    error::AppError,
};
use actix_web::{get, web, HttpResponse, Responder};

/// Lists all registered accounts.
///
/// Sits behind both gates: the route is only reachable with a valid bearer
/// token whose role matches the admin role. Password hashes are skipped on
/// serialization and never appear in the response.
#[get("")]
pub async fn list_users(
    auth: web::Data<AuthService>,
    caller: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    log::info!("user listing requested by {}", caller.email);

    let users = auth.list_users().await?;
    Ok(HttpResponse::Ok().json(users))
}
