use crate::{
    auth::{AuthResponse, AuthService, Claims, LoginRequest, RegisterRequest, TokenAuthority},
    error::AppError,
};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

/// Register a new account.
///
/// Creates the account with the default role. No token is issued here;
/// the client logs in as a separate step.
#[post("/register")]
pub async fn register(
    auth: web::Data<AuthService>,
    payload: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    auth.register(&payload.email, &payload.password).await?;

    Ok(HttpResponse::Created().json(json!({ "message": "User registered" })))
}

/// Log in with email and password.
///
/// On success, returns a signed session token carrying the account's email
/// and role, valid for 24 hours.
#[post("/login")]
pub async fn login(
    auth: web::Data<AuthService>,
    authority: web::Data<TokenAuthority>,
    payload: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let user = auth.login(&payload.email, &payload.password).await?;
    let claims = Claims::new(user.email, user.role);
    let token = authority.issue(&claims)?;

    Ok(HttpResponse::Ok().json(AuthResponse { token }))
}
