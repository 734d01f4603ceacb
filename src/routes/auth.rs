use crate::{
    auth::{token::TokenService, LoginRequest, RefreshRequest, RegisterRequest},
    error::AppError,
    models::user::UserResponse,
    services::user::UserService,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates a new user account and returns its public profile. Tokens are
/// not issued here; a fresh account logs in like any other.
#[post("/register")]
pub async fn register(
    users: web::Data<UserService>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let user = users
        .register(
            &register_data.username,
            &register_data.email,
            &register_data.password,
        )
        .await?;

    log::info!("registered user {} ({})", user.id, user.username);
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Login user
///
/// Authenticates a user and returns an access/refresh token pair.
#[post("/login")]
pub async fn login(
    users: web::Data<UserService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let pair = users.login(&login_data.email, &login_data.password).await?;
    Ok(HttpResponse::Ok().json(pair))
}

/// Exchange a refresh token for a fresh pair
///
/// The token is verified first, then the subject is re-checked against the
/// user store before new tokens are issued.
#[post("/refresh")]
pub async fn refresh(
    users: web::Data<UserService>,
    tokens: web::Data<TokenService>,
    refresh_data: web::Json<RefreshRequest>,
) -> Result<impl Responder, AppError> {
    let claims = tokens.verify_refresh(&refresh_data.refresh_token)?;
    let pair = users.refresh_session(claims.user_id()?).await?;
    Ok(HttpResponse::Ok().json(pair))
}
