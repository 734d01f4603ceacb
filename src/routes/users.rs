use crate::{
    auth::{extractors::AuthenticatedUser, middleware::bearer_token, token::TokenService},
    error::AppError,
    models::user::{UpdateUserRequest, UserResponse},
    services::user::UserService,
};
use actix_web::{get, put, web, HttpRequest, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

/// Current user's profile
#[get("/me")]
pub async fn me(
    users: web::Data<UserService>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let user = users.get_details(user.user_id()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// Update the current user's profile
///
/// Accepts a partial body; absent fields keep their stored values.
#[put("/me")]
pub async fn update_me(
    users: web::Data<UserService>,
    user: AuthenticatedUser,
    update_data: web::Json<UpdateUserRequest>,
) -> Result<impl Responder, AppError> {
    update_data.validate()?;

    let update_data = update_data.into_inner();
    let updated = users
        .update_details(user.user_id(), update_data.username, update_data.email)
        .await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}

/// Log out by revoking the presented access token
///
/// Only the token on this request is revoked. Other sessions of the same
/// user, and the refresh token issued alongside this access token, stay
/// valid until they expire or are revoked themselves.
#[get("/logout")]
pub async fn logout(
    tokens: web::Data<TokenService>,
    user: AuthenticatedUser,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let token = bearer_token(req.headers())
        .ok_or_else(|| AppError::Unauthorized("missing bearer token".into()))?;
    tokens.revoke(token)?;

    log::info!("user {} logged out", user.user_id());
    Ok(HttpResponse::Ok().json(json!({ "message": "logout successful" })))
}
