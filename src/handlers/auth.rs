use actix_web::{HttpResponse, Result, web};

use crate::{
    database::models::{ChangePasswordInput, LoginInput},
    handlers::shared::ApiResponse,
    services::{AdminContext, AuthService, SessionGate},
};

/// Verifies the credentials, returns the session and sets the session cookie.
pub async fn login(
    auth_service: web::Data<AuthService>,
    session_gate: web::Data<SessionGate>,
    input: web::Json<LoginInput>,
) -> Result<HttpResponse> {
    let response = auth_service.login(input.into_inner()).await?;
    let cookie = session_gate.session_cookie(&response.token);

    Ok(HttpResponse::Ok().cookie(cookie).json(ApiResponse {
        success: true,
        data: Some(response),
        message: Some("Logged in".to_string()),
    }))
}

pub async fn logout() -> Result<HttpResponse> {
    let mut response = ApiResponse::message("Logged out");
    if let Err(e) = response.add_removal_cookie(&SessionGate::removal_cookie()) {
        log::warn!("Failed to attach session removal cookie: {}", e);
    }
    Ok(response)
}

/// The current session, for the console to show who is signed in.
pub async fn session(ctx: AdminContext) -> Result<HttpResponse> {
    Ok(ApiResponse::success(ctx.session))
}

pub async fn change_password(
    ctx: AdminContext,
    auth_service: web::Data<AuthService>,
    input: web::Json<ChangePasswordInput>,
) -> Result<HttpResponse> {
    auth_service
        .change_password(ctx.username(), input.into_inner())
        .await?;

    Ok(ApiResponse::message("Password changed"))
}
