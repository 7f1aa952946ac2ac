use actix_web::{HttpResponse, Result, web};

use crate::{
    database::{
        models::FoundersMessageInput, repositories::FoundersMessageRepository,
        transaction::DatabaseTransaction,
    },
    error::AppError,
    handlers::shared::ApiResponse,
    services::{AboutService, AdminContext},
};

/// The founders message, or `null` data when none exists yet.
pub async fn get_founders_message(
    repo: web::Data<FoundersMessageRepository>,
) -> Result<HttpResponse> {
    let message = repo.find_current().await.map_err(AppError::from)?;
    Ok(ApiResponse::success(message))
}

pub async fn get_founders_message_admin(
    _ctx: AdminContext,
    repo: web::Data<FoundersMessageRepository>,
) -> Result<HttpResponse> {
    get_founders_message(repo).await
}

/// Updates the founders message in place, creating it on first save.
pub async fn save_founders_message(
    ctx: AdminContext,
    repo: web::Data<FoundersMessageRepository>,
    about: web::Data<AboutService>,
    input: web::Json<FoundersMessageInput>,
) -> Result<HttpResponse> {
    let input = input.into_inner().normalized().map_err(AppError::BadRequest)?;

    let saved = DatabaseTransaction::run(repo.pool(), |tx| {
        Box::pin(async move {
            FoundersMessageRepository::save(tx, input)
                .await
                .map_err(AppError::from)
        })
    })
    .await?;
    about.invalidate();
    log::info!(
        "{} {} the founders message",
        ctx.username(),
        if saved.created { "created" } else { "updated" }
    );

    if saved.created {
        Ok(ApiResponse::created(saved))
    } else {
        Ok(ApiResponse::success(saved))
    }
}
