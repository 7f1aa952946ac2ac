use actix_multipart::Multipart;
use actix_web::{HttpResponse, Result, web};
use chrono::Utc;

use crate::{
    config::Config,
    database::repositories::TeamMemberImageRepository,
    error::AppError,
    handlers::shared::ApiResponse,
    services::{AboutService, AdminContext, uploads::read_upload_form},
    storage::{MEDIA_BUCKET, MediaStorage, UploadRules, object_name},
};

pub async fn list_team_member_images(
    _ctx: AdminContext,
    repo: web::Data<TeamMemberImageRepository>,
) -> Result<HttpResponse> {
    let images = repo.list().await.map_err(AppError::from)?;
    Ok(ApiResponse::success(images))
}

/// Uploads an image for the member called `{name}`, replacing any previous one.
pub async fn upload_team_member_image_by_name(
    ctx: AdminContext,
    repo: web::Data<TeamMemberImageRepository>,
    about: web::Data<AboutService>,
    storage: web::Data<MediaStorage>,
    config: web::Data<Config>,
    path: web::Path<String>,
    mut multipart: Multipart,
) -> Result<HttpResponse> {
    let name = path.into_inner().trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("Member name is required".to_string()).into());
    }

    let form = read_upload_form(&mut multipart, UploadRules::image(&config)).await?;
    let stored = storage
        .upload(
            MEDIA_BUCKET,
            &object_name("team", &form.file_name, Utc::now()),
            &form.bytes,
        )
        .await?;

    let image = repo
        .upsert(&name, &stored.public_url)
        .await
        .map_err(AppError::from)?;
    about.invalidate();
    log::info!("{} uploaded a legacy image for {}", ctx.username(), name);

    Ok(ApiResponse::success(image))
}

pub async fn delete_team_member_image_by_name(
    ctx: AdminContext,
    repo: web::Data<TeamMemberImageRepository>,
    about: web::Data<AboutService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let name = path.into_inner();
    if !repo.delete_by_name(&name).await.map_err(AppError::from)? {
        return Err(AppError::NotFound(format!("No image for {}", name)).into());
    }
    about.invalidate();
    log::info!("{} removed the legacy image for {}", ctx.username(), name);

    Ok(ApiResponse::message(&format!("Image removed for {}", name)))
}
