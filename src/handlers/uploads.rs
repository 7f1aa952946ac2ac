use actix_multipart::Multipart;
use actix_web::{HttpResponse, Result, web};
use chrono::Utc;

use crate::{
    config::Config,
    services::{AdminContext, uploads::read_upload_form},
    handlers::shared::ApiResponse,
    storage::{MEDIA_BUCKET, MediaStorage, UploadRules, object_name},
};

/// Stores an image and returns its public URL for use in a later save.
pub async fn upload_image(
    ctx: AdminContext,
    storage: web::Data<MediaStorage>,
    config: web::Data<Config>,
    mut multipart: Multipart,
) -> Result<HttpResponse> {
    let form = read_upload_form(&mut multipart, UploadRules::image(&config)).await?;
    let prefix = form.field("prefix").unwrap_or_else(|| "image".to_string());
    let prefix = if prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        prefix
    } else {
        "image".to_string()
    };

    let stored = storage
        .upload(
            MEDIA_BUCKET,
            &object_name(&prefix, &form.file_name, Utc::now()),
            &form.bytes,
        )
        .await?;
    log::info!("{} uploaded {}", ctx.username(), stored.object_name);

    Ok(ApiResponse::created(stored))
}

/// Stores an article document (PDF or Word).
pub async fn upload_document(
    ctx: AdminContext,
    storage: web::Data<MediaStorage>,
    mut multipart: Multipart,
) -> Result<HttpResponse> {
    let form = read_upload_form(&mut multipart, UploadRules::document()).await?;

    let stored = storage
        .upload(
            MEDIA_BUCKET,
            &object_name("article", &form.file_name, Utc::now()),
            &form.bytes,
        )
        .await?;
    log::info!("{} uploaded document {}", ctx.username(), stored.object_name);

    Ok(ApiResponse::created(stored))
}
