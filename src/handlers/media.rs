use actix_multipart::Multipart;
use actix_web::{HttpResponse, Result, web};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    config::Config,
    database::{
        models::{MediaType, MediaUploadInput, VideoLinkInput},
        repositories::MediaRepository,
    },
    error::AppError,
    handlers::shared::ApiResponse,
    services::{AdminContext, uploads::read_upload_form},
    storage::{MEDIA_BUCKET, MediaStorage, UploadRules, object_name},
};

pub async fn list_media(
    _ctx: AdminContext,
    repo: web::Data<MediaRepository>,
) -> Result<HttpResponse> {
    let media = repo.list().await.map_err(AppError::from)?;
    Ok(ApiResponse::success(media))
}

/// Public gallery, newest first.
pub async fn list_public_media(repo: web::Data<MediaRepository>) -> Result<HttpResponse> {
    let media = repo.list().await.map_err(AppError::from)?;
    Ok(ApiResponse::success(media))
}

/// Stores an image and records it in the media library. The form carries
/// `file`, `title` and an optional `description`.
pub async fn upload_media_image(
    ctx: AdminContext,
    repo: web::Data<MediaRepository>,
    storage: web::Data<MediaStorage>,
    config: web::Data<Config>,
    mut multipart: Multipart,
) -> Result<HttpResponse> {
    let form = read_upload_form(&mut multipart, UploadRules::image(&config)).await?;
    let title = form
        .field("title")
        .unwrap_or_else(|| form.file_name.clone());

    let stored = storage
        .upload(
            MEDIA_BUCKET,
            &object_name("media", &form.file_name, Utc::now()),
            &form.bytes,
        )
        .await?;

    let created = repo
        .create(MediaUploadInput {
            title,
            description: form.field("description"),
            file_type: MediaType::Image,
            file_url: stored.public_url.clone(),
        })
        .await;

    let media = match created {
        Ok(media) => media,
        Err(e) => {
            // Keep storage in step with the library
            if let Err(remove_err) = storage.remove(MEDIA_BUCKET, &stored.object_name).await {
                log::warn!("Failed to remove orphaned {}: {}", stored.object_name, remove_err);
            }
            return Err(AppError::from(e).into());
        }
    };
    log::info!("{} uploaded media {} ({})", ctx.username(), media.title, media.id);

    Ok(ApiResponse::created(media))
}

pub async fn create_video_link(
    ctx: AdminContext,
    repo: web::Data<MediaRepository>,
    input: web::Json<VideoLinkInput>,
) -> Result<HttpResponse> {
    let input = input.into_inner().into_media().map_err(AppError::BadRequest)?;

    let media = repo.create(input).await.map_err(AppError::from)?;
    log::info!("{} added video link {}", ctx.username(), media.id);

    Ok(ApiResponse::created(media))
}

/// Deletes the library entry and, for stored files, the object behind it.
pub async fn delete_media(
    ctx: AdminContext,
    repo: web::Data<MediaRepository>,
    storage: web::Data<MediaStorage>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let media = repo
        .delete(id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("Media not found".to_string()))?;

    if media.file_type != MediaType::VideoLink {
        if let Some(object) = storage.object_name_from_url(MEDIA_BUCKET, &media.file_url) {
            match storage.remove(MEDIA_BUCKET, &object).await {
                Ok(true) => {}
                Ok(false) => log::warn!("Stored object {} was already gone", object),
                Err(e) => log::error!("Failed to remove stored object {}: {}", object, e),
            }
        }
    }
    log::info!("{} deleted media {}", ctx.username(), id);

    Ok(ApiResponse::message("Media deleted"))
}
