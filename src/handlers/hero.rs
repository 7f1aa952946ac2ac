use actix_web::{HttpResponse, Result, web};
use uuid::Uuid;

use crate::{
    database::{models::HeroSlideInput, repositories::HeroSlideRepository},
    error::AppError,
    handlers::shared::ApiResponse,
    services::AdminContext,
};

fn slide_not_found(id: Uuid) -> AppError {
    log::warn!("Hero slide {} not found", id);
    AppError::NotFound("Hero slide not found".to_string())
}

pub async fn list_active_slides(repo: web::Data<HeroSlideRepository>) -> Result<HttpResponse> {
    let slides = repo.list(true).await.map_err(AppError::from)?;
    Ok(ApiResponse::success(slides))
}

pub async fn list_slides(
    _ctx: AdminContext,
    repo: web::Data<HeroSlideRepository>,
) -> Result<HttpResponse> {
    let slides = repo.list(false).await.map_err(AppError::from)?;
    Ok(ApiResponse::success(slides))
}

pub async fn create_slide(
    ctx: AdminContext,
    repo: web::Data<HeroSlideRepository>,
    input: web::Json<HeroSlideInput>,
) -> Result<HttpResponse> {
    let input = input.into_inner().normalized().map_err(AppError::BadRequest)?;

    let slide = repo.create(input).await.map_err(AppError::from)?;
    log::info!("{} created hero slide {}", ctx.username(), slide.id);

    Ok(ApiResponse::created(slide))
}

pub async fn update_slide(
    ctx: AdminContext,
    repo: web::Data<HeroSlideRepository>,
    path: web::Path<Uuid>,
    input: web::Json<HeroSlideInput>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let input = input.into_inner().normalized().map_err(AppError::BadRequest)?;

    let slide = repo
        .update(id, input)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| slide_not_found(id))?;
    log::info!("{} updated hero slide {}", ctx.username(), id);

    Ok(ApiResponse::success(slide))
}

pub async fn toggle_slide(
    ctx: AdminContext,
    repo: web::Data<HeroSlideRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let slide = repo
        .toggle_active(id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| slide_not_found(id))?;
    log::info!("{} set hero slide {} active={}", ctx.username(), id, slide.is_active);

    Ok(ApiResponse::success(slide))
}

pub async fn delete_slide(
    ctx: AdminContext,
    repo: web::Data<HeroSlideRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    if !repo.delete(id).await.map_err(AppError::from)? {
        return Err(slide_not_found(id).into());
    }
    log::info!("{} deleted hero slide {}", ctx.username(), id);

    Ok(ApiResponse::message("Hero slide deleted"))
}
