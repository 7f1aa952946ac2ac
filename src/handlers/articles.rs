use actix_web::{HttpResponse, Result, web};
use uuid::Uuid;

use crate::{
    database::{models::ArticleInput, repositories::ArticleRepository},
    error::AppError,
    handlers::shared::ApiResponse,
    services::AdminContext,
};

fn article_not_found(id: Uuid) -> AppError {
    log::warn!("Article {} not found", id);
    AppError::NotFound("Article not found".to_string())
}

pub async fn list_published_articles(
    repo: web::Data<ArticleRepository>,
) -> Result<HttpResponse> {
    let articles = repo.list(true).await.map_err(AppError::from)?;
    Ok(ApiResponse::success(articles))
}

/// A published article. Drafts read as not found.
pub async fn get_published_article(
    repo: web::Data<ArticleRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let article = repo
        .find_by_id(id)
        .await
        .map_err(AppError::from)?
        .filter(|a| a.is_published)
        .ok_or_else(|| article_not_found(id))?;

    Ok(ApiResponse::success(article))
}

pub async fn list_articles(
    _ctx: AdminContext,
    repo: web::Data<ArticleRepository>,
) -> Result<HttpResponse> {
    let articles = repo.list(false).await.map_err(AppError::from)?;
    Ok(ApiResponse::success(articles))
}

pub async fn get_article(
    _ctx: AdminContext,
    repo: web::Data<ArticleRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let article = repo
        .find_by_id(id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| article_not_found(id))?;

    Ok(ApiResponse::success(article))
}

pub async fn create_article(
    ctx: AdminContext,
    repo: web::Data<ArticleRepository>,
    input: web::Json<ArticleInput>,
) -> Result<HttpResponse> {
    let input = input.into_inner().normalized().map_err(AppError::BadRequest)?;

    let article = repo.create(input).await.map_err(AppError::from)?;
    log::info!("{} created article {} ({})", ctx.username(), article.title, article.id);

    Ok(ApiResponse::created(article))
}

pub async fn update_article(
    ctx: AdminContext,
    repo: web::Data<ArticleRepository>,
    path: web::Path<Uuid>,
    input: web::Json<ArticleInput>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let input = input.into_inner().normalized().map_err(AppError::BadRequest)?;

    let article = repo
        .update(id, input)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| article_not_found(id))?;
    log::info!("{} updated article {}", ctx.username(), id);

    Ok(ApiResponse::success(article))
}

pub async fn toggle_article(
    ctx: AdminContext,
    repo: web::Data<ArticleRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let article = repo
        .toggle_published(id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| article_not_found(id))?;
    log::info!(
        "{} set article {} published={}",
        ctx.username(),
        id,
        article.is_published
    );

    Ok(ApiResponse::success(article))
}

pub async fn delete_article(
    ctx: AdminContext,
    repo: web::Data<ArticleRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    if !repo.delete(id).await.map_err(AppError::from)? {
        return Err(article_not_found(id).into());
    }
    log::info!("{} deleted article {}", ctx.username(), id);

    Ok(ApiResponse::message("Article deleted"))
}
