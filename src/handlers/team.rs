use actix_multipart::Multipart;
use actix_web::{HttpResponse, Result, web};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    config::Config,
    database::{models::TeamMemberInput, repositories::TeamMemberRepository},
    error::AppError,
    handlers::shared::ApiResponse,
    services::{AboutService, AdminContext, uploads::read_upload_form},
    storage::{MEDIA_BUCKET, MediaStorage, UploadRules, object_name},
};

fn member_not_found(id: Uuid) -> AppError {
    log::warn!("Team member {} not found", id);
    AppError::NotFound("Team member not found".to_string())
}

/// Public roster: active members in display order.
pub async fn list_public_team(repo: web::Data<TeamMemberRepository>) -> Result<HttpResponse> {
    let members = repo.list(true).await.map_err(AppError::from)?;
    Ok(ApiResponse::success(members))
}

/// Admin roster, inactive members included.
pub async fn list_team(
    _ctx: AdminContext,
    repo: web::Data<TeamMemberRepository>,
) -> Result<HttpResponse> {
    let members = repo.list(false).await.map_err(AppError::from)?;
    Ok(ApiResponse::success(members))
}

pub async fn get_team_member(
    _ctx: AdminContext,
    repo: web::Data<TeamMemberRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let member = repo
        .find_by_id(id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| member_not_found(id))?;

    Ok(ApiResponse::success(member))
}

pub async fn create_team_member(
    ctx: AdminContext,
    repo: web::Data<TeamMemberRepository>,
    about: web::Data<AboutService>,
    input: web::Json<TeamMemberInput>,
) -> Result<HttpResponse> {
    let input = input.into_inner().normalized().map_err(AppError::BadRequest)?;

    let member = repo.create(input).await.map_err(AppError::from)?;
    about.invalidate();
    log::info!("{} added team member {} ({})", ctx.username(), member.name, member.id);

    Ok(ApiResponse::created(member))
}

pub async fn update_team_member(
    ctx: AdminContext,
    repo: web::Data<TeamMemberRepository>,
    about: web::Data<AboutService>,
    path: web::Path<Uuid>,
    input: web::Json<TeamMemberInput>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let input = input.into_inner().normalized().map_err(AppError::BadRequest)?;

    let member = repo
        .update(id, input)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| member_not_found(id))?;
    about.invalidate();
    log::info!("{} updated team member {}", ctx.username(), id);

    Ok(ApiResponse::success(member))
}

pub async fn toggle_team_member(
    ctx: AdminContext,
    repo: web::Data<TeamMemberRepository>,
    about: web::Data<AboutService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let member = repo
        .toggle_active(id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| member_not_found(id))?;
    about.invalidate();
    log::info!(
        "{} set team member {} active={}",
        ctx.username(),
        id,
        member.is_active
    );

    Ok(ApiResponse::success(member))
}

pub async fn delete_team_member(
    ctx: AdminContext,
    repo: web::Data<TeamMemberRepository>,
    about: web::Data<AboutService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    if !repo.delete(id).await.map_err(AppError::from)? {
        return Err(member_not_found(id).into());
    }
    about.invalidate();
    log::info!("{} deleted team member {}", ctx.username(), id);

    Ok(ApiResponse::message("Team member deleted"))
}

/// Uploads an image and stores its public URL on the member.
pub async fn upload_team_member_image(
    ctx: AdminContext,
    repo: web::Data<TeamMemberRepository>,
    about: web::Data<AboutService>,
    storage: web::Data<MediaStorage>,
    config: web::Data<Config>,
    path: web::Path<Uuid>,
    mut multipart: Multipart,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let form = read_upload_form(&mut multipart, UploadRules::image(&config)).await?;

    repo.find_by_id(id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| member_not_found(id))?;

    let stored = storage
        .upload(
            MEDIA_BUCKET,
            &object_name("team", &form.file_name, Utc::now()),
            &form.bytes,
        )
        .await?;

    let member = repo
        .set_image(id, Some(stored.public_url))
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| member_not_found(id))?;
    about.invalidate();
    log::info!("{} uploaded an image for team member {}", ctx.username(), id);

    Ok(ApiResponse::success(member))
}

pub async fn remove_team_member_image(
    ctx: AdminContext,
    repo: web::Data<TeamMemberRepository>,
    about: web::Data<AboutService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let member = repo
        .set_image(id, None)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| member_not_found(id))?;
    about.invalidate();
    log::info!("{} removed the image of team member {}", ctx.username(), id);

    Ok(ApiResponse::success(member))
}
