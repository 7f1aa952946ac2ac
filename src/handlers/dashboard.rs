use actix_web::{HttpResponse, Result, web};

use crate::{
    config::Config,
    database::repositories::MetricsRepository,
    error::AppError,
    handlers::shared::ApiResponse,
    services::{AdminContext, metrics::dashboard_metrics},
};

/// Content counts plus trend figures for the dashboard cards.
pub async fn get_metrics(
    _ctx: AdminContext,
    repo: web::Data<MetricsRepository>,
    config: web::Data<Config>,
) -> Result<HttpResponse> {
    let counts = repo.content_counts().await.map_err(AppError::from)?;
    let metrics = dashboard_metrics(counts, config.metrics_refresh_seconds, &mut rand::rng());

    Ok(ApiResponse::success(metrics))
}
