pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod storage;

use actix_web::{error::JsonPayloadError, web};
use sqlx::PgPool;

pub use config::Config;
pub use error::AppError;
use database::repositories::{
    AdminUserRepository, ArticleRepository, FoundersMessageRepository, HeroSlideRepository,
    MediaRepository, MetricsRepository, TeamMemberImageRepository, TeamMemberRepository,
};
use services::{AboutService, AuthService, SessionGate};
use storage::MediaStorage;

/// Largest accepted JSON body; article content travels inline.
pub const MAX_JSON_BYTES: usize = 2 * 1024 * 1024;

/// JSON extractor limits, with rejections rendered as the usual envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_JSON_BYTES)
        .error_handler(|err, _req| {
            let error = match &err {
                JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                    AppError::PayloadTooLarge(err.to_string())
                }
                _ => AppError::BadRequest(err.to_string()),
            };
            error.into()
        })
}

/// Everything the handlers pull from app data, built once per process and
/// cloned into each worker.
#[derive(Clone)]
pub struct AppServices {
    pub config: web::Data<Config>,
    pub session_gate: web::Data<SessionGate>,
    pub auth_service: web::Data<AuthService>,
    pub about_service: web::Data<AboutService>,
    pub storage: web::Data<MediaStorage>,
    pub team_repository: web::Data<TeamMemberRepository>,
    pub team_image_repository: web::Data<TeamMemberImageRepository>,
    pub founders_repository: web::Data<FoundersMessageRepository>,
    pub article_repository: web::Data<ArticleRepository>,
    pub media_repository: web::Data<MediaRepository>,
    pub hero_slide_repository: web::Data<HeroSlideRepository>,
    pub metrics_repository: web::Data<MetricsRepository>,
}

impl AppServices {
    pub fn new(pool: PgPool, config: Config) -> Self {
        let team_repository = TeamMemberRepository::new(pool.clone());
        let team_image_repository = TeamMemberImageRepository::new(pool.clone());
        let founders_repository = FoundersMessageRepository::new(pool.clone());
        let session_gate = SessionGate::from_config(&config);

        Self {
            auth_service: web::Data::new(AuthService::new(
                AdminUserRepository::new(pool.clone()),
                session_gate.clone(),
            )),
            about_service: web::Data::new(AboutService::new(
                team_repository.clone(),
                founders_repository.clone(),
                team_image_repository.clone(),
            )),
            storage: web::Data::new(MediaStorage::from_config(&config)),
            session_gate: web::Data::new(session_gate),
            team_repository: web::Data::new(team_repository),
            team_image_repository: web::Data::new(team_image_repository),
            founders_repository: web::Data::new(founders_repository),
            article_repository: web::Data::new(ArticleRepository::new(pool.clone())),
            media_repository: web::Data::new(MediaRepository::new(pool.clone())),
            hero_slide_repository: web::Data::new(HeroSlideRepository::new(pool.clone())),
            metrics_repository: web::Data::new(MetricsRepository::new(pool)),
            config: web::Data::new(config),
        }
    }

    /// Registers app data and the `/api/v1` routes.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(json_config())
            .app_data(self.config.clone())
            .app_data(self.session_gate.clone())
            .app_data(self.auth_service.clone())
            .app_data(self.about_service.clone())
            .app_data(self.storage.clone())
            .app_data(self.team_repository.clone())
            .app_data(self.team_image_repository.clone())
            .app_data(self.founders_repository.clone())
            .app_data(self.article_repository.clone())
            .app_data(self.media_repository.clone())
            .app_data(self.hero_slide_repository.clone())
            .app_data(self.metrics_repository.clone())
            .configure(routes::configure);
    }
}
