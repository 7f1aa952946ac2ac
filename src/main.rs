use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware::Logger};
use anyhow::Result;

use iplr_cms::database::init_database;
use iplr_cms::middleware::RequestIdMiddleware;
use iplr_cms::storage::PUBLIC_PREFIX;
use iplr_cms::{AppServices, Config};

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().body("IPLR CMS API v1.0")
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}

#[actix_web::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    log::info!("Starting IPLR CMS API (environment: {})", config.environment);

    let pool = init_database(&config.database_url).await?;
    log::info!("Database initialized");

    tokio::fs::create_dir_all(&config.storage_dir).await?;

    let services = AppServices::new(pool, config.clone());

    if let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) {
        if services
            .auth_service
            .ensure_admin(username, password)
            .await?
            .is_none()
        {
            log::info!("Admin account {} already exists", username);
        }
    } else {
        log::warn!("ADMIN_USERNAME/ADMIN_PASSWORD not set; no admin account bootstrapped");
    }

    let server_address = config.server_address();
    log::info!("Server starting on http://{}", server_address);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allowed_origin(&config.client_base_url)
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                    .allowed_headers(vec![
                        "Authorization",
                        "Content-Type",
                        "Accept",
                        "X-Requested-With",
                        "X-Correlation-ID",
                    ])
                    .supports_credentials()
                    .max_age(3600),
            )
            .wrap(Logger::new(
                r#"%a "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T correlation_id=%{x-correlation-id}o"#,
            ))
            .wrap(RequestIdMiddleware)
            .service(hello)
            .service(health)
            .configure(|cfg| services.configure(cfg))
            .service(Files::new(PUBLIC_PREFIX, &config.storage_dir))
    })
    .bind(&server_address)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
