use actix_web::web;

use crate::handlers::{articles, founders, hero, media, public, team};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/public")
            .route("/about", web::get().to(public::about_page))
            .route("/navigation", web::get().to(public::navigation))
            .route("/team", web::get().to(team::list_public_team))
            .route(
                "/founders-message",
                web::get().to(founders::get_founders_message),
            )
            .route("/articles", web::get().to(articles::list_published_articles))
            .route(
                "/articles/{id}",
                web::get().to(articles::get_published_article),
            )
            .route("/media", web::get().to(media::list_public_media))
            .route("/hero-slides", web::get().to(hero::list_active_slides)),
    );
}
