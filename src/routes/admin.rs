use actix_web::web;

use crate::handlers::{
    articles, dashboard, founders, hero, media, team, team_images, uploads,
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/metrics", web::get().to(dashboard::get_metrics))
            .route("/team", web::get().to(team::list_team))
            .route("/team", web::post().to(team::create_team_member))
            .route("/team/{id}", web::get().to(team::get_team_member))
            .route("/team/{id}", web::put().to(team::update_team_member))
            .route("/team/{id}", web::delete().to(team::delete_team_member))
            .route("/team/{id}/toggle", web::post().to(team::toggle_team_member))
            .route(
                "/team/{id}/image",
                web::post().to(team::upload_team_member_image),
            )
            .route(
                "/team/{id}/image",
                web::delete().to(team::remove_team_member_image),
            )
            .route(
                "/team-images",
                web::get().to(team_images::list_team_member_images),
            )
            .route(
                "/team-images/{name}",
                web::post().to(team_images::upload_team_member_image_by_name),
            )
            .route(
                "/team-images/{name}",
                web::delete().to(team_images::delete_team_member_image_by_name),
            )
            .route(
                "/founders-message",
                web::get().to(founders::get_founders_message_admin),
            )
            .route(
                "/founders-message",
                web::put().to(founders::save_founders_message),
            )
            .route("/articles", web::get().to(articles::list_articles))
            .route("/articles", web::post().to(articles::create_article))
            .route("/articles/{id}", web::get().to(articles::get_article))
            .route("/articles/{id}", web::put().to(articles::update_article))
            .route("/articles/{id}", web::delete().to(articles::delete_article))
            .route(
                "/articles/{id}/toggle",
                web::post().to(articles::toggle_article),
            )
            .route("/media", web::get().to(media::list_media))
            .route("/media/images", web::post().to(media::upload_media_image))
            .route("/media/video-links", web::post().to(media::create_video_link))
            .route("/media/{id}", web::delete().to(media::delete_media))
            .route("/hero-slides", web::get().to(hero::list_slides))
            .route("/hero-slides", web::post().to(hero::create_slide))
            .route("/hero-slides/{id}", web::put().to(hero::update_slide))
            .route("/hero-slides/{id}", web::delete().to(hero::delete_slide))
            .route(
                "/hero-slides/{id}/toggle",
                web::post().to(hero::toggle_slide),
            )
            .route("/uploads/image", web::post().to(uploads::upload_image))
            .route("/uploads/document", web::post().to(uploads::upload_document)),
    );
}
