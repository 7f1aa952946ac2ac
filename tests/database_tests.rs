//! Runs against a real Postgres when `TEST_DATABASE_URL` is set; otherwise
//! each test returns early.

use actix_web::{App, http::StatusCode, test};
use fake::{Fake, faker::name::en::Name};
use pretty_assertions::assert_eq;
use serde_json::Value;
use serial_test::serial;

use iplr_cms::database::models::{MediaType, MediaUploadInput, TeamMemberInput};

mod common;

macro_rules! db_context {
    () => {
        match common::TestContext::with_database().await.unwrap() {
            Some(ctx) => ctx,
            None => {
                eprintln!("TEST_DATABASE_URL not set; skipping");
                return;
            }
        }
    };
}

macro_rules! init_app {
    ($ctx:expr) => {{
        let services = $ctx.services.clone();
        test::init_service(App::new().configure(move |cfg| services.configure(cfg))).await
    }};
}

fn bearer(ctx: &common::TestContext) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", ctx.admin_token()))
}

fn png_upload(file_name: &str) -> Vec<u8> {
    common::multipart_body(&[], file_name, "image/png", b"\x89PNG\r\n\x1a\n")
}

fn member(name: &str) -> TeamMemberInput {
    TeamMemberInput {
        name: name.to_string(),
        title: "Research Associate".to_string(),
        description: String::new(),
        image_url: None,
        order_index: None,
        is_active: None,
    }
}

#[actix_web::test]
#[serial]
async fn founders_message_is_inserted_once_then_updated_in_place() {
    let ctx = db_context!();
    let app = init_app!(ctx);
    let auth = format!("Bearer {}", ctx.admin_token());

    let req = test::TestRequest::put()
        .uri("/api/v1/admin/founders-message")
        .insert_header(("Authorization", auth.clone()))
        .set_json(serde_json::json!({ "message": "  First words  " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let first: Value = test::read_body_json(resp).await;
    assert_eq!(first["data"]["foundersMessage"]["message"], "First words");

    let req = test::TestRequest::put()
        .uri("/api/v1/admin/founders-message")
        .insert_header(("Authorization", auth))
        .set_json(serde_json::json!({ "message": "Second words", "imageAlt": "Founder" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let second: Value = test::read_body_json(resp).await;
    assert_eq!(second["data"]["created"], false);
    assert_eq!(
        second["data"]["foundersMessage"]["id"],
        first["data"]["foundersMessage"]["id"]
    );

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM founders_message")
        .fetch_one(ctx.services.founders_repository.pool())
        .await
        .unwrap();
    assert_eq!(rows, 1);

    let req = test::TestRequest::get()
        .uri("/api/v1/public/founders-message")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["message"], "Second words");
}

#[actix_web::test]
#[serial]
async fn missing_founders_message_is_an_empty_state() {
    let ctx = db_context!();
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/v1/public/founders-message")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"].is_null());
}

#[actix_web::test]
#[serial]
async fn team_is_appended_in_order_and_deactivation_hides_from_public() {
    let ctx = db_context!();
    let repo = ctx.services.team_repository.clone();

    let names: Vec<String> = (0..3).map(|_| Name().fake()).collect();
    let mut created = Vec::new();
    for name in &names {
        created.push(repo.create(member(name)).await.unwrap());
    }
    assert_eq!(
        created.iter().map(|m| m.order_index).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );

    let hidden = repo.toggle_active(created[1].id).await.unwrap().unwrap();
    assert!(!hidden.is_active);

    let public = repo.list(true).await.unwrap();
    assert_eq!(
        public.iter().map(|m| m.name.as_str()).collect::<Vec<_>>(),
        vec![names[0].as_str(), names[2].as_str()]
    );
    assert_eq!(repo.list(false).await.unwrap().len(), 3);

    let app = init_app!(ctx);
    let req = test::TestRequest::get().uri("/api/v1/public/about").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["teamSource"], "database");
    assert_eq!(body["data"]["team"].as_array().map(Vec::len), Some(2));
}

#[actix_web::test]
#[serial]
async fn metrics_count_real_content() {
    let ctx = db_context!();
    let media = ctx.services.media_repository.clone();

    for file_type in [MediaType::Image, MediaType::VideoLink, MediaType::VideoLink] {
        media
            .create(MediaUploadInput {
                title: "Seminar".to_string(),
                description: None,
                file_type,
                file_url: "https://youtu.be/abc".to_string(),
            })
            .await
            .unwrap();
    }

    let app = init_app!(ctx);
    let req = test::TestRequest::get()
        .uri("/api/v1/admin/metrics")
        .insert_header(("Authorization", format!("Bearer {}", ctx.admin_token())))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["totalArticles"], 0);
    assert_eq!(body["data"]["mediaFiles"], 3);
    assert_eq!(body["data"]["videoLinks"], 2);
    assert_eq!(body["data"]["refreshIntervalSeconds"], 30);
}

#[actix_web::test]
#[serial]
async fn bootstrap_admin_can_log_in_once_created() {
    let ctx = db_context!();
    let auth = ctx.services.auth_service.clone();

    assert!(auth.ensure_admin("admin", "correct-horse").await.unwrap().is_some());
    assert!(auth.ensure_admin("admin", "correct-horse").await.unwrap().is_none());

    let app = init_app!(ctx);
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(serde_json::json!({ "username": "admin", "password": "wrong-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(serde_json::json!({ "username": "admin", "password": "correct-horse" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        resp.response()
            .cookies()
            .any(|c| c.name() == "admin_session" && !c.value().is_empty())
    );
}

#[actix_web::test]
#[serial]
async fn renaming_a_member_keeps_the_uploaded_image() {
    let ctx = db_context!();
    let repo = ctx.services.team_repository.clone();
    let created = repo.create(member("Ayesha Imam")).await.unwrap();
    repo.set_image(created.id, Some("http://x/img.png".to_string()))
        .await
        .unwrap();

    let app = init_app!(ctx);
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/admin/team/{}", created.id))
        .insert_header(bearer(&ctx))
        .set_json(serde_json::json!({ "name": "Ayesha Imam Khan", "title": "Senior Research Associate" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["name"], "Ayesha Imam Khan");
    assert_eq!(body["data"]["imageUrl"], "http://x/img.png");
    assert_eq!(body["data"]["orderIndex"], created.order_index);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/admin/team/{}/image", created.id))
        .insert_header(bearer(&ctx))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["data"]["imageUrl"].is_null());
}

#[actix_web::test]
#[serial]
async fn legacy_image_upload_replaces_instead_of_duplicating() {
    let ctx = db_context!();
    ctx.services
        .team_repository
        .create(member("Rubab"))
        .await
        .unwrap();
    let app = init_app!(ctx);

    let mut last_url = Value::Null;
    for file_name in ["first.png", "second.png"] {
        let req = test::TestRequest::post()
            .uri("/api/v1/admin/team-images/Rubab")
            .insert_header(bearer(&ctx))
            .insert_header(("Content-Type", common::multipart_content_type()))
            .set_payload(png_upload(file_name))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        last_url = body["data"]["imageUrl"].clone();
    }
    assert!(last_url.as_str().unwrap().ends_with("-second.png"));

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/team-images")
        .insert_header(bearer(&ctx))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let images = body["data"].as_array().unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0]["imageUrl"], last_url);

    let req = test::TestRequest::get().uri("/api/v1/public/about").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["team"][0]["imageUrl"], last_url);
}

#[actix_web::test]
#[serial]
async fn articles_are_hidden_until_published() {
    let ctx = db_context!();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/articles")
        .insert_header(bearer(&ctx))
        .set_json(serde_json::json!({
            "title": "Water Rights",
            "content": "Body",
            "isPublished": false
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/public/articles/{}", id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    let req = test::TestRequest::get().uri("/api/v1/public/articles").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/admin/articles/{}/toggle", id))
        .insert_header(bearer(&ctx))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["isPublished"], true);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/public/articles/{}", id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["title"], "Water Rights");

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/admin/articles/{}", id))
        .insert_header(bearer(&ctx))
        .set_json(serde_json::json!({ "title": "Water Rights Revisited", "content": "New body" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["title"], "Water Rights Revisited");
    assert_eq!(body["data"]["isPublished"], true);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/admin/articles/{}", id))
        .insert_header(bearer(&ctx))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/admin/articles/{}", id))
        .insert_header(bearer(&ctx))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
#[serial]
async fn hero_carousel_shows_active_slides_in_order() {
    let ctx = db_context!();
    let app = init_app!(ctx);

    let mut ids = std::collections::HashMap::new();
    for (title, order_index) in [("Second", Some(1)), ("First", Some(0)), ("Third", None)] {
        let req = test::TestRequest::post()
            .uri("/api/v1/admin/hero-slides")
            .insert_header(bearer(&ctx))
            .set_json(serde_json::json!({
                "title": title,
                "imageUrl": "http://localhost:8080/storage/media/hero.png",
                "orderIndex": order_index
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        ids.insert(title, body["data"]["id"].as_str().unwrap().to_string());
    }

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/admin/hero-slides/{}/toggle", ids["Second"]))
        .insert_header(bearer(&ctx))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["isActive"], false);

    let public_titles = |body: Value| -> Vec<String> {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|slide| slide["title"].as_str().unwrap().to_string())
            .collect()
    };

    let req = test::TestRequest::get().uri("/api/v1/public/hero-slides").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(public_titles(body), vec!["First", "Third"]);

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/hero-slides")
        .insert_header(bearer(&ctx))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(public_titles(body), vec!["First", "Second", "Third"]);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/admin/hero-slides/{}", ids["First"]))
        .insert_header(bearer(&ctx))
        .set_json(serde_json::json!({
            "title": "Opening",
            "imageUrl": "http://localhost:8080/storage/media/opening.png"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["title"], "Opening");
    assert_eq!(body["data"]["orderIndex"], 0);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/admin/hero-slides/{}", ids["Third"]))
        .insert_header(bearer(&ctx))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/v1/public/hero-slides").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(public_titles(body), vec!["Opening"]);
}

#[actix_web::test]
#[serial]
async fn deleting_media_removes_stored_images_but_not_for_links() {
    let ctx = db_context!();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/media/images")
        .insert_header(bearer(&ctx))
        .insert_header(("Content-Type", common::multipart_content_type()))
        .set_payload(common::multipart_body(
            &[("title", "Seminar"), ("description", "Day one")],
            "seminar.png",
            "image/png",
            b"\x89PNG\r\n\x1a\n",
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let image: Value = test::read_body_json(resp).await;
    assert_eq!(image["data"]["fileType"], "image");
    assert_eq!(ctx.stored_objects().len(), 1);

    // A link pointing at the stored object must not take the object with it
    let req = test::TestRequest::post()
        .uri("/api/v1/admin/media/video-links")
        .insert_header(bearer(&ctx))
        .set_json(serde_json::json!({
            "title": "Mirror",
            "url": image["data"]["fileUrl"]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let link: Value = test::read_body_json(resp).await;
    assert_eq!(link["data"]["fileType"], "video_link");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/admin/media/{}", link["data"]["id"].as_str().unwrap()))
        .insert_header(bearer(&ctx))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    assert_eq!(ctx.stored_objects().len(), 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/admin/media/{}", image["data"]["id"].as_str().unwrap()))
        .insert_header(bearer(&ctx))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    assert!(ctx.stored_objects().is_empty());

    let req = test::TestRequest::get().uri("/api/v1/public/media").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}
