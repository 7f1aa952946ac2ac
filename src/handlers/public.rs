use actix_web::{HttpResponse, Result, web};
use serde::Serialize;

use crate::{handlers::shared::ApiResponse, services::AboutService};

#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    pub name: &'static str,
    pub href: &'static str,
    #[serde(skip_serializing_if = "<[NavItem]>::is_empty")]
    pub submenu: &'static [NavItem],
}

const fn link(name: &'static str, href: &'static str) -> NavItem {
    NavItem {
        name,
        href,
        submenu: &[],
    }
}

pub const NAVIGATION: &[NavItem] = &[
    link("HOME", "#home"),
    link("ARTICLES", "#articles"),
    link("RESEARCH", "#research"),
    link("WORKSHOPS & TRAININGS", "#workshops"),
    NavItem {
        name: "DEPARTMENTS",
        href: "#departments",
        submenu: &[
            link("Research", "#research"),
            link("Litigation", "#litigation"),
            link("Content Creation", "#content-creation"),
        ],
    },
    link("ABOUT", "#about"),
    link("CONTACT", "#contact"),
];

/// About section: intro, mission, founders message and team.
pub async fn about_page(about: web::Data<AboutService>) -> Result<HttpResponse> {
    let page = about.about_page().await;
    Ok(ApiResponse::success(page.as_ref().clone()))
}

pub async fn navigation() -> Result<HttpResponse> {
    Ok(ApiResponse::success(NAVIGATION))
}
