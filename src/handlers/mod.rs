pub mod articles;
pub mod auth;
pub mod dashboard;
pub mod founders;
pub mod hero;
pub mod media;
pub mod public;
pub mod shared;
pub mod team;
pub mod team_images;
pub mod uploads;
