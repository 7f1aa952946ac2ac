pub mod admin_user;
pub mod article;
pub mod founders_message;
pub mod hero_slide;
pub mod media;
pub mod metrics;
pub mod team_member;
pub mod team_member_image;

// Re-export all repositories for easy importing
pub use admin_user::AdminUserRepository;
pub use article::ArticleRepository;
pub use founders_message::FoundersMessageRepository;
pub use hero_slide::HeroSlideRepository;
pub use media::MediaRepository;
pub use metrics::MetricsRepository;
pub use team_member::TeamMemberRepository;
pub use team_member_image::TeamMemberImageRepository;
