pub mod about;
pub mod auth;
pub mod metrics;
pub mod session;
pub mod uploads;

pub use about::AboutService;
pub use auth::AuthService;
pub use session::{AdminContext, AdminSession, SessionGate};
