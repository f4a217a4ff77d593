pub mod handler;
pub mod models;

pub use handler::create_profile_router;
pub use models::{CompanyInfo, CompanyIntro, FounderInfo};
