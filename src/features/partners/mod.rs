pub mod handler;
pub mod models;

pub use handler::create_partners_router;
pub use models::Partner;
