pub mod handler;
pub mod models;

pub use handler::create_ai_resources_router;
pub use models::AiResource;
