pub mod handler;
pub mod models;

pub use handler::create_services_router;
pub use models::{Service, TemplateType};
