pub mod guard;
pub mod handler;
pub mod models;

pub use guard::require_write_token;
pub use handler::create_auth_router;
