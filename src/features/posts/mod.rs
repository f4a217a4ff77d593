pub mod handler;
pub mod models;

pub use handler::create_posts_router;
pub use models::Post;
