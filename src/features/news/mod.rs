pub mod handler;
pub mod models;

pub use handler::create_news_router;
pub use models::{NewsBoard, NewsItem, NewsSettings};
