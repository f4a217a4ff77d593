pub mod handler;
pub mod models;

pub use handler::create_carousel_router;
pub use models::{Carousel, CarouselImage};
