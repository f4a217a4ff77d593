pub mod handler;

pub use handler::create_dashboard_router;
