pub mod handler;

pub use handler::create_contact_router;
