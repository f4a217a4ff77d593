pub mod form;
pub mod store;

pub use form::{FileField, UploadForm, collect_form, flexible_bool, read_submission};
pub use store::{PUBLIC_PREFIX, StoredFile, UploadStore, public_url};
