pub mod form;
pub mod store;

pub use form::UploadForm;
pub use store::{MediaError, MediaStore, PUBLIC_PREFIX};
