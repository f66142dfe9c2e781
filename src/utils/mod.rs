pub mod image_store;
pub mod multipart;
pub mod search;
pub mod validation;
