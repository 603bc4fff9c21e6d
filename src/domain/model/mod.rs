pub mod id;
pub mod library;
pub mod record;
