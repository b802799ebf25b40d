pub mod gauge_types;
pub mod upload_types;
pub mod viewport_types;
