pub mod post;
pub mod profile;
pub mod resource;
