pub mod entity;
pub mod pagination;
pub mod post;
pub mod user;
pub mod utils;
