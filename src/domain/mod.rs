pub mod feed;
pub mod follow;
pub mod list;
pub mod quack;
pub mod user;
