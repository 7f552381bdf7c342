pub mod allocator;
pub mod feed;
pub mod handlers;
pub mod pagination;
pub mod response;
pub mod session;
pub mod validator;
