pub mod context;
pub mod dispatcher;
pub mod error_codes;
pub mod response_builder;
pub mod subscription;
pub mod timeline;
pub mod tweet;
pub mod user;
