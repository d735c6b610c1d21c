pub mod auth;
pub mod music;
pub mod navigation;
pub mod session;
