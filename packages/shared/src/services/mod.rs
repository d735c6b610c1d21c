pub mod auth_service;
pub mod errors;
pub mod music_service;
pub mod profile_service;
pub mod session_service;
