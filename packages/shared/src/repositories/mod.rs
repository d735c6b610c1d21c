pub mod errors;
pub mod music_api_repository;
pub mod session_repository;
