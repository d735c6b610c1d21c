pub mod auth_service_errors;
pub mod music_service_errors;
pub mod profile_service_errors;
pub mod session_service_errors;
