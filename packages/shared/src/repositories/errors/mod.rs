pub mod gateway_errors;
pub mod session_repository_errors;
