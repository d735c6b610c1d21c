pub mod envelope;

pub use envelope::{decode_response, normalize_envelope, ApiResponse};

pub const SESSION_TOKEN_HEADER: &str = "X-Session-Token";
