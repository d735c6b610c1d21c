use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_LOGIN_URL: &str =
    "https://1kxyg811y3.execute-api.us-east-1.amazonaws.com/Test/loginFunction2";
pub const DEFAULT_REGISTER_URL: &str =
    "https://091b0yq7ig.execute-api.us-east-1.amazonaws.com/test/registerFunction";
pub const DEFAULT_PROFILE_URL: &str =
    "https://wyrbii4vx4.execute-api.us-east-1.amazonaws.com/test/mainPage";
pub const DEFAULT_QUERY_URL: &str =
    "https://zq2rr53pm4.execute-api.us-east-1.amazonaws.com/test/queryFunction";
pub const DEFAULT_SUBSCRIPTION_URL: &str =
    "https://eqbqzqdxh1.execute-api.us-east-1.amazonaws.com/test/subscriptionFunction";

/// One URL per gateway function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayEndpoints {
    pub login_url: String,
    pub register_url: String,
    pub profile_url: String,
    pub query_url: String,
    /// Serves list (GET), subscribe (POST) and unsubscribe (DELETE).
    pub subscription_url: String,
}

impl Default for GatewayEndpoints {
    fn default() -> Self {
        Self {
            login_url: DEFAULT_LOGIN_URL.to_string(),
            register_url: DEFAULT_REGISTER_URL.to_string(),
            profile_url: DEFAULT_PROFILE_URL.to_string(),
            query_url: DEFAULT_QUERY_URL.to_string(),
            subscription_url: DEFAULT_SUBSCRIPTION_URL.to_string(),
        }
    }
}

impl GatewayEndpoints {
    /// Every function served under a single base URL, e.g. a local stub.
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            login_url: format!("{}/loginFunction2", base),
            register_url: format!("{}/registerFunction", base),
            profile_url: format!("{}/mainPage", base),
            query_url: format!("{}/queryFunction", base),
            subscription_url: format!("{}/subscriptionFunction", base),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoints: GatewayEndpoints,
    /// Per-request timeout applied by the HTTP client
    pub request_timeout: Duration,
    /// Where the session entries are persisted
    pub session_file: PathBuf,
    /// Lifetime of a session started by login
    pub session_ttl: Duration,
    /// How often the shell checks for an expired session
    pub expiry_check_interval: Duration,
    /// Pause between a successful login and showing the dashboard
    pub redirect_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoints: GatewayEndpoints::default(),
            request_timeout: Duration::from_secs(30),
            session_file: default_session_file(),
            session_ttl: Duration::from_secs(3600),
            expiry_check_interval: Duration::from_secs(60),
            redirect_delay: Duration::from_millis(200),
        }
    }
}

impl ClientConfig {
    /// Create a configuration from `MUSIC_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup("MUSIC_BASE_URL") {
            config.endpoints = GatewayEndpoints::with_base_url(&base_url);
        }

        if let Some(url) = lookup("MUSIC_LOGIN_URL") {
            config.endpoints.login_url = url;
        }

        if let Some(url) = lookup("MUSIC_REGISTER_URL") {
            config.endpoints.register_url = url;
        }

        if let Some(url) = lookup("MUSIC_PROFILE_URL") {
            config.endpoints.profile_url = url;
        }

        if let Some(url) = lookup("MUSIC_QUERY_URL") {
            config.endpoints.query_url = url;
        }

        if let Some(url) = lookup("MUSIC_SUBSCRIPTION_URL") {
            config.endpoints.subscription_url = url;
        }

        if let Some(timeout_secs) = lookup("MUSIC_TIMEOUT_SECONDS") {
            if let Ok(secs) = timeout_secs.parse() {
                config.request_timeout = Duration::from_secs(secs);
            }
        }

        if let Some(path) = lookup("MUSIC_SESSION_FILE") {
            config.session_file = PathBuf::from(path);
        }

        config
    }

    pub fn session_ttl_seconds(&self) -> i64 {
        self.session_ttl.as_secs() as i64
    }
}

fn default_session_file() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("music-client");
    path.push("session.json");
    path
}
