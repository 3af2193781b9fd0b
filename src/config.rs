use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Origin of the SimSuite AI backend, without a trailing slash.
    pub ai_base_url: String,
    pub static_dir: PathBuf,
    pub max_body_size: usize,
    pub session_ttl: Duration,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("SIMSUITE_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid SIMSUITE_HOST: {e}"))?;

        let port: u16 = env_or("SIMSUITE_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid SIMSUITE_PORT: {e}"))?;

        let ai_base_url = normalize_base_url(&env_or("SIMSUITE_AI_BASE_URL", "http://localhost:8001"))
            .map_err(|e| format!("Invalid SIMSUITE_AI_BASE_URL: {e}"))?;

        let static_dir = PathBuf::from(env_or("SIMSUITE_STATIC_DIR", "static"));

        let max_body_size: usize = env_or("SIMSUITE_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid SIMSUITE_MAX_BODY_SIZE: {e}"))?;

        let session_ttl_secs: u64 = env_or("SIMSUITE_SESSION_TTL_SECS", "3600")
            .parse()
            .map_err(|e| format!("Invalid SIMSUITE_SESSION_TTL_SECS: {e}"))?;

        let log_level = env_or("SIMSUITE_LOG_LEVEL", "info");

        Ok(Config {
            host,
            port,
            ai_base_url,
            static_dir,
            max_body_size,
            session_ttl: Duration::from_secs(session_ttl_secs),
            log_level,
        })
    }
}

/// Accepts `http://` and `https://` origins and strips trailing slashes so
/// endpoint paths can be appended verbatim.
pub fn normalize_base_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim().trim_end_matches('/');
    // "http://" alone trims down to "http:", so a bare scheme fails here too
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(format!("'{raw}' must start with http:// or https:// and name a host"));
    }
    Ok(trimmed.to_string())
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
