use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Origin of the judicial-document search backend
    pub backend_url: String,
    /// Server bind address
    pub bind_addr: String,
    /// Connect timeout for backend requests, in seconds
    pub connect_timeout_secs: u64,
    /// Overall timeout for backend requests, in seconds
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:5000".to_string(),
            bind_addr: "127.0.0.1:3000".to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("CASE_SEARCH_BACKEND_URL") {
            config.backend_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(addr) = std::env::var("CASE_SEARCH_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(val) = std::env::var("CASE_SEARCH_CONNECT_TIMEOUT_SECS") {
            if let Ok(v) = val.parse() {
                config.connect_timeout_secs = v;
            }
        }
        if let Ok(val) = std::env::var("CASE_SEARCH_REQUEST_TIMEOUT_SECS") {
            if let Ok(v) = val.parse() {
                config.request_timeout_secs = v;
            }
        }

        config
    }
}
