use std::{env, path::PathBuf, sync::Arc};

use crate::store::LeaderboardStore;

pub(crate) const DEFAULT_PORT: u16 = 3001;
pub(crate) const DEFAULT_DATA_DIR: &str = "data";
pub(crate) const DEFAULT_RESUME_PATH: &str = "public/resume.pdf";
pub(crate) const DEFAULT_RESUME_DOWNLOAD_NAME: &str = "resume.pdf";
pub(crate) const DEFAULT_PAGE_SIZE: u64 = 10;
pub(crate) const DEFAULT_MAX_PAGE_SIZE: u64 = 100;
pub(crate) const DEFAULT_JSON_LIMIT_BYTES: usize = 16 * 1024;
pub(crate) const SERVICE_NAME: &str = "galaga-leaderboard-api";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageLimits {
    pub(crate) default_size: u64,
    pub(crate) max_size: u64,
}

impl PageLimits {
    pub(crate) fn from_env() -> Self {
        let max_size = read_env_u64("MAX_PAGE_SIZE", DEFAULT_MAX_PAGE_SIZE);
        let mut default_size = read_env_u64("DEFAULT_PAGE_SIZE", DEFAULT_PAGE_SIZE);
        if default_size > max_size {
            tracing::warn!(
                "DEFAULT_PAGE_SIZE ({}) > MAX_PAGE_SIZE ({}). Clamping.",
                default_size,
                max_size
            );
            default_size = max_size;
        }
        Self {
            default_size,
            max_size,
        }
    }
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_PAGE_SIZE,
            max_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResumeConfig {
    pub(crate) path: PathBuf,
    pub(crate) download_name: String,
}

impl ResumeConfig {
    pub(crate) fn from_env() -> Self {
        Self {
            path: PathBuf::from(read_env_string("RESUME_PATH", DEFAULT_RESUME_PATH)),
            download_name: read_env_string("RESUME_DOWNLOAD_NAME", DEFAULT_RESUME_DOWNLOAD_NAME),
        }
    }
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) store: Arc<LeaderboardStore>,
    pub(crate) pages: PageLimits,
    pub(crate) resume: ResumeConfig,
}

/// Process-level settings that are only needed while booting the server.
#[derive(Debug, Clone)]
pub(crate) struct ServerConfig {
    pub(crate) bind_addr: String,
    pub(crate) data_dir: PathBuf,
    pub(crate) json_limit_bytes: usize,
    pub(crate) cors_allowed_origin: Option<String>,
}

impl ServerConfig {
    pub(crate) fn from_env() -> Self {
        let port = read_env_u16("PORT", DEFAULT_PORT);
        Self {
            bind_addr: env::var("API_BIND_ADDR").unwrap_or_else(|_| format!("0.0.0.0:{port}")),
            data_dir: PathBuf::from(read_env_string("DATA_DIR", DEFAULT_DATA_DIR)),
            json_limit_bytes: read_env_usize("JSON_LIMIT_BYTES", DEFAULT_JSON_LIMIT_BYTES),
            cors_allowed_origin: read_env_optional_string("CORS_ALLOWED_ORIGIN"),
        }
    }
}

pub(crate) fn read_env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

pub(crate) fn read_env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

pub(crate) fn read_env_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

pub(crate) fn read_env_optional_string(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub(crate) fn read_env_string(name: &str, default: &str) -> String {
    read_env_optional_string(name).unwrap_or_else(|| default.to_string())
}
