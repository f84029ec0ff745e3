use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::HeaderValue;
use env_helpers::get_env_default;

use crate::infra::error::InfraError;

const DEFAULT_PORT: u16 = 4000;

/// Catalog service settings.
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub cors_origin: HeaderValue,
    /// JSON log output; `None` disables the file layer.
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, InfraError> {
        let mut bind_addr: SocketAddr =
            get_env_default("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)));
        // MOCK_API_PORT only replaces the port of BIND_ADDR.
        if let Some(port) = std::env::var("MOCK_API_PORT")
            .ok()
            .and_then(|s| s.trim().parse::<u16>().ok())
        {
            bind_addr.set_port(port);
        }

        let cors_origin = parse_cors_origin(&get_env_default(
            "CORS_ORIGIN",
            String::from("http://localhost:5173"),
        ))?;

        Ok(Self {
            bind_addr,
            cors_origin,
            log_file: log_file_from_env(),
        })
    }
}

/// Storefront session settings: where the catalog lives and where the cart and
/// billing region are persisted.
pub struct StorefrontConfig {
    pub catalog_base_url: String,
    pub store_path: PathBuf,
}

impl StorefrontConfig {
    pub fn from_env() -> Self {
        let catalog_base_url: String = get_env_default(
            "CATALOG_BASE_URL",
            format!("http://127.0.0.1:{}", DEFAULT_PORT),
        );
        let store_path: String =
            get_env_default("STORE_PATH", String::from("data/storefront.json"));

        Self {
            catalog_base_url,
            store_path: PathBuf::from(store_path),
        }
    }
}

pub fn log_file_from_env() -> Option<PathBuf> {
    let path: String = get_env_default("LOG_FILE", String::from("app.log"));
    let path = path.trim();
    (!path.is_empty()).then(|| PathBuf::from(path))
}

fn parse_cors_origin(value: &str) -> Result<HeaderValue, InfraError> {
    value.parse().map_err(|_| InfraError::InvalidConfig {
        var: "CORS_ORIGIN",
        reason: "not a valid header value".into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_origin_must_be_header_safe() {
        assert!(parse_cors_origin("http://localhost:5173").is_ok());
        assert!(matches!(
            parse_cors_origin("bad\norigin"),
            Err(InfraError::InvalidConfig { var: "CORS_ORIGIN", .. })
        ));
    }
}
