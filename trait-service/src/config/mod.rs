use reqwest::Url;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

pub const DEFAULT_TRAIT_CATALOG_URL: &str = "https://www.ebi.ac.uk/gwas/api/v2";
pub const DEFAULT_PARENT_MAPPING_URL: &str = "https://www.ebi.ac.uk/gwas/rest/api";
pub const DEFAULT_PARENT_MAPPING_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct TraitServiceConfig {
    pub common: core_config::Config,
    pub catalog: CatalogConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base for `/genes/{gene_id}/traits`.
    pub traits_base_url: Url,
    /// Base for `/parentMapping/{trait_id}`.
    pub parent_mapping_base_url: Url,
    /// Applies to each parent mapping call. The trait listing call is unbounded.
    pub parent_mapping_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            traits_base_url: Url::parse(DEFAULT_TRAIT_CATALOG_URL)
                .expect("default trait catalog URL is valid"),
            parent_mapping_base_url: Url::parse(DEFAULT_PARENT_MAPPING_URL)
                .expect("default parent mapping URL is valid"),
            parent_mapping_timeout: Duration::from_secs(DEFAULT_PARENT_MAPPING_TIMEOUT_SECS),
        }
    }
}

impl TraitServiceConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let timeout_secs = get_env(
            "PARENT_MAPPING_TIMEOUT_SECS",
            Some(&DEFAULT_PARENT_MAPPING_TIMEOUT_SECS.to_string()),
            false,
        )?
        .parse::<u64>()
        .map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "PARENT_MAPPING_TIMEOUT_SECS must be a whole number of seconds: {}",
                e
            ))
        })?;

        Ok(TraitServiceConfig {
            common: common_config,
            catalog: CatalogConfig {
                traits_base_url: parse_base_url(
                    "TRAIT_CATALOG_URL",
                    &get_env("TRAIT_CATALOG_URL", Some(DEFAULT_TRAIT_CATALOG_URL), is_prod)?,
                )?,
                parent_mapping_base_url: parse_base_url(
                    "PARENT_MAPPING_URL",
                    &get_env(
                        "PARENT_MAPPING_URL",
                        Some(DEFAULT_PARENT_MAPPING_URL),
                        is_prod,
                    )?,
                )?,
                parent_mapping_timeout: Duration::from_secs(timeout_secs),
            },
            observability: ObservabilityConfig {
                log_level: get_env("LOG_LEVEL", Some("info"), false)?,
                otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|v| !v.is_empty()),
            },
        })
    }
}

/// Parse a catalog base URL; it must be able to take extra path segments.
pub fn parse_base_url(key: &str, value: &str) -> Result<Url, AppError> {
    let url = Url::parse(value).map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!("{} is not a valid URL: {}", key, e))
    })?;

    if url.cannot_be_a_base() {
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "{} cannot be used as a base URL: {}",
            key,
            value
        )));
    }

    Ok(url)
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
