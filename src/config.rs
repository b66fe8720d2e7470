use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub admin_api_key: String,
    pub payment_base_url: Option<String>,
    pub payment_api_token: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            database_url: std::env::var("DATABASE_URL")
                .or_else(|_| std::env::var("DB_URL"))
                .map_err(|_| {
                    anyhow::anyhow!("DATABASE_URL or DB_URL environment variable required")
                })
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("DATABASE_URL cannot be empty");
                    }
                    if !url.starts_with("postgresql://") && !url.starts_with("postgres://") {
                        anyhow::bail!("DATABASE_URL must start with postgresql:// or postgres://");
                    }
                    Ok(url)
                })?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            admin_api_key: std::env::var("ADMIN_API_KEY")
                .map_err(|_| anyhow::anyhow!("ADMIN_API_KEY environment variable required"))
                .and_then(|key| {
                    if key.trim().is_empty() {
                        anyhow::bail!("ADMIN_API_KEY cannot be empty");
                    }
                    if key.len() < 16 {
                        anyhow::bail!("ADMIN_API_KEY must be at least 16 characters");
                    }
                    Ok(key)
                })?,
            payment_base_url: std::env::var("PAYMENT_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|url| {
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("PAYMENT_BASE_URL must start with http:// or https://");
                    }
                    Ok(url)
                })
                .transpose()?,
            payment_api_token: std::env::var("PAYMENT_API_TOKEN")
                .ok()
                .filter(|s| !s.trim().is_empty()),
        };

        // Payment credentials only make sense as a pair
        if config.payment_base_url.is_some() && config.payment_api_token.is_none() {
            anyhow::bail!("PAYMENT_API_TOKEN required when PAYMENT_BASE_URL is set");
        }

        tracing::info!("Configuration loaded successfully");
        tracing::debug!(
            "Database URL: {}...",
            redacted_url_prefix(&config.database_url)
        );
        if let Some(ref payment) = config.payment_base_url {
            tracing::info!("Payment provider configured: {}", payment);
        }
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

/// First 20 characters of the URL for redacted logging. Character-based so
/// multi-byte credentials can never split a char boundary.
fn redacted_url_prefix(url: &str) -> String {
    url.chars().take(20).collect()
}
