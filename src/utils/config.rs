use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: Option<PathBuf>,
    pub log_level: String,
    pub environment: String,
    pub currency_symbol: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            log_level: "warn".to_string(),
            environment: "development".to_string(),
            currency_symbol: "₽".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let defaults = Config::default();
        let config = Config {
            catalog_path: env::var("AUTOPARTS_CATALOG")
                .ok()
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            environment: env::var("APP_ENV").unwrap_or(defaults.environment),
            currency_symbol: env::var("CURRENCY_SYMBOL").unwrap_or(defaults.currency_symbol),
        };

        config.validate()?;
        Ok(config)
    }

    /// Command-line `--catalog` wins over the environment.
    pub fn with_catalog_override(mut self, path: Option<PathBuf>) -> anyhow::Result<Self> {
        if path.is_some() {
            self.catalog_path = path;
            self.validate()?;
        }
        Ok(self)
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.currency_symbol.trim().is_empty() {
            return Err(anyhow::anyhow!("CURRENCY_SYMBOL must not be empty"));
        }

        if let Some(path) = &self.catalog_path {
            let is_json = path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("json"))
                .unwrap_or(false);
            if !is_json {
                return Err(anyhow::anyhow!(
                    "Catalog path must point to a .json file: {}",
                    path.display()
                ));
            }
        }

        Ok(())
    }
}
