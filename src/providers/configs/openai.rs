use super::base::ProviderConfig;
use anyhow::Result;

pub const OPENAI_DEFAULT_HOST: &str = "https://api.openai.com/";

#[derive(Debug, Clone)]
pub struct OpenAiProviderConfig {
    pub api_key: String,
    pub host: String,
}

impl OpenAiProviderConfig {
    /// The host always ends with `/` so endpoint paths can be appended directly
    pub fn new(api_key: String, host: String) -> Self {
        let host = if host.ends_with('/') {
            host
        } else {
            format!("{}/", host)
        };
        Self { api_key, host }
    }

    /// Load from the environment, letting explicit values take precedence
    pub fn with_overrides(api_key: Option<String>, host: Option<String>) -> Result<Self> {
        let config = match api_key {
            Some(api_key) => Self::new(api_key, Self::host_from_env()?),
            None => Self::from_env()?,
        };

        Ok(match host {
            Some(host) => Self::new(config.api_key, host),
            None => config,
        })
    }

    fn host_from_env() -> Result<String> {
        Ok(
            Self::get_env("OPENAI_API_HOST", false, Some(OPENAI_DEFAULT_HOST.to_string()))?
                .unwrap_or_else(|| OPENAI_DEFAULT_HOST.to_string()),
        )
    }
}

impl ProviderConfig for OpenAiProviderConfig {
    fn from_env() -> Result<Self> {
        let api_key = Self::get_env("OPENAI_API_KEY", true, None)?
            .ok_or_else(|| anyhow::anyhow!("OpenAI API key should be present"))?;

        Ok(Self::new(api_key, Self::host_from_env()?))
    }
}
