use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,

    /// Mount point of the JSON API scope.
    pub api_prefix: String,
    /// Base URL handed to the browser client. Defaults to the API prefix,
    /// i.e. same-origin.
    pub api_base_url: String,

    /// Insert sample employees and attendance at startup when the
    /// database holds no employees.
    pub demo_seed: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let api_prefix = env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string());

        Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".to_string()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://hrms_lite.db".to_string()),
            api_base_url: env::var("API_BASE_URL").unwrap_or_else(|_| api_prefix.clone()),
            demo_seed: env::var("DEMO_SEED")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            api_prefix,
        }
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            server_addr: "127.0.0.1:0".to_string(),
            database_url: "sqlite::memory:".to_string(),
            api_prefix: "/api".to_string(),
            api_base_url: "/api".to_string(),
            demo_seed: false,
        }
    }
}
