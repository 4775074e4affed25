//! Run configuration resolved from the command line.

/// Base URL of the API when none is given.
pub const DEFAULT_API_URL: &str = "http://localhost:3001/api/v1";

/// Password used for the throwaway account.
pub const DEFAULT_PASSWORD: &str = "Password123!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub password: String,
    /// Send the bearer token on the list-by-user and list-by-opportunity queries.
    pub token_on_queries: bool,
}

impl Config {
    pub fn new(api_url: Option<String>, password: Option<String>, token_on_queries: bool) -> Self {
        let api_url = api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = api_url.strip_suffix('/').unwrap_or(&api_url).to_string();

        Self {
            api_url,
            password: password.unwrap_or_else(|| DEFAULT_PASSWORD.to_string()),
            token_on_queries,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None, None, false)
    }
}
