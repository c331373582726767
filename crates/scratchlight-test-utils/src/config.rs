//! Configuration builders for tests.
//!
//! Use [`TestConfigBuilder`] to create customised [`AppConfig`] values
//! without repeating boilerplate across crate boundaries.

use scratchlight_config::AppConfig;

/// Fluent builder for [`AppConfig`] in tests.
///
/// # Example
///
/// ```ignore
/// let config = TestConfigBuilder::new()
///     .endpoint("http://127.0.0.1:8080/")
///     .interval_ms(100)
///     .build();
/// ```
pub struct TestConfigBuilder {
    config: AppConfig,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn endpoint(mut self, endpoint: &str) -> Self {
        self.config.api.endpoint = endpoint.to_string();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.api.timeout_secs = secs;
        self
    }

    pub fn user_agent(mut self, agent: &str) -> Self {
        self.config.api.user_agent = agent.to_string();
        self
    }

    pub fn default_limit(mut self, limit: u32) -> Self {
        self.config.search.default_limit = limit;
        self
    }

    pub fn interval_ms(mut self, ms: u64) -> Self {
        self.config.spotlight.interval_ms = ms;
        self
    }

    pub fn log_level(mut self, level: &str) -> Self {
        self.config.logging.level = level.to_string();
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
