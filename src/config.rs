use serde::Deserialize;
use std::env;

use crate::domain::order::BusinessRules;
use crate::export::ExportConfig;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessorConfig {
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub rules: BusinessRules,
}

impl ProcessorConfig {
    /// Layered load: `config/default`, `config/{RUN_MODE}`, then
    /// `ORDER_PROCESSOR__*` environment variables. Every layer is optional.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Eg. `ORDER_PROCESSOR__EXPORT__DIRECTORY=/tmp/out`
            .add_source(
                config::Environment::with_prefix("ORDER_PROCESSOR")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        s.try_deserialize()
    }
}
