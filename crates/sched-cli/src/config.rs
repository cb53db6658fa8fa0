use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use sched_core::repository::DEFAULT_LIST_LIMIT;
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "sched.toml";
const ENV_PREFIX: &str = "TODO_";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the SQLite database file
    pub dbfile: String,
    /// Default number of tasks shown by `list`
    pub list_limit: u32,
    /// Fallback log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dbfile: "scheduler.db".to_string(),
            list_limit: DEFAULT_LIST_LIMIT,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Self::from_figment(Self::figment())
    }

    /// Defaults, then `sched.toml`, then `TODO_*` environment variables.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, figment::Error> {
        figment.extract()
    }
}
