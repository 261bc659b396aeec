pub mod app_config;
pub mod config;
pub mod dates;
pub mod lexicon;
pub mod relevance;
pub mod schedule;
pub mod sources;
pub mod store;
pub mod tiers;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use dates::parse_published_at;
pub use lexicon::Lexicon;
pub use relevance::RelevanceFilter;
pub use sources::{descriptor, descriptors, SiteDescriptor};
pub use store::{ArticleRecord, ArticleStore, StoreError};
pub use tiers::{Tier, ACTIVE_SYMBOLS, HOT_SYMBOLS};
