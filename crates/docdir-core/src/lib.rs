pub mod cities;
pub mod config;
pub mod records;

pub use cities::{load_cities, parse_cities, targets_for, CityMap, SearchTarget};
pub use config::{load_crawl_config, load_crawl_config_from_env, CrawlConfig};
pub use records::{
    District, ListingEntry, ProfileDetail, QaEntry, Record, Review, Service, SocialLink,
};

use thiserror::Error;

/// Fatal startup conditions: the crawl never begins when one of these fires.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read cities file {path}: {source}")]
    CitiesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cities file is not a city → URL map: {0}")]
    CitiesFileParse(#[from] serde_json::Error),

    #[error("cities file contains no entries")]
    EmptyCities,

    #[error("unknown city: \"{0}\"")]
    UnknownCity(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
