pub mod app_config;
pub mod config;
pub mod error;
pub mod provinces;
pub mod stores;

pub use app_config::{AppConfig, ClassifierThresholds, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, DatasetError};
pub use provinces::{load_provinces, ProvinceCatalog, ProvinceConfig};
pub use stores::{load_dataset, parse_dataset, Coordinate, LatLng, StoreRecord};
