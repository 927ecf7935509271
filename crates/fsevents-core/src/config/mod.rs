//! Configuration for the ingest pipeline.
//! TOML-based, layered: CLI > env > project > user > defaults.

pub mod catalog_config;
pub mod decoder_config;
pub mod fsevents_config;
pub mod locator_config;
pub mod scratch_config;

pub use catalog_config::CatalogConfig;
pub use decoder_config::DecoderConfig;
pub use fsevents_config::{CliOverrides, FsEventsConfig};
pub use locator_config::LocatorConfig;
pub use scratch_config::ScratchConfig;
