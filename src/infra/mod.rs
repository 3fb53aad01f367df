//! Инфраструктурный слой вокруг покерного движка:
//! - RNG-реализации для движка;
//! - загрузка конфига стола из JSON.

pub mod config;
pub mod rng;

pub use config::{config_from_json, config_to_json, load_config, ConfigError};
pub use rng::{DeterministicRng, SystemRng};
