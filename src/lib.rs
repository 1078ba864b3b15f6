pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliArgs;

pub use adapters::{RemoteChartEngine, StaticChartEngine};
pub use config::AppConfig;
pub use core::engine::HdTypeEngine;
pub use domain::model::{BirthRequest, CanonicalInstant, Classification, HdTypeResponse};
pub use utils::error::{HdError, Result};
