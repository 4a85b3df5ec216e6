//! Configuration types

mod frontend_config;

pub use frontend_config::{FrontendConfig, SegmenterConfig};
