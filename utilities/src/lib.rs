pub mod config;
pub mod http_source;
pub mod interpolation;
pub mod logging;
