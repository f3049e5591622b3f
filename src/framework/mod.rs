pub mod config;
pub use config::Config;

pub mod db;
pub mod logging;
