pub mod config;
pub mod params;
pub mod policy;
pub mod sweeper;
pub mod types;
pub mod utils;
