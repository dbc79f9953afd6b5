pub mod classifier;
pub mod config;
pub mod contract;
pub mod core_service;
pub mod expression;
pub mod fuzzy;
pub mod logging;
pub mod model;
pub mod runtime;
pub mod session;
pub mod settings;
pub mod transport;
pub mod world_clock;
