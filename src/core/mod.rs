pub mod config;
pub mod converter;
pub mod emitter;
pub mod labels;
pub mod memory_estimator;
pub mod mode;
pub mod record;
pub mod sink;
pub mod source;
pub mod stats;
pub mod store;
