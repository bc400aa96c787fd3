pub mod entry;
pub mod error;
pub mod interval;
pub mod plan;
pub mod refresher;
pub mod registry;
pub mod scheduler;
pub mod settings;
pub mod snapshot;
