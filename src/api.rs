pub mod borsihind;
pub mod heartbeat;
pub mod price_source;
