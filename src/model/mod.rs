pub mod dimension;
pub mod metrics;
pub mod profile;
pub mod scores;
