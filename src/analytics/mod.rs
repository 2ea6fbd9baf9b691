pub mod account;
pub mod aggregator;
pub mod arbitrage;
pub mod chart;
pub mod format;
