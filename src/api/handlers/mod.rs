pub mod arbitrage;
pub mod chart;
pub mod chat;
pub mod health;
pub mod markets;
pub mod metrics;
pub mod panels;
pub mod wallet;
