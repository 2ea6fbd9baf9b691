pub mod client;
pub mod types;

pub use client::{ReyaClient, ReyaClientError, EXECUTIONS_LIMIT};
pub use types::{CandleHistory, ExecutionsPage, IncentivesResponse};
