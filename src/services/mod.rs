pub mod chat_bridge;
pub mod views;
pub mod wallet_store;

pub use chat_bridge::{ChatBridge, ChatError, ChatMessage};
pub use wallet_store::WalletStore;
