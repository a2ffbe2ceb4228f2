pub mod amount;
pub mod chain;
pub mod network;
pub mod session;
pub mod wallet;
