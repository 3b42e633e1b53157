//! Data models for `nutrinet`

pub mod interaction;
pub mod network;
pub mod nutrient;

pub use interaction::{Interaction, Polarity, Strength};
pub use network::Network;
pub use nutrient::{Group, Nutrient};
