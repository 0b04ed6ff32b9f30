//! Domain entities - core business objects

mod identity;
mod role;

pub use identity::{DiscordIdentity, DISCORD_CDN};
pub use role::Role;
