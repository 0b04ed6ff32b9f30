//! Entity to DTO mappers

use tracker_core::{DiscordIdentity, Role};

use super::responses::MeResponse;

impl MeResponse {
    /// Profile view of an identity under the given role
    pub fn new(identity: &DiscordIdentity, role: Role) -> Self {
        Self {
            id: identity.id.to_string(),
            username: identity.username.clone(),
            global_name: identity.global_name.clone(),
            discriminator: identity.discriminator.clone(),
            avatar: identity.avatar.clone(),
            avatar_url: identity.avatar_url(),
            display_name: identity.display_name(),
            role,
        }
    }
}
