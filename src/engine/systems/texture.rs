//! Cover texture installation
//!
//! The cover image loads asynchronously. Until it arrives, or if it never
//! does, the front face keeps its flat colour.

use bevy::{asset::LoadState, prelude::*};

use crate::engine::resources::PendingCoverTexture;

pub fn install_cover_texture(
    mut commands: Commands,
    pending: Option<Res<PendingCoverTexture>>,
    asset_server: Res<AssetServer>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(pending) = pending else {
        return;
    };

    match asset_server.load_state(pending.image.id()) {
        LoadState::Loaded => {
            if let Some(material) = materials.get_mut(&pending.material) {
                material.base_color = Color::WHITE;
                material.base_color_texture = Some(pending.image.clone());
            }
            info!("Cover texture installed");
            commands.remove_resource::<PendingCoverTexture>();
        }
        LoadState::Failed(err) => {
            warn!("Cover texture unavailable, keeping flat front face: {err}");
            commands.remove_resource::<PendingCoverTexture>();
        }
        _ => {}
    }
}
