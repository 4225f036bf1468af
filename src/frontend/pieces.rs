//! Piece sprites and slide tweens
//!
//! One sprite entity per registry handle, tracked in [`HandleSprites`].
//! Textures are `<piece_asset_dir>/<key>.png` with keys like `wp` or `bk`.

use super::layout::{BoardLayout, Z_PIECE};
use crate::game::registry::{HandleId, PieceHandle};
use crate::game::types::{Piece, Square};
use bevy::math::curve::{Curve, EaseFunction};
use bevy::prelude::*;
use std::collections::HashMap;

/// Handle id -> sprite entity
#[derive(Resource, Default, Debug)]
pub struct HandleSprites {
    pub entities: HashMap<HandleId, Entity>,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct PieceSprite {
    pub handle: HandleId,
}

/// Eased slide between two squares
#[derive(Component, Debug, Clone, Copy)]
pub struct SlideTween {
    pub start: Vec3,
    pub end: Vec3,
    pub elapsed: f32,
    pub duration: f32,
}

impl SlideTween {
    /// Position at the current progress, eased out
    pub fn sample(&self) -> Vec3 {
        if self.duration <= 0.0 {
            return self.end;
        }
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        let eased = EaseFunction::QuadraticOut.sample_clamped(t);
        self.start.lerp(self.end, eased)
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

pub fn texture_path(asset_dir: &str, piece: Piece) -> String {
    format!("{}/{}.png", asset_dir, piece.texture_key())
}

pub fn spawn_piece(
    commands: &mut Commands,
    asset_server: &AssetServer,
    sprites: &mut HandleSprites,
    layout: &BoardLayout,
    asset_dir: &str,
    handle: &PieceHandle,
) {
    let entity = commands
        .spawn((
            Sprite {
                image: asset_server.load(texture_path(asset_dir, handle.piece)),
                custom_size: Some(Vec2::splat(layout.tile_size)),
                ..default()
            },
            Transform::from_translation(layout.square_translation(handle.square, Z_PIECE)),
            PieceSprite { handle: handle.id },
            Name::new(format!("Piece {} {}", handle.piece.texture_key(), handle.square)),
        ))
        .id();
    if let Some(stale) = sprites.entities.insert(handle.id, entity) {
        warn!("[REGISTRY] Handle {} already had a sprite, replacing", handle.id);
        commands.entity(stale).despawn();
    }
}

pub fn despawn_piece(commands: &mut Commands, sprites: &mut HandleSprites, handle: HandleId) {
    match sprites.entities.remove(&handle) {
        Some(entity) => commands.entity(entity).despawn(),
        None => warn!("[REGISTRY] No sprite for destroyed handle {}", handle),
    }
}

pub fn start_slide(
    commands: &mut Commands,
    sprites: &HandleSprites,
    layout: &BoardLayout,
    duration: f32,
    handle: HandleId,
    from: Square,
    to: Square,
) {
    let Some(&entity) = sprites.entities.get(&handle) else {
        warn!("[REGISTRY] No sprite for moved handle {}", handle);
        return;
    };
    commands.entity(entity).insert(SlideTween {
        start: layout.square_translation(from, Z_PIECE),
        end: layout.square_translation(to, Z_PIECE),
        elapsed: 0.0,
        duration,
    });
}

pub fn slide_tween_system(
    mut commands: Commands,
    time: Res<Time>,
    mut q_tweens: Query<(Entity, &mut Transform, &mut SlideTween)>,
) {
    for (entity, mut transform, mut tween) in q_tweens.iter_mut() {
        tween.elapsed += time.delta_secs();
        transform.translation = tween.sample();
        if tween.finished() {
            commands.entity(entity).remove::<SlideTween>();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::{PieceColor, PieceKind};

    #[test]
    fn test_texture_path() {
        let piece = Piece::new(PieceKind::Knight, PieceColor::Black);
        assert_eq!(texture_path("pieces", piece), "pieces/bn.png");
    }

    #[test]
    fn test_slide_endpoints() {
        let mut tween = SlideTween {
            start: Vec3::ZERO,
            end: Vec3::new(80.0, 0.0, 1.0),
            elapsed: 0.0,
            duration: 0.2,
        };
        assert_eq!(tween.sample(), Vec3::ZERO);
        tween.elapsed = 0.1;
        // ease-out is past the midpoint at half time
        assert!(tween.sample().x > 40.0);
        tween.elapsed = 0.5;
        assert_eq!(tween.sample(), tween.end);
        assert!(tween.finished());
    }

    #[test]
    fn test_zero_duration_snaps() {
        let tween = SlideTween {
            start: Vec3::ZERO,
            end: Vec3::ONE,
            elapsed: 0.0,
            duration: 0.0,
        };
        assert_eq!(tween.sample(), Vec3::ONE);
        assert!(tween.finished());
    }
}
