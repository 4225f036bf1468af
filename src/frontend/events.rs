//! Drains controller events and renders them
//!
//! Runs after input dispatch each frame. Events are applied strictly in the
//! order the controller queued them, so a capture's despawn always lands
//! before the capturing piece's slide starts.

use super::layout::BoardLayout;
use super::overlays::{self, ChooserOverlay, GameOverOverlay, HintOverlay};
use super::pieces::{self, HandleSprites, PieceSprite};
use super::{BoardState, FrontendSettings};
use crate::game::BoardEvent;
use bevy::prelude::*;

#[allow(clippy::too_many_arguments)]
pub fn apply_board_events_system(
    mut commands: Commands,
    mut state: ResMut<BoardState>,
    mut sprites: ResMut<HandleSprites>,
    settings: Res<FrontendSettings>,
    layout: Res<BoardLayout>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut q_pieces: Query<&mut Sprite, With<PieceSprite>>,
    q_hints: Query<Entity, With<HintOverlay>>,
    q_chooser: Query<Entity, With<ChooserOverlay>>,
    q_game_over: Query<Entity, With<GameOverOverlay>>,
) {
    let events = state.controller.drain_events();
    if events.is_empty() {
        return;
    }
    let asset_dir = settings.0.piece_asset_dir.as_str();

    for event in events {
        match event {
            BoardEvent::HandleSpawned(handle) => pieces::spawn_piece(
                &mut commands,
                &asset_server,
                &mut sprites,
                &layout,
                asset_dir,
                &handle,
            ),
            BoardEvent::HandleDestroyed { handle, .. } => {
                pieces::despawn_piece(&mut commands, &mut sprites, handle)
            }
            BoardEvent::HandleRetextured { handle, piece } => {
                let sprite = sprites
                    .entities
                    .get(&handle)
                    .and_then(|&entity| q_pieces.get_mut(entity).ok());
                match sprite {
                    Some(mut sprite) => {
                        sprite.image = asset_server.load(pieces::texture_path(asset_dir, piece));
                    }
                    None => warn!("[REGISTRY] No sprite to retexture for handle {}", handle),
                }
            }
            BoardEvent::HandleMoved { handle, from, to } => pieces::start_slide(
                &mut commands,
                &sprites,
                &layout,
                settings.0.animation_secs,
                handle,
                from,
                to,
            ),
            BoardEvent::HintsShown(set) => {
                overlays::despawn_all(&mut commands, &q_hints);
                overlays::show_hints(&mut commands, &mut meshes, &mut materials, &layout, &set);
            }
            BoardEvent::HintsCleared => overlays::despawn_all(&mut commands, &q_hints),
            BoardEvent::PromotionChooserShown(chooser) => {
                overlays::show_chooser(&mut commands, &asset_server, &layout, asset_dir, &chooser)
            }
            BoardEvent::PromotionChooserDismissed => {
                overlays::despawn_all(&mut commands, &q_chooser)
            }
            BoardEvent::MoveCommitted(record) => {
                debug!("[MOVE] Rendering {}. {}", record.move_number, record.mv);
            }
            BoardEvent::MoveRejected { from, to, reason } => {
                debug!("[MOVE] {}{} rejected: {}", from, to, reason);
            }
            BoardEvent::PositionResynced { from, to, reason } => {
                warn!("[REGISTRY] {}{} resynced from engine: {}", from, to, reason);
            }
            BoardEvent::Check { side } => {
                debug!("[GAME] {} in check", side.name());
            }
            BoardEvent::Checkmate {
                winner,
                king_square,
                message,
                ..
            } => {
                overlays::despawn_all(&mut commands, &q_game_over);
                overlays::show_checkmate(&mut commands, &layout, winner, king_square, &message);
            }
        }
    }
}
