//! Selection highlight, move hints, promotion chooser and game-over overlays

use super::layout::{BoardLayout, Z_BANNER, Z_CHOOSER, Z_HIGHLIGHT, Z_HINT};
use super::pieces::texture_path;
use crate::game::hints::{HintGlyph, HintSet};
use crate::game::promotion::ChooserLayout;
use crate::game::types::{Piece, PieceColor, Square};
use bevy::prelude::*;

const HIGHLIGHT_COLOR: Color = Color::srgba(0.97, 0.97, 0.41, 0.8);
const HINT_COLOR: Color = Color::srgba(0.0, 0.0, 0.0, 0.25);
const CHOOSER_BACKGROUND: Color = Color::srgba(1.0, 1.0, 1.0, 0.95);
const FLAG_COLOR: Color = Color::srgb(0.85, 0.1, 0.1);

/// Marker for the selected-square highlight and its move hints
#[derive(Component)]
pub struct HintOverlay;

#[derive(Component)]
pub struct ChooserOverlay;

#[derive(Component)]
pub struct GameOverOverlay;

/// Geometry of one hint glyph relative to its square centre
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GlyphShape {
    Disc { offset: Vec2, radius: f32 },
    Ring { inner: f32, outer: f32 },
}

/// Shapes drawn for `glyph` on a tile of `tile` pixels
pub fn glyph_shapes(glyph: HintGlyph, tile: f32) -> Vec<GlyphShape> {
    match glyph {
        HintGlyph::Dot => vec![GlyphShape::Disc {
            offset: Vec2::ZERO,
            radius: tile / 4.0,
        }],
        HintGlyph::Ring => {
            let outer = tile * 0.42;
            vec![GlyphShape::Ring {
                inner: outer - tile / 10.0,
                outer,
            }]
        }
        HintGlyph::DoubleDot => [-1.0, 1.0]
            .into_iter()
            .map(|side| GlyphShape::Disc {
                offset: Vec2::new(side * tile / 6.0, 0.0),
                radius: tile / 8.0,
            })
            .collect(),
    }
}

pub fn show_hints(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<ColorMaterial>,
    layout: &BoardLayout,
    set: &HintSet,
) {
    commands.spawn((
        Sprite::from_color(HIGHLIGHT_COLOR, Vec2::splat(layout.tile_size)),
        Transform::from_translation(layout.square_translation(set.selected, Z_HIGHLIGHT)),
        HintOverlay,
        Name::new("Selection Highlight"),
    ));

    let material = materials.add(ColorMaterial::from(HINT_COLOR));
    for marker in &set.markers {
        let centre = layout.square_center(marker.square);
        for shape in glyph_shapes(marker.glyph, layout.tile_size) {
            let (mesh, offset) = match shape {
                GlyphShape::Disc { offset, radius } => (meshes.add(Circle::new(radius)), offset),
                GlyphShape::Ring { inner, outer } => {
                    (meshes.add(Annulus::new(inner, outer)), Vec2::ZERO)
                }
            };
            commands.spawn((
                Mesh2d(mesh),
                MeshMaterial2d(material.clone()),
                Transform::from_translation((centre + offset).extend(Z_HINT)),
                HintOverlay,
                Name::new(format!("Move Hint {}", marker.square)),
            ));
        }
    }
}

pub fn show_chooser(
    commands: &mut Commands,
    asset_server: &AssetServer,
    layout: &BoardLayout,
    asset_dir: &str,
    chooser: &ChooserLayout,
) {
    for option in &chooser.options {
        let translation = layout.square_translation(option.square, Z_CHOOSER);
        commands.spawn((
            Sprite::from_color(CHOOSER_BACKGROUND, Vec2::splat(layout.tile_size)),
            Transform::from_translation(translation),
            ChooserOverlay,
            Name::new(format!("Chooser Cell {}", option.square)),
        ));
        commands.spawn((
            Sprite {
                image: asset_server.load(texture_path(
                    asset_dir,
                    Piece::new(option.kind, chooser.color),
                )),
                custom_size: Some(Vec2::splat(layout.tile_size)),
                ..default()
            },
            Transform::from_translation(translation + Vec3::Z * 0.1),
            ChooserOverlay,
            Name::new(format!("Chooser {:?}", option.kind)),
        ));
    }
}

pub fn show_checkmate(
    commands: &mut Commands,
    layout: &BoardLayout,
    winner: PieceColor,
    king_square: Option<Square>,
    message: &str,
) {
    if let Some(square) = king_square {
        let flag_size = Vec2::new(layout.tile_size * 0.3, layout.tile_size * 0.2);
        let offset = Vec2::new(layout.tile_size * 0.25, layout.tile_size * 0.3);
        commands.spawn((
            Sprite::from_color(FLAG_COLOR, flag_size),
            Transform::from_translation((layout.square_center(square) + offset).extend(Z_BANNER)),
            GameOverOverlay,
            Name::new(format!("Checkmate Flag {}", square)),
        ));
    }

    let text_color = match winner {
        PieceColor::White => Color::WHITE,
        PieceColor::Black => Color::BLACK,
    };
    commands.spawn((
        Sprite::from_color(
            Color::srgba(0.5, 0.5, 0.5, 0.85),
            Vec2::new(layout.tile_size * 6.0, layout.tile_size),
        ),
        Transform::from_translation(Vec3::new(0.0, 0.0, Z_BANNER)),
        GameOverOverlay,
        Name::new("Checkmate Banner"),
    ));
    commands.spawn((
        Text2d::new(message),
        TextFont {
            font_size: layout.tile_size * 0.45,
            ..default()
        },
        TextColor(text_color),
        Transform::from_translation(Vec3::new(0.0, 0.0, Z_BANNER + 0.1)),
        GameOverOverlay,
        Name::new("Checkmate Message"),
    ));
}

pub fn despawn_all<T: Component>(commands: &mut Commands, entities: &Query<Entity, With<T>>) {
    for entity in entities.iter() {
        commands.entity(entity).despawn();
    }
}
