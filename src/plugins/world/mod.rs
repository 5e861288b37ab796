//! World plugin: terrain, a moving platform and the kill/win zones.
//!
//! The terrain is one static body with a child collider per tile. Its
//! `SurfaceEligibility` decides which tiles the hook may grab: stone can be hooked,
//! metal cannot.

use std::f32::consts::TAU;

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState};
use crate::plugins::grapple::eligibility::{
    SurfaceEligibility, TileCatalog, TileData, TileDataItem, TileKind,
};

pub mod zones;

pub const STONE: TileKind = TileKind(1);
pub const METAL: TileKind = TileKind(2);

/// Tile edge length in meters.
pub const TILE_SIZE: f32 = 1.0;

/// Top row first. `#` stone, `M` metal, anything else empty.
const LEVEL: &[&str] = &[
    "########################################",
    "#......................................#",
    "#......................................#",
    "#.......MMMM..............#####........#",
    "#......................................#",
    "#......................................#",
    "#.................######...............#",
    "#......................................#",
    "#......................................#",
    "#..........MMMMM.......................#",
    "#......................................#",
    "#......................................#",
    "#......................................#",
    "#......................................#",
    "#......................................#",
    "#.....................................M#",
    "#.....................................M#",
    "#######........................#########",
    "#######........................#########",
];

#[derive(Component)]
pub struct Terrain;

/// Kinematic body oscillating around `origin`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct MovingPlatform {
    pub origin: Vec2,
    pub amplitude: Vec2,
    /// Seconds per full cycle.
    pub period: f32,
}

impl MovingPlatform {
    /// Velocity at `t` seconds for the path `origin + amplitude * sin(2πt / period)`.
    pub fn velocity_at(&self, t: f32) -> Vec2 {
        if self.period <= 0.0 {
            return Vec2::ZERO;
        }
        let w = TAU / self.period;
        self.amplitude * w * (w * t).cos()
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), (spawn_terrain, spawn_platform));
    app.add_systems(
        FixedUpdate,
        drive_platforms.run_if(in_state(GameState::InGame)),
    );
    zones::plugin(app);
}

/// Cells of an ASCII layout, `rows[0]` being the top row. Cell `(0, 0)` is the bottom-left.
pub fn parse_layout(rows: &[&str]) -> Vec<(IVec2, TileKind)> {
    let height = rows.len() as i32;
    rows.iter()
        .enumerate()
        .flat_map(|(row, line)| {
            let y = height - 1 - row as i32;
            line.chars().enumerate().filter_map(move |(x, c)| {
                let kind = match c {
                    '#' => STONE,
                    'M' => METAL,
                    _ => return None,
                };
                Some((IVec2::new(x as i32, y), kind))
            })
        })
        .collect()
}

pub fn tile_catalog() -> TileCatalog {
    TileCatalog::authored([
        TileDataItem {
            kind: STONE,
            data: TileData { can_hook: true },
        },
        TileDataItem {
            kind: METAL,
            data: TileData { can_hook: false },
        },
    ])
}

fn tile_color(kind: TileKind) -> Color {
    match kind {
        METAL => Color::srgb(0.45, 0.5, 0.58),
        _ => Color::srgb(0.25, 0.27, 0.33),
    }
}

#[inline]
pub fn world_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::World, [Layer::Player, Layer::Hook])
}

fn spawn_terrain(mut commands: Commands) {
    let cells = parse_layout(LEVEL);
    let eligibility = cells.iter().fold(
        SurfaceEligibility::new(Vec2::splat(TILE_SIZE), tile_catalog()),
        |surface, (cell, kind)| surface.with_tile(*cell, *kind),
    );

    commands
        .spawn((
            Name::new("Terrain"),
            Terrain,
            eligibility,
            Transform::default(),
            Visibility::default(),
            RigidBody::Static,
            DespawnOnExit(GameState::InGame),
        ))
        .with_children(|terrain| {
            for (cell, kind) in &cells {
                let center = (cell.as_vec2() + Vec2::splat(0.5)) * TILE_SIZE;
                terrain.spawn((
                    Sprite::from_color(tile_color(*kind), Vec2::splat(TILE_SIZE)),
                    Transform::from_translation(center.extend(0.0)),
                    Collider::rectangle(TILE_SIZE, TILE_SIZE),
                    world_layers(),
                ));
            }
        });

    debug!("terrain spawned with {} tiles", cells.len());
}

fn spawn_platform(mut commands: Commands) {
    let platform = MovingPlatform {
        origin: Vec2::new(19.5, 9.0),
        amplitude: Vec2::new(7.0, 0.0),
        period: 8.0,
    };
    let size = Vec2::new(3.0, 0.5);

    commands.spawn((
        Name::new("MovingPlatform"),
        platform,
        Sprite::from_color(Color::srgb(0.55, 0.4, 0.25), size),
        Transform::from_translation(platform.origin.extend(0.0)),
        RigidBody::Kinematic,
        Collider::rectangle(size.x, size.y),
        world_layers(),
        LinearVelocity::ZERO,
        DespawnOnExit(GameState::InGame),
    ));
}

fn drive_platforms(
    time: Res<Time<Fixed>>,
    mut q: Query<(&MovingPlatform, &mut LinearVelocity)>,
) {
    let t = time.elapsed_secs();
    for (platform, mut vel) in &mut q {
        vel.0 = platform.velocity_at(t);
    }
}

#[cfg(test)]
mod tests;
