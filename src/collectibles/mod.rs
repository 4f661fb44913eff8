use bevy::prelude::*;
use crate::shared::*;

mod tooltip;
pub use tooltip::*;

// ─────────────────────────────────────────────────────────────────────────────
// Collectibles
//
// Purely decorative sprites. Their only behavior is the name popover on
// hover. The closed enum replaces a runtime component-lookup table: a new
// collectible without a title or footprint refuses to compile.
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collectible {
    FarmerBear,
    HumanBanner,
    SplendorFlag,
    ToxicTuft,
}

impl Collectible {
    pub fn title(self) -> &'static str {
        match self {
            Collectible::FarmerBear => "Farmer Bear",
            Collectible::HumanBanner => "Human War Banner",
            Collectible::SplendorFlag => "Splendor Flag",
            Collectible::ToxicTuft => "Toxic Tuft",
        }
    }

    pub fn asset_path(self) -> &'static str {
        match self {
            Collectible::FarmerBear => "sprites/farmer_bear.png",
            Collectible::HumanBanner => "sprites/human_banner.png",
            Collectible::SplendorFlag => "sprites/splendor_flag.png",
            Collectible::ToxicTuft => "sprites/toxic_tuft.png",
        }
    }

    /// Sprite footprint in grid units.
    pub fn footprint(self) -> Vec2 {
        match self {
            Collectible::FarmerBear => Vec2::new(1.0, 1.0),
            Collectible::HumanBanner => Vec2::new(1.0, 2.0),
            Collectible::SplendorFlag => Vec2::new(1.0, 2.0),
            Collectible::ToxicTuft => Vec2::new(1.5, 1.5),
        }
    }
}

/// Fixed decoration spots around the building.
const PLACEMENTS: [(Collectible, Vec2); 4] = [
    (Collectible::FarmerBear, Vec2::new(-10.0, -4.0)),
    (Collectible::HumanBanner, Vec2::new(-8.0, 4.0)),
    (Collectible::SplendorFlag, Vec2::new(9.0, 5.0)),
    (Collectible::ToxicTuft, Vec2::new(10.0, -4.5)),
];

pub fn spawn_collectibles(mut commands: Commands, asset_server: Res<AssetServer>) {
    for (collectible, position) in PLACEMENTS {
        commands.spawn((
            collectible,
            Sprite {
                image: asset_server.load(collectible.asset_path()),
                custom_size: Some(collectible.footprint() * GRID_SIZE),
                ..default()
            },
            Transform::from_xyz(position.x * GRID_SIZE, position.y * GRID_SIZE, 2.0),
        ));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Plugin
// ─────────────────────────────────────────────────────────────────────────────

pub struct CollectiblesPlugin;

impl Plugin for CollectiblesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HoveredCollectible>()
            .add_systems(Startup, spawn_tooltip_popover)
            .add_systems(OnExit(GameState::Loading), spawn_collectibles)
            .add_systems(
                Update,
                (track_collectible_hover, update_tooltip_popover).chain(),
            );
    }
}
