use bevy::prelude::*;
use crate::shared::*;
use super::layout::{floor_area, BarnLayout};
use super::sales::is_valid_deal;

// ─────────────────────────────────────────────────────────────────────────────
// Visual configuration
//
// Closed dispatch over the animal enumeration: adding a kind without a
// visual is a compile error, not a runtime lookup miss.
// ─────────────────────────────────────────────────────────────────────────────

pub struct AnimalVisual {
    pub color: Color,
    /// Sprite footprint in grid units (smaller than the packing cell).
    pub width: f32,
    pub height: f32,
}

pub fn animal_visual(kind: AnimalKind) -> AnimalVisual {
    match kind {
        AnimalKind::Cow => AnimalVisual {
            color: Color::srgb(0.85, 0.85, 0.85),
            width: 1.6,
            height: 1.2,
        },
        AnimalKind::Sheep => AnimalVisual {
            color: Color::srgb(0.95, 0.95, 0.88),
            width: 1.4,
            height: 1.1,
        },
        AnimalKind::Chicken => AnimalVisual {
            color: Color::srgb(0.9, 0.85, 0.3),
            width: 0.8,
            height: 0.8,
        },
    }
}

/// Exterior backdrop art, keyed by biome. Cosmetic only.
pub fn biome_background(biome: Biome) -> &'static str {
    match biome {
        Biome::Basic => "sprites/backdrop_basic.png",
        Biome::Spring => "sprites/backdrop_spring.png",
        Biome::Desert => "sprites/backdrop_desert.png",
        Biome::Volcano => "sprites/backdrop_volcano.png",
    }
}

/// Building art and its footprint in grid units, per upgrade level.
pub fn barn_image(level: u8) -> (&'static str, Vec2) {
    match level.clamp(1, MAX_BARN_LEVEL) {
        1 => ("sprites/barn_level1.png", Vec2::new(10.0, 11.0)),
        2 => ("sprites/barn_level2.png", Vec2::new(12.0, 13.0)),
        _ => ("sprites/barn_level3.png", Vec2::new(14.0, 16.0)),
    }
}

/// World-space position of the floor area's top-left corner. The building
/// art is centered on the origin; the floor offset is measured from its
/// top-left corner in grid units.
pub fn floor_world_origin(level: u8) -> Vec2 {
    let (_, size) = barn_image(level);
    let floor = floor_area(level);
    let top_left = Vec2::new(-size.x / 2.0 * GRID_SIZE, size.y / 2.0 * GRID_SIZE);
    top_left + Vec2::new(floor.x * GRID_SIZE, -floor.y * GRID_SIZE)
}

// ─────────────────────────────────────────────────────────────────────────────
// Markers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Component, Debug)]
pub struct BarnBackdrop;

#[derive(Component, Debug)]
pub struct BarnBuilding {
    pub level: u8,
}

/// One sprite per laid-out animal.
#[derive(Component, Debug)]
pub struct BarnAnimalSprite {
    pub id: AnimalId,
}

/// The feed trough object at the top-center of the barn.
#[derive(Component, Debug)]
pub struct FeedTrough;

// ─────────────────────────────────────────────────────────────────────────────
// Scene setup
// ─────────────────────────────────────────────────────────────────────────────

pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Spawns the static parts of the scene once, after loading finishes.
/// Animal sprites are handled separately by [`sync_animal_sprites`].
pub fn spawn_barn_scene(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    barn: Res<BarnState>,
    island: Res<IslandState>,
) {
    commands.spawn((
        BarnBackdrop,
        Sprite {
            image: asset_server.load(biome_background(island.biome)),
            custom_size: Some(Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));

    let (image, size) = barn_image(barn.level);
    commands.spawn((
        BarnBuilding { level: barn.level },
        Sprite {
            image: asset_server.load(image),
            custom_size: Some(size * GRID_SIZE),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 1.0),
    ));

    // Trough sits against the back wall, centered.
    let trough_y = size.y / 2.0 * GRID_SIZE - 1.5 * GRID_SIZE;
    commands.spawn((
        FeedTrough,
        Sprite {
            image: asset_server.load("sprites/feed_trough.png"),
            custom_size: Some(Vec2::new(3.0 * GRID_SIZE, 1.5 * GRID_SIZE)),
            ..default()
        },
        Transform::from_xyz(0.0, trough_y, 2.0),
    ));

    info!("[Barn/Render] Scene spawned at level {}", barn.level);
}

/// Re-picks the backdrop art when the island biome changes (after a load).
pub fn update_backdrop(
    asset_server: Res<AssetServer>,
    island: Res<IslandState>,
    mut backdrops: Query<&mut Sprite, With<BarnBackdrop>>,
) {
    if !island.is_changed() {
        return;
    }
    if let Ok(mut sprite) = backdrops.get_single_mut() {
        sprite.image = asset_server.load(biome_background(island.biome));
    }
}

/// Swaps the building art (and re-seats the trough) after an upgrade.
pub fn update_building_sprite(
    asset_server: Res<AssetServer>,
    barn: Res<BarnState>,
    mut buildings: Query<(&mut BarnBuilding, &mut Sprite), Without<FeedTrough>>,
    mut troughs: Query<&mut Transform, With<FeedTrough>>,
) {
    let Ok((mut building, mut sprite)) = buildings.get_single_mut() else {
        return;
    };
    if building.level == barn.level {
        return;
    }

    let (image, size) = barn_image(barn.level);
    sprite.image = asset_server.load(image);
    sprite.custom_size = Some(size * GRID_SIZE);
    building.level = barn.level;

    if let Ok(mut trough) = troughs.get_single_mut() {
        trough.translation.y = size.y / 2.0 * GRID_SIZE - 1.5 * GRID_SIZE;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Animal sprite sync
//
// Runs only when the cached layout actually recomputed (resource change
// detection): a skipped refresh re-renders nothing.
// ─────────────────────────────────────────────────────────────────────────────

pub fn sync_animal_sprites(
    mut commands: Commands,
    barn: Res<BarnState>,
    layout: Res<BarnLayout>,
    existing: Query<Entity, With<BarnAnimalSprite>>,
) {
    for entity in &existing {
        commands.entity(entity).despawn_recursive();
    }

    let origin = floor_world_origin(barn.level);
    for entry in &layout.entries {
        let visual = animal_visual(entry.animal.kind);
        let center = entry.coordinates
            + Vec2::new(BARN_CELL_WIDTH / 2.0, BARN_CELL_HEIGHT / 2.0);
        let world = origin + Vec2::new(center.x * GRID_SIZE, -center.y * GRID_SIZE);

        let color = if entry.animal.is_sick() {
            // Sickly green cast.
            Color::srgb(0.55, 0.7, 0.5)
        } else {
            visual.color
        };

        // Lower rows draw in front of higher ones.
        let z = 3.0 + entry.coordinates.y * 0.01;

        commands.spawn((
            BarnAnimalSprite {
                id: entry.animal.id,
            },
            Sprite {
                color,
                custom_size: Some(Vec2::new(
                    visual.width * GRID_SIZE,
                    visual.height * GRID_SIZE,
                )),
                ..default()
            },
            Transform::from_xyz(world.x, world.y, z),
        ));
    }
}

/// Applies the Deal-Active visual treatment: the building dims to half
/// opacity and animals that fail the deal's validity predicate fade out.
/// Everything returns to full opacity when the deal clears.
pub fn apply_deal_overlay(
    deal: Res<ActiveDeal>,
    barn: Res<BarnState>,
    mut animals: Query<(&BarnAnimalSprite, &mut Sprite), Without<BarnBuilding>>,
    mut buildings: Query<&mut Sprite, With<BarnBuilding>>,
) {
    if let Ok(mut sprite) = buildings.get_single_mut() {
        let alpha = if deal.0.is_some() { 0.5 } else { 1.0 };
        sprite.color = sprite.color.with_alpha(alpha);
    }

    for (marker, mut sprite) in &mut animals {
        let alpha = match (&deal.0, barn.animals.get(&marker.id)) {
            (Some(bounty), Some(animal)) if !is_valid_deal(animal, bounty) => 0.5,
            _ => 1.0,
        };
        sprite.color = sprite.color.with_alpha(alpha);
    }
}
