use bevy::prelude::*;
use std::collections::BTreeMap;

use crate::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Floor areas
// ─────────────────────────────────────────────────────────────────────────────

/// Walkable floor rectangle inside the building, in grid units.
/// `x`/`y` offset from the building art's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorArea {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Floor bounds per upgrade level. Out-of-range levels clamp into 1..=3.
pub fn floor_area(level: u8) -> FloorArea {
    match level.clamp(1, MAX_BARN_LEVEL) {
        1 => FloorArea {
            x: 2.0,
            y: 5.0,
            width: 6.0,
            height: 5.0,
        },
        2 => FloorArea {
            x: 2.0,
            y: 6.0,
            width: 8.0,
            height: 6.0,
        },
        _ => FloorArea {
            x: 1.0,
            y: 7.0,
            width: 10.0,
            height: 8.0,
        },
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sort order
//
// Animals group by kind (lexicographic on the kind name), then by experience
// descending within a kind. `sort_by` is stable and the BTreeMap iterates in
// ascending-id (= creation) order, so ties keep their relative order: the
// arrangement only shifts when animals are added or removed.
// ─────────────────────────────────────────────────────────────────────────────

pub fn sorted_animal_ids(animals: &BTreeMap<AnimalId, Animal>) -> Vec<AnimalId> {
    let mut order: Vec<&Animal> = animals.values().collect();
    order.sort_by(|a, b| {
        if a.kind == b.kind {
            b.experience.cmp(&a.experience)
        } else {
            a.kind.name().cmp(b.kind.name())
        }
    });
    order.into_iter().map(|animal| animal.id).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Grid packing
// ─────────────────────────────────────────────────────────────────────────────

/// An animal snapshot placed on the floor. `coordinates` is the top-left of
/// its cell in grid units, relative to the floor origin. Ephemeral: rebuilt
/// by [`BarnLayout::refresh`], never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEntry {
    pub animal: Animal,
    pub coordinates: Vec2,
}

/// Wraps the sorted sequence into rows bounded by the floor width. Each
/// animal takes one reference cell; rows are separated by an extra half
/// grid unit. A floor narrower than one cell still packs a single column
/// rather than dividing by zero. Vertical overflow is not clamped: extra
/// rows extend below the visual floor.
pub fn pack_animals(
    order: &[AnimalId],
    animals: &BTreeMap<AnimalId, Animal>,
    floor_width: f32,
) -> Vec<LayoutEntry> {
    let cols = ((floor_width / BARN_CELL_WIDTH).floor() as usize).max(1);

    order
        .iter()
        .filter_map(|id| animals.get(id))
        .enumerate()
        .map(|(index, animal)| {
            let row = index / cols;
            let col = index % cols;
            LayoutEntry {
                animal: animal.clone(),
                coordinates: Vec2::new(
                    col as f32 * BARN_CELL_WIDTH,
                    row as f32 * (BARN_CELL_HEIGHT + VERTICAL_ROW_GAP),
                ),
            }
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Cached layout
//
// The layout is derived state. It recomputes only when one of its declared
// dependency signals changes: animal count, sick-animal count, or floor
// width. Experience gain on existing animals does NOT re-sort the floor;
// the stale arrangement is kept on purpose until a structural event, so the
// barn doesn't shuffle under the player every time an animal levels.
// ─────────────────────────────────────────────────────────────────────────────

/// The dependency tuple the cache is keyed on, compared by value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutKey {
    pub animal_count: usize,
    pub sick_count: usize,
    pub floor_width: f32,
}

impl LayoutKey {
    pub fn of(animals: &BTreeMap<AnimalId, Animal>, floor_width: f32) -> Self {
        Self {
            animal_count: animals.len(),
            sick_count: animals.values().filter(|a| a.is_sick()).count(),
            floor_width,
        }
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct BarnLayout {
    key: Option<LayoutKey>,
    pub entries: Vec<LayoutEntry>,
}

impl BarnLayout {
    pub fn is_stale(&self, animals: &BTreeMap<AnimalId, Animal>, floor_width: f32) -> bool {
        self.key != Some(LayoutKey::of(animals, floor_width))
    }

    /// Recomputes the placement if a dependency signal changed. Returns
    /// whether a recompute happened; on `false` the entries are untouched.
    pub fn refresh(&mut self, animals: &BTreeMap<AnimalId, Animal>, floor_width: f32) -> bool {
        let key = LayoutKey::of(animals, floor_width);
        if self.key == Some(key) {
            return false;
        }
        let order = sorted_animal_ids(animals);
        self.entries = pack_animals(&order, animals, floor_width);
        self.key = Some(key);
        true
    }

    /// Entry whose cell contains `point` (floor-relative grid units).
    pub fn entry_at(&self, point: Vec2) -> Option<&LayoutEntry> {
        self.entries.iter().find(|entry| {
            point.x >= entry.coordinates.x
                && point.x < entry.coordinates.x + BARN_CELL_WIDTH
                && point.y >= entry.coordinates.y
                && point.y < entry.coordinates.y + BARN_CELL_HEIGHT
        })
    }
}

/// Keeps [`BarnLayout`] in sync with the store. The stale check reads
/// through `Deref`, so frames without a qualifying change leave the
/// resource's change tick untouched and sprite sync downstream is skipped.
pub fn refresh_barn_layout(barn: Res<BarnState>, mut layout: ResMut<BarnLayout>) {
    let width = floor_area(barn.level).width;
    if layout.is_stale(&barn.animals, width) {
        layout.refresh(&barn.animals, width);
    }
}
