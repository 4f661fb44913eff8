//! Shared components, resources, events, and states for Mossvale.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

/// Scene/overlay states. The deal overlay is NOT a state; it is driven by
/// the [`ActiveDeal`] resource so the barn keeps rendering underneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Barn,
    Exchange,
    Upgrade,
    ConfirmSale,
}

// ═══════════════════════════════════════════════════════════════════════
// ISLAND / BIOME
// ═══════════════════════════════════════════════════════════════════════

/// Cosmetic environment classification. Affects background art only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Biome {
    #[default]
    Basic,
    Spring,
    Desert,
    Volcano,
}

#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct IslandState {
    pub biome: Biome,
}

// ═══════════════════════════════════════════════════════════════════════
// ANIMALS
// ═══════════════════════════════════════════════════════════════════════

/// Unique, stable for the animal's lifetime. Assigned monotonically by the
/// store, so ascending id order is creation order.
pub type AnimalId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimalKind {
    Cow,
    Sheep,
    Chicken,
}

impl AnimalKind {
    /// Display name, also the lexicographic sort key for grouping.
    pub fn name(self) -> &'static str {
        match self {
            AnimalKind::Cow => "Cow",
            AnimalKind::Sheep => "Sheep",
            AnimalKind::Chicken => "Chicken",
        }
    }

    /// Chickens live in the hen house, not the barn.
    pub fn lives_in_barn(self) -> bool {
        !matches!(self, AnimalKind::Chicken)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AnimalStatus {
    #[default]
    Idle,
    Happy,
    Sad,
    Sick,
    Ready,
}

/// Experience thresholds for levels 2..=10. Level 1 starts at 0 exp.
pub const LEVEL_THRESHOLDS: [u32; 9] = [20, 60, 120, 200, 320, 480, 700, 1_000, 1_400];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
    pub id: AnimalId,
    pub kind: AnimalKind,
    pub name: String,
    pub experience: u32,
    pub status: AnimalStatus,
}

impl Animal {
    pub fn level(&self) -> u8 {
        let above = LEVEL_THRESHOLDS
            .iter()
            .filter(|&&t| self.experience >= t)
            .count();
        1 + above as u8
    }

    pub fn is_sick(&self) -> bool {
        self.status == AnimalStatus::Sick
    }
}

// ═══════════════════════════════════════════════════════════════════════
// BARN — the game store's building record
// ═══════════════════════════════════════════════════════════════════════

pub const MAX_BARN_LEVEL: u8 = 3;

/// The barn record of the game store. Mutated only by the store-side
/// handler systems in `barn::sales` / `barn::upgrade` / `barn::feeding`;
/// everything else reads snapshots.
///
/// `BTreeMap` keeps iteration in ascending-id (= creation) order, which is
/// the tiebreaker the layout sort relies on.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct BarnState {
    pub level: u8,
    pub animals: BTreeMap<AnimalId, Animal>,
    next_id: AnimalId,
}

impl Default for BarnState {
    fn default() -> Self {
        Self {
            level: 1,
            animals: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl BarnState {
    /// Adds an animal and returns its freshly assigned id.
    /// Chickens are rejected; they belong to the hen house.
    pub fn add_animal(&mut self, kind: AnimalKind, name: String) -> Option<AnimalId> {
        if !kind.lives_in_barn() {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.animals.insert(
            id,
            Animal {
                id,
                kind,
                name,
                experience: 0,
                status: AnimalStatus::Idle,
            },
        );
        Some(id)
    }

    pub fn remove_animal(&mut self, id: AnimalId) -> Option<Animal> {
        self.animals.remove(&id)
    }

    pub fn sick_count(&self) -> usize {
        self.animals.values().filter(|a| a.is_sick()).count()
    }

    /// Housing capacity at the current upgrade level.
    pub fn capacity(&self) -> usize {
        match self.level {
            1 => 10,
            2 => 15,
            _ => 20,
        }
    }

    pub fn is_full(&self) -> bool {
        self.animals.len() >= self.capacity()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// WALLET
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct PlayerWallet {
    pub coins: u64,
}

impl Default for PlayerWallet {
    fn default() -> Self {
        Self { coins: 500 }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// BOUNTIES / DEALS
// ═══════════════════════════════════════════════════════════════════════

pub type BountyId = u32;

/// An active trade offer: sell one animal of `kind` at `min_level` or
/// above for `coins`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalBounty {
    pub id: BountyId,
    pub kind: AnimalKind,
    pub min_level: u8,
    pub coins: u64,
}

/// Offers currently on the board. Populated from static data at boot.
#[derive(Resource, Debug, Clone, Default)]
pub struct BountyBoard {
    pub offers: Vec<AnimalBounty>,
}

impl BountyBoard {
    pub fn get(&self, id: BountyId) -> Option<&AnimalBounty> {
        self.offers.iter().find(|b| b.id == id)
    }

    pub fn take(&mut self, id: BountyId) -> Option<AnimalBounty> {
        let index = self.offers.iter().position(|b| b.id == id)?;
        Some(self.offers.remove(index))
    }
}

/// Some(bounty) = Deal-Active mode; None = Normal mode.
#[derive(Resource, Debug, Clone, Default)]
pub struct ActiveDeal(pub Option<AnimalBounty>);

/// Animal picked under the active deal, awaiting confirmation. Stores the
/// id only; consumers must re-look it up and guard against it being gone.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SelectedForSale(pub Option<AnimalId>);

// ═══════════════════════════════════════════════════════════════════════
// SHOP DATA — loaded from static data at boot
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalListing {
    pub kind: AnimalKind,
    pub price: u64,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct ShopData {
    pub listings: Vec<AnimalListing>,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — presentation layer → store, fire-and-forget
// ═══════════════════════════════════════════════════════════════════════

/// Buy an animal from the exchange menu.
#[derive(Event, Debug, Clone)]
pub struct AnimalPurchaseEvent {
    pub kind: AnimalKind,
    pub price: u64,
}

/// Sell the selected animal under the active deal.
#[derive(Event, Debug, Clone)]
pub struct SellAnimalEvent {
    pub animal_id: AnimalId,
    pub bounty_id: BountyId,
}

/// Request a building upgrade. The handler clamps to [`MAX_BARN_LEVEL`].
#[derive(Event, Debug, Clone)]
pub struct BuildingUpgradeEvent {
    pub to_level: u8,
}

/// Feed every barn animal from the trough.
#[derive(Event, Debug, Clone)]
pub struct FeedBarnEvent;

/// Transient feedback message for the player.
#[derive(Event, Debug, Clone)]
pub struct ToastEvent {
    pub message: String,
    pub duration_secs: f32,
}

// ═══════════════════════════════════════════════════════════════════════
// INPUT — written once per frame by the input funnel
// ═══════════════════════════════════════════════════════════════════════

/// The single frame snapshot of player intent. Reset and re-read in
/// `PreUpdate`; every other system only reads it.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    /// Cursor position in world space, when a window and camera exist.
    pub cursor_world: Option<Vec2>,
    /// Cursor position in window space (top-left origin, logical pixels).
    pub cursor_screen: Option<Vec2>,
    /// Left button went down this frame.
    pub click: bool,
    pub ui_up: bool,
    pub ui_down: bool,
    pub ui_confirm: bool,
    pub ui_cancel: bool,
    pub quicksave: bool,
    pub quickload: bool,
}

/// Set by whichever system consumes this frame's click first, so a click on
/// a UI element never falls through to the world underneath it.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct InteractionClaimed(pub bool);

/// Click consumers run UI-first: screen-space buttons claim the click
/// before anything on the barn floor sees it.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickSet {
    Ui,
    World,
}

// ═══════════════════════════════════════════════════════════════════════
// GUIDE
// ═══════════════════════════════════════════════════════════════════════

/// Whether the exchange-menu guide page has been dismissed this session.
/// Deliberately not persisted; the presentation layer keeps no local state.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct GuideSeen(pub bool);

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

/// World-space pixels per grid unit.
pub const GRID_SIZE: f32 = 16.0;

pub const SCREEN_WIDTH: f32 = 960.0;
pub const SCREEN_HEIGHT: f32 = 540.0;

/// Every barn animal occupies one reference cell (the cow's footprint)
/// for spacing purposes, regardless of its own sprite size.
pub const BARN_CELL_WIDTH: f32 = 2.0;
pub const BARN_CELL_HEIGHT: f32 = 2.0;

/// Extra grid units between packed rows.
pub const VERTICAL_ROW_GAP: f32 = 0.5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_experience_thresholds() {
        let mut animal = Animal {
            id: 1,
            kind: AnimalKind::Cow,
            name: "Bessie".to_string(),
            experience: 0,
            status: AnimalStatus::Idle,
        };
        assert_eq!(animal.level(), 1);
        animal.experience = 19;
        assert_eq!(animal.level(), 1);
        animal.experience = 20;
        assert_eq!(animal.level(), 2);
        animal.experience = 1_400;
        assert_eq!(animal.level(), 10);
        animal.experience = u32::MAX;
        assert_eq!(animal.level(), 10);
    }

    #[test]
    fn test_barn_ids_are_monotonic() {
        let mut barn = BarnState::default();
        let a = barn.add_animal(AnimalKind::Cow, "A".to_string()).unwrap();
        let b = barn.add_animal(AnimalKind::Sheep, "B".to_string()).unwrap();
        barn.remove_animal(a);
        let c = barn.add_animal(AnimalKind::Cow, "C".to_string()).unwrap();
        assert!(a < b && b < c, "ids must never be reused");
    }

    #[test]
    fn test_barn_rejects_chickens() {
        let mut barn = BarnState::default();
        assert!(barn
            .add_animal(AnimalKind::Chicken, "Nugget".to_string())
            .is_none());
        assert!(barn.animals.is_empty());
    }

    #[test]
    fn test_barn_capacity_by_level() {
        let mut barn = BarnState::default();
        assert_eq!(barn.capacity(), 10);
        barn.level = 2;
        assert_eq!(barn.capacity(), 15);
        barn.level = 3;
        assert_eq!(barn.capacity(), 20);
    }
}
