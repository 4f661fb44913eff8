//! Headless integration tests for Mossvale.
//!
//! These tests exercise the game's ECS logic without a window or GPU.
//! They use Bevy's `MinimalPlugins` to tick the app, register only the
//! pure-logic systems (skipping all rendering/UI), and verify that the
//! barn's event → handler → resource loops work correctly.
//!
//! Run with: `cargo test --test headless`

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use mossvale::barn::{
    floor_world_origin, handle_animal_click, handle_building_upgrade, handle_feed_barn,
    handle_sell_animal, refresh_barn_layout, BarnLayout,
};
use mossvale::barn::sales::handle_animal_purchase;
use mossvale::data::DataPlugin;
use mossvale::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Builds a minimal Bevy app with all shared resources and events registered
/// but NO rendering, windowing, or asset loading. Systems must be added
/// per-test depending on what's being exercised.
fn build_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);

    // ── Game State ───────────────────────────────────────────────────────
    app.init_state::<GameState>();

    // ── Shared Resources (mirrors main.rs) ───────────────────────────────
    app.init_resource::<BarnState>()
        .init_resource::<IslandState>()
        .init_resource::<PlayerWallet>()
        .init_resource::<BountyBoard>()
        .init_resource::<ShopData>()
        .init_resource::<ActiveDeal>()
        .init_resource::<SelectedForSale>()
        .init_resource::<GuideSeen>()
        .init_resource::<PlayerInput>()
        .init_resource::<InteractionClaimed>();

    // ── Shared Events (mirrors main.rs) ──────────────────────────────────
    app.add_event::<AnimalPurchaseEvent>()
        .add_event::<SellAnimalEvent>()
        .add_event::<BuildingUpgradeEvent>()
        .add_event::<FeedBarnEvent>()
        .add_event::<ToastEvent>();

    app
}

/// Transitions the test app to the Barn state and ticks once to process it.
fn enter_barn_state(app: &mut App) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Barn);
    app.update();
}

/// Adds an animal with fixed experience directly to the store.
fn add_animal(app: &mut App, kind: AnimalKind, experience: u32) -> AnimalId {
    let mut barn = app.world_mut().resource_mut::<BarnState>();
    let id = barn.add_animal(kind, format!("{}-{}", kind.name(), experience));
    let id = id.expect("barn species");
    barn.animals.get_mut(&id).unwrap().experience = experience;
    id
}

/// World-space center of the n-th layout entry, for simulated clicks.
fn entry_world_center(app: &App, index: usize) -> Vec2 {
    let barn = app.world().resource::<BarnState>();
    let layout = app.world().resource::<BarnLayout>();
    let entry = &layout.entries[index];
    let origin = floor_world_origin(barn.level);
    let center = entry.coordinates + Vec2::new(BARN_CELL_WIDTH / 2.0, BARN_CELL_HEIGHT / 2.0);
    origin + Vec2::new(center.x * GRID_SIZE, -center.y * GRID_SIZE)
}

/// Simulates a world click at `position` for the next frame.
fn click_at(app: &mut App, position: Vec2) {
    let mut input = app.world_mut().resource_mut::<PlayerInput>();
    *input = PlayerInput::default();
    input.click = true;
    input.cursor_world = Some(position);
    app.world_mut().resource_mut::<InteractionClaimed>().0 = false;
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: Boot smoke — data loads, state reaches Barn
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_headless_boot_smoke() {
    let mut app = build_test_app();
    app.add_plugins(DataPlugin);

    // First update enters Loading and populates; second applies NextState.
    app.update();
    app.update();

    let state = app.world().resource::<State<GameState>>();
    assert_eq!(
        state.get(),
        &GameState::Barn,
        "Expected to reach the barn after loading data"
    );

    let shop = app.world().resource::<ShopData>();
    let board = app.world().resource::<BountyBoard>();
    let barn = app.world().resource::<BarnState>();
    assert!(!shop.listings.is_empty(), "Shop should be stocked at boot");
    assert!(!board.offers.is_empty(), "Bounty board should be populated");
    assert!(!barn.animals.is_empty(), "Starting herd should be seeded");
    assert_eq!(barn.level, 1);

    // Smoke: run a small frame budget without panic.
    for _ in 0..60 {
        app.update();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: Layout cache — recompute and skip, through the system
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_layout_refresh_system_computes_sorted_grid() {
    let mut app = build_test_app();
    app.init_resource::<BarnLayout>();
    app.add_systems(Update, refresh_barn_layout);

    add_animal(&mut app, AnimalKind::Sheep, 5);
    let top_cow = add_animal(&mut app, AnimalKind::Cow, 30);
    add_animal(&mut app, AnimalKind::Cow, 10);

    app.update();

    let layout = app.world().resource::<BarnLayout>();
    assert_eq!(layout.entries.len(), 3);
    assert_eq!(
        layout.entries[0].animal.id, top_cow,
        "highest-experience cow leads the arrangement"
    );
    assert_eq!(layout.entries[0].coordinates, Vec2::ZERO);
    assert_eq!(
        layout.entries[2].animal.kind,
        AnimalKind::Sheep,
        "sheep group after cows"
    );
}

#[test]
fn test_layout_refresh_system_skips_experience_changes() {
    let mut app = build_test_app();
    app.init_resource::<BarnLayout>();
    app.add_systems(Update, refresh_barn_layout);

    let low = add_animal(&mut app, AnimalKind::Cow, 10);
    add_animal(&mut app, AnimalKind::Cow, 30);
    app.update();

    // The low cow overtakes the other — but no structural signal changed.
    {
        let mut barn = app.world_mut().resource_mut::<BarnState>();
        barn.animals.get_mut(&low).unwrap().experience = 999;
    }
    app.update();

    let layout = app.world().resource::<BarnLayout>();
    assert_eq!(
        layout.entries[1].animal.id, low,
        "arrangement must not re-sort on experience-only changes"
    );
    assert_eq!(
        layout.entries[1].animal.experience, 10,
        "entries keep the snapshot from the last recompute"
    );

    // Adding an animal is structural: now the re-sort happens.
    add_animal(&mut app, AnimalKind::Sheep, 1);
    app.update();
    let layout = app.world().resource::<BarnLayout>();
    assert_eq!(layout.entries[0].animal.id, low);
    assert_eq!(layout.entries[0].animal.experience, 999);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: Deal-Active selection — valid and invalid clicks
// ─────────────────────────────────────────────────────────────────────────────

fn deal(kind: AnimalKind, min_level: u8) -> AnimalBounty {
    AnimalBounty {
        id: 42,
        kind,
        min_level,
        coins: 300,
    }
}

#[test]
fn test_click_selects_valid_animal_under_deal() {
    let mut app = build_test_app();
    app.init_resource::<BarnLayout>();
    app.add_systems(
        Update,
        (refresh_barn_layout, handle_animal_click)
            .chain()
            .run_if(in_state(GameState::Barn)),
    );

    add_animal(&mut app, AnimalKind::Cow, 30); // level 2
    add_animal(&mut app, AnimalKind::Sheep, 5);
    enter_barn_state(&mut app);
    app.update(); // layout ready

    app.world_mut().resource_mut::<ActiveDeal>().0 = Some(deal(AnimalKind::Cow, 2));

    let target = entry_world_center(&app, 0);
    click_at(&mut app, target);
    app.update();

    let selected = app.world().resource::<SelectedForSale>();
    let cow_id = app.world().resource::<BarnLayout>().entries[0].animal.id;
    assert_eq!(selected.0, Some(cow_id), "valid animal should be selected");

    app.update(); // apply the queued state transition
    let state = app.world().resource::<State<GameState>>();
    assert_eq!(state.get(), &GameState::ConfirmSale);
}

#[test]
fn test_click_on_invalid_animal_is_swallowed() {
    let mut app = build_test_app();
    app.init_resource::<BarnLayout>();
    app.add_systems(
        Update,
        (refresh_barn_layout, handle_animal_click)
            .chain()
            .run_if(in_state(GameState::Barn)),
    );

    add_animal(&mut app, AnimalKind::Cow, 30);
    enter_barn_state(&mut app);
    app.update();

    // Deal wants sheep; the cow must be inert.
    app.world_mut().resource_mut::<ActiveDeal>().0 = Some(deal(AnimalKind::Sheep, 1));

    let target = entry_world_center(&app, 0);
    click_at(&mut app, target);
    app.update();

    assert_eq!(
        app.world().resource::<SelectedForSale>().0,
        None,
        "invalid animal must not be selected"
    );
    // The click was still claimed — it never falls through the overlay.
    assert!(app.world().resource::<InteractionClaimed>().0);

    app.update();
    assert_eq!(
        app.world().resource::<State<GameState>>().get(),
        &GameState::Barn,
        "no confirmation dialog for an invalid animal"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: Purchases
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_purchase_adds_animal_and_charges_wallet() {
    let mut app = build_test_app();
    app.add_systems(Update, handle_animal_purchase);
    app.world_mut().resource_mut::<PlayerWallet>().coins = 500;

    app.world_mut().send_event(AnimalPurchaseEvent {
        kind: AnimalKind::Sheep,
        price: 60,
    });
    app.update();

    let barn = app.world().resource::<BarnState>();
    assert_eq!(barn.animals.len(), 1);
    assert_eq!(barn.animals.values().next().unwrap().kind, AnimalKind::Sheep);
    assert_eq!(app.world().resource::<PlayerWallet>().coins, 440);
}

#[test]
fn test_purchase_denied_without_funds() {
    let mut app = build_test_app();
    app.add_systems(Update, handle_animal_purchase);
    app.world_mut().resource_mut::<PlayerWallet>().coins = 10;

    app.world_mut().send_event(AnimalPurchaseEvent {
        kind: AnimalKind::Cow,
        price: 100,
    });
    app.update();

    assert!(app.world().resource::<BarnState>().animals.is_empty());
    assert_eq!(app.world().resource::<PlayerWallet>().coins, 10);
}

#[test]
fn test_purchase_denied_when_barn_full() {
    let mut app = build_test_app();
    app.add_systems(Update, handle_animal_purchase);
    app.world_mut().resource_mut::<PlayerWallet>().coins = 100_000;

    let capacity = app.world().resource::<BarnState>().capacity();
    for _ in 0..capacity {
        add_animal(&mut app, AnimalKind::Cow, 0);
    }

    app.world_mut().send_event(AnimalPurchaseEvent {
        kind: AnimalKind::Cow,
        price: 100,
    });
    app.update();

    let barn = app.world().resource::<BarnState>();
    assert_eq!(barn.animals.len(), capacity, "no animal beyond capacity");
    assert_eq!(
        app.world().resource::<PlayerWallet>().coins,
        100_000,
        "no charge on a denied purchase"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: Sale settlement
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_sale_settlement_clears_deal_and_pays() {
    let mut app = build_test_app();
    app.add_systems(Update, handle_sell_animal);

    let cow = add_animal(&mut app, AnimalKind::Cow, 30);
    let bounty = deal(AnimalKind::Cow, 2);
    app.world_mut().resource_mut::<BountyBoard>().offers = vec![bounty.clone()];
    app.world_mut().resource_mut::<ActiveDeal>().0 = Some(bounty.clone());
    app.world_mut().resource_mut::<SelectedForSale>().0 = Some(cow);
    app.world_mut().resource_mut::<PlayerWallet>().coins = 0;

    app.world_mut().send_event(SellAnimalEvent {
        animal_id: cow,
        bounty_id: bounty.id,
    });
    app.update();

    assert!(
        app.world().resource::<BarnState>().animals.is_empty(),
        "sold animal leaves the barn"
    );
    assert_eq!(app.world().resource::<PlayerWallet>().coins, bounty.coins);
    assert_eq!(app.world().resource::<ActiveDeal>().0, None);
    assert_eq!(app.world().resource::<SelectedForSale>().0, None);
    assert!(
        app.world().resource::<BountyBoard>().offers.is_empty(),
        "fulfilled bounty comes off the board"
    );
}

#[test]
fn test_sale_with_mismatched_bounty_is_dropped() {
    let mut app = build_test_app();
    app.add_systems(Update, handle_sell_animal);

    let cow = add_animal(&mut app, AnimalKind::Cow, 30);
    app.world_mut().resource_mut::<ActiveDeal>().0 = Some(deal(AnimalKind::Cow, 2));

    app.world_mut().send_event(SellAnimalEvent {
        animal_id: cow,
        bounty_id: 999, // not the active deal
    });
    app.update();

    assert_eq!(app.world().resource::<BarnState>().animals.len(), 1);
    assert!(app.world().resource::<ActiveDeal>().0.is_some());
}

#[test]
fn test_sale_of_missing_animal_is_dropped() {
    let mut app = build_test_app();
    app.add_systems(Update, handle_sell_animal);

    let bounty = deal(AnimalKind::Cow, 1);
    app.world_mut().resource_mut::<ActiveDeal>().0 = Some(bounty.clone());

    app.world_mut().send_event(SellAnimalEvent {
        animal_id: 77,
        bounty_id: bounty.id,
    });
    app.update();

    // Nothing to sell: wallet untouched, deal still active, no panic.
    assert_eq!(app.world().resource::<PlayerWallet>().coins, 500);
    assert!(app.world().resource::<ActiveDeal>().0.is_some());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: Upgrades
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_upgrade_applies_and_charges() {
    let mut app = build_test_app();
    app.add_systems(Update, handle_building_upgrade);
    app.world_mut().resource_mut::<PlayerWallet>().coins = 1_500;

    app.world_mut().send_event(BuildingUpgradeEvent { to_level: 2 });
    app.update();

    assert_eq!(app.world().resource::<BarnState>().level, 2);
    assert_eq!(app.world().resource::<PlayerWallet>().coins, 500);
}

#[test]
fn test_upgrade_never_exceeds_max_level() {
    let mut app = build_test_app();
    app.add_systems(Update, handle_building_upgrade);
    app.world_mut().resource_mut::<PlayerWallet>().coins = 1_000_000;
    app.world_mut().resource_mut::<BarnState>().level = MAX_BARN_LEVEL;

    app.world_mut().send_event(BuildingUpgradeEvent { to_level: 4 });
    app.update();

    assert_eq!(
        app.world().resource::<BarnState>().level,
        MAX_BARN_LEVEL,
        "level 3 is the cap"
    );
    assert_eq!(app.world().resource::<PlayerWallet>().coins, 1_000_000);
}

#[test]
fn test_upgrade_cannot_skip_levels() {
    let mut app = build_test_app();
    app.add_systems(Update, handle_building_upgrade);
    app.world_mut().resource_mut::<PlayerWallet>().coins = 1_000_000;

    app.world_mut().send_event(BuildingUpgradeEvent { to_level: 3 });
    app.update();

    assert_eq!(
        app.world().resource::<BarnState>().level,
        1,
        "level 1 → 3 in one request is rejected"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 7: Feeding — experience moves, the floor does not
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_feeding_grows_experience_without_relayout() {
    let mut app = build_test_app();
    app.init_resource::<BarnLayout>();
    app.add_systems(Update, (handle_feed_barn, refresh_barn_layout).chain());

    let cow = add_animal(&mut app, AnimalKind::Cow, 10);
    add_animal(&mut app, AnimalKind::Cow, 12);
    app.update(); // baseline layout

    app.world_mut().send_event(FeedBarnEvent);
    app.update();

    let barn = app.world().resource::<BarnState>();
    assert_eq!(barn.animals[&cow].experience, 15, "feed grants +5 exp");
    assert_eq!(barn.animals[&cow].status, AnimalStatus::Happy);

    let layout = app.world().resource::<BarnLayout>();
    assert_eq!(
        layout.entries[1].animal.experience, 10,
        "floor arrangement keeps its pre-feed snapshot"
    );
}
