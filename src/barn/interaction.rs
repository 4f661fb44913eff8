use bevy::prelude::*;
use crate::shared::*;
use super::layout::BarnLayout;
use super::rendering::floor_world_origin;
use super::sales::is_valid_deal;

// ─────────────────────────────────────────────────────────────────────────────
// Animal clicks
//
// Two modes, decided by ActiveDeal:
//   Normal       — a click opens the animal's detail summary.
//   Deal-Active  — a click on a valid animal records it for sale and opens
//                  the confirmation; a click on an invalid animal is
//                  swallowed (claimed, no selection, no panic).
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_animal_click(
    input: Res<PlayerInput>,
    mut claimed: ResMut<InteractionClaimed>,
    barn: Res<BarnState>,
    layout: Res<BarnLayout>,
    deal: Res<ActiveDeal>,
    mut selected: ResMut<SelectedForSale>,
    mut next_state: ResMut<NextState<GameState>>,
    mut toast_writer: EventWriter<ToastEvent>,
) {
    if !input.click || claimed.0 {
        return;
    }
    let Some(cursor) = input.cursor_world else {
        return;
    };

    // World → floor-relative grid units (rows grow downward).
    let origin = floor_world_origin(barn.level);
    let local = Vec2::new(
        (cursor.x - origin.x) / GRID_SIZE,
        (origin.y - cursor.y) / GRID_SIZE,
    );
    let Some(entry) = layout.entry_at(local) else {
        return;
    };
    claimed.0 = true;

    // The layout entry is a snapshot; re-read the live record for anything
    // that matters. A stale entry whose animal is already gone is ignored.
    let Some(animal) = barn.animals.get(&entry.animal.id) else {
        warn!("[Barn] Click on animal {} not in the store", entry.animal.id);
        return;
    };

    match &deal.0 {
        None => {
            toast_writer.send(ToastEvent {
                message: format!(
                    "{} — Lv {} {} ({:?})",
                    animal.name,
                    animal.level(),
                    animal.kind.name(),
                    animal.status,
                ),
                duration_secs: 2.5,
            });
        }
        Some(bounty) => {
            if !is_valid_deal(animal, bounty) {
                // Swallowed: the deal filter makes this animal inert.
                return;
            }
            selected.0 = Some(animal.id);
            next_state.set(GameState::ConfirmSale);
        }
    }
}

/// Escape backs out of Deal-Active mode from the barn floor. The exchange
/// HUD's close button does the same thing.
pub fn cancel_deal_on_cancel(
    input: Res<PlayerInput>,
    mut deal: ResMut<ActiveDeal>,
    mut selected: ResMut<SelectedForSale>,
) {
    if !input.ui_cancel || deal.0.is_none() {
        return;
    }
    deal.0 = None;
    selected.0 = None;
    info!("[Barn] Deal cancelled");
}
