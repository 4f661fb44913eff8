use bevy::prelude::*;
use crate::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Sub-modules
// ─────────────────────────────────────────────────────────────────────────────
mod feeding;
mod interaction;
pub mod layout;
mod rendering;
pub mod sales;
pub mod upgrade;

pub use feeding::*;
pub use interaction::*;
pub use layout::*;
pub use rendering::*;
pub use sales::*;
pub use upgrade::*;

// ─────────────────────────────────────────────────────────────────────────────
// Plugin
// ─────────────────────────────────────────────────────────────────────────────

pub struct BarnPlugin;

impl Plugin for BarnPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BarnLayout>()
            .add_systems(Startup, setup_camera)
            .add_systems(OnExit(GameState::Loading), spawn_barn_scene)
            // ── derived layout → sprites ─────────────────────────────────────
            .add_systems(
                Update,
                (
                    refresh_barn_layout,
                    update_backdrop,
                    update_building_sprite,
                    sync_animal_sprites.run_if(resource_changed::<BarnLayout>),
                    apply_deal_overlay.run_if(
                        resource_changed::<ActiveDeal>.or(resource_changed::<BarnLayout>),
                    ),
                )
                    .chain(),
            )
            // ── pointer interaction on the barn floor ────────────────────────
            .add_systems(
                Update,
                (handle_trough_click, handle_animal_click, cancel_deal_on_cancel)
                    .chain()
                    .in_set(ClickSet::World)
                    .run_if(in_state(GameState::Barn)),
            )
            // ── store-side handlers ──────────────────────────────────────────
            .add_systems(
                Update,
                (
                    handle_feed_barn,
                    handle_animal_purchase,
                    handle_sell_animal,
                    handle_building_upgrade,
                ),
            );
    }
}
