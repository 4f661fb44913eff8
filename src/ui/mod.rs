mod barn_hud;
mod confirm_dialog;
mod exchange_hud;
mod exchange_menu;
mod toast;
mod upgrade_menu;

pub use barn_hud::*;
pub use confirm_dialog::*;
pub use exchange_hud::*;
pub use exchange_menu::*;
pub use toast::*;
pub use upgrade_menu::*;

use bevy::prelude::*;
use crate::shared::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // ─── TOASTS — always present ───
        app.add_systems(Startup, spawn_toast_container);
        app.add_systems(Update, (handle_toast_events, update_toasts).chain());

        // ─── BARN HUD — discs + wallet readout ───
        app.add_systems(OnExit(GameState::Loading), spawn_barn_hud);
        app.add_systems(
            Update,
            handle_disc_buttons
                .in_set(ClickSet::Ui)
                .run_if(in_state(GameState::Barn)),
        );
        app.add_systems(
            Update,
            (
                update_disc_visibility,
                update_coins_display,
                update_occupancy_display,
            ),
        );

        // ─── EXCHANGE HUD — deal banner ───
        app.add_systems(
            Update,
            (
                sync_exchange_hud,
                handle_exchange_hud_close.in_set(ClickSet::Ui),
            ),
        );

        // ─── EXCHANGE MENU ───
        app.add_systems(OnEnter(GameState::Exchange), spawn_exchange_menu);
        app.add_systems(OnExit(GameState::Exchange), despawn_exchange_menu);
        app.add_systems(
            Update,
            (exchange_navigation, update_exchange_display)
                .chain()
                .run_if(in_state(GameState::Exchange)),
        );

        // ─── UPGRADE MENU ───
        app.add_systems(OnEnter(GameState::Upgrade), spawn_upgrade_menu);
        app.add_systems(OnExit(GameState::Upgrade), despawn_upgrade_menu);
        app.add_systems(
            Update,
            (upgrade_navigation, update_upgrade_status)
                .chain()
                .run_if(in_state(GameState::Upgrade)),
        );

        // ─── CONFIRM SALE DIALOG ───
        app.add_systems(OnEnter(GameState::ConfirmSale), spawn_confirm_dialog);
        app.add_systems(OnExit(GameState::ConfirmSale), despawn_confirm_dialog);
        app.add_systems(
            Update,
            confirm_navigation.run_if(in_state(GameState::ConfirmSale)),
        );
    }
}
