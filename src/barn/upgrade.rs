//! Barn upgrade handling — validates upgrade requests against the wallet
//! and applies the new level, never exceeding the cap.

use bevy::prelude::*;
use crate::shared::*;

/// Coin cost of upgrading *to* the given level. `None` for levels that
/// cannot be reached by an upgrade.
pub fn upgrade_cost(to_level: u8) -> Option<u64> {
    match to_level {
        2 => Some(1_000),
        3 => Some(5_000),
        _ => None,
    }
}

/// The level an upgrade from `level` would reach. Clamped at the cap, so
/// at level 3 this returns 3 and no upgrade is offered.
pub fn next_barn_level(level: u8) -> u8 {
    (level + 1).min(MAX_BARN_LEVEL)
}

/// Store-side handler for upgrade requests from the upgrade menu.
pub fn handle_building_upgrade(
    mut events: EventReader<BuildingUpgradeEvent>,
    mut barn: ResMut<BarnState>,
    mut wallet: ResMut<PlayerWallet>,
    mut toast_writer: EventWriter<ToastEvent>,
) {
    for ev in events.read() {
        let target = ev.to_level.min(MAX_BARN_LEVEL);

        if target <= barn.level {
            toast_writer.send(ToastEvent {
                message: "The barn is already at that level.".to_string(),
                duration_secs: 3.0,
            });
            continue;
        }
        if target != barn.level + 1 {
            warn!(
                "[Barn/Upgrade] Request for level {} skips level {}",
                target,
                barn.level + 1
            );
            continue;
        }

        let Some(cost) = upgrade_cost(target) else {
            continue;
        };
        if wallet.coins < cost {
            toast_writer.send(ToastEvent {
                message: format!("Not enough coins! Need {}, have {}.", cost, wallet.coins),
                duration_secs: 3.0,
            });
            continue;
        }

        wallet.coins -= cost;
        barn.level = target;

        toast_writer.send(ToastEvent {
            message: format!("Barn upgraded to level {}!", target),
            duration_secs: 3.5,
        });
        info!(
            "[Barn/Upgrade] Level {} reached for {} coins. Capacity is now {}.",
            target,
            cost,
            barn.capacity()
        );
    }
}
