//! Building Upgrade menu — raise the barn level for coins.
//!
//! At level 3 the upgrade action is not offered; the panel shows MAX.

use bevy::prelude::*;
use crate::barn::upgrade::{next_barn_level, upgrade_cost};
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// LOCAL TYPES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct UpgradeMenuRoot;

#[derive(Component)]
pub struct UpgradeStatusText;

/// UI-local resource: what the panel offered when it was opened.
#[derive(Resource, Default)]
pub struct UpgradeMenuState {
    pub offer: Option<(u8, u64)>, // (target level, coin cost)
    pub status_message: String,
}

fn capacity_at(level: u8) -> usize {
    match level {
        1 => 10,
        2 => 15,
        _ => 20,
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_upgrade_menu(mut commands: Commands, barn: Res<BarnState>) {
    let next = next_barn_level(barn.level);
    let offer = if next > barn.level {
        upgrade_cost(next).map(|cost| (next, cost))
    } else {
        None
    };
    commands.insert_resource(UpgradeMenuState {
        offer,
        status_message: String::new(),
    });

    let headline = match offer {
        Some((next, _)) => format!("Barn: Level {} -> {}", barn.level, next),
        None => format!("Barn: Level {} (MAX)", barn.level),
    };
    let detail = match offer {
        Some((next, cost)) => format!(
            "Cost: {} coins   Capacity: {} -> {}",
            cost,
            capacity_at(barn.level),
            capacity_at(next)
        ),
        None => "No further upgrades available.".to_string(),
    };
    let hint = match offer {
        Some(_) => "Enter: Upgrade | Esc: Close",
        None => "Esc: Close",
    };

    commands
        .spawn((
            UpgradeMenuRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        width: Val::Px(420.0),
                        flex_direction: FlexDirection::Column,
                        padding: UiRect::all(Val::Px(16.0)),
                        row_gap: Val::Px(8.0),
                        border: UiRect::all(Val::Px(3.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.12, 0.1, 0.08, 0.95)),
                    BorderColor(Color::srgb(0.5, 0.4, 0.25)),
                ))
                .with_children(|panel| {
                    panel.spawn((
                        Text::new("BARN UPGRADE"),
                        TextFont {
                            font_size: 22.0,
                            ..default()
                        },
                        TextColor(Color::srgb(1.0, 0.9, 0.6)),
                    ));
                    panel.spawn((
                        Text::new(headline),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.9, 0.9, 0.85)),
                    ));
                    panel.spawn((
                        Text::new(detail),
                        TextFont {
                            font_size: 13.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.8, 0.8, 0.6)),
                    ));
                    panel.spawn((
                        UpgradeStatusText,
                        Text::new(""),
                        TextFont {
                            font_size: 13.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.9, 0.5, 0.4)),
                    ));
                    panel.spawn((
                        Text::new(hint),
                        TextFont {
                            font_size: 11.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.5, 0.5, 0.5)),
                    ));
                });
        });
}

pub fn despawn_upgrade_menu(mut commands: Commands, query: Query<Entity, With<UpgradeMenuRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<UpgradeMenuState>();
}

// ═══════════════════════════════════════════════════════════════════════
// NAVIGATION + INPUT
// ═══════════════════════════════════════════════════════════════════════

pub fn upgrade_navigation(
    input: Res<PlayerInput>,
    mut ui_state: Option<ResMut<UpgradeMenuState>>,
    wallet: Res<PlayerWallet>,
    mut upgrade_writer: EventWriter<BuildingUpgradeEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Some(ref mut ui_state) = ui_state else {
        return;
    };

    if input.ui_cancel {
        next_state.set(GameState::Barn);
        return;
    }
    if !input.ui_confirm {
        return;
    }

    let Some((target, cost)) = ui_state.offer else {
        ui_state.status_message = "Already at max level!".to_string();
        return;
    };
    if wallet.coins < cost {
        ui_state.status_message =
            format!("Not enough coins! Need {}, have {}.", cost, wallet.coins);
        return;
    }

    // The handler re-validates and does the actual deduction.
    upgrade_writer.send(BuildingUpgradeEvent { to_level: target });
    next_state.set(GameState::Barn);
}

pub fn update_upgrade_status(
    ui_state: Option<Res<UpgradeMenuState>>,
    mut texts: Query<&mut Text, With<UpgradeStatusText>>,
) {
    let Some(ui_state) = ui_state else {
        return;
    };
    for mut text in &mut texts {
        **text = ui_state.status_message.clone();
    }
}
