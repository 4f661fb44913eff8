//! Sale confirmation dialog.
//!
//! Reachable only with both an active deal and a selected animal. If either
//! is missing the dialog refuses to open and drops back to the barn; that
//! combination is a local invariant failure, not a user-facing error.

use bevy::prelude::*;
use crate::shared::*;

#[derive(Component)]
pub struct ConfirmDialogRoot;

pub fn spawn_confirm_dialog(
    mut commands: Commands,
    barn: Res<BarnState>,
    deal: Res<ActiveDeal>,
    selected: Res<SelectedForSale>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let (Some(bounty), Some(animal_id)) = (&deal.0, selected.0) else {
        warn!("[Ui/Confirm] Opened without a deal/selection pair");
        next_state.set(GameState::Barn);
        return;
    };
    let Some(animal) = barn.animals.get(&animal_id) else {
        warn!("[Ui/Confirm] Selected animal {} is gone", animal_id);
        next_state.set(GameState::Barn);
        return;
    };

    commands
        .spawn((
            ConfirmDialogRoot,
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
                        width: Val::Px(400.0),
                        flex_direction: FlexDirection::Column,
                        padding: UiRect::all(Val::Px(16.0)),
                        row_gap: Val::Px(10.0),
                        border: UiRect::all(Val::Px(3.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.12, 0.1, 0.08, 0.95)),
                    BorderColor(Color::srgb(0.5, 0.4, 0.25)),
                ))
                .with_children(|panel| {
                    panel.spawn((
                        Text::new("CONFIRM SALE"),
                        TextFont {
                            font_size: 22.0,
                            ..default()
                        },
                        TextColor(Color::srgb(1.0, 0.9, 0.6)),
                    ));
                    panel.spawn((
                        Text::new(format!(
                            "Sell {} (Lv {} {}) for {} coins?",
                            animal.name,
                            animal.level(),
                            animal.kind.name(),
                            bounty.coins
                        )),
                        TextFont {
                            font_size: 15.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.9, 0.9, 0.85)),
                    ));
                    panel.spawn((
                        Text::new("Enter: Sell | Esc: Keep"),
                        TextFont {
                            font_size: 11.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.5, 0.5, 0.5)),
                    ));
                });
        });
}

pub fn despawn_confirm_dialog(
    mut commands: Commands,
    query: Query<Entity, With<ConfirmDialogRoot>>,
) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

pub fn confirm_navigation(
    input: Res<PlayerInput>,
    deal: Res<ActiveDeal>,
    mut selected: ResMut<SelectedForSale>,
    mut sell_writer: EventWriter<SellAnimalEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if input.ui_cancel {
        // Keep the deal, drop the selection.
        selected.0 = None;
        next_state.set(GameState::Barn);
        return;
    }
    if !input.ui_confirm {
        return;
    }

    let (Some(bounty), Some(animal_id)) = (&deal.0, selected.0) else {
        warn!("[Ui/Confirm] Confirm pressed without a deal/selection pair");
        next_state.set(GameState::Barn);
        return;
    };

    sell_writer.send(SellAnimalEvent {
        animal_id,
        bounty_id: bounty.id,
    });
    next_state.set(GameState::Barn);
}
