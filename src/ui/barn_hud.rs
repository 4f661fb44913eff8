use bevy::prelude::*;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct BarnHudRoot;

/// The two round action buttons of the barn scene.
#[derive(Component, Debug, Clone, Copy)]
pub enum DiscButton {
    Exchange,
    Upgrade,
}

#[derive(Component)]
pub struct CoinsDisplay;

#[derive(Component)]
pub struct OccupancyDisplay;

// ═══════════════════════════════════════════════════════════════════════
// SPAWN
// ═══════════════════════════════════════════════════════════════════════

fn spawn_disc(parent: &mut ChildBuilder, disc: DiscButton, label: &str, right: bool) {
    let mut node = Node {
        position_type: PositionType::Absolute,
        top: Val::Px(18.0),
        width: Val::Px(72.0),
        height: Val::Px(48.0),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        border: UiRect::all(Val::Px(3.0)),
        ..default()
    };
    if right {
        node.right = Val::Px(18.0);
    } else {
        node.left = Val::Px(18.0);
    }

    parent
        .spawn((
            disc,
            Button,
            node,
            BackgroundColor(Color::srgba(0.12, 0.1, 0.08, 0.9)),
            BorderColor(Color::srgb(0.5, 0.4, 0.25)),
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(label),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.9, 0.6)),
            ));
        });
}

pub fn spawn_barn_hud(mut commands: Commands) {
    commands
        .spawn((
            BarnHudRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
            PickingBehavior::IGNORE,
        ))
        .with_children(|root| {
            spawn_disc(root, DiscButton::Upgrade, "UPGRADE", false);
            spawn_disc(root, DiscButton::Exchange, "SHOP", true);

            // Wallet + occupancy, bottom-left corner.
            root.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(14.0),
                    left: Val::Px(14.0),
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(2.0),
                    ..default()
                },
                PickingBehavior::IGNORE,
            ))
            .with_children(|corner| {
                corner.spawn((
                    CoinsDisplay,
                    Text::new(""),
                    TextFont {
                        font_size: 15.0,
                        ..default()
                    },
                    TextColor(Color::srgb(1.0, 0.85, 0.4)),
                ));
                corner.spawn((
                    OccupancyDisplay,
                    Text::new(""),
                    TextFont {
                        font_size: 13.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.85, 0.85, 0.8)),
                ));
            });
        });
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

/// Opens the overlay menus. Claims the click so nothing under the disc
/// (trough, animals) reacts to it too.
pub fn handle_disc_buttons(
    interactions: Query<(&Interaction, &DiscButton), (Changed<Interaction>, With<Button>)>,
    deal: Res<ActiveDeal>,
    mut claimed: ResMut<InteractionClaimed>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for (interaction, disc) in &interactions {
        if *interaction != Interaction::Pressed {
            continue;
        }
        // The discs are hidden while a deal is active; ignore stray presses.
        if deal.0.is_some() {
            continue;
        }
        claimed.0 = true;
        match disc {
            DiscButton::Exchange => next_state.set(GameState::Exchange),
            DiscButton::Upgrade => next_state.set(GameState::Upgrade),
        }
    }
}

/// The action discs disappear while a deal overlay is up.
pub fn update_disc_visibility(
    deal: Res<ActiveDeal>,
    mut discs: Query<&mut Visibility, With<DiscButton>>,
) {
    let target = if deal.0.is_some() {
        Visibility::Hidden
    } else {
        Visibility::Inherited
    };
    for mut visibility in &mut discs {
        *visibility = target;
    }
}

pub fn update_coins_display(
    wallet: Res<PlayerWallet>,
    mut texts: Query<&mut Text, With<CoinsDisplay>>,
) {
    for mut text in &mut texts {
        **text = format!("{} coins", wallet.coins);
    }
}

pub fn update_occupancy_display(
    barn: Res<BarnState>,
    mut texts: Query<&mut Text, With<OccupancyDisplay>>,
) {
    for mut text in &mut texts {
        **text = format!(
            "Barn Lv{} — {}/{} animals",
            barn.level,
            barn.animals.len(),
            barn.capacity()
        );
    }
}
