//! Exchange HUD — the banner shown while a deal is active.

use bevy::prelude::*;
use crate::shared::*;

#[derive(Component)]
pub struct ExchangeHudRoot;

#[derive(Component)]
pub struct ExchangeHudCloseButton;

/// Rebuilds the banner whenever the deal mode flips.
pub fn sync_exchange_hud(
    mut commands: Commands,
    deal: Res<ActiveDeal>,
    existing: Query<Entity, With<ExchangeHudRoot>>,
) {
    if !deal.is_changed() {
        return;
    }

    for entity in &existing {
        commands.entity(entity).despawn_recursive();
    }
    let Some(bounty) = &deal.0 else {
        return;
    };

    commands
        .spawn((
            ExchangeHudRoot,
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(18.0),
                left: Val::Percent(50.0),
                width: Val::Px(420.0),
                margin: UiRect {
                    left: Val::Px(-210.0),
                    ..default()
                },
                flex_direction: FlexDirection::Row,
                justify_content: JustifyContent::SpaceBetween,
                align_items: AlignItems::Center,
                padding: UiRect::axes(Val::Px(12.0), Val::Px(8.0)),
                border: UiRect::all(Val::Px(3.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.12, 0.1, 0.08, 0.95)),
            BorderColor(Color::srgb(0.8, 0.65, 0.3)),
        ))
        .with_children(|banner| {
            banner.spawn((
                Text::new(format!(
                    "Trader wants: {} Lv{}+ — pays {} coins. Click one!",
                    bounty.kind.name(),
                    bounty.min_level,
                    bounty.coins
                )),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.9, 0.75)),
            ));
            banner
                .spawn((
                    ExchangeHudCloseButton,
                    Button,
                    Node {
                        padding: UiRect::axes(Val::Px(8.0), Val::Px(4.0)),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.35, 0.2, 0.15, 0.9)),
                    BorderColor(Color::srgb(0.6, 0.4, 0.3)),
                ))
                .with_children(|button| {
                    button.spawn((
                        Text::new("X"),
                        TextFont {
                            font_size: 14.0,
                            ..default()
                        },
                        TextColor(Color::srgb(1.0, 0.8, 0.7)),
                    ));
                });
        });
}

/// The banner's close button backs out of the deal.
pub fn handle_exchange_hud_close(
    interactions: Query<
        &Interaction,
        (Changed<Interaction>, With<ExchangeHudCloseButton>, With<Button>),
    >,
    mut claimed: ResMut<InteractionClaimed>,
    mut deal: ResMut<ActiveDeal>,
    mut selected: ResMut<SelectedForSale>,
) {
    for interaction in &interactions {
        if *interaction != Interaction::Pressed {
            continue;
        }
        claimed.0 = true;
        deal.0 = None;
        selected.0 = None;
        info!("[Ui/ExchangeHud] Deal closed");
    }
}
