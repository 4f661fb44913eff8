//! Exchange menu — buy animals and pick up trade bounties.
//!
//! First open shows a short guide page (once per session); after that the
//! menu goes straight to the listing. Picking a bounty closes the menu and
//! puts the barn into Deal-Active mode.

use bevy::prelude::*;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// LOCAL TYPES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct ExchangeMenuRoot;

#[derive(Component)]
pub struct ExchangeGuidePanel;

#[derive(Component)]
pub struct ExchangeListPanel;

/// Marker for individual row nodes so we can update highlight colours.
#[derive(Component)]
pub struct ExchangeRow {
    pub index: usize,
}

#[derive(Clone, Debug)]
pub enum ExchangeEntry {
    Buy(AnimalListing),
    Deal(AnimalBounty),
}

impl ExchangeEntry {
    fn label(&self) -> String {
        match self {
            ExchangeEntry::Buy(listing) => {
                format!("Buy {} — {} coins", listing.kind.name(), listing.price)
            }
            ExchangeEntry::Deal(bounty) => format!(
                "Bounty: {} Lv{}+ → pays {} coins",
                bounty.kind.name(),
                bounty.min_level,
                bounty.coins
            ),
        }
    }
}

/// UI-local resource tracking cursor and computed entries.
#[derive(Resource, Default)]
pub struct ExchangeMenuState {
    pub cursor: usize,
    pub entries: Vec<ExchangeEntry>,
    pub showing_guide: bool,
}

const GUIDE_LINES: [&str; 4] = [
    "Welcome to the barn exchange!",
    "Buy cows and sheep to fill your barn floor.",
    "Traders post bounties for leveled animals.",
    "Pick a bounty, then click a qualifying animal to sell it.",
];

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_exchange_menu(
    mut commands: Commands,
    shop: Res<ShopData>,
    board: Res<BountyBoard>,
    guide: Res<GuideSeen>,
) {
    let entries: Vec<ExchangeEntry> = shop
        .listings
        .iter()
        .cloned()
        .map(ExchangeEntry::Buy)
        .chain(board.offers.iter().cloned().map(ExchangeEntry::Deal))
        .collect();

    let showing_guide = !guide.0;
    commands.insert_resource(ExchangeMenuState {
        cursor: 0,
        entries: entries.clone(),
        showing_guide,
    });

    commands
        .spawn((
            ExchangeMenuRoot,
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
            // ── Guide page ───────────────────────────────────────────────
            parent
                .spawn((
                    ExchangeGuidePanel,
                    Node {
                        width: Val::Px(460.0),
                        flex_direction: FlexDirection::Column,
                        padding: UiRect::all(Val::Px(16.0)),
                        row_gap: Val::Px(8.0),
                        border: UiRect::all(Val::Px(3.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.12, 0.1, 0.08, 0.95)),
                    BorderColor(Color::srgb(0.5, 0.4, 0.25)),
                    if showing_guide {
                        Visibility::Inherited
                    } else {
                        Visibility::Hidden
                    },
                ))
                .with_children(|panel| {
                    panel.spawn((
                        Text::new("BARN GUIDE"),
                        TextFont {
                            font_size: 22.0,
                            ..default()
                        },
                        TextColor(Color::srgb(1.0, 0.9, 0.6)),
                    ));
                    for line in GUIDE_LINES {
                        panel.spawn((
                            Text::new(line),
                            TextFont {
                                font_size: 14.0,
                                ..default()
                            },
                            TextColor(Color::srgb(0.85, 0.85, 0.8)),
                        ));
                    }
                    panel.spawn((
                        Text::new("Enter: Continue"),
                        TextFont {
                            font_size: 11.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.5, 0.5, 0.5)),
                    ));
                });

            // ── Listing ──────────────────────────────────────────────────
            parent
                .spawn((
                    ExchangeListPanel,
                    Node {
                        width: Val::Px(460.0),
                        min_height: Val::Px(240.0),
                        flex_direction: FlexDirection::Column,
                        padding: UiRect::all(Val::Px(16.0)),
                        row_gap: Val::Px(8.0),
                        border: UiRect::all(Val::Px(3.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.12, 0.1, 0.08, 0.95)),
                    BorderColor(Color::srgb(0.5, 0.4, 0.25)),
                    if showing_guide {
                        Visibility::Hidden
                    } else {
                        Visibility::Inherited
                    },
                ))
                .with_children(|panel| {
                    panel.spawn((
                        Text::new("BARN EXCHANGE"),
                        TextFont {
                            font_size: 22.0,
                            ..default()
                        },
                        TextColor(Color::srgb(1.0, 0.9, 0.6)),
                    ));

                    if entries.is_empty() {
                        panel.spawn((
                            Text::new("Nothing on offer today."),
                            TextFont {
                                font_size: 14.0,
                                ..default()
                            },
                            TextColor(Color::srgb(0.6, 0.5, 0.4)),
                        ));
                    }

                    for (i, entry) in entries.iter().enumerate() {
                        let bg = if i == 0 {
                            Color::srgba(0.35, 0.3, 0.2, 0.9)
                        } else {
                            Color::srgba(0.2, 0.17, 0.14, 0.6)
                        };
                        panel
                            .spawn((
                                ExchangeRow { index: i },
                                Node {
                                    width: Val::Percent(100.0),
                                    height: Val::Px(32.0),
                                    align_items: AlignItems::Center,
                                    padding: UiRect::horizontal(Val::Px(8.0)),
                                    ..default()
                                },
                                BackgroundColor(bg),
                            ))
                            .with_children(|row| {
                                row.spawn((
                                    Text::new(entry.label()),
                                    TextFont {
                                        font_size: 14.0,
                                        ..default()
                                    },
                                    TextColor(Color::srgb(0.9, 0.9, 0.85)),
                                ));
                            });
                    }

                    panel.spawn((
                        Text::new("Up/Down: Select | Enter: Confirm | Esc: Close"),
                        TextFont {
                            font_size: 11.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.5, 0.5, 0.5)),
                    ));
                });
        });
}

pub fn despawn_exchange_menu(
    mut commands: Commands,
    query: Query<Entity, With<ExchangeMenuRoot>>,
) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<ExchangeMenuState>();
}

// ═══════════════════════════════════════════════════════════════════════
// NAVIGATION + INPUT
// ═══════════════════════════════════════════════════════════════════════

pub fn exchange_navigation(
    input: Res<PlayerInput>,
    mut ui_state: Option<ResMut<ExchangeMenuState>>,
    mut guide: ResMut<GuideSeen>,
    mut deal: ResMut<ActiveDeal>,
    mut purchase_writer: EventWriter<AnimalPurchaseEvent>,
    mut next_state: ResMut<NextState<GameState>>,
    mut guide_panels: Query<&mut Visibility, (With<ExchangeGuidePanel>, Without<ExchangeListPanel>)>,
    mut list_panels: Query<&mut Visibility, (With<ExchangeListPanel>, Without<ExchangeGuidePanel>)>,
) {
    let Some(ref mut ui_state) = ui_state else {
        return;
    };

    // Guide page swallows the first confirm.
    if ui_state.showing_guide {
        if input.ui_confirm || input.ui_cancel {
            ui_state.showing_guide = false;
            guide.0 = true;
            for mut visibility in &mut guide_panels {
                *visibility = Visibility::Hidden;
            }
            for mut visibility in &mut list_panels {
                *visibility = Visibility::Inherited;
            }
        }
        return;
    }

    if input.ui_cancel {
        next_state.set(GameState::Barn);
        return;
    }

    let max = ui_state.entries.len();
    if max == 0 {
        return;
    }
    if input.ui_down && ui_state.cursor < max - 1 {
        ui_state.cursor += 1;
    }
    if input.ui_up && ui_state.cursor > 0 {
        ui_state.cursor -= 1;
    }

    if input.ui_confirm {
        match ui_state.entries[ui_state.cursor].clone() {
            ExchangeEntry::Buy(listing) => {
                // Fire-and-forget; the store handler validates and toasts.
                purchase_writer.send(AnimalPurchaseEvent {
                    kind: listing.kind,
                    price: listing.price,
                });
            }
            ExchangeEntry::Deal(bounty) => {
                info!("[Ui/Exchange] Deal {} accepted", bounty.id);
                deal.0 = Some(bounty);
                next_state.set(GameState::Barn);
            }
        }
    }
}

/// Updates row highlight colours to track the cursor position.
pub fn update_exchange_display(
    ui_state: Option<Res<ExchangeMenuState>>,
    mut rows: Query<(&ExchangeRow, &mut BackgroundColor)>,
) {
    let Some(ui_state) = ui_state else {
        return;
    };
    for (row, mut bg) in &mut rows {
        if row.index == ui_state.cursor {
            *bg = BackgroundColor(Color::srgba(0.35, 0.3, 0.2, 0.9));
        } else {
            *bg = BackgroundColor(Color::srgba(0.2, 0.17, 0.14, 0.6));
        }
    }
}
