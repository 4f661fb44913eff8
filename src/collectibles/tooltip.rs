use bevy::prelude::*;
use crate::shared::*;
use super::Collectible;

// ─────────────────────────────────────────────────────────────────────────────
// Hover popover
//
// One hidden UI node follows the cursor and shows the hovered collectible's
// name. Hover state lives in a resource so the UI update is a plain diff.
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct HoveredCollectible(pub Option<Collectible>);

/// Marker for the popover root node.
#[derive(Component)]
pub struct TooltipPopover;

/// Marker for the popover's text child.
#[derive(Component)]
pub struct TooltipText;

pub fn spawn_tooltip_popover(mut commands: Commands) {
    commands
        .spawn((
            TooltipPopover,
            Node {
                position_type: PositionType::Absolute,
                padding: UiRect::axes(Val::Px(8.0), Val::Px(4.0)),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.08, 0.06, 0.92)),
            BorderColor(Color::srgb(0.5, 0.4, 0.25)),
            Visibility::Hidden,
            GlobalZIndex(10),
        ))
        .with_children(|popover| {
            popover.spawn((
                TooltipText,
                Text::new(""),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.9, 0.75)),
            ));
        });
}

/// Finds the collectible under the cursor, if any.
pub fn track_collectible_hover(
    input: Res<PlayerInput>,
    collectibles: Query<(&Collectible, &Transform, &Sprite)>,
    mut hovered: ResMut<HoveredCollectible>,
) {
    let now = input.cursor_world.and_then(|cursor| {
        collectibles
            .iter()
            .find(|(_, transform, sprite)| {
                let Some(size) = sprite.custom_size else {
                    return false;
                };
                let center = transform.translation.truncate();
                let half = size / 2.0;
                (cursor.x - center.x).abs() <= half.x && (cursor.y - center.y).abs() <= half.y
            })
            .map(|(collectible, _, _)| *collectible)
    });

    if hovered.0 != now {
        hovered.0 = now;
    }
}

/// Shows/hides the popover and pins it next to the cursor.
pub fn update_tooltip_popover(
    input: Res<PlayerInput>,
    hovered: Res<HoveredCollectible>,
    mut popovers: Query<(&mut Node, &mut Visibility), With<TooltipPopover>>,
    mut texts: Query<&mut Text, With<TooltipText>>,
) {
    let Ok((mut node, mut visibility)) = popovers.get_single_mut() else {
        return;
    };

    match (hovered.0, input.cursor_screen) {
        (Some(collectible), Some(screen)) => {
            if let Ok(mut text) = texts.get_single_mut() {
                **text = collectible.title().to_string();
            }
            node.left = Val::Px(screen.x + 14.0);
            node.top = Val::Px(screen.y - 8.0);
            *visibility = Visibility::Visible;
        }
        _ => {
            *visibility = Visibility::Hidden;
        }
    }
}
