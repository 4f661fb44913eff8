use bevy::prelude::*;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

/// Marker for the toast container node (top-center of screen).
#[derive(Component)]
pub struct ToastContainer;

/// Marker for individual toast nodes.
#[derive(Component)]
pub struct ToastItem {
    pub timer: Timer,
}

// ═══════════════════════════════════════════════════════════════════════
// SPAWN CONTAINER
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_toast_container(mut commands: Commands) {
    commands.spawn((
        ToastContainer,
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(56.0),
            left: Val::Percent(50.0),
            width: Val::Px(320.0),
            // Shift left by half of the width to truly center it.
            margin: UiRect {
                left: Val::Px(-160.0),
                ..default()
            },
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(6.0),
            align_items: AlignItems::Center,
            ..default()
        },
        PickingBehavior::IGNORE,
    ));
}

// ═══════════════════════════════════════════════════════════════════════
// HANDLE TOAST EVENTS — spawn a child node per event
// ═══════════════════════════════════════════════════════════════════════

pub fn handle_toast_events(
    mut commands: Commands,
    mut events: EventReader<ToastEvent>,
    container_query: Query<Entity, With<ToastContainer>>,
    existing_toasts: Query<Entity, With<ToastItem>>,
) {
    let Ok(container) = container_query.get_single() else {
        return;
    };

    for event in events.read() {
        // Max 3 visible toasts: despawn the oldest when over the limit.
        let toasts: Vec<Entity> = existing_toasts.iter().collect();
        if toasts.len() >= 3 {
            if let Some(&oldest) = toasts.first() {
                commands.entity(oldest).despawn_recursive();
            }
        }

        let toast = commands
            .spawn((
                ToastItem {
                    timer: Timer::from_seconds(event.duration_secs, TimerMode::Once),
                },
                Node {
                    padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                BackgroundColor(Color::srgba(0.12, 0.1, 0.08, 0.92)),
                BorderColor(Color::srgb(0.5, 0.4, 0.25)),
                PickingBehavior::IGNORE,
            ))
            .with_children(|item| {
                item.spawn((
                    Text::new(event.message.clone()),
                    TextFont {
                        font_size: 14.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.95, 0.9, 0.75)),
                ));
            })
            .id();

        commands.entity(container).add_child(toast);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// TICK & EXPIRE
// ═══════════════════════════════════════════════════════════════════════

pub fn update_toasts(
    mut commands: Commands,
    time: Res<Time>,
    mut toasts: Query<(Entity, &mut ToastItem, &mut BackgroundColor)>,
) {
    for (entity, mut toast, mut background) in &mut toasts {
        toast.timer.tick(time.delta());

        // Fade during the final half second.
        let remaining = toast.timer.remaining_secs();
        if remaining < 0.5 {
            let alpha = (remaining / 0.5).clamp(0.0, 1.0) * 0.92;
            background.0 = background.0.with_alpha(alpha);
        }

        if toast.timer.just_finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}
