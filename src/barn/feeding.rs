use bevy::prelude::*;
use crate::shared::*;
use super::rendering::FeedTrough;

/// Experience each barn animal gains per trough use.
const TROUGH_FEED_EXPERIENCE: u32 = 5;

// ─────────────────────────────────────────────────────────────────────────────
// Feed trough
//
// Clicking the trough feeds the whole barn. Feeding changes experience and
// mood only, never the animal count or the sick count, so the cached floor
// arrangement stays exactly where it is.
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_trough_click(
    input: Res<PlayerInput>,
    mut claimed: ResMut<InteractionClaimed>,
    deal: Res<ActiveDeal>,
    troughs: Query<(&Transform, &Sprite), With<FeedTrough>>,
    mut feed_writer: EventWriter<FeedBarnEvent>,
) {
    if !input.click || claimed.0 {
        return;
    }
    // The trough is inert while a deal overlay is up.
    if deal.0.is_some() {
        return;
    }
    let Some(cursor) = input.cursor_world else {
        return;
    };
    let Ok((transform, sprite)) = troughs.get_single() else {
        return;
    };
    let Some(size) = sprite.custom_size else {
        return;
    };

    let center = transform.translation.truncate();
    let half = size / 2.0;
    let inside = (cursor.x - center.x).abs() <= half.x && (cursor.y - center.y).abs() <= half.y;
    if !inside {
        return;
    }

    claimed.0 = true;
    feed_writer.send(FeedBarnEvent);
}

/// Store-side handler: applies the feed to every animal in the barn.
pub fn handle_feed_barn(
    mut events: EventReader<FeedBarnEvent>,
    mut barn: ResMut<BarnState>,
    mut toast_writer: EventWriter<ToastEvent>,
) {
    for _ in events.read() {
        if barn.animals.is_empty() {
            toast_writer.send(ToastEvent {
                message: "The trough is full, but the barn is empty.".to_string(),
                duration_secs: 2.0,
            });
            continue;
        }

        let mut fed = 0;
        for animal in barn.animals.values_mut() {
            animal.experience += TROUGH_FEED_EXPERIENCE;
            if animal.status == AnimalStatus::Idle {
                animal.status = AnimalStatus::Happy;
            }
            fed += 1;
        }

        toast_writer.send(ToastEvent {
            message: format!("Fed {} animals (+{} exp)", fed, TROUGH_FEED_EXPERIENCE),
            duration_secs: 2.0,
        });
        info!("[Barn/Feeding] Fed {} animals", fed);
    }
}
