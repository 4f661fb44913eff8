use bevy::prelude::*;
use rand::Rng;
use crate::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Deal validity
// ─────────────────────────────────────────────────────────────────────────────

/// An animal satisfies a bounty when the kind matches and it has reached
/// the asked level. Sickness does not disqualify a sale.
pub fn is_valid_deal(animal: &Animal, bounty: &AnimalBounty) -> bool {
    animal.kind == bounty.kind && animal.level() >= bounty.min_level
}

// ─────────────────────────────────────────────────────────────────────────────
// Purchases
// ─────────────────────────────────────────────────────────────────────────────

fn generate_animal_name(kind: AnimalKind, rng: &mut impl Rng) -> String {
    let cow_names = ["Bessie", "Daisy", "Rosie", "Mocha", "Cream"];
    let sheep_names = ["Fluffkins", "Woolie", "Cotton", "Misty", "Pearl"];
    let chicken_names = ["Penny", "Goldie", "Clucky", "Nugget", "Dottie"];

    let names = match kind {
        AnimalKind::Cow => &cow_names[..],
        AnimalKind::Sheep => &sheep_names[..],
        AnimalKind::Chicken => &chicken_names[..],
    };
    names[rng.gen_range(0..names.len())].to_string()
}

/// Store-side handler for purchases coming out of the exchange menu.
/// Validates the species, the housing capacity, and the wallet before
/// adding the animal.
pub fn handle_animal_purchase(
    mut events: EventReader<AnimalPurchaseEvent>,
    mut barn: ResMut<BarnState>,
    mut wallet: ResMut<PlayerWallet>,
    mut toast_writer: EventWriter<ToastEvent>,
) {
    let mut rng = rand::thread_rng();

    for ev in events.read() {
        if !ev.kind.lives_in_barn() {
            toast_writer.send(ToastEvent {
                message: format!("{}s live in the hen house!", ev.kind.name()),
                duration_secs: 3.0,
            });
            continue;
        }

        if barn.is_full() {
            toast_writer.send(ToastEvent {
                message: format!(
                    "The barn is full ({}/{}). Upgrade it for more room.",
                    barn.animals.len(),
                    barn.capacity()
                ),
                duration_secs: 3.0,
            });
            continue;
        }

        if wallet.coins < ev.price {
            toast_writer.send(ToastEvent {
                message: format!(
                    "Not enough coins! Need {}, have {}.",
                    ev.price, wallet.coins
                ),
                duration_secs: 3.0,
            });
            continue;
        }

        wallet.coins -= ev.price;
        let name = generate_animal_name(ev.kind, &mut rng);
        let Some(id) = barn.add_animal(ev.kind, name.clone()) else {
            continue;
        };

        toast_writer.send(ToastEvent {
            message: format!("{} the {} joins the barn!", name, ev.kind.name()),
            duration_secs: 3.0,
        });
        info!(
            "[Barn/Sales] Bought {} #{} ({}) for {} coins",
            ev.kind.name(),
            id,
            name,
            ev.price
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sale settlement
// ─────────────────────────────────────────────────────────────────────────────

/// Store-side handler for a confirmed sale. Re-validates everything: the
/// event is fire-and-forget from the UI's point of view, so the deal or
/// the animal may already be gone by the time it lands here.
pub fn handle_sell_animal(
    mut events: EventReader<SellAnimalEvent>,
    mut barn: ResMut<BarnState>,
    mut wallet: ResMut<PlayerWallet>,
    mut board: ResMut<BountyBoard>,
    mut deal: ResMut<ActiveDeal>,
    mut selected: ResMut<SelectedForSale>,
    mut toast_writer: EventWriter<ToastEvent>,
) {
    for ev in events.read() {
        let Some(bounty) = deal.0.clone() else {
            warn!("[Barn/Sales] Sale of animal {} without an active deal", ev.animal_id);
            continue;
        };
        if bounty.id != ev.bounty_id {
            warn!(
                "[Barn/Sales] Sale references bounty {} but deal {} is active",
                ev.bounty_id, bounty.id
            );
            continue;
        }

        match barn.animals.get(&ev.animal_id) {
            None => {
                warn!("[Barn/Sales] Animal {} is gone; sale dropped", ev.animal_id);
                continue;
            }
            Some(animal) if !is_valid_deal(animal, &bounty) => {
                toast_writer.send(ToastEvent {
                    message: format!("{} no longer qualifies for this deal.", animal.name),
                    duration_secs: 3.0,
                });
                continue;
            }
            Some(_) => {}
        }

        let Some(animal) = barn.remove_animal(ev.animal_id) else {
            continue;
        };
        wallet.coins += bounty.coins;
        board.take(bounty.id);

        // The sale completes the exchange: both mode resources revert.
        deal.0 = None;
        selected.0 = None;

        toast_writer.send(ToastEvent {
            message: format!("Sold {} for {} coins!", animal.name, bounty.coins),
            duration_secs: 3.5,
        });
        info!(
            "[Barn/Sales] Sold {} #{} under bounty {} for {} coins",
            animal.kind.name(),
            animal.id,
            bounty.id,
            bounty.coins
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cow(experience: u32) -> Animal {
        Animal {
            id: 1,
            kind: AnimalKind::Cow,
            name: "Bessie".to_string(),
            experience,
            status: AnimalStatus::Idle,
        }
    }

    fn bounty(kind: AnimalKind, min_level: u8) -> AnimalBounty {
        AnimalBounty {
            id: 7,
            kind,
            min_level,
            coins: 100,
        }
    }

    #[test]
    fn test_deal_requires_matching_kind() {
        assert!(is_valid_deal(&cow(0), &bounty(AnimalKind::Cow, 1)));
        assert!(!is_valid_deal(&cow(0), &bounty(AnimalKind::Sheep, 1)));
    }

    #[test]
    fn test_deal_requires_min_level() {
        // 60 exp = level 3.
        assert!(is_valid_deal(&cow(60), &bounty(AnimalKind::Cow, 3)));
        assert!(!is_valid_deal(&cow(59), &bounty(AnimalKind::Cow, 3)));
    }

    #[test]
    fn test_sick_animals_still_qualify() {
        let mut animal = cow(60);
        animal.status = AnimalStatus::Sick;
        assert!(is_valid_deal(&animal, &bounty(AnimalKind::Cow, 3)));
    }

    #[test]
    fn test_generated_names_match_kind_pool() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let name = generate_animal_name(AnimalKind::Sheep, &mut rng);
            assert!(
                ["Fluffkins", "Woolie", "Cotton", "Misty", "Pearl"].contains(&name.as_str())
            );
        }
    }
}
