//! Save / load for the game store.
//!
//! Persistence belongs to the store, never to the presentation layer: a
//! snapshot covers the barn record, the island, and the wallet. The deal
//! overlay and selection are session state and are reset on load.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::fs;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

use crate::shared::*;

pub const SAVE_VERSION: u32 = 1;

// ═══════════════════════════════════════════════════════════════════════
// TYPES & EVENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub barn: BarnState,
    pub island: IslandState,
    pub wallet: PlayerWallet,
}

/// Sent by input (F5) to snapshot the store.
#[derive(Event, Debug, Clone)]
pub struct SaveRequestEvent;

/// Sent by input (F9) to restore the last snapshot.
#[derive(Event, Debug, Clone)]
pub struct LoadRequestEvent;

// ═══════════════════════════════════════════════════════════════════════
// FILE I/O
// ═══════════════════════════════════════════════════════════════════════

#[cfg(not(target_arch = "wasm32"))]
fn save_path() -> PathBuf {
    PathBuf::from("saves").join("barn.json")
}

#[cfg(not(target_arch = "wasm32"))]
fn write_save(data: &SaveData) -> Result<(), String> {
    let path = save_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| format!("Could not create saves dir: {}", e))?;
    }
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| format!("Serialization failed: {}", e))?;

    // Write to a temp file first, then rename for atomicity.
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, &json)
        .map_err(|e| format!("Write failed for {}: {}", tmp_path.display(), e))?;
    fs::rename(&tmp_path, &path).map_err(|e| format!("Rename failed: {}", e))?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn write_save(_data: &SaveData) -> Result<(), String> {
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn read_save() -> Result<SaveData, String> {
    let path = save_path();
    if !path.exists() {
        return Err("No save file found".to_string());
    }
    let json = fs::read_to_string(&path)
        .map_err(|e| format!("Read failed for {}: {}", path.display(), e))?;
    let data: SaveData =
        serde_json::from_str(&json).map_err(|e| format!("Deserialization failed: {}", e))?;

    // Version check — future versions can add migration here.
    if data.version != SAVE_VERSION {
        warn!(
            "Save has version {} but current version is {}. Attempting to load anyway.",
            data.version, SAVE_VERSION
        );
    }
    Ok(data)
}

#[cfg(target_arch = "wasm32")]
fn read_save() -> Result<SaveData, String> {
    Err("Saves not available in browser".to_string())
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

fn save_load_hotkeys(
    input: Res<PlayerInput>,
    mut save_writer: EventWriter<SaveRequestEvent>,
    mut load_writer: EventWriter<LoadRequestEvent>,
) {
    if input.quicksave {
        save_writer.send(SaveRequestEvent);
    }
    if input.quickload {
        load_writer.send(LoadRequestEvent);
    }
}

fn handle_save_requests(
    mut events: EventReader<SaveRequestEvent>,
    barn: Res<BarnState>,
    island: Res<IslandState>,
    wallet: Res<PlayerWallet>,
    mut toast_writer: EventWriter<ToastEvent>,
) {
    for _ in events.read() {
        let data = SaveData {
            version: SAVE_VERSION,
            barn: barn.clone(),
            island: island.clone(),
            wallet: wallet.clone(),
        };
        match write_save(&data) {
            Ok(()) => {
                toast_writer.send(ToastEvent {
                    message: "Game saved.".to_string(),
                    duration_secs: 2.0,
                });
                info!("[Save] Snapshot written ({} animals)", data.barn.animals.len());
            }
            Err(err) => {
                toast_writer.send(ToastEvent {
                    message: "Save failed!".to_string(),
                    duration_secs: 3.0,
                });
                warn!("[Save] {}", err);
            }
        }
    }
}

fn handle_load_requests(
    mut events: EventReader<LoadRequestEvent>,
    mut barn: ResMut<BarnState>,
    mut island: ResMut<IslandState>,
    mut wallet: ResMut<PlayerWallet>,
    mut deal: ResMut<ActiveDeal>,
    mut selected: ResMut<SelectedForSale>,
    mut toast_writer: EventWriter<ToastEvent>,
) {
    for _ in events.read() {
        match read_save() {
            Ok(data) => {
                *barn = data.barn;
                *island = data.island;
                *wallet = data.wallet;
                // Session state never survives a load.
                deal.0 = None;
                selected.0 = None;
                toast_writer.send(ToastEvent {
                    message: "Game loaded.".to_string(),
                    duration_secs: 2.0,
                });
                info!("[Save] Snapshot restored");
            }
            Err(err) => {
                toast_writer.send(ToastEvent {
                    message: "Load failed!".to_string(),
                    duration_secs: 3.0,
                });
                warn!("[Save] {}", err);
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SaveRequestEvent>()
            .add_event::<LoadRequestEvent>()
            .add_systems(
                Update,
                (save_load_hotkeys, handle_save_requests, handle_load_requests)
                    .chain()
                    .run_if(in_state(GameState::Barn)),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_data_round_trips_through_json() {
        let mut barn = BarnState::default();
        barn.add_animal(AnimalKind::Cow, "Bessie".to_string()).unwrap();
        let data = SaveData {
            version: SAVE_VERSION,
            barn,
            island: IslandState {
                biome: Biome::Desert,
            },
            wallet: PlayerWallet { coins: 1234 },
        };

        let json = serde_json::to_string(&data).unwrap();
        let back: SaveData = serde_json::from_str(&json).unwrap();
        assert_eq!(back.version, SAVE_VERSION);
        assert_eq!(back.barn.animals.len(), 1);
        assert_eq!(back.island.biome, Biome::Desert);
        assert_eq!(back.wallet.coins, 1234);
    }
}
