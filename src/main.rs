mod shared;
mod input;
mod barn;
mod collectibles;
mod ui;
mod save;
mod data;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use shared::*;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Mossvale".into(),
                        resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                        present_mode: PresentMode::AutoVsync,
                        resizable: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        // Game state
        .init_state::<GameState>()
        // Shared resources
        .init_resource::<BarnState>()
        .init_resource::<IslandState>()
        .init_resource::<PlayerWallet>()
        .init_resource::<BountyBoard>()
        .init_resource::<ShopData>()
        .init_resource::<ActiveDeal>()
        .init_resource::<SelectedForSale>()
        .init_resource::<GuideSeen>()
        .init_resource::<PlayerInput>()
        .init_resource::<InteractionClaimed>()
        // Events
        .add_event::<AnimalPurchaseEvent>()
        .add_event::<SellAnimalEvent>()
        .add_event::<BuildingUpgradeEvent>()
        .add_event::<FeedBarnEvent>()
        .add_event::<ToastEvent>()
        // UI clicks claim before world clicks
        .configure_sets(Update, (ClickSet::Ui, ClickSet::World).chain())
        // Domain plugins
        .add_plugins((
            input::InputPlugin,
            data::DataPlugin,
            barn::BarnPlugin,
            collectibles::CollectiblesPlugin,
            ui::UiPlugin,
            save::SavePlugin,
        ))
        .run();
}
