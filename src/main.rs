use abyss_sampler::config::{self, GameConfig};
use abyss_sampler::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use abyss_sampler::hud::HudPlugin;
use abyss_sampler::input::InputPlugin;
use abyss_sampler::menu::MenuPlugin;
use abyss_sampler::panels::PanelsPlugin;
use abyss_sampler::session;
use abyss_sampler::viewport::ViewportPlugin;
use bevy::prelude::*;
use bevy::window::WindowResolution;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Abyss Sampler".into(),
                resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.0, 0.02, 0.05)))
        // Compiled defaults; load_game_config overwrites them from
        // assets/game.toml (if present) before anything else reads them.
        .insert_resource(GameConfig::default())
        .add_systems(
            Startup,
            (
                config::load_game_config,
                session::init_session.after(config::load_game_config),
            ),
        )
        // MenuPlugin registers GameState and must come first.
        .add_plugins(MenuPlugin)
        .add_plugins((InputPlugin, ViewportPlugin, HudPlugin, PanelsPlugin))
        .run();
}
