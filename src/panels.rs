//! Inventory panel, species encyclopedia and the win overlay.
//!
//! ## Systems (registered by `PanelsPlugin`)
//!
//! | System                         | Schedule              | Purpose                              |
//! |--------------------------------|-----------------------|--------------------------------------|
//! | `setup_panels`                 | `OnEnter(Playing)`    | Spawn hidden panel + overlay roots   |
//! | `panel_visibility_system`      | `Update / in Playing` | Show/hide from session flags         |
//! | `rebuild_inventory_system`     | `Update / in Playing` | Rebuild cards when samples change    |
//! | `rebuild_encyclopedia_system`  | `Update / in Playing` | Rebuild cards when unlocks change    |
//! | `release_button_system`        | `Update / in Playing` | LIBERAR → `GameSession::release`     |
//! | `win_button_system`            | `Update / in Playing` | CONTINUE / RESET                     |

use crate::catalog::SpeciesTemplate;
use crate::constants::MASKED_NAME;
use crate::inventory::{InventoryItem, UnlockedSpecies};
use crate::menu::{spacer, GameState};
use crate::session::GameSession;
use bevy::prelude::*;

const CARD_WIDTH_PX: f32 = 180.0;
const THUMB_PX: f32 = 72.0;

// ── Component markers ─────────────────────────────────────────────────────────

#[derive(Component)]
pub struct InventoryPanel;

#[derive(Component)]
pub struct InventoryGrid;

#[derive(Component)]
pub struct EncyclopediaPanel;

#[derive(Component)]
pub struct EncyclopediaGrid;

#[derive(Component)]
pub struct WinOverlay;

/// LIBERAR button on the card of one sample.
#[derive(Component, Debug, Clone)]
pub struct ReleaseButton {
    pub item_id: String,
}

#[derive(Component)]
pub struct WinContinueButton;

#[derive(Component)]
pub struct WinResetButton;

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct PanelsPlugin;

impl Plugin for PanelsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), setup_panels)
            .add_systems(
                Update,
                (
                    release_button_system,
                    win_button_system,
                    panel_visibility_system,
                    rebuild_inventory_system,
                    rebuild_encyclopedia_system,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing).and(resource_exists::<GameSession>)),
            );
    }
}

// ── Card content ──────────────────────────────────────────────────────────────

/// Label/value rows printed on an inventory card.
pub fn inventory_rows(item: &InventoryItem) -> [(&'static str, &str); 6] {
    [
        ("HEADING", item.heading.as_str()),
        ("DEPTH", item.depth.as_str()),
        ("TEMP", item.readings.temperature),
        ("SALINITY", item.readings.salinity),
        ("O2 CON.", item.readings.o2_concentration),
        ("O2 SAT.", item.readings.o2_saturation),
    ]
}

/// Each template once, with its unlock flag.
pub fn encyclopedia_entries<'a>(
    templates: &'a [SpeciesTemplate],
    unlocked: &UnlockedSpecies,
) -> Vec<(&'a SpeciesTemplate, bool)> {
    templates
        .iter()
        .map(|t| (t, unlocked.contains(t.image)))
        .collect()
}

// ── Colour helpers ────────────────────────────────────────────────────────────

fn panel_bg() -> Color {
    Color::srgba(0.01, 0.06, 0.10, 0.95)
}
fn panel_border() -> Color {
    Color::srgb(0.16, 0.48, 0.56)
}
fn card_bg() -> Color {
    Color::srgb(0.03, 0.10, 0.15)
}
fn title_color() -> Color {
    Color::srgb(0.55, 0.92, 0.95)
}
fn label_color() -> Color {
    Color::srgb(0.42, 0.60, 0.68)
}
fn value_color() -> Color {
    Color::srgb(0.80, 0.96, 1.0)
}
fn release_bg() -> Color {
    Color::srgb(0.28, 0.06, 0.06)
}
fn release_border() -> Color {
    Color::srgb(0.60, 0.12, 0.12)
}
fn continue_bg() -> Color {
    Color::srgb(0.04, 0.22, 0.30)
}
fn reset_bg() -> Color {
    Color::srgb(0.30, 0.16, 0.04)
}
fn locked_tint() -> Color {
    Color::srgb(0.25, 0.25, 0.25)
}

// ── OnEnter(Playing): spawn roots ─────────────────────────────────────────────

fn panel_root() -> Node {
    Node {
        position_type: PositionType::Absolute,
        left: Val::Percent(10.0),
        right: Val::Percent(10.0),
        top: Val::Percent(12.0),
        bottom: Val::Percent(12.0),
        flex_direction: FlexDirection::Column,
        padding: UiRect::all(Val::Px(16.0)),
        border: UiRect::all(Val::Px(2.0)),
        overflow: Overflow::clip(),
        ..default()
    }
}

fn grid_node() -> Node {
    Node {
        flex_direction: FlexDirection::Row,
        flex_wrap: FlexWrap::Wrap,
        column_gap: Val::Px(12.0),
        row_gap: Val::Px(12.0),
        ..default()
    }
}

fn title(parent: &mut ChildSpawnerCommands<'_>, text: &str, size: f32) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(title_color()),
    ));
}

/// Spawn the (hidden) inventory, encyclopedia and win overlay roots.
pub fn setup_panels(mut commands: Commands) {
    commands
        .spawn((
            panel_root(),
            BackgroundColor(panel_bg()),
            BorderColor::all(panel_border()),
            ZIndex(20),
            Visibility::Hidden,
            InventoryPanel,
        ))
        .with_children(|panel| {
            title(panel, "INVENTORY", 24.0);
            spacer(panel, 12.0);
            panel.spawn((grid_node(), InventoryGrid));
        });

    commands
        .spawn((
            panel_root(),
            BackgroundColor(panel_bg()),
            BorderColor::all(panel_border()),
            ZIndex(20),
            Visibility::Hidden,
            EncyclopediaPanel,
        ))
        .with_children(|panel| {
            title(panel, "ENCYCLOPEDIA", 24.0);
            spacer(panel, 12.0);
            panel.spawn((grid_node(), EncyclopediaGrid));
        });

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.8)),
            ZIndex(30),
            Visibility::Hidden,
            WinOverlay,
        ))
        .with_children(|overlay| {
            title(overlay, "EVERY SPECIES SAMPLED", 40.0);
            spacer(overlay, 32.0);
            overlay
                .spawn(Node {
                    column_gap: Val::Px(16.0),
                    ..default()
                })
                .with_children(|row| {
                    text_button(row, "CONTINUE", continue_bg(), panel_border(), WinContinueButton);
                    text_button(row, "RESET", reset_bg(), release_border(), WinResetButton);
                });
        });
}

fn text_button(
    parent: &mut ChildSpawnerCommands<'_>,
    label: &str,
    bg: Color,
    border: Color,
    tag: impl Bundle,
) {
    parent
        .spawn((
            Button,
            Node {
                padding: UiRect::axes(Val::Px(18.0), Val::Px(8.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(bg),
            BorderColor::all(border),
            tag,
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(label),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(value_color()),
            ));
        });
}

// ── Update (Playing only) ─────────────────────────────────────────────────────

fn visibility(shown: bool) -> Visibility {
    if shown {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

#[allow(clippy::type_complexity)]
pub fn panel_visibility_system(
    session: Res<GameSession>,
    mut inventory: Query<
        &mut Visibility,
        (
            With<InventoryPanel>,
            Without<EncyclopediaPanel>,
            Without<WinOverlay>,
        ),
    >,
    mut encyclopedia: Query<
        &mut Visibility,
        (With<EncyclopediaPanel>, Without<InventoryPanel>, Without<WinOverlay>),
    >,
    mut overlay: Query<
        &mut Visibility,
        (With<WinOverlay>, Without<InventoryPanel>, Without<EncyclopediaPanel>),
    >,
) {
    if !session.is_changed() {
        return;
    }
    let panels = session.panels();
    for mut v in inventory.iter_mut() {
        *v = visibility(panels.inventory_open);
    }
    for mut v in encyclopedia.iter_mut() {
        *v = visibility(panels.encyclopedia_open);
    }
    for mut v in overlay.iter_mut() {
        *v = visibility(session.win_visible());
    }
}

/// Rebuild the inventory cards whenever the held sample ids change.
pub fn rebuild_inventory_system(
    mut commands: Commands,
    session: Res<GameSession>,
    asset_server: Res<AssetServer>,
    grids: Query<(Entity, Option<&Children>), With<InventoryGrid>>,
    mut shown: Local<Vec<String>>,
) {
    if !session.is_changed() {
        return;
    }
    let ids: Vec<String> = session
        .inventory()
        .items()
        .iter()
        .map(|i| i.id.clone())
        .collect();
    if ids == *shown {
        return;
    }
    for (grid, children) in grids.iter() {
        if let Some(children) = children {
            for child in children.iter() {
                commands.entity(child).despawn();
            }
        }
        for item in session.inventory().items() {
            spawn_inventory_card(&mut commands, grid, item, &asset_server);
        }
    }
    *shown = ids;
}

fn spawn_inventory_card(
    commands: &mut Commands,
    grid: Entity,
    item: &InventoryItem,
    asset_server: &AssetServer,
) {
    commands
        .spawn((
            Node {
                width: Val::Px(CARD_WIDTH_PX),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                row_gap: Val::Px(4.0),
                padding: UiRect::all(Val::Px(8.0)),
                ..default()
            },
            BackgroundColor(card_bg()),
            ChildOf(grid),
        ))
        .with_children(|card| {
            card.spawn((
                Node {
                    width: Val::Px(THUMB_PX),
                    height: Val::Px(THUMB_PX),
                    ..default()
                },
                ImageNode::new(asset_server.load(item.image)),
            ));
            title(card, item.name, 16.0);
            for (label, value) in inventory_rows(item) {
                card.spawn(Node {
                    width: Val::Percent(100.0),
                    justify_content: JustifyContent::SpaceBetween,
                    ..default()
                })
                .with_children(|row| {
                    row.spawn((
                        Text::new(label),
                        TextFont {
                            font_size: 11.0,
                            ..default()
                        },
                        TextColor(label_color()),
                    ));
                    row.spawn((
                        Text::new(value),
                        TextFont {
                            font_size: 11.0,
                            ..default()
                        },
                        TextColor(value_color()),
                    ));
                });
            }
            text_button(
                card,
                "LIBERAR",
                release_bg(),
                release_border(),
                ReleaseButton {
                    item_id: item.id.clone(),
                },
            );
        });
}

/// Rebuild the encyclopedia whenever the unlock flags change.
pub fn rebuild_encyclopedia_system(
    mut commands: Commands,
    session: Res<GameSession>,
    asset_server: Res<AssetServer>,
    grids: Query<(Entity, Option<&Children>), With<EncyclopediaGrid>>,
    mut shown: Local<Option<Vec<bool>>>,
) {
    if !session.is_changed() {
        return;
    }
    let entries = encyclopedia_entries(session.catalog().templates(), session.unlocked());
    let flags: Vec<bool> = entries.iter().map(|(_, unlocked)| *unlocked).collect();
    if shown.as_ref() == Some(&flags) {
        return;
    }
    for (grid, children) in grids.iter() {
        if let Some(children) = children {
            for child in children.iter() {
                commands.entity(child).despawn();
            }
        }
        for (template, unlocked) in &entries {
            let tint = if *unlocked { Color::WHITE } else { locked_tint() };
            let name = if *unlocked { template.name } else { MASKED_NAME };
            commands
                .spawn((
                    Node {
                        width: Val::Px(CARD_WIDTH_PX),
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(8.0)),
                        ..default()
                    },
                    BackgroundColor(card_bg()),
                    ChildOf(grid),
                ))
                .with_children(|card| {
                    card.spawn((
                        Node {
                            width: Val::Px(THUMB_PX * 1.5),
                            height: Val::Px(THUMB_PX * 1.5),
                            ..default()
                        },
                        ImageNode {
                            color: tint,
                            ..ImageNode::new(asset_server.load(template.image))
                        },
                    ));
                    title(card, name, 14.0);
                });
        }
    }
    *shown = Some(flags);
}

pub fn release_button_system(
    query: Query<(&Interaction, &ReleaseButton), Changed<Interaction>>,
    mut session: ResMut<GameSession>,
) {
    for (interaction, button) in query.iter() {
        if *interaction == Interaction::Pressed && session.release(&button.item_id) {
            info!("released sample {}", button.item_id);
        }
    }
}

#[allow(clippy::type_complexity)]
pub fn win_button_system(
    continue_query: Query<&Interaction, (Changed<Interaction>, With<WinContinueButton>)>,
    reset_query: Query<&Interaction, (Changed<Interaction>, With<WinResetButton>)>,
    mut session: ResMut<GameSession>,
) {
    if continue_query.iter().any(|i| *i == Interaction::Pressed) {
        session.dismiss_win();
    }
    if reset_query.iter().any(|i| *i == Interaction::Pressed) {
        session.reset_progress();
        info!("progress reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SPECIES_BASE;
    use crate::inventory::{depth_label, heading_label, EnvironmentReadings};

    #[test]
    fn card_rows_in_display_order() {
        let item = InventoryItem {
            id: "AN-042".into(),
            name: "LIMÓN",
            image: "species/limon.png",
            heading: heading_label(60),
            depth: depth_label(1300),
            readings: EnvironmentReadings::default(),
        };
        let rows = inventory_rows(&item);
        let labels: Vec<_> = rows.iter().map(|(l, _)| *l).collect();
        assert_eq!(
            labels,
            ["HEADING", "DEPTH", "TEMP", "SALINITY", "O2 CON.", "O2 SAT."]
        );
        assert_eq!(rows[0].1, "60 *");
        assert_eq!(rows[1].1, "1300 m");
        assert_eq!(rows[2].1, "2.63 °C");
    }

    #[test]
    fn encyclopedia_lists_each_template_once() {
        let mut unlocked = UnlockedSpecies::default();
        unlocked.unlock(SPECIES_BASE[2].image);
        let entries = encyclopedia_entries(&SPECIES_BASE, &unlocked);
        assert_eq!(entries.len(), SPECIES_BASE.len());
        let flags: Vec<bool> = entries.iter().map(|(_, u)| *u).collect();
        assert_eq!(flags, [false, false, true, false, false]);
    }
}
