//! Game viewport: scrolling backdrop, creature markers and the crosshair.
//!
//! All geometry comes from [`GameSession`]; these systems only copy it onto UI
//! nodes.  Markers are reconciled against the session whenever it changes:
//!
//! | Session list   | Marker entity                               |
//! |----------------|---------------------------------------------|
//! | `placed`       | spawned if missing, moved, border = target  |
//! | `despawning`   | fades and shrinks towards its centre        |
//! | neither        | despawned                                   |

use crate::config::GameConfig;
use crate::coords::Parallax;
use crate::menu::GameState;
use crate::placement::ScreenBox;
use crate::session::GameSession;
use bevy::prelude::*;
use bevy::ui::widget::NodeImageMode;
use std::collections::HashSet;

const BACKDROP_IMAGE: &str = "backdrop/abyss.png";
/// Edge length of one backdrop tile, in pixels.
pub const BACKDROP_TILE_PX: i32 = 480;
const MARKER_BORDER_PX: f32 = 3.0;
/// Frame border around the viewport; children are laid out inside it.
pub const VIEWPORT_BORDER_PX: f32 = 2.0;

// ── Component markers ─────────────────────────────────────────────────────────

/// Fixed-size clipping node every marker is parented to.
#[derive(Component)]
pub struct ViewportRoot;

#[derive(Component)]
pub struct Backdrop;

/// UI node showing one spawn from the session's placed list.
#[derive(Component, Debug)]
pub struct CreatureMarker {
    pub spawn_id: String,
}

#[derive(Component)]
pub struct CrosshairNode;

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct ViewportPlugin;

impl Plugin for ViewportPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera)
            .add_systems(OnEnter(GameState::Playing), setup_viewport)
            .add_systems(
                Update,
                (
                    sync_backdrop_system,
                    sync_markers_system,
                    sync_crosshair_system,
                )
                    .run_if(in_state(GameState::Playing).and(resource_exists::<GameSession>)),
            );
    }
}

// ── Colour helpers ────────────────────────────────────────────────────────────

fn viewport_border() -> Color {
    Color::srgb(0.10, 0.30, 0.38)
}
fn target_border() -> Color {
    Color::srgb(1.0, 0.36, 0.28)
}
fn crosshair_idle() -> Color {
    Color::srgb(0.80, 0.95, 1.0)
}

// ── Geometry helpers ──────────────────────────────────────────────────────────

/// Backdrop node offset for a parallax state, reduced into `(-tile, 0]`.
pub fn backdrop_offset(parallax: Parallax, tile: i32) -> (f32, f32) {
    let (dx, dy) = parallax.draw_offset();
    let reduce = |v: i32| -((-v).rem_euclid(tile)) as f32;
    (reduce(dx), reduce(dy))
}

/// Box of a caught marker `progress` of the way through its removal,
/// shrinking to half size around its centre.
pub fn despawn_box(rect: &ScreenBox, progress: f32) -> ScreenBox {
    let size = rect.size * (1.0 - 0.5 * progress.clamp(0.0, 1.0));
    let inset = (rect.size - size) / 2.0;
    ScreenBox {
        left: rect.left + inset,
        top: rect.top + inset,
        size,
    }
}

/// Outer size of the viewport frame, so its inner area matches the
/// configured viewport the session lays markers out in.
pub fn frame_size(config: &GameConfig) -> Vec2 {
    Vec2::new(
        config.viewport_width + 2.0 * VIEWPORT_BORDER_PX,
        config.viewport_height + 2.0 * VIEWPORT_BORDER_PX,
    )
}

fn place_node(node: &mut Node, rect: &ScreenBox) {
    node.left = Val::Px(rect.left);
    node.top = Val::Px(rect.top);
    node.width = Val::Px(rect.size);
    node.height = Val::Px(rect.size);
}

fn marker_border(targeted: bool) -> BorderColor {
    if targeted {
        BorderColor::all(target_border())
    } else {
        BorderColor::all(Color::NONE)
    }
}

// ── Startup / OnEnter(Playing) ────────────────────────────────────────────────

pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Spawn the viewport frame, backdrop and crosshair.
pub fn setup_viewport(
    mut commands: Commands,
    config: Res<GameConfig>,
    asset_server: Res<AssetServer>,
) {
    let tile = BACKDROP_TILE_PX as f32;
    let frame = frame_size(&config);
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        })
        .with_children(|screen| {
            screen
                .spawn((
                    Node {
                        width: Val::Px(frame.x),
                        height: Val::Px(frame.y),
                        border: UiRect::all(Val::Px(VIEWPORT_BORDER_PX)),
                        overflow: Overflow::clip(),
                        ..default()
                    },
                    BorderColor::all(viewport_border()),
                    BackgroundColor(Color::srgb(0.0, 0.03, 0.07)),
                    ViewportRoot,
                ))
                .with_children(|vp| {
                    vp.spawn((
                        Node {
                            position_type: PositionType::Absolute,
                            width: Val::Px(config.viewport_width + tile),
                            height: Val::Px(config.viewport_height + tile),
                            ..default()
                        },
                        ImageNode {
                            image_mode: NodeImageMode::Tiled {
                                tile_x: true,
                                tile_y: true,
                                stretch_value: 1.0,
                            },
                            ..ImageNode::new(asset_server.load(BACKDROP_IMAGE))
                        },
                        Backdrop,
                    ));
                    vp.spawn((
                        Node {
                            position_type: PositionType::Absolute,
                            width: Val::Px(config.crosshair_size),
                            height: Val::Px(config.crosshair_size),
                            border: UiRect::all(Val::Px(2.0)),
                            ..default()
                        },
                        BorderColor::all(crosshair_idle()),
                        ZIndex(10),
                        Visibility::Hidden,
                        CrosshairNode,
                    ));
                });
        });
    info!(
        "viewport ready ({}×{})",
        config.viewport_width, config.viewport_height
    );
}

// ── Update (Playing only) ─────────────────────────────────────────────────────

pub fn sync_backdrop_system(
    session: Res<GameSession>,
    mut query: Query<&mut Node, With<Backdrop>>,
) {
    if !session.is_changed() {
        return;
    }
    let (left, top) = backdrop_offset(session.parallax(), BACKDROP_TILE_PX);
    for mut node in query.iter_mut() {
        node.left = Val::Px(left);
        node.top = Val::Px(top);
    }
}

/// Reconcile marker entities with the session's placed and despawning lists.
pub fn sync_markers_system(
    mut commands: Commands,
    session: Res<GameSession>,
    asset_server: Res<AssetServer>,
    roots: Query<Entity, With<ViewportRoot>>,
    mut markers: Query<(
        Entity,
        &CreatureMarker,
        &mut Node,
        &mut BorderColor,
        &mut ImageNode,
    )>,
) {
    if !session.is_changed() {
        return;
    }
    let Ok(root) = roots.single() else {
        return;
    };
    let target = session.target().spawn_id();
    let mut shown: HashSet<&str> = HashSet::new();

    for (entity, marker, mut node, mut border, mut image) in markers.iter_mut() {
        if let Some(placed) = session
            .placed()
            .iter()
            .find(|p| p.spawn_id == marker.spawn_id)
        {
            place_node(&mut node, &placed.rect);
            *border = marker_border(target == Some(placed.spawn_id.as_str()));
            image.color = Color::WHITE;
            shown.insert(placed.spawn_id.as_str());
        } else if let Some(fading) = session
            .despawning()
            .iter()
            .find(|d| d.creature.spawn_id == marker.spawn_id)
        {
            let progress = session.despawn_progress(fading);
            place_node(&mut node, &despawn_box(&fading.creature.rect, progress));
            *border = marker_border(false);
            image.color = Color::WHITE.with_alpha(1.0 - progress);
            shown.insert(fading.creature.spawn_id.as_str());
        } else {
            commands.entity(entity).despawn();
        }
    }

    for placed in session.placed() {
        if shown.contains(placed.spawn_id.as_str()) {
            continue;
        }
        let Some(spawn) = session.catalog().get(&placed.spawn_id) else {
            warn!("placed creature {} missing from catalog", placed.spawn_id);
            continue;
        };
        let mut node = Node {
            position_type: PositionType::Absolute,
            border: UiRect::all(Val::Px(MARKER_BORDER_PX)),
            ..default()
        };
        place_node(&mut node, &placed.rect);
        commands.spawn((
            node,
            ImageNode::new(asset_server.load(spawn.image)),
            marker_border(target == Some(placed.spawn_id.as_str())),
            CreatureMarker {
                spawn_id: placed.spawn_id.clone(),
            },
            ChildOf(root),
        ));
    }
}

pub fn sync_crosshair_system(
    session: Res<GameSession>,
    config: Res<GameConfig>,
    mut query: Query<(&mut Node, &mut BorderColor, &mut Visibility), With<CrosshairNode>>,
) {
    if !session.is_changed() {
        return;
    }
    let (left, top) = session.crosshair().top_left(config.crosshair_size);
    let color = if session.target().is_targeting() {
        target_border()
    } else {
        crosshair_idle()
    };
    for (mut node, mut border, mut visibility) in query.iter_mut() {
        node.left = Val::Px(left);
        node.top = Val::Px(top);
        *border = BorderColor::all(color);
        *visibility = if session.scene_started() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}
