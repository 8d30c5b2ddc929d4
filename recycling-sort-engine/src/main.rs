use std::path::Path;
use std::sync::Arc;

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::window::FileDragAndDrop;
use constants::scene_settings::{PROXY_MARKER_SIZE, ZONE_MARKER_SIZE};
use constants::zone::ZoneLabel;

use recycling_sort_engine::engine::StatusMessage;
use recycling_sort_engine::engine::camera::sync_scene_pose;
use recycling_sort_engine::engine::classify::{ClassifyPlugin, ObjectCaptured, PaletteClassifier};
use recycling_sort_engine::engine::scene::{ContainerZone, DiscardProxy, MovableProxy, ScenePlugin};
use recycling_sort_engine::engine::score::{FileScoreStore, ScoreBoard, ScoreChanged, ScorePlugin};
use recycling_sort_engine::tools::drag::{DragToolPlugin, mouse_drag_adapter};

fn main() -> anyhow::Result<()> {
    let palette_path =
        Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/classifier/palette.json");
    let classifier = PaletteClassifier::load(&palette_path)?;
    let store = FileScoreStore::at_default_location()?;

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Recycling Sort".into(),
            ..default()
        }),
        ..default()
    }))
    .add_plugins((
        ScenePlugin,
        ClassifyPlugin {
            classifier: Arc::new(classifier),
        },
        ScorePlugin {
            store: Arc::new(store),
        },
        DragToolPlugin,
    ))
    .add_systems(Startup, (setup_camera, setup_hud))
    .add_systems(
        Update,
        (
            sync_scene_pose,
            mouse_drag_adapter,
            discard_on_escape,
            file_drop_capture,
            attach_zone_visuals,
            attach_proxy_visuals,
            update_status_text,
            update_score_text,
        ),
    );
    app.run();
    Ok(())
}

#[derive(Component)]
struct StatusText;

#[derive(Component)]
struct ScoreText;

fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera3d::default(), Transform::from_xyz(0.0, 0.0, 2.0)));
}

fn setup_hud(mut commands: Commands, score: Res<ScoreBoard>) {
    commands.spawn((
        StatusText,
        Name::new("StatusLine"),
        Text::new("Drop a photo onto the window to classify an object."),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 1.0, 1.0)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));

    commands.spawn((
        ScoreText,
        Name::new("ScoreLine"),
        Text::new(format!("Current score: {}", score.value())),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 1.0, 1.0)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            right: Val::Px(12.0),
            ..default()
        },
    ));

    let legend = ZoneLabel::ALL
        .iter()
        .map(|label| label.as_str())
        .collect::<Vec<_>>()
        .join("  |  ");
    commands.spawn((
        Name::new("BinLegend"),
        Text::new(format!("Bins, left to right:  {legend}")),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.8, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));
}

/// Escape abandons the current object so a new one can be captured.
fn discard_on_escape(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut discards: EventWriter<DiscardProxy>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        discards.write(DiscardProxy);
    }
}

/// Desktop image source: dropping an image file onto the window
/// captures it for classification.
fn file_drop_capture(
    mut drops: EventReader<FileDragAndDrop>,
    mut captures: EventWriter<ObjectCaptured>,
    mut messages: EventWriter<StatusMessage>,
) {
    for event in drops.read() {
        let FileDragAndDrop::DroppedFile { path_buf, .. } = event else {
            continue;
        };
        match image::open(path_buf) {
            Ok(img) => {
                captures.write(ObjectCaptured {
                    image: Arc::new(img),
                });
            }
            Err(err) => {
                warn!("could not read dropped file {}: {err}", path_buf.display());
                messages.write(StatusMessage(format!("Could not read image: {err}")));
            }
        }
    }
}

fn attach_zone_visuals(
    zones: Query<(Entity, &ContainerZone), Added<ContainerZone>>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, zone) in &zones {
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Rectangle::from_size(ZONE_MARKER_SIZE))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: zone.label.marker_color(),
                unlit: true,
                ..default()
            })),
        ));
    }
}

fn attach_proxy_visuals(
    proxies: Query<(Entity, &MovableProxy), Added<MovableProxy>>,
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, proxy) in &proxies {
        let texture = images.add(Image::from_dynamic(
            (*proxy.image).clone(),
            true,
            RenderAssetUsages::default(),
        ));
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Rectangle::from_size(PROXY_MARKER_SIZE))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color_texture: Some(texture),
                unlit: true,
                ..default()
            })),
        ));
    }
}

fn update_status_text(
    mut messages: EventReader<StatusMessage>,
    mut texts: Query<&mut Text, With<StatusText>>,
) {
    let Some(message) = messages.read().last() else {
        return;
    };
    for mut text in &mut texts {
        text.0 = message.0.clone();
    }
}

fn update_score_text(
    mut changes: EventReader<ScoreChanged>,
    mut texts: Query<&mut Text, With<ScoreText>>,
) {
    let Some(change) = changes.read().last() else {
        return;
    };
    for mut text in &mut texts {
        text.0 = format!("Current score: {}", change.0);
    }
}
