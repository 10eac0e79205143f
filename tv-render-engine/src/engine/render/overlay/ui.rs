use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::camera::RenderTarget;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat, TextureUsages};
use constants::media::OVERLAY_FONT;
use constants::screen::{OVERLAY_FONT_SIZE, OVERLAY_HEIGHT, OVERLAY_WIDTH, VOLUME_BAR_SEGMENTS};

use super::model::{OverlayFrame, OverlayModel, VolumeIndicator};
use crate::engine::store::{ChannelStore, StoreChanged};

// Layout in render target pixels.
const MARGIN_X: f32 = 85.0;
const MARGIN_TOP: f32 = 61.0;
const BAR_TOP: f32 = 116.0;
const SEGMENT_PITCH: f32 = 14.7;
const SEGMENT_FILLED: (f32, f32) = (9.0, 25.0);
const SEGMENT_EMPTY: (f32, f32) = (4.0, 4.0);

/// Texture the overlay UI renders into, sampled by the screen material.
#[derive(Resource, Clone)]
pub struct OverlayTarget(pub Handle<Image>);

#[derive(Resource, Default, Deref, DerefMut)]
pub struct Overlay(pub OverlayModel);

#[derive(Component)]
pub struct OverlayCamera;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayElement {
    ChannelNumber,
    VolumeLabel,
    VolumeBar,
    NoSignal,
    Buffering,
}

#[derive(Component)]
pub struct VolumeSegment(pub usize);

pub fn create_overlay_target(images: &mut Assets<Image>) -> Handle<Image> {
    let size = Extent3d {
        width: OVERLAY_WIDTH,
        height: OVERLAY_HEIGHT,
        depth_or_array_layers: 1,
    };
    let mut image = Image::new_fill(
        size,
        TextureDimension::D2,
        &[0, 0, 0, 0],
        TextureFormat::Bgra8UnormSrgb,
        RenderAssetUsages::default(),
    );
    image.texture_descriptor.usage =
        TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST | TextureUsages::RENDER_ATTACHMENT;
    images.add(image)
}

pub fn spawn_overlay_ui(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    asset_server: Res<AssetServer>,
) {
    let target = create_overlay_target(&mut images);

    let camera = commands
        .spawn((
            OverlayCamera,
            Name::new("OverlayCamera"),
            Camera2d,
            Camera {
                target: RenderTarget::Image(target.clone().into()),
                clear_color: ClearColorConfig::Custom(Color::NONE),
                order: -1,
                ..default()
            },
        ))
        .id();

    let font = TextFont {
        font: asset_server.load(OVERLAY_FONT),
        font_size: OVERLAY_FONT_SIZE,
        ..default()
    };
    let hidden = Visibility::Hidden;

    commands
        .spawn((
            Name::new("OverlayRoot"),
            UiTargetCamera(camera),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
        ))
        .with_children(|root| {
            root.spawn((
                OverlayElement::ChannelNumber,
                Text::new("001"),
                font.clone(),
                TextColor(Color::WHITE),
                TextLayout::new_with_justify(JustifyText::Right),
                hidden,
                Node {
                    position_type: PositionType::Absolute,
                    right: Val::Px(MARGIN_X),
                    top: Val::Px(MARGIN_TOP),
                    ..default()
                },
            ));

            // Volume and buffering share the top-left corner.
            for (element, label) in [
                (OverlayElement::VolumeLabel, "VOLUME"),
                (OverlayElement::Buffering, "BUFFERING"),
            ] {
                root.spawn((
                    element,
                    Text::new(label),
                    font.clone(),
                    TextColor(Color::WHITE),
                    hidden,
                    Node {
                        position_type: PositionType::Absolute,
                        left: Val::Px(MARGIN_X),
                        top: Val::Px(MARGIN_TOP),
                        ..default()
                    },
                ));
            }

            root.spawn((
                OverlayElement::VolumeBar,
                hidden,
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(MARGIN_X),
                    top: Val::Px(BAR_TOP),
                    height: Val::Px(SEGMENT_FILLED.1),
                    align_items: AlignItems::Center,
                    column_gap: Val::Px(10.0),
                    ..default()
                },
            ))
            .with_children(|bar| {
                bar.spawn((Text::new("-"), font.clone(), TextColor(Color::WHITE)));
                bar.spawn(Node {
                    width: Val::Px(SEGMENT_PITCH * VOLUME_BAR_SEGMENTS as f32),
                    height: Val::Px(SEGMENT_FILLED.1),
                    align_items: AlignItems::Center,
                    ..default()
                })
                .with_children(|segments| {
                    for index in 0..VOLUME_BAR_SEGMENTS {
                        segments
                            .spawn(Node {
                                width: Val::Px(SEGMENT_PITCH),
                                height: Val::Percent(100.0),
                                align_items: AlignItems::Center,
                                ..default()
                            })
                            .with_children(|slot| {
                                slot.spawn((
                                    VolumeSegment(index),
                                    BackgroundColor(Color::WHITE),
                                    Node {
                                        width: Val::Px(SEGMENT_EMPTY.0),
                                        height: Val::Px(SEGMENT_EMPTY.1),
                                        ..default()
                                    },
                                ));
                            });
                    }
                });
                bar.spawn((Text::new("+"), font.clone(), TextColor(Color::WHITE)));
            });

            root.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    align_items: AlignItems::Center,
                    justify_content: JustifyContent::Center,
                    ..default()
                },
            ))
            .with_children(|centre| {
                centre.spawn((
                    OverlayElement::NoSignal,
                    Text::new("NO SIGNAL"),
                    font.clone(),
                    TextColor(Color::WHITE),
                    TextLayout::new_with_justify(JustifyText::Center),
                    hidden,
                ));
            });
        });

    commands.insert_resource(OverlayTarget(target));
    println!("✓ Screen overlay ready ({}x{})", OVERLAY_WIDTH, OVERLAY_HEIGHT);
}

/// Advance the indicator timers from store diffs and push the frame into
/// the UI tree.
pub fn update_overlay(
    mut overlay: ResMut<Overlay>,
    mut store: ResMut<ChannelStore>,
    mut changes: EventReader<StoreChanged>,
    time: Res<Time>,
    mut elements: Query<(&OverlayElement, &mut Visibility, Option<&mut Text>)>,
    mut segments: Query<(&VolumeSegment, &mut Node)>,
) {
    let now = time.elapsed_secs_f64();
    for change in changes.read() {
        overlay.on_store_changed(change, now);
    }

    let shown = !store.phase.is_off() && overlay.volume_visible(now);
    if store.volume_displayed != shown {
        store.set_volume_displayed(shown);
    }

    let frame = overlay.frame(&store, now);
    for (element, mut visibility, text) in &mut elements {
        let (visible, content) = element_state(*element, &frame);
        visibility.set_if_neq(if visible { Visibility::Inherited } else { Visibility::Hidden });
        if let (Some(mut text), Some(content)) = (text, content) {
            if text.0 != content {
                text.0 = content;
            }
        }
    }

    if let Some(VolumeIndicator::Level { filled }) = frame.volume {
        for (segment, mut node) in &mut segments {
            let (width, height) = if segment.0 < filled { SEGMENT_FILLED } else { SEGMENT_EMPTY };
            if node.width != Val::Px(width) {
                node.width = Val::Px(width);
                node.height = Val::Px(height);
            }
        }
    }
}

fn element_state(element: OverlayElement, frame: &OverlayFrame) -> (bool, Option<String>) {
    match element {
        OverlayElement::ChannelNumber => (frame.channel.is_some(), frame.channel.clone()),
        OverlayElement::VolumeLabel => match frame.volume {
            Some(VolumeIndicator::Muted) => (true, Some("MUTE".to_string())),
            Some(VolumeIndicator::Level { .. }) => (true, Some("VOLUME".to_string())),
            None => (false, None),
        },
        OverlayElement::VolumeBar => {
            (matches!(frame.volume, Some(VolumeIndicator::Level { .. })), None)
        }
        OverlayElement::NoSignal => (frame.no_signal.is_some(), frame.no_signal.clone()),
        OverlayElement::Buffering => (frame.buffering, None),
    }
}
