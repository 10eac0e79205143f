use std::path::Path;

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::input::ButtonState;
use bevy::input::keyboard::KeyboardInput;
use bevy::prelude::*;
use constants::camera::{POSE_NUDGE_STEP, POSE_NUDGE_STEP_FINE};
use constants::media::BOOKMARK_FILE;

use super::rename::{RenameEntry, RenameOutcome};
use super::PanelVisibility;
use crate::engine::camera::{ViewRequest, ViewportCamera};
use crate::engine::core::app_state::FpsText;
use crate::engine::store::ChannelStore;
use crate::engine::store::bookmarks::{BookmarkError, BookmarkSet};
use crate::engine::store::layers::EnvironmentLayer;

const PANEL_WIDTH: f32 = 300.0;

const PANEL_BG: Color = Color::srgb(0.10, 0.11, 0.13);
const SECTION_BG: Color = Color::srgb(0.12, 0.13, 0.15);
const BUTTON_IDLE: Color = Color::srgb(0.22, 0.24, 0.28);
const BUTTON_HOVER: Color = Color::srgb(0.26, 0.28, 0.32);
const BUTTON_PRESSED: Color = Color::srgb(0.18, 0.20, 0.24);
const BUTTON_ACTIVE: Color = Color::srgb(0.16, 0.45, 0.22);
const BUTTON_DANGER: Color = Color::srgb(0.28, 0.10, 0.10);
const HINT_TEXT: Color = Color::srgb(0.62, 0.64, 0.68);

const HINTS: &str = "Drag: orbit  Right drag: pan  Wheel: zoom\n\
WASD + Q/E: move  Shift: fast\n\
O: power  M: mute  +/-: volume\n\
Arrows / digits: channels\n\
Space: default view  Ctrl+1..9: bookmarks\n\
L: animation  H: hide panel\n\
Shift-click X/Y/Z: fine nudge\n\
Rename: type, Enter keeps, Esc cancels";

#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct CameraReadout;

#[derive(Component)]
pub struct BookmarkList;

/// Name line of a bookmark row.
#[derive(Component)]
pub struct BookmarkLabel(pub usize);

/// Opens (or stores) the name entry of a bookmark.
#[derive(Component)]
pub struct RenameButton(pub usize);

/// Half of the camera pose a nudge button moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoseField {
    Position,
    Target,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoseAxis {
    X,
    Y,
    Z,
}

impl PoseAxis {
    pub const ALL: [PoseAxis; 3] = [PoseAxis::X, PoseAxis::Y, PoseAxis::Z];

    fn component(self, v: &mut Vec3) -> &mut f32 {
        match self {
            Self::X => &mut v.x,
            Self::Y => &mut v.y,
            Self::Z => &mut v.z,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
        }
    }
}

/// What a panel button does when pressed.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudAction {
    /// Move one axis of the camera position or target by one step.
    Nudge {
        field: PoseField,
        axis: PoseAxis,
        direction: i8,
        fine: bool,
    },
    SaveView,
    Export,
    Import,
    ToggleEnvironment,
    ToggleLayer(EnvironmentLayer),
    ToggleAnimation,
    GoTo(usize),
    /// Make the slot the default, or clear the default if it already is.
    SetDefault(usize),
    Overwrite(usize),
    Delete(usize),
}

impl HudAction {
    /// The same action with the fine nudge step.
    fn fine(self) -> Self {
        match self {
            Self::Nudge { field, axis, direction, .. } => Self::Nudge {
                field,
                axis,
                direction,
                fine: true,
            },
            other => other,
        }
    }

    /// On/off state for toggle-style buttons.
    fn is_active(&self, store: &ChannelStore) -> Option<bool> {
        match self {
            Self::ToggleEnvironment => Some(store.layers.environment_visible()),
            Self::ToggleLayer(layer) => Some(store.layers.is_visible(*layer)),
            Self::ToggleAnimation => Some(store.animation_playing),
            Self::SetDefault(index) => Some(store.bookmarks.default_index() == Some(*index)),
            _ => None,
        }
    }

    fn idle_color(&self, store: &ChannelStore) -> Color {
        match (self, self.is_active(store)) {
            (_, Some(true)) => BUTTON_ACTIVE,
            (Self::Delete(_), _) => BUTTON_DANGER,
            _ => BUTTON_IDLE,
        }
    }
}

/// Run a panel action against the store. Camera moves come back as a view
/// request for the camera systems.
pub fn apply_hud_action(
    action: HudAction,
    store: &mut ChannelStore,
    camera: &ViewportCamera,
    bookmark_file: &Path,
) -> Result<Option<ViewRequest>, BookmarkError> {
    match action {
        HudAction::Nudge { field, axis, direction, fine } => {
            let step = if fine { POSE_NUDGE_STEP_FINE } else { POSE_NUDGE_STEP };
            let mut position = camera.current_position;
            let mut target = camera.current_target;
            let value = match field {
                PoseField::Position => axis.component(&mut position),
                PoseField::Target => axis.component(&mut target),
            };
            *value = ((*value + f32::from(direction) * step) * 100.0).round() / 100.0;
            return Ok(Some(ViewRequest::Pose { position, target }));
        }
        HudAction::SaveView => {
            let name = store.bookmarks.next_name();
            store.save_bookmark(name, camera.current_position, camera.current_target);
        }
        HudAction::Export => {
            let json = store.export_bookmarks()?;
            std::fs::write(bookmark_file, json)
                .map_err(|e| BookmarkError::Storage(e.to_string()))?;
            info!(
                "Exported {} bookmarks to {}",
                store.bookmarks.len(),
                bookmark_file.display()
            );
        }
        HudAction::Import => {
            let json = std::fs::read_to_string(bookmark_file)
                .map_err(|e| BookmarkError::Storage(e.to_string()))?;
            store.import_bookmarks(&json)?;
            info!(
                "Imported {} bookmarks from {}",
                store.bookmarks.len(),
                bookmark_file.display()
            );
        }
        HudAction::ToggleEnvironment => store.toggle_environment(),
        HudAction::ToggleLayer(layer) => store.toggle_layer(layer),
        HudAction::ToggleAnimation => store.toggle_animation(),
        HudAction::GoTo(index) => return Ok(Some(ViewRequest::Bookmark(index))),
        HudAction::SetDefault(index) => {
            let next = (store.bookmarks.default_index() != Some(index)).then_some(index);
            store.set_default_bookmark(next)?;
        }
        HudAction::Overwrite(index) => {
            store.update_bookmark(index, camera.current_position, camera.current_target)?
        }
        HudAction::Delete(index) => store.delete_bookmark(index)?,
    }
    Ok(None)
}

fn readout_text(camera: &ViewportCamera) -> String {
    let p = camera.current_position;
    let t = camera.current_target;
    format!(
        "Position  {:>7.2} {:>7.2} {:>7.2}\nTarget    {:>7.2} {:>7.2} {:>7.2}",
        p.x, p.y, p.z, t.x, t.y, t.z
    )
}

fn bookmark_label(index: usize, name: &str, is_default: bool) -> String {
    if is_default {
        format!("{}. {} *", index + 1, name)
    } else {
        format!("{}. {}", index + 1, name)
    }
}

/// Row label of a slot, showing the typed name with a cursor while it is
/// being renamed.
fn slot_label(index: usize, store: &ChannelStore, rename: &RenameEntry) -> String {
    if rename.slot() == Some(index) {
        return format!("{}. {}_", index + 1, rename.text());
    }
    let name = store.bookmarks.get(index).map_or("", |slot| slot.name.as_str());
    bookmark_label(index, name, store.bookmarks.default_index() == Some(index))
}

fn rename_color(index: usize, rename: &RenameEntry) -> Color {
    if rename.slot() == Some(index) {
        BUTTON_ACTIVE
    } else {
        BUTTON_IDLE
    }
}

fn spawn_button(parent: &mut ChildSpawnerCommands, marker: impl Bundle, label: &str, width: Val) {
    parent
        .spawn((
            marker,
            Button,
            BackgroundColor(BUTTON_IDLE),
            BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
            Node {
                width,
                height: Val::Px(26.0),
                display: Display::Flex,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(label),
                TextFont { font_size: 13.0, ..default() },
                TextColor(Color::WHITE),
            ));
        });
}

fn spawn_heading(parent: &mut ChildSpawnerCommands, title: &str) {
    parent.spawn((
        Text::new(title),
        TextFont { font_size: 15.0, ..default() },
        TextColor(Color::WHITE),
    ));
}

fn row() -> Node {
    Node {
        width: Val::Percent(100.0),
        display: Display::Flex,
        flex_direction: FlexDirection::Row,
        flex_wrap: FlexWrap::Wrap,
        column_gap: Val::Px(4.0),
        row_gap: Val::Px(4.0),
        ..default()
    }
}

pub fn spawn_hud_panel(mut commands: Commands) {
    commands
        .spawn((
            HudRoot,
            Name::new("HudPanel"),
            BackgroundColor(PANEL_BG),
            Node {
                width: Val::Px(PANEL_WIDTH),
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                padding: UiRect::axes(Val::Px(12.0), Val::Px(10.0)),
                row_gap: Val::Px(8.0),
                display: Display::None,
                flex_direction: FlexDirection::Column,
                overflow: Overflow::clip_y(),
                ..default()
            },
        ))
        .with_children(|panel| {
            spawn_heading(panel, "Camera");
            panel.spawn((
                CameraReadout,
                Text::new(""),
                TextFont { font_size: 12.0, ..default() },
                TextColor(HINT_TEXT),
            ));
            for (field, title) in [(PoseField::Position, "Pos"), (PoseField::Target, "Tgt")] {
                panel.spawn(row()).with_children(|buttons| {
                    buttons.spawn((
                        Text::new(title),
                        TextFont { font_size: 12.0, ..default() },
                        TextColor(HINT_TEXT),
                        Node { width: Val::Px(30.0), ..default() },
                    ));
                    for axis in PoseAxis::ALL {
                        for (direction, sign) in [(-1, "-"), (1, "+")] {
                            let nudge = HudAction::Nudge { field, axis, direction, fine: false };
                            let label = format!("{}{}", axis.label(), sign);
                            spawn_button(buttons, nudge, &label, Val::Px(36.0));
                        }
                    }
                });
            }
            panel.spawn(row()).with_children(|buttons| {
                spawn_button(buttons, HudAction::SaveView, "Save view", Val::Px(88.0));
                spawn_button(buttons, HudAction::Export, "Export", Val::Px(84.0));
                spawn_button(buttons, HudAction::Import, "Import", Val::Px(84.0));
            });

            spawn_heading(panel, "Bookmarks");
            panel.spawn((
                BookmarkList,
                Name::new("BookmarkList"),
                BackgroundColor(SECTION_BG),
                Node {
                    width: Val::Percent(100.0),
                    padding: UiRect::all(Val::Px(6.0)),
                    row_gap: Val::Px(4.0),
                    flex_direction: FlexDirection::Column,
                    ..default()
                },
            ));

            spawn_heading(panel, "Environment");
            panel.spawn(row()).with_children(|buttons| {
                spawn_button(buttons, HudAction::ToggleEnvironment, "All", Val::Px(84.0));
                spawn_button(buttons, HudAction::ToggleAnimation, "Animation", Val::Px(84.0));
                for layer in EnvironmentLayer::ALL {
                    let toggle = HudAction::ToggleLayer(layer);
                    spawn_button(buttons, toggle, layer.label(), Val::Px(84.0));
                }
            });

            panel.spawn((
                Text::new(HINTS),
                TextFont { font_size: 11.0, ..default() },
                TextColor(HINT_TEXT),
            ));
        });
}

/// Show or hide the panel together with the FPS counter.
pub fn sync_panel_visibility(
    panel: Res<PanelVisibility>,
    mut roots: Query<&mut Node, With<HudRoot>>,
    mut fps: Query<&mut Visibility, With<FpsText>>,
) {
    if !panel.is_changed() {
        return;
    }
    for mut node in &mut roots {
        node.display = if panel.0 { Display::Flex } else { Display::None };
    }
    for mut visibility in &mut fps {
        *visibility = if panel.0 { Visibility::Inherited } else { Visibility::Hidden };
    }
}

pub fn update_camera_readout(
    panel: Res<PanelVisibility>,
    rig: Res<ViewportCamera>,
    mut readouts: Query<&mut Text, With<CameraReadout>>,
) {
    if !panel.0 {
        return;
    }
    let text = readout_text(&rig);
    for mut readout in &mut readouts {
        if readout.0 != text {
            readout.0 = text.clone();
        }
    }
}

/// Respawn the bookmark rows whenever the bookmark set changed.
pub fn rebuild_bookmark_list(
    mut commands: Commands,
    store: Res<ChannelStore>,
    rename: Res<RenameEntry>,
    mut shown: Local<Option<BookmarkSet>>,
    lists: Query<Entity, With<BookmarkList>>,
) {
    if shown.as_ref() == Some(&store.bookmarks) {
        return;
    }
    let Ok(list) = lists.single() else {
        return;
    };
    *shown = Some(store.bookmarks.clone());

    let bookmarks = &store.bookmarks;
    commands
        .entity(list)
        .despawn_related::<Children>()
        .with_children(|list| {
            if bookmarks.is_empty() {
                list.spawn((
                    Text::new("No saved views"),
                    TextFont { font_size: 12.0, ..default() },
                    TextColor(HINT_TEXT),
                ));
                return;
            }
            for (index, slot) in bookmarks.slots().iter().enumerate() {
                list.spawn((
                    BookmarkLabel(index),
                    Name::new(format!("Bookmark {}", slot.name)),
                    Text::new(slot_label(index, &store, &rename)),
                    TextFont { font_size: 12.0, ..default() },
                    TextColor(Color::WHITE),
                ));
                list.spawn(row()).with_children(|buttons| {
                    spawn_button(buttons, HudAction::GoTo(index), "Go", Val::Px(36.0));
                    spawn_button(buttons, RenameButton(index), "Rename", Val::Px(54.0));
                    spawn_button(buttons, HudAction::SetDefault(index), "Default", Val::Px(50.0));
                    spawn_button(buttons, HudAction::Overwrite(index), "Overwrite", Val::Px(60.0));
                    spawn_button(buttons, HudAction::Delete(index), "Delete", Val::Px(46.0));
                });
            }
        });
}

/// Keep the bookmark names in step with the rename entry.
pub fn update_bookmark_labels(
    store: Res<ChannelStore>,
    rename: Res<RenameEntry>,
    mut labels: Query<(&BookmarkLabel, &mut Text)>,
) {
    if !store.is_changed() && !rename.is_changed() {
        return;
    }
    for (label, mut text) in &mut labels {
        let wanted = slot_label(label.0, &store, &rename);
        if text.0 != wanted {
            text.0 = wanted;
        }
    }
}

type HudButtons<'w, 's, C> = Query<
    'w,
    's,
    (&'static Interaction, &'static C, &'static mut BackgroundColor),
    (Changed<Interaction>, With<Button>),
>;

pub fn hud_button_interaction(
    mut buttons: HudButtons<HudAction>,
    mut store: ResMut<ChannelStore>,
    rig: Res<ViewportCamera>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut views: EventWriter<ViewRequest>,
) {
    let shift = keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    for (interaction, action, mut bg) in &mut buttons {
        match *interaction {
            Interaction::Pressed => {
                *bg = BackgroundColor(BUTTON_PRESSED);
                let action = if shift { action.fine() } else { *action };
                match apply_hud_action(action, &mut store, &rig, Path::new(BOOKMARK_FILE)) {
                    Ok(Some(view)) => {
                        views.write(view);
                    }
                    Ok(None) => {}
                    Err(e) => warn!("Panel action {:?} failed: {}", action, e),
                }
            }
            Interaction::Hovered => *bg = BackgroundColor(BUTTON_HOVER),
            Interaction::None => *bg = BackgroundColor(action.idle_color(&store)),
        }
    }
}

/// Open a slot's name entry, or store the name when it is already open.
pub fn rename_button_interaction(
    mut buttons: HudButtons<RenameButton>,
    mut rename: ResMut<RenameEntry>,
    mut store: ResMut<ChannelStore>,
) {
    for (interaction, button, mut bg) in &mut buttons {
        match *interaction {
            Interaction::Pressed => {
                *bg = BackgroundColor(BUTTON_PRESSED);
                if rename.slot() == Some(button.0) {
                    if let Err(e) = rename.commit(&mut store) {
                        warn!("Renaming bookmark {} failed: {}", button.0 + 1, e);
                    }
                } else if !rename.begin(button.0, &store) {
                    warn!("No bookmark {} to rename", button.0 + 1);
                }
            }
            Interaction::Hovered => *bg = BackgroundColor(BUTTON_HOVER),
            Interaction::None => *bg = BackgroundColor(rename_color(button.0, &rename)),
        }
    }
}

/// Route typed keys into the open rename entry.
pub fn type_bookmark_name(
    mut keys: EventReader<KeyboardInput>,
    mut rename: ResMut<RenameEntry>,
    mut store: ResMut<ChannelStore>,
) {
    if !rename.is_active() {
        keys.clear();
        return;
    }
    for event in keys.read() {
        if event.state != ButtonState::Pressed {
            continue;
        }
        match rename.press(&event.logical_key, &mut store) {
            Ok(RenameOutcome::Committed) => info!("Bookmark renamed"),
            Ok(_) => {}
            Err(e) => warn!("Renaming bookmark failed: {}", e),
        }
        if !rename.is_active() {
            break;
        }
    }
}

/// Recolour idle rename buttons when the open entry moves.
pub fn reflect_rename_state(
    rename: Res<RenameEntry>,
    mut buttons: Query<(&Interaction, &RenameButton, &mut BackgroundColor), With<Button>>,
) {
    if !rename.is_changed() {
        return;
    }
    for (interaction, button, mut bg) in &mut buttons {
        let color = rename_color(button.0, &rename);
        if *interaction == Interaction::None && bg.0 != color {
            bg.0 = color;
        }
    }
}

/// Recolour idle buttons when the state they show changed.
pub fn reflect_toggle_state(
    store: Res<ChannelStore>,
    mut buttons: Query<(&Interaction, &HudAction, &mut BackgroundColor), With<Button>>,
) {
    if !store.is_changed() {
        return;
    }
    for (interaction, action, mut bg) in &mut buttons {
        if *interaction != Interaction::None {
            continue;
        }
        let color = action.idle_color(&store);
        if bg.0 != color {
            bg.0 = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("{}-{}", std::process::id(), name))
    }

    fn camera() -> ViewportCamera {
        ViewportCamera::new(Vec3::new(1.234, 2.0, 3.0), Vec3::ZERO)
    }

    #[test]
    fn save_view_uses_the_rendered_pose() {
        let mut store = ChannelStore::default();
        let path = temp_path("unused.json");
        let view = apply_hud_action(HudAction::SaveView, &mut store, &camera(), &path).unwrap();
        assert_eq!(view, None);
        assert_eq!(store.bookmarks.len(), 1);
        let slot = store.bookmarks.get(0).unwrap();
        assert_eq!(slot.name, "View 1");
        assert_eq!(Vec3::from(slot.position), Vec3::new(1.23, 2.0, 3.0));
    }

    #[test]
    fn nudge_moves_one_axis_of_the_rendered_pose() {
        let mut store = ChannelStore::default();
        let path = temp_path("unused.json");
        let nudge = HudAction::Nudge {
            field: PoseField::Target,
            axis: PoseAxis::Y,
            direction: 1,
            fine: false,
        };
        let view = apply_hud_action(nudge, &mut store, &camera(), &path).unwrap();
        assert_eq!(
            view,
            Some(ViewRequest::Pose {
                position: Vec3::new(1.234, 2.0, 3.0),
                target: Vec3::new(0.0, 0.1, 0.0),
            })
        );
        assert!(store.bookmarks.is_empty());
    }

    #[test]
    fn shift_nudge_uses_the_fine_step_and_rounds() {
        let mut store = ChannelStore::default();
        let path = temp_path("unused.json");
        let nudge = HudAction::Nudge {
            field: PoseField::Position,
            axis: PoseAxis::X,
            direction: -1,
            fine: false,
        };
        let view = apply_hud_action(nudge.fine(), &mut store, &camera(), &path).unwrap();
        let Some(ViewRequest::Pose { position, target }) = view else {
            panic!("expected a pose, got {view:?}");
        };
        assert_eq!(position, Vec3::new(1.22, 2.0, 3.0));
        assert_eq!(target, Vec3::ZERO);
        assert_eq!(HudAction::SaveView.fine(), HudAction::SaveView);
    }

    #[test]
    fn slot_label_follows_the_rename_entry() {
        let mut store = ChannelStore::default();
        let path = temp_path("unused.json");
        apply_hud_action(HudAction::SaveView, &mut store, &camera(), &path).unwrap();
        apply_hud_action(HudAction::SetDefault(0), &mut store, &camera(), &path).unwrap();

        let mut rename = RenameEntry::default();
        assert_eq!(slot_label(0, &store, &rename), "1. View 1 *");
        rename.begin(0, &store);
        assert_eq!(slot_label(0, &store, &rename), "1. View 1_");
        assert_eq!(rename_color(0, &rename), BUTTON_ACTIVE);
        assert_eq!(rename_color(1, &rename), BUTTON_IDLE);
    }

    #[test]
    fn typed_keys_rename_the_open_slot() {
        use bevy::input::keyboard::Key;

        fn key(logical_key: Key) -> KeyboardInput {
            KeyboardInput {
                key_code: KeyCode::KeyA,
                logical_key,
                state: ButtonState::Pressed,
                text: None,
                repeat: false,
                window: Entity::PLACEHOLDER,
            }
        }

        let mut store = ChannelStore::default();
        store.save_bookmark("View 1", Vec3::ONE, Vec3::ZERO);
        let mut rename = RenameEntry::default();
        rename.begin(0, &store);

        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<KeyboardInput>()
            .insert_resource(store)
            .insert_resource(rename)
            .add_systems(Update, type_bookmark_name);

        for _ in 0..6 {
            app.world_mut().send_event(key(Key::Backspace));
        }
        for c in ["D", "e", "s", "k"] {
            app.world_mut().send_event(key(Key::Character(c.into())));
        }
        app.world_mut().send_event(key(Key::Enter));
        // Keys after Enter are not part of the name.
        app.world_mut().send_event(key(Key::Character("o".into())));
        app.update();

        let store = app.world().resource::<ChannelStore>();
        assert_eq!(store.bookmarks.get(0).unwrap().name, "Desk");
        assert!(!app.world().resource::<RenameEntry>().is_active());
    }

    #[test]
    fn default_button_toggles() {
        let mut store = ChannelStore::default();
        let path = temp_path("unused.json");
        apply_hud_action(HudAction::SaveView, &mut store, &camera(), &path).unwrap();

        apply_hud_action(HudAction::SetDefault(0), &mut store, &camera(), &path).unwrap();
        assert_eq!(store.bookmarks.default_index(), Some(0));
        assert_eq!(HudAction::SetDefault(0).idle_color(&store), BUTTON_ACTIVE);

        apply_hud_action(HudAction::SetDefault(0), &mut store, &camera(), &path).unwrap();
        assert_eq!(store.bookmarks.default_index(), None);
    }

    #[test]
    fn go_to_becomes_a_view_request() {
        let mut store = ChannelStore::default();
        let path = temp_path("unused.json");
        let view = apply_hud_action(HudAction::GoTo(2), &mut store, &camera(), &path).unwrap();
        assert_eq!(view, Some(ViewRequest::Bookmark(2)));
    }

    #[test]
    fn bad_index_is_an_error() {
        let mut store = ChannelStore::default();
        let path = temp_path("unused.json");
        let result = apply_hud_action(HudAction::Delete(0), &mut store, &camera(), &path);
        assert!(matches!(result, Err(BookmarkError::OutOfRange(0))));
    }

    #[test]
    fn export_then_import_restores_bookmarks() {
        let path = temp_path("panel-export.json");
        let mut store = ChannelStore::default();
        apply_hud_action(HudAction::SaveView, &mut store, &camera(), &path).unwrap();
        apply_hud_action(HudAction::SetDefault(0), &mut store, &camera(), &path).unwrap();
        apply_hud_action(HudAction::Export, &mut store, &camera(), &path).unwrap();

        let mut fresh = ChannelStore::default();
        apply_hud_action(HudAction::Import, &mut fresh, &camera(), &path).unwrap();
        assert_eq!(fresh.bookmarks, store.bookmarks);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_import_file_leaves_store_alone() {
        let mut store = ChannelStore::default();
        apply_hud_action(HudAction::SaveView, &mut store, &camera(), &temp_path("x.json")).unwrap();
        let before = store.bookmarks.clone();
        let missing = temp_path("absent.json");
        let result = apply_hud_action(HudAction::Import, &mut store, &camera(), &missing);
        assert!(matches!(result, Err(BookmarkError::Storage(_))));
        assert_eq!(store.bookmarks, before);
    }

    #[test]
    fn labels_mark_the_default() {
        assert_eq!(bookmark_label(0, "Desk", false), "1. Desk");
        assert_eq!(bookmark_label(2, "Sofa", true), "3. Sofa *");
    }
}
