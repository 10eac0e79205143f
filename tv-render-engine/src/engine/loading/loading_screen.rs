use bevy::prelude::*;
use constants::media::LOADING_LOGO;

#[derive(Component)]
pub struct LoadingScreen;

/// Cover the window with the logo until the model is ready.
pub fn spawn_loading_screen(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands
        .spawn((
            LoadingScreen,
            Name::new("LoadingScreen"),
            BackgroundColor(Color::WHITE),
            GlobalZIndex(i32::MAX),
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
        ))
        .with_children(|screen| {
            screen.spawn((
                ImageNode::new(asset_server.load(LOADING_LOGO)),
                Node {
                    width: Val::Px(160.0),
                    ..default()
                },
            ));
        });
}

pub fn despawn_loading_screen(mut commands: Commands, screens: Query<Entity, With<LoadingScreen>>) {
    for screen in &screens {
        commands.entity(screen).despawn();
    }
}
