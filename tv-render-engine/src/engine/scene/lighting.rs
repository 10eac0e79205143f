use bevy::prelude::*;

pub fn spawn_lighting(commands: &mut Commands) {
    commands.insert_resource(ClearColor(Color::WHITE));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        ..default()
    });

    commands.spawn((
        Name::new("KeyLight"),
        DirectionalLight {
            illuminance: 6000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(5.0, 8.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Name::new("FillLight"),
        DirectionalLight {
            illuminance: 2000.0,
            ..default()
        },
        Transform::from_xyz(-3.0, 4.0, -5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
