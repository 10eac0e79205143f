use bevy::prelude::*;
use constants::media::CLICK_SOUND;

/// Remote control click, played on power, volume and channel keys.
#[derive(Resource, Clone)]
pub struct ClickSound(pub Handle<AudioSource>);

pub fn load_click_sound(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(ClickSound(asset_server.load(CLICK_SOUND)));
}

/// Each click is a fresh one-shot player, so rapid presses overlap instead
/// of cutting each other off.
pub fn play_click(commands: &mut Commands, sound: Option<&ClickSound>) {
    if let Some(sound) = sound {
        commands.spawn((AudioPlayer(sound.0.clone()), PlaybackSettings::DESPAWN));
    }
}
