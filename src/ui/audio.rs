//! Audio playback: one-shot sound effects and looping music, driven by
//! events so no gameplay system touches the audio API directly.

use bevy::prelude::*;

use crate::shared::{PlayMusicEvent, PlaySfxEvent};

/// Marker on the currently looping music entity.
#[derive(Component)]
pub struct MusicChannel;

pub fn sfx_path(id: &str) -> Option<&'static str> {
    Some(match id {
        "hoe" => "audio/hoe.ogg",
        "axe" => "audio/axe.ogg",
        "water" => "audio/water.ogg",
        "plant" => "audio/plant.ogg",
        "success" => "audio/success.ogg",
        "trade" => "audio/success.ogg",
        _ => return None,
    })
}

pub fn music_path(id: &str) -> Option<&'static str> {
    Some(match id {
        "day" => "audio/music.ogg",
        _ => return None,
    })
}

pub fn start_music(mut music: EventWriter<PlayMusicEvent>) {
    music.send(PlayMusicEvent { track_id: "day".into() });
}

pub fn handle_play_sfx(
    mut events: EventReader<PlaySfxEvent>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
) {
    for event in events.read() {
        match sfx_path(&event.sfx_id) {
            Some(path) => {
                commands.spawn((
                    AudioPlayer::new(asset_server.load(path)),
                    PlaybackSettings::DESPAWN,
                ));
            }
            None => warn!("unknown sfx id {:?}", event.sfx_id),
        }
    }
}

pub fn handle_play_music(
    mut events: EventReader<PlayMusicEvent>,
    asset_server: Res<AssetServer>,
    playing: Query<Entity, With<MusicChannel>>,
    mut commands: Commands,
) {
    for event in events.read() {
        let Some(path) = music_path(&event.track_id) else {
            warn!("unknown music track {:?}", event.track_id);
            continue;
        };
        for entity in &playing {
            commands.entity(entity).despawn();
        }
        commands.spawn((
            MusicChannel,
            AudioPlayer::new(asset_server.load(path)),
            PlaybackSettings::LOOP,
        ));
    }
}
