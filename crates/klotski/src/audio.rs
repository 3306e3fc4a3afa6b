use bevy::prelude::*;
use bevy_asset_loader::prelude::*;
use bevy_kira_audio::prelude::*;

use crate::session::MoveCommitted;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Default, States)]
enum AssetState {
    #[default]
    Loading,
    Loaded,
}

#[derive(AssetCollection, Resource)]
struct AudioAssets {
    #[asset(path = "audio/tick.wav")]
    tick: Handle<bevy_kira_audio::prelude::AudioSource>,
}

/// Plays a tick for every committed move. Moves made before the sound is loaded stay silent.
pub struct TickAudioPlugin;

impl Plugin for TickAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(AudioPlugin)
            .init_state::<AssetState>()
            .add_loading_state(
                LoadingState::new(AssetState::Loading)
                    .continue_to_state(AssetState::Loaded)
                    .load_collection::<AudioAssets>(),
            )
            .add_systems(Update, tick_audio.run_if(in_state(AssetState::Loaded)));
    }
}

fn tick_audio(
    audio_assets: Res<AudioAssets>,
    audio: Res<Audio>,
    mut move_event: EventReader<MoveCommitted>,
) {
    for _ in move_event.read() {
        audio.play(audio_assets.tick.clone_weak());
    }
}
