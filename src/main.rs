//! Growing Pains headless host
//!
//! Runs the simulation at a fixed 60 Hz against a scripted input track, with
//! logging stand-ins for the audio backend and the renderer.
//!
//! Usage: `growing-pains [settings.json] [levels.json]`

use growing_pains::audio::{Mixer, SoundEffect, VoiceCallback, VoiceSink, start_ambience};
use growing_pains::input::{Action, InputState};
use growing_pains::level::{LevelLoader, LevelSet};
use growing_pains::renderer::{FrameSnapshot, Renderer};
use growing_pains::sim::{GameEvent, SimulationState, tick};
use growing_pains::{Result, Settings};

const DT: f32 = 1.0 / 60.0;
const STEPS: u32 = 600;
const WINDOW_WIDTH: f32 = 1280.0;
const WINDOW_HEIGHT: f32 = 720.0;

/// Audio backend that only logs; one-shots finish on the next step
#[derive(Default)]
struct LogSink {
    finished: Vec<usize>,
}

impl VoiceSink for LogSink {
    fn submit(&mut self, voice: usize, sound: SoundEffect, looping: bool) -> Result<()> {
        log::debug!("voice {voice}: {} (looping: {looping})", sound.asset_name());
        if !looping {
            self.finished.push(voice);
        }
        Ok(())
    }

    fn set_volume(&mut self, voice: usize, volume: f32) {
        log::trace!("voice {voice}: volume {volume:.3}");
    }

    fn stop(&mut self, voice: usize) {
        log::debug!("voice {voice}: stopped");
    }
}

#[derive(Default)]
struct LogRenderer {
    frames: u64,
}

impl Renderer for LogRenderer {
    fn render(&mut self, frame: &FrameSnapshot) -> Result<()> {
        self.frames += 1;
        if self.frames % 60 == 0 {
            let level = frame.level.iter().take_while(|p| p.kind != 0).count();
            let overlay = frame.overlay.iter().take_while(|p| p.kind != 0).count();
            log::debug!(
                "frame {}: {level} level + {overlay} overlay primitives, player at {:?}",
                self.frames,
                frame.player.position
            );
        }
        Ok(())
    }
}

/// Input held during step `step`
fn scripted_input(step: u32) -> InputState {
    match step {
        // Leave the menu
        0 => InputState::held(&[Action::AnyKey]),
        1..=60 => InputState::held(&[Action::MoveRight]),
        61 => InputState::held(&[Action::MoveRight, Action::GrowForward]),
        62..=120 => InputState::held(&[Action::MoveUp, Action::MoveRight]),
        121 => InputState::held(&[Action::GrowBackward]),
        122..=360 => InputState::held(&[Action::MoveRight]),
        361..=420 => InputState::held(&[Action::MoveDown, Action::MoveRight]),
        _ => InputState::held(&[Action::MoveRight]),
    }
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let settings = args.next().map(Settings::load_or_default).unwrap_or_default();
    let mut levels = match args.next() {
        Some(path) => LevelSet::from_file(path)?,
        None => LevelSet::builtin(),
    };

    let mut state = SimulationState::new(settings.clone());
    levels.load(0, &mut state)?;

    let mut mixer = Mixer::new(settings.audio);
    let mut sink = LogSink::default();
    let mut renderer = LogRenderer::default();
    start_ambience(&mut mixer);

    for step in 0..STEPS {
        let input = scripted_input(step);
        for event in tick(&mut state, &input, &mut mixer, &mut levels, DT) {
            match event {
                GameEvent::Died { entity } => log::info!("step {step}: died on entity {entity}"),
                GameEvent::MaggotCollected { entity } => {
                    log::info!("step {step}: collected maggot {entity}")
                }
                GameEvent::LevelAdvanced => log::info!("step {step}: entered portal"),
                GameEvent::LevelReloaded => log::info!("step {step}: level restarted"),
            }
        }

        for voice in sink.finished.drain(..) {
            if let Some(voice) = mixer.voice_mut(voice) {
                voice.on_stream_end();
            }
        }
        mixer.push_sounds(&mut sink, DT);

        let frame = FrameSnapshot::capture(&state, WINDOW_WIDTH, WINDOW_HEIGHT);
        renderer.render(&frame)?;
    }

    log::info!(
        "Finished {STEPS} steps: level {}, position {:?}, maggots {}, deaths {}",
        levels.current(),
        state.player.position,
        state.player.maggots,
        state.player.deaths
    );
    Ok(())
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Growing Pains (headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
