//! Shared test infrastructure for tempo-playback integration tests

#![allow(dead_code)]

use tempo_core::{MediaId, MediaItem};
use tempo_playback::{MediaSource, PlaybackConfig, PlaybackEngine, PlaybackError, Result};

/// A call the engine made on the source
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Load(String),
    Play,
    Pause,
    Unload,
    Seek(f64),
    SetVolume(f64),
    SetMuted(bool),
}

/// Recording media source
///
/// Behaves like a well-mannered audio element: `play` unpauses, `load`
/// rewinds. Every call is recorded for later inspection.
#[derive(Debug)]
pub struct FakeSource {
    pub calls: Vec<Call>,
    pub src: Option<String>,
    pub time: f64,
    pub paused: bool,
    pub volume: f64,
    pub muted: bool,
    /// Locators whose `load` fails
    pub broken: Vec<String>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            src: None,
            time: 0.0,
            paused: true,
            volume: 1.0,
            muted: false,
            broken: Vec::new(),
        }
    }

    /// Every locator passed to `load`, in order
    pub fn loads(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Load(src) => Some(src.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &Call) -> usize {
        self.calls.iter().filter(|call| *call == wanted).count()
    }
}

impl Default for FakeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaSource for FakeSource {
    fn load(&mut self, src: &str) -> Result<()> {
        self.calls.push(Call::Load(src.to_string()));
        if self.broken.iter().any(|broken| broken == src) {
            return Err(PlaybackError::MediaSource(format!("cannot load {}", src)));
        }
        self.src = Some(src.to_string());
        self.time = 0.0;
        Ok(())
    }

    fn play(&mut self) {
        self.calls.push(Call::Play);
        self.paused = false;
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
        self.paused = true;
    }

    fn unload(&mut self) {
        self.calls.push(Call::Unload);
        self.src = None;
        self.paused = true;
    }

    fn seek(&mut self, time: f64) {
        self.calls.push(Call::Seek(time));
        self.time = time;
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn set_volume(&mut self, volume: f64) {
        self.calls.push(Call::SetVolume(volume));
        self.volume = volume;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.calls.push(Call::SetMuted(muted));
        self.muted = muted;
    }
}

pub fn create_test_item(id: u64) -> MediaItem {
    MediaItem::new(
        MediaId::new(id),
        format!("Track {}", id),
        "Test Artist",
        format!("/media/{}.mp3", id),
    )
}

pub fn create_test_items(ids: &[u64]) -> Vec<MediaItem> {
    ids.iter().copied().map(create_test_item).collect()
}

pub fn ids(items: &[MediaItem]) -> Vec<u64> {
    items.iter().map(|item| item.id.get()).collect()
}

pub fn create_engine() -> PlaybackEngine<FakeSource> {
    PlaybackEngine::new(FakeSource::new(), PlaybackConfig::default())
}

pub fn create_seeded_engine(seed: u64) -> PlaybackEngine<FakeSource> {
    let config = PlaybackConfig {
        shuffle_seed: Some(seed),
        ..Default::default()
    };
    PlaybackEngine::new(FakeSource::new(), config)
}

/// Engine playing `current` from the queue `queue`
pub fn engine_playing(queue: &[u64], current: u64) -> PlaybackEngine<FakeSource> {
    let mut engine = create_seeded_engine(42);
    engine.select_track(create_test_item(current), Some(create_test_items(queue)));
    engine
}

/// Route tracing output through the test harness
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("tempo_playback=debug")
        .with_test_writer()
        .try_init();
}
