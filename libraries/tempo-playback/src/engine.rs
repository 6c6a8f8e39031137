//! Playback engine - core orchestration
//!
//! Coordinates the dual-order queue, the visibility state machine, and the
//! media source transport.

use rand::rngs::StdRng;
use tempo_core::{MediaId, MediaItem};
use tracing::{debug, error, info, warn};

use crate::{
    config::PlaybackConfig,
    error::{PlaybackError, Result},
    events::{EngineEvent, SourceEvent},
    queue::{PlayQueue, QueueOrder},
    shuffle::shuffle_rng,
    source::MediaSource,
    types::{PlayerSnapshot, RepeatMode, TransportState, Visibility},
    volume::{clamp_volume, unmute_restore},
};

/// Central playback management
///
/// Sole owner and writer of:
/// - The play queue, in canonical and shuffled order
/// - The current index into whichever order is active
/// - Shuffle flag and repeat mode
/// - Player visibility (hidden / minimized / expanded)
/// - The media source, and a mirror of its transport state
///
/// Queue operations never fail: out-of-range or stale requests are no-ops.
/// Whenever the current track changes, the new track is loaded and played.
pub struct PlaybackEngine<S: MediaSource> {
    source: S,

    // Queue
    queue: PlayQueue,
    current_index: Option<usize>,
    is_shuffling: bool,
    repeat: RepeatMode,
    rng: StdRng,

    // Surface
    visibility: Visibility,

    // Transport mirror
    transport: TransportState,

    // Track currently handed to the source (id, src)
    loaded: Option<(MediaId, String)>,

    // Settings
    previous_restart_threshold: f64,
    unmute_volume: f64,

    // Event queue for UI synchronization
    pending_events: Vec<EngineEvent>,
}

impl<S: MediaSource> PlaybackEngine<S> {
    /// Create new playback engine around a media source
    pub fn new(mut source: S, config: PlaybackConfig) -> Self {
        let volume = clamp_volume(config.volume).unwrap_or(1.0);
        source.set_volume(volume);

        Self {
            source,
            queue: PlayQueue::new(),
            current_index: None,
            is_shuffling: config.shuffle,
            repeat: config.repeat,
            rng: shuffle_rng(config.shuffle_seed),
            visibility: Visibility::Hidden,
            transport: TransportState::new(volume),
            loaded: None,
            previous_restart_threshold: config.previous_restart_threshold_secs,
            unmute_volume: config.unmute_volume,
            pending_events: Vec::new(),
        }
    }

    // ===== Queue Operations =====

    /// Play `item`, making `queue_context` the new queue
    ///
    /// Re-selecting the current track while the player is visible only
    /// expands the player. Otherwise the queue is replaced wholesale by the
    /// context (or a single-item queue when no context is given), a fresh
    /// shuffled order is drawn, and `item` becomes current and starts playing.
    pub fn select_track(&mut self, item: MediaItem, queue_context: Option<Vec<MediaItem>>) {
        if self.visibility != Visibility::Hidden
            && self.current_track().is_some_and(|current| current.id == item.id)
        {
            self.set_visibility(Visibility::Expanded);
            return;
        }

        let items = match queue_context {
            Some(context) if !context.is_empty() => context,
            _ => vec![item.clone()],
        };
        self.queue.replace(items, &mut self.rng);

        let index = self.queue.position(self.active_order(), item.id).unwrap_or(0);
        self.current_index = Some(index);
        debug!(
            "Selected {} at index {} of {} (shuffling: {})",
            item.id,
            index,
            self.queue.len(),
            self.is_shuffling
        );

        self.emit_queue_changed();
        self.set_visibility(Visibility::Expanded);
        self.sync_transport();
    }

    /// Queue `item` to play next
    ///
    /// Duplicates (by id) are ignored. With no active queue, starts a new
    /// one-item queue in the minimized player.
    pub fn add_to_queue(&mut self, item: MediaItem) {
        if self.queue.contains(item.id) {
            debug!("{} already queued, ignoring", item.id);
            return;
        }

        let current = match (self.visibility, self.current_track()) {
            (Visibility::Hidden, _) | (_, None) => None,
            (_, Some(current)) => Some(current.id),
        };

        let Some(current_id) = current else {
            debug!("Starting new queue with {}", item.id);
            self.queue.start_single(item);
            self.current_index = Some(0);
            self.emit_queue_changed();
            self.set_visibility(Visibility::Minimized);
            self.sync_transport();
            return;
        };

        // Canonical slot is after the current index, even while shuffling
        let canonical_index = self.current_index.unwrap_or(0);
        debug!(
            "Queued {} at canonical index {} and after {} in shuffled order",
            item.id,
            canonical_index + 1,
            current_id
        );
        self.queue.insert_after(item, canonical_index, current_id);
        self.emit_queue_changed();
    }

    /// Remove media from the queue
    ///
    /// If the current track is removed, play falls through to whatever now
    /// occupies its slot (or the new last item). Removing the last remaining
    /// item closes the player.
    pub fn remove_from_queue(&mut self, media_id: MediaId) {
        let Some(old_index) = self.current_index else {
            return;
        };
        if !self.queue.contains(media_id) {
            return;
        }

        let order = self.active_order();
        let current_id = self.queue.get(order, old_index).map(|item| item.id);
        let removed_was_current = current_id == Some(media_id);

        self.queue.remove(media_id);

        if self.queue.is_empty() {
            info!("Queue emptied by removing {}, closing player", media_id);
            self.close_player();
            return;
        }

        let new_len = self.queue.items(order).len();
        let new_index = if removed_was_current {
            new_len.checked_sub(1).map(|last| old_index.min(last))
        } else {
            current_id.and_then(|id| self.queue.position(order, id))
        };

        match new_index {
            Some(index) => {
                debug!(
                    "Removed {} (was current: {}), index {} -> {}",
                    media_id, removed_was_current, old_index, index
                );
                self.current_index = Some(index);
                self.emit_queue_changed();
                self.sync_transport();
            }
            None => {
                error!(
                    "Current track lost after removing {} (orders out of sync), closing player",
                    media_id
                );
                self.close_player();
            }
        }
    }

    /// Move an item within the active order
    ///
    /// The inactive order is left as is. The current index follows the
    /// current track.
    pub fn reorder_queue(&mut self, from_index: usize, to_index: usize) {
        let order = self.active_order();
        if !self.queue.move_item(order, from_index, to_index) {
            return;
        }

        if let Some(current) = self.current_index {
            let adjusted = if from_index == current {
                to_index
            } else if from_index < current && current <= to_index {
                current - 1
            } else if to_index <= current && current < from_index {
                current + 1
            } else {
                current
            };
            self.current_index = Some(adjusted);
        }

        debug!(
            "Moved {:?} item {} -> {}, current index {:?}",
            order, from_index, to_index, self.current_index
        );
        self.emit_queue_changed();
        self.sync_transport();
    }

    // ===== Shuffle & Repeat =====

    /// Switch between canonical and shuffled order
    ///
    /// The current track keeps playing; only what comes next changes.
    pub fn toggle_shuffle(&mut self) {
        let current_id = self.current_track().map(|item| item.id);
        self.is_shuffling = !self.is_shuffling;

        if let Some(id) = current_id {
            if let Some(index) = self.queue.position(self.active_order(), id) {
                self.current_index = Some(index);
            }
        }

        debug!("Shuffle {}", if self.is_shuffling { "on" } else { "off" });
        self.pending_events.push(EngineEvent::ShuffleChanged {
            is_shuffling: self.is_shuffling,
        });
        self.sync_transport();
    }

    /// Cycle repeat mode: off → all → one → off
    pub fn toggle_repeat(&mut self) {
        self.repeat = self.repeat.cycle();
        debug!("Repeat mode {:?}", self.repeat);
        self.pending_events
            .push(EngineEvent::RepeatChanged { mode: self.repeat });
    }

    // ===== Navigation =====

    /// Advance to the next track
    ///
    /// At the end of the queue this wraps only with repeat all. A single-item
    /// queue with repeat all restarts the track instead.
    pub fn next_track(&mut self) {
        let len = self.active_queue().len();
        if len == 0 {
            return;
        }

        if len == 1 && self.repeat == RepeatMode::All {
            self.restart_current();
            return;
        }

        let Some(current) = self.current_index else {
            return;
        };

        let next = if current + 1 < len {
            current + 1
        } else if self.repeat == RepeatMode::All {
            0
        } else {
            debug!("End of queue, no next track");
            return;
        };

        self.current_index = Some(next);
        self.emit_queue_changed();
        self.sync_transport();
    }

    /// Go to the previous track
    ///
    /// Past the restart threshold (3s by default) this restarts the current
    /// track instead. At the start of the queue it does nothing.
    pub fn previous_track(&mut self) {
        if self.current_track().is_none() {
            return;
        }

        if self.source.current_time() > self.previous_restart_threshold {
            debug!("Restarting current track");
            self.source.seek(0.0);
            return;
        }

        if let Some(current) = self.current_index.filter(|&index| index > 0) {
            self.current_index = Some(current - 1);
            self.emit_queue_changed();
            self.sync_transport();
        }
    }

    /// Check if there is a next track
    pub fn is_next_available(&self) -> bool {
        let len = self.active_queue().len();
        if self.repeat == RepeatMode::All {
            len > 0
        } else {
            self.current_index.is_some_and(|index| index + 1 < len)
        }
    }

    /// Check if there is a previous track
    pub fn is_previous_available(&self) -> bool {
        self.current_index.is_some_and(|index| index > 0)
    }

    // ===== Transport =====

    /// Pause if playing, play if paused
    ///
    /// Retries the load if the current track failed to load earlier.
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        if self.current_track().is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }

        if self.loaded.is_none() {
            self.sync_transport();
        } else if self.source.is_paused() {
            self.source.play();
        } else {
            self.source.pause();
        }
        Ok(())
    }

    /// Seek to position in current track (seconds)
    ///
    /// Negative positions clamp to the start; NaN/infinite ones are ignored.
    pub fn seek(&mut self, time: f64) -> Result<()> {
        if self.current_track().is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }

        if !time.is_finite() {
            warn!("Ignoring seek to non-finite position {}", time);
            return Ok(());
        }

        self.source.seek(time.max(0.0));
        Ok(())
    }

    /// Set volume (0.0-1.0)
    pub fn set_volume(&mut self, volume: f64) {
        match clamp_volume(volume) {
            Some(volume) => self.source.set_volume(volume),
            None => warn!("Ignoring non-finite volume {}", volume),
        }
    }

    /// Toggle mute state
    ///
    /// Unmuting at zero volume also restores an audible volume.
    pub fn toggle_mute(&mut self) {
        let muted = self.source.is_muted();
        self.source.set_muted(!muted);

        if muted {
            if let Some(volume) = unmute_restore(self.source.volume(), self.unmute_volume) {
                self.source.set_volume(volume);
            }
        }
    }

    // ===== Visibility =====

    /// Show the compact player (no-op while hidden)
    pub fn minimize_player(&mut self) {
        if self.visibility != Visibility::Hidden {
            self.set_visibility(Visibility::Minimized);
        }
    }

    /// Show the full player (no-op while hidden)
    pub fn expand_player(&mut self) {
        if self.visibility != Visibility::Hidden {
            self.set_visibility(Visibility::Expanded);
        }
    }

    /// Close the player
    ///
    /// Stops and unloads the source and clears the queue.
    pub fn close_player(&mut self) {
        info!("Closing player");
        self.source.pause();

        self.queue.clear();
        self.current_index = None;
        self.transport.current_time = 0.0;
        self.transport.duration = 0.0;
        self.set_playing(false);

        self.emit_queue_changed();
        self.set_visibility(Visibility::Hidden);
        self.sync_transport();
    }

    // ===== Source Events =====

    /// Apply an event raised by the media source
    ///
    /// This is the only path by which transport observations reach the
    /// engine, including the end-of-track auto-advance.
    pub fn handle_source_event(&mut self, event: SourceEvent) {
        match event {
            SourceEvent::Playing => self.set_playing(true),
            SourceEvent::Paused => self.set_playing(false),
            SourceEvent::TimeUpdate { current_time } => {
                self.transport.current_time = current_time;
                self.emit_position();
            }
            SourceEvent::LoadedMetadata { duration } => {
                self.transport.duration = duration;
                self.emit_position();
            }
            SourceEvent::VolumeChange { volume, muted } => {
                self.transport.volume = volume;
                self.transport.is_muted = muted;
                self.pending_events.push(EngineEvent::VolumeChanged {
                    volume,
                    is_muted: muted,
                });
            }
            SourceEvent::Ended => self.handle_ended(),
            SourceEvent::PlayRejected { reason } => {
                // Index changes that triggered the play stay in place
                warn!("Playback rejected: {}", reason);
                self.set_playing(false);
                self.pending_events.push(EngineEvent::Error {
                    message: format!("Playback failed: {}", reason),
                });
            }
        }
    }

    fn handle_ended(&mut self) {
        let Some(current) = self.current_index else {
            debug!("Ignoring ended event with no current track");
            return;
        };

        if self.repeat == RepeatMode::One {
            self.restart_current();
            return;
        }

        let is_last = current + 1 >= self.active_queue().len();
        if !is_last || self.repeat == RepeatMode::All {
            self.next_track();
        } else {
            debug!("Reached end of queue");
            self.set_playing(false);
        }
    }

    // ===== State Queries =====

    /// Items in the order currently driving playback
    pub fn active_queue(&self) -> &[MediaItem] {
        self.queue.items(self.active_order())
    }

    /// Get currently playing track
    pub fn current_track(&self) -> Option<&MediaItem> {
        self.current_index
            .and_then(|index| self.queue.get(self.active_order(), index))
    }

    /// Index into the active queue (`None` when nothing is current)
    pub fn current_queue_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Queue in canonical order
    pub fn play_queue(&self) -> &[MediaItem] {
        self.queue.canonical()
    }

    /// Queue in shuffled order
    pub fn shuffled_queue(&self) -> &[MediaItem] {
        self.queue.shuffled()
    }

    /// Check if shuffled order is active
    pub fn is_shuffling(&self) -> bool {
        self.is_shuffling
    }

    /// Get current repeat mode
    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat
    }

    /// Get current visibility
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Get transport mirror
    pub fn transport(&self) -> &TransportState {
        &self.transport
    }

    /// Check if audio is playing
    pub fn is_playing(&self) -> bool {
        self.transport.is_playing
    }

    /// Get playhead (seconds)
    pub fn current_time(&self) -> f64 {
        self.transport.current_time
    }

    /// Get track length (seconds)
    pub fn duration(&self) -> f64 {
        self.transport.duration
    }

    /// Get volume (0.0-1.0)
    pub fn volume(&self) -> f64 {
        self.transport.volume
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.transport.is_muted
    }

    /// Capture all observable state for a view
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            current_track: self.current_track().cloned(),
            is_playing: self.transport.is_playing,
            current_time: self.transport.current_time,
            duration: self.transport.duration,
            volume: self.transport.volume,
            is_muted: self.transport.is_muted,
            repeat_mode: self.repeat,
            is_shuffling: self.is_shuffling,
            play_queue: self.queue.canonical().to_vec(),
            shuffled_queue: self.queue.shuffled().to_vec(),
            current_queue_index: self.current_index,
            is_next_available: self.is_next_available(),
            is_previous_available: self.is_previous_available(),
            visibility: self.visibility,
        }
    }

    /// Get the media source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get the media source mutably
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Internal =====

    fn active_order(&self) -> QueueOrder {
        QueueOrder::active(self.is_shuffling)
    }

    /// Bring the source in line with the current track
    ///
    /// Loads and plays when the current track differs (by id or src) from
    /// what the source holds; unloads when there is no current track.
    fn sync_transport(&mut self) {
        let target = self
            .current_track()
            .map(|item| (item.id, item.src.clone()));
        let previous_id = self.loaded.as_ref().map(|(id, _)| *id);

        match target {
            Some(target) => {
                if self.loaded.as_ref() == Some(&target) {
                    return;
                }

                let (id, src) = target;
                info!("Loading track {} ({})", id, src);
                self.pending_events.push(EngineEvent::TrackChanged {
                    track_id: Some(id),
                    previous_track_id: previous_id,
                });

                match self.source.load(&src) {
                    Ok(()) => {
                        self.loaded = Some((id, src));
                        self.source.play();
                    }
                    Err(e) => {
                        warn!("Failed to load track {}: {}", id, e);
                        self.loaded = None;
                        self.set_playing(false);
                        self.pending_events.push(EngineEvent::Error {
                            message: e.to_string(),
                        });
                    }
                }
            }
            None => {
                // Also after a failed load
                debug!("Unloading media source");
                self.source.unload();
                if self.loaded.take().is_some() {
                    self.pending_events.push(EngineEvent::TrackChanged {
                        track_id: None,
                        previous_track_id: previous_id,
                    });
                }
            }
        }
    }

    fn restart_current(&mut self) {
        debug!("Restarting current track");
        self.source.seek(0.0);
        self.source.play();
    }

    fn set_visibility(&mut self, visibility: Visibility) {
        if self.visibility != visibility {
            debug!("Visibility {:?} -> {:?}", self.visibility, visibility);
            self.visibility = visibility;
            self.pending_events
                .push(EngineEvent::VisibilityChanged { visibility });
        }
    }

    fn set_playing(&mut self, is_playing: bool) {
        if self.transport.is_playing != is_playing {
            self.transport.is_playing = is_playing;
            self.pending_events
                .push(EngineEvent::PlayingChanged { is_playing });
        }
    }

    fn emit_queue_changed(&mut self) {
        self.pending_events.push(EngineEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    fn emit_position(&mut self) {
        self.pending_events.push(EngineEvent::PositionUpdate {
            current_time: self.transport.current_time,
            duration: self.transport.duration,
        });
    }
}

impl<S: MediaSource + Default> Default for PlaybackEngine<S> {
    fn default() -> Self {
        Self::new(S::default(), PlaybackConfig::default())
    }
}
