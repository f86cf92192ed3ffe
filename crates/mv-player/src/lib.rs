//! Headless controller for modviz.
//!
//! Owns the loaded module and the audio device, and exposes the small set of
//! transport operations the GUI and CLI share.

mod wav;

use mv_audio::{AudioOutput, CpalOutput, SharedReplayer, Transport};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// Re-export common types so callers don't need mv-replay/mv-audio directly.
pub use mv_audio::{AudioConfig, AudioError};
pub use mv_replay::{
    format_clock, ChannelState, FrameInfo, ModuleInfo, RepeatMode, ReplayError, Replayer,
    MAX_VOLUME,
};

pub use wav::render_wav;

/// Error type for controller operations.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error(transparent)]
    Replay(#[from] ReplayError),
    #[error(transparent)]
    Audio(#[from] AudioError),
    #[error("wav export failed: {0}")]
    Wav(#[from] hound::Error),
}

/// Playback settings fixed for the lifetime of a controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackConfig {
    pub audio: AudioConfig,
    pub repeat: RepeatMode,
}

/// A loaded module and the flags its audio callback watches.
pub struct Session {
    path: PathBuf,
    info: ModuleInfo,
    replayer: SharedReplayer,
    transport: Arc<Transport>,
}

impl Session {
    pub fn new(path: impl Into<PathBuf>, replayer: Box<dyn Replayer>) -> Self {
        let info = replayer.info().clone();
        Self {
            path: path.into(),
            info,
            replayer: Arc::new(Mutex::new(replayer)),
            transport: Arc::new(Transport::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without directories, for display.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or(self.path.as_os_str())
            .to_string_lossy()
            .into_owned()
    }

    pub fn info(&self) -> &ModuleInfo {
        &self.info
    }

    pub fn replayer(&self) -> &SharedReplayer {
        &self.replayer
    }

    pub fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }

    /// Snapshot of the current position. Holds the replayer lock only for the
    /// duration of the query.
    pub fn frame_info(&self) -> FrameInfo {
        self.replayer.lock().frame_info()
    }
}

/// Headless player: owns the current session and its audio device.
pub struct Controller {
    config: PlaybackConfig,
    session: Option<Session>,
    output: Option<CpalOutput>,
}

impl Controller {
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            config,
            session: None,
            output: None,
        }
    }

    // --- Loading ---

    /// Load `path` and start playing it from the top.
    ///
    /// The file is decoded before anything is torn down, so a file the replay
    /// library rejects leaves the current song playing.
    pub fn open(&mut self, path: &Path) -> Result<(), PlayerError> {
        let replayer = mv_replay::open(path, self.config.repeat)?;
        self.play(path, replayer)
    }

    /// Replace the current session with `replayer` and start the device.
    pub fn play(&mut self, path: &Path, replayer: Box<dyn Replayer>) -> Result<(), PlayerError> {
        self.stop();

        let session = Session::new(path, replayer);
        let mut output = CpalOutput::open(
            session.replayer().clone(),
            session.transport().clone(),
            self.config.audio,
        )?;
        output.start()?;

        log::info!("playing {}", session.path().display());
        self.session = Some(session);
        self.output = Some(output);
        Ok(())
    }

    // --- Transport ---

    /// Flip pause. Returns the new state, or `None` with nothing loaded.
    pub fn toggle_pause(&mut self) -> Option<bool> {
        let session = self.session.as_ref()?;
        if session.transport().is_stopped() {
            return None;
        }
        let paused = session.transport().toggle_pause();
        log::debug!("paused: {}", paused);
        Some(paused)
    }

    /// Silence the callback and release the device. The session stays
    /// around so its metadata can still be shown.
    pub fn stop(&mut self) {
        if let Some(session) = &self.session {
            session.transport().stop();
        }
        if let Some(mut output) = self.output.take() {
            if let Err(e) = output.stop() {
                log::warn!("failed to pause audio stream: {}", e);
            }
        }
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_paused(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.transport().is_paused())
    }

    pub fn is_stopped(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.transport().is_stopped())
    }

    pub fn is_finished(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.transport().is_finished())
    }

    pub fn module_info(&self) -> Option<&ModuleInfo> {
        self.session.as_ref().map(Session::info)
    }

    /// Current position, or an empty snapshot with nothing loaded.
    pub fn frame_info(&self) -> FrameInfo {
        self.session
            .as_ref()
            .map(Session::frame_info)
            .unwrap_or_default()
    }

    pub fn sample_rate(&self) -> Option<u32> {
        self.output.as_ref().map(|o| o.sample_rate())
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.stop();
    }
}
