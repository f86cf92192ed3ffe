//! Audio output trait and error types.

/// Error type for audio operations.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// No audio device available
    #[error("no audio output device available")]
    NoDevice,
    /// Failed to initialize audio device
    #[error("device init error: {0}")]
    DeviceInit(String),
    /// Failed to create audio stream
    #[error("stream create error: {0}")]
    StreamCreate(String),
    /// Playback error
    #[error("playback error: {0}")]
    Playback(String),
}

/// Trait for audio output backends.
pub trait AudioOutput {
    /// Get the sample rate.
    fn sample_rate(&self) -> u32;

    /// Start (or resume) the device stream.
    fn start(&mut self) -> Result<(), AudioError>;

    /// Pause the device stream.
    fn stop(&mut self) -> Result<(), AudioError>;
}

/// Device settings requested by the caller. `None` keeps the device default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AudioConfig {
    pub sample_rate: Option<u32>,
    /// Frames per callback.
    pub buffer_frames: Option<u32>,
}
