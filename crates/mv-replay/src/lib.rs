//! Module replay seam for modviz.
//!
//! Decoding, mixing and resampling belong to the replay library. This crate
//! only describes what the player needs from it: module metadata, PCM on
//! demand, and a snapshot of the current playback position.

mod frame_info;
mod module_info;
#[cfg(feature = "openmpt")]
mod openmpt_backend;

use std::path::PathBuf;

pub use frame_info::{ChannelState, FrameInfo, MAX_NOTE, MAX_VOLUME};
pub use module_info::{format_clock, ModuleInfo};
#[cfg(feature = "openmpt")]
pub use openmpt_backend::{open, OpenMptReplayer};

/// Error type for module loading.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The replay library did not recognise the data.
    #[error("failed to load module: {}", .path.display())]
    Unsupported { path: PathBuf },
}

/// How often the song plays before the replayer reports its end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RepeatMode {
    #[default]
    Once,
    Forever,
}

/// A loaded module that produces PCM on demand.
///
/// Implementations are driven from the audio callback thread, so they must be
/// `Send`; the player serialises access behind a mutex.
pub trait Replayer: Send {
    /// Static metadata, read once at load time.
    fn info(&self) -> &ModuleInfo;

    /// Fill `out` with interleaved 16-bit stereo and return the number of
    /// stereo frames written. A short count means the song ended.
    fn render(&mut self, sample_rate: u32, out: &mut [i16]) -> usize;

    /// Current playback position, per-channel volumes and the row being played.
    fn frame_info(&mut self) -> FrameInfo;
}

impl<R: Replayer + ?Sized> Replayer for Box<R> {
    fn info(&self) -> &ModuleInfo {
        (**self).info()
    }

    fn render(&mut self, sample_rate: u32, out: &mut [i16]) -> usize {
        (**self).render(sample_rate, out)
    }

    fn frame_info(&mut self) -> FrameInfo {
        (**self).frame_info()
    }
}
