//! Shared playback flags and the audio-fill routine.
//!
//! The main thread flips the flags; the device callback reads them and either
//! forwards to the replayer or writes silence.

use mv_replay::Replayer;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Replayer shared between the main thread and the audio callback.
pub type SharedReplayer = Arc<Mutex<Box<dyn Replayer>>>;

/// Playback flags shared with the audio callback.
#[derive(Debug, Default)]
pub struct Transport {
    paused: AtomicBool,
    stopped: AtomicBool,
    finished: AtomicBool,
}

impl Transport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Relaxed)
    }

    /// True when the callback should pull from the replayer.
    pub fn is_audible(&self) -> bool {
        !self.is_stopped() && !self.is_paused() && !self.is_finished()
    }

    /// Flip the pause flag and return the new state.
    pub fn toggle_pause(&self) -> bool {
        !self.paused.fetch_xor(true, Ordering::Relaxed)
    }

    /// Stopping is final for a transport; a new song gets a new one.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    pub fn mark_finished(&self) {
        self.finished.store(true, Ordering::Relaxed);
    }
}

/// Fill one device buffer.
///
/// `data` is interleaved with `channels` samples per frame. The replayer
/// renders stereo into `scratch`, which grows on first use and is reused
/// afterwards. Left and right go to the first two device channels; any further
/// channels are zero, and a mono device gets the average.
pub fn fill_output<R: Replayer + ?Sized>(
    transport: &Transport,
    replayer: &Mutex<R>,
    sample_rate: u32,
    scratch: &mut Vec<i16>,
    data: &mut [f32],
    channels: usize,
) {
    if !transport.is_audible() {
        data.fill(0.0);
        return;
    }

    let channels = channels.max(1);
    let frames = data.len() / channels;
    let needed = frames * 2;
    if scratch.len() < needed {
        scratch.resize(needed, 0);
    }

    let rendered = replayer
        .lock()
        .render(sample_rate, &mut scratch[..needed])
        .min(frames);
    if rendered < frames {
        transport.mark_finished();
    }

    for (i, chunk) in data.chunks_mut(channels).enumerate() {
        let (left, right) = if i < rendered {
            (to_f32(scratch[2 * i]), to_f32(scratch[2 * i + 1]))
        } else {
            (0.0, 0.0)
        };
        for (c, sample) in chunk.iter_mut().enumerate() {
            *sample = match (c, channels) {
                (0, 1) => (left + right) * 0.5,
                (0, _) => left,
                (1, _) => right,
                _ => 0.0,
            };
        }
    }
}

fn to_f32(s: i16) -> f32 {
    s as f32 / 32768.0
}
