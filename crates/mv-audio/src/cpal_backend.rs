//! CPAL-based audio output backend.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, SampleRate, Stream, StreamConfig};
use std::sync::Arc;

use crate::traits::{AudioConfig, AudioError, AudioOutput};
use crate::transport::{fill_output, SharedReplayer, Transport};

/// CPAL-based audio output. The stream callback pulls straight from the
/// replayer.
pub struct CpalOutput {
    config: StreamConfig,
    stream: Stream,
}

impl CpalOutput {
    /// Open the default output device and build a stream feeding from
    /// `replayer`. The stream is created paused; call [`AudioOutput::start`].
    pub fn open(
        replayer: SharedReplayer,
        transport: Arc<Transport>,
        requested: AudioConfig,
    ) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;

        let default_config = device
            .default_output_config()
            .map_err(|e| AudioError::DeviceInit(e.to_string()))?;

        let mut config: StreamConfig = default_config.into();
        // Force stereo output: the replayer renders 2-channel interleaved PCM
        config.channels = 2;
        if let Some(rate) = requested.sample_rate {
            config.sample_rate = SampleRate(rate);
        }
        if let Some(frames) = requested.buffer_frames {
            config.buffer_size = BufferSize::Fixed(frames);
        }

        log::info!(
            "audio device {:?}: {} Hz, {} channels",
            device.name().unwrap_or_default(),
            config.sample_rate.0,
            config.channels
        );

        let sample_rate = config.sample_rate.0;
        let channels = config.channels as usize;
        // Sized for a generous callback so steady-state callbacks don't allocate
        let mut scratch: Vec<i16> = vec![0; 8192 * 2];

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    fill_output(&transport, &*replayer, sample_rate, &mut scratch, data, channels);
                },
                |err| log::warn!("audio stream error: {}", err),
                None,
            )
            .map_err(|e| AudioError::StreamCreate(e.to_string()))?;

        stream.pause().map_err(|e| AudioError::Playback(e.to_string()))?;

        Ok(Self { config, stream })
    }
}

impl AudioOutput for CpalOutput {
    fn sample_rate(&self) -> u32 {
        self.config.sample_rate.0
    }

    fn start(&mut self) -> Result<(), AudioError> {
        self.stream
            .play()
            .map_err(|e| AudioError::Playback(e.to_string()))
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        self.stream
            .pause()
            .map_err(|e| AudioError::Playback(e.to_string()))
    }
}
