//! Command-line configuration for the GUI.

use clap::Parser;
use mv_player::{AudioConfig, PlaybackConfig, RepeatMode};
use std::path::PathBuf;

/// Tracker module player with a song info panel and channel visualizer.
#[derive(Debug, Parser)]
#[command(name = "modviz", version)]
pub struct Args {
    /// Module file to start playing (MOD, XM, S3M, IT, ...)
    pub file: Option<PathBuf>,

    /// Window width in logical pixels
    #[arg(long, default_value_t = 480.0)]
    pub width: f32,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 180.0)]
    pub height: f32,

    /// Font size in pixels
    #[arg(long, default_value_t = 14.0)]
    pub font_size: f32,

    /// Output sample rate (defaults to the device rate)
    #[arg(long)]
    pub sample_rate: Option<u32>,

    /// Audio buffer size in frames (defaults to the device choice)
    #[arg(long)]
    pub buffer_frames: Option<u32>,

    /// Start on the visualizer instead of the song info panel
    #[arg(long)]
    pub visualizer: bool,

    /// Loop the song instead of stopping at its end
    #[arg(long = "loop")]
    pub repeat: bool,

    /// Keep the window open after the song ends
    #[arg(long)]
    pub keep_open: bool,
}

impl Args {
    pub fn playback(&self) -> PlaybackConfig {
        PlaybackConfig {
            audio: AudioConfig {
                sample_rate: self.sample_rate,
                buffer_frames: self.buffer_frames,
            },
            repeat: if self.repeat {
                RepeatMode::Forever
            } else {
                RepeatMode::Once
            },
        }
    }

    /// Whether reaching the end of the song closes the window.
    pub fn exit_at_end(&self) -> bool {
        !self.keep_open && !self.repeat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_compact_window() {
        let args = Args::parse_from(["modviz"]);
        assert!(args.file.is_none());
        assert_eq!(args.width, 480.0);
        assert_eq!(args.height, 180.0);
        assert!(!args.visualizer);
        assert!(args.exit_at_end());
        assert_eq!(args.playback(), PlaybackConfig::default());
    }

    #[test]
    fn loop_implies_staying_open() {
        let args = Args::parse_from(["modviz", "--loop", "song.xm"]);
        assert_eq!(args.file, Some(PathBuf::from("song.xm")));
        assert_eq!(args.playback().repeat, RepeatMode::Forever);
        assert!(!args.exit_at_end());
    }

    #[test]
    fn audio_overrides_flow_into_playback_config() {
        let args = Args::parse_from([
            "modviz",
            "--sample-rate",
            "48000",
            "--buffer-frames",
            "4096",
        ]);
        let audio = args.playback().audio;
        assert_eq!(audio.sample_rate, Some(48000));
        assert_eq!(audio.buffer_frames, Some(4096));
    }
}
