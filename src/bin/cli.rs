//! modviz CLI: headless playback and WAV export.
//!
//! Usage:
//!   mv-cli path/to/file.xm
//!   mv-cli path/to/file.xm --wav output.wav

use anyhow::{Context, Result};
use clap::Parser;
use mv_player::{
    format_clock, render_wav, AudioConfig, Controller, FrameInfo, PlaybackConfig, RepeatMode,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Channels shown on the status line.
const STATUS_CHANNELS: usize = 8;
const METER_WIDTH: usize = 4;

#[derive(Debug, Parser)]
#[command(name = "mv-cli", version, about = "Headless tracker module player")]
struct Args {
    /// Module file to play
    file: PathBuf,

    /// Render to this WAV file instead of playing
    #[arg(long)]
    wav: Option<PathBuf>,

    /// Maximum length of a WAV render, in seconds
    #[arg(long, default_value_t = 300)]
    seconds: u32,

    /// Output sample rate (WAV default 44100, playback defaults to the device)
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Loop the song (playback only; a WAV render still stops at --seconds)
    #[arg(long = "loop")]
    repeat: bool,
}

impl Args {
    fn repeat_mode(&self) -> RepeatMode {
        if self.repeat {
            RepeatMode::Forever
        } else {
            RepeatMode::Once
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    match &args.wav {
        Some(out) => render_to_wav(&args, out),
        None => play_audio(&args),
    }
}

fn play_audio(args: &Args) -> Result<()> {
    let mut ctrl = Controller::new(PlaybackConfig {
        audio: AudioConfig {
            sample_rate: args.sample_rate,
            buffer_frames: None,
        },
        repeat: args.repeat_mode(),
    });
    ctrl.open(&args.file)
        .with_context(|| format!("cannot play {}", args.file.display()))?;

    if let Some(info) = ctrl.module_info() {
        println!("{}", info);
    }
    println!();
    println!("Playing...");

    while !ctrl.is_finished() {
        print!("\r{}", status_line(&ctrl.frame_info()));
        if let Err(e) = std::io::stdout().flush() {
            log::debug!("stdout flush failed: {}", e);
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    ctrl.stop();
    println!("\rDone.{:width$}", "", width = 40);
    Ok(())
}

fn render_to_wav(args: &Args, out: &Path) -> Result<()> {
    let sample_rate = args.sample_rate.unwrap_or(44100);
    let mut replayer = mv_replay::open(&args.file, RepeatMode::Once)
        .with_context(|| format!("cannot load {}", args.file.display()))?;
    println!("{}", replayer.info());
    println!();
    println!("Rendering to {} at {} Hz...", out.display(), sample_rate);

    let file = File::create(out).with_context(|| format!("cannot create {}", out.display()))?;
    let frames = render_wav(&mut *replayer, sample_rate, args.seconds, BufWriter::new(file))
        .with_context(|| format!("failed writing {}", out.display()))?;

    println!(
        "Rendered {} frames ({})",
        frames,
        format_clock(frames as f64 / sample_rate as f64)
    );
    Ok(())
}

/// `Ord: 03 | Pat: 05 | Row: 12 | Spd: 6 | 0:42 | ###. #... ....`
fn status_line(frame: &FrameInfo) -> String {
    let meters: Vec<String> = frame
        .channels
        .iter()
        .take(STATUS_CHANNELS)
        .map(|c| c.meter(METER_WIDTH))
        .collect();
    format!(
        "Ord: {:02} | Pat: {:02} | Row: {:02} | Spd: {} | {} | {}",
        frame.order,
        frame.pattern,
        frame.row,
        frame.speed,
        format_clock(frame.position_secs),
        meters.join(" ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mv_player::ChannelState;

    #[test]
    fn status_line_shows_position_and_meters() {
        let frame = FrameInfo {
            order: 3,
            pattern: 5,
            row: 12,
            speed: 6,
            position_secs: 42.5,
            channels: vec![ChannelState::new(48), ChannelState::new(16), ChannelState::new(0)],
        };
        assert_eq!(
            status_line(&frame),
            "Ord: 03 | Pat: 05 | Row: 12 | Spd: 6 | 0:42 | ###. #... ...."
        );
    }

    #[test]
    fn status_line_caps_channel_count() {
        let frame = FrameInfo {
            channels: vec![ChannelState::new(64); 32],
            ..Default::default()
        };
        let line = status_line(&frame);
        assert_eq!(line.matches("####").count(), STATUS_CHANNELS);
    }

    #[test]
    fn wav_flag_parses() {
        let args = Args::parse_from(["mv-cli", "song.mod", "--wav", "out.wav", "--seconds", "10"]);
        assert_eq!(args.wav, Some(PathBuf::from("out.wav")));
        assert_eq!(args.seconds, 10);
        assert_eq!(args.repeat_mode(), RepeatMode::Once);
    }
}
