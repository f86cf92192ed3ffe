//! Integration tests for the libopenmpt backend against a generated MOD file.

#![cfg(feature = "openmpt")]

use mv_replay::{OpenMptReplayer, RepeatMode, Replayer};
use std::path::Path;

const RATE: u32 = 8000;
const ROWS: usize = 64;
const CHANNELS: usize = 4;
/// ProTracker period for C-1.
const PERIOD_C: u16 = 428;

/// A one-pattern, four-channel ProTracker module. Channels 0 and 1 start a
/// looped square wave on row 0; channels 2 and 3 stay empty.
fn fixture_mod() -> Vec<u8> {
    let mut data = Vec::new();

    let mut title = [0u8; 20];
    title[..12].copy_from_slice(b"fixture song");
    data.extend_from_slice(&title);

    let sample_words: u16 = 32;
    for i in 0..31 {
        let mut header = [0u8; 30];
        if i == 0 {
            header[..6].copy_from_slice(b"square");
            header[22..24].copy_from_slice(&sample_words.to_be_bytes());
            header[25] = 64; // volume
            header[28..30].copy_from_slice(&sample_words.to_be_bytes()); // loop length
        } else {
            header[29] = 1;
        }
        data.extend_from_slice(&header);
    }

    data.push(1); // song length
    data.push(127);
    data.extend_from_slice(&[0u8; 128]); // order list: pattern 0
    data.extend_from_slice(b"M.K.");

    for row in 0..ROWS {
        for ch in 0..CHANNELS {
            let cell = if row == 0 && ch < 2 {
                let period = PERIOD_C >> ch;
                let sample = 1u8;
                [
                    (sample & 0xF0) | (period >> 8) as u8,
                    period as u8,
                    (sample & 0x0F) << 4,
                    0,
                ]
            } else {
                [0; 4]
            };
            data.extend_from_slice(&cell);
        }
    }

    for i in 0..sample_words as usize * 2 {
        data.push(if i < sample_words as usize { 0x40 } else { 0xC0 });
    }
    data
}

fn load(repeat: RepeatMode) -> OpenMptReplayer {
    OpenMptReplayer::from_bytes(Path::new("fixture.mod"), fixture_mod(), repeat)
        .unwrap_or_else(|e| panic!("fixture should load: {}", e))
}

#[test]
fn metadata_matches_fixture() {
    let replayer = load(RepeatMode::Once);
    let info = replayer.info();
    assert_eq!(info.title, "fixture song");
    assert!(!info.format.is_empty());
    assert_eq!(info.channels, CHANNELS);
    assert_eq!(info.patterns, 1);
    assert_eq!(info.length, 1);
    assert!(info.samples >= 1);
    // 64 rows at speed 6, 125 BPM: 0.12 s per row
    assert!(
        (info.duration_secs - 7.68).abs() < 0.5,
        "duration {}",
        info.duration_secs
    );
}

#[test]
fn render_stays_within_the_buffer() {
    let mut replayer = load(RepeatMode::Once);
    let mut out = vec![i16::MIN; 401];
    let frames = replayer.render(RATE, &mut out);
    assert_eq!(frames, 200);
    assert_eq!(out[400], i16::MIN, "odd trailing sample must be untouched");
    assert!(out[..400].iter().any(|&s| s != 0), "expected audible output");

    let mut tiny = [0i16; 1];
    assert_eq!(replayer.render(RATE, &mut tiny), 0);
}

#[test]
fn song_end_gives_a_short_render() {
    let mut replayer = load(RepeatMode::Once);
    let mut out = vec![0i16; 4096 * 2];
    let mut total = 0usize;
    let mut last = 0;
    for _ in 0..100 {
        last = replayer.render(RATE, &mut out);
        total += last;
        if last < 4096 {
            break;
        }
    }
    assert!(last < 4096, "song never ended");

    let expected = replayer.info().duration_secs * RATE as f64;
    let ratio = total as f64 / expected;
    assert!((0.9..1.1).contains(&ratio), "rendered {} of {} frames", total, expected);

    assert_eq!(replayer.render(RATE, &mut out), 0);
}

#[test]
fn forever_keeps_rendering_past_the_end() {
    let mut replayer = load(RepeatMode::Forever);
    let song_frames = (replayer.info().duration_secs * RATE as f64) as usize;
    let mut out = vec![0i16; 4096 * 2];
    let mut total = 0usize;
    while total < song_frames + RATE as usize {
        let frames = replayer.render(RATE, &mut out);
        assert_eq!(frames, 4096, "looping song stopped after {} frames", total);
        total += frames;
    }
}

#[test]
fn frame_info_covers_every_channel() {
    let mut replayer = load(RepeatMode::Once);
    let mut out = vec![0i16; 64 * 2];
    replayer.render(RATE, &mut out);

    let frame = replayer.frame_info();
    assert_eq!(frame.channels.len(), replayer.info().channels);
    assert_eq!(frame.pattern, 0);
    assert_eq!(frame.row, 0);
    assert_eq!(frame.speed, 6);

    assert_ne!(frame.channels[0].note_name(), "---");
    assert_eq!(frame.channels[0].instrument, 1);
    assert_eq!(frame.channels[1].instrument, 1);
    assert_eq!(frame.channels[2].note_name(), "---");
    assert_eq!(frame.channels[2].instrument, 0);
}

#[test]
fn position_advances_with_rendering() {
    let mut replayer = load(RepeatMode::Once);
    let mut out = vec![0i16; RATE as usize * 2];
    replayer.render(RATE, &mut out);

    let frame = replayer.frame_info();
    assert!(frame.position_secs > 0.5, "position {}", frame.position_secs);
    assert!(frame.row > 0);
    assert!(frame.volume(0) > 0, "channel 0 should be sounding");
    assert_eq!(frame.volume(2), 0);
}
