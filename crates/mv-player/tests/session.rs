//! Integration tests: session state, transport handoff and WAV export, driven
//! by a scripted replayer instead of a real module.

use mv_audio::fill_output;
use mv_player::{
    render_wav, ChannelState, Controller, FrameInfo, ModuleInfo, PlayerError, ReplayError,
    Replayer, Session,
};
use std::io::Cursor;
use std::path::Path;

/// Plays `length` frames of a rising ramp; one "row" every 100 frames.
struct Ramp {
    info: ModuleInfo,
    length: usize,
    played: usize,
}

impl Ramp {
    fn new(length: usize) -> Self {
        Self {
            info: ModuleInfo {
                title: "ramp".into(),
                format: "Test Module".into(),
                channels: 3,
                patterns: 2,
                instruments: 1,
                samples: 1,
                length: 2,
                ..Default::default()
            },
            length,
            played: 0,
        }
    }
}

impl Replayer for Ramp {
    fn info(&self) -> &ModuleInfo {
        &self.info
    }

    fn render(&mut self, _sample_rate: u32, out: &mut [i16]) -> usize {
        let n = (out.len() / 2).min(self.length - self.played);
        for (i, frame) in out.chunks_exact_mut(2).take(n).enumerate() {
            let v = ((self.played + i) % 1000) as i16;
            frame[0] = v;
            frame[1] = -v;
        }
        self.played += n;
        n
    }

    fn frame_info(&mut self) -> FrameInfo {
        let row = self.played / 100;
        FrameInfo {
            order: row / 64,
            pattern: row / 64,
            row: row % 64,
            speed: 6,
            position_secs: self.played as f64 / 44100.0,
            channels: (0..self.info.channels)
                .map(|ch| ChannelState::new((ch as u8 + 1) * 20))
                .collect(),
        }
    }
}

fn session(length: usize) -> Session {
    Session::new("songs/ramp.mod", Box::new(Ramp::new(length)))
}

fn callback(session: &Session, frames: usize) -> Vec<f32> {
    let mut scratch = Vec::new();
    let mut data = vec![0.0f32; frames * 2];
    fill_output(
        session.transport(),
        &**session.replayer(),
        44100,
        &mut scratch,
        &mut data,
        2,
    );
    data
}

// --- Session ---

#[test]
fn session_copies_metadata_and_file_name() {
    let s = session(1000);
    assert_eq!(s.info().title, "ramp");
    assert_eq!(s.info().channels, 3);
    assert_eq!(s.file_name(), "ramp.mod");
    assert_eq!(s.path(), Path::new("songs/ramp.mod"));
}

#[test]
fn frame_info_follows_the_callback() {
    let s = session(100_000);
    assert_eq!(s.frame_info().row, 0);

    callback(&s, 450);
    let fi = s.frame_info();
    assert_eq!(fi.row, 4);
    assert_eq!(fi.channels.len(), 3);
    assert_eq!(fi.volume(2), 60);
}

#[test]
fn pausing_freezes_position() {
    let s = session(100_000);
    callback(&s, 300);
    assert!(s.transport().toggle_pause());

    let out = callback(&s, 300);
    assert!(out.iter().all(|&x| x == 0.0));
    assert_eq!(s.frame_info().row, 3);

    assert!(!s.transport().toggle_pause());
    callback(&s, 300);
    assert_eq!(s.frame_info().row, 6);
}

#[test]
fn song_end_sets_finished() {
    let s = session(500);
    callback(&s, 400);
    assert!(!s.transport().is_finished());
    callback(&s, 400);
    assert!(s.transport().is_finished());
}

// --- Controller without a device ---

#[test]
fn empty_controller_has_nothing_to_report() {
    let mut c = Controller::default();
    assert!(!c.has_session());
    assert_eq!(c.toggle_pause(), None);
    assert!(!c.is_paused());
    assert!(!c.is_finished());
    assert!(c.module_info().is_none());
    assert_eq!(c.frame_info(), FrameInfo::default());
    c.stop();
    assert!(!c.is_stopped());
}

#[test]
fn opening_a_missing_file_keeps_controller_empty() {
    let mut c = Controller::default();
    let err = c.open(Path::new("no/such/file.it")).unwrap_err();
    assert!(matches!(err, PlayerError::Replay(ReplayError::Io { .. })));
    assert!(!c.has_session());
}

// --- WAV export ---

#[test]
fn wav_export_stops_at_song_end() {
    let mut ramp = Ramp::new(10_000);
    let mut buf = Cursor::new(Vec::new());
    let frames = render_wav(&mut ramp, 44100, 60, &mut buf).unwrap();
    assert_eq!(frames, 10_000);

    buf.set_position(0);
    let reader = hound::WavReader::new(buf).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 44100);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(reader.duration(), 10_000);

    let samples: Vec<i16> = reader.into_samples::<i16>().map(Result::unwrap).collect();
    assert_eq!(&samples[..6], &[0, 0, 1, -1, 2, -2]);
}

#[test]
fn wav_export_respects_time_limit() {
    let mut ramp = Ramp::new(usize::MAX / 2);
    let mut buf = Cursor::new(Vec::new());
    let frames = render_wav(&mut ramp, 8000, 2, &mut buf).unwrap();
    assert_eq!(frames, 16_000);

    buf.set_position(0);
    let reader = hound::WavReader::new(buf).unwrap();
    assert_eq!(reader.duration(), 16_000);
}
