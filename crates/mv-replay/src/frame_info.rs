//! Per-frame playback snapshot.

/// Top of the tracker volume scale.
pub const MAX_VOLUME: u8 = 64;

/// Highest note value that maps to a pitch. 1 is C-0.
pub const MAX_NOTE: u8 = 120;

const NOTE_NAMES: [&str; 12] = [
    "C-", "C#", "D-", "D#", "E-", "F-", "F#", "G-", "G#", "A-", "A#", "B-",
];

/// State of a single channel at the current row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChannelState {
    /// 0..=64
    pub volume: u8,
    /// Note on the current row: 0 is empty, 1..=120 is C-0..B-9, anything
    /// else is a special event (key off, note cut).
    pub note: u8,
    /// Instrument on the current row, 0 when none.
    pub instrument: u8,
}

impl ChannelState {
    pub fn new(volume: u8) -> Self {
        Self {
            volume: volume.min(MAX_VOLUME),
            ..Self::default()
        }
    }

    /// Attach the current row's note and instrument.
    pub fn with_cell(self, note: u8, instrument: u8) -> Self {
        Self {
            note,
            instrument,
            ..self
        }
    }

    /// `C-3`, `F#5`, or `---` for an empty or special note.
    pub fn note_name(&self) -> String {
        match self.note {
            n @ 1..=MAX_NOTE => {
                let n = n - 1;
                format!("{}{}", NOTE_NAMES[(n % 12) as usize], n / 12)
            }
            _ => "---".to_string(),
        }
    }

    /// Map a VU level (nominally 0.0..=1.0, may overshoot) onto 0..=64.
    pub fn from_vu(vu: f32) -> Self {
        if !vu.is_finite() || vu <= 0.0 {
            return Self::default();
        }
        let scaled = (vu * MAX_VOLUME as f32).round();
        Self::new(scaled.min(MAX_VOLUME as f32) as u8)
    }

    /// Text meter `width` cells wide: `#` for the filled part, `.` for the rest.
    pub fn meter(&self, width: usize) -> String {
        let volume = self.volume.min(MAX_VOLUME);
        let filled = volume as usize * width / MAX_VOLUME as usize;
        let mut s = String::with_capacity(width);
        s.extend(std::iter::repeat('#').take(filled));
        s.extend(std::iter::repeat('.').take(width - filled));
        s
    }
}

/// Where playback is right now.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInfo {
    pub order: usize,
    pub pattern: usize,
    pub row: usize,
    pub speed: u32,
    pub position_secs: f64,
    pub channels: Vec<ChannelState>,
}

impl FrameInfo {
    /// Volume of channel `ch`, zero for channels the snapshot does not cover.
    pub fn volume(&self, ch: usize) -> u8 {
        self.channels.get(ch).map_or(0, |c| c.volume)
    }
}
