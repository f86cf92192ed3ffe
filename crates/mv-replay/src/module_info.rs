//! Static module metadata.

use std::fmt;

/// Song-level metadata reported by the replay library.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModuleInfo {
    pub title: String,
    /// Human-readable format, e.g. "ProTracker MOD".
    pub format: String,
    pub tracker: String,
    pub channels: usize,
    pub patterns: usize,
    pub instruments: usize,
    pub samples: usize,
    /// Song length in order-list entries.
    pub length: usize,
    pub duration_secs: f64,
}

impl ModuleInfo {
    /// Title for display, falling back to the given file name when the module
    /// carries none.
    pub fn display_title<'a>(&'a self, fallback: &'a str) -> &'a str {
        let trimmed = self.title.trim();
        if trimmed.is_empty() {
            fallback
        } else {
            trimmed
        }
    }

    /// Duration as `m:ss`.
    pub fn duration_label(&self) -> String {
        format_clock(self.duration_secs)
    }
}

/// Format seconds as `m:ss`, clamping negatives to zero.
pub fn format_clock(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

impl fmt::Display for ModuleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title:       {}", self.title)?;
        writeln!(f, "Type:        {}", self.format)?;
        if !self.tracker.is_empty() {
            writeln!(f, "Tracker:     {}", self.tracker)?;
        }
        writeln!(f, "Channels:    {}", self.channels)?;
        writeln!(f, "Patterns:    {}", self.patterns)?;
        writeln!(f, "Instruments: {}", self.instruments)?;
        writeln!(f, "Samples:     {}", self.samples)?;
        writeln!(f, "Length:      {} patterns", self.length)?;
        write!(f, "Duration:    {}", self.duration_label())
    }
}
