//! libopenmpt-backed replayer.

use std::ops::Range;
use std::path::Path;

use openmpt::module::iteration::ModuleCommandIndex;
use openmpt::module::metadata::MetadataKey;
use openmpt::module::{Logger, Module};

use crate::{ChannelState, FrameInfo, ModuleInfo, RepeatMode, ReplayError, Replayer};

/// A module loaded into libopenmpt.
pub struct OpenMptReplayer {
    module: Module,
    info: ModuleInfo,
    /// libopenmpt renders as many frames as this buffer has capacity for, so
    /// its length is always kept equal to its capacity.
    buffer: Vec<i16>,
    /// Samples in `buffer` rendered but not yet handed out.
    pending: Range<usize>,
}

// SAFETY: a libopenmpt module handle has no thread affinity. The player only
// touches it through a mutex, so it is never used from two threads at once.
unsafe impl Send for OpenMptReplayer {}

/// Read `path` and hand it to libopenmpt.
pub fn open(path: &Path, repeat: RepeatMode) -> Result<Box<dyn Replayer>, ReplayError> {
    let data = std::fs::read(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let replayer = OpenMptReplayer::from_bytes(path, data, repeat)?;
    Ok(Box::new(replayer))
}

impl OpenMptReplayer {
    /// Load module data already in memory. `path` is only used for errors
    /// and logging.
    pub fn from_bytes(path: &Path, mut data: Vec<u8>, repeat: RepeatMode) -> Result<Self, ReplayError> {
        let mut module = Module::create_from_memory(&mut data, Logger::None, &[]).map_err(|()| {
            ReplayError::Unsupported {
                path: path.to_path_buf(),
            }
        })?;

        let repeat_count = match repeat {
            RepeatMode::Once => 0,
            RepeatMode::Forever => -1,
        };
        if !module.set_repeat_count(repeat_count) {
            log::warn!("libopenmpt rejected repeat count {}", repeat_count);
        }

        let info = read_info(&mut module);
        log::info!(
            "loaded {} ({}, {} channels, {} orders)",
            path.display(),
            info.format,
            info.channels,
            info.length
        );

        Ok(Self {
            module,
            info,
            buffer: Vec::new(),
            pending: 0..0,
        })
    }

    /// Render the next block into `buffer`. Returns false at the end of the song.
    fn refill(&mut self, sample_rate: u32, wanted: usize) -> bool {
        if self.buffer.capacity() < wanted {
            self.buffer.reserve_exact(wanted - self.buffer.len());
        }
        let capacity = self.buffer.capacity();
        self.buffer.resize(capacity, 0);

        let frames = self
            .module
            .read_interleaved_stereo(sample_rate as i32, &mut self.buffer);
        let samples = (frames * 2).min(self.buffer.len());
        self.pending = 0..samples;
        samples > 0
    }

    /// Note and instrument of every channel on the row being played.
    fn current_cells(&mut self, pattern: i32, row: i32) -> Vec<(u8, u8)> {
        let channels = self.info.channels;
        let mut cells = vec![(0, 0); channels];

        let Some(mut pattern) = self.module.get_pattern_by_number(pattern) else {
            return cells;
        };
        if row < 0 || row >= pattern.get_num_rows() {
            return cells;
        }
        let Some(mut row) = pattern.get_row_by_number(row) else {
            return cells;
        };
        for (ch, slot) in cells.iter_mut().enumerate() {
            if let Some(mut cell) = row.get_cell_by_channel(ch as i32) {
                *slot = (
                    cell.get_data_by_command(ModuleCommandIndex::Note),
                    cell.get_data_by_command(ModuleCommandIndex::Instrument),
                );
            }
        }
        cells
    }
}

fn read_info(module: &mut Module) -> ModuleInfo {
    ModuleInfo {
        title: metadata(module, MetadataKey::ModuleTitle),
        format: metadata(module, MetadataKey::TypeName),
        tracker: metadata(module, MetadataKey::ModuleTracker),
        channels: count(module.get_num_channels()),
        patterns: count(module.get_num_patterns()),
        instruments: count(module.get_num_instruments()),
        samples: count(module.get_num_samples()),
        length: count(module.get_num_orders()),
        duration_secs: module.get_duration_seconds(),
    }
}

fn metadata(module: &mut Module, key: MetadataKey) -> String {
    module
        .get_metadata(key)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn count(n: i32) -> usize {
    n.max(0) as usize
}

impl Replayer for OpenMptReplayer {
    fn info(&self) -> &ModuleInfo {
        &self.info
    }

    fn render(&mut self, sample_rate: u32, out: &mut [i16]) -> usize {
        let wanted = out.len() / 2 * 2;
        let mut written = 0;

        while written < wanted {
            if self.pending.is_empty() && !self.refill(sample_rate, wanted - written) {
                break;
            }
            let n = self.pending.len().min(wanted - written);
            let start = self.pending.start;
            out[written..written + n].copy_from_slice(&self.buffer[start..start + n]);
            self.pending.start += n;
            written += n;
        }

        written / 2
    }

    fn frame_info(&mut self) -> FrameInfo {
        let pattern = self.module.get_current_pattern();
        let row = self.module.get_current_row();
        let cells = self.current_cells(pattern, row);

        let channels = cells
            .into_iter()
            .enumerate()
            .map(|(ch, (note, instrument))| {
                ChannelState::from_vu(self.module.get_current_channel_vu_mono(ch as i32))
                    .with_cell(note, instrument)
            })
            .collect();

        FrameInfo {
            order: count(self.module.get_current_order()),
            pattern: count(pattern),
            row: count(row),
            speed: count(self.module.get_current_speed()) as u32,
            position_secs: self.module.get_position_seconds(),
            channels,
        }
    }
}
