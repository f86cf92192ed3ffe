//! Offline rendering to 16-bit stereo WAV.

use hound::{SampleFormat, WavSpec, WavWriter};
use mv_replay::Replayer;
use std::io::{Seek, Write};

/// Frames rendered per replayer call.
const CHUNK_FRAMES: usize = 4096;

/// Render `replayer` into `w` until the song ends or `max_seconds` of audio
/// have been written. Returns the number of stereo frames written.
pub fn render_wav<R, W>(
    replayer: &mut R,
    sample_rate: u32,
    max_seconds: u32,
    w: W,
) -> Result<u64, hound::Error>
where
    R: Replayer + ?Sized,
    W: Write + Seek,
{
    let spec = WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::new(w, spec)?;

    let max_frames = sample_rate as u64 * max_seconds as u64;
    let mut buf = vec![0i16; CHUNK_FRAMES * 2];
    let mut written: u64 = 0;

    while written < max_frames {
        let want = (max_frames - written).min(CHUNK_FRAMES as u64) as usize;
        let got = replayer.render(sample_rate, &mut buf[..want * 2]).min(want);
        for &s in &buf[..got * 2] {
            writer.write_sample(s)?;
        }
        written += got as u64;
        if got < want {
            break;
        }
    }

    writer.finalize()?;
    Ok(written)
}
