//! Screen geometry. Pure functions so the arithmetic can be tested without a
//! GL context.

use mv_player::MAX_VOLUME;

/// Left/right margin around the bar area.
pub const MARGIN_X: f32 = 30.0;
pub const TOP: f32 = 10.0;
pub const BAR_SPACING: f32 = 2.0;
pub const MIN_BAR_WIDTH: f32 = 2.0;
/// Space under the bars for channel numbers.
pub const LABEL_HEIGHT: f32 = 20.0;
/// Two lines of controls/status at the bottom.
pub const FOOTER_HEIGHT: f32 = 40.0;
pub const LINE_HEIGHT: f32 = 15.0;
pub const FIELD_HEIGHT: f32 = 20.0;
/// Channel rows shown on the info panel.
pub const MAX_LISTED_CHANNELS: usize = 8;
/// Horizontal room a channel number needs before the next one.
pub const LABEL_MIN_WIDTH: f32 = 18.0;

/// One visualizer bar, in window coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bar {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Top of the channel number under the bar.
    pub label_y: f32,
}

/// Width of each of `n` bars sharing `usable` pixels, snapped to whole pixels.
pub fn bar_width(usable: f32, n: usize) -> f32 {
    if n == 0 {
        return 0.0;
    }
    let gaps = (n - 1) as f32 * BAR_SPACING;
    ((usable - gaps) / n as f32).floor().max(MIN_BAR_WIDTH)
}

/// Height of a bar for `volume` (0..=64), snapped to whole pixels.
pub fn bar_height(volume: u8, max_height: f32) -> f32 {
    let volume = volume.min(MAX_VOLUME) as f32;
    (volume * max_height / MAX_VOLUME as f32).floor()
}

/// Tallest a bar can be in a window `height` pixels high.
pub fn bar_max_height(height: f32) -> f32 {
    (height - TOP - LABEL_HEIGHT - FOOTER_HEIGHT).max(0.0)
}

/// Lay out one bottom-aligned bar per channel volume.
pub fn visualizer_bars(window: [f32; 2], volumes: &[u8]) -> Vec<Bar> {
    let [width, height] = window;
    let usable = (width - 2.0 * MARGIN_X).max(0.0);
    let w = bar_width(usable, volumes.len());
    let max_h = bar_max_height(height);

    volumes
        .iter()
        .enumerate()
        .map(|(ch, &vol)| {
            let h = bar_height(vol, max_h);
            Bar {
                x: MARGIN_X + ch as f32 * (w + BAR_SPACING),
                y: TOP + (max_h - h),
                width: w,
                height: h,
                label_y: TOP + max_h + 5.0,
            }
        })
        .collect()
}

/// Label every n-th bar so channel numbers never overlap.
pub fn label_stride(bar_width: f32) -> usize {
    let pitch = bar_width + BAR_SPACING;
    (LABEL_MIN_WIDTH / pitch).ceil().max(1.0) as usize
}

/// Y of the two footer lines.
pub fn footer_lines(height: f32) -> [f32; 2] {
    let first = height - FOOTER_HEIGHT;
    [first, first + LINE_HEIGHT]
}

/// X where the right-hand column (channel list, pattern, status) starts.
pub fn right_column_x(width: f32) -> f32 {
    (width * 0.625).floor()
}

/// Number of channel rows the info panel lists.
pub fn listed_channels(channels: usize) -> usize {
    channels.min(MAX_LISTED_CHANNELS)
}
