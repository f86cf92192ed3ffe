//! Per-channel volume bars.

use super::layout;
use super::{WHITE, YELLOW};
use mv_player::FrameInfo;

pub fn visualizer_panel(ui: &imgui::Ui, frame: &FrameInfo, size: [f32; 2]) {
    let volumes: Vec<u8> = frame.channels.iter().map(|c| c.volume).collect();
    let bars = layout::visualizer_bars(size, &volumes);
    let Some(first) = bars.first() else {
        return;
    };
    let stride = layout::label_stride(first.width);

    let origin = ui.window_pos();
    let draw_list = ui.get_window_draw_list();
    for bar in bars.iter().filter(|b| b.height > 0.0) {
        let p1 = [origin[0] + bar.x, origin[1] + bar.y];
        let p2 = [p1[0] + bar.width, p1[1] + bar.height];
        draw_list.add_rect(p1, p2, YELLOW).filled(true).build();
    }

    for (ch, bar) in bars.iter().enumerate().step_by(stride) {
        draw_list.add_text(
            [origin[0] + bar.x, origin[1] + bar.label_y],
            WHITE,
            (ch + 1).to_string(),
        );
    }
}
