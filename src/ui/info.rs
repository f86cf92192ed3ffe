//! Song info panel: metadata on the left, the current row per channel on the right.

use super::layout;
use super::{GuiState, BLUE, WHITE, YELLOW};
use mv_player::{ChannelState, FrameInfo, ModuleInfo};

const METER_WIDTH: usize = 4;

pub fn info_panel(ui: &imgui::Ui, gui: &GuiState, frame: &FrameInfo, size: [f32; 2]) {
    let Some(session) = gui.controller.session() else {
        return;
    };

    let file_name = session.file_name();
    for (i, (label, value)) in info_fields(session.info(), &file_name).iter().enumerate() {
        ui.set_cursor_pos([layout::TOP, layout::TOP + i as f32 * layout::FIELD_HEIGHT]);
        ui.text_colored(WHITE, label);
        ui.same_line();
        ui.text_colored(BLUE, value);
    }

    let x = layout::right_column_x(size[0]);
    for ch in 0..layout::listed_channels(session.info().channels) {
        let state = frame.channels.get(ch).copied().unwrap_or_default();
        ui.set_cursor_pos([x, layout::TOP + ch as f32 * layout::LINE_HEIGHT]);
        ui.text_colored(YELLOW, channel_row(ch, state));
    }
}

/// Label/value pairs in display order.
pub fn info_fields(info: &ModuleInfo, file_name: &str) -> Vec<(&'static str, String)> {
    vec![
        ("Title:", info.display_title(file_name).to_string()),
        ("Type:", info.format.clone()),
        ("Channels:", info.channels.to_string()),
        ("Patterns:", info.patterns.to_string()),
        ("Instruments:", info.instruments.to_string()),
        ("Length:", format!("{} patterns", info.length)),
    ]
}

/// One line of the channel list, e.g. `Ch01: C-5 Ins:03 ##..`.
pub fn channel_row(ch: usize, state: ChannelState) -> String {
    format!(
        "Ch{:02}: {} Ins:{:02} {}",
        ch + 1,
        state.note_name(),
        state.instrument,
        state.meter(METER_WIDTH)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_follow_the_panel_order() {
        let info = ModuleInfo {
            title: "Dope".into(),
            format: "FastTracker 2".into(),
            channels: 8,
            patterns: 30,
            instruments: 12,
            length: 41,
            ..Default::default()
        };
        let fields = info_fields(&info, "dope.xm");
        let labels: Vec<_> = fields.iter().map(|(l, _)| *l).collect();
        assert_eq!(
            labels,
            ["Title:", "Type:", "Channels:", "Patterns:", "Instruments:", "Length:"]
        );
        assert_eq!(fields[0].1, "Dope");
        assert_eq!(fields[2].1, "8");
        assert_eq!(fields[5].1, "41 patterns");
    }

    #[test]
    fn untitled_module_shows_file_name() {
        let fields = info_fields(&ModuleInfo::default(), "untitled.mod");
        assert_eq!(fields[0].1, "untitled.mod");
    }

    #[test]
    fn channel_rows_are_one_based() {
        assert_eq!(
            channel_row(0, ChannelState::new(32).with_cell(37, 5)),
            "Ch01: C-3 Ins:05 ##.."
        );
        assert_eq!(channel_row(11, ChannelState::new(0)), "Ch12: --- Ins:00 ....");
        assert_eq!(
            channel_row(3, ChannelState::new(64).with_cell(62, 12)),
            "Ch04: C#5 Ins:12 ####"
        );
    }

    #[test]
    fn special_notes_show_as_empty() {
        let key_off = ChannelState::new(16).with_cell(0xFF, 2);
        assert_eq!(channel_row(1, key_off), "Ch02: --- Ins:02 #...");
    }
}
