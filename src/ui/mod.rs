//! UI modules and layout composition.

mod info;
pub mod input;
pub mod layout;
mod visualizer;

use input::PlayerAction;
use mv_player::{Controller, FrameInfo, PlaybackConfig};
use std::path::Path;

pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const BLUE: [f32; 4] = [0.0, 0.5, 1.0, 1.0];
pub const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
pub const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

const DROP_PROMPT: &str = "Drag and drop a module file to play";

/// UI-facing state bundle: passed to all panel functions.
/// No GL/imgui/renderer fields.
pub struct GuiState {
    pub controller: Controller,
    pub show_visualizer: bool,
    /// Last load error, shown until the next action.
    pub error: Option<String>,
    pub exit_at_end: bool,
    quit_requested: bool,
}

impl GuiState {
    pub fn new(config: PlaybackConfig, show_visualizer: bool, exit_at_end: bool) -> Self {
        Self {
            controller: Controller::new(config),
            show_visualizer,
            error: None,
            exit_at_end,
            quit_requested: false,
        }
    }

    /// Load and play `path`. A failure is logged and shown; whatever was
    /// playing keeps playing.
    pub fn open(&mut self, path: &Path) {
        match self.controller.open(path) {
            Ok(()) => self.error = None,
            Err(e) => {
                log::error!("{}", e);
                self.error = Some(e.to_string());
            }
        }
    }

    /// True once the window should close: Escape was pressed, or the song
    /// ended and we are not configured to stay open.
    pub fn should_exit(&self) -> bool {
        self.quit_requested || (self.exit_at_end && self.controller.is_finished())
    }

    pub fn shutdown(&mut self) {
        self.controller.stop();
    }

    /// Window title for the current song.
    pub fn title(&self) -> String {
        match self.controller.session() {
            Some(s) => format!("{} - modviz", s.file_name()),
            None => "modviz".to_string(),
        }
    }

    /// Footer status word.
    pub fn playback_label(&self) -> &'static str {
        let c = &self.controller;
        if !c.has_session() {
            "Idle"
        } else if c.is_stopped() {
            "Stopped"
        } else if c.is_finished() {
            "Finished"
        } else if c.is_paused() {
            "Paused"
        } else {
            "Playing"
        }
    }
}

pub fn build_ui(ui: &imgui::Ui, gui: &mut GuiState) {
    let display_size = ui.io().display_size;
    ui.window("modviz")
        .position([0.0, 0.0], imgui::Condition::Always)
        .size(display_size, imgui::Condition::Always)
        .flags(
            imgui::WindowFlags::NO_DECORATION
                | imgui::WindowFlags::NO_MOVE
                | imgui::WindowFlags::NO_BRING_TO_FRONT_ON_FOCUS
                | imgui::WindowFlags::NO_BACKGROUND,
        )
        .build(|| {
            let actions = input::poll_player_actions(ui);
            process_actions(gui, &actions);

            if !gui.controller.has_session() {
                drop_prompt(ui, gui, display_size);
                return;
            }

            let frame = gui.controller.frame_info();
            if gui.show_visualizer {
                visualizer::visualizer_panel(ui, &frame, display_size);
            } else {
                info::info_panel(ui, gui, &frame, display_size);
            }
            footer(ui, gui, &frame, display_size);
        });
}

/// Apply actions to the GUI state. Keyboard, drag-and-drop and buttons all
/// come through here.
pub fn process_actions(gui: &mut GuiState, actions: &[PlayerAction]) {
    for action in actions {
        match action {
            PlayerAction::TogglePause => {
                gui.error = None;
                gui.controller.toggle_pause();
            }
            PlayerAction::StopAndExit => {
                gui.controller.stop();
                gui.quit_requested = true;
            }
            PlayerAction::ToggleVisualizer => {
                gui.error = None;
                gui.show_visualizer = !gui.show_visualizer;
            }
            PlayerAction::OpenDialog => {
                if let Some(path) = pick_module_file() {
                    gui.open(&path);
                }
            }
            PlayerAction::Open(path) => gui.open(path),
        }
    }
}

fn pick_module_file() -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .add_filter(
            "Tracker modules",
            &["mod", "xm", "s3m", "it", "mptm", "stm", "669", "med", "mtm", "ult", "umx"],
        )
        .add_filter("All files", &["*"])
        .pick_file()
}

fn drop_prompt(ui: &imgui::Ui, gui: &mut GuiState, size: [f32; 2]) {
    let text_w = ui.calc_text_size(DROP_PROMPT)[0];
    let x = ((size[0] - text_w) * 0.5).max(layout::TOP);
    let y = (size[1] * 0.5 - layout::FIELD_HEIGHT).max(layout::TOP);

    ui.set_cursor_pos([x, y]);
    ui.text_colored(WHITE, DROP_PROMPT);

    ui.set_cursor_pos([x, y + layout::FIELD_HEIGHT + 4.0]);
    if ui.button("Open...") {
        process_actions(gui, &[PlayerAction::OpenDialog]);
    }

    if let Some(err) = &gui.error {
        ui.set_cursor_pos([layout::TOP, layout::footer_lines(size[1])[1]]);
        ui.text_colored(RED, err);
    }
}

/// Control hints on the left, pattern and play state on the right.
fn footer(ui: &imgui::Ui, gui: &GuiState, frame: &FrameInfo, size: [f32; 2]) {
    let [first, second] = layout::footer_lines(size[1]);
    let right = layout::right_column_x(size[0]);

    ui.set_cursor_pos([layout::TOP, first]);
    match &gui.error {
        Some(err) => ui.text_colored(RED, err),
        None => ui.text_colored(WHITE, "SPACE: Play/Pause"),
    }
    ui.set_cursor_pos([layout::TOP, second]);
    ui.text_colored(WHITE, "ESC: Stop and exit   V: Visualizer");

    ui.set_cursor_pos([right, first]);
    ui.text_colored(WHITE, "Playing pattern:");
    ui.same_line();
    ui.text_colored(RED, frame.pattern.to_string());

    ui.set_cursor_pos([right, second]);
    ui.text_colored(WHITE, gui.playback_label());
}
