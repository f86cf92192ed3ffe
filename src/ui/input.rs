//! Keyboard input mapping for the player.

/// An action produced by keyboard input, a drop, or a button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayerAction {
    TogglePause,
    /// Stop playback and close the window.
    StopAndExit,
    ToggleVisualizer,
    OpenDialog,
    Open(std::path::PathBuf),
}

/// Keys the player listens to.
const KEYS: [imgui::Key; 4] = [
    imgui::Key::Space,
    imgui::Key::Escape,
    imgui::Key::V,
    imgui::Key::O,
];

/// Map a single key press to its action. Presses with Ctrl/Alt/Super held are
/// left to the platform.
pub fn action_for_key(key: imgui::Key, with_modifier: bool) -> Option<PlayerAction> {
    if with_modifier {
        return None;
    }
    match key {
        imgui::Key::Space => Some(PlayerAction::TogglePause),
        imgui::Key::Escape => Some(PlayerAction::StopAndExit),
        imgui::Key::V => Some(PlayerAction::ToggleVisualizer),
        imgui::Key::O => Some(PlayerAction::OpenDialog),
        _ => None,
    }
}

/// Poll imgui key state and return all triggered player actions.
pub fn poll_player_actions(ui: &imgui::Ui) -> Vec<PlayerAction> {
    let io = ui.io();
    if io.want_text_input {
        return Vec::new();
    }
    let with_modifier = io.key_ctrl || io.key_alt || io.key_super;

    KEYS.iter()
        .filter(|&&key| ui.is_key_pressed(key))
        .filter_map(|&key| action_for_key(key, with_modifier))
        .collect()
}
