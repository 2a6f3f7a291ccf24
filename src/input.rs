//! Input adapter
//!
//! Translates host events (pointer, keyboard, controls, scroll, visibility)
//! into updates of the per-engine [`Interaction`] state. Scenes only ever read
//! `Interaction`; they never see raw events.

use glam::Vec2;
use thiserror::Error;

use crate::Size;

/// Named control elements a scene can bind to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// Function picker (`<select>`), value is a name or an index
    FunctionSelect,
    /// Probe animation speed slider (1..=100)
    AnimationSpeed,
    /// Surface rotation speed slider (0..=3)
    RotationSpeed,
    /// Play/pause button
    PlayPause,
    /// Manual x input field
    ManualX,
}

impl Control {
    /// Control by name, as passed to `SceneHandle::set_control`
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "function" | "function-select" => Some(Control::FunctionSelect),
            "animation-speed" => Some(Control::AnimationSpeed),
            "rotation-speed" => Some(Control::RotationSpeed),
            "play-pause" | "toggle" => Some(Control::PlayPause),
            "manual-x" | "x" => Some(Control::ManualX),
            _ => None,
        }
    }
}

/// Host event after platform decoding
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer position in canvas coordinates
    PointerMove(Vec2),
    PointerDown,
    PointerUp,
    /// Pointer left the canvas
    PointerLeave,
    /// Container resized to the given client size
    Resize(Size),
    /// Window vertical scroll offset
    Scroll(f32),
    /// Key name as reported by `KeyboardEvent.key`
    Key(String),
    /// Raw value of a control element
    Control { control: Control, value: String },
    /// Document visibility changed
    Visibility(bool),
}

/// Rejected numeric input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("`{0}` is not a number")]
    NotANumber(String),
    #[error("`{0}` is not a finite number")]
    NotFinite(String),
}

/// Parse a manual numeric entry.
///
/// Surrounding whitespace is ignored; empty, non-numeric and non-finite
/// values are rejected so callers can keep their last valid value.
pub fn parse_manual_value(raw: &str) -> Result<f32, InputError> {
    let trimmed = raw.trim();
    let value: f32 = trimmed
        .parse()
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))?;
    if !value.is_finite() {
        return Err(InputError::NotFinite(trimmed.to_string()));
    }
    Ok(value)
}

/// What a scene accepts from the input adapter
#[derive(Debug, Clone, Default)]
pub struct InputProfile {
    /// Names of the selectable descriptors, in cycle order
    pub choices: Vec<&'static str>,
    /// Pointer down advances the selection
    pub click_advances: bool,
    /// Arrow keys cycle the selection
    pub cycle_keys: bool,
    /// Space toggles play/pause
    pub playback_key: bool,
    /// `d` toggles the derivative overlay
    pub derivative_key: bool,
}

impl InputProfile {
    pub fn cycle_len(&self) -> usize {
        self.choices.len()
    }
}

/// Animation speed slider range
pub const ANIMATION_SPEED_RANGE: (f32, f32) = (1.0, 100.0);
/// Rotation speed slider range
pub const ROTATION_SPEED_RANGE: (f32, f32) = (0.0, 3.0);

/// Interaction state for one mounted scene
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    /// Cursor position (None until the pointer enters, or after it leaves)
    pub cursor: Option<Vec2>,
    /// Pointer button held
    pub pressed: bool,
    /// Selected descriptor index
    pub selected: usize,
    /// Probe animation speed (1..=100, 50 = nominal)
    pub animation_speed: f32,
    /// Surface rotation speed (0..=3)
    pub rotation_speed: f32,
    /// Play/pause flag
    pub playing: bool,
    /// Last valid manual x value
    pub manual_x: f32,
    /// Draw the derivative overlay
    pub show_derivative: bool,
    /// Window scroll offset
    pub scroll_y: f32,
    /// Document visible
    pub visible: bool,
}

impl Default for Interaction {
    fn default() -> Self {
        Self {
            cursor: None,
            pressed: false,
            selected: 0,
            animation_speed: 50.0,
            rotation_speed: 0.5,
            playing: true,
            manual_x: 0.0,
            show_derivative: false,
            scroll_y: 0.0,
            visible: true,
        }
    }
}

impl Interaction {
    /// Advance the selection, wrapping at `len`
    pub fn advance(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Step the selection back, wrapping at `len`
    pub fn retreat(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// Apply a host event. Returns false for keys the profile does not use,
    /// so the host can leave their default action alone.
    ///
    /// Resize and visibility are lifecycle events handled by the engine; here
    /// they only update the recorded flags.
    pub fn apply(&mut self, event: &InputEvent, profile: &InputProfile) -> bool {
        let len = profile.cycle_len();
        match event {
            InputEvent::PointerMove(pos) => self.cursor = Some(*pos),
            InputEvent::PointerDown => {
                self.pressed = true;
                if profile.click_advances {
                    self.advance(len);
                }
            }
            InputEvent::PointerUp => self.pressed = false,
            InputEvent::PointerLeave => {
                self.cursor = None;
                self.pressed = false;
            }
            InputEvent::Resize(_) => {}
            InputEvent::Scroll(y) => self.scroll_y = y.max(0.0),
            InputEvent::Key(key) => return self.apply_key(key, profile),
            InputEvent::Control { control, value } => self.apply_control(*control, value, profile),
            InputEvent::Visibility(visible) => self.visible = *visible,
        }
        true
    }

    fn apply_key(&mut self, key: &str, profile: &InputProfile) -> bool {
        let len = profile.cycle_len();
        match key {
            " " if profile.playback_key => self.playing = !self.playing,
            "ArrowRight" if profile.cycle_keys => self.advance(len),
            "ArrowLeft" if profile.cycle_keys => self.retreat(len),
            "d" | "D" if profile.derivative_key => self.show_derivative = !self.show_derivative,
            _ => return false,
        }
        true
    }

    fn apply_control(&mut self, control: Control, value: &str, profile: &InputProfile) {
        match control {
            Control::PlayPause => self.playing = !self.playing,
            Control::FunctionSelect => {
                let by_name = profile
                    .choices
                    .iter()
                    .position(|name| name.eq_ignore_ascii_case(value.trim()));
                let by_index = value
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|i| *i < profile.cycle_len());
                match by_name.or(by_index) {
                    Some(index) => self.selected = index,
                    None => log::debug!("Ignoring unknown function `{}`", value),
                }
            }
            Control::AnimationSpeed => {
                if let Some(v) = guarded(value) {
                    self.animation_speed = v.clamp(ANIMATION_SPEED_RANGE.0, ANIMATION_SPEED_RANGE.1);
                }
            }
            Control::RotationSpeed => {
                if let Some(v) = guarded(value) {
                    self.rotation_speed = v.clamp(ROTATION_SPEED_RANGE.0, ROTATION_SPEED_RANGE.1);
                }
            }
            Control::ManualX => {
                if let Some(v) = guarded(value) {
                    self.manual_x = v;
                }
            }
        }
    }
}

/// Parse a control value, logging and swallowing rejects
fn guarded(value: &str) -> Option<f32> {
    match parse_manual_value(value) {
        Ok(v) => Some(v),
        Err(e) => {
            log::debug!("Rejected control input: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn profile(n: usize, click: bool) -> InputProfile {
        const NAMES: [&str; 8] = [
            "Sigmoid",
            "ReLU",
            "Tanh",
            "Sine",
            "Gaussian",
            "Softplus",
            "Linear",
            "Exponential",
        ];
        InputProfile {
            choices: NAMES[..n].to_vec(),
            click_advances: click,
            cycle_keys: true,
            playback_key: true,
            derivative_key: true,
        }
    }

    fn control(control: Control, value: &str) -> InputEvent {
        InputEvent::Control {
            control,
            value: value.to_string(),
        }
    }

    #[test]
    fn test_parse_manual_value() {
        assert_eq!(parse_manual_value("1.5"), Ok(1.5));
        assert_eq!(parse_manual_value("  -2 "), Ok(-2.0));
        assert!(matches!(parse_manual_value("abc"), Err(InputError::NotANumber(_))));
        assert!(matches!(parse_manual_value(""), Err(InputError::NotANumber(_))));
        assert!(matches!(parse_manual_value("inf"), Err(InputError::NotFinite(_))));
        assert!(matches!(parse_manual_value("NaN"), Err(InputError::NotFinite(_))));
    }

    #[test]
    fn test_control_names() {
        assert_eq!(Control::from_name("function"), Some(Control::FunctionSelect));
        assert_eq!(Control::from_name("Rotation_Speed"), Some(Control::RotationSpeed));
        assert_eq!(Control::from_name("manual-x"), Some(Control::ManualX));
        assert_eq!(Control::from_name("volume"), None);
    }

    #[test]
    fn test_manual_input_keeps_last_valid() {
        let p = profile(5, false);
        let mut interaction = Interaction::default();
        interaction.apply(&control(Control::ManualX, "2.5"), &p);
        assert_eq!(interaction.manual_x, 2.5);

        interaction.apply(&control(Control::ManualX, "two"), &p);
        assert_eq!(interaction.manual_x, 2.5);

        interaction.apply(&control(Control::ManualX, "-"), &p);
        assert_eq!(interaction.manual_x, 2.5);
    }

    #[test]
    fn test_click_advances_only_when_enabled() {
        let mut interaction = Interaction::default();
        interaction.apply(&InputEvent::PointerDown, &profile(4, false));
        assert_eq!(interaction.selected, 0);
        assert!(interaction.pressed);

        interaction.apply(&InputEvent::PointerUp, &profile(4, true));
        interaction.apply(&InputEvent::PointerDown, &profile(4, true));
        assert_eq!(interaction.selected, 1);
    }

    #[test]
    fn test_arrow_keys_cycle_both_ways() {
        let p = profile(3, false);
        let mut interaction = Interaction::default();
        interaction.apply(&InputEvent::Key("ArrowLeft".into()), &p);
        assert_eq!(interaction.selected, 2);
        interaction.apply(&InputEvent::Key("ArrowRight".into()), &p);
        assert_eq!(interaction.selected, 0);
    }

    #[test]
    fn test_keys_outside_profile_are_not_consumed() {
        let p = InputProfile {
            choices: vec!["Sigmoid", "ReLU"],
            playback_key: true,
            ..Default::default()
        };
        let mut interaction = Interaction::default();
        assert!(!interaction.apply(&InputEvent::Key("ArrowRight".into()), &p));
        assert_eq!(interaction.selected, 0);
        assert!(!interaction.apply(&InputEvent::Key("d".into()), &p));
        assert!(!interaction.show_derivative);
        assert!(!interaction.apply(&InputEvent::Key("q".into()), &p));

        assert!(interaction.apply(&InputEvent::Key(" ".into()), &p));
        assert!(!interaction.playing);
    }

    #[test]
    fn test_space_and_button_toggle_playing() {
        let p = profile(3, false);
        let mut interaction = Interaction::default();
        interaction.apply(&InputEvent::Key(" ".into()), &p);
        assert!(!interaction.playing);
        interaction.apply(&control(Control::PlayPause, ""), &p);
        assert!(interaction.playing);
    }

    #[test]
    fn test_function_select_by_name_and_index() {
        let p = profile(5, false);
        let mut interaction = Interaction::default();
        interaction.apply(&control(Control::FunctionSelect, "tanh"), &p);
        assert_eq!(interaction.selected, 2);
        interaction.apply(&control(Control::FunctionSelect, "4"), &p);
        assert_eq!(interaction.selected, 4);
        interaction.apply(&control(Control::FunctionSelect, "Swish"), &p);
        assert_eq!(interaction.selected, 4);
        interaction.apply(&control(Control::FunctionSelect, "9"), &p);
        assert_eq!(interaction.selected, 4);
    }

    #[test]
    fn test_sliders_clamp_and_guard() {
        let p = profile(5, false);
        let mut interaction = Interaction::default();
        interaction.apply(&control(Control::AnimationSpeed, "250"), &p);
        assert_eq!(interaction.animation_speed, 100.0);
        interaction.apply(&control(Control::RotationSpeed, "-1"), &p);
        assert_eq!(interaction.rotation_speed, 0.0);
        interaction.apply(&control(Control::RotationSpeed, "fast"), &p);
        assert_eq!(interaction.rotation_speed, 0.0);
    }

    #[test]
    fn test_pointer_leave_clears_cursor() {
        let p = profile(1, false);
        let mut interaction = Interaction::default();
        interaction.apply(&InputEvent::PointerMove(Vec2::new(3.0, 4.0)), &p);
        interaction.apply(&InputEvent::PointerDown, &p);
        interaction.apply(&InputEvent::PointerLeave, &p);
        assert_eq!(interaction.cursor, None);
        assert!(!interaction.pressed);
    }

    proptest! {
        #[test]
        fn prop_n_clicks_return_to_start(n in 1usize..=8, start in 0usize..8) {
            let p = profile(n, true);
            let mut interaction = Interaction { selected: start % n, ..Default::default() };
            let initial = interaction.selected;
            for _ in 0..n {
                interaction.apply(&InputEvent::PointerDown, &p);
                interaction.apply(&InputEvent::PointerUp, &p);
            }
            prop_assert_eq!(interaction.selected, initial);
        }

        #[test]
        fn prop_rejected_input_never_changes_value(raw in "[a-zA-Z]{1,8}") {
            let p = profile(5, false);
            let mut interaction = Interaction { manual_x: 1.25, ..Default::default() };
            interaction.apply(&control(Control::ManualX, &raw), &p);
            prop_assert_eq!(interaction.manual_x, 1.25);
        }
    }
}
