use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{
    InputEvent,
    Key,
    KeyState,
    MouseButton,
    MouseButtonState,
    Modifiers,
    PointerButtonEvent,
    PointerMoveEvent,
};

/// Current input state for a single window.
///
/// Holds "is down" information and current pointer position.
/// Transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,

    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    pub keys_down: HashSet<Key>,

    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies an input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // On focus loss, clear "down" sets so nothing stays stuck.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key { key, state, modifiers, .. } => {
                self.modifiers = *modifiers;

                match state {
                    KeyState::Pressed => {
                        if self.keys_down.insert(*key) {
                            frame.keys_pressed.insert(*key);
                        }
                    }
                    KeyState::Released => {
                        if self.keys_down.remove(key) {
                            frame.keys_released.insert(*key);
                        }
                    }
                }
            }

            InputEvent::PointerButton(PointerButtonEvent { button, state, position, modifiers }) => {
                if position.is_some() {
                    self.pointer_pos = *position;
                }
                self.modifiers = *modifiers;

                match state {
                    MouseButtonState::Pressed => {
                        if self.buttons_down.insert(*button) {
                            frame.buttons_pressed.insert(*button);
                        }
                    }
                    MouseButtonState::Released => {
                        if self.buttons_down.remove(button) {
                            frame.buttons_released.insert(*button);
                        }
                    }
                }
            }
        }

        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(button: MouseButton, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button,
            state: MouseButtonState::Pressed,
            position: Some((x, y)),
            modifiers: Modifiers::default(),
        })
    }

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, modifiers: Modifiers::default(), repeat: false }
    }

    #[test]
    fn button_press_updates_pointer_and_frame() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        s.apply_event(&mut f, press(MouseButton::Left, 12.0, 34.0));

        assert_eq!(s.pointer_pos, Some((12.0, 34.0)));
        assert!(s.button_down(MouseButton::Left));
        assert!(f.buttons_pressed.contains(&MouseButton::Left));
        assert_eq!(f.events.len(), 1);
    }

    #[test]
    fn repeated_key_press_records_one_transition() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        s.apply_event(&mut f, key(Key::Char('b'), KeyState::Pressed));
        f.clear();
        s.apply_event(&mut f, key(Key::Char('b'), KeyState::Pressed));

        assert!(s.key_down(Key::Char('b')));
        assert!(f.keys_pressed.is_empty());
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        s.apply_event(&mut f, press(MouseButton::Left, 0.0, 0.0));
        s.apply_event(&mut f, key(Key::Space, KeyState::Pressed));
        s.apply_event(&mut f, InputEvent::Focused(false));

        assert!(!s.button_down(MouseButton::Left));
        assert!(!s.key_down(Key::Space));
    }

    #[test]
    fn release_outside_window_keeps_position_unknown() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        s.apply_event(&mut f, press(MouseButton::Left, 5.0, 6.0));
        s.apply_event(&mut f, InputEvent::PointerLeft);
        s.apply_event(
            &mut f,
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state: MouseButtonState::Released,
                position: None,
                modifiers: Modifiers::default(),
            }),
        );

        assert!(!s.button_down(MouseButton::Left));
        assert_eq!(s.pointer_pos, None);
    }

    #[test]
    fn pointer_left_clears_position() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        s.apply_event(&mut f, InputEvent::PointerMoved(PointerMoveEvent { x: 5.0, y: 6.0 }));
        s.apply_event(&mut f, InputEvent::PointerLeft);
        assert_eq!(s.pointer_pos, None);
    }
}
