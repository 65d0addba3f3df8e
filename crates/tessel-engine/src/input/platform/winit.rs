use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{Key as WinitKey, ModifiersState, NamedKey};
use winit::window::Window;

use crate::input::{
    InputEvent, InputState, Key, KeyState, Modifiers, MouseButton, MouseButtonState,
    PointerButtonEvent, PointerMoveEvent,
};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Returns `None` for events not represented by the input subsystem.
pub(crate) fn translate_window_event(
    window: &Window,
    state: &InputState,
    event: &WindowEvent,
) -> Option<InputEvent> {
    match event {
        WindowEvent::ModifiersChanged(m) => {
            // winit 0.30: ModifiersChanged carries a wrapper with `.state()`.
            let ms: ModifiersState = m.state();
            Some(InputEvent::ModifiersChanged(map_modifiers(ms)))
        }

        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical_f32(window, *position);
            Some(InputEvent::PointerMoved(PointerMoveEvent { x, y }))
        }

        WindowEvent::MouseInput { state: st, button, .. } => pointer_button_event(state, *button, *st),

        WindowEvent::KeyboardInput { event, .. } => {
            let st = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };

            Some(InputEvent::Key {
                key: map_key(&event.logical_key),
                state: st,
                modifiers: state.modifiers,
                repeat: event.repeat,
            })
        }

        _ => None,
    }
}

/// winit 0.30 has no cursor query, so the position comes from the tracked
/// pointer. A press before any `CursorMoved` has no position and is dropped;
/// a release is always delivered so nothing stays held.
fn pointer_button_event(
    state: &InputState,
    button: WinitMouseButton,
    st: ElementState,
) -> Option<InputEvent> {
    let st = match st {
        ElementState::Pressed => MouseButtonState::Pressed,
        ElementState::Released => MouseButtonState::Released,
    };

    if st == MouseButtonState::Pressed && state.pointer_pos.is_none() {
        log::debug!("dropping {button:?} press: pointer position not known yet");
        return None;
    }

    Some(InputEvent::PointerButton(PointerButtonEvent {
        button: map_mouse_button(button),
        state: st,
        position: state.pointer_pos,
        modifiers: state.modifiers,
    }))
}

fn to_logical_f32(window: &Window, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let logical = pos.to_logical::<f64>(window.scale_factor());
    (logical.x as f32, logical.y as f32)
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Other(3),
        WinitMouseButton::Forward => MouseButton::Other(4),
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(key: &WinitKey) -> Key {
    match key {
        WinitKey::Named(NamedKey::Escape) => Key::Escape,
        WinitKey::Named(NamedKey::Enter) => Key::Enter,
        WinitKey::Named(NamedKey::Tab) => Key::Tab,
        WinitKey::Named(NamedKey::Backspace) => Key::Backspace,
        WinitKey::Named(NamedKey::Space) => Key::Space,
        WinitKey::Character(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(' '), None) => Key::Space,
                (Some(c), None) => Key::Char(c.to_ascii_lowercase()),
                _ => Key::Unknown,
            }
        }
        _ => Key::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_at(pos: Option<(f32, f32)>) -> InputState {
        InputState { pointer_pos: pos, ..InputState::default() }
    }

    #[test]
    fn press_before_any_cursor_move_is_dropped() {
        let ev = pointer_button_event(&state_at(None), WinitMouseButton::Left, ElementState::Pressed);
        assert_eq!(ev, None);
    }

    #[test]
    fn press_carries_tracked_pointer_position() {
        let ev = pointer_button_event(
            &state_at(Some((40.0, 25.5))),
            WinitMouseButton::Left,
            ElementState::Pressed,
        );
        let Some(InputEvent::PointerButton(b)) = ev else {
            panic!("expected a button event, got {ev:?}");
        };
        assert_eq!(b.button, MouseButton::Left);
        assert_eq!(b.state, MouseButtonState::Pressed);
        assert_eq!(b.position, Some((40.0, 25.5)));
    }

    #[test]
    fn release_without_position_is_still_delivered() {
        let ev = pointer_button_event(&state_at(None), WinitMouseButton::Left, ElementState::Released);
        let Some(InputEvent::PointerButton(b)) = ev else {
            panic!("expected a button event, got {ev:?}");
        };
        assert_eq!(b.state, MouseButtonState::Released);
        assert_eq!(b.position, None);
    }

    #[test]
    fn character_keys_are_lowercased() {
        assert_eq!(map_key(&WinitKey::Character("B".into())), Key::Char('b'));
        assert_eq!(map_key(&WinitKey::Character(" ".into())), Key::Space);
        assert_eq!(map_key(&WinitKey::Character("ab".into())), Key::Unknown);
    }
}
