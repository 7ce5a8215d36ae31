use crate::commands::Command;
use winit::event::{ElementState, VirtualKeyCode};

#[derive(Default)]
pub struct InputManager {}

impl InputManager {
    pub fn new() -> Self {
        Self {}
    }

    pub fn process_keyboard_input(
        &self,
        keycode: &VirtualKeyCode,
        state: &ElementState,
    ) -> Option<Command> {
        if *state != ElementState::Pressed {
            return None;
        }
        match keycode {
            VirtualKeyCode::N => Some(Command::Load),
            VirtualKeyCode::R => Some(Command::Rotate),
            VirtualKeyCode::S => Some(Command::SelectRoi),
            VirtualKeyCode::Q => Some(Command::Quit),
            VirtualKeyCode::Escape => Some(Command::Escape),
            VirtualKeyCode::Return | VirtualKeyCode::NumpadEnter | VirtualKeyCode::Space => {
                Some(Command::Confirm)
            }
            VirtualKeyCode::C => Some(Command::Cancel),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: VirtualKeyCode) -> Option<Command> {
        InputManager::new().process_keyboard_input(&key, &ElementState::Pressed)
    }

    #[test]
    fn session_keys_are_mapped() {
        assert_eq!(press(VirtualKeyCode::N), Some(Command::Load));
        assert_eq!(press(VirtualKeyCode::R), Some(Command::Rotate));
        assert_eq!(press(VirtualKeyCode::S), Some(Command::SelectRoi));
        assert_eq!(press(VirtualKeyCode::Q), Some(Command::Quit));
        assert_eq!(press(VirtualKeyCode::Escape), Some(Command::Escape));
    }

    #[test]
    fn selection_keys_are_mapped() {
        assert_eq!(press(VirtualKeyCode::Space), Some(Command::Confirm));
        assert_eq!(press(VirtualKeyCode::Return), Some(Command::Confirm));
        assert_eq!(press(VirtualKeyCode::C), Some(Command::Cancel));
    }

    #[test]
    fn releases_and_unbound_keys_are_ignored() {
        let manager = InputManager::new();
        assert_eq!(
            manager.process_keyboard_input(&VirtualKeyCode::Q, &ElementState::Released),
            None
        );
        assert_eq!(press(VirtualKeyCode::X), None);
    }
}
