//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for wizard shortcuts
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Whether a key carries the shortcut modifier (Ctrl always works too)
pub fn is_shortcut(modifiers: KeyModifiers) -> bool {
    modifiers.contains(SHORTCUT_MODIFIER) || modifiers.contains(KeyModifiers::CONTROL)
}

/// Add item shortcut display
#[cfg(target_os = "macos")]
pub const ADD_ITEM_SHORTCUT: &str = "Cmd+A";

#[cfg(not(target_os = "macos"))]
pub const ADD_ITEM_SHORTCUT: &str = "Ctrl+A";

/// Remove item shortcut display
#[cfg(target_os = "macos")]
pub const REMOVE_ITEM_SHORTCUT: &str = "Cmd+D";

#[cfg(not(target_os = "macos"))]
pub const REMOVE_ITEM_SHORTCUT: &str = "Ctrl+D";

/// Cancel draft shortcut display
#[cfg(target_os = "macos")]
pub const CANCEL_SHORTCUT: &str = "Cmd+X";

#[cfg(not(target_os = "macos"))]
pub const CANCEL_SHORTCUT: &str = "Ctrl+X";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_is_always_a_shortcut() {
        assert!(is_shortcut(KeyModifiers::CONTROL));
        assert!(is_shortcut(SHORTCUT_MODIFIER));
        assert!(!is_shortcut(KeyModifiers::SHIFT));
        assert!(!is_shortcut(KeyModifiers::NONE));
    }
}
