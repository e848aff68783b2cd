//! Keyboard shortcuts.

use rasterpad_core::input::ExportFormat;
use rasterpad_core::tools::ToolKind;

/// What a shortcut does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Undo,
    Redo,
    Export(ExportFormat),
    /// Abandon the stroke in progress.
    Cancel,
    Clear,
    Tool(ToolKind),
    ToggleFill,
}

/// A keyboard shortcut bound to an action.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub action: ShortcutAction,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        action: ShortcutAction,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            action,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Shift+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    fn matches(&self, key: &str, ctrl: bool, shift: bool) -> bool {
        self.ctrl == ctrl && self.shift == shift && self.key.eq_ignore_ascii_case(key)
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    pub fn all() -> Vec<Shortcut> {
        use ShortcutAction::*;
        vec![
            Shortcut::new("Z", true, false, Undo, "Undo"),
            Shortcut::new("Z", true, true, Redo, "Redo"),
            Shortcut::new("Y", true, false, Redo, "Redo"),
            Shortcut::new("E", true, false, Export(ExportFormat::Png), "Export to PNG"),
            Shortcut::new("Escape", false, false, Cancel, "Cancel current stroke"),
            Shortcut::new("Delete", false, false, Clear, "Clear canvas"),
            Shortcut::new("B", false, false, Tool(ToolKind::Brush), "Brush"),
            Shortcut::new("E", false, false, Tool(ToolKind::Eraser), "Eraser"),
            Shortcut::new("R", false, false, Tool(ToolKind::Rectangle), "Rectangle"),
            Shortcut::new("C", false, false, Tool(ToolKind::Circle), "Circle"),
            Shortcut::new("T", false, false, Tool(ToolKind::Triangle), "Triangle"),
            Shortcut::new("L", false, false, Tool(ToolKind::Line), "Line"),
            Shortcut::new("S", false, false, Tool(ToolKind::Star), "Star"),
            Shortcut::new("F", false, false, ToggleFill, "Toggle shape fill"),
        ]
    }

    /// Look up the action for a key press. `key` is matched case-insensitively.
    pub fn resolve(key: &str, ctrl: bool, shift: bool) -> Option<ShortcutAction> {
        Self::all()
            .into_iter()
            .find(|s| s.matches(key, ctrl, shift))
            .map(|s| s.action)
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}
