//! Context menu builder for floating note windows.
//!
//! # Responsibility
//! - Build a position/state-dependent popup menu description from the
//!   requesting window's current UI state.
//! - Define the `menu-action` commands sent back to the originating window.
//!
//! # Invariants
//! - `build_context_menu` is a pure function of its request; it mutates no
//!   state. All mutation happens in the UI layer receiving the command.
//! - Exactly one font-family entry is selected for any given font string.

use serde::{Deserialize, Serialize};

use crate::model::note::NoteId;

/// Fixed opacity choices offered by the menu, as fractions.
pub const OPACITY_CHOICES: [f64; 4] = [1.0, 0.9, 0.75, 0.6];

/// Mutually exclusive font family choices: (label, match token, css stack).
///
/// An entry is marked selected when its token is a substring of the
/// window's current font-family string.
const FONT_CHOICES: [(&str, &str, &str); 3] = [
    ("System Default", "system-ui", "system-ui, sans-serif"),
    ("Monospace", "monospace", "monospace"),
    ("Microsoft YaHei", "Microsoft YaHei", "Microsoft YaHei, sans-serif"),
];

/// Rendering mode of the note body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteViewMode {
    Edit,
    Preview,
}

impl NoteViewMode {
    /// Display text shown on the mode-toggle entry.
    pub fn display_text(self) -> &'static str {
        match self {
            Self::Edit => "Edit Mode",
            Self::Preview => "Preview Mode",
        }
    }
}

/// Snapshot of one window's UI state, sent with the `context-menu` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextMenuRequest {
    pub id: NoteId,
    pub mode: NoteViewMode,
    pub font_size: u32,
    pub opacity: f64,
    pub font_family: String,
    pub show_header: bool,
}

/// Command emitted back to the originating window when a menu entry is
/// activated; the wire shape is `{action, value?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "kebab-case")]
pub enum MenuAction {
    ToggleMode,
    ToggleHeader,
    AdjustFontSize(i32),
    SetFontFamily(String),
    SetOpacity(f64),
    CloseNote,
}

/// One entry of the hierarchical menu description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MenuItem {
    Action {
        label: String,
        action: MenuAction,
    },
    Toggle {
        label: String,
        checked: bool,
        action: MenuAction,
    },
    Radio {
        label: String,
        selected: bool,
        action: MenuAction,
    },
    Submenu {
        label: String,
        items: Vec<MenuItem>,
    },
    Separator,
}

/// Menu description handed to the backend for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextMenu {
    pub items: Vec<MenuItem>,
}

impl ContextMenu {
    /// Returns the entries of the submenu with the given label.
    pub fn submenu(&self, label: &str) -> Option<&[MenuItem]> {
        self.items.iter().find_map(|item| match item {
            MenuItem::Submenu { label: l, items } if l == label => Some(items.as_slice()),
            _ => None,
        })
    }
}

/// Builds the popup menu for one floating note window.
pub fn build_context_menu(request: &ContextMenuRequest) -> ContextMenu {
    let items = vec![
        MenuItem::Action {
            label: request.mode.display_text().to_string(),
            action: MenuAction::ToggleMode,
        },
        MenuItem::Toggle {
            label: "Show Header".to_string(),
            checked: request.show_header,
            action: MenuAction::ToggleHeader,
        },
        MenuItem::Separator,
        MenuItem::Submenu {
            label: "Font Size".to_string(),
            items: vec![
                MenuItem::Action {
                    label: "Increase".to_string(),
                    action: MenuAction::AdjustFontSize(1),
                },
                MenuItem::Action {
                    label: "Decrease".to_string(),
                    action: MenuAction::AdjustFontSize(-1),
                },
            ],
        },
        MenuItem::Submenu {
            label: "Font Family".to_string(),
            items: FONT_CHOICES
                .iter()
                .map(|(label, token, stack)| MenuItem::Radio {
                    label: (*label).to_string(),
                    selected: request.font_family.contains(token),
                    action: MenuAction::SetFontFamily((*stack).to_string()),
                })
                .collect(),
        },
        MenuItem::Submenu {
            label: "Opacity".to_string(),
            items: OPACITY_CHOICES
                .iter()
                .map(|&choice| MenuItem::Radio {
                    label: format!("{}%", (choice * 100.0).round() as u32),
                    selected: (request.opacity - choice).abs() < 1e-6,
                    action: MenuAction::SetOpacity(choice),
                })
                .collect(),
        },
        MenuItem::Separator,
        MenuItem::Action {
            label: "Close Note".to_string(),
            action: MenuAction::CloseNote,
        },
    ];

    ContextMenu { items }
}

#[cfg(test)]
mod tests {
    use super::{build_context_menu, ContextMenuRequest, MenuItem, NoteViewMode};
    use uuid::Uuid;

    fn request(font_family: &str) -> ContextMenuRequest {
        ContextMenuRequest {
            id: Uuid::new_v4(),
            mode: NoteViewMode::Preview,
            font_size: 14,
            opacity: 0.9,
            font_family: font_family.to_string(),
            show_header: true,
        }
    }

    #[test]
    fn mode_entry_carries_current_mode_display_text() {
        let menu = build_context_menu(&request("monospace"));
        match &menu.items[0] {
            MenuItem::Action { label, .. } => assert_eq!(label, "Preview Mode"),
            other => panic!("unexpected first entry: {other:?}"),
        }
    }

    #[test]
    fn opacity_submenu_marks_matching_choice() {
        let menu = build_context_menu(&request("monospace"));
        let entries = menu.submenu("Opacity").expect("opacity submenu");
        let selected: Vec<&str> = entries
            .iter()
            .filter_map(|item| match item {
                MenuItem::Radio {
                    label,
                    selected: true,
                    ..
                } => Some(label.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(selected, ["90%"]);
    }
}
