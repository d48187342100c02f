use super::*;

// =============================================================
// Tool
// =============================================================

#[test]
fn tool_default_is_pen() {
    assert_eq!(Tool::default(), Tool::Pen);
}

#[test]
fn tool_from_name_accepts_host_names() {
    assert_eq!(Tool::from_name("pen"), Some(Tool::Pen));
    assert_eq!(Tool::from_name("Selection"), Some(Tool::Select));
    assert_eq!(Tool::from_name(" select "), Some(Tool::Select));
    assert_eq!(Tool::from_name("ERASER"), Some(Tool::Eraser));
}

#[test]
fn tool_from_name_rejects_unknown() {
    assert_eq!(Tool::from_name("lasso"), None);
    assert_eq!(Tool::from_name(""), None);
}

#[test]
fn tool_name_round_trips() {
    for tool in [Tool::Pen, Tool::Select, Tool::Eraser] {
        assert_eq!(Tool::from_name(tool.as_str()), Some(tool));
    }
}

// =============================================================
// Modifiers / Key
// =============================================================

#[test]
fn command_is_ctrl_or_meta() {
    assert!(!Modifiers::default().command());
    assert!(Modifiers { ctrl: true, ..Default::default() }.command());
    assert!(Modifiers { meta: true, ..Default::default() }.command());
    assert!(!Modifiers { shift: true, alt: true, ..Default::default() }.command());
}

#[test]
fn key_is_case_insensitive() {
    assert!(Key("Z".into()).is("z"));
    assert!(Key("Delete".into()).is("delete"));
    assert!(!Key("y".into()).is("z"));
}

// =============================================================
// UiState / InputState
// =============================================================

#[test]
fn ui_state_defaults() {
    let ui = UiState::default();
    assert_eq!(ui.tool, Tool::Pen);
    assert_eq!(ui.color, "#000000");
    assert!(ui.selected_id.is_none());
}

#[test]
fn input_state_default_is_idle() {
    assert!(matches!(InputState::default(), InputState::Idle));
}
