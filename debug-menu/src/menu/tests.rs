//! Tests for the debug menu controller

#![cfg(test)]

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

use super::*;
use crate::config::DebugMenuConfig;
use crate::gesture::TargetPlatform;
use crate::input::{FrameInput, Modifiers, PointerEvent, ScreenInfo};
use crate::test_utils::ScriptedSurface;

type Log = Rc<RefCell<Vec<String>>>;

fn menu() -> DebugMenu {
    let mut menu = DebugMenu::new(DebugMenuConfig::default(), TargetPlatform::Desktop);
    menu.init(ScreenInfo::new(1280.0, 720.0));
    menu
}

fn log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

fn push(log: &Log, msg: &str) -> impl FnMut(&mut ItemContext<'_>) + 'static {
    let log = log.clone();
    let msg = msg.to_string();
    move |_| log.borrow_mut().push(msg.clone())
}

fn has_item_named(menu: &DebugMenu, name: &str) -> bool {
    let items = menu.items();
    items.iter().any(|id| items.name(id) == Some(name))
}

/// Visibility handler that fires on demand
struct Scripted(Rc<RefCell<bool>>);

impl VisibilityHandler for Scripted {
    fn check_visible(&mut self, _visible: bool, _input: &FrameInput, _delta_time: f32) -> bool {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

#[test]
fn test_inactive_until_init() {
    let mut menu = DebugMenu::new(DebugMenuConfig::default(), TargetPlatform::Desktop);
    assert!(!menu.is_active());
    assert!(menu.add_item("a", |_| {}).is_none());
    assert!(menu.items().is_empty());

    menu.set_visible(true);
    assert!(!menu.is_visible());
}

#[test]
fn test_disabled_config_ignores_everything() {
    let config = DebugMenuConfig {
        enabled: false,
        ..Default::default()
    };
    let mut menu = DebugMenu::new(config, TargetPlatform::Desktop);
    menu.init(ScreenInfo::default());
    assert!(!menu.is_active());
    assert!(menu.add_item("a", |_| {}).is_none());
    assert!(menu.register_window("w", WindowSpec::new(|_, _| {})).is_none());
    assert!(!menu.update(&FrameInput::default(), 1.0));

    let mut surface = ScriptedSurface::new();
    assert!(!menu.draw(&mut surface, &[]));
    assert!(surface.panels.is_empty());
}

#[test]
fn test_open_leaf_runs_callback_and_remove_parent() {
    let log = log();
    let mut menu = menu();
    menu.add_item("Test/Foo", push(&log, "X"));

    menu.open_item("Test/Foo");
    assert_eq!(*log.borrow(), vec!["X"]);

    menu.remove_item("Test");
    assert!(!has_item_named(&menu, "Test"));
    assert!(!has_item_named(&menu, "Foo"));
}

#[test]
fn test_multicast_registration() {
    let log = log();
    let mut menu = menu();
    menu.add_item("Cheats/Heal", push(&log, "first"));
    menu.add_item("Cheats/Heal", push(&log, "second"));
    menu.open_item("Cheats/Heal");
    assert_eq!(*log.borrow(), vec!["first", "second"]);
}

#[test]
fn test_open_then_back_restores_cursor() {
    let mut menu = menu();
    menu.add_item("a/b/c", |_| {});
    menu.add_item("a/x", |_| {});

    menu.open_item("a");
    assert_eq!(menu.cursor_path(), "a");
    let before = menu.cursor();

    menu.open_item("a/b");
    assert_eq!(menu.cursor_path(), "a/b");
    menu.go_back();
    assert_eq!(menu.cursor(), before);

    menu.go_back();
    assert_eq!(menu.cursor(), ItemId::ROOT);
    menu.go_back();
    assert_eq!(menu.cursor(), ItemId::ROOT);
}

#[test]
fn test_opening_leaf_keeps_cursor() {
    let mut menu = menu();
    menu.add_item("a/leaf", |_| {});
    menu.open_item("a");
    menu.open_item("a/leaf");
    assert_eq!(menu.cursor_path(), "a");
}

#[test]
fn test_removing_cursor_resets_to_root() {
    let mut menu = menu();
    menu.add_item("a/b/c", |_| {});
    menu.add_item("a/x", |_| {});
    menu.open_item("a/b");

    menu.remove_item("a/b/c");
    assert_eq!(menu.cursor(), ItemId::ROOT);
    assert!(menu.items().find("a/x").found);
}

#[test]
fn test_item_handle_dispose() {
    let log = log();
    let mut menu = menu();
    let handle = menu
        .register_item("Tools/Reload", None, Some(Box::new(push(&log, "disposed"))))
        .unwrap();
    assert_eq!(handle.path(), "Tools/Reload");

    handle.dispose(&mut menu);
    assert_eq!(*log.borrow(), vec!["disposed"]);
    assert!(menu.items().is_empty());
}

#[test]
fn test_hidden_menu_draws_nothing() {
    let mut menu = menu();
    menu.add_item("a", |_| {});
    let mut surface = ScriptedSurface::new();
    assert!(!menu.draw(&mut surface, &[]));
    assert!(surface.panels.is_empty());
    assert!(surface.buttons.is_empty());
}

#[test]
fn test_header_back_button_enabled_below_root() {
    let mut menu = menu();
    menu.add_item("Render/Wireframe", |_| {});
    menu.set_visible(true);

    let mut surface = ScriptedSurface::new();
    menu.draw(&mut surface, &[]);
    assert_eq!(surface.panels, vec![menu.screen_rect()]);
    assert_eq!(surface.button_enabled_state(BACK_LABEL), Some(false));
    assert_eq!(surface.button_enabled_state("Render"), Some(true));
    assert!(surface.toggles.is_empty());

    menu.open_item("Render");
    let mut surface = ScriptedSurface::new();
    menu.draw(&mut surface, &[]);
    assert_eq!(surface.button_enabled_state(BACK_LABEL), Some(true));
    assert!(surface.labels.iter().any(|l| l == "Render"));
    assert_eq!(surface.button_enabled_state("Wireframe"), Some(true));
}

#[test]
fn test_grid_click_navigates_and_executes() {
    let log = log();
    let mut menu = menu();
    menu.add_item("Spawn/Enemy", push(&log, "enemy"));
    menu.set_visible(true);

    menu.draw(&mut ScriptedSurface::new().click("Spawn"), &[]);
    assert_eq!(menu.cursor_path(), "Spawn");
    assert!(log.borrow().is_empty());

    menu.draw(&mut ScriptedSurface::new().click("Enemy"), &[]);
    assert_eq!(*log.borrow(), vec!["enemy"]);

    menu.draw(&mut ScriptedSurface::new().click(BACK_LABEL), &[]);
    assert_eq!(menu.cursor(), ItemId::ROOT);
}

#[test]
fn test_disabled_back_button_ignores_click() {
    let mut menu = menu();
    menu.set_visible(true);
    menu.draw(&mut ScriptedSurface::new().click(BACK_LABEL), &[]);
    assert_eq!(menu.cursor(), ItemId::ROOT);
}

#[test]
fn test_grid_rows_wrap() {
    let mut menu = menu();
    for i in 0..40 {
        menu.add_item(&format!("Test/Sample_{i}"), |_| {});
    }
    menu.set_visible(true);
    menu.open_item("Test");

    let mut surface = ScriptedSurface::new();
    menu.draw(&mut surface, &[]);
    // Header row plus more than one grid row
    assert!(surface.rows > 2);
    assert_eq!(surface.buttons.iter().filter(|(t, _)| t.starts_with("Sample_")).count(), 40);
}

#[test]
fn test_close_button_resets() {
    let mut menu = menu();
    menu.add_item("a/b", |_| {});
    menu.set_visible(true);
    menu.open_item("a");
    menu.toggle_view_mode();

    menu.draw(&mut ScriptedSurface::new().click(CLOSE_LABEL), &[]);
    assert!(!menu.is_visible());
    assert_eq!(menu.cursor(), ItemId::ROOT);
    assert_eq!(menu.view_mode(), ViewMode::Full);
}

#[test]
fn test_view_mode_hides_grid_and_default_view() {
    let calls = Rc::new(RefCell::new(0));
    let calls_cb = calls.clone();
    let mut menu = menu();
    menu.add_item("Item", |_| {});
    menu.set_default_view(move |s| {
        *calls_cb.borrow_mut() += 1;
        s.label("default");
    });
    menu.set_visible(true);

    let mut surface = ScriptedSurface::new();
    menu.draw(&mut surface, &[]);
    assert_eq!(*calls.borrow(), 1);
    assert!(surface.labels.iter().any(|l| l == "default"));

    menu.draw(&mut ScriptedSurface::new().click(COLLAPSE_LABEL), &[]);
    assert_eq!(menu.view_mode(), ViewMode::ContentsOnly);

    let mut surface = ScriptedSurface::new();
    menu.draw(&mut surface, &[]);
    assert_eq!(*calls.borrow(), 2);
    assert_eq!(surface.button_enabled_state("Item"), None);
    assert_eq!(surface.button_enabled_state(EXPAND_LABEL), Some(true));
}

#[test]
fn test_background_toggle() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_cb = seen.clone();
    let mut menu = menu();
    menu.set_background_toggle(move |enabled| seen_cb.borrow_mut().push(enabled));

    // Showing the menu blocks background input
    menu.set_visible(true);
    assert_eq!(*seen.borrow(), vec![false]);

    let mut surface = ScriptedSurface::new().click(BACKGROUND_OFF_LABEL);
    menu.draw(&mut surface, &[]);
    assert_eq!(surface.toggles, vec![(BACKGROUND_OFF_LABEL.to_string(), false)]);
    assert!(menu.is_background_active());
    assert_eq!(*seen.borrow(), vec![false, true]);

    // Passthrough stays while the menu is toggled
    menu.set_visible(false);
    menu.set_visible(true);
    assert_eq!(*seen.borrow(), vec![false, true]);
}

#[test]
fn test_update_toggles_with_handler() {
    let fire = Rc::new(RefCell::new(false));
    let mut menu = menu();
    menu.set_handler(Box::new(Scripted(fire.clone())));

    assert!(!menu.update(&FrameInput::default(), 0.016));
    assert!(!menu.is_visible());

    *fire.borrow_mut() = true;
    assert!(menu.update(&FrameInput::default(), 0.016));
    assert!(menu.is_visible());

    *fire.borrow_mut() = true;
    menu.update(&FrameInput::default(), 0.016);
    assert!(!menu.is_visible());
}

#[test]
fn test_default_handler_key_chord() {
    let mut menu = menu();
    menu.set_handler(Box::new(Scripted(Rc::new(RefCell::new(false)))));
    menu.set_default_handler();

    let mut input = FrameInput {
        modifiers: Modifiers {
            shift: true,
            ctrl: true,
            ..Default::default()
        },
        ..Default::default()
    };
    input.pressed_keys.push(egui::Key::D);
    assert!(menu.update(&input, 0.016));
    assert!(menu.is_visible());
}

#[test]
fn test_window_item_lifecycle() {
    let mut menu = menu();
    menu.register_window("Stats/Frame", WindowSpec::new(|s, _| s.label("frame")));
    assert_eq!(menu.windows().len(), 1);

    let window = menu.windows().iter().next().unwrap();
    assert_eq!(window.title(), "Frame");
    assert!(!window.is_open());

    menu.open_item("Stats/Frame");
    let window = menu.windows().iter().next().unwrap();
    assert!(window.is_open());
    assert_eq!(window.opened_from(), Some("Stats/Frame"));

    menu.close_window("Stats/Frame");
    assert!(!menu.windows().iter().next().unwrap().is_open());

    menu.open_item("Stats/Frame");
    menu.remove_item("Stats");
    assert!(!menu.windows().iter().next().unwrap().is_open());
    menu.update(&FrameInput::default(), 0.016);
    assert!(menu.windows().is_empty());
}

#[test]
fn test_open_windows_draw_and_consume_pointer() {
    let mut menu = menu();
    menu.register_window("Debug/Log", WindowSpec::new(|s, _| s.label("log body")));
    menu.set_visible(true);
    menu.open_item("Debug/Log");

    let rect = menu.windows().iter().next().unwrap().rect();
    let inside = rect.min + Vec2::new(50.0, 100.0);

    let mut surface = ScriptedSurface::new();
    assert!(menu.draw(&mut surface, &[PointerEvent::Down(inside)]));
    assert_eq!(surface.windows.len(), 1);
    assert!(surface.labels.iter().any(|l| l == "log body"));

    let mut surface = ScriptedSurface::new();
    assert!(!menu.draw(&mut surface, &[PointerEvent::Down(Vec2::new(1.0, 1.0))]));
}

#[test]
fn test_window_close_button() {
    let mut menu = menu();
    menu.register_window("Debug/Log", WindowSpec::new(|_, _| {}));
    menu.set_visible(true);
    menu.open_item("Debug/Log");

    menu.draw(&mut ScriptedSurface::new().click(window::WINDOW_CLOSE_LABEL), &[]);
    assert!(!menu.windows().iter().next().unwrap().is_open());
}

#[test]
fn test_judge_open_window() {
    let closed = Rc::new(RefCell::new(0));
    let mut menu = menu();
    menu.register_window("Tools/Console", WindowSpec::new(|_, _| {}));

    // Hidden menu: shown, windows closed, callback runs
    let c = closed.clone();
    menu.judge_open_window("Console", move || *c.borrow_mut() += 1);
    assert!(menu.is_visible());
    assert_eq!(*closed.borrow(), 1);

    // Visible with the window open: nothing happens
    menu.open_item("Tools/Console");
    let c = closed.clone();
    menu.judge_open_window("Console", move || *c.borrow_mut() += 1);
    assert_eq!(*closed.borrow(), 1);
    assert!(menu.windows().is_title_open("Console"));

    // Visible with the window closed: callback runs
    menu.close_window("Tools/Console");
    let c = closed.clone();
    menu.judge_open_window("Console", move || *c.borrow_mut() += 1);
    assert_eq!(*closed.borrow(), 2);
}

#[test]
fn test_shutdown_disposes_items() {
    let log = log();
    let mut menu = menu();
    menu.register_item("a", None, Some(Box::new(push(&log, "a"))));
    menu.register_item("b/c", None, Some(Box::new(push(&log, "c"))));
    menu.register_window("w", WindowSpec::new(|_, _| {}));

    menu.shutdown();
    assert_eq!(*log.borrow(), vec!["a", "c"]);
    assert!(menu.items().is_empty());
    assert!(menu.windows().is_empty());
    assert!(!menu.is_active());
}

#[test]
fn test_reset_resolution_rescales() {
    let mut menu = menu();
    assert_eq!(menu.draw_scale(), 1.0);

    menu.reset_resolution(ScreenInfo::new(2560.0, 1440.0));
    assert_eq!(menu.draw_scale(), 2.0);
    assert_eq!(menu.screen_rect().size(), Vec2::new(1280.0, 720.0));
}

#[test]
fn test_editor_gui_scale() {
    let mut desktop = menu();
    assert_eq!(desktop.editor_gui_scale(), None);

    let mut editor = DebugMenu::new(DebugMenuConfig::default(), TargetPlatform::Editor);
    editor.init(ScreenInfo::new(1280.0, 720.0));
    assert_eq!(editor.editor_gui_scale(), Some(crate::prefs::DEFAULT_EDITOR_GUI_SCALE));
    assert_eq!(editor.draw_scale(), crate::prefs::DEFAULT_EDITOR_GUI_SCALE);

    editor.set_editor_gui_scale(1.0);
    assert_eq!(editor.editor_gui_scale(), Some(1.0));
    assert_eq!(editor.draw_scale(), 1.0);
}

#[test]
fn test_hiding_mid_drag_releases_window() {
    let mut menu = menu();
    menu.register_window("Debug/Log", WindowSpec::new(|_, _| {}));
    menu.set_visible(true);
    menu.open_item("Debug/Log");

    let rect = menu.windows().iter().next().unwrap().rect();
    let corner = rect.max - Vec2::splat(2.0);
    menu.draw(&mut ScriptedSurface::new(), &[PointerEvent::Down(corner)]);
    assert_eq!(
        menu.windows().iter().next().unwrap().interaction(),
        window::Interaction::Resizing
    );

    // Pointer-up happens while hidden and never reaches the window
    menu.set_visible(false);
    menu.set_visible(true);

    let moved = corner + Vec2::splat(300.0);
    assert!(!menu.draw(&mut ScriptedSurface::new(), &[PointerEvent::Move(moved)]));
    let window = menu.windows().iter().next().unwrap();
    assert_eq!(window.interaction(), window::Interaction::Idle);
    assert_eq!(window.rect(), rect);
}

#[test]
fn test_editor_gui_scale_zero_keeps_screen_finite() {
    let mut editor = DebugMenu::new(DebugMenuConfig::default(), TargetPlatform::Editor);
    editor.init(ScreenInfo::new(1280.0, 720.0));

    editor.set_editor_gui_scale(0.0);
    assert_eq!(editor.editor_gui_scale(), Some(0.1));
    assert!(editor.draw_scale() > 0.0);
    let rect = editor.screen_rect();
    assert!(rect.min.is_finite() && rect.max.is_finite());
}

#[test]
fn test_reinit_recomputes_default_window_rect() {
    let mut menu = menu();
    menu.register_window("Debug/Log", WindowSpec::new(|_, _| {}));
    menu.shutdown();

    menu.init(ScreenInfo::new(640.0, 360.0));
    menu.register_window("Debug/Log", WindowSpec::new(|_, _| {}));
    let rect = menu.windows().iter().next().unwrap().rect();
    assert!(rect.max.x <= 640.0 && rect.max.y <= 360.0, "stale rect {rect:?}");
}

#[test]
fn test_close_window_with_trailing_slash() {
    let mut menu = menu();
    menu.register_window("Stats/Frame", WindowSpec::new(|_, _| {}));
    menu.open_item("Stats/Frame");

    menu.close_window("Stats/Frame/");
    assert!(!menu.windows().iter().next().unwrap().is_open());
}
