//! tankmenu - button-driven OLED menu engine for an aquarium tank
//! controller.
//!
//! Five physical keys (up, down, left, right, select) drive a tree of
//! 128x64 monochrome screens: nested lists, boolean toggles,
//! enumeration picks, yes/no confirmations, and multi-field editors
//! for the clock, the daily light window, and the heater temperature
//! range.
//!
//! The engine is `no_std` and host-testable: everything draws through
//! the [`menu::render::Screen`] trait, and the hardware collaborators
//! (RTC, network sender, settings store) are traits the host firmware
//! implements. The concrete SSD1306 adapter lives behind the
//! `embedded` cargo feature.
//!
//! Usage: `cargo test` on the host; on target, wire a
//! [`app::Context`], call [`app::Context::build_menu`] once at boot,
//! and feed one [`menu::InputEvent`] per polling tick.

#![cfg_attr(not(test), no_std)]

pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod idle_logic;
pub mod menu;
pub mod net;
pub mod settings;
pub mod store;
pub mod ui;

pub use app::Context;
pub use error::Error;
pub use menu::render::Screen;
pub use menu::{InputEvent, Menu};

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests - engine behavior through the controller
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use embedded_graphics::pixelcolor::BinaryColor;
    use embedded_graphics::prelude::*;
    use embedded_graphics::Pixel;

    use crate::error::Error;
    use crate::menu::action::Visibility;
    use crate::menu::editors::{ClockFields, RangeFields, WindowFields};
    use crate::menu::node::{NodeId, Tree};
    use crate::menu::render::Screen;
    use crate::menu::{InputEvent, Menu};

    /// Display double: accepts all drawing, counts frame flushes.
    struct NullDisplay {
        presented: usize,
    }

    impl NullDisplay {
        fn new() -> Self {
            Self { presented: 0 }
        }
    }

    impl OriginDimensions for NullDisplay {
        fn size(&self) -> Size {
            Size::new(128, 64)
        }
    }

    impl DrawTarget for NullDisplay {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, _pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            Ok(())
        }
    }

    impl Screen for NullDisplay {
        fn present(&mut self) {
            self.presented += 1;
        }
    }

    /// Minimal application context for driving the engine.
    struct TestCtx {
        flag: bool,
        gate: bool,
        picked: Option<usize>,
        confirmed: Option<bool>,
        seed_window: WindowFields,
        window_committed: Option<WindowFields>,
        seed_range: RangeFields,
        range_committed: Option<RangeFields>,
        seed_clock: ClockFields,
        clock_written: Option<ClockFields>,
        clock_persisted: bool,
    }

    impl TestCtx {
        fn new() -> Self {
            Self {
                flag: false,
                gate: false,
                picked: None,
                confirmed: None,
                seed_window: WindowFields::default(),
                window_committed: None,
                seed_range: RangeFields::default(),
                range_committed: None,
                seed_clock: ClockFields::baseline(),
                clock_written: None,
                clock_persisted: false,
            }
        }
    }

    fn flip(ctx: &mut TestCtx) {
        ctx.flag = !ctx.flag;
    }

    fn flag_on(ctx: &TestCtx) -> bool {
        ctx.flag
    }

    fn gate_open(ctx: &TestCtx) -> bool {
        ctx.gate
    }

    // ════════════════════════════════════════════════════════════════════════
    // Selection & Visibility (tree level)
    // ════════════════════════════════════════════════════════════════════════

    fn screen_with_toggles(count: usize) -> (Tree<TestCtx>, NodeId) {
        let mut tree: Tree<TestCtx> = Tree::new();
        let root = tree.screen(None, "MENU", Visibility::Always).unwrap();
        for _ in 0..count {
            tree.toggle(root, "ROW", flag_on, flip, ("ON", "OFF"), Visibility::Always)
                .unwrap();
        }
        (tree, root)
    }

    #[test]
    fn selection_wrap_is_a_bijection() {
        let (mut tree, root) = screen_with_toggles(5);
        let ctx = TestCtx::new();

        for expected in [1, 2, 3, 4, 0] {
            tree.move_selection(&ctx, root, 1);
            assert_eq!(tree.effective_selected(&ctx, root), expected);
        }
        tree.move_selection(&ctx, root, -1);
        assert_eq!(tree.effective_selected(&ctx, root), 4);
    }

    #[test]
    fn selection_skips_hidden_rows() {
        let mut tree: Tree<TestCtx> = Tree::new();
        let root = tree.screen(None, "MENU", Visibility::Always).unwrap();
        tree.toggle(root, "A", flag_on, flip, ("ON", "OFF"), Visibility::Always)
            .unwrap();
        tree.toggle(root, "B", flag_on, flip, ("ON", "OFF"), Visibility::When(gate_open))
            .unwrap();
        tree.toggle(root, "C", flag_on, flip, ("ON", "OFF"), Visibility::Always)
            .unwrap();

        let mut ctx = TestCtx::new();
        assert_eq!(tree.visible_count(&ctx, root), 2);
        assert_eq!(tree.row(&ctx, root, 1).unwrap().label, "C");

        ctx.gate = true;
        assert_eq!(tree.visible_count(&ctx, root), 3);
        assert_eq!(tree.row(&ctx, root, 1).unwrap().label, "B");
    }

    #[test]
    fn selection_noop_without_visible_rows() {
        let mut tree: Tree<TestCtx> = Tree::new();
        let root = tree.screen(None, "MENU", Visibility::Always).unwrap();
        tree.toggle(root, "A", flag_on, flip, ("ON", "OFF"), Visibility::When(gate_open))
            .unwrap();

        let ctx = TestCtx::new();
        tree.move_selection(&ctx, root, 1);
        assert_eq!(tree.effective_selected(&ctx, root), 0);
        assert!(tree.selected_child(&ctx, root).is_none());
    }

    #[test]
    fn stale_selection_is_reclamped_when_rows_hide() {
        let mut tree: Tree<TestCtx> = Tree::new();
        let root = tree.screen(None, "MENU", Visibility::Always).unwrap();
        tree.toggle(root, "A", flag_on, flip, ("ON", "OFF"), Visibility::Always)
            .unwrap();
        tree.toggle(root, "B", flag_on, flip, ("ON", "OFF"), Visibility::When(gate_open))
            .unwrap();
        tree.toggle(root, "C", flag_on, flip, ("ON", "OFF"), Visibility::When(gate_open))
            .unwrap();

        let mut ctx = TestCtx::new();
        ctx.gate = true;
        tree.move_selection(&ctx, root, 1);
        tree.move_selection(&ctx, root, 1);
        assert_eq!(tree.effective_selected(&ctx, root), 2);

        // The gated rows disappear; the index must stay inside [0, 1).
        ctx.gate = false;
        assert!(tree.effective_selected(&ctx, root) < tree.visible_count(&ctx, root));
    }

    #[test]
    fn active_flag_follows_selection() {
        let (mut tree, root) = screen_with_toggles(3);
        let ctx = TestCtx::new();
        tree.move_selection(&ctx, root, 1);

        assert!(!tree.row(&ctx, root, 0).unwrap().active);
        assert!(tree.row(&ctx, root, 1).unwrap().active);
        assert!(!tree.row(&ctx, root, 2).unwrap().active);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Tree Construction Errors
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn confirm_requires_exactly_two_options() {
        let mut tree: Tree<TestCtx> = Tree::new();
        let root = tree.screen(None, "MENU", Visibility::Always).unwrap();

        static ONE: [&str; 1] = ["GO"];
        static THREE: [&str; 3] = ["A", "B", "C"];
        let err = tree
            .confirm(root, "SEND", &ONE, |_, _| {}, Visibility::Always)
            .unwrap_err();
        assert_eq!(err, Error::BadConfirmShape);
        let err = tree
            .confirm(root, "SEND", &THREE, |_, _| {}, Visibility::Always)
            .unwrap_err();
        assert_eq!(err, Error::BadConfirmShape);
    }

    #[test]
    fn options_require_at_least_one_entry() {
        let mut tree: Tree<TestCtx> = Tree::new();
        let root = tree.screen(None, "MENU", Visibility::Always).unwrap();

        static NONE: [&str; 0] = [];
        let err = tree
            .options(root, "MODE", &NONE, |_, _| {}, Visibility::Always)
            .unwrap_err();
        assert_eq!(err, Error::EmptyOptions);
    }

    #[test]
    fn screens_reject_overflowing_rows() {
        let mut tree: Tree<TestCtx> = Tree::new();
        let root = tree.screen(None, "MENU", Visibility::Always).unwrap();
        for _ in 0..crate::config::MAX_ROWS {
            tree.toggle(root, "ROW", flag_on, flip, ("ON", "OFF"), Visibility::Always)
                .unwrap();
        }
        let err = tree
            .toggle(root, "ROW", flag_on, flip, ("ON", "OFF"), Visibility::Always)
            .unwrap_err();
        assert_eq!(err, Error::RowsFull);
    }

    #[test]
    fn controller_requires_a_screen_root() {
        let mut tree: Tree<TestCtx> = Tree::new();
        let root = tree.screen(None, "MENU", Visibility::Always).unwrap();
        let row = tree
            .toggle(root, "ROW", flag_on, flip, ("ON", "OFF"), Visibility::Always)
            .unwrap();
        assert!(matches!(Menu::new(tree, row), Err(Error::NotAScreen)));
    }

    // ════════════════════════════════════════════════════════════════════════
    // Controller Dispatch
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn toggle_flips_and_stays_on_parent() {
        let mut tree: Tree<TestCtx> = Tree::new();
        let root = tree.screen(None, "MENU", Visibility::Always).unwrap();
        tree.toggle(root, "LIGHTS", flag_on, flip, ("ON", "OFF"), Visibility::Always)
            .unwrap();

        let mut menu = Menu::new(tree, root).unwrap();
        let mut ctx = TestCtx::new();
        let mut display = NullDisplay::new();
        menu.open(&ctx, &mut display);

        assert_eq!(menu.tree().row(&ctx, root, 0).unwrap().decorator, "OFF");
        menu.activate(&mut ctx, &mut display);
        assert!(ctx.flag);
        assert_eq!(menu.current(), Some(root));
        assert_eq!(menu.tree().row(&ctx, root, 0).unwrap().decorator, "ON");
    }

    #[test]
    fn submenu_entry_and_back() {
        let mut tree: Tree<TestCtx> = Tree::new();
        let root = tree.screen(None, "MENU", Visibility::Always).unwrap();
        let sub = tree.screen(Some(root), "RELAYS", Visibility::Always).unwrap();
        tree.toggle(sub, "LIGHTS", flag_on, flip, ("ON", "OFF"), Visibility::Always)
            .unwrap();
        tree.back(sub).unwrap();

        let mut menu = Menu::new(tree, root).unwrap();
        let mut ctx = TestCtx::new();
        let mut display = NullDisplay::new();
        menu.open(&ctx, &mut display);

        menu.activate(&mut ctx, &mut display);
        assert_eq!(menu.current(), Some(sub));

        // Leave the sub-screen's selection on the back row, then act.
        menu.navigate(&mut ctx, &mut display, 1);
        menu.activate(&mut ctx, &mut display);
        assert_eq!(menu.current(), Some(root));
        assert!(menu.is_active());
        assert_eq!(menu.tree().effective_selected(&ctx, root), 0);
        // The sub-screen selection was reset on the way out.
        assert_eq!(menu.tree().effective_selected(&ctx, sub), 0);
    }

    #[test]
    fn root_level_back_dismisses_the_menu() {
        let mut tree: Tree<TestCtx> = Tree::new();
        let root = tree.screen(None, "MENU", Visibility::Always).unwrap();
        tree.toggle(root, "LIGHTS", flag_on, flip, ("ON", "OFF"), Visibility::Always)
            .unwrap();
        tree.back(root).unwrap();

        let mut menu = Menu::new(tree, root).unwrap();
        let mut ctx = TestCtx::new();
        let mut display = NullDisplay::new();
        menu.open(&ctx, &mut display);

        menu.navigate(&mut ctx, &mut display, 1);
        menu.activate(&mut ctx, &mut display);
        assert!(!menu.is_active());
        assert_eq!(menu.current(), Some(root));
        assert_eq!(menu.tree().effective_selected(&ctx, root), 0);
    }

    #[test]
    fn inactive_menu_ignores_input() {
        let mut tree: Tree<TestCtx> = Tree::new();
        let root = tree.screen(None, "MENU", Visibility::Always).unwrap();
        tree.toggle(root, "LIGHTS", flag_on, flip, ("ON", "OFF"), Visibility::Always)
            .unwrap();

        let mut menu = Menu::new(tree, root).unwrap();
        let mut ctx = TestCtx::new();
        let mut display = NullDisplay::new();

        menu.activate(&mut ctx, &mut display);
        assert!(!ctx.flag);
        assert_eq!(display.presented, 0);
    }

    #[test]
    fn enum_pick_round_trip() {
        static MODES: [&str; 3] = ["AUTO", "MAINTENANCE", "STAND BY"];
        let mut tree: Tree<TestCtx> = Tree::new();
        let root = tree.screen(None, "MENU", Visibility::Always).unwrap();
        let mode = tree
            .options(root, "MODE", &MODES, |c, i| c.picked = Some(i), Visibility::Always)
            .unwrap();

        let mut menu = Menu::new(tree, root).unwrap();
        let mut ctx = TestCtx::new();
        let mut display = NullDisplay::new();
        menu.open(&ctx, &mut display);

        // Freshly built screens decorate with their first option.
        assert_eq!(menu.tree().row(&ctx, root, 0).unwrap().decorator, "AUTO");

        menu.activate(&mut ctx, &mut display);
        assert_eq!(menu.current(), Some(mode));

        menu.navigate(&mut ctx, &mut display, 1);
        menu.navigate(&mut ctx, &mut display, 1);
        menu.activate(&mut ctx, &mut display);

        assert_eq!(ctx.picked, Some(2));
        assert_eq!(menu.current(), Some(root));
        assert_eq!(menu.tree().row(&ctx, root, 0).unwrap().decorator, "STAND BY");
        assert_eq!(menu.tree().row(&ctx, mode, 2).unwrap().decorator, "<<");
        assert_eq!(menu.tree().effective_selected(&ctx, mode), 0);
    }

    #[test]
    fn confirm_first_option_means_yes() {
        static OPTIONS: [&str; 2] = ["-> SEND", "<- BACK"];
        let mut tree: Tree<TestCtx> = Tree::new();
        let root = tree.screen(None, "MENU", Visibility::Always).unwrap();
        tree.confirm(
            root,
            "SEND TO WEB",
            &OPTIONS,
            |c, yes| c.confirmed = Some(yes),
            Visibility::Always,
        )
        .unwrap();

        let mut menu = Menu::new(tree, root).unwrap();
        let mut ctx = TestCtx::new();
        let mut display = NullDisplay::new();
        menu.open(&ctx, &mut display);

        menu.activate(&mut ctx, &mut display);
        menu.activate(&mut ctx, &mut display);
        assert_eq!(ctx.confirmed, Some(true));
        assert_eq!(menu.current(), Some(root));

        menu.activate(&mut ctx, &mut display);
        menu.navigate(&mut ctx, &mut display, 1);
        menu.activate(&mut ctx, &mut display);
        assert_eq!(ctx.confirmed, Some(false));
        assert_eq!(menu.current(), Some(root));
    }

    #[test]
    fn info_screen_select_returns_parent() {
        let mut tree: Tree<TestCtx> = Tree::new();
        let root = tree.screen(None, "MENU", Visibility::Always).unwrap();
        let info = tree
            .info(
                root,
                "INFO",
                |_, lines| {
                    let mut line = crate::menu::node::Line::new();
                    let _ = line.push_str("WIFI: UP");
                    let _ = lines.push(line);
                },
                Visibility::Always,
            )
            .unwrap();

        let mut menu = Menu::new(tree, root).unwrap();
        let mut ctx = TestCtx::new();
        let mut display = NullDisplay::new();
        menu.open(&ctx, &mut display);

        menu.activate(&mut ctx, &mut display);
        assert_eq!(menu.current(), Some(info));
        menu.activate(&mut ctx, &mut display);
        assert_eq!(menu.current(), Some(root));
    }

    #[test]
    fn select_with_nothing_visible_stays_put() {
        let mut tree: Tree<TestCtx> = Tree::new();
        let root = tree.screen(None, "MENU", Visibility::Always).unwrap();
        tree.toggle(root, "A", flag_on, flip, ("ON", "OFF"), Visibility::When(gate_open))
            .unwrap();

        let mut menu = Menu::new(tree, root).unwrap();
        let mut ctx = TestCtx::new();
        let mut display = NullDisplay::new();
        menu.open(&ctx, &mut display);

        menu.activate(&mut ctx, &mut display);
        assert_eq!(menu.current(), Some(root));
        assert!(!ctx.flag);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Editors Through the Controller
    // ════════════════════════════════════════════════════════════════════════

    fn window_menu() -> (Menu<TestCtx>, NodeId, NodeId) {
        let mut tree: Tree<TestCtx> = Tree::new();
        let root = tree.screen(None, "MENU", Visibility::Always).unwrap();
        let editor = tree
            .window_editor(
                root,
                "LIGHT TIMER",
                |c| c.seed_window,
                |c, f| c.window_committed = Some(f),
                Visibility::Always,
            )
            .unwrap();
        (Menu::new(tree, root).unwrap(), root, editor)
    }

    #[test]
    fn window_editor_seeds_edits_and_commits() {
        let (mut menu, root, editor) = window_menu();
        let mut ctx = TestCtx::new();
        ctx.seed_window = WindowFields {
            start_hour: 8,
            start_minute: 0,
            end_hour: 20,
            end_minute: 0,
        };
        let mut display = NullDisplay::new();
        menu.open(&ctx, &mut display);

        menu.activate(&mut ctx, &mut display);
        assert_eq!(menu.current(), Some(editor));

        // start_hour 8 -> 9, then end_hour 20 -> 19.
        menu.navigate(&mut ctx, &mut display, 1);
        menu.pan(&mut ctx, &mut display, 1);
        menu.pan(&mut ctx, &mut display, 1);
        menu.navigate(&mut ctx, &mut display, -1);

        menu.activate(&mut ctx, &mut display);
        assert_eq!(menu.current(), Some(root));
        assert_eq!(
            ctx.window_committed,
            Some(WindowFields {
                start_hour: 9,
                start_minute: 0,
                end_hour: 19,
                end_minute: 0,
            })
        );
    }

    #[test]
    fn window_editor_discards_uncommitted_edits() {
        let (mut menu, _root, editor) = window_menu();
        let mut ctx = TestCtx::new();
        ctx.seed_window.start_hour = 8;
        let mut display = NullDisplay::new();
        menu.open(&ctx, &mut display);

        menu.activate(&mut ctx, &mut display);
        menu.navigate(&mut ctx, &mut display, 1);

        // Menu times out before the operator confirms.
        menu.dismiss();
        assert!(!menu.is_active());
        assert!(ctx.window_committed.is_none());

        menu.open(&ctx, &mut display);
        menu.activate(&mut ctx, &mut display);
        assert_eq!(menu.current(), Some(editor));
        match &menu.tree().node(editor).kind {
            crate::menu::node::Kind::Window(ed) => {
                assert_eq!(ed.fields.start_hour, 8);
                assert_eq!(ed.cursor, 0);
            }
            _ => panic!("expected window editor"),
        }
    }

    #[test]
    fn clock_editor_writes_rtc_then_commits() {
        let mut tree: Tree<TestCtx> = Tree::new();
        let root = tree.screen(None, "MENU", Visibility::Always).unwrap();
        let editor = tree
            .clock_editor(
                root,
                "DATE/TIME",
                |c| c.seed_clock,
                |c, f| c.clock_written = Some(f),
                |c, _| c.clock_persisted = true,
                Visibility::Always,
            )
            .unwrap();

        let mut menu = Menu::new(tree, root).unwrap();
        let mut ctx = TestCtx::new();
        ctx.seed_clock = ClockFields {
            day: 15,
            month: 6,
            year: 2025,
            hour: 10,
            minute: 30,
        };
        let mut display = NullDisplay::new();
        menu.open(&ctx, &mut display);

        menu.activate(&mut ctx, &mut display);
        assert_eq!(menu.current(), Some(editor));

        // Bump the minute, then accept.
        menu.pan(&mut ctx, &mut display, -1);
        menu.navigate(&mut ctx, &mut display, 1);
        menu.activate(&mut ctx, &mut display);

        let expected = ClockFields {
            minute: 31,
            ..ctx.seed_clock
        };
        assert_eq!(ctx.clock_written, Some(expected));
        assert!(ctx.clock_persisted);
        assert_eq!(menu.current(), Some(root));
    }

    fn range_menu() -> (Menu<TestCtx>, NodeId, NodeId) {
        let mut tree: Tree<TestCtx> = Tree::new();
        let root = tree.screen(None, "MENU", Visibility::Always).unwrap();
        let editor = tree
            .range_editor(
                root,
                "SETTING",
                |c| c.seed_range,
                |c, f| c.range_committed = Some(f),
                Visibility::Always,
            )
            .unwrap();
        (Menu::new(tree, root).unwrap(), root, editor)
    }

    #[test]
    fn range_editor_rejects_inverted_bounds() {
        let (mut menu, _root, editor) = range_menu();
        let mut ctx = TestCtx::new();
        ctx.seed_range = RangeFields { min: 30, max: 20 };
        let mut display = NullDisplay::new();
        menu.open(&ctx, &mut display);

        menu.activate(&mut ctx, &mut display);
        menu.activate(&mut ctx, &mut display);
        assert!(menu.showing_fault());
        assert!(ctx.range_committed.is_none());

        // Any key dismisses the fault back to the editor.
        menu.navigate(&mut ctx, &mut display, 1);
        assert!(!menu.showing_fault());
        assert_eq!(menu.current(), Some(editor));
    }

    #[test]
    fn range_editor_commits_ordered_bounds() {
        let (mut menu, root, _editor) = range_menu();
        let mut ctx = TestCtx::new();
        ctx.seed_range = RangeFields { min: 20, max: 30 };
        let mut display = NullDisplay::new();
        menu.open(&ctx, &mut display);

        menu.activate(&mut ctx, &mut display);
        menu.activate(&mut ctx, &mut display);
        assert!(!menu.showing_fault());
        assert_eq!(ctx.range_committed, Some(RangeFields { min: 20, max: 30 }));
        assert_eq!(menu.current(), Some(root));
    }

    #[test]
    fn fault_dismissed_by_pan_and_select() {
        let (mut menu, _root, editor) = range_menu();
        let mut ctx = TestCtx::new();
        ctx.seed_range = RangeFields { min: 5, max: 5 };
        let mut display = NullDisplay::new();
        menu.open(&ctx, &mut display);
        menu.activate(&mut ctx, &mut display);

        menu.activate(&mut ctx, &mut display);
        assert!(menu.showing_fault());
        menu.pan(&mut ctx, &mut display, 1);
        assert_eq!(menu.current(), Some(editor));

        menu.activate(&mut ctx, &mut display);
        assert!(menu.showing_fault());
        menu.activate(&mut ctx, &mut display);
        assert_eq!(menu.current(), Some(editor));
        assert!(ctx.range_committed.is_none());
    }

    // ════════════════════════════════════════════════════════════════════════
    // Input Mapping & Idle Policy
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn handle_maps_keys_to_operations() {
        let mut tree: Tree<TestCtx> = Tree::new();
        let root = tree.screen(None, "MENU", Visibility::Always).unwrap();
        tree.screen(Some(root), "SUB", Visibility::Always).unwrap();
        tree.toggle(root, "LIGHTS", flag_on, flip, ("ON", "OFF"), Visibility::Always)
            .unwrap();

        let mut menu = Menu::new(tree, root).unwrap();
        let mut ctx = TestCtx::new();
        let mut display = NullDisplay::new();
        menu.open(&ctx, &mut display);

        menu.handle(&mut ctx, &mut display, InputEvent::Down);
        menu.handle(&mut ctx, &mut display, InputEvent::Select);
        assert!(ctx.flag);

        menu.handle(&mut ctx, &mut display, InputEvent::Up);
        assert_eq!(menu.tree().effective_selected(&ctx, root), 0);
    }

    #[test]
    fn idle_policy_dismisses_after_timeout() {
        use crate::idle_logic::menu_should_dismiss;

        assert!(!menu_should_dismiss(true, 99, 100));
        assert!(menu_should_dismiss(true, 100, 100));
        assert!(menu_should_dismiss(true, 500, 100));
        assert!(!menu_should_dismiss(false, 500, 100));
    }

    #[test]
    fn every_operation_renders_once() {
        let (mut menu, _root, _editor) = window_menu();
        let mut ctx = TestCtx::new();
        let mut display = NullDisplay::new();

        menu.open(&ctx, &mut display);
        assert_eq!(display.presented, 1);
        menu.navigate(&mut ctx, &mut display, 1);
        assert_eq!(display.presented, 2);
        menu.pan(&mut ctx, &mut display, 1);
        assert_eq!(display.presented, 3);
        menu.activate(&mut ctx, &mut display);
        assert_eq!(display.presented, 4);
    }
}
