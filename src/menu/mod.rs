//! Menu subsystem - node tree, editors, input dispatch, drawing.
//!
//! The controller owns the tree and a focus pointer. Each input event
//! maps to exactly one operation; pressing select is a two-step
//! dispatch: the focused screen first resolves *which* row is targeted
//! (`select`), then the target's own execution runs, performing side
//! effects and deciding the new focus. That split is what lets five
//! events drive submenus, toggles, enumerations, confirmations and
//! field editors without per-kind branching here growing outward into
//! the host application.

pub mod action;
pub mod editors;
pub mod node;
pub mod render;

use crate::config::MAX_ERROR_CHARS;
use crate::error::Error;
use crate::menu::editors::{Pending, RangeOutcome};
use crate::menu::node::{InfoLines, Kind, NodeId, Tree};
use crate::menu::render::Screen;

/// Debounced operator inputs, one per physical key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    Up,
    Down,
    Left,
    Right,
    Select,
}

/// Transient validation-failure view. Produced by a rejected edit;
/// dismissed back to its parent editor by any input.
struct Fault {
    message: heapless::String<MAX_ERROR_CHARS>,
    parent: NodeId,
}

enum Focus {
    Node(NodeId),
    Fault(Fault),
}

/// The menu controller: tree, focus, and the active flag the host
/// polls to decide whether to forward input.
pub struct Menu<C> {
    tree: Tree<C>,
    root: NodeId,
    focus: Focus,
    active: bool,
}

impl<C> Menu<C> {
    /// Take ownership of a wired tree. The root must be a list screen.
    pub fn new(tree: Tree<C>, root: NodeId) -> Result<Self, Error> {
        if !matches!(tree.node(root).kind, Kind::Screen(_)) {
            return Err(Error::NotAScreen);
        }
        Ok(Self {
            tree,
            root,
            focus: Focus::Node(root),
            active: false,
        })
    }

    pub fn tree(&self) -> &Tree<C> {
        &self.tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Whether the menu is on screen. While false, the host keeps the
    /// status view up and input wakes the menu instead of driving it.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The focused tree node; `None` while a validation fault is shown.
    pub fn current(&self) -> Option<NodeId> {
        match &self.focus {
            Focus::Node(id) => Some(*id),
            Focus::Fault(_) => None,
        }
    }

    /// Whether a validation fault view is on screen.
    pub fn showing_fault(&self) -> bool {
        matches!(self.focus, Focus::Fault(_))
    }

    /// Bring the menu up at the root screen and draw it.
    pub fn open<D: Screen>(&mut self, ctx: &C, display: &mut D) {
        self.active = true;
        self.focus = Focus::Node(self.root);
        self.render(ctx, display);
    }

    /// Drop back to the root and hide the menu. The host redraws its
    /// own status view afterwards.
    pub fn dismiss(&mut self) {
        self.focus = Focus::Node(self.root);
        self.tree.reset(self.root);
        self.active = false;
    }

    /// Up/down: move the selection on a list, or step the active
    /// field's value on an editor.
    pub fn navigate<D: Screen>(&mut self, ctx: &mut C, display: &mut D, delta: i32) {
        if !self.active {
            return;
        }
        match &mut self.focus {
            Focus::Fault(fault) => {
                let parent = fault.parent;
                self.focus = Focus::Node(parent);
            }
            Focus::Node(id) => {
                let id = *id;
                match &mut self.tree.node_mut(id).kind {
                    Kind::Clock(ed) => ed.step_value(delta),
                    Kind::Window(ed) => ed.step_value(delta),
                    Kind::Range(ed) => ed.step_value(delta),
                    _ => self.tree.move_selection(ctx, id, delta),
                }
            }
        }
        self.render(ctx, display);
    }

    /// Left/right: move the active-field cursor on an editor; list
    /// screens have no cursor and only redraw.
    pub fn pan<D: Screen>(&mut self, ctx: &mut C, display: &mut D, delta: i32) {
        if !self.active {
            return;
        }
        match &mut self.focus {
            Focus::Fault(fault) => {
                let parent = fault.parent;
                self.focus = Focus::Node(parent);
            }
            Focus::Node(id) => {
                let id = *id;
                match &mut self.tree.node_mut(id).kind {
                    Kind::Clock(ed) => ed.shift_cursor(delta),
                    Kind::Window(ed) => ed.shift_cursor(delta),
                    Kind::Range(ed) => ed.shift_cursor(delta),
                    _ => {}
                }
            }
        }
        self.render(ctx, display);
    }

    /// Select: resolve the target under the focus, then run its
    /// execution. The execution decides the new focus.
    pub fn activate<D: Screen>(&mut self, ctx: &mut C, display: &mut D) {
        if !self.active {
            return;
        }
        let dismissed = match &self.focus {
            Focus::Fault(fault) => {
                let parent = fault.parent;
                self.focus = Focus::Node(parent);
                false
            }
            Focus::Node(id) => {
                let id = *id;
                self.dispatch(ctx, id)
            }
        };
        if !dismissed {
            self.render(ctx, display);
        }
    }

    /// Convenience mapping from a physical key to its operation.
    pub fn handle<D: Screen>(&mut self, ctx: &mut C, display: &mut D, event: InputEvent) {
        match event {
            InputEvent::Up => self.navigate(ctx, display, -1),
            InputEvent::Down => self.navigate(ctx, display, 1),
            InputEvent::Left => self.pan(ctx, display, -1),
            InputEvent::Right => self.pan(ctx, display, 1),
            InputEvent::Select => self.activate(ctx, display),
        }
    }

    /// Draw the focused view. Safe to call from the host at any time
    /// while the menu is active (e.g. to refresh an info screen).
    pub fn render<D: Screen>(&self, ctx: &C, display: &mut D) {
        match &self.focus {
            Focus::Fault(fault) => render::draw_error(display, &fault.message),
            Focus::Node(id) => match &self.tree.node(*id).kind {
                Kind::Screen(_) | Kind::Options(_) | Kind::Confirm(_) => {
                    render::draw_list(&self.tree, ctx, *id, display)
                }
                Kind::Clock(ed) => render::draw_clock(display, &ed.fields, ed.cursor),
                Kind::Window(ed) => render::draw_window(display, &ed.fields, ed.cursor),
                Kind::Range(ed) => render::draw_range(display, &ed.fields, ed.cursor),
                Kind::Info(read) => {
                    let mut lines = InfoLines::new();
                    read(ctx, &mut lines);
                    render::draw_info(display, &lines);
                }
                // Rows are drawn by their parent screen and never hold
                // the focus themselves.
                Kind::Toggle(_) | Kind::Back | Kind::OptionRow(_) => {}
            },
        }
    }

    /// Select-then-execute on the focused node. Returns true when the
    /// dispatch dismissed the menu (root-level back).
    fn dispatch(&mut self, ctx: &mut C, id: NodeId) -> bool {
        match &self.tree.node(id).kind {
            Kind::Screen(_) | Kind::Options(_) | Kind::Confirm(_) => {
                match self.tree.selected_child(ctx, id) {
                    Some(child) => self.execute_row(ctx, child),
                    // Nothing visible to act on; stay and redraw.
                    None => false,
                }
            }
            Kind::Info(_) => {
                if let Some(parent) = self.tree.parent_of(id) {
                    self.focus = Focus::Node(parent);
                }
                false
            }
            Kind::Clock(ed) => {
                let fields = ed.fields;
                let set_clock = ed.set_clock;
                let commit = ed.commit;
                // The RTC is written as soon as the edit is accepted;
                // the carried commit then persists/acknowledges it.
                set_clock(ctx, fields);
                self.finish_edit(ctx, id, Pending::Clock(commit, fields));
                false
            }
            Kind::Window(ed) => {
                let pending = Pending::Window(ed.commit, ed.fields);
                self.finish_edit(ctx, id, pending);
                false
            }
            Kind::Range(ed) => match ed.resolve() {
                RangeOutcome::Commit(fields) => {
                    let pending = Pending::Range(ed.commit, fields);
                    self.finish_edit(ctx, id, pending);
                    false
                }
                RangeOutcome::Invalid(message) => {
                    let mut text = heapless::String::new();
                    let _ = text.push_str(message);
                    self.focus = Focus::Fault(Fault {
                        message: text,
                        parent: id,
                    });
                    false
                }
            },
            // A leaf can only be targeted through its parent screen.
            Kind::Toggle(_) | Kind::Back | Kind::OptionRow(_) => false,
        }
    }

    /// Run the execution of the row targeted by a list screen.
    fn execute_row(&mut self, ctx: &mut C, child: NodeId) -> bool {
        match &self.tree.node(child).kind {
            // Entering a sub-screen: it becomes the focus as-is.
            Kind::Screen(_) | Kind::Options(_) | Kind::Confirm(_) | Kind::Info(_) => {
                self.focus = Focus::Node(child);
                false
            }
            // Editors re-read their collaborator state on entry;
            // uncommitted edits from an earlier visit are gone.
            Kind::Clock(_) | Kind::Window(_) | Kind::Range(_) => {
                self.seed_editor(ctx, child);
                self.focus = Focus::Node(child);
                false
            }
            Kind::Toggle(t) => {
                let flip = t.flip;
                flip(ctx);
                // Focus stays on the parent; its rows re-read the
                // toggle state when redrawn.
                false
            }
            Kind::OptionRow(ordinal) => {
                let ordinal = *ordinal;
                let parent = self.tree.parent_of(child).unwrap_or(self.root);
                match &mut self.tree.node_mut(parent).kind {
                    Kind::Options(state) => {
                        state.chosen = ordinal;
                        let on_pick = state.on_pick;
                        on_pick(ctx, ordinal);
                    }
                    Kind::Confirm(state) => {
                        let on_choice = state.on_choice;
                        on_choice(ctx, ordinal == 0);
                    }
                    _ => {}
                }
                self.tree.reset(parent);
                self.pop_to_grandparent(parent)
            }
            Kind::Back => {
                let parent = self.tree.parent_of(child).unwrap_or(self.root);
                self.tree.reset(parent);
                self.pop_to_grandparent(parent)
            }
        }
    }

    /// Land on `screen`'s own parent; a screen directly under the root
    /// pops to the root, and the root itself dismisses the menu.
    fn pop_to_grandparent(&mut self, screen: NodeId) -> bool {
        match self.tree.parent_of(screen) {
            Some(grandparent) => {
                self.focus = Focus::Node(grandparent);
                false
            }
            None => {
                self.dismiss();
                true
            }
        }
    }

    /// Execute the synthetic commit row an accepted edit produced and
    /// land on the editor's parent.
    fn finish_edit(&mut self, ctx: &mut C, editor: NodeId, pending: Pending<C>) {
        pending.run(ctx);
        let parent = self.tree.parent_of(editor).unwrap_or(self.root);
        self.focus = Focus::Node(parent);
    }

    fn seed_editor(&mut self, ctx: &C, id: NodeId) {
        match &mut self.tree.node_mut(id).kind {
            Kind::Clock(ed) => ed.seed(ctx),
            Kind::Window(ed) => ed.seed(ctx),
            Kind::Range(ed) => ed.seed(ctx),
            _ => {}
        }
    }
}
