//! Menu tree storage: an index-based node arena.
//!
//! Every screen and row of the menu is a `Node` held in a fixed-size
//! arena; parent links are plain ids, so the tree carries no owning
//! back-references. The structure is wired once at startup and is
//! immutable afterwards; only selection indices, editor cursors, and
//! editor field values change at runtime.

use heapless::Vec;

use crate::config::{MAX_INFO_LINES, MAX_LINE_CHARS, MAX_NODES, MAX_ROWS, PER_PAGE};
use crate::error::Error;
use crate::menu::action::{Act, ConfirmAct, PickAct, Pred, Visibility};
use crate::menu::editors::{
    ClockEditor, ClockFields, RangeEditor, RangeFields, WindowEditor, WindowFields,
};

/// One rendered line of text.
pub type Line = heapless::String<MAX_LINE_CHARS>;

/// Centered lines produced by an informational screen.
pub type InfoLines = Vec<Line, MAX_INFO_LINES>;

/// Reader filling an informational screen from the context.
pub type InfoFill<C> = fn(&C, &mut InfoLines);

/// Index of a node in its tree's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NodeId(u16);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Row list and selection state shared by every screen kind.
pub struct ScreenState {
    pub children: Vec<NodeId, MAX_ROWS>,
    pub selected: usize,
    pub per_page: usize,
}

impl ScreenState {
    fn new() -> Self {
        Self {
            children: Vec::new(),
            selected: 0,
            per_page: PER_PAGE,
        }
    }
}

/// Enumeration screen: option rows plus the remembered last pick.
pub struct OptionsState<C> {
    pub list: ScreenState,
    pub chosen: usize,
    pub on_pick: PickAct<C>,
}

/// Yes/no screen: affirmative row first, negative row second.
pub struct ConfirmState<C> {
    pub list: ScreenState,
    pub on_choice: ConfirmAct<C>,
}

/// Boolean row flipping a context flag.
pub struct ToggleState<C> {
    pub status: Pred<C>,
    pub flip: Act<C>,
    pub on_label: &'static str,
    pub off_label: &'static str,
}

/// What a node is and the per-kind runtime state it carries.
pub enum Kind<C> {
    /// Plain list screen.
    Screen(ScreenState),
    /// Enumeration screen.
    Options(OptionsState<C>),
    /// Confirmation screen.
    Confirm(ConfirmState<C>),
    /// Boolean toggle row.
    Toggle(ToggleState<C>),
    /// Row returning to the grandparent screen.
    Back,
    /// Read-only informational screen.
    Info(InfoFill<C>),
    /// Calendar date/time editor.
    Clock(ClockEditor<C>),
    /// Daily time-window editor.
    Window(WindowEditor<C>),
    /// Min/max temperature editor.
    Range(RangeEditor<C>),
    /// Option row inside an Options or Confirm screen.
    OptionRow(usize),
}

/// A menu tree node: identity, parent link, visibility, kind.
pub struct Node<C> {
    pub label: &'static str,
    pub parent: Option<NodeId>,
    pub vis: Visibility<C>,
    pub kind: Kind<C>,
}

/// One row of a rendered screen page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowView {
    pub label: &'static str,
    /// Short trailing status text, right-aligned on the row.
    pub decorator: &'static str,
    /// Set only for the highlighted row.
    pub active: bool,
}

/// Fixed-capacity node arena holding one menu tree.
pub struct Tree<C> {
    nodes: Vec<Node<C>, MAX_NODES>,
}

impl<C> Tree<C> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Create a list screen, optionally attached under a parent screen.
    pub fn screen(
        &mut self,
        parent: Option<NodeId>,
        label: &'static str,
        vis: Visibility<C>,
    ) -> Result<NodeId, Error> {
        let id = self.push(Node {
            label,
            parent,
            vis,
            kind: Kind::Screen(ScreenState::new()),
        })?;
        if let Some(parent) = parent {
            self.attach(parent, id)?;
        }
        Ok(id)
    }

    /// Create an enumeration screen with one row per option label.
    pub fn options(
        &mut self,
        parent: NodeId,
        label: &'static str,
        options: &'static [&'static str],
        on_pick: PickAct<C>,
        vis: Visibility<C>,
    ) -> Result<NodeId, Error> {
        if options.is_empty() {
            return Err(Error::EmptyOptions);
        }
        let id = self.push(Node {
            label,
            parent: Some(parent),
            vis,
            kind: Kind::Options(OptionsState {
                list: ScreenState::new(),
                chosen: 0,
                on_pick,
            }),
        })?;
        self.attach(parent, id)?;
        self.add_option_rows(id, options)?;
        Ok(id)
    }

    /// Create a confirmation screen. The option set must be exactly an
    /// affirmative followed by a negative.
    pub fn confirm(
        &mut self,
        parent: NodeId,
        label: &'static str,
        options: &'static [&'static str],
        on_choice: ConfirmAct<C>,
        vis: Visibility<C>,
    ) -> Result<NodeId, Error> {
        if options.len() != 2 {
            return Err(Error::BadConfirmShape);
        }
        let id = self.push(Node {
            label,
            parent: Some(parent),
            vis,
            kind: Kind::Confirm(ConfirmState {
                list: ScreenState::new(),
                on_choice,
            }),
        })?;
        self.attach(parent, id)?;
        self.add_option_rows(id, options)?;
        Ok(id)
    }

    /// Create a toggle row under a parent screen.
    pub fn toggle(
        &mut self,
        parent: NodeId,
        label: &'static str,
        status: Pred<C>,
        flip: Act<C>,
        labels: (&'static str, &'static str),
        vis: Visibility<C>,
    ) -> Result<NodeId, Error> {
        let id = self.push(Node {
            label,
            parent: Some(parent),
            vis,
            kind: Kind::Toggle(ToggleState {
                status,
                flip,
                on_label: labels.0,
                off_label: labels.1,
            }),
        })?;
        self.attach(parent, id)?;
        Ok(id)
    }

    /// Create a back row under a parent screen.
    pub fn back(&mut self, parent: NodeId) -> Result<NodeId, Error> {
        let id = self.push(Node {
            label: "<<< BACK",
            parent: Some(parent),
            vis: Visibility::Always,
            kind: Kind::Back,
        })?;
        self.attach(parent, id)?;
        Ok(id)
    }

    /// Create a read-only informational screen.
    pub fn info(
        &mut self,
        parent: NodeId,
        label: &'static str,
        read: InfoFill<C>,
        vis: Visibility<C>,
    ) -> Result<NodeId, Error> {
        let id = self.push(Node {
            label,
            parent: Some(parent),
            vis,
            kind: Kind::Info(read),
        })?;
        self.attach(parent, id)?;
        Ok(id)
    }

    /// Create a calendar date/time editor screen.
    pub fn clock_editor(
        &mut self,
        parent: NodeId,
        label: &'static str,
        load: fn(&C) -> ClockFields,
        set_clock: fn(&mut C, ClockFields),
        commit: fn(&mut C, ClockFields),
        vis: Visibility<C>,
    ) -> Result<NodeId, Error> {
        let id = self.push(Node {
            label,
            parent: Some(parent),
            vis,
            kind: Kind::Clock(ClockEditor {
                fields: ClockFields::baseline(),
                cursor: 0,
                load,
                set_clock,
                commit,
            }),
        })?;
        self.attach(parent, id)?;
        Ok(id)
    }

    /// Create a daily time-window editor screen.
    pub fn window_editor(
        &mut self,
        parent: NodeId,
        label: &'static str,
        load: fn(&C) -> WindowFields,
        commit: fn(&mut C, WindowFields),
        vis: Visibility<C>,
    ) -> Result<NodeId, Error> {
        let id = self.push(Node {
            label,
            parent: Some(parent),
            vis,
            kind: Kind::Window(WindowEditor {
                fields: WindowFields::default(),
                cursor: 0,
                load,
                commit,
            }),
        })?;
        self.attach(parent, id)?;
        Ok(id)
    }

    /// Create a min/max temperature editor screen.
    pub fn range_editor(
        &mut self,
        parent: NodeId,
        label: &'static str,
        load: fn(&C) -> RangeFields,
        commit: fn(&mut C, RangeFields),
        vis: Visibility<C>,
    ) -> Result<NodeId, Error> {
        let id = self.push(Node {
            label,
            parent: Some(parent),
            vis,
            kind: Kind::Range(RangeEditor {
                fields: RangeFields::default(),
                cursor: 0,
                load,
                commit,
            }),
        })?;
        self.attach(parent, id)?;
        Ok(id)
    }

    pub fn node(&self, id: NodeId) -> &Node<C> {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<C> {
        &mut self.nodes[id.index()]
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Effective visibility: a literal, or the predicate's current
    /// result. Never cached.
    pub fn is_visible(&self, ctx: &C, id: NodeId) -> bool {
        self.node(id).vis.check(ctx)
    }

    /// Child ids currently visible under a screen, in row order.
    pub fn visible_children(&self, ctx: &C, id: NodeId) -> Vec<NodeId, MAX_ROWS> {
        let mut out = Vec::new();
        if let Some(list) = self.list_of(id) {
            for &child in &list.children {
                if self.is_visible(ctx, child) {
                    let _ = out.push(child);
                }
            }
        }
        out
    }

    pub fn visible_count(&self, ctx: &C, id: NodeId) -> usize {
        self.visible_children(ctx, id).len()
    }

    /// Rows shown per page on this screen.
    pub fn per_page_of(&self, id: NodeId) -> usize {
        self.list_of(id).map(|list| list.per_page).unwrap_or(PER_PAGE)
    }

    /// Selection index clamped into the current visible row count.
    pub fn effective_selected(&self, ctx: &C, id: NodeId) -> usize {
        let count = self.visible_count(ctx, id);
        if count == 0 {
            return 0;
        }
        match self.list_of(id) {
            Some(list) => list.selected % count,
            None => 0,
        }
    }

    /// Step the selection by one with wrap-around in both directions.
    /// No-op while the screen has no visible rows.
    pub fn move_selection(&mut self, ctx: &C, id: NodeId, delta: i32) {
        let count = self.visible_count(ctx, id);
        if count == 0 {
            return;
        }
        let current = self.effective_selected(ctx, id);
        let next = if delta > 0 {
            if current + 1 >= count {
                0
            } else {
                current + 1
            }
        } else if current == 0 {
            count - 1
        } else {
            current - 1
        };
        if let Some(list) = self.list_of_mut(id) {
            list.selected = next;
        }
    }

    /// Reset a screen's selection to the first row.
    pub fn reset(&mut self, id: NodeId) {
        if let Some(list) = self.list_of_mut(id) {
            list.selected = 0;
        }
    }

    /// The visible row at `position`, with its decorator and highlight
    /// state. `None` past the end of the visible set.
    pub fn row(&self, ctx: &C, id: NodeId, position: usize) -> Option<RowView> {
        let children = self.visible_children(ctx, id);
        let child = *children.get(position)?;
        let active = position == self.effective_selected(ctx, id);
        Some(RowView {
            label: self.node(child).label,
            decorator: self.decorator_for(ctx, id, child, position),
            active,
        })
    }

    /// The node under the current selection, without executing it.
    pub fn selected_child(&self, ctx: &C, id: NodeId) -> Option<NodeId> {
        let children = self.visible_children(ctx, id);
        if children.is_empty() {
            return None;
        }
        children.get(self.effective_selected(ctx, id)).copied()
    }

    /// Remembered pick's label for an enumeration screen.
    pub fn chosen_label(&self, id: NodeId) -> &'static str {
        match &self.node(id).kind {
            Kind::Options(state) => state
                .list
                .children
                .get(state.chosen)
                .map(|&c| self.node(c).label)
                .unwrap_or(""),
            _ => "",
        }
    }

    fn decorator_for(
        &self,
        ctx: &C,
        screen: NodeId,
        child: NodeId,
        position: usize,
    ) -> &'static str {
        match &self.node(child).kind {
            Kind::Toggle(t) => {
                if (t.status)(ctx) {
                    t.on_label
                } else {
                    t.off_label
                }
            }
            Kind::Options(_) => self.chosen_label(child),
            Kind::OptionRow(_) => match &self.node(screen).kind {
                Kind::Options(state) if position == state.chosen => "<<",
                _ => "",
            },
            Kind::Back => "",
            Kind::Screen(_)
            | Kind::Confirm(_)
            | Kind::Info(_)
            | Kind::Clock(_)
            | Kind::Window(_)
            | Kind::Range(_) => ">",
        }
    }

    fn add_option_rows(
        &mut self,
        parent: NodeId,
        options: &'static [&'static str],
    ) -> Result<(), Error> {
        for (ordinal, &label) in options.iter().enumerate() {
            let row = self.push(Node {
                label,
                parent: Some(parent),
                vis: Visibility::Always,
                kind: Kind::OptionRow(ordinal),
            })?;
            self.attach(parent, row)?;
        }
        Ok(())
    }

    fn push(&mut self, node: Node<C>) -> Result<NodeId, Error> {
        let id = NodeId(self.nodes.len() as u16);
        self.nodes.push(node).map_err(|_| Error::TreeFull)?;
        Ok(id)
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), Error> {
        if parent.index() >= self.nodes.len() {
            return Err(Error::BadNodeId);
        }
        let list = self.list_of_mut(parent).ok_or(Error::NotAScreen)?;
        list.children.push(child).map_err(|_| Error::RowsFull)
    }

    fn list_of(&self, id: NodeId) -> Option<&ScreenState> {
        match &self.node(id).kind {
            Kind::Screen(list) => Some(list),
            Kind::Options(state) => Some(&state.list),
            Kind::Confirm(state) => Some(&state.list),
            _ => None,
        }
    }

    fn list_of_mut(&mut self, id: NodeId) -> Option<&mut ScreenState> {
        match &mut self.node_mut(id).kind {
            Kind::Screen(list) => Some(list),
            Kind::Options(state) => Some(&mut state.list),
            Kind::Confirm(state) => Some(&mut state.list),
            _ => None,
        }
    }
}
