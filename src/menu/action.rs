//! Callback bindings between menu nodes and the application context.
//!
//! Nodes never reach into the application directly; they hold plain
//! function pointers over the context type `C` and invoke them when the
//! operator acts on a row. Binding mistakes are compile errors, so a
//! tree that constructs is a tree that dispatches.

/// Predicate over the application context (visibility, toggle status).
///
/// Re-evaluated on every query, never cached.
pub type Pred<C> = fn(&C) -> bool;

/// Context mutation with no call-site argument (toggle flip).
pub type Act<C> = fn(&mut C);

/// Context mutation invoked with the picked option's ordinal.
pub type PickAct<C> = fn(&mut C, usize);

/// Context mutation invoked with the confirm outcome.
pub type ConfirmAct<C> = fn(&mut C, bool);

/// Whether a node currently appears in its parent's row list.
#[derive(Clone, Copy)]
pub enum Visibility<C> {
    /// Unconditionally shown.
    Always,
    /// Shown while the predicate holds.
    When(Pred<C>),
}

impl<C> Visibility<C> {
    /// Evaluate against the current context state.
    pub fn check(&self, ctx: &C) -> bool {
        match self {
            Visibility::Always => true,
            Visibility::When(pred) => pred(ctx),
        }
    }
}
