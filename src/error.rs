//! Unified error type for tankmenu.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Every variant is a configuration mistake: the menu tree is wired once
//! at startup and a malformed tree must fail there, never during input
//! dispatch.

/// Errors raised while building a menu tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The node arena is at capacity.
    TreeFull,

    /// The parent screen already holds the maximum number of rows.
    RowsFull,

    /// The referenced id does not name a node in this tree.
    BadNodeId,

    /// The referenced node cannot hold child rows.
    NotAScreen,

    /// An enumeration screen was built from an empty option list.
    EmptyOptions,

    /// A confirm screen needs exactly an affirmative and a negative
    /// option; it was built with another shape.
    BadConfirmShape,
}
