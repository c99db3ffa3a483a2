//! Application-wide constants and compile-time configuration.
//!
//! All display geometry, menu capacities, and timing parameters live
//! here so they can be tuned in one place.

// Display

/// OLED panel width in pixels (SSD1306 128x64).
pub const DISPLAY_WIDTH: i32 = 128;

/// OLED panel height in pixels.
pub const DISPLAY_HEIGHT: i32 = 64;

/// Glyph cell width of the menu font (FONT_6X10).
pub const FONT_WIDTH: i32 = 6;

/// Glyph cell height of the menu font.
pub const FONT_HEIGHT: i32 = 10;

/// Height reserved for a screen title and its separator line.
pub const HEADER_HEIGHT: i32 = 12;

/// Vertical position of the title separator line.
pub const HEADER_RULE_Y: i32 = 10;

// Menu

/// Rows shown per page on a list screen.
pub const PER_PAGE: usize = 4;

/// Height of one list row slot: the area below the header split into
/// `PER_PAGE` slots.
pub const ROW_HEIGHT: i32 = (DISPLAY_HEIGHT - HEADER_HEIGHT) / PER_PAGE as i32;

/// Maximum nodes in one menu tree (screens, rows, and option rows).
pub const MAX_NODES: usize = 128;

/// Maximum rows under one list screen.
pub const MAX_ROWS: usize = 8;

/// Character width at which error messages are word-wrapped.
pub const ERROR_WRAP_COLS: usize = 16;

/// Line pitch of the wrapped error text block.
pub const ERROR_LINE_PITCH: i32 = 12;

/// Maximum wrapped lines an error message may occupy.
pub const MAX_ERROR_LINES: usize = 5;

/// Maximum characters in one rendered line of text.
pub const MAX_LINE_CHARS: usize = 24;

/// Maximum characters in an error message before wrapping.
pub const MAX_ERROR_CHARS: usize = 96;

/// Centered lines an informational screen may show.
pub const MAX_INFO_LINES: usize = 4;

// Host polling loop

/// Inactivity timeout before the host should dismiss the menu (seconds).
pub const MENU_TIMEOUT_SECS: u32 = 10;

/// Host polling tick length (milliseconds); the inactivity timeout is
/// counted in these ticks.
pub const POLL_TICK_MS: u32 = 100;

/// Inactivity timeout expressed in polling ticks.
pub const MENU_TIMEOUT_TICKS: u32 = MENU_TIMEOUT_SECS * 1000 / POLL_TICK_MS;

// Settings snapshot

/// Maximum fields in a persisted settings snapshot.
pub const MAX_SNAPSHOT_FIELDS: usize = 32;
