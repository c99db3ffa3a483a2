//! Screen drawing: list pages, field editors, informational and error
//! views.
//!
//! Everything renders through `embedded-graphics` into any
//! `DrawTarget<Color = BinaryColor>`; the [`Screen`] trait adds the
//! flush step a buffered panel needs. Layout maths (pagination window,
//! word wrap) are plain functions so they test on the host.

use core::fmt::Write as _;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use heapless::Vec;

use crate::config::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, ERROR_LINE_PITCH, ERROR_WRAP_COLS, FONT_HEIGHT, FONT_WIDTH,
    HEADER_HEIGHT, HEADER_RULE_Y, MAX_ERROR_LINES, ROW_HEIGHT,
};
use crate::menu::editors::{ClockFields, RangeFields, WindowFields};
use crate::menu::node::{InfoLines, Line, NodeId, Tree};

/// A monochrome panel the menu can draw on and flush to.
pub trait Screen: DrawTarget<Color = BinaryColor> {
    /// Push the drawn frame to the panel.
    fn present(&mut self);
}

fn style(color: BinaryColor) -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyle::new(&FONT_6X10, color)
}

pub(crate) fn text<D: Screen>(display: &mut D, s: &str, x: i32, y: i32, color: BinaryColor) {
    let _ = Text::with_baseline(s, Point::new(x, y), style(color), Baseline::Top).draw(display);
}

pub(crate) fn centered_text<D: Screen>(display: &mut D, s: &str, y: i32, color: BinaryColor) {
    let x = (DISPLAY_WIDTH - s.len() as i32 * FONT_WIDTH) / 2;
    text(display, s, x.max(0), y, color);
}

pub(crate) fn fill_rect<D: Screen>(display: &mut D, x: i32, y: i32, w: u32, h: u32, color: BinaryColor) {
    let _ = Rectangle::new(Point::new(x, y), Size::new(w, h))
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display);
}

pub(crate) fn outline_rect<D: Screen>(display: &mut D, x: i32, y: i32, w: u32, h: u32) {
    let _ = Rectangle::new(Point::new(x, y), Size::new(w, h))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(display);
}

/// Pagination window `[start, end)` for a list page. The selected row
/// always lies inside the window and the window never exceeds one page.
pub fn page_window(selected: usize, per_page: usize, visible: usize) -> (usize, usize) {
    let start = if selected + 1 > per_page {
        selected + 1 - per_page
    } else {
        0
    };
    let end = (start + per_page).min(visible);
    (start, end)
}

/// Greedy word wrap bounded at `ERROR_WRAP_COLS` characters per line.
pub fn wrap_message(message: &str) -> Vec<Line, MAX_ERROR_LINES> {
    let mut lines: Vec<Line, MAX_ERROR_LINES> = Vec::new();
    let mut current = Line::new();
    for word in message.split_whitespace() {
        let needed = if current.is_empty() {
            word.len()
        } else {
            current.len() + 1 + word.len()
        };
        if needed > ERROR_WRAP_COLS && !current.is_empty() {
            if lines.push(current).is_err() {
                return lines;
            }
            current = Line::new();
        }
        if !current.is_empty() {
            let _ = current.push(' ');
        }
        for c in word.chars().take(ERROR_WRAP_COLS) {
            let _ = current.push(c);
        }
    }
    if !current.is_empty() {
        let _ = lines.push(current);
    }
    lines
}

fn header<D: Screen>(display: &mut D, title: &str) {
    centered_text(display, title, 0, BinaryColor::On);
    fill_rect(
        display,
        0,
        HEADER_RULE_Y,
        DISPLAY_WIDTH as u32,
        1,
        BinaryColor::On,
    );
}

/// Render a list screen: title, separator, one page of rows.
pub(crate) fn draw_list<C, D: Screen>(tree: &Tree<C>, ctx: &C, id: NodeId, display: &mut D) {
    let _ = display.clear(BinaryColor::Off);
    header(display, tree.node(id).label);

    let visible = tree.visible_count(ctx, id);
    let selected = tree.effective_selected(ctx, id);
    let (start, end) = page_window(selected, tree.per_page_of(id), visible);

    for (slot, position) in (start..end).enumerate() {
        if let Some(row) = tree.row(ctx, id, position) {
            let y = HEADER_HEIGHT + slot as i32 * ROW_HEIGHT;
            let v_pad = (ROW_HEIGHT - FONT_HEIGHT) / 2;
            let (fg, bg) = if row.active {
                (BinaryColor::Off, BinaryColor::On)
            } else {
                (BinaryColor::On, BinaryColor::Off)
            };
            fill_rect(display, 0, y, DISPLAY_WIDTH as u32, ROW_HEIGHT as u32, bg);
            text(display, row.label, 0, y + v_pad, fg);
            let x = DISPLAY_WIDTH - row.decorator.len() as i32 * FONT_WIDTH - 1;
            text(display, row.decorator, x, y + v_pad, fg);
        }
    }

    display.present();
}

/// Two-digit field cell with an outline box when the cursor is on it.
fn field<D: Screen>(display: &mut D, x: i32, y: i32, chars: usize, value: &str, boxed: bool) {
    text(display, value, x, y, BinaryColor::On);
    if boxed {
        outline_rect(
            display,
            x - 2,
            y - 3,
            (chars as i32 * FONT_WIDTH + 4) as u32,
            (FONT_HEIGHT + 4) as u32,
        );
    }
}

/// Render the date/time editor: date row then time row, the active
/// field boxed.
pub(crate) fn draw_clock<D: Screen>(display: &mut D, fields: &ClockFields, cursor: usize) {
    let _ = display.clear(BinaryColor::Off);
    fill_rect(display, 0, 3, DISPLAY_WIDTH as u32, 1, BinaryColor::On);

    let x1 = (DISPLAY_WIDTH - 10 * FONT_WIDTH) / 2;
    let x2 = x1 + 3 * FONT_WIDTH;
    let x3 = x2 + 3 * FONT_WIDTH;

    let mut buf = Line::new();

    text(display, "DATE:", 0, 8, BinaryColor::On);
    let _ = write!(buf, "{:02}", fields.day);
    field(display, x1, 20, 2, &buf, cursor == 0);
    buf.clear();
    let _ = write!(buf, "{:02}", fields.month);
    field(display, x2, 20, 2, &buf, cursor == 1);
    buf.clear();
    let _ = write!(buf, "{:04}", fields.year);
    field(display, x3, 20, 4, &buf, cursor == 2);
    buf.clear();

    text(display, "TIME:", 0, 35, BinaryColor::On);
    let _ = write!(buf, "{:02}", fields.hour);
    field(display, x1, 48, 2, &buf, cursor == 3);
    buf.clear();
    let _ = write!(buf, "{:02}", fields.minute);
    field(display, x2, 48, 2, &buf, cursor == 4);

    display.present();
}

/// Render the daily time-window editor: start row then end row.
pub(crate) fn draw_window<D: Screen>(display: &mut D, fields: &WindowFields, cursor: usize) {
    let _ = display.clear(BinaryColor::Off);
    fill_rect(display, 0, 3, DISPLAY_WIDTH as u32, 1, BinaryColor::On);

    let x1 = (DISPLAY_WIDTH - 5 * FONT_WIDTH) / 2;
    let x2 = x1 + 3 * FONT_WIDTH;

    let mut buf = Line::new();

    text(display, "START TIME:", 0, 8, BinaryColor::On);
    let _ = write!(buf, "{:02}", fields.start_hour);
    field(display, x1, 20, 2, &buf, cursor == 0);
    buf.clear();
    let _ = write!(buf, "{:02}", fields.start_minute);
    field(display, x2, 20, 2, &buf, cursor == 1);
    buf.clear();

    text(display, "END TIME:", 0, 35, BinaryColor::On);
    let _ = write!(buf, "{:02}", fields.end_hour);
    field(display, x1, 48, 2, &buf, cursor == 2);
    buf.clear();
    let _ = write!(buf, "{:02}", fields.end_minute);
    field(display, x2, 48, 2, &buf, cursor == 3);

    display.present();
}

/// Render the min/max temperature editor.
pub(crate) fn draw_range<D: Screen>(display: &mut D, fields: &RangeFields, cursor: usize) {
    let _ = display.clear(BinaryColor::Off);
    fill_rect(display, 0, 3, DISPLAY_WIDTH as u32, 1, BinaryColor::On);

    let x1 = (DISPLAY_WIDTH - 3 * FONT_WIDTH) / 2;

    let mut buf = Line::new();

    text(display, "MIN TEMPERATURE:", 0, 8, BinaryColor::On);
    let _ = write!(buf, "{:02}", fields.min);
    field(display, x1, 20, 3, &buf, cursor == 0);
    buf.clear();

    text(display, "MAX TEMPERATURE:", 0, 35, BinaryColor::On);
    let _ = write!(buf, "{:02}", fields.max);
    field(display, x1, 48, 3, &buf, cursor == 1);

    display.present();
}

/// Render an informational screen: framed, centered lines.
pub(crate) fn draw_info<D: Screen>(display: &mut D, lines: &InfoLines) {
    let _ = display.clear(BinaryColor::Off);
    outline_rect(
        display,
        0,
        0,
        DISPLAY_WIDTH as u32,
        DISPLAY_HEIGHT as u32,
    );
    for (i, line) in lines.iter().enumerate() {
        centered_text(display, line, 18 + i as i32 * ERROR_LINE_PITCH, BinaryColor::On);
    }
    display.present();
}

/// Render a word-wrapped error message, vertically centered.
pub(crate) fn draw_error<D: Screen>(display: &mut D, message: &str) {
    let _ = display.clear(BinaryColor::Off);
    outline_rect(
        display,
        0,
        0,
        DISPLAY_WIDTH as u32,
        DISPLAY_HEIGHT as u32,
    );

    let lines = wrap_message(message);
    let mid = DISPLAY_HEIGHT / 2 - FONT_HEIGHT / 2;
    let y0 = mid - (lines.len() as i32 / 2) * ERROR_LINE_PITCH;
    for (i, line) in lines.iter().enumerate() {
        centered_text(display, line, y0 + i as i32 * ERROR_LINE_PITCH, BinaryColor::On);
    }

    display.present();
}
