//! Multi-field value editors: calendar date/time, daily time window,
//! and min/max temperature range.
//!
//! Each editor keeps one value per editable field plus a cursor naming
//! the active field. Panning moves the cursor (wrapping across the
//! field count); navigating steps the active field's value inside that
//! field's own range. Pressing select resolves the edit into either a
//! commit carrying the field snapshot or, for the range editor, a
//! validation error.

/// Calendar fields edited by the date/time screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockFields {
    pub day: u8,
    pub month: u8,
    pub year: u16,
    pub hour: u8,
    pub minute: u8,
}

impl ClockFields {
    /// Fallback seed when no clock reading is available.
    pub const fn baseline() -> Self {
        Self {
            day: 1,
            month: 1,
            year: 2025,
            hour: 0,
            minute: 0,
        }
    }
}

/// Daily on/off window fields (start and end, hours and minutes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WindowFields {
    pub start_hour: u8,
    pub start_minute: u8,
    pub end_hour: u8,
    pub end_minute: u8,
}

/// Temperature bounds edited by the heater screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RangeFields {
    pub min: i16,
    pub max: i16,
}

/// True for leap years under the Gregorian rule.
pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Days in the given month, leap-aware.
pub fn days_in_month(month: u8, year: u16) -> u8 {
    match month {
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Step `value` by one inside `[0, max)`, wrapping at both ends.
fn wrap_step(value: u8, max: u8, delta: i32) -> u8 {
    if delta > 0 {
        if value + 1 >= max {
            0
        } else {
            value + 1
        }
    } else if value == 0 {
        max - 1
    } else {
        value - 1
    }
}

/// Step a one-based value inside `[1, max]`, wrapping at both ends.
fn wrap_step_one_based(value: u8, max: u8, delta: i32) -> u8 {
    if delta > 0 {
        if value >= max {
            1
        } else {
            value + 1
        }
    } else if value <= 1 {
        max
    } else {
        value - 1
    }
}

/// Date/time editor; committing sets the RTC immediately.
pub struct ClockEditor<C> {
    pub fields: ClockFields,
    pub cursor: usize,
    /// Reads the current calendar time to seed the fields on entry.
    pub load: fn(&C) -> ClockFields,
    /// Applied to the RTC as soon as the edit is accepted.
    pub set_clock: fn(&mut C, ClockFields),
    /// Deferred commit carried by the confirmation row.
    pub commit: fn(&mut C, ClockFields),
}

impl<C> ClockEditor<C> {
    pub const FIELDS: usize = 5;

    /// Re-seed from the context; called when the screen is entered.
    pub fn seed(&mut self, ctx: &C) {
        self.fields = (self.load)(ctx);
        self.cursor = 0;
    }

    /// Move the active-field cursor with wrap.
    pub fn shift_cursor(&mut self, delta: i32) {
        self.cursor = step_cursor(self.cursor, Self::FIELDS, delta);
    }

    /// Step the active field's value inside its range.
    pub fn step_value(&mut self, delta: i32) {
        let f = &mut self.fields;
        match self.cursor {
            0 => f.day = wrap_step_one_based(f.day, days_in_month(f.month, f.year), delta),
            1 => {
                f.month = wrap_step_one_based(f.month, 12, delta);
                // The new month may hold fewer days than the old one.
                let max = days_in_month(f.month, f.year);
                if f.day > max {
                    f.day = max;
                }
            }
            2 => {
                f.year = if delta > 0 {
                    f.year.saturating_add(1)
                } else {
                    f.year.saturating_sub(1)
                };
                let max = days_in_month(f.month, f.year);
                if f.day > max {
                    f.day = max;
                }
            }
            3 => f.hour = wrap_step(f.hour, 24, delta),
            _ => f.minute = wrap_step(f.minute, 60, delta),
        }
    }
}

/// Daily time-window editor; commit is deferred to the confirmation row.
pub struct WindowEditor<C> {
    pub fields: WindowFields,
    pub cursor: usize,
    pub load: fn(&C) -> WindowFields,
    pub commit: fn(&mut C, WindowFields),
}

impl<C> WindowEditor<C> {
    pub const FIELDS: usize = 4;

    pub fn seed(&mut self, ctx: &C) {
        self.fields = (self.load)(ctx);
        self.cursor = 0;
    }

    pub fn shift_cursor(&mut self, delta: i32) {
        self.cursor = step_cursor(self.cursor, Self::FIELDS, delta);
    }

    pub fn step_value(&mut self, delta: i32) {
        let f = &mut self.fields;
        match self.cursor {
            0 => f.start_hour = wrap_step(f.start_hour, 24, delta),
            1 => f.start_minute = wrap_step(f.start_minute, 60, delta),
            2 => f.end_hour = wrap_step(f.end_hour, 24, delta),
            _ => f.end_minute = wrap_step(f.end_minute, 60, delta),
        }
    }
}

/// What a range edit resolves to when the operator accepts it.
#[derive(Debug, PartialEq, Eq)]
pub enum RangeOutcome {
    /// Bounds are ordered; commit this snapshot.
    Commit(RangeFields),
    /// Bounds are not ordered; show this message instead.
    Invalid(&'static str),
}

/// Min/max temperature editor with accept-time validation.
pub struct RangeEditor<C> {
    pub fields: RangeFields,
    pub cursor: usize,
    pub load: fn(&C) -> RangeFields,
    pub commit: fn(&mut C, RangeFields),
}

impl<C> RangeEditor<C> {
    pub const FIELDS: usize = 2;

    pub fn seed(&mut self, ctx: &C) {
        self.fields = (self.load)(ctx);
        self.cursor = 0;
    }

    pub fn shift_cursor(&mut self, delta: i32) {
        self.cursor = step_cursor(self.cursor, Self::FIELDS, delta);
    }

    /// Temperature bounds step without wrapping or clamping.
    pub fn step_value(&mut self, delta: i32) {
        let step = if delta > 0 { 1 } else { -1 };
        match self.cursor {
            0 => self.fields.min = self.fields.min.saturating_add(step),
            _ => self.fields.max = self.fields.max.saturating_add(step),
        }
    }

    /// Validate the bounds; the minimum must lie strictly below the
    /// maximum for the committed window to be usable.
    pub fn resolve(&self) -> RangeOutcome {
        if self.fields.min >= self.fields.max {
            RangeOutcome::Invalid("Max temperature must be above min temperature")
        } else {
            RangeOutcome::Commit(self.fields)
        }
    }
}

/// Commit deferred from an editor to its synthetic confirmation row.
pub enum Pending<C> {
    Clock(fn(&mut C, ClockFields), ClockFields),
    Window(fn(&mut C, WindowFields), WindowFields),
    Range(fn(&mut C, RangeFields), RangeFields),
}

impl<C> Pending<C> {
    /// Run the stored commit with its bound snapshot.
    pub fn run(&self, ctx: &mut C) {
        match self {
            Pending::Clock(f, v) => f(ctx, *v),
            Pending::Window(f, v) => f(ctx, *v),
            Pending::Range(f, v) => f(ctx, *v),
        }
    }
}

fn step_cursor(cursor: usize, count: usize, delta: i32) -> usize {
    if delta > 0 {
        if cursor + 1 >= count {
            0
        } else {
            cursor + 1
        }
    } else if cursor == 0 {
        count - 1
    } else {
        cursor - 1
    }
}
