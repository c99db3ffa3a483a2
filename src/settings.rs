//! Operator settings: relay switches, sensor activation, automation
//! parameters, and the operating mode with its shadow state.
//!
//! Maintenance mode needs to silence every automated process without
//! losing the operator's configuration. Entering it snapshots each
//! automation flag into a shadow copy and forces the live flag off;
//! toggling a flag while in maintenance updates the live flag *and*
//! its shadow, so returning to automatic restores the operator's
//! latest choice, not the pre-maintenance state.

use crate::menu::editors::{RangeFields, WindowFields};
use crate::store::{SettingsStore, Snapshot, Value};

/// Operating modes, in the order the mode screen lists them.
pub static MODE_LABELS: [&str; 3] = ["AUTO", "MAINTENANCE", "STAND BY"];

/// Send/filter rate choices (hours), in menu order.
pub static RATE_LABELS: [&str; 8] = ["1", "2", "3", "4", "6", "8", "12", "24"];

/// Rate in hours for a rate-screen ordinal.
pub fn rate_hours(ordinal: usize) -> u8 {
    const HOURS: [u8; 8] = [1, 2, 3, 4, 6, 8, 12, 24];
    HOURS[ordinal.min(HOURS.len() - 1)]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Auto,
    Maintenance,
    StandBy,
}

/// Automation flags remembered across a maintenance pass.
#[derive(Clone, Copy, Default)]
struct Shadow {
    lights: bool,
    filter: bool,
    heater: bool,
    feeder: bool,
    ec: bool,
    ph: bool,
    thermo: bool,
    ec_sending: bool,
    ph_sending: bool,
    thermo_sending: bool,
}

/// The whole operator-editable configuration block.
pub struct Settings {
    pub mode: Mode,

    // Relay switches.
    pub lights: bool,
    pub filter: bool,
    pub heater: bool,
    pub feeder: bool,

    // Sensor activation and per-sensor web reporting.
    pub ec: bool,
    pub ph: bool,
    pub thermo: bool,
    pub ec_sending: bool,
    pub ph_sending: bool,
    pub thermo_sending: bool,

    // Automated processes.
    pub heater_auto: bool,
    pub filter_auto: bool,

    // Rate-screen ordinals (see RATE_LABELS).
    pub ec_rate: usize,
    pub ph_rate: usize,
    pub thermo_rate: usize,
    pub filter_rate: usize,

    /// Daily light on/off window.
    pub window: WindowFields,

    /// Heater regulation bounds.
    pub range: RangeFields,

    pub recovery: bool,
    pub connect_requested: bool,

    shadow: Shadow,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::Auto,
            lights: false,
            filter: false,
            heater: false,
            feeder: false,
            ec: false,
            ph: false,
            thermo: false,
            ec_sending: false,
            ph_sending: false,
            thermo_sending: false,
            heater_auto: false,
            filter_auto: false,
            ec_rate: 0,
            ph_rate: 0,
            thermo_rate: 0,
            filter_rate: 0,
            window: WindowFields::default(),
            range: RangeFields::default(),
            recovery: false,
            connect_requested: false,
            shadow: Shadow::default(),
        }
    }
}

macro_rules! toggle_with_shadow {
    ($name:ident, $field:ident) => {
        pub fn $name(&mut self) {
            self.$field = !self.$field;
            self.shadow.$field = self.$field;
        }
    };
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    toggle_with_shadow!(toggle_lights, lights);
    toggle_with_shadow!(toggle_filter, filter);
    toggle_with_shadow!(toggle_heater, heater);
    toggle_with_shadow!(toggle_feeder, feeder);
    toggle_with_shadow!(toggle_ec, ec);
    toggle_with_shadow!(toggle_ph, ph);
    toggle_with_shadow!(toggle_thermo, thermo);
    toggle_with_shadow!(toggle_ec_sending, ec_sending);
    toggle_with_shadow!(toggle_ph_sending, ph_sending);
    toggle_with_shadow!(toggle_thermo_sending, thermo_sending);

    pub fn toggle_heater_auto(&mut self) {
        self.heater_auto = !self.heater_auto;
    }

    pub fn toggle_filter_auto(&mut self) {
        self.filter_auto = !self.filter_auto;
    }

    /// A sensor reports to the web only while it is also sampling.
    pub fn ec_sends(&self) -> bool {
        self.ec_sending && self.ec
    }

    pub fn ph_sends(&self) -> bool {
        self.ph_sending && self.ph
    }

    pub fn thermo_sends(&self) -> bool {
        self.thermo_sending && self.thermo
    }

    /// Relay states in panel order: lights, filter, heater, feeder.
    pub fn relay_states(&self) -> [bool; 4] {
        [self.lights, self.filter, self.heater, self.feeder]
    }

    /// Apply the mode screen's pick.
    pub fn set_mode(&mut self, ordinal: usize) {
        match ordinal {
            0 => self.resume_auto(),
            1 => self.enter_maintenance(),
            _ => self.mode = Mode::StandBy,
        }
    }

    fn enter_maintenance(&mut self) {
        self.shadow = Shadow {
            lights: self.lights,
            filter: self.filter,
            heater: self.heater,
            feeder: self.feeder,
            ec: self.ec,
            ph: self.ph,
            thermo: self.thermo,
            ec_sending: self.ec_sending,
            ph_sending: self.ph_sending,
            thermo_sending: self.thermo_sending,
        };
        self.lights = false;
        self.filter = false;
        self.heater = false;
        self.feeder = false;
        self.ec = false;
        self.ph = false;
        self.thermo = false;
        self.ec_sending = false;
        self.ph_sending = false;
        self.thermo_sending = false;
        self.mode = Mode::Maintenance;
    }

    fn resume_auto(&mut self) {
        self.lights = self.shadow.lights;
        self.filter = self.shadow.filter;
        self.heater = self.shadow.heater;
        self.feeder = self.shadow.feeder;
        self.ec = self.shadow.ec;
        self.ph = self.shadow.ph;
        self.thermo = self.shadow.thermo;
        self.ec_sending = self.shadow.ec_sending;
        self.ph_sending = self.shadow.ph_sending;
        self.thermo_sending = self.shadow.thermo_sending;
        self.mode = Mode::Auto;
    }

    /// Image the settings as a flat snapshot for persistence.
    pub fn to_snapshot(&self) -> Snapshot {
        let mut snap = Snapshot::new();
        let _ = snap.put("autoEnabled", Value::Bool(self.mode == Mode::Auto));
        let _ = snap.put("manteinEnabled", Value::Bool(self.mode == Mode::Maintenance));
        let _ = snap.put("standBy", Value::Bool(self.mode == Mode::StandBy));
        let _ = snap.put("onOffLightAuto", Value::Bool(self.lights));
        let _ = snap.put("onOffFilter", Value::Bool(self.filter));
        let _ = snap.put("onOffHeater", Value::Bool(self.heater));
        let _ = snap.put("onOffFeeder", Value::Bool(self.feeder));
        let _ = snap.put("onOffEC", Value::Bool(self.ec));
        let _ = snap.put("onOffPH", Value::Bool(self.ph));
        let _ = snap.put("onOffTemperature", Value::Bool(self.thermo));
        let _ = snap.put("onOffECSending", Value::Bool(self.ec_sending));
        let _ = snap.put("onOffPhSending", Value::Bool(self.ph_sending));
        let _ = snap.put("onOffTemperatureSending", Value::Bool(self.thermo_sending));
        let _ = snap.put("onOffHeaterAuto", Value::Bool(self.heater_auto));
        let _ = snap.put("onOffFilterAuto", Value::Bool(self.filter_auto));
        let _ = snap.put("freqUpdateWebEC", Value::Int(self.ec_rate as i32));
        let _ = snap.put("freqUpdateWebPH", Value::Int(self.ph_rate as i32));
        let _ = snap.put("freqUpdateWebTemperature", Value::Int(self.thermo_rate as i32));
        let _ = snap.put("freqFilter", Value::Int(self.filter_rate as i32));
        let _ = snap.put("startHour", Value::Int(i32::from(self.window.start_hour)));
        let _ = snap.put("startMinutes", Value::Int(i32::from(self.window.start_minute)));
        let _ = snap.put("endHour", Value::Int(i32::from(self.window.end_hour)));
        let _ = snap.put("endMinutes", Value::Int(i32::from(self.window.end_minute)));
        let _ = snap.put("tempMin", Value::Int(i32::from(self.range.min)));
        let _ = snap.put("tempMax", Value::Int(i32::from(self.range.max)));
        let _ = snap.put("onOffRecovery", Value::Bool(self.recovery));
        snap
    }

    /// Overwrite from a persisted snapshot; unknown fields are skipped,
    /// missing fields keep their current value.
    pub fn apply(&mut self, snap: &Snapshot) {
        for (name, value) in snap.iter() {
            self.apply_field(name, *value);
        }
        // Shadows start aligned with the restored live flags.
        self.shadow = Shadow {
            lights: self.lights,
            filter: self.filter,
            heater: self.heater,
            feeder: self.feeder,
            ec: self.ec,
            ph: self.ph,
            thermo: self.thermo,
            ec_sending: self.ec_sending,
            ph_sending: self.ph_sending,
            thermo_sending: self.thermo_sending,
        };
    }

    /// Restore from a store, field by field.
    pub fn load_from<P: SettingsStore>(&mut self, store: &P) {
        let keys = self.to_snapshot();
        let mut restored = Snapshot::new();
        for (name, _) in keys.iter() {
            if let Some(value) = store.get_field(name) {
                let _ = restored.put(name, value);
            }
        }
        self.apply(&restored);
    }

    fn apply_field(&mut self, name: &str, value: Value) {
        match (name, value) {
            ("manteinEnabled", Value::Bool(true)) => self.mode = Mode::Maintenance,
            ("standBy", Value::Bool(true)) => self.mode = Mode::StandBy,
            ("autoEnabled", Value::Bool(true)) => self.mode = Mode::Auto,
            ("autoEnabled" | "manteinEnabled" | "standBy", _) => {}
            ("onOffLightAuto", Value::Bool(v)) => self.lights = v,
            ("onOffFilter", Value::Bool(v)) => self.filter = v,
            ("onOffHeater", Value::Bool(v)) => self.heater = v,
            ("onOffFeeder", Value::Bool(v)) => self.feeder = v,
            ("onOffEC", Value::Bool(v)) => self.ec = v,
            ("onOffPH", Value::Bool(v)) => self.ph = v,
            ("onOffTemperature", Value::Bool(v)) => self.thermo = v,
            ("onOffECSending", Value::Bool(v)) => self.ec_sending = v,
            ("onOffPhSending", Value::Bool(v)) => self.ph_sending = v,
            ("onOffTemperatureSending", Value::Bool(v)) => self.thermo_sending = v,
            ("onOffHeaterAuto", Value::Bool(v)) => self.heater_auto = v,
            ("onOffFilterAuto", Value::Bool(v)) => self.filter_auto = v,
            ("freqUpdateWebEC", Value::Int(v)) => self.ec_rate = clamp_rate(v),
            ("freqUpdateWebPH", Value::Int(v)) => self.ph_rate = clamp_rate(v),
            ("freqUpdateWebTemperature", Value::Int(v)) => self.thermo_rate = clamp_rate(v),
            ("freqFilter", Value::Int(v)) => self.filter_rate = clamp_rate(v),
            ("startHour", Value::Int(v)) => self.window.start_hour = clamp_u8(v, 23),
            ("startMinutes", Value::Int(v)) => self.window.start_minute = clamp_u8(v, 59),
            ("endHour", Value::Int(v)) => self.window.end_hour = clamp_u8(v, 23),
            ("endMinutes", Value::Int(v)) => self.window.end_minute = clamp_u8(v, 59),
            ("tempMin", Value::Int(v)) => self.range.min = v.clamp(-99, 99) as i16,
            ("tempMax", Value::Int(v)) => self.range.max = v.clamp(-99, 99) as i16,
            ("onOffRecovery", Value::Bool(v)) => self.recovery = v,
            _ => {}
        }
    }
}

fn clamp_rate(v: i32) -> usize {
    (v.max(0) as usize).min(RATE_LABELS.len() - 1)
}

fn clamp_u8(v: i32, max: u8) -> u8 {
    v.clamp(0, i32::from(max)) as u8
}
