//! Application context and menu wiring for the tank controller.
//!
//! `Context` is the single state object every menu callback reads and
//! mutates: the settings block, the three collaborators (RTC, network
//! sender, settings store) and the live sensor readings the host
//! updates between polling ticks. `Context::build_menu` wires the
//! whole screen tree once at startup; a wiring mistake fails there.

use core::fmt::Write as _;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::clock::Clock;
use crate::config::FONT_WIDTH;
use crate::error::Error;
use crate::menu::action::Visibility;
use crate::menu::editors::{ClockFields, RangeFields, WindowFields};
use crate::menu::node::{InfoLines, Line, Tree};
use crate::menu::render::{self, Screen};
use crate::menu::Menu;
use crate::net::ValueSink;
use crate::settings::{Settings, MODE_LABELS, RATE_LABELS};
use crate::store::SettingsStore;

static SEND_OPTIONS: [&str; 2] = ["-> SEND", "<- BACK"];
static YES_NO: [&str; 2] = ["-> YES", "<- NO"];

/// Application state and collaborators behind the menu callbacks.
pub struct Context<K: Clock, W: ValueSink, P: SettingsStore> {
    pub settings: Settings,
    pub clock: K,
    pub sink: W,
    pub store: P,

    /// Live readings; the host refreshes these between ticks.
    pub temperature: f32,
    pub ec: f32,
    pub ph: f32,

    /// Network link status shown on the WIFI info screen.
    pub link_up: bool,
    /// Address shown on the info screens.
    pub ip: &'static str,

    /// Outcome of the most recent send / persist / RTC write. The menu
    /// flow never blocks on these; the host may surface them.
    pub last_send_ok: Option<bool>,
    pub last_persist_ok: Option<bool>,
    pub last_clock_ok: Option<bool>,
}

impl<K: Clock, W: ValueSink, P: SettingsStore> Context<K, W, P> {
    /// Build a context, restoring any previously persisted settings.
    pub fn new(clock: K, sink: W, store: P) -> Self {
        let mut settings = Settings::new();
        settings.load_from(&store);
        Self {
            settings,
            clock,
            sink,
            store,
            temperature: 0.0,
            ec: 0.0,
            ph: 0.0,
            link_up: false,
            ip: "0.0.0.0",
            last_send_ok: None,
            last_persist_ok: None,
            last_clock_ok: None,
        }
    }

    // Relay switches

    pub fn lights_on(&self) -> bool {
        self.settings.lights
    }

    pub fn toggle_lights(&mut self) {
        self.settings.toggle_lights();
    }

    pub fn filter_on(&self) -> bool {
        self.settings.filter
    }

    pub fn toggle_filter(&mut self) {
        self.settings.toggle_filter();
    }

    pub fn heater_on(&self) -> bool {
        self.settings.heater
    }

    pub fn toggle_heater(&mut self) {
        self.settings.toggle_heater();
    }

    pub fn feeder_on(&self) -> bool {
        self.settings.feeder
    }

    pub fn toggle_feeder(&mut self) {
        self.settings.toggle_feeder();
    }

    // Sensors

    pub fn ec_on(&self) -> bool {
        self.settings.ec
    }

    pub fn toggle_ec(&mut self) {
        self.settings.toggle_ec();
    }

    pub fn ph_on(&self) -> bool {
        self.settings.ph
    }

    pub fn toggle_ph(&mut self) {
        self.settings.toggle_ph();
    }

    pub fn thermo_on(&self) -> bool {
        self.settings.thermo
    }

    pub fn toggle_thermo(&mut self) {
        self.settings.toggle_thermo();
    }

    pub fn ec_sending_on(&self) -> bool {
        self.settings.ec_sends()
    }

    pub fn toggle_ec_sending(&mut self) {
        self.settings.toggle_ec_sending();
    }

    pub fn ph_sending_on(&self) -> bool {
        self.settings.ph_sends()
    }

    pub fn toggle_ph_sending(&mut self) {
        self.settings.toggle_ph_sending();
    }

    pub fn thermo_sending_on(&self) -> bool {
        self.settings.thermo_sends()
    }

    pub fn toggle_thermo_sending(&mut self) {
        self.settings.toggle_thermo_sending();
    }

    // Automation

    pub fn heater_auto_on(&self) -> bool {
        self.settings.heater_auto
    }

    pub fn toggle_heater_auto(&mut self) {
        self.settings.toggle_heater_auto();
    }

    pub fn filter_auto_on(&self) -> bool {
        self.settings.filter_auto
    }

    pub fn toggle_filter_auto(&mut self) {
        self.settings.toggle_filter_auto();
    }

    // Mode and rate picks

    pub fn set_mode(&mut self, ordinal: usize) {
        self.settings.set_mode(ordinal);
    }

    pub fn set_ec_rate(&mut self, ordinal: usize) {
        self.settings.ec_rate = ordinal;
    }

    pub fn set_ph_rate(&mut self, ordinal: usize) {
        self.settings.ph_rate = ordinal;
    }

    pub fn set_thermo_rate(&mut self, ordinal: usize) {
        self.settings.thermo_rate = ordinal;
    }

    pub fn set_filter_rate(&mut self, ordinal: usize) {
        self.settings.filter_rate = ordinal;
    }

    // Confirmations

    pub fn send_ec(&mut self, yes: bool) {
        if yes {
            self.send_reading("Ec", self.ec);
        }
    }

    pub fn send_ph(&mut self, yes: bool) {
        if yes {
            self.send_reading("PH", self.ph);
        }
    }

    pub fn send_temperature(&mut self, yes: bool) {
        if yes {
            self.send_reading("Temp", self.temperature);
        }
    }

    pub fn set_connection(&mut self, yes: bool) {
        self.settings.connect_requested = yes;
    }

    pub fn set_recovery(&mut self, yes: bool) {
        self.settings.recovery = yes;
    }

    fn send_reading(&mut self, key: &str, reading: f32) {
        let timestamp = self.clock.now().unix_epoch();
        let mut value = Line::new();
        let _ = write!(value, "{:.2}", reading);
        self.last_send_ok = Some(self.sink.send(key, &value, timestamp));
    }

    // Editor seeds and commits

    pub fn clock_seed(&self) -> ClockFields {
        self.clock.now().into()
    }

    pub fn set_clock(&mut self, fields: ClockFields) {
        self.last_clock_ok = Some(self.clock.set(fields.into()));
    }

    pub fn commit_clock(&mut self, _fields: ClockFields) {
        // The RTC was already written; keep the stored image current.
        self.persist();
    }

    pub fn window_seed(&self) -> WindowFields {
        self.settings.window
    }

    pub fn commit_window(&mut self, fields: WindowFields) {
        self.settings.window = fields;
        self.persist();
    }

    pub fn range_seed(&self) -> RangeFields {
        self.settings.range
    }

    pub fn commit_range(&mut self, fields: RangeFields) {
        self.settings.range = fields;
        self.persist();
    }

    fn persist(&mut self) {
        let snapshot = self.settings.to_snapshot();
        self.last_persist_ok = Some(self.store.commit_snapshot(&snapshot));
    }

    // Info screens

    pub fn wifi_info(&self, lines: &mut InfoLines) {
        let mut line = Line::new();
        let _ = write!(line, "WIFI: {}", if self.link_up { "UP" } else { "DOWN" });
        let _ = lines.push(line);
        let mut ip = Line::new();
        let _ = ip.push_str(self.ip);
        let _ = lines.push(ip);
    }

    pub fn ec_monitor(&self, lines: &mut InfoLines) {
        let mut line = Line::new();
        let _ = write!(line, "EC: {:.0} uS/cm", self.ec);
        let _ = lines.push(line);
        let mut temp = Line::new();
        let _ = write!(temp, "TEMP: {:.1} C", self.temperature);
        let _ = lines.push(temp);
        let mut ip = Line::new();
        let _ = ip.push_str(self.ip);
        let _ = lines.push(ip);
    }

    pub fn ph_monitor(&self, lines: &mut InfoLines) {
        let mut line = Line::new();
        let _ = write!(line, "PH: {:.2}", self.ph);
        let _ = lines.push(line);
        let mut temp = Line::new();
        let _ = write!(temp, "TEMP: {:.1} C", self.temperature);
        let _ = lines.push(temp);
        let mut ip = Line::new();
        let _ = ip.push_str(self.ip);
        let _ = lines.push(ip);
    }

    /// Wire the complete screen tree. Called once at startup; any
    /// configuration mistake surfaces here as an `Error`.
    pub fn build_menu() -> Result<Menu<Self>, Error> {
        let mut tree: Tree<Self> = Tree::new();
        let root = tree.screen(None, "MENU", Visibility::Always)?;

        tree.options(root, "MODE", &MODE_LABELS, Self::set_mode, Visibility::Always)?;

        let relays = tree.screen(Some(root), "RELAYS", Visibility::Always)?;
        tree.toggle(
            relays,
            "LIGHTS",
            Self::lights_on,
            Self::toggle_lights,
            ("ON", "OFF"),
            Visibility::Always,
        )?;
        tree.toggle(
            relays,
            "FILTER",
            Self::filter_on,
            Self::toggle_filter,
            ("ON", "OFF"),
            Visibility::Always,
        )?;
        tree.toggle(
            relays,
            "HEATER",
            Self::heater_on,
            Self::toggle_heater,
            ("ON", "OFF"),
            Visibility::Always,
        )?;
        tree.toggle(
            relays,
            "FEEDER",
            Self::feeder_on,
            Self::toggle_feeder,
            ("ON", "OFF"),
            Visibility::Always,
        )?;
        tree.back(relays)?;

        let sensors = tree.screen(Some(root), "SENSORS", Visibility::Always)?;

        let ec = tree.screen(Some(sensors), "EC", Visibility::Always)?;
        tree.toggle(
            ec,
            "ACTIVATION",
            Self::ec_on,
            Self::toggle_ec,
            ("[x]", "[ ]"),
            Visibility::Always,
        )?;
        tree.info(ec, "MONITORING", Self::ec_monitor, Visibility::When(Self::ec_on))?;
        tree.toggle(
            ec,
            "WEB SERVER",
            Self::ec_sending_on,
            Self::toggle_ec_sending,
            ("[x]", "[ ]"),
            Visibility::When(Self::ec_on),
        )?;
        tree.options(
            ec,
            "WEB RATE",
            &RATE_LABELS,
            Self::set_ec_rate,
            Visibility::When(Self::ec_sending_on),
        )?;
        tree.confirm(
            ec,
            "SEND TO WEB",
            &SEND_OPTIONS,
            Self::send_ec,
            Visibility::When(Self::ec_sending_on),
        )?;
        tree.back(ec)?;

        let ph = tree.screen(Some(sensors), "PH", Visibility::Always)?;
        tree.toggle(
            ph,
            "ACTIVATION",
            Self::ph_on,
            Self::toggle_ph,
            ("[x]", "[ ]"),
            Visibility::Always,
        )?;
        tree.info(ph, "MONITORING", Self::ph_monitor, Visibility::When(Self::ph_on))?;
        tree.toggle(
            ph,
            "WEB SERVER",
            Self::ph_sending_on,
            Self::toggle_ph_sending,
            ("[x]", "[ ]"),
            Visibility::When(Self::ph_on),
        )?;
        tree.options(
            ph,
            "WEB RATE",
            &RATE_LABELS,
            Self::set_ph_rate,
            Visibility::When(Self::ph_sending_on),
        )?;
        tree.confirm(
            ph,
            "SEND TO WEB",
            &SEND_OPTIONS,
            Self::send_ph,
            Visibility::When(Self::ph_sending_on),
        )?;
        tree.back(ph)?;

        let thermo = tree.screen(Some(sensors), "THERMOMETER", Visibility::Always)?;
        tree.toggle(
            thermo,
            "ACTIVATION",
            Self::thermo_on,
            Self::toggle_thermo,
            ("[x]", "[ ]"),
            Visibility::Always,
        )?;
        tree.toggle(
            thermo,
            "WEB SERVER",
            Self::thermo_sending_on,
            Self::toggle_thermo_sending,
            ("[x]", "[ ]"),
            Visibility::When(Self::thermo_on),
        )?;
        tree.options(
            thermo,
            "WEB RATE",
            &RATE_LABELS,
            Self::set_thermo_rate,
            Visibility::When(Self::thermo_sending_on),
        )?;
        tree.confirm(
            thermo,
            "SEND TO WEB",
            &SEND_OPTIONS,
            Self::send_temperature,
            Visibility::When(Self::thermo_sending_on),
        )?;
        tree.back(thermo)?;
        tree.back(sensors)?;

        let setup = tree.screen(Some(root), "SETTINGS", Visibility::Always)?;

        let wifi = tree.screen(Some(setup), "WIFI", Visibility::Always)?;
        tree.info(wifi, "INFO", Self::wifi_info, Visibility::Always)?;
        tree.confirm(
            wifi,
            "CONNECTING",
            &YES_NO,
            Self::set_connection,
            Visibility::Always,
        )?;
        tree.back(wifi)?;

        tree.clock_editor(
            setup,
            "DATE/TIME",
            Self::clock_seed,
            Self::set_clock,
            Self::commit_clock,
            Visibility::Always,
        )?;
        tree.window_editor(
            setup,
            "LIGHT TIMER",
            Self::window_seed,
            Self::commit_window,
            Visibility::Always,
        )?;

        let heater_auto = tree.screen(Some(setup), "HEATER AUTO", Visibility::Always)?;
        tree.toggle(
            heater_auto,
            "ACTIVATION",
            Self::heater_auto_on,
            Self::toggle_heater_auto,
            ("[x]", "[ ]"),
            Visibility::Always,
        )?;
        tree.range_editor(
            heater_auto,
            "SETTING",
            Self::range_seed,
            Self::commit_range,
            Visibility::When(Self::heater_auto_on),
        )?;
        tree.back(heater_auto)?;

        let filter_auto = tree.screen(Some(setup), "FILTER AUTO", Visibility::Always)?;
        tree.toggle(
            filter_auto,
            "ACTIVATION",
            Self::filter_auto_on,
            Self::toggle_filter_auto,
            ("[x]", "[ ]"),
            Visibility::Always,
        )?;
        tree.options(
            filter_auto,
            "RATE",
            &RATE_LABELS,
            Self::set_filter_rate,
            Visibility::When(Self::filter_auto_on),
        )?;
        tree.back(filter_auto)?;

        tree.confirm(setup, "RECOVERY", &YES_NO, Self::set_recovery, Visibility::Always)?;
        tree.back(setup)?;

        tree.back(root)?;

        Menu::new(tree, root)
    }
}

/// Render the idle status screen the host shows while the menu is
/// dismissed: framed time, current readings, relay indicators.
pub fn draw_status<K, W, P, D>(ctx: &Context<K, W, P>, display: &mut D)
where
    K: Clock,
    W: ValueSink,
    P: SettingsStore,
    D: Screen,
{
    let _ = display.clear(BinaryColor::Off);

    let now = ctx.clock.now();
    let mut line = Line::new();
    let _ = write!(line, "{:02}:{:02}", now.hour, now.minute);
    render::outline_rect(display, 25, 2, 75, 14);
    render::centered_text(display, &line, 5, BinaryColor::On);

    line.clear();
    let _ = write!(line, "TEMP: {:.1} C", ctx.temperature);
    render::text(display, &line, 0, 23, BinaryColor::On);
    line.clear();
    let _ = write!(line, "EC: {:.0} uS/cm", ctx.ec);
    render::text(display, &line, 0, 33, BinaryColor::On);
    line.clear();
    let _ = write!(line, "PH: {:.2}", ctx.ph);
    render::text(display, &line, 0, 43, BinaryColor::On);

    // Relay indicators: filled box while the relay is driven.
    static DIGITS: [&str; 4] = ["1", "2", "3", "4"];
    for (index, on) in ctx.settings.relay_states().iter().enumerate() {
        let x = 70 + index as i32 * 14;
        if *on {
            render::fill_rect(display, x, 52, 12, 12, BinaryColor::On);
            render::text(display, DIGITS[index], x + FONT_WIDTH / 2, 53, BinaryColor::Off);
        } else {
            render::outline_rect(display, x, 52, 12, 12);
            render::text(display, DIGITS[index], x + FONT_WIDTH / 2, 53, BinaryColor::On);
        }
    }

    display.present();
}
