//! SSD1306 OLED display wrapper.

use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

use crate::menu::render::Screen;

/// Type alias for the concrete display driver.
///
/// Generic over the I2C implementation so callers pass in their HAL's
/// I2C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Display<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    let _ = display.init();
    display.clear_buffer();
    let _ = display.flush();
    display
}

impl<I2C> Screen for Display<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn present(&mut self) {
        let _ = self.flush();
    }
}
