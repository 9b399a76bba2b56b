//! HD44780 16x2 character LCD behind a PCF8574 I²C backpack.
//!
//! The backpack maps its eight outputs onto the LCD as
//! `[D7 D6 D5 D4] [BL EN RW RS]`, so every LCD byte goes out as two
//! 4-bit nibbles, each clocked by an EN high→low strobe.  RW is tied low;
//! the driver never reads the display.
//!
//! Generic over `embedded_hal` 1.0 blocking I²C and delay traits so the
//! same code drives `esp_idf_hal::i2c::I2cDriver` on target and a recording
//! bus in tests.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

/// PCF8574 output bits.
pub mod pcf8574_bits {
    pub const RS: u8 = 0x01;
    pub const EN: u8 = 0x04;
    pub const BACKLIGHT: u8 = 0x08;
}

/// HD44780 instruction set (the subset used here).
pub mod commands {
    pub const CLEAR_DISPLAY: u8 = 0x01;
    pub const ENTRY_MODE_SET: u8 = 0x04;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const FUNCTION_SET: u8 = 0x20;
    pub const SET_DDRAM_ADDR: u8 = 0x80;

    pub const ENTRY_LEFT: u8 = 0x02;
    pub const DISPLAY_ON: u8 = 0x04;
    pub const TWO_LINE: u8 = 0x08;
}

pub const COLUMNS: usize = 16;
pub const ROWS: usize = 2;

/// DDRAM start address of each row.
const ROW_OFFSETS: [u8; ROWS] = [0x00, 0x40];

pub struct Lcd1602<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    backlight_on: bool,
}

impl<I2C: I2c, D: DelayNs> Lcd1602<I2C, D> {
    pub fn new(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            backlight_on: true,
        }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// 4-bit initialisation by instruction (HD44780 datasheet, figure 24).
    pub fn init(&mut self) -> Result<(), I2C::Error> {
        self.delay.delay_ms(50);

        // Three 8-bit "function set" nibbles force a known state whatever
        // mode the controller powered up in.
        self.send_nibble(0x03, false)?;
        self.delay.delay_ms(5);
        self.send_nibble(0x03, false)?;
        self.delay.delay_ms(1);
        self.send_nibble(0x03, false)?;
        self.delay.delay_ms(1);
        self.send_nibble(0x02, false)?;
        self.delay.delay_ms(1);

        self.command(commands::FUNCTION_SET | commands::TWO_LINE)?;
        self.command(commands::DISPLAY_CONTROL | commands::DISPLAY_ON)?;
        self.clear()?;
        self.command(commands::ENTRY_MODE_SET | commands::ENTRY_LEFT)?;
        log::info!("LCD1602 ready at 0x{:02x}", self.address);
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), I2C::Error> {
        self.send_byte(commands::CLEAR_DISPLAY, false)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    /// Out-of-range positions are clamped to the last row / column.
    pub fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), I2C::Error> {
        let row = (row as usize).min(ROWS - 1);
        let col = col.min(COLUMNS as u8 - 1);
        self.command(commands::SET_DDRAM_ADDR | (ROW_OFFSETS[row] + col))
    }

    /// Write text at the cursor.  Non-ASCII characters print as `?`.
    pub fn print(&mut self, text: &str) -> Result<(), I2C::Error> {
        for ch in text.chars() {
            let byte = if ch.is_ascii() { ch as u8 } else { b'?' };
            self.send_byte(byte, true)?;
            self.delay.delay_us(50);
        }
        Ok(())
    }

    pub fn print_at(&mut self, row: u8, col: u8, text: &str) -> Result<(), I2C::Error> {
        self.set_cursor(row, col)?;
        self.print(text)
    }

    pub fn set_backlight(&mut self, on: bool) -> Result<(), I2C::Error> {
        self.backlight_on = on;
        self.write_raw(self.control_bits(false))
    }

    fn command(&mut self, cmd: u8) -> Result<(), I2C::Error> {
        self.send_byte(cmd, false)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn send_byte(&mut self, value: u8, rs: bool) -> Result<(), I2C::Error> {
        self.send_nibble(value >> 4, rs)?;
        self.send_nibble(value & 0x0F, rs)
    }

    /// Data is latched on the falling edge of EN.
    fn send_nibble(&mut self, nibble: u8, rs: bool) -> Result<(), I2C::Error> {
        let byte = ((nibble & 0x0F) << 4) | self.control_bits(rs);
        self.write_raw(byte | pcf8574_bits::EN)?;
        self.delay.delay_us(1);
        self.write_raw(byte)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn control_bits(&self, rs: bool) -> u8 {
        let mut bits = 0;
        if rs {
            bits |= pcf8574_bits::RS;
        }
        if self.backlight_on {
            bits |= pcf8574_bits::BACKLIGHT;
        }
        bits
    }

    fn write_raw(&mut self, byte: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[byte])
    }
}
