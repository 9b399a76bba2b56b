//! One-shot peripheral initialisation and raw pin access.
//!
//! Configures ADC1 channels and GPIO directions with ESP-IDF sys calls.
//! Called once from the binary entry points before any service runs.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: raw `gpio_*` / `adc_oneshot_*` calls.
//! On host/test: a static pin-level bitmask and per-channel ADC codes that
//! tests and the simulator can inject.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, AtomicU64, Ordering};

// ── Error type ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    /// Pin or channel number outside what the chip exposes.
    InvalidPin(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::InvalidPin(pin) => write!(f, "GPIO{} does not exist", pin),
        }
    }
}

/// Highest GPIO number on the ESP32.
pub const MAX_GPIO: i32 = 39;
/// ADC1 exposes channels 0–7.
pub const ADC1_CHANNELS: usize = 8;

fn check_pin(pin: i32) -> Result<(), HwInitError> {
    if (0..=MAX_GPIO).contains(&pin) {
        Ok(())
    } else {
        Err(HwInitError::InvalidPin(pin))
    }
}

// ── Host simulation state ─────────────────────────────────────

/// Bit n = level of GPIOn.  Every line reads HIGH until something drives it.
#[cfg(not(target_os = "espidf"))]
static SIM_GPIO_LEVELS: AtomicU64 = AtomicU64::new(u64::MAX);

/// Mid-scale on every channel: an ACS712 at zero current.
#[cfg(not(target_os = "espidf"))]
static SIM_ADC1: [AtomicU16; ADC1_CHANNELS] = [const { AtomicU16::new(2048) }; ADC1_CHANNELS];

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_gpio(pin: i32, high: bool) {
    if check_pin(pin).is_err() {
        return;
    }
    let bit = 1u64 << pin;
    if high {
        SIM_GPIO_LEVELS.fetch_or(bit, Ordering::Relaxed);
    } else {
        SIM_GPIO_LEVELS.fetch_and(!bit, Ordering::Relaxed);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_gpio_level(pin: i32) -> bool {
    check_pin(pin).is_ok() && SIM_GPIO_LEVELS.load(Ordering::Relaxed) & (1u64 << pin) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_adc1(channel: u32, raw: u16) {
    if let Some(slot) = SIM_ADC1.get(channel as usize) {
        slot.store(raw, Ordering::Relaxed);
    }
}

// ── GPIO outputs ──────────────────────────────────────────────

/// Configure push-pull outputs, each driven to its initial level before
/// the function returns.
#[cfg(target_os = "espidf")]
pub fn init_outputs(pins: &[(i32, bool)]) -> Result<(), HwInitError> {
    for &(pin, initial_high) in pins {
        check_pin(pin)?;
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        // SAFETY: boot-time configuration from the main task only.
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
        gpio_write(pin, initial_high);
    }
    info!("hw_init: {} GPIO output(s) configured", pins.len());
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_outputs(pins: &[(i32, bool)]) -> Result<(), HwInitError> {
    for &(pin, initial_high) in pins {
        check_pin(pin)?;
        sim_set_gpio(pin, initial_high);
    }
    log::info!("hw_init(sim): {} output(s)", pins.len());
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: register write on a pin configured by init_outputs().
    unsafe { gpio_set_level(pin, u32::from(high)); }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) {
    sim_set_gpio(pin, high);
}

// ── GPIO inputs ───────────────────────────────────────────────

/// Configure plain inputs.  GPIO34–39 have no internal pull-ups, so pulls
/// are left to the sensor modules.
#[cfg(target_os = "espidf")]
pub fn init_inputs(pins: &[i32]) -> Result<(), HwInitError> {
    for &pin in pins {
        check_pin(pin)?;
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        // SAFETY: boot-time configuration from the main task only.
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
    }
    info!("hw_init: {} GPIO input(s) configured", pins.len());
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_inputs(pins: &[i32]) -> Result<(), HwInitError> {
    for &pin in pins {
        check_pin(pin)?;
    }
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: read-only register access.  Output pins are configured
    // INPUT_OUTPUT so their driven level reads back too.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(pin: i32) -> bool {
    sim_gpio_level(pin)
}

// ── ADC1 (oneshot) ────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// Create the ADC1 oneshot unit and configure `channels` for 12-bit reads
/// over the full 0–3.3 V range.
#[cfg(target_os = "espidf")]
pub fn init_adc(channels: &[u32]) -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is written once here, before any adc1_read().
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    for &channel in channels {
        if channel as usize >= ADC1_CHANNELS {
            return Err(HwInitError::InvalidPin(channel as i32));
        }
        // SAFETY: handle initialised above; main task only.
        let ret = unsafe { adc_oneshot_config_channel(ADC1_HANDLE, channel, &chan_cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }
    }
    info!("hw_init: ADC1 configured ({} channel(s))", channels.len());
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_adc(channels: &[u32]) -> Result<(), HwInitError> {
    for &channel in channels {
        if channel as usize >= ADC1_CHANNELS {
            return Err(HwInitError::InvalidPin(channel as i32));
        }
    }
    Ok(())
}

/// Raw 12-bit code.  A failed conversion reads as 0, which the current
/// sensor turns into a plausible full-scale negative current.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: handle written once by init_adc(); callers are serialised
    // by the station mutex.
    let ret = unsafe { adc_oneshot_read(ADC1_HANDLE, channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    raw.max(0) as u16
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(channel: u32) -> u16 {
    SIM_ADC1
        .get(channel as usize)
        .map_or(0, |slot| slot.load(Ordering::Relaxed))
}
