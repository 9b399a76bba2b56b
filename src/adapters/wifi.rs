//! WiFi station-mode adapter.
//!
//! Implements [`ConnectivityPort`]: a non-blocking link state machine the
//! main loop polls every iteration.
//!
//! ```text
//!  Disconnected{retry_at} ──(now ≥ retry_at)──▶ Connecting{since, attempt}
//!        ▲                                          │            │
//!        │ (timeout: back off)                      │ associated │
//!        └──────────────────────────────────────────┘            ▼
//!        └──────────────(link lost: retry now)──────────── Connected
//! ```
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real driver calls via `esp_idf_svc::wifi::EspWifi`.
//! - **all other targets**: per-instance simulated access point for host tests.
//!
//! ## Reconnection policy
//!
//! A connect attempt that does not associate within the timeout is
//! abandoned and retried after an exponential backoff (2 s → 4 s → 8 s …
//! capped at 60 s).  Losing an established link retries immediately.

use core::fmt;
use std::net::Ipv4Addr;

use log::{info, warn};

#[cfg(target_os = "espidf")]
use esp_idf_svc::wifi::{AuthMethod, ClientConfiguration, Configuration, EspWifi};

// ───────────────────────────────────────────────────────────────
// Port trait
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityError {
    InvalidSsid,
    InvalidPassword,
    /// The driver refused to configure, start or connect.
    DriverFailed,
}

impl fmt::Display for ConnectivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)"),
            Self::DriverFailed => write!(f, "WiFi driver error"),
        }
    }
}

impl core::error::Error for ConnectivityError {}

pub trait ConnectivityPort {
    fn set_credentials(&mut self, ssid: &str, password: &str) -> Result<(), ConnectivityError>;
    /// Advance the state machine.  Never blocks.
    fn poll(&mut self, now_ms: u64) -> LinkState;
    fn is_connected(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Connection state
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Disconnected { retry_at_ms: u64 },
    Connecting { since_ms: u64, attempt: u32 },
    Connected,
}

const INITIAL_BACKOFF_MS: u64 = 2_000;
const MAX_BACKOFF_MS: u64 = 60_000;

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn validate_ssid(ssid: &str) -> Result<(), ConnectivityError> {
    if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(ConnectivityError::InvalidSsid);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ConnectivityError> {
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(ConnectivityError::InvalidPassword);
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// WiFi adapter
// ───────────────────────────────────────────────────────────────

pub struct WifiAdapter {
    state: LinkState,
    ssid: heapless::String<32>,
    password: heapless::String<64>,
    connect_timeout_ms: u64,
    backoff_ms: u64,
    attempt: u32,
    #[cfg(target_os = "espidf")]
    wifi: EspWifi<'static>,
    #[cfg(not(target_os = "espidf"))]
    sim_ap_reachable: bool,
    #[cfg(not(target_os = "espidf"))]
    sim_associated: bool,
}

impl WifiAdapter {
    #[cfg(target_os = "espidf")]
    pub fn new(wifi: EspWifi<'static>, connect_timeout_ms: u32) -> Self {
        Self::with_platform(connect_timeout_ms, wifi)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(connect_timeout_ms: u32) -> Self {
        Self::with_platform(connect_timeout_ms)
    }

    fn with_platform(connect_timeout_ms: u32, #[cfg(target_os = "espidf")] wifi: EspWifi<'static>) -> Self {
        Self {
            state: LinkState::Disconnected { retry_at_ms: 0 },
            ssid: heapless::String::new(),
            password: heapless::String::new(),
            connect_timeout_ms: u64::from(connect_timeout_ms),
            backoff_ms: INITIAL_BACKOFF_MS,
            attempt: 0,
            #[cfg(target_os = "espidf")]
            wifi,
            #[cfg(not(target_os = "espidf"))]
            sim_ap_reachable: true,
            #[cfg(not(target_os = "espidf"))]
            sim_associated: false,
        }
    }

    /// Current backoff applied to the next failed attempt.
    pub fn backoff_ms(&self) -> u64 {
        self.backoff_ms
    }

    /// Station address once associated.
    pub fn ip_address(&self) -> Option<Ipv4Addr> {
        if self.state != LinkState::Connected {
            return None;
        }
        self.platform_ip()
    }

    fn start_attempt(&mut self, now_ms: u64) {
        self.attempt = self.attempt.saturating_add(1);
        info!("WiFi: connecting to '{}' (attempt {})", self.ssid, self.attempt);
        match self.platform_connect() {
            Ok(()) => {
                self.state = LinkState::Connecting { since_ms: now_ms, attempt: self.attempt };
            }
            Err(e) => {
                warn!("WiFi: connect failed: {}", e);
                self.back_off(now_ms);
            }
        }
    }

    fn back_off(&mut self, now_ms: u64) {
        info!("WiFi: retry in {} ms", self.backoff_ms);
        self.state = LinkState::Disconnected { retry_at_ms: now_ms.saturating_add(self.backoff_ms) };
        self.backoff_ms = (self.backoff_ms * 2).min(MAX_BACKOFF_MS);
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_connect(&mut self) -> Result<(), ConnectivityError> {
        let auth_method = if self.password.is_empty() { AuthMethod::None } else { AuthMethod::WPA2Personal };
        let config = Configuration::Client(ClientConfiguration {
            ssid: self.ssid.as_str().try_into().map_err(|_| ConnectivityError::InvalidSsid)?,
            password: self.password.as_str().try_into().map_err(|_| ConnectivityError::InvalidPassword)?,
            auth_method,
            ..Default::default()
        });
        self.wifi.set_configuration(&config).map_err(|_| ConnectivityError::DriverFailed)?;
        if !self.wifi.is_started().unwrap_or(false) {
            self.wifi.start().map_err(|_| ConnectivityError::DriverFailed)?;
        }
        self.wifi.connect().map_err(|_| ConnectivityError::DriverFailed)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_connect(&mut self) -> Result<(), ConnectivityError> {
        self.sim_associated = self.sim_ap_reachable;
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_disconnect(&mut self) {
        if let Err(e) = self.wifi.disconnect() {
            warn!("WiFi: disconnect returned {:?}", e);
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_disconnect(&mut self) {
        self.sim_associated = false;
    }

    /// Associated and holding an address.
    #[cfg(target_os = "espidf")]
    fn platform_is_connected(&self) -> bool {
        self.wifi.is_connected().unwrap_or(false) && self.wifi.is_up().unwrap_or(false)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_is_connected(&self) -> bool {
        self.sim_associated
    }

    #[cfg(target_os = "espidf")]
    fn platform_ip(&self) -> Option<Ipv4Addr> {
        self.wifi.sta_netif().get_ip_info().ok().map(|info| info.ip)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_ip(&self) -> Option<Ipv4Addr> {
        Some(Ipv4Addr::new(192, 168, 4, 2))
    }

    // ── Simulation controls ───────────────────────────────────

    /// Whether the simulated AP accepts the next association.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set_ap_reachable(&mut self, reachable: bool) {
        self.sim_ap_reachable = reachable;
    }

    /// Drop an established association, as a beacon loss would.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_drop_link(&mut self) {
        self.sim_associated = false;
    }
}

// ───────────────────────────────────────────────────────────────
// ConnectivityPort
// ───────────────────────────────────────────────────────────────

impl ConnectivityPort for WifiAdapter {
    fn set_credentials(&mut self, ssid: &str, password: &str) -> Result<(), ConnectivityError> {
        validate_ssid(ssid)?;
        validate_password(password)?;
        self.ssid.clear();
        self.ssid.push_str(ssid).map_err(|_| ConnectivityError::InvalidSsid)?;
        self.password.clear();
        self.password.push_str(password).map_err(|_| ConnectivityError::InvalidPassword)?;
        info!("WiFi: credentials updated (SSID='{}')", self.ssid);
        Ok(())
    }

    fn poll(&mut self, now_ms: u64) -> LinkState {
        if self.ssid.is_empty() {
            return self.state;
        }
        match self.state {
            LinkState::Disconnected { retry_at_ms } => {
                if now_ms >= retry_at_ms {
                    self.start_attempt(now_ms);
                }
            }
            LinkState::Connecting { since_ms, attempt } => {
                if self.platform_is_connected() {
                    self.state = LinkState::Connected;
                    self.backoff_ms = INITIAL_BACKOFF_MS;
                    self.attempt = 0;
                    info!("WiFi: connected after {} attempt(s)", attempt);
                } else if now_ms.saturating_sub(since_ms) >= self.connect_timeout_ms {
                    warn!("WiFi: attempt {} timed out", attempt);
                    self.platform_disconnect();
                    self.back_off(now_ms);
                }
            }
            LinkState::Connected => {
                if !self.platform_is_connected() {
                    warn!("WiFi: connection lost, reconnecting");
                    self.state = LinkState::Disconnected { retry_at_ms: now_ms };
                    self.backoff_ms = INITIAL_BACKOFF_MS;
                    self.start_attempt(now_ms);
                }
            }
        }
        self.state
    }

    fn is_connected(&self) -> bool {
        self.state == LinkState::Connected
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
