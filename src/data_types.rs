use crate::registers::Fault;
use crate::units::{ElectricCurrent, ElectricPotential, Ratio};

/// Boost mode hot temperature monitor threshold (BHOT).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BoostHotThreshold {
    /// VBHOT1, 34.75 % of REGN (default)
    Vbhot1 = 0b00,
    /// VBHOT0, 37.75 % of REGN
    Vbhot0 = 0b01,
    /// VBHOT2, 31.25 % of REGN
    Vbhot2 = 0b10,
    /// Boost mode thermal protection disabled
    Disabled = 0b11,
}

impl BoostHotThreshold {
    pub fn from_code(code: u8) -> Self {
        match code & 0b11 {
            0b00 => Self::Vbhot1,
            0b01 => Self::Vbhot0,
            0b10 => Self::Vbhot2,
            _ => Self::Disabled,
        }
    }
}

/// I2C watchdog timer setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum WatchdogTimer {
    Disabled = 0b00,
    Sec40 = 0b01,
    Sec80 = 0b10,
    Sec160 = 0b11,
}

impl WatchdogTimer {
    pub fn from_code(code: u8) -> Self {
        match code & 0b11 {
            0b00 => Self::Disabled,
            0b01 => Self::Sec40,
            0b10 => Self::Sec80,
            _ => Self::Sec160,
        }
    }

    /// Timeout in seconds, 0 when disabled.
    pub fn seconds(self) -> u16 {
        match self {
            Self::Disabled => 0,
            Self::Sec40 => 40,
            Self::Sec80 => 80,
            Self::Sec160 => 160,
        }
    }
}

/// Fast charge safety timer setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ChargeTimer {
    Hours5 = 0b00,
    Hours8 = 0b01,
    Hours12 = 0b10,
    Hours20 = 0b11,
}

impl ChargeTimer {
    pub fn from_code(code: u8) -> Self {
        match code & 0b11 {
            0b00 => Self::Hours5,
            0b01 => Self::Hours8,
            0b10 => Self::Hours12,
            _ => Self::Hours20,
        }
    }

    pub fn hours(self) -> u8 {
        match self {
            Self::Hours5 => 5,
            Self::Hours8 => 8,
            Self::Hours12 => 12,
            Self::Hours20 => 20,
        }
    }
}

/// Thermal regulation threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ThermalRegulation {
    Celsius60 = 0b00,
    Celsius80 = 0b01,
    Celsius100 = 0b10,
    Celsius120 = 0b11,
}

impl ThermalRegulation {
    pub fn from_code(code: u8) -> Self {
        match code & 0b11 {
            0b00 => Self::Celsius60,
            0b01 => Self::Celsius80,
            0b10 => Self::Celsius100,
            _ => Self::Celsius120,
        }
    }

    pub fn celsius(self) -> u8 {
        match self {
            Self::Celsius60 => 60,
            Self::Celsius80 => 80,
            Self::Celsius100 => 100,
            Self::Celsius120 => 120,
        }
    }
}

/// Charging status (CHRG_STAT).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChargeStatus {
    NotCharging,
    /// Battery below VBATLOWV
    PreCharge,
    FastCharging,
    ChargeDone,
}

impl ChargeStatus {
    pub fn from_code(code: u8) -> Self {
        match code & 0b11 {
            0b00 => Self::NotCharging,
            0b01 => Self::PreCharge,
            0b10 => Self::FastCharging,
            _ => Self::ChargeDone,
        }
    }
}

/// Input source type (VBUS_STAT).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VbusStatus {
    NoInput,
    UsbHostSdp,
    /// Adapter, 3.25 A
    Adapter,
    Otg,
    /// Code not documented for the BQ25896.
    Unknown(u8),
}

impl VbusStatus {
    pub fn from_code(code: u8) -> Self {
        match code & 0b111 {
            0b000 => Self::NoInput,
            0b001 => Self::UsbHostSdp,
            0b010 => Self::Adapter,
            0b111 => Self::Otg,
            other => Self::Unknown(other),
        }
    }
}

/// NTC fault status. Warm and cool are only reported in buck mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NtcFault {
    Normal,
    Warm,
    Cool,
    Cold,
    Hot,
    Unknown(u8),
}

impl NtcFault {
    pub fn from_code(code: u8) -> Self {
        match code & 0b111 {
            0b000 => Self::Normal,
            0b010 => Self::Warm,
            0b011 => Self::Cool,
            0b101 => Self::Cold,
            0b110 => Self::Hot,
            other => Self::Unknown(other),
        }
    }
}

/// Charge fault status (CHRG_FAULT).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChargeFault {
    Normal,
    /// VBUS > VACOV or VBAT < VBUS < VVBUSMIN
    InputFault,
    ThermalShutdown,
    SafetyTimerExpired,
}

impl ChargeFault {
    pub fn from_code(code: u8) -> Self {
        match code & 0b11 {
            0b00 => Self::Normal,
            0b01 => Self::InputFault,
            0b10 => Self::ThermalShutdown,
            _ => Self::SafetyTimerExpired,
        }
    }
}

/// Decoded FAULT register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Faults {
    pub watchdog_expired: bool,
    /// VBUS overloaded or OVP in OTG, or battery too low in boost mode.
    pub boost: bool,
    pub charge: ChargeFault,
    /// VBAT > VBATOVP
    pub battery_ovp: bool,
    pub ntc: NtcFault,
}

impl Faults {
    /// Returns `true` when no fault bit is set.
    pub fn is_clear(&self) -> bool {
        !self.watchdog_expired
            && !self.boost
            && !self.battery_ovp
            && self.charge == ChargeFault::Normal
            && self.ntc == NtcFault::Normal
    }
}

impl From<Fault> for Faults {
    fn from(reg: Fault) -> Self {
        Self {
            watchdog_expired: reg.watchdog_fault,
            boost: reg.boost_fault,
            charge: ChargeFault::from_code(reg.chrg_fault),
            battery_ovp: reg.bat_fault,
            ntc: NtcFault::from_code(reg.ntc_fault),
        }
    }
}

/// One pass over the ADC result registers.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Measurements {
    pub battery_voltage: ElectricPotential,
    pub system_voltage: ElectricPotential,
    pub vbus_voltage: ElectricPotential,
    /// Reads 0 while VBAT < VBATSHORT.
    pub charge_current: ElectricCurrent,
    /// TS pin voltage relative to REGN.
    pub ts_ratio: Ratio,
    pub vbus_good: bool,
    pub thermal_regulation: bool,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Measurements {
    fn format(&self, fmt: defmt::Formatter) {
        use uom::si::{electric_current::milliampere, electric_potential::millivolt, ratio::percent};

        defmt::write!(
            fmt,
            "VBAT={}mV VSYS={}mV VBUS={}mV ICHG={}mA TS={}% vbus_good={} therm={}",
            self.battery_voltage.get::<millivolt>(),
            self.system_voltage.get::<millivolt>(),
            self.vbus_voltage.get::<millivolt>(),
            self.charge_current.get::<milliampere>(),
            self.ts_ratio.get::<percent>(),
            self.vbus_good,
            self.thermal_regulation
        )
    }
}

/// Charging parameters applied in one call, see [`crate::Bq25896::apply_config`].
///
/// Currents in mA, voltages in mV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChargerConfig {
    pub input_current_limit_ma: u16,
    pub charge_current_ma: u16,
    pub precharge_current_ma: u16,
    pub termination_current_ma: u16,
    pub charge_voltage_mv: u16,
    pub min_system_voltage_mv: u16,
    pub boost_voltage_mv: u16,
    pub boost_current_limit_ma: u16,
    pub watchdog: WatchdogTimer,
    pub charge_timer: ChargeTimer,
    pub termination_enable: bool,
    pub charge_enable: bool,
}

impl Default for ChargerConfig {
    /// Power-on register defaults.
    fn default() -> Self {
        Self {
            input_current_limit_ma: 500,
            charge_current_ma: 2048,
            precharge_current_ma: 128,
            termination_current_ma: 256,
            charge_voltage_mv: 4208,
            min_system_voltage_mv: 3500,
            boost_voltage_mv: 4998,
            boost_current_limit_ma: 1400,
            watchdog: WatchdogTimer::Sec40,
            charge_timer: ChargeTimer::Hours12,
            termination_enable: true,
            charge_enable: true,
        }
    }
}
