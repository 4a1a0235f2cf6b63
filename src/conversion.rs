//! Raw field codes to physical units and back.

use crate::registers::{fields, Field};

/// How a field's raw code maps to its physical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Law {
    /// `value = offset + code * num / den`
    Affine { offset: u16, num: u16, den: u16 },
    /// `value = table[code]`; codes past the end of the table are reserved.
    Lookup(&'static [u16]),
}

/// A numeric field together with its conversion law and legal input domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Quantity {
    pub field: Field,
    pub law: Law,
    /// Smallest accepted physical value (inclusive).
    pub min: u16,
    /// Largest accepted physical value (inclusive).
    pub max: u16,
}

/// A physical value outside a field's legal domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RangeError {
    pub field: &'static str,
    pub value: u16,
}

impl Quantity {
    const fn affine(field: Field, offset: u16, step: u16, min: u16, max: u16) -> Self {
        Self {
            field,
            law: Law::Affine {
                offset,
                num: step,
                den: 1,
            },
            min,
            max,
        }
    }

    /// Converts a physical value into the raw field code.
    ///
    /// Values between two steps round to the nearest one. Values outside
    /// `min..=max` are rejected, never clamped.
    pub fn encode(&self, value: u16) -> Result<u8, RangeError> {
        if value < self.min || value > self.max {
            return Err(RangeError {
                field: self.field.name,
                value,
            });
        }

        let code = match self.law {
            Law::Affine { offset, num, den } => {
                let delta = u32::from(value.saturating_sub(offset)) * u32::from(den);
                let step = u32::from(num);
                (delta + step / 2) / step
            }
            Law::Lookup(table) => nearest_entry(table, value) as u32,
        };

        if code > u32::from(self.field.max_code()) {
            return Err(RangeError {
                field: self.field.name,
                value,
            });
        }
        Ok(code as u8)
    }

    /// Converts a raw field code into the physical value.
    ///
    /// Never fails. Codes outside the documented domain still decode with the
    /// same law; reserved lookup codes decode to 0.
    pub fn decode(&self, code: u8) -> u16 {
        let code = code & self.field.max_code();
        match self.law {
            Law::Affine { offset, num, den } => {
                let scaled = u32::from(code) * u32::from(num) / u32::from(den);
                (u32::from(offset) + scaled) as u16
            }
            Law::Lookup(table) => table.get(usize::from(code)).copied().unwrap_or(0),
        }
    }

    /// Like [`decode`](Self::decode), keeping fractional steps.
    pub fn decode_f32(&self, code: u8) -> f32 {
        let code = code & self.field.max_code();
        match self.law {
            Law::Affine { offset, num, den } => {
                f32::from(offset) + f32::from(code) * f32::from(num) / f32::from(den)
            }
            Law::Lookup(table) => table
                .get(usize::from(code))
                .copied()
                .map_or(0.0, f32::from),
        }
    }
}

// Index of the closest table entry; ties go to the lower entry.
fn nearest_entry(table: &[u16], value: u16) -> usize {
    let mut best = 0;
    let mut best_diff = u16::MAX;
    for (i, &entry) in table.iter().enumerate() {
        let diff = entry.abs_diff(value);
        if diff < best_diff {
            best_diff = diff;
            best = i;
        }
    }
    best
}

/// Input current limit, mA.
pub const IINLIM: Quantity = Quantity::affine(fields::IINLIM, 100, 50, 100, 3250);
/// Input voltage limit offset, mV.
pub const VINDPM_OS: Quantity = Quantity::affine(fields::VINDPM_OS, 0, 100, 0, 3100);
/// Minimum system voltage, mV.
pub const SYS_MIN: Quantity = Quantity::affine(fields::SYS_MIN, 3000, 100, 3000, 3700);
/// Fast charge current limit, mA.
pub const ICHG: Quantity = Quantity::affine(fields::ICHG, 0, 64, 0, 3008);
/// Pre-charge current limit, mA.
pub const IPRECHG: Quantity = Quantity::affine(fields::IPRECHG, 64, 64, 64, 1024);
/// Termination current limit, mA.
pub const ITERM: Quantity = Quantity::affine(fields::ITERM, 64, 64, 64, 1024);
/// Charge voltage limit, mV.
pub const VREG: Quantity = Quantity::affine(fields::VREG, 3840, 16, 3840, 4608);
/// IR compensation resistor, mΩ.
pub const BAT_COMP: Quantity = Quantity::affine(fields::BAT_COMP, 0, 20, 0, 140);
/// IR compensation voltage clamp, mV.
pub const VCLAMP: Quantity = Quantity::affine(fields::VCLAMP, 0, 32, 0, 224);
/// Boost mode voltage, mV.
pub const BOOSTV: Quantity = Quantity::affine(fields::BOOSTV, 4550, 64, 4550, 5510);
/// Absolute VINDPM threshold, mV.
pub const VINDPM: Quantity = Quantity::affine(fields::VINDPM, 2600, 100, 3900, 15300);
/// ADC battery voltage, mV.
pub const BATV: Quantity = Quantity::affine(fields::BATV, 2304, 20, 2304, 4848);
/// ADC system voltage, mV.
pub const SYSV: Quantity = Quantity::affine(fields::SYSV, 2304, 20, 2304, 4848);
/// ADC TS voltage, percent of REGN (0.465 %/LSB).
pub const TSPCT: Quantity = Quantity {
    field: fields::TSPCT,
    law: Law::Affine {
        offset: 21,
        num: 465,
        den: 1000,
    },
    min: 21,
    max: 80,
};
/// ADC VBUS voltage, mV.
pub const VBUSV: Quantity = Quantity::affine(fields::VBUSV, 2600, 100, 2600, 15300);
/// ADC charge current, mA.
pub const ICHGR: Quantity = Quantity::affine(fields::ICHGR, 0, 50, 0, 6350);
/// Input current limit in effect while ICO is enabled, mA.
pub const IDPM_LIM: Quantity = Quantity::affine(fields::IDPM_LIM, 100, 50, 100, 3250);

/// Boost mode current limit table, mA. Code 7 is reserved.
pub const BOOST_LIM_TABLE: [u16; 7] = [500, 750, 1200, 1400, 1650, 1875, 2150];
/// Boost mode current limit, mA.
pub const BOOST_LIM: Quantity = Quantity {
    field: fields::BOOST_LIM,
    law: Law::Lookup(&BOOST_LIM_TABLE),
    min: 500,
    max: 2150,
};
