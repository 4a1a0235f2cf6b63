#![allow(non_upper_case_globals)]
#![allow(non_snake_case)]
#![allow(non_camel_case_types)]
#![allow(clippy::upper_case_acronyms)]

// Quantities stored as f32 in milli-scaled base units, matching the mA/mV
// resolution of the ADC registers.
ISQ!(
    uom::si,
    f32,
    (
        millimeter,
        kilogram,
        second,
        milliampere,
        kelvin,
        mole,
        candela
    )
);

#[cfg(test)]
mod tests {
    use super::{ElectricCurrent, ElectricPotential, Ratio};
    use approx::assert_relative_eq;
    use uom::si::{electric_current::milliampere, electric_potential::millivolt, ratio::percent};

    #[test]
    fn test_units() {
        let charge_current = ElectricCurrent::new::<milliampere>(2048.0);
        let battery_voltage = ElectricPotential::new::<millivolt>(4208.0);
        let ts = Ratio::new::<percent>(67.5);

        assert_relative_eq!(charge_current.get::<milliampere>(), 2048.0);
        assert_relative_eq!(battery_voltage.get::<millivolt>(), 4208.0, epsilon = 0.01);
        assert_relative_eq!(ts.get::<percent>(), 67.5, epsilon = 0.001);
    }
}
