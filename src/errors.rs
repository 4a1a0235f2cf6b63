#[cfg(feature = "defmt")]
use defmt::Format;

use crate::conversion::RangeError;

/// Represents potential errors when interacting with the BQ25896 chip.
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(Format))]
pub enum Error<E> {
    /// An error occurred during I2C communication.
    ///
    /// If it happened while writing a register back, the register content on
    /// the chip is unknown; read it again before relying on it.
    I2c(E),
    /// A physical value lies outside the legal range of a field.
    /// Nothing was sent on the bus.
    OutOfRange {
        /// Datasheet name of the rejected field.
        field: &'static str,
        /// The value passed by the caller, in the field's unit.
        value: u16,
    },
}

impl<E> From<RangeError> for Error<E> {
    fn from(err: RangeError) -> Self {
        Error::OutOfRange {
            field: err.field,
            value: err.value,
        }
    }
}
