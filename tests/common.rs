#![cfg(not(feature = "async"))]
#![allow(unused_imports)]
#![allow(dead_code)]

use bq25896_rs::{registers::Register, Bq25896, DEFAULT_ADDRESS, REGISTER_COUNT};
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use std::cell::RefCell;
use std::rc::Rc;

pub const BQ25896_ADDR: u8 = DEFAULT_ADDRESS;

/// Expected bus traffic of one read-modify-write of `reg`.
pub fn expect_modify(reg: Register, read: u8, written: u8) -> [I2cTransaction; 2] {
    [
        I2cTransaction::write_read(BQ25896_ADDR, vec![reg as u8], vec![read]),
        I2cTransaction::write(BQ25896_ADDR, vec![reg as u8, written]),
    ]
}

/// Expected bus traffic of one register read.
pub fn expect_read(reg: Register, value: u8) -> I2cTransaction {
    I2cTransaction::write_read(BQ25896_ADDR, vec![reg as u8], vec![value])
}

/// Helper function to create a Bq25896 instance backed by a transaction script.
pub fn create_driver(transactions: &[I2cTransaction]) -> (Bq25896<MockI2c>, MockI2c) {
    let i2c_mock_instance = MockI2c::new(transactions);
    let driver = Bq25896::new(i2c_mock_instance.clone());
    (driver, i2c_mock_instance) // Return the cloned mock for verification
}

/// A mock I2C device that can be programmed with expected transactions.
#[derive(Clone)]
pub struct MockI2c {
    mock: Rc<RefCell<I2cMock>>,
}

impl MockI2c {
    /// Creates a new `MockI2c` with the given expected transactions.
    pub fn new(transactions: &[I2cTransaction]) -> Self {
        Self {
            mock: Rc::new(RefCell::new(I2cMock::new(transactions))),
        }
    }

    /// Consumes the mock and verifies that all expected transactions occurred.
    pub fn done(self) {
        self.mock.borrow_mut().done();
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.mock
            .borrow_mut()
            .write(address, bytes)
            .map_err(|_| ErrorKind::Other)
    }

    fn read(&mut self, address: u8, bytes: &mut [u8]) -> Result<(), Self::Error> {
        self.mock
            .borrow_mut()
            .read(address, bytes)
            .map_err(|_| ErrorKind::Other)
    }

    fn write_read(
        &mut self,
        address: u8,
        bytes: &[u8],
        buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.mock
            .borrow_mut()
            .write_read(address, bytes, buffer)
            .map_err(|_| ErrorKind::Other)
    }

    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.mock
            .borrow_mut()
            .transaction(address, operations)
            .map_err(|_| ErrorKind::Other)
    }
}

/// In-memory BQ25896 register file.
///
/// Answers pointer-then-read and pointer-then-data transfers like the chip
/// does and records every data byte written, in order.
#[derive(Debug, Clone, Default)]
pub struct RegisterFile {
    pub regs: [u8; REGISTER_COUNT],
    pub writes: Vec<(u8, u8)>,
    pointer: usize,
}

impl RegisterFile {
    pub fn new(regs: [u8; REGISTER_COUNT]) -> Self {
        Self {
            regs,
            ..Self::default()
        }
    }

    pub fn get(&self, reg: Register) -> u8 {
        self.regs[reg as usize]
    }
}

impl ErrorType for RegisterFile {
    type Error = ErrorKind;
}

impl I2c for RegisterFile {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address != BQ25896_ADDR {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    let Some((&reg, data)) = bytes.split_first() else {
                        continue;
                    };
                    self.pointer = usize::from(reg);
                    for &byte in data {
                        let slot = self
                            .regs
                            .get_mut(self.pointer)
                            .ok_or(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data))?;
                        *slot = byte;
                        self.writes.push((self.pointer as u8, byte));
                        self.pointer += 1;
                    }
                }
                Operation::Read(buffer) => {
                    for byte in buffer.iter_mut() {
                        *byte = self.regs.get(self.pointer).copied().unwrap_or(0xFF);
                        self.pointer += 1;
                    }
                }
            }
        }
        Ok(())
    }
}
