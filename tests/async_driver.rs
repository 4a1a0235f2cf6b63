#![cfg(feature = "async")]

use approx::assert_relative_eq;
use bq25896_rs::{errors::Error, registers::Register, Bq25896, ChargeStatus, DEFAULT_ADDRESS};
use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use uom::si::electric_potential::millivolt;

fn read(reg: Register, value: u8) -> I2cTransaction {
    I2cTransaction::write_read(DEFAULT_ADDRESS, vec![reg as u8], vec![value])
}

#[tokio::test]
async fn test_is_connected() {
    let expectations = [I2cTransaction::write(DEFAULT_ADDRESS, vec![])];
    let mut driver = Bq25896::new(I2cMock::new(&expectations));
    assert!(driver.is_connected().await);
    driver.release().done();
}

#[tokio::test]
async fn test_set_ichg() {
    let expectations = [
        read(Register::Ichg, 0x80),
        I2cTransaction::write(DEFAULT_ADDRESS, vec![Register::Ichg as u8, 0xA0]),
    ];
    let mut driver = Bq25896::new(I2cMock::new(&expectations));
    driver.set_ichg_ma(2048).await.unwrap();
    driver.release().done();
}

#[tokio::test]
async fn test_out_of_range_sends_nothing() {
    let mut driver = Bq25896::new(I2cMock::new(&[]));
    assert_eq!(
        driver.set_ichg_ma(3072).await,
        Err(Error::OutOfRange {
            field: "ICHG",
            value: 3072
        })
    );
    driver.release().done();
}

#[tokio::test]
async fn test_failed_read_skips_write() {
    let expectations = [read(Register::Ilim, 0x00).with_error(ErrorKind::Other)];
    let mut driver = Bq25896::new(I2cMock::new(&expectations));
    assert_eq!(
        driver.set_en_hiz(true).await,
        Err(Error::I2c(ErrorKind::Other))
    );
    driver.release().done();
}

#[tokio::test]
async fn test_status_and_measurements() {
    let expectations = [
        read(Register::VbusStat, 0x54),
        read(Register::Batv, 0x55),
        read(Register::Sysv, 0x55),
        read(Register::Tspct, 0x64),
        read(Register::Vbusv, 0x98),
        read(Register::Ichgr, 0x14),
    ];
    let mut driver = Bq25896::new(I2cMock::new(&expectations));
    assert_eq!(driver.charge_status().await, Ok(ChargeStatus::FastCharging));
    let m = driver.read_measurements().await.unwrap();
    assert_relative_eq!(m.battery_voltage.get::<millivolt>(), 4004.0, epsilon = 0.01);
    assert!(m.vbus_good);
    assert!(!m.thermal_regulation);
    driver.release().done();
}
