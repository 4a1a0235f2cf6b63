#![cfg(not(feature = "async"))]

#[path = "common.rs"]
mod common;

use bq25896_rs::{
    errors::Error, registers::Register, BoostHotThreshold, Bq25896, ChargeTimer,
    ThermalRegulation, WatchdogTimer,
};
use common::{create_driver, expect_modify, expect_read, RegisterFile};
use embedded_hal::i2c::ErrorKind;

#[test]
fn test_set_iinlim() {
    let expectations = expect_modify(Register::Ilim, 0xFF, 0xC8);
    let (mut driver, i2c_mock) = create_driver(&expectations);
    driver.set_iinlim_ma(500).unwrap();
    i2c_mock.done();
}

#[test]
fn test_iinlim_out_of_range_sends_nothing() {
    let (mut driver, i2c_mock) = create_driver(&[]);
    assert_eq!(
        driver.set_iinlim_ma(50),
        Err(Error::OutOfRange {
            field: "IINLIM",
            value: 50
        })
    );
    assert_eq!(
        driver.set_iinlim_ma(4000),
        Err(Error::OutOfRange {
            field: "IINLIM",
            value: 4000
        })
    );
    i2c_mock.done();
}

#[test]
fn test_iinlim_bounds() {
    let expectations = [
        expect_modify(Register::Ilim, 0x80, 0x80),
        expect_modify(Register::Ilim, 0x80, 0xBF),
    ]
    .concat();
    let (mut driver, i2c_mock) = create_driver(&expectations);
    driver.set_iinlim_ma(100).unwrap();
    driver.set_iinlim_ma(3250).unwrap();
    i2c_mock.done();
}

#[test]
fn test_get_iinlim() {
    let expectations = [expect_read(Register::Ilim, 0x3F)];
    let (mut driver, i2c_mock) = create_driver(&expectations);
    assert_eq!(driver.iinlim_ma(), Ok(3250));
    i2c_mock.done();
}

#[test]
fn test_set_ichg_keeps_en_pumpx() {
    let expectations = expect_modify(Register::Ichg, 0x80, 0xA0);
    let (mut driver, i2c_mock) = create_driver(&expectations);
    driver.set_ichg_ma(2048).unwrap();
    i2c_mock.done();
}

#[test]
fn test_set_vreg() {
    // VRECHG and BATLOWV sit below the 6-bit VREG code.
    let expectations = expect_modify(Register::Vreg, 0x02, 0x5E);
    let (mut driver, i2c_mock) = create_driver(&expectations);
    driver.set_vreg_mv(4208).unwrap();
    i2c_mock.done();
}

#[test]
fn test_vreg_rejects_above_max() {
    let (mut driver, i2c_mock) = create_driver(&[]);
    assert_eq!(
        driver.set_vreg_mv(4624),
        Err(Error::OutOfRange {
            field: "VREG",
            value: 4624
        })
    );
    i2c_mock.done();
}

#[test]
fn test_prechg_and_term_share_register() {
    let expectations = [
        expect_modify(Register::IpreIterm, 0x10, 0x13),
        expect_modify(Register::IpreIterm, 0x13, 0x73),
    ]
    .concat();
    let (mut driver, i2c_mock) = create_driver(&expectations);
    driver.set_iterm_ma(256).unwrap();
    driver.set_iprechg_ma(512).unwrap();
    i2c_mock.done();
}

#[test]
fn test_sys_min() {
    let mut expectations = expect_modify(Register::SysCtrl, 0x3B, 0x31).to_vec();
    expectations.push(expect_read(Register::SysCtrl, 0x1A));
    let (mut driver, i2c_mock) = create_driver(&expectations);
    driver.set_sys_min_mv(3000).unwrap();
    assert_eq!(driver.sys_min_mv(), Ok(3500));
    i2c_mock.done();
}

#[test]
fn test_ir_compensation() {
    let expectations = [
        expect_modify(Register::BatComp, 0x03, 0x43),
        expect_modify(Register::BatComp, 0x43, 0x4B),
    ]
    .concat();
    let (mut driver, i2c_mock) = create_driver(&expectations);
    driver.set_bat_comp_mohm(40).unwrap();
    driver.set_vclamp_mv(64).unwrap();
    i2c_mock.done();
}

#[test]
fn test_vindpm_os() {
    let expectations = expect_modify(Register::VindpmOs, 0xE0, 0xE5);
    let (mut driver, i2c_mock) = create_driver(&expectations);
    driver.set_vindpm_os_mv(500).unwrap();
    i2c_mock.done();
}

#[test]
fn test_vindpm_keeps_force_bit() {
    let expectations = expect_modify(Register::Vindpm, 0x80, 0x92);
    let (mut driver, i2c_mock) = create_driver(&expectations);
    driver.set_vindpm_mv(4400).unwrap();
    i2c_mock.done();
}

#[test]
fn test_vindpm_below_domain() {
    let (mut driver, i2c_mock) = create_driver(&[]);
    assert!(matches!(
        driver.set_vindpm_mv(3800),
        Err(Error::OutOfRange { field: "VINDPM", .. })
    ));
    i2c_mock.done();
}

#[test]
fn test_boost_settings() {
    let expectations = [
        expect_modify(Register::BoostCtrl, 0x73, 0x93),
        // 1300 mA is closest to 1200 mA.
        expect_modify(Register::BoostCtrl, 0x93, 0x92),
    ]
    .concat();
    let (mut driver, i2c_mock) = create_driver(&expectations);
    driver.set_boostv_mv(5126).unwrap();
    driver.set_boost_lim_ma(1300).unwrap();
    i2c_mock.done();
}

#[test]
fn test_boost_getters() {
    let expectations = [
        expect_read(Register::BoostCtrl, 0x73),
        expect_read(Register::BoostCtrl, 0x73),
        expect_read(Register::BoostCtrl, 0x77),
    ];
    let (mut driver, i2c_mock) = create_driver(&expectations);
    assert_eq!(driver.boostv_mv(), Ok(4998));
    assert_eq!(driver.boost_lim_ma(), Ok(1400));
    // Code 7 is reserved.
    assert_eq!(driver.boost_lim_ma(), Ok(0));
    i2c_mock.done();
}

#[test]
fn test_boost_lim_out_of_range() {
    let (mut driver, i2c_mock) = create_driver(&[]);
    assert!(driver.set_boost_lim_ma(400).is_err());
    assert!(driver.set_boost_lim_ma(3000).is_err());
    i2c_mock.done();
}

#[test]
fn test_adc_getters() {
    let expectations = [
        expect_read(Register::Batv, 0x00),
        expect_read(Register::Batv, 0x7F),
        // THERM_STAT does not leak into the voltage.
        expect_read(Register::Batv, 0xFF),
        expect_read(Register::Sysv, 0x55),
        expect_read(Register::Tspct, 0x64),
        expect_read(Register::Vbusv, 0x98),
        expect_read(Register::Ichgr, 0x14),
        expect_read(Register::IdpmLim, 0xC8),
    ];
    let (mut driver, i2c_mock) = create_driver(&expectations);
    assert_eq!(driver.batv_mv(), Ok(2304));
    assert_eq!(driver.batv_mv(), Ok(4844));
    assert_eq!(driver.batv_mv(), Ok(4844));
    assert_eq!(driver.sysv_mv(), Ok(4004));
    assert_eq!(driver.tspct_percent(), Ok(67));
    assert_eq!(driver.vbusv_mv(), Ok(5000));
    assert_eq!(driver.ichgr_ma(), Ok(1000));
    assert_eq!(driver.idpm_lim_ma(), Ok(500));
    i2c_mock.done();
}

#[test]
fn test_adc_read_error() {
    let expectations = [expect_read(Register::Batv, 0x00).with_error(ErrorKind::Other)];
    let (mut driver, i2c_mock) = create_driver(&expectations);
    assert_eq!(driver.batv_mv(), Err(Error::I2c(ErrorKind::Other)));
    i2c_mock.done();
}

#[test]
fn test_coded_settings() {
    let mut regs = [0u8; 21];
    // EN_TERM, EN_TIMER and JEITA_ISET set.
    regs[Register::Timer as usize] = 0b1000_1001;
    // BAT_COMP = 100 mΩ, VCLAMP = 160 mV.
    regs[Register::BatComp as usize] = 0b1011_0100;
    // BCOLD set, VINDPM_OS = 500 mV.
    regs[Register::VindpmOs as usize] = 0b0010_0101;

    let mut driver = Bq25896::new(RegisterFile::new(regs));
    driver.set_watchdog(WatchdogTimer::Sec160).unwrap();
    driver.set_chg_timer(ChargeTimer::Hours20).unwrap();
    driver.set_treg(ThermalRegulation::Celsius100).unwrap();
    driver.set_bhot(BoostHotThreshold::Disabled).unwrap();

    assert_eq!(driver.watchdog(), Ok(WatchdogTimer::Sec160));
    assert_eq!(driver.chg_timer_hours(), Ok(20));
    assert_eq!(driver.treg(), Ok(ThermalRegulation::Celsius100));
    assert_eq!(driver.bhot(), Ok(BoostHotThreshold::Disabled));
    assert_eq!(driver.bat_comp_mohm(), Ok(100));
    assert_eq!(driver.vclamp_mv(), Ok(160));
    assert_eq!(driver.vindpm_os_mv(), Ok(500));

    // Lowering a code clears only its own bits.
    driver.set_watchdog(WatchdogTimer::Sec40).unwrap();
    driver.set_bhot(BoostHotThreshold::Vbhot0).unwrap();

    let regs = driver.release();
    assert_eq!(regs.get(Register::Timer), 0b1001_1111);
    assert_eq!(regs.get(Register::BatComp), 0b1011_0110);
    assert_eq!(regs.get(Register::VindpmOs), 0b0110_0101);
}

#[test]
fn test_scaled_setters_leave_siblings() {
    let mut driver = Bq25896::new(RegisterFile::new([0xFF; 21]));
    driver.set_ichg_ma(0).unwrap();
    driver.set_vreg_mv(3840).unwrap();
    driver.set_iterm_ma(64).unwrap();
    driver.set_boostv_mv(4550).unwrap();

    let regs = driver.release();
    assert_eq!(regs.get(Register::Ichg), 0x80);
    assert_eq!(regs.get(Register::Vreg), 0x03);
    assert_eq!(regs.get(Register::IpreIterm), 0xF0);
    assert_eq!(regs.get(Register::BoostCtrl), 0x0F);
    assert_eq!(regs.writes.len(), 4);
}
