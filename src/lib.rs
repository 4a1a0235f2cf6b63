#![no_std]

#[macro_use]
extern crate uom;

#[cfg(feature = "defmt")]
extern crate defmt;

#[cfg(not(feature = "async"))]
use embedded_hal::i2c::I2c;
#[cfg(feature = "async")]
use embedded_hal_async::i2c::I2c;

pub mod conversion;
pub mod data_types;
pub mod errors;
pub mod registers;
pub mod units;

pub use data_types::{
    BoostHotThreshold, ChargeFault, ChargeStatus, ChargeTimer, ChargerConfig, Faults,
    Measurements, NtcFault, ThermalRegulation, VbusStatus, WatchdogTimer,
};
pub use errors::Error;
pub use registers::{ReadableRegister, Register, WritableRegister, REGISTER_COUNT};

use registers::*;
use uom::si::electric_current::milliampere;
use uom::si::electric_potential::millivolt;
use uom::si::ratio::percent;

use crate::units::{ElectricCurrent, ElectricPotential, Ratio};

/// Default 7-bit I2C address of the BQ25896.
pub const DEFAULT_ADDRESS: u8 = 0x6B;

/// BQ25896 driver
///
/// Holds no copy of the register contents: the chip changes status, ADC and
/// self-clearing bits on its own, so every getter reads the device again and
/// every setter is a read-modify-write of one register.
///
/// A read-modify-write is not atomic on a shared bus. If other code talks to
/// the chip concurrently, serialize access around the driver.
pub struct Bq25896<I2C>
where
    I2C: I2c,
{
    address: u8,
    i2c: I2C,
}

impl<I2C> Bq25896<I2C>
where
    I2C: I2c,
{
    /// Creates a new driver at [`DEFAULT_ADDRESS`].
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Creates a new driver for a chip strapped to another address.
    ///
    /// # Arguments
    ///
    /// * `i2c` - The I2C peripheral.
    /// * `address` - The 7-bit I2C address of the BQ25896 chip.
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { address, i2c }
    }

    /// The 7-bit I2C address the driver talks to.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Destroys the driver and returns the I2C peripheral.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

#[maybe_async_cfg::maybe(
    sync(cfg(not(feature = "async")), self = "RegisterAccess",),
    async(feature = "async", keep_self)
)]
#[allow(async_fn_in_trait)]
/// Trait for abstracting single-byte register reads.
///
/// Writes go through [`Bq25896::write`] and [`Bq25896::modify`], which only
/// accept read-write registers.
pub trait RegisterAccess<E>
where
    Self: Sized,
{
    /// Reads a single byte from the specified register.
    ///
    /// The register pointer and the data byte are sent as one `write_read`,
    /// joined by a repeated start instead of a STOP.
    async fn read_register(&mut self, reg: Register) -> Result<u8, Error<E>>;
}

#[maybe_async_cfg::maybe(
    sync(cfg(not(feature = "async")), self = "Bq25896",),
    async(feature = "async", keep_self)
)]
impl<I2C, E> RegisterAccess<E> for Bq25896<I2C>
where
    I2C: I2c<Error = E>,
{
    async fn read_register(&mut self, reg: Register) -> Result<u8, Error<E>> {
        let mut data = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg as u8], &mut data)
            .await
            .map_err(Error::I2c)?;
        #[cfg(feature = "defmt")]
        defmt::trace!("read {} = {:#x}", reg, data[0]);
        Ok(data[0])
    }
}

#[maybe_async_cfg::maybe(
    sync(cfg(not(feature = "async")), self = "Bq25896",),
    async(feature = "async", keep_self)
)]
impl<I2C, E> Bq25896<I2C>
where
    I2C: I2c<Error = E>,
{
    /// Probes the device address with an empty write.
    ///
    /// Returns `true` if the chip acknowledged its address. No register is read.
    pub async fn is_connected(&mut self) -> bool {
        self.i2c.write(self.address, &[]).await.is_ok()
    }

    /// Resets all registers to their defaults by setting REG_RST.
    ///
    /// The chip clears the bit itself once the reset is done; this call does
    /// not wait for that.
    pub async fn reset(&mut self) -> Result<(), Error<E>> {
        self.set_reg_rst(true).await
    }

    /// Reads and decodes a whole register.
    pub async fn read<R: ReadableRegister>(&mut self) -> Result<R, Error<E>> {
        let byte = self.read_register(R::REGISTER).await?;
        Ok(R::from(byte))
    }

    /// Writes a whole register.
    ///
    /// Status and ADC registers do not implement [`WritableRegister`]:
    ///
    /// ```compile_fail
    /// use bq25896_rs::{registers::Fault, Bq25896};
    ///
    /// fn clear_faults<I2C: embedded_hal::i2c::I2c>(charger: &mut Bq25896<I2C>) {
    ///     let _ = charger.write(Fault::from(0));
    /// }
    /// ```
    ///
    /// and there is no public path that writes a raw byte:
    ///
    /// ```compile_fail
    /// use bq25896_rs::{registers::Register, Bq25896};
    ///
    /// fn clear_faults<I2C: embedded_hal::i2c::I2c>(charger: &mut Bq25896<I2C>) {
    ///     let _ = charger.write_register(Register::Fault, 0);
    /// }
    /// ```
    pub async fn write<R: WritableRegister>(&mut self, reg: R) -> Result<(), Error<E>> {
        self.write_register(R::REGISTER, reg.into()).await
    }

    async fn write_register(&mut self, reg: Register, value: u8) -> Result<(), Error<E>> {
        debug_assert!(!reg.is_read_only());
        #[cfg(feature = "defmt")]
        defmt::trace!("write {} = {:#x}", reg, value);
        self.i2c
            .write(self.address, &[reg as u8, value])
            .await
            .map_err(Error::I2c)
    }

    /// Read-modify-write of one register.
    ///
    /// The register is read, `f` edits the decoded copy, and the full byte is
    /// written back in a single transfer. Nothing is written if the read fails.
    pub async fn modify<R, F>(&mut self, f: F) -> Result<(), Error<E>>
    where
        R: WritableRegister,
        F: FnOnce(&mut R),
    {
        let mut reg: R = self.read().await?;
        f(&mut reg);
        self.write(reg).await
    }

    // Range check first, then one read-modify-write.
    async fn set_scaled<R, F>(
        &mut self,
        quantity: &conversion::Quantity,
        value: u16,
        apply: F,
    ) -> Result<(), Error<E>>
    where
        R: WritableRegister,
        F: FnOnce(&mut R, u8),
    {
        let code = match quantity.encode(value) {
            Ok(code) => code,
            Err(err) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("{} out of range: {}", err.field, err.value);
                return Err(err.into());
            }
        };
        self.modify(|reg: &mut R| apply(reg, code)).await
    }

    // REG00

    /// Enables or disables HIZ mode.
    pub async fn set_en_hiz(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut Ilim| r.en_hiz = value).await
    }

    /// Enables or disables the ILIM pin.
    pub async fn set_en_ilim(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut Ilim| r.en_ilim = value).await
    }

    /// Sets the input current limit, 100–3250 mA in 50 mA steps.
    ///
    /// The effective limit is the lower of this and the ILIM pin setting.
    pub async fn set_iinlim_ma(&mut self, ma: u16) -> Result<(), Error<E>> {
        self.set_scaled(&conversion::IINLIM, ma, |r: &mut Ilim, code| r.iinlim = code)
            .await
    }

    /// Input current limit in mA.
    pub async fn iinlim_ma(&mut self) -> Result<u16, Error<E>> {
        let reg: Ilim = self.read().await?;
        Ok(conversion::IINLIM.decode(reg.iinlim))
    }

    // REG01

    /// Sets the boost mode hot temperature threshold.
    pub async fn set_bhot(&mut self, threshold: BoostHotThreshold) -> Result<(), Error<E>> {
        self.modify(|r: &mut VindpmOs| r.bhot = threshold as u8).await
    }

    /// Boost mode hot temperature threshold.
    pub async fn bhot(&mut self) -> Result<BoostHotThreshold, Error<E>> {
        let reg: VindpmOs = self.read().await?;
        Ok(BoostHotThreshold::from_code(reg.bhot))
    }

    /// Selects the boost mode cold threshold: `false` VBCOLD0 (77 %), `true` VBCOLD1 (80 %).
    pub async fn set_bcold(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut VindpmOs| r.bcold = value).await
    }

    /// Sets the relative input voltage limit offset, 0–3100 mV in 100 mV steps.
    pub async fn set_vindpm_os_mv(&mut self, mv: u16) -> Result<(), Error<E>> {
        self.set_scaled(&conversion::VINDPM_OS, mv, |r: &mut VindpmOs, code| {
            r.vindpm_os = code
        })
        .await
    }

    /// Relative input voltage limit offset in mV.
    pub async fn vindpm_os_mv(&mut self) -> Result<u16, Error<E>> {
        let reg: VindpmOs = self.read().await?;
        Ok(conversion::VINDPM_OS.decode(reg.vindpm_os))
    }

    // REG02

    /// Starts an ADC conversion. Read-only while continuous conversion is on.
    pub async fn set_conv_start(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut AdcCtrl| r.conv_start = value).await
    }

    /// `false` one-shot, `true` continuous 1 s conversion.
    pub async fn set_conv_rate(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut AdcCtrl| r.conv_rate = value).await
    }

    /// `false` 1.5 MHz, `true` 500 kHz. Ignored by the chip while OTG is enabled.
    pub async fn set_boost_freq(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut AdcCtrl| r.boost_freq = value).await
    }

    /// Enables or disables the input current optimizer.
    pub async fn set_ico_en(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut AdcCtrl| r.ico_en = value).await
    }

    /// Forces D+/D- input source detection. The bit clears itself.
    pub async fn set_force_dpdm(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut AdcCtrl| r.force_dpdm = value).await
    }

    /// Enables D+/D- detection when VBUS is plugged in.
    pub async fn set_auto_dpdm_en(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut AdcCtrl| r.auto_dpdm_en = value).await
    }

    // REG03

    /// Enables or disables the battery load (IBATLOAD).
    pub async fn set_bat_loaden(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut SysCtrl| r.bat_loaden = value).await
    }

    /// Kicks the I2C watchdog. The bit clears itself.
    pub async fn set_wd_rst(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut SysCtrl| r.wd_rst = value).await
    }

    /// Enables or disables boost (OTG) mode.
    pub async fn set_otg_config(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut SysCtrl| r.otg_config = value).await
    }

    /// Enables or disables charging.
    pub async fn set_chg_config(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut SysCtrl| r.chg_config = value).await
    }

    /// Sets the minimum system voltage, 3000–3700 mV in 100 mV steps.
    pub async fn set_sys_min_mv(&mut self, mv: u16) -> Result<(), Error<E>> {
        self.set_scaled(&conversion::SYS_MIN, mv, |r: &mut SysCtrl, code| {
            r.sys_min = code
        })
        .await
    }

    /// Minimum system voltage in mV.
    pub async fn sys_min_mv(&mut self) -> Result<u16, Error<E>> {
        let reg: SysCtrl = self.read().await?;
        Ok(conversion::SYS_MIN.decode(reg.sys_min))
    }

    /// Minimum battery voltage to exit boost mode: `false` 2.9 V, `true` 2.5 V.
    pub async fn set_min_vbat_sel(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut SysCtrl| r.min_vbat_sel = value).await
    }

    // REG04

    /// Enables current pulse control (PUMPX_UP / PUMPX_DN).
    pub async fn set_en_pumpx(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut Ichg| r.en_pumpx = value).await
    }

    /// Sets the fast charge current limit, 0–3008 mA in 64 mA steps. 0 disables charging.
    pub async fn set_ichg_ma(&mut self, ma: u16) -> Result<(), Error<E>> {
        self.set_scaled(&conversion::ICHG, ma, |r: &mut Ichg, code| r.ichg = code)
            .await
    }

    /// Fast charge current limit in mA.
    pub async fn ichg_ma(&mut self) -> Result<u16, Error<E>> {
        let reg: Ichg = self.read().await?;
        Ok(conversion::ICHG.decode(reg.ichg))
    }

    // REG05

    /// Sets the pre-charge current limit, 64–1024 mA in 64 mA steps.
    pub async fn set_iprechg_ma(&mut self, ma: u16) -> Result<(), Error<E>> {
        self.set_scaled(&conversion::IPRECHG, ma, |r: &mut IpreIterm, code| {
            r.iprechg = code
        })
        .await
    }

    /// Pre-charge current limit in mA.
    pub async fn iprechg_ma(&mut self) -> Result<u16, Error<E>> {
        let reg: IpreIterm = self.read().await?;
        Ok(conversion::IPRECHG.decode(reg.iprechg))
    }

    /// Sets the termination current limit, 64–1024 mA in 64 mA steps.
    pub async fn set_iterm_ma(&mut self, ma: u16) -> Result<(), Error<E>> {
        self.set_scaled(&conversion::ITERM, ma, |r: &mut IpreIterm, code| {
            r.iterm = code
        })
        .await
    }

    /// Termination current limit in mA.
    pub async fn iterm_ma(&mut self) -> Result<u16, Error<E>> {
        let reg: IpreIterm = self.read().await?;
        Ok(conversion::ITERM.decode(reg.iterm))
    }

    // REG06

    /// Sets the charge voltage limit, 3840–4608 mV in 16 mV steps.
    pub async fn set_vreg_mv(&mut self, mv: u16) -> Result<(), Error<E>> {
        self.set_scaled(&conversion::VREG, mv, |r: &mut Vreg, code| r.vreg = code)
            .await
    }

    /// Charge voltage limit in mV.
    pub async fn vreg_mv(&mut self) -> Result<u16, Error<E>> {
        let reg: Vreg = self.read().await?;
        Ok(conversion::VREG.decode(reg.vreg))
    }

    /// Pre-charge to fast charge threshold: `false` 2.8 V, `true` 3.0 V.
    pub async fn set_batlowv(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut Vreg| r.batlowv = value).await
    }

    /// Recharge threshold below VREG: `false` 100 mV, `true` 200 mV.
    pub async fn set_vrechg(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut Vreg| r.vrechg = value).await
    }

    // REG07

    /// Enables or disables charge termination.
    pub async fn set_en_term(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut Timer| r.en_term = value).await
    }

    /// Disables the STAT pin function.
    pub async fn set_stat_dis(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut Timer| r.stat_dis = value).await
    }

    /// Sets the I2C watchdog timeout.
    pub async fn set_watchdog(&mut self, timer: WatchdogTimer) -> Result<(), Error<E>> {
        self.modify(|r: &mut Timer| r.watchdog = timer as u8).await
    }

    /// I2C watchdog timeout setting.
    pub async fn watchdog(&mut self) -> Result<WatchdogTimer, Error<E>> {
        let reg: Timer = self.read().await?;
        Ok(WatchdogTimer::from_code(reg.watchdog))
    }

    /// Enables the charging safety timer.
    pub async fn set_en_timer(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut Timer| r.en_timer = value).await
    }

    /// Sets the fast charge safety timer.
    pub async fn set_chg_timer(&mut self, timer: ChargeTimer) -> Result<(), Error<E>> {
        self.modify(|r: &mut Timer| r.chg_timer = timer as u8).await
    }

    /// Fast charge safety timer in hours.
    pub async fn chg_timer_hours(&mut self) -> Result<u8, Error<E>> {
        let reg: Timer = self.read().await?;
        Ok(ChargeTimer::from_code(reg.chg_timer).hours())
    }

    /// JEITA low temperature current: `false` 50 %, `true` 20 % of ICHG.
    pub async fn set_jeita_iset(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut Timer| r.jeita_iset = value).await
    }

    // REG08

    /// Sets the IR compensation resistor, 0–140 mΩ in 20 mΩ steps.
    pub async fn set_bat_comp_mohm(&mut self, mohm: u16) -> Result<(), Error<E>> {
        self.set_scaled(&conversion::BAT_COMP, mohm, |r: &mut BatComp, code| {
            r.bat_comp = code
        })
        .await
    }

    /// IR compensation resistor in mΩ.
    pub async fn bat_comp_mohm(&mut self) -> Result<u16, Error<E>> {
        let reg: BatComp = self.read().await?;
        Ok(conversion::BAT_COMP.decode(reg.bat_comp))
    }

    /// Sets the IR compensation voltage clamp above VREG, 0–224 mV in 32 mV steps.
    pub async fn set_vclamp_mv(&mut self, mv: u16) -> Result<(), Error<E>> {
        self.set_scaled(&conversion::VCLAMP, mv, |r: &mut BatComp, code| {
            r.vclamp = code
        })
        .await
    }

    /// IR compensation voltage clamp in mV.
    pub async fn vclamp_mv(&mut self) -> Result<u16, Error<E>> {
        let reg: BatComp = self.read().await?;
        Ok(conversion::VCLAMP.decode(reg.vclamp))
    }

    /// Sets the thermal regulation threshold.
    pub async fn set_treg(&mut self, threshold: ThermalRegulation) -> Result<(), Error<E>> {
        self.modify(|r: &mut BatComp| r.treg = threshold as u8).await
    }

    /// Thermal regulation threshold.
    pub async fn treg(&mut self) -> Result<ThermalRegulation, Error<E>> {
        let reg: BatComp = self.read().await?;
        Ok(ThermalRegulation::from_code(reg.treg))
    }

    // REG09

    /// Forces an ICO run. The bit clears itself once ICO starts.
    pub async fn set_force_ico(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut Ctrl1| r.force_ico = value).await
    }

    /// Slows the safety timer by 2x during input DPM or thermal regulation.
    pub async fn set_tmr2x_en(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut Ctrl1| r.tmr2x_en = value).await
    }

    /// Forces the BATFET off (ship mode).
    pub async fn set_batfet_dis(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut Ctrl1| r.batfet_dis = value).await
    }

    /// JEITA high temperature voltage: `false` VREG - 200 mV, `true` VREG.
    pub async fn set_jeita_vset(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut Ctrl1| r.jeita_vset = value).await
    }

    /// Delays BATFET turn-off by tSM_DLY when BATFET_DIS is set.
    pub async fn set_batfet_dly(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut Ctrl1| r.batfet_dly = value).await
    }

    /// Enables BATFET full system reset.
    pub async fn set_batfet_rst_en(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut Ctrl1| r.batfet_rst_en = value).await
    }

    /// Requests a current pulse voltage step up. Needs EN_PUMPX; clears itself.
    pub async fn set_pumpx_up(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut Ctrl1| r.pumpx_up = value).await
    }

    /// Requests a current pulse voltage step down. Needs EN_PUMPX; clears itself.
    pub async fn set_pumpx_dn(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut Ctrl1| r.pumpx_dn = value).await
    }

    // REG0A

    /// Sets the boost mode voltage, 4550–5510 mV in 64 mV steps.
    pub async fn set_boostv_mv(&mut self, mv: u16) -> Result<(), Error<E>> {
        self.set_scaled(&conversion::BOOSTV, mv, |r: &mut BoostCtrl, code| {
            r.boostv = code
        })
        .await
    }

    /// Boost mode voltage in mV.
    pub async fn boostv_mv(&mut self) -> Result<u16, Error<E>> {
        let reg: BoostCtrl = self.read().await?;
        Ok(conversion::BOOSTV.decode(reg.boostv))
    }

    /// Disables PFM mode in boost mode.
    pub async fn set_pfm_otg_dis(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut BoostCtrl| r.pfm_otg_dis = value).await
    }

    /// Sets the boost mode current limit, 500–2150 mA.
    ///
    /// The chip supports 500, 750, 1200, 1400, 1650, 1875 and 2150 mA; other
    /// values select the nearest of these.
    pub async fn set_boost_lim_ma(&mut self, ma: u16) -> Result<(), Error<E>> {
        self.set_scaled(&conversion::BOOST_LIM, ma, |r: &mut BoostCtrl, code| {
            r.boost_lim = code
        })
        .await
    }

    /// Boost mode current limit in mA; 0 for the reserved code.
    pub async fn boost_lim_ma(&mut self) -> Result<u16, Error<E>> {
        let reg: BoostCtrl = self.read().await?;
        Ok(conversion::BOOST_LIM.decode(reg.boost_lim))
    }

    // REG0B

    /// Charging status from VBUS_STAT.
    pub async fn charge_status(&mut self) -> Result<ChargeStatus, Error<E>> {
        let reg: VbusStat = self.read().await?;
        Ok(ChargeStatus::from_code(reg.chrg_stat))
    }

    /// Input source type from VBUS_STAT.
    pub async fn vbus_status(&mut self) -> Result<VbusStatus, Error<E>> {
        let reg: VbusStat = self.read().await?;
        Ok(VbusStatus::from_code(reg.vbus_stat))
    }

    /// Power good status.
    pub async fn power_good(&mut self) -> Result<bool, Error<E>> {
        let reg: VbusStat = self.read().await?;
        Ok(reg.pg_stat)
    }

    // REG0C

    /// Reads and decodes the FAULT register.
    pub async fn faults(&mut self) -> Result<Faults, Error<E>> {
        let reg: Fault = self.read().await?;
        Ok(Faults::from(reg))
    }

    // REG0D

    /// `false` relative VINDPM threshold, `true` absolute (VINDPM register).
    pub async fn set_force_vindpm(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut Vindpm| r.force_vindpm = value).await
    }

    /// Sets the absolute VINDPM threshold, 3900–15300 mV in 100 mV steps.
    ///
    /// Only takes effect with FORCE_VINDPM set.
    pub async fn set_vindpm_mv(&mut self, mv: u16) -> Result<(), Error<E>> {
        self.set_scaled(&conversion::VINDPM, mv, |r: &mut Vindpm, code| {
            r.vindpm = code
        })
        .await
    }

    /// Absolute VINDPM threshold in mV.
    pub async fn vindpm_mv(&mut self) -> Result<u16, Error<E>> {
        let reg: Vindpm = self.read().await?;
        Ok(conversion::VINDPM.decode(reg.vindpm))
    }

    // REG0E..REG13, ADC results

    /// Battery voltage in mV from the last ADC conversion.
    pub async fn batv_mv(&mut self) -> Result<u16, Error<E>> {
        let reg: Batv = self.read().await?;
        Ok(conversion::BATV.decode(reg.batv))
    }

    /// System voltage in mV from the last ADC conversion.
    pub async fn sysv_mv(&mut self) -> Result<u16, Error<E>> {
        let reg: Sysv = self.read().await?;
        Ok(conversion::SYSV.decode(reg.sysv))
    }

    /// TS voltage as whole percent of REGN.
    pub async fn tspct_percent(&mut self) -> Result<u16, Error<E>> {
        let reg: Tspct = self.read().await?;
        Ok(conversion::TSPCT.decode(reg.tspct))
    }

    /// VBUS voltage in mV from the last ADC conversion.
    pub async fn vbusv_mv(&mut self) -> Result<u16, Error<E>> {
        let reg: Vbusv = self.read().await?;
        Ok(conversion::VBUSV.decode(reg.vbusv))
    }

    /// Charge current in mA from the last ADC conversion.
    pub async fn ichgr_ma(&mut self) -> Result<u16, Error<E>> {
        let reg: Ichgr = self.read().await?;
        Ok(conversion::ICHGR.decode(reg.ichgr))
    }

    /// Input current limit chosen by ICO, in mA.
    pub async fn idpm_lim_ma(&mut self) -> Result<u16, Error<E>> {
        let reg: IdpmLim = self.read().await?;
        Ok(conversion::IDPM_LIM.decode(reg.idpm_lim))
    }

    /// Reads all ADC result registers.
    pub async fn read_measurements(&mut self) -> Result<Measurements, Error<E>> {
        let batv: Batv = self.read().await?;
        let sysv: Sysv = self.read().await?;
        let tspct: Tspct = self.read().await?;
        let vbusv: Vbusv = self.read().await?;
        let ichgr: Ichgr = self.read().await?;

        let measurements = Measurements {
            battery_voltage: ElectricPotential::new::<millivolt>(
                conversion::BATV.decode_f32(batv.batv),
            ),
            system_voltage: ElectricPotential::new::<millivolt>(
                conversion::SYSV.decode_f32(sysv.sysv),
            ),
            vbus_voltage: ElectricPotential::new::<millivolt>(
                conversion::VBUSV.decode_f32(vbusv.vbusv),
            ),
            charge_current: ElectricCurrent::new::<milliampere>(
                conversion::ICHGR.decode_f32(ichgr.ichgr),
            ),
            ts_ratio: Ratio::new::<percent>(conversion::TSPCT.decode_f32(tspct.tspct)),
            vbus_good: vbusv.vbus_gd,
            thermal_regulation: batv.therm_stat,
        };
        #[cfg(feature = "defmt")]
        defmt::debug!("{}", measurements);
        Ok(measurements)
    }

    // REG14

    /// Sets REG_RST. Prefer [`reset`](Self::reset).
    pub async fn set_reg_rst(&mut self, value: bool) -> Result<(), Error<E>> {
        self.modify(|r: &mut Ctrl2| r.reg_rst = value).await
    }

    /// Reads every register once, in address order.
    pub async fn dump_registers(&mut self) -> Result<[(Register, u8); REGISTER_COUNT], Error<E>> {
        let mut dump = [(Register::Ilim, 0u8); REGISTER_COUNT];
        for (slot, reg) in dump.iter_mut().zip(Register::ALL) {
            *slot = (reg, self.read_register(reg).await?);
        }
        Ok(dump)
    }

    /// Applies a set of charging parameters.
    ///
    /// All values are range checked before the first bus access, so an
    /// out-of-range value leaves the chip untouched. Each affected register is
    /// then updated with one read-modify-write.
    pub async fn apply_config(&mut self, config: &ChargerConfig) -> Result<(), Error<E>> {
        let iinlim = conversion::IINLIM.encode(config.input_current_limit_ma)?;
        let ichg = conversion::ICHG.encode(config.charge_current_ma)?;
        let iprechg = conversion::IPRECHG.encode(config.precharge_current_ma)?;
        let iterm = conversion::ITERM.encode(config.termination_current_ma)?;
        let vreg = conversion::VREG.encode(config.charge_voltage_mv)?;
        let sys_min = conversion::SYS_MIN.encode(config.min_system_voltage_mv)?;
        let boostv = conversion::BOOSTV.encode(config.boost_voltage_mv)?;
        let boost_lim = conversion::BOOST_LIM.encode(config.boost_current_limit_ma)?;

        self.modify(|r: &mut Ilim| r.iinlim = iinlim).await?;
        self.modify(|r: &mut SysCtrl| {
            r.sys_min = sys_min;
            r.chg_config = config.charge_enable;
        })
        .await?;
        self.modify(|r: &mut Ichg| r.ichg = ichg).await?;
        self.modify(|r: &mut IpreIterm| {
            r.iprechg = iprechg;
            r.iterm = iterm;
        })
        .await?;
        self.modify(|r: &mut Vreg| r.vreg = vreg).await?;
        self.modify(|r: &mut Timer| {
            r.en_term = config.termination_enable;
            r.watchdog = config.watchdog as u8;
            r.chg_timer = config.charge_timer as u8;
        })
        .await?;
        self.modify(|r: &mut BoostCtrl| {
            r.boostv = boostv;
            r.boost_lim = boost_lim;
        })
        .await
    }

    /// Reads back the parameters covered by [`ChargerConfig`].
    pub async fn read_config(&mut self) -> Result<ChargerConfig, Error<E>> {
        let ilim: Ilim = self.read().await?;
        let sys_ctrl: SysCtrl = self.read().await?;
        let ichg: Ichg = self.read().await?;
        let ipre_iterm: IpreIterm = self.read().await?;
        let vreg: Vreg = self.read().await?;
        let timer: Timer = self.read().await?;
        let boost: BoostCtrl = self.read().await?;

        Ok(ChargerConfig {
            input_current_limit_ma: conversion::IINLIM.decode(ilim.iinlim),
            charge_current_ma: conversion::ICHG.decode(ichg.ichg),
            precharge_current_ma: conversion::IPRECHG.decode(ipre_iterm.iprechg),
            termination_current_ma: conversion::ITERM.decode(ipre_iterm.iterm),
            charge_voltage_mv: conversion::VREG.decode(vreg.vreg),
            min_system_voltage_mv: conversion::SYS_MIN.decode(sys_ctrl.sys_min),
            boost_voltage_mv: conversion::BOOSTV.decode(boost.boostv),
            boost_current_limit_ma: conversion::BOOST_LIM.decode(boost.boost_lim),
            watchdog: WatchdogTimer::from_code(timer.watchdog),
            charge_timer: ChargeTimer::from_code(timer.chg_timer),
            termination_enable: timer.en_term,
            charge_enable: sys_ctrl.chg_config,
        })
    }
}
