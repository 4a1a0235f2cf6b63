//! Register map of the BQ25896.
//!
//! Bit positions follow the datasheet register tables (bit 7 = MSB). Every
//! register struct covers all eight bits, reserved ones included, so that a
//! read-modify-write writes back exactly what was read for untouched fields.

/// Register addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// REG00: input current limit, HIZ and ILIM pin control
    Ilim = 0x00,
    /// REG01: boost thermal thresholds and VINDPM offset
    VindpmOs = 0x01,
    /// REG02: ADC control, ICO and input detection
    AdcCtrl = 0x02,
    /// REG03: charge/OTG enable, watchdog reset and minimum system voltage
    SysCtrl = 0x03,
    /// REG04: fast charge current limit
    Ichg = 0x04,
    /// REG05: pre-charge and termination current limits
    IpreIterm = 0x05,
    /// REG06: charge voltage limit
    Vreg = 0x06,
    /// REG07: termination, watchdog and safety timer control
    Timer = 0x07,
    /// REG08: IR compensation and thermal regulation
    BatComp = 0x08,
    /// REG09: ICO, BATFET and current pulse control
    Ctrl1 = 0x09,
    /// REG0A: boost mode voltage and current limit
    BoostCtrl = 0x0A,
    /// REG0B: VBUS, charge and power good status (read-only)
    VbusStat = 0x0B,
    /// REG0C: fault status (read-only)
    Fault = 0x0C,
    /// REG0D: absolute VINDPM threshold
    Vindpm = 0x0D,
    /// REG0E: ADC battery voltage (read-only)
    Batv = 0x0E,
    /// REG0F: ADC system voltage (read-only)
    Sysv = 0x0F,
    /// REG10: ADC TS voltage as percentage of REGN (read-only)
    Tspct = 0x10,
    /// REG11: ADC VBUS voltage (read-only)
    Vbusv = 0x11,
    /// REG12: ADC charge current (read-only)
    Ichgr = 0x12,
    /// REG13: ICO input current limit and DPM status (read-only)
    IdpmLim = 0x13,
    /// REG14: register reset, ICO status and part information
    Ctrl2 = 0x14,
}

/// Number of addressable registers.
pub const REGISTER_COUNT: usize = 21;

impl Register {
    /// All registers in address order.
    pub const ALL: [Register; REGISTER_COUNT] = [
        Register::Ilim,
        Register::VindpmOs,
        Register::AdcCtrl,
        Register::SysCtrl,
        Register::Ichg,
        Register::IpreIterm,
        Register::Vreg,
        Register::Timer,
        Register::BatComp,
        Register::Ctrl1,
        Register::BoostCtrl,
        Register::VbusStat,
        Register::Fault,
        Register::Vindpm,
        Register::Batv,
        Register::Sysv,
        Register::Tspct,
        Register::Vbusv,
        Register::Ichgr,
        Register::IdpmLim,
        Register::Ctrl2,
    ];

    /// Returns `true` for registers the host can only read.
    pub const fn is_read_only(self) -> bool {
        matches!(
            self,
            Register::VbusStat
                | Register::Fault
                | Register::Batv
                | Register::Sysv
                | Register::Tspct
                | Register::Vbusv
                | Register::Ichgr
                | Register::IdpmLim
        )
    }
}

/// A named bit range inside one register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    pub name: &'static str,
    pub register: Register,
    /// Position of the least significant bit.
    pub shift: u8,
    pub width: u8,
}

impl Field {
    pub const fn new(name: &'static str, register: Register, shift: u8, width: u8) -> Self {
        Self {
            name,
            register,
            shift,
            width,
        }
    }

    /// Mask of the field bits in place.
    pub const fn mask(self) -> u8 {
        (((1u16 << self.width) - 1) as u8) << self.shift
    }

    /// Largest raw code the field can hold.
    pub const fn max_code(self) -> u8 {
        ((1u16 << self.width) - 1) as u8
    }

    /// Extracts the raw code of this field from a register byte.
    pub const fn extract(self, byte: u8) -> u8 {
        (byte & self.mask()) >> self.shift
    }

    /// Replaces the bits of this field in `byte` with `code`, leaving every other bit as is.
    pub const fn insert(self, byte: u8, code: u8) -> u8 {
        (byte & !self.mask()) | ((code << self.shift) & self.mask())
    }
}

/// Field layout of every register, LSB position and width per field.
pub mod fields {
    use super::{Field, Register};

    // REG00
    pub const IINLIM: Field = Field::new("IINLIM", Register::Ilim, 0, 6);
    pub const EN_ILIM: Field = Field::new("EN_ILIM", Register::Ilim, 6, 1);
    pub const EN_HIZ: Field = Field::new("EN_HIZ", Register::Ilim, 7, 1);

    // REG01
    pub const VINDPM_OS: Field = Field::new("VINDPM_OS", Register::VindpmOs, 0, 5);
    pub const BCOLD: Field = Field::new("BCOLD", Register::VindpmOs, 5, 1);
    pub const BHOT: Field = Field::new("BHOT", Register::VindpmOs, 6, 2);

    // REG02
    pub const AUTO_DPDM_EN: Field = Field::new("AUTO_DPDM_EN", Register::AdcCtrl, 0, 1);
    pub const FORCE_DPDM: Field = Field::new("FORCE_DPDM", Register::AdcCtrl, 1, 1);
    pub const ADC_CTRL_RESERVED: Field = Field::new("RESERVED", Register::AdcCtrl, 2, 2);
    pub const ICO_EN: Field = Field::new("ICO_EN", Register::AdcCtrl, 4, 1);
    pub const BOOST_FREQ: Field = Field::new("BOOST_FREQ", Register::AdcCtrl, 5, 1);
    pub const CONV_RATE: Field = Field::new("CONV_RATE", Register::AdcCtrl, 6, 1);
    pub const CONV_START: Field = Field::new("CONV_START", Register::AdcCtrl, 7, 1);

    // REG03
    pub const MIN_VBAT_SEL: Field = Field::new("MIN_VBAT_SEL", Register::SysCtrl, 0, 1);
    pub const SYS_MIN: Field = Field::new("SYS_MIN", Register::SysCtrl, 1, 3);
    pub const CHG_CONFIG: Field = Field::new("CHG_CONFIG", Register::SysCtrl, 4, 1);
    pub const OTG_CONFIG: Field = Field::new("OTG_CONFIG", Register::SysCtrl, 5, 1);
    pub const WD_RST: Field = Field::new("WD_RST", Register::SysCtrl, 6, 1);
    pub const BAT_LOADEN: Field = Field::new("BAT_LOADEN", Register::SysCtrl, 7, 1);

    // REG04
    pub const ICHG: Field = Field::new("ICHG", Register::Ichg, 0, 7);
    pub const EN_PUMPX: Field = Field::new("EN_PUMPX", Register::Ichg, 7, 1);

    // REG05
    pub const ITERM: Field = Field::new("ITERM", Register::IpreIterm, 0, 4);
    pub const IPRECHG: Field = Field::new("IPRECHG", Register::IpreIterm, 4, 4);

    // REG06
    pub const VRECHG: Field = Field::new("VRECHG", Register::Vreg, 0, 1);
    pub const BATLOWV: Field = Field::new("BATLOWV", Register::Vreg, 1, 1);
    pub const VREG: Field = Field::new("VREG", Register::Vreg, 2, 6);

    // REG07
    pub const JEITA_ISET: Field = Field::new("JEITA_ISET", Register::Timer, 0, 1);
    pub const CHG_TIMER: Field = Field::new("CHG_TIMER", Register::Timer, 1, 2);
    pub const EN_TIMER: Field = Field::new("EN_TIMER", Register::Timer, 3, 1);
    pub const WATCHDOG: Field = Field::new("WATCHDOG", Register::Timer, 4, 2);
    pub const STAT_DIS: Field = Field::new("STAT_DIS", Register::Timer, 6, 1);
    pub const EN_TERM: Field = Field::new("EN_TERM", Register::Timer, 7, 1);

    // REG08
    pub const TREG: Field = Field::new("TREG", Register::BatComp, 0, 2);
    pub const VCLAMP: Field = Field::new("VCLAMP", Register::BatComp, 2, 3);
    pub const BAT_COMP: Field = Field::new("BAT_COMP", Register::BatComp, 5, 3);

    // REG09
    pub const PUMPX_DN: Field = Field::new("PUMPX_DN", Register::Ctrl1, 0, 1);
    pub const PUMPX_UP: Field = Field::new("PUMPX_UP", Register::Ctrl1, 1, 1);
    pub const BATFET_RST_EN: Field = Field::new("BATFET_RST_EN", Register::Ctrl1, 2, 1);
    pub const BATFET_DLY: Field = Field::new("BATFET_DLY", Register::Ctrl1, 3, 1);
    pub const JEITA_VSET: Field = Field::new("JEITA_VSET", Register::Ctrl1, 4, 1);
    pub const BATFET_DIS: Field = Field::new("BATFET_DIS", Register::Ctrl1, 5, 1);
    pub const TMR2X_EN: Field = Field::new("TMR2X_EN", Register::Ctrl1, 6, 1);
    pub const FORCE_ICO: Field = Field::new("FORCE_ICO", Register::Ctrl1, 7, 1);

    // REG0A
    pub const BOOST_LIM: Field = Field::new("BOOST_LIM", Register::BoostCtrl, 0, 3);
    pub const PFM_OTG_DIS: Field = Field::new("PFM_OTG_DIS", Register::BoostCtrl, 3, 1);
    pub const BOOSTV: Field = Field::new("BOOSTV", Register::BoostCtrl, 4, 4);

    // REG0B
    pub const VSYS_STAT: Field = Field::new("VSYS_STAT", Register::VbusStat, 0, 1);
    pub const VBUS_STAT_RESERVED: Field = Field::new("RESERVED", Register::VbusStat, 1, 1);
    pub const PG_STAT: Field = Field::new("PG_STAT", Register::VbusStat, 2, 1);
    pub const CHRG_STAT: Field = Field::new("CHRG_STAT", Register::VbusStat, 3, 2);
    pub const VBUS_STAT: Field = Field::new("VBUS_STAT", Register::VbusStat, 5, 3);

    // REG0C
    pub const NTC_FAULT: Field = Field::new("NTC_FAULT", Register::Fault, 0, 3);
    pub const BAT_FAULT: Field = Field::new("BAT_FAULT", Register::Fault, 3, 1);
    pub const CHRG_FAULT: Field = Field::new("CHRG_FAULT", Register::Fault, 4, 2);
    pub const BOOST_FAULT: Field = Field::new("BOOST_FAULT", Register::Fault, 6, 1);
    pub const WATCHDOG_FAULT: Field = Field::new("WATCHDOG_FAULT", Register::Fault, 7, 1);

    // REG0D
    pub const VINDPM: Field = Field::new("VINDPM", Register::Vindpm, 0, 7);
    pub const FORCE_VINDPM: Field = Field::new("FORCE_VINDPM", Register::Vindpm, 7, 1);

    // REG0E
    pub const BATV: Field = Field::new("BATV", Register::Batv, 0, 7);
    pub const THERM_STAT: Field = Field::new("THERM_STAT", Register::Batv, 7, 1);

    // REG0F
    pub const SYSV: Field = Field::new("SYSV", Register::Sysv, 0, 7);
    pub const SYSV_RESERVED: Field = Field::new("RESERVED", Register::Sysv, 7, 1);

    // REG10
    pub const TSPCT: Field = Field::new("TSPCT", Register::Tspct, 0, 7);
    pub const TSPCT_RESERVED: Field = Field::new("RESERVED", Register::Tspct, 7, 1);

    // REG11
    pub const VBUSV: Field = Field::new("VBUSV", Register::Vbusv, 0, 7);
    pub const VBUS_GD: Field = Field::new("VBUS_GD", Register::Vbusv, 7, 1);

    // REG12
    pub const ICHGR: Field = Field::new("ICHGR", Register::Ichgr, 0, 7);
    pub const ICHGR_UNUSED: Field = Field::new("UNUSED", Register::Ichgr, 7, 1);

    // REG13
    pub const IDPM_LIM: Field = Field::new("IDPM_LIM", Register::IdpmLim, 0, 6);
    pub const IDPM_STAT: Field = Field::new("IDPM_STAT", Register::IdpmLim, 6, 1);
    pub const VDPM_STAT: Field = Field::new("VDPM_STAT", Register::IdpmLim, 7, 1);

    // REG14
    pub const DEV_REV: Field = Field::new("DEV_REV", Register::Ctrl2, 0, 2);
    pub const TS_PROFILE: Field = Field::new("TS_PROFILE", Register::Ctrl2, 2, 1);
    pub const PN: Field = Field::new("PN", Register::Ctrl2, 3, 3);
    pub const ICO_OPTIMIZED: Field = Field::new("ICO_OPTIMIZED", Register::Ctrl2, 6, 1);
    pub const REG_RST: Field = Field::new("REG_RST", Register::Ctrl2, 7, 1);
}

/// Conversion between a raw field code and the struct member type.
pub trait FieldValue: Copy {
    fn from_code(code: u8) -> Self;
    fn into_code(self) -> u8;
}

impl FieldValue for bool {
    fn from_code(code: u8) -> Self {
        code != 0
    }

    fn into_code(self) -> u8 {
        self as u8
    }
}

impl FieldValue for u8 {
    fn from_code(code: u8) -> Self {
        code
    }

    fn into_code(self) -> u8 {
        self
    }
}

/// A register the driver can read and decode.
pub trait ReadableRegister: Copy + From<u8> + Into<u8> {
    const REGISTER: Register;
    /// Fields of the register, LSB first.
    const FIELDS: &'static [Field];
}

/// A register the driver may also write back.
///
/// Only implemented for read-write registers, so writes to status and ADC
/// registers do not compile.
pub trait WritableRegister: ReadableRegister {}

macro_rules! register {
    (
        $(#[$meta:meta])*
        $name:ident: $reg:ident, $access:ident {
            $( $(#[$fmeta:meta])* $field:ident: $ty:ty = $def:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )+
        }

        impl From<u8> for $name {
            fn from(byte: u8) -> Self {
                Self {
                    $( $field: <$ty as FieldValue>::from_code(fields::$def.extract(byte)), )+
                }
            }
        }

        impl From<$name> for u8 {
            fn from(reg: $name) -> u8 {
                let mut byte = 0u8;
                $( byte = fields::$def.insert(byte, FieldValue::into_code(reg.$field)); )+
                byte
            }
        }

        impl ReadableRegister for $name {
            const REGISTER: Register = Register::$reg;
            const FIELDS: &'static [Field] = &[$( fields::$def ),+];
        }

        register!(@access $name $access);
    };
    (@access $name:ident rw) => {
        impl WritableRegister for $name {}
    };
    (@access $name:ident ro) => {};
}

register! {
    /// REG00
    Ilim: Ilim, rw {
        /// Input current limit code, 100 mA + 50 mA/LSB.
        iinlim: u8 = IINLIM,
        /// ILIM pin enable.
        en_ilim: bool = EN_ILIM,
        /// HIZ mode enable.
        en_hiz: bool = EN_HIZ,
    }
}

register! {
    /// REG01
    VindpmOs: VindpmOs, rw {
        /// Input voltage limit offset code, 100 mV/LSB.
        vindpm_os: u8 = VINDPM_OS,
        bcold: bool = BCOLD,
        bhot: u8 = BHOT,
    }
}

register! {
    /// REG02
    AdcCtrl: AdcCtrl, rw {
        auto_dpdm_en: bool = AUTO_DPDM_EN,
        force_dpdm: bool = FORCE_DPDM,
        reserved: u8 = ADC_CTRL_RESERVED,
        ico_en: bool = ICO_EN,
        boost_freq: bool = BOOST_FREQ,
        conv_rate: bool = CONV_RATE,
        conv_start: bool = CONV_START,
    }
}

register! {
    /// REG03
    SysCtrl: SysCtrl, rw {
        min_vbat_sel: bool = MIN_VBAT_SEL,
        /// Minimum system voltage code, 3000 mV + 100 mV/LSB.
        sys_min: u8 = SYS_MIN,
        chg_config: bool = CHG_CONFIG,
        otg_config: bool = OTG_CONFIG,
        wd_rst: bool = WD_RST,
        bat_loaden: bool = BAT_LOADEN,
    }
}

register! {
    /// REG04
    Ichg: Ichg, rw {
        /// Fast charge current code, 64 mA/LSB.
        ichg: u8 = ICHG,
        en_pumpx: bool = EN_PUMPX,
    }
}

register! {
    /// REG05
    IpreIterm: IpreIterm, rw {
        /// Termination current code, 64 mA + 64 mA/LSB.
        iterm: u8 = ITERM,
        /// Pre-charge current code, 64 mA + 64 mA/LSB.
        iprechg: u8 = IPRECHG,
    }
}

register! {
    /// REG06
    Vreg: Vreg, rw {
        vrechg: bool = VRECHG,
        batlowv: bool = BATLOWV,
        /// Charge voltage code, 3840 mV + 16 mV/LSB.
        vreg: u8 = VREG,
    }
}

register! {
    /// REG07
    Timer: Timer, rw {
        jeita_iset: bool = JEITA_ISET,
        chg_timer: u8 = CHG_TIMER,
        en_timer: bool = EN_TIMER,
        watchdog: u8 = WATCHDOG,
        stat_dis: bool = STAT_DIS,
        en_term: bool = EN_TERM,
    }
}

register! {
    /// REG08
    BatComp: BatComp, rw {
        treg: u8 = TREG,
        /// IR compensation clamp code, 32 mV/LSB.
        vclamp: u8 = VCLAMP,
        /// IR compensation resistor code, 20 mΩ/LSB.
        bat_comp: u8 = BAT_COMP,
    }
}

register! {
    /// REG09
    Ctrl1: Ctrl1, rw {
        pumpx_dn: bool = PUMPX_DN,
        pumpx_up: bool = PUMPX_UP,
        batfet_rst_en: bool = BATFET_RST_EN,
        batfet_dly: bool = BATFET_DLY,
        jeita_vset: bool = JEITA_VSET,
        batfet_dis: bool = BATFET_DIS,
        tmr2x_en: bool = TMR2X_EN,
        force_ico: bool = FORCE_ICO,
    }
}

register! {
    /// REG0A
    BoostCtrl: BoostCtrl, rw {
        /// Boost current limit code, see [`crate::conversion::BOOST_LIM`].
        boost_lim: u8 = BOOST_LIM,
        pfm_otg_dis: bool = PFM_OTG_DIS,
        /// Boost voltage code, 4550 mV + 64 mV/LSB.
        boostv: u8 = BOOSTV,
    }
}

register! {
    /// REG0B
    VbusStat: VbusStat, ro {
        vsys_stat: bool = VSYS_STAT,
        reserved: bool = VBUS_STAT_RESERVED,
        pg_stat: bool = PG_STAT,
        chrg_stat: u8 = CHRG_STAT,
        vbus_stat: u8 = VBUS_STAT,
    }
}

register! {
    /// REG0C
    Fault: Fault, ro {
        ntc_fault: u8 = NTC_FAULT,
        bat_fault: bool = BAT_FAULT,
        chrg_fault: u8 = CHRG_FAULT,
        boost_fault: bool = BOOST_FAULT,
        watchdog_fault: bool = WATCHDOG_FAULT,
    }
}

register! {
    /// REG0D
    Vindpm: Vindpm, rw {
        /// Absolute VINDPM code, 2600 mV + 100 mV/LSB.
        vindpm: u8 = VINDPM,
        force_vindpm: bool = FORCE_VINDPM,
    }
}

register! {
    /// REG0E
    Batv: Batv, ro {
        batv: u8 = BATV,
        therm_stat: bool = THERM_STAT,
    }
}

register! {
    /// REG0F
    Sysv: Sysv, ro {
        sysv: u8 = SYSV,
        reserved: bool = SYSV_RESERVED,
    }
}

register! {
    /// REG10
    Tspct: Tspct, ro {
        tspct: u8 = TSPCT,
        reserved: bool = TSPCT_RESERVED,
    }
}

register! {
    /// REG11
    Vbusv: Vbusv, ro {
        vbusv: u8 = VBUSV,
        vbus_gd: bool = VBUS_GD,
    }
}

register! {
    /// REG12
    Ichgr: Ichgr, ro {
        ichgr: u8 = ICHGR,
        unused: bool = ICHGR_UNUSED,
    }
}

register! {
    /// REG13
    IdpmLim: IdpmLim, ro {
        idpm_lim: u8 = IDPM_LIM,
        idpm_stat: bool = IDPM_STAT,
        vdpm_stat: bool = VDPM_STAT,
    }
}

register! {
    /// REG14
    Ctrl2: Ctrl2, rw {
        dev_rev: u8 = DEV_REV,
        ts_profile: bool = TS_PROFILE,
        pn: u8 = PN,
        ico_optimized: bool = ICO_OPTIMIZED,
        /// Self-clearing register reset.
        reg_rst: bool = REG_RST,
    }
}
