//! PCA9632 register map and field encodings.
//!
//! Everything here is a chip constant; nothing in this module touches the bus.

use bitflags::bitflags;

/// Software-reset (SWRST) call address. Every PCA9632 on the bus answers it.
pub const RESET_ADDRESS: u8 = 0x03;

/// Byte sequence that must follow the SWRST address for the reset to take.
pub const RESET_SEQUENCE: [u8; 2] = [0xA5, 0x5A];

/// Number of LED channels (and PWM registers) on the chip.
pub const CHANNEL_COUNT: usize = 4;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Register {
    Mode1 = 0,
    Mode2 = 1,
    Pwm0 = 2,
    Pwm1 = 3,
    Pwm2 = 4,
    Pwm3 = 5,
    GrpPwm = 6,
    GrpFreq = 7,
    LedOut = 8,
    SubAdr1 = 9,
    SubAdr2 = 10,
    SubAdr3 = 11,
    AllCallAdr = 12,
}

impl Register {
    pub fn addr(&self) -> u8 {
        *self as u8
    }

    /// Control byte addressing this register with the given auto-increment mode.
    pub fn control(&self, ai: AutoIncrement) -> u8 {
        self.addr() | ai.bits()
    }
}

/// Auto-increment selector, held in bits 7:5 of the control byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AutoIncrement {
    /// Only the addressed register is written.
    None = 0,
    /// Roll over every register, 0x00 to 0x0C.
    All = 4,
    /// Roll over the individual brightness registers only (PWM0..PWM3).
    Brightness = 5,
    /// Roll over the global control registers only (GRPPWM, GRPFREQ).
    Global = 6,
    /// Roll over PWM0..PWM3 followed by GRPPWM and GRPFREQ.
    IndividualAndGlobal = 7,
}

impl AutoIncrement {
    pub fn bits(&self) -> u8 {
        (*self as u8) << 5
    }
}

bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct Mode1: u8 {
        const SLEEP = 0b0001_0000;
        const SUB1 = 0b0000_1000;
        const SUB2 = 0b0000_0100;
        const SUB3 = 0b0000_0010;
        const ALLCALL = 0b0000_0001;
    }
}

bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct Mode2: u8 {
        /// Group control is blinking instead of dimming.
        const DMBLNK = 0b0010_0000;
        const INVRT = 0b0001_0000;
        /// Outputs change on ACK instead of STOP.
        const OCH = 0b0000_1000;
        /// Totem-pole outputs (open-drain when clear).
        const OUTDRV = 0b0000_0100;
        const OUTNE = 0b0000_0001;
    }
}

/// Per-channel driver state, two bits each in LEDOUT.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LedOutput {
    Off = 0,
    On = 1,
    /// Controlled by the channel's own PWM register.
    Pwm = 2,
    /// Controlled by the channel's PWM register and GRPPWM.
    GroupPwm = 3,
}

impl LedOutput {
    /// Packs four channel states into a LEDOUT value, channel `n` at bit `2n`.
    pub fn pack(states: [LedOutput; CHANNEL_COUNT]) -> u8 {
        states
            .iter()
            .enumerate()
            .fold(0u8, |acc, (n, s)| acc | ((*s as u8) << (2 * n)))
    }
}

/// One of the four LED channels.
///
/// The board this driver was written for wires blue, green and red onto
/// PWM0, PWM1 and PWM2; the colour aliases below follow that wiring.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Channel {
    Pwm0 = 0,
    Pwm1 = 1,
    Pwm2 = 2,
    Pwm3 = 3,
}

impl Channel {
    pub const BLUE: Channel = Channel::Pwm0;
    pub const GREEN: Channel = Channel::Pwm1;
    pub const RED: Channel = Channel::Pwm2;

    pub const ALL: [Channel; CHANNEL_COUNT] =
        [Channel::Pwm0, Channel::Pwm1, Channel::Pwm2, Channel::Pwm3];

    pub fn from_index(ix: u8) -> Option<Channel> {
        Channel::ALL.get(ix as usize).copied()
    }

    pub fn ix(&self) -> u8 {
        *self as u8
    }

    pub fn register(&self) -> Register {
        match self {
            Channel::Pwm0 => Register::Pwm0,
            Channel::Pwm1 => Register::Pwm1,
            Channel::Pwm2 => Register::Pwm2,
            Channel::Pwm3 => Register::Pwm3,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SubAddress {
    One,
    Two,
    Three,
}

impl SubAddress {
    pub fn register(&self) -> Register {
        match self {
            SubAddress::One => Register::SubAdr1,
            SubAddress::Two => Register::SubAdr2,
            SubAddress::Three => Register::SubAdr3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_bytes() {
        assert_eq!(Register::Mode1.control(AutoIncrement::All), 0x80);
        assert_eq!(Register::Pwm0.control(AutoIncrement::All), 0x82);
        assert_eq!(Register::GrpPwm.control(AutoIncrement::None), 0x06);
        assert_eq!(Register::Pwm0.control(AutoIncrement::Brightness), 0xA2);
        assert_eq!(Register::GrpPwm.control(AutoIncrement::Global), 0xC6);
        assert_eq!(Register::Pwm0.control(AutoIncrement::IndividualAndGlobal), 0xE2);
    }

    #[test]
    fn ledout_packing() {
        assert_eq!(LedOutput::pack([LedOutput::GroupPwm; 4]), 0xFF);
        assert_eq!(LedOutput::pack([LedOutput::Off; 4]), 0x00);
        assert_eq!(
            LedOutput::pack([LedOutput::On, LedOutput::Pwm, LedOutput::GroupPwm, LedOutput::Off]),
            0b00_11_10_01
        );
    }

    #[test]
    fn channel_table() {
        for (n, reg) in [2u8, 3, 4, 5].iter().enumerate() {
            let ch = Channel::from_index(n as u8).unwrap();
            assert_eq!(ch.ix(), n as u8);
            assert_eq!(ch.register().addr(), *reg);
        }
        assert_eq!(Channel::from_index(4), None);
        assert_eq!(Channel::from_index(0xFF), None);

        assert_eq!(Channel::RED.register(), Register::Pwm2);
        assert_eq!(Channel::GREEN.register(), Register::Pwm1);
        assert_eq!(Channel::BLUE.register(), Register::Pwm0);
    }

    #[test]
    fn mode_bits() {
        assert_eq!((Mode1::SLEEP | Mode1::ALLCALL).bits(), 0x11);
        assert_eq!(Mode2::OUTNE.bits(), 0x01);
        assert_eq!((Mode2::DMBLNK | Mode2::OUTNE).bits(), 0x21);
    }
}
