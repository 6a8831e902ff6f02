/*!
A platform agnostic driver for the NXP [PCA9632] 4-channel LED controller,
based on the [`embedded-hal`] I2C traits.

## The Device

The PCA9632 has four PWM outputs (typically one RGB LED plus a spare
channel), a shared group PWM used for dimming or blinking, and a LEDOUT
register selecting per channel whether the output is off, fully on, or
PWM driven.

## Usage

The driver owns the bus handle but not a device address, so a single
instance can drive every PCA9632 on that bus:

```no_run
# use pca9632_hal::Pca9632;
# fn demo<I2C: pca9632_hal::hal::i2c::I2c>(i2c: I2C) -> Result<(), pca9632_hal::Error<I2C::Error>> {
let mut leds = Pca9632::new(i2c);
leds.init(0x62)?;
leds.set_rgb(0x62, 0xFF, 0x40, 0x00)?;
leds.set_brightness(0x62, 0x80)?;
# Ok(())
# }
```

Every operation is one synchronous write; nothing about the chip is cached
here. Serialising access to a shared bus is up to the caller.

[PCA9632]: https://www.nxp.com/docs/en/data-sheet/PCA9632.pdf
[`embedded-hal`]: https://github.com/rust-embedded/embedded-hal
*/

use core::fmt;

use embedded_hal::i2c::I2c;
use log::{debug, trace, warn};

use crate::command::{Command, MAX_PAYLOAD_LEN};
use crate::registers::{
    AutoIncrement, Channel, LedOutput, Mode1, Mode2, Register, SubAddress, CHANNEL_COUNT,
    RESET_ADDRESS, RESET_SEQUENCE,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error<E> {
    /// The bus transaction failed.
    I2c(E),
    /// Channel index outside 0..=3; nothing was sent.
    InvalidChannel(u8),
    /// More PWM values than channels; nothing was sent.
    TooManyChannels(usize),
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "I2C Error: {:?}", e),
            Error::InvalidChannel(ix) => write!(f, "Invalid Channel: {}", ix),
            Error::TooManyChannels(n) => {
                write!(f, "Too Many Channels: {} (max {})", n, MAX_PAYLOAD_LEN)
            }
        }
    }
}

/// What GRPPWM/GRPFREQ drive.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GroupMode {
    /// GRPPWM scales every group-PWM channel (brightness).
    Dimming,
    /// GRPFREQ sets a blink period, GRPPWM its duty cycle.
    Blinking,
}

/// Register contents written by [`Pca9632::init_with`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode1: Mode1,
    pub mode2: Mode2,
    pub pwm: [u8; CHANNEL_COUNT],
    pub group_pwm: u8,
    pub group_freq: u8,
    pub outputs: [LedOutput; CHANNEL_COUNT],
}

impl Default for Config {
    /// Awake, answering all-call, every channel dark but under group
    /// control at full group brightness.
    fn default() -> Self {
        Self {
            mode1: Mode1::ALLCALL,
            mode2: Mode2::OUTNE,
            pwm: [0; CHANNEL_COUNT],
            group_pwm: 0xFF,
            group_freq: 0x00,
            outputs: [LedOutput::GroupPwm; CHANNEL_COUNT],
        }
    }
}

impl Config {
    fn to_bytes(&self) -> [u8; 10] {
        [
            // Auto-increment starting from MODE1
            Register::Mode1.control(AutoIncrement::All),
            self.mode1.bits(),             // MODE1
            self.mode2.bits(),             // MODE2
            self.pwm[0],                   // PWM0
            self.pwm[1],                   // PWM1
            self.pwm[2],                   // PWM2
            self.pwm[3],                   // PWM3
            self.group_pwm,                // GRPPWM
            self.group_freq,               // GRPFREQ
            LedOutput::pack(self.outputs), // LEDOUT
        ]
    }
}

/// LEDOUT value written by `init` and `enable`.
const OUTPUTS_ENABLED: [LedOutput; CHANNEL_COUNT] = [LedOutput::GroupPwm; CHANNEL_COUNT];
const OUTPUTS_DISABLED: [LedOutput; CHANNEL_COUNT] = [LedOutput::Off; CHANNEL_COUNT];

/// PCA9632 driver
pub struct Pca9632<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Pca9632<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Release the bus and consume self.
    pub fn free(self) -> I2C {
        self.i2c
    }

    fn send(&mut self, address: u8, bytes: &[u8]) -> Result<(), Error<I2C::Error>> {
        trace!("pca9632@{:#04x} <- {:02x?}", address, bytes);
        self.i2c.write(address, bytes).map_err(Error::I2c)
    }

    fn send_command(&mut self, address: u8, cmd: &Command) -> Result<(), Error<I2C::Error>> {
        self.send(address, cmd.as_bytes())
    }

    /// Writes one register with auto-increment off.
    pub fn write_register(
        &mut self,
        address: u8,
        reg: Register,
        value: u8,
    ) -> Result<(), Error<I2C::Error>> {
        self.send_command(address, &Command::single(reg, value))
    }

    /// Software reset through the SWRST call address.
    ///
    /// This resets every PCA9632 on the bus, not just one.
    pub fn reset(&mut self) -> Result<(), Error<I2C::Error>> {
        debug!("pca9632: software reset");
        self.send(RESET_ADDRESS, &RESET_SEQUENCE)
    }

    /// Resets the bus and loads [`Config::default`] into the chip at `address`.
    pub fn init(&mut self, address: u8) -> Result<(), Error<I2C::Error>> {
        self.init_with(address, &Config::default())
    }

    /// Resets the bus, then writes MODE1 through LEDOUT in one
    /// auto-incrementing transaction.
    ///
    /// The config block goes out even if the reset is not acknowledged;
    /// the first error is returned.
    pub fn init_with(&mut self, address: u8, config: &Config) -> Result<(), Error<I2C::Error>> {
        let reset = self.reset();
        debug!("pca9632@{:#04x}: init {:?}", address, config);
        let configured = self.send(address, &config.to_bytes());
        reset.and(configured)
    }

    pub fn set_channel(
        &mut self,
        address: u8,
        channel: Channel,
        value: u8,
    ) -> Result<(), Error<I2C::Error>> {
        self.write_register(address, channel.register(), value)
    }

    /// Like [`Pca9632::set_channel`] for callers holding a raw index.
    ///
    /// An index above 3 is rejected with [`Error::InvalidChannel`] and
    /// nothing is sent.
    pub fn set_channel_index(
        &mut self,
        address: u8,
        ix: u8,
        value: u8,
    ) -> Result<(), Error<I2C::Error>> {
        match Channel::from_index(ix) {
            Some(channel) => self.set_channel(address, channel, value),
            None => {
                warn!("pca9632@{:#04x}: no channel {}", address, ix);
                Err(Error::InvalidChannel(ix))
            }
        }
    }

    pub fn set_red(&mut self, address: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        self.set_channel(address, Channel::RED, value)
    }

    pub fn set_green(&mut self, address: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        self.set_channel(address, Channel::GREEN, value)
    }

    pub fn set_blue(&mut self, address: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        self.set_channel(address, Channel::BLUE, value)
    }

    /// Writes `values` to PWM0, PWM1, ... in one transaction.
    ///
    /// Channels past `values.len()` are left as they are. More than four
    /// values would run on into GRPPWM and LEDOUT, so they are rejected
    /// with [`Error::TooManyChannels`] instead.
    pub fn set_all_channels(
        &mut self,
        address: u8,
        values: &[u8],
    ) -> Result<(), Error<I2C::Error>> {
        match Command::burst(Register::Pwm0, AutoIncrement::All, values) {
            Some(cmd) => self.send_command(address, &cmd),
            None => {
                warn!(
                    "pca9632@{:#04x}: {} channel values, max {}",
                    address,
                    values.len(),
                    MAX_PAYLOAD_LEN
                );
                Err(Error::TooManyChannels(values.len()))
            }
        }
    }

    /// Writes all three colour channels at once.
    ///
    /// Registers ascend blue, green, red.
    pub fn set_rgb(
        &mut self,
        address: u8,
        red: u8,
        green: u8,
        blue: u8,
    ) -> Result<(), Error<I2C::Error>> {
        let mut values = [0u8; 3];
        values[Channel::BLUE.ix() as usize] = blue;
        values[Channel::GREEN.ix() as usize] = green;
        values[Channel::RED.ix() as usize] = red;
        self.set_all_channels(address, &values)
    }

    /// Group PWM: the brightness shared by every group-PWM channel.
    pub fn set_brightness(&mut self, address: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        self.write_register(address, Register::GrpPwm, value)
    }

    pub fn set_group_frequency(&mut self, address: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        self.write_register(address, Register::GrpFreq, value)
    }

    pub fn set_group_mode(
        &mut self,
        address: u8,
        mode: GroupMode,
    ) -> Result<(), Error<I2C::Error>> {
        let mode2 = match mode {
            GroupMode::Dimming => Mode2::OUTNE,
            GroupMode::Blinking => Mode2::OUTNE | Mode2::DMBLNK,
        };
        self.write_register(address, Register::Mode2, mode2.bits())
    }

    pub fn set_outputs(
        &mut self,
        address: u8,
        outputs: [LedOutput; CHANNEL_COUNT],
    ) -> Result<(), Error<I2C::Error>> {
        self.write_register(address, Register::LedOut, LedOutput::pack(outputs))
    }

    /// Puts every channel back under group PWM control, as after `init`.
    pub fn enable(&mut self, address: u8) -> Result<(), Error<I2C::Error>> {
        debug!("pca9632@{:#04x}: enable outputs", address);
        self.set_outputs(address, OUTPUTS_ENABLED)
    }

    /// Forces every output off. PWM registers keep their values, so a
    /// later `enable` brings back the same colour.
    pub fn disable(&mut self, address: u8) -> Result<(), Error<I2C::Error>> {
        debug!("pca9632@{:#04x}: disable outputs", address);
        self.set_outputs(address, OUTPUTS_DISABLED)
    }

    /// Stops the oscillator. Register contents survive.
    pub fn sleep(&mut self, address: u8) -> Result<(), Error<I2C::Error>> {
        debug!("pca9632@{:#04x}: sleep", address);
        self.write_register(address, Register::Mode1, (Mode1::SLEEP | Mode1::ALLCALL).bits())
    }

    /// Restarts the oscillator. The chip needs up to 500us before PWM
    /// output resumes.
    pub fn wake(&mut self, address: u8) -> Result<(), Error<I2C::Error>> {
        debug!("pca9632@{:#04x}: wake", address);
        self.write_register(address, Register::Mode1, Mode1::ALLCALL.bits())
    }

    pub fn set_sub_address(
        &mut self,
        address: u8,
        sub: SubAddress,
        value: u8,
    ) -> Result<(), Error<I2C::Error>> {
        self.write_register(address, sub.register(), value)
    }

    pub fn set_all_call_address(
        &mut self,
        address: u8,
        value: u8,
    ) -> Result<(), Error<I2C::Error>> {
        self.write_register(address, Register::AllCallAdr, value)
    }
}
