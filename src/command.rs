use heapless::Vec;

use crate::registers::{AutoIncrement, Register, CHANNEL_COUNT};

/// Largest payload one command carries: one byte per PWM channel.
pub const MAX_PAYLOAD_LEN: usize = CHANNEL_COUNT;

/// Control byte plus payload.
pub const MAX_COMMAND_LEN: usize = 1 + MAX_PAYLOAD_LEN;

/// A single PCA9632 write transaction: one control byte (register address
/// OR'd with the auto-increment selector) followed by the payload.
///
/// Lives on the stack for one call and never exceeds [`MAX_COMMAND_LEN`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    bytes: Vec<u8, MAX_COMMAND_LEN>,
}

impl Command {
    /// A write of `value` to one register, auto-increment off.
    pub fn single(reg: Register, value: u8) -> Self {
        // Two bytes never exceed MAX_COMMAND_LEN.
        let bytes = [reg.control(AutoIncrement::None), value].into_iter().collect();
        Self { bytes }
    }

    /// A write starting at `reg` with `payload` streamed through the
    /// auto-increment range `ai`.
    ///
    /// Returns `None` if `payload` is longer than [`MAX_PAYLOAD_LEN`].
    pub fn burst(reg: Register, ai: AutoIncrement, payload: &[u8]) -> Option<Self> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return None;
        }
        let mut bytes = Vec::new();
        bytes.push(reg.control(ai)).ok()?;
        bytes.extend_from_slice(payload).ok()?;
        Some(Self { bytes })
    }

    pub fn control(&self) -> u8 {
        self.bytes[0]
    }

    pub fn payload(&self) -> &[u8] {
        &self.bytes[1..]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
