#![cfg_attr(not(test), no_std)]
#![allow(clippy::inline_always)]
#![allow(clippy::must_use_candidate)]

// modules
pub mod command;
pub mod logger;
pub mod pca9632;
pub mod registers;

pub use embedded_hal as hal;

pub use crate::pca9632::{Config, Error, GroupMode, Pca9632};
pub use crate::registers::{AutoIncrement, Channel, LedOutput, Mode1, Mode2, Register, SubAddress};
