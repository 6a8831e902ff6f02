//! `log` sink for firmware consoles.
//!
//! Install one with `log::set_logger` (typically from a `static`) and the
//! driver's `debug!`/`trace!` output ends up on whatever `fmt::Write` the
//! board exposes, usually a UART.

use log::{Level, Metadata, Record};

use core::cell::RefCell;
use core::fmt::Write;

use critical_section::Mutex;

pub struct WriteLogger<W>
where
    W: Write + Send,
{
    writer: Mutex<RefCell<Option<W>>>,
    pub level: Level,
}

impl<W> WriteLogger<W>
where
    W: Write + Send,
{
    pub const fn new(level: Level) -> Self {
        Self { writer: Mutex::new(RefCell::new(None)), level }
    }

    /// Install the output. Records logged before this are dropped.
    ///
    /// Hands `writer` back if the logger is in the middle of a record.
    pub fn attach(&self, writer: W) -> Result<(), W> {
        critical_section::with(|cs| match self.writer.borrow(cs).try_borrow_mut() {
            Ok(mut slot) => {
                *slot = Some(writer);
                Ok(())
            }
            Err(_) => Err(writer),
        })
    }

    /// Take the output back, leaving the logger silent.
    pub fn detach(&self) -> Option<W> {
        critical_section::with(|cs| {
            self.writer.borrow(cs).try_borrow_mut().ok().and_then(|mut slot| slot.take())
        })
    }
}

impl<W> log::Log for WriteLogger<W>
where
    W: Write + Send,
{
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {

        if !self.enabled(record.metadata()) {
            return;
        }

        let color = match record.level() {
            Level::Error => "31", // red
            Level::Warn  => "33", // yellow
            _            => "32", // green
        };

        // A record logged from inside another one (the writer itself, or a
        // nested critical section) finds the writer busy and is dropped, as
        // are records with no writer attached or a failing writer.
        critical_section::with(|cs| {
            if let Ok(mut slot) = self.writer.borrow(cs).try_borrow_mut() {
                if let Some(writer) = slot.as_mut() {
                    let _ = write!(
                        writer,
                        "[\x1B[{}m{}\x1B[0m] {}\r\n",
                        color,
                        record.level(),
                        record.args()
                    );
                }
            }
        });
    }

    fn flush(&self) {}
}
