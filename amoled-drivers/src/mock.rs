//! Recording mocks shared by the driver tests
//!
//! Every mock appends to one [`Log`], so tests can assert the relative
//! order of pin edges, bus writes and delays.

extern crate std;

use core::convert::Infallible;
use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use amoled_core::{Error, PixelFormat, Result, Rgb565};
use amoled_hal::{ErrorKind, LaneBus, Lanes};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::transport::Transport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Pin(&'static str, bool),
    Write(Lanes, Vec<u8>),
    Delay(u32),
    Command(u8, Vec<u8>),
    Data(Vec<u8>),
    Pixels(Vec<Rgb565>),
}

pub type Log = Rc<RefCell<Vec<Event>>>;

pub fn log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

pub struct MockBus {
    log: Log,
    max: Lanes,
    /// Fail the write with this index (0-based)
    pub fail_at: Option<(usize, ErrorKind)>,
    writes: usize,
}

impl MockBus {
    pub fn new(max: Lanes, log: &Log) -> Self {
        Self {
            log: log.clone(),
            max,
            fail_at: None,
            writes: 0,
        }
    }
}

impl LaneBus for MockBus {
    type Error = ErrorKind;

    fn max_lanes(&self) -> Lanes {
        self.max
    }

    fn write(&mut self, lanes: Lanes, data: &[u8]) -> core::result::Result<(), ErrorKind> {
        let index = self.writes;
        self.writes += 1;
        if let Some((at, kind)) = self.fail_at {
            if at == index {
                return Err(kind);
            }
        }
        if lanes > self.max {
            return Err(ErrorKind::UnsupportedLanes);
        }
        self.log.borrow_mut().push(Event::Write(lanes, data.to_vec()));
        Ok(())
    }
}

pub struct MockPin {
    name: &'static str,
    log: Log,
    /// Levels returned by successive reads; the last one repeats
    pub reads: Vec<bool>,
}

impl MockPin {
    pub fn new(name: &'static str, log: &Log) -> Self {
        Self {
            name,
            log: log.clone(),
            reads: Vec::new(),
        }
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> core::result::Result<(), Infallible> {
        self.log.borrow_mut().push(Event::Pin(self.name, false));
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Infallible> {
        self.log.borrow_mut().push(Event::Pin(self.name, true));
        Ok(())
    }
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> core::result::Result<bool, Infallible> {
        let level = match self.reads.len() {
            0 => false,
            1 => self.reads[0],
            _ => self.reads.remove(0),
        };
        Ok(level)
    }

    fn is_low(&mut self) -> core::result::Result<bool, Infallible> {
        self.is_high().map(|high| !high)
    }
}

/// Records each delay in milliseconds
pub struct MockDelay {
    log: Log,
}

impl MockDelay {
    pub fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::Delay(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Event::Delay(ms));
    }
}

impl embedded_hal_async::delay::DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::Delay(ns / 1_000_000));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Event::Delay(ms));
    }
}

/// Transport that logs commands and decoded pixels instead of bytes
pub struct MockTransport {
    log: Log,
    /// Fail every transaction for this command
    pub fail_on: Option<u8>,
}

impl MockTransport {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            fail_on: None,
        }
    }
}

impl Transport for MockTransport {
    fn send_command(&mut self, cmd: u8, params: &[u8]) -> Result<()> {
        if self.fail_on == Some(cmd) {
            return Err(Error::BusTimeout);
        }
        self.log.borrow_mut().push(Event::Command(cmd, params.to_vec()));
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> Result<()> {
        self.log.borrow_mut().push(Event::Data(data.to_vec()));
        Ok(())
    }

    fn send_pixels<I>(&mut self, pixels: I, count: usize, _format: PixelFormat) -> Result<()>
    where
        I: IntoIterator<Item = Rgb565>,
    {
        let pixels: Vec<Rgb565> = pixels.into_iter().collect();
        if pixels.len() != count {
            return Err(Error::InvalidArgument);
        }
        self.log.borrow_mut().push(Event::Pixels(pixels));
        Ok(())
    }
}

/// Commands only, in order
pub fn commands(log: &Log) -> Vec<(u8, Vec<u8>)> {
    log.borrow()
        .iter()
        .filter_map(|e| match e {
            Event::Command(cmd, params) => Some((*cmd, params.clone())),
            _ => None,
        })
        .collect()
}

/// Run a future to completion on the current thread
pub fn block_on<F: core::future::Future>(future: F) -> F::Output {
    use std::sync::Arc;
    use std::task::{Context, Poll, Wake, Waker};

    struct Noop;

    impl Wake for Noop {
        fn wake(self: Arc<Self>) {}
    }

    let waker = Waker::from(Arc::new(Noop));
    let mut cx = Context::from_waker(&waker);
    let mut future = core::pin::pin!(future);
    loop {
        if let Poll::Ready(out) = future.as_mut().poll(&mut cx) {
            return out;
        }
    }
}
