//! Top-level AMOLED driver
//!
//! [`Amoled`] owns a [`Transport`] and the optional control pins, keeps the
//! frame/window state and the lifecycle state, and implements
//! [`PixelSink`] so every [`Draw`](amoled_graphics::Draw) operation streams
//! straight to the panel.
//!
//! # Construction
//!
//! Construction is two-stage: the transport captures the bus wiring, the
//! driver adds panel behavior on top.
//!
//! ```ignore
//! let transport = Qspi::new(bus, cs)?;
//! let config = PanelConfig::for_variant(PanelVariant::Rm67162).with_bpp(16)?;
//! let pins = ControlPins::none().with_reset(rst).with_power(pwr_en);
//! let mut display = Amoled::new(transport, config, pins)?;
//! display.reset(&mut delay)?;
//! display.init(&mut delay)?;
//! display.fill_circle(100, 100, 20, Rgb565::RED)?;
//! ```
//!
//! # Delays
//!
//! Reset, init, sleep and wake take the delay as an argument. The blocking
//! variants accept [`embedded_hal::delay::DelayNs`]; the `_async` variants
//! accept the `embedded-hal-async` trait so an executor can run other tasks
//! during the waits.

use amoled_core::config::PanelConfig;
use amoled_core::frame::{FrameState, Orientation, RotationTable};
use amoled_core::geometry::{Rect, Window};
use amoled_core::state::{PanelEvent, PanelState};
use amoled_core::{Error, Result, Rgb565};
use amoled_graphics::PixelSink;
use amoled_hal::{Level, NoPin};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::panel::{
    cmd, rotation_table, InitStep, PanelTables, RESET_HOLD_MS, RESET_SETTLE_MS, SLEEP_IN_MS,
    SLEEP_OUT_MS, SWRESET_MS,
};
use crate::transport::{pin_error, Transport};

/// Driver version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Interval between tearing-effect input samples
pub const TEAR_POLL_US: u32 = 100;

/// Optional control pins
///
/// Unconnected pins stay `None`; their type parameter defaults to
/// [`NoPin`].
pub struct ControlPins<RST = NoPin, PWR = NoPin, TE = NoPin> {
    /// Reset, driven to the configured active level during reset
    pub reset: Option<RST>,
    /// Power enable, high while the panel is powered
    pub power: Option<PWR>,
    /// Tearing-effect input
    pub tear: Option<TE>,
}

impl ControlPins {
    /// No control pins wired
    pub fn none() -> Self {
        Self {
            reset: None,
            power: None,
            tear: None,
        }
    }
}

impl<RST, PWR, TE> ControlPins<RST, PWR, TE> {
    pub fn with_reset<R: OutputPin>(self, pin: R) -> ControlPins<R, PWR, TE> {
        ControlPins {
            reset: Some(pin),
            power: self.power,
            tear: self.tear,
        }
    }

    pub fn with_power<P: OutputPin>(self, pin: P) -> ControlPins<RST, P, TE> {
        ControlPins {
            reset: self.reset,
            power: Some(pin),
            tear: self.tear,
        }
    }

    pub fn with_tear<T: InputPin>(self, pin: T) -> ControlPins<RST, PWR, T> {
        ControlPins {
            reset: self.reset,
            power: self.power,
            tear: Some(pin),
        }
    }
}

/// QSPI/SPI AMOLED panel driver
pub struct Amoled<T, RST = NoPin, PWR = NoPin, TE = NoPin> {
    transport: T,
    pins: ControlPins<RST, PWR, TE>,
    config: PanelConfig,
    frame: FrameState,
    state: PanelState,
    brightness: u8,
}

impl<T, RST, PWR, TE> Amoled<T, RST, PWR, TE>
where
    T: Transport,
    RST: OutputPin,
    PWR: OutputPin,
{
    /// Create a driver; nothing is sent until [`reset`](Self::reset)
    pub fn new(transport: T, config: PanelConfig, pins: ControlPins<RST, PWR, TE>) -> Result<Self> {
        config.validate()?;
        let mut frame = FrameState::new(rotation_table(&config), config.color_order);
        frame.set_orientation(config.rotation);
        Ok(Self {
            transport,
            pins,
            config,
            frame,
            state: PanelState::Unpowered,
            brightness: 0,
        })
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn frame(&self) -> &FrameState {
        &self.frame
    }

    pub fn orientation(&self) -> Orientation {
        self.frame.orientation()
    }

    /// Logical width for the current orientation
    pub fn width(&self) -> u16 {
        self.frame.width()
    }

    /// Logical height for the current orientation
    pub fn height(&self) -> u16 {
        self.frame.height()
    }

    /// Last brightness written
    pub fn brightness_level(&self) -> u8 {
        self.brightness
    }

    /// Driver version string
    pub fn version(&self) -> &'static str {
        VERSION
    }

    fn apply(&mut self, event: PanelEvent) -> Result<()> {
        self.state = self.state.try_transition(event)?;
        #[cfg(feature = "defmt")]
        defmt::debug!("panel {} -> {}", event, self.state);
        Ok(())
    }

    fn ensure_configured(&self) -> Result<()> {
        if self.state.is_configured() {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }

    /// Drive the power-enable pin on
    pub fn power_on(&mut self) -> Result<()> {
        if let Some(pin) = self.pins.power.as_mut() {
            pin.set_high().map_err(pin_error)?;
        }
        Ok(())
    }

    /// Assert reset (or send SWRESET) and return the wait that follows
    fn begin_reset(&mut self) -> Result<u32> {
        self.power_on()?;
        let active = Level::from(self.config.reset_active_high);
        match self.pins.reset.as_mut() {
            Some(pin) => {
                active.apply(pin).map_err(pin_error)?;
                Ok(RESET_HOLD_MS)
            }
            None => {
                self.transport.send_command(cmd::SWRESET, &[])?;
                Ok(SWRESET_MS)
            }
        }
    }

    /// Release the reset pin; returns the settle wait if there is a pin
    fn end_reset(&mut self) -> Result<Option<u32>> {
        let active = Level::from(self.config.reset_active_high);
        match self.pins.reset.as_mut() {
            Some(pin) => {
                active.inverse().apply(pin).map_err(pin_error)?;
                Ok(Some(RESET_SETTLE_MS))
            }
            None => Ok(None),
        }
    }

    /// Hardware reset: active for [`RESET_HOLD_MS`], then
    /// [`RESET_SETTLE_MS`] before the first command
    ///
    /// Without a reset pin, sends SWRESET and waits [`SWRESET_MS`].
    pub fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<()> {
        let hold = self.begin_reset()?;
        delay.delay_ms(hold);
        if let Some(settle) = self.end_reset()? {
            delay.delay_ms(settle);
        }
        #[cfg(feature = "defmt")]
        defmt::info!("{} reset", self.config.variant);
        self.apply(PanelEvent::ResetComplete)
    }

    /// Send one init step; returns the delay to wait, if any
    fn run_step(&mut self, step: &InitStep) -> Result<Option<u32>> {
        match *step {
            InitStep::Command(code, params) => self.transport.send_command(code, params)?,
            InitStep::Colmod => self
                .transport
                .send_command(cmd::COLMOD, &[self.config.pixel_format.colmod()])?,
            InitStep::Madctl => self.transport.send_command(cmd::MADCTL, &[self.frame.madctl()])?,
            InitStep::Delay(ms) => return Ok(Some(ms)),
        }
        Ok(None)
    }

    fn finish_init(&mut self) -> Result<()> {
        self.apply(PanelEvent::InitComplete)?;
        self.apply(PanelEvent::DisplayOn)?;
        self.brightness = 0xFF;
        #[cfg(feature = "defmt")]
        defmt::info!(
            "{} ready: {}x{} @ {} deg",
            self.config.variant,
            self.width(),
            self.height(),
            self.orientation().degrees()
        );
        Ok(())
    }

    /// Run the variant's init script and switch the display on
    ///
    /// Requires a prior [`reset`](Self::reset). Re-running it from any
    /// later state re-initializes the panel.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<()> {
        self.ensure_configured()?;
        for step in self.config.variant.init_script() {
            if let Some(ms) = self.run_step(step)? {
                delay.delay_ms(ms);
            }
        }
        self.finish_init()
    }

    fn address(&mut self, window: Window) -> Result<()> {
        let panel = self.frame.panel_window(&window)?;
        self.transport.send_command(cmd::CASET, &panel.column_bytes())?;
        self.transport.send_command(cmd::RASET, &panel.row_bytes())
    }

    /// Address the inclusive logical window (x0, y0)-(x1, y1) for the next
    /// pixel stream
    ///
    /// Corners out of order are [`Error::InvalidArgument`]; a window past
    /// the logical size is [`Error::OutOfBounds`].
    pub fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<()> {
        self.state.ensure_active()?;
        self.address(Window::new(x0, y0, x1, y1)?)
    }

    /// Stream `count` pixels into the window set by
    /// [`set_window`](Self::set_window)
    pub fn write_pixels<I>(&mut self, pixels: I, count: usize) -> Result<()>
    where
        I: IntoIterator<Item = Rgb565>,
    {
        self.state.ensure_active()?;
        self.transport.send_pixels(pixels, count, self.config.pixel_format)
    }

    /// Address `area` and return its pixel count
    fn begin_write(&mut self, area: &Rect) -> Result<usize> {
        self.state.ensure_active()?;
        let window = Window::from_rect(area)?;
        self.address(window)?;
        Ok(window.pixel_count())
    }

    fn write_madctl(&mut self) -> Result<()> {
        if self.state.is_configured() {
            self.transport.send_command(cmd::MADCTL, &[self.frame.madctl()])
        } else {
            Ok(())
        }
    }

    /// Change orientation; width and height follow the rotation table
    ///
    /// Before reset only the state is updated; init sends it.
    pub fn rotate(&mut self, orientation: Orientation) -> Result<()> {
        self.frame.set_orientation(orientation);
        #[cfg(feature = "defmt")]
        defmt::debug!("rotate {} deg: {}x{}", orientation.degrees(), self.width(), self.height());
        self.write_madctl()
    }

    /// Install a custom rotation table and re-apply the current orientation
    pub fn set_rotations(&mut self, rotations: RotationTable) -> Result<()> {
        self.frame.set_rotations(rotations)?;
        self.write_madctl()
    }

    /// Mirror columns and/or rows
    pub fn mirror(&mut self, mirror_x: bool, mirror_y: bool) -> Result<()> {
        self.frame.set_mirror(mirror_x, mirror_y);
        self.write_madctl()
    }

    /// Exchange rows and columns without changing the logical size
    pub fn swap_xy(&mut self, swap: bool) -> Result<()> {
        self.frame.set_swap_xy(swap);
        self.write_madctl()
    }

    /// Override the column/row RAM offsets until the next rotation
    pub fn set_gap(&mut self, x_gap: u16, y_gap: u16) {
        self.frame.set_gap(x_gap, y_gap);
    }

    pub fn invert_color(&mut self, invert: bool) -> Result<()> {
        self.ensure_configured()?;
        let code = if invert { cmd::INVON } else { cmd::INVOFF };
        self.transport.send_command(code, &[])
    }

    /// Write the display brightness register
    pub fn brightness(&mut self, level: u8) -> Result<()> {
        self.ensure_configured()?;
        self.transport.send_command(cmd::WRDISBV, &[level])?;
        self.brightness = level;
        Ok(())
    }

    /// Brightness from an unchecked integer, clamped to 0..=255
    pub fn set_brightness_clamped(&mut self, level: i32) -> Result<()> {
        self.brightness(level.clamp(0, 255) as u8)
    }

    pub fn backlight_on(&mut self) -> Result<()> {
        self.brightness(0xFF)
    }

    pub fn backlight_off(&mut self) -> Result<()> {
        self.brightness(0x00)
    }

    /// Define the vertical scroll area: top fixed, scrolling and bottom
    /// fixed line counts
    pub fn vscroll_area(&mut self, top: u16, scroll: u16, bottom: u16) -> Result<()> {
        self.ensure_configured()?;
        let [t0, t1] = top.to_be_bytes();
        let [s0, s1] = scroll.to_be_bytes();
        let [b0, b1] = bottom.to_be_bytes();
        self.transport
            .send_command(cmd::VSCRDEF, &[t0, t1, s0, s1, b0, b1])
    }

    /// Set the first line shown in the scroll area
    pub fn vscroll_start(&mut self, line: u16, bottom_to_top: bool) -> Result<()> {
        self.ensure_configured()?;
        self.frame.set_scroll_bottom_to_top(bottom_to_top);
        self.write_madctl()?;
        self.transport.send_command(cmd::VSCSAD, &line.to_be_bytes())
    }

    /// Send a raw command
    pub fn send_cmd(&mut self, code: u8, params: &[u8]) -> Result<()> {
        self.transport.send_command(code, params)
    }

    /// Send SLPIN then DISPOFF; returns the state to enter once the wait is
    /// over
    fn begin_sleep(&mut self) -> Result<PanelState> {
        let next = self.state.try_transition(PanelEvent::Sleep)?;
        self.transport.send_command(cmd::SLPIN, &[])?;
        self.transport.send_command(cmd::DISPOFF, &[])?;
        Ok(next)
    }

    fn begin_wake(&mut self) -> Result<PanelState> {
        let next = self.state.try_transition(PanelEvent::Wake)?;
        self.transport.send_command(cmd::SLPOUT, &[])?;
        Ok(next)
    }

    fn finish_wake(&mut self, next: PanelState) -> Result<()> {
        self.transport.send_command(cmd::DISPON, &[])?;
        self.state = next;
        Ok(())
    }

    /// Enter sleep; panel memory is retained
    pub fn sleep<D: DelayNs>(&mut self, delay: &mut D) -> Result<()> {
        let next = self.begin_sleep()?;
        delay.delay_ms(SLEEP_IN_MS);
        self.state = next;
        #[cfg(feature = "defmt")]
        defmt::info!("panel sleeping");
        Ok(())
    }

    /// Leave sleep and switch the display back on
    pub fn wake<D: DelayNs>(&mut self, delay: &mut D) -> Result<()> {
        let next = self.begin_wake()?;
        delay.delay_ms(SLEEP_OUT_MS);
        self.finish_wake(next)?;
        #[cfg(feature = "defmt")]
        defmt::info!("panel awake");
        Ok(())
    }

    /// Same as [`sleep`](Self::sleep)
    pub fn display_off<D: DelayNs>(&mut self, delay: &mut D) -> Result<()> {
        self.sleep(delay)
    }

    /// Same as [`wake`](Self::wake)
    pub fn display_on<D: DelayNs>(&mut self, delay: &mut D) -> Result<()> {
        self.wake(delay)
    }

    /// Switch the display off and drop the power-enable pin
    pub fn power_off(&mut self) -> Result<()> {
        if self.state.is_configured() {
            self.transport.send_command(cmd::DISPOFF, &[])?;
            self.transport.send_command(cmd::SLPIN, &[])?;
        }
        if let Some(pin) = self.pins.power.as_mut() {
            pin.set_low().map_err(pin_error)?;
        }
        self.apply(PanelEvent::PowerOff)
    }

    /// Give back the transport and pins without touching the panel
    pub fn release(self) -> (T, ControlPins<RST, PWR, TE>) {
        (self.transport, self.pins)
    }

    /// Power down and release the transport and pins
    ///
    /// On error the driver is dropped; call [`power_off`](Self::power_off)
    /// and [`release`](Self::release) separately to keep the bus.
    pub fn deinit(mut self) -> Result<(T, ControlPins<RST, PWR, TE>)> {
        self.power_off()?;
        #[cfg(feature = "defmt")]
        defmt::info!("panel released");
        Ok(self.release())
    }

    pub async fn reset_async<D>(&mut self, delay: &mut D) -> Result<()>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        let hold = self.begin_reset()?;
        delay.delay_ms(hold).await;
        if let Some(settle) = self.end_reset()? {
            delay.delay_ms(settle).await;
        }
        self.apply(PanelEvent::ResetComplete)
    }

    pub async fn init_async<D>(&mut self, delay: &mut D) -> Result<()>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        self.ensure_configured()?;
        for step in self.config.variant.init_script() {
            if let Some(ms) = self.run_step(step)? {
                delay.delay_ms(ms).await;
            }
        }
        self.finish_init()
    }

    pub async fn sleep_async<D>(&mut self, delay: &mut D) -> Result<()>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        let next = self.begin_sleep()?;
        delay.delay_ms(SLEEP_IN_MS).await;
        self.state = next;
        Ok(())
    }

    pub async fn wake_async<D>(&mut self, delay: &mut D) -> Result<()>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        let next = self.begin_wake()?;
        delay.delay_ms(SLEEP_OUT_MS).await;
        self.finish_wake(next)
    }
}

impl<T, RST, PWR, TE> Amoled<T, RST, PWR, TE>
where
    T: Transport,
    RST: OutputPin,
    PWR: OutputPin,
    TE: InputPin,
{
    /// Wait for the next rising edge on the tearing-effect input
    ///
    /// Fails with [`Error::BusTimeout`] when no edge arrives within
    /// `timeout_ms`, and with [`Error::InvalidArgument`] when no TE pin is
    /// wired.
    pub fn wait_for_tear<D: DelayNs>(&mut self, delay: &mut D, timeout_ms: u32) -> Result<()> {
        let pin = self.pins.tear.as_mut().ok_or(Error::InvalidArgument)?;
        let polls = timeout_ms.saturating_mul(1000 / TEAR_POLL_US);
        let mut seen_low = false;
        for _ in 0..polls {
            let high = pin.is_high().map_err(pin_error)?;
            if high && seen_low {
                return Ok(());
            }
            seen_low |= !high;
            delay.delay_us(TEAR_POLL_US);
        }
        #[cfg(feature = "defmt")]
        defmt::warn!("no TE pulse within {} ms", timeout_ms);
        Err(Error::BusTimeout)
    }
}

impl<T, RST, PWR, TE> PixelSink for Amoled<T, RST, PWR, TE>
where
    T: Transport,
    RST: OutputPin,
    PWR: OutputPin,
{
    fn size(&self) -> (u16, u16) {
        (self.frame.width(), self.frame.height())
    }

    fn fill_area(&mut self, area: Rect, color: Rgb565) -> Result<()> {
        let count = self.begin_write(&area)?;
        self.transport
            .send_pixels(core::iter::repeat(color).take(count), count, self.config.pixel_format)
    }

    fn write_area<I>(&mut self, area: Rect, pixels: I) -> Result<()>
    where
        I: IntoIterator<Item = Rgb565>,
    {
        let count = self.begin_write(&area)?;
        self.transport.send_pixels(pixels, count, self.config.pixel_format)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::mock::{block_on, commands, log, Event, Log, MockDelay, MockPin, MockTransport};
    use amoled_core::config::PanelVariant;
    use amoled_core::frame::madctl;
    use amoled_graphics::Draw;
    use std::vec;
    use std::vec::Vec;

    type Driver = Amoled<MockTransport, MockPin, MockPin, MockPin>;

    fn driver(variant: PanelVariant, events: &Log) -> Driver {
        let pins = ControlPins::none()
            .with_reset(MockPin::new("rst", events))
            .with_power(MockPin::new("pwr", events))
            .with_tear(MockPin::new("te", events));
        Amoled::new(MockTransport::new(events), PanelConfig::for_variant(variant), pins).unwrap()
    }

    fn active(variant: PanelVariant, events: &Log) -> Driver {
        let mut display = driver(variant, events);
        let mut delay = MockDelay::new(events);
        display.reset(&mut delay).unwrap();
        display.init(&mut delay).unwrap();
        events.borrow_mut().clear();
        display
    }

    /// Inclusive (x0, y0, x1, y1) of every CASET/RASET pair sent
    fn windows(events: &Log) -> Vec<(u16, u16, u16, u16)> {
        let cmds = commands(events);
        cmds.windows(2)
            .filter(|w| w[0].0 == cmd::CASET && w[1].0 == cmd::RASET)
            .map(|w| {
                let (c, r) = (&w[0].1, &w[1].1);
                (
                    u16::from_be_bytes([c[0], c[1]]),
                    u16::from_be_bytes([r[0], r[1]]),
                    u16::from_be_bytes([c[2], c[3]]),
                    u16::from_be_bytes([r[2], r[3]]),
                )
            })
            .collect()
    }

    #[test]
    fn test_reset_pulse_timing() {
        let events = log();
        let mut display = driver(PanelVariant::Rm67162, &events);
        display.reset(&mut MockDelay::new(&events)).unwrap();

        assert_eq!(
            *events.borrow(),
            [
                Event::Pin("pwr", true),
                Event::Pin("rst", false),
                Event::Delay(300),
                Event::Pin("rst", true),
                Event::Delay(200),
            ]
        );
        assert_eq!(display.state(), PanelState::Reset);
    }

    #[test]
    fn test_reset_active_high() {
        let events = log();
        let pins = ControlPins::none().with_reset(MockPin::new("rst", &events));
        let mut config = PanelConfig::for_variant(PanelVariant::Sh8601);
        config.reset_active_high = true;
        let mut display = Amoled::new(MockTransport::new(&events), config, pins).unwrap();
        display.reset(&mut MockDelay::new(&events)).unwrap();
        assert_eq!(events.borrow()[0], Event::Pin("rst", true));
        assert_eq!(events.borrow()[2], Event::Pin("rst", false));
    }

    #[test]
    fn test_software_reset_without_pin() {
        let events = log();
        let config = PanelConfig::for_variant(PanelVariant::Rm690b0);
        let mut display = Amoled::new(MockTransport::new(&events), config, ControlPins::none()).unwrap();
        display.reset(&mut MockDelay::new(&events)).unwrap();
        assert_eq!(
            *events.borrow(),
            [Event::Command(cmd::SWRESET, vec![]), Event::Delay(120)]
        );
    }

    #[test]
    fn test_init_before_reset() {
        let events = log();
        let mut display = driver(PanelVariant::Rm67162, &events);
        assert_eq!(display.init(&mut MockDelay::new(&events)), Err(Error::NotInitialized));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_rm67162_init_stream() {
        let events = log();
        let mut display = driver(PanelVariant::Rm67162, &events);
        let mut delay = MockDelay::new(&events);
        display.reset(&mut delay).unwrap();
        events.borrow_mut().clear();
        display.init(&mut delay).unwrap();

        let expected = vec![
            Event::Command(0xFE, vec![0x05]),
            Event::Command(0x05, vec![0x05]),
            Event::Command(0xFE, vec![0x01]),
            Event::Command(0x73, vec![0x25]),
            Event::Command(0xFE, vec![0x00]),
            Event::Command(0x3A, vec![0x55]),
            Event::Command(0x44, vec![0x00, 0x80]),
            Event::Command(0x35, vec![0x00]),
            Event::Command(0x51, vec![0x00]),
            Event::Command(0x11, vec![]),
            Event::Delay(120),
            Event::Command(0x36, vec![0x00]),
            Event::Command(0x29, vec![]),
            Event::Command(0x51, vec![0xFF]),
        ];
        assert_eq!(*events.borrow(), expected);
        assert_eq!(display.state(), PanelState::Active);
        assert_eq!(display.brightness_level(), 0xFF);
    }

    #[test]
    fn test_rm690b0_init_stream() {
        let events = log();
        let mut display = driver(PanelVariant::Rm690b0, &events);
        display.config.pixel_format = amoled_core::PixelFormat::Rgb888;
        let mut delay = MockDelay::new(&events);
        display.reset(&mut delay).unwrap();
        display.rotate(Orientation::Deg90).unwrap();
        events.borrow_mut().clear();
        display.init(&mut delay).unwrap();

        let cmds = commands(&events);
        let expected: Vec<(u8, Vec<u8>)> = vec![
            (0xFE, vec![0x20]),
            (0x26, vec![0x0A]),
            (0x24, vec![0x80]),
            (0x5A, vec![0x51]),
            (0x5B, vec![0x2E]),
            (0xFE, vec![0x00]),
            (0x2A, vec![0x00, 0x10, 0x01, 0xD1]),
            (0x2B, vec![0x00, 0x00, 0x02, 0x57]),
            (0x3A, vec![0x77]),
            (0xC2, vec![0x00]),
            (0x44, vec![0x01, 0x66]),
            (0x35, vec![0x00]),
            (0x51, vec![0x00]),
            (0x11, vec![]),
            (0x36, vec![madctl::MX | madctl::MV]),
            (0x29, vec![]),
            (0x51, vec![0xFF]),
        ];
        assert_eq!(cmds, expected);
    }

    #[test]
    fn test_sh8601_init_stream() {
        let events = log();
        let mut display = driver(PanelVariant::Sh8601, &events);
        let mut delay = MockDelay::new(&events);
        display.reset(&mut delay).unwrap();
        events.borrow_mut().clear();
        display.init(&mut delay).unwrap();

        let expected = vec![
            Event::Command(0x11, vec![]),
            Event::Delay(120),
            Event::Command(0x44, vec![0x01, 0x2C]),
            Event::Command(0x3A, vec![0x55]),
            Event::Command(0x36, vec![0x00]),
            Event::Command(0x35, vec![0x00]),
            Event::Command(0x53, vec![0x20]),
            Event::Delay(10),
            Event::Command(0x2A, vec![0x00, 0x00, 0x01, 0x6F]),
            Event::Command(0x2B, vec![0x00, 0x00, 0x01, 0xBF]),
            Event::Command(0x51, vec![0x00]),
            Event::Delay(10),
            Event::Command(0x29, vec![]),
            Event::Delay(10),
            Event::Command(0x51, vec![0xFF]),
        ];
        assert_eq!(*events.borrow(), expected);
    }

    #[test]
    fn test_async_init_matches_blocking() {
        let blocking = log();
        let mut display = driver(PanelVariant::Rm67162, &blocking);
        let mut delay = MockDelay::new(&blocking);
        display.reset(&mut delay).unwrap();
        display.init(&mut delay).unwrap();

        let yielding = log();
        let mut display = driver(PanelVariant::Rm67162, &yielding);
        let mut delay = MockDelay::new(&yielding);
        block_on(display.reset_async(&mut delay)).unwrap();
        block_on(display.init_async(&mut delay)).unwrap();

        assert_eq!(*blocking.borrow(), *yielding.borrow());
        assert_eq!(display.state(), PanelState::Active);

        block_on(display.sleep_async(&mut delay)).unwrap();
        assert_eq!(display.state(), PanelState::Sleeping);
        block_on(display.wake_async(&mut delay)).unwrap();
        assert_eq!(display.state(), PanelState::Active);
    }

    #[test]
    fn test_drawing_requires_active() {
        let events = log();
        let mut display = driver(PanelVariant::Rm67162, &events);
        assert_eq!(display.fill_rect(0, 0, 10, 10, Rgb565::RED), Err(Error::NotInitialized));
        assert_eq!(display.set_window(0, 0, 1, 1), Err(Error::NotInitialized));

        display.reset(&mut MockDelay::new(&events)).unwrap();
        assert_eq!(display.fill_circle(5, 5, 2, Rgb565::RED), Err(Error::NotInitialized));
    }

    #[test]
    fn test_sleep_wake_cycle() {
        let events = log();
        let mut display = active(PanelVariant::Rm67162, &events);
        let mut delay = MockDelay::new(&events);

        display.sleep(&mut delay).unwrap();
        assert_eq!(display.state(), PanelState::Sleeping);
        assert_eq!(display.pixel(1, 1, Rgb565::RED), Err(Error::NotInitialized));

        display.wake(&mut delay).unwrap();
        assert_eq!(display.state(), PanelState::Active);
        assert_eq!(
            *events.borrow(),
            [
                Event::Command(cmd::SLPIN, vec![]),
                Event::Command(cmd::DISPOFF, vec![]),
                Event::Delay(SLEEP_IN_MS),
                Event::Command(cmd::SLPOUT, vec![]),
                Event::Delay(SLEEP_OUT_MS),
                Event::Command(cmd::DISPON, vec![]),
            ]
        );
        assert_eq!(display.wake(&mut delay), Err(Error::NotInitialized));
    }

    #[test]
    fn test_failed_sleep_keeps_state() {
        let events = log();
        let mut display = active(PanelVariant::Rm67162, &events);
        display.transport.fail_on = Some(cmd::SLPIN);
        assert_eq!(display.sleep(&mut MockDelay::new(&events)), Err(Error::BusTimeout));
        assert_eq!(display.state(), PanelState::Active);
    }

    #[test]
    fn test_end_to_end_rotated_circle() {
        let events = log();
        let mut display = active(PanelVariant::Rm67162, &events);
        assert_eq!((display.width(), display.height()), (240, 536));

        display.rotate(Orientation::Deg90).unwrap();
        assert_eq!((display.width(), display.height()), (536, 240));
        assert_eq!(
            commands(&events),
            [(cmd::MADCTL, vec![madctl::MX | madctl::MV])]
        );

        events.borrow_mut().clear();
        display.fill_circle(100, 100, 20, Rgb565::RED).unwrap();

        let sent = windows(&events);
        assert!(!sent.is_empty());
        let x0 = sent.iter().map(|w| w.0).min().unwrap();
        let y0 = sent.iter().map(|w| w.1).min().unwrap();
        let x1 = sent.iter().map(|w| w.2).max().unwrap();
        let y1 = sent.iter().map(|w| w.3).max().unwrap();
        assert_eq!((x0, y0, x1, y1), (80, 80, 120, 120));

        let red = events.borrow().iter().all(|e| match e {
            Event::Pixels(p) => p.iter().all(|&c| c == Rgb565::RED),
            _ => true,
        });
        assert!(red);
    }

    #[test]
    fn test_four_rotations_restore_size() {
        let events = log();
        let mut display = active(PanelVariant::Rm690b0, &events);
        let start = (display.width(), display.height());
        let mut o = display.orientation();
        for turn in 1..=4 {
            o = o.rotated();
            display.rotate(o).unwrap();
            let size = (display.width(), display.height());
            if turn % 2 == 1 {
                assert_eq!(size, (start.1, start.0));
            } else {
                assert_eq!(size, start);
            }
        }
    }

    #[test]
    fn test_set_window_applies_gap() {
        let events = log();
        let mut display = active(PanelVariant::Rm690b0, &events);
        display.set_window(0, 0, 9, 19).unwrap();
        assert_eq!(windows(&events), [(16, 0, 25, 19)]);

        assert_eq!(display.set_window(0, 0, 450, 10), Err(Error::OutOfBounds));
        assert_eq!(display.set_window(5, 0, 4, 10), Err(Error::InvalidArgument));

        display.set_gap(0, 0);
        events.borrow_mut().clear();
        display.set_window(0, 0, 9, 19).unwrap();
        assert_eq!(windows(&events), [(0, 0, 9, 19)]);
    }

    #[test]
    fn test_clipped_drawing_never_out_of_bounds() {
        let events = log();
        let mut display = active(PanelVariant::Rm67162, &events);
        display.fill_rect(-50, -50, 1000, 1000, Rgb565::BLUE).unwrap();
        assert_eq!(windows(&events), [(0, 0, 239, 535)]);

        let pixels: usize = events
            .borrow()
            .iter()
            .map(|e| match e {
                Event::Pixels(p) => p.len(),
                _ => 0,
            })
            .sum();
        assert_eq!(pixels, 240 * 536);
    }

    #[test]
    fn test_write_pixels_after_window() {
        let events = log();
        let mut display = active(PanelVariant::Rm67162, &events);
        display.set_window(0, 0, 1, 0).unwrap();
        display.write_pixels([Rgb565::RED, Rgb565::GREEN], 2).unwrap();
        assert_eq!(
            events.borrow().last(),
            Some(&Event::Pixels(vec![Rgb565::RED, Rgb565::GREEN]))
        );
    }

    #[test]
    fn test_brightness_clamped() {
        let events = log();
        let mut display = active(PanelVariant::Sh8601, &events);
        display.set_brightness_clamped(300).unwrap();
        display.set_brightness_clamped(-4).unwrap();
        display.brightness(0x80).unwrap();
        display.backlight_off().unwrap();
        assert_eq!(
            commands(&events),
            [
                (cmd::WRDISBV, vec![0xFF]),
                (cmd::WRDISBV, vec![0x00]),
                (cmd::WRDISBV, vec![0x80]),
                (cmd::WRDISBV, vec![0x00]),
            ]
        );
        assert_eq!(display.brightness_level(), 0);
    }

    #[test]
    fn test_register_ops_need_reset() {
        let events = log();
        let mut display = driver(PanelVariant::Rm67162, &events);
        assert_eq!(display.brightness(10), Err(Error::NotInitialized));
        assert_eq!(display.invert_color(true), Err(Error::NotInitialized));

        // orientation is tracked before reset and sent by init
        display.rotate(Orientation::Deg270).unwrap();
        assert!(events.borrow().is_empty());
        assert_eq!((display.width(), display.height()), (536, 240));
    }

    #[test]
    fn test_mirror_swap_and_invert() {
        let events = log();
        let mut display = active(PanelVariant::Rm67162, &events);
        display.mirror(true, true).unwrap();
        display.swap_xy(true).unwrap();
        display.invert_color(true).unwrap();
        display.invert_color(false).unwrap();
        assert_eq!(
            commands(&events),
            [
                (cmd::MADCTL, vec![madctl::MX | madctl::MY]),
                (cmd::MADCTL, vec![madctl::MX | madctl::MY | madctl::MV]),
                (cmd::INVON, vec![]),
                (cmd::INVOFF, vec![]),
            ]
        );
    }

    #[test]
    fn test_vertical_scroll() {
        let events = log();
        let mut display = active(PanelVariant::Rm67162, &events);
        display.vscroll_area(10, 516, 10).unwrap();
        display.vscroll_start(300, true).unwrap();
        assert_eq!(
            commands(&events),
            [
                (cmd::VSCRDEF, vec![0x00, 0x0A, 0x02, 0x04, 0x00, 0x0A]),
                (cmd::MADCTL, vec![madctl::ML]),
                (cmd::VSCSAD, vec![0x01, 0x2C]),
            ]
        );
    }

    #[test]
    fn test_custom_rotation_table() {
        let events = log();
        let mut display = active(PanelVariant::Rm67162, &events);
        let table = PanelVariant::Sh8601.rotations(200, 300);
        display.rotate(Orientation::Deg180).unwrap();
        display.set_rotations(table).unwrap();
        assert_eq!((display.width(), display.height()), (200, 300));
        assert_eq!(commands(&events).last(), Some(&(cmd::MADCTL, vec![0x05])));
    }

    #[test]
    fn test_wait_for_tear() {
        let events = log();
        let mut display = active(PanelVariant::Rm67162, &events);
        let mut delay = MockDelay::new(&events);

        display.pins.tear.as_mut().unwrap().reads = vec![true, false, false, true];
        assert_eq!(display.wait_for_tear(&mut delay, 5), Ok(()));

        // stuck high: no rising edge
        display.pins.tear.as_mut().unwrap().reads = vec![true];
        assert_eq!(display.wait_for_tear(&mut delay, 2), Err(Error::BusTimeout));
    }

    #[test]
    fn test_wait_for_tear_without_pin() {
        let events = log();
        let config = PanelConfig::for_variant(PanelVariant::Rm67162);
        let mut display = Amoled::new(MockTransport::new(&events), config, ControlPins::none()).unwrap();
        assert_eq!(
            display.wait_for_tear(&mut MockDelay::new(&events), 10),
            Err(Error::InvalidArgument)
        );
    }

    #[test]
    fn test_deinit_powers_down() {
        let events = log();
        let display = active(PanelVariant::Rm67162, &events);
        let (_transport, pins) = display.deinit().unwrap();
        assert!(pins.reset.is_some());
        assert_eq!(
            *events.borrow(),
            [
                Event::Command(cmd::DISPOFF, vec![]),
                Event::Command(cmd::SLPIN, vec![]),
                Event::Pin("pwr", false),
            ]
        );
    }

    #[test]
    fn test_send_cmd_and_version() {
        let events = log();
        let mut display = driver(PanelVariant::Rm67162, &events);
        display.send_cmd(0xC2, &[0x01]).unwrap();
        assert_eq!(commands(&events), [(0xC2, vec![0x01])]);
        assert_eq!(display.version(), VERSION);
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let events = log();
        let mut config = PanelConfig::for_variant(PanelVariant::Rm67162);
        config.width = 0;
        let result = Amoled::new(MockTransport::new(&events), config, ControlPins::none());
        assert!(matches!(result, Err(Error::InvalidArgument)));
    }
}
