//! Framebuffer-backed drawing
//!
//! [`Buffered`] rasterizes into a caller-owned [`Framebuffer`] and pushes
//! only the changed region to the panel. With auto-refresh on, each drawing
//! operation ends in a flush; [`hold_display`](Buffered::hold_display)
//! batches several operations into one push.

use amoled_core::frame::Orientation;
use amoled_core::geometry::{Rect, Window};
use amoled_core::{Result, Rgb565};
use amoled_graphics::{Framebuffer, PixelSink};
use embedded_hal::digital::OutputPin;

use crate::amoled::Amoled;
use crate::transport::Transport;

/// Display wrapper that draws into memory first
pub struct Buffered<'a, D> {
    display: D,
    fb: Framebuffer<'a>,
    align_even: bool,
    auto_refresh: bool,
    hold: bool,
}

impl<'a, D: PixelSink> Buffered<'a, D> {
    /// Wrap `display`; `buf` must hold at least one full frame
    pub fn new(display: D, buf: &'a mut [Rgb565], align_even: bool, auto_refresh: bool) -> Result<Self> {
        let (width, height) = display.size();
        let fb = Framebuffer::new(buf, width, height)?;
        Ok(Self {
            display,
            fb,
            align_even,
            auto_refresh,
            hold: false,
        })
    }

    pub fn framebuffer(&self) -> &Framebuffer<'a> {
        &self.fb
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Direct access to the wrapped display
    ///
    /// Call [`sync_size`](Self::sync_size) after changing its orientation.
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn auto_refresh(&self) -> bool {
        self.auto_refresh
    }

    pub fn set_auto_refresh(&mut self, on: bool) {
        self.auto_refresh = on;
    }

    /// Stop pushing after each operation until [`release_display`](Self::release_display)
    pub fn hold_display(&mut self) {
        self.hold = true;
    }

    /// Resume pushing and flush everything drawn while held
    pub fn release_display(&mut self) -> Result<()> {
        self.hold = false;
        self.flush()
    }

    /// Window that will be sent for a dirty rectangle
    fn flush_window(&self, dirty: &Rect) -> Result<Window> {
        let window = Window::from_rect(dirty)?;
        Ok(if self.align_even {
            window.align_even(self.fb.width(), self.fb.height())
        } else {
            window
        })
    }

    /// Push the dirty region to the display
    ///
    /// If the push fails the whole frame is marked dirty so the next flush
    /// resends it.
    pub fn flush(&mut self) -> Result<()> {
        let Some(dirty) = self.fb.take_dirty() else {
            return Ok(());
        };
        let area = self.flush_window(&dirty)?.to_rect();
        #[cfg(feature = "defmt")]
        defmt::trace!("flush {}x{} at ({}, {})", area.width, area.height, area.x, area.y);
        let pushed = self
            .display
            .write_area(area, self.fb.area_pixels(area))
            .and_then(|()| self.display.commit());
        if pushed.is_err() {
            self.fb.mark_all_dirty();
        }
        pushed
    }

    /// Push the whole frame
    pub fn refresh(&mut self) -> Result<()> {
        self.fb.mark_all_dirty();
        self.flush()
    }

    /// Match the framebuffer to the display's current logical size
    pub fn sync_size(&mut self) -> Result<()> {
        let (width, height) = self.display.size();
        if (width, height) != (self.fb.width(), self.fb.height()) {
            self.fb.resize(width, height)?;
        }
        Ok(())
    }

    /// Give back the display and the framebuffer
    pub fn into_parts(self) -> (D, Framebuffer<'a>) {
        (self.display, self.fb)
    }
}

impl<'a, T, RST, PWR, TE> Buffered<'a, Amoled<T, RST, PWR, TE>>
where
    T: Transport,
    RST: OutputPin,
    PWR: OutputPin,
{
    /// Wrap a panel using its configured alignment and refresh mode
    pub fn for_panel(display: Amoled<T, RST, PWR, TE>, buf: &'a mut [Rgb565]) -> Result<Self> {
        let config = *display.config();
        Self::new(display, buf, config.align_even, config.auto_refresh)
    }

    /// Rotate the panel and reshape the framebuffer to match
    ///
    /// Frame contents are not transformed; redraw after rotating.
    pub fn rotate(&mut self, orientation: Orientation) -> Result<()> {
        self.display.rotate(orientation)?;
        self.sync_size()
    }
}

impl<D: PixelSink> PixelSink for Buffered<'_, D> {
    fn size(&self) -> (u16, u16) {
        (self.fb.width(), self.fb.height())
    }

    fn fill_area(&mut self, area: Rect, color: Rgb565) -> Result<()> {
        self.fb.fill_area(area, color)
    }

    fn write_area<I>(&mut self, area: Rect, pixels: I) -> Result<()>
    where
        I: IntoIterator<Item = Rgb565>,
    {
        self.fb.write_area(area, pixels)
    }

    fn commit(&mut self) -> Result<()> {
        if self.auto_refresh && !self.hold {
            self.flush()
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::amoled::ControlPins;
    use crate::mock::{commands, log, Event, Log, MockDelay, MockTransport};
    use crate::panel::cmd;
    use amoled_core::config::{PanelConfig, PanelVariant};
    use amoled_core::Error;
    use amoled_graphics::Draw;
    use std::vec;
    use std::vec::Vec;

    fn panel(variant: PanelVariant, events: &Log) -> Amoled<MockTransport> {
        let config = PanelConfig::for_variant(variant);
        let mut display = Amoled::new(MockTransport::new(events), config, ControlPins::none()).unwrap();
        let mut delay = MockDelay::new(events);
        display.reset(&mut delay).unwrap();
        display.init(&mut delay).unwrap();
        events.borrow_mut().clear();
        display
    }

    fn frame(variant: PanelVariant) -> Vec<Rgb565> {
        let (w, h) = variant.native_size();
        vec![Rgb565::BLACK; usize::from(w) * usize::from(h)]
    }

    /// Inclusive windows addressed, from the CASET/RASET parameters
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

    fn pushed(events: &Log) -> Vec<Vec<Rgb565>> {
        events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Pixels(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_flush_aligns_window() {
        let events = log();
        let mut buf = frame(PanelVariant::Rm67162);
        let mut display = Buffered::for_panel(panel(PanelVariant::Rm67162, &events), &mut buf).unwrap();

        display.fill_rect(3, 5, 4, 2, Rgb565::RED).unwrap();
        assert_eq!(windows(&events), [(2, 4, 7, 7)]);

        let frames = pushed(&events);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].len(), 6 * 4);
        // row 5, columns 2..=7: black then four red then black
        let row = &frames[0][6..12];
        assert_eq!(row[0], Rgb565::BLACK);
        assert!(row[1..5].iter().all(|&c| c == Rgb565::RED));
        assert_eq!(row[5], Rgb565::BLACK);
    }

    #[test]
    fn test_unaligned_panel_sends_exact_window() {
        let events = log();
        let mut buf = frame(PanelVariant::Sh8601);
        let mut display = Buffered::for_panel(panel(PanelVariant::Sh8601, &events), &mut buf).unwrap();
        display.fill_rect(3, 5, 4, 2, Rgb565::RED).unwrap();
        assert_eq!(windows(&events), [(3, 5, 6, 6)]);
    }

    #[test]
    fn test_alignment_stays_inside_frame() {
        let events = log();
        let mut buf = frame(PanelVariant::Rm67162);
        let mut display = Buffered::for_panel(panel(PanelVariant::Rm67162, &events), &mut buf).unwrap();
        display.pixel(239, 535, Rgb565::WHITE).unwrap();
        assert_eq!(windows(&events), [(238, 534, 239, 535)]);
    }

    #[test]
    fn test_rotated_circle_single_push() {
        let events = log();
        let mut buf = frame(PanelVariant::Rm67162);
        let mut display = Buffered::for_panel(panel(PanelVariant::Rm67162, &events), &mut buf).unwrap();
        display.rotate(Orientation::Deg90).unwrap();
        assert_eq!(display.size(), (536, 240));
        // reshaping dirties the whole frame
        assert_eq!(display.framebuffer().dirty(), Some(Rect::new(0, 0, 536, 240)));
        display.flush().unwrap();
        events.borrow_mut().clear();

        display.fill_circle(100, 100, 20, Rgb565::RED).unwrap();
        assert_eq!(windows(&events), [(80, 80, 121, 121)]);
        assert_eq!(pushed(&events)[0].len(), 42 * 42);
        assert_eq!(display.framebuffer().pixel(100, 100), Some(Rgb565::RED));
        assert_eq!(display.framebuffer().pixel(80, 80), Some(Rgb565::BLACK));
    }

    #[test]
    fn test_hold_batches_operations() {
        let events = log();
        let mut buf = frame(PanelVariant::Rm67162);
        let mut display = Buffered::for_panel(panel(PanelVariant::Rm67162, &events), &mut buf).unwrap();

        display.hold_display();
        display.pixel(10, 10, Rgb565::RED).unwrap();
        display.pixel(20, 30, Rgb565::GREEN).unwrap();
        assert!(events.borrow().is_empty());

        display.release_display().unwrap();
        assert_eq!(windows(&events), [(10, 10, 21, 31)]);
    }

    #[test]
    fn test_manual_refresh_mode() {
        let events = log();
        let mut buf = frame(PanelVariant::Sh8601);
        let mut display = Buffered::for_panel(panel(PanelVariant::Sh8601, &events), &mut buf).unwrap();
        display.set_auto_refresh(false);

        display.fill(Rgb565::BLUE).unwrap();
        assert!(events.borrow().is_empty());

        display.flush().unwrap();
        assert_eq!(windows(&events), [(0, 0, 367, 447)]);

        // nothing new to send
        events.borrow_mut().clear();
        display.flush().unwrap();
        assert!(events.borrow().is_empty());

        display.refresh().unwrap();
        assert_eq!(windows(&events), [(0, 0, 367, 447)]);
    }

    #[test]
    fn test_failed_flush_keeps_frame_dirty() {
        let events = log();
        let mut buf = frame(PanelVariant::Sh8601);
        let mut display = Buffered::for_panel(panel(PanelVariant::Sh8601, &events), &mut buf).unwrap();
        display.display_mut().sleep(&mut MockDelay::new(&events)).unwrap();

        assert_eq!(display.pixel(1, 1, Rgb565::RED), Err(Error::NotInitialized));
        // the pixel still landed in memory
        assert_eq!(display.framebuffer().pixel(1, 1), Some(Rgb565::RED));
        assert_eq!(display.framebuffer().dirty(), Some(Rect::new(0, 0, 368, 448)));
    }

    #[test]
    fn test_small_buffer_rejected() {
        let events = log();
        let mut buf = vec![Rgb565::BLACK; 100];
        let result = Buffered::for_panel(panel(PanelVariant::Rm67162, &events), &mut buf);
        assert!(matches!(result, Err(Error::InvalidArgument)));
    }
}
