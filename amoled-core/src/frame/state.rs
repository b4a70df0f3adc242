//! Current orientation, logical size and register image

use crate::color::ColorOrder;
use crate::error::Error;
use crate::geometry::{Rect, Window};

use super::orientation::{madctl, Orientation, RotationTable};

/// Frame/window state of one panel
///
/// Logical coordinates are what drawing calls use: `(0, 0)` is the top
/// left of the panel as currently rotated. The controller performs the
/// actual axis transform through MADCTL, so converting a logical window
/// into a panel address only adds the column/row gaps.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameState {
    rotations: RotationTable,
    orientation: Orientation,
    width: u16,
    height: u16,
    x_gap: u16,
    y_gap: u16,
    madctl: u8,
}

impl FrameState {
    /// Create the state for a rotation table, starting at 0°
    pub fn new(rotations: RotationTable, order: ColorOrder) -> Self {
        let mut state = Self {
            rotations,
            orientation: Orientation::Deg0,
            width: 0,
            height: 0,
            x_gap: 0,
            y_gap: 0,
            madctl: order.madctl_bits(),
        };
        state.set_orientation(Orientation::Deg0);
        state
    }

    /// MADCTL bits that survive a rotation change
    ///
    /// Everything below MV is kept unless the table itself drives that
    /// bit (SH8601 encodes its flips in the low bits).
    fn preserved_bits(&self) -> u8 {
        let driven = self.rotations.iter().fold(0u8, |acc, r| acc | r.madctl);
        0x1F & !driven
    }

    /// Apply an orientation and return the new MADCTL value
    pub fn set_orientation(&mut self, orientation: Orientation) -> u8 {
        let entry = self.rotations[orientation.index()];
        self.madctl = (self.madctl & self.preserved_bits()) | entry.madctl;
        self.orientation = orientation;
        self.width = entry.width;
        self.height = entry.height;
        self.x_gap = entry.col_start;
        self.y_gap = entry.row_start;
        self.madctl
    }

    /// Replace the rotation table and re-apply the current orientation
    pub fn set_rotations(&mut self, rotations: RotationTable) -> crate::Result<u8> {
        if rotations.iter().any(|r| r.width == 0 || r.height == 0) {
            return Err(Error::InvalidArgument);
        }
        self.rotations = rotations;
        Ok(self.set_orientation(self.orientation))
    }

    /// Set or clear the column (MX) and row (MY) mirror bits
    pub fn set_mirror(&mut self, mirror_x: bool, mirror_y: bool) -> u8 {
        self.set_bit(madctl::MX, mirror_x);
        self.set_bit(madctl::MY, mirror_y);
        self.madctl
    }

    /// Set or clear the row/column exchange bit (MV)
    ///
    /// The logical size is not swapped; use a rotation for that.
    pub fn set_swap_xy(&mut self, swap: bool) -> u8 {
        self.set_bit(madctl::MV, swap);
        self.madctl
    }

    /// Set or clear the line refresh order bit (ML)
    pub fn set_scroll_bottom_to_top(&mut self, bottom_to_top: bool) -> u8 {
        self.set_bit(madctl::ML, bottom_to_top);
        self.madctl
    }

    fn set_bit(&mut self, bit: u8, on: bool) {
        if on {
            self.madctl |= bit;
        } else {
            self.madctl &= !bit;
        }
    }

    /// Override the column/row offsets
    pub fn set_gap(&mut self, x_gap: u16, y_gap: u16) {
        self.x_gap = x_gap;
        self.y_gap = y_gap;
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Logical width for the current orientation
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Logical height for the current orientation
    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn gaps(&self) -> (u16, u16) {
        (self.x_gap, self.y_gap)
    }

    /// Current MADCTL register image
    pub fn madctl(&self) -> u8 {
        self.madctl
    }

    pub fn rotations(&self) -> &RotationTable {
        &self.rotations
    }

    /// Logical drawing area
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width as u32, self.height as u32)
    }

    /// Clip a logical rectangle to the drawing area
    pub fn clip(&self, rect: &Rect) -> Option<Rect> {
        self.bounds().intersect(rect)
    }

    /// Translate a logical window into a panel address window
    ///
    /// Rejects windows that reach past the logical size; those would
    /// address memory outside the visible panel.
    pub fn panel_window(&self, window: &Window) -> crate::Result<Window> {
        if window.x1 >= self.width || window.y1 >= self.height {
            return Err(Error::OutOfBounds);
        }
        window.offset(self.x_gap, self.y_gap)
    }
}
