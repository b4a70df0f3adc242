//! Orientation and rotation tables

use crate::error::Error;

/// MADCTL (0x36) register bits
pub mod madctl {
    /// Row address order (bottom to top)
    pub const MY: u8 = 0x80;
    /// Column address order (right to left)
    pub const MX: u8 = 0x40;
    /// Row/column exchange
    pub const MV: u8 = 0x20;
    /// Line refresh order (vertical scroll direction)
    pub const ML: u8 = 0x10;
    /// BGR subpixel order
    pub const BGR: u8 = 0x08;
    /// Data latch order (right to left)
    pub const MH: u8 = 0x04;
    /// RGB subpixel order
    pub const RGB: u8 = 0x00;
}

/// Panel orientation in 90° steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Deg0,
        Orientation::Deg90,
        Orientation::Deg180,
        Orientation::Deg270,
    ];

    /// Index into a rotation table
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Orientation for a table index, wrapping modulo 4
    pub const fn from_index(index: u8) -> Self {
        Self::ALL[(index % 4) as usize]
    }

    /// Next orientation, 90° further
    pub const fn rotated(self) -> Self {
        Self::from_index(self as u8 + 1)
    }

    pub const fn degrees(self) -> u16 {
        self as u16 * 90
    }

    /// True for 90° and 270°
    pub const fn is_transposed(self) -> bool {
        matches!(self, Orientation::Deg90 | Orientation::Deg270)
    }
}

impl TryFrom<u16> for Orientation {
    type Error = Error;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Orientation::Deg0),
            90 => Ok(Orientation::Deg90),
            180 => Ok(Orientation::Deg180),
            270 => Ok(Orientation::Deg270),
            _ => Err(Error::InvalidArgument),
        }
    }
}

/// One row of a rotation table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotationEntry {
    /// MADCTL orientation bits for this rotation
    pub madctl: u8,
    /// Logical width
    pub width: u16,
    /// Logical height
    pub height: u16,
    /// Column offset added to every address
    pub col_start: u16,
    /// Row offset added to every address
    pub row_start: u16,
}

impl RotationEntry {
    pub const fn new(madctl: u8, width: u16, height: u16, col_start: u16, row_start: u16) -> Self {
        Self {
            madctl,
            width,
            height,
            col_start,
            row_start,
        }
    }
}

/// Rotation table indexed by [`Orientation::index`]
pub type RotationTable = [RotationEntry; 4];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_wraps() {
        assert_eq!(Orientation::Deg270.rotated(), Orientation::Deg0);
        assert_eq!(Orientation::from_index(5), Orientation::Deg90);
        assert_eq!(Orientation::Deg180.degrees(), 180);
    }

    #[test]
    fn test_orientation_from_degrees() {
        assert_eq!(Orientation::try_from(90), Ok(Orientation::Deg90));
        assert_eq!(Orientation::try_from(45), Err(Error::InvalidArgument));
    }
}
