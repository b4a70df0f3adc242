//! Color model
//!
//! Colors are carried through the rasterizer as native RGB565 values
//! (`RRRRRGGG_GGGBBBBB`, red in the high bits). They are only turned into
//! bus bytes at the transport edge, where the panel's pixel format and
//! byte order apply.
//!
//! The panels clock the high byte first, so the default [`ByteOrder`] is
//! big-endian. A buffer of RGB565 values laid out in little-endian memory
//! must therefore be byte-swapped before it is streamed; [`Rgb565::swapped`]
//! gives that storage form.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// 16-bit 5/6/5 color in native (register) bit order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb565(u16);

impl Rgb565 {
    pub const BLACK: Self = Self(0x0000);
    pub const BLUE: Self = Self(0x001F);
    pub const RED: Self = Self(0xF800);
    pub const GREEN: Self = Self(0x07E0);
    pub const CYAN: Self = Self(0x07FF);
    pub const MAGENTA: Self = Self(0xF81F);
    pub const YELLOW: Self = Self(0xFFE0);
    pub const WHITE: Self = Self(0xFFFF);

    /// Encode 8-bit channels, truncating to 5/6/5 bits
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        let r = (r as u16 & 0xF8) << 8;
        let g = (g as u16 & 0xFC) << 3;
        let b = b as u16 >> 3;
        Self(r | g | b)
    }

    /// Wrap a native RGB565 value
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Native RGB565 value
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Wrap a value stored byte-swapped (little-endian memory, big-endian bus)
    pub const fn from_swapped(stored: u16) -> Self {
        Self(stored.swap_bytes())
    }

    /// Value as stored byte-swapped for a little-endian pixel buffer
    pub const fn swapped(self) -> u16 {
        self.0.swap_bytes()
    }

    /// 5-bit red channel
    pub const fn r5(self) -> u8 {
        (self.0 >> 11) as u8
    }

    /// 6-bit green channel
    pub const fn g6(self) -> u8 {
        ((self.0 >> 5) & 0x3F) as u8
    }

    /// 5-bit blue channel
    pub const fn b5(self) -> u8 {
        (self.0 & 0x1F) as u8
    }

    /// Expand back to 8-bit channels by bit replication
    pub const fn to_rgb888(self) -> (u8, u8, u8) {
        let r = self.r5();
        let g = self.g6();
        let b = self.b5();
        ((r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2))
    }

    /// Bus bytes in the given order
    pub const fn to_bytes(self, order: ByteOrder) -> [u8; 2] {
        match order {
            ByteOrder::BigEndian => self.0.to_be_bytes(),
            ByteOrder::LittleEndian => self.0.to_le_bytes(),
        }
    }

    /// Read a color from two bus bytes
    pub const fn from_bytes(bytes: [u8; 2], order: ByteOrder) -> Self {
        match order {
            ByteOrder::BigEndian => Self(u16::from_be_bytes(bytes)),
            ByteOrder::LittleEndian => Self(u16::from_le_bytes(bytes)),
        }
    }
}

impl From<(u8, u8, u8)> for Rgb565 {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// Byte order of 16-bit pixels on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ByteOrder {
    /// High byte first (panel default)
    #[default]
    BigEndian,
    /// Low byte first
    LittleEndian,
}

/// Subpixel order, selected with the MADCTL BGR bit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColorOrder {
    #[default]
    Rgb,
    Bgr,
}

impl ColorOrder {
    /// MADCTL bits for this order
    pub const fn madctl_bits(self) -> u8 {
        match self {
            ColorOrder::Rgb => 0x00,
            ColorOrder::Bgr => 0x08,
        }
    }
}

/// Interface pixel format (COLMOD)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PixelFormat {
    /// 16 bpp, 5/6/5
    #[default]
    Rgb565,
    /// 18 bpp, three bytes with 6 significant bits each
    Rgb666,
    /// 24 bpp, three full bytes
    Rgb888,
}

impl PixelFormat {
    /// Largest encoded pixel size in bytes
    pub const MAX_BYTES: usize = 3;

    /// Select a format from a bits-per-pixel count
    pub fn from_bpp(bpp: u8) -> crate::Result<Self> {
        match bpp {
            16 => Ok(PixelFormat::Rgb565),
            18 => Ok(PixelFormat::Rgb666),
            24 => Ok(PixelFormat::Rgb888),
            _ => Err(Error::InvalidArgument),
        }
    }

    /// Bits per pixel
    pub const fn bpp(self) -> u8 {
        match self {
            PixelFormat::Rgb565 => 16,
            PixelFormat::Rgb666 => 18,
            PixelFormat::Rgb888 => 24,
        }
    }

    /// Bytes per pixel on the bus
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb565 => 2,
            PixelFormat::Rgb666 | PixelFormat::Rgb888 => 3,
        }
    }

    /// COLMOD register value
    pub const fn colmod(self) -> u8 {
        match self {
            PixelFormat::Rgb565 => 0x55,
            PixelFormat::Rgb666 => 0x66,
            PixelFormat::Rgb888 => 0x77,
        }
    }

    /// Encode one pixel into `out`, returning the number of bytes written
    ///
    /// `out` must hold at least [`bytes_per_pixel`](Self::bytes_per_pixel)
    /// bytes. The byte order only affects 16-bit pixels; the three-byte
    /// formats are always sent red first.
    ///
    /// The rasterizer works in RGB565, so the 18- and 24-bit formats get
    /// the color expanded by bit replication and carry no more detail than
    /// 16 bpp. Use [`encode_rgb888`](Self::encode_rgb888) to send full-depth
    /// source pixels.
    pub fn encode(self, color: Rgb565, order: ByteOrder, out: &mut [u8]) -> usize {
        match self {
            PixelFormat::Rgb565 => {
                out[..2].copy_from_slice(&color.to_bytes(order));
                2
            }
            PixelFormat::Rgb666 | PixelFormat::Rgb888 => self.encode_rgb888(color.to_rgb888(), order, out),
        }
    }

    /// Encode an 8-bit-per-channel pixel without passing through RGB565
    ///
    /// The 16-bit format still quantizes to 5/6/5 and the 18-bit format
    /// keeps the top six bits of each channel.
    pub fn encode_rgb888(self, (r, g, b): (u8, u8, u8), order: ByteOrder, out: &mut [u8]) -> usize {
        match self {
            PixelFormat::Rgb565 => PixelFormat::Rgb565.encode(Rgb565::new(r, g, b), order, out),
            PixelFormat::Rgb666 => {
                out[0] = r & 0xFC;
                out[1] = g & 0xFC;
                out[2] = b & 0xFC;
                3
            }
            PixelFormat::Rgb888 => {
                out[0] = r;
                out[1] = g;
                out[2] = b;
                3
            }
        }
    }
}
