//! Per-controller init scripts and rotation tables

use amoled_core::frame::{madctl, RotationEntry, RotationTable};

use super::cmd;
use super::InitStep::{self, Colmod, Command, Delay, Madctl};

/// RM690B0 column RAM starts 16 pixels in
pub(super) const RM690B0_COL_OFFSET: u16 = 16;

/// RM-series rotation table; `offset` is the column offset at 0°, moved to
/// the row axis when the axes are exchanged
pub(super) fn raydium_rotations(width: u16, height: u16, offset: u16) -> RotationTable {
    [
        RotationEntry::new(madctl::RGB, width, height, offset, 0),
        RotationEntry::new(madctl::MX | madctl::MV, height, width, 0, offset),
        RotationEntry::new(madctl::MX | madctl::MY, width, height, offset, 0),
        RotationEntry::new(madctl::MV | madctl::MY, height, width, 0, offset),
    ]
}

/// SH8601 cannot exchange axes, so each "rotation" is a mirror
pub(super) fn sh8601_rotations(width: u16, height: u16) -> RotationTable {
    [
        RotationEntry::new(0x00, width, height, 0, 0),
        RotationEntry::new(0x02, width, height, 0, 0),
        RotationEntry::new(0x05, width, height, 0, 0),
        RotationEntry::new(0x07, width, height, 0, 0),
    ]
}

pub(super) static RM67162_INIT: &[InitStep] = &[
    Command(cmd::CMDSET, &[0x05]),
    Command(0x05, &[0x05]),
    Command(cmd::CMDSET, &[0x01]),
    Command(0x73, &[0x25]),
    Command(cmd::CMDSET, &[0x00]),
    Colmod,
    Command(cmd::STESL, &[0x00, 0x80]),
    Command(cmd::TEON, &[0x00]),
    Command(cmd::WRDISBV, &[0x00]),
    Command(cmd::SLPOUT, &[]),
    Delay(120),
    Madctl,
    Command(cmd::DISPON, &[]),
    Command(cmd::WRDISBV, &[0xFF]),
];

pub(super) static RM690B0_INIT: &[InitStep] = &[
    Command(cmd::CMDSET, &[0x20]),
    Command(0x26, &[0x0A]),
    Command(0x24, &[0x80]),
    Command(0x5A, &[0x51]),
    Command(0x5B, &[0x2E]),
    Command(cmd::CMDSET, &[0x00]),
    Command(cmd::CASET, &[0x00, 0x10, 0x01, 0xD1]),
    Command(cmd::RASET, &[0x00, 0x00, 0x02, 0x57]),
    Colmod,
    Command(0xC2, &[0x00]),
    Command(cmd::STESL, &[0x01, 0x66]),
    Command(cmd::TEON, &[0x00]),
    Command(cmd::WRDISBV, &[0x00]),
    Command(cmd::SLPOUT, &[]),
    Delay(120),
    Madctl,
    Command(cmd::DISPON, &[]),
    Command(cmd::WRDISBV, &[0xFF]),
];

pub(super) static SH8601_INIT: &[InitStep] = &[
    Command(cmd::SLPOUT, &[]),
    Delay(120),
    Command(cmd::STESL, &[0x01, 0x2C]),
    Colmod,
    Madctl,
    Command(cmd::TEON, &[0x00]),
    Command(cmd::WRCTRLD, &[0x20]),
    Delay(10),
    Command(cmd::CASET, &[0x00, 0x00, 0x01, 0x6F]),
    Command(cmd::RASET, &[0x00, 0x00, 0x01, 0xBF]),
    Command(cmd::WRDISBV, &[0x00]),
    Delay(10),
    Command(cmd::DISPON, &[]),
    Delay(10),
    Command(cmd::WRDISBV, &[0xFF]),
];
