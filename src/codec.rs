//! Configuration record storage codec.
//!
//! Wire format (87 bytes, little-endian, no implicit padding):
//! ```text
//! ┌────────┬──────┬───────────────────────────────────────────────┐
//! │ Offset │ Size │ Field                                         │
//! ├────────┼──────┼───────────────────────────────────────────────┤
//! │   0    │  2   │ lever.min (u16 LE)                            │
//! │   2    │  2   │ lever.max (u16 LE)                            │
//! │   4    │  1   │ lever flags: bit0 invert, bits1–7 reserved    │
//! │   5    │ 48   │ light.colors[12]: mode, v0, v1, v2 per slot   │
//! │  53    │  1   │ light.level                                   │
//! │  54    │ 15   │ light reserved                                │
//! │  69    │  1   │ sound.volume                                  │
//! │  70    │  3   │ sound reserved                                │
//! │  73    │  1   │ spin.units_per_turn                           │
//! │  74    │  3   │ spin reserved                                 │
//! │  77    │  1   │ tof.roi                                       │
//! │  78    │  7   │ tof reserved                                  │
//! │  85    │  1   │ hid: joy low nibble, nkro high nibble         │
//! │  86    │  1   │ aime: mode low nibble, virtual_aic high nibble│
//! └────────┴──────┴───────────────────────────────────────────────┘
//! ```
//! Color slot mode: 0 = RGB, 1 = HSV. Any other discriminant marks the
//! image as corrupt.
//!
//! This image is the storage contract: the external flash writer stores and
//! returns it as one opaque blob, and it must round-trip byte-for-byte,
//! reserved regions included. There is no format-version byte (a known
//! limitation of this layout), so any offset change here silently
//! invalidates existing saves.

use core::fmt;

use crate::config::{ColorSlot, ConfigRecord, LIGHT_SLOTS};

/// Total image size in bytes.
pub const RECORD_LEN: usize = 87;

const OFF_LEVER_MIN: usize = 0;
const OFF_LEVER_MAX: usize = 2;
const OFF_LEVER_FLAGS: usize = 4;
const OFF_COLORS: usize = 5;
const COLOR_STRIDE: usize = 4;
const OFF_LIGHT_LEVEL: usize = 53;
const OFF_LIGHT_RESERVED: usize = 54;
const OFF_SOUND_VOLUME: usize = 69;
const OFF_SOUND_RESERVED: usize = 70;
const OFF_SPIN_UNITS: usize = 73;
const OFF_SPIN_RESERVED: usize = 74;
const OFF_TOF_ROI: usize = 77;
const OFF_TOF_RESERVED: usize = 78;
const OFF_HID_FLAGS: usize = 85;
const OFF_AIME_MODES: usize = 86;

const COLOR_MODE_RGB: u8 = 0;
const COLOR_MODE_HSV: u8 = 1;

/// Structural decode failures. Field-domain checks are the mutation path's
/// concern; the codec only rejects images that cannot represent a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// Blob size differs from [`RECORD_LEN`].
    Length(usize),
    /// A color slot carries an unknown mode discriminant.
    ColorMode { slot: usize, mode: u8 },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length(got) => write!(f, "bad image length {got} (expected {RECORD_LEN})"),
            Self::ColorMode { slot, mode } => {
                write!(f, "color slot {slot} has unknown mode {mode}")
            }
        }
    }
}

/// Serialise a record into its storage image.
pub fn encode(record: &ConfigRecord) -> [u8; RECORD_LEN] {
    let mut buf = [0u8; RECORD_LEN];

    buf[OFF_LEVER_MIN..OFF_LEVER_MIN + 2].copy_from_slice(&record.lever.min.to_le_bytes());
    buf[OFF_LEVER_MAX..OFF_LEVER_MAX + 2].copy_from_slice(&record.lever.max.to_le_bytes());
    buf[OFF_LEVER_FLAGS] = (record.lever.reserved << 1) | u8::from(record.lever.invert);

    for (i, slot) in record.light.colors.iter().enumerate() {
        let base = OFF_COLORS + i * COLOR_STRIDE;
        let (mode, val) = match slot {
            ColorSlot::Rgb(v) => (COLOR_MODE_RGB, v),
            ColorSlot::Hsv(v) => (COLOR_MODE_HSV, v),
        };
        buf[base] = mode;
        buf[base + 1..base + 4].copy_from_slice(val);
    }
    buf[OFF_LIGHT_LEVEL] = record.light.level;
    buf[OFF_LIGHT_RESERVED..OFF_LIGHT_RESERVED + 15].copy_from_slice(&record.light.reserved);

    buf[OFF_SOUND_VOLUME] = record.sound.volume;
    buf[OFF_SOUND_RESERVED..OFF_SOUND_RESERVED + 3].copy_from_slice(&record.sound.reserved);

    buf[OFF_SPIN_UNITS] = record.spin.units_per_turn;
    buf[OFF_SPIN_RESERVED..OFF_SPIN_RESERVED + 3].copy_from_slice(&record.spin.reserved);

    buf[OFF_TOF_ROI] = record.tof.roi;
    buf[OFF_TOF_RESERVED..OFF_TOF_RESERVED + 7].copy_from_slice(&record.tof.reserved);

    buf[OFF_HID_FLAGS] = (u8::from(record.hid.nkro) << 4) | u8::from(record.hid.joy);
    buf[OFF_AIME_MODES] = ((record.aime.virtual_aic & 0x0F) << 4) | (record.aime.mode & 0x0F);

    buf
}

/// Deserialise a storage image back into a record.
pub fn decode(bytes: &[u8]) -> Result<ConfigRecord, CodecError> {
    if bytes.len() != RECORD_LEN {
        return Err(CodecError::Length(bytes.len()));
    }

    let mut colors = [ColorSlot::Rgb([0; 3]); LIGHT_SLOTS];
    for (i, slot) in colors.iter_mut().enumerate() {
        let base = OFF_COLORS + i * COLOR_STRIDE;
        let val = [bytes[base + 1], bytes[base + 2], bytes[base + 3]];
        *slot = match bytes[base] {
            COLOR_MODE_RGB => ColorSlot::Rgb(val),
            COLOR_MODE_HSV => ColorSlot::Hsv(val),
            mode => return Err(CodecError::ColorMode { slot: i, mode }),
        };
    }

    let mut light_reserved = [0u8; 15];
    light_reserved.copy_from_slice(&bytes[OFF_LIGHT_RESERVED..OFF_LIGHT_RESERVED + 15]);
    let mut sound_reserved = [0u8; 3];
    sound_reserved.copy_from_slice(&bytes[OFF_SOUND_RESERVED..OFF_SOUND_RESERVED + 3]);
    let mut spin_reserved = [0u8; 3];
    spin_reserved.copy_from_slice(&bytes[OFF_SPIN_RESERVED..OFF_SPIN_RESERVED + 3]);
    let mut tof_reserved = [0u8; 7];
    tof_reserved.copy_from_slice(&bytes[OFF_TOF_RESERVED..OFF_TOF_RESERVED + 7]);

    Ok(ConfigRecord {
        lever: crate::config::LeverConfig {
            min: u16::from_le_bytes([bytes[OFF_LEVER_MIN], bytes[OFF_LEVER_MIN + 1]]),
            max: u16::from_le_bytes([bytes[OFF_LEVER_MAX], bytes[OFF_LEVER_MAX + 1]]),
            invert: bytes[OFF_LEVER_FLAGS] & 0x01 != 0,
            reserved: bytes[OFF_LEVER_FLAGS] >> 1,
        },
        light: crate::config::LightConfig {
            colors,
            level: bytes[OFF_LIGHT_LEVEL],
            reserved: light_reserved,
        },
        sound: crate::config::SoundConfig {
            volume: bytes[OFF_SOUND_VOLUME],
            reserved: sound_reserved,
        },
        spin: crate::config::SpinConfig {
            units_per_turn: bytes[OFF_SPIN_UNITS],
            reserved: spin_reserved,
        },
        tof: crate::config::TofConfig {
            roi: bytes[OFF_TOF_ROI],
            reserved: tof_reserved,
        },
        hid: crate::config::HidConfig {
            joy: bytes[OFF_HID_FLAGS] & 0x0F != 0,
            nkro: bytes[OFF_HID_FLAGS] >> 4 != 0,
        },
        aime: crate::config::AimeConfig {
            mode: bytes[OFF_AIME_MODES] & 0x0F,
            virtual_aic: bytes[OFF_AIME_MODES] >> 4,
        },
    })
}
