//! Persistent controller configuration.
//!
//! `ConfigRecord` is the single persisted entity of the firmware: a compact,
//! fixed-layout record shared between the console, the input pipeline and the
//! lighting engine. The console mutates it field-by-field (each mutation
//! range-checked at the call site), the persistence layer serialises it
//! through [`codec`](crate::codec), and everything else only reads it.
//!
//! Reserved bytes are part of the storage contract: they are always zero in
//! this layout revision and are carried through load/save untouched so a
//! future revision can claim them without breaking older images.

/// Valid `spin.units_per_turn` range (inclusive).
pub const SPIN_UNITS_MIN: u8 = 20;
pub const SPIN_UNITS_MAX: u8 = 255;

/// Number of addressable lighting slots.
pub const LIGHT_SLOTS: usize = 12;

/// One lighting slot: an RGB or HSV triple, tagged by mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSlot {
    /// Red, green, blue.
    Rgb([u8; 3]),
    /// Hue, saturation, value.
    Hsv([u8; 3]),
}

/// Magnetic lever calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeverConfig {
    /// Raw sensor reading mapped to the low end of travel.
    pub min: u16,
    /// Raw sensor reading mapped to the high end of travel.
    pub max: u16,
    /// Swap travel direction.
    pub invert: bool,
    /// Upper 7 bits of the flag byte. Always zero.
    pub reserved: u8,
}

/// Lighting configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightConfig {
    pub colors: [ColorSlot; LIGHT_SLOTS],
    /// Global brightness, 0–255.
    pub level: u8,
    /// Always zero.
    pub reserved: [u8; 15],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundConfig {
    pub volume: u8,
    /// Always zero.
    pub reserved: [u8; 3],
}

/// Spinner scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinConfig {
    /// Encoder units per full turn, 20–255.
    pub units_per_turn: u8,
    /// Always zero.
    pub reserved: [u8; 3],
}

/// Time-of-flight distance sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TofConfig {
    /// Region-of-interest selector.
    pub roi: u8,
    /// Always zero.
    pub reserved: [u8; 7],
}

/// HID report modes. Both flags are independent; the wire format packs them
/// into adjacent nibbles of one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HidConfig {
    /// Emit joystick reports.
    pub joy: bool,
    /// N-key-rollover keyboard reports.
    pub nkro: bool,
}

/// Card-reader emulation. Both fields are 4-bit enumerations (0–15).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AimeConfig {
    pub mode: u8,
    pub virtual_aic: u8,
}

/// The full persisted configuration record.
///
/// Field groups follow the storage image order; see [`codec`](crate::codec)
/// for the exact byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigRecord {
    pub lever: LeverConfig,
    pub light: LightConfig,
    pub sound: SoundConfig,
    pub spin: SpinConfig,
    pub tof: TofConfig,
    pub hid: HidConfig,
    pub aime: AimeConfig,
}

impl Default for ConfigRecord {
    /// The compiled-in factory image. Every value sits inside its validated
    /// domain; reserved bytes are zero.
    fn default() -> Self {
        let mut colors = [ColorSlot::Hsv([0, 255, 255]); LIGHT_SLOTS];
        for (i, slot) in colors.iter_mut().enumerate() {
            // Spread hues evenly around the wheel.
            *slot = ColorSlot::Hsv([(i as u8) * 21, 255, 255]);
        }
        Self {
            lever: LeverConfig {
                min: 0,
                max: 4095,
                invert: false,
                reserved: 0,
            },
            light: LightConfig {
                colors,
                level: 128,
                reserved: [0; 15],
            },
            sound: SoundConfig {
                volume: 128,
                reserved: [0; 3],
            },
            spin: SpinConfig {
                units_per_turn: 80,
                reserved: [0; 3],
            },
            tof: TofConfig {
                roi: 8,
                reserved: [0; 7],
            },
            hid: HidConfig {
                joy: true,
                nkro: false,
            },
            aime: AimeConfig {
                mode: 0,
                virtual_aic: 0,
            },
        }
    }
}
