use nom::number::complete::{le_u16, le_u8};

use crate::{
    bits::{check_range, join_byte, nibbles, split_wide},
    error::{EdidError, ParseResult, Result},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An 18 byte detailed timing descriptor.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetailedTimingDescriptor {
    /// Pixel clock in kHz. Transmitted in units of 10 kHz.
    pub pixel_clock_khz: u32,
    pub horizontal_active_pixels: u16,
    pub horizontal_blanking_pixels: u16,
    pub vertical_active_lines: u16,
    pub vertical_blanking_lines: u16,
    pub horizontal_front_porch: u16,
    pub horizontal_sync_width: u16,
    pub vertical_front_porch: u16,
    pub vertical_sync_width: u16,
    /// Horizontal image size in millimeters
    pub horizontal_image_size_mm: u16,
    /// Vertical image size in millimeters
    pub vertical_image_size_mm: u16,
    /// Border pixels on one side of screen (i.e. total number is twice this)
    pub horizontal_border_pixels: u8,
    /// Border lines on one side of screen (i.e. total number is twice this)
    pub vertical_border_lines: u8,
    pub features: FeaturesBitmap,
}

/// Byte 17 of a detailed timing descriptor.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeaturesBitmap {
    pub interlaced: bool,
    pub stereo_mode: StereoMode,
    pub sync: SyncSignal,
}

/// Stereo viewing support, bits 6, 5 and 0 of the features byte.
///
/// Bit 0 is a "don't care" when bits 6 and 5 are clear; it is written back as zero.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StereoMode {
    None,
    FieldSequentialRight,
    FieldSequentialLeft,
    TwoWayInterleavedRightEven,
    TwoWayInterleavedLeftEven,
    FourWayInterleaved,
    SideBySideInterleaved,
}

impl StereoMode {
    fn from_bits(bits: u8) -> Self {
        match bits {
            0b010 => StereoMode::FieldSequentialRight,
            0b100 => StereoMode::FieldSequentialLeft,
            0b011 => StereoMode::TwoWayInterleavedRightEven,
            0b101 => StereoMode::TwoWayInterleavedLeftEven,
            0b110 => StereoMode::FourWayInterleaved,
            0b111 => StereoMode::SideBySideInterleaved,
            _ => StereoMode::None,
        }
    }

    fn bits(self) -> u8 {
        match self {
            StereoMode::None => 0b000,
            StereoMode::FieldSequentialRight => 0b010,
            StereoMode::FieldSequentialLeft => 0b100,
            StereoMode::TwoWayInterleavedRightEven => 0b011,
            StereoMode::TwoWayInterleavedLeftEven => 0b101,
            StereoMode::FourWayInterleaved => 0b110,
            StereoMode::SideBySideInterleaved => 0b111,
        }
    }
}

/// Sync signal definition, bits 4 to 1 of the features byte.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SyncSignal {
    AnalogComposite {
        bipolar: bool,
        serrations: bool,
        sync_on_all_rgb: bool,
    },
    DigitalComposite {
        serrations: bool,
        h_sync_positive: bool,
    },
    DigitalSeparate {
        v_sync_positive: bool,
        h_sync_positive: bool,
    },
}

impl FeaturesBitmap {
    pub(crate) fn from_byte(byte: u8) -> Self {
        let bit = |n: u8| byte & (1 << n) != 0;
        let sync = match (bit(4), bit(3)) {
            (false, bipolar) => SyncSignal::AnalogComposite {
                bipolar,
                serrations: bit(2),
                sync_on_all_rgb: bit(1),
            },
            (true, false) => SyncSignal::DigitalComposite {
                serrations: bit(2),
                h_sync_positive: bit(1),
            },
            (true, true) => SyncSignal::DigitalSeparate {
                v_sync_positive: bit(2),
                h_sync_positive: bit(1),
            },
        };
        FeaturesBitmap {
            interlaced: bit(7),
            stereo_mode: StereoMode::from_bits(((byte >> 4) & 0b110) | (byte & 0b1)),
            sync,
        }
    }

    pub(crate) fn to_byte(self) -> u8 {
        let flag = |set: bool, n: u8| if set { 1u8 << n } else { 0 };
        let stereo = self.stereo_mode.bits();
        let sync = match self.sync {
            SyncSignal::AnalogComposite {
                bipolar,
                serrations,
                sync_on_all_rgb,
            } => flag(bipolar, 3) | flag(serrations, 2) | flag(sync_on_all_rgb, 1),
            SyncSignal::DigitalComposite {
                serrations,
                h_sync_positive,
            } => 0b1_0000 | flag(serrations, 2) | flag(h_sync_positive, 1),
            SyncSignal::DigitalSeparate {
                v_sync_positive,
                h_sync_positive,
            } => 0b1_1000 | flag(v_sync_positive, 2) | flag(h_sync_positive, 1),
        };
        flag(self.interlaced, 7) | ((stereo & 0b110) << 4) | (stereo & 0b1) | sync
    }
}

pub(crate) fn parse_detailed_timing(input: &[u8]) -> ParseResult<'_, DetailedTimingDescriptor> {
    let mut remaining = input;

    let pixel_clock_khz = {
        let pixel_clock_10khz;
        (remaining, pixel_clock_10khz) = le_u16(remaining)?;
        u32::from(pixel_clock_10khz) * 10
    };

    let horizontal_active_pixels;
    let horizontal_blanking_pixels;
    {
        let horizontal_active_lo;
        (remaining, horizontal_active_lo) = le_u8(remaining)?;

        let horizontal_blanking_lo;
        (remaining, horizontal_blanking_lo) = le_u8(remaining)?;

        let (active_hi, blanking_hi);
        (remaining, (active_hi, blanking_hi)) = nibbles(remaining)?;

        horizontal_active_pixels = u16::from_le_bytes([horizontal_active_lo, active_hi]);
        horizontal_blanking_pixels = u16::from_le_bytes([horizontal_blanking_lo, blanking_hi]);
    }

    let vertical_active_lines;
    let vertical_blanking_lines;
    {
        let vertical_active_lo;
        (remaining, vertical_active_lo) = le_u8(remaining)?;

        let vertical_blanking_lo;
        (remaining, vertical_blanking_lo) = le_u8(remaining)?;

        let (active_hi, blanking_hi);
        (remaining, (active_hi, blanking_hi)) = nibbles(remaining)?;

        vertical_active_lines = u16::from_le_bytes([vertical_active_lo, active_hi]);
        vertical_blanking_lines = u16::from_le_bytes([vertical_blanking_lo, blanking_hi]);
    }

    let horizontal_front_porch;
    let horizontal_sync_width;
    let vertical_front_porch;
    let vertical_sync_width;
    {
        let horizontal_front_porch_lo;
        (remaining, horizontal_front_porch_lo) = le_u8(remaining)?;

        let horizontal_sync_width_lo;
        (remaining, horizontal_sync_width_lo) = le_u8(remaining)?;

        let (vertical_front_porch_lo, vertical_sync_width_lo);
        (remaining, (vertical_front_porch_lo, vertical_sync_width_lo)) = nibbles(remaining)?;

        let porch_sync_hi;
        (remaining, porch_sync_hi) = le_u8(remaining)?;

        horizontal_front_porch =
            u16::from_le_bytes([horizontal_front_porch_lo, porch_sync_hi >> 6]);
        horizontal_sync_width =
            u16::from_le_bytes([horizontal_sync_width_lo, (porch_sync_hi >> 4) & 0x3]);
        vertical_front_porch =
            u16::from(vertical_front_porch_lo) | (u16::from((porch_sync_hi >> 2) & 0x3) << 4);
        vertical_sync_width =
            u16::from(vertical_sync_width_lo) | (u16::from(porch_sync_hi & 0x3) << 4);
    }

    let horizontal_image_size_mm;
    let vertical_image_size_mm;
    {
        let horizontal_size_lo;
        (remaining, horizontal_size_lo) = le_u8(remaining)?;

        let vertical_size_lo;
        (remaining, vertical_size_lo) = le_u8(remaining)?;

        let (horizontal_hi, vertical_hi);
        (remaining, (horizontal_hi, vertical_hi)) = nibbles(remaining)?;

        horizontal_image_size_mm = u16::from_le_bytes([horizontal_size_lo, horizontal_hi]);
        vertical_image_size_mm = u16::from_le_bytes([vertical_size_lo, vertical_hi]);
    }

    let horizontal_border_pixels;
    (remaining, horizontal_border_pixels) = le_u8(remaining)?;

    let vertical_border_lines;
    (remaining, vertical_border_lines) = le_u8(remaining)?;

    let features;
    (remaining, features) = le_u8(remaining)?;

    Ok((
        remaining,
        DetailedTimingDescriptor {
            pixel_clock_khz,
            horizontal_active_pixels,
            horizontal_blanking_pixels,
            vertical_active_lines,
            vertical_blanking_lines,
            horizontal_front_porch,
            horizontal_sync_width,
            vertical_front_porch,
            vertical_sync_width,
            horizontal_image_size_mm,
            vertical_image_size_mm,
            horizontal_border_pixels,
            vertical_border_lines,
            features: FeaturesBitmap::from_byte(features),
        },
    ))
}

impl DetailedTimingDescriptor {
    /// Decodes exactly 18 bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 18 {
            return Err(EdidError::out_of_range("detailed timing length", bytes.len() as i64));
        }
        let (_, dtd) = parse_detailed_timing(bytes)?;
        Ok(dtd)
    }

    pub fn encode(&self) -> Result<[u8; 18]> {
        if self.pixel_clock_khz % 10 != 0 {
            return Err(EdidError::out_of_range("pixel_clock_khz", self.pixel_clock_khz));
        }
        // A zero clock would read back as a display descriptor.
        check_range("pixel_clock_khz", self.pixel_clock_khz, 10..=655_350)?;
        let pixel_clock = ((self.pixel_clock_khz / 10) as u16).to_le_bytes();

        let (h_active_lo, h_active_hi) =
            split_wide("horizontal_active_pixels", self.horizontal_active_pixels, 12)?;
        let (h_blank_lo, h_blank_hi) =
            split_wide("horizontal_blanking_pixels", self.horizontal_blanking_pixels, 12)?;
        let (v_active_lo, v_active_hi) =
            split_wide("vertical_active_lines", self.vertical_active_lines, 12)?;
        let (v_blank_lo, v_blank_hi) =
            split_wide("vertical_blanking_lines", self.vertical_blanking_lines, 12)?;
        let (h_porch_lo, h_porch_hi) =
            split_wide("horizontal_front_porch", self.horizontal_front_porch, 10)?;
        let (h_sync_lo, h_sync_hi) =
            split_wide("horizontal_sync_width", self.horizontal_sync_width, 10)?;
        check_range("vertical_front_porch", self.vertical_front_porch, 0..=63)?;
        check_range("vertical_sync_width", self.vertical_sync_width, 0..=63)?;
        let v_porch = self.vertical_front_porch as u8;
        let v_sync = self.vertical_sync_width as u8;
        let (h_size_lo, h_size_hi) =
            split_wide("horizontal_image_size_mm", self.horizontal_image_size_mm, 12)?;
        let (v_size_lo, v_size_hi) =
            split_wide("vertical_image_size_mm", self.vertical_image_size_mm, 12)?;

        Ok([
            pixel_clock[0],
            pixel_clock[1],
            h_active_lo,
            h_blank_lo,
            join_byte(h_active_hi, h_blank_hi, 4),
            v_active_lo,
            v_blank_lo,
            join_byte(v_active_hi, v_blank_hi, 4),
            h_porch_lo,
            h_sync_lo,
            join_byte(v_porch & 0xF, v_sync & 0xF, 4),
            (h_porch_hi << 6) | (h_sync_hi << 4) | ((v_porch >> 4) << 2) | (v_sync >> 4),
            h_size_lo,
            v_size_lo,
            join_byte(h_size_hi, v_size_hi, 4),
            self.horizontal_border_pixels,
            self.vertical_border_lines,
            self.features.to_byte(),
        ])
    }

    pub fn horizontal_total(&self) -> u32 {
        u32::from(self.horizontal_active_pixels) + u32::from(self.horizontal_blanking_pixels)
    }

    /// Total lines of one field (of the frame for progressive timings).
    pub fn vertical_total(&self) -> u32 {
        u32::from(self.vertical_active_lines) + u32::from(self.vertical_blanking_lines)
    }
}
