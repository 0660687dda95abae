//! The mandatory 128 byte base block.

use core::fmt;

use log::trace;
use nom::{
    bits::{bits, complete::take as take_bits},
    bytes::complete::tag,
    number::complete::{le_u16, le_u32, le_u8},
    sequence::tuple,
};
use num_enum::{FromPrimitive, IntoPrimitive};

use crate::{
    bits::{array, as_block, check_range, checksum, verify_checksum, BitWriter, BLOCK_SIZE},
    descriptor::{parse_descriptor_slot, EighteenByteDescriptor},
    established_timings::{EstablishedTimings1, EstablishedTimings2, ManufacturerTimings},
    error::{EdidError, ParseResult, Result},
    standard_timing::{parse_standard_timing, StandardTiming},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const HEADER: [u8; 8] = [0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00];

pub const STANDARD_TIMING_SLOTS: usize = 8;
pub const DESCRIPTOR_SLOTS: usize = 4;

/// Three letter manufacturer code, packed as 5 bits per letter with `A` = 1.
///
/// Letters are normally `A` to `Z`; the codec accepts `@` to `_` so that any packed value
/// survives a round trip.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ManufacturerId(pub [char; 3]);

impl fmt::Display for ManufacturerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{a}{b}{c}")
    }
}

fn parse_manufacturer_id(input: &[u8]) -> ParseResult<'_, ManufacturerId> {
    let (remaining, (_reserved, a, b, c)): (_, (u8, u8, u8, u8)) =
        bits::<_, _, EdidError, EdidError, _>(tuple((
            take_bits(1usize),
            take_bits(5usize),
            take_bits(5usize),
            take_bits(5usize),
        )))(input)?;
    let letter = |raw: u8| char::from(raw + 64);
    Ok((remaining, ManufacturerId([letter(a), letter(b), letter(c)])))
}

impl ManufacturerId {
    fn encode(&self) -> Result<[u8; 2]> {
        let mut writer = BitWriter::new();
        writer.write(0, 1);
        for letter in self.0 {
            check_range("manufacturer_id", u32::from(letter), 0x40..=0x5F)?;
            writer.write(u32::from(letter) - 64, 5);
        }
        let bytes = writer.finish();
        Ok([bytes[0], bytes[1]])
    }
}

/// Bytes `0x10` and `0x11`.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ManufactureDateOrModelYear {
    ManufactureDate {
        /// `None` when the week is not specified.
        week: Option<u8>,
        year: u16,
    },
    ModelYear {
        year: u16,
    },
}

const MODEL_YEAR_WEEK: u8 = 0xFF;
const YEAR_BASE: u16 = 1990;

impl ManufactureDateOrModelYear {
    fn from_bytes(week: u8, year: u8) -> Self {
        let year = u16::from(year) + YEAR_BASE;
        match week {
            MODEL_YEAR_WEEK => ManufactureDateOrModelYear::ModelYear { year },
            0 => ManufactureDateOrModelYear::ManufactureDate { week: None, year },
            week => ManufactureDateOrModelYear::ManufactureDate {
                week: Some(week),
                year,
            },
        }
    }

    fn to_bytes(self) -> Result<[u8; 2]> {
        let (week, year) = match self {
            ManufactureDateOrModelYear::ManufactureDate { week, year } => {
                // Weeks past 54 are out of range for the standard but still a date on the wire.
                if let Some(week) = week {
                    check_range("week", week, 1..=MODEL_YEAR_WEEK - 1)?;
                }
                (week.unwrap_or(0), year)
            }
            ManufactureDateOrModelYear::ModelYear { year } => (MODEL_YEAR_WEEK, year),
        };
        check_range("year", year, YEAR_BASE..=YEAR_BASE + 255)?;
        Ok([week, (year - YEAR_BASE) as u8])
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdidVersion {
    pub version: u8,
    pub revision: u8,
}

/// Colour bit depth of a digital input, bits 6 to 4 of byte `0x14`.
#[derive(Debug, PartialEq, Eq, Copy, Clone, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum BitDepth {
    Undefined = 0,
    Six = 1,
    Eight = 2,
    Ten = 3,
    Twelve = 4,
    Fourteen = 5,
    Sixteen = 6,
    #[num_enum(default)]
    Reserved = 7,
}

/// Digital video interface standard, bits 3 to 0 of byte `0x14`.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VideoInterface {
    Undefined,
    Dvi,
    HdmiA,
    HdmiB,
    Mddi,
    DisplayPort,
    Reserved(u8),
}

impl VideoInterface {
    fn from_bits(bits: u8) -> Self {
        match bits & 0xF {
            0 => VideoInterface::Undefined,
            1 => VideoInterface::Dvi,
            2 => VideoInterface::HdmiA,
            3 => VideoInterface::HdmiB,
            4 => VideoInterface::Mddi,
            5 => VideoInterface::DisplayPort,
            other => VideoInterface::Reserved(other),
        }
    }

    fn bits(self) -> Result<u8> {
        Ok(match self {
            VideoInterface::Undefined => 0,
            VideoInterface::Dvi => 1,
            VideoInterface::HdmiA => 2,
            VideoInterface::HdmiB => 3,
            VideoInterface::Mddi => 4,
            VideoInterface::DisplayPort => 5,
            VideoInterface::Reserved(bits) => {
                check_range("video_interface", bits, 6..=15)?;
                bits
            }
        })
    }
}

/// Analog video white and sync levels relative to blank, bits 6 and 5 of byte `0x14`.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SignalLevel {
    /// +0.7 / −0.3 V
    Level0700_0300,
    /// +0.714 / −0.286 V
    Level0714_0286,
    /// +1.0 / −0.4 V
    Level1000_0400,
    /// +0.7 / 0 V
    Level0700_0000,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VideoInputDefinition {
    Digital {
        bit_depth: BitDepth,
        interface: VideoInterface,
    },
    Analog {
        signal_level: SignalLevel,
        blank_to_black_setup: bool,
        separate_sync: bool,
        composite_sync_on_hsync: bool,
        sync_on_green: bool,
        serrated_vsync: bool,
    },
}

impl VideoInputDefinition {
    fn from_byte(byte: u8) -> Self {
        let bit = |n: u8| byte & (1 << n) != 0;
        if bit(7) {
            VideoInputDefinition::Digital {
                bit_depth: BitDepth::from((byte >> 4) & 0b111),
                interface: VideoInterface::from_bits(byte),
            }
        } else {
            let signal_level = match (byte >> 5) & 0b11 {
                0b00 => SignalLevel::Level0700_0300,
                0b01 => SignalLevel::Level0714_0286,
                0b10 => SignalLevel::Level1000_0400,
                _ => SignalLevel::Level0700_0000,
            };
            VideoInputDefinition::Analog {
                signal_level,
                blank_to_black_setup: bit(4),
                separate_sync: bit(3),
                composite_sync_on_hsync: bit(2),
                sync_on_green: bit(1),
                serrated_vsync: bit(0),
            }
        }
    }

    fn to_byte(self) -> Result<u8> {
        let flag = |set: bool, n: u8| if set { 1u8 << n } else { 0 };
        Ok(match self {
            VideoInputDefinition::Digital {
                bit_depth,
                interface,
            } => 0x80 | (u8::from(bit_depth) << 4) | interface.bits()?,
            VideoInputDefinition::Analog {
                signal_level,
                blank_to_black_setup,
                separate_sync,
                composite_sync_on_hsync,
                sync_on_green,
                serrated_vsync,
            } => {
                let level = match signal_level {
                    SignalLevel::Level0700_0300 => 0b00,
                    SignalLevel::Level0714_0286 => 0b01,
                    SignalLevel::Level1000_0400 => 0b10,
                    SignalLevel::Level0700_0000 => 0b11,
                };
                (level << 5)
                    | flag(blank_to_black_setup, 4)
                    | flag(separate_sync, 3)
                    | flag(composite_sync_on_hsync, 2)
                    | flag(sync_on_green, 1)
                    | flag(serrated_vsync, 0)
            }
        })
    }

    pub fn is_digital(&self) -> bool {
        matches!(self, VideoInputDefinition::Digital { .. })
    }
}

/// Physical screen size; a zero in one dimension makes the other an aspect ratio.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScreenSize {
    pub horizontal_cm: u8,
    pub vertical_cm: u8,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DigitalColorEncoding {
    Rgb444,
    Rgb444YCrCb444,
    Rgb444YCrCb422,
    Rgb444YCrCb444YCrCb422,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AnalogColorType {
    Monochrome,
    Rgb,
    NonRgb,
    Undefined,
}

/// Bits 4 and 3 of byte `0x18`, whose meaning depends on the video input kind.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DisplayType {
    Digital(DigitalColorEncoding),
    Analog(AnalogColorType),
}

impl DisplayType {
    fn from_bits(digital: bool, bits: u8) -> Self {
        if digital {
            DisplayType::Digital(match bits & 0b11 {
                0b00 => DigitalColorEncoding::Rgb444,
                0b01 => DigitalColorEncoding::Rgb444YCrCb444,
                0b10 => DigitalColorEncoding::Rgb444YCrCb422,
                _ => DigitalColorEncoding::Rgb444YCrCb444YCrCb422,
            })
        } else {
            DisplayType::Analog(match bits & 0b11 {
                0b00 => AnalogColorType::Monochrome,
                0b01 => AnalogColorType::Rgb,
                0b10 => AnalogColorType::NonRgb,
                _ => AnalogColorType::Undefined,
            })
        }
    }

    fn bits(self) -> u8 {
        match self {
            DisplayType::Digital(DigitalColorEncoding::Rgb444)
            | DisplayType::Analog(AnalogColorType::Monochrome) => 0b00,
            DisplayType::Digital(DigitalColorEncoding::Rgb444YCrCb444)
            | DisplayType::Analog(AnalogColorType::Rgb) => 0b01,
            DisplayType::Digital(DigitalColorEncoding::Rgb444YCrCb422)
            | DisplayType::Analog(AnalogColorType::NonRgb) => 0b10,
            DisplayType::Digital(DigitalColorEncoding::Rgb444YCrCb444YCrCb422)
            | DisplayType::Analog(AnalogColorType::Undefined) => 0b11,
        }
    }
}

/// Bytes `0x14` to `0x18`.
#[derive(Debug, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BasicDisplayParameters {
    pub video_input: VideoInputDefinition,
    pub screen_size: ScreenSize,
    /// `None` when the gamma is defined elsewhere (wire value `0xFF`).
    pub gamma: Option<f64>,
    pub standby: bool,
    pub suspend: bool,
    pub active_off: bool,
    pub display_type: DisplayType,
    pub srgb_default: bool,
    pub preferred_timing_is_native: bool,
    pub continuous_frequency: bool,
}

/// Gamma is transmitted as `gamma * 100 - 100`.
pub(crate) fn gamma_from_byte(raw: u8) -> Option<f64> {
    match raw {
        0xFF => None,
        raw => Some(f64::from(u16::from(raw) + 100) / 100.0),
    }
}

pub(crate) fn gamma_to_byte(gamma: Option<f64>) -> Result<u8> {
    let Some(gamma) = gamma else {
        return Ok(0xFF);
    };
    let raw = (gamma * 100.0 - 100.0).round();
    if (0.0..=254.0).contains(&raw) {
        Ok(raw as u8)
    } else {
        Err(EdidError::out_of_range("gamma", raw as i64))
    }
}

fn parse_display_parameters(input: &[u8]) -> ParseResult<'_, BasicDisplayParameters> {
    let mut remaining = input;

    let video_input;
    (remaining, video_input) = le_u8(remaining)?;
    let video_input = VideoInputDefinition::from_byte(video_input);

    let (horizontal_cm, vertical_cm);
    (remaining, horizontal_cm) = le_u8(remaining)?;
    (remaining, vertical_cm) = le_u8(remaining)?;

    let gamma;
    (remaining, gamma) = le_u8(remaining)?;

    let features;
    (remaining, features) = le_u8(remaining)?;
    let bit = |n: u8| features & (1 << n) != 0;

    Ok((
        remaining,
        BasicDisplayParameters {
            video_input,
            screen_size: ScreenSize {
                horizontal_cm,
                vertical_cm,
            },
            gamma: gamma_from_byte(gamma),
            standby: bit(7),
            suspend: bit(6),
            active_off: bit(5),
            display_type: DisplayType::from_bits(video_input.is_digital(), features >> 3),
            srgb_default: bit(2),
            preferred_timing_is_native: bit(1),
            continuous_frequency: bit(0),
        },
    ))
}

impl BasicDisplayParameters {
    fn encode(&self) -> Result<[u8; 5]> {
        if self.video_input.is_digital() != matches!(self.display_type, DisplayType::Digital(_)) {
            return Err(EdidError::out_of_range(
                "display_type",
                self.display_type.bits(),
            ));
        }
        let flag = |set: bool, n: u8| if set { 1u8 << n } else { 0 };
        let features = flag(self.standby, 7)
            | flag(self.suspend, 6)
            | flag(self.active_off, 5)
            | (self.display_type.bits() << 3)
            | flag(self.srgb_default, 2)
            | flag(self.preferred_timing_is_native, 1)
            | flag(self.continuous_frequency, 0);
        Ok([
            self.video_input.to_byte()?,
            self.screen_size.horizontal_cm,
            self.screen_size.vertical_cm,
            gamma_to_byte(self.gamma)?,
            features,
        ])
    }
}

#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BaseBlock {
    pub manufacturer_id: ManufacturerId,
    pub product_code: u16,
    pub serial_number: u32,
    pub manufacture_date: ManufactureDateOrModelYear,
    pub version: EdidVersion,
    pub display_parameters: BasicDisplayParameters,
    /// Bytes `0x19` to `0x22`, kept verbatim.
    pub chromaticity: [u8; 10],
    pub established_timings_1: EstablishedTimings1,
    pub established_timings_2: EstablishedTimings2,
    pub manufacturer_timings: ManufacturerTimings,
    pub standard_timings: [Option<StandardTiming>; STANDARD_TIMING_SLOTS],
    /// `None` is an unused slot, transmitted as a dummy descriptor.
    pub descriptors: [Option<EighteenByteDescriptor>; DESCRIPTOR_SLOTS],
}

fn parse_base_block(input: &[u8]) -> ParseResult<'_, (BaseBlock, u8)> {
    let mut remaining = input;

    let _header;
    (remaining, _header) = tag(&HEADER[..])(remaining)?;

    let manufacturer_id;
    (remaining, manufacturer_id) = parse_manufacturer_id(remaining)?;

    let product_code;
    (remaining, product_code) = le_u16(remaining)?;

    let serial_number;
    (remaining, serial_number) = le_u32(remaining)?;

    let (week, year);
    (remaining, week) = le_u8(remaining)?;
    (remaining, year) = le_u8(remaining)?;

    let (version, revision);
    (remaining, version) = le_u8(remaining)?;
    (remaining, revision) = le_u8(remaining)?;

    let display_parameters;
    (remaining, display_parameters) = parse_display_parameters(remaining)?;

    let chromaticity;
    (remaining, chromaticity) = array(remaining)?;

    let (established_1, established_2, manufacturer);
    (remaining, established_1) = le_u8(remaining)?;
    (remaining, established_2) = le_u8(remaining)?;
    (remaining, manufacturer) = le_u8(remaining)?;

    let mut standard_timings = [None; STANDARD_TIMING_SLOTS];
    for slot in standard_timings.iter_mut() {
        (remaining, *slot) = parse_standard_timing(remaining)?;
    }

    let mut descriptors: [Option<EighteenByteDescriptor>; DESCRIPTOR_SLOTS] = Default::default();
    for slot in descriptors.iter_mut() {
        (remaining, *slot) = parse_descriptor_slot(remaining)?;
    }

    let extension_count;
    (remaining, extension_count) = le_u8(remaining)?;

    let _checksum;
    (remaining, _checksum) = le_u8(remaining)?;

    Ok((
        remaining,
        (
            BaseBlock {
                manufacturer_id,
                product_code,
                serial_number,
                manufacture_date: ManufactureDateOrModelYear::from_bytes(week, year),
                version: EdidVersion { version, revision },
                display_parameters,
                chromaticity,
                established_timings_1: EstablishedTimings1::from_bits_retain(established_1),
                established_timings_2: EstablishedTimings2::from_bits_retain(established_2),
                manufacturer_timings: ManufacturerTimings::from_bits_retain(manufacturer),
                standard_timings,
                descriptors,
            },
            extension_count,
        ),
    ))
}

impl BaseBlock {
    /// Decodes a 128 byte base block, returning it with the extension count it announces.
    pub fn decode(bytes: &[u8]) -> Result<(BaseBlock, u8)> {
        let block = as_block(bytes)?;
        trace!("Decoding base block");
        if block[..HEADER.len()] != HEADER {
            return Err(EdidError::header(
                "base block",
                format!("expected {:02X?}, found {:02X?}", HEADER, &block[..HEADER.len()]),
            ));
        }
        verify_checksum(block)?;
        let (_, decoded) = parse_base_block(block)?;
        Ok(decoded)
    }

    pub fn encode(&self, extension_count: u8) -> Result<[u8; BLOCK_SIZE]> {
        let mut out = Vec::with_capacity(BLOCK_SIZE);
        out.extend_from_slice(&HEADER);
        out.extend_from_slice(&self.manufacturer_id.encode()?);
        out.extend_from_slice(&self.product_code.to_le_bytes());
        out.extend_from_slice(&self.serial_number.to_le_bytes());
        out.extend_from_slice(&self.manufacture_date.to_bytes()?);
        out.extend_from_slice(&[self.version.version, self.version.revision]);
        out.extend_from_slice(&self.display_parameters.encode()?);
        out.extend_from_slice(&self.chromaticity);
        out.extend_from_slice(&[
            self.established_timings_1.bits(),
            self.established_timings_2.bits(),
            self.manufacturer_timings.bits(),
        ]);
        for timing in &self.standard_timings {
            out.extend_from_slice(&StandardTiming::encode(timing.as_ref())?);
        }
        for slot in &self.descriptors {
            out.extend_from_slice(&EighteenByteDescriptor::encode_slot(slot.as_ref())?);
        }
        out.push(extension_count);
        out.push(0);

        let mut block = [0u8; BLOCK_SIZE];
        block.copy_from_slice(&out);
        block[BLOCK_SIZE - 1] = checksum(&block);
        Ok(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        descriptor::{
            AsciiString, AsciiStringKind, DisplayRangeLimits, SyncSignal, VideoTimingSupport,
        },
        standard_timing::AspectRatio,
        tests::test_init_log,
    };

    const SYNCMASTER: &[u8] = include_bytes!("../testdata/syncmaster");

    #[test]
    fn decodes_syncmaster() {
        test_init_log();
        let (block, extension_count) = BaseBlock::decode(SYNCMASTER).unwrap();
        assert_eq!(extension_count, 0);

        assert_eq!(block.manufacturer_id, ManufacturerId(['S', 'A', 'M']));
        assert_eq!(block.manufacturer_id.to_string(), "SAM");
        assert_eq!(block.product_code, 596);
        assert_eq!(block.serial_number, 1_146_106_418);
        assert_eq!(
            block.manufacture_date,
            ManufactureDateOrModelYear::ManufactureDate {
                week: Some(27),
                year: 2007
            }
        );
        assert_eq!(
            block.version,
            EdidVersion {
                version: 1,
                revision: 3
            }
        );
        assert_eq!(
            block.display_parameters,
            BasicDisplayParameters {
                video_input: VideoInputDefinition::Analog {
                    signal_level: SignalLevel::Level0700_0300,
                    blank_to_black_setup: false,
                    separate_sync: true,
                    composite_sync_on_hsync: true,
                    sync_on_green: true,
                    serrated_vsync: false,
                },
                screen_size: ScreenSize {
                    horizontal_cm: 47,
                    vertical_cm: 30
                },
                gamma: Some(2.2),
                standby: false,
                suspend: false,
                active_off: true,
                display_type: DisplayType::Analog(AnalogColorType::Rgb),
                srgb_default: false,
                preferred_timing_is_native: true,
                continuous_frequency: false,
            }
        );
        assert_eq!(
            block.established_timings_1,
            EstablishedTimings1::all() - EstablishedTimings1::H720V400F88
        );
        assert_eq!(
            block.established_timings_2,
            EstablishedTimings2::all() - EstablishedTimings2::H1024V768F87
        );
        assert_eq!(block.manufacturer_timings, ManufacturerTimings::H1152V870F75);
        assert_eq!(
            block.standard_timings[..4],
            [
                Some(StandardTiming {
                    x_resolution: 1280,
                    aspect_ratio: AspectRatio::Ratio5x4,
                    v_frequency: 60
                }),
                Some(StandardTiming {
                    x_resolution: 1152,
                    aspect_ratio: AspectRatio::Ratio4x3,
                    v_frequency: 75
                }),
                Some(StandardTiming {
                    x_resolution: 1680,
                    aspect_ratio: AspectRatio::Ratio16x10,
                    v_frequency: 60
                }),
                None,
            ]
        );

        match &block.descriptors[0] {
            Some(EighteenByteDescriptor::DetailedTiming(dtd)) => {
                assert_eq!(dtd.pixel_clock_khz, 146_250);
                assert_eq!(
                    (dtd.horizontal_active_pixels, dtd.vertical_active_lines),
                    (1680, 1050)
                );
                assert!(matches!(dtd.features.sync, SyncSignal::DigitalSeparate { .. }));
            }
            other => panic!("unexpected descriptor {other:?}"),
        }
        assert_eq!(
            block.descriptors[1],
            Some(EighteenByteDescriptor::DisplayRangeLimits(DisplayRangeLimits {
                min_v_rate_hz: 56,
                max_v_rate_hz: 75,
                min_h_rate_khz: 30,
                max_h_rate_khz: 83,
                max_pixel_clock_mhz: 170,
                video_timing_support: VideoTimingSupport::DefaultGtf,
            }))
        );
        assert_eq!(
            block.descriptors[2],
            Some(EighteenByteDescriptor::AsciiString(AsciiString {
                kind: AsciiStringKind::ProductName,
                text: "SyncMaster".to_owned(),
            }))
        );
        assert_eq!(
            block.descriptors[3],
            Some(EighteenByteDescriptor::AsciiString(AsciiString {
                kind: AsciiStringKind::SerialNumber,
                text: "HS3P701105".to_owned(),
            }))
        );

        assert_eq!(block.encode(extension_count).unwrap(), SYNCMASTER);
    }

    #[test]
    fn checksum_is_written_last() {
        let (block, _) = BaseBlock::decode(SYNCMASTER).unwrap();
        let bytes = block.encode(3).unwrap();
        assert_eq!(bytes[0x7E], 3);
        assert_eq!(bytes.iter().fold(0u8, |acc, b| acc.wrapping_add(*b)), 0);
    }

    #[test]
    fn corrupted_byte_fails_checksum() {
        for index in [0x08, 0x14, 0x36, 0x7E] {
            let mut bytes = SYNCMASTER.to_vec();
            bytes[index] ^= 0x40;
            assert!(matches!(
                BaseBlock::decode(&bytes),
                Err(EdidError::ChecksumMismatch { .. })
            ));
        }
    }

    #[test]
    fn bad_header_is_rejected() {
        let mut bytes = SYNCMASTER.to_vec();
        bytes[0] = 0x01;
        assert!(matches!(
            BaseBlock::decode(&bytes),
            Err(EdidError::MalformedHeader { .. })
        ));
    }

    #[test]
    fn model_year_uses_week_sentinel() {
        assert_eq!(
            ManufactureDateOrModelYear::from_bytes(0xFF, 30),
            ManufactureDateOrModelYear::ModelYear { year: 2020 }
        );
        assert_eq!(
            ManufactureDateOrModelYear::from_bytes(0, 30),
            ManufactureDateOrModelYear::ManufactureDate {
                week: None,
                year: 2020
            }
        );
        assert_eq!(
            ManufactureDateOrModelYear::ModelYear { year: 2020 }
                .to_bytes()
                .unwrap(),
            [0xFF, 30]
        );
        for week in [0, 0xFF] {
            assert!(ManufactureDateOrModelYear::ManufactureDate {
                week: Some(week),
                year: 2020
            }
            .to_bytes()
            .is_err());
        }
        assert!(ManufactureDateOrModelYear::ModelYear { year: 1989 }
            .to_bytes()
            .is_err());
    }

    #[test]
    fn stray_week_round_trips() {
        let mut bytes: [u8; BLOCK_SIZE] = SYNCMASTER.try_into().unwrap();
        bytes[0x10] = 100;
        bytes[BLOCK_SIZE - 1] = checksum(&bytes);

        let (block, extension_count) = BaseBlock::decode(&bytes).unwrap();
        assert_eq!(
            block.manufacture_date,
            ManufactureDateOrModelYear::ManufactureDate {
                week: Some(100),
                year: 2007
            }
        );
        assert_eq!(block.encode(extension_count).unwrap(), bytes);
    }

    #[test]
    fn digital_input_round_trips() {
        let (mut block, _) = BaseBlock::decode(SYNCMASTER).unwrap();
        block.display_parameters.video_input = VideoInputDefinition::Digital {
            bit_depth: BitDepth::Ten,
            interface: VideoInterface::DisplayPort,
        };
        block.display_parameters.display_type =
            DisplayType::Digital(DigitalColorEncoding::Rgb444YCrCb444YCrCb422);
        block.display_parameters.gamma = None;
        let bytes = block.encode(0).unwrap();
        assert_eq!(bytes[0x14], 0xB5);
        assert_eq!(bytes[0x17], 0xFF);
        assert_eq!(bytes[0x18] & 0b0001_1000, 0b0001_1000);
        assert_eq!(BaseBlock::decode(&bytes).unwrap(), (block, 0));
    }

    #[test]
    fn display_type_must_match_input_kind() {
        let (mut block, _) = BaseBlock::decode(SYNCMASTER).unwrap();
        block.display_parameters.display_type = DisplayType::Digital(DigitalColorEncoding::Rgb444);
        assert!(matches!(
            block.encode(0),
            Err(EdidError::ValueOutOfRange {
                field: "display_type",
                ..
            })
        ));
    }

    #[test]
    fn empty_slots_become_dummy_descriptors() {
        let (mut block, _) = BaseBlock::decode(SYNCMASTER).unwrap();
        block.descriptors[3] = None;
        let bytes = block.encode(0).unwrap();
        assert_eq!(&bytes[0x6C..0x71], &[0x00, 0x00, 0x00, 0x10, 0x00]);
        let (decoded, _) = BaseBlock::decode(&bytes).unwrap();
        assert_eq!(decoded.descriptors[3], None);
    }

    #[test]
    fn manufacturer_letters_are_checked() {
        assert_eq!(
            ManufacturerId(['S', 'A', 'M']).encode().unwrap(),
            [0x4C, 0x2D]
        );
        assert!(ManufacturerId(['s', 'A', 'M']).encode().is_err());
    }
}
