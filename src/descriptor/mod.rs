//! The 18 byte descriptor slot shared by detailed timings and display descriptors.
//!
//! A slot whose first three bytes are zero holds a display descriptor selected by byte 3;
//! anything else is a detailed timing descriptor with a non zero pixel clock.

use log::debug;
use nom::{
    combinator::peek,
    number::complete::{le_u16, le_u8},
};

use crate::{
    bits::array,
    error::{fail, EdidError, ParseResult, Result},
    standard_timing::StandardTiming,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod ascii;
pub mod color_point;
pub mod detailed_timing;
pub mod established_timings3;
pub mod range_limits;

pub use ascii::{AsciiString, AsciiStringKind};
pub use color_point::WhitePoint;
pub use detailed_timing::{DetailedTimingDescriptor, FeaturesBitmap, StereoMode, SyncSignal};
pub use established_timings3::{
    EstablishedTimings3, EstablishedTimings3Byte10, EstablishedTimings3Byte11,
    EstablishedTimings3Byte6, EstablishedTimings3Byte7, EstablishedTimings3Byte8,
    EstablishedTimings3Byte9,
};
pub use range_limits::{DisplayRangeLimits, SecondaryGtf, VideoTimingSupport};

pub const DESCRIPTOR_SIZE: usize = 18;

const TAG_ESTABLISHED_TIMINGS_3: u8 = 0xF7;
const TAG_STANDARD_TIMINGS: u8 = 0xFA;
const TAG_COLOR_POINT: u8 = 0xFB;
const TAG_RANGE_LIMITS: u8 = 0xFD;
const TAG_DUMMY: u8 = 0x10;

/// Number of standard timing identifiers a `0xFA` descriptor carries.
pub const DESCRIPTOR_STANDARD_TIMINGS: usize = 6;

#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EighteenByteDescriptor {
    DetailedTiming(DetailedTimingDescriptor),
    DisplayRangeLimits(DisplayRangeLimits),
    AsciiString(AsciiString),
    EstablishedTimings3(EstablishedTimings3),
    StandardTimings([Option<StandardTiming>; DESCRIPTOR_STANDARD_TIMINGS]),
    ColorPoint([Option<WhitePoint>; 2]),
    /// Tags `0x00` to `0x0F`, contents defined by the manufacturer.
    ManufacturerSpecified { tag: u8, data: [u8; 13] },
    Dummy,
}

pub(crate) fn parse_descriptor(input: &[u8]) -> ParseResult<'_, EighteenByteDescriptor> {
    let (_, pixel_clock) = peek(le_u16)(input)?;
    if pixel_clock != 0 {
        let (remaining, dtd) = detailed_timing::parse_detailed_timing(input)?;
        return Ok((remaining, EighteenByteDescriptor::DetailedTiming(dtd)));
    }

    let mut remaining = input;

    let (_pixel_clock, reserved, tag, flags): (u16, u8, u8, u8);
    (remaining, _pixel_clock) = le_u16(remaining)?;
    (remaining, reserved) = le_u8(remaining)?;
    if reserved != 0 {
        return fail(EdidError::header(
            "display descriptor",
            format!("reserved byte 2 is 0x{reserved:02X}"),
        ));
    }
    (remaining, tag) = le_u8(remaining)?;
    (remaining, flags) = le_u8(remaining)?;

    let descriptor;
    (remaining, descriptor) = match tag {
        0xFC | 0xFE | 0xFF => {
            let (remaining, text) = ascii::parse_text(remaining)?;
            let kind = AsciiStringKind::try_from(tag)
                .map_err(|_| nom::Err::Failure(EdidError::UnknownDescriptorType(tag)))?;
            (
                remaining,
                EighteenByteDescriptor::AsciiString(AsciiString { kind, text }),
            )
        }
        TAG_RANGE_LIMITS => {
            let (remaining, limits) = range_limits::parse_range_limits(flags, remaining)?;
            (remaining, EighteenByteDescriptor::DisplayRangeLimits(limits))
        }
        TAG_ESTABLISHED_TIMINGS_3 => {
            let (remaining, et3) = established_timings3::parse_established_timings3(remaining)?;
            (remaining, EighteenByteDescriptor::EstablishedTimings3(et3))
        }
        TAG_STANDARD_TIMINGS => {
            let mut timings = [None; DESCRIPTOR_STANDARD_TIMINGS];
            let mut rest = remaining;
            for slot in timings.iter_mut() {
                (rest, *slot) = crate::standard_timing::parse_standard_timing(rest)?;
            }
            let _terminator;
            (rest, _terminator) = le_u8(rest)?;
            (rest, EighteenByteDescriptor::StandardTimings(timings))
        }
        TAG_COLOR_POINT => {
            let (remaining, points) = color_point::parse_color_point(remaining)?;
            (remaining, EighteenByteDescriptor::ColorPoint(points))
        }
        TAG_DUMMY => {
            let (remaining, _zeros) = array::<13>(remaining)?;
            (remaining, EighteenByteDescriptor::Dummy)
        }
        0x00..=0x0F => {
            let (remaining, data) = array(remaining)?;
            (
                remaining,
                EighteenByteDescriptor::ManufacturerSpecified { tag, data },
            )
        }
        _ => return fail(EdidError::UnknownDescriptorType(tag)),
    };

    Ok((remaining, descriptor))
}

/// Parses a base block descriptor slot, where a dummy descriptor means an empty slot.
pub(crate) fn parse_descriptor_slot(input: &[u8]) -> ParseResult<'_, Option<EighteenByteDescriptor>> {
    let (remaining, descriptor) = parse_descriptor(input)?;
    match descriptor {
        EighteenByteDescriptor::Dummy => {
            debug!("Empty descriptor slot");
            Ok((remaining, None))
        }
        descriptor => Ok((remaining, Some(descriptor))),
    }
}

fn display_descriptor(tag: u8, flags: u8, body: [u8; 13]) -> [u8; DESCRIPTOR_SIZE] {
    let mut out = [0u8; DESCRIPTOR_SIZE];
    out[3] = tag;
    out[4] = flags;
    out[5..].copy_from_slice(&body);
    out
}

impl EighteenByteDescriptor {
    /// Decodes exactly 18 bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != DESCRIPTOR_SIZE {
            return Err(EdidError::out_of_range("descriptor length", bytes.len() as i64));
        }
        let (_, descriptor) = parse_descriptor(bytes)?;
        Ok(descriptor)
    }

    pub fn encode(&self) -> Result<[u8; DESCRIPTOR_SIZE]> {
        let out = match self {
            EighteenByteDescriptor::DetailedTiming(dtd) => dtd.encode()?,
            EighteenByteDescriptor::DisplayRangeLimits(limits) => {
                let (flags, body) = limits.encode_body()?;
                display_descriptor(TAG_RANGE_LIMITS, flags, body)
            }
            EighteenByteDescriptor::AsciiString(string) => {
                display_descriptor(string.kind.into(), 0, ascii::encode_text(&string.text)?)
            }
            EighteenByteDescriptor::EstablishedTimings3(et3) => {
                display_descriptor(TAG_ESTABLISHED_TIMINGS_3, 0, et3.encode_body())
            }
            EighteenByteDescriptor::StandardTimings(timings) => {
                let mut body = [0u8; 13];
                for (chunk, timing) in body.chunks_exact_mut(2).zip(timings) {
                    chunk.copy_from_slice(&StandardTiming::encode(timing.as_ref())?);
                }
                body[12] = 0x0A;
                display_descriptor(TAG_STANDARD_TIMINGS, 0, body)
            }
            EighteenByteDescriptor::ColorPoint(points) => {
                display_descriptor(TAG_COLOR_POINT, 0, color_point::encode_color_point(points)?)
            }
            EighteenByteDescriptor::ManufacturerSpecified { tag, data } => {
                if *tag > 0x0F {
                    return Err(EdidError::out_of_range("manufacturer descriptor tag", *tag));
                }
                display_descriptor(*tag, 0, *data)
            }
            EighteenByteDescriptor::Dummy => display_descriptor(TAG_DUMMY, 0, [0; 13]),
        };
        Ok(out)
    }

    /// Encodes a base block slot, writing a dummy descriptor for an empty one.
    pub(crate) fn encode_slot(slot: Option<&Self>) -> Result<[u8; DESCRIPTOR_SIZE]> {
        slot.unwrap_or(&EighteenByteDescriptor::Dummy).encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standard_timing::AspectRatio;

    #[test]
    fn dummy_descriptor_is_an_empty_slot() {
        let bytes = EighteenByteDescriptor::encode_slot(None).unwrap();
        assert_eq!(&bytes[..5], &[0x00, 0x00, 0x00, 0x10, 0x00]);
        assert!(bytes[5..].iter().all(|b| *b == 0));

        assert_eq!(
            EighteenByteDescriptor::decode(&bytes).unwrap(),
            EighteenByteDescriptor::Dummy
        );
        let (_, slot) = parse_descriptor_slot(&bytes).unwrap();
        assert_eq!(slot, None);
    }

    #[test]
    fn unknown_display_descriptor_type_fails() {
        let mut bytes = [0u8; 18];
        for tag in [0x11, 0x80, 0xF6, 0xF8, 0xF9] {
            bytes[3] = tag;
            assert_eq!(
                EighteenByteDescriptor::decode(&bytes),
                Err(EdidError::UnknownDescriptorType(tag))
            );
        }
    }

    #[test]
    fn manufacturer_specified_round_trips() {
        let mut bytes = [0u8; 18];
        bytes[3] = 0x0E;
        bytes[5..].copy_from_slice(b"vendor secret");
        let descriptor = EighteenByteDescriptor::decode(&bytes).unwrap();
        assert_eq!(
            descriptor,
            EighteenByteDescriptor::ManufacturerSpecified {
                tag: 0x0E,
                data: *b"vendor secret"
            }
        );
        assert_eq!(descriptor.encode().unwrap(), bytes);
    }

    #[test]
    fn standard_timing_identifiers_round_trip() {
        let descriptor = EighteenByteDescriptor::StandardTimings([
            Some(StandardTiming {
                x_resolution: 1920,
                aspect_ratio: AspectRatio::Ratio16x9,
                v_frequency: 60,
            }),
            None,
            None,
            None,
            None,
            None,
        ]);
        let bytes = descriptor.encode().unwrap();
        assert_eq!(
            bytes,
            [
                0x00, 0x00, 0x00, 0xFA, 0x00, 0xD1, 0xC0, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01,
                0x01, 0x01, 0x01, 0x01, 0x0A
            ]
        );
        assert_eq!(EighteenByteDescriptor::decode(&bytes).unwrap(), descriptor);
    }

    #[test]
    fn zero_pixel_clock_is_never_a_timing() {
        let mut bytes = [0u8; 18];
        bytes[2] = 0x01;
        bytes[3] = 0xFC;
        assert!(matches!(
            EighteenByteDescriptor::decode(&bytes),
            Err(EdidError::MalformedHeader { .. })
        ));

        // A non zero low clock byte is enough for a timing.
        let mut bytes = [0u8; 18];
        bytes[0] = 0x01;
        assert!(matches!(
            EighteenByteDescriptor::decode(&bytes),
            Ok(EighteenByteDescriptor::DetailedTiming(_))
        ));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(EighteenByteDescriptor::decode(&[0u8; 17]).is_err());
    }
}
