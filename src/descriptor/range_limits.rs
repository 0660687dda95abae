use nom::number::complete::{le_u16, le_u8};

use crate::{
    bits::{array, check_range},
    error::{fail, EdidError, ParseResult, Result},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Display range limits descriptor (tag `0xFD`).
///
/// Rates above 255 are carried with an offset of 255 flagged in byte 4.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayRangeLimits {
    pub min_v_rate_hz: u16,
    pub max_v_rate_hz: u16,
    pub min_h_rate_khz: u16,
    pub max_h_rate_khz: u16,
    pub max_pixel_clock_mhz: u16,
    pub video_timing_support: VideoTimingSupport,
}

/// Byte 10 of the range limits descriptor and the bytes it governs.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VideoTimingSupport {
    DefaultGtf,
    BareLimits,
    SecondaryGtf(SecondaryGtf),
    /// CVT support definition, bytes 11 to 17 kept as transmitted.
    Cvt([u8; 7]),
}

/// Secondary GTF curve parameters, in their wire units.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SecondaryGtf {
    /// Start break frequency in kHz, even.
    pub start_break_frequency_khz: u16,
    pub c_times_two: u8,
    pub m: u16,
    pub k: u8,
    pub j_times_two: u8,
}

const PADDING: [u8; 7] = [0x0A, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20];

const DEFAULT_GTF: u8 = 0x00;
const BARE_LIMITS: u8 = 0x01;
const SECONDARY_GTF: u8 = 0x02;
const CVT: u8 = 0x04;

/// Offsets added to the (min, max) pair for one two bit flag field.
fn rate_offsets(flags: u8) -> (u16, u16) {
    match flags & 0b11 {
        0b10 => (0, 255),
        0b11 => (255, 255),
        _ => (0, 0),
    }
}

/// Splits a (min, max) rate pair into its flag field and transmitted bytes.
fn encode_rates(
    fields: (&'static str, &'static str),
    min: u16,
    max: u16,
) -> Result<(u8, u8, u8)> {
    check_range(fields.0, min, 1..=510)?;
    check_range(fields.1, max, 1..=510)?;
    match (min > 255, max > 255) {
        (false, false) => Ok((0b00, min as u8, max as u8)),
        (false, true) => Ok((0b10, min as u8, (max - 255) as u8)),
        (true, true) => Ok((0b11, (min - 255) as u8, (max - 255) as u8)),
        (true, false) => Err(EdidError::out_of_range(fields.0, min)),
    }
}

/// Parses the 13 bytes following the descriptor header. `flags` is header byte 4.
pub(crate) fn parse_range_limits(flags: u8, input: &[u8]) -> ParseResult<'_, DisplayRangeLimits> {
    let mut remaining = input;

    let (min_v_offset, max_v_offset) = rate_offsets(flags);
    let (min_h_offset, max_h_offset) = rate_offsets(flags >> 2);

    let (min_v, max_v, min_h, max_h, pixel_clock, support);
    (remaining, min_v) = le_u8(remaining)?;
    (remaining, max_v) = le_u8(remaining)?;
    (remaining, min_h) = le_u8(remaining)?;
    (remaining, max_h) = le_u8(remaining)?;
    (remaining, pixel_clock) = le_u8(remaining)?;
    (remaining, support) = le_u8(remaining)?;

    let video_timing_support = match support {
        DEFAULT_GTF | BARE_LIMITS => {
            let _padding: [u8; 7];
            (remaining, _padding) = array(remaining)?;
            if support == DEFAULT_GTF {
                VideoTimingSupport::DefaultGtf
            } else {
                VideoTimingSupport::BareLimits
            }
        }
        SECONDARY_GTF => {
            let (_reserved, start, c_times_two, m, k, j_times_two);
            (remaining, _reserved) = le_u8(remaining)?;
            (remaining, start) = le_u8(remaining)?;
            (remaining, c_times_two) = le_u8(remaining)?;
            (remaining, m) = le_u16(remaining)?;
            (remaining, k) = le_u8(remaining)?;
            (remaining, j_times_two) = le_u8(remaining)?;
            VideoTimingSupport::SecondaryGtf(SecondaryGtf {
                start_break_frequency_khz: u16::from(start) * 2,
                c_times_two,
                m,
                k,
                j_times_two,
            })
        }
        CVT => {
            let cvt;
            (remaining, cvt) = array(remaining)?;
            VideoTimingSupport::Cvt(cvt)
        }
        other => return fail(EdidError::out_of_range("video_timing_support", other)),
    };

    Ok((
        remaining,
        DisplayRangeLimits {
            min_v_rate_hz: u16::from(min_v) + min_v_offset,
            max_v_rate_hz: u16::from(max_v) + max_v_offset,
            min_h_rate_khz: u16::from(min_h) + min_h_offset,
            max_h_rate_khz: u16::from(max_h) + max_h_offset,
            max_pixel_clock_mhz: u16::from(pixel_clock) * 10,
            video_timing_support,
        },
    ))
}

impl DisplayRangeLimits {
    /// Returns header byte 4 and the 13 body bytes.
    pub(crate) fn encode_body(&self) -> Result<(u8, [u8; 13])> {
        let (v_flags, min_v, max_v) = encode_rates(
            ("min_v_rate_hz", "max_v_rate_hz"),
            self.min_v_rate_hz,
            self.max_v_rate_hz,
        )?;
        let (h_flags, min_h, max_h) = encode_rates(
            ("min_h_rate_khz", "max_h_rate_khz"),
            self.min_h_rate_khz,
            self.max_h_rate_khz,
        )?;
        check_range("max_pixel_clock_mhz", self.max_pixel_clock_mhz, 10..=2550)?;
        if self.max_pixel_clock_mhz % 10 != 0 {
            return Err(EdidError::out_of_range(
                "max_pixel_clock_mhz",
                self.max_pixel_clock_mhz,
            ));
        }

        let mut body = [0u8; 13];
        body[..5].copy_from_slice(&[
            min_v,
            max_v,
            min_h,
            max_h,
            (self.max_pixel_clock_mhz / 10) as u8,
        ]);
        match &self.video_timing_support {
            VideoTimingSupport::DefaultGtf => {
                body[5] = DEFAULT_GTF;
                body[6..].copy_from_slice(&PADDING);
            }
            VideoTimingSupport::BareLimits => {
                body[5] = BARE_LIMITS;
                body[6..].copy_from_slice(&PADDING);
            }
            VideoTimingSupport::SecondaryGtf(gtf) => {
                if gtf.start_break_frequency_khz % 2 != 0 {
                    return Err(EdidError::out_of_range(
                        "start_break_frequency_khz",
                        gtf.start_break_frequency_khz,
                    ));
                }
                check_range(
                    "start_break_frequency_khz",
                    gtf.start_break_frequency_khz,
                    0..=510,
                )?;
                let m = gtf.m.to_le_bytes();
                body[5] = SECONDARY_GTF;
                body[6..].copy_from_slice(&[
                    0x00,
                    (gtf.start_break_frequency_khz / 2) as u8,
                    gtf.c_times_two,
                    m[0],
                    m[1],
                    gtf.k,
                    gtf.j_times_two,
                ]);
            }
            VideoTimingSupport::Cvt(cvt) => {
                body[5] = CVT;
                body[6..].copy_from_slice(cvt);
            }
        }

        Ok(((h_flags << 2) | v_flags, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::EighteenByteDescriptor;

    fn limits(
        v: (u16, u16),
        h: (u16, u16),
        clock: u16,
        support: VideoTimingSupport,
    ) -> EighteenByteDescriptor {
        EighteenByteDescriptor::DisplayRangeLimits(DisplayRangeLimits {
            min_v_rate_hz: v.0,
            max_v_rate_hz: v.1,
            min_h_rate_khz: h.0,
            max_h_rate_khz: h.1,
            max_pixel_clock_mhz: clock,
            video_timing_support: support,
        })
    }

    #[test]
    fn encodes_bare_limits() {
        let descriptor = limits((56, 75), (30, 83), 170, VideoTimingSupport::BareLimits);
        let bytes = descriptor.encode().unwrap();
        assert_eq!(
            bytes,
            [
                0x00, 0x00, 0x00, 0xFD, 0x00, 0x38, 0x4B, 0x1E, 0x53, 0x11, 0x01, 0x0A, 0x20,
                0x20, 0x20, 0x20, 0x20, 0x20
            ]
        );
        assert_eq!(EighteenByteDescriptor::decode(&bytes).unwrap(), descriptor);
    }

    #[test]
    fn decodes_default_gtf_limits() {
        let bytes = [
            0x00, 0x00, 0x00, 0xFD, 0x00, 0x18, 0x4B, 0x0F, 0x8C, 0x32, 0x00, 0x0A, 0x20, 0x20,
            0x20, 0x20, 0x20, 0x20,
        ];
        let expected = limits((24, 75), (15, 140), 500, VideoTimingSupport::DefaultGtf);
        assert_eq!(EighteenByteDescriptor::decode(&bytes).unwrap(), expected);
        assert_eq!(expected.encode().unwrap(), bytes);
    }

    #[test]
    fn offset_flags_follow_two_bit_patterns() {
        // Max vertical rate above 255 only.
        let descriptor = limits((48, 360), (30, 83), 600, VideoTimingSupport::BareLimits);
        let bytes = descriptor.encode().unwrap();
        assert_eq!(bytes[4], 0b0000_0010);
        assert_eq!(bytes[5], 48);
        assert_eq!(bytes[6], 105);
        assert_eq!(EighteenByteDescriptor::decode(&bytes).unwrap(), descriptor);

        // Both horizontal rates above 255.
        let descriptor = limits((48, 144), (300, 510), 600, VideoTimingSupport::BareLimits);
        let bytes = descriptor.encode().unwrap();
        assert_eq!(bytes[4], 0b0000_1100);
        assert_eq!(bytes[7], 45);
        assert_eq!(bytes[8], 255);
        assert_eq!(EighteenByteDescriptor::decode(&bytes).unwrap(), descriptor);

        // The reserved 0b01 pattern adds nothing.
        let mut raw = bytes;
        raw[4] = 0b0000_0101;
        match EighteenByteDescriptor::decode(&raw).unwrap() {
            EighteenByteDescriptor::DisplayRangeLimits(decoded) => {
                assert_eq!(decoded.min_v_rate_hz, 48);
                assert_eq!(decoded.max_v_rate_hz, 144);
                assert_eq!(decoded.min_h_rate_khz, 45);
                assert_eq!(decoded.max_h_rate_khz, 255);
            }
            other => panic!("unexpected descriptor {other:?}"),
        }
    }

    #[test]
    fn secondary_gtf_round_trips() {
        let descriptor = limits(
            (50, 75),
            (30, 80),
            150,
            VideoTimingSupport::SecondaryGtf(SecondaryGtf {
                start_break_frequency_khz: 120,
                c_times_two: 80,
                m: 600,
                k: 128,
                j_times_two: 40,
            }),
        );
        let bytes = descriptor.encode().unwrap();
        assert_eq!(&bytes[10..], &[0x02, 0x00, 60, 80, 0x58, 0x02, 128, 40]);
        assert_eq!(EighteenByteDescriptor::decode(&bytes).unwrap(), descriptor);
    }

    #[test]
    fn rejects_out_of_range_rates() {
        let descriptor = limits((0, 75), (30, 83), 170, VideoTimingSupport::BareLimits);
        assert!(matches!(
            descriptor.encode(),
            Err(EdidError::ValueOutOfRange {
                field: "min_v_rate_hz",
                ..
            })
        ));

        let descriptor = limits((300, 200), (30, 83), 170, VideoTimingSupport::BareLimits);
        assert!(descriptor.encode().is_err());

        let descriptor = limits((56, 75), (30, 83), 2560, VideoTimingSupport::BareLimits);
        assert!(descriptor.encode().is_err());

        let descriptor = limits((56, 75), (30, 83), 175, VideoTimingSupport::BareLimits);
        assert!(descriptor.encode().is_err());
    }
}
