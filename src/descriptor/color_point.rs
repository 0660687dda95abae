use nom::number::complete::le_u8;

use crate::{
    bits::{array, check_range},
    error::{ParseResult, Result},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An additional white point carried by a colour point descriptor (tag `0xFB`).
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WhitePoint {
    /// White point index, starting at 1.
    pub index: u8,
    /// 10 bit CIE x coordinate, in units of 1/1024.
    pub x: u16,
    /// 10 bit CIE y coordinate, in units of 1/1024.
    pub y: u16,
    pub gamma: Option<f64>,
}

pub(crate) fn parse_white_point(input: &[u8]) -> ParseResult<'_, Option<WhitePoint>> {
    let mut remaining = input;

    let (index, low_bits, x_hi, y_hi, gamma);
    (remaining, index) = le_u8(remaining)?;
    (remaining, low_bits) = le_u8(remaining)?;
    (remaining, x_hi) = le_u8(remaining)?;
    (remaining, y_hi) = le_u8(remaining)?;
    (remaining, gamma) = le_u8(remaining)?;

    if index == 0 {
        return Ok((remaining, None));
    }

    Ok((
        remaining,
        Some(WhitePoint {
            index,
            x: (u16::from(x_hi) << 2) | u16::from((low_bits >> 2) & 0b11),
            y: (u16::from(y_hi) << 2) | u16::from(low_bits & 0b11),
            gamma: crate::base_block::gamma_from_byte(gamma),
        }),
    ))
}

pub(crate) fn parse_color_point(input: &[u8]) -> ParseResult<'_, [Option<WhitePoint>; 2]> {
    let mut remaining = input;
    let (first, second);
    (remaining, first) = parse_white_point(remaining)?;
    (remaining, second) = parse_white_point(remaining)?;

    let _padding: [u8; 3];
    (remaining, _padding) = array(remaining)?;

    Ok((remaining, [first, second]))
}

fn encode_white_point(point: Option<&WhitePoint>) -> Result<[u8; 5]> {
    let Some(point) = point else {
        return Ok([0; 5]);
    };
    check_range("white point index", point.index, 1..=u8::MAX)?;
    check_range("white point x", point.x, 0..=0x3FF)?;
    check_range("white point y", point.y, 0..=0x3FF)?;
    Ok([
        point.index,
        (((point.x & 0b11) as u8) << 2) | (point.y & 0b11) as u8,
        (point.x >> 2) as u8,
        (point.y >> 2) as u8,
        crate::base_block::gamma_to_byte(point.gamma)?,
    ])
}

pub(crate) fn encode_color_point(points: &[Option<WhitePoint>; 2]) -> Result<[u8; 13]> {
    let mut body = [0u8; 13];
    body[..5].copy_from_slice(&encode_white_point(points[0].as_ref())?);
    body[5..10].copy_from_slice(&encode_white_point(points[1].as_ref())?);
    body[10..].copy_from_slice(&[0x0A, 0x20, 0x20]);
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::EighteenByteDescriptor;

    #[test]
    fn single_white_point_round_trips() {
        let descriptor = EighteenByteDescriptor::ColorPoint([
            Some(WhitePoint {
                index: 1,
                x: 0x141,
                y: 0x152,
                gamma: Some(2.2),
            }),
            None,
        ]);
        let bytes = descriptor.encode().unwrap();
        assert_eq!(
            bytes,
            [
                0x00, 0x00, 0x00, 0xFB, 0x00, 0x01, 0x06, 0x50, 0x54, 0x78, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x0A, 0x20, 0x20
            ]
        );
        assert_eq!(EighteenByteDescriptor::decode(&bytes).unwrap(), descriptor);
    }
}
