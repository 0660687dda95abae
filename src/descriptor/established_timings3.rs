use bitflags::bitflags;
use nom::number::complete::le_u8;

use crate::{bits::array, error::ParseResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// Byte 6 of the established timings III descriptor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct EstablishedTimings3Byte6: u8 {
        const H640V350F85 = 1 << 7;
        const H640V400F85 = 1 << 6;
        const H720V400F85 = 1 << 5;
        const H640V480F85 = 1 << 4;
        const H848V480F60 = 1 << 3;
        const H800V600F85 = 1 << 2;
        const H1024V768F85 = 1 << 1;
        const H1152V864F75 = 1 << 0;
    }
}

bitflags! {
    /// Byte 7 of the established timings III descriptor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct EstablishedTimings3Byte7: u8 {
        const H1280V768F60RB = 1 << 7;
        const H1280V768F60 = 1 << 6;
        const H1280V768F75 = 1 << 5;
        const H1280V768F85 = 1 << 4;
        const H1280V960F60 = 1 << 3;
        const H1280V960F85 = 1 << 2;
        const H1280V1024F60 = 1 << 1;
        const H1280V1024F85 = 1 << 0;
    }
}

bitflags! {
    /// Byte 8 of the established timings III descriptor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct EstablishedTimings3Byte8: u8 {
        const H1360V768F60 = 1 << 7;
        const H1440V900F60RB = 1 << 6;
        const H1440V900F60 = 1 << 5;
        const H1440V900F75 = 1 << 4;
        const H1440V900F85 = 1 << 3;
        const H1400V1050F60RB = 1 << 2;
        const H1400V1050F60 = 1 << 1;
        const H1400V1050F75 = 1 << 0;
    }
}

bitflags! {
    /// Byte 9 of the established timings III descriptor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct EstablishedTimings3Byte9: u8 {
        const H1400V1050F85 = 1 << 7;
        const H1680V1050F60RB = 1 << 6;
        const H1680V1050F60 = 1 << 5;
        const H1680V1050F75 = 1 << 4;
        const H1680V1050F85 = 1 << 3;
        const H1600V1200F60 = 1 << 2;
        const H1600V1200F65 = 1 << 1;
        const H1600V1200F70 = 1 << 0;
    }
}

bitflags! {
    /// Byte 10 of the established timings III descriptor.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct EstablishedTimings3Byte10: u8 {
        const H1600V1200F75 = 1 << 7;
        const H1600V1200F85 = 1 << 6;
        const H1792V1344F60 = 1 << 5;
        const H1792V1344F75 = 1 << 4;
        const H1856V1392F60 = 1 << 3;
        const H1856V1392F75 = 1 << 2;
        const H1920V1200F60RB = 1 << 1;
        const H1920V1200F60 = 1 << 0;
    }
}

bitflags! {
    /// Byte 11 of the established timings III descriptor. Bits 3 to 0 are reserved.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct EstablishedTimings3Byte11: u8 {
        const H1920V1200F75 = 1 << 7;
        const H1920V1200F85 = 1 << 6;
        const H1920V1440F60 = 1 << 5;
        const H1920V1440F75 = 1 << 4;
    }
}

/// Established timings III (tag `0xF7`), one independent flag set per byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EstablishedTimings3 {
    pub byte_6: EstablishedTimings3Byte6,
    pub byte_7: EstablishedTimings3Byte7,
    pub byte_8: EstablishedTimings3Byte8,
    pub byte_9: EstablishedTimings3Byte9,
    pub byte_10: EstablishedTimings3Byte10,
    pub byte_11: EstablishedTimings3Byte11,
}

const REVISION: u8 = 0x0A;

pub(crate) fn parse_established_timings3(input: &[u8]) -> ParseResult<'_, EstablishedTimings3> {
    let mut remaining = input;

    let (_revision, flags);
    (remaining, _revision) = le_u8(remaining)?;
    (remaining, flags) = array::<6>(remaining)?;

    let _reserved: [u8; 6];
    (remaining, _reserved) = array(remaining)?;

    Ok((
        remaining,
        EstablishedTimings3 {
            byte_6: EstablishedTimings3Byte6::from_bits_retain(flags[0]),
            byte_7: EstablishedTimings3Byte7::from_bits_retain(flags[1]),
            byte_8: EstablishedTimings3Byte8::from_bits_retain(flags[2]),
            byte_9: EstablishedTimings3Byte9::from_bits_retain(flags[3]),
            byte_10: EstablishedTimings3Byte10::from_bits_retain(flags[4]),
            byte_11: EstablishedTimings3Byte11::from_bits_retain(flags[5]),
        },
    ))
}

impl EstablishedTimings3 {
    pub(crate) fn encode_body(&self) -> [u8; 13] {
        let mut body = [0u8; 13];
        body[..7].copy_from_slice(&[
            REVISION,
            self.byte_6.bits(),
            self.byte_7.bits(),
            self.byte_8.bits(),
            self.byte_9.bits(),
            self.byte_10.bits(),
            self.byte_11.bits(),
        ]);
        body
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
