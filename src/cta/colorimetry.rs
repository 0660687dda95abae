use bitflags::bitflags;

use crate::error::{EdidError, Result};

use super::data_block::{DataBlock, EXTENDED_TAG_COLORIMETRY, TAG_EXTENDED};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// Supported colorimetry standards: payload byte 1, then the high nibble of byte 2.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct ColorimetryStandards: u16 {
        const XV_YCC_601 = 1 << 0;
        const XV_YCC_709 = 1 << 1;
        const S_YCC_601 = 1 << 2;
        const OP_YCC_601 = 1 << 3;
        const OP_RGB = 1 << 4;
        const BT2020_C_YCC = 1 << 5;
        const BT2020_YCC = 1 << 6;
        const BT2020_RGB = 1 << 7;
        const DEFAULT_RGB = 1 << 8;
        const ST2113_RGB = 1 << 9;
        const ICTCP = 1 << 10;
        const DCI_P3 = 1 << 11;
    }
}

bitflags! {
    /// Gamut metadata profiles, low nibble of payload byte 2.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct GamutMetadataProfiles: u8 {
        const MD0 = 1 << 0;
        const MD1 = 1 << 1;
        const MD2 = 1 << 2;
        const MD3 = 1 << 3;
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColorimetryDataBlock {
    pub standards: ColorimetryStandards,
    pub profiles: GamutMetadataProfiles,
}

/// Payload after the extended tag; longer payloads are kept as unknown blocks.
pub(crate) const PAYLOAD_LEN: usize = 2;

impl DataBlock for ColorimetryDataBlock {
    const NAME: &'static str = "colorimetry data block";
    const TAG: u8 = TAG_EXTENDED;
    const EXTENDED_TAG: Option<u8> = Some(EXTENDED_TAG_COLORIMETRY);

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let &[standards, extra] = payload else {
            return Err(EdidError::length(Self::NAME, payload.len() + 1));
        };
        Ok(ColorimetryDataBlock {
            standards: ColorimetryStandards::from_bits_retain(
                u16::from(standards) | (u16::from(extra >> 4) << 8),
            ),
            profiles: GamutMetadataProfiles::from_bits_retain(extra & 0xF),
        })
    }

    fn encode_payload(&self) -> Result<Vec<u8>> {
        let standards = self.standards.bits();
        if standards > 0x0FFF {
            return Err(EdidError::out_of_range("colorimetry standards", standards));
        }
        let profiles = self.profiles.bits();
        if profiles > 0x0F {
            return Err(EdidError::out_of_range("gamut metadata profiles", profiles));
        }
        Ok(vec![
            (standards & 0xFF) as u8,
            (((standards >> 8) as u8) << 4) | profiles,
        ])
    }

    fn payload_size(&self) -> usize {
        PAYLOAD_LEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_split_standards_field() {
        let block = ColorimetryDataBlock {
            standards: ColorimetryStandards::OP_RGB
                | ColorimetryStandards::BT2020_RGB
                | ColorimetryStandards::ICTCP
                | ColorimetryStandards::DEFAULT_RGB,
            profiles: GamutMetadataProfiles::MD0,
        };
        let bytes = block.encode().unwrap();
        assert_eq!(bytes, [0xE3, 0x05, 0x90, 0x51]);
        assert_eq!(ColorimetryDataBlock::decode(&bytes).unwrap(), block);
    }

    #[test]
    fn rejects_short_payload() {
        assert!(matches!(
            ColorimetryDataBlock::decode(&[0xE2, 0x05, 0x90]),
            Err(EdidError::InvalidDataBlockLength { length: 2, .. })
        ));
    }
}
