use bitflags::bitflags;

use crate::error::{EdidError, Result};

use super::data_block::{DataBlock, TAG_SPEAKER_ALLOCATION};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// Speaker presence, payload byte 1 in the low half and byte 2 in the high half.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct SpeakerAllocation: u16 {
        const FRONT_LEFT_RIGHT = 1 << 0;
        const LFE1 = 1 << 1;
        const FRONT_CENTER = 1 << 2;
        const BACK_LEFT_RIGHT = 1 << 3;
        const BACK_CENTER = 1 << 4;
        const FRONT_LEFT_RIGHT_CENTER = 1 << 5;
        const REAR_LEFT_RIGHT_CENTER = 1 << 6;
        const FRONT_LEFT_RIGHT_WIDE = 1 << 7;
        const TOP_FRONT_LEFT_RIGHT = 1 << 8;
        const TOP_CENTER = 1 << 9;
        const TOP_FRONT_CENTER = 1 << 10;
        const LEFT_RIGHT_SURROUND = 1 << 11;
        const LFE2 = 1 << 12;
        const TOP_BACK_CENTER = 1 << 13;
        const SIDE_LEFT_RIGHT = 1 << 14;
        const TOP_SIDE_LEFT_RIGHT = 1 << 15;
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpeakerAllocationDataBlock {
    pub speakers: SpeakerAllocation,
}

const PAYLOAD_LEN: usize = 3;

impl DataBlock for SpeakerAllocationDataBlock {
    const NAME: &'static str = "speaker allocation data block";
    const TAG: u8 = TAG_SPEAKER_ALLOCATION;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        if payload.len() != PAYLOAD_LEN {
            return Err(EdidError::length(Self::NAME, payload.len()));
        }
        Ok(SpeakerAllocationDataBlock {
            speakers: SpeakerAllocation::from_bits_retain(u16::from_le_bytes([
                payload[0], payload[1],
            ])),
        })
    }

    fn encode_payload(&self) -> Result<Vec<u8>> {
        let [lo, hi] = self.speakers.bits().to_le_bytes();
        Ok(vec![lo, hi, 0x00])
    }

    fn payload_size(&self) -> usize {
        PAYLOAD_LEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_surround_layout() {
        let bytes = [0x83, 0x4F, 0x01, 0x00];
        let block = SpeakerAllocationDataBlock::decode(&bytes).unwrap();
        assert_eq!(
            block.speakers,
            SpeakerAllocation::FRONT_LEFT_RIGHT
                | SpeakerAllocation::LFE1
                | SpeakerAllocation::FRONT_CENTER
                | SpeakerAllocation::BACK_LEFT_RIGHT
                | SpeakerAllocation::REAR_LEFT_RIGHT_CENTER
                | SpeakerAllocation::TOP_FRONT_LEFT_RIGHT
        );
        assert_eq!(block.encode().unwrap(), bytes);
    }

    #[test]
    fn payload_must_be_three_bytes() {
        for bytes in [&[0x82, 0x01, 0x00][..], &[0x84, 0x01, 0x00, 0x00, 0x00]] {
            assert!(matches!(
                SpeakerAllocationDataBlock::decode(bytes),
                Err(EdidError::InvalidDataBlockLength { .. })
            ));
        }
    }
}
