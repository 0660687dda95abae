use std::collections::BTreeSet;

use crate::error::{EdidError, Result};

use super::data_block::{DataBlock, EXTENDED_TAG_YCBCR420_CAPABILITY_MAP, TAG_EXTENDED};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// SVDs that also support YCbCr 4:2:0 sampling.
///
/// Indices are 1-based positions in the video data block collection. An empty map is
/// transmitted without payload bytes, which receivers read as "every SVD".
#[derive(Debug, PartialEq, Eq, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct YCbCr420CapabilityMapDataBlock {
    pub svd_indices: BTreeSet<u8>,
}

impl DataBlock for YCbCr420CapabilityMapDataBlock {
    const NAME: &'static str = "YCbCr 4:2:0 capability map data block";
    const TAG: u8 = TAG_EXTENDED;
    const EXTENDED_TAG: Option<u8> = Some(EXTENDED_TAG_YCBCR420_CAPABILITY_MAP);

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let svd_indices = payload
            .iter()
            .enumerate()
            .flat_map(|(byte_index, byte)| {
                (0..8)
                    .filter(move |bit| byte & (1 << bit) != 0)
                    .map(move |bit| (byte_index * 8 + bit + 1) as u8)
            })
            .collect();
        Ok(YCbCr420CapabilityMapDataBlock { svd_indices })
    }

    fn encode_payload(&self) -> Result<Vec<u8>> {
        if self.svd_indices.contains(&0) {
            return Err(EdidError::out_of_range("svd_index", 0));
        }
        let mut out = vec![0u8; self.payload_size()];
        for index in &self.svd_indices {
            let position = usize::from(index - 1);
            out[position / 8] |= 1 << (position % 8);
        }
        Ok(out)
    }

    fn payload_size(&self) -> usize {
        self.svd_indices
            .last()
            .map_or(0, |highest| usize::from(*highest).div_ceil(8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_bitmap_lsb_first() {
        let block = YCbCr420CapabilityMapDataBlock {
            svd_indices: BTreeSet::from([1, 2, 8, 9]),
        };
        assert_eq!(block.size(), 4);
        let bytes = block.encode().unwrap();
        assert_eq!(bytes, [0xE3, 0x0F, 0x83, 0x01]);
        assert_eq!(YCbCr420CapabilityMapDataBlock::decode(&bytes).unwrap(), block);
    }

    #[test]
    fn empty_map_has_no_payload() {
        let block = YCbCr420CapabilityMapDataBlock::default();
        assert_eq!(block.encode().unwrap(), [0xE1, 0x0F]);
        assert_eq!(YCbCr420CapabilityMapDataBlock::decode(&[0xE1, 0x0F]).unwrap(), block);
    }

    #[test]
    fn index_zero_is_rejected() {
        let block = YCbCr420CapabilityMapDataBlock {
            svd_indices: BTreeSet::from([0, 3]),
        };
        assert!(block.encode().is_err());
    }
}
