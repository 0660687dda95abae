use crate::error::{EdidError, Result};

use super::data_block::{DataBlock, MAX_PAYLOAD_LEN, TAG_VIDEO};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Short video descriptors, kept as transmitted.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VideoDataBlock {
    pub vics: Vec<u8>,
}

/// Splits a short video descriptor into its VIC and native flag.
///
/// Values 129 to 192 carry VICs 1 to 64 with the native bit set.
pub fn svd_vic(svd: u8) -> (u8, bool) {
    match svd {
        129..=192 => (svd & 0x7F, true),
        _ => (svd, false),
    }
}

impl DataBlock for VideoDataBlock {
    const NAME: &'static str = "video data block";
    const TAG: u8 = TAG_VIDEO;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        Ok(VideoDataBlock {
            vics: payload.to_vec(),
        })
    }

    fn encode_payload(&self) -> Result<Vec<u8>> {
        if self.vics.len() > MAX_PAYLOAD_LEN {
            return Err(EdidError::length(Self::NAME, self.vics.len()));
        }
        Ok(self.vics.clone())
    }

    fn payload_size(&self) -> usize {
        self.vics.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_native_flag() {
        let block = VideoDataBlock::decode(&[0x44, 0x90, 0x04, 0x03, 0x61]).unwrap();
        assert_eq!(block.vics, vec![0x90, 0x04, 0x03, 0x61]);
        assert_eq!(svd_vic(block.vics[0]), (16, true));
        assert_eq!(svd_vic(block.vics[3]), (97, false));
        assert_eq!(svd_vic(200), (200, false));
        assert_eq!(block.size(), 5);
        assert_eq!(block.encode().unwrap(), [0x44, 0x90, 0x04, 0x03, 0x61]);
    }

    #[test]
    fn rejects_more_than_31_vics() {
        let block = VideoDataBlock {
            vics: (1..=32).collect(),
        };
        assert!(matches!(
            block.encode(),
            Err(EdidError::InvalidDataBlockLength { length: 32, .. })
        ));
    }
}
