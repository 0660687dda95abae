use log::debug;

use crate::{
    base_block::BaseBlock,
    bits::BLOCK_SIZE,
    cta::Cta861Block,
    error::{EdidError, Result},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A complete EDID: the base block followed by its CTA-861 extensions.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdidData {
    pub base_block: BaseBlock,
    pub extension_blocks: Vec<Cta861Block>,
}

impl EdidData {
    /// Decodes a base block and as many extension blocks as it announces.
    ///
    /// The input must be exactly `128 * (1 + extension count)` bytes long.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() || bytes.len() % BLOCK_SIZE != 0 {
            return Err(EdidError::TotalSizeNotBlockMultiple(bytes.len()));
        }
        let (base, extensions) = bytes.split_at(BLOCK_SIZE);
        let (base_block, extension_count) = BaseBlock::decode(base)?;

        let blocks = extensions.chunks_exact(BLOCK_SIZE);
        if blocks.len() != usize::from(extension_count) {
            return Err(EdidError::TotalSizeNotBlockMultiple(bytes.len()));
        }
        let extension_blocks = blocks
            .map(Cta861Block::decode)
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Decoded EDID {} with {} extension block(s)",
            base_block.manufacturer_id,
            extension_blocks.len()
        );
        Ok(EdidData {
            base_block,
            extension_blocks,
        })
    }

    /// Encodes every block, deriving the base block's extension count.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let count = self.extension_blocks.len();
        let extension_count = u8::try_from(count).map_err(|_| {
            EdidError::out_of_range("extension count", i64::try_from(count).unwrap_or(i64::MAX))
        })?;

        let mut out = Vec::with_capacity(BLOCK_SIZE * (1 + count));
        out.extend_from_slice(&self.base_block.encode(extension_count)?);
        for block in &self.extension_blocks {
            out.extend_from_slice(&block.encode()?);
        }
        Ok(out)
    }
}

/// Shorthand for [`EdidData::decode`].
pub fn decode(bytes: &[u8]) -> Result<EdidData> {
    EdidData::decode(bytes)
}

/// Shorthand for [`EdidData::encode`].
pub fn encode(edid: &EdidData) -> Result<Vec<u8>> {
    edid.encode()
}
