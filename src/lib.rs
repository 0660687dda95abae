//! Bidirectional codec for EDID base blocks and CTA-861 extension blocks.
//!
//! [`EdidData::decode`] turns raw EDID bytes into a typed tree and [`EdidData::encode`]
//! turns it back into bytes that decode to the same tree. The [`timing`] module maps
//! every timing advertised by the tree onto a [`VideoTimingMode`] and can prune modes
//! while keeping cross references between data blocks consistent.
//!
//! ```no_run
//! use edid_codec::{EdidData, TimingModes};
//!
//! # fn main() -> edid_codec::Result<()> {
//! let bytes = std::fs::read("/sys/class/drm/card0-HDMI-A-1/edid").unwrap_or_default();
//! let mut edid = EdidData::decode(&bytes)?;
//! edid.remove_mode_if(|mode| mode.h_res > 1920, false);
//! let patched = edid.encode()?;
//! # let _ = patched;
//! # Ok(())
//! # }
//! ```

pub mod base_block;
pub mod bits;
pub mod cta;
pub mod descriptor;
pub mod edid;
pub mod error;
pub mod established_timings;
pub mod standard_timing;
pub mod timing;

pub use base_block::BaseBlock;
pub use cta::{Cta861Block, CtaDataBlock};
pub use descriptor::{DetailedTimingDescriptor, EighteenByteDescriptor};
pub use edid::{decode, encode, EdidData};
pub use error::{EdidError, Result};
pub use standard_timing::StandardTiming;
pub use timing::{Rational, TimingModes, VideoTimingMode};
