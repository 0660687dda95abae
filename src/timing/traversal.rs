//! Visiting and pruning every timing an EDID tree advertises.
//!
//! Modes are produced in wire order: established timings, standard timings and descriptors
//! of the base block, then the data blocks and trailing DTDs of each extension block.
//! Entries that do not resolve to a catalog mode are skipped by the visitor and only removed
//! when asked to.

use bitflags::Flags;

use crate::{
    base_block::BaseBlock,
    cta::{Cta861Block, CtaDataBlock, ThreeDMulti},
    descriptor::{EighteenByteDescriptor, EstablishedTimings3},
    edid::EdidData,
    standard_timing::StandardTiming,
};

use super::{
    get_cta861_video_timing_mode, hdmi_vic_to_vic,
    tables::{
        standard_timing_mode, ESTABLISHED_TIMINGS_1, ESTABLISHED_TIMINGS_2,
        ESTABLISHED_TIMINGS_3_BYTE_10, ESTABLISHED_TIMINGS_3_BYTE_11, ESTABLISHED_TIMINGS_3_BYTE_6,
        ESTABLISHED_TIMINGS_3_BYTE_7, ESTABLISHED_TIMINGS_3_BYTE_8, ESTABLISHED_TIMINGS_3_BYTE_9,
        MANUFACTURER_TIMINGS,
    },
    VideoTimingMode,
};

pub trait TimingModes {
    /// Calls `visit` once for every resolvable timing, in wire order.
    fn for_each_mode<F>(&self, visit: F)
    where
        F: FnMut(&VideoTimingMode);

    /// Erases every timing whose mode matches `predicate`. With `remove_unknown`, entries
    /// without a catalog mode are erased as well.
    fn remove_mode_if<P>(&mut self, predicate: P, remove_unknown: bool)
    where
        P: FnMut(&VideoTimingMode) -> bool;

    fn modes(&self) -> Vec<VideoTimingMode> {
        let mut modes = Vec::new();
        self.for_each_mode(|mode| modes.push(*mode));
        modes
    }
}

fn keep<P>(mode: Option<VideoTimingMode>, predicate: &mut P, remove_unknown: bool) -> bool
where
    P: FnMut(&VideoTimingMode) -> bool,
{
    match mode {
        Some(mode) => !predicate(&mode),
        None => !remove_unknown,
    }
}

fn svd_mode(svd: u8) -> Option<VideoTimingMode> {
    get_cta861_video_timing_mode(svd).ok()
}

fn hdmi_vic_mode(hdmi_vic: u8) -> Option<VideoTimingMode> {
    hdmi_vic_to_vic(hdmi_vic).and_then(svd_mode)
}

fn visit_flags<T, F>(flags: T, table: &[(T, VideoTimingMode)], visit: &mut F)
where
    T: Flags + Copy,
    F: FnMut(&VideoTimingMode),
{
    for (flag, mode) in table {
        if flags.contains(*flag) {
            visit(mode);
        }
    }
}

fn remove_flags<T, P>(flags: &mut T, table: &[(T, VideoTimingMode)], predicate: &mut P, remove_unknown: bool)
where
    T: Flags + Copy,
    P: FnMut(&VideoTimingMode) -> bool,
{
    let mut known = T::empty();
    for (flag, mode) in table {
        if flags.contains(*flag) && predicate(mode) {
            flags.remove(*flag);
        }
        if flags.contains(*flag) {
            known.insert(*flag);
        }
    }
    // Bits outside the table have no mode.
    if remove_unknown {
        *flags = known;
    }
}

fn visit_standard_timings<F>(slots: &[Option<StandardTiming>], visit: &mut F)
where
    F: FnMut(&VideoTimingMode),
{
    for mode in slots.iter().flatten().filter_map(standard_timing_mode) {
        visit(&mode);
    }
}

fn remove_standard_timings<P>(slots: &mut [Option<StandardTiming>], predicate: &mut P, remove_unknown: bool)
where
    P: FnMut(&VideoTimingMode) -> bool,
{
    for slot in slots {
        let remove = slot
            .as_ref()
            .is_some_and(|timing| !keep(standard_timing_mode(timing), predicate, remove_unknown));
        if remove {
            *slot = None;
        }
    }
}

fn visit_established_timings3<F>(timings: &EstablishedTimings3, visit: &mut F)
where
    F: FnMut(&VideoTimingMode),
{
    visit_flags(timings.byte_6, &ESTABLISHED_TIMINGS_3_BYTE_6, visit);
    visit_flags(timings.byte_7, &ESTABLISHED_TIMINGS_3_BYTE_7, visit);
    visit_flags(timings.byte_8, &ESTABLISHED_TIMINGS_3_BYTE_8, visit);
    visit_flags(timings.byte_9, &ESTABLISHED_TIMINGS_3_BYTE_9, visit);
    visit_flags(timings.byte_10, &ESTABLISHED_TIMINGS_3_BYTE_10, visit);
    visit_flags(timings.byte_11, &ESTABLISHED_TIMINGS_3_BYTE_11, visit);
}

fn remove_established_timings3<P>(timings: &mut EstablishedTimings3, predicate: &mut P, remove_unknown: bool)
where
    P: FnMut(&VideoTimingMode) -> bool,
{
    remove_flags(&mut timings.byte_6, &ESTABLISHED_TIMINGS_3_BYTE_6, predicate, remove_unknown);
    remove_flags(&mut timings.byte_7, &ESTABLISHED_TIMINGS_3_BYTE_7, predicate, remove_unknown);
    remove_flags(&mut timings.byte_8, &ESTABLISHED_TIMINGS_3_BYTE_8, predicate, remove_unknown);
    remove_flags(&mut timings.byte_9, &ESTABLISHED_TIMINGS_3_BYTE_9, predicate, remove_unknown);
    remove_flags(&mut timings.byte_10, &ESTABLISHED_TIMINGS_3_BYTE_10, predicate, remove_unknown);
    remove_flags(&mut timings.byte_11, &ESTABLISHED_TIMINGS_3_BYTE_11, predicate, remove_unknown);
}

fn visit_descriptor<F>(descriptor: &EighteenByteDescriptor, visit: &mut F)
where
    F: FnMut(&VideoTimingMode),
{
    match descriptor {
        EighteenByteDescriptor::DetailedTiming(dtd) => {
            if let Some(mode) = VideoTimingMode::from_detailed_timing(dtd) {
                visit(&mode);
            }
        }
        EighteenByteDescriptor::EstablishedTimings3(timings) => {
            visit_established_timings3(timings, visit)
        }
        EighteenByteDescriptor::StandardTimings(slots) => visit_standard_timings(slots, visit),
        _ => {}
    }
}

/// A detailed timing is replaced by an empty slot; display descriptors lose single entries.
fn remove_from_descriptor<P>(slot: &mut Option<EighteenByteDescriptor>, predicate: &mut P, remove_unknown: bool)
where
    P: FnMut(&VideoTimingMode) -> bool,
{
    let remove = match slot {
        Some(EighteenByteDescriptor::DetailedTiming(dtd)) => !keep(
            VideoTimingMode::from_detailed_timing(dtd),
            predicate,
            remove_unknown,
        ),
        Some(EighteenByteDescriptor::EstablishedTimings3(timings)) => {
            remove_established_timings3(timings, predicate, remove_unknown);
            false
        }
        Some(EighteenByteDescriptor::StandardTimings(slots)) => {
            remove_standard_timings(slots, predicate, remove_unknown);
            false
        }
        _ => false,
    };
    if remove {
        *slot = None;
    }
}

impl TimingModes for BaseBlock {
    fn for_each_mode<F>(&self, mut visit: F)
    where
        F: FnMut(&VideoTimingMode),
    {
        visit_flags(self.established_timings_1, &ESTABLISHED_TIMINGS_1, &mut visit);
        visit_flags(self.established_timings_2, &ESTABLISHED_TIMINGS_2, &mut visit);
        visit_flags(self.manufacturer_timings, &MANUFACTURER_TIMINGS, &mut visit);
        visit_standard_timings(&self.standard_timings, &mut visit);
        for descriptor in self.descriptors.iter().flatten() {
            visit_descriptor(descriptor, &mut visit);
        }
    }

    fn remove_mode_if<P>(&mut self, mut predicate: P, remove_unknown: bool)
    where
        P: FnMut(&VideoTimingMode) -> bool,
    {
        remove_flags(
            &mut self.established_timings_1,
            &ESTABLISHED_TIMINGS_1,
            &mut predicate,
            remove_unknown,
        );
        remove_flags(
            &mut self.established_timings_2,
            &ESTABLISHED_TIMINGS_2,
            &mut predicate,
            remove_unknown,
        );
        remove_flags(
            &mut self.manufacturer_timings,
            &MANUFACTURER_TIMINGS,
            &mut predicate,
            remove_unknown,
        );
        remove_standard_timings(&mut self.standard_timings, &mut predicate, remove_unknown);
        for slot in &mut self.descriptors {
            remove_from_descriptor(slot, &mut predicate, remove_unknown);
        }
    }
}

/// Rewrites SVD index references once the SVDs at the 0-based positions in `removed`
/// (ascending) have been erased. References to erased SVDs are dropped.
fn reindex_svd_references(blocks: &mut [CtaDataBlock], removed: &[usize]) {
    let remap = |index: usize| match removed.binary_search(&index) {
        Ok(_) => None,
        Err(erased_before) => Some(index - erased_before),
    };

    for block in blocks {
        match block {
            CtaDataBlock::YCbCr420CapabilityMap(map) => {
                map.svd_indices = map
                    .svd_indices
                    .iter()
                    .filter_map(|&index| match usize::from(index).checked_sub(1) {
                        Some(position) => remap(position).map(|position| (position + 1) as u8),
                        None => Some(index),
                    })
                    .collect();
            }
            CtaDataBlock::HdmiVendor(hdmi) => {
                let Some(video) = &mut hdmi.video else {
                    continue;
                };
                video
                    .three_d_entries
                    .retain_mut(|entry| match remap(usize::from(entry.svd_index)) {
                        Some(position) => {
                            entry.svd_index = position as u8;
                            true
                        }
                        None => false,
                    });
                if let Some(ThreeDMulti::Masked { mask, .. }) = &mut video.three_d_multi {
                    let old = *mask;
                    *mask = (0..16)
                        .filter(|bit| old & (1 << bit) != 0)
                        .filter_map(remap)
                        .fold(0, |acc, position| acc | (1 << position));
                }
            }
            _ => {}
        }
    }
}

impl TimingModes for Cta861Block {
    fn for_each_mode<F>(&self, mut visit: F)
    where
        F: FnMut(&VideoTimingMode),
    {
        for block in &self.data_blocks {
            match block {
                CtaDataBlock::Video(video) => {
                    for mode in video.vics.iter().copied().filter_map(svd_mode) {
                        visit(&mode);
                    }
                }
                CtaDataBlock::HdmiVendor(hdmi) => {
                    let hdmi_vics = hdmi.video.iter().flat_map(|video| &video.hdmi_vics);
                    for mode in hdmi_vics.copied().filter_map(hdmi_vic_mode) {
                        visit(&mode);
                    }
                }
                _ => {}
            }
        }
        for dtd in &self.detailed_timings {
            if let Some(mode) = VideoTimingMode::from_detailed_timing(dtd) {
                visit(&mode);
            }
        }
    }

    fn remove_mode_if<P>(&mut self, mut predicate: P, remove_unknown: bool)
    where
        P: FnMut(&VideoTimingMode) -> bool,
    {
        let mut removed_svds = Vec::new();
        let mut position = 0;
        for block in &mut self.data_blocks {
            match block {
                CtaDataBlock::Video(video) => video.vics.retain(|&svd| {
                    let kept = keep(svd_mode(svd), &mut predicate, remove_unknown);
                    if !kept {
                        removed_svds.push(position);
                    }
                    position += 1;
                    kept
                }),
                CtaDataBlock::HdmiVendor(hdmi) => {
                    if let Some(video) = &mut hdmi.video {
                        video.hdmi_vics.retain(|&hdmi_vic| {
                            keep(hdmi_vic_mode(hdmi_vic), &mut predicate, remove_unknown)
                        });
                    }
                }
                _ => {}
            }
        }

        let native = self.native_dtd_count;
        let (mut index, mut removed_native) = (0u8, 0u8);
        self.detailed_timings.retain(|dtd| {
            let kept = keep(
                VideoTimingMode::from_detailed_timing(dtd),
                &mut predicate,
                remove_unknown,
            );
            if !kept && index < native {
                removed_native += 1;
            }
            index = index.saturating_add(1);
            kept
        });
        self.native_dtd_count = native.saturating_sub(removed_native);

        if !removed_svds.is_empty() {
            reindex_svd_references(&mut self.data_blocks, &removed_svds);
        }
    }
}

impl TimingModes for EdidData {
    fn for_each_mode<F>(&self, mut visit: F)
    where
        F: FnMut(&VideoTimingMode),
    {
        self.base_block.for_each_mode(&mut visit);
        for block in &self.extension_blocks {
            block.for_each_mode(&mut visit);
        }
    }

    fn remove_mode_if<P>(&mut self, mut predicate: P, remove_unknown: bool)
    where
        P: FnMut(&VideoTimingMode) -> bool,
    {
        self.base_block.remove_mode_if(&mut predicate, remove_unknown);
        for block in &mut self.extension_blocks {
            block.remove_mode_if(&mut predicate, remove_unknown);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::{
        cta::{Stereo3dEntry, Stereo3dFormat, YCbCr420CapabilityMapDataBlock},
        descriptor::EstablishedTimings3Byte11,
        established_timings::{EstablishedTimings1, ManufacturerTimings},
        tests::test_init_log,
        timing::Rational,
    };

    const SYNCMASTER: &[u8] = include_bytes!("../../testdata/syncmaster");
    const HDMI_TV: &[u8] = include_bytes!("../../testdata/hdmi-tv");

    fn p(h_res: u32, v_res: u32, rate: u64) -> VideoTimingMode {
        VideoTimingMode::progressive(h_res, v_res, rate)
    }

    fn hdmi_tv() -> EdidData {
        EdidData::decode(HDMI_TV).unwrap()
    }

    fn check_removal<T>(tree: &T, predicate: fn(&VideoTimingMode) -> bool)
    where
        T: TimingModes + Clone,
    {
        let expected: Vec<_> = tree.modes().into_iter().filter(|m| !predicate(m)).collect();
        let mut pruned = tree.clone();
        pruned.remove_mode_if(predicate, false);
        assert_eq!(pruned.modes(), expected);
    }

    const PREDICATES: [fn(&VideoTimingMode) -> bool; 5] = [
        |mode| mode.v_rate == Rational::integer(60),
        |mode| mode.h_res >= 1280,
        |mode| mode.interlaced,
        |_| true,
        |_| false,
    ];

    #[test]
    fn removal_keeps_the_remaining_modes_in_order() {
        test_init_log();
        let (syncmaster, _) = BaseBlock::decode(SYNCMASTER).unwrap();
        let edid = hdmi_tv();
        for predicate in PREDICATES {
            check_removal(&syncmaster, predicate);
            check_removal(&edid.base_block, predicate);
            check_removal(&edid.extension_blocks[0], predicate);
            check_removal(&edid, predicate);
        }
    }

    #[test]
    fn visits_base_block_in_wire_order() {
        let (block, _) = BaseBlock::decode(SYNCMASTER).unwrap();
        let modes = block.modes();
        assert_eq!(modes.len(), 19);
        assert_eq!(modes[0], p(720, 400, 70));
        assert_eq!(modes[14], p(1152, 870, 75));
        assert_eq!(&modes[15..18], &[p(1280, 1024, 60), p(1152, 864, 75), p(1680, 1050, 60)]);
        assert_eq!((modes[18].h_res, modes[18].v_res), (1680, 1050));
    }

    #[test]
    fn visits_svds_hdmi_vics_and_dtds() {
        let edid = hdmi_tv();
        let modes = edid.extension_blocks[0].modes();
        assert_eq!(
            modes,
            vec![
                p(1920, 1080, 60),
                p(1280, 720, 60),
                VideoTimingMode::interlaced(1920, 1080, 60),
                VideoTimingMode {
                    h_res: 720,
                    v_res: 480,
                    v_rate: Rational::new(60_000, 1001).unwrap(),
                    interlaced: false,
                },
                p(3840, 2160, 30),
                p(3840, 2160, 60),
                p(3840, 2160, 30),
                p(3840, 2160, 24),
                p(1920, 1080, 60),
                p(1280, 720, 60),
            ]
        );
        assert_eq!(edid.modes().len(), edid.base_block.modes().len() + modes.len());
    }

    #[test]
    fn removing_svds_reindexes_references() {
        let mut edid = hdmi_tv();
        edid.remove_mode_if(|mode| mode.h_res == 1280, false);

        let block = &edid.extension_blocks[0];
        let CtaDataBlock::Video(video) = &block.data_blocks[0] else {
            panic!("video data block expected");
        };
        assert_eq!(video.vics, vec![0x90, 0x05, 0x03, 0x5F, 0x61]);

        let CtaDataBlock::HdmiVendor(hdmi) = &block.data_blocks[3] else {
            panic!("HDMI vendor block expected");
        };
        let hdmi_video = hdmi.video.as_ref().unwrap();
        assert_eq!(
            hdmi_video.three_d_entries,
            vec![Stereo3dEntry {
                svd_index: 0,
                format: Stereo3dFormat::SideBySideHalf { subsampling: 1 },
            }]
        );
        assert_eq!(
            block.data_blocks[4],
            CtaDataBlock::YCbCr420CapabilityMap(YCbCr420CapabilityMapDataBlock {
                svd_indices: BTreeSet::from([4, 5]),
            })
        );
        assert_eq!(block.detailed_timings.len(), 1);
        assert_eq!(block.native_dtd_count, 1);

        // Base block: the 1280x720 standard timing slot is emptied.
        assert_eq!(edid.base_block.standard_timings[1], None);

        let bytes = edid.encode().unwrap();
        assert_eq!(EdidData::decode(&bytes).unwrap(), edid);
    }

    #[test]
    fn removes_matching_descriptor_dtd() {
        let mut edid = hdmi_tv();
        edid.base_block
            .remove_mode_if(|mode| *mode == p(1920, 1080, 60), false);
        assert_eq!(edid.base_block.descriptors[0], None);
        assert_eq!(edid.base_block.standard_timings[0], None);
        assert!(edid.base_block.encode(1).is_ok());
    }

    #[test]
    fn masked_3d_svds_follow_removal() {
        let mut block = Cta861Block::decode(&HDMI_TV[128..]).unwrap();
        let CtaDataBlock::HdmiVendor(hdmi) = &mut block.data_blocks[3] else {
            panic!("HDMI vendor block expected");
        };
        let video = hdmi.video.as_mut().unwrap();
        video.three_d_multi = Some(ThreeDMulti::Masked {
            structures: crate::cta::Stereo3dStructures::FRAME_PACKING,
            mask: 0b10_1101,
        });

        // Drops SVD positions 2 (1080i) and 3 (480p).
        block.remove_mode_if(|mode| mode.interlaced || mode.v_res == 480, false);
        let CtaDataBlock::HdmiVendor(hdmi) = &block.data_blocks[3] else {
            panic!("HDMI vendor block expected");
        };
        assert_eq!(
            hdmi.video.as_ref().unwrap().three_d_multi,
            Some(ThreeDMulti::Masked {
                structures: crate::cta::Stereo3dStructures::FRAME_PACKING,
                mask: 0b1001,
            })
        );
    }

    #[test]
    fn unknown_entries_only_go_when_asked() {
        let (mut block, _) = BaseBlock::decode(SYNCMASTER).unwrap();
        block.manufacturer_timings |= ManufacturerTimings::MANUFACTURER_0;
        block.descriptors[3] = Some(EighteenByteDescriptor::EstablishedTimings3(
            EstablishedTimings3 {
                byte_11: EstablishedTimings3Byte11::from_bits_retain(0x0F),
                ..Default::default()
            },
        ));
        block.standard_timings[3] = Some(StandardTiming {
            x_resolution: 1920,
            aspect_ratio: crate::standard_timing::AspectRatio::Ratio16x9,
            v_frequency: 75,
        });
        let before = block.clone();

        block.remove_mode_if(|_| false, false);
        assert_eq!(block, before);

        block.remove_mode_if(|_| false, true);
        assert_eq!(block.manufacturer_timings, ManufacturerTimings::H1152V870F75);
        assert_eq!(block.standard_timings[3], None);
        assert_eq!(
            block.descriptors[3],
            Some(EighteenByteDescriptor::EstablishedTimings3(EstablishedTimings3::default()))
        );
        assert!(block
            .established_timings_1
            .contains(EstablishedTimings1::H720V400F70));
        assert_eq!(block.modes(), before.modes());
    }
}
