use std::fmt::Write as _;
use std::time::Duration;

use crate::scanner::classify::{BitrateClass, DepthClass};
use crate::stats::LibraryStats;

/// Bitrates common enough to get their own report line, in display order.
const COMMON_BITRATES: [u32; 6] = [64, 128, 160, 192, 256, 320];

/// Render the end-of-scan console summary.
///
/// Section order is fixed: file count, file types, bitrates, sample rates,
/// sample size, types of files, total size. Histogram lines only appear for
/// non-zero buckets.
pub fn render(stats: &LibraryStats) -> String {
    let mut out = String::new();

    let _ = writeln!(out, ">> File count:        {:>5}", stats.total_files);

    let _ = writeln!(out, ">> File types:");
    for (label, count) in &stats.file_types {
        let _ = writeln!(out, "   {:<18} {:>5}", label, count);
    }

    render_bitrates(&mut out, stats);

    let _ = writeln!(out, ">> Sample rates:");
    for (hz, count) in &stats.sample_rates {
        let _ = writeln!(out, "   {:>6} Hz:         {:>5}", hz, count);
    }

    let _ = writeln!(out, ">> Sample size:");
    for (depth, count) in &stats.bit_depths {
        match depth {
            DepthClass::Bits(bits) => {
                let _ = writeln!(out, "   {:>2}-bit:            {:>5}", bits, count);
            }
            DepthClass::Unknown(text) => {
                let _ = writeln!(out, "   {:<20} {:>5}", text, count);
            }
        }
    }

    let _ = writeln!(out, ">> Types of files:");
    for (media, count) in &stats.media_types {
        let _ = writeln!(out, "   {:<5}:             {:>5}", media.label(), count);
    }

    let _ = writeln!(
        out,
        ">> Total size: {:.2}GB ({:.2}MB)",
        stats.total_size_bytes as f64 / (1024.0 * 1024.0 * 1024.0),
        stats.total_size_bytes as f64 / (1024.0 * 1024.0),
    );

    out
}

/// The three-tier bitrate listing: named common buckets in fixed order, odd
/// low rates lumped into one line, range bands above 320, sentinel last.
/// 1411 kbps (CD-quality lossless) and 2116 kbps (48kHz/24-bit) each get
/// their own line out of the bands.
fn render_bitrates(out: &mut String, stats: &LibraryStats) {
    let _ = writeln!(out, ">> Bitrates:");

    for &common in &COMMON_BITRATES {
        if let Some(count) = stats.bitrates.get(&BitrateClass::Kbps(common)) {
            let _ = writeln!(out, "   {:>3} kbps:          {:>5}", common, count);
        }
    }

    let mut other_low = 0u64;
    let mut band_321_1410 = 0u64;
    let mut exact_1411 = 0u64;
    let mut band_1412_2115 = 0u64;
    let mut exact_2116 = 0u64;
    let mut above_2116 = 0u64;
    let mut unknown = 0u64;

    for (&class, &count) in &stats.bitrates {
        match class {
            BitrateClass::Kbps(kbps) if kbps <= 320 => {
                if !COMMON_BITRATES.contains(&kbps) {
                    other_low += count;
                }
            }
            BitrateClass::Kbps(1411) => exact_1411 += count,
            BitrateClass::Kbps(2116) => exact_2116 += count,
            BitrateClass::Kbps(kbps) if kbps <= 1410 => band_321_1410 += count,
            BitrateClass::Kbps(kbps) if kbps <= 2115 => band_1412_2115 += count,
            BitrateClass::Kbps(_) => above_2116 += count,
            BitrateClass::Unknown => unknown += count,
        }
    }

    if other_low > 0 {
        let _ = writeln!(out, "   <320 kbps:         {:>5}", other_low);
    }
    if band_321_1410 > 0 {
        let _ = writeln!(out, "   321-1410 kbps:     {:>5}", band_321_1410);
    }
    if exact_1411 > 0 {
        let _ = writeln!(out, "   1411 kbps:         {:>5}", exact_1411);
    }
    if band_1412_2115 > 0 {
        let _ = writeln!(out, "   1412-2115 kbps:    {:>5}", band_1412_2115);
    }
    if exact_2116 > 0 {
        let _ = writeln!(out, "   2116 kbps:         {:>5}", exact_2116);
    }
    if above_2116 > 0 {
        let _ = writeln!(out, "   >2116 kbps:        {:>5}", above_2116);
    }
    if unknown > 0 {
        let _ = writeln!(out, "      {:<12}    {:>5}", "Unknown", unknown);
    }
}

/// Human form of the scan duration for the final report line.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs < 1.0 {
        return "<1 sec".to_string();
    }
    let minutes = (secs / 60.0).floor() as u64;
    if minutes > 0 {
        format!("{} min {:.0} sec", minutes, secs % 60.0)
    } else {
        format!("{:.1} sec", secs)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::scanner::classify::{classify, FileKind};
    use crate::scanner::metadata::RawMetadata;

    #[test]
    fn one_file_report_end_to_end() {
        let mut stats = LibraryStats::default();
        let raw = RawMetadata {
            bitrate_kbps: Some(320),
            sample_rate_hz: Some(44100),
            bit_depth: Some(16),
            ..RawMetadata::default()
        };
        stats.record(
            &classify(Path::new("song.mp3"), FileKind::Mp3, &raw),
            1_073_741_824,
        );

        let expected = "\
>> File count:            1
>> File types:
   MP3                    1
>> Bitrates:
   320 kbps:              1
>> Sample rates:
    44100 Hz:             1
>> Sample size:
   16-bit:                1
>> Types of files:
   Audio:                 1
>> Total size: 1.00GB (1024.00MB)
";
        assert_eq!(render(&stats), expected);
    }

    #[test]
    fn empty_library_renders_headings_only() {
        let out = render(&LibraryStats::default());
        assert!(out.contains(">> File count:            0"));
        assert!(out.contains(">> Bitrates:\n>> Sample rates:"));
        assert!(out.contains(">> Total size: 0.00GB (0.00MB)"));
    }

    #[test]
    fn common_buckets_print_in_fixed_order_and_zeroes_are_omitted() {
        let mut stats = LibraryStats::default();
        stats.bitrates.insert(BitrateClass::Kbps(320), 2);
        stats.bitrates.insert(BitrateClass::Kbps(128), 5);

        let out = render(&stats);
        assert!(!out.contains("64 kbps"));
        assert!(!out.contains("192 kbps"));
        let pos_128 = out.find("128 kbps").unwrap();
        let pos_320 = out.find("320 kbps").unwrap();
        assert!(pos_128 < pos_320);
    }

    #[test]
    fn odd_low_bitrates_lump_into_one_line() {
        let mut stats = LibraryStats::default();
        stats.bitrates.insert(BitrateClass::Kbps(96), 1);
        stats.bitrates.insert(BitrateClass::Kbps(127), 2);

        let out = render(&stats);
        assert!(out.contains("   <320 kbps:             3"));
        // Odd rates never get their own line.
        assert!(!out.contains("96 kbps"));
        assert!(!out.contains("127 kbps"));
    }

    #[test]
    fn exact_1411_is_not_swallowed_by_the_bands() {
        let mut stats = LibraryStats::default();
        stats.bitrates.insert(BitrateClass::Kbps(1411), 3);

        let out = render(&stats);
        assert!(out.contains("   1411 kbps:             3"));
        assert!(!out.contains("321-1410"));
        assert!(!out.contains("1412-2115"));
    }

    #[test]
    fn band_boundaries_are_inclusive() {
        let mut stats = LibraryStats::default();
        stats.bitrates.insert(BitrateClass::Kbps(321), 1);
        stats.bitrates.insert(BitrateClass::Kbps(1410), 1);
        stats.bitrates.insert(BitrateClass::Kbps(1412), 1);
        stats.bitrates.insert(BitrateClass::Kbps(2115), 1);
        stats.bitrates.insert(BitrateClass::Kbps(2116), 2);
        stats.bitrates.insert(BitrateClass::Kbps(2117), 1);

        let out = render(&stats);
        assert!(out.contains("   321-1410 kbps:         2"));
        assert!(out.contains("   1412-2115 kbps:        2"));
        assert!(out.contains("   2116 kbps:             2"));
        assert!(out.contains("   >2116 kbps:            1"));
    }

    #[test]
    fn unknown_sentinel_prints_after_numeric_buckets() {
        let mut stats = LibraryStats::default();
        stats.bitrates.insert(BitrateClass::Kbps(64), 1);
        stats.bitrates.insert(BitrateClass::Unknown, 2);

        let out = render(&stats);
        let pos_64 = out.find("64 kbps").unwrap();
        let pos_unknown = out.find("Unknown").unwrap();
        assert!(pos_64 < pos_unknown);
        assert!(out.contains("      Unknown             2"));
    }

    #[test]
    fn sample_size_lists_numeric_then_sentinels() {
        let mut stats = LibraryStats::default();
        stats.bit_depths.insert(DepthClass::Bits(24), 1);
        stats.bit_depths.insert(DepthClass::Bits(16), 4);
        stats
            .bit_depths
            .insert(DepthClass::Unknown(crate::scanner::classify::DEPTH_UNKNOWN_AAC), 2);

        let out = render(&stats);
        let pos_16 = out.find("16-bit").unwrap();
        let pos_24 = out.find("24-bit").unwrap();
        let pos_sentinel = out.find("Unknown (likely 16-bit AAC)").unwrap();
        assert!(pos_16 < pos_24);
        assert!(pos_24 < pos_sentinel);
    }

    #[test]
    fn elapsed_formats_cover_all_three_shapes() {
        assert_eq!(format_elapsed(Duration::from_millis(400)), "<1 sec");
        assert_eq!(format_elapsed(Duration::from_secs_f64(2.53)), "2.5 sec");
        assert_eq!(format_elapsed(Duration::from_secs(75)), "1 min 15 sec");
        assert_eq!(format_elapsed(Duration::from_secs(60)), "1 min 0 sec");
    }
}
