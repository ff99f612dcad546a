// ============================================================================
// bitshrink-core/src/processing/bitrate.rs
// ============================================================================
//
// BITRATE POLICY: Target bit rate selection
//
// The target is 40% of the source bit rate, capped by a ceiling chosen from
// the frame's short side so portrait and landscape sources of the same
// resolution land in the same tier.
//
//   short side   ceiling
//   <= 720       2 Mb/s
//   <= 1080      4 Mb/s
//   <= 1440      10 Mb/s
//   above        20 Mb/s

use std::fmt;

/// Resolution tier of a frame, classified by its short side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ResolutionTier {
    Hd720,
    Hd1080,
    Qhd1440,
    Above1440,
}

impl ResolutionTier {
    /// Classifies a frame by the smaller of its dimensions.
    #[must_use]
    pub fn from_short_side(short_side: u32) -> Self {
        match short_side {
            0..=720 => Self::Hd720,
            721..=1080 => Self::Hd1080,
            1081..=1440 => Self::Qhd1440,
            _ => Self::Above1440,
        }
    }

    /// Maximum target bit rate for this tier, in bits per second.
    #[must_use]
    pub fn ceiling(self) -> u64 {
        match self {
            Self::Hd720 => 2_000_000,
            Self::Hd1080 => 4_000_000,
            Self::Qhd1440 => 10_000_000,
            Self::Above1440 => 20_000_000,
        }
    }
}

impl fmt::Display for ResolutionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Hd720 => "<=720p",
            Self::Hd1080 => "<=1080p",
            Self::Qhd1440 => "<=1440p",
            Self::Above1440 => ">1440p",
        };
        f.write_str(label)
    }
}

/// Ceiling for a frame whose short side is `short_side` pixels.
#[must_use]
pub fn bitrate_ceiling(short_side: u32) -> u64 {
    ResolutionTier::from_short_side(short_side).ceiling()
}

/// `floor(original * 0.4)`, computed exactly in integers.
#[must_use]
pub fn proportional_target(original: u64) -> u64 {
    // Never larger than `original`, so the narrowing cast is lossless.
    (u128::from(original) * 2 / 5) as u64
}

/// Target bit rate for a source of `original` bits per second and the given
/// frame size.
#[must_use]
pub fn target_bitrate(original: u64, width: u32, height: u32) -> u64 {
    proportional_target(original).min(bitrate_ceiling(width.min(height)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceiling_boundaries() {
        assert_eq!(bitrate_ceiling(720), 2_000_000);
        assert_eq!(bitrate_ceiling(721), 4_000_000);
        assert_eq!(bitrate_ceiling(1080), 4_000_000);
        assert_eq!(bitrate_ceiling(1081), 10_000_000);
        assert_eq!(bitrate_ceiling(1440), 10_000_000);
        assert_eq!(bitrate_ceiling(1441), 20_000_000);
        assert_eq!(bitrate_ceiling(4320), 20_000_000);
    }

    #[test]
    fn test_ceiling_caps_1080p_source() {
        // 10 Mb/s at 1080p: 40% is exactly the 1080p ceiling.
        assert_eq!(target_bitrate(10_000_000, 1920, 1080), 4_000_000);
        assert_eq!(target_bitrate(30_000_000, 1920, 1080), 4_000_000);
    }

    #[test]
    fn test_proportional_target_below_ceiling() {
        assert_eq!(target_bitrate(3_000_000, 1280, 720), 1_200_000);
        assert_eq!(target_bitrate(7, 640, 480), 2);
        assert_eq!(target_bitrate(1, 640, 480), 0);
    }

    #[test]
    fn test_orientation_does_not_change_tier() {
        assert_eq!(
            target_bitrate(50_000_000, 1080, 1920),
            target_bitrate(50_000_000, 1920, 1080)
        );
        assert_eq!(target_bitrate(50_000_000, 2160, 3840), 20_000_000);
    }

    #[test]
    fn test_no_overflow_on_huge_bitrate() {
        assert_eq!(proportional_target(u64::MAX), u64::MAX / 5 * 2);
        assert_eq!(target_bitrate(u64::MAX, 3840, 2160), 20_000_000);
    }

    #[test]
    fn test_target_never_exceeds_either_bound() {
        let sizes = [(640, 360), (1280, 720), (1281, 721), (1920, 1080), (2560, 1440), (3840, 2160)];
        let bitrates = [1, 999, 1_000_000, 4_999_999, 10_000_001, 80_000_000];
        for (w, h) in sizes {
            for original in bitrates {
                let target = target_bitrate(original, w, h);
                assert!(target * 5 <= original * 2, "{} > 40% of {}", target, original);
                assert!(target <= bitrate_ceiling(w.min(h)));
            }
        }
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(ResolutionTier::from_short_side(1080).to_string(), "<=1080p");
        assert_eq!(ResolutionTier::from_short_side(2000).to_string(), ">1440p");
    }
}
