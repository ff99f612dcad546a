//! Utility functions for formatting values in log output.

use std::time::Duration;

/// Formats a duration as HH:MM:SS (e.g., 3725s -> "01:02:05").
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Formats bytes with appropriate binary units (B, KiB, MiB, GiB).
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;
    const GIB: f64 = MIB * 1024.0;

    let bytes_f64 = bytes as f64;
    if bytes_f64 >= GIB {
        format!("{:.2} GiB", bytes_f64 / GIB)
    } else if bytes_f64 >= MIB {
        format!("{:.2} MiB", bytes_f64 / MIB)
    } else if bytes_f64 >= KIB {
        format!("{:.2} KiB", bytes_f64 / KIB)
    } else {
        format!("{bytes} B")
    }
}

/// Formats a bit rate with decimal units (b/s, kb/s, Mb/s).
#[must_use]
pub fn format_bitrate(bits_per_second: u64) -> String {
    if bits_per_second >= 1_000_000 {
        format!("{:.2} Mb/s", bits_per_second as f64 / 1_000_000.0)
    } else if bits_per_second >= 1_000 {
        format!("{:.1} kb/s", bits_per_second as f64 / 1_000.0)
    } else {
        format!("{bits_per_second} b/s")
    }
}

/// Calculates the percentage size reduction from input to output.
/// Returns 0 if input_size is 0 or the output is not smaller.
#[must_use]
pub fn calculate_size_reduction(input_size: u64, output_size: u64) -> u64 {
    if input_size == 0 || output_size >= input_size {
        0
    } else {
        100 - ((u128::from(output_size) * 100) / u128::from(input_size)) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(0)), "00:00:00");
        assert_eq!(format_duration(Duration::from_secs(59)), "00:00:59");
        assert_eq!(format_duration(Duration::from_secs(3661)), "01:01:01");
        assert_eq!(format_duration(Duration::from_secs(90061)), "25:01:01");
        // Fractional seconds truncate
        assert_eq!(format_duration(Duration::from_millis(59_900)), "00:00:59");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.00 KiB");
        assert_eq!(format_bytes(1536 * 1024), "1.50 MiB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.00 GiB");
    }

    #[test]
    fn test_format_bitrate() {
        assert_eq!(format_bitrate(999), "999 b/s");
        assert_eq!(format_bitrate(128_000), "128.0 kb/s");
        assert_eq!(format_bitrate(4_000_000), "4.00 Mb/s");
    }

    #[test]
    fn test_calculate_size_reduction() {
        assert_eq!(calculate_size_reduction(0, 10), 0);
        assert_eq!(calculate_size_reduction(100, 100), 0);
        assert_eq!(calculate_size_reduction(100, 150), 0);
        assert_eq!(calculate_size_reduction(100, 40), 60);
        assert_eq!(calculate_size_reduction(1000, 333), 67);
        assert_eq!(calculate_size_reduction(u64::MAX, 1), 100);
    }
}
