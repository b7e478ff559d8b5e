//! Human readable byte counts with binary prefixes.

const KIB: u64 = 1024;

/// Unit table, largest first. Amounts are floored to whole units.
const UNITS: [(u64, &str); 5] = [
  (KIB.pow(5), "PB"),
  (KIB.pow(4), "TB"),
  (KIB.pow(3), "GB"),
  (KIB.pow(2), "MB"),
  (KIB, "KB"),
];

/// Formats `bytes` using 1024-based units.
///
/// ```rust
/// use safefile::size::human_readable_size;
///
/// assert_eq!(human_readable_size(1024), "1 KB");
/// assert_eq!(human_readable_size(1), "1 byte");
/// assert_eq!(human_readable_size(3 * 1024 * 1024 + 5), "3 MB");
/// ```
pub fn human_readable_size(bytes: u64) -> String {
  for (factor, unit) in UNITS {
    if bytes >= factor {
      return format!("{} {unit}", bytes / factor);
    }
  }

  match bytes {
    1 => "1 byte".to_string(),
    n => format!("{n} bytes"),
  }
}
