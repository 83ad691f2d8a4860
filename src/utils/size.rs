use crate::error::{Result, SplitError};

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;
const GIB: u64 = 1024 * MIB;

/// Parses a human size string into bytes
///
/// Accepts digits followed by an optional case-insensitive `k`, `m` or `g`, itself
/// optionally followed by `b`. Multipliers are binary (1024-based). Surrounding whitespace
/// is ignored.
///
/// # Examples
///
/// ```
/// use conversation_splitter::utils::parse_size;
///
/// assert_eq!(parse_size("50MB").unwrap(), 50 * 1024 * 1024);
/// assert_eq!(parse_size("512").unwrap(), 512);
/// assert!(parse_size("12 TB").is_err());
/// ```
///
/// # Errors
///
/// Returns [`SplitError::SizeFormat`] when the input does not match the grammar or the
/// result overflows `u64`.
pub fn parse_size(input: &str) -> Result<u64> {
    let fail = || SplitError::SizeFormat(input.to_string());

    let trimmed = input.trim();
    let digits_end = trimmed.find(|c: char| !c.is_ascii_digit()).unwrap_or(trimmed.len());
    if digits_end == 0 {
        return Err(fail());
    }

    let (digits, suffix) = trimmed.split_at(digits_end);
    let multiplier = match suffix.to_ascii_lowercase().as_str() {
        "" => 1,
        "k" | "kb" => KIB,
        "m" | "mb" => MIB,
        "g" | "gb" => GIB,
        _ => return Err(fail()),
    };

    let value: u64 = digits.parse().map_err(|_| fail())?;
    value.checked_mul(multiplier).ok_or_else(fail)
}

/// Formats a byte count as megabytes with one decimal, e.g. `2.9MB`
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.1}MB", bytes as f64 / MIB as f64)
}
