/// Split a size token such as "1.2G" into its magnitude and unit suffix.
///
/// Returns `None` when the token does not start with a number.
#[must_use]
pub fn parse_size(token: &str) -> Option<(f64, String)> {
    let token = token.trim();
    let split = token
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
        .map_or(token.len(), |(i, _)| i);

    let magnitude = token[..split].parse::<f64>().ok()?;
    let unit = token[split..].trim().to_string();
    Some((magnitude, unit))
}

/// Convert a magnitude and unit into bytes using powers of 1024.
///
/// "G", "GB" and "gb" are equivalent. An empty unit (plain "B" or a bare
/// number) counts as bytes. Unknown units yield 0 rather than an error.
#[must_use]
pub fn convert_to_bytes(size: f64, unit: &str) -> u64 {
    let upper = unit.trim().to_uppercase();
    let unit = upper.strip_suffix('B').unwrap_or(&upper);

    let multiplier: u64 = match unit {
        "" => 1,
        "K" => 1 << 10,
        "M" => 1 << 20,
        "G" => 1 << 30,
        "T" => 1 << 40,
        _ => return 0,
    };

    // Float-to-int casts saturate, so negative magnitudes land on 0
    (size * multiplier as f64) as u64
}

/// Parse and convert in one step; unparseable tokens yield `None`.
#[must_use]
pub fn to_bytes(token: &str) -> Option<u64> {
    let (size, unit) = parse_size(token)?;
    Some(convert_to_bytes(size, &unit))
}
