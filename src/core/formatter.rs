/// Placeholder shown wherever a figure is undefined.
pub const NOT_AVAILABLE: &str = "N/A";

/// Returns a cost with exactly two fractional digits, e.g. "337.50".
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// Returns the formatted amount, or "N/A" when there is none.
pub fn format_optional_amount(value: Option<f64>) -> String {
    value.map(format_amount).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Left-justify `text` to at least `width` characters. Longer text is kept whole.
pub fn pad_right(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}
