use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

/// `150.00 MB` style, as used by the process table and dialogs.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / MIB)
}

pub fn format_gigabytes(bytes: u64) -> String {
    format!("{:.2} GB", bytes as f64 / GIB)
}

pub fn format_percent(value: f32) -> String {
    format!("{value:.1}%")
}
