pub mod handler;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cuts `text` to at most `max_width` terminal columns, marking the cut
/// with an ellipsis.
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

pub fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(rating) => {
            let filled = rating.round().clamp(0.0, 5.0) as usize;
            format!("{}{} {:.1}", "★".repeat(filled), "☆".repeat(5 - filled), rating)
        }
        None => "—".to_string(),
    }
}

pub fn format_year(year: Option<i32>) -> String {
    year.map(|y| y.to_string()).unwrap_or_else(|| "—".to_string())
}
