use crate::text_metrics;

/// Approximate advance of `ch` as a fraction of the font size, for sans-serif
/// faces. Used when no installed font can be measured.
pub(super) fn char_width_factor(ch: char) -> f32 {
    match ch {
        ' ' => 0.28,
        'i' | 'j' | 'l' | '\'' | '|' | '!' | '.' | ',' | ':' | ';' => 0.24,
        'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '{' | '}' | '/' | '\\' | '-' => 0.34,
        'm' | 'w' => 0.84,
        'M' | 'W' => 0.92,
        '%' | '@' | '&' | '#' => 0.9,
        'A'..='Z' => 0.67,
        'a'..='z' => 0.56,
        '0'..='9' => 0.58,
        _ => 0.6,
    }
}

fn fallback_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(char_width_factor).sum::<f32>() * font_size
}

pub(super) fn text_width(text: &str, font_size: f32, font_family: &str, fast_metrics: bool) -> f32 {
    if fast_metrics {
        return fallback_text_width(text, font_size);
    }
    text_metrics::measure_text_width(text, font_size, font_family)
        .unwrap_or_else(|| fallback_text_width(text, font_size))
}

/// Greedy word wrap: words are appended to the current line until the line
/// would exceed `max_width`, then the word starts the next line. A word wider
/// than the limit sits alone on its line.
pub(super) fn wrap_words(
    text: &str,
    max_width: f32,
    font_size: f32,
    font_family: &str,
    fast_metrics: bool,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for word in text.split_whitespace() {
        current.push(word);
        let candidate = current.join(" ");
        if current.len() > 1
            && text_width(&candidate, font_size, font_family, fast_metrics) > max_width
        {
            current.pop();
            lines.push(current.join(" "));
            current.clear();
            current.push(word);
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current.join(" "));
    }
    lines
}

/// Percentage with no decimals: `0.25` becomes `"25%"`. Halves round away
/// from zero.
pub fn format_percent(value: f32) -> String {
    let percent = (f64::from(value) * 100.0).round();
    if percent == 0.0 {
        return "0%".to_string();
    }
    format!("{percent:.0}%")
}
