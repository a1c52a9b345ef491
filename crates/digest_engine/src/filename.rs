use chrono::NaiveDateTime;

pub const REPORT_FILE_PREFIX: &str = "mail_digest";

/// Timestamped, filesystem-safe report name: `{prefix}_{YYYYmmdd_HHMMSS}.{ext}`.
pub fn report_filename(prefix: &str, generated_at: NaiveDateTime, extension: &str) -> String {
    let stem = sanitize_stem(prefix);
    let stamp = generated_at.format("%Y%m%d_%H%M%S");
    format!("{stem}_{stamp}.{extension}")
}

fn sanitize_stem(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]);
    if cleaned.is_empty() {
        REPORT_FILE_PREFIX.to_string()
    } else {
        cleaned.to_string()
    }
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}
