/// Turns an HTML message body into plain text lines.
pub trait Converter: Send + Sync {
    fn to_text(&self, html: &str) -> String;
}

/// Markdown rendering via `html2md`; list items come out as `* ` bullets,
/// which is the shape news lines take in plain-text digests.
#[derive(Debug, Default, Clone, Copy)]
pub struct Html2MdConverter;

impl Converter for Html2MdConverter {
    fn to_text(&self, html: &str) -> String {
        let markdown = html2md::parse_html(html);
        let mut text = String::with_capacity(markdown.len());
        for line in markdown.lines() {
            text.push_str(line.replace('\u{a0}', " ").trim_end());
            text.push('\n');
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_items_become_marker_lines() {
        let text = Html2MdConverter.to_text("<ul><li>Fed holds</li><li>ECB holds</li></ul>");
        let bullets: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| line.starts_with('*'))
            .collect();
        assert_eq!(bullets.len(), 2);
        assert!(bullets[0].contains("Fed holds"));
    }
}
