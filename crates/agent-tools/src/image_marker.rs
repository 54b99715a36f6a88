//! Inline `[IMAGE:<data-url>]` markers embedded in tool and report text.

use std::sync::OnceLock;

use regex::Regex;

static MARKER: OnceLock<Option<Regex>> = OnceLock::new();

fn marker_regex() -> Option<&'static Regex> {
    MARKER
        .get_or_init(|| Regex::new(r"\[IMAGE:(.*?)\]").ok())
        .as_ref()
}

pub fn image_marker(url: &str) -> String {
    format!("[IMAGE:{url}]")
}

/// Payloads of every complete marker, in order of appearance.
pub fn extract_image_markers(text: &str) -> Vec<String> {
    let Some(re) = marker_regex() else {
        return Vec::new();
    };
    re.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|payload| payload.as_str().to_string())
        .collect()
}

/// `text` with every complete marker removed and the result trimmed.
pub fn strip_image_markers(text: &str) -> String {
    match marker_regex() {
        Some(re) => re.replace_all(text, "").trim().to_string(),
        None => text.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_all_payloads() {
        let text = format!(
            "Here you go:\n{}\nand another {}",
            image_marker("data:image/png;base64,AAA"),
            image_marker("data:image/png;base64,BBB")
        );
        assert_eq!(
            extract_image_markers(&text),
            vec!["data:image/png;base64,AAA", "data:image/png;base64,BBB"]
        );
    }

    #[test]
    fn strips_markers_and_keeps_prose() {
        let text = "Generated image: fox\n[IMAGE:data:image/png;base64,AAA]";
        assert_eq!(strip_image_markers(text), "Generated image: fox");
    }

    #[test]
    fn unterminated_marker_is_left_alone() {
        let text = "broken [IMAGE:data:image/png";
        assert!(extract_image_markers(text).is_empty());
        assert_eq!(strip_image_markers(text), text);
    }

    #[test]
    fn text_without_markers() {
        assert!(extract_image_markers("The sum is **8**").is_empty());
        assert_eq!(strip_image_markers(" plain "), "plain");
    }
}
