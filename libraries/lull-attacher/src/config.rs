//! Attacher configuration

use lull_core::constants::{MARKER_ATTRIBUTE, MARKER_VALUE, MEDIA_SELECTOR};

/// Which elements are processed and how attached ones are marked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttacherConfig {
    /// CSS selector matching processable media elements
    pub media_selector: String,

    /// Attribute set on elements once their chain is built
    pub marker_attribute: String,

    /// Value written to `marker_attribute`
    pub marker_value: String,
}

impl AttacherConfig {
    /// Selector matching media elements that carry the marker
    ///
    /// `"video, audio"` with marker `data-x` becomes
    /// `"video[data-x], audio[data-x]"`.
    pub fn attached_selector(&self) -> String {
        self.media_selector
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(|tag| format!("{}[{}]", tag, self.marker_attribute))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Whether a (case-insensitive) tag name is one of the media tags
    pub fn is_media_tag(&self, tag_name: &str) -> bool {
        self.media_selector
            .split(',')
            .map(str::trim)
            .any(|tag| tag.eq_ignore_ascii_case(tag_name))
    }
}

impl Default for AttacherConfig {
    fn default() -> Self {
        Self {
            media_selector: MEDIA_SELECTOR.to_string(),
            marker_attribute: MARKER_ATTRIBUTE.to_string(),
            marker_value: MARKER_VALUE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attached_selector_covers_every_media_tag() {
        let config = AttacherConfig::default();
        assert_eq!(
            config.attached_selector(),
            "video[data-audio-normalized], audio[data-audio-normalized]"
        );
    }

    #[test]
    fn media_tags_match_dom_tag_names() {
        let config = AttacherConfig::default();
        assert!(config.is_media_tag("VIDEO"));
        assert!(config.is_media_tag("audio"));
        assert!(!config.is_media_tag("DIV"));
        assert!(!config.is_media_tag("SOURCE"));
    }
}
