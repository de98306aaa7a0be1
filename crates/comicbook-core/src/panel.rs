//! Parsed panel descriptions

use serde::{Deserialize, Serialize};

/// One scene/caption unit of the comic.
///
/// `index` is 1-based and follows the order in which the text model emitted
/// the panel. Either text field may be empty when the model left it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelSpec {
    pub index: usize,
    pub scene_description: String,
    pub caption: String,
}

impl PanelSpec {
    pub fn new(
        index: usize,
        scene_description: impl Into<String>,
        caption: impl Into<String>,
    ) -> Self {
        Self {
            index,
            scene_description: scene_description.into(),
            caption: caption.into(),
        }
    }

    /// File name used when this panel's illustration is saved
    pub fn file_name(&self) -> String {
        panel_file_name(self.index)
    }
}

/// `panel_<index>.png`
pub fn panel_file_name(index: usize) -> String {
    format!("panel_{}.png", index)
}

/// Parse the index back out of a `panel_<index>.png` file name
pub fn parse_panel_file_name(name: &str) -> Option<usize> {
    name.strip_prefix("panel_")?
        .strip_suffix(".png")?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_round_trip() {
        let panel = PanelSpec::new(3, "a cat", "meow");
        assert_eq!(panel.file_name(), "panel_3.png");
        assert_eq!(parse_panel_file_name("panel_3.png"), Some(3));
    }

    #[test]
    fn test_parse_panel_file_name_rejects_others() {
        assert_eq!(parse_panel_file_name("storybook.png"), None);
        assert_eq!(parse_panel_file_name("panel_x.png"), None);
        assert_eq!(parse_panel_file_name("panel_2.jpg"), None);
    }
}
