//! Tolerant parser for the text model's panel breakdown
//!
//! The model is asked for blocks of the form
//!
//! ```text
//! PANEL 1
//! Image Prompt: a fox in a hat
//! Caption/Dialogue: "Nice hat!"
//! ```
//!
//! but nothing forces it to comply, so parsing never fails. The response is
//! split on the `PANEL` token, each segment is read line by line, and
//! whatever fields are found become one [`PanelSpec`]. The number after
//! `PANEL` is ignored; indices follow emission order.

use crate::prompt::{CAPTION_LABEL, PANEL_MARKER, SCENE_LABEL};
use comicbook_core::PanelSpec;

/// Classification of a single line inside a panel segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelLine<'a> {
    Scene(&'a str),
    Caption(&'a str),
    Unrecognized,
}

impl<'a> PanelLine<'a> {
    /// Classify a line by its (case-sensitive) label prefix
    pub fn classify(line: &'a str) -> Self {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix(SCENE_LABEL) {
            PanelLine::Scene(rest.trim())
        } else if let Some(rest) = line.strip_prefix(CAPTION_LABEL) {
            PanelLine::Caption(unquote(rest.trim()))
        } else {
            PanelLine::Unrecognized
        }
    }
}

/// Panel fields collected from the current segment
#[derive(Debug, Default)]
struct OpenPanel {
    scene: String,
    caption: String,
}

impl OpenPanel {
    fn accept(&mut self, line: PanelLine<'_>) {
        match line {
            PanelLine::Scene(text) => self.scene = text.to_string(),
            PanelLine::Caption(text) => self.caption = text.to_string(),
            PanelLine::Unrecognized => {}
        }
    }

    fn close(self, index: usize) -> PanelSpec {
        PanelSpec::new(index, self.scene, self.caption)
    }
}

/// Parse a raw breakdown response into panels, in emission order.
///
/// Text before the first `PANEL` is discarded and whitespace-only segments
/// are skipped. Lines without a known label, including continuation lines of
/// a multi-line field, are ignored. A later line with the same label replaces
/// the earlier value.
pub fn parse_panels(raw: &str) -> Vec<PanelSpec> {
    let mut panels = Vec::new();

    for segment in raw.split(PANEL_MARKER).skip(1) {
        if segment.trim().is_empty() {
            continue;
        }

        let mut open = OpenPanel::default();
        for line in segment.lines() {
            open.accept(PanelLine::classify(line));
        }
        panels.push(open.close(panels.len() + 1));
    }

    panels
}

/// Strip one layer of surrounding double quotes
fn unquote(text: &str) -> &str {
    let text = text.strip_prefix('"').unwrap_or(text);
    text.strip_suffix('"').unwrap_or(text)
}
