//! Prompt construction for the two model requests
//!
//! The breakdown request fixes the `PANEL` / `Image Prompt:` /
//! `Caption/Dialogue:` layout that [`crate::parser`] reads back, so the labels
//! here and the prefixes there must stay in sync.

use comicbook_core::PanelSpec;

/// Label that opens each panel block
pub const PANEL_MARKER: &str = "PANEL";
/// Label for the scene description line
pub const SCENE_LABEL: &str = "Image Prompt:";
/// Label for the caption line
pub const CAPTION_LABEL: &str = "Caption/Dialogue:";

/// Build the request asking the text model to split `story` into at most
/// `max_panels` panels.
pub fn breakdown_request(story: &str, max_panels: usize) -> String {
    format!(
        "You are a professional comic panel designer, tasked with converting a short story \
into a maximum of {max_panels} illustrated cartoon-style panels, suitable for a children's storybook.

Break the story down into its most important or funniest moments and produce one panel per moment. \
Each panel must include:

1. {SCENE_LABEL} A detailed, standalone visual description of the scene. Describe characters, \
setting, actions and facial expressions, and keep the characters consistent across panels.
2. {CAPTION_LABEL} A short, funny caption or line of dialogue for the panel.

Output format:
{PANEL_MARKER} [Number]
{SCENE_LABEL} [description]
{CAPTION_LABEL} \"[text]\"

Now, generate the panel breakdown for the following story:

{story}
"
    )
}

/// Build the per-panel request sent to the image model
pub fn illustration_request(scene: &str, caption: &str) -> String {
    format!(
        "Create a vibrant, cartoon-style illustration suitable for a children's storybook.

Scene: {scene}

Include the following text within the image as part of the artwork:
\"{caption}\"

Style Guidelines:
- Cartoon-style, colorful, playful
- Text should be clearly legible
- No additional text besides the given caption/dialogue
- Square aspect ratio (1:1)
"
    )
}

/// Render panels back into the breakdown layout the text model is asked for
pub fn render_breakdown(panels: &[PanelSpec]) -> String {
    panels
        .iter()
        .map(|p| {
            format!(
                "{PANEL_MARKER} {}\n{SCENE_LABEL} {}\n{CAPTION_LABEL} \"{}\"\n",
                p.index, p.scene_description, p.caption
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_request_embeds_story_and_bound() {
        let request = breakdown_request("A dog learns to fly.", 4);
        assert!(request.contains("a maximum of 4 illustrated"));
        assert!(request.ends_with("A dog learns to fly.\n"));
    }

    #[test]
    fn test_breakdown_request_layout_lines() {
        let request = breakdown_request("story", 9);
        let lines: Vec<&str> = request.lines().collect();
        assert!(lines.contains(&"PANEL [Number]"));
        assert!(lines.contains(&"Image Prompt: [description]"));
        assert!(lines.contains(&"Caption/Dialogue: \"[text]\""));
    }

    #[test]
    fn test_illustration_request_is_verbatim() {
        let request = illustration_request("  a cat on a roof ", "Meow \"now\"");
        assert!(request.contains("Scene:   a cat on a roof \n"));
        assert!(request.contains("\"Meow \"now\"\""));
        assert!(request.contains("Square aspect ratio (1:1)"));
        assert!(request.contains("clearly legible"));
    }

    #[test]
    fn test_render_breakdown() {
        let panels = vec![
            PanelSpec::new(1, "A hill", "Up we go"),
            PanelSpec::new(2, "A valley", ""),
        ];
        let text = render_breakdown(&panels);
        assert_eq!(
            text,
            "PANEL 1\nImage Prompt: A hill\nCaption/Dialogue: \"Up we go\"\n\n\
PANEL 2\nImage Prompt: A valley\nCaption/Dialogue: \"\"\n"
        );
    }
}
