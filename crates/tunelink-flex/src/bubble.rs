// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-card bubble with a cover image and a deep-link button.

use serde_json::{Value, json};

use crate::{FlexComponent, FlexMessage};

/// A compact bubble: full-bleed cover image with a colored footer overlay
/// holding a header line, a detail line, and one URI button.
///
/// Used for the create-playlist and random-track replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonBubble {
    alt_text: String,
    header: String,
    text: String,
    button_label: String,
    button_url: String,
    image_url: String,
    /// Footer background as a hex color without the leading '#'.
    color: String,
}

impl ButtonBubble {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        alt_text: impl Into<String>,
        header: impl Into<String>,
        text: impl Into<String>,
        button_label: impl Into<String>,
        button_url: impl Into<String>,
        image_url: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            alt_text: alt_text.into(),
            header: header.into(),
            text: text.into(),
            button_label: button_label.into(),
            button_url: button_url.into(),
            image_url: image_url.into(),
            color: color.into(),
        }
    }
}

impl FlexComponent for ButtonBubble {
    fn to_component(&self) -> Value {
        let cover = json!({
            "type": "image",
            "url": self.image_url,
            "size": "full",
            "aspectMode": "cover",
            "gravity": "center",
        });
        let header = json!({
            "type": "box",
            "layout": "vertical",
            "contents": [{
                "type": "text",
                "text": self.header,
                "color": "#ffffff",
                "weight": "bold",
                "size": "sm",
            }],
        });
        let text = json!({
            "type": "box",
            "layout": "vertical",
            "contents": [{
                "type": "text",
                "text": self.text,
                "color": "#969696",
                "size": "xxs",
            }],
        });
        let button = json!({
            "type": "button",
            "action": {
                "type": "uri",
                "label": self.button_label,
                "uri": self.button_url,
            },
            "color": "#ffffff",
            "offsetBottom": "5px",
        });
        let footer = json!({
            "type": "box",
            "layout": "vertical",
            "contents": [header, text, button],
            "height": "100px",
            "backgroundColor": format!("#{}", self.color),
            "position": "absolute",
            "offsetBottom": "0px",
            "offsetStart": "0px",
            "offsetEnd": "0px",
            "paddingAll": "10px",
        });
        json!({
            "type": "bubble",
            "size": "kilo",
            "body": {
                "type": "box",
                "layout": "vertical",
                "contents": [cover, footer],
                "paddingAll": "0px",
            },
        })
    }
}

impl FlexMessage for ButtonBubble {
    fn alt_text(&self) -> &str {
        &self.alt_text
    }

    fn message_contents(&self) -> Value {
        self.to_component()
    }
}
