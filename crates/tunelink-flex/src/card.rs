// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain image card: compact image + caption, used as a carousel child.

use serde_json::{Value, json};

use crate::{FlexComponent, FlexMessage};

/// A micro bubble holding one image, a short caption, and a tap action.
///
/// Used for the top-artists carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCard {
    alt_text: String,
    caption: String,
    image_url: String,
    url: String,
}

impl ImageCard {
    pub fn new(
        alt_text: impl Into<String>,
        caption: impl Into<String>,
        image_url: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            alt_text: alt_text.into(),
            caption: caption.into(),
            image_url: image_url.into(),
            url: url.into(),
        }
    }
}

impl FlexComponent for ImageCard {
    fn to_component(&self) -> Value {
        json!({
            "type": "bubble",
            "size": "micro",
            "body": {
                "type": "box",
                "layout": "vertical",
                "contents": [
                    {
                        "type": "image",
                        "url": self.image_url,
                        "size": "full",
                        "aspectMode": "cover",
                        "aspectRatio": "1:1",
                        "gravity": "center",
                    },
                    {
                        "type": "box",
                        "layout": "vertical",
                        "contents": [{
                            "type": "text",
                            "text": self.caption,
                            "weight": "bold",
                            "size": "sm",
                            "wrap": true,
                        }],
                        "paddingAll": "10px",
                    },
                ],
                "paddingAll": "0px",
                "action": {
                    "type": "uri",
                    "label": "open",
                    "uri": self.url,
                },
            },
        })
    }
}

impl FlexMessage for ImageCard {
    fn alt_text(&self) -> &str {
        &self.alt_text
    }

    fn message_contents(&self) -> Value {
        self.to_component()
    }
}
