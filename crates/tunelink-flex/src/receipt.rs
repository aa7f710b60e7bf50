// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Receipt-style bubble: a header block over an ordered list of line items.

use serde_json::{Value, json};

use crate::{FlexComponent, FlexMessage};

/// One line item: thumbnail, two-line text, trailing label, tap action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptItem {
    /// First text line (e.g. track name).
    pub header: String,
    /// Second text line (e.g. artists).
    pub text: String,
    /// Right-aligned trailing label (e.g. "3:45").
    pub trailing: String,
    /// Thumbnail URL; empty string renders an imageless slot rather than
    /// failing the whole receipt.
    pub image_url: String,
    /// Tap-through URL.
    pub url: String,
}

impl ReceiptItem {
    fn to_component(&self) -> Value {
        let image = json!({
            "type": "image",
            "url": self.image_url,
            "size": "50px",
            "align": "start",
            "aspectRatio": "1:1",
        });
        let header = json!({
            "type": "text",
            "text": self.header,
            "color": "#373C41",
            "size": "sm",
            "weight": "bold",
            "align": "start",
        });
        let trailing = json!({
            "type": "text",
            "text": self.trailing,
            "color": "#969696",
            "size": "xxs",
            "align": "end",
        });
        let text = json!({
            "type": "text",
            "text": self.text,
            "color": "#969696",
            "size": "xxs",
        });
        json!({
            "type": "box",
            "layout": "horizontal",
            "contents": [
                image,
                {
                    "type": "box",
                    "layout": "vertical",
                    "contents": [
                        {
                            "type": "box",
                            "layout": "baseline",
                            "contents": [header, trailing],
                            "width": "200px",
                        },
                        text,
                    ],
                    "position": "absolute",
                    "offsetStart": "60px",
                    "offsetTop": "5px",
                },
            ],
            "action": {
                "type": "uri",
                "label": "action",
                "uri": self.url,
            },
            "paddingBottom": "10px",
        })
    }
}

/// A bubble styled as an itemized receipt: accent line, large header,
/// description, separator, then the line items.
///
/// Used for the top-tracks reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptBubble {
    alt_text: String,
    top_text: String,
    header: String,
    text: String,
    items: Vec<ReceiptItem>,
}

impl ReceiptBubble {
    pub fn new(
        alt_text: impl Into<String>,
        top_text: impl Into<String>,
        header: impl Into<String>,
        text: impl Into<String>,
        items: Vec<ReceiptItem>,
    ) -> Self {
        Self {
            alt_text: alt_text.into(),
            top_text: top_text.into(),
            header: header.into(),
            text: text.into(),
            items,
        }
    }

    pub fn items(&self) -> &[ReceiptItem] {
        &self.items
    }
}

impl FlexComponent for ReceiptBubble {
    fn to_component(&self) -> Value {
        let rows: Vec<Value> = self.items.iter().map(ReceiptItem::to_component).collect();
        json!({
            "type": "bubble",
            "body": {
                "type": "box",
                "layout": "vertical",
                "contents": [
                    {
                        "type": "text",
                        "text": self.top_text,
                        "weight": "bold",
                        "color": "#2FA6E9",
                        "size": "sm",
                    },
                    {
                        "type": "text",
                        "text": self.header,
                        "weight": "bold",
                        "size": "xxl",
                        "margin": "md",
                        "color": "#373C41",
                    },
                    {
                        "type": "text",
                        "text": self.text,
                        "size": "xs",
                        "color": "#969696",
                        "wrap": true,
                        "offsetTop": "5px",
                    },
                    {
                        "type": "separator",
                        "margin": "xxl",
                    },
                    {
                        "type": "box",
                        "layout": "vertical",
                        "margin": "xxl",
                        "spacing": "sm",
                        "contents": rows,
                    },
                ],
            },
        })
    }
}

impl FlexMessage for ReceiptBubble {
    fn alt_text(&self) -> &str {
        &self.alt_text
    }

    fn message_contents(&self) -> Value {
        self.to_component()
    }
}
