// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed flex-message document builders.
//!
//! A flex message is a recursively nestable visual document: a card
//! ("bubble"), a receipt-style itemized card, a plain image card, or a
//! horizontally-scrollable carousel of cards. Every builder produces a
//! `serde_json::Value` tree serialized once by serde — user-controlled text
//! (track names, playlist descriptions) never lands in a string template.
//!
//! The central structural invariant is the component/message asymmetry:
//! [`FlexComponent::to_component`] renders the unwrapped fragment used for
//! nesting, while [`FlexMessage::to_message`] wraps the fragment with the
//! alt text and the top-level `"flex"` type tag. Only the root of a
//! document is wrapped; carousel children are concatenated in component
//! form. [`Carousel`] deliberately does not implement [`FlexComponent`],
//! so a carousel can never nest inside another.

pub mod bubble;
pub mod card;
pub mod carousel;
pub mod receipt;

pub use bubble::ButtonBubble;
pub use card::ImageCard;
pub use carousel::{Carousel, MAX_CAROUSEL_ITEMS};
pub use receipt::{ReceiptBubble, ReceiptItem};

use serde_json::{Value, json};

/// A nestable document fragment.
///
/// Implementors render themselves WITHOUT the top-level envelope; this is
/// the form a [`Carousel`] concatenates.
pub trait FlexComponent: Send + Sync {
    /// Renders the unwrapped fragment.
    fn to_component(&self) -> Value;
}

/// A complete, sendable message document.
pub trait FlexMessage {
    /// Fallback text shown by clients that cannot render flex documents.
    fn alt_text(&self) -> &str;

    /// The document placed under the envelope's `contents` key.
    fn message_contents(&self) -> Value;

    /// Wraps the contents with the alt text and the top-level type tag.
    /// Only the root call of a document uses this form.
    fn to_message(&self) -> Value {
        json!({
            "type": "flex",
            "altText": self.alt_text(),
            "contents": self.message_contents(),
        })
    }
}
