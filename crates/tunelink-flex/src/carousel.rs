// SPDX-FileCopyrightText: 2026 Tunelink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Horizontally-scrollable carousel of bubble-like children.

use serde_json::{Value, json};

use tunelink_core::TunelinkError;

use crate::{FlexComponent, FlexMessage};

/// Hard child-count limit imposed by the rendering format.
pub const MAX_CAROUSEL_ITEMS: usize = 10;

/// An ordered collection of independently renderable children.
///
/// Children are held as [`FlexComponent`] trait objects so bubbles and
/// image cards can mix freely; `Carousel` itself does not implement
/// `FlexComponent`, which rules out carousel-in-carousel at compile time.
pub struct Carousel {
    alt_text: String,
    items: Vec<Box<dyn FlexComponent>>,
}

impl std::fmt::Debug for Carousel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("alt_text", &self.alt_text)
            .field("items", &self.items.len())
            .finish()
    }
}

impl Carousel {
    /// Builds a carousel. Errors with [`TunelinkError::CarouselOverflow`]
    /// when given more than [`MAX_CAROUSEL_ITEMS`] children — callers are
    /// expected to truncate upstream, so hitting this is a programming
    /// error, not a data condition.
    pub fn new(
        alt_text: impl Into<String>,
        items: Vec<Box<dyn FlexComponent>>,
    ) -> Result<Self, TunelinkError> {
        if items.len() > MAX_CAROUSEL_ITEMS {
            return Err(TunelinkError::CarouselOverflow {
                count: items.len(),
                max: MAX_CAROUSEL_ITEMS,
            });
        }
        Ok(Self {
            alt_text: alt_text.into(),
            items,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FlexMessage for Carousel {
    fn alt_text(&self) -> &str {
        &self.alt_text
    }

    /// Concatenates the children's component forms; children never
    /// self-wrap with the top-level envelope, only the root call does.
    fn message_contents(&self) -> Value {
        let children: Vec<Value> = self.items.iter().map(|i| i.to_component()).collect();
        json!({
            "type": "carousel",
            "contents": children,
        })
    }
}
