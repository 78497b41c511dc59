//! Promotional cards and their hover behaviour.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Upward shift applied to a card's overlay while hovered, in pixels.
pub const HOVER_SHIFT_PX: i32 = -10;
/// Duration of the hover shift transition.
pub const HOVER_TRANSITION_MS: u32 = 300;
/// Scale applied to the whole card while hovered.
pub const HOVER_SCALE: f32 = 1.02;

/// One promotional unit shown in the carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CardRecord {
    /// Opaque image reference (URL or asset path). `None` renders a placeholder.
    #[cfg_attr(feature = "serde", serde(default))]
    pub image: Option<String>,
    pub amount: String,
    pub tag: String,
}

impl CardRecord {
    pub fn new(image: impl Into<String>, amount: impl Into<String>, tag: impl Into<String>) -> Self {
        CardRecord {
            image: Some(image.into()),
            amount: amount.into(),
            tag: tag.into(),
        }
    }

    /// Projects the record into what the renderer draws.
    pub fn face(&self) -> CardFace {
        let image = match self.image.as_deref().map(str::trim) {
            Some(src) if !src.is_empty() => CardImage::Source(src.to_string()),
            _ => CardImage::Placeholder,
        };

        CardFace {
            image,
            alt: self.tag.clone(),
            amount: self.amount.clone(),
            tag: self.tag.clone(),
        }
    }
}

/// Background of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardImage {
    Source(String),
    Placeholder,
}

/// Render-ready content of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFace {
    pub image: CardImage,
    pub alt: String,
    pub amount: String,
    pub tag: String,
}

/// Capability of a rendering layer to animate an element vertically.
#[cfg_attr(test, mockall::automock)]
pub trait AnimatableSurface {
    /// Moves the element to `offset_px` along the y axis over `duration_ms`.
    fn apply_transform(&mut self, offset_px: i32, duration_ms: u32);
}

/// Hover/focus state of a single card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardItem {
    hovered: bool,
}

impl CardItem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Lifts the overlay. Does nothing if the card is already hovered.
    pub fn hover_start(&mut self, surface: &mut impl AnimatableSurface) {
        if self.hovered {
            return;
        }
        self.hovered = true;
        surface.apply_transform(HOVER_SHIFT_PX, HOVER_TRANSITION_MS);
    }

    /// Returns the overlay to rest. Does nothing if the card is not hovered.
    pub fn hover_end(&mut self, surface: &mut impl AnimatableSurface) {
        if !self.hovered {
            return;
        }
        self.hovered = false;
        surface.apply_transform(0, HOVER_TRANSITION_MS);
    }

    /// Scale of the whole card in its current state.
    pub fn scale(&self) -> f32 {
        if self.hovered { HOVER_SCALE } else { 1.0 }
    }
}
