//! Page composition: hero copy, theme tokens, and the card deck.
use crate::breakpoint::{BreakpointError, BreakpointPolicy, BreakpointRule};
use crate::card::CardRecord;
use crate::carousel::{CarouselController, CarouselOptions};
use tracing::info;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Copy shown above the carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeroContent {
    pub title: String,
    pub description: String,
    pub cta_label: String,
}

impl Default for HeroContent {
    fn default() -> Self {
        HeroContent {
            title: "MAKE YOUR SPEND, WELL-SPENT".to_string(),
            description: "Updating your wardrobe? Get cashback. When in Japan? Spend in Yen. \
                Big life goals? Reach them faster. However you spend — Revolut is all you need."
                .to_string(),
            cta_label: "Get started".to_string(),
        }
    }
}

/// Visual tokens consumed by the stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Theme {
    pub primary: String,
    pub secondary: String,
    pub font_family: String,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            primary: "#000000".to_string(),
            secondary: "#666666".to_string(),
            font_family: "Inter, sans-serif".to_string(),
        }
    }
}

impl Theme {
    /// Inline style declaring the tokens as CSS custom properties.
    pub fn css_variables(&self) -> String {
        format!(
            "--color-primary: {}; --color-secondary: {}; --font-sans: {};",
            self.primary, self.secondary, self.font_family
        )
    }
}

/// Fade-and-rise animation played once when an element mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entrance {
    pub from_offset_px: i32,
    pub duration_ms: u32,
}

/// Entrance played by the hero title.
pub const HERO_TITLE_ENTRANCE: Entrance = Entrance {
    from_offset_px: 20,
    duration_ms: 600,
};

/// Scale of the call-to-action while hovered.
pub const CTA_HOVER_SCALE: f32 = 1.05;
/// Scale of the call-to-action while pressed.
pub const CTA_PRESS_SCALE: f32 = 0.95;

/// Events the page hands to whoever embeds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    GetStartedClicked,
}

/// Receiver for [`PageEvent`]s, usually a router or analytics hook.
pub trait PageHook {
    fn on_event(&self, event: PageEvent);
}

/// Hook used when nothing is wired up: records the click and does nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHook;

impl PageHook for NoopHook {
    fn on_event(&self, event: PageEvent) {
        info!(?event, "page event has no handler");
    }
}

/// Everything needed to build the landing page.
#[derive(Debug, Clone, PartialEq)]
pub struct LandingPage {
    pub hero: HeroContent,
    pub theme: Theme,
    pub cards: Vec<CardRecord>,
    pub carousel: CarouselOptions,
    pub policy: BreakpointPolicy,
}

impl Default for LandingPage {
    fn default() -> Self {
        LandingPage {
            hero: HeroContent::default(),
            theme: Theme::default(),
            cards: default_cards(),
            carousel: CarouselOptions::default(),
            policy: BreakpointPolicy::default(),
        }
    }
}

impl LandingPage {
    /// Composes a page, validating the breakpoint table.
    pub fn compose(
        hero: HeroContent,
        theme: Theme,
        cards: Vec<CardRecord>,
        carousel: CarouselOptions,
        breakpoints: Vec<BreakpointRule>,
    ) -> Result<Self, BreakpointError> {
        let policy = BreakpointPolicy::new(breakpoints)?;
        Ok(LandingPage {
            hero,
            theme,
            cards,
            carousel,
            policy,
        })
    }

    /// A fresh controller for this page's deck, at index 0.
    pub fn controller(&self) -> CarouselController {
        CarouselController::new(self.cards.len(), self.carousel, self.policy.clone())
    }

    /// Forwards a call-to-action click to `hook`.
    pub fn get_started(&self, hook: &impl PageHook) {
        hook.on_event(PageEvent::GetStartedClicked);
    }
}

/// The three promotional cards shipped with the page.
pub fn default_cards() -> Vec<CardRecord> {
    vec![
        CardRecord::new("/assets/images/card1.jpg", "S$6,252", "Main"),
        CardRecord::new("/assets/images/card2.jpg", "$2,500", "United States · USD"),
        CardRecord::new("/assets/images/card3.jpg", "S$500", "Kiddo account"),
    ]
}
