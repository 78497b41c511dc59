use anyhow::Context;
use promo_landing_core::{
    BreakpointPolicy, BreakpointRule, CardRecord, CarouselOptions, HeroContent, LandingPage, Theme,
    page::default_cards,
};
use serde::Deserialize;
use tracing::{instrument, warn};

/// Page configuration baked into the binary at build time.
const EMBEDDED_CONFIG: &str = include_str!("../landing.toml");

/// Landing page configuration as written in `landing.toml`.
///
/// Every section is optional; anything left out takes the built-in default.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LandingConfig {
    pub hero: HeroContent,
    pub theme: Theme,
    pub cards: Vec<CardRecord>,
    pub carousel: CarouselOptions,
    pub breakpoints: Vec<BreakpointRule>,
}

impl Default for LandingConfig {
    fn default() -> Self {
        LandingConfig {
            hero: HeroContent::default(),
            theme: Theme::default(),
            cards: default_cards(),
            carousel: CarouselOptions::default(),
            breakpoints: BreakpointPolicy::default().rules().to_vec(),
        }
    }
}

impl LandingConfig {
    /// Parse configuration from a TOML document
    #[instrument(skip(source))]
    pub fn from_toml(source: &str) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .context("landing configuration is not valid TOML")?;

        settings
            .try_deserialize()
            .context("landing configuration has an unexpected shape")
    }

    /// Validate the breakpoint table and assemble the page
    pub fn into_page(self) -> anyhow::Result<LandingPage> {
        LandingPage::compose(
            self.hero,
            self.theme,
            self.cards,
            self.carousel,
            self.breakpoints,
        )
        .context("landing configuration has an invalid breakpoint table")
    }

    /// Load the embedded configuration, falling back to the built-in page on any error
    pub fn load() -> LandingPage {
        match Self::from_toml(EMBEDDED_CONFIG).and_then(Self::into_page) {
            Ok(page) => page,
            Err(e) => {
                warn!("Using default landing page: {e:#}");
                LandingPage::default()
            }
        }
    }
}
