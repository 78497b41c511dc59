//! Viewport breakpoint policy: maps a viewport width to the carousel layout rule.
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How visual emphasis is spread across the visible slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Emphasis {
    /// Only the active slide is at full opacity.
    #[default]
    ActiveOnly,
    /// Every visible slide is at full opacity.
    AllVisible,
}

/// Layout rule applied when the viewport is at least `min_width` pixels wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BreakpointRule {
    pub min_width: u32,
    pub visible_count: usize,
    pub centered: bool,
    pub spacing: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub emphasis: Emphasis,
}

impl BreakpointRule {
    /// Single centered slide for phones.
    pub const NARROW: BreakpointRule = BreakpointRule {
        min_width: 0,
        visible_count: 1,
        centered: true,
        spacing: 20,
        emphasis: Emphasis::ActiveOnly,
    };

    /// Two left-aligned slides for tablets.
    pub const MEDIUM: BreakpointRule = BreakpointRule {
        min_width: 640,
        visible_count: 2,
        centered: false,
        spacing: 20,
        emphasis: Emphasis::ActiveOnly,
    };

    /// Three left-aligned slides for desktops.
    pub const WIDE: BreakpointRule = BreakpointRule {
        min_width: 1024,
        visible_count: 3,
        centered: false,
        spacing: 30,
        emphasis: Emphasis::AllVisible,
    };

    /// Whether slides other than the active one are dimmed under this rule.
    pub fn dims_inactive(&self) -> bool {
        matches!(self.emphasis, Emphasis::ActiveOnly)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BreakpointError {
    #[error("breakpoint table must contain at least one rule")]
    EmptyTable,
    #[error("breakpoint at {min_width}px must show at least one slide")]
    ZeroVisibleCount { min_width: u32 },
    #[error("more than one breakpoint starts at {min_width}px")]
    DuplicateMinWidth { min_width: u32 },
}

/// An ordered, validated table of breakpoint rules.
///
/// The table is never empty, so [`BreakpointPolicy::resolve`] is total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakpointPolicy {
    rules: Vec<BreakpointRule>,
}

impl Default for BreakpointPolicy {
    fn default() -> Self {
        BreakpointPolicy {
            rules: vec![
                BreakpointRule::NARROW,
                BreakpointRule::MEDIUM,
                BreakpointRule::WIDE,
            ],
        }
    }
}

impl BreakpointPolicy {
    /// Builds a policy from rules in any order.
    ///
    /// Returns an error when the table is empty, when a rule shows no slides,
    /// or when two rules share a minimum width.
    pub fn new(mut rules: Vec<BreakpointRule>) -> Result<Self, BreakpointError> {
        if rules.is_empty() {
            return Err(BreakpointError::EmptyTable);
        }

        if let Some(rule) = rules.iter().find(|rule| rule.visible_count == 0) {
            return Err(BreakpointError::ZeroVisibleCount {
                min_width: rule.min_width,
            });
        }

        rules.sort_by_key(|rule| rule.min_width);

        if let Some(pair) = rules.windows(2).find(|pair| pair[0].min_width == pair[1].min_width) {
            return Err(BreakpointError::DuplicateMinWidth {
                min_width: pair[0].min_width,
            });
        }

        Ok(BreakpointPolicy { rules })
    }

    /// Picks the rule with the largest `min_width` not above `width`.
    ///
    /// Widths below every threshold fall back to the narrowest rule.
    pub fn resolve(&self, width: u32) -> BreakpointRule {
        self.rules
            .iter()
            .rev()
            .find(|rule| rule.min_width <= width)
            .copied()
            .unwrap_or_else(|| self.narrowest())
    }

    /// Resolves a width reported by the host environment.
    ///
    /// Missing, non-finite, or non-positive widths resolve to the narrowest rule.
    pub fn resolve_reported(&self, width: Option<f64>) -> BreakpointRule {
        match width {
            Some(w) if w.is_finite() && w > 0.0 => {
                let clamped = w.min(u32::MAX as f64).floor() as u32;
                self.resolve(clamped)
            }
            _ => {
                tracing::debug!(?width, "viewport width unresolvable, using narrowest rule");
                self.narrowest()
            }
        }
    }

    /// The rule used when nothing else applies.
    pub fn narrowest(&self) -> BreakpointRule {
        self.rules[0]
    }

    pub fn rules(&self) -> &[BreakpointRule] {
        &self.rules
    }
}
