//! Responsive card-display engine for the promo landing page.
//!
//! Everything here is free of any UI framework: the web crate feeds events in
//! and draws the [`VisualTree`] that comes out.
pub mod breakpoint;
pub mod card;
pub mod carousel;
pub mod page;
pub mod render;

pub use breakpoint::{BreakpointError, BreakpointPolicy, BreakpointRule, Emphasis};
pub use card::{AnimatableSurface, CardFace, CardImage, CardItem, CardRecord};
pub use carousel::{
    CarouselController, CarouselError, CarouselEvent, CarouselOptions, CarouselState, Outcome,
    Phase, TimerCommand,
};
pub use page::{HeroContent, LandingPage, NoopHook, PageEvent, PageHook, Theme};
pub use render::{Dot, SlideView, TrackLayout, VisualTree, render};
