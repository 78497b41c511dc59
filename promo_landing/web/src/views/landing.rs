use crate::components::{Carousel, Hero};
use crate::config::LandingConfig;
use dioxus::prelude::*;
use promo_landing_core::{LandingPage, NoopHook, PageEvent, PageHook};
use std::rc::Rc;

/// Receives page events when provided as context by an embedding app.
///
/// Without one, the call-to-action only logs the click.
#[derive(Clone, Copy)]
pub struct PageEventHandler(pub EventHandler<PageEvent>);

struct ContextHook(Option<PageEventHandler>);

impl PageHook for ContextHook {
    fn on_event(&self, event: PageEvent) {
        match self.0 {
            Some(PageEventHandler(handler)) => handler.call(event),
            None => NoopHook.on_event(event),
        }
    }
}

/// The landing page: hero block on top, card carousel below
#[component]
pub fn Landing() -> Element {
    let page = use_hook(|| Rc::new(LandingConfig::load()));
    let handler = try_use_context::<PageEventHandler>();

    let on_get_started = {
        let page: Rc<LandingPage> = page.clone();
        move |_: ()| page.get_started(&ContextHook(handler))
    };
    let theme = page.theme.css_variables();

    rsx! {
        main { class: "landing", style: "{theme}",
            Hero { content: page.hero.clone(), on_get_started }
            Carousel {
                cards: page.cards.clone(),
                options: page.carousel,
                policy: page.policy.clone(),
            }
        }
    }
}
