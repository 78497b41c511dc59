use dioxus::prelude::*;
use promo_landing_core::page::{CTA_HOVER_SCALE, CTA_PRESS_SCALE, HERO_TITLE_ENTRANCE};
use promo_landing_core::HeroContent;

#[component]
pub fn Hero(content: HeroContent, on_get_started: EventHandler<()>) -> Element {
    let mut entered = use_signal(|| false);

    let (opacity, offset) = if entered() {
        (1, 0)
    } else {
        (0, HERO_TITLE_ENTRANCE.from_offset_px)
    };
    let duration = HERO_TITLE_ENTRANCE.duration_ms;

    rsx! {
        section { class: "hero",
            h1 {
                class: "hero__title",
                style: "opacity: {opacity}; transform: translateY({offset}px); transition: opacity {duration}ms ease-out, transform {duration}ms ease-out;",
                onmounted: move |_| entered.set(true),
                "{content.title}"
            }
            p { class: "hero__description", "{content.description}" }
            CtaButton { label: content.cta_label.clone(), on_click: on_get_started }
        }
    }
}

/// Call-to-action button that grows on hover and shrinks while pressed
#[component]
fn CtaButton(label: String, on_click: EventHandler<()>) -> Element {
    let mut hovered = use_signal(|| false);
    let mut pressed = use_signal(|| false);

    let scale = if pressed() {
        CTA_PRESS_SCALE
    } else if hovered() {
        CTA_HOVER_SCALE
    } else {
        1.0
    };

    rsx! {
        button {
            class: "hero__cta",
            r#type: "button",
            style: "transform: scale({scale});",
            onmouseenter: move |_| hovered.set(true),
            onmouseleave: move |_| {
                hovered.set(false);
                pressed.set(false);
            },
            onmousedown: move |_| pressed.set(true),
            onmouseup: move |_| pressed.set(false),
            onclick: move |_| on_click.call(()),
            "{label}"
        }
    }
}
