use dioxus::prelude::*;
use promo_landing_core::card::HOVER_TRANSITION_MS;
use promo_landing_core::{AnimatableSurface, CardFace, CardImage, CardItem};

/// Current vertical offset of a card overlay and how fast it gets there.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Lift {
    offset_px: i32,
    duration_ms: u32,
}

/// Writes overlay transforms into a signal the overlay style reads from.
struct OverlaySurface(Signal<Lift>);

impl AnimatableSurface for OverlaySurface {
    fn apply_transform(&mut self, offset_px: i32, duration_ms: u32) {
        self.0.set(Lift {
            offset_px,
            duration_ms,
        });
    }
}

/// A promotional card: full-bleed image with the amount and tag on a gradient overlay
#[component]
pub fn PromoCard(face: CardFace) -> Element {
    let mut item = use_signal(CardItem::new);
    let lift = use_signal(Lift::default);
    let mut broken = use_signal(|| false);

    let mut hover_start = move || item.write().hover_start(&mut OverlaySurface(lift));
    let mut hover_end = move || item.write().hover_end(&mut OverlaySurface(lift));

    let Lift {
        offset_px,
        duration_ms,
    } = lift();
    let scale = item.read().scale();

    let image = match &face.image {
        CardImage::Source(src) if !broken() => rsx! {
            img {
                class: "promo-card__image",
                src: "{src}",
                alt: "{face.alt}",
                draggable: false,
                onerror: move |_| broken.set(true),
            }
        },
        _ => rsx! {
            div {
                class: "promo-card__image promo-card__image--placeholder",
                role: "img",
                aria_label: "{face.alt}",
            }
        },
    };

    rsx! {
        div {
            class: "promo-card",
            tabindex: 0,
            style: "transform: scale({scale}); transition: transform {HOVER_TRANSITION_MS}ms ease;",
            onmouseenter: move |_| hover_start(),
            onmouseleave: move |_| hover_end(),
            onfocusin: move |_| hover_start(),
            onfocusout: move |_| hover_end(),

            {image}

            div {
                class: "promo-card__content",
                style: "transform: translateY({offset_px}px); transition: transform {duration_ms}ms ease;",
                p { class: "promo-card__amount", "{face.amount}" }
                span { class: "promo-card__tag", "{face.tag}" }
            }
        }
    }
}
