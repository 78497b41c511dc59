//! Card carousel wired to the browser: timers, pointer input, resizes, and visibility.
use crate::components::PromoCard;
use crate::host;
use dioxus::prelude::*;
use futures::StreamExt;
use gloo_timers::future::TimeoutFuture;
use promo_landing_core::{
    BreakpointPolicy, CardRecord, CarouselController, CarouselEvent, CarouselOptions, Dot,
    TimerCommand,
};
use std::rc::Rc;
use tracing::{debug, warn};

/// Carries out what the controller asks for after each event.
///
/// All events funnel through [`Driver::dispatch`], which runs one event to
/// completion before the next one is looked at.
#[derive(Clone, Copy)]
struct Driver {
    controller: Signal<CarouselController>,
    autoplay: Signal<Option<Task>>,
}

impl Driver {
    fn dispatch(mut self, event: CarouselEvent) {
        let result = self.controller.write().handle(event);
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Ignoring carousel event {event:?}: {e}");
                return;
            }
        };

        if outcome.moved {
            let (id, transition_ms) = {
                let controller = self.controller.peek();
                (controller.transition_id(), controller.options().transition_ms)
            };
            spawn(async move {
                TimeoutFuture::new(transition_ms).await;
                self.dispatch(CarouselEvent::TransitionEnd { id });
            });
        }

        match outcome.timer {
            Some(TimerCommand::Start { interval_ms }) => self.start_autoplay(interval_ms),
            Some(TimerCommand::Cancel) => self.stop_autoplay(),
            None => {}
        }
    }

    fn start_autoplay(mut self, interval_ms: u32) {
        self.stop_autoplay();
        let task = spawn(async move {
            loop {
                TimeoutFuture::new(interval_ms).await;
                self.dispatch(CarouselEvent::Tick);
            }
        });
        self.autoplay.set(Some(task));
    }

    fn stop_autoplay(mut self) {
        if let Some(task) = self.autoplay.take() {
            task.cancel();
        }
    }
}

/// Responsive, autoplaying carousel of promotional cards
#[component]
pub fn Carousel(cards: Vec<CardRecord>, options: CarouselOptions, policy: BreakpointPolicy) -> Element {
    let controller = use_signal(|| {
        let mut controller = CarouselController::new(cards.len(), options, policy.clone());
        let _ = controller.handle(CarouselEvent::Resize {
            width: host::viewport_width(),
        });
        if host::page_hidden() {
            let _ = controller.handle(CarouselEvent::Pause);
        }
        controller
    });
    let autoplay = use_signal(|| None::<Task>);
    let driver = Driver {
        controller,
        autoplay,
    };

    // Browser callbacks run outside the component; they queue events here.
    let host_events = use_coroutine(move |mut rx: UnboundedReceiver<CarouselEvent>| async move {
        while let Some(event) = rx.next().await {
            driver.dispatch(event);
        }
    });

    let _listeners = use_hook(move || {
        let tx = host_events.tx();
        let resize = host::on_resize({
            let tx = tx.clone();
            move || {
                let _ = tx.unbounded_send(CarouselEvent::Resize {
                    width: host::viewport_width(),
                });
            }
        });
        let visibility = host::on_visibility_change(move || {
            let event = if host::page_hidden() {
                CarouselEvent::Pause
            } else {
                CarouselEvent::Resume
            };
            let _ = tx.unbounded_send(event);
        });

        let listeners: Vec<host::Listener> = [resize, visibility]
            .into_iter()
            .filter_map(|listener| {
                listener
                    .inspect_err(|e| debug!("Carousel runs without host listener: {e}"))
                    .ok()
            })
            .collect();

        if let Some(TimerCommand::Start { interval_ms }) = controller.peek().mount() {
            driver.start_autoplay(interval_ms);
        }

        Rc::new(listeners)
    });

    use_drop(move || {
        debug!("Carousel unmounted, stopping autoplay");
        driver.stop_autoplay();
    });

    let tree = controller.read().view(&cards);
    let track = tree.track;
    let slide_width = track.slide_width_css();
    let max_width = track
        .slide_max_width_px()
        .map(|px| format!("max-width: {px}px;"))
        .unwrap_or_default();
    let justify = if track.centered { "center" } else { "flex-start" };

    rsx! {
        section { class: "cards-section",
            div {
                class: "carousel",
                onpointerdown: move |evt: PointerEvent| {
                    let x = evt.client_coordinates().x as i32;
                    driver.dispatch(CarouselEvent::PointerDown { x });
                },
                onpointerup: move |evt: PointerEvent| {
                    let x = evt.client_coordinates().x as i32;
                    driver.dispatch(CarouselEvent::PointerUp { x });
                },
                onpointerleave: move |evt: PointerEvent| {
                    let x = evt.client_coordinates().x as i32;
                    driver.dispatch(CarouselEvent::PointerLeave { x });
                },
                onpointercancel: move |_| driver.dispatch(CarouselEvent::PointerCancel),

                div {
                    class: "carousel__track",
                    style: "gap: {track.spacing}px; justify-content: {justify};",
                    for slide in tree.slides {
                        div {
                            key: "{slide.card_index}",
                            class: if slide.active { "carousel__slide carousel__slide--active" } else { "carousel__slide" },
                            style: "width: {slide_width}; {max_width} opacity: {slide.opacity};",
                            PromoCard { face: slide.face }
                        }
                    }
                }
            }

            if let Some(dots) = tree.pagination {
                Pagination {
                    dots,
                    on_select: move |index| driver.dispatch(CarouselEvent::DotClicked(index)),
                }
            }
        }
    }
}

/// One dot per card; the active card's dot is highlighted
#[component]
fn Pagination(dots: Vec<Dot>, on_select: EventHandler<usize>) -> Element {
    rsx! {
        div { class: "carousel__pagination",
            for dot in dots {
                button {
                    key: "{dot.index}",
                    r#type: "button",
                    class: if dot.active { "carousel__dot carousel__dot--active" } else { "carousel__dot" },
                    aria_label: format!("Go to slide {}", dot.index + 1),
                    onclick: move |_| on_select.call(dot.index),
                }
            }
        }
    }
}
