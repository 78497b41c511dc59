use dioxus::prelude::*;

#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = route.join("/");

    rsx! {
        div { class: "not-found",
            h1 { class: "not-found__code", "404" }
            p { class: "not-found__message", "Nothing lives at /{path}." }
            Link { to: "/", class: "hero__cta", "Back to the landing page" }
        }
    }
}
