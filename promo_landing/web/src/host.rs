//! Browser signals the carousel listens to: viewport width, resizes, and page visibility.
//!
//! Outside the browser there is no viewport; widths come back as `None` and
//! no listeners are attached.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    #[error("no window object available")]
    NoWindow,
    #[error("no document object available")]
    NoDocument,
    #[error("failed to attach '{event}' listener: {reason}")]
    Listener { event: &'static str, reason: String },
}

#[cfg(target_arch = "wasm32")]
mod imp {
    use super::HostError;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;
    use web_sys::EventTarget;

    /// An event listener that detaches itself when dropped.
    pub struct Listener {
        target: EventTarget,
        event: &'static str,
        closure: Closure<dyn FnMut()>,
    }

    impl Drop for Listener {
        fn drop(&mut self) {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
        }
    }

    fn listen(
        target: EventTarget,
        event: &'static str,
        callback: impl FnMut() + 'static,
    ) -> Result<Listener, HostError> {
        let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| HostError::Listener {
                event,
                reason: format!("{e:?}"),
            })?;
        Ok(Listener {
            target,
            event,
            closure,
        })
    }

    pub fn viewport_width() -> Option<f64> {
        web_sys::window()?.inner_width().ok()?.as_f64()
    }

    pub fn page_hidden() -> bool {
        web_sys::window()
            .and_then(|window| window.document())
            .is_some_and(|document| document.hidden())
    }

    pub fn on_resize(callback: impl FnMut() + 'static) -> Result<Listener, HostError> {
        let window = web_sys::window().ok_or(HostError::NoWindow)?;
        listen(window.into(), "resize", callback)
    }

    pub fn on_visibility_change(callback: impl FnMut() + 'static) -> Result<Listener, HostError> {
        let document = web_sys::window()
            .ok_or(HostError::NoWindow)?
            .document()
            .ok_or(HostError::NoDocument)?;
        listen(document.into(), "visibilitychange", callback)
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use super::HostError;

    pub struct Listener;

    pub fn viewport_width() -> Option<f64> {
        None
    }

    pub fn page_hidden() -> bool {
        false
    }

    pub fn on_resize(_callback: impl FnMut() + 'static) -> Result<Listener, HostError> {
        Err(HostError::NoWindow)
    }

    pub fn on_visibility_change(_callback: impl FnMut() + 'static) -> Result<Listener, HostError> {
        Err(HostError::NoWindow)
    }
}

pub use imp::{Listener, on_resize, on_visibility_change, page_hidden, viewport_width};
