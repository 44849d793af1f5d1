//! Detached task spawning for both targets.

use std::future::Future;

/// Run a future that must not be tied to the calling component (analytics,
/// timers whose owner may unmount first).
pub fn spawn_future<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(future);
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        if dioxus::prelude::spawn_forever(future).is_none() {
            tracing::warn!("no dioxus runtime; background task dropped");
        }
    }
}
