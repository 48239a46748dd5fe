//! `PushChannel` implementation over a server-sent-event stream.

use platform_host::{PushChannel, PushHandler};

#[derive(Debug, Clone)]
/// EventSource-backed push channel.
///
/// Each `subscribe` call opens a fresh stream and replaces the previous handler, matching the
/// channel contract. Events arrive as JSON-encoded [`platform_host::FsEvent`] payloads; frames
/// that fail to decode are dropped with a console warning rather than tearing the stream down.
pub struct EventSourcePushChannel {
    url: String,
}

impl EventSourcePushChannel {
    /// Creates a channel for the stream at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl PushChannel for EventSourcePushChannel {
    fn subscribe(&self, handler: PushHandler) {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::{closure::Closure, JsCast};

            let Ok(source) = web_sys::EventSource::new(&self.url) else {
                web_sys::console::warn_1(&format!("push channel unavailable: {}", self.url).into());
                return;
            };
            let on_message = Closure::<dyn Fn(web_sys::MessageEvent)>::new(
                move |event: web_sys::MessageEvent| {
                    let Some(raw) = event.data().as_string() else {
                        return;
                    };
                    match serde_json::from_str::<platform_host::FsEvent>(&raw) {
                        Ok(fs_event) => handler(fs_event),
                        Err(err) => {
                            web_sys::console::warn_1(
                                &format!("push event decode failed: {err}").into(),
                            );
                        }
                    }
                },
            );
            source.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
            // The stream lives for the page lifetime; leak the closure alongside it.
            on_message.forget();
            std::mem::forget(source);
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = handler;
    }
}
