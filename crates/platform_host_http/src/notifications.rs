//! Notification adapter surfacing transient messages in the browser console.
//!
//! The shell renders its own toast layer from the same effect; this adapter exists so failures
//! remain observable even when no toast surface is mounted.

use platform_host::{NotificationFuture, NotificationService};

#[derive(Debug, Clone, Copy, Default)]
/// Console-backed notification service.
pub struct ConsoleNotificationService;

impl NotificationService for ConsoleNotificationService {
    fn notify<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            web_sys::console::info_1(&format!("{title}: {body}").into());
            #[cfg(not(target_arch = "wasm32"))]
            let _ = (title, body);
            Ok(())
        })
    }
}
