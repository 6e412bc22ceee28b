use market::Prompt;

/// `window.alert` / `window.confirm`. Off the web, alerts go to the log and
/// every confirmation is declined.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserPrompt;

impl Prompt for BrowserPrompt {
    fn alert(&self, message: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(message);
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        tracing::info!(%message, "alert");
    }

    fn confirm(&self, message: &str) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::window()
                .and_then(|w| w.confirm_with_message(message).ok())
                .unwrap_or(false)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            tracing::warn!(%message, "no dialog available, declining");
            false
        }
    }
}
