//! Market context: the page state signal and the dispatcher that writes it.

use std::future::Future;
use std::rc::Rc;

use api::HttpBackend;
use dioxus::prelude::*;
use market::{AppState, Command, Dispatcher, MarketConfig, MarketResult, Redirect, StateCell};

use crate::BrowserPrompt;

type PageDispatcher = Dispatcher<HttpBackend, BrowserPrompt>;

/// Copyable handle to the page state and the dispatcher behind it.
#[derive(Clone, Copy)]
pub struct Market {
    state: Signal<AppState>,
    dispatcher: CopyValue<Option<Rc<PageDispatcher>>>,
}

impl Market {
    pub fn state(&self) -> Signal<AppState> {
        self.state
    }

    /// Per-image ceiling of the write form, checked before a file is read.
    pub fn max_image_bytes(&self) -> Option<u64> {
        self.dispatcher
            .read()
            .as_ref()
            .map(|d| d.config().upload.max_image_bytes)
    }

    /// Run `command` as its own task. Follows the redirect it may ask for.
    pub fn send(&self, command: Command) {
        let Some(dispatcher) = self.dispatcher.cloned() else {
            tracing::error!("no backend configured, command dropped");
            return;
        };
        let mut cell = SignalCell(self.state);
        run_detached(async move {
            if let Some(redirect) = dispatcher.dispatch(&mut cell, command).await {
                follow(redirect);
            }
        });
    }
}

/// Spawn on the root scope. Commands are often sent from a modal body that
/// the command itself unmounts, and the task must outlive it.
fn run_detached(task: impl Future<Output = ()> + 'static) {
    if spawn_forever(task).is_none() {
        tracing::error!("no runtime to run the command on");
    }
}

/// [`StateCell`] over the page signal. Borrows last only as long as the closure.
struct SignalCell(Signal<AppState>);

impl StateCell for SignalCell {
    fn read_state<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.0.read())
    }

    fn write_state<R>(&mut self, f: impl FnOnce(&mut AppState) -> R) -> R {
        f(&mut self.0.write())
    }
}

fn follow(redirect: Redirect) {
    tracing::info!(path = redirect.path(), "redirect");
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(redirect.path());
        }
    }
}

/// The API lives on the origin that served the page.
fn page_dispatcher() -> MarketResult<PageDispatcher> {
    #[cfg(target_arch = "wasm32")]
    let (config, backend) = {
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default();
        let config = MarketConfig::new(origin);
        let backend = HttpBackend::from_config(&config)?;
        (config, backend)
    };
    #[cfg(not(target_arch = "wasm32"))]
    let (config, backend) = {
        let config = MarketConfig::load(MarketConfig::filename());
        let backend = HttpBackend::from_env(&config)?;
        (config, backend)
    };

    Ok(Dispatcher::new(backend, BrowserPrompt, config))
}

/// Get the market handle provided by [`MarketProvider`].
pub fn use_market() -> Market {
    use_context::<Market>()
}

/// Provider component that owns the page state.
/// Wrap every page with this component.
#[component]
pub fn MarketProvider(children: Element) -> Element {
    let state = use_signal(AppState::default);
    let dispatcher = use_hook(|| {
        let dispatcher = match page_dispatcher() {
            Ok(dispatcher) => Some(Rc::new(dispatcher)),
            Err(e) => {
                tracing::error!(error = %e, "failed to build the HTTP client");
                None
            }
        };
        CopyValue::new(dispatcher)
    });

    use_context_provider(|| Market { state, dispatcher });

    rsx! {
        {children}
    }
}
