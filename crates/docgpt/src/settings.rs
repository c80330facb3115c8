//! The client slot shared by model-backed functions.

use crate::{Error, Result};
use llm::{ChatBackend, OpenAiBackend, OpenAiConfig};
use std::sync::{Arc, LazyLock, OnceLock};
use tracing::debug;

type Factory<B> = Box<dyn Fn() -> llm::Result<B> + Send + Sync>;

static GLOBAL: LazyLock<Arc<Settings<OpenAiBackend>>> =
    LazyLock::new(|| Arc::new(Settings::new(OpenAiBackend::from_env)));

/// Holds at most one chat client, created on first use.
///
/// Functions built against the same settings share the client. A client
/// can be injected up front with [`Settings::with_client`] or
/// [`Settings::set_client`]; otherwise the factory runs the first time a
/// client is needed.
pub struct Settings<B> {
    client: OnceLock<B>,
    factory: Factory<B>,
}

impl<B: ChatBackend> Settings<B> {
    /// Create empty settings that build the client with `factory`.
    pub fn new(factory: impl Fn() -> llm::Result<B> + Send + Sync + 'static) -> Self {
        Self {
            client: OnceLock::new(),
            factory: Box::new(factory),
        }
    }

    /// Create settings holding an already configured client.
    pub fn with_client(client: B) -> Self {
        let settings = Self::new(|| Err(llm::Error::Config("client slot already filled".into())));
        let _ = settings.client.set(client);
        settings
    }

    /// Inject a client before first use.
    pub fn set_client(&self, client: B) -> Result<()> {
        self.client.set(client).map_err(|_| Error::ClientAlreadySet)
    }

    pub fn is_initialized(&self) -> bool {
        self.client.get().is_some()
    }

    /// Get the client, creating it on first use.
    ///
    /// Concurrent first callers may each run the factory; only one client
    /// is kept and the others are dropped.
    pub fn client(&self) -> llm::Result<&B> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let created = (self.factory)()?;
        debug!("chat client initialized");
        Ok(self.client.get_or_init(|| created))
    }
}

impl Settings<OpenAiBackend> {
    /// Process-wide settings whose client is read from `OPENAI_*`
    /// environment variables.
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL)
    }

    /// Settings that lazily build an OpenAI client from `config`.
    pub fn from_config(config: OpenAiConfig) -> Self {
        Self::new(move || OpenAiBackend::builder(config.clone()).build())
    }
}

impl<B> std::fmt::Debug for Settings<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("initialized", &self.client.get().is_some())
            .finish()
    }
}
