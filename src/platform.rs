//! Host primitives that command actions drive
//!
//! The engine never performs side effects itself. Actions call into a
//! [`Platform`], and every call is fire-and-forget from the engine's point of
//! view: a failure comes back as a [`PlatformError`] to be logged.

/// Side-effect primitives provided by the host
pub trait Platform {
    /// Full-page transition to `path`
    fn navigate(&mut self, path: &str) -> Result<(), PlatformError>;

    /// Open `url` in a new browsing context
    fn open_external(&mut self, url: &str) -> Result<(), PlatformError>;

    /// Write `text` to the system clipboard
    fn write_text(&mut self, text: &str) -> Result<(), PlatformError>;

    /// The location currently displayed, used by "copy link"
    fn current_location(&self) -> String;
}

/// A host primitive that did not complete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    Clipboard(String),
    Open(String),
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformError::Clipboard(e) => write!(f, "Clipboard write failed: {}", e),
            PlatformError::Open(e) => write!(f, "Open failed: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}

/// Desktop host: opens pages in the default browser and writes the real clipboard
#[derive(Debug, Clone)]
pub struct SystemPlatform {
    site_url: String,
    location: String,
}

impl SystemPlatform {
    /// Create a platform rooted at `site_url`; navigation paths resolve against it
    pub fn new(site_url: &str) -> Self {
        let site_url = site_url.trim_end_matches('/').to_string();
        let location = format!("{}/", site_url);
        Self { site_url, location }
    }

    /// Resolve a site-relative path to an absolute URL
    pub fn resolve(&self, path: &str) -> String {
        if path.contains("://") {
            return path.to_string();
        }
        format!("{}/{}", self.site_url, path.trim_start_matches('/'))
    }
}

impl Platform for SystemPlatform {
    fn navigate(&mut self, path: &str) -> Result<(), PlatformError> {
        let url = self.resolve(path);
        tracing::debug!("Navigating to {}", url);
        open::that(&url).map_err(|e| PlatformError::Open(format!("{}: {}", url, e)))?;
        self.location = url;
        Ok(())
    }

    fn open_external(&mut self, url: &str) -> Result<(), PlatformError> {
        tracing::debug!("Opening external {}", url);
        open::that(url).map_err(|e| PlatformError::Open(format!("{}: {}", url, e)))
    }

    fn write_text(&mut self, text: &str) -> Result<(), PlatformError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| PlatformError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| PlatformError::Clipboard(e.to_string()))
    }

    fn current_location(&self) -> String {
        self.location.clone()
    }
}

/// A side effect recorded instead of performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Navigate(String),
    OpenExternal(String),
    WriteText(String),
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::Navigate(path) => write!(f, "navigate {}", path),
            Effect::OpenExternal(url) => write!(f, "open {}", url),
            Effect::WriteText(text) => write!(f, "copy {:?}", text),
        }
    }
}

/// Platform that records effects without touching the system
#[derive(Debug, Clone, Default)]
pub struct DryRunPlatform {
    location: String,
    effects: Vec<Effect>,
}

impl DryRunPlatform {
    pub fn new(location: &str) -> Self {
        Self {
            location: location.to_string(),
            effects: Vec::new(),
        }
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Drain recorded effects
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }
}

impl Platform for DryRunPlatform {
    fn navigate(&mut self, path: &str) -> Result<(), PlatformError> {
        tracing::info!("[dry-run] navigate {}", path);
        self.location = path.to_string();
        self.effects.push(Effect::Navigate(path.to_string()));
        Ok(())
    }

    fn open_external(&mut self, url: &str) -> Result<(), PlatformError> {
        tracing::info!("[dry-run] open {}", url);
        self.effects.push(Effect::OpenExternal(url.to_string()));
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<(), PlatformError> {
        tracing::info!("[dry-run] copy {:?}", text);
        self.effects.push(Effect::WriteText(text.to_string()));
        Ok(())
    }

    fn current_location(&self) -> String {
        self.location.clone()
    }
}
