use crate::error::{AppError, Result};
use tracing::debug;

/// Something that can show a URL to the operator
pub trait Launcher {
    /// Open `url`; `label` names the tool (or "runbook") for error context.
    fn open(&self, label: &str, url: &str) -> Result<()>;
}

impl<L: Launcher + ?Sized> Launcher for &L {
    fn open(&self, label: &str, url: &str) -> Result<()> {
        (**self).open(label, url)
    }
}

impl<L: Launcher + ?Sized> Launcher for Box<L> {
    fn open(&self, label: &str, url: &str) -> Result<()> {
        (**self).open(label, url)
    }
}

/// Opens URLs in the system default browser
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserLauncher;

impl Launcher for BrowserLauncher {
    fn open(&self, label: &str, url: &str) -> Result<()> {
        debug!(label, url, "Opening in browser");
        webbrowser::open(url).map_err(|source| AppError::Launch {
            label: label.to_string(),
            url: url.to_string(),
            source,
        })
    }
}

/// Leaves the browser alone; the caller already prints each URL
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintLauncher;

impl Launcher for PrintLauncher {
    fn open(&self, label: &str, url: &str) -> Result<()> {
        debug!(label, url, "Dry run, not opening");
        Ok(())
    }
}
