// Hands URLs and files to the desktop: the default mail client for
// `mailto:`, the browser for web links, the PDF viewer for the résumé.

use crate::error::ActionError;

pub trait UrlOpener {
    /// Ask the host to open `target` with its default application.
    fn open(&self, target: &str) -> Result<(), ActionError>;
}

/// Opener backed by the platform launcher (`xdg-open`, `open`, `start`).
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&self, target: &str) -> Result<(), ActionError> {
        log::debug!("opening {target}");
        open::that(target).map_err(|source| {
            log::warn!("launcher failed for {target}: {source}");
            ActionError::Open {
                target: target.to_string(),
                source,
            }
        })
    }
}
