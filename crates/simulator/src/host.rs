//! Host-side collaborators for the simulator.

use platform::{Notification, NotificationKind, Notifier};

/// Notifier that turns every banner into a log line.
#[derive(Debug, Default)]
pub struct LogNotifier {
    shown: usize,
}

impl LogNotifier {
    /// Banners shown so far.
    pub fn shown(&self) -> usize {
        self.shown
    }
}

impl Notifier for LogNotifier {
    type Error = core::convert::Infallible;

    fn notify(&mut self, n: &Notification<'_>) -> Result<(), Self::Error> {
        self.shown = self.shown.saturating_add(1);
        let ms = n.duration.as_millis();
        match n.kind {
            NotificationKind::Danger => tracing::error!(ms, "[banner] {} {}", n.headline, n.message),
            NotificationKind::Warning => tracing::warn!(ms, "[banner] {} {}", n.headline, n.message),
            NotificationKind::Info | NotificationKind::Success => {
                tracing::info!(ms, kind = n.kind.as_str(), "[banner] {} {}", n.headline, n.message);
            }
        }
        Ok(())
    }
}
