//! Host notification abstraction
//!
//! Diagnostic banners are fire-and-forget: a failing notifier never aborts
//! the control operation that produced the message.

/// Severity of a notification banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NotificationKind {
    /// Neutral information.
    #[default]
    Info,
    /// Operation succeeded.
    Success,
    /// Something needs attention.
    Warning,
    /// Hardware problem.
    Danger,
}

impl NotificationKind {
    /// Host-side style name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

/// How long a banner stays visible, in milliseconds. Zero disables banners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct NotificationDuration(u32);

impl NotificationDuration {
    /// Banners disabled.
    pub const DISABLED: Self = Self(0);

    /// Wrap a duration in milliseconds.
    #[must_use]
    pub const fn from_millis(ms: u32) -> Self {
        Self(ms)
    }

    /// Duration in milliseconds.
    #[must_use]
    pub const fn as_millis(self) -> u32 {
        self.0
    }

    /// `false` when the duration is zero.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        self.0 != 0
    }
}

impl Default for NotificationDuration {
    fn default() -> Self {
        Self(crate::config::DEFAULT_NOTIFICATION_MS)
    }
}

/// A banner for the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification<'a> {
    /// Short title.
    pub headline: &'a str,
    /// Body text.
    pub message: &'a str,
    /// Severity.
    pub kind: NotificationKind,
    /// Display time.
    pub duration: NotificationDuration,
}

/// Sink for host notifications.
pub trait Notifier {
    /// Delivery error type.
    type Error: core::fmt::Debug;

    /// Show a banner.
    fn notify(&mut self, notification: &Notification<'_>) -> Result<(), Self::Error>;
}

/// Notifier that drops every banner.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    type Error = core::convert::Infallible;

    fn notify(&mut self, _notification: &Notification<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    type Error = N::Error;

    fn notify(&mut self, notification: &Notification<'_>) -> Result<(), Self::Error> {
        (**self).notify(notification)
    }
}
