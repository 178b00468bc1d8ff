//! Install abort protocol.
//!
//! When an install or uninstall script hits a failure it cannot proceed
//! past, these functions record the consequences and hand the orchestrator
//! an [`Abort`] signal to interpret. The asymmetry is deliberate: a failed
//! install must not leave a half-registered plugin, so the registry entry
//! is removed and persisted before the halt signal is returned; a failed
//! uninstall leaves the plugin registered so the operator can retry from
//! the settings view.

use plugin_installer_core::{NoticeKind, Notifier};
use tracing::{debug, warn};

use crate::registry::PluginRegistry;

/// Route of the settings view a failed uninstall redirects to.
pub const SETTINGS_ROUTE: &str = "setting";

/// Terminal signal returned by the abort protocol.
///
/// The orchestrator interprets this instead of the core terminating the
/// process itself: `Halt` means stop the install sequence entirely,
/// `Redirect` means transfer the request flow to the named route.
#[must_use = "the orchestrator must act on the abort signal"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Abort {
    /// Stop the install sequence; no further script code may run.
    Halt {
        /// The failure message, also queued on the notification channel.
        message: String,
    },
    /// Transfer the request flow to `route`.
    Redirect { route: String, message: String },
}

/// Aborts a failed plugin install.
///
/// Removes the plugin's registry entry, persists the registry, queues
/// `message` as an error notification, and returns [`Abort::Halt`]. A
/// registry persist failure is logged but does not stop the abort — the
/// in-memory de-registration and the halt signal matter more than the
/// write.
///
/// Callers pass either an explicit message or the `Display` rendering of
/// the [`InstallError`](plugin_installer_core::InstallError) that stopped
/// their script.
pub fn fail_install(
    registry: &mut PluginRegistry,
    notifier: &mut dyn Notifier,
    plugin: &str,
    message: impl Into<String>,
) -> Abort {
    let message = message.into();
    debug!(plugin, message = %message, "Aborting plugin install");

    registry.remove(plugin);
    if let Err(e) = registry.persist() {
        warn!(plugin, error = %e, "Could not persist plugin registry during install abort");
    }

    notifier.set(NoticeKind::Error, &message);
    Abort::Halt { message }
}

/// Aborts a failed plugin uninstall.
///
/// Queues `message` as an error notification and returns
/// [`Abort::Redirect`] to the settings view. The plugin registry is left
/// untouched: an uninstall failure does not un-register the plugin.
pub fn fail_uninstall(
    notifier: &mut dyn Notifier,
    plugin: &str,
    message: impl Into<String>,
) -> Abort {
    let message = message.into();
    debug!(plugin, message = %message, "Aborting plugin uninstall");

    notifier.set(NoticeKind::Error, &message);
    Abort::Redirect {
        route: SETTINGS_ROUTE.to_string(),
        message,
    }
}
