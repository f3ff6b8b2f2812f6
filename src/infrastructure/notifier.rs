//! Desktop notifications after a title has been opened.

use std::io;
use std::sync::Arc;

use crate::infrastructure::traits::CommandRunner;

/// Notification channel trait
pub trait Notifier: Send + Sync {
    /// Show a notification with a short summary line and a body.
    fn notify(&self, summary: &str, body: &str) -> io::Result<()>;
}

/// Desktop notifier
///
/// `notify-send` on Linux/BSD, `osascript` on macOS, nothing elsewhere.
pub struct DesktopNotifier {
    runner: Arc<dyn CommandRunner>,
}

impl DesktopNotifier {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, summary: &str, body: &str) -> io::Result<()> {
        if cfg!(target_os = "macos") {
            let script = apple_script(summary, body);
            self.runner.run("osascript", &["-e", &script])
        } else if cfg!(target_os = "windows") {
            Ok(())
        } else {
            self.runner
                .run("notify-send", &["--app-name=ao", summary, body])
        }
    }
}

fn apple_script(summary: &str, body: &str) -> String {
    format!(
        "display notification \"{}\" with title \"{}\"",
        escape_apple_string(body),
        escape_apple_string(summary)
    )
}

fn escape_apple_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_quotes_when_building_apple_script_then_escaped() {
        assert_eq!(
            apple_script("ao", r#"say "hi" \o/"#),
            r#"display notification "say \"hi\" \\o/" with title "ao""#
        );
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn given_linux_when_notifying_then_runs_notify_send() {
        use crate::util::testing::RecordingRunner;

        let runner = Arc::new(RecordingRunner::new());
        DesktopNotifier::new(runner.clone())
            .notify("ao", "opened 2 links")
            .unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "notify-send");
        assert_eq!(calls[0].1.last().map(String::as_str), Some("opened 2 links"));
    }
}
