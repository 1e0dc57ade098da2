//! Best-effort clipboard copy through the platform's helper program.

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use stima_shared::{Result, StimaError};

/// Helper programs to try, in order.
///
/// A configured command wins over auto-detection.
pub(crate) fn candidates(configured: &[String], wayland: bool) -> Vec<Vec<String>> {
    if !configured.is_empty() {
        return vec![configured.to_vec()];
    }

    let owned = |args: &[&str]| args.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    if cfg!(target_os = "macos") {
        return vec![owned(&["pbcopy"])];
    }
    if cfg!(target_os = "windows") {
        return vec![owned(&["clip"])];
    }

    let mut list = Vec::new();
    if wayland {
        list.push(owned(&["wl-copy"]));
    }
    list.push(owned(&["xclip", "-selection", "clipboard"]));
    list.push(owned(&["xsel", "--clipboard", "--input"]));
    list
}

/// How to make a clipboard helper available on this platform.
pub(crate) fn remediation_hint() -> &'static str {
    if cfg!(target_os = "macos") {
        "pbcopy was not found on PATH"
    } else if cfg!(target_os = "windows") {
        "clip.exe was not found on PATH"
    } else {
        "ensure xclip is installed (sudo apt install xclip), or wl-clipboard on Wayland"
    }
}

/// Copy `text` to the clipboard. Returns the helper program that succeeded.
pub(crate) fn copy(text: &str, configured: &[String]) -> Result<String> {
    let wayland = std::env::var_os("WAYLAND_DISPLAY").is_some();

    for argv in candidates(configured, wayland) {
        let Some((program, args)) = argv.split_first() else {
            continue;
        };

        match pipe_to(program, args, text) {
            Ok(()) => {
                debug!(program, "summary copied to clipboard");
                return Ok(program.clone());
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(program, "clipboard helper not installed");
            }
            Err(e) => {
                warn!(program, error = %e, "clipboard helper failed");
            }
        }
    }

    Err(StimaError::ClipboardUnavailable {
        hint: remediation_hint().to_string(),
    })
}

fn pipe_to(program: &str, args: &[String], text: &str) -> std::io::Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }

    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other(format!(
            "{program} exited with status {}",
            status.code().unwrap_or(-1)
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_command_wins() {
        let configured = vec!["my-copy".to_string(), "--primary".to_string()];
        assert_eq!(candidates(&configured, true), vec![configured]);
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn wayland_helper_comes_first() {
        let list = candidates(&[], true);
        assert_eq!(list[0], ["wl-copy"]);
        assert_eq!(list[1], ["xclip", "-selection", "clipboard"]);

        let list = candidates(&[], false);
        assert_eq!(list[0][0], "xclip");
    }

    #[test]
    fn missing_helper_is_reported_with_hint() {
        let configured = vec!["stima-no-such-clipboard-helper".to_string()];
        let err = copy("testo", &configured).unwrap_err();
        assert!(matches!(err, StimaError::ClipboardUnavailable { .. }));
        assert!(err.to_string().contains(remediation_hint()));
    }

    #[cfg(unix)]
    #[test]
    fn helper_receives_text() {
        let configured = vec!["cat".to_string()];
        assert_eq!(copy("testo", &configured).expect("copy"), "cat");
    }
}
