use anyhow::Result;
use arboard::Clipboard;
#[cfg(target_os = "linux")]
use arboard::SetExtLinux;
use tracing::{debug, warn};

use crate::download::DownloadItem;

/// Hidden argument that turns the binary into the clipboard owner process.
pub const CLIPBOARD_OWNER_FLAG: &str = "__tabular_data_clipboard_owner";

/// X11/Wayland clipboards are owned by a live process, so on Linux the text
/// is handed to a detached copy of this binary that keeps serving it.
#[cfg(target_os = "linux")]
fn serve_clipboard_from_stdin() -> Result<()> {
    let text = std::io::read_to_string(std::io::stdin())?;
    let mut clipboard = Clipboard::new()?;
    // Blocks until another program takes ownership of the clipboard.
    clipboard.set().wait().text(text)?;
    Ok(())
}

/// Returns `Ok(true)` when this process ran as the clipboard owner and
/// should exit without doing anything else.
pub fn run_clipboard_owner_if_requested() -> Result<bool> {
    if !std::env::args().any(|a| a == CLIPBOARD_OWNER_FLAG) {
        return Ok(false);
    }

    #[cfg(target_os = "linux")]
    {
        serve_clipboard_from_stdin()?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        warn!("{} is only used on Linux; ignoring", CLIPBOARD_OWNER_FLAG);
    }
    Ok(true)
}

/// Text placed on the clipboard: one `path--device` per line.
pub fn clipboard_text(items: &[DownloadItem]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn copy_download_list(items: &[DownloadItem]) -> Result<()> {
    let text = clipboard_text(items);
    debug!(items = items.len(), "copying download list to clipboard");

    #[cfg(not(target_os = "linux"))]
    {
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
    }

    #[cfg(target_os = "linux")]
    {
        use std::io::Write;
        use std::process::{Command, Stdio};

        let mut child = Command::new(std::env::current_exe()?)
            .arg(CLIPBOARD_OWNER_FLAG)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .current_dir("/")
            .spawn()?;

        match child.stdin.take() {
            Some(mut stdin) => {
                stdin.write_all(text.as_bytes())?;
                stdin.flush()?;
            }
            None => {
                warn!("clipboard owner process has no stdin");
                return Err(anyhow::anyhow!(
                    "failed to hand the download list to the clipboard owner"
                ));
            }
        }
    }
    Ok(())
}
