use std::io::Write;
use std::process::{Command, Stdio};

/// Clipboard tools to try, most specific first.
fn candidates() -> Vec<(&'static str, Vec<&'static str>)> {
    if cfg!(target_os = "macos") {
        return vec![("pbcopy", vec![])];
    }
    let wayland = std::env::var("XDG_SESSION_TYPE").is_ok_and(|t| t == "wayland");
    let mut tools = vec![
        ("xclip", vec!["-selection", "clipboard"]),
        ("xsel", vec!["--clipboard", "--input"]),
    ];
    if wayland {
        tools.insert(0, ("wl-copy", vec![]));
    }
    tools
}

/// Copy text to the system clipboard, returning the tool that took it.
pub fn copy_to_clipboard(text: &str) -> Result<&'static str, Box<dyn std::error::Error>> {
    let mut last_err = None;
    for (cmd, args) in candidates() {
        match pipe_into(cmd, &args, text) {
            Ok(()) => return Ok(cmd),
            Err(e) => {
                log::debug!("{cmd} unavailable: {e}");
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| "No clipboard tool found".into()))
}

fn pipe_into(cmd: &str, args: &[&str], text: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| format!("Failed to spawn {cmd}: {e}"))?;

    if let Some(ref mut stdin) = child.stdin {
        stdin.write_all(text.as_bytes())?;
    }
    // close stdin so the tool sees EOF
    drop(child.stdin.take());

    let status = child.wait()?;
    if !status.success() {
        return Err(format!("{cmd} exited with status {status}").into());
    }
    Ok(())
}
