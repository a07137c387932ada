use std::io;
use std::process::{Command, Stdio};

/// Front end address for a server on `port`. The bind host may be a wildcard such as
/// `0.0.0.0`, which browsers cannot open, so the loopback name is always used.
#[must_use]
pub fn local_url(port: u16) -> String {
    format!("http://localhost:{port}")
}

/// Opens `url` in the system browser. Failures are logged and otherwise ignored.
pub fn open(url: &str) {
    match launch(url) {
        Ok(()) => tracing::debug!(url, "Opened browser"),
        Err(err) => tracing::warn!(url, error = %err, "Failed to open browser"),
    }
}

fn launch(url: &str) -> io::Result<()> {
    let mut command = browser_command(url)?;
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(drop)
}

#[cfg(target_os = "macos")]
fn browser_command(url: &str) -> io::Result<Command> {
    let mut command = Command::new("open");
    command.arg(url);
    Ok(command)
}

#[cfg(target_os = "windows")]
fn browser_command(url: &str) -> io::Result<Command> {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", "", url]);
    Ok(command)
}

#[cfg(all(unix, not(target_os = "macos")))]
fn browser_command(url: &str) -> io::Result<Command> {
    let mut command = Command::new("xdg-open");
    command.arg(url);
    Ok(command)
}

#[cfg(not(any(unix, target_os = "windows")))]
fn browser_command(_url: &str) -> io::Result<Command> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "no known browser launcher on this platform",
    ))
}
