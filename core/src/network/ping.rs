//! Liveness through the platform `ping` utility.
//!
//! Used when raw sockets are off limits. The child is killed if the probe is dropped,
//! so an abandoned scan does not leave ping processes behind.

use std::net::Ipv4Addr;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use sweepr_common::{error::ProbeError, probe::EchoProbe};

/// Extra time the process gets on top of its own timeout to start and exit.
const PROCESS_GRACE: Duration = Duration::from_millis(1_500);

/// The `ping` utility as an echo transport.
///
/// On Linux the deadline is rounded up to whole seconds, since iputils and busybox
/// both take an integer `-W`, so this path has a one second floor.
pub struct PingUtility;

#[async_trait]
impl EchoProbe for PingUtility {
    async fn echo(&self, address: Ipv4Addr, timeout: Duration) -> Result<bool, ProbeError> {
        let mut command = Command::new("ping");
        command
            .args(ping_args(address, timeout))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(timeout + PROCESS_GRACE, command.output()).await {
            Ok(output) => output?,
            Err(_elapsed) => return Ok(false),
        };

        Ok(has_success_marker(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Every platform's ping prints the reply TTL only for a successful echo.
pub fn has_success_marker(output: &str) -> bool {
    output.to_ascii_lowercase().contains("ttl=")
}

#[cfg(target_os = "windows")]
fn ping_args(address: Ipv4Addr, timeout: Duration) -> Vec<String> {
    vec![
        "-n".into(),
        "1".into(),
        "-w".into(),
        timeout.as_millis().to_string(),
        address.to_string(),
    ]
}

#[cfg(target_os = "macos")]
fn ping_args(address: Ipv4Addr, timeout: Duration) -> Vec<String> {
    vec![
        "-c".into(),
        "1".into(),
        "-W".into(),
        timeout.as_millis().to_string(),
        address.to_string(),
    ]
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn ping_args(address: Ipv4Addr, timeout: Duration) -> Vec<String> {
    let seconds = timeout.as_millis().div_ceil(1_000).max(1);
    vec![
        "-n".into(),
        "-c".into(),
        "1".into(),
        "-W".into(),
        seconds.to_string(),
        address.to_string(),
    ]
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
