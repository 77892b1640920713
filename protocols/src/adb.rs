//! Command lines for the external `adb` tool.

use std::fmt;
use std::net::Ipv6Addr;

use adbwifi_common::config::Config;
use adbwifi_common::device::ResolvedEndpoint;

/// A program and its arguments, executed directly without a shell.
///
/// The [`Display`](fmt::Display) form is the command line shown to the operator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolCommand {
    program: String,
    args: Vec<String>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// `adb pair <host>:<port> <code>`
pub fn pair(cfg: &Config, endpoint: &ResolvedEndpoint) -> ToolCommand {
    ToolCommand::new(&cfg.adb_program)
        .arg("pair")
        .arg(host_port(&endpoint.address, &endpoint.port.to_string()))
        .arg(&cfg.pairing_code)
}

/// `adb connect <host>:<port>`
///
/// The port is passed through as typed by the operator.
pub fn connect(cfg: &Config, address: &str, port: &str) -> ToolCommand {
    ToolCommand::new(&cfg.adb_program)
        .arg("connect")
        .arg(host_port(address, port))
}

/// `adb devices -l`
pub fn devices(cfg: &Config) -> ToolCommand {
    ToolCommand::new(&cfg.adb_program).arg("devices").arg("-l")
}

/// Joins host and port, bracketing IPv6 literals so adb can split them again.
pub fn host_port(host: &str, port: &str) -> String {
    match host.parse::<Ipv6Addr>() {
        Ok(_) => format!("[{host}]:{port}"),
        Err(_) => format!("{host}:{port}"),
    }
}
