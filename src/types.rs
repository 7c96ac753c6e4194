use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Which facility the process locator uses to enumerate running processes.
///
/// - `Native`: in-process enumeration through `sysinfo`.
/// - `FallbackCli`: shell out to the platform's listing tool (TASKLIST on
///   Windows, `ps` elsewhere) and parse its text output.
/// - `Unavailable`: nothing works on this system; every lookup comes back
///   empty instead of failing.
///
/// Config files and the CLI accept the same spellings (see the `FromStr`
/// impl).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum EnumerationBackend {
    Native,
    FallbackCli,
    Unavailable,
}

impl FromStr for EnumerationBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "native" => Ok(EnumerationBackend::Native),
            "fallback-cli" | "fallback" | "cli" => Ok(EnumerationBackend::FallbackCli),
            "unavailable" | "none" => Ok(EnumerationBackend::Unavailable),
            other => Err(format!(
                "invalid locator backend: {other} (expected \"native\", \"fallback-cli\" or \"unavailable\")"
            )),
        }
    }
}

impl TryFrom<String> for EnumerationBackend {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for EnumerationBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EnumerationBackend::Native => "native",
            EnumerationBackend::FallbackCli => "fallback-cli",
            EnumerationBackend::Unavailable => "unavailable",
        };
        f.write_str(s)
    }
}

/// The family of target application an adapter talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdapterKind {
    #[default]
    Cascadeur,
}

impl FromStr for AdapterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cascadeur" => Ok(AdapterKind::Cascadeur),
            other => Err(format!("unknown adapter kind: {other}")),
        }
    }
}
