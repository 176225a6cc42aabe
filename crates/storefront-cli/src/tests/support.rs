//! Doubles shared by the CLI tests.

use std::ffi::OsString;
use std::io;
use std::process::ExitCode;

use storefront_bag::{BagRequest, BagResponse, BagTransport, TransportError};
use storefront_config::Config;

use crate::{AppError, ConfigLoader, run_with_loader};

pub(super) struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    pub(super) const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

/// Transport answering every request with a fixed outcome.
#[derive(Debug, Clone)]
pub(super) enum CannedTransport {
    Body(Vec<u8>),
    Refused,
}

impl BagTransport for CannedTransport {
    async fn fetch(&self, _request: &BagRequest) -> Result<BagResponse, TransportError> {
        match self {
            Self::Body(body) => Ok(BagResponse::new(200, Vec::new(), Some(body.clone()))),
            Self::Refused => Err(TransportError::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
        }
    }
}

pub(super) fn bag_with_auth(url: &str) -> Vec<u8> {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <plist version=\"1.0\"><dict>\
         <key>authenticateAccount</key><string>{url}</string>\
         </dict></plist>"
    )
    .into_bytes()
}

/// Captured result of one CLI run.
#[derive(Debug)]
pub(super) struct Outcome {
    pub(super) exit: ExitCode,
    pub(super) stdout: String,
    pub(super) stderr: String,
}

pub(super) fn run_cli<L: ConfigLoader>(
    args: &[&str],
    loader: &L,
    transport: CannedTransport,
) -> Outcome {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let args: Vec<OsString> = std::iter::once("storefront")
        .chain(args.iter().copied())
        .map(OsString::from)
        .collect();
    let exit = run_with_loader(args, &mut stdout, &mut stderr, loader, transport);
    Outcome {
        exit,
        stdout: String::from_utf8(stdout).expect("stdout utf8"),
        stderr: String::from_utf8(stderr).expect("stderr utf8"),
    }
}
