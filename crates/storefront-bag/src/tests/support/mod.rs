//! Shared doubles for resolver tests.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use plist::{Dictionary, Value};
use storefront_config::Config;

use crate::{BagRequest, BagResolver, BagResponse, BagTransport, Diagnostics, RecordingSink};
use crate::TransportError;

/// Canned behaviour for a [`ScriptedTransport`].
#[derive(Debug, Clone)]
pub enum Script {
    /// Answer every request with this response.
    Respond(BagResponse),
    /// Fail every request with an I/O error of this kind.
    Fail(io::ErrorKind),
}

/// Transport double that replays a script and records requests.
#[derive(Debug)]
pub struct ScriptedTransport {
    script: Script,
    requests: Mutex<Vec<BagRequest>>,
}

impl ScriptedTransport {
    pub fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn responding_with(body: Option<Vec<u8>>) -> Arc<Self> {
        Self::new(Script::Respond(ok_response(body)))
    }

    pub fn requests(&self) -> Vec<BagRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl BagTransport for ScriptedTransport {
    async fn fetch(&self, request: &BagRequest) -> Result<BagResponse, TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        match &self.script {
            Script::Respond(response) => Ok(response.clone()),
            Script::Fail(kind) => Err(TransportError::Io(io::Error::new(
                *kind,
                "simulated transport failure",
            ))),
        }
    }
}

pub fn ok_response(body: Option<Vec<u8>>) -> BagResponse {
    BagResponse::new(
        200,
        vec![("Content-Type".to_owned(), "text/xml".to_owned())],
        body,
    )
}

pub fn xml_bag(entries: &str) -> Vec<u8> {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" \
         \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n\
         <plist version=\"1.0\"><dict>{entries}</dict></plist>"
    )
    .into_bytes()
}

pub fn xml_bag_with_auth(url: &str) -> Vec<u8> {
    xml_bag(&format!(
        "<key>authenticateAccount</key><string>{url}</string>"
    ))
}

pub fn binary_bag(entries: Dictionary) -> Vec<u8> {
    let mut buffer = Vec::new();
    Value::Dictionary(entries)
        .to_writer_binary(&mut buffer)
        .expect("binary plist should encode");
    buffer
}

pub fn config_with_device(device_identifier: &str) -> Config {
    Config {
        device_identifier: device_identifier.to_owned(),
        ..Config::default()
    }
}

/// Resolver wired to recording doubles.
pub struct Fixture {
    pub resolver: BagResolver<Config, Arc<ScriptedTransport>>,
    pub transport: Arc<ScriptedTransport>,
    pub sink: Arc<RecordingSink>,
}

impl Fixture {
    pub fn new(config: Config, transport: Arc<ScriptedTransport>, verbose: bool) -> Self {
        let sink = Arc::new(RecordingSink::new());
        let diagnostics = Arc::new(Diagnostics::with_sink(verbose, sink.clone()));
        let resolver = BagResolver::new(config, Arc::clone(&transport), diagnostics);
        Self {
            resolver,
            transport,
            sink,
        }
    }
}
