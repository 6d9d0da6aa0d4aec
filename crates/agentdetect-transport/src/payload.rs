//! The outbound reporting payload shape (spec.md §6): `sesskey`,
//! `contextid`, `sessionid`, `signaltype`, `signaldata`.

use serde::{Deserialize, Serialize};

/// Which of the three report kinds this payload carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalType {
    Fingerprint,
    Combined,
    Unload,
}

/// The wire shape posted to the reporting RPC and the unload beacon.
/// `signaldata` is a JSON-stringified blob rather than a nested object,
/// matching the RPC's historical string-field contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportPayload {
    pub sesskey: String,
    pub contextid: Option<u64>,
    pub sessionid: String,
    pub signaltype: SignalType,
    pub signaldata: String,
}

impl ReportPayload {
    pub fn new(
        sesskey: impl Into<String>,
        contextid: Option<u64>,
        sessionid: impl Into<String>,
        signaltype: SignalType,
        signaldata: impl Into<String>,
    ) -> Self {
        Self {
            sesskey: sesskey.into(),
            contextid,
            sessionid: sessionid.into(),
            signaltype,
            signaldata: signaldata.into(),
        }
    }
}
