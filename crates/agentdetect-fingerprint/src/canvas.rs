//! Canvas fingerprint probe: spec.md §4.2 "Canvas fingerprint".

use agentdetect_core::types::AnomalySignal;
use sha2::{Digest, Sha256};

use crate::ports::CanvasProbe;
use crate::report::SignalGroup;
use crate::signals;

const SHORT_DATA_URL_THRESHOLD: usize = 1000;

pub struct CanvasResult {
    pub group: SignalGroup,
    /// Hex-encoded SHA-256 of the rendered data URL, if rendering succeeded.
    pub hash: Option<String>,
}

pub fn probe(canvas: &impl CanvasProbe) -> CanvasResult {
    let mut group = SignalGroup::default();

    match canvas.render_data_url() {
        Ok(data_url) => {
            if data_url.len() < SHORT_DATA_URL_THRESHOLD {
                group.push(AnomalySignal::new(signals::CANVAS_DATA_SHORT, 1.0, 6));
            }
            let mut hasher = Sha256::new();
            hasher.update(data_url.as_bytes());
            let digest = hasher.finalize();
            CanvasResult {
                group,
                hash: Some(hex_encode(&digest)),
            }
        }
        Err(_) => {
            group.push(AnomalySignal::new(signals::CANVAS_ERROR, 1.0, 5));
            CanvasResult { group, hash: None }
        }
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedCanvas(&'static str);

    impl CanvasProbe for FixedCanvas {
        fn render_data_url(&self) -> Result<String, String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingCanvas;

    impl CanvasProbe for FailingCanvas {
        fn render_data_url(&self) -> Result<String, String> {
            Err("context creation failed".to_string())
        }
    }

    #[test]
    fn long_data_url_emits_no_signal_and_hashes() {
        let long_url = format!("data:image/png;base64,{}", "A".repeat(2000));
        let result = probe(&FixedCanvas(Box::leak(long_url.into_boxed_str())));
        assert!(result.group.signals.is_empty());
        assert!(result.hash.is_some());
        assert_eq!(result.hash.unwrap().len(), 64);
    }

    #[test]
    fn short_data_url_emits_canvas_data_short() {
        let result = probe(&FixedCanvas("data:image/png;base64,AAAA"));
        assert_eq!(result.group.signals.len(), 1);
        assert_eq!(result.group.signals[0].name, signals::CANVAS_DATA_SHORT);
    }

    #[test]
    fn render_failure_emits_canvas_error_and_no_hash() {
        let result = probe(&FailingCanvas);
        assert_eq!(result.group.signals.len(), 1);
        assert_eq!(result.group.signals[0].name, signals::CANVAS_ERROR);
        assert!(result.hash.is_none());
    }

    #[test]
    fn same_input_hashes_identically() {
        let a = probe(&FixedCanvas("data:image/png;base64,stable-input"));
        let b = probe(&FixedCanvas("data:image/png;base64,stable-input"));
        assert_eq!(a.hash, b.hash);
    }
}
