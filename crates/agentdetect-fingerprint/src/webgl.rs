//! WebGL vendor/renderer probe: spec.md §4.2 "WebGL".

use agentdetect_core::types::AnomalySignal;

use crate::ports::WebglProbe;
use crate::report::SignalGroup;
use crate::signals;

const SOFTWARE_RENDERER_NEEDLES: &[&str] = &["SwiftShader", "llvmpipe", "Mesa", "Software"];

pub fn probe(webgl: &impl WebglProbe) -> SignalGroup {
    let mut group = SignalGroup::default();

    if !webgl.is_available() {
        group.push(AnomalySignal::new(signals::WEBGL_MISSING, 1.0, 5));
        return group;
    }

    if let Some(info) = webgl.debug_renderer_info() {
        if SOFTWARE_RENDERER_NEEDLES
            .iter()
            .any(|needle| info.renderer.contains(needle))
        {
            group.push(AnomalySignal::new(signals::WEBGL_SOFTWARE_RENDERER, 1.0, 8));
        }
    }

    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::WebglInfo;

    struct FakeWebgl {
        available: bool,
        info: Option<WebglInfo>,
    }

    impl WebglProbe for FakeWebgl {
        fn debug_renderer_info(&self) -> Option<WebglInfo> {
            self.info.clone()
        }
        fn is_available(&self) -> bool {
            self.available
        }
    }

    #[test]
    fn missing_webgl_emits_webgl_missing() {
        let webgl = FakeWebgl {
            available: false,
            info: None,
        };
        let group = probe(&webgl);
        assert_eq!(group.signals.len(), 1);
        assert_eq!(group.signals[0].name, signals::WEBGL_MISSING);
    }

    #[test]
    fn swiftshader_renderer_is_flagged() {
        let webgl = FakeWebgl {
            available: true,
            info: Some(WebglInfo {
                vendor: "Google Inc.".to_string(),
                renderer: "ANGLE (Google, Vulkan 1.3.0 (SwiftShader Device), SwiftShader driver)"
                    .to_string(),
            }),
        };
        let group = probe(&webgl);
        assert_eq!(group.signals.len(), 1);
        assert_eq!(group.signals[0].name, signals::WEBGL_SOFTWARE_RENDERER);
    }

    #[test]
    fn real_gpu_renderer_emits_nothing() {
        let webgl = FakeWebgl {
            available: true,
            info: Some(WebglInfo {
                vendor: "NVIDIA Corporation".to_string(),
                renderer: "NVIDIA GeForce RTX 3080/PCIe/SSE2".to_string(),
            }),
        };
        assert!(probe(&webgl).signals.is_empty());
    }
}
