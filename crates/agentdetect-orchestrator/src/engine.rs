//! `Engine`: initializes and composes the Recorder, Fingerprint Collector,
//! Injection Observer and Analyzer; owns session identity and
//! configuration; schedules periodic reports; hooks visibility and
//! unload. spec.md §4.5.

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::task::JoinHandle;

use agentdetect_analyzer::Analyzer;
use agentdetect_core::{Clock, EngineConfig, SessionRecord};
use agentdetect_dom::mutation::{MutationRecord, NodeSnapshot};
use agentdetect_dom::{DomEvent, TabStorage};
use agentdetect_fingerprint::collector::FingerprintCollector;
use agentdetect_fingerprint::ports::{CanvasProbe, ExtensionResourceLoader, RuntimeEnvironment, WebglProbe};
use agentdetect_fingerprint::Fingerprint;
use agentdetect_injection::InjectionObserver;
use agentdetect_recorder::EventRecorder;
use agentdetect_transport::{ReportClient, ReportPayload, SignalType};

use crate::combined_score::combined_score;
use crate::report_shape::{assemble_report, PageContext, ReportData};

const SESSION_STORAGE_KEY: &str = "agentdetect_session";

/// Everything a single call to `collect_and_report` produced, whether or
/// not it ended up being shipped (suppressed-by-score is still returned
/// to the caller per spec.md §4.5 "`collectAndReport()` ... returns the
/// full result").
#[derive(Debug, Clone)]
pub struct CollectResult {
    pub report: ReportData,
    pub shipped: bool,
}

/// Mutable top-level state the Orchestrator owns directly (as opposed to
/// the leaf components' own interior state): session identity, merged
/// configuration, lifecycle flag, and the scheduler handle. Held behind
/// one `Mutex` so `Engine` itself can be driven from `Arc<Engine>` without
/// requiring `&mut` at the call sites `init`/`shutdown` share with the
/// timer task.
struct OrchestratorState {
    config: EngineConfig,
    session: Option<SessionRecord>,
    initialized: bool,
    timer_handle: Option<JoinHandle<()>>,
}

/// Composes the four leaf components (Recorder, Fingerprint Collector,
/// Injection Observer, Analyzer) and everything needed to drive them on a
/// schedule: the merged configuration, the session id, the periodic
/// timer, and the visibility/unload hooks. Analogous to `rustkit_core`'s
/// lifecycle dispatcher, but scoped to this engine's five components.
///
/// The engine runs on a single cooperative event loop (spec.md §5); the
/// `Mutex`es below are never contended in practice (there is exactly one
/// logical thread of control — `init`, timer ticks, and the
/// visibility/unload hooks never run concurrently with each other), but
/// using `Arc<Mutex<_>>` rather than `Rc<RefCell<_>>` keeps this crate's
/// composition seam consistent with the `Arc`-based ports every leaf
/// crate already exposes (`TabStorage`, `Clock`, `ReportClient` are all
/// `Send + Sync` trait objects), and lets a host run the engine on a
/// multi-threaded `tokio` runtime if it chooses to. See DESIGN.md.
pub struct Engine<E, C, G> {
    state: Mutex<OrchestratorState>,
    storage: Arc<dyn TabStorage>,
    clock: Arc<dyn Clock>,
    report_client: Arc<dyn ReportClient>,
    page: Arc<dyn PageContext>,

    recorder: Mutex<EventRecorder>,
    injection: Mutex<InjectionObserver>,
    analyzer: Mutex<Analyzer>,
    fingerprint: FingerprintCollector<E, C, G, Arc<dyn TabStorage>>,
}

impl<E, C, G> Engine<E, C, G>
where
    E: RuntimeEnvironment + Send + Sync + 'static,
    C: CanvasProbe + Send + Sync + 'static,
    G: WebglProbe + Send + Sync + 'static,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        env: E,
        canvas_probe: C,
        webgl_probe: G,
        storage: Arc<dyn TabStorage>,
        clock: Arc<dyn Clock>,
        report_client: Arc<dyn ReportClient>,
        page: Arc<dyn PageContext>,
    ) -> Self {
        let fingerprint = FingerprintCollector::new(env, canvas_probe, webgl_probe, storage.clone());
        Self {
            state: Mutex::new(OrchestratorState {
                config: EngineConfig::default(),
                session: None,
                initialized: false,
                timer_handle: None,
            }),
            storage: storage.clone(),
            clock: clock.clone(),
            report_client,
            page,
            recorder: Mutex::new(EventRecorder::new(storage, clock)),
            injection: Mutex::new(InjectionObserver::new()),
            analyzer: Mutex::new(Analyzer::new()),
            fingerprint,
        }
    }

    /// Wires an extension-resource loader into the Fingerprint Collector
    /// for the Comet resource-probe race. Must be called before `init`.
    pub fn with_extension_loader(mut self, loader: Arc<dyn ExtensionResourceLoader>) -> Self {
        self.fingerprint = self.fingerprint.with_extension_loader(loader);
        self
    }

    pub fn is_initialized(&self) -> bool {
        self.state.lock().expect("engine state lock poisoned").initialized
    }

    pub fn session_id(&self) -> Option<String> {
        self.state
            .lock()
            .expect("engine state lock poisoned")
            .session
            .as_ref()
            .map(|s| s.id.clone())
    }

    /// Idempotent. Merges `config` with defaults; if disabled, returns
    /// without side effects. Otherwise restores-or-creates the session
    /// id, starts the Recorder and Injection Observer, runs a first
    /// Fingerprint collection (emitting an immediate fingerprint-only
    /// report if its score clears `min_report_score`), and marks the
    /// engine initialized. Callers start the periodic timer separately
    /// via `start_scheduler`, since that requires an `Arc<Engine<..>>`.
    pub async fn init(&self, config: EngineConfig) {
        {
            let guard = self.state.lock().expect("engine state lock poisoned");
            if guard.initialized {
                tracing::debug!("engine already initialized, ignoring duplicate init");
                return;
            }
        }

        if !config.enabled {
            tracing::debug!("engine disabled by configuration, init is a no-op");
            let mut guard = self.state.lock().expect("engine state lock poisoned");
            guard.config = config;
            return;
        }
        if config.session_key.is_none() {
            tracing::warn!("sessionKey missing from configuration; all reports will be suppressed");
        }

        let now = self.clock.now_ms();
        let restored = self
            .storage
            .read(SESSION_STORAGE_KEY)
            .and_then(|raw| serde_json::from_str::<SessionRecord>(&raw).ok());
        let mut rng = StdRng::seed_from_u64(now ^ 0x9E37_79B9_7F4A_7C15);
        let (session, was_restored) = agentdetect_core::restore_or_create(restored, now, &mut rng);
        if !was_restored {
            if let Ok(json) = serde_json::to_string(&session) {
                self.storage.write(SESSION_STORAGE_KEY, json);
            }
        }

        {
            let mut recorder = self.recorder.lock().expect("recorder lock poisoned");
            recorder.start_monitoring(config.context_id);
        }
        {
            let mut injection = self.injection.lock().expect("injection lock poisoned");
            injection.start_monitoring(config.debug);
        }

        let fingerprint = self.fingerprint.collect().await;

        {
            let mut guard = self.state.lock().expect("engine state lock poisoned");
            guard.session = Some(session);
            guard.config = config;
            guard.initialized = true;
        }

        if fingerprint.score >= self.min_report_score() {
            self.ship_fingerprint_only(&fingerprint).await;
        }

        tracing::debug!(session_id = self.session_id().as_deref(), "engine initialized");
    }

    /// Feeds one normalized DOM event into the Recorder. No-op before
    /// `init` or after `shutdown`.
    pub fn handle_event(&self, event: DomEvent) {
        if !self.is_initialized() {
            return;
        }
        self.recorder.lock().expect("recorder lock poisoned").handle_event(event);
    }

    /// Feeds an initial full-tree scan plus aggregated extension-resource
    /// URLs into the Injection Observer.
    pub fn initial_dom_scan(&self, body: &NodeSnapshot, extension_resource_urls: &[String]) {
        if !self.is_initialized() {
            return;
        }
        let mut injection = self.injection.lock().expect("injection lock poisoned");
        injection.initial_scan(body);
        injection.scan_extension_resource_urls(extension_resource_urls);
    }

    /// Feeds one observed mutation into the Injection Observer.
    pub fn apply_mutation(&self, mutation: &MutationRecord) {
        if !self.is_initialized() {
            return;
        }
        self.injection
            .lock()
            .expect("injection lock poisoned")
            .apply_mutation(mutation);
    }

    /// Runs a fresh Fingerprint collect, Analyzer analyze and Injection
    /// analyze; composes the combined score and verdict; ships a
    /// `combined` report iff the combined score clears
    /// `min_report_score`. Returns the full result either way, per
    /// spec.md §4.5.
    pub async fn collect_and_report(&self) -> CollectResult {
        let now = self.clock.now_ms();
        let fingerprint = self.fingerprint.collect().await;

        let injection_report = self.injection.lock().expect("injection lock poisoned").analyze();

        let (analysis, raw_state) = {
            let recorder = self.recorder.lock().expect("recorder lock poisoned");
            let mut analyzer = self.analyzer.lock().expect("analyzer lock poisoned");
            let analysis = analyzer.analyze(
                recorder.raw_state(),
                now,
                &fingerprint,
                &injection_report.signals,
            );
            (analysis, recorder.raw_state().clone())
        };

        let combined = combined_score(
            analysis.interaction_score,
            injection_report.score,
            fingerprint.score,
            analysis.agent_score,
        );

        let session_id = self.session_id().unwrap_or_default();
        let report = assemble_report(
            session_id,
            now,
            self.page.page_url(),
            self.page.page_title(),
            fingerprint,
            &raw_state,
            &analysis,
            &injection_report,
            combined,
        );

        let min_report_score = self.min_report_score();
        let shipped = if combined >= min_report_score {
            self.ship(SignalType::Combined, &report).await;
            true
        } else {
            tracing::debug!(combined, min_report_score, "report suppressed: below threshold");
            false
        };

        CollectResult { report, shipped }
    }

    /// Same as `collect_and_report`, for external/manual triggering.
    pub async fn run_analysis(&self) -> CollectResult {
        self.collect_and_report().await
    }

    /// `document.visibilityState === "hidden"` hook.
    pub async fn on_visibility_hidden(&self) {
        if !self.is_initialized() {
            return;
        }
        self.collect_and_report().await;
    }

    /// `beforeunload` hook: triggers a forced Recorder snapshot write and,
    /// if a session key is configured, posts a minimal `unload` payload
    /// via the best-effort beacon transport.
    pub fn on_before_unload(&self) {
        if !self.is_initialized() {
            return;
        }
        self.recorder.lock().expect("recorder lock poisoned").save_snapshot(true);

        let (session_key, context_id) = {
            let guard = self.state.lock().expect("engine state lock poisoned");
            (guard.config.session_key.clone(), guard.config.context_id)
        };
        let Some(session_key) = session_key else {
            return;
        };
        let session_id = self.session_id().unwrap_or_default();
        let payload = ReportPayload::new(session_key, context_id, session_id, SignalType::Unload, "{}");
        self.report_client.beacon(&payload);
    }

    /// Starts the periodic `report_interval_ms` timer on the caller's
    /// `tokio` runtime. The tick spawns a fresh `collect_and_report` each
    /// time; a slow RPC tail from one tick is allowed to overlap the
    /// start of the next per spec.md §5 — this is intentional, not a
    /// race: the Analyzer's cache is re-read fresh on every tick, so an
    /// overlapping tick simply sees whatever is current.
    pub fn start_scheduler(self: &Arc<Self>) {
        let interval_ms = {
            let guard = self.state.lock().expect("engine state lock poisoned");
            guard.config.report_interval_ms.max(1)
        };
        let engine = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(std::time::Duration::from_millis(interval_ms));
            ticker.tick().await; // the first tick fires immediately; the
                                  // initial report was already shipped by `init`.
            loop {
                ticker.tick().await;
                if !engine.is_initialized() {
                    continue;
                }
                engine.collect_and_report().await;
            }
        });
        let mut guard = self.state.lock().expect("engine state lock poisoned");
        guard.timer_handle = Some(handle);
    }

    /// Stops the timer, stops the Recorder and Observer, marks
    /// uninitialized. Idempotent.
    pub fn shutdown(&self) {
        let mut guard = self.state.lock().expect("engine state lock poisoned");
        if !guard.initialized {
            return;
        }
        if let Some(handle) = guard.timer_handle.take() {
            handle.abort();
        }
        guard.initialized = false;
        drop(guard);

        self.recorder.lock().expect("recorder lock poisoned").stop_monitoring();
        self.injection.lock().expect("injection lock poisoned").stop_monitoring();
        tracing::debug!("engine shut down");
    }

    fn min_report_score(&self) -> u32 {
        self.state.lock().expect("engine state lock poisoned").config.min_report_score
    }

    async fn ship_fingerprint_only(&self, fingerprint: &Fingerprint) {
        let (session_key, context_id) = {
            let guard = self.state.lock().expect("engine state lock poisoned");
            (guard.config.session_key.clone(), guard.config.context_id)
        };
        let Some(session_key) = session_key else {
            tracing::debug!("configuration omission: no sessionKey, suppressing fingerprint-only report");
            return;
        };
        let Ok(signaldata) = serde_json::to_string(fingerprint) else {
            return;
        };
        let session_id = self.session_id().unwrap_or_default();
        let payload = ReportPayload::new(session_key, context_id, session_id, SignalType::Fingerprint, signaldata);
        if let Err(err) = self.report_client.report(&payload).await {
            tracing::debug!(%err, "fingerprint-only report failed");
        }
    }

    async fn ship(&self, signal_type: SignalType, report: &ReportData) {
        let (session_key, context_id) = {
            let guard = self.state.lock().expect("engine state lock poisoned");
            (guard.config.session_key.clone(), guard.config.context_id)
        };
        let Some(session_key) = session_key else {
            tracing::debug!("configuration omission: no sessionKey, suppressing report");
            return;
        };
        let Ok(signaldata) = serde_json::to_string(report) else {
            tracing::debug!("failed to serialize report payload");
            return;
        };
        let payload = ReportPayload::new(session_key, context_id, report.session_id.clone(), signal_type, signaldata);
        if let Err(err) = self.report_client.report(&payload).await {
            tracing::debug!(%err, "report failed");
        }
    }
}
