//! WebDriver probe: spec.md §4.2 "WebDriver".

use agentdetect_core::types::AnomalySignal;

use crate::ports::RuntimeEnvironment;
use crate::report::SignalGroup;
use crate::signals;

pub fn probe(env: &impl RuntimeEnvironment) -> SignalGroup {
    let mut group = SignalGroup::default();

    if env.webdriver_now() {
        group.push(AnomalySignal::new(signals::WEBDRIVER_TRUE, 1.0, 10));
    }
    if env.webdriver_now() && !env.webdriver_at_load() {
        group.push(AnomalySignal::new(
            signals::WEBDRIVER_CHANGED_MID_SESSION,
            1.0,
            10,
        ));
    }
    if !env.webdriver_getter_is_native() {
        group.push(AnomalySignal::new(signals::WEBDRIVER_GETTER_REPLACED, 1.0, 9));
    }

    group
}
