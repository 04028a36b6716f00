//! Metric capture through `metrics-util`'s debugging recorder.

use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshot};

/// Run `f` with a thread-local debugging recorder and return what it saw.
pub fn record_metrics<T>(f: impl FnOnce() -> T) -> (T, Snapshot) {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let result = metrics::with_local_recorder(&recorder, f);
    (result, snapshotter.snapshot())
}

/// Value of the counter `name` whose labels include every pair in `labels`.
///
/// Returns `None` when no such counter was recorded.
#[must_use]
pub fn counter_value(snapshot: Snapshot, name: &str, labels: &[(&str, &str)]) -> Option<u64> {
    snapshot
        .into_vec()
        .into_iter()
        .find_map(|(key, _, _, value)| {
            let key = key.key();
            let matches = key.name() == name
                && labels
                    .iter()
                    .all(|(k, v)| key.labels().any(|l| l.key() == *k && l.value() == *v));
            match value {
                DebugValue::Counter(count) if matches => Some(count),
                _ => None,
            }
        })
}
