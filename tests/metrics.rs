#![cfg(feature = "metrics")]
//! Tests for `pollframe` engine counters and the recorder sink.
//!
//! These tests verify that counters and gauges update as expected using
//! `metrics_util::debugging::DebuggingRecorder`.

use metrics_util::debugging::DebugValue;
use pollframe::{
    DecoderRegistry,
    FrameRouter,
    MetricSink,
    MetricStore,
    MetricValue,
    RecorderSink,
    Unit,
    metrics::{FRAMES_DROPPED, FRAMES_PROCESSED, MESSAGES_ASSEMBLED, UNKNOWN_TARGETS},
};
use pollframe_testing::{counter_value, frame, record_metrics, split_reply, test_key};
use rstest::rstest;

fn empty_router() -> FrameRouter<MetricStore> {
    FrameRouter::new(DecoderRegistry::new(), MetricStore::default())
}

#[test]
fn completed_reply_counts_frames_and_message() {
    let frames = split_reply(test_key(), &[0; 13], 3, 7);
    let ((), snapshot) = record_metrics(|| empty_router().route_all(&frames));
    let snapshot = snapshot.into_vec();

    let counter = |name: &str| {
        snapshot.iter().find_map(|(key, _, _, value)| match value {
            DebugValue::Counter(c) if key.key().name() == name => Some(*c),
            _ => None,
        })
    };
    assert_eq!(counter(FRAMES_PROCESSED), Some(3));
    assert_eq!(counter(MESSAGES_ASSEMBLED), Some(1));
    assert_eq!(counter(UNKNOWN_TARGETS), Some(1));
    assert_eq!(counter(FRAMES_DROPPED), None);
}

#[rstest]
#[case::sequence_error(vec![(0, 10), (2, 3)], "sequence_error")]
#[case::no_active_session(vec![(1, 0)], "no_active_session")]
#[case::aborted(vec![(0, 10), (2, 3), (3, 0)], "aborted")]
fn dropped_frames_are_labelled_by_reason(#[case] frames: Vec<(u16, u16)>, #[case] reason: &str) {
    let key = test_key();
    let ((), snapshot) = record_metrics(|| {
        let mut router = empty_router();
        for (index, remaining) in frames {
            router.route(&frame(key, index, remaining, &[0; 3]));
        }
    });
    assert_eq!(
        counter_value(snapshot, FRAMES_DROPPED, &[("reason", reason)]),
        Some(1)
    );
}

#[test]
fn index_overflow_is_labelled() {
    let key = test_key();
    let ((), snapshot) = record_metrics(|| {
        let mut router = empty_router();
        for index in 0..=u16::MAX {
            router.route(&frame(key, index, 1, &[0]));
        }
        router.route(&frame(key, 1, 0, &[0]));
    });
    assert_eq!(
        counter_value(snapshot, FRAMES_DROPPED, &[("reason", "index_overflow")]),
        Some(1)
    );
}

#[test]
fn recorder_sink_sets_unit_labelled_gauges() {
    let ((), snapshot) = record_metrics(|| {
        let mut sink = RecorderSink;
        sink.set_metric("v.b.soc", MetricValue::Float(81.5), Unit::Percentage);
        sink.set_metric("v.d.hood", MetricValue::Bool(true), Unit::Native);
        sink.set_metric("v.vin", MetricValue::Text("KNDC".into()), Unit::Native);
    });
    let snapshot = snapshot.into_vec();

    let gauge = |name: &str| {
        snapshot.iter().find_map(|(key, _, _, value)| match value {
            DebugValue::Gauge(g) if key.key().name() == name => {
                let unit = key
                    .key()
                    .labels()
                    .find(|l| l.key() == "unit")
                    .map(|l| l.value().to_owned());
                Some((g.0, unit))
            }
            _ => None,
        })
    };
    assert_eq!(gauge("v.b.soc"), Some((81.5, Some("percentage".to_owned()))));
    assert_eq!(gauge("v.d.hood"), Some((1.0, Some("native".to_owned()))));
    assert_eq!(gauge("v.vin"), None);
}
