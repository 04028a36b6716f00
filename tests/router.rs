//! Integration tests for frame routing, dispatch and drop logging.

use std::{cell::RefCell, rc::Rc};

use log::Level;
use pollframe::{
    DecoderRegistry,
    DispatchOutcome,
    DropReason,
    FrameIndex,
    FrameRouter,
    MessageType,
    MetricSink,
    MetricStore,
    MetricValue,
    ModuleId,
    ParameterId,
    PollFrame,
    RouteOutcome,
    SessionKey,
    SessionState,
    Unit,
};
use pollframe_testing::{LoggerHandle, frame, logger, split_reply, test_key};
use rstest::{fixture, rstest};

type Calls = Rc<RefCell<Vec<Vec<u8>>>>;

/// Router whose only routine records every payload it receives.
fn recording_router(key: SessionKey) -> (FrameRouter<MetricStore>, Calls) {
    let calls = Calls::default();
    let seen = Rc::clone(&calls);
    let mut registry = DecoderRegistry::new();
    registry
        .register(
            key.module_recv,
            key.message_type,
            key.parameter_id,
            move |payload: &[u8], sink: &mut dyn MetricSink| {
                seen.borrow_mut().push(payload.to_vec());
                let len = payload.len().try_into().unwrap_or(i64::MAX);
                sink.set_metric("test.len", MetricValue::Int(len), Unit::Native);
            },
        )
        .expect("register routine");
    (FrameRouter::new(registry, MetricStore::default()), calls)
}

#[fixture]
fn router() -> (FrameRouter<MetricStore>, Calls) { recording_router(test_key()) }

#[rstest]
fn routine_runs_once_per_completed_reply(router: (FrameRouter<MetricStore>, Calls)) {
    let (mut router, calls) = router;
    let payload: Vec<u8> = (1..=13).collect();
    let frames = split_reply(test_key(), &payload, 3, 7);

    assert_eq!(router.route(&frames[0]), RouteOutcome::Pending);
    assert_eq!(router.route(&frames[1]), RouteOutcome::Pending);
    assert_eq!(
        router.route(&frames[2]),
        RouteOutcome::Dispatched(DispatchOutcome::Decoded)
    );
    assert_eq!(calls.borrow().as_slice(), &[payload]);
    assert_eq!(router.sink().value("test.len"), Some(&MetricValue::Int(13)));
    assert_eq!(router.session().state(), SessionState::Idle);
}

#[rstest]
fn gap_is_dropped_and_logged(router: (FrameRouter<MetricStore>, Calls), mut logger: LoggerHandle) {
    let (mut router, calls) = router;
    let key = test_key();
    router.route(&frame(key, 0, 10, &[1, 2, 3]));
    router.route(&frame(key, 1, 3, &[4, 5, 6, 7, 8, 9, 10]));

    let outcome = router.route(&frame(key, 3, 0, &[11, 12, 13]));
    assert_eq!(
        outcome,
        RouteOutcome::Dropped(DropReason::SequenceError {
            expected: FrameIndex::new(2),
            found: FrameIndex::new(3),
        })
    );
    assert!(calls.borrow().is_empty());
    assert_eq!(router.session().state(), SessionState::Aborted);

    let messages = logger.drain_messages(Level::Info);
    let key = key.to_string();
    assert!(
        messages.iter().any(|m| {
            m.starts_with("frame dropped:") && m.contains("index=3") && m.contains(&key)
        }),
        "drop not logged: {messages:?}"
    );
}

#[rstest]
fn aborted_reply_recovers_on_next_first_frame(router: (FrameRouter<MetricStore>, Calls)) {
    let (mut router, calls) = router;
    let key = test_key();
    router.route(&frame(key, 0, 10, &[1, 2, 3]));
    router.route(&frame(key, 2, 3, &[0; 7]));
    assert_eq!(
        router.route(&frame(key, 3, 0, &[0; 3])),
        RouteOutcome::Dropped(DropReason::Aborted)
    );

    for reply in split_reply(key, &[9; 10], 3, 7) {
        router.route(&reply);
    }
    assert_eq!(calls.borrow().as_slice(), &[vec![9; 10]]);
}

#[rstest]
fn unknown_target_is_logged_not_failed(mut logger: LoggerHandle) {
    let mut router = FrameRouter::new(DecoderRegistry::new(), MetricStore::default());
    let key = SessionKey::new(ModuleId(0x7a8), MessageType::OBDII_EXTENDED, ParameterId(0xb00c));

    assert_eq!(
        router.route(&frame(key, 0, 0, &[0x00, 0x01, 0x02, 0x03, 0x20])),
        RouteOutcome::Dispatched(DispatchOutcome::UnknownTarget)
    );
    assert!(router.sink().is_empty());

    let messages = logger.drain_messages(Level::Info);
    assert!(
        messages
            .iter()
            .any(|m| m.starts_with("unknown target:") && m.contains(&key.to_string())),
        "unknown target not logged: {messages:?}"
    );
}

#[rstest]
fn frames_of_other_exchanges_do_not_disturb_reply(router: (FrameRouter<MetricStore>, Calls)) {
    let (mut router, calls) = router;
    let key = test_key();
    let other = SessionKey::new(ModuleId(0x7ea), MessageType::OBDII_GROUP, ParameterId(0x02));

    router.route(&frame(key, 0, 7, &[1, 2, 3]));
    assert!(matches!(
        router.route(&frame(other, 1, 0, &[0; 7])),
        RouteOutcome::Dropped(DropReason::KeyMismatch { .. })
    ));
    assert_eq!(
        router.route(&frame(key, 1, 0, &[4, 5, 6, 7, 8, 9, 10])),
        RouteOutcome::Dispatched(DispatchOutcome::Decoded)
    );
    assert_eq!(calls.borrow().as_slice(), &[(1..=10).collect::<Vec<u8>>()]);
}

#[test]
fn per_frame_routine_sees_every_frame_before_reassembly() {
    let key = test_key();
    let indices = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&indices);
    let mut registry = DecoderRegistry::new();
    registry
        .register_per_frame(
            key.module_recv,
            key.message_type,
            key.parameter_id,
            move |frame: &PollFrame, _sink: &mut dyn MetricSink| {
                seen.borrow_mut().push(frame.frame_index.get());
            },
        )
        .expect("register per-frame routine");
    let mut router = FrameRouter::new(registry, MetricStore::default());

    let frames = split_reply(key, &[0; 17], 3, 7);
    let outcomes: Vec<_> = frames.iter().map(|f| router.route(f)).collect();

    assert_eq!(*indices.borrow(), vec![0, 1, 2]);
    assert_eq!(
        outcomes.last(),
        Some(&RouteOutcome::Dispatched(DispatchOutcome::UnknownTarget))
    );
}
