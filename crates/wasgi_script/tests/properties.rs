//! Property tests: ordering of tick deltas and bounded guest object counts.

use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use wasgi_core::scene::SceneStore;
use wasgi_script::ScriptHost;
use wasgi_services::{HostConfig, MemorySink};

const COUNTING_HOOK: &str = r#"
    function onupdate(dt) {
        if (globalThis.fail) throw new Error('scheduled failure');
        globalThis.total = (globalThis.total || 0) + dt;
    }
"#;

/// Objects the host may legitimately add on top of the warmed-up baseline.
const OBJECT_SLACK: i64 = 16;

#[derive(Debug, Clone)]
enum Step {
    Reload,
    BadLoad,
    Arm(bool),
    Tick(f32),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Reload),
        Just(Step::BadLoad),
        any::<bool>().prop_map(Step::Arm),
        (0.0f32..1.0).prop_map(Step::Tick),
    ]
}

fn new_host() -> (ScriptHost, Rc<MemorySink>) {
    let sink = Rc::new(MemorySink::new());
    let scene = Rc::new(RefCell::new(SceneStore::new()));
    let host = ScriptHost::new(HostConfig::default(), sink.clone(), scene).unwrap();
    (host, sink)
}

fn apply(host: &ScriptHost, step: &Step) {
    match step {
        Step::Reload => host.evaluate(COUNTING_HOOK).unwrap(),
        Step::BadLoad => assert!(host.evaluate("throw new Error('bad load');").is_err()),
        Step::Arm(fail) => host
            .evaluate(&format!("globalThis.fail = {fail};"))
            .unwrap(),
        Step::Tick(dt) => {
            let _ = host.tick(*dt);
        }
    }
}

/// Run every step kind once so lazily created engine objects exist.
fn baseline(host: &ScriptHost) -> i64 {
    for step in [
        Step::Reload,
        Step::BadLoad,
        Step::Arm(true),
        Step::Tick(0.1),
        Step::Arm(false),
        Step::Tick(0.1),
    ] {
        apply(host, &step);
    }
    host.run_gc();
    host.object_count()
}

#[test]
fn long_running_cycles_do_not_grow_the_heap() {
    let (host, _sink) = new_host();
    let before = baseline(&host);

    for round in 0..500 {
        apply(&host, &Step::Reload);
        apply(&host, &Step::Arm(round % 3 == 0));
        apply(&host, &Step::Tick(0.016));
        apply(&host, &Step::BadLoad);
    }
    host.run_gc();

    assert!(
        host.object_count() <= before + OBJECT_SLACK,
        "object count grew from {before} to {}",
        host.object_count()
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn hook_sees_every_delta_in_order(deltas in prop::collection::vec(-1.0e3f32..1.0e3, 0..64)) {
        let (host, sink) = new_host();
        host.evaluate("globalThis.seen = []; function onupdate(dt) { seen.push(dt); }").unwrap();

        for dt in &deltas {
            host.tick(*dt).unwrap();
        }

        let seen: Vec<f64> = host.with(|ctx| ctx.globals().get("seen").unwrap());
        let expected: Vec<f64> = deltas.iter().copied().map(f64::from).collect();
        prop_assert_eq!(seen, expected);
        prop_assert!(sink.is_empty());
    }

    #[test]
    fn interleaved_cycles_keep_object_count_bounded(steps in prop::collection::vec(step(), 1..200)) {
        let (host, sink) = new_host();
        let before = baseline(&host);
        sink.take();

        let mut expected_errors = 0;
        let mut armed = false;
        for step in &steps {
            match step {
                Step::BadLoad => expected_errors += 1,
                Step::Arm(fail) => armed = *fail,
                Step::Tick(_) if armed => expected_errors += 1,
                Step::Reload | Step::Tick(_) => {}
            }
            apply(&host, step);
        }
        host.run_gc();

        prop_assert_eq!(sink.errors().len(), expected_errors);
        prop_assert!(host.object_count() <= before + OBJECT_SLACK);
    }
}
