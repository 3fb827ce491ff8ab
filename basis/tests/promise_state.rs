use basis::executor::{Clock, LocalPool};
use basis::promise::{Promise, Rejection, State};
use basis_test::{
    assert_cancelled, assert_pending, assert_rejected, assert_resolved, rejected_handled,
    virtual_pool, Recorder,
};

#[test]
fn first_transition_wins() {
    let mut pool = virtual_pool();
    let spawner = pool.spawner();

    let p = Promise::<i32, i32>::new(&spawner);
    p.resolve(1);
    p.reject(2);
    p.cancel(3);
    assert_resolved!(p, 1);

    let p = Promise::<i32, i32>::new(&spawner);
    p.cancel(3).resolve(1).reject(2);
    assert_cancelled!(p, 3);

    let p = rejected_handled::<i32, i32>(&spawner, 2);
    p.resolve(1).cancel(3);
    assert_rejected!(p, 2);

    pool.run();
    assert!(pool.take_unhandled().is_empty());
}

#[test]
fn cancel_discards_done_and_fail() {
    let mut pool = virtual_pool();
    let p = Promise::<&str, &str>::new(&pool.spawner());
    let seen = Recorder::new();
    let (done, fail, cancelled) = (seen.clone(), seen.clone(), seen.clone());
    p.done(move |v| done.push(format!("done {}", v)))
        .fail(move |e| fail.push(format!("fail {}", e)))
        .on_cancel(move |e| cancelled.push(format!("cancel {}", e)));
    p.cancel("stop");
    assert!(seen.is_empty());
    pool.run();
    assert_eq!(seen.take(), ["cancel stop"]);

    // Registering after the fact follows the same rule.
    let late = seen.clone();
    p.done(move |_| late.push("late done".to_string()));
    let late = seen.clone();
    p.on_cancel(move |e| late.push(format!("late cancel {}", e)));
    pool.run();
    assert_eq!(seen.take(), ["late cancel stop"]);
}

#[test]
fn always_sees_resolution_and_rejection() {
    let mut pool = virtual_pool();
    let spawner = pool.spawner();
    let seen = Recorder::new();

    Promise::<u8, u8>::resolved(&spawner, 1).always(seen.sink());
    Promise::<u8, u8>::rejected(&spawner, 2).always(seen.sink());
    Promise::<u8, u8>::cancelled(&spawner, 3).always(seen.sink());
    pool.run();
    assert_eq!(seen.take(), [Ok(1), Err(2)]);
}

#[test]
fn rejecting_without_a_listener_is_reported() {
    let mut pool = virtual_pool();
    pool.advance(std::time::Duration::from_millis(25));
    let p = Promise::<(), String>::new(&pool.spawner());
    p.reject("nobody listens".to_string());
    pool.run();

    let unhandled = pool.take_unhandled();
    assert_eq!(unhandled.len(), 1);
    assert_eq!(unhandled[0].reason(), "\"nobody listens\"");
    assert_eq!(unhandled[0].at(), 25);
    assert!(pool.take_unhandled().is_empty());

    // A listener registered after the rejection does not undo the report,
    // but still runs.
    let seen = Recorder::new();
    p.fail(seen.sink());
    pool.run();
    assert_eq!(seen.take(), ["nobody listens"]);
    assert!(pool.take_unhandled().is_empty());
}

#[test]
fn hook_sees_unhandled_rejections() {
    let seen = Recorder::new();
    let sink = seen.clone();
    let mut pool = LocalPool::builder()
        .clock(Clock::Virtual)
        .on_unhandled(move |rejection| sink.push(rejection.reason().to_string()))
        .build();
    Promise::<(), i32>::new(&pool.spawner()).reject(7);
    assert_eq!(seen.take(), ["7"]);
    pool.run();
    assert_eq!(pool.take_unhandled().len(), 1);
}

#[test]
#[should_panic(expected = "unhandled rejection")]
fn strict_pool_panics_on_unhandled_rejection() {
    let mut pool = basis_test::strict_pool();
    let p = Promise::<(), &str>::new(&pool.spawner());
    let inner = p.clone();
    pool.spawner()
        .spawn_fn(move || {
            inner.reject("boom");
        })
        .unwrap();
    pool.run();
}

#[test]
fn state_and_display() {
    let pool = virtual_pool();
    let spawner = pool.spawner();
    let p = Promise::<(), ()>::new(&spawner);
    assert_pending!(p);
    assert_eq!(p.state(), State::Pending);
    assert!(!p.state().is_settled());
    assert_eq!(p.to_string(), "Promise:pending");

    p.resolve(());
    assert!(p.is_resolved());
    assert!(p.state().is_settled());
    assert_eq!(p.to_string(), "Promise:resolved");
    assert_eq!(Promise::<(), ()>::cancelled(&spawner, ()).to_string(), "Promise:cancelled");
    assert_eq!(Promise::<(), ()>::rejected(&spawner, ()).to_string(), "Promise:rejected");
}

#[test]
fn awaiting_a_promise() {
    let mut pool = virtual_pool();
    let spawner = pool.spawner();

    let p = Promise::<u32, &str>::new(&spawner);
    let producer = p.clone();
    spawner
        .spawn_fn(move || {
            producer.resolve(42);
        })
        .unwrap();
    assert_eq!(pool.run_until(p.clone()), Some(Ok(42)));

    let p = Promise::<u32, &str>::new(&spawner);
    p.cancel("gone");
    match pool.run_until(p) {
        Some(Err(rejection)) => {
            assert!(rejection.is_cancelled());
            assert_eq!(rejection, Rejection::Cancelled("gone"));
        }
        other => panic!("unexpected {:?}", other),
    }

    // Awaiting counts as handling the rejection.
    let p = Promise::<u32, &str>::new(&spawner);
    let waiting = p.clone();
    pool.spawn_local(async move {
        assert_eq!(waiting.await, Err(Rejection::Rejected("late")));
    });
    pool.run_until_stalled();
    p.reject("late");
    pool.run();
    assert!(pool.take_unhandled().is_empty());
}
