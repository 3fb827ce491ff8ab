use std::cell::{Cell, RefCell};
use std::future::{self, Future};
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};
use std::time::Duration;

use basis::executor::{block_on, Clock, LocalPool};
use basis::promise::{delay, Promise};
use basis::schedule::Schedule;
use basis_test::virtual_pool;

struct Pending;

impl Future for Pending {
    type Output = ();

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
        Poll::Pending
    }
}

fn pending() -> Pending {
    Pending
}

#[test]
fn run_until_single_future() {
    let cnt = Cell::new(0);
    {
        let mut pool = LocalPool::new();
        let fut = future::poll_fn(|_| {
            cnt.set(cnt.get() + 1);
            Poll::Ready(())
        });
        assert_eq!(pool.run_until(fut), Some(()));
    }
    assert_eq!(cnt.get(), 1);
}

#[test]
fn run_until_ignores_spawned() {
    let mut pool = LocalPool::new();
    pool.spawn_local(pending());
    assert_eq!(pool.run_until(future::ready(7)), Some(7));
}

#[test]
fn run_until_executes_spawned() {
    let mut pool = virtual_pool();
    let p = Promise::<u8, ()>::new(&pool.spawner());
    let tx = p.clone();
    pool.spawn_local(async move {
        tx.resolve(3);
    });
    assert_eq!(pool.run_until(p), Some(Ok(3)));
}

#[test]
fn run_executes_spawned() {
    let cnt = Rc::new(Cell::new(0));
    let mut pool = LocalPool::new();
    for _ in 0..3 {
        let cnt = cnt.clone();
        pool.spawn_local(async move {
            cnt.set(cnt.get() + 1);
        });
    }
    assert_eq!(cnt.get(), 0);
    pool.run();
    assert_eq!(cnt.get(), 3);
}

#[test]
fn run_spawn_many() {
    const ITER: usize = 200;
    let cnt = Rc::new(Cell::new(0));
    let mut pool = virtual_pool();
    let spawner = pool.spawner();
    for _ in 0..ITER {
        let cnt = cnt.clone();
        spawner.spawn_fn(move || cnt.set(cnt.get() + 1)).unwrap();
    }
    assert_eq!(pool.run_until_stalled(), ITER);
    assert_eq!(cnt.get(), ITER);
}

#[test]
fn tasks_spawned_while_running_run_in_the_same_pass() {
    let order = Rc::new(RefCell::new(Vec::new()));
    let mut pool = virtual_pool();
    let spawner = pool.spawner();
    let (outer, inner) = (order.clone(), order.clone());
    let nested = spawner.clone();
    spawner
        .spawn_fn(move || {
            outer.borrow_mut().push("outer");
            nested.spawn_fn(move || inner.borrow_mut().push("inner")).unwrap();
        })
        .unwrap();
    pool.run_until_stalled();
    assert_eq!(*order.borrow(), ["outer", "inner"]);
}

#[test]
fn timers_wait_on_the_virtual_clock() {
    let mut pool = LocalPool::builder().clock(Clock::Virtual).build();
    let spawner = pool.spawner();
    let fired = Rc::new(Cell::new(None));
    let (seen, clock) = (fired.clone(), spawner.clone());
    spawner
        .schedule_after(Duration::from_secs(3600), Box::new(move || seen.set(Some(clock.now()))))
        .unwrap();
    assert_eq!(pool.run_until_stalled(), 0);
    assert_eq!(fired.get(), None);
    pool.run();
    assert_eq!(fired.get(), Some(3_600_000));
}

#[test]
fn run_until_stalled_leaves_future_timers_alone() {
    let mut pool = virtual_pool();
    let p = delay::<_, ()>(&pool.spawner(), Duration::from_millis(50), ());
    pool.run_until_stalled();
    assert!(p.is_pending());
    assert_eq!(pool.now(), 0);
    pool.advance(Duration::from_millis(49));
    assert!(p.is_pending());
    pool.advance(Duration::from_millis(1));
    assert!(p.is_resolved());
}

#[test]
fn block_on_waits_for_real_timers() {
    assert_eq!(block_on(async { 5 }), 5);

    let mut pool = LocalPool::new();
    let started = pool.now();
    let p = delay::<_, ()>(&pool.spawner(), Duration::from_millis(20), "late");
    assert_eq!(pool.run_until(p), Some(Ok("late")));
    assert!(pool.now() >= started + 20);
}

#[test]
fn dropped_pool_rejects_new_work() {
    let pool = virtual_pool();
    let spawner = pool.spawner();
    drop(pool);
    assert!(spawner.spawn_fn(|| {}).is_err());
    assert_eq!(spawner.now(), 0);
}
