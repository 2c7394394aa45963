// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[tokio::test]
async fn unknown_key_is_not_locked() {
    let mutex = KeyedMutex::new();
    assert!(!mutex.is_locked("sddc-1"));
    assert!(mutex.is_empty());
}

#[tokio::test]
async fn lock_marks_key_held_until_guard_dropped() {
    let mutex = KeyedMutex::new();

    let guard = mutex.lock("sddc-1").await;
    assert_eq!(guard.key(), "sddc-1");
    assert!(mutex.is_locked("sddc-1"));

    drop(guard);
    assert!(!mutex.is_locked("sddc-1"));
}

#[tokio::test]
async fn try_lock_fails_while_held() {
    let mutex = KeyedMutex::new();

    let guard = mutex.try_lock("sddc-1").unwrap();
    assert!(mutex.try_lock("sddc-1").is_none());

    drop(guard);
    assert!(mutex.try_lock("sddc-1").is_some());
}

#[tokio::test]
async fn different_keys_do_not_block_each_other() {
    let mutex = KeyedMutex::new();

    let _first = mutex.lock("sddc-1").await;
    let second = tokio::time::timeout(Duration::from_millis(100), mutex.lock("sddc-2")).await;

    assert!(second.is_ok(), "sddc-2 should not wait on sddc-1");
    assert!(mutex.is_locked("sddc-1"));
}

#[tokio::test]
async fn keys_are_created_once_and_retained() {
    let mutex = KeyedMutex::new();

    drop(mutex.lock("sddc-1").await);
    drop(mutex.lock("sddc-1").await);
    drop(mutex.lock("sddc-2").await);

    assert_eq!(mutex.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn waiter_proceeds_only_after_release() {
    let mutex = Arc::new(KeyedMutex::new());
    let guard = mutex.lock("sddc-1").await;

    let waiter = {
        let mutex = Arc::clone(&mutex);
        tokio::spawn(async move {
            let _guard = mutex.lock("sddc-1").await;
        })
    };

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(!waiter.is_finished(), "second acquirer must wait");

    drop(guard);
    waiter.await.unwrap();
    assert!(!mutex.is_locked("sddc-1"));
}

#[tokio::test(start_paused = true)]
async fn same_key_critical_sections_never_overlap() {
    let mutex = Arc::new(KeyedMutex::new());
    let active = Arc::new(AtomicUsize::new(0));
    let max_active = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let mutex = Arc::clone(&mutex);
            let active = Arc::clone(&active);
            let max_active = Arc::clone(&max_active);
            tokio::spawn(async move {
                let _guard = mutex.lock("sddc-1").await;
                let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                max_active.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10)).await;
                active.fetch_sub(1, Ordering::SeqCst);
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(max_active.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn waiters_acquire_in_arrival_order() {
    let mutex = Arc::new(KeyedMutex::new());
    let order = Arc::new(Mutex::new(Vec::new()));
    let guard = mutex.lock("sddc-1").await;

    let mut handles = Vec::new();
    for i in 0..3 {
        let mutex = Arc::clone(&mutex);
        let order = Arc::clone(&order);
        handles.push(tokio::spawn(async move {
            let _guard = mutex.lock("sddc-1").await;
            order.lock().unwrap().push(i);
        }));
        // Let each waiter enqueue before spawning the next one
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    drop(guard);
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_first_use_shares_one_lock() {
    let mutex = Arc::new(KeyedMutex::new());
    let active = Arc::new(AtomicUsize::new(0));
    let overlaps = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let mutex = Arc::clone(&mutex);
            let active = Arc::clone(&active);
            let overlaps = Arc::clone(&overlaps);
            tokio::spawn(async move {
                let _guard = mutex.lock("fresh-sddc").await;
                if active.fetch_add(1, Ordering::SeqCst) > 0 {
                    overlaps.fetch_add(1, Ordering::SeqCst);
                }
                tokio::task::yield_now().await;
                active.fetch_sub(1, Ordering::SeqCst);
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(mutex.len(), 1);
    assert_eq!(overlaps.load(Ordering::SeqCst), 0);
}
