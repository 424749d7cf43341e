use futures::FutureExt;

use crate::{
    AsyncEnumerator, AsyncSequence, AsyncSequenceExt, Error, batched, testing::Probe, yield_now,
};

const DATA: [i32; 14] = [5, 3, 8, 1, 9, 2, 7, 4, 6, 0, 12, 11, 10, 13];

#[tokio::test]
async fn chains_match_std_iterators_for_every_batch_size() {
    for batch in 1..=DATA.len() + 1 {
        let seq = batched(DATA, batch);

        let got = seq
            .clone()
            .filter(|v| v % 2 == 0)
            .map(|v| v * 3)
            .skip(1)
            .take(4)
            .to_list()
            .await
            .unwrap();
        let want: Vec<_> = DATA
            .into_iter()
            .filter(|v| v % 2 == 0)
            .map(|v| v * 3)
            .skip(1)
            .take(4)
            .collect();
        assert_eq!(got, want, "batch = {batch}");

        let got = seq
            .clone()
            .skip_while(|v| *v < 8)
            .take_while(|v| *v != 0)
            .map(|v| v - 1)
            .to_list()
            .await
            .unwrap();
        let want: Vec<_> = DATA
            .into_iter()
            .skip_while(|v| *v < 8)
            .take_while(|v| *v != 0)
            .map(|v| v - 1)
            .collect();
        assert_eq!(got, want, "batch = {batch}");

        let got = seq
            .clone()
            .take(6)
            .flat_map(|v| [v, -v])
            .then(|v| async move { v * 10 })
            .skip(3)
            .to_list()
            .await
            .unwrap();
        let want: Vec<_> = DATA
            .into_iter()
            .take(6)
            .flat_map(|v| [v, -v])
            .map(|v| v * 10)
            .skip(3)
            .collect();
        assert_eq!(got, want, "batch = {batch}");
    }
}

#[tokio::test]
async fn re_enumeration_reproduces_output() {
    let seq = batched(DATA, 3)
        .filter(|v| *v > 2)
        .flat_map_async(|v| batched(0..v % 4, 2))
        .map(|v| v + 1);
    let first = seq.to_list().await.unwrap();
    assert!(!first.is_empty());
    assert_eq!(seq.to_list().await.unwrap(), first);
    assert_eq!(seq.count().await.unwrap(), first.len());
}

#[tokio::test]
async fn self_join_matches_synchronous_join() {
    let values: Vec<i32> = (1..=10).collect();
    let want: Vec<i32> = values
        .iter()
        .flat_map(|x| values.iter().filter(move |y| *y == x).map(move |y| x + y))
        .collect();

    for left_batch in [1, 3, 10] {
        for right_batch in [1, 4, 11] {
            let seq = batched(values.clone(), left_batch).join(
                batched(values.clone(), right_batch),
                |v| *v,
                |v| *v,
                |x, y| x + y,
            );
            assert_eq!(
                seq.to_list().await.unwrap(),
                want,
                "left = {left_batch}, right = {right_batch}"
            );
        }
    }
}

#[tokio::test]
async fn counting_consumers_drain_fully() {
    let probe = Probe::new();
    assert_eq!(probe.source("s", Vec::<i32>::new(), 3).count().await.unwrap(), 0);
    assert_eq!(probe.source("s", (1..=10).collect(), 3).count().await.unwrap(), 10);
    assert_eq!(probe.pulls(), 10);
    assert_eq!(
        probe
            .source("s", (1..=10).collect(), 3)
            .count_where(|v| *v > 2)
            .await
            .unwrap(),
        8
    );
    assert_eq!(probe.pulls(), 20);
}

#[tokio::test]
async fn any_stops_at_the_first_match() {
    let probe = Probe::new();
    let seq = probe.source("s", (1..=10).collect(), 4);
    assert!(seq.any_where(|v| *v == 1).await.unwrap());
    assert_eq!(probe.pulls(), 1);
}

#[tokio::test]
async fn all_stops_at_the_first_miss() {
    let probe = Probe::new();
    let seq = probe.source("s", (1..=10).collect(), 4);
    assert!(!seq.all(|v| *v < 3).await.unwrap());
    assert_eq!(probe.pulls(), 3);
}

#[tokio::test]
async fn single_stops_at_the_second_element() {
    let probe = Probe::new();
    let seq = probe.source("s", (1..=10).collect(), 10);
    assert!(matches!(seq.single().await, Err(Error::MultipleElements)));
    assert_eq!(probe.pulls(), 2);
    assert_eq!(probe.released(), ["s"]);
}

#[tokio::test]
async fn nested_chain_releases_innermost_first_exactly_once() {
    let probe = Probe::new();
    let inner = probe.clone();
    let seq = probe
        .source("outer", vec![1, 2, 3], 2)
        .flat_map_async(move |n| {
            let values = vec![n * 10, n * 10 + 1, n * 10 + 2];
            inner.source(format!("inner{n}"), values, 2)
        })
        .take(4)
        .map(|v| v + 1)
        .filter(|v| v % 2 == 1);

    let mut e = seq.enumerator();
    let mut out = Vec::new();
    while let Some(v) = e.next().await.unwrap() {
        out.push(v);
    }
    assert_eq!(out, vec![11, 13, 21]);
    // The first inner cursor went away when it ran dry.
    assert_eq!(probe.released(), ["inner1"]);

    drop(e);
    assert_eq!(probe.released(), ["inner1", "inner2", "outer"]);
}

#[tokio::test]
async fn flat_map_releases_inner_iterator_before_source() {
    let probe = Probe::new();
    let inner = probe.clone();
    let seq = probe
        .source("outer", vec![1, 2, 3], 2)
        .flat_map(move |n| inner.collection(format!("inner{n}"), vec![n * 10, n * 10 + 1]))
        .take(3);

    let mut e = seq.enumerator();
    let mut out = Vec::new();
    while let Some(v) = e.next().await.unwrap() {
        out.push(v);
    }
    assert_eq!(out, vec![10, 11, 20]);
    assert_eq!(probe.released(), ["inner1"]);

    // Abandoned with 21 still unread.
    drop(e);
    assert_eq!(probe.released(), ["inner1", "inner2", "outer"]);
}

#[tokio::test]
async fn flat_map_future_releases_inner_iterator_before_source() {
    let probe = Probe::new();
    let inner = probe.clone();
    let seq = probe
        .source("outer", vec![1, 2, 3], 3)
        .flat_map_future(move |n| {
            let values = inner.collection(format!("inner{n}"), vec![n * 10, n * 10 + 1]);
            async move {
                yield_now().await;
                values
            }
        })
        .take(3);

    let mut e = seq.enumerator();
    let mut out = Vec::new();
    while let Some(v) = e.next().await.unwrap() {
        out.push(v);
    }
    assert_eq!(out, vec![10, 11, 20]);
    assert_eq!(probe.released(), ["inner1"]);

    drop(e);
    assert_eq!(probe.released(), ["inner1", "inner2", "outer"]);
}

#[tokio::test]
async fn flat_map_future_releases_a_pending_selector_before_source() {
    let probe = Probe::new();
    let inner = probe.clone();
    let mut e = probe
        .source("outer", vec![1, 2], 2)
        .flat_map_future(move |n| {
            let values = inner.collection(format!("inner{n}"), vec![n]);
            async move {
                yield_now().await;
                values
            }
        })
        .enumerator();

    assert_eq!(e.next().await.unwrap(), Some(1));
    // Stops inside the second selector.
    assert!(e.advance().now_or_never().is_none());
    assert_eq!(probe.released(), ["inner1"]);

    drop(e);
    assert_eq!(probe.released(), ["inner1", "inner2", "outer"]);
}

#[tokio::test]
async fn consumers_release_on_error() {
    let probe = Probe::new();
    let seq = probe.source("s", vec![1, 2], 1);
    assert!(matches!(seq.single().await, Err(Error::MultipleElements)));
    assert!(matches!(
        probe.source("t", Vec::<i32>::new(), 1).first().await,
        Err(Error::EmptySequence)
    ));
    assert_eq!(probe.released(), ["s", "t"]);
}
