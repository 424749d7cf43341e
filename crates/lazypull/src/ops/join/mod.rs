mod lookup;

pub use lookup::*;

use core::{hash::Hash, mem};
use std::sync::Arc;

use crate::{
    error::Result,
    sequence::{AsyncEnumerator, AsyncSequence},
};

/// Sequence returned by [`AsyncSequenceExt::join`].
///
/// [`AsyncSequenceExt::join`]: crate::AsyncSequenceExt::join
pub struct Join<L, R, LK, RK, F> {
    left: L,
    right: R,
    left_key: Arc<LK>,
    right_key: Arc<RK>,
    result: Arc<F>,
}

impl<L, R, LK, RK, F> Join<L, R, LK, RK, F> {
    pub(crate) fn new(left: L, right: R, left_key: LK, right_key: RK, result: F) -> Self {
        Self {
            left,
            right,
            left_key: Arc::new(left_key),
            right_key: Arc::new(right_key),
            result: Arc::new(result),
        }
    }
}

impl<L, R, LK, RK, F> Clone for Join<L, R, LK, RK, F>
where
    L: Clone,
    R: Clone,
{
    fn clone(&self) -> Self {
        Self {
            left: self.left.clone(),
            right: self.right.clone(),
            left_key: Arc::clone(&self.left_key),
            right_key: Arc::clone(&self.right_key),
            result: Arc::clone(&self.result),
        }
    }
}

impl<L, R, K, O, LK, RK, F> AsyncSequence for Join<L, R, LK, RK, F>
where
    L: AsyncSequence,
    R: AsyncSequence,
    K: Eq + Hash,
    LK: Fn(&L::Item) -> K,
    RK: Fn(&R::Item) -> K,
    F: Fn(&L::Item, &R::Item) -> O,
{
    type Item = O;
    type Enumerator = JoinEnumerator<L::Enumerator, R::Enumerator, K, LK, RK, F>;

    fn enumerator(&self) -> Self::Enumerator {
        JoinEnumerator {
            cursor: None,
            phase: Phase::Draining {
                right: self.right.enumerator(),
                values: Vec::new(),
            },
            left: self.left.enumerator(),
            left_key: Arc::clone(&self.left_key),
            right_key: Arc::clone(&self.right_key),
            result: Arc::clone(&self.result),
        }
    }
}

enum Phase<ER, K, V> {
    /// The right side is still being read; `values` holds what has arrived.
    Draining { right: ER, values: Vec<V> },
    /// The right side is fully buffered.
    Probing(Lookup<K, V>),
}

/// The current left element and how far into its matches we are.
struct Cursor<T, K> {
    left: T,
    key: K,
    pos: usize,
}

/// Enumerator for [`Join`].
///
/// The first `advance` drains the right enumerator into a [`Lookup`] and
/// releases it, then pre-fetches the first left element. From then on
/// `advance` delegates to the left enumerator, and `try_get_next` walks the
/// matches of one left element at a time, pulling the next left element
/// through the left side's own `try_get_next`.
///
/// Right elements are buffered in the enumerator as they arrive, so a drain
/// interrupted by a dropped `advance` carries on where it stopped.
pub struct JoinEnumerator<EL, ER, K, LK, RK, F>
where
    EL: AsyncEnumerator,
    ER: AsyncEnumerator,
{
    cursor: Option<Cursor<EL::Item, K>>,
    phase: Phase<ER, K, ER::Item>,
    left: EL,
    left_key: Arc<LK>,
    right_key: Arc<RK>,
    result: Arc<F>,
}

impl<EL, ER, K, LK, RK, F> JoinEnumerator<EL, ER, K, LK, RK, F>
where
    EL: AsyncEnumerator,
    ER: AsyncEnumerator,
    LK: Fn(&EL::Item) -> K,
{
    fn cursor_for(&self, left: EL::Item) -> Cursor<EL::Item, K> {
        let key = (self.left_key)(&left);
        Cursor { left, key, pos: 0 }
    }
}

impl<EL, ER, K, O, LK, RK, F> AsyncEnumerator for JoinEnumerator<EL, ER, K, LK, RK, F>
where
    EL: AsyncEnumerator,
    ER: AsyncEnumerator,
    K: Eq + Hash,
    LK: Fn(&EL::Item) -> K,
    RK: Fn(&ER::Item) -> K,
    F: Fn(&EL::Item, &ER::Item) -> O,
{
    type Item = O;

    fn try_get_next(&mut self) -> Option<Self::Item> {
        let Phase::Probing(lookup) = &self.phase else {
            return None;
        };
        loop {
            if let Some(cursor) = &mut self.cursor {
                if let Some(right) = lookup.get(&cursor.key).get(cursor.pos) {
                    cursor.pos += 1;
                    return Some((self.result)(&cursor.left, right));
                }
                self.cursor = None;
            }
            let left = self.left.try_get_next()?;
            self.cursor = Some(self.cursor_for(left));
        }
    }

    async fn advance(&mut self) -> Result<bool> {
        let Phase::Draining { right, values } = &mut self.phase else {
            return self.left.advance().await;
        };

        while let Some(value) = right.next().await? {
            values.push(value);
        }
        let lookup = Lookup::from_values(mem::take(values), &*self.right_key);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            values = lookup.len(),
            keys = lookup.key_count(),
            "built join lookup"
        );
        self.phase = Phase::Probing(lookup);

        if let Some(left) = self.left.try_get_next() {
            self.cursor = Some(self.cursor_for(left));
            return Ok(true);
        }
        self.left.advance().await
    }
}

#[cfg(test)]
mod tests {
    use core::{
        pin::pin,
        task::{Context, Waker},
    };
    use std::{cell::Cell, rc::Rc};

    use crate::{AsyncEnumerator, AsyncSequence, AsyncSequenceExt, batched, empty, iter};

    #[tokio::test]
    async fn matches_follow_left_then_right_order() {
        let people = iter([(1, "ada"), (2, "brian"), (3, "cleo")]);
        let pets = batched([(3, "rex"), (1, "tom"), (3, "fifi"), (4, "nemo")], 2);
        let seq = people.join(
            pets,
            |p| p.0,
            |p| p.0,
            |person, pet| format!("{}:{}", person.1, pet.1),
        );
        assert_eq!(
            seq.to_list().await.unwrap(),
            vec!["ada:tom", "cleo:rex", "cleo:fifi"]
        );
    }

    #[tokio::test]
    async fn empty_sides_produce_nothing() {
        let left = iter(1..=3).join(empty::<i32>(), |v| *v, |v| *v, |a, b| a + b);
        assert!(!left.any().await.unwrap());
        let right = empty::<i32>().join(iter(1..=3), |v| *v, |v| *v, |a, b| a + b);
        assert!(!right.any().await.unwrap());
    }

    #[tokio::test]
    async fn right_side_is_drained_on_first_advance() {
        let keyed = Rc::new(Cell::new(0));
        let counter = Rc::clone(&keyed);
        let seq = iter([1, 2]).join(
            batched([2, 2, 1], 1),
            |v| *v,
            move |v| {
                counter.set(counter.get() + 1);
                *v
            },
            |a, b| (*a, *b),
        );

        let mut e = seq.enumerator();
        assert_eq!(e.try_get_next(), None);
        assert_eq!(keyed.get(), 0);

        assert!(e.advance().await.unwrap());
        assert_eq!(keyed.get(), 3);
        assert_eq!(e.try_get_next(), Some((1, 1)));
        assert_eq!(e.try_get_next(), None);
        assert!(e.advance().await.unwrap());
        assert_eq!(e.try_get_next(), Some((2, 2)));
        assert_eq!(e.try_get_next(), Some((2, 2)));
        assert!(!e.advance().await.unwrap());
        assert_eq!(keyed.get(), 3);
    }

    #[tokio::test]
    async fn each_enumeration_rebuilds_its_lookup() {
        let seq = batched(1..=4, 3).join(iter(2..=5), |v| *v, |v| *v, |a, _| *a);
        assert_eq!(seq.to_list().await.unwrap(), vec![2, 3, 4]);
        assert_eq!(seq.to_list().await.unwrap(), vec![2, 3, 4]);
    }

    #[tokio::test]
    async fn interrupted_drain_keeps_buffered_right_elements() {
        let seq = iter([1, 2, 3, 4]).join(batched([1, 2, 3, 4], 2), |v| *v, |v| *v, |a, _| *a);
        let mut e = seq.enumerator();
        {
            let mut cx = Context::from_waker(Waker::noop());
            let mut advance = pin!(e.advance());
            // The first batch is read, the second is still suspended.
            assert!(advance.as_mut().poll(&mut cx).is_pending());
            assert!(advance.as_mut().poll(&mut cx).is_pending());
        }

        let mut out = Vec::new();
        while let Some(v) = e.next().await.unwrap() {
            out.push(v);
        }
        assert_eq!(out, vec![1, 2, 3, 4]);
    }
}
