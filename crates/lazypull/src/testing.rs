//! Instrumented producers shared by the unit tests.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    vec,
};

use crate::{
    error::Result,
    sequence::{AsyncEnumerator, AsyncSequence},
    source::{BatchedEnumerator, batched},
};

/// Records how many elements were handed out and when enumerators were
/// released, across every producer created from it.
#[derive(Debug, Clone, Default)]
pub(crate) struct Probe {
    pulls: Rc<Cell<usize>>,
    released: Rc<RefCell<Vec<String>>>,
}

impl Probe {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A batched producer over `items` whose enumerators report to this
    /// probe under `name`.
    pub(crate) fn source<T: Clone>(
        &self,
        name: impl Into<String>,
        items: Vec<T>,
        batch_size: usize,
    ) -> Probed<T> {
        Probed {
            name: name.into(),
            items,
            batch_size,
            probe: self.clone(),
        }
    }

    /// A plain iterator over `items` that reports to this probe under `name`
    /// when dropped.
    pub(crate) fn collection<T>(&self, name: impl Into<String>, items: Vec<T>) -> ProbedIter<T> {
        ProbedIter {
            items: items.into_iter(),
            name: name.into(),
            probe: self.clone(),
        }
    }

    /// Elements handed out through `try_get_next` so far.
    pub(crate) fn pulls(&self) -> usize {
        self.pulls.get()
    }

    /// Names of released enumerators, in release order.
    pub(crate) fn released(&self) -> Vec<String> {
        self.released.borrow().clone()
    }

    fn release(&self, name: &mut String) {
        self.released.borrow_mut().push(core::mem::take(name));
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Probed<T> {
    name: String,
    items: Vec<T>,
    batch_size: usize,
    probe: Probe,
}

impl<T: Clone> AsyncSequence for Probed<T> {
    type Item = T;
    type Enumerator = ProbedEnumerator<T>;

    fn enumerator(&self) -> Self::Enumerator {
        ProbedEnumerator {
            inner: batched(self.items.clone(), self.batch_size).enumerator(),
            name: self.name.clone(),
            probe: self.probe.clone(),
        }
    }
}

pub(crate) struct ProbedEnumerator<T> {
    inner: BatchedEnumerator<vec::IntoIter<T>>,
    name: String,
    probe: Probe,
}

impl<T> AsyncEnumerator for ProbedEnumerator<T> {
    type Item = T;

    fn try_get_next(&mut self) -> Option<Self::Item> {
        let value = self.inner.try_get_next()?;
        self.probe.pulls.set(self.probe.pulls.get() + 1);
        Some(value)
    }

    async fn advance(&mut self) -> Result<bool> {
        self.inner.advance().await
    }
}

impl<T> Drop for ProbedEnumerator<T> {
    fn drop(&mut self) {
        self.probe.release(&mut self.name);
    }
}

pub(crate) struct ProbedIter<T> {
    items: vec::IntoIter<T>,
    name: String,
    probe: Probe,
}

impl<T> Iterator for ProbedIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next()
    }
}

impl<T> Drop for ProbedIter<T> {
    fn drop(&mut self) {
        self.probe.release(&mut self.name);
    }
}
