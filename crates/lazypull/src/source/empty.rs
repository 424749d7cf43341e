use core::marker::PhantomData;

use crate::{
    error::Result,
    sequence::{AsyncEnumerator, AsyncSequence},
};

/// A sequence with no elements.
pub const fn empty<T>() -> Empty<T> {
    Empty {
        _item: PhantomData,
    }
}

/// Sequence returned by [`empty`]. Also its own enumerator.
#[derive(Debug)]
pub struct Empty<T> {
    _item: PhantomData<fn() -> T>,
}

impl<T> Clone for Empty<T> {
    fn clone(&self) -> Self {
        empty()
    }
}

impl<T> AsyncSequence for Empty<T> {
    type Item = T;
    type Enumerator = Self;

    fn enumerator(&self) -> Self::Enumerator {
        empty()
    }
}

impl<T> AsyncEnumerator for Empty<T> {
    type Item = T;

    fn try_get_next(&mut self) -> Option<Self::Item> {
        None
    }

    async fn advance(&mut self) -> Result<bool> {
        Ok(false)
    }

    fn next_blocking(&mut self) -> Result<Option<Self::Item>> {
        Ok(None)
    }
}
