//! Terminal consumers.
//!
//! Each consumer takes ownership of a fresh enumerator, drives the
//! try/advance loop, and drops the enumerator on every exit path (including
//! `?`), which releases the whole chain behind it.

use core::ops::ControlFlow;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    error::{Error, Result},
    sequence::AsyncEnumerator,
};

/// Drives `enumerator` until `f` breaks or the sequence ends.
///
/// Returns `Some(value)` if `f` broke with `value`, `None` on exhaustion.
async fn drive<E, B, F>(enumerator: &mut E, mut f: F) -> Result<Option<B>>
where
    E: AsyncEnumerator,
    F: FnMut(E::Item) -> ControlFlow<B>,
{
    loop {
        while let Some(value) = enumerator.try_get_next() {
            if let ControlFlow::Break(b) = f(value) {
                return Ok(Some(b));
            }
        }
        if !enumerator.advance().await? {
            return Ok(None);
        }
    }
}

#[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all))]
pub(crate) async fn to_list<E>(mut enumerator: E) -> Result<Vec<E::Item>>
where
    E: AsyncEnumerator,
{
    let mut out = Vec::new();
    drive(&mut enumerator, |value| {
        out.push(value);
        ControlFlow::<()>::Continue(())
    })
    .await?;
    #[cfg(feature = "tracing")]
    tracing::trace!(len = out.len(), "collected sequence");
    Ok(out)
}

#[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all))]
pub(crate) async fn first<E>(mut enumerator: E) -> Result<E::Item>
where
    E: AsyncEnumerator,
{
    drive(&mut enumerator, ControlFlow::Break)
        .await?
        .ok_or(Error::EmptySequence)
}

pub(crate) async fn first_or_default<E>(mut enumerator: E) -> Result<E::Item>
where
    E: AsyncEnumerator,
    E::Item: Default,
{
    Ok(drive(&mut enumerator, ControlFlow::Break)
        .await?
        .unwrap_or_default())
}

/// Shared body of `single` and `single_or_default`.
///
/// Fails with `MultipleElements` on the second element without draining the
/// rest; the enumerator is dropped by the caller's scope either way.
async fn at_most_one<E>(enumerator: &mut E) -> Result<Option<E::Item>>
where
    E: AsyncEnumerator,
{
    let mut found = None;
    let second = drive(enumerator, |value| {
        if found.is_some() {
            return ControlFlow::Break(());
        }
        found = Some(value);
        ControlFlow::Continue(())
    })
    .await?;

    match second {
        Some(()) => Err(Error::MultipleElements),
        None => Ok(found),
    }
}

#[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all))]
pub(crate) async fn single<E>(mut enumerator: E) -> Result<E::Item>
where
    E: AsyncEnumerator,
{
    at_most_one(&mut enumerator).await?.ok_or(Error::EmptySequence)
}

pub(crate) async fn single_or_default<E>(mut enumerator: E) -> Result<E::Item>
where
    E: AsyncEnumerator,
    E::Item: Default,
{
    Ok(at_most_one(&mut enumerator).await?.unwrap_or_default())
}

#[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all))]
pub(crate) async fn count<E>(enumerator: E) -> Result<usize>
where
    E: AsyncEnumerator,
{
    count_where(enumerator, |_| true).await
}

pub(crate) async fn count_where<E, F>(mut enumerator: E, mut predicate: F) -> Result<usize>
where
    E: AsyncEnumerator,
    F: FnMut(&E::Item) -> bool,
{
    let mut n = 0;
    drive(&mut enumerator, |value| {
        if predicate(&value) {
            n += 1;
        }
        ControlFlow::<()>::Continue(())
    })
    .await?;
    Ok(n)
}

#[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all))]
pub(crate) async fn any_where<E, F>(mut enumerator: E, mut predicate: F) -> Result<bool>
where
    E: AsyncEnumerator,
    F: FnMut(&E::Item) -> bool,
{
    let hit = drive(&mut enumerator, |value| {
        if predicate(&value) {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })
    .await?;
    Ok(hit.is_some())
}

#[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all))]
pub(crate) async fn all<E, F>(mut enumerator: E, mut predicate: F) -> Result<bool>
where
    E: AsyncEnumerator,
    F: FnMut(&E::Item) -> bool,
{
    let miss = drive(&mut enumerator, |value| {
        if predicate(&value) {
            ControlFlow::Continue(())
        } else {
            ControlFlow::Break(())
        }
    })
    .await?;
    Ok(miss.is_none())
}

pub(crate) async fn fold<E, B, F>(mut enumerator: E, init: B, mut f: F) -> Result<B>
where
    E: AsyncEnumerator,
    F: FnMut(B, E::Item) -> B,
{
    let mut acc = init;
    loop {
        while let Some(value) = enumerator.try_get_next() {
            acc = f(acc, value);
        }
        if !enumerator.advance().await? {
            return Ok(acc);
        }
    }
}
