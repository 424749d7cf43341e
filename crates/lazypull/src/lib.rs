#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod bridge;
mod consume;
mod error;
mod futures;
mod ops;
mod sequence;
mod source;
#[cfg(test)]
mod testing;

pub use crate::bridge::*;
pub use crate::error::*;
pub use crate::futures::*;
pub use crate::ops::*;
pub use crate::sequence::*;
pub use crate::source::*;
