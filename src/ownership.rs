//! Owned-or-borrowed handles.
//!
//! A codec stream wraps an underlying [`Reader`](crate::stream::Reader) or
//! [`Writer`](crate::stream::Writer) that it either owns outright (the
//! wrapper closes it when the wrapper is closed) or merely borrows (the
//! caller keeps it alive, must not touch it while the wrapper is active, and
//! remains responsible for closing it). The relation is fixed at
//! construction and never reassigned.

use core::ops::{Deref, DerefMut};

/// A handle that is either exclusively owned or mutably borrowed.
///
/// Moving a `MaybeOwned` transfers the owned handle or the borrow; there is
/// no way to duplicate ownership.
#[derive(Debug)]
pub enum MaybeOwned<'a, T> {
    /// The wrapper owns the handle and is responsible for closing it.
    Owned(Box<T>),
    /// The caller retains ownership; the wrapper only uses the handle.
    Borrowed(&'a mut T),
}

impl<T> MaybeOwned<'_, T> {
    pub fn is_owned(&self) -> bool {
        matches!(self, MaybeOwned::Owned(_))
    }

    /// Returns the owned handle for close-time transfer, or `None` for a
    /// borrowed one.
    pub fn into_owned(self) -> Option<Box<T>> {
        match self {
            MaybeOwned::Owned(t) => Some(t),
            MaybeOwned::Borrowed(_) => None,
        }
    }
}

impl<T> Deref for MaybeOwned<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self {
            MaybeOwned::Owned(t) => t,
            MaybeOwned::Borrowed(t) => t,
        }
    }
}

impl<T> DerefMut for MaybeOwned<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        match self {
            MaybeOwned::Owned(t) => t,
            MaybeOwned::Borrowed(t) => t,
        }
    }
}

impl<T> From<T> for MaybeOwned<'_, T> {
    fn from(t: T) -> Self {
        MaybeOwned::Owned(Box::new(t))
    }
}

impl<'a, T> From<&'a mut T> for MaybeOwned<'a, T> {
    fn from(t: &'a mut T) -> Self {
        MaybeOwned::Borrowed(t)
    }
}
