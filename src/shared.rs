//! Effect shared between several consumers.
//!
//! An effect's phase update and frame rendering must run as one step. When
//! more than one consumer may call `advance`, wrap the effect in a
//! [`SharedEffect`]: every call runs inside a critical section, so calls are
//! serialized and each sees a complete step.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::{effect::Effect, frame::Frame};

/// An effect behind a critical-section mutex
pub struct SharedEffect<E> {
    inner: Mutex<RefCell<E>>,
}

impl<E: Effect> SharedEffect<E> {
    /// Wrap an effect
    pub const fn new(effect: E) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(effect)),
        }
    }

    /// Advance the effect by one step.
    ///
    /// Safe to call from several threads or interrupt contexts.
    pub fn advance(&self) -> Frame {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().advance())
    }

    /// Advance the effect and hand the frame to `emit` before releasing the
    /// lock, so frames reach the consumer in the order they were generated.
    pub fn advance_with<R>(&self, emit: impl FnOnce(&Frame) -> R) -> R {
        critical_section::with(|cs| {
            let frame = self.inner.borrow(cs).borrow_mut().advance();
            emit(&frame)
        })
    }

    pub fn led_count(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().led_count())
    }

    /// Unwrap the effect
    pub fn into_inner(self) -> E {
        self.inner.into_inner().into_inner()
    }
}
