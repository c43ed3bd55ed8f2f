//! handle.rs
//! Mark-invalid-then-release lifecycle shared by every handle object.
//!
//! Design notes:
//! - A handle is `Live(T)` until closed, then `Closed` forever.
//! - `close()` flips the state before dropping the resource, so a panic in a
//!   resource destructor can never leave a half-released live handle.
//! - Using a closed handle is a usage error (`HandleClosed`); closing twice is
//!   a no-op.

use std::mem;

use log::debug;

use crate::types::{HandleKind, Result, ZstdError};

#[derive(Debug)]
enum State<T> {
    Live(T),
    Closed,
}

#[derive(Debug)]
pub struct Handle<T> {
    kind: HandleKind,
    state: State<T>,
}

impl<T> Handle<T> {
    pub fn new(kind: HandleKind, value: T) -> Self {
        Self { kind, state: State::Live(value) }
    }

    pub fn kind(&self) -> HandleKind {
        self.kind
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, State::Closed)
    }

    pub fn get(&self) -> Result<&T> {
        match &self.state {
            State::Live(v) => Ok(v),
            State::Closed => Err(ZstdError::HandleClosed(self.kind)),
        }
    }

    pub fn get_mut(&mut self) -> Result<&mut T> {
        match &mut self.state {
            State::Live(v) => Ok(v),
            State::Closed => Err(ZstdError::HandleClosed(self.kind)),
        }
    }

    /// Release the resource. Returns `false` if it was already released.
    pub fn close(&mut self) -> bool {
        match mem::replace(&mut self.state, State::Closed) {
            State::Live(value) => {
                drop(value);
                debug!("{} released", self.kind);
                true
            }
            State::Closed => false,
        }
    }
}
