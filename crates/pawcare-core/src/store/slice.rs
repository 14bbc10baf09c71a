//! Generic slice state and its reducers.

use serde::Serialize;

use crate::notify::ToastId;

/// Sequence number issued to one dispatched operation on a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Seq(u64);

impl Seq {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// One subtree of client state plus its request bookkeeping.
///
/// The reducers (`begin`, `fulfil`, `reject`) are plain state transitions.
/// Every dispatched operation takes a sequence number from `begin`; a result
/// whose number is not newer than the last applied one is dropped, so a slow
/// response cannot overwrite a newer one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice<T> {
    pub data: T,
    pub is_loading: bool,
    pub is_error: bool,
    /// Last error message
    pub msg: Option<String>,
    /// Loading notification shown for the latest write
    pub toast: Option<ToastId>,
    issued: u64,
    applied: u64,
}

impl<T: Default> Default for Slice<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Slice<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            is_loading: false,
            is_error: false,
            msg: None,
            toast: None,
            issued: 0,
            applied: 0,
        }
    }

    /// Pending: issue the next sequence number and mark loading.
    pub fn begin(&mut self) -> Seq {
        self.issued += 1;
        self.is_loading = true;
        self.is_error = false;
        Seq(self.issued)
    }

    /// True if a result for `seq` would be ignored.
    pub fn is_stale(&self, seq: Seq) -> bool {
        seq.0 <= self.applied
    }

    /// Fulfilled: merge the payload into `data` through `apply`.
    ///
    /// Returns false (state untouched) when the result is stale.
    pub fn fulfil<P>(&mut self, seq: Seq, payload: &P, apply: impl FnOnce(&mut T, &P)) -> bool {
        if self.is_stale(seq) {
            return false;
        }
        apply(&mut self.data, payload);
        self.is_error = false;
        self.msg = None;
        self.settle(seq);
        true
    }

    /// Rejected: flag the error and keep `data` as it was.
    ///
    /// Returns false (state untouched) when the result is stale.
    pub fn reject(&mut self, seq: Seq, message: String) -> bool {
        if self.is_stale(seq) {
            return false;
        }
        self.is_error = true;
        self.msg = Some(message);
        self.settle(seq);
        true
    }

    /// Last sequence number whose result was applied.
    pub fn applied_seq(&self) -> u64 {
        self.applied
    }

    /// True while a request newer than the last applied one is outstanding.
    pub fn has_pending(&self) -> bool {
        self.issued > self.applied
    }

    /// Replace data outside of a request (local actions such as logout).
    ///
    /// Requests already in flight count as superseded: their results are
    /// reported stale and never land on the new data.
    pub fn reset(&mut self, data: T) {
        self.data = data;
        self.is_error = false;
        self.msg = None;
        self.is_loading = false;
        self.applied = self.issued;
    }

    fn settle(&mut self, seq: Seq) {
        self.applied = seq.0;
        self.is_loading = self.issued > seq.0;
    }
}

/// Replace the slice data with the payload.
pub fn replace<T: Clone>(data: &mut T, payload: &T) {
    *data = payload.clone();
}

/// Store the payload as the single selected value.
pub fn select<T: Clone>(data: &mut Option<T>, payload: &T) {
    *data = Some(payload.clone());
}

/// Leave data alone; the caller refetches.
pub fn keep<T, P>(_data: &mut T, _payload: &P) {}
