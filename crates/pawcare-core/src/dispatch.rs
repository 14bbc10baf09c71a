//! Async action dispatcher.
//!
//! Wraps one backend call in the pending → fulfilled | rejected lifecycle:
//!
//! ```text
//!   begin()  ── pending: is_loading, loading toast (writes)
//!      │
//!   .await   ── store lock released while the request is in flight
//!      │
//!      ├── Ok  ── fulfil(): merge payload, dismiss toast, success toast (writes)
//!      └── Err ── reject(): keep data, dismiss toast, error toast
//! ```
//!
//! Exactly one of fulfilled/rejected follows each pending. There is no
//! retry and no cancellation; the caller re-invokes the action to recover.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};
use crate::notify::{LifecycleEvent, Notification, Notifier, Phase, ToastId};
use crate::store::{Seq, Slice, Store};

/// What a dispatched operation does, for notification purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Pure read: no loading toast, no success toast
    Read,
    /// User-visible mutation
    Write {
        pending: &'static str,
        success: &'static str,
    },
}

/// A named operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub effect: Effect,
}

impl Operation {
    pub const fn read(name: &'static str) -> Self {
        Self {
            name,
            effect: Effect::Read,
        }
    }

    pub const fn write(name: &'static str, pending: &'static str, success: &'static str) -> Self {
        Self {
            name,
            effect: Effect::Write { pending, success },
        }
    }
}

/// Result of one dispatched operation.
#[derive(Debug)]
pub enum Outcome<P> {
    Fulfilled(P),
    Rejected(ClientError),
}

impl<P> Outcome<P> {
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Outcome::Fulfilled(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }

    pub fn into_result(self) -> ClientResult<P> {
        match self {
            Outcome::Fulfilled(payload) => Ok(payload),
            Outcome::Rejected(err) => Err(err),
        }
    }

    pub fn map<Q>(self, f: impl FnOnce(P) -> Q) -> Outcome<Q> {
        match self {
            Outcome::Fulfilled(payload) => Outcome::Fulfilled(f(payload)),
            Outcome::Rejected(err) => Outcome::Rejected(err),
        }
    }

    pub fn error(&self) -> Option<&ClientError> {
        match self {
            Outcome::Rejected(err) => Some(err),
            Outcome::Fulfilled(_) => None,
        }
    }
}

impl<P> From<ClientError> for Outcome<P> {
    fn from(err: ClientError) -> Self {
        Outcome::Rejected(err)
    }
}

/// Selects the slice an operation writes to.
pub type SliceFn<T> = fn(&mut Store) -> &mut Slice<T>;

/// Runs operations against a shared store.
pub struct Dispatcher {
    store: Arc<Mutex<Store>>,
    notifier: Arc<dyn Notifier>,
    next_toast: AtomicU64,
}

impl Dispatcher {
    pub fn new(store: Arc<Mutex<Store>>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier,
            next_toast: AtomicU64::new(1),
        }
    }

    /// Shared store handle.
    pub fn store(&self) -> &Arc<Mutex<Store>> {
        &self.store
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    /// Read the store under its lock.
    pub fn read<R>(&self, f: impl FnOnce(&Store) -> R) -> ClientResult<R> {
        let store = self.store.lock()?;
        Ok(f(&store))
    }

    /// Mutate the store under its lock (local actions only).
    pub fn update<R>(&self, f: impl FnOnce(&mut Store) -> R) -> ClientResult<R> {
        let mut store = self.store.lock()?;
        Ok(f(&mut store))
    }

    /// Run `request` through the lifecycle, merging its payload with `apply`.
    pub async fn run<T, P, F, A>(
        &self,
        op: Operation,
        slice: SliceFn<T>,
        request: F,
        apply: A,
    ) -> Outcome<P>
    where
        F: Future<Output = ClientResult<P>>,
        A: FnOnce(&mut T, &P),
    {
        let toast = match op.effect {
            Effect::Write { .. } => Some(ToastId(self.next_toast.fetch_add(1, Ordering::Relaxed))),
            Effect::Read => None,
        };

        let seq = match self.update(|store| {
            let slice = slice(store);
            let seq = slice.begin();
            if toast.is_some() {
                slice.toast = toast;
            }
            seq
        }) {
            Ok(seq) => seq,
            Err(err) => return Outcome::Rejected(err),
        };

        self.emit(op, seq, Phase::Pending);
        if let (Some(id), Effect::Write { pending, .. }) = (toast, op.effect) {
            self.notifier.notify(Notification::Loading {
                id,
                message: pending.to_string(),
            });
        }
        debug!(operation = op.name, seq = seq.value(), "pending");

        let result = request.await;

        if let Some(id) = toast {
            self.notifier.notify(Notification::Dismiss { id });
        }

        match result {
            Ok(payload) => {
                let applied = self.update(|store| {
                    let slice = slice(store);
                    clear_toast(slice, toast);
                    slice.fulfil(seq, &payload, apply)
                });
                let applied = match applied {
                    Ok(applied) => applied,
                    Err(err) => {
                        self.emit(op, seq, Phase::Rejected { applied: false });
                        return Outcome::Rejected(err);
                    }
                };

                self.emit(op, seq, Phase::Fulfilled { applied });
                if !applied {
                    debug!(operation = op.name, seq = seq.value(), "stale result ignored");
                }
                if let Effect::Write { success, .. } = op.effect {
                    self.notifier.notify(Notification::Success {
                        message: success.to_string(),
                    });
                }
                Outcome::Fulfilled(payload)
            }
            Err(err) => {
                let message = err.user_message();
                let applied = self
                    .update(|store| {
                        let slice = slice(store);
                        clear_toast(slice, toast);
                        slice.reject(seq, message.clone())
                    })
                    .unwrap_or(false);

                self.emit(op, seq, Phase::Rejected { applied });
                warn!(operation = op.name, seq = seq.value(), error = %err, "rejected");
                self.notifier.notify(Notification::Error {
                    message,
                    forbidden: err.is_forbidden(),
                });
                Outcome::Rejected(err)
            }
        }
    }

    fn emit(&self, op: Operation, seq: Seq, phase: Phase) {
        self.notifier.lifecycle(LifecycleEvent {
            operation: op.name,
            seq: seq.value(),
            phase,
        });
    }
}

fn clear_toast<T>(slice: &mut Slice<T>, toast: Option<ToastId>) {
    if toast.is_some() && slice.toast == toast {
        slice.toast = None;
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}
