//! Change notification.
//!
//! Every model element owns a [`Notifier`]. Observers registered on it see
//! one [`Notification`] per mutation, delivered synchronously before the
//! mutating call returns. Nothing is built when no observer is registered.

use crate::reflect::FeatureId;
use crate::value::Value;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Set,
    Unset,
    Add,
    Remove,
    Move,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    /// Element type name, e.g. `"Parent"`.
    pub element: &'static str,
    pub feature: FeatureId,
    pub feature_name: &'static str,
    pub old_value: Value,
    pub new_value: Value,
    /// List position for `Add`, `Remove` and `Move`; the target index for
    /// `Move`, the replaced index for a positional `Set`.
    pub position: Option<usize>,
}

impl Notification {
    pub fn new(
        kind: NotificationKind,
        element: &'static str,
        feature: FeatureId,
        feature_name: &'static str,
        old_value: Value,
        new_value: Value,
    ) -> Self {
        Self {
            kind,
            element,
            feature,
            feature_name,
            old_value,
            new_value,
            position: None,
        }
    }

    pub fn at(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }
}

pub trait Observer: Send + Sync {
    fn notify_changed(&self, notification: &Notification);
}

/// Observer list attached to a single element.
///
/// Cloning an element does not carry its observers over, and observers take
/// no part in equality or serialization.
#[derive(Default)]
pub struct Notifier {
    observers: Vec<Arc<dyn Observer>>,
    deliver_disabled: bool,
}

impl Notifier {
    pub fn subscribe(&mut self, observer: Arc<dyn Observer>) {
        self.observers.push(observer);
    }

    /// Removes a previously subscribed observer. Returns `false` when it was
    /// not registered.
    pub fn unsubscribe(&mut self, observer: &Arc<dyn Observer>) -> bool {
        let before = self.observers.len();
        self.observers.retain(|o| !Arc::ptr_eq(o, observer));
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Pauses or resumes delivery without dropping observers.
    pub fn set_deliver(&mut self, deliver: bool) {
        self.deliver_disabled = !deliver;
    }

    pub fn deliver(&self) -> bool {
        !self.deliver_disabled
    }

    /// True when a notification would reach at least one observer.
    pub fn is_required(&self) -> bool {
        !self.deliver_disabled && !self.observers.is_empty()
    }

    pub fn notify(&self, notification: &Notification) {
        if self.deliver_disabled {
            return;
        }
        for observer in &self.observers {
            observer.notify_changed(notification);
        }
    }
}

impl Clone for Notifier {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl PartialEq for Notifier {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("observers", &self.observers.len())
            .field("deliver", &self.deliver())
            .finish()
    }
}

/// Implemented by every element that carries a [`Notifier`].
pub trait Notifying {
    fn notifier(&self) -> &Notifier;

    fn notifier_mut(&mut self) -> &mut Notifier;

    fn subscribe(&mut self, observer: Arc<dyn Observer>) {
        self.notifier_mut().subscribe(observer);
    }

    fn unsubscribe(&mut self, observer: &Arc<dyn Observer>) -> bool {
        self.notifier_mut().unsubscribe(observer)
    }
}

/// Observer that records every notification it receives.
#[derive(Debug, Default)]
pub struct ChangeLog {
    entries: Mutex<Vec<Notification>>,
}

impl ChangeLog {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drains the recorded notifications.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Observer for ChangeLog {
    fn notify_changed(&self, notification: &Notification) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.clone());
    }
}
