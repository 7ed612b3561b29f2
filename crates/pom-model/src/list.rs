//! Live editing view over a containment list.
//!
//! The parent owns its children in a `Vec`; a [`ListEdit`] borrows that
//! `Vec` together with the parent's notifier so every structural change is
//! reported. Removed children are handed back by value.

use crate::error::{PomError, Result};
use crate::notify::{Notification, NotificationKind, Notifier};
use crate::reflect::FeatureId;
use crate::value::{ModelValue, Value};

pub struct ListEdit<'a, T: ModelValue> {
    items: &'a mut Vec<T>,
    notifier: &'a Notifier,
    element: &'static str,
    feature: FeatureId,
    feature_name: &'static str,
}

impl<'a, T: ModelValue> ListEdit<'a, T> {
    pub(crate) fn new(
        items: &'a mut Vec<T>,
        notifier: &'a Notifier,
        element: &'static str,
        feature: FeatureId,
        feature_name: &'static str,
    ) -> Self {
        Self {
            items,
            notifier,
            element,
            feature,
            feature_name,
        }
    }

    fn emit(&self, kind: NotificationKind, old: Value, new: Value, position: Option<usize>) {
        let mut notification =
            Notification::new(kind, self.element, self.feature, self.feature_name, old, new);
        notification.position = position;
        self.notifier.notify(&notification);
    }

    fn out_of_bounds(&self, index: usize) -> PomError {
        PomError::IndexOutOfBounds {
            feature: self.feature_name,
            index,
            len: self.items.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        self.items.as_slice()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Mutable access to a child. Changes made through it are reported by
    /// the child's own notifier, not this list.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Appends `item` and returns a handle to it.
    pub fn push(&mut self, item: T) -> &mut T {
        let position = self.items.len();
        self.items.push(item);
        if self.notifier.is_required() {
            self.emit(
                NotificationKind::Add,
                Value::Null,
                self.items[position].to_value(),
                Some(position),
            );
        }
        &mut self.items[position]
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) {
        for item in items {
            self.push(item);
        }
    }

    pub fn insert(&mut self, index: usize, item: T) -> Result<()> {
        if index > self.items.len() {
            return Err(self.out_of_bounds(index));
        }
        self.items.insert(index, item);
        if self.notifier.is_required() {
            self.emit(
                NotificationKind::Add,
                Value::Null,
                self.items[index].to_value(),
                Some(index),
            );
        }
        Ok(())
    }

    /// Detaches and returns the child at `index`.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);
        if self.notifier.is_required() {
            self.emit(NotificationKind::Remove, removed.to_value(), Value::Null, Some(index));
        }
        Some(removed)
    }

    /// Detaches the first child matching `predicate`.
    pub fn remove_first(&mut self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        let index = self.items.iter().position(predicate)?;
        self.remove(index)
    }

    pub fn pop(&mut self) -> Option<T> {
        let last = self.items.len().checked_sub(1)?;
        self.remove(last)
    }

    /// Replaces the child at `index`, returning the previous one.
    pub fn replace(&mut self, index: usize, item: T) -> Result<T> {
        if index >= self.items.len() {
            return Err(self.out_of_bounds(index));
        }
        let old = std::mem::replace(&mut self.items[index], item);
        if self.notifier.is_required() {
            self.emit(
                NotificationKind::Set,
                old.to_value(),
                self.items[index].to_value(),
                Some(index),
            );
        }
        Ok(old)
    }

    /// Moves the child at `from` so that it ends up at `to`.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.items.len();
        if from >= len {
            return Err(self.out_of_bounds(from));
        }
        if to >= len {
            return Err(self.out_of_bounds(to));
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        if self.notifier.is_required() {
            self.emit(
                NotificationKind::Move,
                Value::Null,
                self.items[to].to_value(),
                Some(to),
            );
        }
        Ok(())
    }

    /// Removes every child. A single `Unset` notification carries the old
    /// contents; nothing is fired for an already empty list.
    pub fn clear(&mut self) -> Vec<T> {
        if self.items.is_empty() {
            return Vec::new();
        }
        let old = std::mem::take(self.items);
        if self.notifier.is_required() {
            self.emit(NotificationKind::Unset, T::list_to_value(&old), Value::Null, None);
        }
        old
    }

    /// Replaces the whole content with a single `Set` notification.
    pub fn assign(&mut self, items: Vec<T>) -> Vec<T> {
        let old = std::mem::replace(self.items, items);
        if self.notifier.is_required() {
            self.emit(
                NotificationKind::Set,
                T::list_to_value(&old),
                T::list_to_value(self.items.as_slice()),
                None,
            );
        }
        old
    }
}
