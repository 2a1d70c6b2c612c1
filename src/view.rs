use crate::activity::{Activity, ActivityLog, USER_REGISTERED};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::BTreeMap;

/// A pure function that folds an activity into state.
///
/// Reducers receive owned state and return owned state. They should be pure
/// and ignore activity types they do not know with a `_ => {}` arm.
///
/// # Examples
///
/// ```
/// use community_portal::{Activity, ReduceFn};
///
/// fn counter(state: u64, _activity: &Activity) -> u64 {
///     state + 1
/// }
///
/// let reducer: ReduceFn<u64> = counter;
/// ```
pub type ReduceFn<S> = fn(S, &Activity) -> S;

mod sealed {
    pub trait Sealed {}
}

/// Type-erased view operations, so the portal can hold views of any state.
///
/// This trait is sealed and cannot be implemented outside of this crate.
pub trait ViewOps: sealed::Sealed {
    /// Catch up with the log, discarding the state reference.
    fn refresh_boxed(&mut self, activities: &ActivityLog);
    /// Returns the view name.
    fn view_name(&self) -> &str;
    /// Downcast to `&dyn Any` for type recovery.
    fn as_any(&self) -> &dyn Any;
    /// Downcast to `&mut dyn Any` for type recovery.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A derived view over the activity log.
///
/// Owns a reducer and the offset of the next unread activity, so repeated
/// refreshes only fold what was appended since the last one.
pub struct View<S> {
    name: String,
    reducer: ReduceFn<S>,
    state: S,
    offset: u64,
}

impl<S: std::fmt::Debug> std::fmt::Debug for View<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("offset", &self.offset)
            .finish()
    }
}

impl<S: Default> View<S> {
    pub fn new(name: &str, reducer: ReduceFn<S>) -> Self {
        View {
            name: name.to_string(),
            reducer,
            state: S::default(),
            offset: 0,
        }
    }

    /// Fold every activity appended since the last refresh.
    pub fn refresh(&mut self, activities: &ActivityLog) -> &S {
        let mut state = std::mem::take(&mut self.state);
        let mut offset = self.offset;
        for (activity, next) in activities.read_from(self.offset) {
            state = (self.reducer)(state, activity);
            offset = next;
        }
        if offset != self.offset {
            log::debug!(
                "view '{}': folded activities {}..{}",
                self.name,
                self.offset,
                offset
            );
        }
        self.state = state;
        self.offset = offset;
        &self.state
    }

    /// Discard the current state and replay the whole log.
    pub fn rebuild(&mut self, activities: &ActivityLog) -> &S {
        self.state = S::default();
        self.offset = 0;
        self.refresh(activities)
    }

    /// Current state without touching the log. `S::default()` before the
    /// first refresh.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Offset of the next activity this view has not folded yet.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<S> sealed::Sealed for View<S> {}

impl<S: Default + 'static> ViewOps for View<S> {
    fn refresh_boxed(&mut self, activities: &ActivityLog) {
        self.refresh(activities);
    }

    fn view_name(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Successful registrations per category, across every category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub totals: BTreeMap<String, u64>,
}

impl CategoryTotals {
    pub fn get(&self, category: &str) -> u64 {
        self.totals.get(category).copied().unwrap_or(0)
    }
}

/// Reducer behind [`CategoryTotals`]. Counts `user_registered` activities by
/// their `category` field.
pub fn category_totals(mut state: CategoryTotals, activity: &Activity) -> CategoryTotals {
    if activity.kind == USER_REGISTERED {
        let category = activity.data["category"].as_str().unwrap_or("").to_string();
        *state.totals.entry(category).or_insert(0) += 1;
    }
    state
}
