/// The one category whose registrations are tallied.
pub const TRACKED_CATEGORY: &str = "music";

/// Running count of successful registrations for [`TRACKED_CATEGORY`].
///
/// Lives as long as the portal that owns it. There is no way to decrement
/// or reset it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTracker {
    total: u64,
}

impl CategoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The category this tracker counts.
    pub fn category(&self) -> &'static str {
        TRACKED_CATEGORY
    }

    pub fn increment(&mut self) {
        self.total += 1;
    }

    pub fn total(&self) -> u64 {
        self.total
    }
}
