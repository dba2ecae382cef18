use taskboard_core::TaskFilter;

/// Value the UI sends for "no filter" on a select box.
pub const ALL_SENTINEL: &str = "all";

/// Builder that accepts user-facing strings and normalizes them into [`TaskFilter`] values.
///
/// Blank strings and the `all` sentinel count as absent. Anything else is kept
/// verbatim, so an unknown status simply matches nothing.
#[derive(Debug, Clone, Default)]
pub struct TaskFilterBuilder {
    status: Option<String>,
    priority: Option<String>,
    category: Option<String>,
}

impl TaskFilterBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the status criterion.
    #[must_use]
    pub fn with_status(mut self, status: Option<&str>) -> Self {
        self.status = normalize(status);
        self
    }

    /// Set the priority criterion.
    #[must_use]
    pub fn with_priority(mut self, priority: Option<&str>) -> Self {
        self.priority = normalize(priority);
        self
    }

    /// Set the category criterion.
    #[must_use]
    pub fn with_category(mut self, category: Option<&str>) -> Self {
        self.category = normalize(category);
        self
    }

    /// Finalize the filter.
    #[must_use]
    pub fn build(self) -> TaskFilter {
        TaskFilter {
            status: self.status,
            priority: self.priority,
            category: self.category,
        }
    }
}

/// Normalize an already deserialized filter (e.g. from a query string).
#[must_use]
pub fn normalize_filter(filter: &TaskFilter) -> TaskFilter {
    TaskFilterBuilder::new()
        .with_status(filter.status.as_deref())
        .with_priority(filter.priority.as_deref())
        .with_category(filter.category.as_deref())
        .build()
}

fn normalize(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() || value == ALL_SENTINEL {
        None
    } else {
        Some(value.to_owned())
    }
}
