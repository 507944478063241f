//! Segment identifiers for Window-TinyLFU.

/// The segment a resident entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueType {
    /// Recency-biased admission window.
    Window,
    /// Main region, entries not yet re-referenced since entering main.
    Probation,
    /// Main region, entries re-referenced while in probation.
    Protected,
}

impl QueueType {
    /// Returns the lowercase name of the segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueType::Window => "window",
            QueueType::Probation => "probation",
            QueueType::Protected => "protected",
        }
    }

    /// Returns true for the two main-region segments.
    #[inline]
    pub fn is_main(&self) -> bool {
        !matches!(self, QueueType::Window)
    }
}

impl std::fmt::Display for QueueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
