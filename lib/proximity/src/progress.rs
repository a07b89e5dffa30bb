use crate::row::MatchRow;

/// Snapshot handed to a [`ProgressSink`]
#[derive(Debug, Clone, Copy)]
pub struct ProgressUpdate<'a> {
    /// Government records processed so far, skipped ones included
    pub processed: usize,
    pub total: usize,
    /// Most recently emitted row, if any row exists yet
    pub latest_row: Option<&'a MatchRow>,
}

impl ProgressUpdate<'_> {
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.processed == self.total
    }
}

/// Push-style progress receiver.
///
/// Called every `progress_interval` government records and once at the end.
/// Implemented for any `FnMut(&ProgressUpdate)` closure.
pub trait ProgressSink {
    fn report(&mut self, update: &ProgressUpdate<'_>);
}

impl<F> ProgressSink for F
where
    F: FnMut(&ProgressUpdate<'_>),
{
    fn report(&mut self, update: &ProgressUpdate<'_>) {
        self(update)
    }
}
