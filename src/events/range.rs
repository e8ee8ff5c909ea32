use super::cursor::Cursor;
use super::error::{EventStoreError, Result};

/// Half-open cursor interval `[start, end)` requested by a caller
///
/// The clamp flags decide whether an out-of-bounds endpoint is pulled to
/// the nearest retained position or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: Cursor,
    pub clamp_start: bool,
    pub end: Cursor,
    pub clamp_end: bool,
}

impl Range {
    /// Strict range: neither endpoint is clamped
    pub fn new(start: Cursor, end: Cursor) -> Self {
        Self {
            start,
            clamp_start: false,
            end,
            clamp_end: false,
        }
    }

    /// Everything currently retained
    pub fn all() -> Self {
        Self {
            start: Cursor::MIN,
            clamp_start: true,
            end: Cursor::MAX,
            clamp_end: true,
        }
    }

    pub fn clamped(self, clamp_start: bool, clamp_end: bool) -> Self {
        Self {
            clamp_start,
            clamp_end,
            ..self
        }
    }

    /// Check the range against the retained ledgers `(oldest, newest)` and
    /// clamp it where allowed
    ///
    /// On success `Cursor(oldest) <= start < end <= Cursor(newest + 1)`.
    /// A start past the newest ledger is never rescued by `clamp_start`.
    ///
    /// The upper bound saturates at `Cursor(u32::MAX, 0, 0)`. Once the newest
    /// retained ledger is `u32::MAX`, any start inside that ledger fails with
    /// `StartAfterNewest`, and a window holding only that ledger rejects
    /// every range, `Range::all()` included.
    pub fn validate(self, bounds: Option<(u32, u32)>) -> Result<Range> {
        let (oldest, newest) = bounds.ok_or(EventStoreError::EmptyStore)?;

        let lower = Cursor::ledger_start(oldest);
        // Saturates only when the newest ledger is u32::MAX
        let upper = Cursor::ledger_start(newest.saturating_add(1));

        let mut range = self;

        if range.start < lower {
            if !range.clamp_start {
                return Err(EventStoreError::StartBeforeOldest);
            }
            range.start = lower;
        }

        if range.start >= upper {
            return Err(EventStoreError::StartAfterNewest);
        }

        if range.end > upper {
            if !range.clamp_end {
                return Err(EventStoreError::EndAfterLatest);
            }
            range.end = upper;
        }

        if range.start >= range.end {
            return Err(EventStoreError::InvalidRange);
        }

        Ok(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Option<(u32, u32)> = Some((5, 8));

    fn ledger(seq: u32) -> Cursor {
        Cursor::ledger_start(seq)
    }

    #[test]
    fn test_empty_store_checked_first() {
        assert_eq!(Range::all().validate(None), Err(EventStoreError::EmptyStore));
        assert_eq!(
            Range::new(ledger(10), ledger(3)).validate(None),
            Err(EventStoreError::EmptyStore)
        );
    }

    #[test]
    fn test_all_clamps_to_window() {
        let range = Range::all().validate(BOUNDS).unwrap();
        assert_eq!(range.start, ledger(5));
        assert_eq!(range.end, ledger(9));
    }

    #[test]
    fn test_in_bounds_range_untouched() {
        let input = Range::new(Cursor::new(5, 2, 0), Cursor::new(8, 2, 0));
        assert_eq!(input.validate(BOUNDS), Ok(input));

        let clamped = input.clamped(true, true);
        assert_eq!(clamped.validate(BOUNDS), Ok(clamped));
    }

    #[test]
    fn test_error_order() {
        let cases = [
            (Range::all().clamped(false, true), EventStoreError::StartBeforeOldest),
            (Range::new(ledger(4), Cursor::MAX).clamped(false, true), EventStoreError::StartBeforeOldest),
            (Range::all().clamped(true, false), EventStoreError::EndAfterLatest),
            (Range::new(ledger(5), ledger(10)).clamped(true, false), EventStoreError::EndAfterLatest),
            (Range::new(ledger(10), ledger(3)).clamped(true, true), EventStoreError::StartAfterNewest),
            (Range::new(ledger(10), ledger(3)), EventStoreError::StartAfterNewest),
            (Range::new(ledger(9), ledger(10)).clamped(false, true), EventStoreError::StartAfterNewest),
            (Range::new(ledger(9), ledger(10)), EventStoreError::StartAfterNewest),
            (Range::new(ledger(2), ledger(3)).clamped(true, false), EventStoreError::InvalidRange),
            (Range::new(ledger(2), ledger(3)), EventStoreError::StartBeforeOldest),
            (Range::new(ledger(6), ledger(6)), EventStoreError::InvalidRange),
        ];

        for (input, expected) in cases {
            assert_eq!(input.validate(BOUNDS), Err(expected.clone()), "{:?}", input);
        }
    }

    #[test]
    fn test_start_inside_last_ledger_accepted() {
        let range = Range::new(Cursor::new(8, 2, 3), ledger(9))
            .validate(BOUNDS)
            .unwrap();
        assert_eq!(range.start, Cursor::new(8, 2, 3));
        assert_eq!(range.end, ledger(9));
    }

    #[test]
    fn test_end_clamped_before_comparison() {
        // end = MAX clamps to ledger 9, leaving a valid range
        let range = Range::new(Cursor::new(8, 9, 9), Cursor::MAX)
            .clamped(false, true)
            .validate(BOUNDS)
            .unwrap();
        assert_eq!(range.end, ledger(9));
    }

    #[test]
    fn test_newest_at_max_sequence() {
        let single = Some((u32::MAX, u32::MAX));
        assert_eq!(Range::all().validate(single), Err(EventStoreError::StartAfterNewest));

        let two = Some((u32::MAX - 1, u32::MAX));
        assert_eq!(
            Range::new(ledger(u32::MAX), Cursor::MAX).clamped(false, true).validate(two),
            Err(EventStoreError::StartAfterNewest)
        );

        // Earlier ledgers stay reachable, up to the saturated bound
        let range = Range::all().validate(two).unwrap();
        assert_eq!(range.start, ledger(u32::MAX - 1));
        assert_eq!(range.end, ledger(u32::MAX));
    }
}
