use chrono::{DateTime, Duration, Utc};

/// Evenly spaced instants: `start`, `start + step`, ... (`len` of them).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeGrid {
    start: DateTime<Utc>,
    step: Duration,
    len: usize,
}

impl TimeGrid {
    pub fn new(start: DateTime<Utc>, step: Duration, len: usize) -> Self {
        Self { start, step, len }
    }

    /// Every step from `start` up to and including `end`.
    pub fn spanning(start: DateTime<Utc>, end: DateTime<Utc>, step: Duration) -> Self {
        let step_ms = step.num_milliseconds();
        let span_ms = (end - start).num_milliseconds();
        let len = if step_ms <= 0 || span_ms < 0 {
            1
        } else {
            (span_ms / step_ms) as usize + 1
        };
        Self::new(start, step, len)
    }

    pub fn at(&self, index: usize) -> DateTime<Utc> {
        self.start + Duration::milliseconds(self.step.num_milliseconds() * index as i64)
    }

    pub fn instants(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        (0..self.len).map(|i| self.at(i))
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.at(self.len.saturating_sub(1))
    }

    pub fn len(&self) -> usize {
        self.len
    }
}
