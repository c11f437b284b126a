use chrono::{DateTime, FixedOffset, Utc};

// ============================================================================
// Clock - injectable source of "now"
// ============================================================================

pub trait Clock: Send + Sync {
    /// Current time in the clock's fixed reference offset
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock pinned to one UTC offset for the lifetime of the process
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

/// Manually driven clock for deterministic tests
#[cfg(test)]
pub struct ManualClock {
    now: std::sync::Mutex<DateTime<FixedOffset>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self { now: std::sync::Mutex::new(now) }
    }

    /// 2025-02-03 13:00 at +01:00
    pub fn amsterdam() -> Self {
        use chrono::TimeZone;
        let offset = FixedOffset::east_opt(3600).unwrap();
        Self::new(offset.with_ymd_and_hms(2025, 2, 3, 13, 0, 0).unwrap())
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.now.lock().unwrap()
    }
}
