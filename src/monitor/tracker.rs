//! Online/offline state machine. Pure: the worker applies the database and
//! notification side effects of each [`Transition`].

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservedStatus {
    Online,
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Same status as the previous check.
    None,
    /// First online observation with no outage to close (e.g. right after startup).
    CameOnline,
    /// Recovered from an outage that began at `started`.
    BackOnline { started: i64, downtime_secs: i64 },
    /// A new outage began at `started`.
    WentOffline { started: i64 },
}

#[derive(Debug, Default, Clone)]
pub struct StatusTracker {
    observed: Option<ObservedStatus>,
    downtime_start: Option<i64>,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes an outage that was still open when the process last stopped.
    /// The next offline check then stays silent and the next online check
    /// reports the full downtime.
    pub fn resume_outage(started: i64) -> Self {
        Self {
            observed: Some(ObservedStatus::Offline),
            downtime_start: Some(started),
        }
    }

    pub fn observed(&self) -> Option<ObservedStatus> {
        self.observed
    }

    pub fn downtime_start(&self) -> Option<i64> {
        self.downtime_start
    }

    pub fn observe(&mut self, online: bool, now_ms: i64) -> Transition {
        let next = if online {
            ObservedStatus::Online
        } else {
            ObservedStatus::Offline
        };
        if self.observed == Some(next) {
            return Transition::None;
        }
        self.observed = Some(next);
        match next {
            ObservedStatus::Online => match self.downtime_start.take() {
                Some(started) => Transition::BackOnline {
                    started,
                    downtime_secs: (now_ms - started) / 1000,
                },
                None => Transition::CameOnline,
            },
            ObservedStatus::Offline => {
                self.downtime_start = Some(now_ms);
                Transition::WentOffline { started: now_ms }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_online_check_announces() {
        let mut t = StatusTracker::new();
        assert_eq!(t.observed(), None);
        assert_eq!(t.observe(true, 1_000), Transition::CameOnline);
        assert_eq!(t.observed(), Some(ObservedStatus::Online));
        assert_eq!(t.observe(true, 2_000), Transition::None);
    }

    #[test]
    fn outage_then_recovery_reports_duration() {
        let mut t = StatusTracker::new();
        t.observe(true, 0);
        assert_eq!(
            t.observe(false, 10_000),
            Transition::WentOffline { started: 10_000 }
        );
        assert_eq!(t.observe(false, 20_000), Transition::None);
        assert_eq!(
            t.observe(true, 75_500),
            Transition::BackOnline {
                started: 10_000,
                downtime_secs: 65
            }
        );
        assert_eq!(t.downtime_start(), None);
    }

    #[test]
    fn resumed_outage_is_not_reopened() {
        let mut t = StatusTracker::resume_outage(5_000);
        assert_eq!(t.observed(), Some(ObservedStatus::Offline));
        assert_eq!(t.observe(false, 6_000), Transition::None);
        assert_eq!(
            t.observe(true, 65_000),
            Transition::BackOnline {
                started: 5_000,
                downtime_secs: 60
            }
        );
    }
}
