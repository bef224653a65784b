//! Self-rescheduling per-frame task.
//!
//! A [`FrameTask`] runs its step once per displayed frame and reschedules
//! itself only while the step reports [`FrameStatus::Continue`]. Once the
//! terminating condition holds nothing is pending and the event loop can go
//! back to waiting for input.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Done,
}

impl FrameStatus {
    /// Combines two independent steps: continue while either continues.
    pub fn or(self, other: FrameStatus) -> FrameStatus {
        if self == FrameStatus::Continue || other == FrameStatus::Continue {
            FrameStatus::Continue
        } else {
            FrameStatus::Done
        }
    }
}

#[derive(Debug, Default)]
pub struct FrameTask {
    scheduled: bool,
}

impl FrameTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules the task for the next frame. Returns false if it was
    /// already pending.
    pub fn schedule(&mut self) -> bool {
        let newly = !self.scheduled;
        self.scheduled = true;
        newly
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    /// Runs one step if scheduled. The task stays scheduled only when the
    /// step asks to continue.
    pub fn run<F>(&mut self, step: F) -> FrameStatus
    where
        F: FnOnce() -> FrameStatus,
    {
        if !self.scheduled {
            return FrameStatus::Done;
        }
        self.scheduled = false;

        let status = step();
        if status == FrameStatus::Continue {
            self.scheduled = true;
        }
        status
    }

    pub fn cancel(&mut self) {
        self.scheduled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unscheduled_task_does_not_run() {
        let mut task = FrameTask::new();
        let mut ran = false;
        assert_eq!(
            task.run(|| {
                ran = true;
                FrameStatus::Continue
            }),
            FrameStatus::Done
        );
        assert!(!ran);
    }

    #[test]
    fn test_task_stops_rescheduling_when_done() {
        let mut task = FrameTask::new();
        assert!(task.schedule());
        assert!(!task.schedule());

        let mut remaining = 3;
        while task.is_scheduled() {
            task.run(|| {
                remaining -= 1;
                if remaining == 0 {
                    FrameStatus::Done
                } else {
                    FrameStatus::Continue
                }
            });
        }
        assert_eq!(remaining, 0);
    }

    #[test]
    fn test_status_or() {
        use FrameStatus::*;
        assert_eq!(Done.or(Done), Done);
        assert_eq!(Done.or(Continue), Continue);
        assert_eq!(Continue.or(Done), Continue);
    }
}
