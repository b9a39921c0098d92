use crate::shared::html::escape_html;
use crate::task::Task;

const MILLIS_PER_HOUR: i64 = 1000 * 60 * 60;

/// How far away (in millis) from a threshold a `Task` can be and still be
/// considered due for that threshold's reminder. 0.4 hours, exclusive.
pub const REMINDER_TOLERANCE_MILLIS: i64 = 24 * 60 * 1000;

/// Hours left until `deadline`, fractional and negative once it has passed
pub fn hours_left(deadline: i64, now: i64) -> f64 {
    (deadline - now) as f64 / MILLIS_PER_HOUR as f64
}

/// The fixed lead times before a deadline at which a reminder is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderThreshold {
    TwentyFourHours,
    TwelveHours,
    TwoHours,
}

impl ReminderThreshold {
    /// All thresholds in the order they are checked. First match wins.
    pub const ALL: [ReminderThreshold; 3] = [
        ReminderThreshold::TwentyFourHours,
        ReminderThreshold::TwelveHours,
        ReminderThreshold::TwoHours,
    ];

    pub fn hours(&self) -> i64 {
        match self {
            Self::TwentyFourHours => 24,
            Self::TwelveHours => 12,
            Self::TwoHours => 2,
        }
    }

    fn millis(&self) -> i64 {
        self.hours() * MILLIS_PER_HOUR
    }

    pub fn is_sent(&self, task: &Task) -> bool {
        match self {
            Self::TwentyFourHours => task.reminder_24h_sent,
            Self::TwelveHours => task.reminder_12h_sent,
            Self::TwoHours => task.reminder_2h_sent,
        }
    }

    pub fn mark_sent(&self, task: &mut Task) {
        match self {
            Self::TwentyFourHours => task.reminder_24h_sent = true,
            Self::TwelveHours => task.reminder_12h_sent = true,
            Self::TwoHours => task.reminder_2h_sent = true,
        }
    }

    // Whole millis, so both window edges are excluded exactly
    fn is_within_window(&self, millis_left: i64) -> bool {
        (millis_left - self.millis()).abs() < REMINDER_TOLERANCE_MILLIS
    }

    /// Finds the reminder the `Task` is due for at `now`, if any.
    ///
    /// Thresholds that were already sent are skipped, so a `Task` that
    /// re-enters a window it has been notified for is never due again.
    pub fn classify(task: &Task, now: i64) -> Option<Self> {
        let millis_left = task.deadline - now;
        Self::ALL
            .iter()
            .copied()
            .find(|threshold| !threshold.is_sent(task) && threshold.is_within_window(millis_left))
    }
}

/// A `Task` together with the contact details of the `User` owning it
#[derive(Debug, Clone, PartialEq)]
pub struct TaskReminderCandidate {
    pub task: Task,
    pub recipient_email: String,
    pub recipient_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReminderEmail {
    pub to_email: String,
    pub to_name: String,
    pub subject: String,
    pub html_body: String,
}

impl ReminderEmail {
    pub const SUBJECT: &'static str = "Task deadline reminder";

    pub fn new(candidate: &TaskReminderCandidate, now: i64) -> Self {
        let task = &candidate.task;
        let hours_left = hours_left(task.deadline, now).round();
        let html_body = format!(
            "<h3>Task deadline reminder</h3>\
             <p><strong>Task:</strong> {}</p>\
             <p><strong>Time left:</strong> {} h.</p>\
             <p><strong>Description:</strong> {}</p>",
            escape_html(&task.title),
            hours_left,
            escape_html(&task.description)
        );

        Self {
            to_email: candidate.recipient_email.clone(),
            to_name: candidate.recipient_name.clone(),
            subject: Self::SUBJECT.to_string(),
            html_body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ID;

    const HOUR: i64 = 1000 * 60 * 60;
    const NOW: i64 = 1_743_465_600_000; // Tue Apr 01 2025 00:00:00 UTC

    const MINUTE: i64 = 1000 * 60;

    fn task_due_in_millis(millis: i64) -> Task {
        let deadline = NOW + millis;
        Task::new(ID::default(), "Title".into(), deadline, deadline - HOUR).unwrap()
    }

    fn task_due_in_hours(hours: f64) -> Task {
        task_due_in_millis((hours * HOUR as f64) as i64)
    }

    #[test]
    fn classifies_tasks_inside_tolerance_window() {
        let cases = vec![
            (24.3, Some(ReminderThreshold::TwentyFourHours)),
            (23.7, Some(ReminderThreshold::TwentyFourHours)),
            (24.0, Some(ReminderThreshold::TwentyFourHours)),
            (12.2, Some(ReminderThreshold::TwelveHours)),
            (11.65, Some(ReminderThreshold::TwelveHours)),
            (2.0, Some(ReminderThreshold::TwoHours)),
            (1.7, Some(ReminderThreshold::TwoHours)),
        ];
        for (hours, expected) in cases {
            assert_eq!(
                ReminderThreshold::classify(&task_due_in_hours(hours), NOW),
                expected,
                "Deadline in {} hours",
                hours
            );
        }
    }

    #[test]
    fn classifies_tasks_outside_tolerance_window_as_not_due() {
        for hours in &[24.5, 23.5, 48.0, 18.0, 12.5, 11.5, 6.0, 2.5, 1.5, 0.5, 1000.0] {
            assert_eq!(
                ReminderThreshold::classify(&task_due_in_hours(*hours), NOW),
                None,
                "Deadline in {} hours",
                hours
            );
        }
    }

    #[test]
    fn tolerance_window_edges_are_exclusive() {
        for threshold in &ReminderThreshold::ALL {
            let at = threshold.hours() * HOUR;
            for offset in &[24 * MINUTE, -24 * MINUTE] {
                assert_eq!(
                    ReminderThreshold::classify(&task_due_in_millis(at + offset), NOW),
                    None,
                    "Deadline in {}h {} millis",
                    threshold.hours(),
                    offset
                );
            }
            for offset in &[24 * MINUTE - 1, -24 * MINUTE + 1] {
                assert_eq!(
                    ReminderThreshold::classify(&task_due_in_millis(at + offset), NOW),
                    Some(*threshold),
                    "Deadline in {}h {} millis",
                    threshold.hours(),
                    offset
                );
            }
        }
    }

    #[test]
    fn tasks_past_deadline_are_never_due() {
        assert_eq!(ReminderThreshold::classify(&task_due_in_millis(0), NOW), None);
        assert_eq!(
            ReminderThreshold::classify(&task_due_in_millis(-2 * HOUR), NOW),
            None
        );
    }

    #[test]
    fn sent_thresholds_are_not_due_again() {
        let mut task = task_due_in_hours(24.1);
        let threshold = ReminderThreshold::classify(&task, NOW).unwrap();
        threshold.mark_sent(&mut task);
        assert!(task.reminder_24h_sent);
        assert!(!task.reminder_12h_sent && !task.reminder_2h_sent);

        assert_eq!(ReminderThreshold::classify(&task, NOW), None);
        assert_eq!(ReminderThreshold::classify(&task, NOW + HOUR / 10), None);
    }

    #[test]
    fn later_threshold_is_due_even_if_earlier_was_missed() {
        let task = task_due_in_hours(12.0);
        assert!(!task.reminder_24h_sent);
        assert_eq!(
            ReminderThreshold::classify(&task, NOW),
            Some(ReminderThreshold::TwelveHours)
        );
    }

    #[test]
    fn builds_reminder_email() {
        let mut task = task_due_in_hours(11.8);
        task.title = "Pay <rent>".into();
        task.description = "Before the 5th".into();
        let candidate = TaskReminderCandidate {
            task,
            recipient_email: "johnny@example.com".into(),
            recipient_name: "johnny_b".into(),
        };

        let email = ReminderEmail::new(&candidate, NOW);
        assert_eq!(email.to_email, "johnny@example.com");
        assert_eq!(email.to_name, "johnny_b");
        assert_eq!(email.subject, ReminderEmail::SUBJECT);
        assert!(email.html_body.contains("Pay &lt;rent&gt;"));
        assert!(email.html_body.contains("<strong>Time left:</strong> 12 h."));
        assert!(email.html_body.contains("Before the 5th"));
    }
}
