use crate::task::Task;

const DAY: i64 = 1000 * 60 * 60 * 24;

/// Aggregated numbers about a collection of `Task`s at a given time.
///
/// The upcoming buckets are cumulative: every task due in the next 3 days
/// is also counted in the 7 and 30 day buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub overdue_tasks: usize,
    pub tasks_next_3_days: usize,
    pub tasks_next_7_days: usize,
    pub tasks_next_30_days: usize,
    /// Percentage of completed tasks rounded to two decimals
    pub completion_rate: f64,
}

/// Slices of the status pie chart
#[derive(Debug, Clone, PartialEq)]
pub struct StatusBreakdown {
    pub completed: usize,
    pub overdue: usize,
    pub active: usize,
}

impl Statistics {
    pub fn calculate(tasks: &[Task], now: i64) -> Self {
        let due_within = |days: i64| {
            tasks
                .iter()
                .filter(|t| !t.is_completed && t.deadline > now && t.deadline <= now + days * DAY)
                .count()
        };

        let total_tasks = tasks.len();
        let completed_tasks = tasks.iter().filter(|t| t.is_completed).count();
        let overdue_tasks = tasks.iter().filter(|t| t.is_overdue(now)).count();

        let completion_rate = if total_tasks > 0 {
            let rate = completed_tasks as f64 / total_tasks as f64 * 100.0;
            (rate * 100.0).round() / 100.0
        } else {
            0.0
        };

        Self {
            total_tasks,
            completed_tasks,
            overdue_tasks,
            tasks_next_3_days: due_within(3),
            tasks_next_7_days: due_within(7),
            tasks_next_30_days: due_within(30),
            completion_rate,
        }
    }

    pub fn status_breakdown(&self) -> StatusBreakdown {
        StatusBreakdown {
            completed: self.completed_tasks,
            overdue: self.overdue_tasks,
            active: self.total_tasks - self.completed_tasks - self.overdue_tasks,
        }
    }
}

/// Bars of the status bar chart. Unlike `Statistics`, a task due exactly
/// at `now` counts as overdue here.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskStatusCounts {
    pub pending: usize,
    pub completed: usize,
    pub overdue: usize,
}

impl TaskStatusCounts {
    pub fn calculate(tasks: &[Task], now: i64) -> Self {
        let mut counts = Self {
            pending: 0,
            completed: 0,
            overdue: 0,
        };
        for task in tasks {
            if task.is_completed {
                counts.completed += 1;
            } else if task.deadline > now {
                counts.pending += 1;
            } else {
                counts.overdue += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ID;

    const NOW: i64 = 1_743_465_600_000; // Tue Apr 01 2025 00:00:00 UTC

    fn task(deadline: i64, is_completed: bool) -> Task {
        Task {
            id: Default::default(),
            user_id: ID::default(),
            title: "Title".into(),
            description: String::new(),
            deadline,
            priority: 0,
            file_url: None,
            is_completed,
            completed_at: None,
            reminder_24h_sent: false,
            reminder_12h_sent: false,
            reminder_2h_sent: false,
            last_reminder_sent_at: None,
            created: 0,
            updated: 0,
        }
    }

    #[test]
    fn calculates_statistics() {
        let tasks = vec![
            task(0, true),
            task(NOW - DAY, false),
            task(NOW + 2 * DAY, false),
            task(NOW + 6 * DAY, false),
            task(NOW + 20 * DAY, false),
            task(NOW + 40 * DAY, false),
        ];

        let stats = Statistics::calculate(&tasks, NOW);
        assert_eq!(stats.total_tasks, 6);
        assert_eq!(stats.completed_tasks, 1);
        assert_eq!(stats.overdue_tasks, 1);
        assert_eq!(stats.tasks_next_3_days, 1);
        assert_eq!(stats.tasks_next_7_days, 2);
        assert_eq!(stats.tasks_next_30_days, 3);
        assert_eq!(stats.completion_rate, 16.67);
    }

    #[test]
    fn completion_rate_is_zero_without_tasks() {
        let stats = Statistics::calculate(&[], NOW);
        assert_eq!(stats.total_tasks, 0);
        assert_eq!(stats.completion_rate, 0.0);
    }

    #[test]
    fn task_due_now_is_neither_overdue_nor_upcoming() {
        let stats = Statistics::calculate(&[task(NOW, false)], NOW);
        assert_eq!(stats.overdue_tasks, 0);
        assert_eq!(stats.tasks_next_3_days, 0);
        assert_eq!(stats.tasks_next_30_days, 0);
        assert_eq!(stats.status_breakdown().active, 1);
    }

    #[test]
    fn bucket_upper_bounds_are_inclusive() {
        let tasks = vec![
            task(NOW + 3 * DAY, false),
            task(NOW + 7 * DAY, false),
            task(NOW + 30 * DAY, false),
            task(NOW + 30 * DAY + 1, false),
        ];
        let stats = Statistics::calculate(&tasks, NOW);
        assert_eq!(stats.tasks_next_3_days, 1);
        assert_eq!(stats.tasks_next_7_days, 2);
        assert_eq!(stats.tasks_next_30_days, 3);
    }

    #[test]
    fn completed_tasks_are_not_overdue_or_upcoming() {
        let tasks = vec![task(NOW - DAY, true), task(NOW + DAY, true)];
        let stats = Statistics::calculate(&tasks, NOW);
        assert_eq!(stats.overdue_tasks, 0);
        assert_eq!(stats.tasks_next_30_days, 0);
        assert_eq!(stats.completion_rate, 100.0);
    }

    #[test]
    fn calculates_chart_data() {
        let tasks = vec![
            task(NOW - DAY, true),
            task(NOW - DAY, false),
            task(NOW, false),
            task(NOW + DAY, false),
        ];

        let breakdown = Statistics::calculate(&tasks, NOW).status_breakdown();
        assert_eq!(
            breakdown,
            StatusBreakdown {
                completed: 1,
                overdue: 1,
                active: 2,
            }
        );

        let counts = TaskStatusCounts::calculate(&tasks, NOW);
        assert_eq!(
            counts,
            TaskStatusCounts {
                pending: 1,
                completed: 1,
                overdue: 2,
            }
        );
    }
}
