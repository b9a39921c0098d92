use serde::{Deserialize, Serialize};
use taskguide_domain::{Statistics, StatusBreakdown, TaskStatusCounts};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusBreakdownDTO {
    pub completed: usize,
    pub overdue: usize,
    pub active: usize,
}

impl StatusBreakdownDTO {
    pub fn new(breakdown: StatusBreakdown) -> Self {
        Self {
            completed: breakdown.completed,
            overdue: breakdown.overdue,
            active: breakdown.active,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatusCountsDTO {
    pub pending: usize,
    pub completed: usize,
    pub overdue: usize,
}

impl TaskStatusCountsDTO {
    pub fn new(counts: TaskStatusCounts) -> Self {
        Self {
            pending: counts.pending,
            completed: counts.completed,
            overdue: counts.overdue,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsDTO {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub overdue_tasks: usize,
    pub tasks_next_3_days: usize,
    pub tasks_next_7_days: usize,
    pub tasks_next_30_days: usize,
    pub completion_rate: f64,
    pub status_breakdown: StatusBreakdownDTO,
    pub status_counts: TaskStatusCountsDTO,
}

impl StatisticsDTO {
    pub fn new(statistics: Statistics, status_counts: TaskStatusCounts) -> Self {
        let status_breakdown = StatusBreakdownDTO::new(statistics.status_breakdown());
        Self {
            total_tasks: statistics.total_tasks,
            completed_tasks: statistics.completed_tasks,
            overdue_tasks: statistics.overdue_tasks,
            tasks_next_3_days: statistics.tasks_next_3_days,
            tasks_next_7_days: statistics.tasks_next_7_days,
            tasks_next_30_days: statistics.tasks_next_30_days,
            completion_rate: statistics.completion_rate,
            status_breakdown,
            status_counts: TaskStatusCountsDTO::new(status_counts),
        }
    }
}
