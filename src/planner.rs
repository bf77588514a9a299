use crate::config::STUDY_PLAN_SIZE;
use crate::models::{MarksRecord, Priority, StudyPlanEntry};

const STUDY_HOURS_PER_WEEK: u32 = 3;

const FOCUS_AREAS: [&str; 4] = [
    "Review previous exam questions",
    "Complete practice problems",
    "Watch video tutorials",
    "Make summary notes",
];

/// Up to three remediation entries for the lowest-scoring subjects, weakest
/// first. Equal percentages keep their input order.
pub fn build_plan(marks: &[MarksRecord]) -> Vec<StudyPlanEntry> {
    let mut ranked: Vec<(&MarksRecord, f64)> = marks
        .iter()
        .map(|record| (record, record.percentage()))
        .collect();

    // sort_by is stable, ties stay in input order
    ranked.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    ranked
        .into_iter()
        .take(STUDY_PLAN_SIZE)
        .enumerate()
        .map(|(index, (record, percentage))| StudyPlanEntry {
            week: format!("Week {}", index + 1),
            subject: record.code.clone(),
            hours: STUDY_HOURS_PER_WEEK,
            topics: FOCUS_AREAS.iter().map(|topic| topic.to_string()).collect(),
            priority: priority_for(percentage),
            percentage,
        })
        .collect()
}

pub fn priority_for(percentage: f64) -> Priority {
    if percentage < 50.0 {
        Priority::High
    } else if percentage < 70.0 {
        Priority::Medium
    } else {
        Priority::Low
    }
}
