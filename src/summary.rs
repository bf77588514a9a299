use crate::config::ATTENDANCE_THRESHOLD;
use crate::metrics;
use crate::models::{AttendanceRecord, MarksRecord, PerformanceSummary, Subject, SubjectCredits, TopSubject};
use crate::risk;

const GOOD_MARKS_AVERAGE: f64 = 70.0;

pub fn summarize(
    subjects: &[Subject],
    attendance: &[AttendanceRecord],
    marks: &[MarksRecord],
    cgpa_override: Option<f64>,
) -> PerformanceSummary {
    let average_attendance = if attendance.is_empty() {
        0.0
    } else {
        let sum: u32 = attendance.iter().map(|record| record.percentage).sum();
        metrics::round1(f64::from(sum) / attendance.len() as f64)
    };

    let average_marks = if marks.is_empty() {
        0.0
    } else {
        let sum: f64 = marks.iter().map(MarksRecord::percentage).sum();
        metrics::round1(sum / marks.len() as f64)
    };

    let subjects_at_risk = risk::attendance_risks(attendance).len();
    let top_subject = top_subject(marks);
    let cgpa = cgpa_override.unwrap_or_else(|| metrics::cgpa(marks));
    let weighted_gpa = metrics::weighted_gpa(&subject_credits(subjects, marks));

    let mut insights = Vec::new();
    if average_attendance >= f64::from(ATTENDANCE_THRESHOLD) {
        insights.push("Your attendance is good across all subjects!".to_string());
    } else {
        insights.push("Focus on improving attendance to stay eligible for exams".to_string());
    }
    if average_marks >= GOOD_MARKS_AVERAGE {
        insights.push("You're performing well academically!".to_string());
    } else {
        insights.push("Consider dedicating more time to studies".to_string());
    }
    if let Some(top) = &top_subject {
        insights.push(format!("Your strongest subject is {}", top.subject));
    }
    if subjects_at_risk > 0 {
        insights.push(format!("{subjects_at_risk} subject(s) need immediate attention"));
    }

    PerformanceSummary {
        average_attendance,
        average_marks,
        subjects_at_risk,
        top_subject,
        cgpa,
        cgpa_description: metrics::grade_description(cgpa),
        weighted_gpa,
        insights,
    }
}

/// Pairs each marks record with the credits of the subject sharing its code.
pub fn subject_credits(subjects: &[Subject], marks: &[MarksRecord]) -> Vec<SubjectCredits> {
    marks
        .iter()
        .map(|record| SubjectCredits {
            percentage: record.percentage(),
            credits: subjects
                .iter()
                .find(|subject| subject.code == record.code)
                .and_then(|subject| subject.credits),
        })
        .collect()
}

/// First subject holding the highest marks percentage.
fn top_subject(marks: &[MarksRecord]) -> Option<TopSubject> {
    let mut best: Option<(&MarksRecord, f64)> = None;
    for record in marks {
        let percentage = record.percentage();
        match best {
            Some((_, top)) if percentage <= top => {}
            _ => best = Some((record, percentage)),
        }
    }

    best.map(|(record, percentage)| TopSubject {
        subject: record.code.clone(),
        total: record.total,
        max_marks: record.max_marks,
        percentage: metrics::round1(percentage),
    })
}
