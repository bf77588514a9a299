use crate::config::DEFAULT_CREDITS;
use crate::models::{MarksRecord, SubjectCredits};

/// Percentage floor, grade point, letter grade. Anything below the last rung
/// is a fail (0, "F").
const GRADE_LADDER: [(f64, u8, &str); 7] = [
    (90.0, 10, "A+"),
    (80.0, 9, "A"),
    (70.0, 8, "B+"),
    (60.0, 7, "B"),
    (50.0, 6, "C+"),
    (40.0, 5, "C"),
    (35.0, 4, "D"),
];

const CGPA_LABELS: [(f64, &str); 6] = [
    (9.0, "Outstanding"),
    (8.0, "Excellent"),
    (7.0, "Very Good"),
    (6.0, "Good"),
    (5.0, "Average"),
    (4.0, "Pass"),
];

/// Rounded attendance percentage, 0 while no classes have been held.
pub fn attendance_percentage(present: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }

    let present = u64::from(present.min(total));
    let total = u64::from(total);
    // round-half-up in integer space
    ((present * 200 + total) / (total * 2)) as u32
}

pub fn marks_total(mid1: Option<f64>, mid2: Option<f64>, assignment: Option<f64>) -> f64 {
    mid1.unwrap_or(0.0) + mid2.unwrap_or(0.0) + assignment.unwrap_or(0.0)
}

pub fn marks_percentage(total: f64, max_marks: f64) -> f64 {
    if max_marks <= 0.0 {
        return 0.0;
    }
    total * 100.0 / max_marks
}

pub fn grade_point(percentage: f64) -> u8 {
    GRADE_LADDER
        .iter()
        .find(|(floor, _, _)| percentage >= *floor)
        .map(|(_, point, _)| *point)
        .unwrap_or(0)
}

pub fn letter_grade(percentage: f64) -> &'static str {
    GRADE_LADDER
        .iter()
        .find(|(floor, _, _)| percentage >= *floor)
        .map(|(_, _, letter)| *letter)
        .unwrap_or("F")
}

/// Unweighted mean of per-subject grade points, rounded to two decimals.
pub fn cgpa(records: &[MarksRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }

    let sum: u32 = records
        .iter()
        .map(|record| u32::from(grade_point(record.percentage())))
        .sum();

    round2(f64::from(sum) / records.len() as f64)
}

/// Credit-weighted mean of grade points. A missing or zero credit count
/// weighs the subject at the default of 3 credits.
pub fn weighted_gpa(subjects: &[SubjectCredits]) -> f64 {
    if subjects.is_empty() {
        return 0.0;
    }

    let (weighted, credits) = subjects.iter().fold((0u64, 0u64), |(weighted, credits), subject| {
        let weight = u64::from(effective_credits(subject.credits));
        let point = u64::from(grade_point(subject.percentage));
        (weighted + point * weight, credits + weight)
    });

    round2(weighted as f64 / credits as f64)
}

fn effective_credits(credits: Option<u32>) -> u32 {
    match credits {
        Some(value) if value > 0 => value,
        _ => DEFAULT_CREDITS,
    }
}

pub fn grade_description(cgpa: f64) -> &'static str {
    CGPA_LABELS
        .iter()
        .find(|(floor, _)| cgpa >= *floor)
        .map(|(_, label)| *label)
        .unwrap_or("Fail")
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
