use crate::config::{ATTENDANCE_THRESHOLD, MARKS_THRESHOLD};
use crate::models::{AttendanceRecord, AttendanceRisk, MarksRecord, PerformanceRisk, RiskReport};

pub fn analyze(attendance: &[AttendanceRecord], marks: &[MarksRecord]) -> RiskReport {
    RiskReport {
        attendance: attendance_risks(attendance),
        performance: performance_risks(marks),
    }
}

/// Subjects under the attendance threshold, in input order. Subjects with no
/// classes recorded yet are never at risk.
pub fn attendance_risks(records: &[AttendanceRecord]) -> Vec<AttendanceRisk> {
    records
        .iter()
        .filter(|record| is_attendance_at_risk(record))
        .map(|record| AttendanceRisk {
            subject: record.subject.clone(),
            code: record.code.clone(),
            percentage: record.percentage,
            classes_needed: classes_needed(record.present, record.total),
        })
        .collect()
}

pub fn is_attendance_at_risk(record: &AttendanceRecord) -> bool {
    record.total > 0 && record.percentage < ATTENDANCE_THRESHOLD
}

/// Consecutive attended classes needed to climb back to 75%.
///
/// Solving (present + x) / (total + x) >= 0.75 gives x >= 3 * total - 4 * present,
/// which is the closed form ceil((0.75 * total - present) / 0.25) without the
/// floating point.
pub fn classes_needed(present: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let needed = 3 * i64::from(total) - 4 * i64::from(present.min(total));
    needed.max(0) as u32
}

pub fn performance_risks(records: &[MarksRecord]) -> Vec<PerformanceRisk> {
    records
        .iter()
        .filter_map(|record| {
            let percentage = record.percentage();
            (percentage < MARKS_THRESHOLD).then(|| PerformanceRisk {
                subject: record.code.clone(),
                total: record.total,
                max_marks: record.max_marks,
                percentage,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attendance(code: &str, present: u32, total: u32) -> AttendanceRecord {
        let mut record = AttendanceRecord::new(format!("Subject {code}"), code);
        record.present = present;
        record.total = total;
        record.refresh_percentage();
        record
    }

    fn marks(code: &str, total: f64, max_marks: f64) -> MarksRecord {
        MarksRecord {
            code: code.to_string(),
            mid1: total,
            mid2: 0.0,
            assignment: 0.0,
            total,
            max_marks,
        }
    }

    #[test]
    fn flags_low_attendance_in_input_order() {
        let records = vec![
            attendance("CSE201", 18, 20),
            attendance("CSE202", 14, 20),
            attendance("CSE203", 16, 20),
            attendance("CSE205", 13, 20),
        ];

        let risks = attendance_risks(&records);
        let codes: Vec<&str> = risks.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["CSE202", "CSE205"]);
        assert_eq!(risks[0].percentage, 70);
        assert_eq!(risks[0].classes_needed, 4);
        assert_eq!(risks[1].classes_needed, 8);
    }

    #[test]
    fn classes_needed_reaches_threshold() {
        for (present, total) in [(14, 20), (13, 20), (0, 4), (5, 9), (74, 100)] {
            let needed = classes_needed(present, total);
            let after = f64::from(present + needed) / f64::from(total + needed);
            assert!(after >= 0.75, "{present}/{total} + {needed} stays under 75%");
            if needed > 0 {
                let before = f64::from(present + needed - 1) / f64::from(total + needed - 1);
                assert!(before < 0.75);
            }
        }
    }

    #[test]
    fn classes_needed_never_negative() {
        assert_eq!(classes_needed(20, 20), 0);
        assert_eq!(classes_needed(0, 0), 0);
        assert_eq!(classes_needed(15, 20), 0);
    }

    #[test]
    fn no_classes_is_not_a_risk() {
        let records = vec![attendance("NEW101", 0, 0)];
        assert!(attendance_risks(&records).is_empty());
    }

    #[test]
    fn flags_marks_under_sixty_percent() {
        let records = vec![
            marks("DSA", 73.0, 100.0),
            marks("DBMS", 55.0, 100.0),
            marks("LAB", 29.0, 50.0),
            marks("SE", 59.99, 100.0),
            marks("OS", 60.0, 100.0),
        ];

        let risks = performance_risks(&records);
        let codes: Vec<&str> = risks.iter().map(|r| r.subject.as_str()).collect();
        assert_eq!(codes, vec!["DBMS", "LAB", "SE"]);
        assert!((risks[1].percentage - 58.0).abs() < 1e-9);
    }

    #[test]
    fn empty_input_gives_empty_report() {
        let report = analyze(&[], &[]);
        assert!(report.attendance.is_empty());
        assert!(report.performance.is_empty());
    }
}
