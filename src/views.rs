use serde::Serialize;

use crate::intent::{self, IntentDecision, ViewId};
use crate::metrics;
use crate::models::{
    AttendanceRecord, MarksBreakdown, MarksRecord, PerformanceSummary, RiskReport, StudentProfile,
    StudyPlanEntry, TimetableEntry,
};
use crate::{planner, risk, summary};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", content = "data", rename_all = "lowercase")]
pub enum DashboardView {
    Attendance(Vec<AttendanceRecord>),
    Marks(Vec<MarksBreakdown>),
    Weak(RiskReport),
    Study(Vec<StudyPlanEntry>),
    Timetable(Vec<TimetableEntry>),
    Summary(PerformanceSummary),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    pub decision: IntentDecision,
    pub view: DashboardView,
}

pub fn marks_breakdown(marks: &[MarksRecord]) -> Vec<MarksBreakdown> {
    marks
        .iter()
        .map(|record| {
            let percentage = record.percentage();
            MarksBreakdown {
                subject: record.code.clone(),
                mid1: record.mid1,
                mid2: record.mid2,
                assignment: record.assignment,
                total: record.total,
                max_marks: record.max_marks,
                percentage: metrics::round2(percentage),
                grade_point: metrics::grade_point(percentage),
                letter_grade: metrics::letter_grade(percentage),
            }
        })
        .collect()
}

pub fn render_view(view: ViewId, profile: &StudentProfile) -> DashboardView {
    match view {
        ViewId::Attendance => DashboardView::Attendance(profile.attendance.clone()),
        ViewId::Marks => DashboardView::Marks(marks_breakdown(&profile.marks)),
        ViewId::Weak => DashboardView::Weak(risk::analyze(&profile.attendance, &profile.marks)),
        ViewId::Study => DashboardView::Study(planner::build_plan(&profile.marks)),
        ViewId::Timetable => DashboardView::Timetable(profile.timetable.clone()),
        ViewId::Summary => DashboardView::Summary(summary::summarize(
            &profile.subjects,
            &profile.attendance,
            &profile.marks,
            profile.cgpa_override,
        )),
    }
}

/// Routes a free-text question and renders the chosen view.
pub fn ask(query: &str, profile: &StudentProfile) -> Answer {
    let decision = intent::classify(query);
    let view = render_view(decision.component, profile);
    Answer { decision, view }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MarksCaps;
    use crate::models::StudentId;
    use crate::profile::MarksUpdate;

    fn sample_profile() -> StudentProfile {
        let caps = MarksCaps::default();
        let mut profile = StudentProfile::new(StudentId::new("stu-view"));
        for (name, code, present, total, mid1, mid2, assignment) in [
            ("Data Structures", "CSE201", 18, 20, 25.0, 28.0, 20.0),
            ("Databases", "CSE202", 14, 20, 18.0, 22.0, 15.0),
            ("Operating Systems", "CSE203", 16, 20, 22.0, 24.0, 18.0),
        ] {
            profile.add_subject(name, code, None, &caps).unwrap();
            profile.update_attendance(code, Some(present), Some(total)).unwrap();
            let update = MarksUpdate {
                mid1: Some(mid1),
                mid2: Some(mid2),
                assignment: Some(assignment),
            };
            profile.update_marks(code, update, &caps).unwrap();
        }
        profile
    }

    #[test]
    fn breakdown_carries_grades() {
        let profile = sample_profile();
        let rows = marks_breakdown(&profile.marks);
        assert_eq!(rows[0].percentage, 73.0);
        assert_eq!(rows[0].grade_point, 8);
        assert_eq!(rows[0].letter_grade, "B+");
        assert_eq!(rows[1].letter_grade, "C+");
    }

    #[test]
    fn each_view_renders_its_structure() {
        let profile = sample_profile();
        assert!(matches!(render_view(ViewId::Attendance, &profile), DashboardView::Attendance(rows) if rows.len() == 3));
        assert!(matches!(render_view(ViewId::Timetable, &profile), DashboardView::Timetable(rows) if rows.is_empty()));

        match render_view(ViewId::Weak, &profile) {
            DashboardView::Weak(report) => {
                assert_eq!(report.attendance.len(), 1);
                assert_eq!(report.attendance[0].code, "CSE202");
                assert_eq!(report.performance.len(), 1);
            }
            other => panic!("unexpected view {other:?}"),
        }

        match render_view(ViewId::Study, &profile) {
            DashboardView::Study(plan) => assert_eq!(plan[0].subject, "CSE202"),
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn ask_routes_then_renders() {
        let profile = sample_profile();
        let answer = ask("Show my attendance", &profile);
        assert_eq!(answer.decision.component, ViewId::Attendance);
        assert!(matches!(answer.view, DashboardView::Attendance(_)));

        let answer = ask("What's my overall performance?", &profile);
        assert_eq!(answer.decision.component, ViewId::Summary);
        assert!(matches!(answer.view, DashboardView::Summary(_)));
    }

    #[test]
    fn views_serialize_with_a_tag() {
        let profile = sample_profile();
        let json = serde_json::to_value(render_view(ViewId::Study, &profile)).unwrap();
        assert_eq!(json["view"], "study");
        assert_eq!(json["data"][0]["priority"], "Medium");
    }
}
