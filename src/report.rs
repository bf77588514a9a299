use std::fmt::Write;

use crate::models::StudentProfile;
use crate::{planner, risk, summary};

pub fn build_report(profile: &StudentProfile) -> String {
    let summary = summary::summarize(
        &profile.subjects,
        &profile.attendance,
        &profile.marks,
        profile.cgpa_override,
    );
    let risks = risk::analyze(&profile.attendance, &profile.marks);
    let plan = planner::build_plan(&profile.marks);

    let mut output = String::new();

    let _ = writeln!(output, "# Academic Dashboard Report");
    let _ = writeln!(
        output,
        "Generated for {} (profile updated {})",
        profile.student_id,
        profile.updated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Summary");
    let _ = writeln!(output, "- Average attendance: {:.1}%", summary.average_attendance);
    let _ = writeln!(output, "- Average marks: {:.1}%", summary.average_marks);
    let _ = writeln!(output, "- CGPA: {:.2} ({})", summary.cgpa, summary.cgpa_description);
    let _ = writeln!(output, "- Credit-weighted GPA: {:.2}", summary.weighted_gpa);
    if let Some(top) = &summary.top_subject {
        let _ = writeln!(
            output,
            "- Strongest subject: {} ({}/{}, {:.1}%)",
            top.subject, top.total, top.max_marks, top.percentage
        );
    }
    for insight in &summary.insights {
        let _ = writeln!(output, "- {insight}");
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Low Attendance");

    if risks.attendance.is_empty() {
        let _ = writeln!(output, "All subjects are at or above 75% attendance.");
    } else {
        for item in &risks.attendance {
            let _ = writeln!(
                output,
                "- {} ({}) at {}%: attend the next {} classes to reach 75%",
                item.subject, item.code, item.percentage, item.classes_needed
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Low Performance");

    if risks.performance.is_empty() {
        let _ = writeln!(output, "No subjects below 60%.");
    } else {
        for item in &risks.performance {
            let _ = writeln!(
                output,
                "- {}: {}/{} ({:.1}%)",
                item.subject, item.total, item.max_marks, item.percentage
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Study Plan");

    if plan.is_empty() {
        let _ = writeln!(output, "No marks recorded yet.");
    } else {
        for entry in &plan {
            let _ = writeln!(
                output,
                "- {}: {} ({} priority, {} hours, {:.1}%)",
                entry.week, entry.subject, entry.priority, entry.hours, entry.percentage
            );
            for topic in &entry.topics {
                let _ = writeln!(output, "  - {topic}");
            }
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Career Roadmap");

    match profile.current_roadmap() {
        None => {
            let _ = writeln!(output, "No roadmap generated yet.");
        }
        Some(roadmap) => {
            let _ = writeln!(
                output,
                "{} ({} level), {}/{} steps complete",
                roadmap.goal,
                roadmap.level,
                roadmap.completed_steps(),
                roadmap.steps.len()
            );
            for (index, step) in roadmap.steps.iter().enumerate() {
                let mark = if step.completed { "x" } else { " " };
                let _ = writeln!(
                    output,
                    "{}. [{}] {} ({})",
                    index + 1,
                    mark,
                    step.title,
                    step.duration
                );
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MarksCaps;
    use crate::models::{SkillLevel, StudentId};
    use crate::profile::MarksUpdate;

    #[test]
    fn empty_profile_renders_placeholders() {
        let profile = StudentProfile::new(StudentId::new("stu-empty"));
        let report = build_report(&profile);
        assert!(report.starts_with("# Academic Dashboard Report"));
        assert!(report.contains("Generated for stu-empty"));
        assert!(report.contains("All subjects are at or above 75% attendance."));
        assert!(report.contains("No marks recorded yet."));
        assert!(report.contains("No roadmap generated yet."));
    }

    #[test]
    fn report_lists_risks_plan_and_roadmap() {
        let caps = MarksCaps::default();
        let mut profile = StudentProfile::new(StudentId::new("stu-report"));
        profile.add_subject("Databases", "CSE202", None, &caps).unwrap();
        profile.update_attendance("CSE202", Some(14), Some(20)).unwrap();
        let update = MarksUpdate {
            mid1: Some(18.0),
            mid2: Some(22.0),
            assignment: Some(5.0),
        };
        profile.update_marks("CSE202", update, &caps).unwrap();
        let id = profile
            .generate_roadmap("Cybersecurity Specialist", &[], SkillLevel::Intermediate)
            .unwrap()
            .id;
        profile.set_step_completion(id, 0, Some(true)).unwrap();

        let report = build_report(&profile);
        assert!(report.contains("- Databases (CSE202) at 70%: attend the next 4 classes to reach 75%"));
        assert!(report.contains("- CSE202: 45/100 (45.0%)"));
        assert!(report.contains("- Week 1: CSE202 (High priority, 3 hours, 45.0%)"));
        assert!(report.contains("Cybersecurity Specialist (Intermediate level), 1/5 steps complete"));
        assert!(report.contains("1. [x] Networking Fundamentals (4-6 weeks)"));
        assert!(report.contains("2. [ ] Operating Systems Security (5-6 weeks)"));
    }
}
