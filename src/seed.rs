use crate::config::MarksCaps;
use crate::error::Result;
use crate::models::{StudentId, StudentProfile, TimetableEntry};
use crate::profile::{MarksUpdate, SkillInput};

/// A realistic mid-semester profile for demos and smoke tests.
pub fn sample_profile(id: StudentId, caps: &MarksCaps) -> Result<StudentProfile> {
    let mut profile = StudentProfile::new(id);

    let subjects = [
        ("Data Structures & Algorithms", "CSE201", "Dr. Sharma", 18, (25.0, 28.0, 20.0)),
        ("Database Management Systems", "CSE202", "Prof. Gupta", 14, (18.0, 22.0, 15.0)),
        ("Operating Systems", "CSE203", "Dr. Verma", 16, (22.0, 24.0, 18.0)),
        ("Computer Networks", "CSE204", "Prof. Singh", 19, (27.0, 29.0, 22.0)),
        ("Software Engineering", "CSE205", "Dr. Kumar", 13, (20.0, 21.0, 16.0)),
    ];

    for (name, code, faculty, present, (mid1, mid2, assignment)) in subjects {
        profile.add_subject(name, code, Some(faculty), caps)?;
        profile.update_attendance(code, Some(present), Some(20))?;
        profile.update_marks(
            code,
            MarksUpdate {
                mid1: Some(mid1),
                mid2: Some(mid2),
                assignment: Some(assignment),
            },
            caps,
        )?;
    }

    let timetable = [
        ("Monday", "9:00-10:00", "DSA", "301", "Dr. Sharma"),
        ("Monday", "10:00-11:00", "DBMS", "205", "Prof. Gupta"),
        ("Monday", "11:00-12:00", "OS", "302", "Dr. Verma"),
        ("Tuesday", "9:00-10:00", "CN", "201", "Prof. Singh"),
        ("Tuesday", "10:00-11:00", "SE", "304", "Dr. Kumar"),
        ("Tuesday", "2:00-5:00", "DSA Lab", "Lab 1", "Dr. Sharma"),
        ("Wednesday", "9:00-10:00", "DSA", "301", "Dr. Sharma"),
        ("Wednesday", "11:00-12:00", "DBMS", "205", "Prof. Gupta"),
        ("Thursday", "10:00-11:00", "OS", "302", "Dr. Verma"),
        ("Thursday", "2:00-5:00", "DBMS Lab", "Lab 2", "Prof. Gupta"),
        ("Friday", "9:00-10:00", "CN", "201", "Prof. Singh"),
        ("Friday", "10:00-11:00", "SE", "304", "Dr. Kumar"),
    ];

    for (day, time, subject, room, faculty) in timetable {
        profile.add_timetable_entry(TimetableEntry {
            day: day.to_string(),
            time: time.to_string(),
            subject: subject.to_string(),
            room: Some(room.to_string()),
            faculty: Some(faculty.to_string()),
        })?;
    }

    profile.add_skills(
        ["Python", "JavaScript", "HTML/CSS", "Git"]
            .into_iter()
            .map(|name| SkillInput {
                name: name.to_string(),
                category: None,
                level: Default::default(),
            })
            .collect(),
    )?;

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{planner, risk};

    #[test]
    fn sample_profile_is_consistent() {
        let profile = sample_profile(StudentId::new("demo"), &MarksCaps::default()).unwrap();
        assert_eq!(profile.subjects.len(), 5);
        assert_eq!(profile.timetable.len(), 12);
        assert_eq!(profile.skills.len(), 4);

        let report = risk::analyze(&profile.attendance, &profile.marks);
        let low: Vec<&str> = report.attendance.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(low, vec!["CSE202", "CSE205"]);

        let plan = planner::build_plan(&profile.marks);
        let weakest: Vec<&str> = plan.iter().map(|e| e.subject.as_str()).collect();
        assert_eq!(weakest, vec!["CSE202", "CSE205", "CSE203"]);
    }
}
