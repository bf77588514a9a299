use std::collections::{HashMap, HashSet};

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::config::MarksCaps;
use crate::error::{DashboardError, Result};
use crate::models::{
    AttendanceRecord, MarksRecord, Roadmap, Skill, SkillLevel, StudentId, StudentProfile, Subject,
    TimetableEntry,
};
use crate::roadmap;

const SKILL_CATEGORIES: [(&str, &[&str]); 7] = [
    (
        "Programming Languages",
        &["Python", "JavaScript", "Java", "C++", "C#", "Go", "Rust", "TypeScript", "PHP", "Ruby", "Swift", "Kotlin"],
    ),
    (
        "Web Development",
        &["HTML/CSS", "React", "Angular", "Vue.js", "Node.js", "Express", "Django", "Flask", "FastAPI", "Next.js", "Tailwind CSS"],
    ),
    (
        "Mobile Development",
        &["React Native", "Flutter", "Swift (iOS)", "Kotlin (Android)", "Ionic", "Xamarin"],
    ),
    (
        "Data Science & ML",
        &["Machine Learning", "Deep Learning", "TensorFlow", "PyTorch", "Pandas", "NumPy", "Scikit-learn", "NLP", "Computer Vision"],
    ),
    (
        "Database",
        &["MongoDB", "PostgreSQL", "MySQL", "Redis", "Firebase", "SQL", "Oracle", "Cassandra"],
    ),
    (
        "DevOps & Cloud",
        &["Docker", "Kubernetes", "AWS", "Azure", "GCP", "CI/CD", "Jenkins", "Terraform", "Ansible"],
    ),
    (
        "Other",
        &["Git", "Linux", "REST APIs", "GraphQL", "Testing", "Agile", "UI/UX Design", "Cybersecurity"],
    ),
];

pub fn skill_category(name: &str) -> Option<&'static str> {
    SKILL_CATEGORIES
        .iter()
        .find(|(_, skills)| skills.contains(&name))
        .map(|(category, _)| *category)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillInput {
    pub name: String,
    pub category: Option<String>,
    #[serde(default)]
    pub level: SkillLevel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarksUpdate {
    pub mid1: Option<f64>,
    pub mid2: Option<f64>,
    pub assignment: Option<f64>,
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DashboardError::invalid(format!("{field} must not be empty")));
    }
    Ok(())
}

fn check_component(name: &str, value: f64, cap: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(DashboardError::invalid(format!(
            "{name} must be a non-negative number, got {value}"
        )));
    }
    if value > cap {
        return Err(DashboardError::invalid(format!(
            "{name} of {value} exceeds the cap of {cap}"
        )));
    }
    Ok(())
}

fn check_marks(record: &MarksRecord, caps: &MarksCaps) -> Result<()> {
    check_component("mid1", record.mid1, caps.mid1)?;
    check_component("mid2", record.mid2, caps.mid2)?;
    check_component("assignment", record.assignment, caps.assignment)?;
    if !record.max_marks.is_finite() || record.max_marks <= 0.0 {
        return Err(DashboardError::invalid(format!(
            "max marks for {} must be positive",
            record.code
        )));
    }
    if record.total > record.max_marks {
        return Err(DashboardError::invalid(format!(
            "total of {} for {} exceeds max marks {}",
            record.total, record.code, record.max_marks
        )));
    }
    Ok(())
}

/// Rows for an onboarding import. A `None` part leaves the profile's current
/// data for that part in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkImport {
    pub subjects: Option<Vec<Subject>>,
    pub attendance: Option<Vec<AttendanceRecord>>,
    pub marks: Option<Vec<MarksRecord>>,
    pub timetable: Option<Vec<TimetableEntry>>,
}

/// Rows applied per part of a [`BulkImport`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportCounts {
    pub subjects: usize,
    pub attendance: usize,
    pub marks: usize,
    pub timetable: usize,
}

fn check_subjects(subjects: &[Subject]) -> Result<()> {
    let mut codes = HashSet::new();
    for subject in subjects {
        require("subject name", &subject.name)?;
        require("subject code", &subject.code)?;
        if !codes.insert(subject.code.as_str()) {
            return Err(DashboardError::invalid(format!(
                "subject {} is listed more than once",
                subject.code
            )));
        }
    }
    Ok(())
}

fn check_timetable_entry(entry: &TimetableEntry) -> Result<()> {
    require("day", &entry.day)?;
    require("time", &entry.time)?;
    require("subject", &entry.subject)
}

/// Keys import rows by subject code. Every code must belong to `subjects`
/// and appear at most once.
fn rows_by_code<T, F>(
    kind: &str,
    rows: Vec<T>,
    subjects: &[Subject],
    code_of: F,
) -> Result<HashMap<String, T>>
where
    F: Fn(&T) -> &str,
{
    let mut keyed = HashMap::with_capacity(rows.len());
    for row in rows {
        let code = code_of(&row).to_string();
        require("subject code", &code)?;
        if !subjects.iter().any(|subject| subject.code == code) {
            return Err(DashboardError::invalid(format!(
                "{kind} row for {code} does not match a registered subject"
            )));
        }
        if keyed.contains_key(&code) {
            return Err(DashboardError::invalid(format!("duplicate {kind} rows for {code}")));
        }
        keyed.insert(code, row);
    }
    Ok(keyed)
}

fn check_counts(code: &str, present: u32, total: u32) -> Result<()> {
    if present > total {
        return Err(DashboardError::invalid(format!(
            "{code}: present ({present}) cannot exceed total ({total})"
        )));
    }
    Ok(())
}

impl StudentProfile {
    pub fn new(student_id: StudentId) -> Self {
        StudentProfile {
            student_id,
            subjects: Vec::new(),
            attendance: Vec::new(),
            marks: Vec::new(),
            timetable: Vec::new(),
            skills: Vec::new(),
            roadmaps: Vec::new(),
            cgpa_override: None,
            updated_at: Utc::now(),
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn attendance_mut(&mut self, code: &str) -> Result<&mut AttendanceRecord> {
        self.attendance
            .iter_mut()
            .find(|record| record.code == code)
            .ok_or_else(|| DashboardError::not_found("subject", code))
    }

    /// Registers a subject and provisions its attendance and marks records.
    pub fn add_subject(
        &mut self,
        name: &str,
        code: &str,
        faculty: Option<&str>,
        caps: &MarksCaps,
    ) -> Result<()> {
        require("subject name", name)?;
        require("subject code", code)?;
        let taken = self.subjects.iter().any(|subject| subject.code == code)
            || self.attendance.iter().any(|record| record.code == code)
            || self.marks.iter().any(|record| record.code == code);
        if taken {
            return Err(DashboardError::invalid(format!("subject {code} already exists")));
        }

        self.subjects.push(Subject {
            name: name.to_string(),
            code: code.to_string(),
            faculty: faculty.map(str::to_string),
            credits: None,
        });
        self.attendance.push(AttendanceRecord::new(name, code));
        self.marks.push(MarksRecord::new(code, caps.max_marks));
        self.touch();

        tracing::info!(student = %self.student_id, code, "subject added");
        Ok(())
    }

    /// Sets the credit weight used by the weighted GPA. `None` restores the
    /// default weight.
    pub fn set_subject_credits(&mut self, code: &str, credits: Option<u32>) -> Result<&Subject> {
        let index = self
            .subjects
            .iter()
            .position(|subject| subject.code == code)
            .ok_or_else(|| DashboardError::not_found("subject", code))?;

        self.subjects[index].credits = credits;
        self.touch();
        tracing::info!(code, ?credits, "subject credits updated");
        Ok(&self.subjects[index])
    }

    pub fn update_attendance(
        &mut self,
        code: &str,
        present: Option<u32>,
        total: Option<u32>,
    ) -> Result<&AttendanceRecord> {
        let record = self.attendance_mut(code)?;
        let new_present = present.unwrap_or(record.present);
        let new_total = total.unwrap_or(record.total);
        check_counts(code, new_present, new_total)?;

        record.present = new_present;
        record.total = new_total;
        record.refresh_percentage();
        record.last_class = Some(Utc::now());
        tracing::info!(code, present = new_present, total = new_total, "attendance updated");

        self.touch();
        self.attendance_record(code)
    }

    /// Records one more class, attended or missed.
    pub fn mark_attendance(&mut self, code: &str, attended: bool) -> Result<&AttendanceRecord> {
        let record = self.attendance_mut(code)?;
        let overflow = || DashboardError::invalid(format!("{code}: class count is at its limit"));
        let total = record.total.checked_add(1).ok_or_else(overflow)?;
        let present = if attended {
            record.present.checked_add(1).ok_or_else(overflow)?
        } else {
            record.present
        };

        record.total = total;
        record.present = present;
        record.refresh_percentage();
        record.last_class = Some(Utc::now());
        tracing::info!(code, attended, percentage = record.percentage, "attendance marked");

        self.touch();
        self.attendance_record(code)
    }

    pub fn attendance_record(&self, code: &str) -> Result<&AttendanceRecord> {
        self.attendance
            .iter()
            .find(|record| record.code == code)
            .ok_or_else(|| DashboardError::not_found("subject", code))
    }

    pub fn update_marks(&mut self, code: &str, update: MarksUpdate, caps: &MarksCaps) -> Result<&MarksRecord> {
        let index = self
            .marks
            .iter()
            .position(|record| record.code == code)
            .ok_or_else(|| DashboardError::not_found("subject", code))?;

        let mut candidate = self.marks[index].clone();
        if let Some(value) = update.mid1 {
            candidate.mid1 = value;
        }
        if let Some(value) = update.mid2 {
            candidate.mid2 = value;
        }
        if let Some(value) = update.assignment {
            candidate.assignment = value;
        }
        candidate.refresh_total();
        check_marks(&candidate, caps)?;

        tracing::info!(code, total = candidate.total, "marks updated");
        self.marks[index] = candidate;
        self.touch();
        Ok(&self.marks[index])
    }

    pub fn add_timetable_entry(&mut self, entry: TimetableEntry) -> Result<()> {
        check_timetable_entry(&entry)?;
        self.timetable.push(entry);
        self.touch();
        Ok(())
    }

    /// Appends skills not already present by exact name. Returns how many
    /// were added.
    pub fn add_skills(&mut self, skills: Vec<SkillInput>) -> Result<usize> {
        for skill in &skills {
            require("skill name", &skill.name)?;
        }

        let now = Utc::now();
        let mut added = 0;
        for input in skills {
            if self.skills.iter().any(|skill| skill.name == input.name) {
                continue;
            }
            let category = input
                .category
                .or_else(|| skill_category(&input.name).map(str::to_string));
            self.skills.push(Skill {
                name: input.name,
                category,
                level: input.level,
                added_at: now,
            });
            added += 1;
        }

        if added > 0 {
            self.touch();
        }
        tracing::info!(student = %self.student_id, added, "skills recorded");
        Ok(added)
    }

    /// Generates a roadmap and appends it to the history.
    pub fn generate_roadmap(
        &mut self,
        goal: &str,
        selected_skills: &[String],
        level: SkillLevel,
    ) -> Result<&Roadmap> {
        let roadmap = roadmap::new_roadmap(goal, selected_skills, level, Utc::now())?;
        tracing::info!(
            student = %self.student_id,
            roadmap = %roadmap.id,
            goal = %roadmap.goal,
            steps = roadmap.steps.len(),
            "roadmap generated"
        );

        self.roadmaps.push(roadmap);
        self.touch();
        Ok(&self.roadmaps[self.roadmaps.len() - 1])
    }

    pub fn current_roadmap(&self) -> Option<&Roadmap> {
        roadmap::current(&self.roadmaps)
    }

    pub fn set_step_completion(
        &mut self,
        roadmap_id: Uuid,
        index: usize,
        completed: Option<bool>,
    ) -> Result<&Roadmap> {
        let now = Utc::now();
        let roadmap = roadmap::set_step_completion(&mut self.roadmaps, roadmap_id, index, completed, now)?;
        self.updated_at = now;
        tracing::info!(
            roadmap = %roadmap_id,
            index,
            completed = roadmap.steps[index].completed,
            "roadmap step updated"
        );
        Ok(roadmap)
    }

    pub fn set_cgpa_override(&mut self, value: Option<f64>) -> Result<()> {
        if let Some(cgpa) = value {
            if !cgpa.is_finite() || !(0.0..=10.0).contains(&cgpa) {
                return Err(DashboardError::invalid(format!(
                    "CGPA override must be between 0 and 10, got {cgpa}"
                )));
            }
        }
        self.cgpa_override = value;
        self.touch();
        Ok(())
    }

    /// Onboarding import. Subjects, when given, replace the registered list;
    /// attendance and marks rows then overwrite the record of the subject
    /// with the same code. Every registered subject ends with exactly one
    /// attendance and one marks record: existing ones are kept and missing
    /// ones provisioned empty. A timetable replaces the current one. Nothing
    /// is changed unless the whole batch validates.
    pub fn bulk_import(&mut self, batch: BulkImport, caps: &MarksCaps) -> Result<ImportCounts> {
        let mut counts = ImportCounts::default();

        let subjects = match batch.subjects {
            Some(subjects) => {
                check_subjects(&subjects)?;
                counts.subjects = subjects.len();
                subjects
            }
            None => self.subjects.clone(),
        };

        let mut attendance_rows = match batch.attendance {
            Some(mut rows) => {
                for record in &mut rows {
                    check_counts(&record.code, record.present, record.total)?;
                    record.refresh_percentage();
                }
                counts.attendance = rows.len();
                rows_by_code("attendance", rows, &subjects, |record| record.code.as_str())?
            }
            None => HashMap::new(),
        };

        let mut marks_rows = match batch.marks {
            Some(mut rows) => {
                for record in &mut rows {
                    record.refresh_total();
                    check_marks(record, caps)?;
                }
                counts.marks = rows.len();
                rows_by_code("marks", rows, &subjects, |record| record.code.as_str())?
            }
            None => HashMap::new(),
        };

        if let Some(entries) = &batch.timetable {
            for entry in entries {
                check_timetable_entry(entry)?;
            }
            counts.timetable = entries.len();
        }

        let attendance: Vec<AttendanceRecord> = subjects
            .iter()
            .map(|subject| {
                let mut record = attendance_rows
                    .remove(&subject.code)
                    .or_else(|| self.attendance.iter().find(|r| r.code == subject.code).cloned())
                    .unwrap_or_else(|| AttendanceRecord::new(&subject.name, &subject.code));
                record.subject = subject.name.clone();
                record
            })
            .collect();
        let marks: Vec<MarksRecord> = subjects
            .iter()
            .map(|subject| {
                marks_rows
                    .remove(&subject.code)
                    .or_else(|| self.marks.iter().find(|r| r.code == subject.code).cloned())
                    .unwrap_or_else(|| MarksRecord::new(&subject.code, caps.max_marks))
            })
            .collect();

        self.subjects = subjects;
        self.attendance = attendance;
        self.marks = marks;
        if let Some(entries) = batch.timetable {
            self.timetable = entries;
        }
        self.touch();

        tracing::info!(
            student = %self.student_id,
            subjects = counts.subjects,
            attendance = counts.attendance,
            marks = counts.marks,
            timetable = counts.timetable,
            "bulk import applied"
        );
        Ok(counts)
    }
}
