use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{DashboardError, Result};
use crate::models::{AttendanceRecord, MarksRecord, StudentId, StudentProfile, Subject, TimetableEntry};

/// Persistence boundary for student profiles. Writes replace the whole
/// profile; concurrent writers race and the last one wins.
pub trait StudentStore {
    fn load(&self, id: &StudentId) -> Result<StudentProfile>;
    fn save(&self, profile: &StudentProfile) -> Result<()>;
    fn exists(&self, id: &StudentId) -> bool;
}

/// One pretty-printed JSON document per student under a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        JsonFileStore { root: root.into() }
    }

    fn path_for(&self, id: &StudentId) -> Result<PathBuf> {
        let raw = id.as_str();
        let safe = !raw.is_empty()
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !raw.starts_with('.');
        if !safe {
            return Err(DashboardError::invalid(format!(
                "student id {raw:?} may only contain letters, digits, '-', '_' and '.'"
            )));
        }
        Ok(self.root.join(format!("{raw}.json")))
    }
}

impl StudentStore for JsonFileStore {
    fn load(&self, id: &StudentId) -> Result<StudentProfile> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Err(DashboardError::not_found("student profile", id));
        }

        let raw = fs::read_to_string(&path)?;
        let profile: StudentProfile = serde_json::from_str(&raw)?;
        tracing::debug!(student = %id, path = %path.display(), "profile loaded");
        Ok(profile)
    }

    fn save(&self, profile: &StudentProfile) -> Result<()> {
        let path = self.path_for(&profile.student_id)?;
        fs::create_dir_all(&self.root)?;

        let body = serde_json::to_string_pretty(profile)?;
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, body)?;
        fs::rename(&staging, &path)?;

        tracing::debug!(student = %profile.student_id, path = %path.display(), "profile saved");
        Ok(())
    }

    fn exists(&self, id: &StudentId) -> bool {
        self.path_for(id).map(|path| path.exists()).unwrap_or(false)
    }
}

#[derive(Debug, Deserialize)]
struct SubjectRow {
    name: String,
    code: String,
    faculty: Option<String>,
    credits: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct TimetableRow {
    day: String,
    time: String,
    subject: String,
    room: Option<String>,
    faculty: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AttendanceRow {
    subject: String,
    code: String,
    present: u32,
    total: u32,
    last_class: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct MarksRow {
    code: String,
    mid1: Option<f64>,
    mid2: Option<f64>,
    assignment: Option<f64>,
    max_marks: Option<f64>,
}

/// Reads subject rows with headers `name,code,faculty,credits`.
pub fn read_subjects_csv(path: &Path) -> Result<Vec<Subject>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut subjects = Vec::new();

    for row in reader.deserialize::<SubjectRow>() {
        let row = row?;
        subjects.push(Subject {
            name: row.name,
            code: row.code,
            faculty: row.faculty,
            credits: row.credits,
        });
    }

    tracing::debug!(path = %path.display(), rows = subjects.len(), "subjects csv read");
    Ok(subjects)
}

/// Reads timetable rows with headers `day,time,subject,room,faculty`.
pub fn read_timetable_csv(path: &Path) -> Result<Vec<TimetableEntry>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut entries = Vec::new();

    for row in reader.deserialize::<TimetableRow>() {
        let row = row?;
        entries.push(TimetableEntry {
            day: row.day,
            time: row.time,
            subject: row.subject,
            room: row.room,
            faculty: row.faculty,
        });
    }

    tracing::debug!(path = %path.display(), rows = entries.len(), "timetable csv read");
    Ok(entries)
}

/// Reads attendance rows with headers `subject,code,present,total,last_class`.
pub fn read_attendance_csv(path: &Path) -> Result<Vec<AttendanceRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();

    for row in reader.deserialize::<AttendanceRow>() {
        let row = row?;
        let mut record = AttendanceRecord::new(row.subject, row.code);
        record.present = row.present;
        record.total = row.total;
        record.last_class = row.last_class;
        record.refresh_percentage();
        records.push(record);
    }

    tracing::debug!(path = %path.display(), rows = records.len(), "attendance csv read");
    Ok(records)
}

/// Reads marks rows with headers `code,mid1,mid2,assignment,max_marks`.
/// Blank components count as zero; a blank max defaults to `default_max`.
pub fn read_marks_csv(path: &Path, default_max: f64) -> Result<Vec<MarksRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();

    for row in reader.deserialize::<MarksRow>() {
        let row = row?;
        let mut record = MarksRecord::new(row.code, row.max_marks.unwrap_or(default_max));
        record.mid1 = row.mid1.unwrap_or(0.0);
        record.mid2 = row.mid2.unwrap_or(0.0);
        record.assignment = row.assignment.unwrap_or(0.0);
        record.refresh_total();
        records.push(record);
    }

    tracing::debug!(path = %path.display(), rows = records.len(), "marks csv read");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MarksCaps;

    #[test]
    fn missing_profile_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let err = store.load(&StudentId::new("ghost")).unwrap_err();
        assert!(matches!(err, DashboardError::NotFound { entity: "student profile", .. }));
        assert!(!store.exists(&StudentId::new("ghost")));
    }

    #[test]
    fn saves_and_loads_a_profile() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested"));
        let mut profile = StudentProfile::new(StudentId::new("stu-42"));
        profile
            .add_subject("Software Engineering", "CSE205", Some("Dr. Kumar"), &MarksCaps::default())
            .unwrap();
        profile
            .generate_roadmap("Data Scientist", &["Python".to_string()], Default::default())
            .unwrap();

        store.save(&profile).unwrap();
        assert!(store.exists(&profile.student_id));
        let loaded = store.load(&profile.student_id).unwrap();
        assert_eq!(loaded, profile);
    }

    #[test]
    fn rejects_path_like_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        for bad in ["../etc", "", "a/b", ".hidden"] {
            let err = store.load(&StudentId::new(bad)).unwrap_err();
            assert!(matches!(err, DashboardError::InvalidInput(_)), "{bad} accepted");
        }
    }

    #[test]
    fn reads_attendance_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attendance.csv");
        fs::write(
            &path,
            "subject,code,present,total,last_class\n\
             Data Structures & Algorithms,CSE201,18,20,2025-02-05T09:00:00Z\n\
             Database Management Systems,CSE202,14,20,\n",
        )
        .unwrap();

        let records = read_attendance_csv(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].percentage, 90);
        assert!(records[0].last_class.is_some());
        assert_eq!(records[1].percentage, 70);
        assert!(records[1].last_class.is_none());
    }

    #[test]
    fn reads_marks_rows_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marks.csv");
        fs::write(
            &path,
            "code,mid1,mid2,assignment,max_marks\n\
             DSA,25,28,20,\n\
             LAB,20,,5,50\n",
        )
        .unwrap();

        let records = read_marks_csv(&path, 100.0).unwrap();
        assert_eq!(records[0].total, 73.0);
        assert_eq!(records[0].max_marks, 100.0);
        assert_eq!(records[1].total, 25.0);
        assert_eq!(records[1].max_marks, 50.0);
    }

    #[test]
    fn reads_subject_rows_with_optional_credits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subjects.csv");
        fs::write(
            &path,
            "name,code,faculty,credits\n\
             Compilers,CSE301,Dr. Rao,4\n\
             Seminar,CSE399,,\n",
        )
        .unwrap();

        let subjects = read_subjects_csv(&path).unwrap();
        assert_eq!(subjects.len(), 2);
        assert_eq!(subjects[0].credits, Some(4));
        assert_eq!(subjects[0].faculty.as_deref(), Some("Dr. Rao"));
        assert_eq!(subjects[1].faculty, None);
        assert_eq!(subjects[1].credits, None);
    }

    #[test]
    fn reads_timetable_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timetable.csv");
        fs::write(
            &path,
            "day,time,subject,room,faculty\n\
             Monday,9:00-10:00,Compilers,301,Dr. Rao\n\
             Tuesday,2:00-5:00,Compilers Lab,,\n",
        )
        .unwrap();

        let entries = read_timetable_csv(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].room.as_deref(), Some("301"));
        assert_eq!(entries[1].subject, "Compilers Lab");
        assert_eq!(entries[1].room, None);
    }

    #[test]
    fn imported_files_keep_records_keyed_by_subject() {
        let dir = tempfile::tempdir().unwrap();
        let subjects_path = dir.path().join("subjects.csv");
        let attendance_path = dir.path().join("attendance.csv");
        fs::write(&subjects_path, "name,code,faculty,credits\nCompilers,CSE301,,4\nSeminar,CSE399,,\n").unwrap();
        fs::write(
            &attendance_path,
            "subject,code,present,total,last_class\nCompilers,CSE301,9,12,\nCompilers,CSE301,1,2,\n",
        )
        .unwrap();

        let mut profile = StudentProfile::new(StudentId::new("stu-import"));
        let batch = crate::profile::BulkImport {
            subjects: Some(read_subjects_csv(&subjects_path).unwrap()),
            attendance: Some(read_attendance_csv(&attendance_path).unwrap()),
            ..Default::default()
        };
        assert!(matches!(
            profile.bulk_import(batch, &MarksCaps::default()),
            Err(DashboardError::InvalidInput(_))
        ));
        assert!(profile.subjects.is_empty());

        let batch = crate::profile::BulkImport {
            subjects: Some(read_subjects_csv(&subjects_path).unwrap()),
            ..Default::default()
        };
        profile.bulk_import(batch, &MarksCaps::default()).unwrap();
        let codes: Vec<&str> = profile.attendance.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["CSE301", "CSE399"]);
        assert_eq!(profile.marks.len(), 2);
    }

    #[test]
    fn malformed_csv_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attendance.csv");
        fs::write(&path, "subject,code,present,total,last_class\nOS,CSE203,lots,20,\n").unwrap();
        assert!(matches!(read_attendance_csv(&path), Err(DashboardError::Csv(_))));
    }
}
