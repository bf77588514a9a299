use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use student_dashboard::config::Config;
use student_dashboard::intent::ViewId;
use student_dashboard::models::{SkillLevel, StudentId, StudentProfile, TimetableEntry};
use student_dashboard::profile::{BulkImport, MarksUpdate, SkillInput};
use student_dashboard::store::{self, JsonFileStore, StudentStore};
use student_dashboard::{report, seed, views};

#[derive(Parser)]
#[command(name = "student-dashboard")]
#[command(about = "Per-student academic dashboard: metrics, risk flags, study plans and roadmaps", long_about = None)]
struct Cli {
    /// Directory holding one JSON profile per student
    #[arg(long, env = "DASHBOARD_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Student profile identifier
    #[arg(long, short, global = true, default_value = "me")]
    student: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty profile
    Init,
    /// Load a realistic sample semester into the profile
    Seed,
    /// Register a subject with its attendance and marks records
    AddSubject {
        #[arg(long)]
        name: String,
        #[arg(long)]
        code: String,
        #[arg(long)]
        faculty: Option<String>,
        /// Credit weight for the weighted GPA
        #[arg(long)]
        credits: Option<u32>,
    },
    /// Update attendance counts
    #[command(subcommand)]
    Attendance(AttendanceCommand),
    /// Update marks components for a subject
    Marks {
        code: String,
        #[arg(long)]
        mid1: Option<f64>,
        #[arg(long)]
        mid2: Option<f64>,
        #[arg(long)]
        assignment: Option<f64>,
    },
    /// Add a timetable slot
    Timetable {
        #[arg(long)]
        day: String,
        #[arg(long)]
        time: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        room: Option<String>,
        #[arg(long)]
        faculty: Option<String>,
    },
    /// Manage self-reported skills
    #[command(subcommand)]
    Skills(SkillsCommand),
    /// Bulk onboarding from CSV files; subjects and timetable replace the
    /// current lists, attendance and marks rows update records by code
    #[command(group(
        ArgGroup::new("source")
            .args(["subjects", "attendance", "marks", "timetable"])
            .required(true)
            .multiple(true)
    ))]
    Import {
        #[arg(long)]
        subjects: Option<PathBuf>,
        #[arg(long)]
        attendance: Option<PathBuf>,
        #[arg(long)]
        marks: Option<PathBuf>,
        #[arg(long)]
        timetable: Option<PathBuf>,
    },
    /// Render one dashboard view as JSON
    View { view: ViewId },
    /// Ask a free-text question and render the matching view
    Ask { query: Vec<String> },
    /// Generate and track career roadmaps
    #[command(subcommand)]
    Roadmap(RoadmapCommand),
    /// Set or clear a manual CGPA override
    CgpaOverride {
        #[arg(long, conflicts_with = "clear")]
        value: Option<f64>,
        #[arg(long)]
        clear: bool,
    },
    /// Write a markdown dashboard report
    Report {
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

#[derive(Subcommand)]
enum AttendanceCommand {
    /// Overwrite present and/or total counts
    Set {
        code: String,
        #[arg(long)]
        present: Option<u32>,
        #[arg(long)]
        total: Option<u32>,
    },
    /// Record one class as attended or missed
    Mark {
        code: String,
        #[arg(long)]
        absent: bool,
    },
}

#[derive(Subcommand)]
enum SkillsCommand {
    /// Add skills by name, skipping ones already recorded
    Add {
        names: Vec<String>,
        #[arg(long, default_value = "beginner")]
        level: SkillLevel,
        #[arg(long)]
        category: Option<String>,
    },
    /// List recorded skills
    List,
}

#[derive(Subcommand)]
enum RoadmapCommand {
    /// Generate a roadmap for a career goal and store it
    Generate {
        #[arg(long)]
        goal: String,
        /// Skills already known; defaults to the profile's recorded skills
        #[arg(long = "skill")]
        skills: Vec<String>,
        #[arg(long, default_value = "beginner")]
        level: SkillLevel,
    },
    /// List every stored roadmap
    List,
    /// Show the most recently created roadmap
    Current,
    /// Toggle or set completion of a step (zero-based index)
    Step {
        roadmap_id: Uuid,
        index: usize,
        #[arg(long)]
        completed: Option<bool>,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "student_dashboard=info".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env().context("invalid DASHBOARD_* configuration")?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    let store = JsonFileStore::new(&config.data_dir);
    let student = StudentId::new(cli.student);
    let caps = config.caps;

    let load = |store: &JsonFileStore| -> anyhow::Result<StudentProfile> {
        store
            .load(&student)
            .with_context(|| format!("run `init` first to create profile {student}"))
    };

    match cli.command {
        Commands::Init => {
            if store.exists(&student) {
                println!("Profile {student} already exists.");
            } else {
                store.save(&StudentProfile::new(student.clone()))?;
                println!("Profile {student} created in {}.", config.data_dir.display());
            }
        }
        Commands::Seed => {
            let profile = seed::sample_profile(student.clone(), &caps)?;
            store.save(&profile)?;
            println!("Sample data written for {student}.");
        }
        Commands::AddSubject {
            name,
            code,
            faculty,
            credits,
        } => {
            let mut profile = load(&store)?;
            profile.add_subject(&name, &code, faculty.as_deref(), &caps)?;
            if credits.is_some() {
                profile.set_subject_credits(&code, credits)?;
            }
            store.save(&profile)?;
            println!("Added {name} ({code}).");
        }
        Commands::Attendance(command) => {
            let mut profile = load(&store)?;
            let record = match command {
                AttendanceCommand::Set { code, present, total } => {
                    profile.update_attendance(&code, present, total)?.clone()
                }
                AttendanceCommand::Mark { code, absent } => profile.mark_attendance(&code, !absent)?.clone(),
            };
            store.save(&profile)?;
            print_json(&record)?;
        }
        Commands::Marks {
            code,
            mid1,
            mid2,
            assignment,
        } => {
            let mut profile = load(&store)?;
            let update = MarksUpdate { mid1, mid2, assignment };
            let record = profile.update_marks(&code, update, &caps)?.clone();
            store.save(&profile)?;
            print_json(&record)?;
        }
        Commands::Timetable {
            day,
            time,
            subject,
            room,
            faculty,
        } => {
            let mut profile = load(&store)?;
            profile.add_timetable_entry(TimetableEntry {
                day,
                time,
                subject,
                room,
                faculty,
            })?;
            store.save(&profile)?;
            println!("Timetable now has {} entries.", profile.timetable.len());
        }
        Commands::Skills(SkillsCommand::Add { names, level, category }) => {
            let mut profile = load(&store)?;
            let inputs = names
                .into_iter()
                .map(|name| SkillInput {
                    name,
                    category: category.clone(),
                    level,
                })
                .collect();
            let added = profile.add_skills(inputs)?;
            store.save(&profile)?;
            println!("Added {added} new skill(s); {} recorded.", profile.skills.len());
        }
        Commands::Skills(SkillsCommand::List) => {
            let profile = load(&store)?;
            print_json(&profile.skills)?;
        }
        Commands::Import {
            subjects,
            attendance,
            marks,
            timetable,
        } => {
            let mut profile = load(&store)?;
            let read_failed = |path: &PathBuf| format!("failed to read {}", path.display());
            let batch = BulkImport {
                subjects: subjects
                    .as_ref()
                    .map(|path| store::read_subjects_csv(path).with_context(|| read_failed(path)))
                    .transpose()?,
                attendance: attendance
                    .as_ref()
                    .map(|path| store::read_attendance_csv(path).with_context(|| read_failed(path)))
                    .transpose()?,
                marks: marks
                    .as_ref()
                    .map(|path| store::read_marks_csv(path, caps.max_marks).with_context(|| read_failed(path)))
                    .transpose()?,
                timetable: timetable
                    .as_ref()
                    .map(|path| store::read_timetable_csv(path).with_context(|| read_failed(path)))
                    .transpose()?,
            };

            let counts = profile.bulk_import(batch, &caps).context("import rejected; profile left unchanged")?;
            store.save(&profile)?;
            println!(
                "Imported {} subject, {} attendance, {} marks and {} timetable row(s).",
                counts.subjects, counts.attendance, counts.marks, counts.timetable
            );
        }
        Commands::View { view } => {
            let profile = load(&store)?;
            print_json(&views::render_view(view, &profile))?;
        }
        Commands::Ask { query } => {
            let profile = load(&store)?;
            let answer = views::ask(&query.join(" "), &profile);
            print_json(&answer)?;
        }
        Commands::Roadmap(RoadmapCommand::Generate { goal, skills, level }) => {
            let mut profile = load(&store)?;
            let known = if skills.is_empty() {
                profile.skills.iter().map(|skill| skill.name.clone()).collect()
            } else {
                skills
            };
            let roadmap = profile.generate_roadmap(&goal, &known, level)?.clone();
            store.save(&profile)?;
            print_json(&roadmap)?;
        }
        Commands::Roadmap(RoadmapCommand::List) => {
            let profile = load(&store)?;
            print_json(&profile.roadmaps)?;
        }
        Commands::Roadmap(RoadmapCommand::Current) => {
            let profile = load(&store)?;
            match profile.current_roadmap() {
                Some(roadmap) => print_json(roadmap)?,
                None => println!("No roadmap generated yet."),
            }
        }
        Commands::Roadmap(RoadmapCommand::Step {
            roadmap_id,
            index,
            completed,
        }) => {
            let mut profile = load(&store)?;
            let roadmap = profile.set_step_completion(roadmap_id, index, completed)?.clone();
            store.save(&profile)?;
            print_json(&roadmap)?;
        }
        Commands::CgpaOverride { value, clear } => {
            if value.is_none() && !clear {
                anyhow::bail!("pass --value <cgpa> or --clear");
            }
            let mut profile = load(&store)?;
            profile.set_cgpa_override(value)?;
            store.save(&profile)?;
            match value {
                Some(cgpa) => println!("CGPA override set to {cgpa:.2}."),
                None => println!("CGPA override cleared."),
            }
        }
        Commands::Report { out } => {
            let profile = load(&store)?;
            std::fs::write(&out, report::build_report(&profile))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
