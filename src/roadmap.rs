use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{DashboardError, Result};
use crate::models::{Roadmap, RoadmapStep, SkillLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CareerGoal {
    FullStackDeveloper,
    DataScientist,
    MobileAppDeveloper,
    MachineLearningEngineer,
    DevOpsEngineer,
    CybersecuritySpecialist,
    UiUxDesigner,
    GameDeveloper,
}

impl CareerGoal {
    pub const ALL: [CareerGoal; 8] = [
        CareerGoal::FullStackDeveloper,
        CareerGoal::DataScientist,
        CareerGoal::MobileAppDeveloper,
        CareerGoal::MachineLearningEngineer,
        CareerGoal::DevOpsEngineer,
        CareerGoal::CybersecuritySpecialist,
        CareerGoal::UiUxDesigner,
        CareerGoal::GameDeveloper,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CareerGoal::FullStackDeveloper => "Full Stack Developer",
            CareerGoal::DataScientist => "Data Scientist",
            CareerGoal::MobileAppDeveloper => "Mobile App Developer",
            CareerGoal::MachineLearningEngineer => "Machine Learning Engineer",
            CareerGoal::DevOpsEngineer => "DevOps Engineer",
            CareerGoal::CybersecuritySpecialist => "Cybersecurity Specialist",
            CareerGoal::UiUxDesigner => "UI/UX Designer",
            CareerGoal::GameDeveloper => "Game Developer",
        }
    }

    /// Exact, case-sensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<CareerGoal> {
        CareerGoal::ALL.into_iter().find(|goal| goal.name() == name)
    }
}

impl fmt::Display for CareerGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A candidate step. It is skipped when the student already knows any of the
/// skills in `skip_if_known`; an empty gate means the step is always emitted.
struct StepTemplate {
    title: &'static str,
    description: &'static str,
    duration: &'static str,
    resources: &'static [&'static str],
    skip_if_known: &'static [&'static str],
}

impl StepTemplate {
    fn is_needed(&self, known: &HashSet<&str>) -> bool {
        !self.skip_if_known.iter().any(|skill| known.contains(skill))
    }

    fn to_step(&self) -> RoadmapStep {
        RoadmapStep {
            title: self.title.to_string(),
            description: self.description.to_string(),
            duration: self.duration.to_string(),
            resources: self.resources.iter().map(|r| r.to_string()).collect(),
            completed: false,
        }
    }
}

const ALWAYS: &[&str] = &[];

const FULL_STACK: &[StepTemplate] = &[
    StepTemplate {
        title: "HTML & CSS Mastery",
        description: "Learn the building blocks of the web: semantic HTML5 and modern CSS3 including Flexbox and Grid.",
        duration: "3-4 weeks",
        resources: &[
            "freeCodeCamp - Responsive Web Design",
            "MDN Web Docs - HTML/CSS",
            "CSS Tricks - Complete Guide to Flexbox",
            "Practice: Build 5 landing pages",
        ],
        skip_if_known: &["HTML", "HTML/CSS"],
    },
    StepTemplate {
        title: "JavaScript Fundamentals",
        description: "Master vanilla JavaScript: ES6+, DOM manipulation, async programming and modern language features.",
        duration: "4-6 weeks",
        resources: &[
            "JavaScript.info - The Modern JavaScript Tutorial",
            "Eloquent JavaScript (Book)",
            "freeCodeCamp - JavaScript Algorithms",
            "Practice: 50+ coding challenges on LeetCode",
        ],
        skip_if_known: &["JavaScript"],
    },
    StepTemplate {
        title: "React.js Deep Dive",
        description: "Build modern web applications with React: hooks, context, routing and state management.",
        duration: "5-6 weeks",
        resources: &[
            "Official React Documentation",
            "React - The Complete Guide (Udemy)",
            "Practice: Build 3 projects (Todo App, Weather App, E-commerce)",
            "Learn React Router and Redux Toolkit",
        ],
        skip_if_known: &["React"],
    },
    StepTemplate {
        title: "Node.js & Express Backend",
        description: "Create RESTful APIs and server-side applications with Express, middleware and authentication.",
        duration: "4-5 weeks",
        resources: &[
            "Node.js Documentation",
            "The Complete Node.js Developer Course",
            "Build REST APIs with Express",
            "Practice: Create 3 backend projects",
        ],
        skip_if_known: &["Node.js"],
    },
    StepTemplate {
        title: "Database Design & Management",
        description: "Work with SQL and NoSQL databases: MongoDB, PostgreSQL, data modeling and query optimization.",
        duration: "3-4 weeks",
        resources: &[
            "MongoDB University - Free Courses",
            "PostgreSQL Tutorial",
            "Database Design for Beginners",
            "Practice: Design 5 database schemas",
        ],
        skip_if_known: &["MongoDB", "SQL"],
    },
    StepTemplate {
        title: "Full Stack Integration",
        description: "Combine frontend and backend into complete applications with deployment, authentication and real-time features.",
        duration: "4-6 weeks",
        resources: &[
            "Build a MERN stack application",
            "JWT Authentication implementation",
            "Deploy on Vercel + Heroku/Railway",
            "Add real-time chat with Socket.io",
        ],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "Advanced Full Stack Concepts",
        description: "Level up with TypeScript, testing, CI/CD, Docker and cloud services.",
        duration: "6-8 weeks",
        resources: &[
            "Learn TypeScript fundamentals",
            "Jest & React Testing Library",
            "Docker containerization basics",
            "AWS/GCP fundamentals",
            "Build and deploy a production-ready SaaS app",
        ],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "Portfolio & Career Preparation",
        description: "Build a portfolio, prepare for interviews and start applying for jobs.",
        duration: "4-6 weeks",
        resources: &[
            "Build 5 portfolio projects",
            "Create professional GitHub profile",
            "Practice LeetCode/HackerRank (200+ problems)",
            "Mock interviews on Pramp",
            "Apply to 50+ companies",
        ],
        skip_if_known: ALWAYS,
    },
];

const DATA_SCIENTIST: &[StepTemplate] = &[
    StepTemplate {
        title: "Python Programming Mastery",
        description: "Master Python fundamentals, OOP and the libraries data science depends on.",
        duration: "4-5 weeks",
        resources: &[
            "Python.org - Official Tutorial",
            "Automate the Boring Stuff with Python",
            "LeetCode Python Track",
            "Practice: 100+ Python problems",
        ],
        skip_if_known: &["Python"],
    },
    StepTemplate {
        title: "Statistics & Mathematics",
        description: "Build a foundation in statistics, probability and linear algebra.",
        duration: "6-8 weeks",
        resources: &[
            "Khan Academy - Statistics & Probability",
            "StatQuest YouTube Channel",
            "Essence of Linear Algebra (3Blue1Brown)",
            "Practice statistical analysis on real datasets",
        ],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "Data Analysis with Pandas & NumPy",
        description: "Manipulate, clean and analyze data with the Python data stack.",
        duration: "4-5 weeks",
        resources: &[
            "Pandas Documentation",
            "Data Analysis with Python (freeCodeCamp)",
            "Kaggle Learn - Pandas",
            "Complete 5 Kaggle datasets analysis",
        ],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "Data Visualization",
        description: "Create compelling visualizations with Matplotlib, Seaborn and Plotly.",
        duration: "3-4 weeks",
        resources: &[
            "Matplotlib & Seaborn tutorials",
            "Plotly Dashboard creation",
            "Storytelling with Data (Book)",
            "Build 10 different chart types",
        ],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "Machine Learning Fundamentals",
        description: "Learn supervised and unsupervised learning, model evaluation and scikit-learn.",
        duration: "8-10 weeks",
        resources: &[
            "Andrew Ng - Machine Learning (Coursera)",
            "Hands-On Machine Learning (Book)",
            "scikit-learn Documentation",
            "Complete 10 ML projects on Kaggle",
        ],
        skip_if_known: &["Machine Learning"],
    },
    StepTemplate {
        title: "Deep Learning & Neural Networks",
        description: "Deep learning with TensorFlow/PyTorch: CNNs, RNNs and transformers.",
        duration: "10-12 weeks",
        resources: &[
            "Deep Learning Specialization (Coursera)",
            "Fast.ai - Practical Deep Learning",
            "TensorFlow/PyTorch tutorials",
            "Implement 5 neural network architectures",
        ],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "Real-World Projects & Portfolio",
        description: "Build end-to-end data science projects and a portfolio to show them.",
        duration: "6-8 weeks",
        resources: &[
            "Complete 5 Kaggle competitions",
            "Build predictive model for real business problem",
            "Create data science blog",
            "Deploy ML models with Flask/FastAPI",
        ],
        skip_if_known: ALWAYS,
    },
];

const MOBILE_APP: &[StepTemplate] = &[
    StepTemplate {
        title: "Choose Your Framework: React Native",
        description: "Cross-platform mobile development with React Native and JavaScript.",
        duration: "6-8 weeks",
        resources: &[
            "React Native Documentation",
            "The Complete React Native Course",
            "Build 3 mobile apps (Calculator, Todo, Weather)",
            "Learn Expo and React Navigation",
        ],
        skip_if_known: &["React Native", "Flutter"],
    },
    StepTemplate {
        title: "Mobile UI/UX Design",
        description: "Mobile design patterns, responsive layouts and platform guidelines.",
        duration: "3-4 weeks",
        resources: &[
            "Material Design Guidelines",
            "iOS Human Interface Guidelines",
            "Figma for mobile design",
            "Practice: Design 5 mobile app screens",
        ],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "Authentication & State Management",
        description: "Secure authentication and efficient state management in mobile apps.",
        duration: "4-5 weeks",
        resources: &[
            "Firebase Authentication",
            "Redux Toolkit for React Native",
            "AsyncStorage & SecureStore",
            "Build login/signup flows",
        ],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "API Integration & Networking",
        description: "Connect mobile apps to backend services and handle data efficiently.",
        duration: "3-4 weeks",
        resources: &[
            "REST API integration",
            "Axios & Fetch API",
            "GraphQL with Apollo Client",
            "Build 3 API-driven apps",
        ],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "Publishing & Deployment",
        description: "App store submission, signing and release management.",
        duration: "2-3 weeks",
        resources: &[
            "Google Play Console setup",
            "Apple App Store Connect",
            "App signing and versioning",
            "Publish your first app",
        ],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "Portfolio & Advanced Features",
        description: "Production-ready apps with push notifications, payments and analytics.",
        duration: "6-8 weeks",
        resources: &[
            "Firebase Cloud Messaging",
            "Stripe payment integration",
            "Google Analytics for mobile",
            "Build 2 complex portfolio apps",
        ],
        skip_if_known: ALWAYS,
    },
];

const ML_ENGINEER: &[StepTemplate] = &[
    StepTemplate {
        title: "Advanced Python & Math",
        description: "Python, linear algebra, calculus and probability theory.",
        duration: "6-8 weeks",
        resources: &[
            "Mathematics for Machine Learning (Book)",
            "NumPy & SciPy mastery",
            "3Blue1Brown - Linear Algebra",
            "Practice 150+ math problems",
        ],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "Machine Learning Algorithms",
        description: "ML algorithms in depth, implemented from scratch and optimized.",
        duration: "10-12 weeks",
        resources: &[
            "Implement 15 algorithms from scratch",
            "Pattern Recognition & ML (Bishop)",
            "Stanford CS229 lectures",
            "Kaggle competitions",
        ],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "Deep Learning Mastery",
        description: "CNNs, RNNs, GANs, transformers and attention mechanisms.",
        duration: "12-14 weeks",
        resources: &[
            "Deep Learning Specialization",
            "Implement papers with code",
            "PyTorch/TensorFlow advanced",
            "Build 10 DL projects",
        ],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "MLOps & Production",
        description: "Deploy models at scale with Docker, Kubernetes and cloud platforms.",
        duration: "6-8 weeks",
        resources: &[
            "MLflow & Kubeflow",
            "Docker containerization",
            "AWS SageMaker / GCP AI Platform",
            "Build end-to-end ML pipeline",
        ],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "Research & Publications",
        description: "Read papers, contribute to open source and build a research portfolio.",
        duration: "Ongoing",
        resources: &[
            "Read 50+ ML papers",
            "Contribute to TensorFlow/PyTorch",
            "Publish on arXiv",
            "Build 5 innovative projects",
        ],
        skip_if_known: ALWAYS,
    },
];

const DEVOPS: &[StepTemplate] = &[
    StepTemplate {
        title: "Linux & Shell Scripting",
        description: "Linux, the command line and Bash scripting for automation.",
        duration: "4-5 weeks",
        resources: &["Linux Command Line Basics", "Bash Scripting Tutorial", "Set up Ubuntu VM"],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "Version Control & Git",
        description: "Advanced Git, branching strategies and collaborative workflows.",
        duration: "2-3 weeks",
        resources: &["Git branching models", "GitLab CI/CD", "GitHub Actions"],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "Docker & Containers",
        description: "Containerize applications with Docker and Docker Compose.",
        duration: "4-5 weeks",
        resources: &["Docker Deep Dive", "Multi-stage builds", "Container orchestration basics"],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "Kubernetes",
        description: "Deploy and manage containerized applications at scale.",
        duration: "6-8 weeks",
        resources: &["CKA Certification prep", "Helm charts", "Deploy microservices"],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "CI/CD Pipelines",
        description: "Automate testing, building and deployment.",
        duration: "4-5 weeks",
        resources: &["Jenkins", "GitHub Actions", "GitLab CI", "Build production pipelines"],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "Monitoring & Logging",
        description: "Observability with Prometheus, Grafana and the ELK stack.",
        duration: "4-5 weeks",
        resources: &["Prometheus & Grafana", "ELK Stack", "Application monitoring"],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "Cloud Platforms",
        description: "AWS/Azure/GCP services and infrastructure as code.",
        duration: "8-10 weeks",
        resources: &["AWS Solutions Architect", "Terraform", "CloudFormation", "Multi-cloud deployment"],
        skip_if_known: ALWAYS,
    },
];

const CYBERSECURITY: &[StepTemplate] = &[
    StepTemplate {
        title: "Networking Fundamentals",
        description: "TCP/IP, DNS, HTTP/HTTPS, firewalls and network protocols.",
        duration: "4-6 weeks",
        resources: &["CompTIA Network+", "Wireshark packet analysis", "Build home lab"],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "Operating Systems Security",
        description: "Windows and Linux security, hardening and vulnerability assessment.",
        duration: "5-6 weeks",
        resources: &["Linux security", "Windows Active Directory", "Security configuration"],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "Ethical Hacking & Penetration Testing",
        description: "Offensive security, web application testing and exploit development.",
        duration: "10-12 weeks",
        resources: &["CEH certification", "TryHackMe", "HackTheBox", "OWASP Top 10"],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "Incident Response & Forensics",
        description: "Investigate security incidents and perform digital forensics.",
        duration: "6-8 weeks",
        resources: &["SANS courses", "Autopsy tool", "Malware analysis", "Incident handling"],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "Certifications & Career",
        description: "Earn industry certifications and build a security portfolio.",
        duration: "12-16 weeks",
        resources: &["OSCP", "Security+", "Bug bounty programs", "Build security projects"],
        skip_if_known: ALWAYS,
    },
];

const UI_UX: &[StepTemplate] = &[
    StepTemplate {
        title: "Design Fundamentals",
        description: "Color theory, typography, layout and visual hierarchy.",
        duration: "4-5 weeks",
        resources: &["Design principles", "Typography basics", "Color psychology", "Practice daily"],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "Design Tools Mastery",
        description: "Figma, Adobe XD and prototyping tools.",
        duration: "5-6 weeks",
        resources: &["Figma masterclass", "Adobe XD tutorials", "Build 10 designs"],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "User Research & Testing",
        description: "User interviews, surveys and usability testing.",
        duration: "4-5 weeks",
        resources: &["UX research methods", "Usability testing", "Create personas"],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "UI Design & Prototyping",
        description: "Interfaces and interactive prototypes.",
        duration: "6-8 weeks",
        resources: &["Mobile & web UI patterns", "Micro-interactions", "Build 5 prototypes"],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "Portfolio & Client Work",
        description: "A professional portfolio and real client projects.",
        duration: "8-10 weeks",
        resources: &["Dribbble portfolio", "Freelance projects", "Case studies", "Network"],
        skip_if_known: ALWAYS,
    },
];

const GAME_DEV: &[StepTemplate] = &[
    StepTemplate {
        title: "Game Development Basics",
        description: "Game design principles, mechanics and Unity/Unreal basics.",
        duration: "6-8 weeks",
        resources: &["Unity Learn", "Game design theory", "Build 3 simple games"],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "Programming for Games",
        description: "C# for Unity or C++ for Unreal Engine.",
        duration: "8-10 weeks",
        resources: &["C# fundamentals", "Unity scripting", "Game patterns", "100+ coding challenges"],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "3D Modeling & Animation",
        description: "Game assets with Blender, texturing and rigging.",
        duration: "10-12 weeks",
        resources: &["Blender tutorials", "3D modeling", "Character rigging", "Create asset library"],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "Audio & VFX",
        description: "Sound effects, music and visual effects.",
        duration: "4-5 weeks",
        resources: &["Audio design", "Particle systems", "Shader programming", "Polish 3 games"],
        skip_if_known: ALWAYS,
    },
    StepTemplate {
        title: "Publishing & Monetization",
        description: "Publish on Steam and mobile stores and add monetization.",
        duration: "6-8 weeks",
        resources: &["Steam publishing", "Mobile optimization", "Ads & IAP", "Release 2 games"],
        skip_if_known: ALWAYS,
    },
];

fn catalog(goal: CareerGoal) -> &'static [StepTemplate] {
    match goal {
        CareerGoal::FullStackDeveloper => FULL_STACK,
        CareerGoal::DataScientist => DATA_SCIENTIST,
        CareerGoal::MobileAppDeveloper => MOBILE_APP,
        CareerGoal::MachineLearningEngineer => ML_ENGINEER,
        CareerGoal::DevOpsEngineer => DEVOPS,
        CareerGoal::CybersecuritySpecialist => CYBERSECURITY,
        CareerGoal::UiUxDesigner => UI_UX,
        CareerGoal::GameDeveloper => GAME_DEV,
    }
}

fn fallback_steps(goal: &str) -> Vec<RoadmapStep> {
    let step = |title: &str, description: String, duration: &str, resources: &[&str]| RoadmapStep {
        title: title.to_string(),
        description,
        duration: duration.to_string(),
        resources: resources.iter().map(|r| r.to_string()).collect(),
        completed: false,
    };

    vec![
        step(
            "Foundation Building",
            format!("Build strong fundamentals for {goal}"),
            "4-6 weeks",
            &["Online courses", "Documentation", "Practice projects"],
        ),
        step(
            "Skill Development",
            "Develop core skills and competencies".to_string(),
            "8-12 weeks",
            &["Advanced tutorials", "Real projects", "Open source contributions"],
        ),
        step(
            "Advanced & Specialization",
            "Master advanced topics and specialize".to_string(),
            "12-16 weeks",
            &["Expert-level content", "Complex projects", "Certifications"],
        ),
        step(
            "Career Preparation",
            "Build portfolio and prepare for opportunities".to_string(),
            "6-8 weeks",
            &["Portfolio projects", "Interview prep", "Networking", "Job applications"],
        ),
    ]
}

/// Ordered learning steps for `goal`, skipping skill-gated steps the student
/// already covers. Unknown goals get the generic four-phase roadmap.
///
/// `level` is accepted for the record but does not change step selection.
pub fn generate_steps(goal: &str, known_skills: &[String], level: SkillLevel) -> Result<Vec<RoadmapStep>> {
    let goal = goal.trim();
    if goal.is_empty() {
        return Err(DashboardError::invalid("roadmap goal must not be empty"));
    }
    if let Some(position) = known_skills.iter().position(|skill| skill.trim().is_empty()) {
        return Err(DashboardError::invalid(format!(
            "known skill at position {position} is blank"
        )));
    }

    let known: HashSet<&str> = known_skills.iter().map(String::as_str).collect();

    let steps = match CareerGoal::from_name(goal) {
        Some(career) => catalog(career)
            .iter()
            .filter(|template| template.is_needed(&known))
            .map(StepTemplate::to_step)
            .collect(),
        None => {
            tracing::debug!(goal, "no catalog entry for goal, using generic roadmap");
            fallback_steps(goal)
        }
    };

    tracing::debug!(goal, %level, steps = steps.len(), "roadmap steps selected");
    Ok(steps)
}

pub fn new_roadmap(
    goal: &str,
    known_skills: &[String],
    level: SkillLevel,
    now: DateTime<Utc>,
) -> Result<Roadmap> {
    let steps = generate_steps(goal, known_skills, level)?;

    Ok(Roadmap {
        id: Uuid::new_v4(),
        goal: goal.trim().to_string(),
        skills: known_skills.to_vec(),
        level,
        steps,
        created_at: now,
        updated_at: now,
    })
}

/// The most recently created roadmap. Later entries win ties.
pub fn current(roadmaps: &[Roadmap]) -> Option<&Roadmap> {
    roadmaps
        .iter()
        .enumerate()
        .max_by_key(|(index, roadmap)| (roadmap.created_at, *index))
        .map(|(_, roadmap)| roadmap)
}

/// Flips the step when `completed` is `None`, otherwise sets it.
pub fn set_step_completion(
    roadmaps: &mut [Roadmap],
    roadmap_id: Uuid,
    index: usize,
    completed: Option<bool>,
    now: DateTime<Utc>,
) -> Result<&Roadmap> {
    let roadmap = roadmaps
        .iter_mut()
        .find(|roadmap| roadmap.id == roadmap_id)
        .ok_or_else(|| DashboardError::not_found("roadmap", roadmap_id))?;

    let step = roadmap
        .steps
        .get_mut(index)
        .ok_or_else(|| DashboardError::not_found("roadmap step", format!("{roadmap_id}[{index}]")))?;

    step.completed = completed.unwrap_or(!step.completed);
    roadmap.updated_at = now;

    Ok(roadmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn titles(steps: &[RoadmapStep]) -> Vec<&str> {
        steps.iter().map(|s| s.title.as_str()).collect()
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn full_stack_without_skills_has_every_phase() {
        let steps = generate_steps("Full Stack Developer", &[], SkillLevel::Beginner).unwrap();
        assert_eq!(steps.len(), 8);
        assert_eq!(steps[0].title, "HTML & CSS Mastery");
        assert!(steps.iter().all(|s| !s.completed));
    }

    #[test]
    fn full_stack_skips_known_skills() {
        let known = skills(&["HTML", "JavaScript", "React", "Node.js", "MongoDB"]);
        let steps = generate_steps("Full Stack Developer", &known, SkillLevel::Intermediate).unwrap();
        assert_eq!(
            titles(&steps),
            vec![
                "Full Stack Integration",
                "Advanced Full Stack Concepts",
                "Portfolio & Career Preparation",
            ]
        );
    }

    #[test]
    fn any_alias_in_a_gate_suppresses_the_step() {
        let steps = generate_steps("Full Stack Developer", &skills(&["HTML/CSS", "SQL"]), SkillLevel::Beginner).unwrap();
        let t = titles(&steps);
        assert!(!t.contains(&"HTML & CSS Mastery"));
        assert!(!t.contains(&"Database Design & Management"));
        assert!(t.contains(&"JavaScript Fundamentals"));

        let mobile = generate_steps("Mobile App Developer", &skills(&["Flutter"]), SkillLevel::Beginner).unwrap();
        assert_eq!(mobile.len(), 5);
    }

    #[test]
    fn gating_is_case_sensitive() {
        let steps = generate_steps("Data Scientist", &skills(&["python"]), SkillLevel::Beginner).unwrap();
        assert_eq!(steps[0].title, "Python Programming Mastery");

        let steps = generate_steps("Data Scientist", &skills(&["Python", "Machine Learning"]), SkillLevel::Beginner).unwrap();
        assert_eq!(steps.len(), 5);
    }

    #[test]
    fn level_does_not_change_selection() {
        let known = skills(&["React"]);
        let beginner = generate_steps("Full Stack Developer", &known, SkillLevel::Beginner).unwrap();
        let advanced = generate_steps("Full Stack Developer", &known, SkillLevel::Advanced).unwrap();
        assert_eq!(beginner, advanced);
    }

    #[test]
    fn every_catalog_goal_produces_steps() {
        for goal in CareerGoal::ALL {
            let steps = generate_steps(goal.name(), &[], SkillLevel::Beginner).unwrap();
            assert!(!steps.is_empty(), "{goal} produced no steps");
        }
    }

    #[test]
    fn unknown_goal_uses_generic_template() {
        let steps = generate_steps("Blockchain Architect", &skills(&["Rust"]), SkillLevel::Advanced).unwrap();
        assert_eq!(
            titles(&steps),
            vec![
                "Foundation Building",
                "Skill Development",
                "Advanced & Specialization",
                "Career Preparation",
            ]
        );
        assert_eq!(steps[0].description, "Build strong fundamentals for Blockchain Architect");
    }

    #[test]
    fn goal_lookup_is_exact() {
        assert_eq!(CareerGoal::from_name("Data Scientist"), Some(CareerGoal::DataScientist));
        assert_eq!(CareerGoal::from_name("data scientist"), None);
    }

    #[test]
    fn rejects_blank_goal_and_skills() {
        assert!(matches!(
            generate_steps("  ", &[], SkillLevel::Beginner),
            Err(DashboardError::InvalidInput(_))
        ));
        assert!(matches!(
            generate_steps("Data Scientist", &skills(&["Python", ""]), SkillLevel::Beginner),
            Err(DashboardError::InvalidInput(_))
        ));
    }

    #[test]
    fn new_roadmap_records_inputs() {
        let known = skills(&["Docker"]);
        let roadmap = new_roadmap("DevOps Engineer", &known, SkillLevel::Intermediate, fixed_time()).unwrap();
        assert_eq!(roadmap.goal, "DevOps Engineer");
        assert_eq!(roadmap.skills, known);
        assert_eq!(roadmap.level, SkillLevel::Intermediate);
        assert_eq!(roadmap.steps.len(), 7);
        assert_eq!(roadmap.created_at, roadmap.updated_at);
    }

    #[test]
    fn current_is_latest_created() {
        let older = new_roadmap("Game Developer", &[], SkillLevel::Beginner, fixed_time()).unwrap();
        let newer = new_roadmap("UI/UX Designer", &[], SkillLevel::Beginner, fixed_time() + Duration::days(3)).unwrap();
        let roadmaps = vec![newer.clone(), older];
        assert_eq!(current(&roadmaps).map(|r| r.id), Some(newer.id));
        assert!(current(&[]).is_none());
    }

    #[test]
    fn toggling_twice_restores_the_step() {
        let roadmap = new_roadmap("Data Scientist", &[], SkillLevel::Beginner, fixed_time()).unwrap();
        let id = roadmap.id;
        let mut roadmaps = vec![roadmap];
        let later = fixed_time() + Duration::hours(1);

        let toggled = set_step_completion(&mut roadmaps, id, 2, None, later).unwrap();
        assert!(toggled.steps[2].completed);
        assert_eq!(toggled.updated_at, later);

        let even_later = later + Duration::hours(1);
        let restored = set_step_completion(&mut roadmaps, id, 2, None, even_later).unwrap();
        assert!(!restored.steps[2].completed);
        assert_eq!(restored.updated_at, even_later);
        assert_eq!(restored.created_at, fixed_time());
    }

    #[test]
    fn explicit_completion_is_set_not_flipped() {
        let roadmap = new_roadmap("Game Developer", &[], SkillLevel::Beginner, fixed_time()).unwrap();
        let id = roadmap.id;
        let mut roadmaps = vec![roadmap];

        set_step_completion(&mut roadmaps, id, 0, Some(true), fixed_time()).unwrap();
        let again = set_step_completion(&mut roadmaps, id, 0, Some(true), fixed_time()).unwrap();
        assert!(again.steps[0].completed);
        assert_eq!(again.completed_steps(), 1);
    }

    #[test]
    fn bad_id_or_index_is_not_found() {
        let roadmap = new_roadmap("Game Developer", &[], SkillLevel::Beginner, fixed_time()).unwrap();
        let id = roadmap.id;
        let mut roadmaps = vec![roadmap];

        let err = set_step_completion(&mut roadmaps, Uuid::new_v4(), 0, None, fixed_time()).unwrap_err();
        assert!(matches!(err, DashboardError::NotFound { entity: "roadmap", .. }));

        let err = set_step_completion(&mut roadmaps, id, 5, None, fixed_time()).unwrap_err();
        assert!(matches!(err, DashboardError::NotFound { entity: "roadmap step", .. }));
    }
}
