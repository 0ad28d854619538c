//! Test data helpers for creating fixture rows through the service layer

use uuid::Uuid;

use campus_yuva::database::DatabaseService;
use campus_yuva::models::*;

pub async fn create_test_college(db: &DatabaseService, domain: &str, name: &str) -> College {
    db.colleges
        .create(CreateCollegeRequest {
            domain: domain.to_string(),
            name: name.to_string(),
            theme_primary: None,
            theme_secondary: None,
        })
        .await
        .expect("Failed to create test college")
}

pub async fn create_test_user(
    db: &DatabaseService,
    college_id: Uuid,
    username: &str,
    email: &str,
    role: UserRole,
) -> User {
    db.register_user(CreateUserRequest {
        college_id,
        username: username.to_string(),
        email: email.to_string(),
        first_name: None,
        last_name: None,
        role: Some(role),
        proficiency_level: None,
        gender: None,
        course: None,
        graduation_year: None,
    })
    .await
    .expect("Failed to create test user")
}

pub async fn create_test_group(
    db: &DatabaseService,
    college_id: Uuid,
    created_by: Uuid,
    name: &str,
    max_members: i32,
) -> StudyGroup {
    db.groups
        .create(CreateStudyGroupRequest {
            college_id,
            name: name.to_string(),
            description: None,
            focus: Some("speaking".to_string()),
            max_members,
            created_by,
            next_session_at: None,
        })
        .await
        .expect("Failed to create test group")
}

pub async fn create_test_module(
    db: &DatabaseService,
    college_id: Uuid,
    title: &str,
    module_type: ModuleType,
) -> PracticeModule {
    db.practice
        .create_module(CreatePracticeModuleRequest {
            college_id,
            title: title.to_string(),
            module_type,
            difficulty: DifficultyLevel::Beginner,
            duration_minutes: 20,
            exercises: Some(serde_json::json!([
                { "prompt": "Introduce yourself", "seconds": 60 }
            ])),
            created_by: None,
        })
        .await
        .expect("Failed to create test module")
}

pub async fn create_test_posting(
    db: &DatabaseService,
    college_id: Uuid,
    recruiter_id: Uuid,
    title: &str,
) -> JobPosting {
    db.jobs
        .create_posting(CreateJobPostingRequest {
            college_id,
            recruiter_id,
            title: title.to_string(),
            description: "Entry-level role for recent graduates".to_string(),
            location: Some("Remote".to_string()),
            job_type: Some("full_time".to_string()),
            skills: Some(vec!["communication".to_string()]),
        })
        .await
        .expect("Failed to create test posting")
}

pub async fn create_test_resume(
    db: &DatabaseService,
    user_id: Uuid,
    title: &str,
    career_paths: &[&str],
) -> VideoResume {
    db.resumes
        .create(CreateVideoResumeRequest {
            user_id,
            title: title.to_string(),
            video_url: format!("https://storage.example.com/{}.mp4", Uuid::new_v4()),
            duration_seconds: Some(90),
            career_paths: Some(career_paths.iter().map(|s| s.to_string()).collect()),
        })
        .await
        .expect("Failed to create test resume")
}
