//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod audit;
pub mod college;
pub mod file;
pub mod forum;
pub mod group;
pub mod job;
pub mod message;
pub mod practice;
pub mod resume;
pub mod user;

// Re-export commonly used models
pub use audit::{AdminLog, RecordAdminLogRequest, RecordRecruiterActionRequest, RecruiterAction};
pub use college::{College, CreateCollegeRequest, UpdateCollegeRequest};
pub use file::{CreateSharedFileRequest, SharedFile};
pub use forum::{
    CreateForumPostRequest, CreateForumReplyRequest, ForumPost, ForumReply,
    ModerateForumPostRequest,
};
pub use group::{
    CreateStudyGroupRequest, GroupMembership, JoinGroupRequest, MembershipRole, StudyGroup,
    UpdateStudyGroupRequest,
};
pub use job::{
    ApplicationStatus, CreateJobApplicationRequest, CreateJobPostingRequest, JobApplication,
    JobPosting,
};
pub use message::{ChatMessage, CreateChatMessageRequest};
pub use practice::{
    CreatePracticeModuleRequest, DifficultyLevel, ModuleType, PracticeModule,
    RecordProgressRequest, UserProgress,
};
pub use resume::{CreateVideoResumeRequest, ResumeSearchFilter, ResumeSearchPage, VideoResume};
pub use user::{
    CefrLevel, CreateUserRequest, ProficiencyLevel, UpdateUserRequest, User, UserRole,
};
