//! Repository implementations for data access

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

pub use audit::AuditRepository;
pub use college::CollegeRepository;
pub use file::FileRepository;
pub use forum::ForumRepository;
pub use group::GroupRepository;
pub use job::JobRepository;
pub use message::MessageRepository;
pub use practice::PracticeRepository;
pub use resume::ResumeRepository;
pub use user::UserRepository;
