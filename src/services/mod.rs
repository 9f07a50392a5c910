pub mod courses;
pub mod feeds;
pub mod materials;
pub mod subjects;
pub mod system;
pub mod tasks;
pub mod topics;

pub use courses::CourseService;
pub use feeds::FeedService;
pub use materials::MaterialService;
pub use subjects::SubjectService;
pub use system::SystemService;
pub use tasks::TaskService;
pub use topics::TopicService;
