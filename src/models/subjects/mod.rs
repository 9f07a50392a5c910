pub mod entities;

pub use entities::{
    Assignment, AssignmentStatus, Resource, ResourceKind, Subject, SubjectSource, Topic,
    TopicCategory,
};
