pub mod entities;

pub use entities::{CalendarEvent, Dated, FeedDate, ScheduleRow};
