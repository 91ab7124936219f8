//! Recurring program scheduling, completed-activity records, and the static
//! content catalog.

mod catalog;
mod error;
mod planner;
mod recorder;
mod types;

pub mod prelude {
    pub use crate::{
        ActivityRecorder, ActivityType, CalendarEvent, CatalogKind, CompletedActivity,
        CompletionNotice, ContentCatalog, ProgramError, ProgramErrorKind, ProgramSchedule,
        ScheduleRequest, SchedulePlanner, ScheduledProgram, StaticCatalog,
    };
}

pub use catalog::{
    CatalogEntry, CatalogKind, ContentCatalog, InspirationItem, StaticCatalog, TopicSummary,
};
pub use error::{ProgramError, ProgramErrorKind};
pub use planner::{EVENT_DURATION_MINUTES, MAX_PROGRAM_DAYS, ProgramSpec, SchedulePlanner};
pub use recorder::{ActivityRecorder, DEFAULT_ACTIVITY_MINUTES};
pub use types::{
    ActivityType, CalendarEvent, CompletedActivity, CompletionNotice, DurationValue,
    ProgramSchedule, ProgramStatus, ScheduleRequest, ScheduledProgram,
};
