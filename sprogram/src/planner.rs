//! Expansion of a recurring program into dated calendar events.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use sprogram::{ScheduleRequest, SchedulePlanner};
//!
//! let request: ScheduleRequest = serde_json::from_str(
//!     r#"{"type":"devotion","topicId":"stress","topicTitle":"Dealing with Stress",
//!         "dailyTime":"07:00","startDate":"2024-01-01","durationDays":7}"#,
//! )
//! .expect("valid json");
//! let today = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
//!
//! let schedule = SchedulePlanner::new()
//!     .plan(&request, today)
//!     .expect("schedule should plan");
//! assert_eq!(schedule.program.end_date.to_string(), "2024-01-07");
//! assert_eq!(schedule.calendar_events.len(), 7);
//! ```

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::{
    ActivityType, CalendarEvent, DurationValue, ProgramError, ProgramSchedule, ProgramStatus,
    ScheduleRequest, ScheduledProgram,
};

pub const EVENT_DURATION_MINUTES: u32 = 30;

/// Longest program a single request may expand into.
pub const MAX_PROGRAM_DAYS: u32 = 366;

/// Validated program parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramSpec {
    pub activity_type: ActivityType,
    pub topic_id: String,
    pub topic_title: String,
    /// Validated `HH:MM`, kept as supplied.
    pub daily_time: String,
    pub start_date: NaiveDate,
    pub duration_days: u32,
}

impl ProgramSpec {
    /// Validates raw input. `fallback_start` is used when no start date was
    /// supplied.
    pub fn from_request(
        request: &ScheduleRequest,
        fallback_start: NaiveDate,
    ) -> Result<Self, ProgramError> {
        let activity_type = present(&request.activity_type);
        let topic_id = present(&request.topic_id);
        let daily_time = present(&request.daily_time);

        let mut missing = Vec::new();
        if activity_type.is_none() {
            missing.push("type");
        }
        if topic_id.is_none() {
            missing.push("topicId");
        }
        if daily_time.is_none() {
            missing.push("dailyTime");
        }
        if request.duration_days.is_none() {
            missing.push("durationDays");
        }

        let (Some(activity_type), Some(topic_id), Some(daily_time), Some(duration)) = (
            activity_type,
            topic_id,
            daily_time,
            request.duration_days.as_ref(),
        ) else {
            return Err(ProgramError::missing_fields(missing));
        };

        let start_date = match present(&request.start_date) {
            Some(value) => parse_start_date(value)?,
            None => fallback_start,
        };

        Ok(Self {
            activity_type: activity_type.parse()?,
            topic_id: topic_id.to_string(),
            topic_title: request.topic_title.clone().unwrap_or_default(),
            daily_time: validate_daily_time(daily_time)?,
            start_date,
            duration_days: parse_duration_days(duration)?,
        })
    }
}

/// Stateless; the same input always yields the same schedule.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchedulePlanner;

impl SchedulePlanner {
    pub fn new() -> Self {
        Self
    }

    pub fn plan(
        &self,
        request: &ScheduleRequest,
        fallback_start: NaiveDate,
    ) -> Result<ProgramSchedule, ProgramError> {
        let spec = ProgramSpec::from_request(request, fallback_start)?;
        self.plan_spec(&spec)
    }

    pub fn plan_spec(&self, spec: &ProgramSpec) -> Result<ProgramSchedule, ProgramError> {
        if spec.duration_days == 0 {
            return Err(ProgramError::validation(
                "durationDays must be a positive integer",
            ));
        }

        let end_date = offset(spec.start_date, spec.duration_days - 1)?;
        if spec.duration_days > MAX_PROGRAM_DAYS {
            return Err(duration_too_long());
        }

        let time = spec.daily_time.clone();
        let title = format!("{}: {}", spec.activity_type.title(), spec.topic_title);
        let description = format!(
            "Daily {} session - {}",
            spec.activity_type, spec.topic_title
        );

        let calendar_events = (0..spec.duration_days)
            .map(|day| {
                Ok(CalendarEvent {
                    title: title.clone(),
                    date: offset(spec.start_date, day)?,
                    time: time.clone(),
                    duration_minutes: EVENT_DURATION_MINUTES,
                    description: description.clone(),
                    activity_type: spec.activity_type,
                })
            })
            .collect::<Result<Vec<_>, ProgramError>>()?;

        let program = ScheduledProgram {
            id: format!(
                "schedule_{}_{}_{}",
                spec.activity_type, spec.start_date, spec.duration_days
            ),
            activity_type: spec.activity_type,
            topic_id: spec.topic_id.clone(),
            topic_title: spec.topic_title.clone(),
            daily_time: time,
            duration_days: spec.duration_days,
            start_date: spec.start_date,
            end_date,
            status: ProgramStatus::Active,
        };

        Ok(ProgramSchedule {
            program,
            calendar_events,
        })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

fn offset(start: NaiveDate, days: u32) -> Result<NaiveDate, ProgramError> {
    start
        .checked_add_days(Days::new(u64::from(days)))
        .ok_or_else(|| ProgramError::validation("schedule runs past the supported date range"))
}

fn parse_start_date(value: &str) -> Result<NaiveDate, ProgramError> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Ok(datetime) = chrono::DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.date_naive());
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .map(|datetime| datetime.date())
        .map_err(|_| ProgramError::validation(format!("invalid startDate '{value}'")))
}

fn validate_daily_time(value: &str) -> Result<String, ProgramError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map(|_| value.to_string())
        .map_err(|_| ProgramError::validation(format!("dailyTime must be HH:MM, got '{value}'")))
}

fn parse_duration_days(value: &DurationValue) -> Result<u32, ProgramError> {
    let days = match value {
        DurationValue::Number(days) => Some(*days),
        DurationValue::Text(text) => text.trim().parse::<i64>().ok(),
    };

    let days = days
        .filter(|days| *days > 0)
        .ok_or_else(|| ProgramError::validation("durationDays must be a positive integer"))?;

    u32::try_from(days)
        .ok()
        .filter(|days| *days <= MAX_PROGRAM_DAYS)
        .ok_or_else(duration_too_long)
}

fn duration_too_long() -> ProgramError {
    ProgramError::validation(format!("durationDays must not exceed {MAX_PROGRAM_DAYS}"))
}
