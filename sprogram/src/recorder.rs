//! Completed-activity records. Nothing is persisted; the record is returned
//! to the caller.

use std::sync::Arc;

use scommon::{Clock, SystemClock};
use serde_json::Value;
use uuid::Uuid;

use crate::{CompletedActivity, CompletionNotice, ProgramError};

pub const DEFAULT_ACTIVITY_MINUTES: u32 = 5;

#[derive(Clone)]
pub struct ActivityRecorder {
    clock: Arc<dyn Clock>,
}

impl ActivityRecorder {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn record(&self, notice: CompletionNotice) -> Result<CompletedActivity, ProgramError> {
        let activity_type = notice
            .activity_type
            .filter(|value| !value.trim().is_empty());
        let topic_id = notice.topic_id.filter(|value| !value.trim().is_empty());

        let (Some(activity_type), Some(topic_id)) = (activity_type.as_ref(), topic_id.as_ref())
        else {
            let mut missing = Vec::new();
            if activity_type.is_none() {
                missing.push("type");
            }
            if topic_id.is_none() {
                missing.push("topicId");
            }
            return Err(ProgramError::missing_fields(missing));
        };

        Ok(CompletedActivity {
            id: format!("{activity_type}_{topic_id}_{}", Uuid::new_v4().simple()),
            activity_type: activity_type.clone(),
            topic_id: topic_id.clone(),
            topic: notice
                .topic
                .unwrap_or_else(|| Value::Object(Default::default())),
            timestamp: self.clock.now(),
            duration_minutes: notice.duration_minutes.unwrap_or(DEFAULT_ACTIVITY_MINUTES),
            notes: notice.notes.unwrap_or_default(),
            rating: notice.rating,
        })
    }
}

impl Default for ActivityRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ActivityRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityRecorder").finish_non_exhaustive()
    }
}
