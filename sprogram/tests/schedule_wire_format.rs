use chrono::NaiveDate;
use serde_json::json;
use sprogram::{
    ActivityRecorder, CompletionNotice, ProgramErrorKind, ScheduleRequest, SchedulePlanner,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 20).expect("valid date")
}

#[test]
fn planned_schedule_serializes_with_camel_case_fields() {
    let request: ScheduleRequest = serde_json::from_value(json!({
        "type": "meditation",
        "topicId": "peace",
        "topicTitle": "Finding Peace",
        "dailyTime": "21:15",
        "durationDays": 14
    }))
    .expect("request parses");

    let schedule = SchedulePlanner::new()
        .plan(&request, today())
        .expect("plan succeeds");
    let value = serde_json::to_value(&schedule).expect("serializes");

    assert_eq!(value["program"]["type"], "meditation");
    assert_eq!(value["program"]["startDate"], "2024-05-20");
    assert_eq!(value["program"]["endDate"], "2024-06-02");
    assert_eq!(value["program"]["status"], "active");
    assert_eq!(value["calendarEvents"].as_array().map(Vec::len), Some(14));
    assert_eq!(value["calendarEvents"][0]["durationMinutes"], 30);
    assert_eq!(value["calendarEvents"][0]["title"], "Meditation: Finding Peace");
    assert_eq!(value["calendarEvents"][13]["date"], "2024-06-02");
}

#[test]
fn missing_duration_yields_no_events() {
    let request: ScheduleRequest = serde_json::from_value(json!({
        "type": "devotion",
        "topic_id": "stress",
        "time": "07:00"
    }))
    .expect("request parses");

    let error = SchedulePlanner::new()
        .plan(&request, today())
        .expect_err("duration required");
    assert_eq!(error.kind, ProgramErrorKind::Validation);
    assert_eq!(error.missing_fields, vec!["durationDays"]);
}

#[test]
fn completion_notice_accepts_original_field_names() {
    let notice: CompletionNotice = serde_json::from_value(json!({
        "type": "prayer",
        "topic_id": "evening",
        "duration": 15,
        "notes": "grateful",
        "rating": 5
    }))
    .expect("notice parses");

    let activity = ActivityRecorder::new().record(notice).expect("recorded");
    let value = serde_json::to_value(&activity).expect("serializes");

    assert_eq!(value["topicId"], "evening");
    assert_eq!(value["durationMinutes"], 15);
    assert_eq!(value["rating"], 5);
    assert!(value["id"].as_str().is_some_and(|id| id.starts_with("prayer_evening_")));
}
