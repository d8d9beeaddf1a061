use crate::error::GraphError;
use crate::graph::{GraphResponse, GraphService};
use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};

const EVENT_SUBJECT: &str = "Snippet test event";
const UPDATED_SUBJECT: &str = "Snippet test event (updated)";
const GRAPH_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalendarSnippet {
    GetEvents,
    CreateEvent,
    UpdateEvent,
    DeleteEvent,
}

impl CalendarSnippet {
    pub const ALL: [CalendarSnippet; 4] = [
        CalendarSnippet::GetEvents,
        CalendarSnippet::CreateEvent,
        CalendarSnippet::UpdateEvent,
        CalendarSnippet::DeleteEvent,
    ];

    pub fn key(self) -> &'static str {
        match self {
            CalendarSnippet::GetEvents => "get_events",
            CalendarSnippet::CreateEvent => "create_event",
            CalendarSnippet::UpdateEvent => "update_event",
            CalendarSnippet::DeleteEvent => "delete_event",
        }
    }

    pub fn run(self, service: &GraphService, version: &str) -> Result<GraphResponse, GraphError> {
        match self {
            CalendarSnippet::GetEvents => service.get(version, "me/events"),
            CalendarSnippet::CreateEvent => create_event(service, version),
            CalendarSnippet::UpdateEvent => {
                let id = create_event(service, version)?.id()?;
                service.patch(
                    version,
                    &format!("me/events/{id}"),
                    &json!({ "subject": UPDATED_SUBJECT }),
                )
            }
            CalendarSnippet::DeleteEvent => {
                let id = create_event(service, version)?.id()?;
                service.delete(version, &format!("me/events/{id}"))
            }
        }
    }
}

fn create_event(service: &GraphService, version: &str) -> Result<GraphResponse, GraphError> {
    service.post(version, "me/events", &new_event_body(Utc::now()))
}

/// 明天同一时刻开始、持续一小时的事件。
pub(super) fn new_event_body(now: DateTime<Utc>) -> Value {
    let start = now + Duration::days(1);
    let end = start + Duration::hours(1);
    json!({
        "subject": EVENT_SUBJECT,
        "body": {
            "contentType": "Text",
            "content": "Created by the Graph snippets app.",
        },
        "start": {
            "dateTime": start.format(GRAPH_DATE_TIME_FORMAT).to_string(),
            "timeZone": "UTC",
        },
        "end": {
            "dateTime": end.format(GRAPH_DATE_TIME_FORMAT).to_string(),
            "timeZone": "UTC",
        },
    })
}
