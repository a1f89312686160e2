use std::sync::Arc;

use chrono::NaiveDate;
use log::{info, warn};
use serde::Deserialize;
use serde_json::{Value, json};
use warp::{Filter, Reply};
use warp::http::StatusCode;

use crate::calendar::WeekWindow;
use crate::service::event_service::{EventDirectory, EventFilter};

#[derive(Debug, Default, Deserialize)]
pub struct RegionQuery {
    pub region: Option<String>,
}

impl RegionQuery {
    fn filter(&self) -> EventFilter {
        EventFilter {
            region: self.region.clone().filter(|r| !r.trim().is_empty()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiReply {
    fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    fn bad_request(message: impl ToString) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: json!({ "error": message.to_string() }),
        }
    }
}

pub fn events_reply(directory: &EventDirectory, query: &RegionQuery) -> ApiReply {
    let mut events = directory.filter(&query.filter());
    events.sort_by(|a, b| a.start_date.cmp(&b.start_date).then_with(|| a.title.cmp(&b.title)));
    ApiReply::ok(json!(events))
}

pub fn week_reply(directory: &EventDirectory, date: &str, query: &RegionQuery) -> ApiReply {
    let date = match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => return ApiReply::bad_request(format!("invalid date `{}`", date)),
    };
    let week = match WeekWindow::containing(date) {
        Ok(week) => week,
        Err(err) => return ApiReply::bad_request(err),
    };
    match directory.week_view(&query.filter(), week) {
        Ok(view) => ApiReply::ok(json!(view)),
        Err(err) => ApiReply::bad_request(err),
    }
}

pub fn month_reply(
    directory: &EventDirectory,
    year: i32,
    month: u32,
    query: &RegionQuery,
) -> ApiReply {
    match directory.month_view(&query.filter(), year, month) {
        Ok(weeks) => ApiReply::ok(json!(weeks)),
        Err(err) => ApiReply::bad_request(err),
    }
}

fn into_response(reply: ApiReply) -> warp::reply::Response {
    if reply.status != StatusCode::OK {
        warn!("event=api_rejected status={} body={}", reply.status, reply.body);
    }
    warp::reply::with_status(warp::reply::json(&reply.body), reply.status).into_response()
}

pub fn routes(
    directory: Arc<EventDirectory>,
) -> impl Filter<Extract = (warp::reply::Response,), Error = warp::Rejection> + Clone {
    let with_directory = warp::any().map(move || directory.clone());

    let events = warp::path!("events")
        .and(warp::get())
        .and(with_directory.clone())
        .and(warp::query::<RegionQuery>())
        .map(|directory: Arc<EventDirectory>, query: RegionQuery| {
            into_response(events_reply(&directory, &query))
        });

    let week = warp::path!("calendar" / "week" / String)
        .and(warp::get())
        .and(with_directory.clone())
        .and(warp::query::<RegionQuery>())
        .map(|date: String, directory: Arc<EventDirectory>, query: RegionQuery| {
            into_response(week_reply(&directory, &date, &query))
        });

    let month = warp::path!("calendar" / "month" / i32 / u32)
        .and(warp::get())
        .and(with_directory)
        .and(warp::query::<RegionQuery>())
        .map(
            |year: i32, month: u32, directory: Arc<EventDirectory>, query: RegionQuery| {
                into_response(month_reply(&directory, year, month, &query))
            },
        );

    events.or(week).unify().or(month).unify()
}

pub async fn run_api(directory: Arc<EventDirectory>, port: u16) {
    info!("event=api_start port={}", port);
    warp::serve(routes(directory)).run(([0, 0, 0, 0], port)).await;
}
