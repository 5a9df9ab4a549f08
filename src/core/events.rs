//! Events and their attendance records.

use crate::db::events::{self, EventCascade};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::records;
use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceRecord, Event, EventInput};
use crate::utils::{date, time};

pub struct EventLogic;

fn required_name(name: &str, what: &str) -> AppResult<String> {
    let n = name.trim();
    if n.is_empty() {
        return Err(AppError::Validation(format!("{what} name is required")));
    }
    Ok(n.to_string())
}

impl EventLogic {
    /// Create an event; the date defaults to today when omitted.
    pub fn create(pool: &mut DbPool, input: &EventInput) -> AppResult<Event> {
        let name = required_name(&input.name, "Event")?;
        let event_date = date::parse_optional_date(input.date.as_deref(), date::today())?;
        let now = time::now();

        let tx = pool.begin()?;
        let event_id = events::insert_event(&tx, &name, &event_date, &now)?;
        ttlog(
            &tx,
            "event_add",
            &event_id.to_string(),
            &format!("Created event '{}' on {}", name, event_date),
        )?;
        tx.commit()?;

        Ok(Event {
            event_id,
            event_name: name,
            event_date,
            created_at: now,
        })
    }

    /// Rename / re-date an event; the date is kept when omitted.
    pub fn update(pool: &mut DbPool, event_id: i64, input: &EventInput) -> AppResult<Event> {
        let name = required_name(&input.name, "Event")?;

        let tx = pool.begin()?;
        let current = events::get_event(&tx, event_id)?.ok_or(AppError::EventNotFound(event_id))?;
        let event_date = date::parse_optional_date(input.date.as_deref(), current.event_date)?;

        events::update_event(&tx, event_id, &name, &event_date)?;
        ttlog(&tx, "event_edit", &event_id.to_string(), "Updated event")?;
        tx.commit()?;

        Ok(Event {
            event_name: name,
            event_date,
            ..current
        })
    }

    /// Delete an event together with its records and their attendance rows.
    pub fn delete(pool: &mut DbPool, event_id: i64) -> AppResult<EventCascade> {
        let tx = pool.begin()?;

        let removed = events::delete_event_cascade(&tx, event_id)?;
        if removed.events == 0 {
            return Err(AppError::EventNotFound(event_id));
        }

        ttlog(
            &tx,
            "event_del",
            &event_id.to_string(),
            &format!(
                "Deleted event, {} records and {} attendance entries",
                removed.records, removed.attendance
            ),
        )?;
        tx.commit()?;

        Ok(removed)
    }

    pub fn get(pool: &mut DbPool, event_id: i64) -> AppResult<Event> {
        events::get_event(&pool.conn, event_id)?.ok_or(AppError::EventNotFound(event_id))
    }

    pub fn list(pool: &mut DbPool) -> AppResult<Vec<Event>> {
        events::list_events(&pool.conn)
    }
}

pub struct RecordLogic;

impl RecordLogic {
    pub fn create(pool: &mut DbPool, event_id: i64, name: &str) -> AppResult<AttendanceRecord> {
        let name = required_name(name, "Record")?;
        let now = time::now();

        let tx = pool.begin()?;
        if events::get_event(&tx, event_id)?.is_none() {
            return Err(AppError::EventNotFound(event_id));
        }

        let record_id = records::insert_record(&tx, event_id, &name, &now)?;
        ttlog(
            &tx,
            "record_add",
            &record_id.to_string(),
            &format!("Created record '{}' for event {}", name, event_id),
        )?;
        tx.commit()?;

        Ok(AttendanceRecord {
            record_id,
            record_name: name,
            event_id,
            created_at: now,
        })
    }

    pub fn get(pool: &mut DbPool, record_id: i64) -> AppResult<AttendanceRecord> {
        records::get_record(&pool.conn, record_id)?.ok_or(AppError::RecordNotFound(record_id))
    }

    pub fn list_for_event(pool: &mut DbPool, event_id: i64) -> AppResult<Vec<AttendanceRecord>> {
        if events::get_event(&pool.conn, event_id)?.is_none() {
            return Err(AppError::EventNotFound(event_id));
        }
        records::list_records_for_event(&pool.conn, event_id)
    }

    pub fn list_all(pool: &mut DbPool) -> AppResult<Vec<AttendanceRecord>> {
        records::list_records(&pool.conn)
    }
}
