use chrono::NaiveDate;
use redletter_core::db::open_db_in_memory;
use redletter_core::{
    EventRepository, EventService, SqliteEventRepository, SubmitError, MAX_EVENT_TEXT_CHARS,
};

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn submit_stores_event_and_echoes_date_and_text() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();
    let service = EventService::new(repo);

    let receipt = service.submit("2020-01-21", "first case confirmed").unwrap();

    assert_eq!(receipt.event.date, day(2020, 1, 21));
    assert_eq!(receipt.event.text, "first case confirmed");
    assert_eq!(receipt.echo_line(), "2020-01-21 first case confirmed");
}

#[test]
fn all_accepted_date_renderings_store_same_canonical_date() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();
    let service = EventService::new(repo);

    let iso = service.submit("2020-01-21", "iso form").unwrap();
    let cjk = service.submit("2020年01月21日", "cjk form").unwrap();
    let slash = service.submit("2020/01/21", "slash form").unwrap();

    assert_eq!(iso.event.date, day(2020, 1, 21));
    assert_eq!(cjk.event.date, day(2020, 1, 21));
    assert_eq!(slash.event.date, day(2020, 1, 21));
}

#[test]
fn submitted_event_is_found_by_month_query() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();
    let service = EventService::new(repo);

    let receipt = service.submit("1969-07-20", "moon landing").unwrap();

    let july = service.events_in_month(7).unwrap();
    assert!(july.iter().any(|event| event.uuid == receipt.event.uuid));
}

#[test]
fn round_trip_preserves_date_and_text_exactly() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();
    let service = EventService::new(repo);

    let text = "逢山开路，遇水架桥";
    let receipt = service.submit("1949年10月01日", text).unwrap();

    let repo = SqliteEventRepository::try_new(&conn).unwrap();
    let stored = repo.get_event(receipt.event.uuid).unwrap().unwrap();
    assert_eq!(stored.text, text);
    assert_eq!(stored.date, day(1949, 10, 1));
}

#[test]
fn empty_inputs_are_rejected_before_anything_else() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();
    let service = EventService::new(repo);

    // Even with an unparseable date, empty text reports EmptyInput first.
    assert!(matches!(
        service.submit("garbage", "  ").unwrap_err(),
        SubmitError::EmptyInput
    ));
    assert!(matches!(
        service.submit("", "valid text").unwrap_err(),
        SubmitError::EmptyInput
    ));
}

#[test]
fn overlong_text_is_rejected_before_date_parsing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();
    let service = EventService::new(repo);

    let text = "x".repeat(MAX_EVENT_TEXT_CHARS + 1);
    // Date text is also invalid; text must be reported first.
    let err = service.submit("not a date", &text).unwrap_err();
    assert!(matches!(err, SubmitError::InvalidText(_)));
    assert!(err.user_message().contains("too long"));
}

#[test]
fn unparseable_date_is_rejected_and_nothing_is_stored() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();
    let service = EventService::new(repo);

    let err = service.submit("January 21, 2020", "valid text").unwrap_err();
    assert!(matches!(err, SubmitError::InvalidDate(_)));
    assert_eq!(err.user_message(), "could not parse the date text");

    let repo = SqliteEventRepository::try_new(&conn).unwrap();
    for month in 1..=12 {
        assert!(repo.events_in_month(month).unwrap().is_empty());
    }
}

#[test]
fn storage_failure_message_leaks_no_internal_detail() {
    let conn = open_db_in_memory().unwrap();
    // Sabotage the schema after the repository guard has passed.
    let repo = SqliteEventRepository::try_new(&conn).unwrap();
    let service = EventService::new(repo);
    conn.execute_batch("DROP TABLE events;").unwrap();

    let err = service.submit("2020-01-21", "valid text").unwrap_err();
    assert!(matches!(err, SubmitError::Storage(_)));
    let message = err.user_message();
    assert!(!message.to_lowercase().contains("sql"));
    assert!(!message.contains("events"));
}

#[test]
fn current_month_events_uses_month_of_injected_today() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();
    let service = EventService::new(repo);

    service.submit("1919-05-04", "in May").unwrap();
    service.submit("2001-12-11", "in December").unwrap();

    let current = service.current_month_events(day(2026, 5, 20)).unwrap();
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].text, "in May");
}
