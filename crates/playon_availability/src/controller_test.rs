#[cfg(test)]
mod tests {
    use crate::clock::FixedClock;
    use crate::controller::{BookingDetails, DayViewController};
    use crate::day_view::DayViewState;
    use crate::logic::{OperatingHours, Slot};
    use chrono::NaiveDate;
    use playon_common::models::{BookingRecord, BookingSearch, NewBooking, User};
    use playon_common::services::{BookingCreator, BookingDirectory, BoxFuture, SessionSource};
    use playon_common::{network_error, PlayonError};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn slot(hour: u8) -> Slot {
        Slot::new(hour).unwrap()
    }

    fn record(start: &str, end: &str) -> BookingRecord {
        serde_json::from_value(serde_json::json!({
            "id": 1, "id_quadra": 3, "data": "2026-10-20",
            "hora_inicio": start, "hora_fim": end
        }))
        .unwrap()
    }

    // --- Mock collaborators ---

    #[derive(Default)]
    struct MockBookings {
        by_date: Mutex<HashMap<NaiveDate, Vec<BookingRecord>>>,
        delays: HashMap<NaiveDate, Duration>,
        failing: bool,
        session_expired: Mutex<bool>,
        calls: Mutex<Vec<(i64, NaiveDate)>>,
    }

    impl MockBookings {
        fn with(day: NaiveDate, records: Vec<BookingRecord>) -> Self {
            let mock = MockBookings::default();
            mock.by_date.lock().unwrap().insert(day, records);
            mock
        }

        fn add(&self, day: NaiveDate, record: BookingRecord) {
            self.by_date.lock().unwrap().entry(day).or_default().push(record);
        }
    }

    impl BookingDirectory for MockBookings {
        fn bookings_for_day(
            &self,
            court_id: i64,
            date: NaiveDate,
        ) -> BoxFuture<'_, Vec<BookingRecord>> {
            self.calls.lock().unwrap().push((court_id, date));
            let delay = self.delays.get(&date).copied();
            let result = if *self.session_expired.lock().unwrap() {
                Err(PlayonError::AuthError("session expired".to_string()))
            } else if self.failing {
                Err(network_error("HTTP 502: bad gateway"))
            } else {
                Ok(self.by_date.lock().unwrap().get(&date).cloned().unwrap_or_default())
            };
            Box::pin(async move {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                result
            })
        }

        fn booking_by_id(&self, _booking_id: i64) -> BoxFuture<'_, BookingRecord> {
            Box::pin(async { Err(PlayonError::NotFound("not mocked".to_string())) })
        }

        fn bookings_for_user(&self, _user_id: i64) -> BoxFuture<'_, Vec<BookingRecord>> {
            Box::pin(async { Ok(Vec::new()) })
        }

        fn search_bookings(&self, _search: &BookingSearch) -> BoxFuture<'_, Vec<BookingRecord>> {
            Box::pin(async { Ok(Vec::new()) })
        }
    }

    /// Records every request; fails while `fail` is set, and on success
    /// adds the booking to the shared directory so refetches see it.
    struct MockCreator {
        directory: Arc<MockBookings>,
        fail: Mutex<bool>,
        sent: Mutex<Vec<NewBooking>>,
    }

    impl BookingCreator for MockCreator {
        fn create_booking(&self, booking: NewBooking) -> BoxFuture<'_, Option<i64>> {
            self.sent.lock().unwrap().push(booking.clone());
            let result = if *self.fail.lock().unwrap() {
                Err(network_error("HTTP 503: try later"))
            } else {
                let day = NaiveDate::parse_from_str(&booking.date, "%Y-%m-%d").unwrap();
                self.directory
                    .add(day, record(&booking.start_time, &booking.end_time));
                Ok(Some(99))
            };
            Box::pin(async move { result })
        }
    }

    struct MockSession(Option<User>);

    impl SessionSource for MockSession {
        fn current_user(&self) -> Option<User> {
            self.0.clone()
        }
    }

    fn user() -> User {
        User {
            id: 7,
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            phone: String::new(),
            status: String::new(),
        }
    }

    struct Fixture {
        controller: DayViewController,
        bookings: Arc<MockBookings>,
        creator: Arc<MockCreator>,
    }

    fn fixture(bookings: MockBookings, signed_in: bool) -> Fixture {
        let bookings = Arc::new(bookings);
        let creator = Arc::new(MockCreator {
            directory: bookings.clone(),
            fail: Mutex::new(false),
            sent: Mutex::new(Vec::new()),
        });
        let now = date(18).and_hms_opt(10, 0, 0).unwrap();
        let controller = DayViewController::new(
            3,
            OperatingHours::new(8, 14).unwrap(),
            bookings.clone(),
            creator.clone(),
            Arc::new(MockSession(signed_in.then(user))),
            Arc::new(FixedClock::new(now)),
        );
        Fixture {
            controller,
            bookings,
            creator,
        }
    }

    #[tokio::test]
    async fn test_select_date_computes_free_slots() {
        let fx = fixture(
            MockBookings::with(date(20), vec![record("09:00:00", "11:00:00")]),
            true,
        );
        let state = fx.controller.select_date(date(20)).await.unwrap();
        assert_eq!(state.free_slots(), &[slot(8), slot(11), slot(12), slot(13)]);
        assert_eq!(fx.bookings.calls.lock().unwrap().as_slice(), &[(3, date(20))]);
    }

    #[tokio::test]
    async fn test_past_date_never_fetches() {
        let fx = fixture(MockBookings::default(), true);
        let err = fx.controller.select_date(date(17)).await.unwrap_err();
        assert!(matches!(err, PlayonError::ValidationError(_)));
        assert!(fx.bookings.calls.lock().unwrap().is_empty());
        assert_eq!(fx.controller.snapshot().await, DayViewState::NoDateSelected);
    }

    #[tokio::test]
    async fn test_unreadable_and_inverted_records_are_skipped() {
        let fx = fixture(
            MockBookings::with(
                date(20),
                vec![
                    record("ab:00:00", "10:00:00"),
                    record("12:00:00", "10:00:00"),
                    record("13:00:00", "14:00:00"),
                ],
            ),
            true,
        );
        let state = fx.controller.select_date(date(20)).await.unwrap();
        assert_eq!(
            state.free_slots(),
            &[slot(8), slot(9), slot(10), slot(11), slot(12)]
        );
    }

    #[tokio::test]
    async fn test_failed_read_shows_every_slot_free() {
        let fx = fixture(
            MockBookings {
                failing: true,
                ..MockBookings::default()
            },
            true,
        );
        let state = fx.controller.select_date(date(20)).await.unwrap();
        assert_eq!(state.free_slots().len(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latest_date_selection_wins() {
        let mut bookings = MockBookings::with(date(20), vec![record("08:00:00", "14:00:00")]);
        bookings.delays.insert(date(20), Duration::from_millis(500));
        bookings.delays.insert(date(21), Duration::from_millis(10));
        let fx = fixture(bookings, true);

        // The slow response for the 20th arrives after the user moved on to the 21st
        let (first, second) = tokio::join!(
            fx.controller.select_date(date(20)),
            fx.controller.select_date(date(21)),
        );
        assert!(first.is_ok());
        assert!(second.is_ok());

        let state = fx.controller.snapshot().await;
        assert_eq!(state.date(), Some(date(21)));
        assert_eq!(state.free_slots().len(), 6);
    }

    #[tokio::test]
    async fn test_submit_books_and_refetches() {
        let fx = fixture(MockBookings::default(), true);
        fx.controller.select_date(date(20)).await.unwrap();
        fx.controller.toggle_slot(slot(9)).await.unwrap();
        fx.controller.toggle_slot(slot(10)).await.unwrap();

        let details = BookingDetails {
            sport_id: 2,
            notes: "racha".to_string(),
            private: true,
        };
        let id = fx.controller.submit(&details).await.unwrap();
        assert_eq!(id, Some(99));

        let sent = fx.creator.sent.lock().unwrap().clone();
        assert_eq!(
            sent,
            vec![NewBooking {
                user_id: 7,
                court_id: 3,
                date: "2026-10-20".to_string(),
                start_time: "09:00:00".to_string(),
                end_time: "11:00".to_string(),
                notes: "racha".to_string(),
                private: 1,
                sport_id: 2,
            }]
        );

        let state = fx.controller.snapshot().await;
        assert!(matches!(state, DayViewState::Ready { .. }));
        assert_eq!(state.selection().map(|s| s.len()), Some(0));
        assert_eq!(state.free_slots(), &[slot(8), slot(11), slot(12), slot(13)]);
        // One load for the date, one after the booking
        assert_eq!(fx.bookings.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_selection_for_retry() {
        let fx = fixture(MockBookings::default(), true);
        fx.controller.select_date(date(20)).await.unwrap();
        fx.controller.toggle_slot(slot(12)).await.unwrap();
        *fx.creator.fail.lock().unwrap() = true;

        let err = fx
            .controller
            .submit(&BookingDetails::default())
            .await
            .unwrap_err();
        assert!(err.is_retryable());
        match fx.controller.snapshot().await {
            DayViewState::SubmitError {
                selection, message, ..
            } => {
                assert_eq!(selection.iter().collect::<Vec<_>>(), vec![slot(12)]);
                assert!(message.contains("HTTP 503"));
            }
            other => panic!("unexpected state: {other:?}"),
        }

        *fx.creator.fail.lock().unwrap() = false;
        assert_eq!(
            fx.controller.submit(&BookingDetails::default()).await.unwrap(),
            Some(99)
        );
        assert_eq!(fx.creator.sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_submit_requires_sign_in() {
        let fx = fixture(MockBookings::default(), false);
        fx.controller.select_date(date(20)).await.unwrap();
        fx.controller.toggle_slot(slot(9)).await.unwrap();

        let err = fx
            .controller
            .submit(&BookingDetails::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PlayonError::AuthError(_)));
        assert!(fx.creator.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_contiguous_toggle_is_a_validation_error() {
        let fx = fixture(MockBookings::default(), true);
        fx.controller.select_date(date(20)).await.unwrap();
        fx.controller.toggle_slot(slot(9)).await.unwrap();
        let err = fx.controller.toggle_slot(slot(11)).await.unwrap_err();
        assert_eq!(err.to_string(), "11:00 does not continue the selected hours");
    }

    #[tokio::test]
    async fn test_refresh_picks_up_new_bookings() {
        let fx = fixture(MockBookings::default(), true);
        fx.controller.select_date(date(20)).await.unwrap();
        fx.bookings.add(date(20), record("13:00:00", "14:00:00"));

        let state = fx.controller.refresh().await.unwrap();
        assert_eq!(state.free_slots().len(), 5);
        assert!(!state.free_slots().contains(&slot(13)));
    }

    #[tokio::test]
    async fn test_failed_refetch_still_reports_booking() {
        let fx = fixture(MockBookings::default(), true);
        fx.controller.select_date(date(20)).await.unwrap();
        fx.controller.toggle_slot(slot(9)).await.unwrap();
        *fx.bookings.session_expired.lock().unwrap() = true;

        let id = fx.controller.submit(&BookingDetails::default()).await.unwrap();
        assert_eq!(id, Some(99));
        assert_eq!(fx.creator.sent.lock().unwrap().len(), 1);

        // The booked hour already left the free list before the refetch
        let state = fx.controller.snapshot().await;
        assert!(matches!(state, DayViewState::Ready { .. }));
        assert!(!state.free_slots().contains(&slot(9)));
    }
}
