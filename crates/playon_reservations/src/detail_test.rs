#[cfg(test)]
mod tests {
    use crate::detail::ReservationDetail;
    use crate::mock::{booking, user, MockBookings, MockParticipants, MockSession};
    use chrono::NaiveDate;
    use playon_common::models::Player;
    use playon_common::PlayonError;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn player(id: i64) -> Player {
        Player { id, name: format!("User {}", id) }
    }

    fn participants(players: Vec<Player>) -> Arc<MockParticipants> {
        Arc::new(MockParticipants {
            players: HashMap::from([(9, players)]).into(),
            ..MockParticipants::default()
        })
    }

    async fn load(
        participants: Arc<MockParticipants>,
        session: MockSession,
    ) -> Result<ReservationDetail, PlayonError> {
        let bookings = MockBookings {
            bookings: vec![booking(9, Some((1, "Futsal")))],
            ..MockBookings::default()
        };
        ReservationDetail::load(9, &bookings, participants, Arc::new(session)).await
    }

    #[tokio::test]
    async fn test_cost_is_split_between_players() {
        let detail = load(participants(vec![player(1), player(2), player(3)]), MockSession::default())
            .await
            .unwrap();
        assert_eq!(detail.booking().id, Some(9));
        assert_eq!(detail.players().len(), 3);
        assert!((detail.cost_per_player() - 40.0).abs() < f64::EPSILON);
        assert!(detail.is_participant(&user(2)));
        assert!(!detail.is_participant(&user(4)));
    }

    #[tokio::test]
    async fn test_cost_without_players_is_zero() {
        let detail = load(participants(Vec::new()), MockSession::default()).await.unwrap();
        assert_eq!(detail.cost_per_player(), 0.0);
    }

    #[tokio::test]
    async fn test_has_ended() {
        let detail = load(participants(Vec::new()), MockSession::default()).await.unwrap();
        let day = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        assert!(!detail.has_ended(day.and_hms_opt(19, 0, 0).unwrap()));
        assert!(!detail.has_ended(day.and_hms_opt(20, 0, 0).unwrap()));
        assert!(detail.has_ended(day.and_hms_opt(20, 0, 1).unwrap()));
    }

    #[tokio::test]
    async fn test_missing_reservation_fails() {
        let bookings = MockBookings::default();
        let result = ReservationDetail::load(
            5,
            &bookings,
            participants(Vec::new()),
            Arc::new(MockSession::default()),
        )
        .await;
        assert!(matches!(result, Err(PlayonError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_join_and_leave_reload_players() {
        let service = participants(vec![player(1)]);
        let session = MockSession { user: Some(user(7)) };
        let mut detail = load(service.clone(), session).await.unwrap();
        assert_eq!(*service.player_reads.lock().unwrap(), 1);

        assert!(detail.join().await.unwrap());
        assert!(detail.is_participant(&user(7)));
        assert_eq!(*service.player_reads.lock().unwrap(), 2);

        detail.leave().await.unwrap();
        assert!(!detail.is_participant(&user(7)));
        assert_eq!(detail.players(), &[player(1)]);
        assert_eq!(*service.player_reads.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_rejected_join() {
        let service = Arc::new(MockParticipants {
            reject_joins: true,
            ..MockParticipants::default()
        });
        let mut detail = load(service, MockSession { user: Some(user(7)) }).await.unwrap();
        assert!(!detail.join().await.unwrap());
        assert!(!detail.is_participant(&user(7)));
    }

    #[tokio::test]
    async fn test_participation_requires_sign_in() {
        let service = participants(vec![player(1)]);
        let mut detail = load(service.clone(), MockSession::default()).await.unwrap();

        assert!(matches!(detail.join().await, Err(PlayonError::AuthError(_))));
        assert!(matches!(detail.leave().await, Err(PlayonError::AuthError(_))));
        // Nothing was sent or reloaded
        assert_eq!(*service.player_reads.lock().unwrap(), 1);
        assert_eq!(detail.players(), &[player(1)]);
    }
}
