#[cfg(test)]
mod tests {
    use crate::logic::*;
    use proptest::prelude::*;

    // Operating hours with open < close <= 24
    fn operating_hours() -> impl Strategy<Value = OperatingHours> {
        (0u8..24)
            .prop_flat_map(|open| (Just(open), open + 1..=24))
            .prop_map(|(open, close)| OperatingHours::new(open, close).unwrap())
    }

    // Any window, including inverted and out-of-day ones as the API may send
    fn booking_windows() -> impl Strategy<Value = Vec<BookingWindow>> {
        prop::collection::vec((0u8..30, 0u8..30), 0..8)
            .prop_map(|pairs| pairs.into_iter().map(|(s, e)| BookingWindow::new(s, e)).collect())
    }

    proptest! {
        // Free slots lie inside operating hours, ascending, without duplicates
        #[test]
        fn test_free_slots_sorted_within_hours(
            hours in operating_hours(),
            bookings in booking_windows(),
        ) {
            let free = compute_free_slots(hours, &bookings);
            for slot in &free {
                prop_assert!(slot.hour() >= hours.open() && slot.hour() < hours.close());
            }
            for pair in free.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
        }

        // No slot is both reserved and free, and every unreserved slot is free
        #[test]
        fn test_free_is_complement_of_reserved(
            hours in operating_hours(),
            bookings in booking_windows(),
        ) {
            let free = compute_free_slots(hours, &bookings);
            for slot in hours.slots() {
                let reserved = bookings.iter().any(|b| b.covers(slot));
                prop_assert_eq!(free.contains(&slot), !reserved);
            }
        }

        // Same inputs, same free slots
        #[test]
        fn test_free_slots_idempotent(
            hours in operating_hours(),
            bookings in booking_windows(),
        ) {
            let first = compute_free_slots(hours, &bookings);
            let second = compute_free_slots(hours, &bookings);
            prop_assert_eq!(first, second);
        }

        // Whatever sequence of toggles is attempted, the selection stays a
        // contiguous run of free slots and converts to a matching range
        #[test]
        fn test_toggles_keep_selection_contiguous(
            hours in operating_hours(),
            bookings in booking_windows(),
            attempts in prop::collection::vec(0u8..24, 0..30),
        ) {
            let free = compute_free_slots(hours, &bookings);
            let mut selection = Selection::new();
            for hour in attempts {
                let Some(slot) = Slot::new(hour) else { continue };
                let before = selection.clone();
                if selection.toggle(slot, &free).is_err() {
                    prop_assert_eq!(&selection, &before);
                }
                prop_assert!(selection.is_contiguous());
                prop_assert!(selection.iter().all(|s| free.contains(&s)));
            }

            if let Ok(range) = to_booking_range(&selection) {
                prop_assert_eq!(range.hours() as usize, selection.len());
                prop_assert_eq!(Some(range.start_hour), selection.first().map(Slot::hour));
                prop_assert!(selection.iter().all(|s| range.contains(s)));
            } else {
                prop_assert!(selection.is_empty());
            }
        }
    }
}
