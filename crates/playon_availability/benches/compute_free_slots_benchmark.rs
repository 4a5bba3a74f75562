use criterion::{black_box, criterion_group, criterion_main, Criterion};
use playon_availability::{compute_free_slots, BookingWindow, OperatingHours, Selection, Slot};

// Helper function to create back-to-back one-hour bookings with gaps
fn create_bookings(count: u8) -> Vec<BookingWindow> {
    (0..count)
        .map(|i| {
            let start = (i % 12) * 2;
            BookingWindow::new(start, start + 1)
        })
        .collect()
}

fn benchmark_compute_free_slots(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_free_slots");
    let hours = OperatingHours::default();

    let none = create_bookings(0);
    group.bench_function("no_bookings", |b| {
        b.iter(|| compute_free_slots(black_box(hours), black_box(&none)))
    });

    let some = create_bookings(4);
    group.bench_function("few_bookings", |b| {
        b.iter(|| compute_free_slots(black_box(hours), black_box(&some)))
    });

    // The API occasionally returns every booking of the gym, not just the court
    let many = create_bookings(200);
    group.bench_function("many_bookings", |b| {
        b.iter(|| compute_free_slots(black_box(hours), black_box(&many)))
    });

    group.finish();
}

fn benchmark_selection_toggle(c: &mut Criterion) {
    let free = compute_free_slots(OperatingHours::default(), &[]);
    c.bench_function("select_full_day", |b| {
        b.iter(|| {
            let mut selection = Selection::new();
            for slot in free.iter().copied() {
                let _ = selection.toggle(black_box(slot), &free);
            }
            selection.first().map(Slot::hour)
        })
    });
}

criterion_group!(benches, benchmark_compute_free_slots, benchmark_selection_toggle);
criterion_main!(benches);
