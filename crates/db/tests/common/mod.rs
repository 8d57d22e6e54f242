use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Duration, TimeZone, Utc};
use pretty_assertions::{assert_eq, assert_ne};
use roombook_core::{
    errors::BookingError,
    models::reservation::{NewReservation, Reservation, ReservationPatch},
    repository::ReservationRepository,
};
use roombook_db::repositories::{generate_id, IdGenerator};
use tokio::sync::Barrier;

pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 8, 29, hour, minute, 0).unwrap()
}

pub fn booking(room_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> NewReservation {
    NewReservation {
        room_id: room_id.to_string(),
        start_time: start,
        end_time: end,
    }
}

// Keeps runs against a shared database independent of each other
pub fn unique_room() -> String {
    format!("room-{}", generate_id())
}

/// Hands out `taken` for the first two draws, then random ids.
pub fn colliding_ids(taken: String) -> IdGenerator {
    let draws = AtomicUsize::new(0);
    Arc::new(move || {
        if draws.fetch_add(1, Ordering::SeqCst) < 2 {
            taken.clone()
        } else {
            generate_id()
        }
    })
}

pub async fn end_to_end_lifecycle(repo: &dyn ReservationRepository) {
    let room = unique_room();

    let id = repo
        .create(booking(&room, at(13, 0), at(14, 0)))
        .await
        .expect("could not create reservation");
    assert!(!id.is_empty(), "expected a non-empty ID");

    let overlapping = repo.create(booking(&room, at(13, 30), at(14, 30))).await;
    assert!(matches!(overlapping, Err(BookingError::Conflict)));

    let stored = repo.get(&id).await.expect("failed to get reservation");
    assert_eq!(
        stored,
        Reservation {
            id: id.clone(),
            room_id: room.clone(),
            start_time: at(13, 0),
            end_time: at(14, 0),
        }
    );

    let patch = ReservationPatch {
        end_time: Some(at(15, 0)),
        ..ReservationPatch::default()
    };
    repo.update(&id, patch)
        .await
        .expect("failed to update reservation");

    let updated = repo.get(&id).await.expect("failed to get updated reservation");
    assert_eq!(updated.end_time, at(15, 0));
    assert_eq!(updated.start_time, at(13, 0));
    assert_eq!(updated.room_id, room);

    repo.delete(&id).await.expect("failed to delete reservation");

    let gone = repo.get(&id).await;
    assert!(matches!(gone, Err(BookingError::NotFound(_))));
}

pub async fn overlap_rules_on_create(repo: &dyn ReservationRepository) {
    let room = unique_room();
    let other_room = unique_room();

    repo.create(booking(&room, at(13, 0), at(14, 0)))
        .await
        .expect("first booking should succeed");

    for (start, end) in [
        (at(13, 30), at(14, 30)),
        (at(12, 30), at(13, 1)),
        (at(13, 15), at(13, 45)),
        (at(12, 0), at(15, 0)),
        (at(13, 0), at(14, 0)),
    ] {
        let result = repo.create(booking(&room, start, end)).await;
        assert!(
            matches!(result, Err(BookingError::Conflict)),
            "expected conflict for {start}..{end}, got {result:?}"
        );
    }

    repo.create(booking(&room, at(14, 0), at(15, 0)))
        .await
        .expect("back-to-back booking after should succeed");
    repo.create(booking(&room, at(12, 0), at(13, 0)))
        .await
        .expect("back-to-back booking before should succeed");
    repo.create(booking(&other_room, at(13, 30), at(14, 30)))
        .await
        .expect("same window on another room should succeed");

    let listed = repo.list(&room).await.expect("room has reservations");
    assert_eq!(listed.len(), 3);
}

pub async fn missing_ids_are_not_found(repo: &dyn ReservationRepository) {
    let missing = generate_id();

    assert!(matches!(
        repo.get(&missing).await,
        Err(BookingError::NotFound(id)) if id == missing
    ));
    assert!(matches!(
        repo.delete(&missing).await,
        Err(BookingError::NotFound(_))
    ));

    let patch = ReservationPatch {
        room_id: Some("2".to_string()),
        ..ReservationPatch::default()
    };
    assert!(matches!(
        repo.update(&missing, patch).await,
        Err(BookingError::NotFound(_))
    ));

    // Nothing to write, so nothing is looked up
    repo.update(&missing, ReservationPatch::default())
        .await
        .expect("empty patch is a no-op");
}

pub async fn list_reports_empty_rooms(repo: &dyn ReservationRepository) {
    let room = unique_room();

    assert!(matches!(
        repo.list(&room).await,
        Err(BookingError::NotFoundForRoom(r)) if r == room
    ));

    let first = repo
        .create(booking(&room, at(9, 0), at(10, 0)))
        .await
        .expect("create first");
    let second = repo
        .create(booking(&room, at(11, 0), at(12, 0)))
        .await
        .expect("create second");
    repo.create(booking(&unique_room(), at(9, 0), at(10, 0)))
        .await
        .expect("create elsewhere");

    let listed = repo.list(&room).await.expect("room has reservations");
    let ids: HashSet<String> = listed.iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids, HashSet::from([first.clone(), second.clone()]));
    assert!(listed.iter().all(|r| r.room_id == room));

    repo.delete(&first).await.expect("delete first");
    repo.delete(&second).await.expect("delete second");
    assert!(matches!(
        repo.list(&room).await,
        Err(BookingError::NotFoundForRoom(_))
    ));
}

pub async fn update_writes_only_present_fields(repo: &dyn ReservationRepository) {
    let room = unique_room();
    let moved_to = unique_room();
    let id = repo
        .create(booking(&room, at(13, 0), at(14, 0)))
        .await
        .expect("create");

    let patch = ReservationPatch {
        room_id: Some(moved_to.clone()),
        start_time: Some(at(8, 0)),
        end_time: None,
    };
    repo.update(&id, patch).await.expect("update");

    let updated = repo.get(&id).await.expect("get");
    assert_eq!(updated.room_id, moved_to);
    assert_eq!(updated.start_time, at(8, 0));
    assert_eq!(updated.end_time, at(14, 0));
}

pub async fn update_does_not_recheck_overlap(repo: &dyn ReservationRepository) {
    let room = unique_room();
    repo.create(booking(&room, at(13, 0), at(14, 0)))
        .await
        .expect("create first");
    let later = repo
        .create(booking(&room, at(15, 0), at(16, 0)))
        .await
        .expect("create second");

    let patch = ReservationPatch {
        start_time: Some(at(13, 30)),
        ..ReservationPatch::default()
    };
    repo.update(&later, patch)
        .await
        .expect("update is accepted even when it creates an overlap");

    let listed = repo.list(&room).await.expect("list");
    assert!(listed[0].overlaps(&listed[1]));
}

pub async fn update_does_not_recheck_ordering(repo: &dyn ReservationRepository) {
    let room = unique_room();
    let id = repo
        .create(booking(&room, at(13, 0), at(14, 0)))
        .await
        .expect("create");

    let patch = ReservationPatch {
        start_time: Some(at(16, 0)),
        ..ReservationPatch::default()
    };
    repo.update(&id, patch)
        .await
        .expect("update is accepted even when start ends up after end");

    let stored = repo.get(&id).await.expect("get");
    assert_eq!(stored.start_time, at(16, 0));
    assert_eq!(stored.end_time, at(14, 0));
}

/// Expects a store whose generator was built by `colliding_ids(taken)`.
pub async fn id_collisions_are_redrawn(repo: &dyn ReservationRepository, taken: &str) {
    let room = unique_room();

    let first = repo
        .create(booking(&room, at(9, 0), at(10, 0)))
        .await
        .expect("create first");
    assert_eq!(first, taken);

    let second = repo
        .create(booking(&room, at(11, 0), at(12, 0)))
        .await
        .expect("create with a taken id draws a fresh one");
    assert_ne!(second, first);

    assert_eq!(repo.get(&first).await.expect("get first").start_time, at(9, 0));
    assert_eq!(repo.get(&second).await.expect("get second").start_time, at(11, 0));
}

pub async fn racing_overlapping_creates(repo: Arc<dyn ReservationRepository>, contenders: usize) {
    let room = unique_room();
    let barrier = Arc::new(Barrier::new(contenders));

    let mut handles = Vec::with_capacity(contenders);
    for i in 0..contenders {
        let repo = Arc::clone(&repo);
        let barrier = Arc::clone(&barrier);
        let room = room.clone();
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            // Every window starts inside 13:00..13:30 and lasts an hour, so all pairs overlap
            let start = at(13, 0) + Duration::minutes((i % 30) as i64);
            repo.create(booking(&room, start, start + Duration::hours(1)))
                .await
        }));
    }

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.expect("create task panicked") {
            Ok(_) => created += 1,
            Err(BookingError::Conflict) => conflicts += 1,
            Err(other) => panic!("unexpected error from racing create: {other:?}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, contenders - 1);
    assert_eq!(repo.list(&room).await.expect("list").len(), 1);
}
