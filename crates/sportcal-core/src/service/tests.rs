//! Service tests against [`MemoryStore`].

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone as _, Utc};

use super::Calendar;
use crate::{
  EntityKind, Error, ErrorKind,
  event::{ListEvents, NewEvent, UpdateEvent},
  memory::MemoryStore,
  pagination::PaginationDefaults,
  sport::{NewSport, UpdateSport},
  team::{NewTeam, UpdateTeam},
  venue::{NewVenue, UpdateVenue},
};

fn calendar() -> (Arc<MemoryStore>, Calendar<MemoryStore>) {
  let store = Arc::new(MemoryStore::new());
  let cal = Calendar::new(store.clone(), PaginationDefaults::default());
  (store, cal)
}

fn at(day: u32) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2100, 1, day, 18, 0, 0).unwrap()
}

struct Fixture {
  sport: i64,
  venue: i64,
  home:  i64,
  away:  i64,
}

async fn fixture(cal: &Calendar<MemoryStore>) -> Fixture {
  let sport = cal.sports.create(NewSport { name: "Basketball".into() }).await.unwrap();
  let venue = cal
    .venues
    .create(NewVenue {
      name:         "Staples Center".into(),
      city:         "Los Angeles".into(),
      country_code: "US".into(),
    })
    .await
    .unwrap();
  let home = cal
    .teams
    .create(NewTeam { name: "Lakers".into(), city: "Los Angeles".into(), sport_id: sport })
    .await
    .unwrap();
  let away = cal
    .teams
    .create(NewTeam { name: "Celtics".into(), city: "Boston".into(), sport_id: sport })
    .await
    .unwrap();
  Fixture { sport, venue, home, away }
}

fn new_event(f: &Fixture, when: DateTime<Utc>) -> NewEvent {
  NewEvent {
    event_datetime: when,
    description:    Some("Season opener".into()),
    sport_id:       f.sport,
    venue_id:       Some(f.venue),
    home_team_id:   f.home,
    away_team_id:   f.away,
  }
}

// ─── Validation short-circuits ──────────────────────────────────────────────

#[tokio::test]
async fn invalid_input_never_reaches_the_store() {
  let (store, cal) = calendar();

  let err = cal.sports.create(NewSport { name: "XY".into() }).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Validation);
  assert_eq!(store.calls("create_sport"), 0);

  let err = cal
    .venues
    .create(NewVenue {
      name:         "Wembley".into(),
      city:         "London".into(),
      country_code: "GBR".into(),
    })
    .await
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Validation);
  assert_eq!(store.calls("create_venue"), 0);

  let err = cal
    .teams
    .create(NewTeam { name: "Ab".into(), city: "Boston".into(), sport_id: 1 })
    .await
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Validation);
  assert_eq!(store.calls("create_team"), 0);

  let err = cal.sports.update(1, UpdateSport { name: Some("X".into()) }).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Validation);
  assert_eq!(store.calls("get_sport"), 0);
}

#[tokio::test]
async fn past_event_is_rejected() {
  let (store, cal) = calendar();
  let f = fixture(&cal).await;

  let err = cal
    .events
    .create(new_event(&f, Utc::now() - Duration::minutes(1)))
    .await
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Validation);
  assert_eq!(store.calls("create_event"), 0);
}

#[tokio::test]
async fn same_home_and_away_team_is_rejected() {
  let (store, cal) = calendar();
  let f = fixture(&cal).await;

  let mut input = new_event(&f, at(1));
  input.away_team_id = f.home;
  let err = cal.events.create(input).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Validation);
  assert_eq!(store.calls("create_event"), 0);
}

#[tokio::test]
async fn dangling_reference_on_create_is_a_store_error() {
  let (_store, cal) = calendar();
  let f = fixture(&cal).await;

  let mut input = new_event(&f, at(1));
  input.sport_id = 999;
  let err = cal.events.create(input).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Store);
}

// ─── Referential guard ───────────────────────────────────────────────────────

#[tokio::test]
async fn referenced_entities_cannot_be_deleted() {
  let (store, cal) = calendar();
  let f = fixture(&cal).await;
  cal.events.create(new_event(&f, at(1))).await.unwrap();
  cal.events.create(new_event(&f, at(2))).await.unwrap();

  let err = cal.sports.delete(f.sport).await.unwrap_err();
  assert!(matches!(err, Error::Conflict { kind: EntityKind::Sport, count: 2 }));
  assert_eq!(
    err.to_string(),
    "cannot delete sport: it is currently used by 2 events"
  );
  assert_eq!(store.calls("delete_sport"), 0);

  let err = cal.venues.delete(f.venue).await.unwrap_err();
  assert!(matches!(err, Error::Conflict { kind: EntityKind::Venue, count: 2 }));
  assert_eq!(store.calls("delete_venue"), 0);

  let err = cal.teams.delete(f.away).await.unwrap_err();
  assert!(matches!(err, Error::Conflict { kind: EntityKind::Team, count: 2 }));
  assert_eq!(store.calls("delete_team"), 0);
}

#[tokio::test]
async fn unreferenced_entities_are_deleted_once() {
  let (store, cal) = calendar();
  let f = fixture(&cal).await;

  cal.venues.delete(f.venue).await.unwrap();
  assert_eq!(store.calls("delete_venue"), 1);

  cal.teams.delete(f.home).await.unwrap();
  cal.teams.delete(f.away).await.unwrap();
  assert_eq!(store.calls("delete_team"), 2);

  cal.sports.delete(f.sport).await.unwrap();
  assert_eq!(store.calls("delete_sport"), 1);

  let err = cal.sports.get(f.sport).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn deleting_a_missing_entity_is_not_found() {
  let (_store, cal) = calendar();
  let err = cal.sports.delete(42).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { kind: EntityKind::Sport, id: 42 }));
  let err = cal.events.delete(42).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { kind: EntityKind::Event, id: 42 }));
}

// ─── Partial updates ─────────────────────────────────────────────────────────

#[tokio::test]
async fn description_only_update_leaves_the_rest() {
  let (_store, cal) = calendar();
  let f = fixture(&cal).await;
  let id = cal.events.create(new_event(&f, at(3))).await.unwrap();
  let before = cal.events.get(id).await.unwrap();

  let patch = UpdateEvent { description: Some("Rescheduled".into()), ..Default::default() };
  let after = cal.events.update(id, patch).await.unwrap();

  assert_eq!(after.description.as_deref(), Some("Rescheduled"));
  assert_eq!(after.event_datetime, before.event_datetime);
  assert_eq!(after.home_score, before.home_score);
  assert_eq!(after.away_score, before.away_score);
  assert_eq!(after.sport, before.sport);
  assert_eq!(after.venue, before.venue);
  assert_eq!(after.home_team, before.home_team);
  assert_eq!(after.away_team, before.away_team);
  assert_eq!(cal.events.get(id).await.unwrap(), after);
}

#[tokio::test]
async fn event_times_are_kept_to_the_microsecond() {
  let (_store, cal) = calendar();
  let f = fixture(&cal).await;
  let id = cal
    .events
    .create(new_event(&f, at(3) + Duration::nanoseconds(1_999)))
    .await
    .unwrap();
  assert_eq!(
    cal.events.get(id).await.unwrap().event_datetime,
    at(3) + Duration::microseconds(1)
  );

  let patch = UpdateEvent {
    event_datetime: Some(at(4) + Duration::nanoseconds(123)),
    ..Default::default()
  };
  let after = cal.events.update(id, patch).await.unwrap();
  assert_eq!(after.event_datetime, at(4));
  assert_eq!(cal.events.get(id).await.unwrap(), after);
}

#[tokio::test]
async fn scores_and_references_are_overwritten() {
  let (_store, cal) = calendar();
  let f = fixture(&cal).await;
  let mut input = new_event(&f, at(3));
  input.venue_id = None;
  let id = cal.events.create(input).await.unwrap();
  assert!(cal.events.get(id).await.unwrap().venue.is_none());

  let patch = UpdateEvent {
    home_score:   Some(101),
    away_score:   Some(99),
    venue_id:     Some(f.venue),
    home_team_id: Some(f.away),
    away_team_id: Some(f.home),
    ..Default::default()
  };
  let event = cal.events.update(id, patch).await.unwrap();
  assert_eq!(event.home_score, Some(101));
  assert_eq!(event.away_score, Some(99));
  assert_eq!(event.venue.map(|v| v.id), Some(f.venue));
  assert_eq!(event.home_team.id, f.away);
  assert_eq!(event.away_team.id, f.home);
}

#[tokio::test]
async fn unknown_reference_fails_update_without_writing() {
  let (store, cal) = calendar();
  let f = fixture(&cal).await;
  let id = cal.events.create(new_event(&f, at(3))).await.unwrap();

  let patch = UpdateEvent { sport_id: Some(777), ..Default::default() };
  let err = cal.events.update(id, patch).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Validation);
  assert_eq!(err.to_string(), "sport with id 777 not found");

  let patch = UpdateEvent {
    description:  Some("never stored".into()),
    home_team_id: Some(888),
    ..Default::default()
  };
  let err = cal.events.update(id, patch).await.unwrap_err();
  assert_eq!(err.to_string(), "team with id 888 not found");

  assert_eq!(store.calls("update_event"), 0);
  let event = cal.events.get(id).await.unwrap();
  assert_eq!(event.description.as_deref(), Some("Season opener"));
}

#[tokio::test]
async fn updating_a_missing_event_is_not_found() {
  let (_store, cal) = calendar();
  let err = cal.events.update(5, UpdateEvent::default()).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn venue_and_team_partial_updates() {
  let (_store, cal) = calendar();
  let f = fixture(&cal).await;

  let venue = cal
    .venues
    .update(f.venue, UpdateVenue { city: Some("Inglewood".into()), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(venue.name, "Staples Center");
  assert_eq!(venue.city, "Inglewood");
  assert_eq!(venue.country_code, "US");

  let team = cal
    .teams
    .update(f.home, UpdateTeam { name: Some("LA Lakers".into()), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(team.name, "LA Lakers");
  assert_eq!(team.city, "Los Angeles");
  assert_eq!(team.sport_id, f.sport);

  let err = cal
    .teams
    .update(f.home, UpdateTeam { sport_id: Some(404), ..Default::default() })
    .await
    .unwrap_err();
  assert_eq!(err.to_string(), "sport with id 404 not found");
}

// ─── Listing ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_listing_skips_the_list_query() {
  let (store, cal) = calendar();
  let page = cal
    .events
    .list(ListEvents { page: Some(3), limit: Some(5), ..Default::default() })
    .await
    .unwrap();

  assert!(page.events.is_empty());
  assert_eq!(page.pagination.total_items, 0);
  assert_eq!(page.pagination.total_pages, 0);
  assert_eq!(page.pagination.current_page, 3);
  assert_eq!(page.pagination.page_size, 5);
  assert_eq!(store.calls("count_events"), 1);
  assert_eq!(store.calls("list_events"), 0);
}

#[tokio::test]
async fn listing_pages_through_events_in_time_order() {
  let (_store, cal) = calendar();
  let f = fixture(&cal).await;
  // Insert out of order to exercise the sort.
  for day in (1..=25).rev() {
    cal.events.create(new_event(&f, at(day))).await.unwrap();
  }

  let page = cal
    .events
    .list(ListEvents { page: Some(3), limit: Some(10), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(page.pagination.total_items, 25);
  assert_eq!(page.pagination.total_pages, 3);
  assert_eq!(page.events.len(), 5);
  assert_eq!(page.events[0].event_datetime, at(21));

  let first = cal.events.list(ListEvents::default()).await.unwrap();
  assert_eq!(first.pagination.current_page, 1);
  assert_eq!(first.pagination.page_size, 10);
  let times: Vec<_> = first.events.iter().map(|e| e.event_datetime).collect();
  assert_eq!(times, (1..=10).map(at).collect::<Vec<_>>());
}

#[tokio::test]
async fn listing_filters_by_sport_and_start_date() {
  let (_store, cal) = calendar();
  let f = fixture(&cal).await;
  let other_sport = cal.sports.create(NewSport { name: "Hockey".into() }).await.unwrap();
  let h1 = cal
    .teams
    .create(NewTeam { name: "Kings".into(), city: "Los Angeles".into(), sport_id: other_sport })
    .await
    .unwrap();
  let h2 = cal
    .teams
    .create(NewTeam { name: "Bruins".into(), city: "Boston".into(), sport_id: other_sport })
    .await
    .unwrap();

  for day in 1..=4 {
    cal.events.create(new_event(&f, at(day))).await.unwrap();
  }
  cal
    .events
    .create(NewEvent {
      event_datetime: at(5),
      description:    None,
      sport_id:       other_sport,
      venue_id:       None,
      home_team_id:   h1,
      away_team_id:   h2,
    })
    .await
    .unwrap();

  let page = cal
    .events
    .list(ListEvents { sport_id: Some(f.sport), date_from: Some(at(3)), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(page.pagination.total_items, 2);
  assert!(page.events.iter().all(|e| e.sport.id == f.sport));
  assert_eq!(page.events[0].event_datetime, at(3));

  let page = cal
    .events
    .list(ListEvents { sport_id: Some(other_sport), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(page.pagination.total_items, 1);
  assert!(page.events[0].venue.is_none());
}

// ─── Aggregate ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn event_embeds_the_referenced_rows() {
  let (_store, cal) = calendar();
  let f = fixture(&cal).await;
  let id = cal.events.create(new_event(&f, at(7))).await.unwrap();

  let event = cal.events.get(id).await.unwrap();
  assert_eq!(event.sport, cal.sports.get(f.sport).await.unwrap());
  assert_eq!(event.venue, Some(cal.venues.get(f.venue).await.unwrap()));
  assert_eq!(event.home_team, cal.teams.get(f.home).await.unwrap());
  assert_eq!(event.away_team, cal.teams.get(f.away).await.unwrap());

  cal.events.delete(id).await.unwrap();
  assert_eq!(cal.events.get(id).await.unwrap_err().kind(), ErrorKind::NotFound);
}
