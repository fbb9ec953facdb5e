// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::create_test_persistence;
use crate::Persistence;
use stripboard_domain::{AirportInfo, EventSettings, Mode, SettingsPatch};

#[test]
fn test_unwritten_settings_read_as_defaults() {
    let mut persistence: Persistence = create_test_persistence();

    let settings: EventSettings = persistence.get_event_settings().expect("read succeeds");

    assert_eq!(settings, EventSettings::default());
}

#[test]
fn test_first_upsert_seeds_defaults_overlaid_with_patch() {
    let mut persistence: Persistence = create_test_persistence();

    let patch: SettingsPatch = SettingsPatch {
        is_event_live: Some(true),
        ..SettingsPatch::default()
    };
    let merged: EventSettings = persistence
        .update_event_settings(&patch)
        .expect("upsert succeeds");

    assert!(merged.is_event_live);
    assert_eq!(merged.airport_mode, Mode::Custom);

    let stored: EventSettings = persistence.get_event_settings().expect("read succeeds");
    assert_eq!(stored, merged);
}

#[test]
fn test_later_patches_preserve_untouched_fields() {
    let mut persistence: Persistence = create_test_persistence();

    persistence
        .update_event_settings(&SettingsPatch {
            is_event_live: Some(true),
            route_mode: Some(Mode::Fixed {
                value: String::from("DCT MERIT DCT"),
            }),
            ..SettingsPatch::default()
        })
        .expect("first upsert succeeds");

    persistence
        .update_event_settings(&SettingsPatch {
            active_airports: Some(vec![String::from("kjfk"), String::from("egll")]),
            ..SettingsPatch::default()
        })
        .expect("second upsert succeeds");

    let stored: EventSettings = persistence.get_event_settings().expect("read succeeds");

    // Fields from the first patch survive the second.
    assert!(stored.is_event_live);
    assert_eq!(stored.route_mode.fixed_value(), Some("DCT MERIT DCT"));
    // The second patch's replacement set is normalized to uppercase.
    assert_eq!(stored.active_airports, vec!["KJFK", "EGLL"]);
}

#[test]
fn test_mode_pairs_round_trip_through_storage() {
    let mut persistence: Persistence = create_test_persistence();

    persistence
        .update_event_settings(&SettingsPatch {
            airport_mode: Some(Mode::Fixed {
                value: String::from("KJFK"),
            }),
            time_mode: Some(Mode::Fixed {
                value: String::from("1830Z"),
            }),
            ..SettingsPatch::default()
        })
        .expect("upsert succeeds");

    let stored: EventSettings = persistence.get_event_settings().expect("read succeeds");

    assert_eq!(
        stored.airport_mode,
        Mode::Fixed {
            value: String::from("KJFK")
        }
    );
    assert_eq!(
        stored.time_mode,
        Mode::Fixed {
            value: String::from("1830Z")
        }
    );
    assert_eq!(stored.departure_mode, Mode::Custom);
}

#[test]
fn test_mode_can_be_reverted_to_custom() {
    let mut persistence: Persistence = create_test_persistence();

    persistence
        .update_event_settings(&SettingsPatch {
            airport_mode: Some(Mode::Fixed {
                value: String::from("KJFK"),
            }),
            ..SettingsPatch::default()
        })
        .expect("upsert succeeds");
    persistence
        .update_event_settings(&SettingsPatch {
            airport_mode: Some(Mode::Custom),
            ..SettingsPatch::default()
        })
        .expect("upsert succeeds");

    let stored: EventSettings = persistence.get_event_settings().expect("read succeeds");
    assert_eq!(stored.airport_mode, Mode::Custom);
}

#[test]
fn test_airport_data_round_trips() {
    let mut persistence: Persistence = create_test_persistence();

    let data: Vec<AirportInfo> = vec![
        AirportInfo {
            id: String::from("KJFK"),
            name: String::from("John F. Kennedy Intl"),
        },
        AirportInfo {
            id: String::from("EGLL"),
            name: String::from("London Heathrow"),
        },
    ];
    persistence
        .update_event_settings(&SettingsPatch {
            airport_data: Some(data.clone()),
            ..SettingsPatch::default()
        })
        .expect("upsert succeeds");

    let stored: EventSettings = persistence.get_event_settings().expect("read succeeds");
    assert_eq!(stored.airport_data, data);
}
