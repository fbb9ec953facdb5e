// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AirportInfo, EventSettings, Mode, SettingsPatch};

#[test]
fn test_defaults_are_not_live_with_all_custom_modes() {
    let settings: EventSettings = EventSettings::default();

    assert!(!settings.is_event_live);
    assert_eq!(settings.airport_mode, Mode::Custom);
    assert_eq!(settings.departure_mode, Mode::Custom);
    assert_eq!(settings.arrival_mode, Mode::Custom);
    assert_eq!(settings.time_mode, Mode::Custom);
    assert_eq!(settings.route_mode, Mode::Custom);
    assert!(settings.active_airports.is_empty());
    assert!(settings.airport_data.is_empty());
}

#[test]
fn test_mode_round_trips_through_column_pair() {
    let fixed: Mode = Mode::Fixed {
        value: String::from("KJFK"),
    };
    let (mode, value) = fixed.to_parts();
    assert_eq!(mode, "FIXED");
    assert_eq!(value, "KJFK");
    assert_eq!(Mode::from_parts(mode, &value).expect("parses"), fixed);

    let (mode, value) = Mode::Custom.to_parts();
    assert_eq!(mode, "CUSTOM");
    assert_eq!(value, "");
    assert_eq!(Mode::from_parts(mode, &value).expect("parses"), Mode::Custom);
}

#[test]
fn test_mode_from_parts_rejects_unknown_discriminant() {
    assert!(Mode::from_parts("LOCKED", "KJFK").is_err());
}

#[test]
fn test_fixed_value_accessor() {
    let fixed: Mode = Mode::Fixed {
        value: String::from("1830Z"),
    };
    assert_eq!(fixed.fixed_value(), Some("1830Z"));
    assert_eq!(Mode::Custom.fixed_value(), None);
}

#[test]
fn test_patch_applies_only_present_fields() {
    let patch: SettingsPatch = SettingsPatch {
        is_event_live: Some(true),
        departure_mode: Some(Mode::Fixed {
            value: String::from("KJFK"),
        }),
        ..SettingsPatch::default()
    };

    let merged: EventSettings = patch.apply(EventSettings::default());

    assert!(merged.is_event_live);
    assert_eq!(
        merged.departure_mode,
        Mode::Fixed {
            value: String::from("KJFK")
        }
    );
    // Untouched fields keep their previous values.
    assert_eq!(merged.airport_mode, Mode::Custom);
    assert!(merged.active_airports.is_empty());
}

#[test]
fn test_patch_normalizes_replacement_airports() {
    let patch: SettingsPatch = SettingsPatch {
        active_airports: Some(vec![String::from("kjfk"), String::from(" egll")]),
        ..SettingsPatch::default()
    };

    let merged: EventSettings = patch.apply(EventSettings::default());

    assert_eq!(merged.active_airports, vec!["KJFK", "EGLL"]);
}

#[test]
fn test_patch_replaces_airport_data_wholesale() {
    let initial: EventSettings = SettingsPatch {
        airport_data: Some(vec![AirportInfo {
            id: String::from("KJFK"),
            name: String::from("Kennedy"),
        }]),
        ..SettingsPatch::default()
    }
    .apply(EventSettings::default());

    let replaced: EventSettings = SettingsPatch {
        airport_data: Some(vec![AirportInfo {
            id: String::from("EGLL"),
            name: String::from("Heathrow"),
        }]),
        ..SettingsPatch::default()
    }
    .apply(initial);

    assert_eq!(replaced.airport_data.len(), 1);
    assert_eq!(replaced.airport_data[0].id, "EGLL");
}

#[test]
fn test_empty_patch_is_detected() {
    assert!(SettingsPatch::default().is_empty());
    assert!(
        !SettingsPatch {
            is_event_live: Some(false),
            ..SettingsPatch::default()
        }
        .is_empty()
    );
}
