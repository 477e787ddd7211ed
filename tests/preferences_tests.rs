// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finchronicle::constants::APP_VERSION;
use finchronicle::error::ValidationError;
use finchronicle::preferences::{Preferences, VersionCheck};
use finchronicle::storage::{KeyValueBackend, MemoryBackend, Storage};
use finchronicle::store::Store;
use std::rc::Rc;

fn setup() -> (Preferences, Store, Rc<MemoryBackend>) {
    let backend = Rc::new(MemoryBackend::new());
    let store = Store::new();
    let prefs = Preferences::new(Storage::new(backend.clone()), store.clone());
    (prefs, store, backend)
}

#[test]
fn currency_defaults_to_rupees() {
    let (prefs, store, _) = setup();
    let c = prefs.init_currency();
    assert_eq!(c.code, "INR");
    assert_eq!(c.symbol, "₹");
    assert_eq!(store.currency(), "INR");
}

#[test]
fn saved_currency_is_restored() {
    let (prefs, store, backend) = setup();
    backend.set("currency", "EUR").unwrap();
    assert_eq!(prefs.init_currency().code, "EUR");
    assert_eq!(store.currency(), "EUR");
}

#[test]
fn unknown_saved_currency_falls_back() {
    let (prefs, store, backend) = setup();
    backend.set("currency", "XYZ").unwrap();
    assert_eq!(prefs.init_currency().code, "INR");
    assert_eq!(store.currency(), "INR");
}

#[test]
fn selecting_a_currency_persists_it() {
    let (prefs, store, backend) = setup();
    let c = prefs.select_currency("JPY").unwrap();
    assert_eq!(c.name, "Japanese Yen");
    assert_eq!(store.currency(), "JPY");
    assert_eq!(backend.raw("currency").as_deref(), Some("JPY"));
    assert_eq!(prefs.currency().symbol, "¥");
}

#[test]
fn selecting_an_unknown_currency_is_rejected() {
    let (prefs, store, backend) = setup();
    let err = prefs.select_currency("ABC").unwrap_err();
    assert_eq!(err, ValidationError::UnknownCurrency("ABC".into()));
    assert_eq!(store.currency(), "INR");
    assert!(backend.raw("currency").is_none());
}

#[test]
fn dark_mode_round_trips_through_storage() {
    let (prefs, store, backend) = setup();
    assert!(!prefs.init_dark_mode());

    assert!(prefs.toggle_dark_mode());
    assert!(store.dark_mode());
    assert_eq!(backend.raw("darkMode").as_deref(), Some("enabled"));

    assert!(!prefs.toggle_dark_mode());
    assert_eq!(backend.raw("darkMode").as_deref(), Some("disabled"));

    backend.set("darkMode", "enabled").unwrap();
    assert!(prefs.init_dark_mode());
    assert!(store.dark_mode());
}

#[test]
fn version_check_detects_first_install_update_and_current() {
    let (prefs, _, backend) = setup();
    assert_eq!(prefs.check_app_version(), VersionCheck::FirstInstall);
    assert_eq!(backend.raw("app_version").as_deref(), Some(APP_VERSION));

    assert_eq!(prefs.check_app_version(), VersionCheck::Current);

    backend.set("app_version", "3.1.0").unwrap();
    assert_eq!(
        prefs.check_app_version(),
        VersionCheck::Updated {
            from: "3.1.0".into(),
            to: APP_VERSION.into(),
        }
    );
    assert_eq!(backend.raw("app_version").as_deref(), Some(APP_VERSION));
}

#[test]
fn empty_stored_version_counts_as_first_install() {
    let (prefs, _, backend) = setup();
    backend.set("app_version", "").unwrap();
    assert_eq!(prefs.check_app_version(), VersionCheck::FirstInstall);
}

#[test]
fn update_banner_flag_lives_only_in_the_store() {
    let (prefs, store, backend) = setup();
    prefs.mark_update_available();
    assert!(store.snapshot().update_available);
    prefs.dismiss_update();
    assert!(!store.snapshot().update_available);
    assert!(backend.is_empty());
}

#[test]
fn install_prompt_can_be_hidden() {
    let (prefs, _, backend) = setup();
    assert!(!prefs.install_prompt_hidden());
    prefs.hide_install_prompt();
    assert!(prefs.install_prompt_hidden());
    assert_eq!(backend.raw("installPromptHidden").as_deref(), Some("true"));
}
