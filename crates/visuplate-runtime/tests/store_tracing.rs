//! Structured log events emitted by the store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use visuplate_catalog::{Catalog, ItemId, RawItem};
use visuplate_i18n::{LanguageDictionary, LanguageEntry};
use visuplate_runtime::{ManualTimers, MenuConfig, MenuStore, Msg};
use web_time::Duration;

// ── Capture infrastructure ───────────────────────────────────────────

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    target: String,
    fields: HashMap<String, String>,
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

fn with_captured_events<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: Arc::clone(&events),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn store() -> MenuStore {
    let raw = vec![RawItem {
        id: Some("soup".into()),
        name: "Tomato Soup".into(),
        category: Some("Starters".into()),
        ..Default::default()
    }];
    let mut dictionary = LanguageDictionary::new();
    dictionary.insert("en", LanguageEntry::new("English"));
    dictionary.insert("hi", LanguageEntry::new("हिन्दी"));
    MenuStore::new(
        Catalog::from_raw(&raw).unwrap(),
        dictionary,
        &MenuConfig::default(),
    )
    .unwrap()
}

fn store_events(events: &[CapturedEvent]) -> Vec<&CapturedEvent> {
    events
        .iter()
        .filter(|e| e.target == "visuplate.store")
        .collect()
}

// ═════════════════════════════════════════════════════════════════════════

#[test]
fn every_message_is_logged_at_debug() {
    let events = with_captured_events(|| {
        let mut store = store();
        let mut timers = ManualTimers::<Msg>::new();
        store.update(Msg::Dismiss, &mut timers).unwrap();
        store.update(Msg::ClearAllFilters, &mut timers).unwrap();
    });
    let kinds: Vec<&str> = store_events(&events)
        .into_iter()
        .filter(|e| e.level == tracing::Level::DEBUG)
        .filter_map(|e| e.fields.get("msg").map(String::as_str))
        .collect();
    assert_eq!(kinds, vec!["dismiss", "clear_all_filters"]);
}

#[test]
fn rejected_message_is_logged_at_warn() {
    let events = with_captured_events(|| {
        let mut store = store();
        let mut timers = ManualTimers::<Msg>::new();
        assert!(store.update(Msg::View(ItemId::new("ghost")), &mut timers).is_err());
    });
    let warnings: Vec<&CapturedEvent> = store_events(&events)
        .into_iter()
        .filter(|e| e.level == tracing::Level::WARN)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].fields.get("msg").map(String::as_str), Some("view"));
    assert!(warnings[0].fields["error"].contains("ghost"));
}

#[test]
fn language_switch_and_settle_logged_at_info() {
    let events = with_captured_events(|| {
        let mut store = store();
        let mut timers = ManualTimers::<Msg>::new();
        store
            .update(Msg::RequestLanguage("hi".into()), &mut timers)
            .unwrap();
        for msg in timers.advance(Duration::from_millis(300)) {
            store.update(msg, &mut timers).unwrap();
        }
    });
    let info: Vec<&str> = store_events(&events)
        .into_iter()
        .filter(|e| e.level == tracing::Level::INFO)
        .filter_map(|e| e.fields.get("message").map(String::as_str))
        .collect();
    assert!(info.contains(&"language switch requested"), "{info:?}");
    assert!(info.contains(&"language switch settled"), "{info:?}");
}
