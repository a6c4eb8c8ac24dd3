//! Text and JSON renderings of the store.

use std::fmt::Write as _;

use clap::ValueEnum;
use serde_json::{Value, json};
use visuplate::runtime::{FEATURED_LABEL, Media};
use visuplate::{DetailMode, MenuStore, SelectionState, StringKey, VisibilityWatcher};

/// Output format for state dumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

fn label<W: VisibilityWatcher>(store: &MenuStore<W>, key: StringKey) -> &str {
    store
        .strings()
        .map_or(key.fallback(), |strings| strings.lookup(key))
}

fn mode_name(mode: DetailMode) -> &'static str {
    match mode {
        DetailMode::Image => "image",
        DetailMode::Model => "3d",
    }
}

// ---------------------------------------------------------------------------
// Compact state
// ---------------------------------------------------------------------------

/// One-line summary printed after every command.
#[must_use]
pub fn state_line<W: VisibilityWatcher>(store: &MenuStore<W>) -> String {
    let mut line = String::new();
    let language = store.language();
    let _ = write!(line, "lang={}", language.active());
    if language.is_transitioning() {
        let _ = write!(line, " (from {})", language.settled());
    }

    let filters = store.filters();
    let visible = store.visible_items();
    let _ = write!(
        line,
        " | query={:?} category={} diet={} | {}/{}:",
        filters.query,
        filters.category,
        filters.diet,
        visible.len(),
        store.catalog().len()
    );
    for item in &visible {
        let _ = write!(line, " {}", item.id());
        if item.is_featured() {
            line.push('*');
        }
    }

    match store.selection() {
        SelectionState::Closed => line.push_str(" | detail=closed"),
        SelectionState::Detail { item, mode } => {
            let _ = write!(line, " | detail={item}:{}", mode_name(*mode));
        }
    }
    line
}

/// The compact state as a JSON object.
#[must_use]
pub fn state_json<W: VisibilityWatcher>(store: &MenuStore<W>) -> Value {
    let filters = store.filters();
    let visible: Vec<&str> = store
        .visible_items()
        .into_iter()
        .map(|item| item.id().as_str())
        .collect();
    let detail = match store.selection() {
        SelectionState::Closed => Value::Null,
        SelectionState::Detail { item, mode } => json!({
            "item": item.as_str(),
            "mode": mode_name(*mode),
        }),
    };
    json!({
        "language": store.active_language(),
        "settled_language": store.language().settled(),
        "transitioning": store.is_transitioning(),
        "query": filters.query,
        "category": filters.category.label(),
        "diet": filters.diet.label(),
        "visible": visible,
        "total": store.catalog().len(),
        "detail": detail,
    })
}

// ---------------------------------------------------------------------------
// Full listing
// ---------------------------------------------------------------------------

/// The menu screen as text: header, cards, and the open detail view.
#[must_use]
pub fn menu_listing<W: VisibilityWatcher>(store: &MenuStore<W>) -> String {
    let mut out = String::new();
    let _ = write!(out, "== {} ==", label(store, StringKey::Title));
    if store.has_active_filters() {
        let _ = write!(out, "  [{}]", label(store, StringKey::Reset));
    }
    out.push('\n');

    let query = &store.filters().query;
    if query.is_empty() {
        let _ = writeln!(out, "search: ({})", label(store, StringKey::SearchPlaceholder));
    } else {
        let _ = writeln!(out, "search: {query}");
    }
    let _ = writeln!(out, "categories: {}", store.categories().join(" | "));

    for (index, item) in store.visible_items().into_iter().enumerate() {
        let badge = item.diet_badge();
        let _ = write!(
            out,
            "  {:<8} {} {}  {}  {}",
            item.id(),
            badge.symbol(),
            item.name(),
            item.price(),
            item.category()
        );
        if item.is_featured() {
            let _ = write!(out, "  [{FEATURED_LABEL}]");
        }
        if store.is_revealed(item.id().as_str()) {
            out.push_str("  revealed");
        } else {
            let _ = write!(out, "  reveal +{}ms", store.stagger_delay(index).as_millis());
        }
        out.push('\n');
    }

    if let Some(detail) = store.detail() {
        let _ = writeln!(out, "-- {} ({}) --", detail.name, detail.id);
        let _ = writeln!(out, "  {}", detail.price);
        if !detail.description.is_empty() {
            let _ = writeln!(out, "  {}", detail.description);
        }
        let _ = write!(out, "  {} {}", detail.badge.symbol(), detail.badge.label());
        if let Some(featured) = detail.featured {
            let _ = write!(out, "  [{featured}]");
        }
        out.push('\n');
        if let Some(ingredients) = detail.ingredients {
            let _ = writeln!(out, "  {}: {}", ingredients.label, ingredients.value);
        }
        let _ = writeln!(out, "  {}: {}", detail.category.label, detail.category.value);
        match detail.media {
            Media::Image(src) => {
                let _ = writeln!(out, "  image: {src}");
            }
            Media::Model(src) => {
                let _ = writeln!(out, "  3d: {src}");
            }
        }
    }
    out
}

/// Language selector options; the active language is marked with `*`.
#[must_use]
pub fn language_listing<W: VisibilityWatcher>(store: &MenuStore<W>) -> String {
    let active = store.active_language();
    let mut out = String::new();
    for (code, name) in store.languages() {
        let marker = if code == active { '*' } else { ' ' };
        let _ = writeln!(out, "{marker} {code}  {name}");
    }
    out
}
