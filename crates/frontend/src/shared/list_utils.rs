//! List helpers shared by every catalog table: search, sort, selection.
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use std::cmp::Ordering;
use wasm_bindgen_futures::spawn_local;

/// Shorter filters leave the list untouched
pub const MIN_SEARCH_CHARS: usize = 3;

pub fn search_active(filter: &str) -> bool {
    filter.trim().chars().count() >= MIN_SEARCH_CHARS
}

pub trait Searchable {
    fn matches_filter(&self, filter: &str) -> bool;
}

pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Case-insensitive comparison used by most text columns
pub fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

pub fn cmp_number(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

pub fn filter_list<T: Searchable>(items: Vec<T>, filter: &str) -> Vec<T> {
    if !search_active(filter) {
        return items;
    }
    let filter = filter.trim();
    items
        .into_iter()
        .filter(|item| item.matches_filter(filter))
        .collect()
}

pub fn sort_list<T: Sortable>(items: &mut [T], sort: &SortState) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, &sort.field);
        if sort.ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortState {
    pub field: String,
    pub ascending: bool,
}

impl SortState {
    pub fn by(field: &str) -> Self {
        Self {
            field: field.to_string(),
            ascending: true,
        }
    }

    /// Same column flips the direction; a new column starts ascending
    pub fn toggle(&mut self, field: &str) {
        if self.field == field {
            self.ascending = !self.ascending;
        } else {
            self.field = field.to_string();
            self.ascending = true;
        }
    }

    pub fn indicator(&self, field: &str) -> &'static str {
        match (self.field == field, self.ascending) {
            (true, true) => " ▲",
            (true, false) => " ▼",
            _ => " ⇅",
        }
    }
}

/// Add or remove `id` from a selection
pub fn toggle_selected(selected: &mut Vec<String>, id: &str, checked: bool) {
    if checked {
        if !selected.iter().any(|s| s == id) {
            selected.push(id.to_string());
        }
    } else {
        selected.retain(|s| s != id);
    }
}

/// Header checkbox state for the visible rows: (all selected, some selected)
pub fn selection_state(visible: &[String], selected: &[String]) -> (bool, bool) {
    let hits = visible.iter().filter(|id| selected.contains(id)).count();
    let all = !visible.is_empty() && hits == visible.len();
    (all, hits > 0 && !all)
}

/// Filter, sort and selection of one table
#[derive(Clone, Copy)]
pub struct ListState {
    pub filter: RwSignal<String>,
    pub sort: RwSignal<SortState>,
    pub selected: RwSignal<Vec<String>>,
}

impl ListState {
    pub fn new(sort_field: &str) -> Self {
        Self {
            filter: RwSignal::new(String::new()),
            sort: RwSignal::new(SortState::by(sort_field)),
            selected: RwSignal::new(Vec::new()),
        }
    }

    /// Filtered and sorted copy of `items`, tracking filter and sort
    pub fn apply<T: Searchable + Sortable + Clone>(&self, items: &[T]) -> Vec<T> {
        let filter = self.filter.get();
        let mut rows = filter_list(items.to_vec(), &filter);
        self.sort.with(|sort| sort_list(&mut rows, sort));
        rows
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.with(|s| s.iter().any(|x| x == id))
    }

    pub fn select(&self, id: &str, checked: bool) {
        self.selected.update(|s| toggle_selected(s, id, checked));
    }

    /// Select or clear every id in `visible`
    pub fn select_all(&self, visible: Vec<String>, checked: bool) {
        self.selected.update(|s| {
            for id in &visible {
                toggle_selected(s, id, checked);
            }
        });
    }

    /// Drop selected ids that are no longer loaded
    pub fn retain_loaded(&self, loaded: &[String]) {
        self.selected.update(|s| s.retain(|id| loaded.contains(id)));
    }
}

/// Wraps every case-insensitive occurrence of `filter` in a highlight span
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let filter = filter.trim();
    if !search_active(filter) {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }
    let parts = split_matches(text, filter);
    parts
        .into_iter()
        .map(|(part, hit)| {
            if hit {
                view! { <mark class="search-hit">{part}</mark> }.into_any()
            } else {
                view! { <span>{part}</span> }.into_any()
            }
        })
        .collect_view()
        .into_any()
}

/// Split `text` into (segment, is_match) pairs. Matching is done on lowercase
/// chars so byte offsets stay valid for accented input.
fn split_matches(text: &str, filter: &str) -> Vec<(String, bool)> {
    let chars: Vec<char> = text.chars().collect();
    let lower: Vec<char> = chars.iter().flat_map(|c| c.to_lowercase().next()).collect();
    let needle: Vec<char> = filter.chars().flat_map(|c| c.to_lowercase().next()).collect();
    if needle.is_empty() || lower.len() != chars.len() {
        return vec![(text.to_string(), false)];
    }

    let mut parts = Vec::new();
    let mut plain = String::new();
    let mut i = 0;
    while i < chars.len() {
        if lower[i..].starts_with(&needle) {
            if !plain.is_empty() {
                parts.push((std::mem::take(&mut plain), false));
            }
            parts.push((chars[i..i + needle.len()].iter().collect(), true));
            i += needle.len();
        } else {
            plain.push(chars[i]);
            i += 1;
        }
    }
    if !plain.is_empty() {
        parts.push((plain, false));
    }
    parts
}

/// Search box with a 300 ms debounce and a clear button
#[component]
pub fn SearchInput(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Buscar (mín. 3 caracteres)...".to_string()
    } else {
        placeholder
    };
    let (input, set_input) = signal(value.get_untracked());
    let generation = StoredValue::new(0u64);

    let on_input = move |text: String| {
        set_input.set(text.clone());
        let ticket = generation.get_value() + 1;
        generation.set_value(ticket);
        spawn_local(async move {
            TimeoutFuture::new(300).await;
            if generation.try_get_value() == Some(ticket) {
                on_change.run(text);
            }
        });
    };

    let clear = move |_| {
        generation.update_value(|g| *g += 1);
        set_input.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                placeholder=placeholder
                class=("search-input--active", move || search_active(&value.get()))
                prop:value=move || input.get()
                on:input=move |ev| on_input(event_target_value(&ev))
            />
            <Show when=move || !input.get().is_empty()>
                <button class="search-input__clear" title="Limpiar" on:click=clear>
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: String,
        cost: f64,
    }

    impl Searchable for Row {
        fn matches_filter(&self, filter: &str) -> bool {
            self.name.to_lowercase().contains(&filter.to_lowercase())
        }
    }

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "cost" => cmp_number(self.cost, other.cost),
                _ => cmp_text(&self.name, &other.name),
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Taladro".into(), cost: 900.0 },
            Row { name: "martillo".into(), cost: 150.0 },
            Row { name: "Broca".into(), cost: 35.5 },
        ]
    }

    #[test]
    fn test_short_filter_is_ignored() {
        assert_eq!(filter_list(rows(), "ta").len(), 3);
        assert_eq!(filter_list(rows(), " tal ").len(), 1);
        assert!(!search_active("  ab  "));
    }

    #[test]
    fn test_sort_and_toggle() {
        let mut items = rows();
        let mut sort = SortState::by("name");
        sort_list(&mut items, &sort);
        assert_eq!(items[0].name, "Broca");

        sort.toggle("name");
        sort_list(&mut items, &sort);
        assert_eq!(items[0].name, "Taladro");
        assert_eq!(sort.indicator("name"), " ▼");

        sort.toggle("cost");
        assert!(sort.ascending);
        sort_list(&mut items, &sort);
        assert_eq!(items[0].cost, 35.5);
        assert_eq!(sort.indicator("name"), " ⇅");
    }

    #[test]
    fn test_toggle_selected() {
        let mut selected = Vec::new();
        toggle_selected(&mut selected, "A", true);
        toggle_selected(&mut selected, "A", true);
        toggle_selected(&mut selected, "B", true);
        toggle_selected(&mut selected, "A", false);
        assert_eq!(selected, vec!["B".to_string()]);
    }

    #[test]
    fn test_selection_state() {
        let visible = vec!["A".to_string(), "B".to_string()];
        assert_eq!(selection_state(&visible, &[]), (false, false));
        assert_eq!(selection_state(&visible, &["B".to_string()]), (false, true));
        assert_eq!(selection_state(&visible, &["A".to_string(), "B".to_string(), "C".to_string()]), (true, false));
        assert_eq!(selection_state(&[], &["A".to_string()]), (false, false));
    }

    #[test]
    fn test_split_matches_keeps_accents() {
        let parts = split_matches("Taladro Inalámbrico", "ALÁ");
        assert_eq!(
            parts,
            vec![
                ("Taladro In".to_string(), false),
                ("alá".to_string(), true),
                ("mbrico".to_string(), false),
            ]
        );
    }
}
