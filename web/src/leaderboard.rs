use crate::utils::*;
use gloo::storage::errors::StorageError;
use gloo::storage::{LocalStorage, Storage};
use minesweep_core::{LeaderboardEntry, LeaderboardStore};
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Finished games kept in the browser's local storage as a JSON array.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct LocalStorageStore;

impl StorageKey for LocalStorageStore {
    const KEY: &'static str = "minesweep:leaderboard";
}

impl LeaderboardStore for LocalStorageStore {
    type Error = StorageError;

    fn load_entries(&self) -> Result<Vec<LeaderboardEntry>, Self::Error> {
        match LocalStorage::get(Self::KEY) {
            Ok(entries) => Ok(entries),
            Err(StorageError::KeyNotFound(_)) => Ok(Vec::new()),
            Err(err) => Err(err),
        }
    }

    fn append_entry(&mut self, entry: LeaderboardEntry) -> Result<(), Self::Error> {
        let mut entries = self.load_entries()?;
        log::debug!("leaderboard entry: {} in {}s", entry.name, entry.time);
        entries.push(entry);
        LocalStorage::set(Self::KEY, entries)
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct LeaderboardProps {
    pub entries: Vec<LeaderboardEntry>,
}

#[function_component]
pub(crate) fn LeaderboardView(props: &LeaderboardProps) -> Html {
    html! {
        <section id="leaderboard">
            <h2>{"Leaderboard"}</h2>
            <ol>
                {
                    for props.entries.iter().map(|entry| html! {
                        <li>{format!("{}: {} seconds", entry.name, entry.time)}</li>
                    })
                }
            </ol>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct RecordFormProps {
    pub open: bool,
    pub on_submit: Callback<String>,
}

/// Asks a winner for the name to store with their time.
#[function_component]
pub(crate) fn RecordForm(props: &RecordFormProps) -> Html {
    let input = use_node_ref();

    let onsubmit = {
        let input = input.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Some(input) = input.cast::<HtmlInputElement>() {
                on_submit.emit(input.value());
                input.set_value("");
            }
        })
    };

    html! {
        <form id="leaderboard-form" class={(!props.open).then_some("hidden")} {onsubmit}>
            <label for="player-name">{"Enter your name:"}</label>
            <input type="text" id="player-name" ref={input} required={true}/>
            <button type="submit">{"Submit"}</button>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_key_is_namespaced() {
        assert_eq!(<LocalStorageStore as StorageKey>::KEY, "minesweep:leaderboard");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn local_storage_round_trip() {
        LocalStorage::delete(<LocalStorageStore as StorageKey>::KEY);
        let mut store = LocalStorageStore;
        assert!(store.load_entries().unwrap().is_empty());

        store.append_entry(LeaderboardEntry::new("A", 120)).unwrap();
        store.append_entry(LeaderboardEntry::new("B", 90)).unwrap();

        let top = store.top(minesweep_core::TOP_ENTRIES).unwrap();
        assert_eq!(
            top,
            [LeaderboardEntry::new("B", 90), LeaderboardEntry::new("A", 120)]
        );
    }
}
