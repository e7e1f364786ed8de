use leptos::prelude::*;
use hr_core::StarRecord;
use crate::state::ViewerState;

/// Key/value panel for the selected star.
///
/// Absent until the first selection. The panel itself is built once; later
/// selections only update the value cells.
#[component]
pub fn StarInfoPanel() -> impl IntoView {
    let state = expect_context::<ViewerState>();
    let has_selection = move || state.selected.with(Option::is_some);

    // Value of the `index`th info field for the current selection
    let field = move |index: usize| {
        move || {
            state.selected.with(|selected| {
                selected
                    .as_ref()
                    .map(|star| star.info_fields()[index].1.clone())
                    .unwrap_or_default()
            })
        }
    };

    view! {
        <Show when=has_selection>
            <div
                id="star-info"
                class="star-info"
                style="position: absolute; top: 20px; right: 20px; padding: 10px; \
                       background-color: rgba(255, 255, 255, 0.8); border: 1px solid black;"
            >
                {StarRecord::INFO_KEYS
                    .iter()
                    .enumerate()
                    .map(|(index, key)| {
                        view! {
                            <div>
                                <strong>{format!("{key}:")}</strong>
                                " "
                                <span>{field(index)}</span>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </Show>
    }
}
