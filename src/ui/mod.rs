use leptos::*;

use crate::core::catalog;
use crate::core::io::LocalStore;
use crate::core::models::{Character, Difficulty, Storyline, Universe};
use crate::core::state::{WizardStateStore, WizardStep};
use crate::services::characters::Roster;
use crate::services::client::CharacterApiClient;
use crate::services::guard::{GuardView, StepGuard};
use crate::services::wizard::{self, Transition};

type Store = WizardStateStore<LocalStore>;

/// Path-only client side routing on top of the History API.
#[derive(Clone, Copy)]
struct Navigator {
    path: RwSignal<String>,
}

impl Navigator {
    fn new() -> Self {
        let path = create_rw_signal(current_path());
        // Browser back/forward changes the URL without going through `go`.
        window_event_listener(ev::popstate, move |_| path.set(current_path()));
        Self { path }
    }

    fn go(&self, to: &str) {
        if let Ok(history) = window().history() {
            if let Err(e) = history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(to)) {
                log::warn!("pushState failed: {:?}", e);
            }
        }
        self.path.set(to.to_string());
    }

    fn follow(&self, transition: Transition) {
        if let Transition::Navigate(to) = transition {
            self.go(to);
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let store = match LocalStore::new() {
        Ok(backend) => WizardStateStore::new(backend),
        Err(e) => {
            log::error!("Failed to open storage: {:#}", e);
            return view! { <p class="error">"Local storage is unavailable: " {e.to_string()}</p> }.into_view();
        }
    };
    let nav = Navigator::new();

    view! {
        <div class="app-container">
            <h1>"RPG Odyssey"</h1>
            {move || {
                let store = store.clone();
                match WizardStep::from_path(&nav.path.get()) {
                    Some(WizardStep::Difficulty) | None => view! { <DifficultyPage store=store nav=nav/> }.into_view(),
                    Some(WizardStep::Universe) => view! {
                        <Guarded step=WizardStep::Universe store=store.clone() nav=nav>
                            <UniversePage store=store.clone() nav=nav/>
                        </Guarded>
                    }.into_view(),
                    Some(WizardStep::Character) => view! {
                        <Guarded step=WizardStep::Character store=store.clone() nav=nav>
                            <CharacterPage store=store.clone() nav=nav/>
                        </Guarded>
                    }.into_view(),
                    Some(WizardStep::Storyline) => view! {
                        <Guarded step=WizardStep::Storyline store=store.clone() nav=nav>
                            <StorylinePage store=store.clone() nav=nav/>
                        </Guarded>
                    }.into_view(),
                }
            }}
        </div>
    }
    .into_view()
}

/// Shows `children` only once the step's prerequisites are in storage.
#[component]
fn Guarded(step: WizardStep, store: Store, nav: Navigator, children: ChildrenFn) -> impl IntoView {
    let guard = create_rw_signal(StepGuard::for_step(step));

    match set_timeout_with_handle(
        move || {
            if let Some(Some(redirect)) = guard.try_update(|g| g.check(&store)) {
                nav.go(&redirect.to);
            }
        },
        StepGuard::SETTLE_DELAY,
    ) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(e) => log::error!("Failed to schedule guard check: {:?}", e),
    }

    move || match guard.with(StepGuard::view) {
        GuardView::Loading => view! { <div class="loading">"Loading..."</div> }.into_view(),
        GuardView::Content => children().into_view(),
        GuardView::Blank => ().into_view(),
    }
}

#[component]
fn DifficultyPage(store: Store, nav: Navigator) -> impl IntoView {
    let selected = create_rw_signal(store.get::<Difficulty>(WizardStep::Difficulty));

    let on_continue = move |_| {
        nav.follow(wizard::confirm(&store, WizardStep::Difficulty, selected.get().as_ref()));
    };

    view! {
        <section>
            <h2>"Choose Your Difficulty"</h2>
            <div class="cards">
                {Difficulty::ALL.into_iter().map(|d| view! {
                    <button
                        class="card"
                        class:selected=move || selected.get() == Some(d)
                        on:click=move |_| selected.set(Some(d))
                    >
                        <h3>{d.title()}</h3>
                        <p>{d.description()}</p>
                        <ul>{d.features().into_iter().map(|f| view! { <li>{f}</li> }).collect_view()}</ul>
                    </button>
                }).collect_view()}
            </div>
            <button disabled=move || selected.get().is_none() on:click=on_continue>
                {move || match selected.get() {
                    Some(d) => format!("Begin {} Adventure", d.title()),
                    None => "Select Difficulty".to_string(),
                }}
            </button>
        </section>
    }
}

#[component]
fn UniversePage(store: Store, nav: Navigator) -> impl IntoView {
    let selected = create_rw_signal(store.get::<Universe>(WizardStep::Universe));

    let on_continue = move |_| {
        nav.follow(wizard::confirm(&store, WizardStep::Universe, selected.get().as_ref()));
    };

    view! {
        <section>
            <button on:click=move |_| nav.follow(wizard::back(WizardStep::Universe))>"Back"</button>
            <h2>"Choose Your Universe"</h2>
            <div class="cards">
                {Universe::ALL.into_iter().map(|u| view! {
                    <button
                        class="card"
                        class:selected=move || selected.get() == Some(u)
                        on:click=move |_| selected.set(Some(u))
                    >
                        <h3>{u.title()}</h3>
                        <p>{u.description()}</p>
                        <ul>{u.themes().into_iter().map(|t| view! { <li>{t}</li> }).collect_view()}</ul>
                    </button>
                }).collect_view()}
            </div>
            <button disabled=move || selected.get().is_none() on:click=on_continue>"Continue"</button>
        </section>
    }
}

#[component]
fn CharacterPage(store: Store, nav: Navigator) -> impl IntoView {
    let universe = store
        .get::<String>(WizardStep::Universe)
        .unwrap_or_else(|| Universe::DEFAULT.id().to_string());
    let roster = create_rw_signal(None::<Roster>);
    let loading = create_rw_signal(false);
    let selected = create_rw_signal(None::<Character>);

    let load = {
        let universe = universe.clone();
        move || {
            if loading.get_untracked() {
                return;
            }
            loading.set(true);
            selected.set(None);
            let universe = universe.clone();
            spawn_local(async move {
                let response = match base_url().and_then(|url| CharacterApiClient::new(&url)) {
                    Ok(client) => client.create_characters(&universe).await,
                    Err(e) => Err(e),
                };
                roster.set(Some(Roster::from_response(&universe, response, &mut rand::rng())));
                loading.set(false);
            });
        }
    };
    load();

    let on_continue = move |_| {
        nav.follow(wizard::confirm(&store, WizardStep::Character, selected.get().as_ref()));
    };

    view! {
        <section>
            <button on:click=move |_| nav.follow(wizard::back(WizardStep::Character))>"Back"</button>
            <h2>"Choose Your Character"</h2>
            <button disabled=move || loading.get() on:click=move |_| load()>
                {move || if loading.get() { "Generating..." } else { "Regenerate" }}
            </button>
            {move || roster.with(|r| r.as_ref().and_then(|r| r.warning.clone())).map(|w| view! {
                <p class="warning">{w}</p>
            })}
            <div class="cards">
                {move || roster.with(|r| r.as_ref().map(|r| r.characters.clone()).unwrap_or_default())
                    .into_iter()
                    .map(|c| {
                        let name = c.record.name.clone();
                        let pick = c.clone();
                        view! {
                            <button
                                class="card"
                                class:selected=move || selected.with(|s| s.as_ref().is_some_and(|s| s.record.name == name))
                                on:click=move |_| selected.set(Some(pick.clone()))
                            >
                                <h3>{c.record.name.clone()}</h3>
                                <p class="role">{c.record.role.clone()}</p>
                                <p>{c.record.description.clone()}</p>
                                <p>"Power " {c.power_level} " · Complexity " {c.complexity}</p>
                                <ul>{c.record.abilities.iter().map(|a| view! { <li>{a.clone()}</li> }).collect_view()}</ul>
                                <ul>{c.record.personality.iter().map(|p| view! { <li>{p.clone()}</li> }).collect_view()}</ul>
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            <button disabled=move || selected.with(Option::is_none) on:click=on_continue>
                {move || selected.with(|s| match s {
                    Some(c) => format!("Begin as {}", c.record.name),
                    None => "Select a Character".to_string(),
                })}
            </button>
        </section>
    }
}

#[component]
fn StorylinePage(store: Store, nav: Navigator) -> impl IntoView {
    let universe = store
        .get::<Universe>(WizardStep::Universe)
        .unwrap_or(Universe::DEFAULT);
    let selected = create_rw_signal(None::<Storyline>);

    let begin = {
        let store = store.clone();
        move |_| {
            if wizard::confirm(&store, WizardStep::Storyline, selected.get().as_ref()) != Transition::Complete {
                return;
            }
            match wizard::begin_adventure(&store) {
                Ok(summary) => {
                    if let Err(e) = window().alert_with_message(&summary.message()) {
                        log::warn!("alert failed: {:?}", e);
                    }
                }
                Err(missing) => log::warn!("Cannot begin adventure, missing {:?}", missing),
            }
        }
    };

    view! {
        <section>
            <button on:click=move |_| nav.follow(wizard::back(WizardStep::Storyline))>"Back"</button>
            <button on:click=move |_| nav.follow(wizard::restart(&store))>"Start Over"</button>
            <h2>"Choose Your Storyline"</h2>
            <div class="cards">
                {catalog::storylines(universe).into_iter().map(|s| {
                    let id = s.id.clone();
                    let pick = s.clone();
                    view! {
                        <button
                            class="card"
                            class:selected=move || selected.with(|sel| sel.as_ref().is_some_and(|sel| sel.id == id))
                            on:click=move |_| selected.set(Some(pick.clone()))
                        >
                            <h3>{s.title}</h3>
                            <p class="genre">{s.genre} " · " {s.duration} " · " {s.difficulty}</p>
                            <p>{s.description}</p>
                            <p class="hook">{s.hook}</p>
                        </button>
                    }
                }).collect_view()}
            </div>
            <button disabled=move || selected.with(Option::is_none) on:click=begin>
                {move || if selected.with(Option::is_some) { "Begin Your Adventure" } else { "Select Storyline to Begin" }}
            </button>
        </section>
    }
}

fn current_path() -> String {
    window().location().pathname().unwrap_or_else(|_| "/".to_string())
}

fn base_url() -> anyhow::Result<String> {
    window()
        .location()
        .origin()
        .map_err(|e| anyhow::anyhow!("Failed to read window origin: {:?}", e))
}
