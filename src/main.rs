//! Storybook entry point
//!
//! On the web: wires DOM clicks into the game controller and renders
//! outcomes. Natively: plays a scripted walkthrough against in-memory storage.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;
    use web_sys::{CustomEvent, CustomEventInit, Document, Element, HtmlElement};

    use storybook::consts::*;
    use storybook::persistence::LocalStorageBackend;
    use storybook::story::{ChapterStatus, HeartId};
    use storybook::{
        ActionQueue, Chapter, EffectEvent, EffectsSink, GameController, Navigator, Outcome, PersistentStore,
        ProgressState, StoryConfig,
    };

    type Game = GameController<LocalStorageBackend>;
    type Action = Box<dyn FnOnce(&mut Game) -> Outcome>;

    thread_local! {
        static GAME: RefCell<Option<Game>> = const { RefCell::new(None) };
        static ACTIONS: ActionQueue<Action> = const { ActionQueue::new() };
    }

    /// Re-dispatches every effect as a `storybook:<name>` DOM event; the page's
    /// effects script turns those into sounds, toasts and confetti.
    struct DomSink {
        document: Document,
    }

    impl EffectsSink for DomSink {
        fn emit(&mut self, event: &EffectEvent, sound_enabled: bool) {
            let detail = js_sys::JSON::parse(&event.to_json()).unwrap_or(JsValue::NULL);
            if detail.is_object() {
                let _ = js_sys::Reflect::set(
                    &detail,
                    &JsValue::from_str("soundEnabled"),
                    &JsValue::from_bool(sound_enabled),
                );
            }

            let init = CustomEventInit::new();
            init.set_detail(&detail);
            let name = format!("storybook:{}", event.name());
            match CustomEvent::new_with_event_init_dict(&name, &init) {
                Ok(custom) => {
                    let _ = self.document.dispatch_event(&custom);
                }
                Err(_) => log::warn!("Could not create {} event", name),
            }
        }
    }

    /// Loads `chapters/<id>.html`, remembering the chapter for the session
    struct PageNavigator;

    impl Navigator for PageNavigator {
        fn go_to(&mut self, chapter: Chapter) {
            let Some(window) = web_sys::window() else { return };
            if let Ok(Some(session)) = window.session_storage() {
                let _ = session.set_item("currentChapter", chapter.as_str());
            }
            let _ = window
                .location()
                .set_href(&format!("chapters/{}.html", chapter));
        }
    }

    /// Run one action against the game and render what it caused. Actions
    /// raised by effects listeners mid-dispatch wait for the current one.
    fn handle(action: impl FnOnce(&mut Game) -> Outcome + 'static) {
        ACTIONS.with(|queue| {
            queue.submit(Box::new(action) as Action, run_action);
        });
    }

    fn run_action(action: Action) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        GAME.with(|cell| {
            let mut slot = cell.borrow_mut();
            let Some(game) = slot.as_mut() else {
                log::warn!("Storybook action before startup");
                return;
            };

            let outcome = action(game);
            render(&document, &outcome, game.progress());
            outcome.dispatch(&mut DomSink { document: document.clone() }, &mut PageNavigator);
        });
    }

    /// Sync DOM classes and counters with the outcome
    fn render(document: &Document, outcome: &Outcome, progress: &ProgressState) {
        for t in &outcome.transitions {
            let Some(obj) = document.get_element_by_id(&format!("obj-{}", t.chapter)) else {
                continue;
            };
            let classes = obj.class_list();
            let _ = classes.toggle_with_force("locked", t.to == ChapterStatus::Locked);
            let _ = classes.toggle_with_force("completed", t.to == ChapterStatus::Completed);
        }

        for heart in HeartId::all() {
            let selector = format!("[data-heart=\"{}\"]", heart);
            if let Ok(Some(el)) = document.query_selector(&selector) {
                let _ = el
                    .class_list()
                    .toggle_with_force("collected", progress.has_heart(heart));
            }
        }

        if let Some(el) = document.get_element_by_id("hearts-found") {
            el.set_text_content(Some(&progress.hearts_found().to_string()));
        }

        let percent = progress.progress_percent();
        if let Some(fill) = document
            .get_element_by_id("progress-fill")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = fill.style().set_property("width", &format!("{}%", percent));
        }
        if let Some(el) = document.get_element_by_id("progress-percent") {
            el.set_text_content(Some(&percent.to_string()));
        }

        if let Some(toggle) = document.get_element_by_id("sound-toggle") {
            let _ = toggle
                .class_list()
                .toggle_with_force("muted", !outcome.sound_enabled);
        }
    }

    /// Optional `<script id="storybook-config" type="application/json">`
    fn load_config(document: &Document) -> StoryConfig {
        let Some(json) = document
            .get_element_by_id("storybook-config")
            .and_then(|el| el.text_content())
        else {
            return StoryConfig::default();
        };

        match StoryConfig::from_json(&json) {
            Ok(config) => {
                log::info!("Loaded story config");
                config
            }
            Err(e) => {
                log::warn!("{} - using defaults", e);
                StoryConfig::default()
            }
        }
    }

    /// Every element matching `selector`
    fn elements(document: &Document, selector: &str) -> Vec<Element> {
        let Ok(nodes) = document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn on_click(el: &Element, mut f: impl FnMut(&web_sys::Event) + 'static) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| f(&event));
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_listeners(document: &Document) {
        // Chapter objects
        for el in elements(document, ".object-item") {
            let Some(id) = el.get_attribute("data-chapter") else {
                continue;
            };
            on_click(&el, move |_| {
                let id = id.clone();
                handle(move |game| game.on_chapter_click(&id));
            });
        }

        // Hidden hearts
        for el in elements(document, ".hidden-heart") {
            let Some(id) = el.get_attribute("data-heart") else {
                continue;
            };
            on_click(&el, move |event| {
                event.stop_propagation();
                let id = id.clone();
                handle(move |game| game.on_heart_click(&id));
            });
        }

        // Easter egg stars
        for (index, el) in elements(document, ".star-easter-egg").into_iter().enumerate() {
            on_click(&el, move |_| handle(move |game| game.on_star_click(index)));
        }

        if let Some(el) = document.get_element_by_id("sound-toggle") {
            on_click(&el, |_| handle(|game| game.toggle_sound()));
        }
    }

    /// Called by chapter pages once their content is finished
    #[wasm_bindgen(js_name = markChapterComplete)]
    pub fn mark_chapter_complete(chapter: String) {
        handle(move |game| game.complete_chapter(&chapter));
    }

    /// Wipe all progress after the player confirms
    #[wasm_bindgen(js_name = resetProgress)]
    pub fn reset_progress() {
        let Some(window) = web_sys::window() else { return };
        let confirmed = window
            .confirm_with_message("Reset all progress? This cannot be undone!")
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        if let Ok(Some(session)) = window.session_storage() {
            let _ = session.clear();
        }
        handle(|game| game.reset());
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            return;
        }

        log::info!("Storybook starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document - storybook disabled");
            return;
        };

        let config = load_config(&document);
        let store = PersistentStore::new(LocalStorageBackend::new());
        let game = GameController::new(store).with_config(config);
        GAME.with(|cell| *cell.borrow_mut() = Some(game));

        setup_listeners(&document);
        handle(|game| game.start());

        log::info!(
            "Storybook running ({} chapters, {} hearts)",
            TOTAL_CHAPTERS,
            TOTAL_HEARTS
        );
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    web::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Storybook (native) starting...");
    log::info!("The interactive story runs in the browser - build for wasm32 to play it");

    println!("\nPlaying a scripted walkthrough...");
    walkthrough();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive every mechanic once against in-memory storage
#[cfg(not(target_arch = "wasm32"))]
fn walkthrough() {
    use storybook::consts::*;
    use storybook::{Chapter, GameController, LogSink, MemoryBackend, PersistentStore};

    let mut game = GameController::new(PersistentStore::new(MemoryBackend::new()));
    let mut sink = LogSink;
    let mut opened: Vec<Chapter> = Vec::new();

    game.start().dispatch(&mut sink, &mut opened);
    game.on_chapter_click("texts").dispatch(&mut sink, &mut opened);

    for chapter in Chapter::ALL {
        game.on_chapter_click(chapter.as_str())
            .dispatch(&mut sink, &mut opened);
        game.complete_chapter(chapter.as_str())
            .dispatch(&mut sink, &mut opened);
    }

    for heart in 1..=8 {
        game.on_heart_click(&heart.to_string())
            .dispatch(&mut sink, &mut opened);
    }
    for star in 0..TOTAL_STARS {
        game.on_star_click(star).dispatch(&mut sink, &mut opened);
    }

    let progress = game.progress();
    println!(
        "✓ {}% complete, {}/{} hearts, {} chapters opened",
        progress.progress_percent(),
        progress.hearts_found(),
        TOTAL_HEARTS,
        opened.len()
    );
}
