/// Popup UI: quick add by URL and endpoint settings

use std::cell::RefCell;
use std::rc::Rc;

use patternfly_yew::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api::{self, settings_from_js, sleep, today};
use crate::config::{DEFAULT_API_ENDPOINT, STATUS_DURATION_MS, Settings, validate_endpoint};
use crate::manual::{FormStatus, ManualForm, detect};
use crate::ui::components::{DetectedHint, StatusLine};

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getSettings() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setSettings(settings: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn getActiveTabUrl() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn readClipboardText() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn reloadPostTabs() -> Result<(), JsValue>;
}

#[function_component(App)]
pub fn app() -> Html {
    let endpoint = use_state(String::new);
    let form = use_state(ManualForm::new);
    let save_status = use_state(|| None::<FormStatus>);
    let add_status = use_state(|| None::<FormStatus>);
    let save_generation = use_mut_ref(|| 0u32);
    let add_generation = use_mut_ref(|| 0u32);

    // Load settings and look for a post URL on mount
    {
        let endpoint = endpoint.clone();
        let form = form.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let settings = load_settings().await;
                endpoint.set(settings.stored_endpoint());

                let tab_url = active_tab_url().await;
                if let Some(detection) = detect(tab_url, read_clipboard).await {
                    log::debug!("Detected {:?} from {:?}", detection.post, detection.source);
                    let mut next = ManualForm::new();
                    next.apply_detection(detection);
                    form.set(next);
                }
            });
            || ()
        });
    }

    let on_endpoint_input = {
        let endpoint = endpoint.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                endpoint.set(input.value());
            }
        })
    };

    let on_url_input = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                let mut next = (*form).clone();
                next.input = input.value();
                form.set(next);
            }
        })
    };

    // Save settings handler
    let on_save = {
        let endpoint = endpoint.clone();
        let save_status = save_status.clone();
        let save_generation = save_generation.clone();

        Callback::from(move |_: ()| {
            let valid = match validate_endpoint(&endpoint) {
                Ok(valid) => valid,
                Err(e) => {
                    flash(&save_status, &save_generation, FormStatus::Error(e.to_string()));
                    return;
                }
            };

            endpoint.set(valid.clone());
            let save_status = save_status.clone();
            let save_generation = save_generation.clone();
            spawn_local(async move {
                match save_settings(Settings::with_endpoint(valid)).await {
                    Ok(()) => {
                        flash(&save_status, &save_generation, FormStatus::Success("✓ Settings saved!".to_string()));
                        // Open post tabs still hold the old endpoint
                        if let Err(e) = reloadPostTabs().await {
                            log::warn!("Failed to reload tabs: {:?}", e);
                        }
                    }
                    Err(e) => {
                        flash(&save_status, &save_generation, FormStatus::Error(e));
                    }
                }
            });
        })
    };

    // Quick add handler
    let on_add = {
        let endpoint = endpoint.clone();
        let form = form.clone();
        let add_status = add_status.clone();
        let add_generation = add_generation.clone();

        Callback::from(move |_: ()| {
            let mut next = (*form).clone();
            if next.busy {
                return;
            }

            let payload = match next.begin(today()) {
                Ok(payload) => payload,
                Err(e) => {
                    flash(&add_status, &add_generation, FormStatus::Error(e.to_string()));
                    return;
                }
            };
            form.set(next.clone());

            let endpoint = Settings::with_endpoint((*endpoint).clone()).endpoint();
            let form = form.clone();
            let add_status = add_status.clone();
            let add_generation = add_generation.clone();
            spawn_local(async move {
                let outcome = api::submit(&endpoint, &payload).await;
                if let Err(e) = &outcome {
                    log::error!("Error adding URL: {}", e);
                }
                let status = next.finish(&outcome);
                form.set(next);
                flash(&add_status, &add_generation, status);
            });
        })
    };

    let on_endpoint_key = enter_key(on_save.clone());
    let on_url_key = enter_key(on_add.clone());
    let button_variant = if form.detected.is_some() {
        ButtonVariant::Primary
    } else {
        ButtonVariant::Secondary
    };

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Hot Content Quick Add"}</h1>

            <div class="popup-section">
                <h2 class="section-title">{"Quick Add"}</h2>
                <div class="flex-column-gap">
                    <input
                        class="pf-v5-c-form-control"
                        type="url"
                        placeholder="https://x.com/user/status/123"
                        value={form.input.clone()}
                        oninput={on_url_input}
                        onkeypress={on_url_key}
                        disabled={form.busy}
                    />
                    <Button
                        onclick={on_add.reform(|_: MouseEvent| ())}
                        disabled={form.busy}
                        variant={button_variant}
                        block={true}
                    >
                        {form.button_label()}
                    </Button>
                    if let Some(detection) = &form.detected {
                        <DetectedHint text={detection.hint()} />
                    }
                </div>
                <StatusLine status={(*add_status).clone()} />
            </div>

            <div class="popup-section">
                <h2 class="section-title">{"Settings"}</h2>
                <div class="flex-column-gap">
                    <input
                        class="pf-v5-c-form-control"
                        type="url"
                        placeholder={DEFAULT_API_ENDPOINT}
                        value={(*endpoint).clone()}
                        oninput={on_endpoint_input}
                        onkeypress={on_endpoint_key}
                    />
                    <Button
                        onclick={on_save.reform(|_: MouseEvent| ())}
                        variant={ButtonVariant::Secondary}
                        block={true}
                    >
                        {"Save Settings"}
                    </Button>
                </div>
                <StatusLine status={(*save_status).clone()} />
            </div>
        </div>
    }
}

// Helper functions

fn enter_key(action: Callback<()>) -> Callback<KeyboardEvent> {
    Callback::from(move |e: KeyboardEvent| {
        if e.key() == "Enter" {
            action.emit(());
        }
    })
}

/// Show a status line and hide it after a while, unless a newer one replaced it
fn flash(status: &UseStateHandle<Option<FormStatus>>, generation: &Rc<RefCell<u32>>, value: FormStatus) {
    let current = {
        let mut generation = generation.borrow_mut();
        *generation += 1;
        *generation
    };
    status.set(Some(value));

    let status = status.clone();
    let generation = generation.clone();
    spawn_local(async move {
        sleep(STATUS_DURATION_MS).await;
        if *generation.borrow() == current {
            status.set(None);
        }
    });
}

async fn load_settings() -> Settings {
    match getSettings().await {
        Ok(value) => settings_from_js(value),
        Err(e) => {
            log::warn!("Failed to load settings: {:?}", e);
            Settings::default()
        }
    }
}

async fn save_settings(settings: Settings) -> Result<(), String> {
    let settings_js = serde_wasm_bindgen::to_value(&settings)
        .map_err(|e| format!("Failed to serialize settings: {:?}", e))?;

    setSettings(settings_js)
        .await
        .map_err(|e| format!("Failed to save settings: {:?}", e))
}

async fn active_tab_url() -> Option<String> {
    match getActiveTabUrl().await {
        Ok(url) => url.as_string(),
        Err(e) => {
            log::error!("Error detecting tweet page: {:?}", e);
            None
        }
    }
}

/// Clipboard text, or `None` when access is denied or unavailable
async fn read_clipboard() -> Option<String> {
    match readClipboardText().await {
        Ok(text) => text.as_string(),
        Err(e) => {
            log::debug!("Clipboard access not available: {:?}", e);
            None
        }
    }
}
