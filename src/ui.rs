//! DOM HUD bindings
//!
//! Required elements: `gameCanvas`, `score`, `startGame`. Everything else
//! (overlay, name entry, leaderboard, status/error lines) is optional and
//! silently skipped when the page doesn't provide it.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement, HtmlInputElement};

use crate::error::FatalError;
use crate::leaderboard::Leaderboard;

/// Element ids the page provides
pub mod ids {
    pub const CANVAS: &str = "gameCanvas";
    pub const SCORE: &str = "score";
    pub const START: &str = "startGame";
    pub const GAME_OVER: &str = "game-over";
    pub const FINAL_SCORE: &str = "final-score";
    pub const NAME_ENTRY: &str = "name-entry";
    pub const NAME_INPUT: &str = "player-name";
    pub const SUBMIT_NAME: &str = "submit-name";
    pub const SKIP_NAME: &str = "skip-name";
    pub const HIGH_SCORES: &str = "highScores";
    pub const STATUS: &str = "status";
    pub const ERROR: &str = "error";
}

pub struct Hud {
    document: Document,
    canvas: HtmlCanvasElement,
    score: Element,
    start: Element,
    /// Last value written to the score readout
    shown_score: Option<u64>,
}

/// Toggle only the `hidden` class; the page's own styling classes stay
fn set_hidden(el: &Element, hidden: bool) {
    let _ = el.class_list().toggle_with_force("hidden", hidden);
}

impl Hud {
    /// Look up the page elements. Missing required ones are fatal.
    pub fn bind() -> Result<Self, FatalError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(FatalError::MissingElement("document"))?;

        let require = |id: &'static str| {
            document
                .get_element_by_id(id)
                .ok_or(FatalError::MissingElement(id))
        };
        let canvas = require(ids::CANVAS)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| FatalError::MissingElement(ids::CANVAS))?;
        let score = require(ids::SCORE)?;
        let start = require(ids::START)?;

        Ok(Self {
            document,
            canvas,
            score,
            start,
            shown_score: None,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn start_button(&self) -> &Element {
        &self.start
    }

    pub fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    /// Update the score readout (DOM write only when the value changed)
    pub fn set_score(&mut self, score: u64) {
        if self.shown_score != Some(score) {
            self.score.set_text_content(Some(&score.to_string()));
            self.shown_score = Some(score);
        }
    }

    /// Show and enable the start control, or hide it while playing
    pub fn set_start_available(&self, available: bool) {
        set_hidden(&self.start, !available);
        if available {
            let _ = self.start.remove_attribute("disabled");
        } else {
            let _ = self.start.set_attribute("disabled", "");
        }
    }

    pub fn show_game_over(&self, score: u64) {
        if let Some(el) = self.element(ids::GAME_OVER) {
            set_hidden(&el, false);
        }
        if let Some(el) = self.element(ids::FINAL_SCORE) {
            el.set_text_content(Some(&score.to_string()));
        }
    }

    pub fn hide_game_over(&self) {
        if let Some(el) = self.element(ids::GAME_OVER) {
            set_hidden(&el, true);
        }
    }

    /// Whether the page has an inline name entry form
    pub fn has_name_entry(&self) -> bool {
        self.element(ids::NAME_ENTRY).is_some() && self.name_input().is_some()
    }

    fn name_input(&self) -> Option<HtmlInputElement> {
        self.element(ids::NAME_INPUT)?.dyn_into().ok()
    }

    /// Open the name entry form, pre-filled with the last name used
    pub fn show_name_entry(&self, prefill: &str) {
        if let Some(input) = self.name_input() {
            input.set_value(prefill);
            let _ = input.focus();
        }
        if let Some(el) = self.element(ids::NAME_ENTRY) {
            set_hidden(&el, false);
        }
    }

    pub fn hide_name_entry(&self) {
        if let Some(el) = self.element(ids::NAME_ENTRY) {
            set_hidden(&el, true);
        }
    }

    /// Current contents of the name field
    pub fn entered_name(&self) -> Option<String> {
        self.name_input().map(|i| i.value())
    }

    /// Modal prompt for pages without a name entry form.
    /// `None` when the player cancels.
    pub fn prompt_name(&self, prefill: &str) -> Option<String> {
        let window = web_sys::window()?;
        window
            .prompt_with_message_and_default("Enter your name for the leaderboard:", prefill)
            .ok()
            .flatten()
    }

    /// Replace the leaderboard panel contents. Names go in as text, never markup.
    pub fn render_leaderboard(&self, board: &Leaderboard) {
        let Some(panel) = self.element(ids::HIGH_SCORES) else {
            return;
        };
        panel.set_text_content(None);
        for row in board.rows() {
            if let Ok(item) = self.document.create_element("div") {
                item.set_text_content(Some(&row));
                let _ = panel.append_child(&item);
            }
        }
    }

    /// Transient status line
    pub fn notify(&self, message: &str) {
        log::info!("{}", message);
        if let Some(el) = self.element(ids::STATUS) {
            el.set_text_content(Some(message));
        }
    }

    /// Show a fatal error and disable the start control
    pub fn show_error(&self, message: &str) {
        self.set_start_available(false);
        show_fatal(message);
    }
}

/// Report a fatal error even when the HUD couldn't be bound
pub fn show_fatal(message: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let el = window.document().and_then(|d| d.get_element_by_id(ids::ERROR));
    match el {
        Some(el) => {
            el.set_text_content(Some(message));
            set_hidden(&el, false);
        }
        None => {
            let _ = window.alert_with_message(message);
        }
    }
}

/// Full page reload, used when the leaderboard can't be refreshed in place
pub fn reload_page() {
    if let Some(window) = web_sys::window() {
        log::warn!("Reloading page");
        let _ = window.location().reload();
    }
}
