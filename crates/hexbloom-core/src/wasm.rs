//! WebAssembly bindings for the Hexbloom engine.
//!
//! This module exposes the game engine to JavaScript through wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::actions::GameAction;
use crate::board::topology;
use crate::bot::{Bot, BotDifficulty};
use crate::daily::DailyDate;
use crate::game::{create_daily_game_state, create_daily_game_state_for, create_initial_game_state, GameState};
use crate::rng::EntropyRng;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Board layout as JSON: cells, rosettes and patterns
#[wasm_bindgen(js_name = boardTopology)]
pub fn board_topology() -> String {
    serde_json::to_string(topology()).unwrap_or_else(|_| "{}".to_string())
}

/// WASM-exposed game wrapper
#[wasm_bindgen]
pub struct WasmGame {
    state: GameState,
}

#[wasm_bindgen]
impl WasmGame {
    /// Start an endless game
    #[wasm_bindgen(js_name = newEndless)]
    pub fn new_endless() -> WasmGame {
        let mut rng = EntropyRng::thread();
        WasmGame {
            state: create_initial_game_state(&mut rng),
        }
    }

    /// Start a daily game. `date` is `YYYY-MM-DD`; empty means today.
    #[wasm_bindgen(js_name = newDaily)]
    pub fn new_daily(date: &str) -> Result<WasmGame, JsValue> {
        let state = if date.trim().is_empty() {
            create_daily_game_state()
        } else {
            let date: DailyDate = date
                .parse()
                .map_err(|e| JsValue::from_str(&format!("Invalid date: {}", e)))?;
            create_daily_game_state_for(date)
        };
        Ok(WasmGame { state })
    }

    /// Restore a game from `getState` output
    #[wasm_bindgen(js_name = fromState)]
    pub fn from_state(json: &str) -> Result<WasmGame, JsValue> {
        GameState::from_json(json)
            .map(|state| WasmGame { state })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Get the current game state as JSON
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        self.state.to_json().unwrap_or_else(|_| "{}".to_string())
    }

    /// Get valid actions as JSON array
    #[wasm_bindgen(js_name = getValidActions)]
    pub fn get_valid_actions(&self) -> String {
        let actions = self.state.valid_actions();
        serde_json::to_string(&actions).unwrap_or_else(|_| "[]".to_string())
    }

    /// Apply an action from JSON, returns events JSON or error
    #[wasm_bindgen(js_name = applyAction)]
    pub fn apply_action(&mut self, action_json: &str) -> Result<String, JsValue> {
        let action: GameAction = serde_json::from_str(action_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid action JSON: {}", e)))?;

        let mut rng = EntropyRng::thread();
        match self.state.apply_action(action, &mut rng) {
            Ok((next, events)) => {
                self.state = next;
                Ok(serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string()))
            }
            Err(e) => Err(JsValue::from_str(&format!("Action failed: {}", e))),
        }
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.state.game_over
    }

    #[wasm_bindgen(js_name = getScore)]
    pub fn get_score(&self) -> u32 {
        self.state.score
    }

    /// Get a bot's suggested action. difficulty: "easy" or "greedy"
    #[wasm_bindgen(js_name = getBotAction)]
    pub fn get_bot_action(&self, difficulty: &str) -> String {
        let diff = difficulty.parse().unwrap_or(BotDifficulty::Greedy);
        let mut bot = Bot::new(diff);
        match bot.choose_action(&self.state) {
            Some(action) => serde_json::to_string(&action).unwrap_or_else(|_| "null".to_string()),
            None => "null".to_string(),
        }
    }
}
