//! Browser surface. Data crosses the boundary through `serde-wasm-bindgen`.

use tracing::debug;
use wasm_bindgen::prelude::*;

use crate::config::EngineConfig;
use crate::game::{Game, GameSnapshot};
use crate::types::Coord;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// A game session owned by the JS front end.
#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
}

#[wasm_bindgen]
impl WasmGame {
    /// `config` may be `undefined` for the standard 8x8 board.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmGame, JsError> {
        let config: EngineConfig = if config.is_undefined() || config.is_null() {
            EngineConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self {
            game: Game::new(config)?,
        })
    }

    /// Plays for the side to move. Returns false, leaving the game unchanged,
    /// when the move is not legal.
    pub fn place(&mut self, row: u32, col: u32) -> bool {
        let Some(coord) = coord_from_js(row, col) else {
            debug!(row, col, "ignored placement outside coordinate range");
            return false;
        };
        match self.game.play(coord) {
            Ok(_) => true,
            Err(err) => {
                debug!(%err, "ignored placement");
                false
            }
        }
    }

    pub fn undo(&mut self) -> bool {
        self.game.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.game.redo()
    }

    #[wasm_bindgen(js_name = jumpTo)]
    pub fn jump_to(&mut self, step: usize) -> bool {
        self.game.jump_to(step)
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.game.to_game_state())?)
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.game.legal_moves())?)
    }

    /// `undefined` while the game is running.
    pub fn result(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.game.to_game_result())?)
    }

    /// Replaces the session with an imported game; history starts over.
    pub fn load(&mut self, snapshot: JsValue) -> Result<(), JsError> {
        let snapshot: GameSnapshot = serde_wasm_bindgen::from_value(snapshot)?;
        self.game = Game::from_snapshot(snapshot)?;
        Ok(())
    }

    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.game.snapshot())?)
    }
}

/// JS numbers arrive as `u32`; anything past `u8` cannot name a cell.
fn coord_from_js(row: u32, col: u32) -> Option<Coord> {
    Some(Coord::new(u8::try_from(row).ok()?, u8::try_from(col).ok()?))
}
