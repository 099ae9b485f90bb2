//! Browser binding checks; run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use js_sys::{Object, Reflect};
use reversi_engine::wasm::{WasmGame, wasm_ready};
use reversi_engine::{GameSnapshot, Player, Position};
use wasm_bindgen::{JsError, JsValue};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn ok<T>(result: Result<T, JsError>) -> T {
    result.unwrap_or_else(|_| panic!("wasm call failed"))
}

fn get(value: &JsValue, key: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(key)).unwrap()
}

#[wasm_bindgen_test]
fn ready_flag() {
    assert!(wasm_ready());
}

#[wasm_bindgen_test]
fn default_config_starts_standard_game() {
    let game = ok(WasmGame::new(JsValue::UNDEFINED));
    let state = ok(game.state());

    assert_eq!(get(&state, "size").as_f64(), Some(8.0));
    assert_eq!(get(&state, "black_count").as_f64(), Some(2.0));
    assert_eq!(get(&state, "is_game_over").as_bool(), Some(false));
    assert!(ok(game.result()).is_undefined());
}

#[wasm_bindgen_test]
fn config_object_selects_board_size() {
    let config = Object::new();
    Reflect::set(&config, &"board_size".into(), &JsValue::from_f64(6.0)).unwrap();
    let game = ok(WasmGame::new(config.into()));

    assert_eq!(get(&ok(game.state()), "size").as_f64(), Some(6.0));

    let bad = Object::new();
    Reflect::set(&bad, &"board_size".into(), &JsValue::from_f64(7.0)).unwrap();
    assert!(WasmGame::new(bad.into()).is_err());
}

#[wasm_bindgen_test]
fn illegal_place_is_ignored_and_undo_restores() {
    let mut game = ok(WasmGame::new(JsValue::UNDEFINED));

    assert!(!game.place(0, 0));
    assert!(!game.place(2, 259));
    assert!(game.place(2, 3));
    assert_eq!(get(&ok(game.state()), "white_count").as_f64(), Some(1.0));

    assert!(game.undo());
    assert_eq!(get(&ok(game.state()), "white_count").as_f64(), Some(2.0));
    assert!(game.redo());
    assert!(game.jump_to(0));
}

#[wasm_bindgen_test]
fn snapshot_round_trips_and_rejects_tampering() {
    let mut game = ok(WasmGame::new(JsValue::UNDEFINED));
    game.place(2, 3);
    let exported = ok(game.snapshot());
    assert!(game.load(exported).is_ok());

    let position = Position::initial(8).unwrap();
    let mut snapshot = GameSnapshot {
        position: position.to_snapshot(),
        to_move: Some(Player::Black),
    };
    snapshot.position.black_score = 9;
    let tampered = serde_wasm_bindgen::to_value(&snapshot).unwrap();
    assert!(game.load(tampered).is_err());
}
