// HTTP-level tests for the Battlesnake routes
//
// Every response, including errors, must carry a well-formed JSON body.

use rocket::http::{ContentType, Status};
use rocket::local::blocking::Client;
use serde_json::{json, Value};
use tailchaser_snake::bot::Bot;
use tailchaser_snake::config::Config;
use tailchaser_snake::handler::build_rocket;

fn client() -> Client {
    let bot = Bot::new(Config::default_hardcoded());
    Client::tracked(build_rocket(bot)).expect("valid rocket instance")
}

fn post_json(client: &Client, path: &'static str, body: &Value) -> (Status, Value) {
    let response = client
        .post(path)
        .header(ContentType::JSON)
        .body(body.to_string())
        .dispatch();
    let status = response.status();
    let json = response.into_json::<Value>().expect("JSON response body");
    (status, json)
}

fn move_request(you_body: Value, food: Value) -> Value {
    json!({
        "game": {"id": "game-1"},
        "turn": 3,
        "board": {
            "width": 5,
            "height": 5,
            "food": food,
            "snakes": [{"id": "me", "name": "me", "health": 90, "body": you_body.clone()}]
        },
        "you": {"id": "me", "name": "me", "health": 90, "body": you_body}
    })
}

#[test]
fn test_index_returns_metadata() {
    let client = client();
    let response = client.get("/").dispatch();

    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.headers().get_one("Server"),
        Some("battlesnake/tailchaser")
    );
    let body = response.into_json::<Value>().unwrap();
    assert_eq!(body["apiversion"], "1");
    assert_eq!(body["color"], "#ff00ff");
}

#[test]
fn test_start_accepts_empty_payload_and_returns_color() {
    let (status, body) = post_json(&client(), "/start", &json!({}));
    assert_eq!(status, Status::Ok);
    assert_eq!(body["color"], "#ff00ff");
}

#[test]
fn test_ping_returns_empty_object() {
    let (status, body) = post_json(&client(), "/ping", &json!({}));
    assert_eq!(status, Status::Ok);
    assert_eq!(body, json!({}));
}

#[test]
fn test_end_returns_empty_object() {
    let (status, body) = post_json(&client(), "/end", &json!({"game": {"id": "game-1"}}));
    assert_eq!(status, Status::Ok);
    assert_eq!(body, json!({}));
}

#[test]
fn test_move_chases_adjacent_food() {
    let request = move_request(json!([{"x": 2, "y": 2}]), json!([{"x": 3, "y": 2}]));
    let (status, body) = post_json(&client(), "/move", &request);

    assert_eq!(status, Status::Ok);
    assert_eq!(body, json!({"move": "right"}));
}

#[test]
fn test_move_without_food_returns_a_direction() {
    let request = move_request(json!([{"x": 2, "y": 2}]), json!([]));
    let (status, body) = post_json(&client(), "/move", &request);

    assert_eq!(status, Status::Ok);
    let token = body["move"].as_str().unwrap();
    assert!(["up", "down", "left", "right"].contains(&token));
}

#[test]
fn test_out_of_bounds_snapshot_is_a_json_error() {
    let request = move_request(json!([{"x": 2, "y": 7}]), json!([]));
    let (status, body) = post_json(&client(), "/move", &request);

    assert_eq!(status, Status::BadRequest);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("out of bounds"), "unexpected message: {}", message);
}

#[test]
fn test_unparseable_move_body_is_a_json_error() {
    let client = client();
    let response = client
        .post("/move")
        .header(ContentType::JSON)
        .body("{\"board\": 12}")
        .dispatch();

    assert!(matches!(
        response.status(),
        s if s == Status::BadRequest || s == Status::UnprocessableEntity
    ));
    let body = response.into_json::<Value>().expect("JSON error body");
    assert!(body["error"].is_string());
}

#[test]
fn test_unknown_route_is_a_json_error() {
    let client = client();
    let response = client.get("/nope").dispatch();

    assert_eq!(response.status(), Status::NotFound);
    let body = response.into_json::<Value>().unwrap();
    assert_eq!(body["path"], "/nope");
}

#[test]
fn test_oversized_board_is_a_json_error() {
    let mut request = move_request(
        json!([{"x": 46340, "y": 46341}, {"x": 46341, "y": 46341}]),
        json!([]),
    );
    request["board"]["width"] = json!(46342);
    request["board"]["height"] = json!(46342);
    let (status, body) = post_json(&client(), "/move", &request);

    assert_eq!(status, Status::BadRequest);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("dimensions"), "unexpected message: {}", message);
}
