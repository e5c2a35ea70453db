// HTTP handler bindings for Battlesnake API endpoints
//
// Thin wrappers that bind Rocket routes to the Bot. Every failure, including
// bodies Rocket itself cannot parse, is answered with a JSON error object.

use rocket::fairing::AdHoc;
use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::{Build, Request, Rocket};
use serde_json::{json, Value};

use crate::bot::Bot;
use crate::error::MoveError;
use crate::types::{GameEvent, GameState};

type ApiError = status::Custom<Json<Value>>;

/// GET / endpoint
/// Returns bot metadata and appearance configuration
#[get("/")]
pub fn index(bot: &rocket::State<Bot>) -> Json<Value> {
    Json(bot.info())
}

/// POST /start endpoint
#[post("/start", format = "json", data = "<start_req>")]
pub fn start(bot: &rocket::State<Bot>, start_req: Json<GameEvent>) -> Json<Value> {
    Json(bot.start(&start_req))
}

/// POST /ping endpoint
#[post("/ping")]
pub fn ping(bot: &rocket::State<Bot>) -> Json<Value> {
    Json(bot.ping())
}

/// POST /move endpoint
/// Called each turn to compute and return the next move
#[post("/move", format = "json", data = "<move_req>")]
pub async fn get_move(
    bot: &rocket::State<Bot>,
    move_req: Json<GameState>,
) -> Result<Json<Value>, ApiError> {
    bot.get_move(&move_req.game, &move_req.turn, &move_req.board, &move_req.you)
        .await
        .map(Json)
        .map_err(|e| {
            let code = match e {
                MoveError::Snapshot(_) => Status::BadRequest,
                MoveError::Worker(_) => Status::InternalServerError,
            };
            status::Custom(code, Json(json!({ "error": e.to_string() })))
        })
}

/// POST /end endpoint
#[post("/end", format = "json", data = "<end_req>")]
pub fn end(bot: &rocket::State<Bot>, end_req: Json<GameEvent>) -> Json<Value> {
    Json(bot.end(&end_req))
}

#[catch(400)]
fn bad_request(req: &Request) -> Json<Value> {
    error_body(Status::BadRequest, req)
}

#[catch(404)]
fn not_found(req: &Request) -> Json<Value> {
    error_body(Status::NotFound, req)
}

#[catch(422)]
fn unprocessable(req: &Request) -> Json<Value> {
    error_body(Status::UnprocessableEntity, req)
}

#[catch(500)]
fn internal_error(req: &Request) -> Json<Value> {
    error_body(Status::InternalServerError, req)
}

fn error_body(status: Status, req: &Request) -> Json<Value> {
    log::warn!("{} {} -> {}", req.method(), req.uri(), status);
    Json(json!({ "error": status.reason_lossy(), "path": req.uri().path().to_string() }))
}

/// Builds the server with all routes, catchers and the Server header
pub fn build_rocket(bot: Bot) -> Rocket<Build> {
    rocket::build()
        .manage(bot)
        .attach(AdHoc::on_response("Server ID Middleware", |_, res| {
            Box::pin(async move {
                res.set_raw_header("Server", "battlesnake/tailchaser");
            })
        }))
        .mount("/", routes![index, start, ping, get_move, end])
        .register(
            "/",
            catchers![bad_request, not_found, unprocessable, internal_error],
        )
}
