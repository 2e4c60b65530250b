//! Single binary web server: the prediction pool over a REST API, state kept in memory.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Env: HOST, PORT, TEAMS_CSV (optional catalog file with header name,code,group),
//! RANK_SNAPSHOT_SECS (how often the leaderboard trend baseline is refreshed).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use std::sync::RwLock;
use std::time::Duration;
use world_cup_prode::{
    all_group_matches, bracket_for, clear_score_prediction, clear_winner_prediction,
    generate_group_matches, leaderboard, prediction_points, qualified_for, record_group_result,
    record_playoff_result, reset_group_result, reset_playoff_result, set_score_prediction,
    set_winner_prediction, snapshot_ranks, standings_for, PlayoffMatchId, PoolError,
    PredictionPool, Score, TeamCatalog, UserId,
};

/// In-memory state: one pool shared by all requests.
type AppState = Data<RwLock<PredictionPool>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct AddUserBody {
    username: String,
}

#[derive(Deserialize)]
struct ScoreBody {
    match_id: String,
    home: u32,
    away: u32,
}

#[derive(Deserialize)]
struct WinnerBody {
    match_id: PlayoffMatchId,
    winner: String,
}

#[derive(Deserialize)]
struct GroupResultBody {
    match_id: String,
    home: u32,
    away: u32,
    #[serde(default = "default_finalized")]
    finalized: bool,
}

#[derive(Deserialize)]
struct PlayoffResultBody {
    match_id: PlayoffMatchId,
    winner: String,
    #[serde(default = "default_finalized")]
    finalized: bool,
}

fn default_finalized() -> bool {
    true
}

/// Path segment: user id (e.g. /api/users/{id})
#[derive(Deserialize)]
struct UserPath {
    id: UserId,
}

/// Path segments: user id and group match id
#[derive(Deserialize)]
struct UserScorePath {
    id: UserId,
    match_id: String,
}

/// Path segments: user id and playoff match number
#[derive(Deserialize)]
struct UserWinnerPath {
    id: UserId,
    match_id: PlayoffMatchId,
}

fn error_response(e: PoolError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        PoolError::UserNotFound(_) => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "world-cup-prode",
    })
}

/// The 48 teams.
#[get("/api/teams")]
async fn api_teams(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(g.catalog.teams())
}

/// All 72 group matches.
#[get("/api/matches")]
async fn api_matches(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(all_group_matches(&g.catalog))
}

/// The 6 matches of one group (404 for an unknown group).
#[get("/api/groups/{group}/matches")]
async fn api_group_matches(state: AppState, path: Path<String>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let mut chars = path.chars();
    let matches = match (chars.next(), chars.next()) {
        (Some(group), None) => generate_group_matches(&g.catalog, group.to_ascii_uppercase()),
        _ => Vec::new(),
    };
    if matches.is_empty() {
        return HttpResponse::NotFound().json(serde_json::json!({ "error": "No group" }));
    }
    HttpResponse::Ok().json(matches)
}

/// Register a user (returns it with id; client stores id for subsequent requests).
#[post("/api/users")]
async fn api_add_user(state: AppState, body: Json<AddUserBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let id = match g.add_user(body.username.trim()) {
        Ok(id) => id,
        Err(e) => return error_response(e),
    };
    log::info!("User {} registered", id);
    match g.get_user(id) {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => error_response(e),
    }
}

/// Get a user with their predictions and points.
#[get("/api/users/{id}")]
async fn api_get_user(state: AppState, path: Path<UserPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get_user(path.id) {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => error_response(e),
    }
}

#[delete("/api/users/{id}")]
async fn api_remove_user(state: AppState, path: Path<UserPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.remove_user(path.id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}

/// Set one score prediction; stale winner picks are purged if the qualified set changes.
#[put("/api/users/{id}/predictions/scores")]
async fn api_set_score(state: AppState, path: Path<UserPath>, body: Json<ScoreBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let score = Score::new(body.home, body.away);
    if let Err(e) = set_score_prediction(&mut g, path.id, &body.match_id, score) {
        return error_response(e);
    }
    match g.get_user(path.id) {
        Ok(user) => HttpResponse::Ok().json(&user.predictions),
        Err(e) => error_response(e),
    }
}

#[delete("/api/users/{id}/predictions/scores/{match_id}")]
async fn api_clear_score(state: AppState, path: Path<UserScorePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(e) = clear_score_prediction(&mut g, path.id, &path.match_id) {
        return error_response(e);
    }
    match g.get_user(path.id) {
        Ok(user) => HttpResponse::Ok().json(&user.predictions),
        Err(e) => error_response(e),
    }
}

/// Set one knockout winner pick.
#[put("/api/users/{id}/predictions/winners")]
async fn api_set_winner(state: AppState, path: Path<UserPath>, body: Json<WinnerBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(e) = set_winner_prediction(&mut g, path.id, body.match_id, &body.winner) {
        return error_response(e);
    }
    match g.get_user(path.id) {
        Ok(user) => HttpResponse::Ok().json(&user.predictions),
        Err(e) => error_response(e),
    }
}

#[delete("/api/users/{id}/predictions/winners/{match_id}")]
async fn api_clear_winner(state: AppState, path: Path<UserWinnerPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(e) = clear_winner_prediction(&mut g, path.id, path.match_id) {
        return error_response(e);
    }
    match g.get_user(path.id) {
        Ok(user) => HttpResponse::Ok().json(&user.predictions),
        Err(e) => error_response(e),
    }
}

/// Group tables from the user's predictions (official scores win where finalized).
#[get("/api/users/{id}/standings")]
async fn api_standings(state: AppState, path: Path<UserPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match standings_for(&g, path.id) {
        Ok(standings) => HttpResponse::Ok().json(standings),
        Err(e) => error_response(e),
    }
}

#[get("/api/users/{id}/qualified")]
async fn api_qualified(state: AppState, path: Path<UserPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match qualified_for(&g, path.id) {
        Ok(qualified) => HttpResponse::Ok().json(qualified),
        Err(e) => error_response(e),
    }
}

#[get("/api/users/{id}/bracket")]
async fn api_bracket(state: AppState, path: Path<UserPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match bracket_for(&g, path.id) {
        Ok(bracket) => HttpResponse::Ok().json(bracket),
        Err(e) => error_response(e),
    }
}

/// Points breakdown plus per-match points for the user's group predictions.
#[get("/api/users/{id}/points")]
async fn api_points(state: AppState, path: Path<UserPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get_user(path.id) {
        Ok(user) => HttpResponse::Ok().json(serde_json::json!({
            "points": user.points,
            "group_matches": prediction_points(&user.predictions, &g.results),
        })),
        Err(e) => error_response(e),
    }
}

#[get("/api/results")]
async fn api_results(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(&g.results)
}

/// Record an official group score; returns per-user point deltas.
#[put("/api/results/group")]
async fn api_group_result(state: AppState, body: Json<GroupResultBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let score = Score::new(body.home, body.away);
    match record_group_result(&mut g, &body.match_id, score, body.finalized) {
        Ok(processed) => HttpResponse::Ok().json(processed),
        Err(e) => error_response(e),
    }
}

/// Record an official knockout winner; returns per-user point deltas.
#[put("/api/results/playoff")]
async fn api_playoff_result(state: AppState, body: Json<PlayoffResultBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match record_playoff_result(&mut g, body.match_id, &body.winner, body.finalized) {
        Ok(processed) => HttpResponse::Ok().json(processed),
        Err(e) => error_response(e),
    }
}

#[delete("/api/results/group/{match_id}")]
async fn api_reset_group_result(state: AppState, path: Path<String>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match reset_group_result(&mut g, &path) {
        Ok(processed) => HttpResponse::Ok().json(processed),
        Err(e) => error_response(e),
    }
}

#[delete("/api/results/playoff/{match_id}")]
async fn api_reset_playoff_result(state: AppState, path: Path<PlayoffMatchId>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match reset_playoff_result(&mut g, *path) {
        Ok(processed) => HttpResponse::Ok().json(processed),
        Err(e) => error_response(e),
    }
}

#[get("/api/leaderboard")]
async fn api_leaderboard(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(leaderboard(&g))
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_snapshot_secs() -> u64 {
    300
}

/// Official draw, or the catalog in TEAMS_CSV when set.
fn load_catalog() -> std::io::Result<TeamCatalog> {
    let Ok(path) = std::env::var("TEAMS_CSV") else {
        return Ok(TeamCatalog::official());
    };
    let file = std::fs::File::open(&path)?;
    let catalog = TeamCatalog::from_csv(file)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    log::info!("Loaded team catalog from {}", path);
    Ok(catalog)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let snapshot_secs: u64 = std::env::var("RANK_SNAPSHOT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|s| *s > 0)
        .unwrap_or_else(default_snapshot_secs);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(PredictionPool::new(load_catalog()?)));

    // Background task: periodically store leaderboard ranks as the trend baseline
    let state_snapshot = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(snapshot_secs));
        loop {
            interval.tick().await;
            let mut g = match state_snapshot.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            snapshot_ranks(&mut g);
            log::debug!("Leaderboard snapshot taken ({} users)", g.users.len());
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_teams)
            .service(api_matches)
            .service(api_group_matches)
            .service(api_add_user)
            .service(api_get_user)
            .service(api_remove_user)
            .service(api_set_score)
            .service(api_clear_score)
            .service(api_set_winner)
            .service(api_clear_winner)
            .service(api_standings)
            .service(api_qualified)
            .service(api_bracket)
            .service(api_points)
            .service(api_results)
            .service(api_group_result)
            .service(api_playoff_result)
            .service(api_reset_group_result)
            .service(api_reset_playoff_result)
            .service(api_leaderboard)
    })
    .bind(bind)?
    .run()
    .await
}
