//! Single binary web server: JSON API over in-memory tournament sessions.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use swiss_draw_web::{
    ContestantId, MatchupId, PairingMode, RoundId, Tournament, TournamentError, TournamentId,
};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

const CLEANUP_INTERVAL: Duration = Duration::from_secs(30 * 60);

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    #[serde(default)]
    name: String,
    #[serde(default)]
    mode: PairingMode,
}

#[derive(Deserialize)]
struct ContestantNameBody {
    name: String,
}

#[derive(Deserialize)]
struct SetModeBody {
    mode: PairingMode,
}

#[derive(Deserialize)]
struct SetWinnerBody {
    matchup_id: MatchupId,
    contestant_id: ContestantId,
}

#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Deserialize)]
struct TournamentContestantPath {
    id: TournamentId,
    contestant_id: ContestantId,
}

#[derive(Deserialize)]
struct TournamentRoundPath {
    id: TournamentId,
    round_id: RoundId,
}

/// Standings row with the display name and 1-based rank filled in.
#[derive(Serialize)]
struct StandingView<'a> {
    rank: usize,
    contestant_id: ContestantId,
    name: &'a str,
    wins: u32,
    opponent_strength: u32,
    defeated_opponent_strength: u32,
}

fn error_response(e: TournamentError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

/// Look up a tournament, refresh its activity time, and run `f` on it.
fn with_tournament<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> HttpResponse,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(&mut entry.tournament)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

/// Apply a fallible change and answer with the updated tournament.
fn apply<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> Result<(), TournamentError>,
{
    with_tournament(state, id, |t| match f(t) {
        Ok(()) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(e),
    })
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "swiss-draw-web",
    })
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(
    state: AppState,
    body: Option<Json<CreateTournamentBody>>,
) -> HttpResponse {
    let (name, mode) = body
        .map(|b| {
            let b = b.into_inner();
            (b.name, b.mode)
        })
        .unwrap_or_default();
    let tournament = Tournament::new(name, mode);
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let response = HttpResponse::Ok().json(&tournament);
    g.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    log::info!("Created tournament {}", id);
    response
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| HttpResponse::Ok().json(&*t))
}

/// Add a contestant. Clears round history.
#[post("/api/tournaments/{id}/contestants")]
async fn api_add_contestant(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<ContestantNameBody>,
) -> HttpResponse {
    apply(&state, path.id, |t| t.add_contestant(&body.name).map(|_| ()))
}

#[put("/api/tournaments/{id}/contestants/{contestant_id}")]
async fn api_rename_contestant(
    state: AppState,
    path: Path<TournamentContestantPath>,
    body: Json<ContestantNameBody>,
) -> HttpResponse {
    apply(&state, path.id, |t| {
        t.rename_contestant(path.contestant_id, &body.name)
    })
}

/// Remove a contestant. Clears round history.
#[delete("/api/tournaments/{id}/contestants/{contestant_id}")]
async fn api_remove_contestant(
    state: AppState,
    path: Path<TournamentContestantPath>,
) -> HttpResponse {
    apply(&state, path.id, |t| t.remove_contestant(path.contestant_id))
}

/// Switch between Swiss and round-robin (before the first round only).
#[put("/api/tournaments/{id}/mode")]
async fn api_set_mode(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<SetModeBody>,
) -> HttpResponse {
    apply(&state, path.id, |t| t.set_mode(body.mode))
}

/// Generate the next round; `complete: true` once no pairing is left.
#[post("/api/tournaments/{id}/rounds/next")]
async fn api_next_round(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        match t.next_round().map(|r| r.is_some()) {
            Ok(true) => HttpResponse::Ok().json(&*t),
            Ok(false) => HttpResponse::Ok().json(serde_json::json!({
                "complete": true,
                "tournament": &*t,
            })),
            Err(e) => error_response(e),
        }
    })
}

/// Declare (or, if repeated, un-declare) the winner of one matchup. Bye matchups keep their result.
#[put("/api/tournaments/{id}/rounds/{round_id}/winner")]
async fn api_set_winner(
    state: AppState,
    path: Path<TournamentRoundPath>,
    body: Json<SetWinnerBody>,
) -> HttpResponse {
    apply(&state, path.id, |t| {
        t.set_winner(path.round_id, body.matchup_id, body.contestant_id)
    })
}

#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        let rows = t.standings();
        let view: Vec<StandingView> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| StandingView {
                rank: i + 1,
                contestant_id: row.contestant_id,
                name: t.display_name(row.contestant_id).unwrap_or_default(),
                wins: row.wins,
                opponent_strength: row.opponent_strength,
                defeated_opponent_strength: row.defeated_opponent_strength,
            })
            .collect();
        HttpResponse::Ok().json(view)
    })
}

/// Restart: drop all rounds, keep contestants.
#[post("/api/tournaments/{id}/restart")]
async fn api_restart_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    apply(&state, path.id, |t| {
        t.restart();
        Ok(())
    })
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_contestant)
            .service(api_rename_contestant)
            .service(api_remove_contestant)
            .service(api_set_mode)
            .service(api_next_round)
            .service(api_set_winner)
            .service(api_standings)
            .service(api_restart_tournament)
    })
    .bind(bind)?
    .run()
    .await
}
