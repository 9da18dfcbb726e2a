use actix_web::http::{header, StatusCode};
use actix_web::error::JsonPayloadError;
use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer, ResponseError, Result};
use log::info;
use serde::{Deserialize, Serialize};
use crate::config::{ConfigBounds, TimetableConfig};
use crate::display::{timetable_csv_bytes, DEFAULT_EXPORT_FILE};
use crate::error::TimetableError;
use crate::schedule::{build_timetable, CellKind, Subject, Timetable, UnplacedSubject};

/// Shared, read-only server state
pub struct AppState {
    pub defaults: TimetableConfig,
}

#[derive(Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub config: TimetableConfig,
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

#[derive(Serialize)]
pub struct ConfigResponse {
    defaults: TimetableConfig,
    bounds: ConfigBounds,
}

#[derive(Serialize, Deserialize)]
pub struct CellResponse {
    pub text: String,
    pub kind: CellKind,
}

#[derive(Serialize, Deserialize)]
pub struct DayResponse {
    pub day: String,
    pub cells: Vec<CellResponse>,
}

#[derive(Serialize, Deserialize)]
pub struct TimetableResponse {
    pub period_times: Vec<String>,
    pub days: Vec<DayResponse>,
    pub unplaced: Vec<UnplacedSubject>,
}

impl From<Timetable> for TimetableResponse {
    fn from(timetable: Timetable) -> Self {
        let days = timetable
            .columns
            .into_iter()
            .map(|column| DayResponse {
                day: column.day,
                cells: column
                    .cells
                    .iter()
                    .map(|cell| CellResponse { text: cell.to_string(), kind: cell.kind() })
                    .collect(),
            })
            .collect();

        TimetableResponse {
            period_times: timetable.period_times,
            days,
            unplaced: timetable.unplaced,
        }
    }
}

impl ResponseError for TimetableError {
    fn status_code(&self) -> StatusCode {
        if self.is_input_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({"success": false, "error": self.to_string()}))
    }
}

fn generate(req: GenerateRequest) -> Result<Timetable, TimetableError> {
    let mut rng = rand::thread_rng();
    build_timetable(&req.config, req.subjects, &mut rng)
}

// Defaults and bounds for the form
async fn get_config(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ConfigResponse {
        defaults: state.defaults.clone(),
        bounds: ConfigBounds::default(),
    }))
}

async fn generate_timetable_json(req: web::Json<GenerateRequest>) -> Result<HttpResponse> {
    let timetable = generate(req.into_inner())?;
    Ok(HttpResponse::Ok().json(TimetableResponse::from(timetable)))
}

async fn generate_timetable_csv(req: web::Json<GenerateRequest>) -> Result<HttpResponse> {
    let timetable = generate(req.into_inner())?;
    let body = timetable_csv_bytes(&timetable)?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", DEFAULT_EXPORT_FILE),
        ))
        .body(body))
}

async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Body that does not fit the request types gets the same JSON error shape as validation failures
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    TimetableError::InvalidConfig(err.to_string()).into()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/", web::get().to(index))
        .route("/api/config", web::get().to(get_config))
        .route("/api/timetable", web::post().to(generate_timetable_json))
        .route("/api/timetable/csv", web::post().to(generate_timetable_csv));
}

/// Address the server is reachable at, for the startup message
pub fn site_url(host: &str, port: u16) -> String {
    format!("http://{}:{}", host, port)
}

pub async fn start_server(host: &str, port: u16, defaults: TimetableConfig) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState { defaults });

    info!("Starting web server on {}", site_url(host, port));
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind((host, port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    fn app_state() -> web::Data<AppState> {
        web::Data::new(AppState { defaults: TimetableConfig::default() })
    }

    #[actix_web::test]
    async fn site_url_uses_bound_host() {
        assert_eq!(site_url("127.0.0.1", 9000), "http://127.0.0.1:9000");
        assert_eq!(site_url("0.0.0.0", 8080), "http://0.0.0.0:8080");
    }

    #[actix_web::test]
    async fn serves_index_page() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn returns_defaults() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/config").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["defaults"]["periods_per_day"], 7);
        assert_eq!(body["bounds"]["max_subjects"], 20);
    }

    #[actix_web::test]
    async fn generates_timetable_json() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/timetable")
            .set_json(serde_json::json!({
                "config": {"num_days": 5, "periods_per_day": 7, "lunch_period": 4, "period_duration": 45, "start_time": "09:00"},
                "subjects": [{"name": "Math", "teacher": "Mr. A", "weekly_slots": 4}]
            }))
            .to_request();
        let body: TimetableResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.period_times.len(), 7);
        assert_eq!(body.days.len(), 5);
        let cells: Vec<&CellResponse> = body.days.iter().flat_map(|d| d.cells.iter()).collect();
        assert_eq!(cells.iter().filter(|c| c.text == "Math\n(Mr. A)").count(), 4);
        assert_eq!(cells.iter().filter(|c| c.kind == CellKind::Free).count(), 26);
        assert_eq!(cells.iter().filter(|c| c.kind == CellKind::Lunch).count(), 5);
        assert!(body.unplaced.is_empty());
    }

    #[actix_web::test]
    async fn rejects_empty_subject_list() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/timetable")
            .set_json(serde_json::json!({"subjects": []}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
    }

    #[actix_web::test]
    async fn malformed_body_gets_json_error() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;
        let bodies = [
            serde_json::json!({"subjects": [{"name": "Math", "weekly_slots": -1}]}),
            serde_json::json!({"config": {"num_days": null}, "subjects": [{"name": "Math", "weekly_slots": 2}]}),
        ];
        for body in bodies {
            let req = test::TestRequest::post().uri("/api/timetable").set_json(&body).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let json: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(json["success"], false);
            assert!(json["error"].as_str().is_some_and(|e| !e.is_empty()));
        }
    }

    #[actix_web::test]
    async fn downloads_csv() {
        let app = test::init_service(App::new().app_data(app_state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/timetable/csv")
            .set_json(serde_json::json!({
                "subjects": [{"name": "Art", "weekly_slots": 2}]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let disposition = resp
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        assert!(disposition.contains(DEFAULT_EXPORT_FILE));

        let body = test::read_body(resp).await;
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.starts_with("Period Time,Monday,Tuesday,Wednesday,Thursday,Friday"));
        assert_eq!(text.matches("Art").count(), 2);
    }
}
