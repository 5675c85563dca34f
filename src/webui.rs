use actix_web::{HttpResponse, Responder, get, web};

use crate::config::Config;

const INDEX_HTML: &str = include_str!("../static/index.html");
const APP_JS: &str = include_str!("../static/app.js");

/// The browser client. One page; `app.js` drives everything over fetch.
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

#[get("/static/app.js")]
pub async fn app_js() -> impl Responder {
    HttpResponse::Ok()
        .content_type("application/javascript; charset=utf-8")
        .body(APP_JS)
}

/// Hands the configured API base to the page before `app.js` runs.
#[get("/config.js")]
pub async fn config_js(config: web::Data<Config>) -> impl Responder {
    let base = serde_json::json!(config.api_base_url);
    HttpResponse::Ok()
        .content_type("application/javascript; charset=utf-8")
        .body(format!("window.HRMS_API_BASE = {base};\n"))
}
