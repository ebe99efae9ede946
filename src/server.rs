use crate::config::Config;
use crate::dashboard::{build_page, Dashboard};
use crate::display::output::{display_error, display_success};
use crate::error::AppError;
use actix_web::http::header::ContentType;
use actix_web::{web, App, HttpResponse, HttpServer};

async fn index(config: web::Data<Config>) -> HttpResponse {
    let config = config.into_inner();
    match web::block(move || build_page(&config)).await {
        Ok(Ok(html)) => HttpResponse::Ok().content_type(ContentType::html()).body(html),
        Ok(Err(e)) => render_failure(e.to_string()),
        Err(e) => render_failure(e.to_string()),
    }
}

async fn stats(config: web::Data<Config>) -> HttpResponse {
    let config = config.into_inner();
    match web::block(move || Dashboard::load(&config)).await {
        Ok(Ok(dashboard)) => HttpResponse::Ok().json(dashboard),
        Ok(Err(e)) => render_failure(e.to_string()),
        Err(e) => render_failure(e.to_string()),
    }
}

fn render_failure(message: String) -> HttpResponse {
    display_error(&message);
    HttpResponse::InternalServerError()
        .content_type(ContentType::plaintext())
        .body(message)
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index));
    cfg.route("/api/stats", web::get().to(stats));
}

/// Serves the dashboard until interrupted.
pub async fn serve(config: Config) -> Result<(), AppError> {
    let bind = (config.host.clone(), config.port);
    let data = web::Data::new(config);

    let server = HttpServer::new(move || App::new().app_data(data.clone()).configure(routes))
        .workers(1)
        .bind(bind.clone())
        .map_err(|e| AppError::ServerError(format!("cannot bind {}:{}: {}", bind.0, bind.1, e)))?;

    display_success(&format!("Dashboard running at http://{}:{}/", bind.0, bind.1));

    server
        .run()
        .await
        .map_err(|e| AppError::ServerError(e.to_string()))
}
