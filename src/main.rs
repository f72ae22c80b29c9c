use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use log::info;

use classifier_backend::config::Config;
use classifier_backend::handlers;
use classifier_backend::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    let state = web::Data::new(AppState::initialize(&config));

    info!("Server running at http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(middleware::Logger::default())
            .wrap(cors)
            .app_data(state.clone())
            .configure(handlers::routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
