use crate::agent::ModelFactory;
use crate::config::AppConfig;
use crate::handlers::meta::{handle_health, handle_root};
use crate::handlers::search::handle_search;
use rocket::routes;

pub struct ServerState {
    pub config: AppConfig,
    pub model_factory: ModelFactory,
}

pub fn create_server(config: AppConfig) -> rocket::Rocket<rocket::Build> {
    create_server_with_model(config, ModelFactory::OpenAi)
}

pub fn create_server_with_model(
    config: AppConfig,
    model_factory: ModelFactory,
) -> rocket::Rocket<rocket::Build> {
    rocket::build()
        .manage(ServerState {
            config,
            model_factory,
        })
        .mount("/", routes![handle_root, handle_health, handle_search])
}
