use crate::services::analysis::AnalysisClient;
use crate::services::youtube::YoutubeClient;
use crate::AppState;
use anyhow::Result;
use env_logger::Builder;
use lazy_static::lazy_static;
use log::{info, LevelFilter};
use rocket::figment::Figment;
use rocket::http::Method;
use rocket_cors::{AllowedHeaders, AllowedOrigins, CorsOptions};
use std::env;

lazy_static! {
    pub static ref YOUTUBE_API_KEY: String =
        env::var("YOUTUBE_API_KEY").expect("YOUTUBE_API_KEY environment variable must be set");
    pub static ref MINDS_API_KEY: String =
        env::var("MINDS_API_KEY").expect("MINDS_API_KEY environment variable must be set");
    pub static ref ANALYSIS_BASE_URL: String =
        env::var("ANALYSIS_BASE_URL").unwrap_or_else(|_| "https://llm.mdb.ai".to_string());
    pub static ref ANALYSIS_MODEL: String =
        env::var("ANALYSIS_MODEL").unwrap_or_else(|_| "aiagent".to_string());
    pub static ref PORT: u16 = env::var("PORT")
        .unwrap_or_else(|_| "5000".to_string())
        .parse::<u16>()
        .unwrap_or(5000);
}

pub fn init_logger() {
    Builder::new().filter_level(LevelFilter::Info).init();
    info!("Starting Rocket backend...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

pub fn figment() -> Figment {
    rocket::Config::figment()
        .merge(("port", *PORT))
        .merge(("address", "0.0.0.0"))
}

pub fn create_app_state() -> AppState {
    AppState {
        youtube: YoutubeClient::new(YOUTUBE_API_KEY.clone()),
        analysis: AnalysisClient::new(
            MINDS_API_KEY.clone(),
            ANALYSIS_BASE_URL.clone(),
            ANALYSIS_MODEL.clone(),
        ),
    }
}

pub fn create_cors() -> Result<rocket_cors::Cors> {
    let cors = CorsOptions::default()
        .allowed_origins(AllowedOrigins::all())
        .allowed_methods(
            vec![Method::Get, Method::Post, Method::Options]
                .into_iter()
                .map(From::from)
                .collect(),
        )
        .allowed_headers(AllowedHeaders::some(&["Accept", "Content-Type"]))
        .to_cors()
        .map_err(|e| anyhow::anyhow!("Failed to create CORS options: {}", e))?;

    Ok(cors)
}
