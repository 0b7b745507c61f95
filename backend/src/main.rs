#[macro_use]
extern crate rocket;

mod api;
mod config;
mod models;
mod services;
mod utils;

use rocket::response::content::RawHtml;
use services::analysis::AnalysisClient;
use services::youtube::YoutubeClient;

pub struct AppState {
    pub youtube: YoutubeClient,
    pub analysis: AnalysisClient,
}

#[get("/")]
fn index() -> RawHtml<&'static str> {
    RawHtml(
        r#"<html>
        <head><title>YouTube Comments Analyzer</title></head>
        <body>
            <h1>YouTube Comments Analyzer</h1>
            <p>This is an API service. Use the endpoints:</p>
            <ul>
                <li>/api/analyze (POST) - Analyze YouTube video comments</li>
                <li>/api/download-csv (POST) - Download comments as CSV</li>
            </ul>
        </body>
    </html>"#,
    )
}

#[launch]
fn rocket() -> _ {
    config::load_environment();
    config::init_logger();

    let state = config::create_app_state();
    let cors = config::create_cors().expect("Failed to create CORS options");

    rocket::custom(config::figment())
        .manage(state)
        .mount("/", routes![index])
        .mount("/api", routes![api::analyze_video, api::download_csv])
        .attach(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocket::http::{ContentType, Status};
    use rocket::local::asynchronous::Client;

    #[rocket::async_test]
    async fn index_describes_the_endpoints() {
        let client = Client::tracked(rocket::build().mount("/", routes![index]))
            .await
            .expect("valid rocket instance");

        let response = client.get("/").dispatch().await;

        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.content_type(), Some(ContentType::HTML));
        let body = response.into_string().await.expect("body");
        assert!(body.contains("/api/analyze"));
        assert!(body.contains("/api/download-csv"));
    }
}
