//! Extractor configuration turning malformed input into domain errors.
//!
//! Actix rejects unparsable JSON bodies and query strings with plain-text
//! responses by default. These handlers keep the JSON error contract for
//! those paths too.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use serde_json::json;

use crate::domain::Error;

fn body_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let reason = err.to_string();
    Error::invalid_request(format!("Invalid request body: {reason}"))
        .with_details(json!({ "code": "invalid_body" }))
        .into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let reason = err.to_string();
    Error::invalid_request(format!("Invalid query string: {reason}"))
        .with_details(json!({ "code": "invalid_query" }))
        .into()
}

/// JSON extractor settings returning [`Error`] bodies on failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(body_error)
}

/// Query extractor settings returning [`Error`] bodies on failure.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error)
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, post, test as actix_test};
    use rstest::rstest;
    use serde::Deserialize;
    use serde_json::Value;

    use super::*;

    #[derive(Deserialize)]
    struct Body {
        name: String,
    }

    #[post("/echo")]
    async fn echo(body: web::Json<Body>) -> HttpResponse {
        HttpResponse::Ok().body(body.into_inner().name)
    }

    #[rstest]
    #[case("{not json")]
    #[case("[]")]
    #[actix_web::test]
    async fn malformed_bodies_are_invalid_requests(#[case] payload: &'static str) {
        let app =
            actix_test::init_service(App::new().app_data(json_config()).service(echo)).await;
        let request = actix_test::TestRequest::post()
            .uri("/echo")
            .insert_header(("content-type", "application/json"))
            .set_payload(payload)
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["code"], "invalid_body");
    }
}
