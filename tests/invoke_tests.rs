mod common;

use common::{app, ExampleRequest, ExampleResponse};
use http::Method;
use serde_json::json;
use slsrouter::error::ApiError;
use slsrouter::params::{HandlerParam, Marker};
use slsrouter::registry::RouteBuilder;
use slsrouter::response::JsonResponse;
use slsrouter::testing::{TestClient, TestRequest};
use slsrouter::typing::TypeAnnotation as T;

const CAR_ID: &str = "7f2c79a4-3b7e-4a9f-9f2a-24c52cf0f7d4";

fn typed_route(name: &str) -> RouteBuilder {
    RouteBuilder::new(name)
        .status_code(200)
        .response_class::<ExampleResponse>()
        .authorizer("jwt")
        .params(vec![
            HandlerParam::body("request", slsrouter::ModelSpec::of::<ExampleRequest>()),
            HandlerParam::marked("user_id", T::int(), Marker::path()),
            HandlerParam::marked("car_id", T::uuid(), Marker::path()),
            HandlerParam::marked("user_id_header", T::int(), Marker::header().named("user_id")),
            HandlerParam::marked("car_id_query", T::uuid(), Marker::query().named("car_id")),
        ])
        .handler(|args| {
            assert!(args.get("user_id").unwrap().as_int().is_some());
            assert!(args.get("car_id").unwrap().as_uuid().is_some());
            assert!(args.get("user_id_header").unwrap().as_int().is_some());
            assert!(args.get("car_id_query").unwrap().as_uuid().is_some());
            assert_eq!(args.body.as_ref().unwrap()["x"], json!(1));
            Ok(JsonResponse::new(json!({"message": "done"}))
                .status(201)
                .header("X-Total-Count", "1")
                .into())
        })
}

fn typed_request() -> TestRequest {
    TestRequest::new()
        .json(&json!({"x": 1, "y": 2}))
        .path_param("user_id", "123")
        .path_param("car_id", CAR_ID)
        .header("user_id", "123")
        .query("car_id", CAR_ID)
}

#[test]
fn test_full_pipeline_per_verb() {
    common::init_tracing();
    let path = "/path/{user_id}/{car_id}";
    for method in [Method::POST, Method::PUT, Method::PATCH] {
        let mut app = app();
        app.route(method.clone(), path, typed_route("lambda")).unwrap();

        let client = TestClient::new(&app);
        let response = client.request(method, path, typed_request()).unwrap();
        assert_eq!(response.status_code, 201);
        assert_eq!(response.json(), json!({"message": "done"}));
        assert_eq!(response.headers["Content-Type"], "application/json");
        assert_eq!(response.headers["X-Total-Count"], "1");
    }
}

#[test]
fn test_domain_error_single_message() {
    let mut app = app();
    app.get(
        "/path",
        RouteBuilder::new("lambda")
            .response_class::<ExampleResponse>()
            .handler(|_| Err(ApiError::new("Something went wrong", 400))),
    )
    .unwrap();

    let response = TestClient::new(&app)
        .get("/path", TestRequest::new())
        .unwrap();
    assert_eq!(response.status_code, 400);
    assert_eq!(response.json(), json!({"message": "Something went wrong"}));
}

#[test]
fn test_domain_error_multiple_messages_and_headers() {
    let mut app = app();
    app.get(
        "/path",
        RouteBuilder::new("lambda").handler(|_| {
            Err(
                ApiError::with_messages(vec!["m1".to_string(), "m2".to_string()], 404)
                    .header("X-Reason", "gone"),
            )
        }),
    )
    .unwrap();

    let response = TestClient::new(&app)
        .get("/path", TestRequest::new())
        .unwrap();
    assert_eq!(response.status_code, 404);
    assert_eq!(
        response.json(),
        json!({"errors": [{"message": "m1"}, {"message": "m2"}]})
    );
    assert_eq!(response.headers["X-Reason"], "gone");
}

#[test]
fn test_validation_errors_accumulate_in_source_order() {
    let mut app = app();
    app.post(
        "/items/{item_id}",
        RouteBuilder::new("create_item")
            .params(vec![
                HandlerParam::marked("item_id", T::int(), Marker::path()),
                HandlerParam::marked("token", T::int(), Marker::header()),
                HandlerParam::marked("limit", T::int(), Marker::query()),
                HandlerParam::body("request", slsrouter::ModelSpec::of::<ExampleRequest>()),
            ])
            .handler(|_| Ok(JsonResponse::new(json!({})).into())),
    )
    .unwrap();

    let response = TestClient::new(&app)
        .post(
            "/items/{item_id}",
            TestRequest::new()
                .path_param("item_id", "abc")
                .header("token", "abc")
                .query("limit", "abc"),
        )
        .unwrap();

    assert_eq!(response.status_code, 422);
    let errors: Vec<String> = response.json()["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["message"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        errors,
        vec![
            "item_id should be int type.",
            "token should be int type.",
            "limit should be int type.",
            "Request body is empty!",
        ]
    );
}

#[test]
fn test_missing_required_params_report_422() {
    let mut app = app();
    app.get(
        "/search",
        RouteBuilder::new("search")
            .param(HandlerParam::marked("q", T::str(), Marker::query()))
            .handler(|_| Ok(JsonResponse::new(json!({})).into())),
    )
    .unwrap();

    let response = TestClient::new(&app)
        .get("/search", TestRequest::new())
        .unwrap();
    assert_eq!(response.status_code, 422);
    assert_eq!(
        response.json(),
        json!({"message": "Required parameter q not found in query."})
    );
}

#[test]
fn test_default_status_codes_apply_per_verb() {
    let mut app = app();
    app.get(
        "/resource",
        RouteBuilder::new("get_resource")
            .handler(|_| Ok(JsonResponse::new(json!({})).into())),
    )
    .unwrap();
    app.delete(
        "/resource",
        RouteBuilder::new("delete_resource")
            .handler(|_| Ok(JsonResponse::new(json!({})).into())),
    )
    .unwrap();

    let client = TestClient::new(&app);
    assert_eq!(
        client.get("/resource", TestRequest::new()).unwrap().status_code,
        200
    );
    assert_eq!(
        client
            .delete("/resource", TestRequest::new())
            .unwrap()
            .status_code,
        204
    );
}

#[test]
fn test_skip_validation_hands_over_raw_event() {
    let mut app = app();
    app.get(
        "/raw",
        RouteBuilder::new("raw")
            .skip_validation()
            .handler(|args| {
                let event = args.event.as_ref().unwrap();
                assert_eq!(event.http_method, "GET");
                assert!(args.context.is_some());
                Ok(JsonResponse::new(json!({"seen": true})).into())
            }),
    )
    .unwrap();

    let response = TestClient::new(&app)
        .get("/raw", TestRequest::new().query("unchecked", "anything"))
        .unwrap();
    assert_eq!(response.status_code, 200);
    assert_eq!(response.json(), json!({"seen": true}));
}

#[test]
fn test_event_and_context_injection() {
    let mut app = app();
    app.get(
        "/who",
        RouteBuilder::new("who")
            .params(vec![
                HandlerParam::new("event", T::str()),
                HandlerParam::new("context", T::str()),
            ])
            .handler(|args| {
                assert!(args.event.is_some());
                assert!(args.context.is_some());
                Ok(JsonResponse::new(json!({})).into())
            }),
    )
    .unwrap();

    let response = TestClient::new(&app)
        .get("/who", TestRequest::new())
        .unwrap();
    assert_eq!(response.status_code, 200);
}

#[test]
fn test_response_class_violation_propagates() {
    let mut app = app();
    app.get(
        "/broken",
        RouteBuilder::new("broken")
            .response_class::<ExampleResponse>()
            .handler(|_| Ok(JsonResponse::new(json!({"message": 42})).into())),
    )
    .unwrap();

    let result = TestClient::new(&app).get("/broken", TestRequest::new());
    assert!(result.is_err());
}

#[test]
fn test_same_path_different_verbs_coexist() {
    let mut app = app();
    app.get(
        "/things",
        RouteBuilder::new("list_things")
            .handler(|_| Ok(JsonResponse::new(json!([])).into())),
    )
    .unwrap();
    app.post(
        "/things",
        RouteBuilder::new("create_thing")
            .handler(|_| Ok(JsonResponse::new(json!({})).into())),
    )
    .unwrap();

    let err = app
        .get(
            "/things",
            RouteBuilder::new("list_things_again")
                .handler(|_| Ok(JsonResponse::new(json!([])).into())),
        )
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "There is already existing \"GET\" method definition under \"/things\" path."
    );
}
