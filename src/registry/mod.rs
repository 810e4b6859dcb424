//! Route and function registration.
//!
//! Routes are declared against an [`App`] (or a prefixed [`Router`] merged
//! into one) with a [`RouteBuilder`] carrying the handler, its declared
//! parameter list and deployment metadata. Registration resolves the
//! handler contract, enforces every declaration-time invariant and stores
//! the finished [`Route`] in the owning [`Registry`].
//!
//! Registration happens once at startup; registries are read-only while
//! events are served and are not safe for concurrent mutation.

mod app;
mod core;
mod route;

pub use app::{App, Router};
pub use core::Registry;
pub use route::{default_status_code, Function, Handler, Route, RouteBuilder};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{HandlerParam, Marker};
    use crate::response::JsonResponse;
    use crate::typing::TypeAnnotation as T;
    use http::Method;
    use serde_json::json;

    fn echo(name: &str) -> RouteBuilder {
        RouteBuilder::new(name).handler(|_| Ok(JsonResponse::new(json!({})).into()))
    }

    #[test]
    fn test_default_status_codes() {
        assert_eq!(default_status_code(&Method::GET), 200);
        assert_eq!(default_status_code(&Method::POST), 201);
        assert_eq!(default_status_code(&Method::DELETE), 204);
        assert_eq!(default_status_code(&Method::PUT), 200);
        assert_eq!(default_status_code(&Method::PATCH), 200);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut router = Router::new();
        router.get("/a", echo("handler")).unwrap();
        let err = router.post("/b", echo("handler")).unwrap_err();
        assert_eq!(err.to_string(), "There is already handler lambda registered.");
    }

    #[test]
    fn test_duplicate_path_and_verb_rejected() {
        let mut router = Router::new();
        router.get("/a", echo("first")).unwrap();
        router.post("/a", echo("second")).unwrap();
        let err = router.get("/a", echo("third")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "There is already existing \"GET\" method definition under \"/a\" path."
        );
    }

    #[test]
    fn test_placeholder_without_descriptor_rejected() {
        let mut router = Router::new();
        let err = router.get("/users/{user_id}", echo("get_user")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "You did not specify user_id in your handler arguments!"
        );
    }

    #[test]
    fn test_path_descriptor_without_placeholder_rejected() {
        let mut router = Router::new();
        let err = router
            .get(
                "/users",
                echo("get_user")
                    .param(HandlerParam::marked("user_id", T::int(), Marker::path())),
            )
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Your user_id path parameter is missing in GET method on \"/users\" path!"
        );
    }

    #[test]
    fn test_prefix_applies_to_registered_paths() {
        let mut router = Router::with_prefix("api");
        router.get("users", echo("list_users")).unwrap();
        assert!(router.registry().route("/api/users", &Method::GET).is_some());
    }

    #[test]
    fn test_include_rewrites_sub_router_paths() {
        let mut parent = Router::with_prefix("/api");
        let mut sub = Router::with_prefix("/auth");
        sub.get("/login", echo("login")).unwrap();
        parent.include(sub).unwrap();
        assert!(parent
            .registry()
            .route("/api/auth/login", &Method::GET)
            .is_some());
    }

    #[test]
    fn test_merging_same_router_twice_fails() {
        let mut parent = Router::new();
        let mut sub = Router::new();
        sub.get("/login", echo("login")).unwrap();
        parent.include(sub.clone()).unwrap();
        assert!(parent.include(sub).is_err());
    }

    #[test]
    fn test_unclassified_param_rejected() {
        let mut router = Router::new();
        let err = router
            .get("/users", echo("list_users").param(HandlerParam::new("x", T::int())))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unrecognized params for GET method on \"/users\" path!"
        );
    }

    #[test]
    fn test_function_shares_name_namespace() {
        let mut router = Router::new();
        router.get("/a", echo("worker")).unwrap();
        let err = router
            .function(Function::new("worker", |_| {
                Ok(JsonResponse::new(json!(null)).into())
            }))
            .unwrap_err();
        assert_eq!(err.to_string(), "There is already worker lambda registered.");
    }
}
