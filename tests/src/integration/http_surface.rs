//! # HTTP Surface
//!
//! The full router (auth, tracing, handlers) in front of live capabilities.

#[cfg(test)]
mod tests {
    use crate::integration::harness::{admin, bearer, member, Harness};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use serde_json::Value;
    use shared_types::AuthenticatedUser;
    use std::sync::atomic::Ordering;
    use tower::ServiceExt;

    fn request(
        method: Method,
        uri: &str,
        user: Option<&AuthenticatedUser>,
        body: &str,
    ) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(user) = user {
            builder = builder.header(header::AUTHORIZATION, bearer(user));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let h = Harness::start().await;
        let app = h.gateway.router();
        let owner = member(5);

        let created = app
            .clone()
            .oneshot(request(
                Method::POST,
                "/datacenters/",
                Some(&owner),
                r#"{"name":"edge","type":"aws","access_key_id":"a","secret_access_key":"s","group_id":1}"#,
            ))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::OK);
        let created = json(created).await;
        assert_eq!(created["group_id"], 5);
        let id = created["id"].as_str().unwrap().to_string();

        let fetched = app
            .clone()
            .oneshot(request(
                Method::GET,
                &format!("/datacenters/{}", id),
                Some(&owner),
                "",
            ))
            .await
            .unwrap();
        assert_eq!(fetched.status(), StatusCode::OK);
        assert_eq!(json(fetched).await["secret_access_key"], "s");

        let listed = app
            .clone()
            .oneshot(request(Method::GET, "/datacenters/", Some(&owner), ""))
            .await
            .unwrap();
        let listed = json(listed).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert!(listed[0].get("secret_access_key").is_none());

        let deleted = app
            .clone()
            .oneshot(request(
                Method::DELETE,
                &format!("/datacenters/{}", id),
                Some(&owner),
                "",
            ))
            .await
            .unwrap();
        assert_eq!(deleted.status(), StatusCode::OK);

        let gone = app
            .oneshot(request(
                Method::GET,
                &format!("/datacenters/{}", id),
                Some(&owner),
                "",
            ))
            .await
            .unwrap();
        assert_eq!(gone.status(), StatusCode::NOT_FOUND);

        let stats = h.gateway.rpc_stats().unwrap();
        assert!(stats.total_completed.load(Ordering::Relaxed) > 0);
        assert_eq!(stats.total_timeouts.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let h = Harness::start().await;
        let app = h.gateway.router();

        let cases = [
            (Method::GET, "/datacenters/", None, "", StatusCode::UNAUTHORIZED),
            (
                Method::POST,
                "/datacenters/",
                Some(member(0)),
                r#"{"name":"x","type":"fake"}"#,
                StatusCode::UNAUTHORIZED,
            ),
            (
                Method::POST,
                "/datacenters/",
                Some(member(1)),
                r#"{"name":"test","type":"fake"}"#,
                StatusCode::CONFLICT,
            ),
            (
                Method::POST,
                "/datacenters/",
                Some(member(1)),
                r#"{"name":"","type":"fake"}"#,
                StatusCode::BAD_REQUEST,
            ),
            (
                Method::PUT,
                "/datacenters/2",
                Some(member(1)),
                r#"{"password":"x"}"#,
                StatusCode::FORBIDDEN,
            ),
            (
                Method::DELETE,
                "/datacenters/1",
                Some(member(1)),
                "",
                StatusCode::CONFLICT,
            ),
            (
                Method::GET,
                "/datacenters/2",
                Some(member(1)),
                "",
                StatusCode::NOT_FOUND,
            ),
            (
                Method::GET,
                "/services/1",
                Some(member(2)),
                "",
                StatusCode::NOT_FOUND,
            ),
        ];

        for (method, uri, user, body, expected) in cases {
            let response = app
                .clone()
                .oneshot(request(method.clone(), uri, user.as_ref(), body))
                .await
                .unwrap();
            assert_eq!(response.status(), expected, "{} {}", method, uri);

            let body = json(response).await;
            assert_eq!(body["code"], expected.as_u16());
        }
    }

    #[tokio::test]
    async fn test_admin_list_spans_tenants() {
        let h = Harness::start().await;
        let response = h
            .gateway
            .router()
            .oneshot(request(Method::GET, "/datacenters", Some(&admin()), ""))
            .await
            .unwrap();

        let list = json(response).await;
        let list = list.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|dc| dc.get("password").is_none()));
    }

    #[tokio::test]
    async fn test_health_without_token() {
        let h = Harness::start().await;
        let response = h
            .gateway
            .router()
            .oneshot(request(Method::GET, "/health", None, ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_backend_down_is_504() {
        let mut h = Harness::start().await;
        h.stop_capabilities().await;

        let response = h
            .gateway
            .router()
            .oneshot(request(Method::GET, "/services/", Some(&admin()), ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }
}
