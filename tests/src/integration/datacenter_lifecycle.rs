//! # Datacenter Lifecycle Over The Bus
//!
//! Tenant invariants enforced by the gateway handlers while every read and
//! write crosses the bus:
//!
//! - creation stamps the creator's group, whatever the body says
//! - names are unique across all tenants
//! - a referenced datacenter cannot be deleted
//! - lists are tenant-filtered and redacted
//! - a backend that stops answering surfaces as a timeout

#[cfg(test)]
mod tests {
    use crate::integration::harness::{admin, member, Harness};
    use api_gateway::GatewayError;
    use resource_store::EntityStore;
    use shared_types::Datacenter;

    #[tokio::test]
    async fn test_create_stamps_creator_group() {
        let h = Harness::start().await;
        let handlers = h.handlers();

        for (i, claimed) in [0u64, 1, 2, 99].into_iter().enumerate() {
            let body = format!(
                r#"{{"name":"dc-{}","type":"fake","group_id":{}}}"#,
                i, claimed
            );
            let created = handlers.create(&member(3), body.as_bytes()).await.unwrap();

            assert_eq!(created.group_id, 3);
            let stored = h.datacenters.find_by_id(&created.id).unwrap().unwrap();
            assert_eq!(stored.group_id, 3);
        }
    }

    #[tokio::test]
    async fn test_name_unique_across_tenants() {
        let h = Harness::start().await;
        let handlers = h.handlers();

        // "test2" belongs to group 2.
        let result = handlers
            .create(&member(1), br#"{"name":"test2","type":"fake"}"#)
            .await;
        assert!(matches!(result, Err(GatewayError::Conflict(_))));
        assert_eq!(h.datacenters.len(), 2);

        let created = handlers
            .create(&member(1), br#"{"name":"unique","type":"fake"}"#)
            .await
            .unwrap();
        assert!(!created.id.is_empty());
        assert_eq!(created.id, "3");
    }

    #[tokio::test]
    async fn test_referenced_delete_conflicts() {
        let h = Harness::start().await;
        let handlers = h.handlers();

        let result = handlers.delete(&member(1), "1").await;
        assert!(matches!(result, Err(GatewayError::Conflict(_))));
        assert!(h.datacenters.find_by_id("1").unwrap().is_some());
    }

    #[tokio::test]
    async fn test_unreferenced_delete_then_not_found() {
        let h = Harness::start().await;
        let handlers = h.handlers();

        handlers.delete(&member(2), "2").await.unwrap();

        let result = handlers.get(&member(2), "2").await;
        assert!(matches!(result, Err(GatewayError::NotFound(_))));
        assert!(h.datacenters.find_by_id("2").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_scoping_and_redaction() {
        let h = Harness::start().await;
        let handlers = h.handlers();

        let all = handlers.list(&admin()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(Datacenter::is_redacted));

        let own = handlers.list(&member(2)).await.unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].group_id, 2);
        assert!(own[0].is_redacted());
    }

    #[tokio::test]
    async fn test_cross_tenant_reads_are_not_found() {
        let h = Harness::start().await;
        let handlers = h.handlers();

        let result = handlers.get(&member(1), "2").await;
        assert!(matches!(result, Err(GatewayError::NotFound(_))));

        let own = handlers.get(&member(2), "2").await.unwrap();
        assert_eq!(own.secret_access_key, "shh");
    }

    #[tokio::test]
    async fn test_credentials_update_over_bus() {
        let h = Harness::start().await;
        let handlers = h.handlers();

        handlers
            .update(&member(1), "1", br#"{"password":"rotated","name":"hijack"}"#)
            .await
            .unwrap();

        let stored = h.datacenters.find_by_id("1").unwrap().unwrap();
        assert_eq!(stored.password, "rotated");
        assert_eq!(stored.name, "test");

        let foreign = handlers
            .update(&member(1), "2", br#"{"password":"x"}"#)
            .await;
        assert!(matches!(foreign, Err(GatewayError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_silent_backend_is_timeout() {
        let mut h = Harness::start().await;
        h.stop_capabilities().await;

        let result = h.handlers().list(&admin()).await;
        assert!(matches!(result, Err(GatewayError::Timeout(_))));
    }
}
