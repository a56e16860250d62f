//! # Broker Flow Scenarios
//!
//! The request/respond/remove lifecycle from the caller's point of view,
//! including idempotency conflicts and the JSON wire format assertions.

#[cfg(test)]
mod tests {
    use crate::{definition, device, request, response, service, t0};
    use iot_registry::prelude::*;

    const U1: &str = "ffbc9005-c62a-4563-a8f7-b32bba27d707";

    fn seeded_ctx<'a>(
        store: &'a InMemoryLedger,
        identity: &'a StaticIdentity,
        events: &'a RecordingEventSink,
    ) -> TransactionContext<'a> {
        let ctx = TransactionContext::new(store, identity, events);
        DeviceRegistryContract
            .register(&ctx, &definition(&device("org1", "device1")))
            .unwrap();
        ServiceRegistryContract
            .register(&ctx, &definition(&service("org1", "device1", "service1")))
            .unwrap();
        ctx
    }

    #[test]
    fn request_respond_get_remove_round_trip() {
        crate::init_tracing();
        let store = InMemoryLedger::new();
        let identity = StaticIdentity::new("org1", "device1");
        let events = RecordingEventSink::new();
        let ctx = seeded_ctx(&store, &identity, &events);
        let svc = service("org1", "device1", "service1");

        ServiceBrokerContract
            .request(&ctx, &definition(&request(U1, &svc)))
            .unwrap();
        ServiceBrokerContract
            .respond(&ctx, &definition(&response(U1)))
            .unwrap();

        let pair = ServiceBrokerContract.get(&ctx, U1).unwrap();
        assert_eq!(pair.request.method, "GET");
        assert_eq!(pair.request.time, Some(t0()));
        let resp = pair.response.expect("response must be present");
        assert_eq!(resp.request_id, U1);

        ServiceBrokerContract.remove(&ctx, U1).unwrap();
        assert!(ServiceBrokerContract
            .get_all(&ctx, "org1", "device1", "service1")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn duplicate_request_and_duplicate_response_are_conflicts() {
        let store = InMemoryLedger::new();
        let identity = StaticIdentity::new("org1", "device1");
        let events = RecordingEventSink::new();
        let ctx = seeded_ctx(&store, &identity, &events);
        let svc = service("org1", "device1", "service1");

        ServiceBrokerContract
            .request(&ctx, &definition(&request(U1, &svc)))
            .unwrap();
        let err = ServiceBrokerContract
            .request(&ctx, &definition(&request(U1, &svc)))
            .unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyExists(_)));

        ServiceBrokerContract
            .respond(&ctx, &definition(&response(U1)))
            .unwrap();
        let err = ServiceBrokerContract
            .respond(&ctx, &definition(&response(U1)))
            .unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyExists(_)));
    }

    #[test]
    fn requests_are_enumerable_by_service_without_scanning_requests() {
        let store = InMemoryLedger::new();
        let identity = StaticIdentity::new("org1", "device1");
        let events = RecordingEventSink::new();
        let ctx = seeded_ctx(&store, &identity, &events);
        let svc = service("org1", "device1", "service1");

        let ids = [
            "00000000-0000-4000-8000-000000000001",
            "00000000-0000-4000-8000-000000000002",
            "00000000-0000-4000-8000-000000000003",
        ];
        for id in ids {
            ServiceBrokerContract
                .request(&ctx, &definition(&request(id, &svc)))
                .unwrap();
        }

        let pairs = ServiceBrokerContract
            .get_all(&ctx, "org1", "device1", "service1")
            .unwrap();
        let got: Vec<_> = pairs.iter().map(|p| p.request.id.as_str()).collect();
        // index-scan order is ascending key order
        assert_eq!(got, ids.to_vec());
        assert!(pairs.iter().all(|p| p.response.is_none()));
    }

    #[test]
    fn wire_format_uses_camel_case_and_rfc3339() {
        let svc = service("org1", "device1", "service1");
        let value: serde_json::Value =
            serde_json::from_str(&definition(&request(U1, &svc))).unwrap();

        assert_eq!(value["id"], U1);
        assert_eq!(value["time"], "2021-12-12T17:34:00Z");
        assert_eq!(value["service"]["organizationId"], "org1");
        assert_eq!(value["service"]["deviceId"], "device1");
        assert_eq!(value["method"], "GET");
        assert_eq!(value["arguments"], serde_json::json!(["1", "2", "3"]));
    }

    #[test]
    fn uuid_generated_ids_are_accepted() {
        let store = InMemoryLedger::new();
        let identity = StaticIdentity::new("org1", "device1");
        let events = RecordingEventSink::new();
        let ctx = seeded_ctx(&store, &identity, &events);
        let svc = service("org1", "device1", "service1");

        let id = uuid::Uuid::new_v4().to_string();
        ServiceBrokerContract
            .request(&ctx, &definition(&request(&id, &svc)))
            .unwrap();
        assert_eq!(ServiceBrokerContract.get(&ctx, &id).unwrap().request.id, id);
    }
}
