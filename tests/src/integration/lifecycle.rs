//! # Cascading Deregistration Scenarios
//!
//! Deregistering an owner must remove its dependents first: a device's
//! services, and each service's outstanding requests, responses, and index
//! entries. These tests drive the full cascade through the contract surface
//! against the in-memory adapters.

#[cfg(test)]
mod tests {
    use crate::{definition, device, request, response, service};
    use iot_registry::prelude::*;

    const U1: &str = "ffbc9005-c62a-4563-a8f7-b32bba27d707";
    const U2: &str = "159e4c06-ca2c-4b1f-9e4c-e7b8a54e0a51";

    #[test]
    fn deregistering_device_with_two_services_removes_both() {
        crate::init_tracing();
        let store = InMemoryLedger::new();
        let identity = StaticIdentity::new("org1", "device1");
        let events = RecordingEventSink::new();
        let ctx = TransactionContext::new(&store, &identity, &events);

        DeviceRegistryContract
            .register(&ctx, &definition(&device("org1", "device1")))
            .unwrap();
        ServiceRegistryContract
            .register(&ctx, &definition(&service("org1", "device1", "service1")))
            .unwrap();
        ServiceRegistryContract
            .register(&ctx, &definition(&service("org1", "device1", "service2")))
            .unwrap();
        assert_eq!(
            ServiceRegistryContract
                .get_all(&ctx, "org1", "device1")
                .unwrap()
                .len(),
            2
        );

        DeviceRegistryContract
            .deregister(&ctx, &definition(&device("org1", "device1")))
            .unwrap();

        assert!(ServiceRegistryContract
            .get_all(&ctx, "org1", "device1")
            .unwrap()
            .is_empty());
        assert!(DeviceRegistryContract
            .get(&ctx, "org1", "device1")
            .unwrap_err()
            .is_not_found());
        assert!(DeviceRegistryContract.get_all(&ctx, "org1").unwrap().is_empty());
    }

    #[test]
    fn device_cascade_reaches_requests_and_responses() {
        let store = InMemoryLedger::new();
        let identity = StaticIdentity::new("org1", "device1");
        let events = RecordingEventSink::new();
        let ctx = TransactionContext::new(&store, &identity, &events);

        DeviceRegistryContract
            .register(&ctx, &definition(&device("org1", "device1")))
            .unwrap();
        let svc = service("org1", "device1", "service1");
        ServiceRegistryContract
            .register(&ctx, &definition(&svc))
            .unwrap();

        ServiceBrokerContract
            .request(&ctx, &definition(&request(U1, &svc)))
            .unwrap();
        ServiceBrokerContract
            .request(&ctx, &definition(&request(U2, &svc)))
            .unwrap();
        ServiceBrokerContract
            .respond(&ctx, &definition(&response(U1)))
            .unwrap();

        DeviceRegistryContract
            .deregister(&ctx, &definition(&device("org1", "device1")))
            .unwrap();

        // requests, the response, the index, the service, and the device
        // are all gone; every namespace is empty again
        assert!(ServiceBrokerContract.get(&ctx, U1).unwrap_err().is_not_found());
        assert!(ServiceBrokerContract.get(&ctx, U2).unwrap_err().is_not_found());
        assert!(ServiceBrokerContract
            .get_all(&ctx, "org1", "device1", "service1")
            .unwrap()
            .is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn service_cascade_leaves_sibling_services_untouched() {
        let store = InMemoryLedger::new();
        let identity = StaticIdentity::new("org1", "device1");
        let events = RecordingEventSink::new();
        let ctx = TransactionContext::new(&store, &identity, &events);

        DeviceRegistryContract
            .register(&ctx, &definition(&device("org1", "device1")))
            .unwrap();
        let doomed = service("org1", "device1", "service1");
        let survivor = service("org1", "device1", "service2");
        ServiceRegistryContract
            .register(&ctx, &definition(&doomed))
            .unwrap();
        ServiceRegistryContract
            .register(&ctx, &definition(&survivor))
            .unwrap();
        ServiceBrokerContract
            .request(&ctx, &definition(&request(U1, &doomed)))
            .unwrap();
        ServiceBrokerContract
            .request(&ctx, &definition(&request(U2, &survivor)))
            .unwrap();

        ServiceRegistryContract
            .deregister(&ctx, &definition(&doomed))
            .unwrap();

        assert!(ServiceBrokerContract.get(&ctx, U1).unwrap_err().is_not_found());
        assert!(ServiceBrokerContract.get(&ctx, U2).is_ok());
        assert_eq!(
            ServiceRegistryContract
                .get_all(&ctx, "org1", "device1")
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn deregistration_events_cover_the_whole_cascade_root() {
        let store = InMemoryLedger::new();
        let identity = StaticIdentity::new("org1", "device1");
        let events = RecordingEventSink::new();
        let ctx = TransactionContext::new(&store, &identity, &events);

        DeviceRegistryContract
            .register(&ctx, &definition(&device("org1", "device1")))
            .unwrap();
        DeviceRegistryContract
            .deregister(&ctx, &definition(&device("org1", "device1")))
            .unwrap();

        assert_eq!(
            events.topics(),
            vec![
                "device://org1/device1/register".to_string(),
                "device://org1/device1/deregister".to_string(),
            ]
        );

        // the deregister payload is the serialized device definition
        let (_, payload) = events.events().pop().unwrap();
        let decoded = Device::from_json(&payload).unwrap();
        assert_eq!(decoded.id, "device1");
    }
}
