//! Address verification: free text or coordinates in, canonical address out.
//!
//! Never writes to storage. One provider call per request, no retries.

use tracing::{info, warn};

use crate::domain::{CanonicalAddress, Coordinates, SharedGeocodingProvider};
use crate::shared::{DomainError, DomainResult, GeocodeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Forward,
    Reverse,
}

impl Operation {
    fn as_str(self) -> &'static str {
        match self {
            Operation::Forward => "geocode",
            Operation::Reverse => "reverse_geocode",
        }
    }

    fn not_found_message(self) -> &'static str {
        match self {
            Operation::Forward => "No results found for the provided address",
            Operation::Reverse => "No address found for the provided coordinates",
        }
    }

    fn failure_prefix(self) -> &'static str {
        match self {
            Operation::Forward => "Geocoding failed",
            Operation::Reverse => "Reverse geocoding failed",
        }
    }
}

pub struct AddressVerificationService {
    provider: SharedGeocodingProvider,
}

impl AddressVerificationService {
    pub fn new(provider: SharedGeocodingProvider) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Verify a free-text address. Blank input is rejected before any call.
    pub async fn verify_by_text(&self, address: &str) -> DomainResult<CanonicalAddress> {
        let query = address.trim();
        if query.is_empty() {
            return Err(DomainError::Validation("Address is required".into()));
        }

        let result = self.provider.geocode(query).await;
        self.finish(Operation::Forward, result)
    }

    /// Reverse geocode a coordinate pair. Out-of-range values are rejected
    /// before any call.
    pub async fn verify_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> DomainResult<CanonicalAddress> {
        let coordinates = Coordinates::new(latitude, longitude)?;
        let result = self.provider.reverse_geocode(coordinates).await;
        self.finish(Operation::Reverse, result)
    }

    fn finish(
        &self,
        operation: Operation,
        result: Result<CanonicalAddress, GeocodeError>,
    ) -> DomainResult<CanonicalAddress> {
        let result = result.and_then(|address| {
            if address.is_complete() {
                Ok(address)
            } else {
                Err(GeocodeError::Provider("incomplete result".into()))
            }
        });

        let outcome = match &result {
            Ok(_) => "ok",
            Err(GeocodeError::NotFound) => "not_found",
            Err(GeocodeError::Provider(_)) => "provider_error",
            Err(GeocodeError::Configuration(_)) => "configuration_error",
        };
        metrics::counter!(
            "geocode_requests_total",
            "provider" => self.provider.name(),
            "operation" => operation.as_str(),
            "outcome" => outcome
        )
        .increment(1);

        match result {
            Ok(address) => {
                info!(
                    provider = self.provider.name(),
                    operation = operation.as_str(),
                    place_id = %address.place_id,
                    "Address verified"
                );
                Ok(address)
            }
            Err(GeocodeError::NotFound) => {
                Err(DomainError::NotFound(operation.not_found_message().into()))
            }
            Err(GeocodeError::Provider(detail)) => {
                warn!(
                    provider = self.provider.name(),
                    operation = operation.as_str(),
                    detail = %detail,
                    "Provider call failed"
                );
                Err(DomainError::Provider(format!(
                    "{}: {}",
                    operation.failure_prefix(),
                    detail
                )))
            }
            Err(GeocodeError::Configuration(message)) => {
                Err(DomainError::Configuration(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::domain::GeocodingProvider;

    /// Returns a fixed outcome and counts calls.
    struct StubProvider {
        outcome: Result<CanonicalAddress, GeocodeError>,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn new(outcome: Result<CanonicalAddress, GeocodeError>) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl GeocodingProvider for StubProvider {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn geocode(&self, _query: &str) -> Result<CanonicalAddress, GeocodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }

        async fn reverse_geocode(
            &self,
            _coordinates: Coordinates,
        ) -> Result<CanonicalAddress, GeocodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    fn address() -> CanonicalAddress {
        CanonicalAddress {
            street: "1600 Amphitheatre Parkway".into(),
            city: "Mountain View".into(),
            formatted_address: "1600 Amphitheatre Pkwy, Mountain View, CA 94043, USA".into(),
            place_id: "ChIJ2eUgeAK6j4ARbn5u_wAGqWA".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_blank_address_never_reaches_provider() {
        let provider = StubProvider::new(Ok(address()));
        let service = AddressVerificationService::new(provider.clone());

        let err = service.verify_by_text("   ").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg == "Address is required"));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_out_of_range_coordinates_never_reach_provider() {
        let provider = StubProvider::new(Ok(address()));
        let service = AddressVerificationService::new(provider.clone());

        assert!(matches!(
            service.verify_by_coordinates(91.0, 0.0).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            service.verify_by_coordinates(0.0, 181.0).await,
            Err(DomainError::Validation(_))
        ));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_success() {
        let service = AddressVerificationService::new(StubProvider::new(Ok(address())));
        let verified = service.verify_by_text(" 1600 Amphitheatre Parkway ").await.unwrap();
        assert_eq!(verified.city, "Mountain View");
    }

    #[tokio::test]
    async fn test_not_found_messages() {
        let service = AddressVerificationService::new(StubProvider::new(Err(GeocodeError::NotFound)));

        let err = service.verify_by_text("nowhere").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(msg) if msg == "No results found for the provided address"));

        let err = service.verify_by_coordinates(0.0, 0.0).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(msg) if msg == "No address found for the provided coordinates"));
    }

    #[tokio::test]
    async fn test_provider_status_is_carried() {
        let service = AddressVerificationService::new(StubProvider::new(Err(
            GeocodeError::Provider("OVER_QUERY_LIMIT".into()),
        )));

        let err = service.verify_by_text("x").await.unwrap_err();
        assert!(matches!(err, DomainError::Provider(msg) if msg == "Geocoding failed: OVER_QUERY_LIMIT"));

        let err = service.verify_by_coordinates(1.0, 1.0).await.unwrap_err();
        assert!(matches!(err, DomainError::Provider(msg) if msg == "Reverse geocoding failed: OVER_QUERY_LIMIT"));
    }

    #[tokio::test]
    async fn test_configuration_error_passes_through() {
        let service = AddressVerificationService::new(StubProvider::new(Err(
            GeocodeError::Configuration("key missing".into()),
        )));
        let err = service.verify_by_text("x").await.unwrap_err();
        assert!(matches!(err, DomainError::Configuration(msg) if msg == "key missing"));
    }

    #[tokio::test]
    async fn test_incomplete_result_is_provider_error() {
        let mut partial = address();
        partial.place_id.clear();
        let service = AddressVerificationService::new(StubProvider::new(Ok(partial)));
        assert!(matches!(
            service.verify_by_text("x").await,
            Err(DomainError::Provider(_))
        ));
    }
}
