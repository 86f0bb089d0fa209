use std::sync::Arc;

use tracing::warn;

use glint_core::domain::submission::ServiceType;

use crate::repositories::{KvStore, RepositoryError};

/// Auto-saved form drafts, one key per quote form. The KV interface has no
/// delete, so discarding writes an empty value and `load` treats empty as
/// absent.
#[derive(Clone)]
pub struct DraftStore {
    store: Arc<dyn KvStore>,
}

impl DraftStore {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub async fn save(
        &self,
        service_type: ServiceType,
        draft: &serde_json::Value,
    ) -> Result<(), RepositoryError> {
        let raw = serde_json::to_string(draft)
            .map_err(|error| RepositoryError::Decode(error.to_string()))?;
        self.store.write(&draft_key(service_type), &raw).await
    }

    pub async fn load(&self, service_type: ServiceType) -> Option<serde_json::Value> {
        match self.store.read(&draft_key(service_type)).await {
            Ok(Some(raw)) if !raw.is_empty() => match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(error) => {
                    warn!(
                        event_name = "draft.corrupt_state",
                        service_type = service_type.as_str(),
                        error = %error,
                        "saved draft could not be decoded; ignoring"
                    );
                    None
                }
            },
            Ok(_) => None,
            Err(error) => {
                warn!(
                    event_name = "draft.read_failed",
                    service_type = service_type.as_str(),
                    error = %error,
                    "draft read failed; ignoring"
                );
                None
            }
        }
    }

    pub async fn discard(&self, service_type: ServiceType) -> Result<(), RepositoryError> {
        self.store.write(&draft_key(service_type), "").await
    }
}

fn draft_key(service_type: ServiceType) -> String {
    format!("glint.draft.{}", service_type.as_str())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glint_core::domain::submission::ServiceType;

    use super::DraftStore;
    use crate::repositories::InMemoryKvStore;

    fn drafts() -> DraftStore {
        DraftStore::new(Arc::new(InMemoryKvStore::default()))
    }

    #[tokio::test]
    async fn save_load_round_trip_per_form() {
        let drafts = drafts();
        let residential = serde_json::json!({"bedrooms": 3});
        let airbnb = serde_json::json!({"bedrooms": 1});

        drafts.save(ServiceType::Residential, &residential).await.expect("save residential");
        drafts.save(ServiceType::Airbnb, &airbnb).await.expect("save airbnb");

        assert_eq!(drafts.load(ServiceType::Residential).await, Some(residential));
        assert_eq!(drafts.load(ServiceType::Airbnb).await, Some(airbnb));
        assert_eq!(drafts.load(ServiceType::Commercial).await, None);
    }

    #[tokio::test]
    async fn discard_makes_the_draft_absent() {
        let drafts = drafts();
        drafts
            .save(ServiceType::Commercial, &serde_json::json!({"area_sqm": 120}))
            .await
            .expect("save");
        drafts.discard(ServiceType::Commercial).await.expect("discard");
        assert_eq!(drafts.load(ServiceType::Commercial).await, None);
    }
}
