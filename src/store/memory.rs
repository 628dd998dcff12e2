// src/store/memory.rs

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::StoreError;
use crate::models::Scenario;

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<HashMap<Uuid, Scenario>>>,
}

impl MemoryStore {
    pub async fn insert(&self, s: &Scenario) -> Result<(), StoreError> {
        let mut map = self.inner.write().await;
        if map.contains_key(&s.id) {
            return Err(StoreError::Conflict(s.id));
        }
        map.insert(s.id, s.clone());
        Ok(())
    }

    pub async fn list(&self) -> Vec<Scenario> {
        let map = self.inner.read().await;
        let mut rows: Vec<Scenario> = map.values().cloned().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        rows
    }

    pub async fn get(&self, id: Uuid) -> Result<Scenario, StoreError> {
        self.inner.read().await.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    pub async fn replace(&self, s: &Scenario) -> Result<(), StoreError> {
        let mut map = self.inner.write().await;
        match map.get_mut(&s.id) {
            Some(slot) => {
                *slot = s.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(s.id)),
        }
    }

    pub async fn delete(&self, id: Uuid) -> bool {
        self.inner.write().await.remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::models::Scenario;

    fn scenario(n: u128, minutes: i64) -> Scenario {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes);
        let mut s: Scenario = serde_json::from_value(serde_json::json!({
            "id": uuid::Uuid::nil(),
            "name": format!("s{n}"),
            "spaceParameters": {"totalAreaSqm": 250.0, "fohPercentage": 65.0, "areaPerCoverSqm": 1.67, "externalSeating": 20},
            "serviceParameters": {"coversPerWaiter": 16, "runnerToWaiterRatioPct": 50.0, "kitchenStations": 4, "serviceStyle": "casual"},
            "operationalHours": {"operatingDaysPerYear": 350, "dailyHours": 12, "ramadanAdjustment": false},
            "revenueDrivers": {"avgCheck": 120.0, "dwellingTimeMin": 75.0, "tableTurnTimeMin": 90.0, "peakFactor": 1.5},
            "efficiencyDrivers": {"staffUtilizationPct": 85.0, "technologyImpactPct": 10.0, "crossTrainingPct": 15.0, "seasonalityFactor": 1.0},
            "createdAt": at,
            "updatedAt": at
        }))
        .unwrap();
        s.id = Uuid::from_u128(n);
        s
    }

    #[tokio::test]
    async fn duplicate_insert_conflicts() {
        let store = MemoryStore::default();
        store.insert(&scenario(1, 0)).await.unwrap();
        assert!(matches!(store.insert(&scenario(1, 5)).await, Err(StoreError::Conflict(_))));
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let store = MemoryStore::default();
        store.insert(&scenario(1, 0)).await.unwrap();
        store.insert(&scenario(2, 10)).await.unwrap();
        store.insert(&scenario(3, 5)).await.unwrap();
        let names: Vec<String> = store.list().await.into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["s2", "s3", "s1"]);
    }

    #[tokio::test]
    async fn replace_and_delete_require_existing_record() {
        let store = MemoryStore::default();
        assert!(matches!(store.replace(&scenario(7, 0)).await, Err(StoreError::NotFound(_))));
        assert!(!store.delete(Uuid::from_u128(7)).await);

        store.insert(&scenario(7, 0)).await.unwrap();
        let mut renamed = scenario(7, 0);
        renamed.name = "renamed".into();
        store.replace(&renamed).await.unwrap();
        assert_eq!(store.get(Uuid::from_u128(7)).await.unwrap().name, "renamed");
        assert!(store.delete(Uuid::from_u128(7)).await);
        assert!(matches!(store.get(Uuid::from_u128(7)).await, Err(StoreError::NotFound(_))));
    }
}
