use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

use groundgame::campaign::canvassing::{CanvassVisit, VisitRepository};
use groundgame::campaign::events::{CampaignEvent, EventId, EventRepository};
use groundgame::campaign::geofences::{Geofence, GeofenceId, GeofenceRepository};
use groundgame::campaign::notifications::{
    CampaignNotification, NotificationError, NotificationPublisher,
};
use groundgame::campaign::voters::{Voter, VoterId, VoterRepository};
use groundgame::campaign::RepositoryError;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) notifications: broadcast::Sender<String>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryVoterRepository {
    records: Arc<Mutex<HashMap<VoterId, Voter>>>,
}

impl VoterRepository for InMemoryVoterRepository {
    fn insert(&self, voter: Voter) -> Result<Voter, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&voter.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(voter.id.clone(), voter.clone());
        Ok(voter)
    }

    fn update(&self, voter: Voter) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&voter.id) {
            guard.insert(voter.id.clone(), voter);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &VoterId) -> Result<Option<Voter>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Voter>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut voters: Vec<Voter> = guard.values().cloned().collect();
        voters.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(voters)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryVisitRepository {
    records: Arc<Mutex<Vec<CanvassVisit>>>,
}

impl VisitRepository for InMemoryVisitRepository {
    fn insert(&self, visit: CanvassVisit) -> Result<CanvassVisit, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.push(visit.clone());
        Ok(visit)
    }

    fn list(&self) -> Result<Vec<CanvassVisit>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.clone())
    }

    fn for_voter(&self, voter_id: &VoterId) -> Result<Vec<CanvassVisit>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|visit| &visit.voter_id == voter_id)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryEventRepository {
    records: Arc<Mutex<HashMap<EventId, CampaignEvent>>>,
}

impl EventRepository for InMemoryEventRepository {
    fn insert(&self, event: CampaignEvent) -> Result<CampaignEvent, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&event.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(event.id.clone(), event.clone());
        Ok(event)
    }

    fn fetch(&self, id: &EventId) -> Result<Option<CampaignEvent>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<CampaignEvent>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn remove(&self, id: &EventId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryGeofenceRepository {
    records: Arc<Mutex<HashMap<GeofenceId, Geofence>>>,
}

impl GeofenceRepository for InMemoryGeofenceRepository {
    fn insert(&self, geofence: Geofence) -> Result<Geofence, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&geofence.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(geofence.id.clone(), geofence.clone());
        Ok(geofence)
    }

    fn update(&self, geofence: Geofence) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&geofence.id) {
            guard.insert(geofence.id.clone(), geofence);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &GeofenceId) -> Result<Option<Geofence>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Geofence>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut geofences: Vec<Geofence> = guard.values().cloned().collect();
        geofences.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(geofences)
    }
}

/// Publisher fanning mutations out to WebSocket subscribers as JSON text
/// frames. Send failures mean nobody is listening, which is fine.
#[derive(Clone)]
pub(crate) struct BroadcastNotificationPublisher {
    sender: broadcast::Sender<String>,
}

impl BroadcastNotificationPublisher {
    pub(crate) fn new(sender: broadcast::Sender<String>) -> Self {
        Self { sender }
    }
}

impl NotificationPublisher for BroadcastNotificationPublisher {
    fn publish(&self, notification: CampaignNotification) -> Result<(), NotificationError> {
        let payload = serde_json::to_string(&notification)
            .map_err(|err| NotificationError::Channel(err.to_string()))?;
        let _ = self.sender.send(payload);
        Ok(())
    }
}

/// Recorder used by the demo command and tests.
#[derive(Default, Clone)]
pub(crate) struct InMemoryNotificationPublisher {
    events: Arc<Mutex<Vec<CampaignNotification>>>,
}

impl NotificationPublisher for InMemoryNotificationPublisher {
    fn publish(&self, notification: CampaignNotification) -> Result<(), NotificationError> {
        let mut guard = self.events.lock().expect("notification mutex poisoned");
        guard.push(notification);
        Ok(())
    }
}

impl InMemoryNotificationPublisher {
    pub(crate) fn events(&self) -> Vec<CampaignNotification> {
        self.events.lock().expect("notification mutex poisoned").clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groundgame::campaign::notifications::NotificationTopic;

    fn notification() -> CampaignNotification {
        CampaignNotification {
            topic: NotificationTopic::VoterAdded,
            subject_id: "vtr-000001".to_string(),
            detail: "Ana Souza added to roster".to_string(),
        }
    }

    #[tokio::test]
    async fn each_notification_becomes_one_json_frame() {
        let (sender, mut receiver) = broadcast::channel(8);
        let publisher = BroadcastNotificationPublisher::new(sender);

        publisher.publish(notification()).expect("publishes");

        let frame = receiver.recv().await.expect("frame arrives");
        let value: serde_json::Value = serde_json::from_str(&frame).expect("json payload");
        assert_eq!(value["topic"], "voter_added");
        assert_eq!(value["subject_id"], "vtr-000001");
        assert_eq!(value["detail"], "Ana Souza added to roster");

        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_not_an_error() {
        let (sender, receiver) = broadcast::channel(1);
        drop(receiver);
        let publisher = BroadcastNotificationPublisher::new(sender);
        assert!(publisher.publish(notification()).is_ok());
    }
}
