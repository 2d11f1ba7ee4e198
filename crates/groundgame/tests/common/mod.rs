//! In-memory collaborators shared by the integration scenarios.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use groundgame::campaign::canvassing::{CanvassVisit, VisitRepository};
use groundgame::campaign::events::{CampaignEvent, EventId, EventRepository};
use groundgame::campaign::geofences::{Geofence, GeofenceId, GeofenceRepository};
use groundgame::campaign::notifications::{
    CampaignNotification, NotificationError, NotificationPublisher,
};
use groundgame::campaign::voters::{Voter, VoterId, VoterRepository};
use groundgame::campaign::RepositoryError;

#[derive(Default, Clone)]
pub struct MemoryVoterRepository {
    records: Arc<Mutex<HashMap<VoterId, Voter>>>,
}

impl VoterRepository for MemoryVoterRepository {
    fn insert(&self, voter: Voter) -> Result<Voter, RepositoryError> {
        let mut guard = self.records.lock().expect("voter mutex poisoned");
        if guard.contains_key(&voter.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(voter.id.clone(), voter.clone());
        Ok(voter)
    }

    fn update(&self, voter: Voter) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("voter mutex poisoned");
        if guard.contains_key(&voter.id) {
            guard.insert(voter.id.clone(), voter);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &VoterId) -> Result<Option<Voter>, RepositoryError> {
        let guard = self.records.lock().expect("voter mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Voter>, RepositoryError> {
        let guard = self.records.lock().expect("voter mutex poisoned");
        let mut voters: Vec<Voter> = guard.values().cloned().collect();
        voters.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(voters)
    }
}

#[derive(Default, Clone)]
pub struct MemoryVisitRepository {
    records: Arc<Mutex<Vec<CanvassVisit>>>,
}

impl VisitRepository for MemoryVisitRepository {
    fn insert(&self, visit: CanvassVisit) -> Result<CanvassVisit, RepositoryError> {
        let mut guard = self.records.lock().expect("visit mutex poisoned");
        guard.push(visit.clone());
        Ok(visit)
    }

    fn list(&self) -> Result<Vec<CanvassVisit>, RepositoryError> {
        let guard = self.records.lock().expect("visit mutex poisoned");
        Ok(guard.clone())
    }

    fn for_voter(&self, voter_id: &VoterId) -> Result<Vec<CanvassVisit>, RepositoryError> {
        let guard = self.records.lock().expect("visit mutex poisoned");
        Ok(guard
            .iter()
            .filter(|visit| &visit.voter_id == voter_id)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub struct MemoryEventRepository {
    records: Arc<Mutex<HashMap<EventId, CampaignEvent>>>,
}

impl EventRepository for MemoryEventRepository {
    fn insert(&self, event: CampaignEvent) -> Result<CampaignEvent, RepositoryError> {
        let mut guard = self.records.lock().expect("event mutex poisoned");
        if guard.contains_key(&event.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(event.id.clone(), event.clone());
        Ok(event)
    }

    fn fetch(&self, id: &EventId) -> Result<Option<CampaignEvent>, RepositoryError> {
        let guard = self.records.lock().expect("event mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<CampaignEvent>, RepositoryError> {
        let guard = self.records.lock().expect("event mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn remove(&self, id: &EventId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("event mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}

#[derive(Default, Clone)]
pub struct MemoryGeofenceRepository {
    records: Arc<Mutex<HashMap<GeofenceId, Geofence>>>,
}

impl GeofenceRepository for MemoryGeofenceRepository {
    fn insert(&self, geofence: Geofence) -> Result<Geofence, RepositoryError> {
        let mut guard = self.records.lock().expect("geofence mutex poisoned");
        if guard.contains_key(&geofence.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(geofence.id.clone(), geofence.clone());
        Ok(geofence)
    }

    fn update(&self, geofence: Geofence) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("geofence mutex poisoned");
        if guard.contains_key(&geofence.id) {
            guard.insert(geofence.id.clone(), geofence);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &GeofenceId) -> Result<Option<Geofence>, RepositoryError> {
        let guard = self.records.lock().expect("geofence mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Geofence>, RepositoryError> {
        let guard = self.records.lock().expect("geofence mutex poisoned");
        let mut geofences: Vec<Geofence> = guard.values().cloned().collect();
        geofences.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(geofences)
    }
}

/// Publisher that records every notification for assertions.
#[derive(Default, Clone)]
pub struct RecordingPublisher {
    events: Arc<Mutex<Vec<CampaignNotification>>>,
}

impl NotificationPublisher for RecordingPublisher {
    fn publish(&self, notification: CampaignNotification) -> Result<(), NotificationError> {
        let mut guard = self.events.lock().expect("notification mutex poisoned");
        guard.push(notification);
        Ok(())
    }
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<CampaignNotification> {
        self.events.lock().expect("notification mutex poisoned").clone()
    }
}
