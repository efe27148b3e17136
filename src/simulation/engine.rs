//! Delivery simulation engine
//!
//! Drives message statuses through the `sent -> delivered -> read` state
//! machine with randomized, time-delayed background tasks in lieu of a real
//! delivery network. Three entry points:
//!
//! - `spawn_message_simulation` - randomized single-message progression
//!   (delivered after 10-15s, read with probability 0.7 after 15-20s more)
//! - `spawn_chat_message_simulation` - deterministic two-phase progression
//!   used by the interactive chat-send path (12s then 17s, no coin flip)
//! - `spawn_campaign_simulation` - staggered delivery and read phases over
//!   every message in a campaign, updating the campaign's counters as it
//!   goes and marking the campaign completed at the end
//!
//! Runs are fire-and-forget from the caller's point of view but are spawned
//! onto a `TaskTracker` so shutdown can await in-flight runs. A run stops
//! early only when its target entity no longer exists or the store fails;
//! either way the error is logged and nothing is surfaced to any caller.

use std::sync::Arc;

use rand::Rng;
use tokio_util::task::TaskTracker;
use uuid::Uuid;

use crate::campaigns::types::CampaignStatus;

use super::policy::{ReadSelection, SimulationPolicy};
use super::status::MessageStatus;
use super::store::{DeliveryStore, StoreError};

/// Engine owning the store handle, policy and task tracker.
///
/// Cheap to clone; clones share the tracker so `shutdown` observes every
/// run spawned from any clone.
#[derive(Clone)]
pub struct SimulationEngine {
    store: Arc<dyn DeliveryStore>,
    policy: SimulationPolicy,
    tasks: TaskTracker,
}

impl SimulationEngine {
    pub fn new(store: Arc<dyn DeliveryStore>, policy: SimulationPolicy) -> Self {
        Self {
            store,
            policy,
            tasks: TaskTracker::new(),
        }
    }

    /// Start the randomized single-message simulation in the background.
    pub fn spawn_message_simulation(&self, message_id: Uuid) {
        let store = self.store.clone();
        let policy = self.policy.clone();
        self.tasks.spawn(async move {
            run_message_simulation(store, policy, message_id).await;
        });
    }

    /// Start the deterministic two-phase simulation in the background.
    pub fn spawn_chat_message_simulation(&self, message_id: Uuid) {
        let store = self.store.clone();
        let policy = self.policy.clone();
        self.tasks.spawn(async move {
            run_chat_message_simulation(store, policy, message_id).await;
        });
    }

    /// Start the campaign delivery simulation in the background.
    pub fn spawn_campaign_simulation(&self, campaign_id: Uuid) {
        let store = self.store.clone();
        let policy = self.policy.clone();
        self.tasks.spawn(async move {
            run_campaign_simulation(store, policy, campaign_id).await;
        });
    }

    /// Stop accepting new runs and wait for in-flight runs to finish.
    pub async fn shutdown(&self) {
        self.tasks.close();
        self.tasks.wait().await;
    }
}

fn rand_secs(range: (f64, f64)) -> f64 {
    rand::thread_rng().gen_range(range.0..=range.1)
}

async fn sleep_secs(secs: f64) {
    tokio::time::sleep(SimulationPolicy::duration(secs)).await;
}

/// Randomized single-message progression: sent -> delivered (-> read).
pub(crate) async fn run_message_simulation(
    store: Arc<dyn DeliveryStore>,
    policy: SimulationPolicy,
    message_id: Uuid,
) {
    sleep_secs(rand_secs(policy.message_deliver_delay)).await;

    match store
        .update_message_status(message_id, MessageStatus::Delivered)
        .await
    {
        Ok(0) => {
            tracing::debug!(%message_id, "message no longer exists, stopping simulation");
            return;
        }
        Ok(_) => tracing::debug!(%message_id, "message marked as delivered"),
        Err(e) => {
            tracing::error!(%message_id, error = %e, "error simulating message status");
            return;
        }
    }

    // Not every sent message gets read.
    let will_read = rand::thread_rng().gen_bool(policy.read_probability);
    if !will_read {
        return;
    }

    sleep_secs(rand_secs(policy.message_read_delay)).await;

    match store
        .update_message_status(message_id, MessageStatus::Read)
        .await
    {
        Ok(0) => tracing::debug!(%message_id, "message no longer exists, skipping read"),
        Ok(_) => tracing::debug!(%message_id, "message marked as read"),
        Err(e) => tracing::error!(%message_id, error = %e, "error simulating message status"),
    }
}

/// Deterministic two-phase progression used by the interactive chat-send
/// path: fixed delay to delivered, fixed delay to read, no probability gate.
pub(crate) async fn run_chat_message_simulation(
    store: Arc<dyn DeliveryStore>,
    policy: SimulationPolicy,
    message_id: Uuid,
) {
    sleep_secs(policy.chat_deliver_delay).await;

    match store
        .update_message_status(message_id, MessageStatus::Delivered)
        .await
    {
        Ok(0) => {
            tracing::debug!(%message_id, "message no longer exists, stopping simulation");
            return;
        }
        Ok(_) => {}
        Err(e) => {
            tracing::error!(%message_id, error = %e, "error simulating message status");
            return;
        }
    }

    sleep_secs(policy.chat_read_delay).await;

    match store
        .update_message_status(message_id, MessageStatus::Read)
        .await
    {
        Ok(_) => {}
        Err(e) => tracing::error!(%message_id, error = %e, "error simulating message status"),
    }
}

/// Campaign progression: staggered delivery of every message, a pause, then
/// a read phase over a `read_target`-sized selection, then `completed`.
pub(crate) async fn run_campaign_simulation(
    store: Arc<dyn DeliveryStore>,
    policy: SimulationPolicy,
    campaign_id: Uuid,
) {
    if let Err(e) = campaign_run(store, policy, campaign_id).await {
        tracing::error!(%campaign_id, error = %e, "error simulating campaign delivery");
    }
}

async fn campaign_run(
    store: Arc<dyn DeliveryStore>,
    policy: SimulationPolicy,
    campaign_id: Uuid,
) -> Result<(), StoreError> {
    let campaign = match store.campaign(campaign_id).await? {
        Some(campaign) => campaign,
        None => {
            tracing::error!(%campaign_id, "campaign not found");
            return Ok(());
        }
    };

    let message_ids = campaign.message_ids;
    let total_messages = message_ids.len();
    if total_messages == 0 {
        tracing::warn!(%campaign_id, "no messages in campaign");
        return Ok(());
    }

    tracing::info!(%campaign_id, total_messages, "starting campaign simulation");

    // Phase 1: gradually mark every message as delivered.
    for message_id in &message_ids {
        sleep_secs(rand_secs(policy.campaign_deliver_delay)).await;

        if store
            .update_message_status(*message_id, MessageStatus::Delivered)
            .await?
            == 0
        {
            tracing::debug!(%message_id, "message no longer exists, skipping");
        }
        store.increment_delivered(campaign_id).await?;
    }

    tracing::info!(%campaign_id, "all messages marked as delivered");

    // Buffer before the read phase begins.
    sleep_secs(policy.read_phase_pause).await;

    // Phase 2: mark a read-rate-sized selection of messages as read.
    let read_rate = rand_secs(policy.read_rate);
    let read_target = SimulationPolicy::read_target(total_messages, read_rate);
    let selected = select_for_read(&message_ids, read_target, policy.read_selection);

    let mut read_count = 0u64;
    for message_id in selected {
        sleep_secs(rand_secs(policy.campaign_read_delay)).await;

        if store
            .update_message_status(message_id, MessageStatus::Read)
            .await?
            == 0
        {
            tracing::debug!(%message_id, "message no longer exists, skipping");
        }
        store.increment_read(campaign_id).await?;
        read_count += 1;
    }

    store
        .set_campaign_status(campaign_id, CampaignStatus::Completed)
        .await?;

    tracing::info!(
        %campaign_id,
        delivered = total_messages,
        read = read_count,
        "campaign simulation completed"
    );

    Ok(())
}

/// Pick which messages the read phase marks as read.
///
/// `Prefix` keeps the historical behavior of taking the first `read_target`
/// entries in send order. `RandomSample` draws a uniform sample without
/// replacement; the sampled indices are sorted so the read phase still
/// walks messages in send order.
fn select_for_read(
    message_ids: &[Uuid],
    read_target: usize,
    selection: ReadSelection,
) -> Vec<Uuid> {
    match selection {
        ReadSelection::Prefix => message_ids.iter().take(read_target).copied().collect(),
        ReadSelection::RandomSample => {
            let mut indices: Vec<usize> =
                rand::seq::index::sample(&mut rand::thread_rng(), message_ids.len(), read_target)
                    .into_iter()
                    .collect();
            indices.sort_unstable();
            indices.into_iter().map(|i| message_ids[i]).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::store::CampaignDelivery;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    #[derive(Debug, Clone)]
    struct CampaignRecord {
        status: CampaignStatus,
        delivered_count: u64,
        read_count: u64,
        message_ids: Vec<Uuid>,
    }

    /// In-memory store recording the full status history of every message.
    #[derive(Default)]
    struct MemoryStore {
        messages: Mutex<HashMap<Uuid, Vec<MessageStatus>>>,
        campaigns: Mutex<HashMap<Uuid, CampaignRecord>>,
        fail_increments: AtomicBool,
    }

    impl MemoryStore {
        fn insert_message(&self, id: Uuid) {
            self.messages
                .lock()
                .unwrap()
                .insert(id, vec![MessageStatus::Sent]);
        }

        fn insert_campaign(&self, id: Uuid, message_ids: Vec<Uuid>) {
            for message_id in &message_ids {
                self.insert_message(*message_id);
            }
            self.campaigns.lock().unwrap().insert(
                id,
                CampaignRecord {
                    status: CampaignStatus::Active,
                    delivered_count: 0,
                    read_count: 0,
                    message_ids,
                },
            );
        }

        fn history(&self, id: Uuid) -> Vec<MessageStatus> {
            self.messages.lock().unwrap().get(&id).cloned().unwrap_or_default()
        }

        fn status(&self, id: Uuid) -> Option<MessageStatus> {
            self.history(id).last().copied()
        }

        fn campaign_record(&self, id: Uuid) -> CampaignRecord {
            self.campaigns.lock().unwrap().get(&id).cloned().unwrap()
        }
    }

    #[async_trait]
    impl DeliveryStore for MemoryStore {
        async fn campaign(
            &self,
            campaign_id: Uuid,
        ) -> Result<Option<CampaignDelivery>, StoreError> {
            Ok(self
                .campaigns
                .lock()
                .unwrap()
                .get(&campaign_id)
                .map(|record| CampaignDelivery {
                    id: campaign_id,
                    status: record.status,
                    message_ids: record.message_ids.clone(),
                }))
        }

        async fn update_message_status(
            &self,
            message_id: Uuid,
            status: MessageStatus,
        ) -> Result<u64, StoreError> {
            let mut messages = self.messages.lock().unwrap();
            match messages.get_mut(&message_id) {
                Some(history) => {
                    history.push(status);
                    Ok(1)
                }
                None => Ok(0),
            }
        }

        async fn increment_delivered(&self, campaign_id: Uuid) -> Result<u64, StoreError> {
            if self.fail_increments.load(Ordering::SeqCst) {
                return Err(StoreError::Unavailable("store down".to_string()));
            }
            let mut campaigns = self.campaigns.lock().unwrap();
            match campaigns.get_mut(&campaign_id) {
                Some(record) => {
                    record.delivered_count += 1;
                    Ok(1)
                }
                None => Ok(0),
            }
        }

        async fn increment_read(&self, campaign_id: Uuid) -> Result<u64, StoreError> {
            let mut campaigns = self.campaigns.lock().unwrap();
            match campaigns.get_mut(&campaign_id) {
                Some(record) => {
                    record.read_count += 1;
                    Ok(1)
                }
                None => Ok(0),
            }
        }

        async fn set_campaign_status(
            &self,
            campaign_id: Uuid,
            status: CampaignStatus,
        ) -> Result<u64, StoreError> {
            let mut campaigns = self.campaigns.lock().unwrap();
            match campaigns.get_mut(&campaign_id) {
                Some(record) => {
                    record.status = status;
                    Ok(1)
                }
                None => Ok(0),
            }
        }
    }

    fn policy_with_read_rate(rate: f64) -> SimulationPolicy {
        SimulationPolicy {
            read_rate: (rate, rate),
            ..SimulationPolicy::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn chat_simulation_is_deterministic_two_phase() {
        let store = Arc::new(MemoryStore::default());
        let message_id = Uuid::new_v4();
        store.insert_message(message_id);

        run_chat_message_simulation(store.clone(), SimulationPolicy::default(), message_id).await;

        assert_eq!(
            store.history(message_id),
            vec![
                MessageStatus::Sent,
                MessageStatus::Delivered,
                MessageStatus::Read
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn message_simulation_reads_when_probability_is_one() {
        let store = Arc::new(MemoryStore::default());
        let message_id = Uuid::new_v4();
        store.insert_message(message_id);

        let policy = SimulationPolicy {
            read_probability: 1.0,
            ..SimulationPolicy::default()
        };
        run_message_simulation(store.clone(), policy, message_id).await;

        assert_eq!(store.status(message_id), Some(MessageStatus::Read));
    }

    #[tokio::test(start_paused = true)]
    async fn message_simulation_stays_delivered_when_probability_is_zero() {
        let store = Arc::new(MemoryStore::default());
        let message_id = Uuid::new_v4();
        store.insert_message(message_id);

        let policy = SimulationPolicy {
            read_probability: 0.0,
            ..SimulationPolicy::default()
        };
        run_message_simulation(store.clone(), policy, message_id).await;

        assert_eq!(store.status(message_id), Some(MessageStatus::Delivered));
        // Delivered exactly once, nothing after it.
        assert_eq!(
            store.history(message_id),
            vec![MessageStatus::Sent, MessageStatus::Delivered]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn missing_message_is_a_noop() {
        let store = Arc::new(MemoryStore::default());
        let message_id = Uuid::new_v4();

        // Never inserted; the update matches zero rows and the run stops.
        run_message_simulation(store.clone(), SimulationPolicy::default(), message_id).await;
        run_chat_message_simulation(store.clone(), SimulationPolicy::default(), message_id).await;

        assert_eq!(store.history(message_id), Vec::<MessageStatus>::new());
    }

    #[tokio::test(start_paused = true)]
    async fn campaign_of_ten_with_pinned_read_rate() {
        let store = Arc::new(MemoryStore::default());
        let campaign_id = Uuid::new_v4();
        let message_ids: Vec<Uuid> = (0..10).map(|_| Uuid::new_v4()).collect();
        store.insert_campaign(campaign_id, message_ids.clone());

        // r = 0.65 exactly, so read_target = floor(10 * 0.65) = 6.
        run_campaign_simulation(store.clone(), policy_with_read_rate(0.65), campaign_id).await;

        for message_id in &message_ids[..6] {
            assert_eq!(store.status(*message_id), Some(MessageStatus::Read));
        }
        for message_id in &message_ids[6..] {
            assert_eq!(store.status(*message_id), Some(MessageStatus::Delivered));
        }

        let record = store.campaign_record(campaign_id);
        assert_eq!(record.delivered_count, 10);
        assert_eq!(record.read_count, 6);
        assert_eq!(record.status, CampaignStatus::Completed);
    }

    #[tokio::test(start_paused = true)]
    async fn campaign_messages_update_in_send_order() {
        let store = Arc::new(MemoryStore::default());
        let campaign_id = Uuid::new_v4();
        let message_ids: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        store.insert_campaign(campaign_id, message_ids.clone());

        run_campaign_simulation(store.clone(), policy_with_read_rate(0.6), campaign_id).await;

        // Every message went sent -> delivered; the first two also -> read.
        for (i, message_id) in message_ids.iter().enumerate() {
            let mut expected = vec![MessageStatus::Sent, MessageStatus::Delivered];
            if i < 2 {
                expected.push(MessageStatus::Read);
            }
            assert_eq!(store.history(*message_id), expected);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn random_sample_policy_reads_exactly_read_target_messages() {
        let store = Arc::new(MemoryStore::default());
        let campaign_id = Uuid::new_v4();
        let message_ids: Vec<Uuid> = (0..10).map(|_| Uuid::new_v4()).collect();
        store.insert_campaign(campaign_id, message_ids.clone());

        let policy = SimulationPolicy {
            read_rate: (0.65, 0.65),
            read_selection: ReadSelection::RandomSample,
            ..SimulationPolicy::default()
        };
        run_campaign_simulation(store.clone(), policy, campaign_id).await;

        let read: Vec<Uuid> = message_ids
            .iter()
            .filter(|id| store.status(**id) == Some(MessageStatus::Read))
            .copied()
            .collect();
        assert_eq!(read.len(), 6);

        let record = store.campaign_record(campaign_id);
        assert_eq!(record.read_count, 6);
        assert_eq!(record.status, CampaignStatus::Completed);
    }

    #[tokio::test(start_paused = true)]
    async fn absent_campaign_stops_without_writes() {
        let store = Arc::new(MemoryStore::default());
        run_campaign_simulation(store.clone(), SimulationPolicy::default(), Uuid::new_v4()).await;
        assert!(store.campaigns.lock().unwrap().is_empty());
        assert!(store.messages.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn empty_campaign_stays_active() {
        let store = Arc::new(MemoryStore::default());
        let campaign_id = Uuid::new_v4();
        store.insert_campaign(campaign_id, Vec::new());

        run_campaign_simulation(store.clone(), SimulationPolicy::default(), campaign_id).await;

        let record = store.campaign_record(campaign_id);
        assert_eq!(record.status, CampaignStatus::Active);
        assert_eq!(record.delivered_count, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn store_failure_aborts_run_without_completing() {
        let store = Arc::new(MemoryStore::default());
        let campaign_id = Uuid::new_v4();
        let message_ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        store.insert_campaign(campaign_id, message_ids);
        store.fail_increments.store(true, Ordering::SeqCst);

        run_campaign_simulation(store.clone(), SimulationPolicy::default(), campaign_id).await;

        // Aborted mid-progress: never completed, counters never advanced.
        let record = store.campaign_record(campaign_id);
        assert_eq!(record.status, CampaignStatus::Active);
        assert_eq!(record.delivered_count, 0);
        assert_eq!(record.read_count, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn spawned_runs_are_tracked_until_shutdown() {
        let store = Arc::new(MemoryStore::default());
        let message_id = Uuid::new_v4();
        store.insert_message(message_id);

        let engine = SimulationEngine::new(store.clone(), SimulationPolicy::default());
        engine.spawn_chat_message_simulation(message_id);
        engine.shutdown().await;

        assert_eq!(store.status(message_id), Some(MessageStatus::Read));
    }

    #[test]
    fn prefix_selection_takes_first_entries() {
        let ids: Vec<Uuid> = (0..5).map(|_| Uuid::new_v4()).collect();
        let selected = select_for_read(&ids, 3, ReadSelection::Prefix);
        assert_eq!(selected, ids[..3].to_vec());
    }

    #[test]
    fn random_sample_selection_is_distinct_and_ordered() {
        let ids: Vec<Uuid> = (0..8).map(|_| Uuid::new_v4()).collect();
        let selected = select_for_read(&ids, 5, ReadSelection::RandomSample);
        assert_eq!(selected.len(), 5);

        // Selected ids appear in send order with no duplicates.
        let mut positions: Vec<usize> = selected
            .iter()
            .map(|id| ids.iter().position(|x| x == id).unwrap())
            .collect();
        let sorted = positions.clone();
        positions.dedup();
        assert_eq!(positions.len(), 5);
        assert!(sorted.windows(2).all(|w| w[0] < w[1]));
    }
}
