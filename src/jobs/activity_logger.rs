// ==================== ACTIVITY LOGGER ====================
// Background job that turns creation events into `activities` documents.
// Sits outside every write's critical section: a failed insert is logged
// and dropped, never propagated back to the operation that emitted it.

use crate::{
    database::MongoDB,
    models::Activity,
    services::activity_service::{self, ActivityNotifier},
};
use mongodb::bson::DateTime as BsonDateTime;

/// Spawns the logger task and hands back the notifier the services use
pub fn start_activity_logger(db: MongoDB) -> ActivityNotifier {
    log::info!("📜 Starting activity logger");

    let (notifier, mut rx) = activity_service::channel();

    tokio::spawn(async move {
        let activities = db.collection::<Activity>("activities");

        while let Some(event) = rx.recv().await {
            let entry = Activity {
                text: event.message().to_string(),
                created_at: BsonDateTime::now(),
            };

            match activities.insert_one(entry).await {
                Ok(_) => log::debug!("📜 Activity recorded: {}", event.message()),
                Err(e) => log::error!("❌ Failed to record activity: {}", e),
            }
        }

        // All senders dropped, which only happens at shutdown
        log::info!("📜 Activity logger stopped");
    });

    notifier
}
