use mongodb::{Client, Collection, Database};
use std::error::Error;

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool tuning
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        // Fail fast when the store is unreachable
        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        // Extract database name from URI or use default
        let db_name = uri
            .split('/')
            .last()
            .and_then(|s| s.split('?').next())
            .unwrap_or("RequestBoard");

        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };

        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the indexes the service relies on.
    ///
    /// The unique index on `users.user_id` is a correctness requirement,
    /// not a performance one: lifecycle hooks upsert by `user_id` and the
    /// upvote gate filters on it, so duplicates would split a user's
    /// voting history across documents.
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::bson::doc;
        use mongodb::options::IndexOptions;
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        let users = self.database().collection::<mongodb::bson::Document>("users");

        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        match users.create_index(user_index).await {
            Ok(_) => log::info!("   ✅ Index created: users(user_id) unique"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        // Activities are only ever scanned in insertion order
        let activities = self
            .database()
            .collection::<mongodb::bson::Document>("activities");

        let activity_index = IndexModel::builder()
            .keys(doc! { "created_at": 1 })
            .build();

        match activities.create_index(activity_index).await {
            Ok(_) => log::info!("   ✅ Index created: activities(created_at)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}
