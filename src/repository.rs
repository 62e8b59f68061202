use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Client, Collection, Database,
    bson::{doc, oid::ObjectId},
    options::ClientOptions,
};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::{
    config::{AppConfig, DatabaseBackend, MongoSettings},
    error::{AppError, AppResult},
    models::FoodItem,
};

/// Storage for menu items.
///
/// Listing returns items in insertion order, capped at `limit`.
#[async_trait]
pub trait MenuRepository: Send + Sync {
    async fn init(&self) -> AppResult<()>;
    async fn insert(&self, item: FoodItem) -> AppResult<ObjectId>;
    async fn list(&self, limit: usize) -> AppResult<Vec<FoodItem>>;
}

/// Opens the backend selected by `config`. The returned handle is shared by
/// every request for the lifetime of the process.
pub async fn open(config: &AppConfig) -> AppResult<Arc<dyn MenuRepository>> {
    let repo: Arc<dyn MenuRepository> = match config.database_backend {
        DatabaseBackend::MongoDb => {
            info!(
                database = %config.mongo.database,
                collection = %config.mongo.collection,
                "database backend: mongodb"
            );
            Arc::new(MongoMenuRepository::connect(&config.mongo).await?)
        }
        DatabaseBackend::InMemory => {
            info!("database backend: in-memory");
            Arc::new(InMemoryMenuRepository::new())
        }
    };

    repo.init().await?;
    Ok(repo)
}

#[derive(Clone)]
pub struct MongoMenuRepository {
    database: Database,
    collection: Collection<FoodItem>,
}

impl MongoMenuRepository {
    pub fn new(client: &Client, database: &str, collection: &str) -> Self {
        let database = client.database(database);
        let collection = database.collection::<FoodItem>(collection);
        Self {
            database,
            collection,
        }
    }

    pub async fn connect(settings: &MongoSettings) -> AppResult<Self> {
        let mut options = ClientOptions::parse(&settings.uri).await?;
        options.app_name = Some(settings.app_name.clone());
        let client = Client::with_options(options)?;

        Ok(Self::new(&client, &settings.database, &settings.collection))
    }

    pub fn collection(&self) -> &Collection<FoodItem> {
        &self.collection
    }
}

#[async_trait]
impl MenuRepository for MongoMenuRepository {
    async fn init(&self) -> AppResult<()> {
        // The driver connects lazily; ping so a bad URI fails at startup.
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn insert(&self, item: FoodItem) -> AppResult<ObjectId> {
        let result = self.collection.insert_one(&item).await?;
        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::storage("inserted document id is not an ObjectId"))?;

        debug!(%id, name = %item.name, "menu item inserted");
        Ok(id)
    }

    async fn list(&self, limit: usize) -> AppResult<Vec<FoodItem>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .limit(limit)
            .await?;

        let items = cursor.try_collect::<Vec<_>>().await?;
        Ok(items)
    }
}

#[derive(Debug, Clone)]
struct StoredFood {
    id: ObjectId,
    item: FoodItem,
}

#[derive(Debug, Default)]
pub struct InMemoryMenuRepository {
    items: RwLock<Vec<StoredFood>>,
}

impl InMemoryMenuRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    pub async fn contains(&self, id: &ObjectId) -> bool {
        self.items.read().await.iter().any(|stored| &stored.id == id)
    }
}

#[async_trait]
impl MenuRepository for InMemoryMenuRepository {
    async fn init(&self) -> AppResult<()> {
        Ok(())
    }

    async fn insert(&self, item: FoodItem) -> AppResult<ObjectId> {
        let id = ObjectId::new();
        debug!(%id, name = %item.name, "menu item inserted");
        self.items.write().await.push(StoredFood { id, item });
        Ok(id)
    }

    async fn list(&self, limit: usize) -> AppResult<Vec<FoodItem>> {
        let items = self
            .items
            .read()
            .await
            .iter()
            .take(limit)
            .map(|stored| stored.item.clone())
            .collect();
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(name: &str, price: f64) -> FoodItem {
        FoodItem {
            name: name.to_string(),
            price,
            category: "Main".to_string(),
            is_available: true,
        }
    }

    #[tokio::test]
    async fn in_memory_repo_lists_in_insertion_order() {
        let repo = InMemoryMenuRepository::new();
        repo.init().await.expect("init should succeed");
        assert!(repo.is_empty().await);

        let first = repo
            .insert(dish("Pizza", 9.99))
            .await
            .expect("insert should succeed");
        let second = repo
            .insert(dish("Pasta", 8.5))
            .await
            .expect("insert should succeed");

        assert_ne!(first, second);
        assert!(repo.contains(&first).await);

        let items = repo.list(100).await.expect("list should succeed");
        let names: Vec<_> = items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, ["Pizza", "Pasta"]);
    }

    #[tokio::test]
    async fn in_memory_repo_respects_limit() {
        let repo = InMemoryMenuRepository::new();
        for i in 0..5 {
            repo.insert(dish(&format!("dish-{i}"), 1.0 + f64::from(i)))
                .await
                .expect("insert should succeed");
        }

        let items = repo.list(3).await.expect("list should succeed");
        assert_eq!(items.len(), 3);
        assert_eq!(items[2].name, "dish-2");
        assert_eq!(repo.len().await, 5);
    }

    #[tokio::test]
    async fn identical_items_are_stored_twice() {
        let repo = InMemoryMenuRepository::new();
        let a = repo.insert(dish("Pizza", 9.99)).await.expect("insert");
        let b = repo.insert(dish("Pizza", 9.99)).await.expect("insert");

        assert_ne!(a, b);
        assert_eq!(repo.len().await, 2);
    }

    #[test]
    fn object_ids_render_as_24_hex_chars() {
        let hex = ObjectId::new().to_hex();
        assert_eq!(hex.len(), 24);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
