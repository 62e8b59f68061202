use food_menu::{
    config::MongoSettings,
    models::{FoodItem, MENU_LIST_LIMIT},
    repository::{MenuRepository, MongoMenuRepository},
};
use mongodb::bson::doc;

async fn maybe_repo() -> Option<MongoMenuRepository> {
    let uri = std::env::var("TEST_MONGODB_URI").ok()?;

    let settings = MongoSettings {
        uri,
        database: "food_menu_test".to_string(),
        collection: "menu".to_string(),
        ..MongoSettings::default()
    };

    let repo = MongoMenuRepository::connect(&settings).await.ok()?;
    repo.init().await.ok()?;
    Some(repo)
}

fn dish(name: &str, price: f64) -> FoodItem {
    FoodItem {
        name: name.to_string(),
        price,
        category: "Main".to_string(),
        is_available: true,
    }
}

#[tokio::test]
async fn mongo_repository_insert_and_list_flow() {
    let Some(repo) = maybe_repo().await else {
        eprintln!(
            "Skipping mongo_repository_insert_and_list_flow: TEST_MONGODB_URI is not set or MongoDB is unreachable."
        );
        return;
    };

    repo.collection()
        .delete_many(doc! {})
        .await
        .expect("cleanup should succeed");

    let empty = repo.list(MENU_LIST_LIMIT).await.expect("list should succeed");
    assert!(empty.is_empty());

    let id = repo
        .insert(dish("Pizza", 9.99))
        .await
        .expect("insert should succeed");
    assert_eq!(id.to_hex().len(), 24);

    for i in 0..100 {
        repo.insert(dish(&format!("dish-{i}"), 1.0 + f64::from(i)))
            .await
            .expect("insert should succeed");
    }

    let listed = repo.list(MENU_LIST_LIMIT).await.expect("list should succeed");
    assert_eq!(listed.len(), MENU_LIST_LIMIT);
    assert_eq!(listed[0], dish("Pizza", 9.99));
    assert_eq!(listed[1].name, "dish-0");

    let total = repo
        .collection()
        .count_documents(doc! {})
        .await
        .expect("count should succeed");
    assert_eq!(total, 101);
}
