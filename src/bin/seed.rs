use anyhow::{Context, Result, anyhow};
use food_menu::{config::AppConfig, models::CreateFoodRequest, repository};

fn dish(name: &str, price: f64, category: &str, is_available: bool) -> CreateFoodRequest {
    CreateFoodRequest {
        name: Some(name.to_string()),
        price: Some(price),
        category: Some(category.to_string()),
        is_available: Some(Some(is_available)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env().context("failed to read configuration")?;

    let repo = repository::open(&config)
        .await
        .context("failed to open menu storage")?;

    let payloads = vec![
        dish("Margherita Pizza", 9.99, "Main", true),
        dish("Paneer Tikka", 7.5, "Starter", true),
        dish("Masala Dosa", 5.25, "Main", true),
        dish("Gulab Jamun", 3.0, "Dessert", false),
        dish("Mango Lassi", 2.75, "Drinks", true),
    ];

    for payload in payloads {
        let item = payload
            .validate()
            .map_err(|violations| anyhow!("invalid seed item: {violations:?}"))?;
        let id = repo
            .insert(item)
            .await
            .context("failed to insert seed menu item")?;
        println!("inserted {id}");
    }

    println!("Seed data inserted successfully");
    Ok(())
}
