use serde::{Deserialize, Deserializer, Serialize};

/// Maximum number of items returned by a menu listing.
pub const MENU_LIST_LIMIT: usize = 100;

pub const FOOD_CREATED_MESSAGE: &str = "Food added successfully!";

/// A dish on the menu, as stored and as returned by the listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    pub price: f64,
    pub category: String,
    #[serde(default = "default_is_available")]
    pub is_available: bool,
}

impl FoodItem {
    /// Checks the field constraints of an already-typed item.
    ///
    /// Used on the read path as well, so documents written to the collection
    /// by something other than this service are held to the same schema.
    pub fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut violations = Vec::new();
        check_name(&self.name, &mut violations);
        check_price(self.price, &mut violations);

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Request body for `POST /menu/`.
///
/// Every field is optional at the serde layer so that absent fields are
/// reported together by [`CreateFoodRequest::validate`] instead of failing on
/// the first one. `is_available` keeps an explicit `null` apart from an
/// absent field: only absence falls back to the default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateFoodRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub is_available: Option<Option<bool>>,
}

impl CreateFoodRequest {
    pub fn validate(self) -> Result<FoodItem, Vec<FieldViolation>> {
        let mut violations = Vec::new();

        match self.name.as_deref() {
            Some(name) => check_name(name, &mut violations),
            None => violations.push(FieldViolation::missing("name")),
        }

        match self.price {
            Some(price) => check_price(price, &mut violations),
            None => violations.push(FieldViolation::missing("price")),
        }

        if self.category.is_none() {
            violations.push(FieldViolation::missing("category"));
        }

        let is_available = match self.is_available {
            None => default_is_available(),
            Some(Some(value)) => value,
            Some(None) => {
                violations.push(FieldViolation::new(
                    "is_available",
                    "is_available must be a boolean",
                ));
                default_is_available()
            }
        };

        match (self.name, self.price, self.category) {
            (Some(name), Some(price), Some(category)) if violations.is_empty() => Ok(FoodItem {
                name,
                price,
                category,
                is_available,
            }),
            _ => Err(violations),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn missing(field: &str) -> Self {
        Self::new(field, "field required")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodCreated {
    pub id: String,
    pub message: String,
}

impl FoodCreated {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: FOOD_CREATED_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

fn check_name(name: &str, violations: &mut Vec<FieldViolation>) {
    if name.is_empty() {
        violations.push(FieldViolation::new("name", "name must not be empty"));
    }
}

fn check_price(price: f64, violations: &mut Vec<FieldViolation>) {
    // NaN fails this comparison too.
    if !(price > 0.0) {
        violations.push(FieldViolation::new("price", "price must be greater than 0"));
    }
}

const fn default_is_available() -> bool {
    true
}

/// Wraps whatever the field holds, `null` included, so that `#[serde(default)]`
/// alone decides the absent case.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
