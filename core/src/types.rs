//! Wire records for the restaurant backend.
//!
//! # Design
//! Field names follow the backend's JSON attributes exactly (`drinksId`,
//! `itemDrinks`, ...). Ids are absent on records that have not been stored
//! yet and are then left out of the request body. The mock server defines its
//! own copies of these shapes; the integration tests catch any drift.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Drink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drinks_id: Option<i64>,
    pub item_drinks: String,
    pub drinks_price: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_id: Option<i64>,
}

impl Drink {
    pub fn new(item: impl Into<String>, price: i32) -> Self {
        Self {
            drinks_id: None,
            item_drinks: item.into(),
            drinks_price: price,
            receipt_id: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Appetizer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appetizers_id: Option<i64>,
    pub item_appetizers: String,
    pub appetizers_price: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_id: Option<i64>,
}

impl Appetizer {
    pub fn new(item: impl Into<String>, price: i32) -> Self {
        Self {
            appetizers_id: None,
            item_appetizers: item.into(),
            appetizers_price: price,
            receipt_id: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MainCourse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_id: Option<i64>,
    pub item_food: String,
    pub food_price: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_id: Option<i64>,
}

impl MainCourse {
    pub fn new(item: impl Into<String>, price: i32) -> Self {
        Self {
            food_id: None,
            item_food: item.into(),
            food_price: price,
            receipt_id: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cashier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<i32>,
}

/// Login payload sent to `/api/login`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// The authenticated account returned by `/api/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub username: String,
    /// `"ADMIN"` or `"CASHIER"`; other values are passed through unchanged.
    pub role: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case("ADMIN")
    }
}

/// Every menu section in one response, from `/api/menu`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    #[serde(default)]
    pub main_courses: Vec<MainCourse>,
    #[serde(default)]
    pub appetizers: Vec<Appetizer>,
    #[serde(default)]
    pub drinks: Vec<Drink>,
    #[serde(default)]
    pub total_items: usize,
}

/// Liveness report from `/api/health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

impl HealthStatus {
    pub fn is_up(&self) -> bool {
        self.status == "UP"
    }
}
