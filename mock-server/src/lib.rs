use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// A stored row with a server-assigned id.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    fn set_id(&mut self, id: i64);
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Drink {
    pub drinks_id: Option<i64>,
    pub item_drinks: String,
    pub drinks_price: i32,
    pub receipt_id: Option<i64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appetizer {
    pub appetizers_id: Option<i64>,
    pub item_appetizers: String,
    pub appetizers_price: i32,
    pub receipt_id: Option<i64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MainCourse {
    pub food_id: Option<i64>,
    pub item_food: String,
    pub food_price: i32,
    pub receipt_id: Option<i64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Cashier {
    pub id: Option<i64>,
    pub name: String,
    pub salary: Option<i32>,
}

impl Record for Drink {
    fn set_id(&mut self, id: i64) {
        self.drinks_id = Some(id);
    }
}

impl Record for Appetizer {
    fn set_id(&mut self, id: i64) {
        self.appetizers_id = Some(id);
    }
}

impl Record for MainCourse {
    fn set_id(&mut self, id: i64) {
        self.food_id = Some(id);
    }
}

impl Record for Cashier {
    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

#[derive(Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub username: String,
    pub role: String,
}

/// In-memory table; ids start at 1 and are never reused.
pub struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

pub type Db<T> = Arc<RwLock<Table<T>>>;

/// Every table plus the login accounts, shared by all handlers.
#[derive(Clone, Default)]
pub struct AppState {
    pub drinks: Db<Drink>,
    pub appetizers: Db<Appetizer>,
    pub main_courses: Db<MainCourse>,
    pub cashiers: Db<Cashier>,
    accounts: Arc<HashMap<String, (String, String)>>,
}

impl AppState {
    /// Empty tables plus the `admin`/`admin` and `cashier`/`cashier` accounts.
    pub fn seeded() -> Self {
        let accounts = [
            ("admin", "admin", "ADMIN"),
            ("cashier", "cashier", "CASHIER"),
        ]
        .into_iter()
        .map(|(user, password, role)| (user.to_string(), (password.to_string(), role.to_string())))
        .collect();
        Self {
            accounts: Arc::new(accounts),
            ..Self::default()
        }
    }
}

/// Picks one table out of the shared state.
pub trait Resource: Record {
    fn table(state: &AppState) -> &Db<Self>;
}

impl Resource for Drink {
    fn table(state: &AppState) -> &Db<Self> {
        &state.drinks
    }
}

impl Resource for Appetizer {
    fn table(state: &AppState) -> &Db<Self> {
        &state.appetizers
    }
}

impl Resource for MainCourse {
    fn table(state: &AppState) -> &Db<Self> {
        &state.main_courses
    }
}

impl Resource for Cashier {
    fn table(state: &AppState) -> &Db<Self> {
        &state.cashiers
    }
}

pub fn app() -> Router {
    app_with_state(AppState::seeded())
}

pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/menu", get(menu))
        .route("/api/login", post(login))
        .route("/api/cashiers/name/{name}", get(cashier_by_name))
        .merge(resource::<Drink>("/api/drinks"))
        .merge(resource::<Appetizer>("/api/appetizers"))
        .merge(resource::<MainCourse>("/api/maincourses"))
        .merge(resource::<Cashier>("/api/cashiers"))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn resource<T: Resource>(collection: &str) -> Router<AppState> {
    Router::new()
        .route(collection, get(list::<T>).post(create::<T>))
        .route(
            &format!("{collection}/{{id}}"),
            get(fetch::<T>).put(update::<T>).delete(remove::<T>),
        )
}

async fn list<T: Resource>(State(state): State<AppState>) -> Json<Vec<T>> {
    let table = T::table(&state).read().await;
    Json(table.rows.values().cloned().collect())
}

async fn create<T: Resource>(
    State(state): State<AppState>,
    Json(mut input): Json<T>,
) -> (StatusCode, Json<T>) {
    let mut table = T::table(&state).write().await;
    let id = table.next_id;
    table.next_id += 1;
    input.set_id(id);
    table.rows.insert(id, input.clone());
    (StatusCode::CREATED, Json(input))
}

async fn fetch<T: Resource>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<T>, StatusCode> {
    let table = T::table(&state).read().await;
    table.rows.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update<T: Resource>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(mut input): Json<T>,
) -> Result<Json<T>, StatusCode> {
    let mut table = T::table(&state).write().await;
    let row = table.rows.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    input.set_id(id);
    *row = input.clone();
    Ok(Json(input))
}

async fn remove<T: Resource>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let mut table = T::table(&state).write().await;
    table.rows.remove(&id).map(|_| StatusCode::NO_CONTENT).ok_or(StatusCode::NOT_FOUND)
}

async fn cashier_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Cashier>, StatusCode> {
    let table = state.cashiers.read().await;
    table
        .rows
        .values()
        .find(|c| c.name == name)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn login(
    State(state): State<AppState>,
    Json(input): Json<Credentials>,
) -> Result<Json<User>, (StatusCode, &'static str)> {
    match state.accounts.get(&input.username) {
        Some((password, role)) if *password == input.password => Ok(Json(User {
            username: input.username,
            role: role.clone(),
        })),
        _ => Err((StatusCode::UNAUTHORIZED, "invalid credentials")),
    }
}

async fn menu(State(state): State<AppState>) -> Json<serde_json::Value> {
    let main_courses: Vec<MainCourse> =
        state.main_courses.read().await.rows.values().cloned().collect();
    let appetizers: Vec<Appetizer> = state.appetizers.read().await.rows.values().cloned().collect();
    let drinks: Vec<Drink> = state.drinks.read().await.rows.values().cloned().collect();
    let total = main_courses.len() + appetizers.len() + drinks.len();
    Json(serde_json::json!({
        "mainCourses": main_courses,
        "appetizers": appetizers,
        "drinks": drinks,
        "totalItems": total,
    }))
}

async fn health() -> Json<serde_json::Value> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default();
    Json(serde_json::json!({
        "status": "UP",
        "service": "Restaurant Server",
        "timestamp": timestamp,
    }))
}
