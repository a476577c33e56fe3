//! Resource-specific operations, each a single call into a verb template.
//!
//! Nothing here validates input; rejecting blank names or negative prices is
//! the job of whatever sits above the client.

use crate::client::ApiClient;
use crate::codec::Codec;
use crate::error::ClientError;
use crate::http::Transport;
use crate::types::{Appetizer, Cashier, Credentials, Drink, HealthStatus, MainCourse, Menu, User};

const APPETIZERS: &str = "/api/appetizers";
const DRINKS: &str = "/api/drinks";
const MAIN_COURSES: &str = "/api/maincourses";
const CASHIERS: &str = "/api/cashiers";
const LOGIN: &str = "/api/login";
const MENU: &str = "/api/menu";
const HEALTH: &str = "/api/health";

impl<T: Transport, C: Codec> ApiClient<T, C> {
    // -----------------------------------------------------------------------
    // Appetizers
    // -----------------------------------------------------------------------

    pub fn list_appetizers(&self) -> Result<Vec<Appetizer>, ClientError> {
        self.get_list(APPETIZERS)
    }

    pub fn get_appetizer(&self, id: i64) -> Result<Option<Appetizer>, ClientError> {
        self.get(&format!("{APPETIZERS}/{id}"))
    }

    pub fn create_appetizer(&self, appetizer: &Appetizer) -> Result<Appetizer, ClientError> {
        self.post(APPETIZERS, appetizer)
    }

    pub fn update_appetizer(&self, id: i64, appetizer: &Appetizer) -> Result<Appetizer, ClientError> {
        self.put(&format!("{APPETIZERS}/{id}"), appetizer)
    }

    pub fn delete_appetizer(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("{APPETIZERS}/{id}"))
    }

    // -----------------------------------------------------------------------
    // Drinks
    // -----------------------------------------------------------------------

    pub fn list_drinks(&self) -> Result<Vec<Drink>, ClientError> {
        self.get_list(DRINKS)
    }

    pub fn get_drink(&self, id: i64) -> Result<Option<Drink>, ClientError> {
        self.get(&format!("{DRINKS}/{id}"))
    }

    pub fn create_drink(&self, drink: &Drink) -> Result<Drink, ClientError> {
        self.post(DRINKS, drink)
    }

    pub fn update_drink(&self, id: i64, drink: &Drink) -> Result<Drink, ClientError> {
        self.put(&format!("{DRINKS}/{id}"), drink)
    }

    pub fn delete_drink(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("{DRINKS}/{id}"))
    }

    // -----------------------------------------------------------------------
    // Main courses
    // -----------------------------------------------------------------------

    pub fn list_main_courses(&self) -> Result<Vec<MainCourse>, ClientError> {
        self.get_list(MAIN_COURSES)
    }

    pub fn get_main_course(&self, id: i64) -> Result<Option<MainCourse>, ClientError> {
        self.get(&format!("{MAIN_COURSES}/{id}"))
    }

    pub fn create_main_course(&self, course: &MainCourse) -> Result<MainCourse, ClientError> {
        self.post(MAIN_COURSES, course)
    }

    pub fn update_main_course(&self, id: i64, course: &MainCourse) -> Result<MainCourse, ClientError> {
        self.put(&format!("{MAIN_COURSES}/{id}"), course)
    }

    pub fn delete_main_course(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("{MAIN_COURSES}/{id}"))
    }

    // -----------------------------------------------------------------------
    // Cashiers (read and update only)
    // -----------------------------------------------------------------------

    pub fn list_cashiers(&self) -> Result<Vec<Cashier>, ClientError> {
        self.get_list(CASHIERS)
    }

    pub fn get_cashier(&self, id: i64) -> Result<Option<Cashier>, ClientError> {
        self.get(&format!("{CASHIERS}/{id}"))
    }

    /// The name is placed in the path as given.
    pub fn get_cashier_by_name(&self, name: &str) -> Result<Option<Cashier>, ClientError> {
        self.get(&format!("{CASHIERS}/name/{name}"))
    }

    pub fn update_cashier(&self, id: i64, cashier: &Cashier) -> Result<Cashier, ClientError> {
        self.put(&format!("{CASHIERS}/{id}"), cashier)
    }

    // -----------------------------------------------------------------------
    // Session and service info
    // -----------------------------------------------------------------------

    /// Authenticate against the backend. Bad credentials come back as a
    /// `ServerStatus` error carrying the server's status.
    pub fn login(&self, username: &str, password: &str) -> Result<User, ClientError> {
        self.post(LOGIN, &Credentials { username, password })
    }

    pub fn menu(&self) -> Result<Option<Menu>, ClientError> {
        self.get(MENU)
    }

    pub fn health(&self) -> Result<Option<HealthStatus>, ClientError> {
        self.get(HEALTH)
    }
}
