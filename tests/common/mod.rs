#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, extract::ConnectInfo};
use axum_test::{TestResponse, TestServer};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use rango::application::services::auth_service::hash_password;
use rango::domain::clock::Clock;
use rango::domain::entities::{
    Category, NewCategory, NewPage, NewUser, Page, ProfileDetails, ProfileFields, SessionData,
    User, UserCredentials, UserProfile,
};
use rango::domain::repositories::{
    CategoryRepository, PageRepository, ProfileRepository, SessionRepository, UserRepository,
};
use rango::error::AppError;
use rango::infrastructure::search::{NullSearch, SearchProvider};
use rango::routes::build_router;
use rango::state::{AppState, Repositories, SessionSettings};
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tower::Layer;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

/// Clock that only moves when told to.
pub struct TestClock {
    now: Mutex<NaiveDateTime>,
}

impl TestClock {
    pub fn new() -> Self {
        let start = NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_micro_opt(12, 0, 0, 250_000)
            .unwrap();
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, seconds: i64) {
        let mut now = self.now.lock().unwrap();
        *now += Duration::seconds(seconds);
    }
}

impl Clock for TestClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap()
    }
}

struct StoredSession {
    data: SessionData,
    expires_at: DateTime<Utc>,
}

/// In-memory stand-in for every repository, mirroring the SQL semantics.
#[derive(Default)]
pub struct MemoryStore {
    categories: Mutex<Vec<Category>>,
    pages: Mutex<Vec<Page>>,
    users: Mutex<Vec<UserCredentials>>,
    profiles: Mutex<Vec<UserProfile>>,
    sessions: Mutex<HashMap<String, StoredSession>>,
    next_id: Mutex<i64>,
}

impl MemoryStore {
    fn next_id(&self) -> i64 {
        let mut id = self.next_id.lock().unwrap();
        *id += 1;
        *id
    }

    pub fn add_category(&self, name: &str, views: i32, likes: i32) -> Category {
        let new_category = NewCategory::new(name).with_counters(views, likes);
        let category = Category::new(
            self.next_id(),
            new_category.name().to_string(),
            new_category.slug().to_string(),
            new_category.views(),
            new_category.likes(),
        );
        self.categories.lock().unwrap().push(category.clone());
        category
    }

    pub fn add_page(&self, category_id: i64, title: &str, url: &str, views: i32) -> Page {
        let page = Page::new(
            self.next_id(),
            category_id,
            title.to_string(),
            url.to_string(),
            views,
            None,
        );
        self.pages.lock().unwrap().push(page.clone());
        page
    }

    pub fn add_user(&self, username: &str) -> User {
        let user = User {
            id: self.next_id(),
            username: username.to_string(),
            email: String::new(),
            date_joined: Utc::now(),
        };
        self.users.lock().unwrap().push(UserCredentials {
            user: user.clone(),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
        });
        user
    }

    pub fn category(&self, id: i64) -> Option<Category> {
        self.categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    pub fn page(&self, id: i64) -> Option<Page> {
        self.pages.lock().unwrap().iter().find(|p| p.id == id).cloned()
    }

    pub fn pages_in(&self, category_id: i64) -> Vec<Page> {
        self.pages
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect()
    }

    pub fn profile_of(&self, user_id: i64) -> Option<UserProfile> {
        self.profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned()
    }

    pub fn user_named(&self, username: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.user.username == username)
            .map(|c| c.user.clone())
    }

    pub fn session_hashes(&self) -> Vec<String> {
        self.sessions.lock().unwrap().keys().cloned().collect()
    }

    pub fn session_data(&self) -> Vec<SessionData> {
        self.sessions
            .lock()
            .unwrap()
            .values()
            .map(|s| s.data.clone())
            .collect()
    }
}

fn by_likes(categories: &mut [Category]) {
    categories.sort_by(|a, b| b.likes.cmp(&a.likes).then(a.id.cmp(&b.id)));
}

fn by_views(pages: &mut [Page]) {
    pages.sort_by(|a, b| b.views.cmp(&a.views).then(a.id.cmp(&b.id)));
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn create(&self, new_category: NewCategory) -> Result<Category, AppError> {
        {
            let categories = self.categories.lock().unwrap();
            if categories.iter().any(|c| c.name == new_category.name()) {
                return Err(AppError::conflict(
                    "Unique constraint violation",
                    json!({ "constraint": "categories_name_key" }),
                ));
            }
            if categories.iter().any(|c| c.slug == new_category.slug()) {
                return Err(AppError::conflict(
                    "Unique constraint violation",
                    json!({ "constraint": "categories_slug_key" }),
                ));
            }
        }
        Ok(self.add_category(
            new_category.name(),
            new_category.views(),
            new_category.likes(),
        ))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, AppError> {
        Ok(self.category(id))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, AppError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.slug == slug)
            .cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, AppError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn top_by_likes(&self, limit: i64) -> Result<Vec<Category>, AppError> {
        let mut categories = self.categories.lock().unwrap().clone();
        by_likes(&mut categories);
        categories.truncate(limit as usize);
        Ok(categories)
    }

    async fn list_by_likes(&self) -> Result<Vec<Category>, AppError> {
        let mut categories = self.categories.lock().unwrap().clone();
        by_likes(&mut categories);
        Ok(categories)
    }

    async fn find_by_name_prefix(
        &self,
        prefix: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Category>, AppError> {
        let prefix = prefix.to_lowercase();
        let mut matches: Vec<Category> = self
            .categories
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.name.to_lowercase().starts_with(&prefix))
            .cloned()
            .collect();
        matches.sort_by_key(|c| c.id);
        if let Some(limit) = limit {
            matches.truncate(limit as usize);
        }
        Ok(matches)
    }

    async fn increment_likes(&self, id: i64) -> Result<Option<i32>, AppError> {
        let mut categories = self.categories.lock().unwrap();
        Ok(categories.iter_mut().find(|c| c.id == id).map(|c| {
            c.likes += 1;
            c.likes
        }))
    }

    async fn rename(&self, id: i64, renamed: NewCategory) -> Result<Option<Category>, AppError> {
        let mut categories = self.categories.lock().unwrap();
        Ok(categories.iter_mut().find(|c| c.id == id).map(|c| {
            c.name = renamed.name().to_string();
            c.slug = renamed.slug().to_string();
            c.clone()
        }))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.categories.lock().unwrap().len() as i64)
    }
}

#[async_trait]
impl PageRepository for MemoryStore {
    async fn create(&self, new_page: NewPage) -> Result<Page, AppError> {
        let duplicate = self.pages.lock().unwrap().iter().any(|p| {
            p.category_id == new_page.category_id
                && p.title == new_page.title
                && p.url == new_page.url
        });
        if duplicate {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "pages_category_title_url_key" }),
            ));
        }
        Ok(self.add_page(new_page.category_id, &new_page.title, &new_page.url, 0))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Page>, AppError> {
        Ok(self.page(id))
    }

    async fn get_or_create(&self, new_page: NewPage) -> Result<Page, AppError> {
        let existing = self
            .pages
            .lock()
            .unwrap()
            .iter()
            .find(|p| {
                p.category_id == new_page.category_id
                    && p.title == new_page.title
                    && p.url == new_page.url
            })
            .cloned();
        match existing {
            Some(page) => Ok(page),
            None => PageRepository::create(self, new_page).await,
        }
    }

    async fn list_by_category(&self, category_id: i64) -> Result<Vec<Page>, AppError> {
        let mut pages = self.pages_in(category_id);
        by_views(&mut pages);
        Ok(pages)
    }

    async fn top_by_views(&self, limit: i64) -> Result<Vec<Page>, AppError> {
        let mut pages = self.pages.lock().unwrap().clone();
        by_views(&mut pages);
        pages.truncate(limit as usize);
        Ok(pages)
    }

    async fn record_visit(&self, id: i64) -> Result<Option<Page>, AppError> {
        let mut pages = self.pages.lock().unwrap();
        Ok(pages.iter_mut().find(|p| p.id == id).map(|p| {
            p.views += 1;
            p.last_visit = Some(Utc::now());
            p.clone()
        }))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.pages.lock().unwrap().len() as i64)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|c| c.user.username == new_user.username) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "users_username_key" }),
            ));
        }
        let user = User {
            id: self.next_id(),
            username: new_user.username,
            email: new_user.email,
            date_joined: Utc::now(),
        };
        users.push(UserCredentials {
            user: user.clone(),
            password_hash: new_user.password_hash,
        });
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.user.id == id)
            .map(|c| c.user.clone()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.user_named(username))
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.user.username == username)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let mut users: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.user.clone())
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.users.lock().unwrap().len() as i64)
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<UserProfile>, AppError> {
        Ok(self.profile_of(user_id))
    }

    async fn get_or_create(&self, user_id: i64) -> Result<UserProfile, AppError> {
        if let Some(profile) = self.profile_of(user_id) {
            return Ok(profile);
        }
        let profile = UserProfile {
            id: self.next_id(),
            user_id,
            website: None,
            picture: None,
        };
        self.profiles.lock().unwrap().push(profile.clone());
        Ok(profile)
    }

    async fn upsert(&self, user_id: i64, fields: ProfileFields) -> Result<UserProfile, AppError> {
        let profile = ProfileRepository::get_or_create(self, user_id).await?;
        let mut profiles = self.profiles.lock().unwrap();
        let stored = profiles
            .iter_mut()
            .find(|p| p.id == profile.id)
            .expect("profile just created");
        stored.website = fields.website;
        stored.picture = fields.picture;
        Ok(stored.clone())
    }

    async fn list_with_users(&self) -> Result<Vec<ProfileDetails>, AppError> {
        let users = UserRepository::list(self).await?;
        Ok(users
            .into_iter()
            .filter_map(|user| {
                self.profile_of(user.id)
                    .map(|profile| ProfileDetails { user, profile })
            })
            .collect())
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn load(&self, session_hash: &str) -> Result<Option<SessionData>, AppError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .get(session_hash)
            .filter(|s| s.expires_at > Utc::now())
            .map(|s| s.data.clone()))
    }

    async fn save(
        &self,
        session_hash: &str,
        data: &SessionData,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        self.sessions.lock().unwrap().insert(
            session_hash.to_string(),
            StoredSession {
                data: data.clone(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn delete(&self, session_hash: &str) -> Result<(), AppError> {
        self.sessions.lock().unwrap().remove(session_hash);
        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64, AppError> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        let now = Utc::now();
        sessions.retain(|_, s| s.expires_at > now);
        Ok((before - sessions.len()) as u64)
    }

    async fn count_active(&self) -> Result<i64, AppError> {
        let now = Utc::now();
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.expires_at > now)
            .count() as i64)
    }
}

/// A test server over the real router with in-memory storage.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
    pub clock: Arc<TestClock>,
}

pub fn create_test_app() -> TestApp {
    create_test_app_with_search(Arc::new(NullSearch::new()))
}

pub fn create_test_app_with_search(search: Arc<dyn SearchProvider>) -> TestApp {
    let store = Arc::new(MemoryStore::default());
    let clock = Arc::new(TestClock::new());

    let repos = Repositories {
        categories: store.clone(),
        pages: store.clone(),
        users: store.clone(),
        profiles: store.clone(),
        sessions: store.clone(),
    };

    let state = AppState::new(
        repos,
        search,
        clock.clone(),
        SessionSettings {
            secret: "test-session-secret-0123456789".to_string(),
            ttl: Duration::days(14),
            cookie_secure: false,
        },
    );

    let app: Router = build_router(state, "static").layer(MockConnectInfoLayer);
    let server = TestServer::new(app).unwrap();

    TestApp {
        server,
        store,
        clock,
    }
}

/// The `sessionid` value set by a response, if any.
pub fn session_cookie(response: &TestResponse) -> Option<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|v| v.strip_prefix("sessionid="))
        .map(|rest| rest.split(';').next().unwrap_or_default().to_string())
}

/// `Cookie` header value for a session key.
pub fn cookie_header(session_key: &str) -> String {
    format!("sessionid={session_key}")
}

/// Logs in through the form and returns the session key.
pub async fn login(app: &TestApp, username: &str) -> String {
    let response = app
        .server
        .post("/accounts/login")
        .form(&json!({ "username": username, "password": TEST_PASSWORD }))
        .await;

    assert_eq!(response.status_code(), 302);
    session_cookie(&response).expect("login sets the session cookie")
}

/// Creates a user and logs in, returning the user and the session key.
pub async fn logged_in_user(app: &TestApp, username: &str) -> (User, String) {
    let user = app.store.add_user(username);
    let key = login(app, username).await;
    (user, key)
}
