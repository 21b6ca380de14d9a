use std::sync::Arc;

use sqlx::PgPool;

use crate::domains::entry::{
  model::{CreateEntryRequest, EntriesResponse, Entry, EntryWithAuthor, UpdateEntryRequest},
  service::{EntryService, EntryServiceError, EntryServiceImpl},
};
use crate::domains::user::{
  model::{CreateUserRequest, LoginRequest, LoginResponse, UpdateUserRequest, User},
  repository::SqlxUserRepository,
  service::{UserService, UserServiceError, UserServiceImpl},
};

pub trait AppState: Clone + Send + Sync + 'static {
  fn create_user(
    &self,
    req: CreateUserRequest,
  ) -> impl std::future::Future<Output = Result<User, UserServiceError>> + Send;
  fn login(
    &self,
    req: LoginRequest,
  ) -> impl std::future::Future<Output = Result<LoginResponse, UserServiceError>> + Send;
  fn list_users(&self) -> impl std::future::Future<Output = Result<Vec<User>, UserServiceError>> + Send;
  fn get_user_by_username(
    &self,
    username: &str,
  ) -> impl std::future::Future<Output = Result<User, UserServiceError>> + Send;
  fn update_user(
    &self,
    username: &str,
    req: UpdateUserRequest,
  ) -> impl std::future::Future<Output = Result<User, UserServiceError>> + Send;
  fn delete_user(&self, username: &str) -> impl std::future::Future<Output = Result<(), UserServiceError>> + Send;

  fn create_entry(
    &self,
    owner_id: i32,
    req: CreateEntryRequest,
  ) -> impl std::future::Future<Output = Result<EntryWithAuthor, EntryServiceError>> + Send;
  fn list_entries(&self) -> impl std::future::Future<Output = Result<EntriesResponse, EntryServiceError>> + Send;
  fn get_entry_by_id(&self, id: i32) -> impl std::future::Future<Output = Result<Entry, EntryServiceError>> + Send;
  fn update_entry(
    &self,
    id: i32,
    req: UpdateEntryRequest,
  ) -> impl std::future::Future<Output = Result<Entry, EntryServiceError>> + Send;
  fn delete_entry(&self, id: i32) -> impl std::future::Future<Output = Result<(), EntryServiceError>> + Send;
}

#[derive(Clone)]
pub struct SharedAppState {
  pub user_service: Arc<UserServiceImpl<SqlxUserRepository>>,
  pub entry_service: Arc<EntryServiceImpl>,
}

impl SharedAppState {
  pub async fn new(pool: PgPool) -> Self {
    let user_service = Arc::new(UserServiceImpl::new(SqlxUserRepository::new(pool.clone())));
    let entry_service = Arc::new(EntryServiceImpl::new(pool));

    Self {
      user_service,
      entry_service,
    }
  }
}

impl AppState for SharedAppState {
  async fn create_user(&self, req: CreateUserRequest) -> Result<User, UserServiceError> {
    self.user_service.create_user(req).await
  }

  async fn login(&self, req: LoginRequest) -> Result<LoginResponse, UserServiceError> {
    self.user_service.login(req).await
  }

  async fn list_users(&self) -> Result<Vec<User>, UserServiceError> {
    self.user_service.list_users().await
  }

  async fn get_user_by_username(&self, username: &str) -> Result<User, UserServiceError> {
    self.user_service.get_user_by_username(username).await
  }

  async fn update_user(&self, username: &str, req: UpdateUserRequest) -> Result<User, UserServiceError> {
    self.user_service.update_user(username, req).await
  }

  async fn delete_user(&self, username: &str) -> Result<(), UserServiceError> {
    self.user_service.delete_user(username).await
  }

  async fn create_entry(&self, owner_id: i32, req: CreateEntryRequest) -> Result<EntryWithAuthor, EntryServiceError> {
    self.entry_service.create_entry(owner_id, req).await
  }

  async fn list_entries(&self) -> Result<EntriesResponse, EntryServiceError> {
    self.entry_service.list_entries().await
  }

  async fn get_entry_by_id(&self, id: i32) -> Result<Entry, EntryServiceError> {
    self.entry_service.get_entry_by_id(id).await
  }

  async fn update_entry(&self, id: i32, req: UpdateEntryRequest) -> Result<Entry, EntryServiceError> {
    self.entry_service.update_entry(id, req).await
  }

  async fn delete_entry(&self, id: i32) -> Result<(), EntryServiceError> {
    self.entry_service.delete_entry(id).await
  }
}
