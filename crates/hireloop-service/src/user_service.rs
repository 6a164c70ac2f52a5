//! User service trait definition.

use crate::cache::Cached;
use crate::dto::{CreateUserRequest, UpdateUserRequest};
use async_trait::async_trait;
use hireloop_core::{HireloopResult, ListQuery, Page, User, UserId, UserSummary};

/// User service trait.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Lists users, newest first, straight from the store.
    async fn list_users(&self, query: &ListQuery) -> HireloopResult<Page<UserSummary>>;

    /// Same as [`list_users`](Self::list_users), through the list cache.
    async fn list_users_cached(&self, query: &ListQuery) -> HireloopResult<Cached<Page<UserSummary>>>;

    /// Drops every cached user page; returns the number removed.
    async fn invalidate_user_cache(&self) -> u64;

    async fn get_user(&self, id: UserId) -> HireloopResult<User>;

    async fn create_user(&self, request: CreateUserRequest) -> HireloopResult<User>;

    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> HireloopResult<User>;

    /// Deletes a user along with their postings and applications.
    async fn delete_user(&self, id: UserId) -> HireloopResult<()>;
}
