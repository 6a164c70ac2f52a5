//! User service implementation.

use super::WriteInvalidation;
use crate::cache::{cache_keys::endpoints, Cached, ListCache};
use crate::dto::{CreateUserRequest, UpdateUserRequest};
use crate::user_service::UserService;
use async_trait::async_trait;
use chrono::Utc;
use hireloop_core::{HireloopError, HireloopResult, ListQuery, Page, User, UserId, UserSummary, ValidateExt};
use hireloop_repository::UserRepository;
use std::sync::Arc;
use tracing::{debug, info};

/// Endpoints whose cached pages embed user data.
const AFFECTED: &[&str] = &[endpoints::USERS, endpoints::JOBS];

pub struct UserServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    invalidation: WriteInvalidation,
}

impl UserServiceImpl {
    /// `invalidate_on_write` controls whether writes drop cached list pages.
    pub fn new(user_repository: Arc<dyn UserRepository>, list_cache: Arc<ListCache>, invalidate_on_write: bool) -> Self {
        Self {
            user_repository,
            invalidation: WriteInvalidation::new(list_cache, invalidate_on_write),
        }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn list_users(&self, query: &ListQuery) -> HireloopResult<Page<UserSummary>> {
        debug!("Listing users, page: {}, limit: {}", query.page.page, query.page.limit);
        self.user_repository.list(query).await
    }

    async fn list_users_cached(&self, query: &ListQuery) -> HireloopResult<Cached<Page<UserSummary>>> {
        self.invalidation
            .list_cache()
            .get_or_load(endpoints::USERS, query, || self.user_repository.list(query))
            .await
    }

    async fn invalidate_user_cache(&self) -> u64 {
        let deleted = self.invalidation.list_cache().invalidate(endpoints::USERS).await;
        info!("User list cache cleared ({} keys)", deleted);
        deleted
    }

    async fn get_user(&self, id: UserId) -> HireloopResult<User> {
        debug!("Getting user: {}", id);

        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| HireloopError::not_found("User", id))
    }

    async fn create_user(&self, request: CreateUserRequest) -> HireloopResult<User> {
        debug!("Creating user: {}", request.email);

        request.validate_request()?;

        let user = User::new(request.email, request.name, request.role);
        let saved = self.user_repository.create(&user).await?;

        info!("User created: {}", saved.id);
        self.invalidation.after_write(AFFECTED).await;
        Ok(saved)
    }

    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> HireloopResult<User> {
        debug!("Updating user: {}", id);

        request.validate_request()?;

        let mut user = self.get_user(id).await?;
        if let Some(email) = request.email {
            user.email = email;
        }
        if let Some(name) = request.name {
            user.name = Some(name);
        }
        if let Some(role) = request.role {
            user.role = role;
        }
        user.updated_at = Utc::now();

        let updated = self.user_repository.update(&user).await?;

        info!("User updated: {}", id);
        self.invalidation.after_write(AFFECTED).await;
        Ok(updated)
    }

    async fn delete_user(&self, id: UserId) -> HireloopResult<()> {
        debug!("Deleting user: {}", id);

        if !self.user_repository.delete(id).await? {
            return Err(HireloopError::not_found("User", id));
        }

        info!("User deleted: {}", id);
        self.invalidation.after_write(AFFECTED).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCache;
    use hireloop_core::{FilterSet, PageRequest, Role};
    use hireloop_repository::memory::InMemoryStore;
    use mockall::mock;
    use std::time::Duration;

    mock! {
        pub UserRepo {}

        #[async_trait]
        impl UserRepository for UserRepo {
            async fn list(&self, query: &ListQuery) -> HireloopResult<Page<UserSummary>>;
            async fn find_by_id(&self, id: UserId) -> HireloopResult<Option<User>>;
            async fn create(&self, user: &User) -> HireloopResult<User>;
            async fn update(&self, user: &User) -> HireloopResult<User>;
            async fn delete(&self, id: UserId) -> HireloopResult<bool>;
        }
    }

    fn list_cache() -> Arc<ListCache> {
        Arc::new(ListCache::new(InMemoryCache::new(), Duration::from_secs(60)))
    }

    fn recruiter_query() -> ListQuery {
        ListQuery::new(PageRequest::new(1, 10), FilterSet::new().with("role", "RECRUITER"))
    }

    fn summary(user: &User) -> UserSummary {
        UserSummary {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            created_at: user.created_at,
            job_count: 0,
            application_count: 0,
        }
    }

    #[tokio::test]
    async fn test_cached_list_hits_the_store_once() {
        let recruiter = User::new("rita@hireloop.com".into(), Some("Rita".into()), Role::Recruiter);
        let row = summary(&recruiter);

        let mut repo = MockUserRepo::new();
        repo.expect_list()
            .times(1)
            .returning(move |query| Ok(Page::new(vec![row.clone()], query.page, 1)));

        let service = UserServiceImpl::new(Arc::new(repo), list_cache(), true);

        let first = service.list_users_cached(&recruiter_query()).await.unwrap();
        let second = service.list_users_cached(&recruiter_query()).await.unwrap();

        assert!(!first.cached);
        assert!(second.cached);
        assert_eq!(first.value, second.value);
        assert_eq!(second.value.pagination.total, 1);
    }

    #[tokio::test]
    async fn test_cached_list_degrades_when_cache_is_down() {
        let cache = InMemoryCache::new();
        cache.set_failing(true);
        let list_cache = Arc::new(ListCache::new(cache, Duration::from_secs(60)));

        let mut repo = MockUserRepo::new();
        repo.expect_list()
            .times(2)
            .returning(|query| Ok(Page::empty(query.page)));

        let service = UserServiceImpl::new(Arc::new(repo), list_cache, true);

        for _ in 0..2 {
            let page = service.list_users_cached(&recruiter_query()).await.unwrap();
            assert!(!page.cached);
            assert!(page.value.is_empty());
        }
    }

    #[tokio::test]
    async fn test_store_errors_propagate_through_cache() {
        let mut repo = MockUserRepo::new();
        repo.expect_list()
            .returning(|_| Err(HireloopError::Database("connection refused".into())));

        let service = UserServiceImpl::new(Arc::new(repo), list_cache(), true);

        let err = service.list_users_cached(&recruiter_query()).await.unwrap_err();
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_get_missing_user_is_not_found() {
        let mut repo = MockUserRepo::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = UserServiceImpl::new(Arc::new(repo), list_cache(), true);

        let err = service.get_user(UserId::new()).await.unwrap_err();
        assert!(matches!(err, HireloopError::NotFound { resource_type: "User", .. }));
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_store() {
        let repo = MockUserRepo::new();
        let service = UserServiceImpl::new(Arc::new(repo), list_cache(), true);

        let request = CreateUserRequest {
            email: "nope".into(),
            name: None,
            role: Role::Candidate,
        };
        let err = service.create_user(request).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_cached_page_is_stale_without_write_invalidation() {
        let store = InMemoryStore::new();
        let service = UserServiceImpl::new(store.user_repository(), list_cache(), false);
        let query = ListQuery::default();

        let before = service.list_users_cached(&query).await.unwrap();
        assert_eq!(before.value.pagination.total, 0);

        service
            .create_user(CreateUserRequest {
                email: "new@hireloop.com".into(),
                name: None,
                role: Role::Candidate,
            })
            .await
            .unwrap();

        let stale = service.list_users_cached(&query).await.unwrap();
        assert!(stale.cached);
        assert_eq!(stale.value, before.value);

        assert_eq!(service.invalidate_user_cache().await, 1);
        let fresh = service.list_users_cached(&query).await.unwrap();
        assert!(!fresh.cached);
        assert_eq!(fresh.value.pagination.total, 1);
    }

    #[tokio::test]
    async fn test_writes_invalidate_cached_pages_by_default() {
        let store = InMemoryStore::new();
        let service = UserServiceImpl::new(store.user_repository(), list_cache(), true);
        let query = ListQuery::default();

        service.list_users_cached(&query).await.unwrap();
        let user = service
            .create_user(CreateUserRequest {
                email: "new@hireloop.com".into(),
                name: Some("New".into()),
                role: Role::Recruiter,
            })
            .await
            .unwrap();

        let after_create = service.list_users_cached(&query).await.unwrap();
        assert!(!after_create.cached);
        assert_eq!(after_create.value.items[0].id, user.id);

        service
            .update_user(
                user.id,
                UpdateUserRequest {
                    name: Some("Renamed".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let after_update = service.list_users_cached(&query).await.unwrap();
        assert!(!after_update.cached);
        assert_eq!(after_update.value.items[0].name.as_deref(), Some("Renamed"));

        service.delete_user(user.id).await.unwrap();
        let after_delete = service.list_users_cached(&query).await.unwrap();
        assert!(after_delete.value.is_empty());
        assert_eq!(store.list_reads(), 4);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let store = InMemoryStore::new();
        let service = UserServiceImpl::new(store.user_repository(), list_cache(), true);
        let request = CreateUserRequest {
            email: "dup@hireloop.com".into(),
            name: None,
            role: Role::Candidate,
        };

        service.create_user(request.clone()).await.unwrap();
        let err = service.create_user(request).await.unwrap_err();
        assert_eq!(err.status_code(), 409);
    }
}
