#![allow(dead_code)]

//! Shared fixtures: in-memory implementations of the store traits and an
//! app context wired the same way `main.rs` wires production, minus the
//! database.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error};
use async_trait::async_trait;
use futures::future::{ready, LocalBoxFuture, Ready};
use chrono::Utc;
use uuid::Uuid;

use taskmgr::auth::{hash_password, AuthService, TokenAuthority};
use taskmgr::error::AppError;
use taskmgr::models::{NewTask, NewUser, Task, User};
use taskmgr::store::{CredentialStore, TaskStore};
use taskmgr::tasks::TaskService;

pub const TEST_SECRET: &str = "integration-test-secret";

/// In-memory credential store standing in for Postgres.
#[derive(Default)]
pub struct MemoryCredentialStore {
    users: Mutex<HashMap<String, User>>,
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().unwrap().get(email).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        let record = User {
            id: Uuid::new_v4(),
            email: user.email.clone(),
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };
        self.users
            .lock()
            .unwrap()
            .insert(user.email, record.clone());
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.lock().unwrap().values().cloned().collect())
    }
}

/// In-memory task store standing in for Postgres.
#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: Mutex<HashMap<Uuid, Task>>,
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn create(&self, task: NewTask) -> Result<Task, AppError> {
        let record = Task {
            id: Uuid::new_v4(),
            title: task.title,
            description: task.description,
            due_date: task.due_date,
            status: task.status,
        };
        self.tasks.lock().unwrap().insert(record.id, record.clone());
        Ok(record)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        Ok(self.tasks.lock().unwrap().get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Task>, AppError> {
        Ok(self.tasks.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, task: &Task) -> Result<(), AppError> {
        let mut tasks = self.tasks.lock().unwrap();
        if let Some(existing) = tasks.get_mut(&task.id) {
            *existing = task.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.tasks.lock().unwrap().remove(&id).is_some())
    }
}

/// Services and shared state for one test, mirroring the production wiring.
pub struct TestContext {
    pub users: Arc<MemoryCredentialStore>,
    pub auth: web::Data<AuthService>,
    pub tasks: web::Data<TaskService>,
    pub authority: web::Data<TokenAuthority>,
}

pub fn context() -> TestContext {
    let users = Arc::new(MemoryCredentialStore::default());
    let task_store = Arc::new(MemoryTaskStore::default());

    TestContext {
        users: users.clone(),
        auth: web::Data::new(AuthService::new(users)),
        tasks: web::Data::new(TaskService::new(task_store)),
        authority: web::Data::new(TokenAuthority::new(TEST_SECRET)),
    }
}

/// Test-only shim that reproduces what the production `HttpServer` dispatcher
/// does for every request: render a service-level `Err` into its HTTP response
/// via `ResponseError`. `test::call_service` instead unwraps and panics on
/// `Err`, so without this the error-returning `AuthMiddleware` rejection path
/// cannot be driven through the harness even though the real server answers it
/// with a 401/403. Wrapping the test app outermost with this makes the harness
/// observe exactly what a real HTTP client would.
pub struct RenderErrors;

impl<S, B> Transform<S, ServiceRequest> for RenderErrors
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Transform = RenderErrorsService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RenderErrorsService { service }))
    }
}

pub struct RenderErrorsService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RenderErrorsService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Do not retain a clone of the request across the inner call: routing
        // needs a unique reference to mutate match info, so an outstanding
        // clone would make that panic. On the error path the response is paired
        // with a throwaway request (tests only inspect status and body).
        let fut = self.service.call(req);
        Box::pin(async move {
            match fut.await {
                Ok(res) => Ok(res.map_into_boxed_body()),
                Err(err) => {
                    let throwaway = actix_web::test::TestRequest::default().to_http_request();
                    Ok(ServiceResponse::new(
                        throwaway,
                        err.error_response().map_into_boxed_body(),
                    ))
                }
            }
        })
    }
}

/// Provisions an account with an explicit role, the out-of-band path:
/// registration itself always assigns the default role.
pub async fn seed_user_with_role(ctx: &TestContext, email: &str, password: &str, role: &str) {
    let password_hash = hash_password(password).unwrap();
    ctx.users
        .insert(NewUser {
            email: email.to_string(),
            password_hash,
            role: role.to_string(),
        })
        .await
        .unwrap();
}
