mod request;
mod response;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::user::request::{
    CreateUserRequest, DeleteUserRequest, GetUserRequest, UserTransformer,
};
use crate::route::user::response::{CreatedUserPresenter, UserPresenter, UserResponse};
use application::service::{AccountService, GetUserService};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

pub trait UserRouter {
    fn route_user(self) -> Self;
}

impl UserRouter for Router<AppModule> {
    fn route_user(self) -> Self {
        self.route(
            "/users",
            post(
                |State(module): State<AppModule>, Json(req): Json<CreateUserRequest>| async move {
                    Controller::new(UserTransformer, CreatedUserPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.pgpool().create_user(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/users/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(UserTransformer, UserPresenter)
                        .intake(GetUserRequest::new(id))
                        .handle(|dto| async move { module.pgpool().get_user(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| {
                            res.map(UserResponse::into_response)
                                .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
                        })
                },
            )
            .delete(
                |State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Query(req): Query<DeleteUserRequest>| async move {
                    Controller::new(UserTransformer, UserPresenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.pgpool().delete_user(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
