mod request;
mod response;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::loan::request::{
    AdminReturnRequest, ApproveRequest, BorrowRequest, ListLoansRequest, LoanTransformer,
    RejectRequest, ReturnRequest,
};
use crate::route::loan::response::{CreatedLoanPresenter, LoanPresenter};
use application::service::{GetLoanService, LendingService};
use axum::extract::{Path, Query, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use uuid::Uuid;

pub trait LoanRouter {
    fn route_loan(self) -> Self;
}

impl LoanRouter for Router<AppModule> {
    fn route_loan(self) -> Self {
        self.route(
            "/loans",
            get(
                |State(module): State<AppModule>, Query(req): Query<ListLoansRequest>| async move {
                    Controller::new(LoanTransformer, LoanPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.pgpool().list_loans(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule>, Json(req): Json<BorrowRequest>| async move {
                    Controller::new(LoanTransformer, CreatedLoanPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.pgpool().borrow_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/loans/:id/approve",
            put(
                |State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Json(req): Json<ApproveRequest>| async move {
                    Controller::new(LoanTransformer, LoanPresenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.pgpool().approve_loan(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/loans/:id/reject",
            put(
                |State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Json(req): Json<RejectRequest>| async move {
                    Controller::new(LoanTransformer, LoanPresenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.pgpool().reject_loan(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/loans/:id/return",
            put(
                |State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Json(req): Json<ReturnRequest>| async move {
                    Controller::new(LoanTransformer, LoanPresenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.pgpool().return_loan(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/loans/admin/:id/return",
            put(
                |State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Json(req): Json<AdminReturnRequest>| async move {
                    Controller::new(LoanTransformer, LoanPresenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.pgpool().admin_return_loan(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
