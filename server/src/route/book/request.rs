use crate::controller::Intake;
use application::transfer::{CreateBookDto, DeleteBookDto, GetAllBookDto, GetBookDto};
use kernel::prelude::entity::{SelectLimit, SelectOffset};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    title: String,
    author: String,
    isbn: String,
    stock: i32,
}

// I want to use primitive type(i32) in these fields, but default attribute not supported for literals(https://github.com/serde-rs/serde/issues/368)
#[derive(Debug, Deserialize)]
pub struct GetAllBookRequest {
    #[serde(default)]
    limit: SelectLimit,
    #[serde(default)]
    offset: SelectOffset,
}

#[derive(Debug)]
pub struct GetBookRequest {
    id: Uuid,
}

impl GetBookRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteBookRequest {
    actor_id: Uuid,
}

pub struct BookTransformer;

impl Intake<CreateBookRequest> for BookTransformer {
    type To = CreateBookDto;
    fn emit(&self, input: CreateBookRequest) -> Self::To {
        CreateBookDto {
            title: input.title,
            author: input.author,
            isbn: input.isbn,
            stock: input.stock,
        }
    }
}

impl Intake<GetAllBookRequest> for BookTransformer {
    type To = GetAllBookDto;
    fn emit(&self, input: GetAllBookRequest) -> Self::To {
        GetAllBookDto {
            limit: input.limit,
            offset: input.offset,
        }
    }
}

impl Intake<GetBookRequest> for BookTransformer {
    type To = GetBookDto;
    fn emit(&self, input: GetBookRequest) -> Self::To {
        GetBookDto { id: input.id }
    }
}

impl Intake<(Uuid, DeleteBookRequest)> for BookTransformer {
    type To = DeleteBookDto;
    fn emit(&self, input: (Uuid, DeleteBookRequest)) -> Self::To {
        let (id, input) = input;
        DeleteBookDto {
            id,
            actor_id: input.actor_id,
        }
    }
}
