//! Application Layer - Use cases

pub mod favorites;
pub mod products;

pub use favorites::FavoritesUseCase;
pub use products::{CreateProductInput, ProductListQuery, ProductsUseCase, UpdateProductInput};
