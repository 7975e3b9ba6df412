use feast_catalog::CatalogError;
use feast_core::CoreError;
use feast_order::CheckoutError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Core(#[from] CoreError),
}
