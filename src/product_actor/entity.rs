//! [`ActorEntity`] implementation for [`Product`].
//!
//! Validates names and prices on create and update, and implements the stock actions.

use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::model::{Money, Product, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;
use resource_actor::ActorEntity;

fn check_name(name: &str) -> Result<(), ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::InvalidName);
    }
    Ok(())
}

fn check_price(price: Money) -> Result<(), ProductError> {
    if price.is_negative() {
        return Err(ProductError::InvalidPrice(price.to_string()));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        check_name(&params.name)?;
        check_price(params.unit_price)?;
        Ok(Self::new(
            id,
            params.name,
            params.unit_price,
            params.stock_quantity,
        ))
    }

    /// Applies the fields that are `Some`. Nothing is applied if any of them is invalid.
    async fn on_update(
        &mut self,
        update: ProductUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            check_name(&name)?;
            self.name = name;
        }
        if let Some(price) = update.unit_price {
            check_price(price)?;
            self.unit_price = price;
        }
        if let Some(stock) = update.stock_quantity {
            self.stock_quantity = stock;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &Self::Context,
    ) -> Result<ProductActionResult, Self::Error> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.stock_quantity)),
            ProductAction::ReserveStock(quantity) => {
                self.stock_quantity = self.stock_quantity.checked_sub(quantity).ok_or_else(|| {
                    ProductError::InsufficientStock {
                        product: self.name.clone(),
                        requested: quantity,
                        available: self.stock_quantity,
                    }
                })?;
                Ok(ProductActionResult::ReserveStock(()))
            }
            ProductAction::ReleaseStock(quantity) => {
                self.stock_quantity = self
                    .stock_quantity
                    .checked_add(quantity)
                    .ok_or(ProductError::InvalidQuantity(quantity))?;
                Ok(ProductActionResult::ReleaseStock(self.stock_quantity))
            }
        }
    }
}
