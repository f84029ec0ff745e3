//! Order placement. No payment is taken; a confirmation is produced and the
//! cart is emptied.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    app_error::{AppError, AppResult},
    application::{
        helpers::money::format_money,
        use_cases::{billing_region::BillingRegion, cart::Cart},
        validators::is_valid_email,
    },
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderConfirmation {
    pub item_count: u64,
    pub subtotal: i64,
    pub currency: String,
    pub placed_at: DateTime<Utc>,
}

impl OrderConfirmation {
    pub fn display_subtotal(&self) -> String {
        format_money(self.subtotal as f64, &self.currency)
    }
}

/// Place an order for everything in the cart, priced in the billing currency.
#[instrument(skip_all, fields(items = cart.items().len()))]
pub fn place_order(
    cart: &mut Cart,
    billing: &BillingRegion,
    form: &CheckoutForm,
) -> AppResult<OrderConfirmation> {
    if cart.is_empty() {
        return Err(AppError::InvalidInput("Cart is empty".into()));
    }

    let email = form.email.trim();
    if !email.is_empty() && !is_valid_email(email) {
        return Err(AppError::InvalidInput("Invalid email format".into()));
    }

    let currency = billing.currency();
    let view = cart.view(&currency);
    let confirmation = OrderConfirmation {
        item_count: cart.count(),
        subtotal: view.subtotal,
        currency,
        placed_at: Utc::now(),
    };

    cart.clear();
    tracing::info!(
        items = confirmation.item_count,
        subtotal = confirmation.subtotal,
        currency = %confirmation.currency,
        "Order placed"
    );

    Ok(confirmation)
}
