use serde::Deserialize;

use crate::domain::order::{OrderStatus, UnknownOrderStatus};

/// Body of `POST /admin/orders/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct OrderStatusForm {
    pub status: String,
}

impl OrderStatusForm {
    pub fn status(&self) -> Result<OrderStatus, UnknownOrderStatus> {
        self.status.parse()
    }
}
