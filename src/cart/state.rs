use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::line::{CartLine, SelectedOption};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderMethod {
    PickUp,
    #[default]
    Delivery,
}

impl OrderMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderMethod::PickUp => "PICK_UP",
            OrderMethod::Delivery => "DELIVERY",
        }
    }
}

impl fmt::Display for OrderMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "PICK_UP" | "PICKUP" => Ok(OrderMethod::PickUp),
            "DELIVERY" => Ok(OrderMethod::Delivery),
            other => Err(format!("unknown order method: {other}")),
        }
    }
}

/// The part of [`CartState`] an action touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartField {
    StoreCode,
    OrderMethod,
    Destination,
    DiscountCode,
    Lines,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    SetStore(Option<String>),
    SetMethod(OrderMethod),
    SetDestination(String),
    SetDiscount(Option<String>),
    IncreaseLine {
        product_id: String,
        selected_options: Vec<SelectedOption>,
        selected_topping_ids: Vec<String>,
        amount: u32,
    },
    DecreaseLine {
        product_id: String,
        selected_options: Vec<SelectedOption>,
        selected_topping_ids: Vec<String>,
    },
    ReplaceLines(Vec<CartLine>),
    ClearLines,
}

/// The order draft held by one session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartState {
    pub store_code: Option<String>,
    pub order_method: OrderMethod,
    pub destination: String,
    pub discount_code: Option<String>,
    pub lines: Vec<CartLine>,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `action` in place and reports which field changed. `None`
    /// means the action was a no-op and nothing needs persisting. An increase
    /// that would overflow the line's quantity is refused and leaves the
    /// state untouched.
    pub fn apply(&mut self, action: CartAction) -> Option<CartField> {
        match action {
            CartAction::SetStore(code) => {
                self.store_code = code;
                Some(CartField::StoreCode)
            }
            CartAction::SetMethod(method) => {
                self.order_method = method;
                Some(CartField::OrderMethod)
            }
            CartAction::SetDestination(destination) => {
                self.destination = destination;
                Some(CartField::Destination)
            }
            CartAction::SetDiscount(code) => {
                self.discount_code = code;
                Some(CartField::DiscountCode)
            }
            CartAction::IncreaseLine {
                product_id,
                selected_options,
                selected_topping_ids,
                amount,
            } => {
                if amount == 0 {
                    return None;
                }
                match self.find_line(&product_id, &selected_options, &selected_topping_ids) {
                    Some(index) => {
                        let line = &mut self.lines[index];
                        line.quantity = line.quantity.checked_add(amount)?;
                    }
                    None => self.lines.push(CartLine::new(
                        product_id,
                        selected_options,
                        selected_topping_ids,
                        amount,
                    )),
                }
                Some(CartField::Lines)
            }
            CartAction::DecreaseLine {
                product_id,
                selected_options,
                selected_topping_ids,
            } => {
                let index =
                    self.find_line(&product_id, &selected_options, &selected_topping_ids)?;
                if self.lines[index].quantity <= 1 {
                    self.lines.remove(index);
                } else {
                    self.lines[index].quantity -= 1;
                }
                Some(CartField::Lines)
            }
            CartAction::ReplaceLines(lines) => {
                self.lines = lines.into_iter().filter(|line| line.quantity > 0).collect();
                Some(CartField::Lines)
            }
            CartAction::ClearLines => {
                self.lines.clear();
                Some(CartField::Lines)
            }
        }
    }

    pub fn find_line(
        &self,
        product_id: &str,
        selected_options: &[SelectedOption],
        selected_topping_ids: &[String],
    ) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.matches(product_id, selected_options, selected_topping_ids))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}
