mod line;
mod persist;
mod state;
mod store;

pub use line::{CartLine, SelectedOption, is_line_match};
pub use persist::{
    CartPersistence, DESTINATION_KEY, LINES_KEY, ORDER_METHOD_KEY, STORE_CODE_KEY,
};
pub use state::{CartAction, CartField, CartState, OrderMethod};
pub use store::CartStore;
