use serde::de::DeserializeOwned;

use super::{
    line::CartLine,
    state::{CartField, CartState},
};
use crate::{error::ClientResult, storage::KeyValueStore};

pub const STORE_CODE_KEY: &str = "order_storeCode";
pub const ORDER_METHOD_KEY: &str = "order_orderMethod";
pub const DESTINATION_KEY: &str = "order_destination";
pub const LINES_KEY: &str = "order_lines";

/// Mirrors cart fields into a [`KeyValueStore`]. The discount code is never
/// written: it lives only as long as the session that set it.
#[derive(Debug, Clone)]
pub struct CartPersistence<S> {
    store: S,
}

impl<S: KeyValueStore> CartPersistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn load(&self) -> ClientResult<CartState> {
        Ok(CartState {
            store_code: self.read::<String>(STORE_CODE_KEY).await?,
            order_method: self.read(ORDER_METHOD_KEY).await?.unwrap_or_default(),
            destination: self.read(DESTINATION_KEY).await?.unwrap_or_default(),
            discount_code: None,
            lines: self
                .read::<Vec<CartLine>>(LINES_KEY)
                .await?
                .unwrap_or_default()
                .into_iter()
                .filter(|line| line.quantity > 0)
                .collect(),
        })
    }

    pub async fn save(&self, state: &CartState, field: CartField) -> ClientResult<()> {
        match field {
            CartField::StoreCode => match &state.store_code {
                Some(code) => self.write(STORE_CODE_KEY, code).await,
                None => self.store.remove(STORE_CODE_KEY).await,
            },
            CartField::OrderMethod => self.write(ORDER_METHOD_KEY, &state.order_method).await,
            CartField::Destination => self.write(DESTINATION_KEY, &state.destination).await,
            CartField::Lines => self.write(LINES_KEY, &state.lines).await,
            CartField::DiscountCode => Ok(()),
        }
    }

    pub async fn save_all(&self, state: &CartState) -> ClientResult<()> {
        for field in [
            CartField::StoreCode,
            CartField::OrderMethod,
            CartField::Destination,
            CartField::Lines,
        ] {
            self.save(state, field).await?;
        }
        Ok(())
    }

    async fn write<T: serde::Serialize + ?Sized>(&self, key: &str, value: &T) -> ClientResult<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw).await
    }

    // A value that no longer parses is treated as absent.
    async fn read<T: DeserializeOwned>(&self, key: &str) -> ClientResult<Option<T>> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                tracing::warn!(key, error = %err, "ignoring unreadable stored cart value");
                Ok(None)
            }
        }
    }
}
