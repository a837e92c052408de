use crate::error::QuoteError;
use crate::pricing::models::ServiceType;
use crate::pricing::table::PriceTable;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// User intent fed into [`ConfiguratorState::dispatch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum Action {
    SetServiceType(ServiceType),
    SetTier(usize),
    SetDuration(usize),
    SetQuantity(u32),
}

/// Current configurator selection
///
/// Transitions never mutate in place; each returns a new state that satisfies:
/// - `tier_index < tiers(service_type).len()`
/// - `duration_index < rates_for(service_type, tier_index).len()`
/// - `quantity >= 1`, and `quantity == 1` when the service does not allow crew
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConfiguratorState {
    service_type: ServiceType,
    tier_index: usize,
    duration_index: usize,
    quantity: u32,
}

impl ConfiguratorState {
    /// Curated starting point for a service type
    pub fn default_for(table: &PriceTable, service_type: ServiceType) -> Self {
        let defaults = table.service(service_type).defaults();
        Self {
            service_type,
            tier_index: defaults.tier,
            duration_index: defaults.duration,
            quantity: 1,
        }
    }

    /// Raw constructor that bypasses every invariant
    #[cfg(test)]
    pub(crate) fn from_raw(
        service_type: ServiceType,
        tier_index: usize,
        duration_index: usize,
        quantity: u32,
    ) -> Self {
        Self {
            service_type,
            tier_index,
            duration_index,
            quantity,
        }
    }

    pub fn service_type(&self) -> ServiceType {
        self.service_type
    }

    pub fn tier_index(&self) -> usize {
        self.tier_index
    }

    pub fn duration_index(&self) -> usize {
        self.duration_index
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Switch service type, discarding every prior selection
    pub fn set_service_type(&self, table: &PriceTable, service_type: ServiceType) -> Self {
        let next = Self::default_for(table, service_type);
        debug!(
            from = %self.service_type,
            to = %service_type,
            tier = next.tier_index,
            duration = next.duration_index,
            "Service type changed, selection reset"
        );
        next
    }

    /// Select a tier, clamping the duration to the new tier's rate list
    pub fn set_tier(&self, table: &PriceTable, tier_index: usize) -> Result<Self, QuoteError> {
        let rates = table.rates_for(self.service_type, tier_index)?;
        let last = rates.len() - 1;
        let duration_index = self.duration_index.min(last);

        if duration_index != self.duration_index {
            warn!(
                service = %self.service_type,
                tier = tier_index,
                requested = self.duration_index,
                clamped = duration_index,
                "Duration clamped to tier's available rates"
            );
        }

        debug!(service = %self.service_type, tier = tier_index, duration = duration_index, "Tier selected");
        Ok(Self {
            tier_index,
            duration_index,
            ..*self
        })
    }

    pub fn set_duration(&self, table: &PriceTable, duration_index: usize) -> Result<Self, QuoteError> {
        let rates = table.rates_for(self.service_type, self.tier_index)?;
        if duration_index >= rates.len() {
            return Err(QuoteError::duration_out_of_range(duration_index, rates.len()));
        }

        debug!(service = %self.service_type, tier = self.tier_index, duration = duration_index, "Duration selected");
        Ok(Self {
            duration_index,
            ..*self
        })
    }

    /// Set crew size, clamped to `[1, max_crew]`; ignored for services without crew
    pub fn set_quantity(&self, table: &PriceTable, quantity: u32) -> Self {
        if !table.meta_for(self.service_type).allow_crew {
            if quantity != self.quantity {
                warn!(
                    service = %self.service_type,
                    requested = quantity,
                    "Quantity ignored, service does not allow crew"
                );
            }
            return *self;
        }

        let clamped = quantity.clamp(1, table.max_crew());
        if clamped != quantity {
            warn!(requested = quantity, clamped, "Quantity clamped to crew bounds");
        }

        debug!(service = %self.service_type, quantity = clamped, "Quantity selected");
        Self {
            quantity: clamped,
            ..*self
        }
    }

    /// Reduce one action into the next state
    pub fn dispatch(&self, table: &PriceTable, action: Action) -> Result<Self, QuoteError> {
        match action {
            Action::SetServiceType(service_type) => Ok(self.set_service_type(table, service_type)),
            Action::SetTier(index) => self.set_tier(table, index),
            Action::SetDuration(index) => self.set_duration(table, index),
            Action::SetQuantity(quantity) => Ok(self.set_quantity(table, quantity)),
        }
    }

    /// Whether the state satisfies every invariant against `table`
    pub fn is_valid(&self, table: &PriceTable) -> bool {
        let Ok(rates) = table.rates_for(self.service_type, self.tier_index) else {
            return false;
        };
        let quantity_ok = if table.meta_for(self.service_type).allow_crew {
            self.quantity >= 1
        } else {
            self.quantity == 1
        };
        self.duration_index < rates.len() && quantity_ok
    }
}
