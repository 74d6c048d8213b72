use std::rc::Rc;

use bondflow_core::{BondCatalog, BucketedRisk, BucketedSector, Position, Pv01};
use rust_decimal::Decimal;
use tracing::warn;

use crate::application::bus::{Listener, ServiceCore};

/// PV01 risk per instrument and across bucketed sectors.
///
/// Each position update is repriced as its static PV01 times the
/// aggregate position. Bucketed risk sums pv01·quantity over the
/// sector's instruments; instruments without a stored risk record
/// contribute nothing.
pub struct RiskService {
    core: ServiceCore<Pv01>,
    catalog: Rc<BondCatalog>,
}

impl RiskService {
    pub fn new(catalog: Rc<BondCatalog>) -> Self {
        Self {
            core: ServiceCore::new(),
            catalog,
        }
    }

    pub fn add_position(&mut self, position: &Position) {
        match self.catalog.pv01(position.bond.cusip()) {
            Ok(pv01) => {
                let risk = Pv01::new(position.bond.clone(), pv01, position.aggregate());
                self.core.publish(risk);
            }
            Err(err) => warn!(%err, "dropping risk update"),
        }
    }

    pub fn get_data(&self, cusip: &str) -> Option<&Pv01> {
        self.core.get(cusip)
    }

    /// Roll the stored per-instrument risk up into one sector number.
    pub fn bucketed_risk(&self, sector: &BucketedSector) -> BucketedRisk {
        let total: Decimal = sector
            .bonds
            .iter()
            .filter_map(|bond| self.core.get(bond.cusip()))
            .map(Pv01::exposure)
            .sum();
        BucketedRisk::new(sector.clone(), total)
    }

    pub fn add_listener(&mut self, listener: Box<dyn Listener<Pv01>>) {
        self.core.add_listener(listener);
    }
}
