use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::Catalog;
use crate::error::CatalogError;
use crate::model::*;

const PRICE: &str = PriceId::ENTITY;

impl Catalog {
    /// Validate a price form: one product, a known supplier, a positive amount,
    /// and no other price from the same supplier for the same product.
    pub(crate) fn check_price(
        &self,
        draft: &NewPrice,
        except: Option<PriceId>,
    ) -> Result<Price, CatalogError> {
        let item = PricedItem::from_refs(draft.frequency_drive, draft.accessory).map_err(|err| {
            warn!(error = %err, "rejected price binding");
            err
        })?;
        self.require_item(item)?;
        self.suppliers.require(draft.supplier)?;
        check_amount(draft.price)?;
        let taken = self
            .prices
            .values()
            .any(|p| p.item == item && p.supplier == draft.supplier && Some(p.id) != except);
        if taken {
            warn!(%item, supplier = %draft.supplier, "rejected duplicate price");
            return Err(CatalogError::DuplicatePrice {
                supplier: draft.supplier.raw(),
                item: item.to_string(),
            });
        }
        Ok(Price {
            id: except.unwrap_or(PriceId(0)),
            item,
            supplier: draft.supplier,
            price: draft.price,
        })
    }

    fn require_item(&self, item: PricedItem) -> Result<(), CatalogError> {
        match item {
            PricedItem::FrequencyDrive(id) => self.drives.require(id).map(|_| ()),
            PricedItem::Accessory(id) => self.accessories.require(id).map(|_| ()),
        }
    }

    pub fn create_price(&mut self, draft: NewPrice) -> Result<PriceId, CatalogError> {
        let price = self.check_price(&draft, None)?;
        let id = self.prices.insert_with(|id| Price { id, ..price })?;
        debug!(entity = PRICE, %id, "created");
        Ok(id)
    }

    /// Change the amount of an existing price.
    pub fn update_price(&mut self, id: PriceId, amount: Decimal) -> Result<(), CatalogError> {
        check_amount(amount)?;
        self.prices.require_mut(id)?.price = amount;
        debug!(entity = PRICE, %id, %amount, "updated");
        Ok(())
    }

    pub fn price(&self, id: PriceId) -> Option<&Price> {
        self.prices.get(id)
    }

    pub fn prices(&self) -> Vec<&Price> {
        self.prices.values().collect()
    }

    pub fn delete_price(&mut self, id: PriceId) -> Result<(), CatalogError> {
        self.prices.require(id)?;
        self.prices.remove(id);
        info!(entity = PRICE, %id, "deleted");
        Ok(())
    }

    /// The price of `item` from `supplier`, in the supplier's currency.
    pub fn price_for(&self, item: PricedItem, supplier: SupplierId) -> Option<Quote> {
        self.prices
            .values()
            .find(|p| p.item == item && p.supplier == supplier)
            .and_then(|p| self.quote(p))
    }

    /// Every supplier quote for `item`, ordered by supplier name.
    pub fn offers_for(&self, item: PricedItem) -> Vec<Quote> {
        let mut quotes: Vec<Quote> = self
            .prices
            .values()
            .filter(|p| p.item == item)
            .filter_map(|p| self.quote(p))
            .collect();
        quotes.sort_by(|a, b| a.supplier_name.cmp(&b.supplier_name));
        quotes
    }

    fn quote(&self, price: &Price) -> Option<Quote> {
        let supplier = self.suppliers.get(price.supplier)?;
        Some(Quote {
            supplier: supplier.id,
            supplier_name: supplier.name.clone(),
            price: price.price,
            currency: supplier.currency,
        })
    }
}

/// Amounts must fit the `NUMERIC(14, 2)` price column.
const AMOUNT_SCALE: u32 = 2;
const AMOUNT_INTEGER_DIGITS: u32 = 12;

fn check_amount(amount: Decimal) -> Result<(), CatalogError> {
    if amount <= Decimal::ZERO {
        return Err(CatalogError::invalid(
            PRICE,
            "price",
            format!("must be greater than zero, got {}", amount),
        ));
    }
    if amount.normalize().scale() > AMOUNT_SCALE {
        return Err(CatalogError::invalid(
            PRICE,
            "price",
            format!("at most {} decimal places, got {}", AMOUNT_SCALE, amount),
        ));
    }
    if amount >= Decimal::from(10i64.pow(AMOUNT_INTEGER_DIGITS)) {
        return Err(CatalogError::invalid(
            PRICE,
            "price",
            format!("at most {} integer digits, got {}", AMOUNT_INTEGER_DIGITS, amount),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choices::Currency;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    struct Fixture {
        catalog: Catalog,
        acme: SupplierId,
        drive: FrequencyDriveId,
        accessory: AccessoryId,
    }

    fn fixture() -> Fixture {
        let mut catalog = Catalog::new();
        let de = catalog.create_country("Germany").unwrap();
        let acme = catalog
            .create_supplier(NewSupplier {
                name: "ACME".into(),
                site: String::new(),
                country: de,
                currency: Currency::Eur,
            })
            .unwrap();
        let brand = catalog
            .create_brand(NewBrand {
                name: "Danfoss".into(),
                site: String::new(),
                country: de,
                description: String::new(),
                logo: None,
                equipment_lines: vec![],
                suppliers: vec![acme],
            })
            .unwrap();
        let category = catalog.create_category("General").unwrap();
        let series = catalog
            .create_series(NewSeries::new(brand, "VLT", category))
            .unwrap();
        let drive = catalog
            .create_drive(NewFrequencyDrive::new("VLT-001", series, 2.2))
            .unwrap();
        let filters = catalog.create_accessory_type("Filters").unwrap();
        let accessory = catalog
            .create_accessory(NewAccessory {
                article: "EMC-1".into(),
                name: None,
                accessory_type: filters,
                series: vec![series],
            })
            .unwrap();
        Fixture {
            catalog,
            acme,
            drive,
            accessory,
        }
    }

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn test_price_binding_is_exclusive() {
        let Fixture {
            mut catalog,
            acme,
            drive,
            accessory,
        } = fixture();
        let both = NewPrice {
            frequency_drive: Some(drive),
            accessory: Some(accessory),
            supplier: acme,
            price: dec("10"),
        };
        assert!(matches!(
            catalog.create_price(both),
            Err(CatalogError::InvalidPriceBinding(_))
        ));
        let neither = NewPrice {
            frequency_drive: None,
            accessory: None,
            supplier: acme,
            price: dec("10"),
        };
        assert!(matches!(
            catalog.create_price(neither),
            Err(CatalogError::InvalidPriceBinding(_))
        ));
        assert!(catalog.prices().is_empty());
    }

    #[test]
    fn test_quote_uses_supplier_currency() {
        let Fixture {
            mut catalog,
            acme,
            drive,
            ..
        } = fixture();
        catalog
            .create_price(NewPrice::for_drive(drive, acme, dec("450.0")))
            .unwrap();
        let quote = catalog
            .price_for(PricedItem::FrequencyDrive(drive), acme)
            .unwrap();
        assert_eq!(quote.price, dec("450.0"));
        assert_eq!(quote.currency, Currency::Eur);
        assert_eq!(quote.supplier_name, "ACME");
    }

    #[test]
    fn test_one_price_per_supplier_and_item() {
        let Fixture {
            mut catalog,
            acme,
            drive,
            accessory,
        } = fixture();
        catalog
            .create_price(NewPrice::for_drive(drive, acme, dec("450")))
            .unwrap();
        assert!(matches!(
            catalog.create_price(NewPrice::for_drive(drive, acme, dec("460"))),
            Err(CatalogError::DuplicatePrice { .. })
        ));
        catalog
            .create_price(NewPrice::for_accessory(accessory, acme, dec("35.50")))
            .unwrap();
        assert_eq!(catalog.prices().len(), 2);
    }

    #[test]
    fn test_amount_must_be_positive() {
        let Fixture {
            mut catalog,
            acme,
            drive,
            ..
        } = fixture();
        assert!(matches!(
            catalog.create_price(NewPrice::for_drive(drive, acme, Decimal::ZERO)),
            Err(CatalogError::InvalidValue { .. })
        ));
        let id = catalog
            .create_price(NewPrice::for_drive(drive, acme, dec("1")))
            .unwrap();
        assert!(catalog.update_price(id, dec("-5")).is_err());
        catalog.update_price(id, dec("2.5")).unwrap();
        assert_eq!(catalog.price(id).unwrap().price, dec("2.5"));
    }

    #[test]
    fn test_amount_fits_price_column() {
        let Fixture {
            mut catalog,
            acme,
            drive,
            ..
        } = fixture();
        for amount in ["0.001", "12.345", "1000000000000"] {
            assert!(
                matches!(
                    catalog.create_price(NewPrice::for_drive(drive, acme, dec(amount))),
                    Err(CatalogError::InvalidValue { .. })
                ),
                "{} accepted",
                amount
            );
        }
        assert!(catalog.prices().is_empty());

        let id = catalog
            .create_price(NewPrice::for_drive(drive, acme, dec("999999999999.99")))
            .unwrap();
        assert!(catalog.update_price(id, dec("0.005")).is_err());
        catalog.update_price(id, dec("450.500")).unwrap();
        assert_eq!(catalog.price(id).unwrap().price, dec("450.5"));
    }

    #[test]
    fn test_priced_products_are_protected() {
        let Fixture {
            mut catalog,
            acme,
            drive,
            accessory,
        } = fixture();
        let drive_price = catalog
            .create_price(NewPrice::for_drive(drive, acme, dec("450")))
            .unwrap();
        let accessory_price = catalog
            .create_price(NewPrice::for_accessory(accessory, acme, dec("20")))
            .unwrap();
        assert!(catalog.delete_drive(drive).is_err());
        assert!(catalog.delete_accessory(accessory).is_err());

        catalog.delete_price(drive_price).unwrap();
        catalog.delete_price(accessory_price).unwrap();
        catalog.delete_drive(drive).unwrap();
        catalog.delete_accessory(accessory).unwrap();
    }

    #[test]
    fn test_offers_sorted_by_supplier_name() {
        let Fixture {
            mut catalog,
            acme,
            drive,
            ..
        } = fixture();
        let country = catalog.supplier(acme).unwrap().country;
        let alfa = catalog
            .create_supplier(NewSupplier {
                name: "Alfa".into(),
                site: String::new(),
                country,
                currency: Currency::Byn,
            })
            .unwrap();
        catalog
            .create_price(NewPrice::for_drive(drive, acme, dec("450")))
            .unwrap();
        catalog
            .create_price(NewPrice::for_drive(drive, alfa, dec("1500")))
            .unwrap();
        let offers = catalog.offers_for(PricedItem::FrequencyDrive(drive));
        let names: Vec<&str> = offers.iter().map(|q| q.supplier_name.as_str()).collect();
        assert_eq!(names, vec!["ACME", "Alfa"]);
        assert_eq!(offers[1].currency, Currency::Byn);
    }
}
