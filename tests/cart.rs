//! Integration tests for the cart ledger persisted in a data directory.

use std::fs;

use jiff::{Timestamp, tz::TimeZone};
use testresult::TestResult;

use aurea::{
    cart::{
        Ledger, LedgerError,
        items::LineItem,
        observer::Notifications,
        storage::{CART_KEY, CartStorage, FileStorage},
    },
    catalog::CatalogStore,
    checkout::{CheckoutError, PaymentMethod},
    prices::Price,
    storefront::{Storefront, StorefrontError},
};

#[test]
fn cart_survives_reopening() -> TestResult {
    let dir = tempfile::tempdir()?;

    {
        let mut ledger = Ledger::open(FileStorage::new(dir.path()))?;
        ledger.add("Pearl Whisper Flats", Price::new(329_000))?;
        ledger.add("Blush Charm", Price::new(349_000))?;
    }

    let ledger = Ledger::open(FileStorage::new(dir.path()))?;

    assert_eq!(
        ledger.list(),
        [
            LineItem::new("Pearl Whisper Flats", Price::new(329_000)),
            LineItem::new("Blush Charm", Price::new(349_000)),
        ]
    );
    assert_eq!(ledger.total()?, Price::new(678_000));

    Ok(())
}

#[test]
fn stored_format_is_name_and_price_list() -> TestResult {
    let dir = tempfile::tempdir()?;
    let mut ledger = Ledger::open(FileStorage::new(dir.path()))?;

    ledger.add("Blush Charm", Price::new(349_000))?;

    let stored: serde_json::Value = serde_json::from_str(&fs::read_to_string(
        dir.path().join(format!("{CART_KEY}.json")),
    )?)?;

    assert_eq!(
        stored,
        serde_json::json!([{ "name": "Blush Charm", "price": 349_000 }])
    );

    Ok(())
}

#[test]
fn two_sessions_do_not_overwrite_each_other() -> TestResult {
    let dir = tempfile::tempdir()?;
    let mut first = Ledger::open(FileStorage::new(dir.path()))?;
    let mut second = Ledger::open(FileStorage::new(dir.path()))?;

    first.add("Blush Charm", Price::new(349_000))?;
    second.add("Sky Pearl Flats", Price::new(379_000))?;
    first.remove(1)?;

    let remaining: Vec<String> = Ledger::open(FileStorage::new(dir.path()))?
        .list()
        .iter()
        .map(|item| item.name.clone())
        .collect();

    assert_eq!(remaining, vec!["Blush Charm"]);

    Ok(())
}

#[test]
fn corrupt_cart_file_is_reset_on_next_write() -> TestResult {
    let dir = tempfile::tempdir()?;
    let storage = FileStorage::new(dir.path());
    storage.set(CART_KEY, "{\"truncated\":")?;

    let mut ledger = Ledger::open_with_observer(storage.clone(), Notifications::new())?;

    assert!(ledger.is_empty());
    assert_eq!(
        ledger.observer_mut().drain(),
        vec!["Saved cart could not be read and was reset"]
    );

    ledger.add("Blush Charm", Price::new(349_000))?;

    assert_eq!(
        storage.get(CART_KEY)?,
        Some(r#"[{"name":"Blush Charm","price":349000}]"#.to_string())
    );

    Ok(())
}

#[test]
fn storefront_checkout_flow() -> TestResult {
    let dir = tempfile::tempdir()?;
    let ledger = Ledger::open_with_observer(FileStorage::new(dir.path()), Notifications::new())?;
    let mut storefront = Storefront::new(CatalogStore::default(), ledger);

    storefront.add_to_cart("1")?;
    storefront.add_to_cart("3")?;

    let placed_at = Timestamp::from_second(1_760_515_209)?.to_zoned(TimeZone::UTC);
    let order = storefront.ledger_mut().checkout_at(
        "  Jl. Braga 12, Bandung ",
        Some("transfer"),
        placed_at,
    )?;

    assert_eq!(order.items().len(), 2);
    assert_eq!(order.subtotal(), Price::new(708_000));
    assert_eq!(order.shipping(), Price::ZERO);
    assert_eq!(order.total(), Price::new(708_000));
    assert_eq!(order.payment(), PaymentMethod::BankTransfer);
    assert_eq!(order.address(), "Jl. Braga 12, Bandung");
    assert_eq!(order.date(), "15/10/2025");

    let reopened = Ledger::open(FileStorage::new(dir.path()))?;
    assert!(reopened.is_empty());

    let messages = storefront.ledger_mut().observer_mut().drain();
    assert_eq!(
        messages.last().map(String::as_str),
        Some(format!("Order {} placed", order.number()).as_str())
    );

    Ok(())
}

#[test]
fn checkout_rejections_leave_the_cart_alone() -> TestResult {
    let dir = tempfile::tempdir()?;
    let ledger = Ledger::open(FileStorage::new(dir.path()))?;
    let mut storefront = Storefront::new(CatalogStore::default(), ledger);

    assert!(matches!(
        storefront.checkout("Jl. Braga 12", Some("cod")),
        Err(StorefrontError::Ledger(LedgerError::Checkout(
            CheckoutError::EmptyCart
        )))
    ));
    assert!(!dir.path().join("cart.json").exists());

    storefront.add_to_cart("2")?;

    assert!(matches!(
        storefront.checkout("Jl. Braga 12", None),
        Err(StorefrontError::Ledger(LedgerError::Checkout(
            CheckoutError::MissingPaymentMethod
        )))
    ));
    assert!(matches!(
        storefront.checkout("Jl. Braga 12", Some("paypal")),
        Err(StorefrontError::Ledger(LedgerError::Checkout(
            CheckoutError::UnknownPaymentMethod(_)
        )))
    ));
    assert_eq!(Ledger::open(FileStorage::new(dir.path()))?.len(), 1);

    Ok(())
}
