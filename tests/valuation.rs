//! Holdings valuator tests: gain/loss arithmetic, missing data degradation,
//! latest-price selection, cash handling.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use rust_portfolio::types::holding::{Asset, Holding, PricePoint};
use rust_portfolio::valuation::{
    AssetCatalog, PriceHistory, cash_balance, value_holdings,
};
use uuid::Uuid;

fn asset(catalog: &mut AssetCatalog, symbol: &str, class: &str) -> Uuid {
    let asset_id = Uuid::new_v4();
    catalog.insert(Asset {
        asset_id,
        symbol: symbol.to_string(),
        name: format!("{symbol} Fund"),
        asset_class: class.to_string(),
    });
    asset_id
}

fn holding(user_id: Uuid, asset_id: Uuid, units: Decimal, invested: Decimal) -> Holding {
    Holding {
        user_port_id: Uuid::new_v4(),
        user_id,
        asset_id,
        asset_total_units: units,
        investment_amount: invested,
    }
}

#[test]
fn empty_portfolio_is_all_zeros() {
    let summary = value_holdings(
        Uuid::new_v4(),
        &[],
        &AssetCatalog::new(),
        &PriceHistory::new(),
    );
    assert!(summary.holdings.is_empty());
    assert_eq!(summary.total_value, Decimal::ZERO);
    assert_eq!(summary.total_gain_loss, Decimal::ZERO);
    assert_eq!(summary.total_gain_loss_percent, Decimal::ZERO);
}

#[test]
fn gain_loss_arithmetic() {
    let user_id = Uuid::new_v4();
    let mut catalog = AssetCatalog::new();
    let asset_id = asset(&mut catalog, "VTI", "equity");
    let mut prices = PriceHistory::new();
    prices.append(PricePoint {
        asset_id,
        close_price: dec!(120),
        date: Utc::now(),
    });
    let holdings = [holding(user_id, asset_id, dec!(10), dec!(1000))];

    let summary = value_holdings(user_id, &holdings, &catalog, &prices);
    let row = &summary.holdings[0];
    assert_eq!(row.latest_close_price, dec!(120));
    assert_eq!(row.current_amount, dec!(1200));
    assert_eq!(row.gain_loss, dec!(200));
    assert_eq!(row.gain_loss_percent, dec!(20));
    assert_eq!(summary.total_value, dec!(1200));
    assert_eq!(summary.total_gain_loss, dec!(200));
    assert_eq!(summary.total_gain_loss_percent, dec!(20));
}

#[test]
fn missing_asset_metadata_degrades_to_zero_valued_row() {
    let user_id = Uuid::new_v4();
    let holdings = [holding(user_id, Uuid::new_v4(), dec!(5), dec!(500))];

    let summary = value_holdings(user_id, &holdings, &AssetCatalog::new(), &PriceHistory::new());
    let row = &summary.holdings[0];
    assert_eq!(row.latest_close_price, Decimal::ZERO);
    assert_eq!(row.current_amount, Decimal::ZERO);
    assert_eq!(row.gain_loss, Decimal::ZERO);
    assert_eq!(row.gain_loss_percent, Decimal::ZERO);
    assert!(row.symbol.is_empty());
    // The degraded row contributes nothing to the aggregate.
    assert_eq!(summary.total_gain_loss, Decimal::ZERO);
}

#[test]
fn latest_price_is_max_date_regardless_of_insert_order() {
    let user_id = Uuid::new_v4();
    let mut catalog = AssetCatalog::new();
    let asset_id = asset(&mut catalog, "VTI", "equity");
    let now = Utc::now();
    let mut prices = PriceHistory::new();
    for (close, age_days) in [(dec!(110), 1), (dec!(130), 0), (dec!(90), 7)] {
        prices.append(PricePoint {
            asset_id,
            close_price: close,
            date: now - Duration::days(age_days),
        });
    }
    let holdings = [holding(user_id, asset_id, dec!(1), dec!(100))];

    let summary = value_holdings(user_id, &holdings, &catalog, &prices);
    assert_eq!(summary.holdings[0].latest_close_price, dec!(130));
}

#[test]
fn zero_investment_yields_zero_percent() {
    let user_id = Uuid::new_v4();
    let mut catalog = AssetCatalog::new();
    let asset_id = asset(&mut catalog, "FREE", "equity");
    let mut prices = PriceHistory::new();
    prices.append(PricePoint {
        asset_id,
        close_price: dec!(10),
        date: Utc::now(),
    });
    let holdings = [holding(user_id, asset_id, dec!(3), Decimal::ZERO)];

    let summary = value_holdings(user_id, &holdings, &catalog, &prices);
    assert_eq!(summary.holdings[0].gain_loss, dec!(30));
    assert_eq!(summary.holdings[0].gain_loss_percent, Decimal::ZERO);
}

#[test]
fn other_users_holdings_are_excluded() {
    let user_id = Uuid::new_v4();
    let mut catalog = AssetCatalog::new();
    let asset_id = asset(&mut catalog, "VTI", "equity");
    let holdings = [
        holding(user_id, asset_id, dec!(1), dec!(100)),
        holding(Uuid::new_v4(), asset_id, dec!(50), dec!(5000)),
    ];

    let summary = value_holdings(user_id, &holdings, &catalog, &PriceHistory::new());
    assert_eq!(summary.holdings.len(), 1);
}

#[test]
fn cash_balance_excludes_cash_class_holdings() {
    let user_id = Uuid::new_v4();
    let mut catalog = AssetCatalog::new();
    let equity_id = asset(&mut catalog, "VTI", "equity");
    let cash_id = asset(&mut catalog, "MMF", "cash");
    let mut prices = PriceHistory::new();
    let now = Utc::now();
    prices.append(PricePoint {
        asset_id: equity_id,
        close_price: dec!(120),
        date: now,
    });
    prices.append(PricePoint {
        asset_id: cash_id,
        close_price: dec!(1),
        date: now,
    });
    let holdings = [
        holding(user_id, equity_id, dec!(10), dec!(1000)),
        holding(user_id, cash_id, dec!(400), dec!(400)),
    ];

    let view = cash_balance(user_id, dec!(250), &holdings, &catalog, &prices);
    assert_eq!(view.cash_balance, dec!(250));
    // 250 cash + 1200 equity; the cash-class holding is not double counted.
    assert_eq!(view.total_portfolio_value, dec!(1450));
    assert_eq!(view.total_invested, dec!(1000));
}
