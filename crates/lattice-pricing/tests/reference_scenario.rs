//! Integration tests for the reference American call.
//!
//! Spot 188.64, risk-free rate 5.25%, dividend yield 0.52%, strike 190,
//! 148 days to expiry on an Act/360 basis, 1000 CRR steps. The observed
//! option price is 11.05.

use approx::assert_relative_eq;

use lattice_core::prelude::*;
use lattice_pricing::prelude::*;

const SPOT: f64 = 188.64;
const RATE: f64 = 0.0525;
const DIVIDEND: f64 = 0.0052;
const STRIKE: f64 = 190.0;
const DAYS: i64 = 148;
const STEPS: usize = 1000;
const MARKET_PRICE: f64 = 11.05;

// =============================================================================
// FIXTURES
// =============================================================================

fn market() -> MarketInputs {
    MarketInputs::new(SPOT, RATE, DIVIDEND).unwrap()
}

fn american_call() -> OptionSpec {
    OptionSpec::from_days(
        OptionType::Call,
        STRIKE,
        DAYS,
        DayCountConvention::Act360,
        ExerciseStyle::American,
    )
    .unwrap()
}

fn engine() -> BinomialTreeEngine {
    BinomialTreeEngine::new(STEPS).unwrap()
}

// =============================================================================
// PRICING
// =============================================================================

#[test]
fn test_expiry_is_act_360() {
    assert_relative_eq!(american_call().time_to_expiry(), 148.0 / 360.0, epsilon = 1e-15);
}

#[test]
fn test_reference_price_below_market() {
    let price = engine().price(&american_call(), &market(), 0.20).unwrap();

    assert!(price > 10.5 && price < MARKET_PRICE, "price = {price}");
}

#[test]
fn test_reference_price_close_to_european() {
    // Call with a small dividend yield: the early exercise premium is tiny
    let spec = american_call();
    let american = engine().price(&spec, &market(), 0.20).unwrap();
    let european = BlackScholesEngine::new()
        .price(
            &spec.with_exercise_style(ExerciseStyle::European),
            &market(),
            0.20,
        )
        .unwrap();

    assert!(american >= european - 1e-2);
    assert_relative_eq!(american, european, epsilon = 5e-2);
}

#[test]
fn test_full_tree_matches_rolling_price() {
    let spec = american_call();
    let engine = BinomialTreeEngine::new(250).unwrap();

    let tree = engine.build_tree(&spec, &market(), 0.20).unwrap();
    let price = engine.price(&spec, &market(), 0.20).unwrap();

    assert_relative_eq!(tree.root_value(), price, max_relative = 1e-14);
    assert_eq!(tree.steps(), 250);
}

// =============================================================================
// IMPLIED VOLATILITY
// =============================================================================

#[test]
fn test_implied_volatility_of_market_price() {
    let solver = ImpliedVolatilitySolver::default();
    let spec = american_call();

    let result = solver
        .solve_option(&engine(), &spec, &market(), MARKET_PRICE, 0.20)
        .unwrap();

    assert!(
        result.volatility > 0.20 && result.volatility < 0.215,
        "implied volatility = {}",
        result.volatility
    );
    assert!(result.residual.abs() < solver.config().price_tolerance);

    let repriced = engine().price(&spec, &market(), result.volatility).unwrap();
    assert_relative_eq!(repriced, MARKET_PRICE, epsilon = 1e-4);
}

#[test]
fn test_implied_volatility_methods_agree() {
    let spec = american_call();
    let brent = ImpliedVolatilitySolver::default()
        .solve_option(&engine(), &spec, &market(), MARKET_PRICE, 0.20)
        .unwrap();
    let bisection = ImpliedVolatilitySolver::new(
        ImpliedVolConfig::default().with_method(RootMethod::Bisection),
    )
    .unwrap()
    .solve_option(&engine(), &spec, &market(), MARKET_PRICE, 0.20)
    .unwrap();

    assert_relative_eq!(brent.volatility, bisection.volatility, epsilon = 1e-4);
}

#[test]
fn test_implied_volatility_is_deterministic() {
    let solver = ImpliedVolatilitySolver::default();
    let spec = american_call();

    let first = solver
        .solve_option(&engine(), &spec, &market(), MARKET_PRICE, 0.20)
        .unwrap();
    let second = solver
        .solve_option(&engine(), &spec, &market(), MARKET_PRICE, 0.20)
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_implied_volatility_display() {
    let result = ImpliedVolatilitySolver::default()
        .solve_option(&engine(), &american_call(), &market(), MARKET_PRICE, 0.20)
        .unwrap();

    let shown = Volatility::new(result.volatility).unwrap().to_string();

    assert!(shown.starts_with("20.") || shown.starts_with("21."), "{shown}");
    assert!(shown.ends_with('%'));
}
