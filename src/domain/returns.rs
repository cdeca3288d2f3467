//! Daily returns and growth-of-notional series.
//!
//! Both series keep the same length as the price series they derive from.
//! The first return has no previous price, so it is pinned to `0.0` rather
//! than dropped; the growth series therefore always starts at the notional.

/// Initial investment the growth series is scaled to.
pub const GROWTH_NOTIONAL: f64 = 10_000.0;

/// Fractional change from the previous price. `returns[0] == 0.0`.
pub fn simple_returns(prices: &[f64]) -> Vec<f64> {
    let mut returns = Vec::with_capacity(prices.len());
    if prices.is_empty() {
        return returns;
    }
    returns.push(0.0);
    returns.extend(prices.windows(2).map(|w| w[1] / w[0] - 1.0));
    returns
}

/// Running product of `(1 + r)` scaled by `notional`.
pub fn growth_series(returns: &[f64], notional: f64) -> Vec<f64> {
    let mut growth = Vec::with_capacity(returns.len());
    let mut value = notional;
    for (i, r) in returns.iter().enumerate() {
        if i > 0 {
            value *= 1.0 + r;
        }
        growth.push(value);
    }
    growth
}
