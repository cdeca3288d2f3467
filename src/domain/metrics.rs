//! Summary statistics: total return and annualized volatility.

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    /// `(last / first - 1) * 100`.
    pub total_return_pct: f64,
    /// Sample stddev of daily returns excluding the first (synthetic zero)
    /// entry, times `sqrt(252) * 100`. `None` with fewer than two real
    /// returns.
    pub annualized_volatility_pct: Option<f64>,
}

impl SummaryStats {
    /// `prices` and `returns` must share an index, with `returns[0]` being
    /// the pinned zero produced by [`simple_returns`](super::returns::simple_returns).
    pub fn compute(prices: &[f64], returns: &[f64]) -> Self {
        let total_return_pct = match (prices.first(), prices.last()) {
            (Some(&first), Some(&last)) if first != 0.0 => (last / first - 1.0) * 100.0,
            _ => 0.0,
        };

        let annualized_volatility_pct = returns
            .get(1..)
            .and_then(sample_stddev)
            .map(|sd| sd * TRADING_DAYS_PER_YEAR.sqrt() * 100.0);

        SummaryStats {
            total_return_pct,
            annualized_volatility_pct,
        }
    }

    /// One report line, e.g. `NVDA Return: 1,234.56% | Volatility: 51.20%`.
    pub fn format_line(&self, label: &str) -> String {
        let vol = match self.annualized_volatility_pct {
            Some(v) => format!("{v:.2}%"),
            None => "n/a".to_string(),
        };
        format!(
            "{label} Return: {}% | Volatility: {vol}",
            format_thousands(self.total_return_pct, 2)
        )
    }
}

/// Sample standard deviation (n - 1 denominator).
fn sample_stddev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some(variance.sqrt())
}

/// Fixed-point formatting with `,` grouping in the integer part.
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}
