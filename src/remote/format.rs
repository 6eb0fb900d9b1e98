//! Currency formatting with locale-style digit grouping.

/// Format `value` with exactly two decimals, grouping thousands with `group`
/// and separating decimals with `decimal`.
pub fn grouped(value: f64, group: char, decimal: char) -> String {
    let cents = (value.abs() * 100.0).round() as u128;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut out = String::with_capacity(whole.len() + whole.len() / 3 + 4);
    if value < 0.0 && cents > 0 {
        out.push('-');
    }
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(group);
        }
        out.push(digit);
    }
    out.push(decimal);
    out.push_str(&format!("{frac:02}"));
    out
}

/// US dollars, en-US style: `$1,234.56`.
pub fn usd(value: f64) -> String {
    format!("${}", grouped(value, ',', '.'))
}

/// Brazilian reais, pt-BR style: `R$ 1.234,56`.
pub fn brl(value: f64) -> String {
    format!("R$ {}", grouped(value, '.', ','))
}
