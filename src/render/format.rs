use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};

/// `R$ 1.234,56`: two decimals, pt-BR grouping.
pub fn format_brl(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-R$ {},{}", grouped, frac_part)
    } else {
        format!("R$ {},{}", grouped, frac_part)
    }
}

/// Wire dates (`2024-03-02`, `2024-03-02T10:00:00`, RFC 3339) as `02/03/2024`.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%d/%m/%Y").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%d/%m/%Y").to_string();
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.format("%d/%m/%Y").to_string();
    }
    raw.to_string()
}

pub fn format_opt_date(raw: Option<&str>) -> String {
    raw.map(format_date).unwrap_or_else(|| "-".to_string())
}

const MONTHS: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho", "Julho", "Agosto", "Setembro",
    "Outubro", "Novembro", "Dezembro",
];

pub fn month_name(month: u32) -> &'static str {
    match month {
        1..=12 => MONTHS[(month - 1) as usize],
        _ => "?",
    }
}
