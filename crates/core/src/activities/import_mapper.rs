//! Brokerage export normalizer.
//!
//! Maps tokenized CSV rows onto canonical activity records: header aliases
//! resolve logical columns, an ordered keyword table classifies actions,
//! and option contract terms are recovered from either a descriptive label
//! or an OCC-style symbol. Numeric and date cells parse leniently; every
//! defaulted value is reported as a per-row warning instead of being
//! swallowed.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::activities_constants::{classify_action, OPTION_MULTIPLIER};
use super::activities_model::{ActivityType, ImportWarning};
use super::csv_parser::ParsedCsv;
use crate::holdings::{AssetType, OptionTerms, OptionType};

lazy_static! {
    /// A bare 1-8 letter ticker, periods allowed (e.g. BRK.B).
    static ref TICKER_REGEX: Regex =
        Regex::new(r"^[A-Z.]{1,8}$").expect("Invalid regex pattern");

    /// OCC-style fragment anywhere in symbol+description text.
    static ref OCC_FRAGMENT_REGEX: Regex =
        Regex::new(r"\d{6}[CP]\d{8}").expect("Invalid regex pattern");

    /// Descriptive contract with a trailing side flag:
    /// `TICKER MM/DD/YY(YY) STRIKE C|P|CALL|PUT`.
    static ref TRAILING_FLAG_REGEX: Regex = Regex::new(
        r"([A-Z]{1,6})\s*(\d{2})[/\-](\d{2})[/\-](\d{2,4})\s*(\d+(?:\.\d+)?)\s*(CALL|PUT|[CP])"
    )
    .expect("Invalid regex pattern");

    /// Descriptive contract as brokerages usually print it, flag first:
    /// `C|P|CALL|PUT TICKER MM/DD/YY(YY) STRIKE`.
    static ref LEADING_FLAG_REGEX: Regex = Regex::new(
        r"(CALL|PUT|[CP])\s+([A-Z]{1,6})\s*(\d{2})[/\-](\d{2})[/\-](\d{2,4})\s*(\d+(?:\.\d+)?)"
    )
    .expect("Invalid regex pattern");

    /// Full OCC symbol: ticker + YYMMDD + side + strike in thousandths.
    static ref OCC_SYMBOL_REGEX: Regex =
        Regex::new(r"([A-Z]{1,6})(\d{6})([CP])(\d{8})").expect("Invalid regex pattern");
}

/// Logical columns recognized in a brokerage export header.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnMap {
    pub date: Option<usize>,
    pub action: Option<usize>,
    pub symbol: Option<usize>,
    pub description: Option<usize>,
    pub quantity: Option<usize>,
    pub price: Option<usize>,
    pub fees: Option<usize>,
    pub amount: Option<usize>,
}

/// Header aliases per logical column, pre-normalized with
/// [`normalize_header`].
const DATE_ALIASES: &[&str] = &["date", "transactiondate", "tradedate"];
const ACTION_ALIASES: &[&str] = &["action", "transactiontype", "type"];
const SYMBOL_ALIASES: &[&str] = &["symbol", "securitysymbol"];
const DESCRIPTION_ALIASES: &[&str] = &["description", "securitydescription"];
const QUANTITY_ALIASES: &[&str] = &["quantity", "qty"];
const PRICE_ALIASES: &[&str] = &["price"];
const FEES_ALIASES: &[&str] = &["fees&comm", "feesandcomm", "fees", "commission"];
const AMOUNT_ALIASES: &[&str] = &["amount", "netamount", "value"];

/// Lowercases a header cell, strips whitespace, and keeps only `[a-z&]`.
pub fn normalize_header(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || *c == '&')
        .collect()
}

/// Resolves logical columns from raw header cells.
pub fn resolve_columns(headers: &[String]) -> ColumnMap {
    let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
    let find = |aliases: &[&str]| {
        normalized
            .iter()
            .position(|header| aliases.contains(&header.as_str()))
    };

    ColumnMap {
        date: find(DATE_ALIASES),
        action: find(ACTION_ALIASES),
        symbol: find(SYMBOL_ALIASES),
        description: find(DESCRIPTION_ALIASES),
        quantity: find(QUANTITY_ALIASES),
        price: find(PRICE_ALIASES),
        fees: find(FEES_ALIASES),
        amount: find(AMOUNT_ALIASES),
    }
}

/// Result of a lenient cell parse: either clean, or defaulted with a reason
/// the caller can surface or escalate.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedCell<T> {
    Parsed(T),
    Defaulted { value: T, reason: String },
}

impl<T> ParsedCell<T> {
    pub fn value(&self) -> &T {
        match self {
            ParsedCell::Parsed(value) => value,
            ParsedCell::Defaulted { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            ParsedCell::Parsed(value) => value,
            ParsedCell::Defaulted { value, .. } => value,
        }
    }

    pub fn defaulted_reason(&self) -> Option<&str> {
        match self {
            ParsedCell::Parsed(_) => None,
            ParsedCell::Defaulted { reason, .. } => Some(reason),
        }
    }
}

/// Parses a numeric cell, stripping `$`, commas and whitespace and reading a
/// parenthesized value as negative. Empty cells are zero by convention;
/// non-empty garbage defaults to zero with a reason.
pub fn parse_numeric_cell(raw: &str) -> ParsedCell<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return ParsedCell::Parsed(Decimal::ZERO);
    }

    let negated = cleaned.starts_with('(') && cleaned.ends_with(')') && cleaned.len() > 1;
    let body = if negated {
        &cleaned[1..cleaned.len() - 1]
    } else {
        cleaned.as_str()
    };

    match Decimal::from_str(body) {
        Ok(value) => ParsedCell::Parsed(if negated { -value } else { value }),
        Err(_) => ParsedCell::Defaulted {
            value: Decimal::ZERO,
            reason: format!("unparsable numeric value '{}'", raw.trim()),
        },
    }
}

/// Normalizes a date cell to a calendar date.
///
/// Accepts ISO `YYYY-MM-DD` as-is and 3-part `/`- or `-`-delimited dates,
/// read as year-first when the leading part has 4 digits and `MM-DD-YY(YY)`
/// otherwise, with 2-digit years promoted to 20YY.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    let parts: Vec<&str> = trimmed.split(['/', '-']).collect();
    if parts.len() != 3 {
        return None;
    }

    let (year_part, month_part, day_part) = if parts[0].len() == 4 {
        (parts[0], parts[1], parts[2])
    } else {
        (parts[2], parts[0], parts[1])
    };

    let year: i32 = year_part.parse().ok()?;
    let year = if year_part.len() == 2 { 2000 + year } else { year };
    let month: u32 = month_part.parse().ok()?;
    let day: u32 = day_part.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Pulls a plausible ticker out of the first word of a description.
pub fn derive_symbol_from_description(description: &str) -> Option<String> {
    let first_word = description.to_uppercase();
    let first_word = first_word.split_whitespace().next()?;
    if TICKER_REGEX.is_match(first_word) {
        Some(first_word.to_string())
    } else {
        None
    }
}

/// Classifies the instrument kind from symbol and description text.
pub fn detect_asset_type(symbol: &str, description: &str) -> AssetType {
    let text = format!("{} {}", symbol, description).to_uppercase();
    if text.contains("CALL") || text.contains("PUT") || OCC_FRAGMENT_REGEX.is_match(&text) {
        return AssetType::Option;
    }
    if symbol.is_empty() || symbol == "-" {
        return AssetType::Cash;
    }
    AssetType::Stock
}

/// Recovers option contract terms from symbol and description text.
///
/// Tries the descriptive label first (flag trailing, then the flag-leading
/// form brokerages actually print), then the OCC symbol encoding. Returns
/// `None` when no pattern matches.
pub fn extract_option_meta(symbol: &str, description: &str) -> Option<OptionTerms> {
    let source = format!("{} {}", symbol, description).to_uppercase();

    if let Some(caps) = TRAILING_FLAG_REGEX.captures(&source) {
        if let Some(terms) = descriptive_terms(&caps[1], &caps[2], &caps[3], &caps[4], &caps[5], &caps[6]) {
            return Some(terms);
        }
    }

    if let Some(caps) = LEADING_FLAG_REGEX.captures(&source) {
        if let Some(terms) = descriptive_terms(&caps[2], &caps[3], &caps[4], &caps[5], &caps[6], &caps[1]) {
            return Some(terms);
        }
    }

    if let Some(caps) = OCC_SYMBOL_REGEX.captures(&source) {
        let yymmdd = &caps[2];
        let year: i32 = yymmdd[0..2].parse().ok()?;
        let month: u32 = yymmdd[2..4].parse().ok()?;
        let day: u32 = yymmdd[4..6].parse().ok()?;
        let expiry = NaiveDate::from_ymd_opt(2000 + year, month, day)?;
        let thousandths = Decimal::from_str(&caps[4]).ok()?;
        return Some(OptionTerms {
            underlying: caps[1].to_string(),
            option_type: if &caps[3] == "C" {
                OptionType::Call
            } else {
                OptionType::Put
            },
            strike: thousandths / Decimal::from(1000),
            expiry,
        });
    }

    None
}

fn descriptive_terms(
    underlying: &str,
    month: &str,
    day: &str,
    year: &str,
    strike: &str,
    flag: &str,
) -> Option<OptionTerms> {
    let year_num: i32 = year.parse().ok()?;
    let year_num = if year.len() == 2 { 2000 + year_num } else { year_num };
    let expiry = NaiveDate::from_ymd_opt(year_num, month.parse().ok()?, day.parse().ok()?)?;
    let strike = Decimal::from_str(strike).ok()?;
    if strike <= Decimal::ZERO {
        return None;
    }
    Some(OptionTerms {
        underlying: underlying.to_string(),
        option_type: if flag.starts_with('C') {
            OptionType::Call
        } else {
            OptionType::Put
        },
        strike,
        expiry,
    })
}

/// An activity row normalized from a brokerage export, before it is bound
/// to an account.
#[derive(Debug, Clone)]
pub struct ImportedActivity {
    pub date: NaiveDate,
    pub activity_type: ActivityType,
    pub asset_type: AssetType,
    pub symbol: String,
    pub qty: Decimal,
    pub price: Decimal,
    pub fees: Decimal,
    pub multiplier: Decimal,
    pub amount: Decimal,
    pub option: Option<OptionTerms>,
}

/// Result of mapping a tokenized export.
#[derive(Debug, Clone, Default)]
pub struct MappedImport {
    pub activities: Vec<ImportedActivity>,
    pub warnings: Vec<ImportWarning>,
}

/// Maps tokenized rows to canonical activities, collecting per-row warnings
/// for every leniently defaulted value.
pub fn map_rows(parsed: &ParsedCsv) -> MappedImport {
    let columns = resolve_columns(&parsed.headers);
    let cell = |row: &[String], index: Option<usize>| -> String {
        index
            .and_then(|i| row.get(i))
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    };

    let mut mapped = MappedImport::default();
    for (index, row) in parsed.rows.iter().enumerate() {
        let row_number = index + 1;
        let raw_action = cell(row, columns.action);
        let raw_date = cell(row, columns.date);
        if raw_action.is_empty() || raw_date.is_empty() {
            continue;
        }

        let date = match normalize_date(&raw_date) {
            Some(date) => date,
            None => {
                mapped.warnings.push(ImportWarning {
                    row: row_number,
                    message: format!("unparsable date '{}', row skipped", raw_date),
                });
                continue;
            }
        };

        let description = cell(row, columns.description);
        let raw_symbol = cell(row, columns.symbol);
        let symbol = if raw_symbol.is_empty() {
            derive_symbol_from_description(&description).unwrap_or_else(|| "-".to_string())
        } else {
            raw_symbol.to_uppercase()
        };

        let activity_type = match classify_action(&raw_action, &description) {
            Some(activity_type) => activity_type,
            None => {
                mapped.warnings.push(ImportWarning {
                    row: row_number,
                    message: format!("unrecognized action '{}' classified as FEE", raw_action),
                });
                ActivityType::Fee
            }
        };

        let asset_type = detect_asset_type(&symbol, &description);

        let mut numeric = |name: &str, index: Option<usize>| -> Decimal {
            let parsed_cell = parse_numeric_cell(&cell(row, index));
            if let Some(reason) = parsed_cell.defaulted_reason() {
                mapped.warnings.push(ImportWarning {
                    row: row_number,
                    message: format!("{}: {}", name, reason),
                });
            }
            parsed_cell.into_value()
        };

        let qty = numeric("quantity", columns.quantity);
        let price = numeric("price", columns.price);
        let fees = numeric("fees", columns.fees).abs();
        let mut amount = numeric("amount", columns.amount);

        let multiplier = if asset_type == AssetType::Option {
            OPTION_MULTIPLIER
        } else {
            Decimal::ONE
        };

        if amount.is_zero() {
            let gross = qty * price * multiplier;
            amount = match activity_type {
                ActivityType::Buy => -(gross + fees),
                ActivityType::Sell => gross - fees,
                ActivityType::Fee => {
                    if fees.is_zero() {
                        -gross.abs()
                    } else {
                        -fees.abs()
                    }
                }
                _ => Decimal::ZERO,
            };
        }

        let option = if asset_type == AssetType::Option {
            let terms = extract_option_meta(&symbol, &description);
            if terms.is_none() {
                mapped.warnings.push(ImportWarning {
                    row: row_number,
                    message: format!(
                        "option row '{}' without parsable contract terms",
                        symbol
                    ),
                });
            }
            terms
        } else {
            None
        };

        mapped.activities.push(ImportedActivity {
            date,
            activity_type,
            asset_type,
            symbol,
            qty,
            price,
            fees,
            multiplier,
            amount,
            option,
        });
    }

    mapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activities::csv_parser::parse_csv;
    use rust_decimal_macros::dec;

    #[test]
    fn test_normalize_header_strips_noise() {
        assert_eq!(normalize_header("Fees & Comm"), "fees&comm");
        assert_eq!(normalize_header("  Trade Date "), "tradedate");
        assert_eq!(normalize_header("Net Amount ($)"), "netamount");
    }

    #[test]
    fn test_resolve_columns_in_any_order() {
        let headers: Vec<String> = ["Amount", "Action", "Trade Date", "Symbol"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let columns = resolve_columns(&headers);
        assert_eq!(columns.amount, Some(0));
        assert_eq!(columns.action, Some(1));
        assert_eq!(columns.date, Some(2));
        assert_eq!(columns.symbol, Some(3));
        assert_eq!(columns.description, None);
    }

    #[test]
    fn test_parse_numeric_cell_variants() {
        assert_eq!(*parse_numeric_cell("$1,234.50").value(), dec!(1234.50));
        assert_eq!(*parse_numeric_cell("(42.10)").value(), dec!(-42.10));
        assert_eq!(*parse_numeric_cell("").value(), dec!(0));
        assert_eq!(*parse_numeric_cell("  $  ").value(), dec!(0));

        let garbage = parse_numeric_cell("N/A");
        assert_eq!(*garbage.value(), dec!(0));
        assert!(garbage.defaulted_reason().is_some());
    }

    #[test]
    fn test_normalize_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap();
        assert_eq!(normalize_date("2026-02-02"), Some(expected));
        assert_eq!(normalize_date("02/02/2026"), Some(expected));
        assert_eq!(normalize_date("02/02/26"), Some(expected));
        assert_eq!(normalize_date("2026/02/02"), Some(expected));
        assert_eq!(normalize_date("13/40/2026"), None);
        assert_eq!(normalize_date("soon"), None);
    }

    #[test]
    fn test_derive_symbol_from_description() {
        assert_eq!(
            derive_symbol_from_description("AAPL Apple Inc"),
            Some("AAPL".to_string())
        );
        assert_eq!(
            derive_symbol_from_description("brk.b berkshire"),
            Some("BRK.B".to_string())
        );
        assert_eq!(derive_symbol_from_description("Monthly statement fee"), None);
        assert_eq!(derive_symbol_from_description(""), None);
    }

    #[test]
    fn test_detect_asset_type() {
        assert_eq!(detect_asset_type("AAPL", "Apple Inc"), AssetType::Stock);
        assert_eq!(detect_asset_type("-", "Wire deposit"), AssetType::Cash);
        assert_eq!(detect_asset_type("", ""), AssetType::Cash);
        assert_eq!(
            detect_asset_type("AAPL240621C00190000", ""),
            AssetType::Option
        );
        assert_eq!(
            detect_asset_type("XOM", "PUT XOM 01/17/25 100"),
            AssetType::Option
        );
    }

    #[test]
    fn test_occ_symbol_parses_to_contract_terms() {
        let terms = extract_option_meta("AAPL240621C00190000", "").unwrap();
        assert_eq!(terms.underlying, "AAPL");
        assert_eq!(terms.option_type, OptionType::Call);
        assert_eq!(terms.strike, dec!(190));
        assert_eq!(terms.expiry, NaiveDate::from_ymd_opt(2024, 6, 21).unwrap());
    }

    #[test]
    fn test_descriptive_terms_trailing_flag() {
        let terms = extract_option_meta("", "XOM 01/17/25 100 PUT").unwrap();
        assert_eq!(terms.underlying, "XOM");
        assert_eq!(terms.option_type, OptionType::Put);
        assert_eq!(terms.strike, dec!(100));
        assert_eq!(terms.expiry, NaiveDate::from_ymd_opt(2025, 1, 17).unwrap());
    }

    #[test]
    fn test_descriptive_terms_leading_flag() {
        let terms = extract_option_meta("", "CALL AAPL 06/21/26 190").unwrap();
        assert_eq!(terms.underlying, "AAPL");
        assert_eq!(terms.option_type, OptionType::Call);
        assert_eq!(terms.strike, dec!(190));
        assert_eq!(terms.expiry, NaiveDate::from_ymd_opt(2026, 6, 21).unwrap());
    }

    #[test]
    fn test_no_option_pattern_yields_none() {
        assert_eq!(extract_option_meta("AAPL", "Apple Inc"), None);
    }

    #[test]
    fn test_schwab_option_row_round_trip() {
        let csv = "\"Date\",\"Action\",\"Symbol\",\"Description\",\"Quantity\",\"Price\",\"Fees & Comm\",\"Amount\"\n\
            \"02/02/2026\",\"Buy\",\"AAPL240621C00190000\",\"CALL AAPL 06/21/26 190\",\"2\",\"7.60\",\"1.25\",\"-1521.25\"";
        let parsed = parse_csv(csv).unwrap();
        let mapped = map_rows(&parsed);

        assert_eq!(mapped.activities.len(), 1);
        let activity = &mapped.activities[0];
        assert_eq!(activity.date, NaiveDate::from_ymd_opt(2026, 2, 2).unwrap());
        assert_eq!(activity.activity_type, ActivityType::Buy);
        assert_eq!(activity.asset_type, AssetType::Option);
        assert_eq!(activity.symbol, "AAPL240621C00190000");
        assert_eq!(activity.qty, dec!(2));
        assert_eq!(activity.price, dec!(7.60));
        assert_eq!(activity.fees, dec!(1.25));
        assert_eq!(activity.multiplier, dec!(100));
        assert_eq!(activity.amount, dec!(-1521.25));

        let terms = activity.option.as_ref().unwrap();
        assert_eq!(terms.underlying, "AAPL");
        assert_eq!(terms.option_type, OptionType::Call);
        assert_eq!(terms.strike, dec!(190));
        assert_eq!(terms.expiry, NaiveDate::from_ymd_opt(2026, 6, 21).unwrap());
    }

    #[test]
    fn test_amount_derived_when_missing() {
        let csv = "Date,Action,Symbol,Quantity,Price,Fees\n\
            01/15/2026,Buy,MSFT,10,400,2.50\n\
            01/16/2026,Sell,MSFT,5,410,1.00";
        let parsed = parse_csv(csv).unwrap();
        let mapped = map_rows(&parsed);

        assert_eq!(mapped.activities[0].amount, dec!(-4002.50));
        assert_eq!(mapped.activities[1].amount, dec!(2049.00));
    }

    #[test]
    fn test_unrecognized_action_defaults_to_fee_with_warning() {
        let csv = "Date,Action,Amount\n01/15/2026,Journal,(25.00)";
        let parsed = parse_csv(csv).unwrap();
        let mapped = map_rows(&parsed);

        assert_eq!(mapped.activities[0].activity_type, ActivityType::Fee);
        assert_eq!(mapped.activities[0].amount, dec!(-25.00));
        assert!(mapped
            .warnings
            .iter()
            .any(|w| w.row == 1 && w.message.contains("Journal")));
    }

    #[test]
    fn test_rows_without_action_or_date_are_skipped() {
        let csv = "Date,Action,Amount\n,Buy,100\n01/15/2026,,100\n01/16/2026,Deposit,100";
        let parsed = parse_csv(csv).unwrap();
        let mapped = map_rows(&parsed);
        assert_eq!(mapped.activities.len(), 1);
        assert_eq!(mapped.activities[0].activity_type, ActivityType::Deposit);
    }

    #[test]
    fn test_cash_deposit_row() {
        let csv = "Date,Action,Symbol,Amount\n01/15/2026,Wire Deposit,,\"$6,000.00\"";
        let parsed = parse_csv(csv).unwrap();
        let mapped = map_rows(&parsed);

        let activity = &mapped.activities[0];
        assert_eq!(activity.activity_type, ActivityType::Deposit);
        assert_eq!(activity.asset_type, AssetType::Cash);
        assert_eq!(activity.symbol, "-");
        assert_eq!(activity.amount, dec!(6000.00));
    }
}
