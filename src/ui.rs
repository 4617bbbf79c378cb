// UI layer: numbered menu loop plus one handler per menu choice,
// using `dialoguer` for the blocking line reads. Handlers print
// diagnostics instead of propagating fetch errors, so every failed
// interaction returns control to the menu.

use std::collections::BTreeMap;

use anyhow::Result;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};

use crate::api::{ApiClient, RatesResponse};
use crate::rates::{cross_rate, normalize_symbols, parse_amount, parse_date};

/// Main interactive loop. Shows the menu, reads one line for the
/// choice, dispatches, then waits for an acknowledgment before
/// looping. Choice 5 terminates the process immediately.
pub fn main_menu(api: ApiClient) -> Result<()> {
    loop {
        print_menu();
        let choice: String = Input::new().with_prompt("Enter your choice").interact_text()?;
        match choice.trim() {
            "1" => show_live_all(&api),
            "2" => show_live_filtered(&api)?,
            "3" => show_historical(&api)?,
            "4" => run_convert(&api)?,
            "5" => {
                println!("Goodbye! Have a great day!");
                std::process::exit(0);
            }
            _ => println!("Invalid choice. Please try again."),
        }
        let _ack: String = Input::new()
            .with_prompt("Press Enter to continue")
            .allow_empty(true)
            .interact_text()?;
    }
}

fn print_menu() {
    println!();
    println!("Welcome to Crypto Exchange");
    println!("===================================");
    println!("1. List of all currencies");
    println!("2. Get live data for a specific currency");
    println!("3. Get historical data");
    println!("4. Convert currency");
    println!("5. Exit");
    println!("===================================");
}

/// Spinner shown while a request is in flight.
fn fetch_spinner(msg: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message(msg);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Choice 1: live rates for every currency, sorted by code.
fn show_live_all(api: &ApiClient) {
    println!("\nLive Exchange Rates");
    let spinner = fetch_spinner("Fetching live rates...");
    let result = api.live_all();
    spinner.finish_and_clear();
    match result {
        Ok(rates) if rates.is_empty() => println!("No data available."),
        Ok(rates) => {
            for line in render_all_rates(&rates) {
                println!("{line}");
            }
        }
        Err(e) => println!("{e}"),
    }
}

/// Choice 2: live rate for a specific symbol list against a target
/// currency (default USD).
fn show_live_filtered(api: &ApiClient) -> Result<()> {
    let symbols: String = Input::new()
        .with_prompt("Enter symbols (comma-separated)")
        .interact_text()?;
    let target: String = Input::new()
        .with_prompt("Enter target currency")
        .default("USD".to_string())
        .interact_text()?;
    let symbols = normalize_symbols(&symbols);
    let target = normalize_symbols(&target);

    let spinner = fetch_spinner("Fetching live rate...");
    let result = api.live_filtered(&symbols, &target);
    spinner.finish_and_clear();
    match result {
        Ok(resp) => match render_filtered(&resp, &symbols, &target) {
            Some(lines) => {
                for line in lines {
                    println!("{line}");
                }
            }
            None => println!("No data available for {symbols} with target {target}."),
        },
        Err(e) => println!("{e}"),
    }
    Ok(())
}

/// Choice 3: rates for a past date. The date is validated locally
/// before any request goes out.
fn show_historical(api: &ApiClient) -> Result<()> {
    let date: String = Input::new()
        .with_prompt("Enter date (YYYY-MM-DD)")
        .interact_text()?;
    let target: String = Input::new()
        .with_prompt("Enter target currency")
        .interact_text()?;
    let symbols: String = Input::new()
        .with_prompt("Enter symbols (comma-separated)")
        .interact_text()?;

    let date = date.trim();
    if let Err(e) = parse_date(date) {
        println!("{e}");
        return Ok(());
    }
    let symbols = normalize_symbols(&symbols);
    let target = normalize_symbols(&target);

    let spinner = fetch_spinner("Fetching historical rates...");
    let result = api.historical(date, &target, &symbols);
    spinner.finish_and_clear();
    match result {
        Ok(resp) => match render_historical(&resp) {
            Some(lines) => {
                println!("\nHistorical Data");
                println!("-------------------------");
                for line in lines {
                    println!("{line}");
                }
                println!("-------------------------");
            }
            None => println!("No historical data available for {symbols} on {date}."),
        },
        Err(e) => println!("{e}"),
    }
    Ok(())
}

/// Choice 4: convert an amount between two currencies over one live
/// query scoped to exactly those codes.
fn run_convert(api: &ApiClient) -> Result<()> {
    let amount: String = Input::new().with_prompt("Enter amount").interact_text()?;
    let from: String = Input::new().with_prompt("Enter from currency").interact_text()?;
    let to: String = Input::new().with_prompt("Enter to currency").interact_text()?;

    let amount = match parse_amount(&amount) {
        Ok(amount) => amount,
        Err(e) => {
            println!("{e}");
            return Ok(());
        }
    };
    let from = normalize_symbols(&from);
    let to = normalize_symbols(&to);

    let spinner = fetch_spinner("Fetching conversion rates...");
    let result = api.conversion_rates(&from, &to);
    spinner.finish_and_clear();
    match result {
        Ok(resp) => match render_conversion(amount, &from, &to, &resp.rates) {
            Some(line) => println!("{line}"),
            None => println!("No data available for {from} or {to}."),
        },
        Err(e) => println!("{e}"),
    }
    Ok(())
}

// Presentation rendering. No I/O happens here; the handlers print
// the returned lines.

fn render_all_rates(rates: &[(String, f64)]) -> Vec<String> {
    rates
        .iter()
        .map(|(code, rate)| format!("{code}: {rate:.2}"))
        .collect()
}

/// The whole normalized symbols string is looked up as one key, so a
/// multi-symbol request only renders when the API echoes it verbatim.
fn render_filtered(resp: &RatesResponse, symbols: &str, target: &str) -> Option<Vec<String>> {
    let rate = resp.rates.get(symbols)?;
    Some(vec![
        format!("Currency: {symbols}"),
        format!("Target: {target}"),
        format!("Exchange Rate: {rate:.2}"),
    ])
}

fn render_historical(resp: &RatesResponse) -> Option<Vec<String>> {
    if resp.rates.is_empty() {
        return None;
    }
    let mut lines = vec![
        format!("Date: {}", resp.date.as_deref().unwrap_or("-")),
        format!("Target Currency: {}", resp.target.as_deref().unwrap_or("-")),
    ];
    for (code, rate) in &resp.rates {
        lines.push(format!("{code}: {rate:.2}"));
    }
    Some(lines)
}

fn render_conversion(
    amount: f64,
    from: &str,
    to: &str,
    rates: &BTreeMap<String, f64>,
) -> Option<String> {
    let from_rate = *rates.get(from)?;
    let to_rate = *rates.get(to)?;
    let converted = cross_rate(amount, from_rate, to_rate);
    Some(format!("{amount} {from} = {converted:.4} {to}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> RatesResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn all_rates_render_in_code_order() {
        let resp = response(r#"{"success": true, "rates": {"ETH": 2500.0, "BTC": 42000.0}}"#);
        let pairs: Vec<(String, f64)> = resp.rates.into_iter().collect();
        let lines = render_all_rates(&pairs);
        assert_eq!(lines, ["BTC: 42000.00", "ETH: 2500.00"]);
    }

    #[test]
    fn filtered_render_skips_missing_symbol() {
        let resp = response(r#"{"success": true, "rates": {"EUR": 0.9}}"#);
        assert_eq!(render_filtered(&resp, "GBP", "USD"), None);
    }

    #[test]
    fn filtered_render_formats_two_decimals() {
        let resp = response(r#"{"success": true, "rates": {"BTC": 42000.0}}"#);
        let lines = render_filtered(&resp, "BTC", "USD").unwrap();
        assert_eq!(
            lines,
            ["Currency: BTC", "Target: USD", "Exchange Rate: 42000.00"]
        );
    }

    #[test]
    fn historical_render_echoes_date_and_target() {
        let resp = response(
            r#"{"success": true, "date": "2024-01-15", "target": "USD",
                "rates": {"BTC": 42000.5, "ETH": 2500.25}}"#,
        );
        let lines = render_historical(&resp).unwrap();
        assert_eq!(
            lines,
            [
                "Date: 2024-01-15",
                "Target Currency: USD",
                "BTC: 42000.50",
                "ETH: 2500.25"
            ]
        );
    }

    #[test]
    fn historical_render_yields_nothing_without_rates() {
        let resp = response(r#"{"success": true, "date": "2024-01-15", "target": "USD"}"#);
        assert_eq!(render_historical(&resp), None);
    }

    #[test]
    fn conversion_renders_four_decimals() {
        let resp = response(r#"{"success": true, "rates": {"BTC": 42000.0, "USD": 1.0}}"#);
        let line = render_conversion(100.0, "BTC", "USD", &resp.rates).unwrap();
        assert_eq!(line, "100 BTC = 4200000.0000 USD");
    }

    #[test]
    fn conversion_to_same_currency_returns_the_amount() {
        let resp = response(r#"{"success": true, "rates": {"BTC": 42000.0}}"#);
        let line = render_conversion(7.5, "BTC", "BTC", &resp.rates).unwrap();
        assert_eq!(line, "7.5 BTC = 7.5000 BTC");
    }

    #[test]
    fn conversion_stops_when_either_code_is_missing() {
        let resp = response(r#"{"success": true, "rates": {"BTC": 42000.0}}"#);
        assert_eq!(render_conversion(1.0, "BTC", "USD", &resp.rates), None);
        assert_eq!(render_conversion(1.0, "USD", "BTC", &resp.rates), None);
    }
}
