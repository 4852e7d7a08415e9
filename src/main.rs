mod logger;

use std::env;
use std::io::{self, BufRead};
use std::process::ExitCode;

use clap::Parser;
use crossterm::style::Stylize;
use log::{debug, info};
use ratcalc::config::Config;
use ratcalc::math::{base::NumberBase, parsefmt};
use ratcalc::{calc_with, vars, Fallback, Num, Resolver, Variables};

#[derive(Parser)]
#[command(name = "ratcalc", version, about = "Evaluate formulas exactly over rational numbers")]
pub struct Args {
    /// Formulas to evaluate, read one per line from stdin when none are given
    formulas: Vec<String>,

    /// Variables file, alternating name and value lines
    #[arg(short = 'f', long)]
    vars_file: Option<String>,

    /// Define a variable, overriding the variables file
    #[arg(short = 'D', long = "define", value_name = "NAME=VALUE", value_parser = parse_define)]
    defines: Vec<(String, Num)>,

    /// Base to print results in
    #[arg(short, long, value_enum)]
    base: Option<NumberBase>,

    /// Print a digit expansion instead of a fraction
    #[arg(short, long)]
    positional: bool,

    /// Resolve unknown names from RATCALC_<NAME> environment variables
    #[arg(short, long)]
    env: bool,

    /// Store the last result under NAME and save the variables file
    #[arg(short, long, value_name = "NAME")]
    store: Option<String>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_define(s: &str) -> Result<(String, Num), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{s}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing a variable name in `{s}`"));
    }
    let n = Resolver::default().resolve(value).map_err(|e| e.to_string())?;
    Ok((name.to_owned(), n))
}

fn env_fallback(name: &str) -> Option<Num> {
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    let value = env::var(format!("RATCALC_{name}")).ok()?;
    Resolver::default().resolve(&value).ok()
}

fn render(n: &Num, base: NumberBase, positional: bool, max_fractional_places: u32) -> String {
    if positional {
        parsefmt::fmt(n, base, max_fractional_places)
    } else {
        parsefmt::fmt_ratio(n, base)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init(args.verbose);

    let config = Config::load();
    let base = args.base.unwrap_or(config.base);
    let positional = args.positional || config.positional;
    let vars_path = args.vars_file.unwrap_or(config.vars_path);

    let mut variables = match vars::read_vars(&vars_path) {
        Ok(variables) => {
            debug!("loaded {} variables from {vars_path}", variables.len());
            variables
        }
        Err(e) => {
            debug!("no variables loaded from {vars_path}: {e}");
            Variables::new()
        }
    };
    variables.extend(args.defines);

    let formulas = if args.formulas.is_empty() {
        match io::stdin().lock().lines().collect::<io::Result<Vec<String>>>() {
            Ok(lines) => lines,
            Err(e) => {
                eprintln!("{}: could not read stdin: {e}", "error".red().bold());
                return ExitCode::from(2);
            }
        }
    } else {
        args.formulas
    };

    let fallback: Option<Fallback<'_>> = if args.env { Some(&env_fallback) } else { None };
    let mut failed = false;
    let mut last = None;

    for formula in formulas.iter().filter(|f| !f.trim().is_empty()) {
        let resolver = Resolver::new(Some(&variables), fallback);
        match calc_with(formula, &resolver) {
            Ok(n) => {
                println!("{}", render(&n, base, positional, config.max_fractional_places));
                last = Some(n);
            }
            Err(e) => {
                eprintln!("{}: {e}", "error".red().bold());
                failed = true;
            }
        }
    }

    if let Some(name) = args.store {
        let Some(n) = last else {
            eprintln!("{}: no result to store as `{name}`", "error".red().bold());
            return ExitCode::from(1);
        };
        info!("storing {n} as `{name}` in {vars_path}");
        variables.insert(name, n);
        if let Err(e) = vars::write_vars(&vars_path, &variables) {
            eprintln!("{}: could not write {vars_path}: {e}", "error".red().bold());
            return ExitCode::from(1);
        }
    }

    if failed {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
fn rat(numer: i64, denom: i64) -> Num {
    Num::new(numer.into(), denom.into())
}

#[test]
fn parse_define_test() {
    assert_eq!(parse_define("x=3/2"), Ok(("x".to_owned(), rat(3, 2))));
    assert_eq!(parse_define(" mask = 0xFF"), Ok(("mask".to_owned(), rat(255, 1))));
    assert_eq!(parse_define("neg=-1.5"), Ok(("neg".to_owned(), rat(-3, 2))));
}

#[test]
fn parse_define_rejects_test() {
    assert!(parse_define("x").is_err());
    assert!(parse_define("x=banana").is_err());
    assert!(parse_define("x=").is_err());
    assert!(parse_define("=5").is_err());
    assert!(parse_define("  =5").is_err());
}

#[test]
fn env_fallback_test() {
    env::set_var("RATCALC_ratcalc_env_test", "3/4");
    assert_eq!(env_fallback("ratcalc_env_test"), Some(rat(3, 4)));
    assert_eq!(env_fallback("ratcalc_env_missing"), None);

    env::set_var("RATCALC_ratcalc_env_junk", "not a number");
    assert_eq!(env_fallback("ratcalc_env_junk"), None);
}

#[test]
fn env_fallback_refuses_odd_names_test() {
    env::set_var("RATCALC_ratcalc.env", "1");
    assert_eq!(env_fallback("ratcalc.env"), None);
    assert_eq!(env_fallback("a b"), None);
    assert_eq!(env_fallback("x=1"), None);
    assert_eq!(env_fallback("é"), None);
}

#[test]
fn render_test() {
    let n = rat(-21, 2);
    assert_eq!(render(&n, NumberBase::Decimal, false, 32), "-21/2");
    assert_eq!(render(&n, NumberBase::Decimal, true, 32), "-10.5");
    assert_eq!(render(&rat(255, 1), NumberBase::Hexadecimal, false, 32), "0xFF");
    assert_eq!(render(&rat(1, 3), NumberBase::Decimal, true, 4), "0.3333");
    assert_eq!(render(&rat(5, 4), NumberBase::Binary, true, 32), "0b1.01");
}
