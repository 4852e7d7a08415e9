use std::fs;
use std::io;
use std::path::Path;

use log::warn;

use crate::math::{literal::Resolver, Variables};

// A variables file alternates lines: a name, then its value.

pub fn read_vars(path: impl AsRef<Path>) -> io::Result<Variables> {
    let data = fs::read_to_string(path)?;
    Ok(parse_vars(&data))
}

pub fn write_vars(path: impl AsRef<Path>, variables: &Variables) -> io::Result<()> {
    fs::write(path, format_vars(variables))
}

/// Values may be written the way a formula literal would be, so `0xFF`,
/// `3/2` and `1.25` all load. Pairs that do not parse are skipped.
pub fn parse_vars(data: &str) -> Variables {
    let mut variables = Variables::new();
    let resolver = Resolver::default();
    let lines: Vec<&str> = data.lines().collect();

    for pair in lines.chunks(2) {
        let [name, value] = pair else {
            warn!("variable `{}` has no value, skipping", pair[0].trim());
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            warn!("skipping a value with an empty variable name");
            continue;
        }
        match resolver.resolve(value) {
            Ok(n) => {
                variables.insert(name.to_owned(), n);
            }
            Err(e) => warn!("skipping variable `{name}`: {e}"),
        }
    }

    variables
}

pub fn format_vars(variables: &Variables) -> String {
    let mut names: Vec<&String> = variables.keys().collect();
    names.sort();

    let mut out = String::new();
    for name in names {
        out += format!("{}\n{}\n", name, variables[name]).as_str();
    }
    out
}

#[cfg(test)]
use crate::math::Num;

#[cfg(test)]
fn int(n: i64) -> Num {
    Num::from_integer(n.into())
}

#[test]
fn parse_vars_test() {
    let vars = parse_vars("one\n100\nmask\n0xFF\nhalf\n 1/2 \nrate\n1.25\n");
    assert_eq!(vars.len(), 4);
    assert_eq!(vars["one"], int(100));
    assert_eq!(vars["mask"], int(255));
    assert_eq!(vars["half"], Num::new(1.into(), 2.into()));
    assert_eq!(vars["rate"], Num::new(5.into(), 4.into()));
}

#[test]
fn parse_vars_skips_bad_pairs_test() {
    let vars = parse_vars("good\n1\nbad\nnot a number\n\n3\ndangling");
    assert_eq!(vars.len(), 1);
    assert_eq!(vars["good"], int(1));
}

#[test]
fn format_vars_sorted_test() {
    let vars = Variables::from([
        ("b".to_owned(), Num::new((-3).into(), 2.into())),
        ("a".to_owned(), int(7)),
    ]);
    assert_eq!(format_vars(&vars), "a\n7\nb\n-3/2\n");
    assert_eq!(parse_vars(&format_vars(&vars)), vars);
}

#[test]
fn vars_file_test() {
    let path = std::env::temp_dir().join(format!("ratcalc-vars-test-{}", std::process::id()));
    let vars = Variables::from([("x".to_owned(), int(42))]);
    write_vars(&path, &vars).unwrap();
    assert_eq!(read_vars(&path).unwrap(), vars);
    fs::remove_file(&path).unwrap();
    assert!(read_vars(&path).is_err());
}
