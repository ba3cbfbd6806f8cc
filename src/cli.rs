// src/cli.rs
use std::{env, path::PathBuf};

use crate::params::{OutputFormat, PageKind, Params};

/// Entry point for the binary: parse argv, then run.
pub fn run_from_args() -> Result<(), Box<dyn std::error::Error>> {
    let mut params = Params::new();
    parse_cli(env::args().skip(1), &mut params)?;
    crate::runner::run(&params).map(|_| ())
}

fn parse_cli(
    mut args: impl Iterator<Item = String>,
    params: &mut Params,
) -> Result<(), Box<dyn std::error::Error>> {
    while let Some(a) = args.next() {
        match a.as_str()
        {
            "--page" => {
                let v = args.next().ok_or("Missing value for --page")?;
                params.page = match v.to_ascii_lowercase().as_str() {
                    "convo" => PageKind::Convo,
                    "board" => PageKind::Board,
                    "issues" => PageKind::Issues,
                    other => return Err(format!("Unknown page: {}", other).into()),
                };}
            "-i" | "--in" => params.input = Some(PathBuf::from(args.next().ok_or("Missing input path")?)),
            "-o" | "--out" => params.out = Some(PathBuf::from(args.next().ok_or("Missing output path")?)),
            "--format" => {
                let v = args.next().ok_or("Missing value for --format")?;
                params.format = match v.to_ascii_lowercase().as_str() {
                    "text" => OutputFormat::Text,
                    "json" => OutputFormat::Json,
                    other => return Err(format!("Unknown format: {}", other).into()),
                };}
            "--flat" => params.flat = true,
            "--list" => params.list_label = Some(args.next().ok_or("Missing value for --list")?),
            "--user" => params.username = args.next().ok_or("Missing value for --user")?,
            "--watch" => params.watch = true,
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    if params.input.is_none() {
        return Err("Missing required -i/--in <snapshot.html>".into());
    }
    Ok(())
}
