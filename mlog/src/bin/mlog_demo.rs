use anyhow::{bail, Result};
use mlog::prelude::*;
use std::env;

const USAGE: &str = "usage: mlog_demo [--time] [--date] [--time-first] [--quit] [COLOR...]";

fn main() -> Result<()> {
    mlog::trace::initialize();

    let mut config = Config::from_env();
    let mut quit = false;
    let mut colors = Vec::new();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--time" => config = config.show_time(true),
            "--date" => config = config.show_date(true),
            "--time-first" => config = config.time_first(true),
            "--quit" => quit = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            flag if flag.starts_with("--") => bail!("unknown flag {flag:?}\n{USAGE}"),
            color => colors.push(color.to_owned()),
        }
    }
    mlog::logger::initialize(config)?;

    for color in &colors {
        match color.parse::<Rgba>() {
            Ok(rgba) => inf!("{color} is {rgba}, {}", rgba.to_hsl()),
            Err(err) => wrn!("{err}"),
        }
    }

    inf!("{} color(s) converted", colors.len());
    suc!("all levels printed");
    err!(quit, "quit requested: {quit}");
    wrn!("still running after a non-fatal error");
    Ok(())
}
