use std::fs::File;
use std::io::{self, Read, Write};

use clap::{App, Arg};
use env_logger::Env;
use flate2::read::GzDecoder;
use log::{debug, info};
use nbtree::{read_named, ReadOpts, Value};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    let mut raw = Vec::new();
    match path {
        Some(path) => File::open(path)?.read_to_end(&mut raw)?,
        None => io::stdin().read_to_end(&mut raw)?,
    };

    if raw.starts_with(&GZIP_MAGIC) {
        debug!("input is gzip compressed");
        let mut data = Vec::new();
        GzDecoder::new(raw.as_slice()).read_to_end(&mut data)?;
        Ok(data)
    } else {
        Ok(raw)
    }
}

fn dump(out: &mut impl Write, name: &str, value: &Value, indent: usize) -> io::Result<()> {
    let pad = indent * 4;
    match value {
        Value::Compound(c) => {
            writeln!(out, "{:pad$}{}: {} entries", "", name, c.len(), pad = pad)?;
            for (child, v) in c {
                dump(out, child, v, indent + 1)?;
            }
        }
        Value::List(l) => {
            writeln!(
                out,
                "{:pad$}{}: {} x {:?}",
                "",
                name,
                l.len(),
                l.element_tag(),
                pad = pad
            )?;
            for (i, v) in l.iter().enumerate() {
                dump(out, &i.to_string(), v, indent + 1)?;
            }
        }
        other => writeln!(out, "{:pad$}{}: {}", "", name, other, pad = pad)?,
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let matches = App::new("nbt-dump")
        .about("Print the contents of an NBT file, gzip compressed or not")
        .arg(Arg::with_name("file").takes_value(true).help("defaults to stdin"))
        .arg(
            Arg::with_name("json")
                .long("json")
                .takes_value(false)
                .help("print the tree as JSON instead"),
        )
        .arg(
            Arg::with_name("network")
                .long("network")
                .takes_value(false)
                .help("the root tag has no name"),
        )
        .arg(
            Arg::with_name("max-depth")
                .long("max-depth")
                .takes_value(true)
                .help("deepest nesting accepted"),
        )
        .get_matches();

    let mut opts = if matches.is_present("network") {
        ReadOpts::network_nbt()
    } else {
        ReadOpts::new()
    };
    if let Some(depth) = matches.value_of("max-depth") {
        opts = opts.max_depth(depth.parse()?);
    }

    let data = read_input(matches.value_of("file"))?;
    let (name, root) = read_named(data.as_slice(), &opts)?;
    info!("read root {:?} of type {:?}", name, root.tag());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if matches.is_present("json") {
        serde_json::to_writer_pretty(&mut out, &root)?;
        writeln!(out)?;
    } else {
        dump(&mut out, &name, &root, 0)?;
    }

    Ok(())
}
