use std::error;
use std::path::PathBuf;

use bibstream::{Counters, Parser, Record, Statistics, YearTable};

use clap::Parser as CLIParser;

#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Settings {
    /// Filepath to file to parse
    #[clap(short, long)]
    input: PathBuf,

    /// Filepath of the JSON array to write
    #[cfg(all(feature = "serde", feature = "serde_json"))]
    #[clap(short, long, default_value = "data/corpus.json")]
    output: PathBuf,

    /// Output only entries with this key
    #[clap(short, long)]
    query_id: Option<String>,

    /// Also print the number of entries per year
    #[clap(long)]
    years: bool,
}

impl Settings {
    fn selects(&self, record: &Record) -> bool {
        match &self.query_id {
            Some(query) => query == &record.key,
            None => true,
        }
    }
}

#[cfg(not(all(feature = "serde", feature = "serde_json")))]
fn convert(s: &Settings, stats: &mut Statistics) -> Result<Counters, Box<dyn error::Error>> {
    let mut p = Parser::from_file(&s.input)?;
    p.run(|entry| -> Result<(), Box<dyn error::Error>> {
        stats.observe(&entry);
        if !s.selects(&entry) {
            return Ok(());
        }
        println!("type = {}", entry.kind);
        println!("key = {}", entry.key);
        for (name, data) in entry.fields.iter() {
            println!("\t{}\t= {}", name, data);
        }
        Ok(())
    })
}

#[cfg(all(feature = "serde", feature = "serde_json"))]
fn convert(s: &Settings, stats: &mut Statistics) -> Result<Counters, Box<dyn error::Error>> {
    use serde::ser::{SerializeSeq, Serializer};
    use std::fs;
    use std::io::{BufWriter, Write};

    let mut p = Parser::from_file(&s.input)?;
    if let Some(dir) = s.output.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    println!(
        "Starting conversion from {} to {}...",
        s.input.display(),
        s.output.display()
    );

    let mut json = serde_json::Serializer::pretty(BufWriter::new(fs::File::create(&s.output)?));
    let mut seq = json.serialize_seq(None)?;
    let counters = p.run(|entry| -> Result<(), Box<dyn error::Error>> {
        stats.observe(&entry);
        if s.selects(&entry) {
            seq.serialize_element(&entry)?;
        }
        Ok(())
    })?;
    seq.end()?;

    let mut out = json.into_inner();
    writeln!(out)?;
    out.flush()?;
    Ok(counters)
}

fn main() -> Result<(), Box<dyn error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let settings = Settings::parse();

    let mut stats = Statistics::new();
    let counters = convert(&settings, &mut stats)?;

    println!();
    println!("{}", stats.report(counters));
    if settings.years {
        print!("{}", YearTable(&stats));
    }

    Ok(())
}
