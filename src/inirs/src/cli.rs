// inirs/src/cli.rs

//! Command-line front end, enabled with the `cli` feature.

use crate::IniManager;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "inirs")]
#[command(about = "Read and edit INI files without disturbing their layout", long_about = None)]
#[command(version)]
pub struct Cli {
    /// INI file to operate on (created if missing)
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "INIRS_FILE",
        default_value = "config.ini"
    )]
    pub file: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List section names
    Sections,
    /// Print a value (empty if missing)
    Get { section: String, key: String },
    /// Set a value, optionally with a comment line above it
    Set {
        section: String,
        key: String,
        value: String,
        #[arg(short, long, default_value = "")]
        comment: String,
    },
    /// Replace the comment above a key, keeping its value
    Comment {
        section: String,
        key: String,
        comment: String,
    },
    /// Print the parsed file as JSON
    Dump,
    /// Run a sample editing session against the file
    Demo,
}

/// Run a parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let mut ini = IniManager::open(&cli.file)
        .with_context(|| format!("Failed to open {}", cli.file.display()))?;

    match cli.command {
        Commands::Sections => println!("{}", ini.list_section_names().join("|")),
        Commands::Get { section, key } => println!("{}", ini.get_value(&section, &key)),
        Commands::Set {
            section,
            key,
            value,
            comment,
        } => ini.modify_with_comment(&section, &key, &value, &comment)?,
        Commands::Comment {
            section,
            key,
            comment,
        } => ini.modify_comment(&section, &key, &comment)?,
        Commands::Dump => println!("{}", crate::to_json(ini.document())?),
        Commands::Demo => demo(&mut ini)?,
    }
    Ok(())
}

/// The sample session shipped with the library, replayed on a real file.
fn demo(ini: &mut IniManager) -> anyhow::Result<()> {
    if !ini["rtsp"].key_exists("port") {
        println!("rtsp.port: not exist!\n");
    }
    if !ini.section_exists("math") {
        println!("section of math: not exist\n");
    }
    println!("Got Section Name List: {}\n", ini.list_section_names().join("|"));

    ini.modify_with_comment("head", "title", "inirs", "thanks for using inirs.")?;
    ini.modify_with_comment(
        "head",
        "license",
        "MIT",
        "Permissive license for open-source software distribution.",
    )?;

    ini.modify("rtsp", "port", "554")?;
    ini.modify("rtsp", "port", "555")?;
    ini.modify("rtsp", "ip", "127.0.0.1")?;
    println!("get rtsp port: {}\n", ini["rtsp"].get_value("port"));

    ini.modify_with_comment(
        "rtsp",
        "port",
        "554",
        "this is the listen port for http server.",
    )?;
    ini.modify_comment("rtsp", "port", "this is the listen ip for rtsp server.")?;
    println!("to string:\trtsp.port = {}", ini["rtsp"].get_value("port"));

    ini.modify_with_comment("math", "PI", "3.1415926", "This is pi in mathematics.")?;
    println!("to string:\tmath.PI   = {}", ini["math"].to_string_value("PI"));
    println!("to double:\tmath.PI   = {:.10}", ini["math"].to_double("PI"));
    println!("to int:\t\tmath.PI   = {}", ini["math"].to_int("PI"));

    // Keys in the unnamed section at the head of the file.
    ini.modify_with_comment("", "noSection", "no", "no section test.")?;
    ini.modify_with_comment(
        "",
        "noSection",
        "yes",
        "no section test: add comment later.",
    )?;
    for key in ["key0", "key1", "key2"] {
        ini.modify("", key, "noSectionAndComment")?;
    }

    println!("Got Section Name List: {}", ini.list_section_names().join("|"));
    Ok(())
}
