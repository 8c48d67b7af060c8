//! Slateboard command-line utility.
//!
//! Works against the default board storage directory:
//!
//! ```text
//! slateboard list
//! slateboard new <name> <width> <height>
//! slateboard export <id> <output.png>
//! slateboard delete <id>
//! ```

use pollster::block_on;
use slateboard_core::storage::{FileStorage, Storage};
use slateboard_core::Board;
use std::error::Error;
use std::process::ExitCode;

const USAGE: &str = "usage: slateboard <list | new <name> <width> <height> | export <id> <out.png> | delete <id>>";

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let storage = FileStorage::default_location()?;
    log::debug!("using board storage at {}", storage.base_path().display());

    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["list"] => {
            let mut ids = block_on(storage.list())?;
            ids.sort();
            for id in &ids {
                match block_on(storage.load(id)) {
                    Ok(doc) => println!("{}  {}  {}x{}", id, doc.name, doc.width, doc.height),
                    Err(e) => {
                        log::warn!("skipping unreadable board {}: {}", id, e);
                    }
                }
            }
            if ids.is_empty() {
                println!("no boards saved");
            }
            Ok(())
        }
        ["new", name, width, height] => {
            let width: u32 = width.parse()?;
            let height: u32 = height.parse()?;
            let mut board = Board::new(width, height);
            board.name = name.to_string();
            let doc = board.to_document()?;
            block_on(storage.save(&doc.id, &doc))?;
            println!("{}", doc.id);
            Ok(())
        }
        ["export", id, out] => {
            let doc = block_on(storage.load(id))?;
            let board = Board::from_document(&doc)?;
            std::fs::write(out, board.export_png()?)?;
            println!("wrote {}", out);
            Ok(())
        }
        ["delete", id] => {
            block_on(storage.delete(id))?;
            Ok(())
        }
        _ => Err(USAGE.into()),
    }
}
